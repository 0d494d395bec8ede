//! Error type for `sanad-convert`.
//!
//! Only fatal conditions live here; everything recoverable is a
//! [`sanad_core::stats::LoadError`] value inside the run statistics.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("store error: {0}")]
  Store(#[from] sanad_store_sqlite::Error),

  #[error("cannot read input directory {path}: {source}")]
  InputDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
