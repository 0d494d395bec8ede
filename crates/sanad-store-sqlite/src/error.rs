//! Error type for `sanad-store-sqlite`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  /// Validation-only mode refuses to create a store that does not exist.
  #[error("store not found: {0}")]
  StoreNotFound(PathBuf),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
