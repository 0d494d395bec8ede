//! Document reader: per-scholar JSON files, one parse failure never
//! disturbing its neighbours.

use std::{fs, path::{Path, PathBuf}};

use thiserror::Error;

use sanad_core::record::ScholarRecord;

use crate::{Error, Result};

/// Why one document failed to produce a record. Always recoverable; the
/// coordinator logs it and moves on.
#[derive(Debug, Error)]
pub enum ReadError {
  #[error("read failed: {0}")]
  Io(#[from] std::io::Error),

  #[error("parse failed: {0}")]
  Json(#[from] serde_json::Error),
}

/// The set of input documents for one run.
///
/// Files are listed up front and sorted by name so the load order (and
/// therefore batch boundaries) is deterministic across runs.
#[derive(Debug)]
pub struct RecordSource {
  files: Vec<PathBuf>,
}

impl RecordSource {
  /// Collect every `*.json` file directly under `dir`.
  ///
  /// Failure to read the directory itself is fatal; individual files are
  /// not opened until iteration.
  pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|source| Error::InputDir {
      path: dir.to_owned(),
      source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
      let entry = entry.map_err(|source| Error::InputDir {
        path: dir.to_owned(),
        source,
      })?;
      let path = entry.path();
      if path.extension().is_some_and(|ext| ext == "json") {
        files.push(path);
      }
    }
    files.sort();
    Ok(Self { files })
  }

  pub fn len(&self) -> usize {
    self.files.len()
  }

  pub fn is_empty(&self) -> bool {
    self.files.is_empty()
  }

  /// Yield each document with any per-file failure isolated to that file.
  pub fn iter(&self) -> impl Iterator<Item = (&Path, Result<ScholarRecord, ReadError>)> {
    self
      .files
      .iter()
      .map(|path| (path.as_path(), read_record(path)))
  }
}

fn read_record(path: &Path) -> Result<ScholarRecord, ReadError> {
  let text = fs::read_to_string(path)?;
  Ok(serde_json::from_str(&text)?)
}
