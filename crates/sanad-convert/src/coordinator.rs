//! The load coordinator: drives reader → loaders with batched commits,
//! accumulates statistics, and runs the post-load validation queries.

use std::path::Path;

use chrono::Utc;
use tracing::{debug, info, warn};

use sanad_core::{
  record::ScholarRecord,
  stats::{ChainSample, LoadError, LoadStats, Summary, Validation},
};
use sanad_store_sqlite::SqliteStore;

use crate::{
  Result,
  loaders::{load_hadiths, load_relationships, load_scholar},
  reader::{ReadError, RecordSource},
};

/// Records per commit. Matches the upstream converter's cadence; large
/// enough to amortise WAL overhead, small enough to bound the redo window
/// after a crash.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Owns the store and one run's statistics; single-threaded by design.
///
/// Commits are batched, not per-record: a record whose later writes fail
/// keeps its earlier writes (at-least-once, not atomic-per-record), and a
/// killed process loses only the in-flight batch. Scholar upserts make
/// re-runs safe; hadith and chain inserts always append, so resuming
/// against a non-empty store duplicates report rows.
pub struct Coordinator {
  store: SqliteStore,
  batch_size: usize,
}

impl Coordinator {
  pub fn new(store: SqliteStore) -> Self {
    Self { store, batch_size: DEFAULT_BATCH_SIZE }
  }

  pub fn with_batch_size(mut self, batch_size: usize) -> Self {
    self.batch_size = batch_size.max(1);
    self
  }

  /// Convert every record in `source` and return the run summary.
  ///
  /// Only store-level failures abort; anything that goes wrong inside a
  /// single record lands in the summary's error list.
  pub fn run(&mut self, source: &RecordSource) -> Result<Summary> {
    let total = source.len();
    info!(total, "starting conversion run");

    let mut stats = LoadStats::default();
    let mut in_batch = 0usize;
    let mut seen = 0usize;

    self.store.begin_batch()?;
    for (path, parsed) in source.iter() {
      self.load_record(path, parsed, &mut stats);
      seen += 1;
      in_batch += 1;
      if in_batch >= self.batch_size {
        self.store.commit_batch()?;
        debug!(processed = seen, total, "batch committed");
        self.store.begin_batch()?;
        in_batch = 0;
      }
    }
    self.store.commit_batch()?;

    let validation = validate(&self.store)?;
    info!(
      scholars = stats.scholars_processed,
      hadiths = stats.hadiths_processed,
      relationships = stats.relationships_created,
      errors = stats.errors.len(),
      "conversion run finished"
    );

    Ok(Summary { generated_at: Utc::now(), stats, validation })
  }

  /// Hand the store back for follow-up queries.
  pub fn into_store(self) -> SqliteStore {
    self.store
  }

  fn load_record(
    &self,
    path: &Path,
    parsed: Result<ScholarRecord, ReadError>,
    stats: &mut LoadStats,
  ) {
    let source_ref = path.display().to_string();

    let record = match parsed {
      Ok(record) => record,
      Err(e) => {
        warn!(source = %source_ref, error = %e, "unreadable document");
        stats.errors.push(LoadError::Record {
          source_ref,
          message: e.to_string(),
        });
        return;
      }
    };

    let Some(id) = record.scholar_id() else {
      warn!(source = %source_ref, "document has no usable identifier");
      stats.errors.push(LoadError::MissingId { source_ref });
      return;
    };

    // A failed scholar row skips the rest of the record; one of the six
    // lists or one embedded hadith failing does not.
    if !load_scholar(&self.store, id, &record, stats) {
      return;
    }
    load_relationships(&self.store, id, &record, stats);
    if !record.hadiths.is_empty() {
      load_hadiths(&self.store, id, &record.hadiths, stats);
    }
  }
}

/// The read-only post-load validation pass: row counts for every table, the
/// store size, and one representative chain-membership join. Also serves
/// validation-only runs against an existing store.
pub fn validate(store: &SqliteStore) -> Result<Validation> {
  let counts = store.counts()?;
  let sample = match store.first_scholar_id()? {
    Some(scholar_id) => store.hadith_count_for_scholar(scholar_id)?.map(
      |(name, hadith_count)| ChainSample { scholar_id, name, hadith_count },
    ),
    None => None,
  };
  Ok(Validation {
    counts,
    db_size_bytes: store.size_bytes()?,
    sample,
  })
}
