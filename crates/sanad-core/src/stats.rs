//! Run statistics, recoverable-error records, and the machine-readable
//! summary a conversion run returns.
//!
//! Recoverable failures are values, not unwinding: each loader pushes a
//! [`LoadError`] onto the stats it was handed and carries on. Only
//! store-level failures ever propagate past the coordinator.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::relationship::RelationshipKind;

/// One recoverable failure captured during a load run.
#[derive(Debug, Clone, Error, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LoadError {
  /// The document could not be read or parsed at all.
  #[error("{source_ref}: {message}")]
  Record { source_ref: String, message: String },

  /// The document carries no usable numeric identifier.
  #[error("{source_ref}: missing scholar identifier")]
  MissingId { source_ref: String },

  /// The scholar row or one of its attribute rows could not be written.
  #[error("scholar {id}: {message}")]
  Scholar { id: i64, message: String },

  /// One reference in a relationship list could not be resolved or written.
  #[error("scholar {scholar_id} ({kind}): {message}")]
  Relationship {
    scholar_id: i64,
    kind: RelationshipKind,
    message: String,
  },

  /// A hadith row could not be written; its chain was not attempted.
  #[error("scholar {scholar_id} hadith: {message}")]
  Hadith { scholar_id: i64, message: String },

  /// One narration-chain entry could not be resolved or written.
  #[error("hadith {hadith_id} chain position {position}: {message}")]
  ChainLink {
    hadith_id: i64,
    position: usize,
    message: String,
  },
}

/// Counters accumulated over one conversion run.
///
/// Owned by the coordinator for the duration of the run and passed `&mut`
/// into each loader call — never shared across runs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadStats {
  /// Scholar rows successfully upserted.
  pub scholars_processed: u64,
  /// Hadith rows inserted (counted even when some chain links failed).
  pub hadiths_processed: u64,
  /// Relationship edges inserted.
  pub relationships_created: u64,
  /// Every recoverable failure, in the order it occurred.
  pub errors: Vec<LoadError>,
}

/// Row counts per table, as reported by the post-load validation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreCounts {
  pub scholars: u64,
  pub relationships: u64,
  pub places: u64,
  pub interests: u64,
  pub tags: u64,
  pub hadiths: u64,
  pub chain_links: u64,
}

/// The representative validation join: one scholar and the number of
/// distinct hadiths naming it anywhere in a narration chain.
#[derive(Debug, Clone, Serialize)]
pub struct ChainSample {
  pub scholar_id: i64,
  pub name: String,
  pub hadith_count: u64,
}

/// Result of the read-only validation queries.
#[derive(Debug, Clone, Serialize)]
pub struct Validation {
  pub counts: StoreCounts,
  pub db_size_bytes: u64,
  /// Absent when the store holds no scholars.
  pub sample: Option<ChainSample>,
}

/// Final report for one conversion run.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
  pub generated_at: DateTime<Utc>,
  pub stats: LoadStats,
  pub validation: Validation,
}
