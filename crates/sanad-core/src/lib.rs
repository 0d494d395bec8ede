//! Core types for the sanad scholar-document conversion pipeline.
//!
//! This crate is deliberately free of database dependencies. It defines the
//! parsed document model, the relationship vocabulary, and the run-statistics
//! types shared by the store and the conversion pipeline.

pub mod record;
pub mod relationship;
pub mod stats;

pub use record::{Biography, HadithRecord, LifeEvent, ScholarRecord, numeric_id};
pub use relationship::RelationshipKind;
pub use stats::{ChainSample, LoadError, LoadStats, StoreCounts, Summary, Validation};
