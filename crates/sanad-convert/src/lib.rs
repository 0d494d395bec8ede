//! Conversion pipeline: per-scholar JSON documents into the SQLite store.
//!
//! One record is fully processed (scholar row, relationship edges, hadiths
//! and their chains) before the next begins; commits happen at fixed-size
//! batch boundaries. Anything that goes wrong inside a single record or a
//! single edge is recorded and the run continues — only store-level failures
//! abort.

mod coordinator;
mod loaders;
mod reader;

pub mod error;

pub use coordinator::{Coordinator, DEFAULT_BATCH_SIZE, validate};
pub use error::{Error, Result};
pub use reader::{ReadError, RecordSource};

#[cfg(test)]
mod tests;
