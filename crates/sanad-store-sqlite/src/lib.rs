//! SQLite backend for the sanad scholar store.
//!
//! A thin, synchronous wrapper over [`rusqlite`]: the conversion pipeline is
//! a single-threaded batch process, so every operation runs directly on one
//! connection and batching is expressed as explicit transaction boundaries.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{HadithRow, ScholarRow, SqliteStore};
