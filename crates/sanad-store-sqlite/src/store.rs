//! [`SqliteStore`] — the SQLite store the conversion pipeline writes into.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension as _, params};

use sanad_core::{relationship::RelationshipKind, stats::StoreCounts};

use crate::{Error, Result, schema::SCHEMA};

// ─── Row payloads ────────────────────────────────────────────────────────────

/// Column values for a scholar upsert. The identifier is externally assigned
/// and taken from the source document verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScholarRow {
  pub id:                   i64,
  pub name:                 String,
  pub full_name:            String,
  pub grade:                String,
  pub birth_date_hijri:     String,
  pub birth_date_gregorian: String,
  pub birth_place:          String,
  pub death_date_hijri:     String,
  pub death_date_gregorian: String,
  pub death_place:          String,
  pub death_reason:         String,
}

/// Column values for a hadith insert. The store assigns the row id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HadithRow {
  pub hadith_no:  String,
  pub source:     String,
  pub chapter:    String,
  pub chapter_no: String,
  pub text_ar:    String,
  pub text_en:    String,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A scholar store backed by a single SQLite file (or memory, for tests).
///
/// All access is synchronous on the owning thread; batching is expressed as
/// explicit [`begin_batch`](Self::begin_batch) /
/// [`commit_batch`](Self::commit_batch) boundaries.
#[derive(Debug)]
pub struct SqliteStore {
  conn: Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  ///
  /// A structural failure here is fatal to the whole run; there is no
  /// partial-schema state to recover from.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = Connection::open(path)?;
    let store = Self { conn };
    store.ensure_schema()?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub fn open_in_memory() -> Result<Self> {
    let conn = Connection::open_in_memory()?;
    let store = Self { conn };
    store.ensure_schema()?;
    Ok(store)
  }

  /// Open a store that must already exist, without touching the schema.
  /// Used by validation-only runs, which issue no writes at all.
  pub fn open_existing(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if !path.exists() {
      return Err(Error::StoreNotFound(path.to_owned()));
    }
    Ok(Self { conn: Connection::open(path)? })
  }

  fn ensure_schema(&self) -> Result<()> {
    self.conn.execute_batch(SCHEMA)?;
    Ok(())
  }

  // ── Batch boundaries ──────────────────────────────────────────────────────

  /// Begin a write batch. Writes issued before the matching
  /// [`commit_batch`](Self::commit_batch) are invisible to other connections
  /// and are lost if the process dies.
  pub fn begin_batch(&self) -> Result<()> {
    self.conn.execute_batch("BEGIN")?;
    Ok(())
  }

  /// Flush the current batch. This is the only operation expected to block
  /// for a non-trivial duration.
  pub fn commit_batch(&self) -> Result<()> {
    self.conn.execute_batch("COMMIT")?;
    Ok(())
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// Insert-or-replace the scholar row and its full-text entry.
  ///
  /// Idempotent: loading the same document twice leaves one identical row
  /// and one identical FTS entry. The FTS side is delete-then-insert so the
  /// index never accumulates stale copies.
  pub fn upsert_scholar(&self, row: &ScholarRow) -> Result<()> {
    self.conn.execute(
      "INSERT OR REPLACE INTO scholars
         (id, name, full_name, grade,
          birth_date_hijri, birth_date_gregorian, birth_place,
          death_date_hijri, death_date_gregorian, death_place, death_reason)
       VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
      params![
        row.id,
        row.name,
        row.full_name,
        row.grade,
        row.birth_date_hijri,
        row.birth_date_gregorian,
        row.birth_place,
        row.death_date_hijri,
        row.death_date_gregorian,
        row.death_place,
        row.death_reason,
      ],
    )?;

    self
      .conn
      .execute("DELETE FROM scholars_fts WHERE rowid = ?1", params![row.id])?;
    self.conn.execute(
      "INSERT INTO scholars_fts (rowid, name, full_name) VALUES (?1, ?2, ?3)",
      params![row.id, row.name, row.full_name],
    )?;
    Ok(())
  }

  /// Append a place-of-stay row. Not an upsert: callers needing clean
  /// re-loads must clear the attribute tables first.
  pub fn insert_place(&self, scholar_id: i64, place: &str) -> Result<()> {
    self.conn.execute(
      "INSERT INTO scholar_places (scholar_id, place) VALUES (?1, ?2)",
      params![scholar_id, place],
    )?;
    Ok(())
  }

  /// Append an area-of-interest row.
  pub fn insert_interest(&self, scholar_id: i64, interest: &str) -> Result<()> {
    self.conn.execute(
      "INSERT INTO scholar_interests (scholar_id, interest) VALUES (?1, ?2)",
      params![scholar_id, interest],
    )?;
    Ok(())
  }

  /// Append a free-text tag row.
  pub fn insert_tag(&self, scholar_id: i64, tag: &str) -> Result<()> {
    self.conn.execute(
      "INSERT INTO scholar_tags (scholar_id, tag) VALUES (?1, ?2)",
      params![scholar_id, tag],
    )?;
    Ok(())
  }

  /// Append one directed relationship edge. The related scholar need not
  /// exist yet; forward references across documents are expected.
  pub fn insert_relationship(
    &self,
    scholar_id: i64,
    related_scholar_id: i64,
    kind: RelationshipKind,
  ) -> Result<()> {
    self.conn.execute(
      "INSERT INTO scholar_relationships
         (scholar_id, related_scholar_id, relationship_type)
       VALUES (?1, ?2, ?3)",
      params![scholar_id, related_scholar_id, kind.as_str()],
    )?;
    Ok(())
  }

  /// Insert a hadith row and return its store-generated id.
  pub fn insert_hadith(&self, row: &HadithRow) -> Result<i64> {
    self.conn.execute(
      "INSERT INTO hadiths (hadith_no, source, chapter, chapter_no, text_ar, text_en)
       VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
      params![
        row.hadith_no,
        row.source,
        row.chapter,
        row.chapter_no,
        row.text_ar,
        row.text_en,
      ],
    )?;
    Ok(self.conn.last_insert_rowid())
  }

  /// Append one narration-chain link at the given zero-based position.
  pub fn insert_chain_link(
    &self,
    hadith_id: i64,
    scholar_id: i64,
    position: usize,
  ) -> Result<()> {
    self.conn.execute(
      "INSERT INTO hadith_chains (hadith_id, scholar_id, position)
       VALUES (?1, ?2, ?3)",
      params![hadith_id, scholar_id, position as i64],
    )?;
    Ok(())
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// Fetch one scholar row by identifier.
  pub fn get_scholar(&self, id: i64) -> Result<Option<ScholarRow>> {
    let row = self
      .conn
      .query_row(
        "SELECT id, name, full_name, grade,
                birth_date_hijri, birth_date_gregorian, birth_place,
                death_date_hijri, death_date_gregorian, death_place, death_reason
         FROM scholars WHERE id = ?1",
        params![id],
        |r| {
          Ok(ScholarRow {
            id:                   r.get(0)?,
            name:                 r.get(1)?,
            full_name:            r.get(2)?,
            grade:                r.get(3)?,
            birth_date_hijri:     r.get(4)?,
            birth_date_gregorian: r.get(5)?,
            birth_place:          r.get(6)?,
            death_date_hijri:     r.get(7)?,
            death_date_gregorian: r.get(8)?,
            death_place:          r.get(9)?,
            death_reason:         r.get(10)?,
          })
        },
      )
      .optional()?;
    Ok(row)
  }

  /// The narration chain of one hadith as `(scholar_id, position)`, ordered
  /// by position.
  pub fn chain_for_hadith(&self, hadith_id: i64) -> Result<Vec<(i64, i64)>> {
    let mut stmt = self.conn.prepare(
      "SELECT scholar_id, position FROM hadith_chains
       WHERE hadith_id = ?1 ORDER BY position",
    )?;
    let links = stmt
      .query_map(params![hadith_id], |r| Ok((r.get(0)?, r.get(1)?)))?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(links)
  }

  /// Full-text match over scholar names; returns matching scholar ids.
  pub fn search_scholars(&self, query: &str) -> Result<Vec<i64>> {
    let mut stmt = self.conn.prepare(
      "SELECT rowid FROM scholars_fts WHERE scholars_fts MATCH ?1 ORDER BY rank",
    )?;
    let ids = stmt
      .query_map(params![query], |r| r.get(0))?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(ids)
  }

  // ── Validation queries ────────────────────────────────────────────────────

  /// Row counts for every table.
  pub fn counts(&self) -> Result<StoreCounts> {
    Ok(StoreCounts {
      scholars:      self.count("scholars")?,
      relationships: self.count("scholar_relationships")?,
      places:        self.count("scholar_places")?,
      interests:     self.count("scholar_interests")?,
      tags:          self.count("scholar_tags")?,
      hadiths:       self.count("hadiths")?,
      chain_links:   self.count("hadith_chains")?,
    })
  }

  fn count(&self, table: &'static str) -> Result<u64> {
    let n: i64 = self
      .conn
      .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?;
    Ok(n as u64)
  }

  /// The lowest scholar identifier present, if any.
  pub fn first_scholar_id(&self) -> Result<Option<i64>> {
    let id: Option<i64> =
      self
        .conn
        .query_row("SELECT MIN(id) FROM scholars", [], |r| r.get(0))?;
    Ok(id)
  }

  /// Representative validation join: the scholar's name and the number of
  /// distinct hadiths that name it anywhere in their narration chain.
  pub fn hadith_count_for_scholar(
    &self,
    scholar_id: i64,
  ) -> Result<Option<(String, u64)>> {
    let row = self
      .conn
      .query_row(
        "SELECT s.name, COUNT(DISTINCT hc.hadith_id)
         FROM scholars s
         LEFT JOIN hadith_chains hc ON hc.scholar_id = s.id
         WHERE s.id = ?1
         GROUP BY s.id",
        params![scholar_id],
        |r| Ok((r.get::<_, String>(0)?, r.get::<_, i64>(1)?)),
      )
      .optional()?;
    Ok(row.map(|(name, n)| (name, n as u64)))
  }

  /// Store size in bytes (`page_count * page_size`), meaningful for both
  /// file-backed and in-memory stores.
  pub fn size_bytes(&self) -> Result<u64> {
    let pages: i64 = self.conn.query_row("PRAGMA page_count", [], |r| r.get(0))?;
    let page_size: i64 = self.conn.query_row("PRAGMA page_size", [], |r| r.get(0))?;
    Ok((pages * page_size) as u64)
  }
}
