//! SQL schema for the sanad SQLite store.
//!
//! Executed on every open. Create-if-not-exists throughout: safe to run
//! against an existing store, never drops or truncates data.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
///
/// Foreign keys are declared for documentation and tooling but enforcement
/// is explicitly disabled: relationship and chain rows routinely reference
/// scholars whose documents have not been loaded yet, and the load is
/// single-pass. Some SQLite builds default the pragma to on, so it must be
/// set, not merely omitted.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = OFF;

CREATE TABLE IF NOT EXISTS scholars (
    id                   INTEGER PRIMARY KEY,
    name                 TEXT NOT NULL,
    full_name            TEXT,
    grade                TEXT,
    birth_date_hijri     TEXT,
    birth_date_gregorian TEXT,
    birth_place          TEXT,
    death_date_hijri     TEXT,
    death_date_gregorian TEXT,
    death_place          TEXT,
    death_reason         TEXT
);

-- Directed edges; symmetry is the source data's responsibility.
CREATE TABLE IF NOT EXISTS scholar_relationships (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    scholar_id         INTEGER NOT NULL REFERENCES scholars(id),
    related_scholar_id INTEGER NOT NULL REFERENCES scholars(id),
    relationship_type  TEXT NOT NULL
);

-- Append-only attribute rows; duplicates across runs are tolerated.
CREATE TABLE IF NOT EXISTS scholar_places (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    scholar_id INTEGER NOT NULL REFERENCES scholars(id),
    place      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS scholar_interests (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    scholar_id INTEGER NOT NULL REFERENCES scholars(id),
    interest   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS scholar_tags (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    scholar_id INTEGER NOT NULL REFERENCES scholars(id),
    tag        TEXT NOT NULL
);

-- The generated id is the only stable handle; (hadith_no, source) is a
-- natural key but legitimately repeats across text editions.
CREATE TABLE IF NOT EXISTS hadiths (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    hadith_no  TEXT NOT NULL,
    source     TEXT NOT NULL,
    chapter    TEXT,
    chapter_no TEXT,
    text_ar    TEXT,
    text_en    TEXT
);

-- Narration chain, one row per transmitter, position = zero-based rank in
-- source order.
CREATE TABLE IF NOT EXISTS hadith_chains (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    hadith_id  INTEGER NOT NULL REFERENCES hadiths(id),
    scholar_id INTEGER NOT NULL REFERENCES scholars(id),
    position   INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_scholar_name         ON scholars(name);
CREATE INDEX IF NOT EXISTS idx_scholar_grade        ON scholars(grade);
CREATE INDEX IF NOT EXISTS idx_relationship_scholar ON scholar_relationships(scholar_id);
CREATE INDEX IF NOT EXISTS idx_relationship_related ON scholar_relationships(related_scholar_id);
CREATE INDEX IF NOT EXISTS idx_relationship_type    ON scholar_relationships(relationship_type);
CREATE INDEX IF NOT EXISTS idx_hadith_source        ON hadiths(source);
CREATE INDEX IF NOT EXISTS idx_hadith_chain_hadith  ON hadith_chains(hadith_id);
CREATE INDEX IF NOT EXISTS idx_hadith_chain_scholar ON hadith_chains(scholar_id);

-- Standalone FTS5 index over scholar names, keyed by rowid = scholar id.
-- Refreshed in lockstep with the scholars table on every upsert.
CREATE VIRTUAL TABLE IF NOT EXISTS scholars_fts USING fts5(
    name,
    full_name
);
";
