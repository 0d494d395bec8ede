//! Pipeline tests: loaders against an in-memory store, full runs against
//! temporary document directories.

use std::{fs, path::Path};

use serde_json::{Value, json};

use sanad_core::{record::ScholarRecord, stats::{LoadError, LoadStats}};
use sanad_store_sqlite::SqliteStore;

use crate::{
  Coordinator, RecordSource,
  loaders::{load_hadiths, load_relationships, load_scholar},
};

fn store() -> SqliteStore {
  SqliteStore::open_in_memory().expect("in-memory store")
}

fn record(value: Value) -> ScholarRecord {
  serde_json::from_value(value).expect("valid record")
}

fn write_doc(dir: &Path, file: &str, value: &Value) {
  fs::write(dir.join(file), serde_json::to_vec_pretty(value).unwrap()).unwrap();
}

// ─── Entity loader ───────────────────────────────────────────────────────────

#[test]
fn load_scholar_upserts_row_and_appends_attributes() {
  let s = store();
  let mut stats = LoadStats::default();
  let rec = record(json!({
    "id": 2,
    "name": "Abu Bakr",
    "full_name": "Abu Bakr as-Siddiq",
    "grade": "Companion",
    "biography": {
      "birth": {"date_hijri": "-50", "date_gregorian": "573", "place": "Mecca"},
      "death": {"date_hijri": "13", "place": "Medina", "reason": "illness"},
      "places_of_stay": ["Mecca", "Medina"],
      "area_of_interest": ["Hadith"],
      "tags": ["caliph"]
    }
  }));

  assert!(load_scholar(&s, 2, &rec, &mut stats));
  assert_eq!(stats.scholars_processed, 1);
  assert!(stats.errors.is_empty());

  let row = s.get_scholar(2).unwrap().unwrap();
  assert_eq!(row.name, "Abu Bakr");
  assert_eq!(row.birth_place, "Mecca");
  assert_eq!(row.death_reason, "illness");

  let counts = s.counts().unwrap();
  assert_eq!(counts.places, 2);
  assert_eq!(counts.interests, 1);
  assert_eq!(counts.tags, 1);
}

#[test]
fn absent_fields_become_empty_strings() {
  let s = store();
  let mut stats = LoadStats::default();

  assert!(load_scholar(&s, 9, &record(json!({"id": 9})), &mut stats));

  let row = s.get_scholar(9).unwrap().unwrap();
  assert_eq!(row.name, "");
  assert_eq!(row.death_date_gregorian, "");
}

#[test]
fn reloading_doubles_attributes_but_not_the_row() {
  let s = store();
  let mut stats = LoadStats::default();
  let rec = record(json!({
    "id": 4,
    "name": "Uthman",
    "biography": {"places_of_stay": ["Medina"]}
  }));

  assert!(load_scholar(&s, 4, &rec, &mut stats));
  assert!(load_scholar(&s, 4, &rec, &mut stats));

  let counts = s.counts().unwrap();
  assert_eq!(counts.scholars, 1);
  assert_eq!(counts.places, 2);
  assert_eq!(stats.scholars_processed, 2);
}

// ─── Relationship loader ─────────────────────────────────────────────────────

#[test]
fn bad_references_skip_only_themselves() {
  let s = store();
  let mut stats = LoadStats::default();
  let rec = record(json!({
    "id": 2,
    "children": [5, "not-a-number", {"id": 7}, null],
    "teachers": ["11"]
  }));

  load_relationships(&s, 2, &rec, &mut stats);

  // k = 5 references, j = 2 unparsable: exactly 3 edges and 2 errors.
  assert_eq!(stats.relationships_created, 3);
  assert_eq!(stats.errors.len(), 2);
  assert!(stats
    .errors
    .iter()
    .all(|e| matches!(e, LoadError::Relationship { scholar_id: 2, .. })));
  assert_eq!(s.counts().unwrap().relationships, 3);
}

#[test]
fn forward_references_to_unloaded_scholars_are_accepted() {
  let s = store();
  let mut stats = LoadStats::default();
  // Only scholar 2 is loaded; 5, 7, and 11 come from documents later in
  // the set (or from none at all). Declared foreign keys must not reject
  // these single-pass inserts.
  let rec = record(json!({
    "id": 2,
    "name": "Abu Bakr",
    "children": [5],
    "teachers": [11],
    "hadiths": [{"chain": [7, 5, 2]}]
  }));

  assert!(load_scholar(&s, 2, &rec, &mut stats));
  load_relationships(&s, 2, &rec, &mut stats);
  load_hadiths(&s, 2, &rec.hadiths, &mut stats);

  assert!(stats.errors.is_empty());
  assert_eq!(stats.relationships_created, 2);
  assert_eq!(stats.hadiths_processed, 1);

  let counts = s.counts().unwrap();
  assert_eq!(counts.relationships, 2);
  assert_eq!(counts.chain_links, 3);
}

// ─── Attribution loader ──────────────────────────────────────────────────────

#[test]
fn chain_positions_follow_source_order() {
  let s = store();
  let mut stats = LoadStats::default();
  let rec = record(json!({
    "id": 2,
    "hadiths": [{"hadith_no": "1", "source": "Sahih Bukhari", "chain": [7, 5, 2]}]
  }));

  load_hadiths(&s, 2, &rec.hadiths, &mut stats);

  assert_eq!(stats.hadiths_processed, 1);
  assert_eq!(s.chain_for_hadith(1).unwrap(), vec![(7, 0), (5, 1), (2, 2)]);
}

#[test]
fn reordering_the_chain_reorders_positions() {
  let s = store();
  let mut stats = LoadStats::default();
  let rec = record(json!({
    "id": 2,
    "hadiths": [{"chain": [2, 5, 7]}]
  }));

  load_hadiths(&s, 2, &rec.hadiths, &mut stats);

  assert_eq!(s.chain_for_hadith(1).unwrap(), vec![(2, 0), (5, 1), (7, 2)]);
}

#[test]
fn malformed_chain_entry_skips_one_link_only() {
  let s = store();
  let mut stats = LoadStats::default();
  let rec = record(json!({
    "id": 2,
    "hadiths": [{"chain": [5, "junk", 2]}]
  }));

  load_hadiths(&s, 2, &rec.hadiths, &mut stats);

  // The hadith still counts; the bad entry keeps its positional gap.
  assert_eq!(stats.hadiths_processed, 1);
  assert_eq!(s.chain_for_hadith(1).unwrap(), vec![(5, 0), (2, 2)]);
  assert!(matches!(
    stats.errors.as_slice(),
    [LoadError::ChainLink { position: 1, .. }]
  ));
}

#[test]
fn reloading_hadiths_duplicates_rows() {
  let s = store();
  let mut stats = LoadStats::default();
  let rec = record(json!({
    "id": 2,
    "hadiths": [{"chain": [2]}]
  }));

  load_hadiths(&s, 2, &rec.hadiths, &mut stats);
  load_hadiths(&s, 2, &rec.hadiths, &mut stats);

  // Documented non-idempotence: fresh report rows on every run.
  let counts = s.counts().unwrap();
  assert_eq!(counts.hadiths, 2);
  assert_eq!(counts.chain_links, 2);
}

// ─── Reader ──────────────────────────────────────────────────────────────────

#[test]
fn reader_lists_json_files_sorted() {
  let dir = tempfile::tempdir().unwrap();
  write_doc(dir.path(), "20.json", &json!({"id": 20}));
  write_doc(dir.path(), "3.json", &json!({"id": 3}));
  fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

  let source = RecordSource::from_dir(dir.path()).unwrap();
  assert_eq!(source.len(), 2);

  let names: Vec<_> = source
    .iter()
    .map(|(path, _)| path.file_name().unwrap().to_owned())
    .collect();
  assert_eq!(names, ["20.json", "3.json"]);
}

#[test]
fn reader_missing_directory_is_fatal() {
  let dir = tempfile::tempdir().unwrap();
  let err = RecordSource::from_dir(dir.path().join("nope")).unwrap_err();
  assert!(matches!(err, crate::Error::InputDir { .. }));
}

// ─── Coordinator ─────────────────────────────────────────────────────────────

#[test]
fn end_to_end_single_record() {
  let dir = tempfile::tempdir().unwrap();
  write_doc(
    dir.path(),
    "2.json",
    &json!({
      "id": 2,
      "name": "Abu Bakr",
      "parents": [],
      "children": [{"id": 5}],
      "hadiths": [{"chain": [5, 2]}]
    }),
  );

  let source = RecordSource::from_dir(dir.path()).unwrap();
  let mut coordinator = Coordinator::new(store());
  let summary = coordinator.run(&source).unwrap();

  assert_eq!(summary.stats.scholars_processed, 1);
  assert_eq!(summary.stats.relationships_created, 1);
  assert_eq!(summary.stats.hadiths_processed, 1);
  assert!(summary.stats.errors.is_empty());

  let counts = summary.validation.counts;
  assert_eq!(counts.scholars, 1);
  assert_eq!(counts.relationships, 1);
  assert_eq!(counts.hadiths, 1);
  assert_eq!(counts.chain_links, 2);

  let sample = summary.validation.sample.unwrap();
  assert_eq!(sample.scholar_id, 2);
  assert_eq!(sample.name, "Abu Bakr");
  assert_eq!(sample.hadith_count, 1);

  let s = coordinator.into_store();
  assert_eq!(s.chain_for_hadith(1).unwrap(), vec![(5, 0), (2, 1)]);
}

#[test]
fn validation_counts_after_multiple_records() {
  let dir = tempfile::tempdir().unwrap();
  write_doc(dir.path(), "1.json", &json!({"id": 1, "name": "A"}));
  write_doc(
    dir.path(),
    "2.json",
    &json!({"id": 2, "name": "B", "hadiths": [{"chain": [2]}, {"chain": [1, 2]}]}),
  );
  write_doc(dir.path(), "3.json", &json!({"id": 3, "name": "C"}));

  let source = RecordSource::from_dir(dir.path()).unwrap();
  let summary = Coordinator::new(store()).run(&source).unwrap();

  assert_eq!(summary.validation.counts.scholars, 3);
  assert_eq!(summary.validation.counts.hadiths, 2);
  assert!(summary.validation.db_size_bytes > 0);
}

#[test]
fn record_without_identifier_logs_exactly_one_error() {
  let dir = tempfile::tempdir().unwrap();
  write_doc(
    dir.path(),
    "anon.json",
    &json!({"name": "anonymous", "hadiths": [{"chain": [1]}]}),
  );

  let source = RecordSource::from_dir(dir.path()).unwrap();
  let summary = Coordinator::new(store()).run(&source).unwrap();

  assert_eq!(summary.stats.scholars_processed, 0);
  assert_eq!(summary.stats.hadiths_processed, 0);
  assert!(matches!(
    summary.stats.errors.as_slice(),
    [LoadError::MissingId { .. }]
  ));
  assert_eq!(summary.validation.counts.scholars, 0);
  assert_eq!(summary.validation.counts.hadiths, 0);
}

#[test]
fn unreadable_document_does_not_abort_the_run() {
  let dir = tempfile::tempdir().unwrap();
  fs::write(dir.path().join("bad.json"), "{ not json").unwrap();
  write_doc(dir.path(), "good.json", &json!({"id": 7, "name": "Ali"}));

  let source = RecordSource::from_dir(dir.path()).unwrap();
  let summary = Coordinator::new(store()).run(&source).unwrap();

  assert_eq!(summary.stats.scholars_processed, 1);
  assert!(matches!(
    summary.stats.errors.as_slice(),
    [LoadError::Record { .. }]
  ));
}

#[test]
fn small_batches_commit_every_record() {
  let dir = tempfile::tempdir().unwrap();
  for id in 0..5 {
    write_doc(dir.path(), &format!("{id}.json"), &json!({"id": id, "name": "x"}));
  }

  let source = RecordSource::from_dir(dir.path()).unwrap();
  let summary = Coordinator::new(store())
    .with_batch_size(2)
    .run(&source)
    .unwrap();

  assert_eq!(summary.stats.scholars_processed, 5);
  assert_eq!(summary.validation.counts.scholars, 5);
}

#[test]
fn empty_source_yields_empty_summary() {
  let dir = tempfile::tempdir().unwrap();
  let source = RecordSource::from_dir(dir.path()).unwrap();

  let summary = Coordinator::new(store()).run(&source).unwrap();

  assert_eq!(summary.stats.scholars_processed, 0);
  assert!(summary.stats.errors.is_empty());
  assert!(summary.validation.sample.is_none());
}

#[test]
fn second_run_is_idempotent_for_scholars_only() {
  let dir = tempfile::tempdir().unwrap();
  write_doc(
    dir.path(),
    "2.json",
    &json!({
      "id": 2,
      "name": "Abu Bakr",
      "biography": {"tags": ["caliph"]},
      "hadiths": [{"chain": [2]}]
    }),
  );
  let source = RecordSource::from_dir(dir.path()).unwrap();

  let mut coordinator = Coordinator::new(store());
  coordinator.run(&source).unwrap();
  let summary = coordinator.run(&source).unwrap();

  let counts = summary.validation.counts;
  assert_eq!(counts.scholars, 1); // upsert
  assert_eq!(counts.tags, 2); // append
  assert_eq!(counts.hadiths, 2); // append
  assert_eq!(counts.chain_links, 2);
}
