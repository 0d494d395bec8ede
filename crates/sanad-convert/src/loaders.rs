//! Per-record loaders: the scholar row with its attribute rows, the six
//! relationship lists, and the embedded hadiths with their narration chains.
//!
//! All three follow the same contract: recoverable failures become
//! [`LoadError`] values on the stats they were handed and never propagate.

use tracing::{debug, warn};

use sanad_core::{
  record::{HadithRecord, ScholarRecord, numeric_id},
  stats::{LoadError, LoadStats},
};
use sanad_store_sqlite::{HadithRow, ScholarRow, SqliteStore};

/// Upsert the scholar row plus its FTS entry, then append the
/// place/interest/tag rows. Returns `false` when the record failed and the
/// coordinator should skip the rest of it.
pub(crate) fn load_scholar(
  store: &SqliteStore,
  id: i64,
  record: &ScholarRecord,
  stats: &mut LoadStats,
) -> bool {
  if let Err(e) = write_scholar(store, id, record) {
    warn!(scholar_id = id, error = %e, "scholar record rejected");
    stats.errors.push(LoadError::Scholar { id, message: e.to_string() });
    return false;
  }
  stats.scholars_processed += 1;
  true
}

fn write_scholar(
  store: &SqliteStore,
  id: i64,
  record: &ScholarRecord,
) -> sanad_store_sqlite::Result<()> {
  let bio = &record.biography;
  let row = ScholarRow {
    id,
    name:                 record.name.clone(),
    full_name:            record.full_name.clone(),
    grade:                record.grade.clone(),
    birth_date_hijri:     bio.birth.date_hijri.clone(),
    birth_date_gregorian: bio.birth.date_gregorian.clone(),
    birth_place:          bio.birth.place.clone(),
    death_date_hijri:     bio.death.date_hijri.clone(),
    death_date_gregorian: bio.death.date_gregorian.clone(),
    death_place:          bio.death.place.clone(),
    death_reason:         bio.death.reason.clone(),
  };
  store.upsert_scholar(&row)?;

  for place in &bio.places_of_stay {
    store.insert_place(id, place)?;
  }
  for interest in &bio.area_of_interest {
    store.insert_interest(id, interest)?;
  }
  for tag in &bio.tags {
    store.insert_tag(id, tag)?;
  }
  Ok(())
}

/// Insert one directed edge per resolvable reference across the six
/// relationship lists. A bad reference is logged and skipped without
/// dropping the rest of its list.
pub(crate) fn load_relationships(
  store: &SqliteStore,
  scholar_id: i64,
  record: &ScholarRecord,
  stats: &mut LoadStats,
) {
  for (kind, references) in record.relationship_lists() {
    for reference in references {
      let Some(related_id) = numeric_id(reference) else {
        debug!(scholar_id, %kind, ?reference, "unresolvable relationship reference");
        stats.errors.push(LoadError::Relationship {
          scholar_id,
          kind,
          message: format!("unresolvable reference: {reference}"),
        });
        continue;
      };
      match store.insert_relationship(scholar_id, related_id, kind) {
        Ok(()) => stats.relationships_created += 1,
        Err(e) => stats.errors.push(LoadError::Relationship {
          scholar_id,
          kind,
          message: e.to_string(),
        }),
      }
    }
  }
}

/// Insert each embedded hadith and its chain links, position = index in the
/// source list. A malformed chain entry skips that single link; the hadith
/// still counts as processed.
pub(crate) fn load_hadiths(
  store: &SqliteStore,
  scholar_id: i64,
  hadiths: &[HadithRecord],
  stats: &mut LoadStats,
) {
  for hadith in hadiths {
    let row = HadithRow {
      hadith_no:  hadith.hadith_no.clone(),
      source:     hadith.source.clone(),
      chapter:    hadith.chapter.clone(),
      chapter_no: hadith.chapter_no.clone(),
      text_ar:    hadith.text_ar.clone(),
      text_en:    hadith.text_en.clone(),
    };
    let hadith_id = match store.insert_hadith(&row) {
      Ok(id) => id,
      Err(e) => {
        warn!(scholar_id, error = %e, "hadith row rejected");
        stats.errors.push(LoadError::Hadith {
          scholar_id,
          message: e.to_string(),
        });
        continue;
      }
    };

    for (position, entry) in hadith.chain.iter().enumerate() {
      let Some(narrator_id) = numeric_id(entry) else {
        debug!(hadith_id, position, ?entry, "unresolvable chain entry");
        stats.errors.push(LoadError::ChainLink {
          hadith_id,
          position,
          message: format!("unresolvable narrator reference: {entry}"),
        });
        continue;
      };
      if let Err(e) = store.insert_chain_link(hadith_id, narrator_id, position) {
        stats.errors.push(LoadError::ChainLink {
          hadith_id,
          position,
          message: e.to_string(),
        });
      }
    }

    stats.hadiths_processed += 1;
  }
}
