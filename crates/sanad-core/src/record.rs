//! Parsed scholar document model.
//!
//! Documents arrive as self-contained nested JSON, one file per scholar,
//! produced by the upstream extraction pipeline. The model is deliberately
//! lenient: every field except the identifier may be absent and defaults to
//! an empty string or list, and fields the source encodes inconsistently
//! (identifiers, reference lists, numeric labels) are accepted in every
//! shape seen in the wild.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::relationship::RelationshipKind;

/// One scholar document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScholarRecord {
  /// Externally assigned identifier, kept as a raw value because a handful
  /// of source files encode it as a decimal string rather than a number.
  #[serde(default)]
  pub id: Value,
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub full_name: String,
  #[serde(default)]
  pub grade: String,
  #[serde(default)]
  pub biography: Biography,
  #[serde(default)]
  pub parents: Vec<Value>,
  #[serde(default)]
  pub children: Vec<Value>,
  #[serde(default)]
  pub spouses: Vec<Value>,
  #[serde(default)]
  pub siblings: Vec<Value>,
  #[serde(default)]
  pub teachers: Vec<Value>,
  #[serde(default)]
  pub students: Vec<Value>,
  #[serde(default)]
  pub hadiths: Vec<HadithRecord>,
}

impl ScholarRecord {
  /// The scholar's numeric identifier, if the document carries a usable one.
  pub fn scholar_id(&self) -> Option<i64> {
    numeric_id(&self.id)
  }

  /// The six relationship lists paired with their kind, in loader order.
  pub fn relationship_lists(&self) -> [(RelationshipKind, &[Value]); 6] {
    [
      (RelationshipKind::Parent, self.parents.as_slice()),
      (RelationshipKind::Child, self.children.as_slice()),
      (RelationshipKind::Spouse, self.spouses.as_slice()),
      (RelationshipKind::Sibling, self.siblings.as_slice()),
      (RelationshipKind::Teacher, self.teachers.as_slice()),
      (RelationshipKind::Student, self.students.as_slice()),
    ]
  }
}

/// Nested biographical sub-document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Biography {
  #[serde(default)]
  pub birth: LifeEvent,
  #[serde(default)]
  pub death: LifeEvent,
  #[serde(default)]
  pub places_of_stay: Vec<String>,
  #[serde(default)]
  pub area_of_interest: Vec<String>,
  #[serde(default)]
  pub tags: Vec<String>,
}

/// Birth or death details. Dates are opaque strings carried in both
/// calendars; the pipeline never parses them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LifeEvent {
  #[serde(default)]
  pub date_hijri: String,
  #[serde(default)]
  pub date_gregorian: String,
  #[serde(default)]
  pub place: String,
  #[serde(default)]
  pub reason: String,
}

/// One narrated report embedded in a scholar document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HadithRecord {
  /// Report number within its source text; not unique across editions.
  #[serde(default, deserialize_with = "string_or_number")]
  pub hadith_no: String,
  #[serde(default)]
  pub source: String,
  #[serde(default)]
  pub chapter: String,
  #[serde(default, deserialize_with = "string_or_number")]
  pub chapter_no: String,
  #[serde(default)]
  pub text_ar: String,
  #[serde(default)]
  pub text_en: String,
  /// Narration chain, transmitter to transmitter, in source order. Entries
  /// are raw numbers, decimal strings, or objects carrying an `id` field.
  #[serde(default)]
  pub chain: Vec<Value>,
}

/// Extract a numeric identifier from a raw reference value.
///
/// Accepts a JSON number, a decimal string, or an object carrying an `id`
/// field in either of those shapes. Anything else yields `None` and is the
/// caller's recoverable error to log.
pub fn numeric_id(value: &Value) -> Option<i64> {
  match value {
    Value::Number(n) => n.as_i64(),
    Value::String(s) => s.trim().parse().ok(),
    Value::Object(map) => map.get("id").and_then(numeric_id),
    _ => None,
  }
}

/// Accept a string, number, or null where the schema wants a text label.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(match Value::deserialize(deserializer)? {
    Value::String(s) => s,
    Value::Number(n) => n.to_string(),
    Value::Null => String::new(),
    other => other.to_string(),
  })
}
