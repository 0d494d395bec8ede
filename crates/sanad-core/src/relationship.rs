//! The six directed relationship kinds linking one scholar to another.

use serde::{Deserialize, Serialize};

/// Discriminator for a `scholar_relationships` edge.
///
/// Edges are directed and not required to be symmetric: a `Child` edge does
/// not imply the reciprocal `Parent` edge unless the source recorded both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
  Parent,
  Child,
  Spouse,
  Sibling,
  Teacher,
  Student,
}

impl RelationshipKind {
  /// All kinds, in the order the loader walks a document's lists.
  pub const ALL: [RelationshipKind; 6] = [
    RelationshipKind::Parent,
    RelationshipKind::Child,
    RelationshipKind::Spouse,
    RelationshipKind::Sibling,
    RelationshipKind::Teacher,
    RelationshipKind::Student,
  ];

  /// The string stored in the `relationship_type` column.
  pub fn as_str(self) -> &'static str {
    match self {
      RelationshipKind::Parent => "parent",
      RelationshipKind::Child => "child",
      RelationshipKind::Spouse => "spouse",
      RelationshipKind::Sibling => "sibling",
      RelationshipKind::Teacher => "teacher",
      RelationshipKind::Student => "student",
    }
  }
}

impl std::fmt::Display for RelationshipKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}
