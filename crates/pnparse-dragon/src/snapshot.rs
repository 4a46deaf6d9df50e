//! Immutable, per-version view of the reference catalogs.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// What a subject name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubjectKind {
  /// A playable champion.
  Character,
  /// An item.
  Equipment,
  /// A rune or rune tree.
  Rune,
  /// A summoner spell.
  AuxiliaryAbility,
  /// None of the above.
  Unknown,
}

/// One catalog record. Only `name` is interpreted, the rest is carried
/// through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
  pub name:   String,
  #[serde(flatten)]
  pub fields: Map<String, Value>,
}

impl CatalogEntry {
  #[must_use]
  pub fn named(name: impl Into<String>) -> Self {
    Self {
      name:   name.into(),
      fields: Map::new(),
    }
  }
}

/// The four name catalogs of one upstream version, plus a name index built
/// once at construction.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSnapshot {
  version:   String,
  champions: Vec<CatalogEntry>,
  items:     Vec<CatalogEntry>,
  runes:     Vec<CatalogEntry>,
  spells:    Vec<CatalogEntry>,
  index:     HashMap<String, SubjectKind>,
}

impl ReferenceSnapshot {
  /// Build a snapshot and its name index.
  ///
  /// A name present in several catalogs resolves to the first of champion,
  /// item, rune, summoner spell.
  #[must_use]
  pub fn new(
    version: impl Into<String>,
    champions: Vec<CatalogEntry>,
    items: Vec<CatalogEntry>,
    runes: Vec<CatalogEntry>,
    spells: Vec<CatalogEntry>,
  ) -> Self {
    let mut index = HashMap::new();
    let catalogs = [
      (&champions, SubjectKind::Character),
      (&items, SubjectKind::Equipment),
      (&runes, SubjectKind::Rune),
      (&spells, SubjectKind::AuxiliaryAbility),
    ];
    for (catalog, kind) in catalogs {
      for entry in catalog {
        index.entry(entry.name.clone()).or_insert(kind);
      }
    }

    Self {
      version: version.into(),
      champions,
      items,
      runes,
      spells,
      index,
    }
  }

  /// A snapshot with no version and no entries; every name is unknown.
  #[must_use]
  pub fn empty() -> Self {
    Self::default()
  }

  /// Upstream version token, empty for [`Self::empty`].
  #[must_use]
  pub fn version(&self) -> &str {
    &self.version
  }

  #[must_use]
  pub fn champions(&self) -> &[CatalogEntry] {
    &self.champions
  }

  #[must_use]
  pub fn items(&self) -> &[CatalogEntry] {
    &self.items
  }

  #[must_use]
  pub fn runes(&self) -> &[CatalogEntry] {
    &self.runes
  }

  #[must_use]
  pub fn spells(&self) -> &[CatalogEntry] {
    &self.spells
  }

  #[must_use]
  pub fn kind_of(&self, name: &str) -> SubjectKind {
    self.index.get(name).copied().unwrap_or(SubjectKind::Unknown)
  }

  #[must_use]
  pub fn is(&self, name: &str, kind: SubjectKind) -> bool {
    self.kind_of(name) == kind
  }
}
