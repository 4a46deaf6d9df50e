//! The refreshing catalog provider.
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;

use crate::{
  error::DragonError,
  snapshot::{CatalogEntry, ReferenceSnapshot},
  source::{CatalogSource, HttpSource},
};

/// URL templates for the catalogs. `{}` is replaced by the version token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
  pub versions:  String,
  pub champions: String,
  pub items:     String,
  pub runes:     String,
  pub spells:    String,
}

impl Default for Endpoints {
  fn default() -> Self {
    Self {
      versions:  "https://ddragon.leagueoflegends.com/api/versions.json"
        .to_string(),
      champions: "https://ddragon.leagueoflegends.com/cdn/{}/data/en_US/champion.json"
        .to_string(),
      items:     "https://ddragon.leagueoflegends.com/cdn/{}/data/en_US/item.json"
        .to_string(),
      runes:     "https://ddragon.leagueoflegends.com/cdn/{}/data/en_US/runesReforged.json"
        .to_string(),
      spells:    "https://ddragon.leagueoflegends.com/cdn/{}/data/en_US/summoner.json"
        .to_string(),
    }
  }
}

impl Endpoints {
  fn at(template: &str, version: &str) -> String {
    template.replace("{}", version)
  }
}

/// Reference data provider.
///
/// Holds the current [`ReferenceSnapshot`] behind a lock and replaces it
/// wholesale on refresh, so a reader holding an `Arc` from
/// [`Dragon::snapshot`] never sees a half-updated catalog.
pub struct Dragon {
  source:    Box<dyn CatalogSource>,
  endpoints: Endpoints,
  current:   RwLock<Arc<ReferenceSnapshot>>,
}

impl std::fmt::Debug for Dragon {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Dragon")
      .field("endpoints", &self.endpoints)
      .field("version", &self.snapshot().version())
      .finish_non_exhaustive()
  }
}

impl Dragon {
  /// A provider that fetches over HTTP from `endpoints`.
  #[must_use]
  pub fn new(endpoints: Endpoints) -> Self {
    Self::with_source(HttpSource, endpoints)
  }

  #[must_use]
  pub fn with_source(
    source: impl CatalogSource + 'static,
    endpoints: Endpoints,
  ) -> Self {
    Self {
      source: Box::new(source),
      endpoints,
      current: RwLock::new(Arc::new(ReferenceSnapshot::empty())),
    }
  }

  /// The snapshot currently in use.
  #[must_use]
  pub fn snapshot(&self) -> Arc<ReferenceSnapshot> {
    Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
  }

  /// Version of the current snapshot, `None` before the first refresh.
  #[must_use]
  pub fn version(&self) -> Option<String> {
    let snapshot = self.snapshot();
    (!snapshot.version().is_empty()).then(|| snapshot.version().to_string())
  }

  /// Fetch the catalogs if upstream has a newer version than the cached one.
  ///
  /// Returns whether a new snapshot was installed. On error the previous
  /// snapshot stays in place untouched.
  ///
  /// # Errors
  ///
  /// Returns an error if any catalog cannot be fetched or decoded.
  pub fn refresh(&self) -> Result<bool, DragonError> {
    let latest = self.latest_version()?;
    if self.snapshot().version() == latest {
      log::debug!("Dragon already at version `{latest}`");
      return Ok(false);
    }

    let snapshot = self.fetch(&latest)?;
    *self.current.write().unwrap_or_else(PoisonError::into_inner) =
      Arc::new(snapshot);

    log::info!("Updated dragon to version `{latest}`");
    Ok(true)
  }

  fn latest_version(&self) -> Result<String, DragonError> {
    let url = &self.endpoints.versions;
    let versions = self.source.fetch_json(url)?;
    versions
      .as_array()
      .and_then(|list| list.first())
      .and_then(Value::as_str)
      .map(str::to_string)
      .ok_or_else(|| {
        DragonError::Shape {
          url:    url.clone(),
          detail: "expected a non-empty list of version strings".to_string(),
        }
      })
  }

  fn fetch(&self, version: &str) -> Result<ReferenceSnapshot, DragonError> {
    let champions = self.data_entries(&self.endpoints.champions, version)?;
    let items = self.data_entries(&self.endpoints.items, version)?;
    let spells = self.data_entries(&self.endpoints.spells, version)?;
    let runes = self.rune_entries(version)?;

    log::debug!(
      "Fetched {} champions, {} items, {} runes, {} spells",
      champions.len(),
      items.len(),
      runes.len(),
      spells.len()
    );

    Ok(ReferenceSnapshot::new(
      version, champions, items, runes, spells,
    ))
  }

  /// Entries of a `{"data": {key: entry, ...}}` document, in document order.
  fn data_entries(
    &self,
    template: &str,
    version: &str,
  ) -> Result<Vec<CatalogEntry>, DragonError> {
    let url = Endpoints::at(template, version);
    let mut document = self.source.fetch_json(&url)?;

    let Some(Value::Object(data)) = document.get_mut("data").map(Value::take)
    else {
      return Err(DragonError::Shape {
        url,
        detail: "missing `data` object".to_string(),
      });
    };

    data
      .into_iter()
      .map(|(_, entry)| decode_entry(&url, entry))
      .collect()
  }

  /// Rune trees followed by the runes in each of their slots.
  fn rune_entries(
    &self,
    version: &str,
  ) -> Result<Vec<CatalogEntry>, DragonError> {
    let url = Endpoints::at(&self.endpoints.runes, version);
    let document = self.source.fetch_json(&url)?;

    let Value::Array(trees) = document else {
      return Err(DragonError::Shape {
        url,
        detail: "expected a list of rune trees".to_string(),
      });
    };

    let mut entries = Vec::new();
    for tree in trees {
      let runes: Vec<Value> = tree
        .get("slots")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|slot| slot.get("runes").and_then(Value::as_array))
        .flatten()
        .cloned()
        .collect();

      entries.push(decode_entry(&url, tree)?);
      for rune in runes {
        entries.push(decode_entry(&url, rune)?);
      }
    }
    Ok(entries)
  }
}

fn decode_entry(url: &str, value: Value) -> Result<CatalogEntry, DragonError> {
  serde_json::from_value(value).map_err(|source| {
    DragonError::Decode {
      url: url.to_string(),
      source,
    }
  })
}
