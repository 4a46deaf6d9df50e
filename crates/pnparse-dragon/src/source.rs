//! Where catalog documents come from.
use std::collections::HashMap;

use serde_json::Value;

use crate::error::DragonError;

/// A source of JSON catalog documents, addressed by URL.
pub trait CatalogSource: Send + Sync {
  /// Fetch and decode the JSON document behind `url`.
  ///
  /// # Errors
  ///
  /// Returns an error if the document cannot be fetched or is not JSON.
  fn fetch_json(&self, url: &str) -> Result<Value, DragonError>;
}

/// Blocking HTTP source. One attempt per request; retrying is the caller's
/// business.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpSource;

impl CatalogSource for HttpSource {
  fn fetch_json(&self, url: &str) -> Result<Value, DragonError> {
    log::debug!("GET {url}");
    let response = match ureq::get(url).call() {
      Ok(response) => response,
      Err(ureq::Error::Status(status, _)) => {
        return Err(DragonError::Http {
          url: url.to_string(),
          status,
        });
      },
      Err(other) => {
        return Err(DragonError::Transport {
          url:     url.to_string(),
          message: other.to_string(),
        });
      },
    };

    let body = response.into_string()?;
    serde_json::from_str(&body).map_err(|source| {
      DragonError::Decode {
        url: url.to_string(),
        source,
      }
    })
  }
}

/// In-memory source keyed by URL, for offline use and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
  documents: HashMap<String, Value>,
}

impl StaticSource {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Register `document` under `url`, replacing anything already there.
  #[must_use]
  pub fn with(mut self, url: impl Into<String>, document: Value) -> Self {
    self.documents.insert(url.into(), document);
    self
  }
}

impl CatalogSource for StaticSource {
  fn fetch_json(&self, url: &str) -> Result<Value, DragonError> {
    self.documents.get(url).cloned().ok_or_else(|| {
      DragonError::Http {
        url:    url.to_string(),
        status: 404,
      }
    })
  }
}
