//! Getting the patch notes page.
use std::collections::HashMap;

use crate::error::ParseError;

/// Something that can return the HTML behind a URL.
pub trait PageFetcher {
  /// Fetch `url` and return its body.
  ///
  /// # Errors
  ///
  /// Returns [`ParseError::Http`] for a non-200 answer and
  /// [`ParseError::Transport`] when no answer arrives at all.
  fn fetch(&self, url: &str) -> Result<String, ParseError>;
}

/// Blocking HTTP GET, one attempt.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpFetcher;

impl PageFetcher for HttpFetcher {
  fn fetch(&self, url: &str) -> Result<String, ParseError> {
    log::debug!("GET {url}");
    match ureq::get(url).call() {
      Ok(response) if response.status() == 200 => Ok(response.into_string()?),
      Ok(response) => {
        Err(ParseError::Http {
          url:    url.to_string(),
          status: response.status(),
        })
      },
      Err(ureq::Error::Status(status, _)) => {
        Err(ParseError::Http {
          url: url.to_string(),
          status,
        })
      },
      Err(other) => {
        Err(ParseError::Transport {
          url:     url.to_string(),
          message: other.to_string(),
        })
      },
    }
  }
}

/// Pages held in memory, keyed by URL. Anything else is a 404.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
  pages: HashMap<String, String>,
}

impl StaticFetcher {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn with(
    mut self,
    url: impl Into<String>,
    html: impl Into<String>,
  ) -> Self {
    self.pages.insert(url.into(), html.into());
    self
  }
}

impl PageFetcher for StaticFetcher {
  fn fetch(&self, url: &str) -> Result<String, ParseError> {
    self.pages.get(url).cloned().ok_or_else(|| {
      ParseError::Http {
        url:    url.to_string(),
        status: 404,
      }
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_static_fetcher() {
    let fetcher =
      StaticFetcher::new().with("https://example.com/a", "<p>a</p>");

    assert_eq!(
      fetcher.fetch("https://example.com/a").ok().as_deref(),
      Some("<p>a</p>")
    );
    assert!(matches!(
      fetcher.fetch("https://example.com/b"),
      Err(ParseError::Http { status: 404, .. })
    ));
  }
}
