use std::io;

use pnparse_dragon::DragonError;
use thiserror::Error;

/// Error type for a patch notes parse.
///
/// There is no partial output: any of these aborts the whole parse.
#[derive(Debug, Error)]
pub enum ParseError {
  #[error(
    "Invalid patch identifier `{input}`, expected something like `13.4`"
  )]
  Format { input: String },

  #[error("Expected HTTP 200 from {url}, got HTTP {status}")]
  Http { url: String, status: u16 },

  #[error("Failed to fetch {url}: {message}")]
  Transport { url: String, message: String },

  #[error("Reference data error: {0}")]
  Reference(#[from] DragonError),

  #[error("Unexpected page structure in `{section}` ({subject}): {detail}")]
  Structural {
    section: String,
    subject: String,
    detail:  String,
  },

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),
}

impl ParseError {
  pub(crate) fn structural(
    section: impl Into<String>,
    subject: impl Into<String>,
    detail: impl Into<String>,
  ) -> Self {
    Self::Structural {
      section: section.into(),
      subject: subject.into(),
      detail:  detail.into(),
    }
  }
}

/// A classifier could not make sense of a content block.
///
/// Carries the subject being processed; the driver adds the section.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{subject}: {detail}")]
pub struct StructuralError {
  pub subject: String,
  pub detail:  String,
}

impl StructuralError {
  pub(crate) fn new(
    subject: impl Into<String>,
    detail: impl Into<String>,
  ) -> Self {
    Self {
      subject: subject.into(),
      detail:  detail.into(),
    }
  }

  #[must_use]
  pub fn in_section(self, section: &str) -> ParseError {
    ParseError::structural(section, self.subject, self.detail)
  }
}
