use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;

use crate::{error::ParseError, utils::never_matching_regex};

static PATCH_ID: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^\s*([1-9][0-9]?)[.,-]([1-9][0-9]?)\s*$").unwrap_or_else(|e| {
    log::error!("Failed to compile PATCH_ID regex: {e}");
    never_matching_regex()
  })
});

/// A `major.minor` patch identifier such as `13.4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PatchVersion {
  major: u8,
  minor: u8,
}

impl PatchVersion {
  /// Accepts two groups of one or two digits (no leading zero) separated by
  /// `.`, `,` or `-`, with optional surrounding whitespace.
  ///
  /// The second digit of a group may be `0`, so `13.10` and `10.20` are
  /// valid. This deliberately widens the older `[1-9]{1,2}` grammar, which
  /// rejected every double-digit patch ending in zero.
  ///
  /// # Errors
  ///
  /// Returns [`ParseError::Format`] for anything else.
  pub fn parse(input: &str) -> Result<Self, ParseError> {
    let format_error = || {
      ParseError::Format {
        input: input.to_string(),
      }
    };

    let captures = PATCH_ID.captures(input).ok_or_else(format_error)?;
    let major = captures[1].parse().map_err(|_| format_error())?;
    let minor = captures[2].parse().map_err(|_| format_error())?;
    Ok(Self { major, minor })
  }

  #[must_use]
  pub const fn major(self) -> u8 {
    self.major
  }

  #[must_use]
  pub const fn minor(self) -> u8 {
    self.minor
  }

  /// `major-minor`, the form used in the official page URL.
  #[must_use]
  pub fn dashed(self) -> String {
    format!("{}-{}", self.major, self.minor)
  }
}

impl fmt::Display for PatchVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{}", self.major, self.minor)
  }
}

impl FromStr for PatchVersion {
  type Err = ParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s)
  }
}

/// Validate a patch identifier and return it as `major.minor`.
///
/// # Errors
///
/// Returns [`ParseError::Format`] if `input` is not a patch identifier.
pub fn normalize(input: &str) -> Result<String, ParseError> {
  PatchVersion::parse(input).map(|version| version.to_string())
}
