use regex::Regex;

/// Create a regex that never matches anything
///
/// This is used as a fallback pattern when a static regex fails to compile.
/// It will never match any input, which is safer than using a trivial regex
/// like `^$` which would match empty strings.
#[must_use]
#[allow(clippy::unwrap_used, reason = "both patterns are known to be valid")]
pub fn never_matching_regex() -> Regex {
  // Asserts something impossible, this pattern is guaranteed to be valid
  Regex::new(r"[^\s\S]").unwrap_or_else(|_| Regex::new(r"^\b$").unwrap())
}
