//! Heading normalisation and ability prefix detection.
use std::sync::LazyLock;

use regex::{Match, Regex, RegexBuilder};

use crate::utils::never_matching_regex;

/// Characters a heading is split on. They are kept in the output as-is.
const SEPARATORS: [char; 4] = [' ', '"', '/', '-'];

/// Words kept lower case inside a heading.
const MINOR_WORDS: [&str; 13] = [
  "a", "an", "and", "or", "the", "of", "in", "on", "to", "for", "at", "by",
  "vs",
];

/// Tokens with a fixed spelling, matched case-insensitively.
const PRESERVED: [&str; 10] =
  ["ARAM", "URF", "TFT", "DX9", "DX11", "QoL", "VFX", "SFX", "UI", "HUD"];

/// `Q - `, `W - `, `E - `, `R - ` or `Passive - `, anywhere in the text.
static ABILITY_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
  RegexBuilder::new(r"([QWER]|(PASSIVE))\s-\s")
    .case_insensitive(true)
    .build()
    .unwrap_or_else(|e| {
      log::error!("Failed to compile ABILITY_PREFIX regex: {e}");
      never_matching_regex()
    })
});

/// Re-capitalise a heading into wiki house style.
///
/// Every word gets an upper case first letter and lower case rest, except
/// minor words after a space (lower case) and known acronyms (fixed
/// spelling). Separators are copied through, so only letter case changes.
///
/// ```
/// use pnparse_core::text::capitalize;
///
/// assert_eq!(capitalize("the quick ARAM fix"), "The Quick ARAM Fix");
/// assert_eq!(capitalize("MID-PATCH UPDATES"), "Mid-Patch Updates");
/// ```
#[must_use]
pub fn capitalize(text: &str) -> String {
  let mut result = String::with_capacity(text.len());
  let mut word = String::new();
  let mut previous: Option<char> = None;
  let mut first = true;

  for c in text.chars() {
    if SEPARATORS.contains(&c) {
      if !word.is_empty() {
        result.push_str(&capitalize_word(&word, first, previous));
        first = false;
        word.clear();
      }
      result.push(c);
      previous = Some(c);
    } else {
      word.push(c);
    }
  }

  if !word.is_empty() {
    result.push_str(&capitalize_word(&word, first, previous));
  }

  result
}

fn capitalize_word(word: &str, first: bool, previous: Option<char>) -> String {
  if let Some(preserved) = PRESERVED
    .iter()
    .find(|preserved| preserved.eq_ignore_ascii_case(word))
  {
    return (*preserved).to_string();
  }

  let lower = word.to_lowercase();
  if !first && previous == Some(' ') && MINOR_WORDS.contains(&lower.as_str())
  {
    return lower;
  }

  let mut chars = lower.chars();
  chars.next().map_or_else(String::new, |c| {
    let mut upper = c.to_uppercase();
    // Keep characters whose upper case form is longer than one character,
    // otherwise a second pass would not give the same result.
    match (upper.next(), upper.next()) {
      (Some(single), None) => single.to_string() + chars.as_str(),
      _ => c.to_string() + chars.as_str(),
    }
  })
}

/// Find the ability slot prefix (`Q - `, `Passive - `, ...) in `text`.
///
/// The remainder after [`Match::end`] is the ability name.
#[must_use]
pub fn try_match_ability_name(text: &str) -> Option<Match<'_>> {
  ABILITY_PREFIX.find(text)
}

/// Replace curly double quotes with straight ones.
#[must_use]
pub fn straighten_quotes(text: &str) -> String {
  text.replace(['\u{201c}', '\u{201d}'], "\"")
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]

  use super::*;

  #[test]
  fn test_preserves_acronyms() {
    assert_eq!(capitalize("the quick ARAM fix"), "The Quick ARAM Fix");
    assert_eq!(capitalize("aram balance changes"), "ARAM Balance Changes");
    assert_eq!(capitalize("dx11 QOL"), "DX11 QoL");
  }

  #[test]
  fn test_minor_words() {
    assert_eq!(
      capitalize("UPCOMING SKINS & CHROMAS"),
      "Upcoming Skins & Chromas"
    );
    assert_eq!(
      capitalize("the Sword of the Divine"),
      "The Sword of the Divine"
    );
    // A minor word after a slash starts a new phrase
    assert_eq!(capitalize("buffs/and nerfs"), "Buffs/And Nerfs");
  }

  #[test]
  fn test_separators_are_kept() {
    assert_eq!(capitalize("mid-patch  updates"), "Mid-Patch  Updates");
    assert_eq!(capitalize("\"quoted\" name"), "\"Quoted\" Name");
    assert_eq!(capitalize(""), "");
  }

  #[test]
  fn test_capitalize_is_idempotent() {
    for input in [
      "the quick ARAM fix",
      "MID-PATCH UPDATES",
      "second hit healing vs. minions",
      "q - ORB OF DECEPTION cooldown",
      "  spaced   out  ",
      "straße of ÉLAN",
      "a/b-c\"d",
    ] {
      let once = capitalize(input);
      assert_eq!(capitalize(&once), once, "input: {input:?}");
    }
  }

  #[test]
  fn test_ability_prefix() {
    let text = "Q - Orb of Deception Cooldown";
    let found = try_match_ability_name(text).unwrap();
    assert_eq!(&text[found.end()..], "Orb of Deception Cooldown");

    let text = "passive - Essence Theft";
    let found = try_match_ability_name(text).unwrap();
    assert_eq!(&text[found.end()..], "Essence Theft");

    assert!(try_match_ability_name("Base Armor").is_none());
    assert!(try_match_ability_name("Q-Orb").is_none());
  }

  #[test]
  fn test_straighten_quotes() {
    assert_eq!(
      straighten_quotes("Jane \u{201c}Phlox\u{201d} Doe"),
      "Jane \"Phlox\" Doe"
    );
  }
}
