//! The parsed patch notes, as a plain tree.
//!
//! A [`Document`] owns its sections, a section its borders, a border its
//! changes, and so on down to [`Attribute`]. Nothing is shared.
use jiff::civil::Date;

use crate::{text::capitalize, version::PatchVersion};

/// Change marker on a subject or attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
  New,
  Removed,
  Updated,
}

impl Status {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::New => "new",
      Self::Removed => "removed",
      Self::Updated => "updated",
    }
  }

  /// Status of an element from its classes, if it carries one.
  #[must_use]
  pub fn from_class(class: &str) -> Option<Self> {
    match class {
      "new" => Some(Self::New),
      "removed" => Some(Self::Removed),
      "updated" => Some(Self::Updated),
      _ => None,
    }
  }
}

/// One attribute delta (`{{pbc}}`).
///
/// `before == None` means newly introduced, `after == None` means removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attribute {
  pub name:   String,
  pub before: Option<String>,
  pub after:  Option<String>,
  pub status: Option<Status>,
}

impl Attribute {
  #[must_use]
  pub fn named(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      ..Self::default()
    }
  }

  /// Neither a before nor an after value, nothing to render.
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.before.is_none() && self.after.is_none()
  }
}

/// An ability slot of a subject (`{{pai}}`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ability {
  pub name:       String,
  pub attributes: Vec<Attribute>,
}

impl Ability {
  pub const BASE_STATS: &'static str = "Base Stats";

  #[must_use]
  pub fn new(name: &str) -> Self {
    Self {
      name:       capitalize(name.trim()),
      attributes: Vec::new(),
    }
  }
}

/// A titled long-form block inside a change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplexChange {
  pub title:      String,
  pub context:    String,
  pub text:       Vec<String>,
  pub abilities:  Vec<Ability>,
  pub attributes: Vec<Attribute>,
}

impl ComplexChange {
  #[must_use]
  pub fn new(title: impl Into<String>, context: impl Into<String>) -> Self {
    Self {
      title: title.into(),
      context: context.into(),
      ..Self::default()
    }
  }
}

/// One subject's modification record (`{{pnb}}`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Change {
  name:                String,
  pub status:          Option<Status>,
  pub context:         String,
  pub summary:         String,
  pub date:            Option<Date>,
  pub abilities:       Vec<Ability>,
  pub attributes:      Vec<Attribute>,
  pub changes:         Vec<Self>,
  pub complex_changes: Vec<ComplexChange>,
}

impl Change {
  #[must_use]
  pub fn new(name: &str) -> Self {
    let mut change = Self::default();
    change.set_name(name);
    change
  }

  #[must_use]
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Set the subject name, dropping decorations the catalogs don't have.
  pub fn set_name(&mut self, name: &str) {
    self.name = normalize_subject(name);
  }

  /// Whether rendering this change would produce anything past its header.
  #[must_use]
  pub fn has_details(&self) -> bool {
    !self.abilities.is_empty()
      || !self.attributes.is_empty()
      || !self.changes.is_empty()
      || !self.complex_changes.is_empty()
  }
}

/// Subject names as the reference catalogs spell them.
#[must_use]
pub fn normalize_subject(name: &str) -> String {
  let name = name.trim();
  let name = match name.find("(Ornn Upgrade)") {
    Some(index) => name[..index].trim_end(),
    None if name == "Control Wards" => "Control Ward",
    None => name,
  };
  name.replace("\u{e2}\u{20ac}\u{2122}", "'")
}

/// A cosmetic preview placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplashEntry {
  pub title: String,
}

/// One `content-border` box of a section.
///
/// Either simplified (a context line and flat attributes) or structured
/// (changes with abilities); renders very differently depending on which.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Border {
  pub title:      String,
  pub context:    String,
  pub changes:    Vec<Change>,
  pub attributes: Vec<Attribute>,
  pub skins:      Vec<SplashEntry>,
  pub simplified: bool,
}

impl Border {
  #[must_use]
  pub fn titled(title: impl Into<String>) -> Self {
    Self {
      title: title.into(),
      ..Self::default()
    }
  }

  /// A simplified border introduced by `context`.
  #[must_use]
  pub fn simplified(context: impl Into<String>) -> Self {
    Self {
      context: context.into(),
      simplified: true,
      ..Self::default()
    }
  }

  /// No context, attributes or changes yet.
  #[must_use]
  pub fn is_blank(&self) -> bool {
    self.context.trim().is_empty()
      && self.attributes.is_empty()
      && self.changes.is_empty()
  }
}

/// Which classifier (and which bespoke rendering) a section gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
  Highlights,
  Upcoming,
  Balance,
  Digest,
  Other,
}

impl SectionKind {
  #[must_use]
  pub fn from_title(title: &str) -> Self {
    if title == "Patch Highlights" {
      Self::Highlights
    } else if title.starts_with("Upcoming") {
      Self::Upcoming
    } else if title.ends_with("Balance Changes") {
      Self::Balance
    } else if title.starts_with("Mid-Patch") {
      Self::Digest
    } else {
      Self::Other
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
  pub id:      usize,
  pub title:   String,
  pub borders: Vec<Border>,
}

impl Section {
  #[must_use]
  pub fn new(id: usize, title: impl Into<String>) -> Self {
    Self {
      id,
      title: title.into(),
      borders: Vec::new(),
    }
  }

  #[must_use]
  pub fn kind(&self) -> SectionKind {
    SectionKind::from_title(&self.title)
  }
}

/// A designer credit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Designer {
  pub name:     String,
  pub username: String,
  pub icon:     String,
}

/// One parsed patch notes page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
  pub version:   PatchVersion,
  pub date:      Date,
  pub url:       String,
  pub context:   String,
  pub designers: Vec<Designer>,
  pub sections:  Vec<Section>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_subject_names() {
    assert_eq!(
      Change::new("Sunfire Aegis (Ornn Upgrade)").name(),
      "Sunfire Aegis"
    );
    assert_eq!(Change::new("Control Wards").name(), "Control Ward");
    assert_eq!(Change::new("Kai\u{e2}\u{20ac}\u{2122}Sa").name(), "Kai'Sa");
    assert_eq!(Change::new("  Ahri ").name(), "Ahri");
  }

  #[test]
  fn test_section_kind() {
    assert_eq!(
      SectionKind::from_title("Patch Highlights"),
      SectionKind::Highlights
    );
    assert_eq!(
      SectionKind::from_title("Upcoming Skins & Chromas"),
      SectionKind::Upcoming
    );
    assert_eq!(
      SectionKind::from_title("ARAM Balance Changes"),
      SectionKind::Balance
    );
    assert_eq!(
      SectionKind::from_title("Mid-Patch Updates"),
      SectionKind::Digest
    );
    assert_eq!(SectionKind::from_title("Champions"), SectionKind::Other);
  }

  #[test]
  fn test_ability_names_are_capitalized() {
    assert_eq!(Ability::new(" orb OF deception ").name, "Orb of Deception");
  }

  #[test]
  fn test_empty_attribute() {
    let mut attribute = Attribute::named("Damage");
    assert!(attribute.is_empty());

    attribute.after = Some("50".to_string());
    assert!(!attribute.is_empty());
  }
}
