//! Wiki markup serializer.
//!
//! One top to bottom pass over a [`Document`]. Subject kinds are looked up
//! in the [`ReferenceSnapshot`] at render time, never stored on the model.
use pnparse_dragon::{ReferenceSnapshot, SubjectKind};
use pnparse_templates as tpl;

use crate::model::{
  Ability,
  Attribute,
  Border,
  Change,
  ComplexChange,
  Document,
  Section,
  SectionKind,
  Status,
};

/// Render a parsed page as wiki markup.
#[must_use]
pub fn render(document: &Document, snapshot: &ReferenceSnapshot) -> String {
  let mut renderer = Renderer {
    snapshot,
    out: String::new(),
  };
  renderer.document(document);
  renderer.out
}

struct Renderer<'a> {
  snapshot: &'a ReferenceSnapshot,
  out:      String,
}

impl Renderer<'_> {
  fn push(&mut self, text: &str) {
    self.out.push_str(text);
  }

  fn document(&mut self, document: &Document) {
    let version = document.version.to_string();

    self.push(tpl::PATCH_TABS_HEADER);
    self.push(tpl::OPEN_ONLY_INCLUDE);
    self.push(tpl::BOX_START);

    self.push(&tpl::patch_header(&version, &document.date.to_string()));
    self.push(&tpl::context_param(&document.context));
    self.push(tpl::THEMATIC_BREAK);
    self.push(&tpl::hyperlink(&document.url, "Official Patch Notes Link"));
    self.push(tpl::NEW_LINE);
    for designer in &document.designers {
      self.push(&tpl::designer_credit(&designer.icon, &designer.name));
    }
    self.push(tpl::TEMPLATE_END);
    self.push(tpl::BOX_BREAK);
    self.push(tpl::NEW_LINE);

    self.push(tpl::TOC_START);
    for section in &document.sections {
      let entry = self.toc_entry(section);
      // Icon groups start with a blank line of their own
      let entry = match entry.strip_prefix('\n') {
        Some(rest) if self.out.ends_with("\n\n") => rest,
        _ => &entry,
      };
      self.out.push_str(entry);
    }
    self.push(tpl::TEMPLATE_END);
    self.push(tpl::BOX_END);
    self.push(tpl::CLOSE_ONLY_INCLUDE);
    self.push(tpl::NEW_LINE);

    for section in &document.sections {
      self.section(section, &version);
    }
    self.push(tpl::PATCH_LIST_NAVBOX);
  }

  /// Table of contents line for a section, with subject icons for the
  /// champion, item, rune and summoner spell sections.
  fn toc_entry(&self, section: &Section) -> String {
    let title = &section.title;
    if !tpl::TOC_GROUP_TYPES.iter().any(|kind| title.contains(kind)) {
      return tpl::toc_group(section.id, title);
    }

    let first = title.split(' ').next().unwrap_or_default();
    let first = first.strip_suffix('s').unwrap_or(first);
    let group_type =
      if tpl::TOC_GROUP_TYPES.iter().any(|kind| first.contains(kind)) {
        first
      } else {
        ""
      };

    let wanted = if title.contains("Champion") {
      Some(SubjectKind::Character)
    } else if title.contains("Item") {
      Some(SubjectKind::Equipment)
    } else if title.contains("Rune") {
      Some(SubjectKind::Rune)
    } else if title.contains("Summoner") {
      Some(SubjectKind::AuxiliaryAbility)
    } else {
      None
    };

    let mut icons: Vec<&str> = Vec::new();
    if let Some(kind) = wanted {
      for change in section.borders.iter().flat_map(|border| &border.changes) {
        if self.snapshot.is(change.name(), kind) {
          icons.push(change.name());
        } else if kind == SubjectKind::Equipment {
          icons.extend(
            change
              .changes
              .iter()
              .filter(|nested| self.snapshot.is(nested.name(), kind))
              .map(Change::name),
          );
        }
      }
    }

    let mut entry = tpl::toc_icon_group(section.id, title, group_type);
    if !icons.is_empty() {
      entry.push_str(&icons.join(", "));
      entry.push_str("\n\n");
    }
    entry
  }

  fn section(&mut self, section: &Section, version: &str) {
    self.push(&tpl::title(&section.title));

    match section.kind() {
      SectionKind::Highlights => self.highlights(section, version),
      SectionKind::Upcoming => self.upcoming(section),
      kind => {
        let pnbh = matches!(kind, SectionKind::Balance | SectionKind::Digest);
        for (index, border) in section.borders.iter().enumerate() {
          self.border(section, index, border, pnbh);
          for change in &border.changes {
            self.change(change);
          }
        }
        self.push(tpl::NEW_LINE);
      },
    }
  }

  fn highlights(&mut self, section: &Section, version: &str) {
    let context = section
      .borders
      .first()
      .map(|border| border.context.as_str())
      .unwrap_or_default();

    self.push(tpl::OPEN_BORDER_DIV);
    self.push(tpl::OPEN_BANNER_DIV);
    self.push(&tpl::patch_banner(version));
    self.push(tpl::CLOSE_DIV);
    self.push(context);
    self.push(tpl::NEW_LINE);
    self.push(tpl::CLOSE_DIV);
    self.push(tpl::NEW_LINE);
  }

  /// Splash tables, one per border. Only the last table embeds images.
  fn upcoming(&mut self, section: &Section) {
    self.push(tpl::OPEN_BORDER_DIV);
    if section.borders.is_empty() {
      self.push(tpl::CLOSE_DIV);
      return;
    }

    let last = section.borders.len() - 1;
    for (index, border) in section.borders.iter().enumerate() {
      self.push(&tpl::splash_caption(&border.context));
      self.push(tpl::LINE_BREAK);
      self.push(tpl::splash_table_start());

      if index == last {
        for (i, skin) in border.skins.iter().enumerate() {
          self.push(&tpl::splash_image_entry(i + 1, &skin.title));
        }
        self.push(tpl::TEMPLATE_END);
        self.push(tpl::CLOSE_DIV);
      } else {
        for (i, skin) in border.skins.iter().enumerate() {
          self.push(&tpl::splash_entry(i + 1, &skin.title));
        }
        self.push(tpl::TEMPLATE_END);
        self.push(tpl::LINE_BREAK);
        self.push(tpl::NEW_LINE);
      }
    }
  }

  /// The border itself: title, context and flat attributes. Its changes
  /// are rendered by the caller.
  ///
  /// Runs of simplified borders in balance and digest sections share one
  /// `{{pnbh}}` block, separated by rules.
  fn border(
    &mut self,
    section: &Section,
    index: usize,
    border: &Border,
    pnbh: bool,
  ) {
    if !border.title.trim().is_empty() {
      self.push(&tpl::subtitle(&border.title));
    }

    if border.simplified && pnbh {
      let previous = index.checked_sub(1).and_then(|i| section.borders.get(i));
      let next = section.borders.get(index + 1);

      if previous.is_none_or(|previous| !previous.simplified) {
        self.push(&tpl::simplified_header(&border.context));
      } else {
        self.push(&tpl::simplified_subheader(&border.context));
      }
      self.attributes(&border.attributes);

      if next.is_none_or(|next| !next.simplified) {
        self.push(tpl::TEMPLATE_END);
      } else {
        self.push(tpl::SIMPLIFIED_SEPARATOR);
      }
    } else if border.simplified {
      self.push(tpl::OPEN_BORDER_DIV);
      self.push(&border.context);
      self.attributes(&border.attributes);
      self.push(tpl::CLOSE_DIV);
    } else if !border.context.trim().is_empty() {
      self.push(tpl::OPEN_BORDER_DIV);
      self.push(&tpl::structured_context(&border.context));
      self.push(tpl::CLOSE_DIV);
    }
  }

  fn change(&mut self, change: &Change) {
    let name = change.name();
    let kind = self.snapshot.kind_of(name);

    self.push(tpl::PNB_START);
    if let Some(status @ (Status::New | Status::Removed)) = change.status {
      self.push(&tpl::status_param(status.as_str()));
    }
    let date = change.date.map(|date| date.to_string()).unwrap_or_default();
    self.push(&tpl::date_param(&date));

    match kind {
      SubjectKind::Character => self.push(&tpl::named_param("champion", name)),
      SubjectKind::Equipment => self.push(&tpl::named_param("item", name)),
      SubjectKind::Rune => self.push(&tpl::named_param("rune", name)),
      _ if !name.trim().is_empty() => {
        self.push(&tpl::named_param("title", name));
      },
      _ => {},
    }
    if !change.summary.trim().is_empty() {
      self.push(&tpl::named_param("summary", &change.summary));
    }
    if !change.context.trim().is_empty() {
      self.push(&tpl::named_param("context", &change.context));
    }

    self.push(tpl::CHANGES_PARAM);
    for complex in &change.complex_changes {
      self.complex_change(complex);
    }
    self.attributes(&change.attributes);

    if kind == SubjectKind::Character {
      self.abilities(&change.abilities);
    } else {
      for nested in &change.changes {
        if self.snapshot.is(nested.name(), SubjectKind::Character) {
          self.strip_empty_changes();
          self.push(&tpl::champion_icon(nested.name()));
          self.abilities(&nested.abilities);
        } else {
          self.push(&tpl::anchor(nested.name()));
          self.attributes(&nested.attributes);
        }
      }
    }

    self.strip_empty_changes();
    self.push(tpl::TEMPLATE_END);
  }

  /// Drop a trailing `|changes=` that nothing was written after.
  fn strip_empty_changes(&mut self) {
    if self.out.ends_with(tpl::CHANGES_PARAM) {
      self.out.truncate(self.out.len() - tpl::CHANGES_PARAM.len());
    }
  }

  fn complex_change(&mut self, complex: &ComplexChange) {
    self.push(&tpl::bold_line(&complex.title));
    self.push(&complex.context);
    for line in &complex.text {
      self.push(&tpl::bullet(line));
    }
    self.abilities(&complex.abilities);
    self.attributes(&complex.attributes);
  }

  fn abilities(&mut self, abilities: &[Ability]) {
    for ability in abilities {
      self.push(&tpl::ability(&ability.name));
      self.attributes(&ability.attributes);
    }
  }

  fn attributes(&mut self, attributes: &[Attribute]) {
    for attribute in attributes {
      self.attribute(attribute);
    }
  }

  fn attribute(&mut self, attribute: &Attribute) {
    if attribute.is_empty() {
      log::warn!("Skipping attribute `{}` with no values", attribute.name);
      return;
    }

    self.push(&tpl::attribute(
      attribute.status.map(Status::as_str),
      &attribute.name,
      attribute.before.as_deref(),
      attribute.after.as_deref().unwrap_or_default(),
    ));
  }
}
