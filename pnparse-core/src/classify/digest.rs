use pnparse_dragon::SubjectKind;

use super::{Context, non_empty, open_border, push_border};
use crate::{
  error::StructuralError,
  filters,
  html::Node,
  model::{Ability, Attribute, Border, Change, Section},
  text::{capitalize, try_match_ability_name},
};

/// Attribute labels that can follow an ability name, longest match first
/// where one label contains another.
const ABILITY_BASE_ATTRIBUTES: [&str; 11] = [
  "Cooldown",
  "First Hit Bonus Damage",
  "Damage",
  "Cost",
  "Move Speed",
  "Second Hit Healing Vs. Minions",
  "Dash Speed",
  "Cast Range",
  "Duration",
  "Toggle Abilities Bugfix",
  "Hecarim Bugfix",
];

const BUGFIX: &str = "Bugfix";

/// The change being built, not yet committed to its border.
#[derive(Debug)]
struct OpenChange {
  change:   Change,
  border:   usize,
  /// Some attribute went to a simplified border keyed by this subject.
  fallback: bool,
}

/// Where a finished attribute goes.
#[derive(Debug, Clone, Copy)]
enum Target {
  Ability(usize),
  Change,
  Border(usize),
}

struct Digest<'a, 's> {
  ctx:     &'a Context<'a>,
  section: &'s mut Section,
  open:    &'s mut Option<usize>,
  current: Option<OpenChange>,
  ability: Option<usize>,
}

/// Mid-patch updates: titled groups of changes, separated by dividers.
///
/// A `change-title` opens a border (unless it repeats the open one's title),
/// an `ability-title` opens a change, and each `attribute-change` is routed by
/// what kind of subject the open change names.
pub(super) fn classify(
  ctx: &Context<'_>,
  section: &mut Section,
  open: &mut Option<usize>,
  nodes: &[Node],
) -> Result<(), StructuralError> {
  let mut digest = Digest {
    ctx,
    section,
    open,
    current: None,
    ability: None,
  };

  for node in nodes {
    digest.step(node, nodes)?;
  }
  digest.commit();
  Ok(())
}

impl Digest<'_, '_> {
  fn step(
    &mut self,
    node: &Node,
    nodes: &[Node],
  ) -> Result<(), StructuralError> {
    if node.has_class("change-title") {
      let title = node.text();
      let repeated = open_border(self.section, *self.open)
        .is_some_and(|border| border.title == title);
      if !repeated {
        push_border(self.section, self.open, Border::titled(title));
        return Ok(());
      }
    }

    if open_border(self.section, *self.open).is_none() {
      // The group title is sometimes a plain <h2>
      let heading = filters::first_by_tag("h2", nodes).ok_or_else(|| {
        StructuralError::new(node.text(), "could not locate the border title")
      })?;
      push_border(self.section, self.open, Border::titled(heading.text()));
    }

    if node.has_class("context") {
      if let Some(border) = open_border(self.section, *self.open) {
        border.context = node.text();
      }
    } else if node.has_class("ability-title") {
      self.open_change(&node.text());
    } else if node.has_class("attribute-change") {
      self.attribute_change(node)?;
    } else if node.has_class("divider") {
      self.commit();
    }

    Ok(())
  }

  /// Start a change on the open border, or on a fresh structured one if the
  /// open border is simplified.
  fn open_change(&mut self, name: &str) {
    self.commit();

    let border = match *self.open {
      Some(index)
        if self
          .section
          .borders
          .get(index)
          .is_some_and(|border| !border.simplified) =>
      {
        index
      },
      _ => push_border(self.section, self.open, Border::default()),
    };

    let mut change = Change::new(name);
    change.date = Some(self.ctx.date);
    self.current = Some(OpenChange {
      change,
      border,
      fallback: false,
    });
  }

  /// Move the open change into its border and forget the current ability.
  fn commit(&mut self) {
    self.ability = None;
    let Some(open) = self.current.take() else {
      return;
    };

    if open.fallback && !open.change.has_details() {
      log::debug!(
        "`{}` only had simplified attributes, not keeping it as a change",
        open.change.name()
      );
      return;
    }

    if let Some(border) = self.section.borders.get_mut(open.border) {
      border.changes.push(open.change);
    }
  }

  fn attribute_change(&mut self, node: &Node) -> Result<(), StructuralError> {
    let Some(mut open) = self.current.take() else {
      let subject = open_border(self.section, *self.open)
        .map(|border| border.title.clone())
        .unwrap_or_default();
      return Err(StructuralError::new(
        subject,
        "attribute-change found before the first ability-title",
      ));
    };

    let subject = open.change.name().to_string();
    let kind = self.ctx.snapshot.kind_of(&subject);
    let mut pending: Option<(Attribute, Target)> = None;

    for child in filters::with_classes(&node.children()) {
      if child.has_class("context") {
        open.change.context = child.text();
      } else if child.has_class("attribute") {
        if let Some((attribute, target)) = pending.take() {
          self.place(&mut open, attribute, target);
        }
        let info = capitalize(&child.text());
        pending = Some(self.route(&mut open, kind, &info)?);
      } else if child.has_class("attribute-before")
        || child.has_class("attribute-removed")
        || child.has_class("attribute-after")
      {
        let Some((attribute, _)) = pending.as_mut() else {
          return Err(StructuralError::new(
            subject,
            "attribute value found before the attribute name",
          ));
        };
        let value = non_empty(child.text());
        if child.has_class("attribute-after") {
          attribute.after = value;
        } else {
          attribute.before = value;
        }
      }
    }

    if let Some((attribute, target)) = pending {
      self.place(&mut open, attribute, target);
    }
    self.current = Some(open);
    Ok(())
  }

  /// Decide where an attribute labelled `info` belongs.
  fn route(
    &mut self,
    open: &mut OpenChange,
    kind: SubjectKind,
    info: &str,
  ) -> Result<(Attribute, Target), StructuralError> {
    match kind {
      SubjectKind::Character => self.champion_attribute(open, info),
      SubjectKind::Equipment
      | SubjectKind::Rune
      | SubjectKind::AuxiliaryAbility => {
        Ok((Attribute::named(info), Target::Change))
      },
      SubjectKind::Unknown => {
        let border = self.fallback_border(open);
        Ok((Attribute::named(info), Target::Border(border)))
      },
    }
  }

  fn champion_attribute(
    &mut self,
    open: &mut OpenChange,
    info: &str,
  ) -> Result<(Attribute, Target), StructuralError> {
    if let Some(prefix) = try_match_ability_name(info) {
      let rest = &info[prefix.end()..];
      let (name, label) = ABILITY_BASE_ATTRIBUTES
        .iter()
        .find_map(|label| rest.find(label).map(|at| (&rest[..at], *label)))
        .or_else(|| rest.find(BUGFIX).map(|at| (&rest[..at], BUGFIX)))
        .ok_or_else(|| {
          StructuralError::new(
            open.change.name(),
            format!("could not find the attribute type of `{info}`"),
          )
        })?;

      // "Orb of Deception Q - Cooldown" names the ability before the slot
      let name = match name.trim_end() {
        "" => info[..prefix.start()].trim(),
        name => name,
      };
      let index = self.ability_named(open, name);
      return Ok((Attribute::named(label), Target::Ability(index)));
    }

    if info.contains("Base") {
      let index = self.ability_named(open, Ability::BASE_STATS);
      return Ok((Attribute::named(info), Target::Ability(index)));
    }

    if info.contains(BUGFIX) {
      return Ok((Attribute::named(BUGFIX), Target::Change));
    }

    Err(StructuralError::new(
      open.change.name(),
      format!(
        "was not expecting any more champion attributes but found `{info}`"
      ),
    ))
  }

  /// The current ability if it has this name, otherwise a new one.
  fn ability_named(&mut self, open: &mut OpenChange, name: &str) -> usize {
    let ability = Ability::new(name);
    if let Some(index) = self.ability {
      if open
        .change
        .abilities
        .get(index)
        .is_some_and(|current| current.name == ability.name)
      {
        return index;
      }
    }

    open.change.abilities.push(ability);
    let index = open.change.abilities.len() - 1;
    self.ability = Some(index);
    index
  }

  /// Simplified border keyed by an unrecognised subject.
  ///
  /// Reuses the open border when it is already keyed by the subject,
  /// converts it when it is still blank, and appends a new one otherwise.
  fn fallback_border(&mut self, open: &mut OpenChange) -> usize {
    open.fallback = true;
    let subject = open.change.name();

    if let Some(index) = *self.open {
      if let Some(border) = self.section.borders.get_mut(index) {
        if border.simplified && border.context == subject {
          return index;
        }
        if border.is_blank() {
          border.simplified = true;
          border.context = subject.to_string();
          return index;
        }
      }
    }

    push_border(self.section, self.open, Border::simplified(subject))
  }

  fn place(
    &mut self,
    open: &mut OpenChange,
    attribute: Attribute,
    target: Target,
  ) {
    match target {
      Target::Ability(index) => {
        if let Some(ability) = open.change.abilities.get_mut(index) {
          ability.attributes.push(attribute);
        }
      },
      Target::Change => open.change.attributes.push(attribute),
      Target::Border(index) => {
        if let Some(border) = self.section.borders.get_mut(index) {
          border.attributes.push(attribute);
        }
      },
    }
  }
}
