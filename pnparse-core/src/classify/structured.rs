use pnparse_dragon::SubjectKind;

use super::{Context, non_empty, push_border};
use crate::{
  error::StructuralError,
  filters,
  html::Node,
  model::{
    Ability,
    Attribute,
    Border,
    Change,
    ComplexChange,
    Section,
    Status,
  },
  text::try_match_ability_name,
};

/// Where the current ability lives.
#[derive(Debug, Clone, Copy)]
enum Slot {
  Change(usize),
  Complex(usize, usize),
}

#[derive(Debug)]
struct Builder<'c> {
  ctx:     &'c Context<'c>,
  change:  Change,
  ability: Option<Slot>,
  nested:  Option<usize>,
}

/// A regular champion/item body: one change per block, in a fresh untitled
/// border.
pub(super) fn classify(
  ctx: &Context<'_>,
  section: &mut Section,
  open: &mut Option<usize>,
  nodes: &[Node],
) -> Result<(), StructuralError> {
  let mut change = Change::default();
  change.date = Some(ctx.date);
  change.status = if filters::any_with_class("new", nodes) {
    Some(Status::New)
  } else if filters::any_with_class("removed", nodes) {
    Some(Status::Removed)
  } else {
    None
  };

  let mut builder = Builder {
    ctx,
    change,
    ability: None,
    nested: None,
  };
  for (index, node) in nodes.iter().enumerate() {
    builder.step(node, nodes.get(index + 1..).unwrap_or_default())?;
  }

  log::debug!("Parsed change `{}`", builder.change.name());
  let border = Border {
    changes: vec![builder.change],
    ..Border::default()
  };
  push_border(section, open, border);
  Ok(())
}

impl Builder<'_> {
  fn step(
    &mut self,
    node: &Node,
    following: &[Node],
  ) -> Result<(), StructuralError> {
    if node.has_class("change-title") {
      self.change.set_name(&node.text());
    } else if !node.has_classes() && node.is("h2") {
      // The subject is sometimes a bare <h2>; any later one opens a
      // complex change.
      if self.change.name().is_empty() {
        self.change.set_name(&node.text());
      } else {
        let context: String = following
          .iter()
          .take_while(|next| next.is("p"))
          .map(|paragraph| format!("{}\n", paragraph.text()))
          .collect();
        self
          .change
          .complex_changes
          .push(ComplexChange::new(node.text(), context));
      }
    } else if node.has_class("summary") {
      self.change.summary = node.text();
    } else if node.has_class("context") {
      match self.change.complex_changes.last_mut() {
        Some(complex) => {
          complex.text.extend(
            node
              .raw_text()
              .lines()
              .map(str::trim)
              .filter(|line| !line.is_empty())
              .map(str::to_string),
          );
        },
        None => self.change.context = node.text(),
      }
    } else if node.is("ul") {
      self.links(node);
    } else if node.has_class("ability-title") {
      self.ability_title(&node.text())?;
    } else if self.ability.is_none() && node.has_class("change-detail-title") {
      self.change.abilities.push(Ability::new(&node.text()));
      self.ability = Some(Slot::Change(self.change.abilities.len() - 1));
    } else if node.has_class("attribute-change") {
      self.attribute_change(node)?;
    }

    Ok(())
  }

  /// Further reading links, appended to the context as wiki bullets.
  fn links(&mut self, list: &Node) {
    for item in filters::by_tag("li", &list.children()) {
      for link in filters::by_tag("a", &item.children()) {
        let address = link.attr("href").unwrap_or_default();
        let description = link.text().replace('|', "{{!}}");
        self.change.context.push_str(&format!(
          "\n*[{} {}]",
          address.trim(),
          description
        ));
      }
    }
  }

  fn ability_title(&mut self, info: &str) -> Result<(), StructuralError> {
    if !self.ctx.snapshot.is(self.change.name(), SubjectKind::Character) {
      // Bundled announcements list their subjects as ability titles
      self.change.changes.push(Change::new(info));
      self.nested = Some(self.change.changes.len() - 1);
      return Ok(());
    }

    let prefix = try_match_ability_name(info).ok_or_else(|| {
      StructuralError::new(
        self.change.name(),
        format!("was not expecting ability name `{info}`"),
      )
    })?;
    let ability = Ability::new(&info[prefix.end()..]);

    self.ability = Some(match self.change.complex_changes.last_mut() {
      Some(complex) => {
        complex.abilities.push(ability);
        let index = complex.abilities.len() - 1;
        Slot::Complex(self.change.complex_changes.len() - 1, index)
      },
      None => {
        self.change.abilities.push(ability);
        Slot::Change(self.change.abilities.len() - 1)
      },
    });
    Ok(())
  }

  fn attribute_change(&mut self, node: &Node) -> Result<(), StructuralError> {
    let subject = self.change.name().to_string();
    let missing = || {
      StructuralError::new(
        subject.clone(),
        "attribute value found before the attribute name",
      )
    };

    let mut attribute: Option<Attribute> = None;
    let mut inner: Option<usize> = None;

    for child in filters::with_classes(&node.children()) {
      if child.has_class("attribute") {
        if let Some(previous) = attribute.take() {
          self.place(previous, inner);
        }
        let mut next = Attribute::named(child.own_text());
        next.status = child.children().iter().find_map(|tag| {
          tag.classes().iter().find_map(|class| Status::from_class(class))
        });
        attribute = Some(next);
      } else if child.has_class("attribute-before")
        || child.has_class("attribute-removed")
      {
        attribute.as_mut().ok_or_else(missing)?.before =
          non_empty(child.text());
      } else if child.has_class("attribute-after") {
        attribute.as_mut().ok_or_else(missing)?.after = non_empty(child.text());
      } else if child.has_class("ability-title") {
        let info = child.text();
        let Some(prefix) = try_match_ability_name(&info) else {
          continue;
        };
        let nested = self
          .nested
          .and_then(|index| self.change.changes.get_mut(index))
          .ok_or_else(|| {
            StructuralError::new(
              subject.clone(),
              format!("ability `{info}` outside of a nested change"),
            )
          })?;
        nested.abilities.push(Ability::new(&info[prefix.end()..]));
        inner = Some(nested.abilities.len() - 1);
      }
    }

    if let Some(attribute) = attribute {
      self.place(attribute, inner);
    }
    Ok(())
  }

  /// Attach to the ability opened inside the node, else the current ability,
  /// else the nested change, else the complex change, else the change.
  fn place(&mut self, attribute: Attribute, inner: Option<usize>) {
    let nested = self.nested;
    let current = self.ability;

    if let Some(ability) = nested
      .zip(inner)
      .and_then(|(n, a)| self.change.changes.get_mut(n)?.abilities.get_mut(a))
    {
      ability.attributes.push(attribute);
      return;
    }

    if let Some(ability) = current.and_then(|slot| self.ability_mut(slot)) {
      ability.attributes.push(attribute);
      return;
    }

    if let Some(change) = nested.and_then(|n| self.change.changes.get_mut(n)) {
      change.attributes.push(attribute);
      return;
    }

    match self.change.complex_changes.last_mut() {
      Some(complex) => complex.attributes.push(attribute),
      None => self.change.attributes.push(attribute),
    }
  }

  fn ability_mut(&mut self, slot: Slot) -> Option<&mut Ability> {
    match slot {
      Slot::Change(index) => self.change.abilities.get_mut(index),
      Slot::Complex(complex, index) => {
        self
          .change
          .complex_changes
          .get_mut(complex)?
          .abilities
          .get_mut(index)
      },
    }
  }
}
