//! Section classifiers.
//!
//! Each classifier takes the element children of one `content-border` block
//! and fills in the section. The open border (an index into
//! [`Section::borders`]) carries over from one block to the next within a
//! section and is reset by the driver at every section header.
mod balance;
mod digest;
mod generic;
mod highlights;
mod structured;
mod upcoming;

use jiff::civil::Date;
use pnparse_dragon::ReferenceSnapshot;

use crate::{
  error::StructuralError,
  filters,
  html::Node,
  model::{Attribute, Border, Section, SectionKind},
};

/// Read-only inputs shared by every classifier of one parse.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
  pub snapshot: &'a ReferenceSnapshot,
  pub date:     Date,
}

/// Classify one content block of `section`.
///
/// # Errors
///
/// Returns a [`StructuralError`] when the block does not fit the layout its
/// section kind expects.
pub fn classify_block(
  ctx: &Context<'_>,
  section: &mut Section,
  open: &mut Option<usize>,
  nodes: &[Node],
) -> Result<(), StructuralError> {
  match section.kind() {
    SectionKind::Highlights => highlights::classify(section, open, nodes),
    SectionKind::Upcoming => upcoming::classify(section, open, nodes),
    SectionKind::Balance => balance::classify(section, open, nodes),
    SectionKind::Digest => digest::classify(ctx, section, open, nodes),
    SectionKind::Other if is_structured(nodes) => {
      structured::classify(ctx, section, open, nodes)
    },
    SectionKind::Other => generic::classify(section, open, nodes),
  }
}

/// A block describing changes to named subjects rather than a text box.
fn is_structured(nodes: &[Node]) -> bool {
  filters::any_with_class("attribute-change", nodes)
    || filters::any_with_class("change-title", nodes)
}

/// Append `border` and make it the open one.
fn push_border(
  section: &mut Section,
  open: &mut Option<usize>,
  border: Border,
) -> usize {
  section.borders.push(border);
  let index = section.borders.len() - 1;
  *open = Some(index);
  index
}

fn open_border<'s>(
  section: &'s mut Section,
  open: Option<usize>,
) -> Option<&'s mut Border> {
  open.and_then(|index| section.borders.get_mut(index))
}

/// `Some(text)` unless blank.
fn non_empty(text: String) -> Option<String> {
  (!text.trim().is_empty()).then_some(text)
}

/// An `attribute-change` node laid out as name, before and after children.
fn flat_attribute(node: &Node) -> Attribute {
  let mut attribute = Attribute::default();
  for child in node.children() {
    if child.has_class("attribute-before") {
      attribute.before = non_empty(child.text());
    } else if child.has_class("attribute-after") {
      attribute.after = non_empty(child.text());
    } else if child.has_class("attribute") {
      attribute.name = child.text();
    }
  }
  attribute
}


#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]

  use super::{
    test_support::{date, nodes, snapshot},
    *,
  };

  fn dispatch(title: &str, html: &str) -> Section {
    let snapshot = snapshot();
    let ctx = Context {
      snapshot: &snapshot,
      date:     date(),
    };
    let mut section = Section::new(5, title);
    let mut open = None;
    classify_block(&ctx, &mut section, &mut open, &nodes(html)).unwrap();
    section
  }

  #[test]
  fn test_heading_named_subject_is_structured() {
    let section = dispatch(
      "Champions",
      r#"<h2>Ahri</h2>
         <p class="summary">Faster orbs.</p>
         <h4 class="ability-title">Q - Orb of Deception</h4>
         <div class="attribute-change">
           <span class="attribute">Cooldown</span>
           <span class="attribute-before">7</span>
           <span class="attribute-after">6</span>
         </div>"#,
    );

    let border = &section.borders[0];
    assert!(!border.simplified);
    assert!(border.attributes.is_empty());
    assert_eq!(border.changes.len(), 1);

    let change = &border.changes[0];
    assert_eq!(change.name(), "Ahri");
    assert_eq!(change.summary, "Faster orbs.");
    assert_eq!(change.abilities[0].name, "Orb of Deception");
    assert_eq!(change.abilities[0].attributes[0].name, "Cooldown");
  }

  #[test]
  fn test_text_box_stays_generic() {
    let section = dispatch(
      "Bugfixes",
      r#"<p class="context">Fixed things.</p>
         <ul><li>Fixed a typo</li></ul>"#,
    );

    let border = &section.borders[0];
    assert!(border.simplified);
    assert!(border.changes.is_empty());
    assert_eq!(border.context, "Fixed things.\n*Fixed a typo\n");
  }

  #[test]
  fn test_flat_attribute() {
    let nodes = nodes(
      r#"<div class="attribute-change">
           <span class="attribute">Damage</span>
           <span class="attribute-before">50</span>
           <span class="attribute-after">60</span>
         </div>"#,
    );

    let attribute = flat_attribute(&nodes[0]);
    assert_eq!(attribute.name, "Damage");
    assert_eq!(attribute.before.as_deref(), Some("50"));
    assert_eq!(attribute.after.as_deref(), Some("60"));
  }

  #[test]
  fn test_blank_values_are_absent() {
    let nodes = nodes(
      r#"<div class="attribute-change">
           <span class="attribute">Heal</span>
           <span class="attribute-before">  </span>
           <span class="attribute-after">20</span>
         </div>"#,
    );

    let attribute = flat_attribute(&nodes[0]);
    assert_eq!(attribute.before, None);
    assert_eq!(attribute.after.as_deref(), Some("20"));
  }
}
