use super::{flat_attribute, open_border, push_border};
use crate::{
  error::StructuralError,
  html::Node,
  model::{Border, Section},
};

/// Headings (`<h3>` or `ability-title`) open simplified borders, and each
/// `attribute-change` below one becomes a flat attribute on it.
pub(super) fn classify(
  section: &mut Section,
  open: &mut Option<usize>,
  nodes: &[Node],
) -> Result<(), StructuralError> {
  for node in nodes {
    if node.is("h3") || node.has_class("ability-title") {
      push_border(section, open, Border::simplified(node.text()));
    } else if node.has_class("attribute-change") {
      let attribute = flat_attribute(node);
      let border = open_border(section, *open).ok_or_else(|| {
        StructuralError::new(
          attribute.name.clone(),
          "attribute-change found before any heading",
        )
      })?;
      border.attributes.push(attribute);
    }
  }

  Ok(())
}
