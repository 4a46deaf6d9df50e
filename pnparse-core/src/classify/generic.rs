use super::{flat_attribute, push_border};
use crate::{
  error::StructuralError,
  filters,
  html::Node,
  model::{Border, Section},
};

/// Plain text boxes: intro text, bullet list items and any flat attribute
/// changes, all on one simplified border.
pub(super) fn classify(
  section: &mut Section,
  open: &mut Option<usize>,
  nodes: &[Node],
) -> Result<(), StructuralError> {
  let mut border = Border::simplified("");

  if let Some(intro) = filters::by_class("context", nodes)
    .next()
    .or_else(|| filters::by_class("summary", nodes).next())
  {
    border.context = format!("{}\n", intro.text());
  }

  for list in filters::by_tag("ul", nodes) {
    for item in filters::by_tag("li", &list.children()) {
      border.context.push('*');
      border.context.push_str(&item.text_with_bold());
      border.context.push('\n');
    }
  }

  border.attributes.extend(
    filters::by_class("attribute-change", nodes).map(flat_attribute),
  );

  if border.context.is_empty() && border.attributes.is_empty() {
    log::debug!("Empty content block in `{}`", section.title);
  }

  push_border(section, open, border);
  Ok(())
}
