use super::push_border;
use crate::{
  error::StructuralError,
  filters,
  html::Node,
  model::{Border, Section},
};

/// One border whose context is the block's last paragraph, looked up inside
/// the last `<div>` when there is no direct one.
pub(super) fn classify(
  section: &mut Section,
  open: &mut Option<usize>,
  nodes: &[Node],
) -> Result<(), StructuralError> {
  let mut border = Border::default();

  if let Some(paragraph) = filters::by_tag("p", nodes).last() {
    border.context = paragraph.text();
  }

  if border.context.is_empty() {
    if let Some(paragraph) = filters::by_tag("div", nodes)
      .last()
      .and_then(|div| div.first_descendant("p"))
    {
      border.context = paragraph.text();
    }
  }

  if border.context.is_empty() {
    log::warn!("No highlight text in `{}`", section.title);
  }

  push_border(section, open, border);
  Ok(())
}
