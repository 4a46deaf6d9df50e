use super::push_border;
use crate::{
  error::StructuralError,
  filters,
  html::Node,
  model::{Border, Section, SplashEntry},
};

/// One border per `summary` node; each `gs-container` adds its `skin-box`
/// titles to the border opened in this block.
pub(super) fn classify(
  section: &mut Section,
  open: &mut Option<usize>,
  nodes: &[Node],
) -> Result<(), StructuralError> {
  let mut current: Option<usize> = None;

  for node in filters::with_classes(nodes) {
    if node.has_class("summary") {
      let border = Border {
        context: node.text(),
        ..Border::default()
      };
      current = Some(push_border(section, open, border));
    } else if node.has_class("gs-container") {
      let index = match current {
        Some(index) => index,
        None => push_border(section, open, Border::default()),
      };
      current = Some(index);

      for skin in filters::by_class("skin-box", &node.children()) {
        let title = skin
          .first_descendant("h4")
          .map(|heading| heading.text())
          .ok_or_else(|| {
            StructuralError::new(skin.text(), "skin-box without an <h4> title")
          })?;

        if let Some(border) = section.borders.get_mut(index) {
          border.skins.push(SplashEntry { title });
        }
      }
    }
  }

  Ok(())
}
