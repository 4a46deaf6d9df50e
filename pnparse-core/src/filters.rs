//! Selectors over sibling lists of [`Node`]s.
//!
//! These are the only traversal primitives the classifiers use, so "every
//! direct child that is a tag with class X" reads the same everywhere.
use kuchikikiki::NodeRef;

use crate::html::Node;

/// Keep element nodes only, dropping text and comments.
pub fn elements(nodes: impl IntoIterator<Item = NodeRef>) -> Vec<Node> {
  nodes
    .into_iter()
    .filter(|node| node.as_element().is_some())
    .map(Node::from_ref)
    .collect()
}

/// Elements carrying a `class` attribute.
pub fn with_classes(nodes: &[Node]) -> impl Iterator<Item = &Node> {
  nodes.iter().filter(|node| node.has_classes())
}

pub fn by_tag<'a>(
  tag: &'a str,
  nodes: &'a [Node],
) -> impl Iterator<Item = &'a Node> {
  nodes.iter().filter(move |node| node.is(tag))
}

pub fn by_class<'a>(
  class: &'a str,
  nodes: &'a [Node],
) -> impl Iterator<Item = &'a Node> {
  with_classes(nodes).filter(move |node| node.has_class(class))
}

#[must_use]
pub fn first_by_tag<'a>(tag: &str, nodes: &'a [Node]) -> Option<&'a Node> {
  nodes.iter().find(|node| node.is(tag))
}

/// Whether any classed node in `nodes` has `class`.
#[must_use]
pub fn any_with_class(class: &str, nodes: &[Node]) -> bool {
  by_class(class, nodes).next().is_some()
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]

  use super::*;

  fn nodes(html: &str) -> Vec<Node> {
    Node::parse_document(html)
      .select_first("body")
      .expect("body is always present")
      .children()
  }

  #[test]
  fn test_filters_compose() {
    let nodes = nodes(
      r#"<h3>Buffs</h3><div class="attribute-change">a</div>
         <div>plain</div><p class="context">c</p><div class="attribute-change">b</div>"#,
    );

    assert_eq!(nodes.len(), 5);
    assert_eq!(with_classes(&nodes).count(), 3);
    assert_eq!(by_tag("div", &nodes).count(), 3);

    let changes: Vec<_> =
      by_class("attribute-change", &nodes).map(Node::text).collect();
    assert_eq!(changes, vec!["a", "b"]);

    assert_eq!(
      first_by_tag("h3", &nodes).map(Node::text).as_deref(),
      Some("Buffs")
    );
    assert!(first_by_tag("h2", &nodes).is_none());
    assert!(any_with_class("context", &nodes));
    assert!(!any_with_class("divider", &nodes));
  }
}
