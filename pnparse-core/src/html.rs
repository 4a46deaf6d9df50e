//! Typed access to the parsed patch notes page.
//!
//! Classifiers never touch raw DOM attributes; they go through [`Node`],
//! which answers "what tag", "which classes" and "what text" without failing
//! on absent attributes.
use kuchikikiki::{NodeRef, parse_html};
use tendril::TendrilSink;

use crate::filters;

/// An element (or the document root) of a parsed page.
#[derive(Clone, Debug)]
pub struct Node(NodeRef);

impl Node {
  /// Parse a complete HTML page.
  #[must_use]
  pub fn parse_document(html: &str) -> Self {
    Self(parse_html().one(html))
  }

  pub(crate) const fn from_ref(node: NodeRef) -> Self {
    Self(node)
  }

  /// Lower case tag name, `None` for the document root.
  #[must_use]
  pub fn tag(&self) -> Option<String> {
    self
      .0
      .as_element()
      .map(|element| element.name.local.to_string())
  }

  #[must_use]
  pub fn is(&self, tag: &str) -> bool {
    self
      .0
      .as_element()
      .is_some_and(|element| &*element.name.local == tag)
  }

  #[must_use]
  pub fn attr(&self, name: &str) -> Option<String> {
    self.0.as_element().and_then(|element| {
      element.attributes.borrow().get(name).map(str::to_string)
    })
  }

  /// Whether the element carries a `class` attribute at all.
  #[must_use]
  pub fn has_classes(&self) -> bool {
    self.attr("class").is_some()
  }

  #[must_use]
  pub fn classes(&self) -> Vec<String> {
    self
      .attr("class")
      .map(|classes| {
        classes.split_whitespace().map(str::to_string).collect()
      })
      .unwrap_or_default()
  }

  /// Class membership, `class="a b"` has both `a` and `b`.
  #[must_use]
  pub fn has_class(&self, class: &str) -> bool {
    self
      .attr("class")
      .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
  }

  /// All descendant text, trimmed.
  #[must_use]
  pub fn text(&self) -> String {
    self.0.text_contents().trim().to_string()
  }

  /// All descendant text, untrimmed.
  #[must_use]
  pub fn raw_text(&self) -> String {
    self.0.text_contents()
  }

  /// The first non-blank text directly inside this element, trimmed.
  ///
  /// For `<div>Cooldown<span>new</span></div>` this is `Cooldown`.
  #[must_use]
  pub fn own_text(&self) -> String {
    self
      .0
      .children()
      .filter_map(|child| {
        child.as_text().map(|text| text.borrow().trim().to_string())
      })
      .find(|text| !text.is_empty())
      .unwrap_or_default()
  }

  /// Text with `<strong>`/`<b>` runs wrapped in wiki bold quotes, trimmed.
  #[must_use]
  pub fn text_with_bold(&self) -> String {
    fn walk(node: &NodeRef, out: &mut String) {
      for child in node.children() {
        if let Some(text) = child.as_text() {
          out.push_str(&text.borrow());
        } else if let Some(element) = child.as_element() {
          if matches!(&*element.name.local, "strong" | "b") {
            out.push_str("'''");
            out.push_str(child.text_contents().trim());
            out.push_str("'''");
          } else {
            walk(&child, out);
          }
        }
      }
    }

    let mut out = String::new();
    walk(&self.0, &mut out);
    out.trim().to_string()
  }

  /// Element children, text and comments skipped.
  #[must_use]
  pub fn children(&self) -> Vec<Self> {
    filters::elements(self.0.children())
  }

  /// First element below this one (at any depth) with the given tag.
  #[must_use]
  pub fn first_descendant(&self, tag: &str) -> Option<Self> {
    self
      .0
      .descendants()
      .map(Self)
      .find(|node| node.is(tag))
  }

  /// Elements matching a CSS selector, in document order.
  ///
  /// An invalid selector matches nothing.
  #[must_use]
  pub fn select(&self, selector: &str) -> Vec<Self> {
    match self.0.select(selector) {
      Ok(matches) => matches.map(|m| Self(m.as_node().clone())).collect(),
      Err(()) => {
        log::warn!("Invalid CSS selector `{selector}`");
        Vec::new()
      },
    }
  }

  #[must_use]
  pub fn select_first(&self, selector: &str) -> Option<Self> {
    self.select(selector).into_iter().next()
  }
}
