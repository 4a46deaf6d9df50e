//! The parse driver: page in, [`Document`] and wiki markup out.
use std::sync::LazyLock;

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use pnparse_config::{Config, IconRegistry};
use pnparse_dragon::{Dragon, ReferenceSnapshot};
use regex::Regex;

use crate::{
  classify::{Context, classify_block},
  error::ParseError,
  fetch::PageFetcher,
  filters,
  html::Node,
  model::{Designer, Document, Section},
  render::render,
  text::{capitalize, straighten_quotes},
  utils::never_matching_regex,
  version::PatchVersion,
};

static DESIGNER_USERNAME: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#""(.*)""#).unwrap_or_else(|e| {
    log::error!("Failed to compile DESIGNER_USERNAME regex: {e}");
    never_matching_regex()
  })
});

/// Page-level parts that are not inside any section.
const PAGE: &str = "page";

/// A parsed and rendered patch notes page.
#[derive(Debug, Clone)]
pub struct Rendered {
  pub document: Document,
  pub markup:   String,
  /// Wiki page the markup is meant for.
  pub page:     String,
}

/// Everything one parse needs, borrowed from the caller.
pub struct Parser<'a> {
  config:  &'a Config,
  icons:   &'a IconRegistry,
  dragon:  &'a Dragon,
  fetcher: &'a dyn PageFetcher,
}

impl<'a> Parser<'a> {
  #[must_use]
  pub fn new(
    config: &'a Config,
    icons: &'a IconRegistry,
    dragon: &'a Dragon,
    fetcher: &'a dyn PageFetcher,
  ) -> Self {
    Self {
      config,
      icons,
      dragon,
      fetcher,
    }
  }

  /// Fetch, parse and render the notes of patch `patch` (e.g. `13.4`).
  ///
  /// # Errors
  ///
  /// Fails on a malformed identifier, a failed fetch or catalog refresh,
  /// or any page structure the classifiers do not recognise. Nothing is
  /// returned in that case.
  pub fn parse(&self, patch: &str) -> Result<Rendered, ParseError> {
    let version = PatchVersion::parse(patch)?;
    let url = self.config.source_url_for(&version.dashed());

    log::info!("Fetching patch {version} notes from {url}");
    let html = self.fetcher.fetch(&url)?;
    self.parse_html(version, &url, &html)
  }

  /// Parse a page that has already been fetched.
  ///
  /// # Errors
  ///
  /// As [`Self::parse`], minus the fetch.
  pub fn parse_html(
    &self,
    version: PatchVersion,
    url: &str,
    html: &str,
  ) -> Result<Rendered, ParseError> {
    if self.dragon.refresh()? {
      log::debug!("Reference catalogs refreshed before parsing");
    }
    let snapshot = self.dragon.snapshot();

    let document = self.document(version, url, html, &snapshot)?;
    let markup = render(&document, &snapshot);
    let page = self.config.wiki_page_for(&version.to_string());

    log::info!(
      "Parsed {} sections for patch {version}",
      document.sections.len()
    );
    Ok(Rendered {
      document,
      markup,
      page,
    })
  }

  /// Build the document model of `html` against a fixed snapshot.
  ///
  /// # Errors
  ///
  /// Returns [`ParseError::Structural`] for anything missing or out of place.
  pub fn document(
    &self,
    version: PatchVersion,
    url: &str,
    html: &str,
    snapshot: &ReferenceSnapshot,
  ) -> Result<Document, ParseError> {
    let page = Node::parse_document(html);
    let date = published_date(&page)?;

    Ok(Document {
      version,
      date,
      url: url.to_string(),
      context: patch_context(&page),
      designers: designers(&page, self.icons)?,
      sections: sections(&page, &self.config.root_class, snapshot, date)?,
    })
  }
}

fn published_date(page: &Node) -> Result<Date, ParseError> {
  let value = page
    .select_first("time")
    .and_then(|time| time.attr("datetime"))
    .ok_or_else(|| {
      ParseError::structural(
        PAGE,
        "time",
        "could not get the article published date",
      )
    })?;

  parse_date(value.trim()).ok_or_else(|| {
    ParseError::structural(PAGE, "time", format!("unrecognised date `{value}`"))
  })
}

/// A `datetime` value as a calendar date, in UTC when it carries an offset.
fn parse_date(value: &str) -> Option<Date> {
  if let Ok(timestamp) = value.parse::<Timestamp>() {
    return Some(timestamp.to_zoned(TimeZone::UTC).date());
  }
  value
    .parse::<Date>()
    .ok()
    .or_else(|| value.parse::<jiff::civil::DateTime>().ok().map(|dt| dt.date()))
}

/// Paragraphs of the introductory blockquote, its sign-off line dropped.
fn patch_context(page: &Node) -> String {
  let Some(quote) = page.select_first("blockquote.context") else {
    log::warn!("No context blockquote found, leaving the patch context empty");
    return String::new();
  };

  let text = quote.text();
  let mut lines: Vec<&str> = text.split('\n').collect();
  lines.pop();

  let mut context = String::new();
  for line in lines.into_iter().map(str::trim).filter(|line| !line.is_empty()) {
    context.push_str(line);
    context.push_str("\n\n");
  }
  context.trim_end().to_string()
}

fn designers(
  page: &Node,
  icons: &IconRegistry,
) -> Result<Vec<Designer>, ParseError> {
  page
    .select("span.context-designer")
    .iter()
    .map(|span| {
      let name = straighten_quotes(&span.text());
      let username = DESIGNER_USERNAME
        .captures(&name)
        .map(|captures| captures[1].to_string())
        .ok_or_else(|| {
          ParseError::structural(
            PAGE,
            name.clone(),
            "could not extract a username from `context-designer`",
          )
        })?;
      let icon = icons
        .icon(&username)
        .map_err(|e| {
          ParseError::structural(PAGE, username.clone(), e.to_string())
        })?
        .to_string();

      log::debug!("Designer `{username}` uses icon `{icon}`");
      Ok(Designer {
        name,
        username,
        icon,
      })
    })
    .collect()
}

/// The elements holding section headers and content blocks.
///
/// Some pages wrap everything in one more container, which is unwrapped.
fn containers(page: &Node, root_class: &str) -> Result<Vec<Node>, ParseError> {
  let root = page
    .select_first(&format!("div.{root_class}"))
    .ok_or_else(|| {
      ParseError::structural(
        PAGE,
        root_class,
        "could not locate the main patch notes <div>",
      )
    })?;

  let children = root.children();
  let divs: Vec<Node> = filters::by_tag("div", &children).cloned().collect();
  if let [only] = divs.as_slice() {
    return Ok(filters::with_classes(&only.children()).cloned().collect());
  }
  Ok(divs)
}

fn sections(
  page: &Node,
  root_class: &str,
  snapshot: &ReferenceSnapshot,
  date: Date,
) -> Result<Vec<Section>, ParseError> {
  let ctx = Context { snapshot, date };
  let mut sections: Vec<Section> = Vec::new();
  let mut open: Option<usize> = None;

  for node in containers(page, root_class)? {
    if node.has_class("header-primary") {
      let title = capitalize(&node.text());
      log::debug!("Section {}: {title}", sections.len() + 1);
      sections.push(Section::new(sections.len() + 1, title));
      open = None;
    } else if node.has_class("content-border") {
      let section = sections.last_mut().ok_or_else(|| {
        ParseError::structural(
          PAGE,
          "content-border",
          "content block found before the first `header-primary`",
        )
      })?;

      let inner = node
        .first_descendant("div")
        .and_then(|outer| outer.first_descendant("div"))
        .ok_or_else(|| {
          ParseError::structural(
            &section.title,
            "content-border",
            "content block without its inner containers",
          )
        })?;

      classify_block(&ctx, section, &mut open, &inner.children())
        .map_err(|e| e.in_section(&section.title))?;
    }
  }

  Ok(sections)
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]

  use super::*;

  #[test]
  fn test_parse_date() {
    assert_eq!(
      parse_date("2023-02-22T18:00:00.000Z"),
      Some(jiff::civil::date(2023, 2, 22))
    );
    assert_eq!(
      parse_date("2023-02-22T23:30:00-05:00"),
      Some(jiff::civil::date(2023, 2, 23))
    );
    assert_eq!(parse_date("2023-02-22"), Some(jiff::civil::date(2023, 2, 22)));
    assert_eq!(parse_date("yesterday"), None);
  }

  #[test]
  fn test_missing_time_is_an_error() {
    let page = Node::parse_document("<p>no date</p>");

    assert!(matches!(
      published_date(&page),
      Err(ParseError::Structural { subject, .. }) if subject == "time"
    ));
  }

  #[test]
  fn test_patch_context_drops_sign_off() {
    let page = Node::parse_document(
      "<blockquote class=\"context\">First paragraph.\n\n  Second paragraph.\n\
       Signed, the team</blockquote>",
    );

    assert_eq!(patch_context(&page), "First paragraph.\n\nSecond paragraph.");
    assert_eq!(patch_context(&Node::parse_document("<p>x</p>")), "");
  }

  #[test]
  fn test_designers() {
    let icons =
      IconRegistry::from_json_str(r#"{"Riot Phroxzon": "Phroxzon.png"}"#)
        .unwrap();
    let page = Node::parse_document(
      "<span class=\"context-designer\">Jeevun \u{201c}Riot Phroxzon\u{201d} Sidhu</span>",
    );

    let designers = designers(&page, &icons).unwrap();
    assert_eq!(designers[0].username, "Riot Phroxzon");
    assert_eq!(designers[0].name, "Jeevun \"Riot Phroxzon\" Sidhu");
    assert_eq!(designers[0].icon, "Phroxzon.png");
  }

  #[test]
  fn test_designer_without_username() {
    let icons = IconRegistry::from_json_str("{}").unwrap();
    let page = Node::parse_document(
      r#"<span class="context-designer">Someone</span>"#,
    );

    assert!(matches!(
      designers(&page, &icons),
      Err(ParseError::Structural { subject, .. }) if subject == "Someone"
    ));
  }

  #[test]
  fn test_single_wrapper_is_unwrapped() {
    let page = Node::parse_document(
      r#"<div class="root"><div class="patch-notes-container">
           <h2 class="header-primary">Champions</h2>
           <span>ignored</span>
           <div class="content-border"></div>
         </div></div>"#,
    );

    let found = containers(&page, "root").unwrap();
    assert_eq!(found.len(), 2);
    assert!(found[0].has_class("header-primary"));
    assert!(found[1].has_class("content-border"));
  }

  #[test]
  fn test_content_before_header() {
    let page = Node::parse_document(
      r#"<div class="root">
           <div class="content-border"><div><div><p>x</p></div></div></div>
           <div class="header-primary">Champions</div>
         </div>"#,
    );

    let snapshot = ReferenceSnapshot::empty();
    let err = sections(&page, "root", &snapshot, jiff::civil::date(2023, 1, 1))
      .unwrap_err();
    assert!(matches!(
      err,
      ParseError::Structural { subject, .. } if subject == "content-border"
    ));
  }
}
