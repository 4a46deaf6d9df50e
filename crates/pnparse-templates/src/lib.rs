//! Verbatim wiki markup used by the serializer.
//!
//! Template and parameter names are a compatibility contract with the wiki's
//! template set. Anything in here changes the rendered page byte for byte.

pub const DESIGNER_ICONS: &str = include_str!("../data/designer_icons.json");

pub const PATCH_TABS_HEADER: &str = "{{PatchTabsHeader}}__NOTOC__\n";
pub const OPEN_ONLY_INCLUDE: &str = "<onlyinclude>\n";
pub const CLOSE_ONLY_INCLUDE: &str = "</onlyinclude>\n";
pub const BOX_START: &str = "{{Box|start}}\n";
pub const BOX_BREAK: &str = "{{Box|break}}\n";
pub const BOX_END: &str = "{{Box|end}}\n";
pub const TOC_START: &str = "{{PatchNotesTOC\n";
pub const PATCH_LIST_NAVBOX: &str = "{{Patch List Navbox}}\n";

pub const LINE_BREAK: &str = "<br>\n";
pub const THEMATIC_BREAK: &str = "<hr>\n";
pub const SIMPLIFIED_SEPARATOR: &str = "<br><hr><br>";
pub const TEMPLATE_END: &str = "}}\n";
pub const NEW_LINE: &str = "\n";

pub const OPEN_BORDER_DIV: &str = "<div \
                                   style=\"margin:12px;border:1px solid \
                                   #BBB;padding:15px 25px;width:751px;\
                                   background-color:var(--interface-background)\
                                   \">\n";
pub const OPEN_BANNER_DIV: &str =
  "<div style=\"border:1px solid #BBB;padding:.33em\">";
pub const CLOSE_DIV: &str = "</div>\n";

/// Body of the `|changes=` parameter of `{{pnb}}`, stripped again when
/// nothing follows it.
pub const CHANGES_PARAM: &str = "|changes=";

/// Section titles that get a table-of-contents icon group.
pub const TOC_GROUP_TYPES: [&str; 6] =
  ["Champion", "Item", "Summoner", "Rune", "Mastery", "Stat"];

#[must_use]
pub fn title(text: &str) -> String {
  format!("== {text} ==\n")
}

#[must_use]
pub fn subtitle(text: &str) -> String {
  format!("=== {text} ===\n")
}

/// `{{ci|...}}` champion cross-reference bullet.
#[must_use]
pub fn champion_icon(name: &str) -> String {
  format!("* {{{{ci|{name}}}}}\n")
}

/// Anchored item heading used for nested non-champion changes.
#[must_use]
pub fn anchor(name: &str) -> String {
  format!("{{{{Anchor|{name}}}}}'''{{{{ii|{name}}}}}'''\n")
}

#[must_use]
pub fn hyperlink(url: &str, text: &str) -> String {
  format!("[{url} {text}]\n")
}

#[must_use]
pub fn patch_banner(version: &str) -> String {
  format!("[[File:Patch {version} Banner.jpg|740px|link=]]")
}

#[must_use]
pub fn designer_credit(icon: &str, name: &str) -> String {
  format!("[[File:{icon}|20px|link=]] {name}<br>\n")
}

#[must_use]
pub fn simplified_header(context: &str) -> String {
  format!("{{{{pnbh|context='''{context}'''<br>\n")
}

#[must_use]
pub fn simplified_subheader(context: &str) -> String {
  format!("\n'''{context}'''<br>\n")
}

#[must_use]
pub fn splash_caption(text: &str) -> String {
  format!("''<span style=\"color:#555\">{text}</span>''\n")
}

#[must_use]
pub fn splash_table_start() -> &'static str {
  "{{PatchSplashTable|br=2\n"
}

#[must_use]
pub fn splash_entry(index: usize, title: &str) -> String {
  format!("|s{index}={{{{SplashTableEntry|{title}}}}}\n")
}

#[must_use]
pub fn splash_image_entry(index: usize, title: &str) -> String {
  format!(
    "|s{index}=<div style=\"border:1px solid #BBB; \
     padding:.33em\">[[File:{title}.jpg|350px]]</div>'''{title}'''\n"
  )
}

/// Opening of the page-level `{{pnbh}}` block.
#[must_use]
pub fn patch_header(version: &str, date: &str) -> String {
  format!("{{{{pnbh|patch_number={version}|date={date}\n")
}

#[must_use]
pub fn context_param(context: &str) -> String {
  format!("|context={context}\n")
}

/// Table of contents entry for a section without icons.
#[must_use]
pub fn toc_group(id: usize, title: &str) -> String {
  format!("|group{id}={title}\n")
}

/// Table of contents entry with an icon list, left open for the icon names.
#[must_use]
pub fn toc_icon_group(id: usize, title: &str, kind: &str) -> String {
  format!(
    "\n|group{id}={title}\n|group{id}types={kind}\n|group{id}images="
  )
}

pub const PNB_START: &str = "{{pnb";

#[must_use]
pub fn status_param(status: &str) -> String {
  format!("|ch={status}")
}

#[must_use]
pub fn date_param(date: &str) -> String {
  format!("|date={date}")
}

/// A named `{{pnb}}` parameter on its own line, e.g. `|champion=Ahri`.
#[must_use]
pub fn named_param(key: &str, value: &str) -> String {
  format!("|{key}={value}\n")
}

/// `{{pbc}}` attribute line. `before` is left out entirely for new values.
#[must_use]
pub fn attribute(
  status: Option<&str>,
  name: &str,
  before: Option<&str>,
  after: &str,
) -> String {
  let status = status.map(status_param).unwrap_or_default();
  match before {
    Some(before) => format!("{{{{pbc{status}|{name}|{before}|{after}}}}}\n"),
    None => format!("{{{{pbc{status}|{name}|{after}}}}}\n"),
  }
}

/// `{{pai}}` ability line.
#[must_use]
pub fn ability(name: &str) -> String {
  format!("{{{{pai|{name}|}}}}\n")
}

#[must_use]
pub fn structured_context(context: &str) -> String {
  format!(":''{context}''\n")
}

#[must_use]
pub fn bold_line(text: &str) -> String {
  format!("'''{text}'''<br>\n")
}

#[must_use]
pub fn bullet(text: &str) -> String {
  format!("* {text}\n")
}
