#![allow(clippy::expect_used, reason = "Expect is acceptable in tests")]

use pnparse_config::{Config, IconRegistry};
use pnparse_core::{ParseError, Parser, StaticFetcher, model::SectionKind};
use pnparse_dragon::{Dragon, Endpoints, StaticSource};
use serde_json::json;

fn endpoints() -> Endpoints {
  Endpoints {
    versions:  "mem://versions".to_string(),
    champions: "mem://{}/champion".to_string(),
    items:     "mem://{}/item".to_string(),
    runes:     "mem://{}/runes".to_string(),
    spells:    "mem://{}/summoner".to_string(),
  }
}

fn dragon() -> Dragon {
  let source = StaticSource::new()
    .with("mem://versions", json!(["13.4.1"]))
    .with(
      "mem://13.4.1/champion",
      json!({ "data": { "Ahri": { "name": "Ahri" }, "Hecarim": { "name": "Hecarim" } } }),
    )
    .with(
      "mem://13.4.1/item",
      json!({ "data": { "3068": { "name": "Sunfire Aegis" } } }),
    )
    .with("mem://13.4.1/runes", json!([{ "name": "Precision", "slots": [] }]))
    .with(
      "mem://13.4.1/summoner",
      json!({ "data": { "SummonerFlash": { "name": "Flash" } } }),
    );
  Dragon::with_source(source, endpoints())
}

fn icons() -> IconRegistry {
  IconRegistry::from_json_str(r#"{ "Riot Phroxzon": "Phroxzon.png" }"#)
    .expect("valid registry")
}

fn attribute_change(name: &str, before: &str, after: &str) -> String {
  format!(
    r#"<div class="attribute-change">
         <span class="attribute">{name}</span>
         <span class="attribute-before">{before}</span>
         <span class="attribute-after">{after}</span>
       </div>"#
  )
}

fn block(content: &str) -> String {
  format!(r#"<div class="content-border"><div><div>{content}</div></div></div>"#)
}

fn page(designer: &str, sections: &str) -> String {
  format!(
    r#"<html><body>
         <time datetime="2023-02-22T18:00:00.000Z">2/22/2023</time>
         <blockquote class="context">Welcome to patch 13.4.
           Enjoy the buffs.
           See you next time</blockquote>
         <span class="context-designer">{designer}</span>
         <div class="style__Content-tkcm0t-1">
           <div id="patch-notes-container">{sections}</div>
         </div>
       </body></html>"#
  )
}

fn three_sections() -> String {
  let highlights = block("<p>Intro</p><p>Banner text</p>");
  let balance = block(&format!(
    "<h3>Buffs</h3>{}{}",
    attribute_change("Damage Dealt", "95%", "100%"),
    attribute_change("Damage Taken", "105%", "100%"),
  ));
  let digest = block(&format!(
    r#"<h2 class="change-title">Champions</h2>
       <h4 class="ability-title">Ahri</h4>
       {}"#,
    attribute_change("Q - Orb of Deception Cooldown", "7", "6"),
  ));

  page(
    "Jeevun \u{201c}Riot Phroxzon\u{201d} Sidhu",
    &format!(
      r#"<h2 class="header-primary">patch highlights</h2>{highlights}
         <h2 class="header-primary">aram balance changes</h2>{balance}
         <h2 class="header-primary">mid-patch updates</h2>{digest}"#
    ),
  )
}

fn parse(html: &str) -> Result<pnparse_core::Rendered, ParseError> {
  let config = Config::default();
  let icons = icons();
  let dragon = dragon();
  let fetcher =
    StaticFetcher::new().with(config.source_url_for("13-4"), html.to_string());

  Parser::new(&config, &icons, &dragon, &fetcher).parse(" 13,4 ")
}

#[test]
fn test_round_trip() {
  let rendered = parse(&three_sections()).expect("parse succeeds");
  let markup = &rendered.markup;

  let sections = &rendered.document.sections;
  let kinds: Vec<_> = sections.iter().map(|s| (s.id, s.kind())).collect();
  assert_eq!(kinds, vec![
    (1, SectionKind::Highlights),
    (2, SectionKind::Balance),
    (3, SectionKind::Digest),
  ]);
  assert_eq!(sections[1].title, "ARAM Balance Changes");

  let expected = [
    "[[File:Patch 13.4 Banner.jpg|740px|link=]]",
    "Banner text",
    "{{pbc|Damage Dealt|95%|100%}}",
    "{{pbc|Damage Taken|105%|100%}}",
    "{{pnb|date=2023-02-22|champion=Ahri\n|changes={{pai|Orb of Deception|}}\n\
     {{pbc|Cooldown|7|6}}\n}}\n",
  ];
  let mut from = 0;
  for needle in expected {
    let at = markup[from..].find(needle);
    assert!(at.is_some(), "`{needle}` missing after byte {from}");
    from += at.expect("checked above") + needle.len();
  }

  assert!(
    markup.contains("|context=Welcome to patch 13.4.\n\nEnjoy the buffs.\n")
  );
  assert!(markup.contains(
    "[[File:Phroxzon.png|20px|link=]] Jeevun \"Riot Phroxzon\" Sidhu<br>\n"
  ));
  assert_eq!(rendered.page, "User:Bruno_Blanes/Patch_13.4");
}

#[test]
fn test_http_error() {
  let config = Config::default();
  let icons = icons();
  let dragon = dragon();
  let fetcher = StaticFetcher::new();

  let err = Parser::new(&config, &icons, &dragon, &fetcher)
    .parse("13.4")
    .expect_err("nothing to fetch");

  assert!(matches!(err, ParseError::Http { status: 404, .. }));
  assert_eq!(
    dragon.version(),
    None,
    "catalogs are only refreshed after the fetch"
  );
}

#[test]
fn test_malformed_patch_identifier() {
  let config = Config::default();
  let icons = icons();
  let dragon = dragon();
  let fetcher = StaticFetcher::new();
  let parser = Parser::new(&config, &icons, &dragon, &fetcher);

  for input in ["13.04", "13;4", "13.4.1", "v13.4", ""] {
    assert!(
      matches!(parser.parse(input), Err(ParseError::Format { .. })),
      "input: {input:?}"
    );
  }
}

#[test]
fn test_unknown_designer_icon() {
  let html = page("Someone \"Riot Nobody\" Else", "");

  let err = parse(&html).expect_err("icon lookup fails");

  assert!(
    matches!(
      &err,
      ParseError::Structural { subject, .. } if subject == "Riot Nobody"
    ),
    "unexpected error: {err}"
  );
}

#[test]
fn test_structural_error_carries_section() {
  let digest = block(&format!(
    r#"<h2 class="change-title">Champions</h2>{}"#,
    attribute_change("Base Armor", "30", "32"),
  ));
  let html = page(
    "\"Riot Phroxzon\"",
    &format!(r#"<h2 class="header-primary">Mid-Patch Updates</h2>{digest}"#),
  );

  let err = parse(&html).expect_err("attribute before ability title");

  assert!(
    matches!(
      &err,
      ParseError::Structural { section, subject, .. }
        if section == "Mid-Patch Updates" && subject == "Champions"
    ),
    "unexpected error: {err}"
  );
}

#[test]
fn test_catalog_failure_aborts() {
  let config = Config::default();
  let icons = icons();
  let dragon = Dragon::with_source(StaticSource::new(), endpoints());
  let fetcher = StaticFetcher::new()
    .with(config.source_url_for("13-4"), three_sections());

  let err = Parser::new(&config, &icons, &dragon, &fetcher)
    .parse("13.4")
    .expect_err("no catalogs");

  assert!(matches!(err, ParseError::Reference(_)));
}
