#![allow(clippy::expect_used, reason = "Expect is acceptable in tests")]

use pnparse_dragon::{
  Dragon,
  DragonError,
  Endpoints,
  StaticSource,
  SubjectKind,
};
use serde_json::{Value, json};

fn endpoints() -> Endpoints {
  Endpoints {
    versions:  "mem://versions".to_string(),
    champions: "mem://{}/champion".to_string(),
    items:     "mem://{}/item".to_string(),
    runes:     "mem://{}/runes".to_string(),
    spells:    "mem://{}/summoner".to_string(),
  }
}

fn catalogs(version: &str, champion: &str) -> StaticSource {
  StaticSource::new()
    .with("mem://versions", json!([version, "0.0.1"]))
    .with(
      format!("mem://{version}/champion"),
      json!({ "data": { "Ahri": { "name": "Ahri" }, "X": { "name": champion } } }),
    )
    .with(
      format!("mem://{version}/item"),
      json!({ "data": { "3068": { "name": "Sunfire Aegis", "gold": 2700 } } }),
    )
    .with(
      format!("mem://{version}/summoner"),
      json!({ "data": { "SummonerFlash": { "name": "Flash" } } }),
    )
    .with(
      format!("mem://{version}/runes"),
      json!([
        {
          "name": "Precision",
          "slots": [
            { "runes": [ { "name": "Conqueror" }, { "name": "Lethal Tempo" } ] },
            { "runes": [ { "name": "Triumph" } ] }
          ]
        },
        { "name": "Domination", "slots": [] }
      ]),
    )
}

#[test]
fn test_refresh_installs_snapshot() {
  let dragon = Dragon::with_source(catalogs("13.1.1", "Jinx"), endpoints());
  assert_eq!(dragon.version(), None);

  assert!(dragon.refresh().expect("refresh"));
  assert_eq!(dragon.version().as_deref(), Some("13.1.1"));

  let snapshot = dragon.snapshot();
  assert_eq!(snapshot.kind_of("Jinx"), SubjectKind::Character);
  assert_eq!(snapshot.kind_of("Sunfire Aegis"), SubjectKind::Equipment);
  assert_eq!(snapshot.kind_of("Flash"), SubjectKind::AuxiliaryAbility);
  assert_eq!(snapshot.kind_of("Triumph"), SubjectKind::Rune);
  assert_eq!(snapshot.kind_of("Domination"), SubjectKind::Rune);

  let runes: Vec<&str> =
    snapshot.runes().iter().map(|r| r.name.as_str()).collect();
  assert_eq!(runes, [
    "Precision",
    "Conqueror",
    "Lethal Tempo",
    "Triumph",
    "Domination"
  ]);
  assert_eq!(snapshot.items()[0].fields.get("gold"), Some(&Value::from(2700)));
}

#[test]
fn test_refresh_same_version_is_noop() {
  let dragon = Dragon::with_source(catalogs("13.1.1", "Jinx"), endpoints());
  assert!(dragon.refresh().expect("first refresh"));

  let before = dragon.snapshot();
  assert!(!dragon.refresh().expect("second refresh"));
  assert!(std::sync::Arc::ptr_eq(&before, &dragon.snapshot()));
}

#[test]
fn test_failed_refresh_keeps_previous_snapshot() {
  let source = catalogs("13.1.1", "Jinx")
    .with("mem://versions", json!(["13.2.1"]))
    .with("mem://13.2.1/champion", json!({ "data": {} }))
    .with("mem://13.2.1/item", json!({ "nodata": true }));
  let dragon = Dragon::with_source(source, endpoints());

  let err = dragon.refresh().expect_err("item catalog is malformed");
  assert!(matches!(err, DragonError::Shape { .. }));
  assert_eq!(dragon.version(), None);
  assert_eq!(dragon.snapshot().kind_of("Jinx"), SubjectKind::Unknown);
}

#[test]
fn test_missing_document_is_http_error() {
  let source = StaticSource::new().with("mem://versions", json!(["9.9.9"]));
  let dragon = Dragon::with_source(source, endpoints());

  let err = dragon.refresh().expect_err("no champion catalog");
  assert!(matches!(
    err,
    DragonError::Http { ref url, status: 404 } if url == "mem://9.9.9/champion"
  ));
}

#[test]
fn test_empty_version_list_is_shape_error() {
  let source = StaticSource::new().with("mem://versions", json!([]));
  let dragon = Dragon::with_source(source, endpoints());
  assert!(matches!(dragon.refresh(), Err(DragonError::Shape { .. })));
}
