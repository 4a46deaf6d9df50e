use crate::error::ConfigError;

/// Default configuration in TOML, commented so a fresh `pnparse init` explains
/// itself.
pub const DEFAULT_TOML_TEMPLATE: &str = r#"# pnparse configuration file

# Official patch notes page. `{}` is replaced by the patch id with a dash,
# e.g. `13-4`.
source_url = "https://na.leagueoflegends.com/en-us/news/game-updates/patch-{}-notes"

# Class of the container holding the patch note body
root_class = "style__Content-tkcm0t-1"

# Wiki page the rendered markup is meant for. `{}` is the dotted patch id.
wiki_page = "User:Bruno_Blanes/Patch_{}"

# JSON file mapping designer usernames to icon files (optional, the
# embedded registry is used otherwise)
# designer_icons = "designer_icons.json"

# Where `pnparse parse` writes the markup (optional, stdout otherwise)
# output = "patch.wiki"

# Reference catalogs. `{}` is replaced by the catalog version.
[dragon]
versions_url  = "https://ddragon.leagueoflegends.com/api/versions.json"
champions_url = "https://ddragon.leagueoflegends.com/cdn/{}/data/en_US/champion.json"
items_url     = "https://ddragon.leagueoflegends.com/cdn/{}/data/en_US/item.json"
runes_url     = "https://ddragon.leagueoflegends.com/cdn/{}/data/en_US/runesReforged.json"
spells_url    = "https://ddragon.leagueoflegends.com/cdn/{}/data/en_US/summoner.json"
"#;

/// Default configuration in JSON. No comments, JSON has none.
pub const DEFAULT_JSON_TEMPLATE: &str = r#"{
  "source_url": "https://na.leagueoflegends.com/en-us/news/game-updates/patch-{}-notes",
  "root_class": "style__Content-tkcm0t-1",
  "wiki_page": "User:Bruno_Blanes/Patch_{}",
  "dragon": {
    "versions_url": "https://ddragon.leagueoflegends.com/api/versions.json",
    "champions_url": "https://ddragon.leagueoflegends.com/cdn/{}/data/en_US/champion.json",
    "items_url": "https://ddragon.leagueoflegends.com/cdn/{}/data/en_US/item.json",
    "runes_url": "https://ddragon.leagueoflegends.com/cdn/{}/data/en_US/runesReforged.json",
    "spells_url": "https://ddragon.leagueoflegends.com/cdn/{}/data/en_US/summoner.json"
  }
}
"#;

/// Default configuration text for `format` (`toml` or `json`).
///
/// # Errors
///
/// Returns [`ConfigError::Template`] for any other format.
pub fn get_template(format: &str) -> Result<&'static str, ConfigError> {
  match format.to_lowercase().as_str() {
    "toml" => Ok(DEFAULT_TOML_TEMPLATE),
    "json" => Ok(DEFAULT_JSON_TEMPLATE),
    other => {
      Err(ConfigError::Template(format!(
        "Unsupported config format: {other}"
      )))
    },
  }
}
