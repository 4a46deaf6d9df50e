use std::{
  fs,
  path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Reference catalog endpoints. `{}` is replaced by the catalog version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragonConfig {
  pub versions_url:  String,
  pub champions_url: String,
  pub items_url:     String,
  pub runes_url:     String,
  pub spells_url:    String,
}

impl Default for DragonConfig {
  fn default() -> Self {
    let cdn = "https://ddragon.leagueoflegends.com/cdn/{}/data/en_US";
    Self {
      versions_url:  "https://ddragon.leagueoflegends.com/api/versions.json"
        .to_string(),
      champions_url: format!("{cdn}/champion.json"),
      items_url:     format!("{cdn}/item.json"),
      runes_url:     format!("{cdn}/runesReforged.json"),
      spells_url:    format!("{cdn}/summoner.json"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Patch notes page, `{}` is the dashed patch id.
  pub source_url: String,

  /// Class of the patch note body container.
  pub root_class: String,

  /// Target wiki page, `{}` is the dotted patch id.
  pub wiki_page: String,

  /// Designer icon registry. The embedded registry is used when unset.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub designer_icons: Option<PathBuf>,

  /// Output file for rendered markup, stdout when unset.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub output: Option<PathBuf>,

  pub dragon: DragonConfig,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      source_url:     "https://na.leagueoflegends.com/en-us/news/game-updates/\
                       patch-{}-notes"
        .to_string(),
      root_class:     "style__Content-tkcm0t-1".to_string(),
      wiki_page:      "User:Bruno_Blanes/Patch_{}".to_string(),
      designer_icons: None,
      output:         None,
      dragon:         DragonConfig::default(),
    }
  }
}

impl Config {
  /// Patch notes URL for a `major-minor` patch id.
  #[must_use]
  pub fn source_url_for(&self, dashed: &str) -> String {
    self.source_url.replace("{}", dashed)
  }

  /// Wiki page name for a `major.minor` patch id.
  #[must_use]
  pub fn wiki_page_for(&self, dotted: &str) -> String {
    self.wiki_page.replace("{}", dotted)
  }

  /// Load configuration from a TOML or JSON file, picked by extension.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if the format is
  /// unsupported.
  #[allow(
    clippy::option_if_let_else,
    reason = "Clearer with explicit match on extension"
  )]
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to read config file: {}: {}",
        path.display(),
        e
      ))
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
      Some(ext) => {
        match ext.to_lowercase().as_str() {
          "json" => {
            serde_json::from_str(&content).map_err(|e| {
              ConfigError::Config(format!(
                "Failed to parse JSON config from {}: {}",
                path.display(),
                e
              ))
            })
          },
          "toml" => {
            toml::from_str(&content).map_err(|e| {
              ConfigError::Config(format!(
                "Failed to parse TOML config from {}: {}",
                path.display(),
                e
              ))
            })
          },
          _ => {
            Err(ConfigError::Config(format!(
              "Unsupported config file format: {}",
              path.display()
            )))
          },
        }
      },
      None => {
        Err(ConfigError::Config(format!(
          "Config file has no extension: {}",
          path.display()
        )))
      },
    }
  }

  /// Load the given config files in order, or a discovered one when none are
  /// given, then apply `KEY=VALUE` overrides on top.
  ///
  /// # Errors
  ///
  /// Returns an error if a file cannot be loaded or an override is invalid.
  pub fn load(
    config_files: &[PathBuf],
    config_overrides: &[String],
  ) -> Result<Self, ConfigError> {
    let mut config = if let Some((first, rest)) = config_files.split_first() {
      let mut merged = Self::from_file(first).map_err(|e| {
        ConfigError::Config(format!(
          "Failed to load config from {}: {}",
          first.display(),
          e
        ))
      })?;

      for config_path in rest {
        let additional = Self::from_file(config_path).map_err(|e| {
          ConfigError::Config(format!(
            "Failed to load config from {}: {}",
            config_path.display(),
            e
          ))
        })?;
        merged.merge(additional);
      }

      if config_files.len() > 1 {
        log::info!("Loaded and merged {} config files", config_files.len());
      }

      merged
    } else if let Some(discovered) = Self::find_config_file() {
      log::info!("Using discovered config file: {}", discovered.display());
      Self::from_file(&discovered).map_err(|e| {
        ConfigError::Config(format!(
          "Failed to load discovered config from {}: {}",
          discovered.display(),
          e
        ))
      })?
    } else {
      Self::default()
    };

    if !config_overrides.is_empty() {
      config.apply_overrides(config_overrides)?;
    }

    Ok(config)
  }

  /// Search for a config file in the working directory, then in
  /// `$XDG_CONFIG_HOME` and `~/.config/pnparse`.
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    let local = [
      "pnparse.toml",
      "pnparse.json",
      ".pnparse.toml",
      ".pnparse.json",
      ".config/pnparse.toml",
      ".config/pnparse.json",
    ];

    let current_dir = std::env::current_dir().ok()?;
    if let Some(found) = local
      .iter()
      .map(|name| current_dir.join(name))
      .find(|path| path.exists())
    {
      return Some(found);
    }

    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
      let dir = PathBuf::from(xdg_config_home);
      for name in &["pnparse.toml", "pnparse.json"] {
        let path = dir.join(name);
        if path.exists() {
          return Some(path);
        }
      }
    }

    if let Ok(home) = std::env::var("HOME") {
      let dir = PathBuf::from(home).join(".config").join("pnparse");
      for name in &["config.toml", "config.json"] {
        let path = dir.join(name);
        if path.exists() {
          return Some(path);
        }
      }
    }

    None
  }

  /// Apply configuration overrides from `KEY=VALUE` strings, as given through
  /// `--config KEY=VALUE`. Nested keys use a dot, e.g. `dragon.items_url`.
  ///
  /// # Errors
  ///
  /// Returns an error if an override is not in `KEY=VALUE` form or names an
  /// unknown key.
  pub fn apply_overrides(
    &mut self,
    overrides: &[String],
  ) -> Result<(), ConfigError> {
    for override_str in overrides {
      let (key, value) = override_str.split_once('=').ok_or_else(|| {
        ConfigError::Config(format!(
          "Invalid config override format: '{override_str}'. Expected \
           KEY=VALUE"
        ))
      })?;

      self.apply_override(key.trim(), value.trim())?;
    }

    Ok(())
  }

  /// Set a single configuration key. An empty value clears optional paths.
  ///
  /// # Errors
  ///
  /// Returns an error if `key` is not a configuration key.
  pub fn apply_override(
    &mut self,
    key: &str,
    value: &str,
  ) -> Result<(), ConfigError> {
    let optional_path =
      || (!value.is_empty()).then(|| PathBuf::from(value));

    match key {
      "source_url" => self.source_url = value.to_string(),
      "root_class" => self.root_class = value.to_string(),
      "wiki_page" => self.wiki_page = value.to_string(),
      "designer_icons" => self.designer_icons = optional_path(),
      "output" => self.output = optional_path(),
      "dragon.versions_url" => self.dragon.versions_url = value.to_string(),
      "dragon.champions_url" => self.dragon.champions_url = value.to_string(),
      "dragon.items_url" => self.dragon.items_url = value.to_string(),
      "dragon.runes_url" => self.dragon.runes_url = value.to_string(),
      "dragon.spells_url" => self.dragon.spells_url = value.to_string(),
      _ => {
        return Err(ConfigError::Config(format!(
          "Unknown configuration key: '{key}'"
        )));
      },
    }

    log::debug!("Config override: {key} = {value}");
    Ok(())
  }

  /// Merge another config into this one, with the other config's values taking
  /// precedence.
  ///
  /// # Merge Rules
  ///
  /// - [`Option<T>`] fields: Other's [`Some`] value replaces this config's
  ///   value
  /// - Plain fields: Other's value replaces this one unless it is still the
  ///   default, so a later file only overrides what it actually sets
  pub fn merge(&mut self, other: Self) {
    let defaults = Self::default();

    merge_plain(&mut self.source_url, other.source_url, &defaults.source_url);
    merge_plain(&mut self.root_class, other.root_class, &defaults.root_class);
    merge_plain(&mut self.wiki_page, other.wiki_page, &defaults.wiki_page);

    if other.designer_icons.is_some() {
      self.designer_icons = other.designer_icons;
    }
    if other.output.is_some() {
      self.output = other.output;
    }

    let dragon = defaults.dragon;
    merge_plain(
      &mut self.dragon.versions_url,
      other.dragon.versions_url,
      &dragon.versions_url,
    );
    merge_plain(
      &mut self.dragon.champions_url,
      other.dragon.champions_url,
      &dragon.champions_url,
    );
    merge_plain(
      &mut self.dragon.items_url,
      other.dragon.items_url,
      &dragon.items_url,
    );
    merge_plain(
      &mut self.dragon.runes_url,
      other.dragon.runes_url,
      &dragon.runes_url,
    );
    merge_plain(
      &mut self.dragon.spells_url,
      other.dragon.spells_url,
      &dragon.spells_url,
    );
  }

  /// Generate a default configuration file with commented explanations
  ///
  /// # Errors
  ///
  /// Returns an error if the format is unsupported or the file cannot be
  /// written.
  pub fn generate_default_config(
    format: &str,
    path: &Path,
  ) -> Result<(), ConfigError> {
    let config_content = crate::templates::get_template(format)?;

    fs::write(path, config_content).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to write default config to {}: {}",
        path.display(),
        e
      ))
    })?;

    log::info!("Created default configuration file: {}", path.display());
    Ok(())
  }
}

fn merge_plain(target: &mut String, other: String, default: &str) {
  if other != default {
    *target = other;
  }
}

#[cfg(test)]
mod tests {
  #![allow(
    clippy::unwrap_used,
    clippy::field_reassign_with_default,
    reason = "Fine in tests"
  )]

  use super::*;

  #[test]
  fn test_config_merge_option_fields() {
    let mut base = Config::default();
    base.output = Some(PathBuf::from("base.wiki"));

    let mut other = Config::default();
    other.designer_icons = Some(PathBuf::from("icons.json"));

    base.merge(other);

    assert_eq!(base.output, Some(PathBuf::from("base.wiki")));
    assert_eq!(base.designer_icons, Some(PathBuf::from("icons.json")));
  }

  #[test]
  fn test_config_merge_keeps_values_other_left_default() {
    let mut base = Config::default();
    base.root_class = "custom-root".to_string();

    let mut other = Config::default();
    other.dragon.items_url = "mem://items/{}".to_string();

    base.merge(other);

    assert_eq!(base.root_class, "custom-root");
    assert_eq!(base.dragon.items_url, "mem://items/{}");
    assert_eq!(base.dragon.runes_url, DragonConfig::default().runes_url);
  }

  #[test]
  fn test_apply_overrides_string() {
    let mut config = Config::default();

    config
      .apply_overrides(&["root_class=page-body".to_string()])
      .unwrap();

    assert_eq!(config.root_class, "page-body");
  }

  #[test]
  fn test_apply_overrides_nested() {
    let mut config = Config::default();

    config
      .apply_overrides(&["dragon.versions_url = mem://versions".to_string()])
      .unwrap();

    assert_eq!(config.dragon.versions_url, "mem://versions");
  }

  #[test]
  fn test_apply_override_option_pathbuf_with_empty() {
    let mut config = Config::default();
    config.output = Some(PathBuf::from("out.wiki"));

    config.apply_override("output", "").unwrap();

    assert_eq!(config.output, None);
  }

  #[test]
  fn test_apply_overrides_invalid_format() {
    let mut config = Config::default();

    let result = config.apply_overrides(&["no_equals_sign".to_string()]);

    assert!(result.is_err());
    assert!(
      result
        .unwrap_err()
        .to_string()
        .contains("Expected KEY=VALUE")
    );
  }

  #[test]
  fn test_apply_overrides_unknown_key() {
    let mut config = Config::default();

    let result = config.apply_overrides(&["unknown_key=value".to_string()]);

    assert!(result.is_err());
    assert!(
      result
        .unwrap_err()
        .to_string()
        .contains("Unknown configuration key")
    );
  }

  #[test]
  fn test_url_templates() {
    let config = Config::default();

    assert_eq!(
      config.source_url_for("13-4"),
      "https://na.leagueoflegends.com/en-us/news/game-updates/patch-13-4-notes"
    );
    assert_eq!(config.wiki_page_for("13.4"), "User:Bruno_Blanes/Patch_13.4");
  }

  #[test]
  fn test_default_templates_match_default_config() {
    let from_toml: Config =
      toml::from_str(crate::templates::DEFAULT_TOML_TEMPLATE).unwrap();
    let from_json: Config =
      serde_json::from_str(crate::templates::DEFAULT_JSON_TEMPLATE).unwrap();

    assert_eq!(from_toml, Config::default());
    assert_eq!(from_json, Config::default());
  }

  #[test]
  fn test_unsupported_template_format() {
    let result = crate::templates::get_template("yaml");

    assert!(
      result
        .unwrap_err()
        .to_string()
        .contains("Unsupported config format")
    );
  }
}
