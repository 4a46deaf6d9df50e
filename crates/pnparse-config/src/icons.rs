use std::{collections::BTreeMap, fs, path::Path};

use crate::error::ConfigError;

/// Designer username to wiki icon file.
///
/// A username with no entry is an error: a credit without its icon is not
/// rendered with a blank one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconRegistry {
  icons: BTreeMap<String, String>,
}

impl IconRegistry {
  /// The registry shipped with the binary.
  ///
  /// # Errors
  ///
  /// Returns an error if the embedded registry is not a JSON object of strings.
  pub fn embedded() -> Result<Self, ConfigError> {
    Self::from_json_str(pnparse_templates::DESIGNER_ICONS)
  }

  /// # Errors
  ///
  /// Returns an error if `json` is not an object mapping strings to strings.
  pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
    Ok(Self {
      icons: serde_json::from_str(json)?,
    })
  }

  /// Load the registry at `path`, or the embedded one when `path` is `None`.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or decoded.
  pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
    let Some(path) = path else {
      return Self::embedded();
    };

    let content = fs::read_to_string(path).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to read designer icons from {}: {}",
        path.display(),
        e
      ))
    })?;
    let registry = Self::from_json_str(&content)?;
    log::debug!(
      "Loaded {} designer icons from {}",
      registry.len(),
      path.display()
    );
    Ok(registry)
  }

  /// Like [`IconRegistry::load`], but a registry file that does not exist yet
  /// starts from the embedded registry.
  ///
  /// # Errors
  ///
  /// Returns an error if an existing file cannot be read or decoded.
  pub fn load_or_embedded(path: &Path) -> Result<Self, ConfigError> {
    if path.exists() {
      Self::load(Some(path))
    } else {
      Self::embedded()
    }
  }

  /// Icon file for `username`.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::UnknownDesigner`] when there is no entry.
  pub fn icon(&self, username: &str) -> Result<&str, ConfigError> {
    self
      .icons
      .get(username)
      .map(String::as_str)
      .ok_or_else(|| ConfigError::UnknownDesigner(username.to_string()))
  }

  /// Register or replace the icon of `username`, returning the previous one.
  pub fn insert(
    &mut self,
    username: impl Into<String>,
    icon: impl Into<String>,
  ) -> Option<String> {
    self.icons.insert(username.into(), icon.into())
  }

  /// Write the registry as pretty JSON.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be written.
  pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
    let json = serde_json::to_string_pretty(&self.icons)?;
    fs::write(path, json + "\n")?;
    log::info!("Saved {} designer icons to {}", self.len(), path.display());
    Ok(())
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.icons.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.icons.is_empty()
  }
}
