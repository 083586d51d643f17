use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{
   emoji::EmojiCatalog,
   error::{ComposerError, Result},
   types::{EmojiFormat, Theme, default_themes},
};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
   /// How the emoji is written into the commit message (overridden by
   /// `EMC_EMOJI_FORMAT` env var)
   pub emoji_format: EmojiFormat,

   /// Add a Signed-off-by trailer by default (can be forced by --signoff)
   pub signoff: bool,

   /// GPG sign commits by default (can be forced by --sign)
   pub gpg_sign: bool,

   /// Active theme name (overridden by `EMC_THEME` env var)
   pub theme: String,

   /// Themes offered by the theme picker
   pub themes: Vec<Theme>,

   /// Custom emoji catalog (JSON) replacing the embedded one
   pub catalog_path: Option<PathBuf>,

   /// Maximum entries printed by the --find-* pickers
   pub search_limit: usize,

   /// Number of commits scanned for co-author candidates
   pub author_history: usize,

   /// Snapshot file name inside the git directory
   pub snapshot_file: String,
}

impl Default for ComposerConfig {
   fn default() -> Self {
      Self {
         emoji_format:   EmojiFormat::Character,
         signoff:        false,
         gpg_sign:       false,
         theme:          "default".to_string(),
         themes:         default_themes(),
         catalog_path:   None,
         search_limit:   10,
         author_history: 500,
         snapshot_file:  "EMC_SNAPSHOT.json".to_string(),
      }
   }
}

impl ComposerConfig {
   /// Load config from default location (~/.config/emoji-commit/config.toml)
   /// Falls back to Default if the file doesn't exist. Environment variables
   /// override config file values:
   /// - `EMC_EMOJI_FORMAT` overrides `emoji_format`
   /// - `EMC_THEME` overrides `theme`
   pub fn load() -> Result<Self> {
      let config_path = if let Ok(custom_path) = std::env::var("EMC_CONFIG") {
         PathBuf::from(custom_path)
      } else {
         Self::default_config_path().unwrap_or_default()
      };

      if config_path.exists() {
         return Self::from_file(&config_path);
      }

      let mut config = Self::default();
      config.apply_env_overrides();
      Ok(config)
   }

   /// Load config from specific file
   pub fn from_file(path: &Path) -> Result<Self> {
      let contents = std::fs::read_to_string(path)
         .map_err(|e| ComposerError::ConfigError(format!("Failed to read {}: {e}", path.display())))?;
      let mut config = Self::from_toml(&contents)?;
      config.apply_env_overrides();
      Ok(config)
   }

   pub fn from_toml(contents: &str) -> Result<Self> {
      let config: Self = toml::from_str(contents)
         .map_err(|e| ComposerError::ConfigError(format!("Failed to parse config: {e}")))?;
      config.validate()?;
      Ok(config)
   }

   fn validate(&self) -> Result<()> {
      if self.snapshot_file.is_empty() || self.snapshot_file.contains(['/', '\\']) {
         return Err(ComposerError::ConfigError(format!(
            "snapshot_file must be a plain file name, got {:?}",
            self.snapshot_file
         )));
      }
      if self.themes.iter().any(|t| t.name.is_empty()) {
         return Err(ComposerError::ConfigError("themes must have a name".to_string()));
      }
      Ok(())
   }

   /// Apply environment variable overrides to config
   fn apply_env_overrides(&mut self) {
      if let Ok(raw) = std::env::var("EMC_EMOJI_FORMAT") {
         match EmojiFormat::parse(&raw) {
            Some(format) => self.emoji_format = format,
            None => log::warn!("ignoring unknown EMC_EMOJI_FORMAT value {raw:?}"),
         }
      }

      if let Ok(theme) = std::env::var("EMC_THEME") {
         self.theme = theme;
      }
   }

   /// Emoji catalog selected by this config
   pub fn catalog(&self) -> Result<EmojiCatalog> {
      match &self.catalog_path {
         Some(path) => EmojiCatalog::from_file(path),
         None => EmojiCatalog::embedded(),
      }
   }

   /// Get default config path (platform-safe)
   /// Tries HOME (Unix/Linux/macOS) then USERPROFILE (Windows)
   pub fn default_config_path() -> Result<PathBuf> {
      if let Ok(home) = std::env::var("HOME") {
         return Ok(PathBuf::from(home).join(".config/emoji-commit/config.toml"));
      }

      if let Ok(home) = std::env::var("USERPROFILE") {
         return Ok(PathBuf::from(home).join(".config/emoji-commit/config.toml"));
      }

      Err(ComposerError::ConfigError(
         "No home directory found (tried HOME and USERPROFILE)".to_string(),
      ))
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_defaults() {
      let config = ComposerConfig::default();
      assert_eq!(config.emoji_format, EmojiFormat::Character);
      assert_eq!(config.search_limit, 10);
      assert!(config.themes.iter().any(|t| t.name == "nord"));
   }

   #[test]
   fn test_from_toml_partial() {
      let config = ComposerConfig::from_toml(
         r#"
emoji_format = "shortcode"
signoff = true

[[themes]]
name = "custom"
description = "Mine"
"#,
      )
      .unwrap();
      assert_eq!(config.emoji_format, EmojiFormat::Shortcode);
      assert!(config.signoff);
      assert_eq!(config.themes, vec![Theme::new("custom", "Mine")]);
      assert_eq!(config.snapshot_file, "EMC_SNAPSHOT.json");
   }

   #[test]
   fn test_from_toml_rejects_bad_values() {
      assert!(ComposerConfig::from_toml("emoji_format = \"sideways\"").is_err());
      assert!(ComposerConfig::from_toml("snapshot_file = \"../escape.json\"").is_err());
      assert!(ComposerConfig::from_toml("[[themes]]\nname = \"\"").is_err());
   }

   #[test]
   fn test_from_file_and_custom_catalog() {
      let dir = tempfile::tempdir().unwrap();
      let catalog_path = dir.path().join("emojis.json");
      std::fs::write(
         &catalog_path,
         r#"[{"emoji": "🦀", "code": ":crab:", "name": "crab", "description": "Rust things."}]"#,
      )
      .unwrap();
      let config_path = dir.path().join("config.toml");
      std::fs::write(&config_path, format!("catalog_path = {:?}\n", catalog_path.to_str().unwrap()))
         .unwrap();

      let config = ComposerConfig::from_file(&config_path).unwrap();
      let catalog = config.catalog().unwrap();
      assert_eq!(catalog.len(), 1);
      assert_eq!(catalog.by_shortcode(":crab:").unwrap().character, "🦀");
   }
}
