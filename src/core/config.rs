use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings that change how barcodes are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderSettings {
    /// Strip one leading and one trailing `*` before decoding
    pub strip_delimiters: bool,
    /// Added to two-digit years; must be a whole century
    pub base_year: i32,
}

impl Default for DecoderSettings {
    fn default() -> Self {
        DecoderSettings {
            strip_delimiters: true,
            base_year: 2000,
        }
    }
}

/// Settings as they appear in a TOML file, where every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsOverrides {
    #[serde(default)]
    pub strip_delimiters: Option<bool>,
    #[serde(default)]
    pub base_year: Option<i32>,
}

/// Layout of `hibc.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    #[serde(default)]
    pub decoder: SettingsOverrides,
}

impl SettingsFile {
    /// Parses a settings file from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Loads a settings file from a path.
    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml(&content)?)
    }
}

impl DecoderSettings {
    /// Loads the built-in settings bundled with the library.
    pub fn load_default() -> Result<Self, Box<dyn std::error::Error>> {
        let content = include_str!("../../hibc.toml");
        let mut settings = DecoderSettings::default();
        settings.merge(SettingsFile::from_toml(content)?.decoder);
        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings with user overrides from standard locations.
    ///
    /// Searches in priority order:
    /// 1. Built-in settings (from library)
    /// 2. `~/.config/hibc/hibc.toml` (user overrides)
    /// 3. `./hibc.toml` (project-local overrides)
    ///
    /// Later files override individual keys of earlier ones. A file that
    /// cannot be read or parsed is reported on stderr and skipped.
    pub fn load_with_overrides() -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings = Self::load_default()?;

        if let Some(config_dir) = dirs::config_dir() {
            let user_config_path = config_dir.join("hibc").join("hibc.toml");
            if user_config_path.exists() {
                match SettingsFile::load_from_file(&user_config_path) {
                    Ok(file) => settings.merge(file.decoder),
                    Err(e) => {
                        eprintln!(
                            "Warning: Failed to load user config from {:?}: {}",
                            user_config_path, e
                        );
                    }
                }
            }
        }

        let local_config_path = Path::new("hibc.toml");
        if local_config_path.exists() {
            match SettingsFile::load_from_file(local_config_path) {
                Ok(file) => settings.merge(file.decoder),
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to load local config from {:?}: {}",
                        local_config_path, e
                    );
                }
            }
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Applies every key present in `overrides`.
    pub fn merge(&mut self, overrides: SettingsOverrides) {
        if let Some(strip) = overrides.strip_delimiters {
            self.strip_delimiters = strip;
        }
        if let Some(base_year) = overrides.base_year {
            self.base_year = base_year;
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base_year % 100 != 0 || !(1900..=9900).contains(&self.base_year) {
            return Err(format!(
                "base_year must be a century between 1900 and 9900, got {}",
                self.base_year
            ));
        }
        Ok(())
    }
}
