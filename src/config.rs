use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::logging::LogConfig;
use crate::models::PersonalAttributes;
use crate::pipeline::OutputFormat;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Athlete the records belong to
    pub profile: PersonalAttributes,

    /// Logging settings
    pub logging: LogConfig,

    /// Report output settings
    pub output: OutputSettings,
}

/// Report output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Report format
    pub format: OutputFormat,

    /// Print the personal-data banner before text reports
    pub show_profile: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            format: OutputFormat::Text,
            show_profile: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig = toml::from_str(&content)
            .with_context(|| "Failed to parse TOML configuration")?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".steptrack")
            .join("config.toml")
    }

    /// Load an explicit config file, or the default one if it exists.
    ///
    /// A missing default file yields the built-in defaults; a missing
    /// explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_path = Self::default_config_path();
                if default_path.exists() {
                    Self::load_from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply command-line overrides to the profile
    pub fn override_profile(
        &mut self,
        name: Option<String>,
        weight_kg: Option<f64>,
        height_m: Option<f64>,
    ) {
        if let Some(name) = name {
            self.profile.name = name;
        }
        if let Some(weight_kg) = weight_kg {
            self.profile.weight_kg = weight_kg;
        }
        if let Some(height_m) = height_m {
            self.profile.height_m = height_m;
        }
    }

    /// Problems with the profile that will make every calorie calculation fail
    pub fn profile_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !(self.profile.weight_kg > 0.0) {
            warnings.push(format!(
                "profile weight must be positive, got {}",
                self.profile.weight_kg
            ));
        }
        if !(self.profile.height_m > 0.0) {
            warnings.push(format!(
                "profile height must be positive, got {}",
                self.profile.height_m
            ));
        }
        warnings
    }
}
