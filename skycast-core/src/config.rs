use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Name of the environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_place = "Marrakesh"
/// suggestion_limit = 5
/// chart_points = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OpenWeather API key; the `OPENWEATHER_API_KEY` environment variable
    /// takes precedence when set.
    pub api_key: Option<String>,

    /// Place fetched on dashboard start, before the user searches anything.
    #[serde(default = "default_place")]
    pub default_place: String,

    /// Maximum number of autocomplete candidates requested per keystroke.
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,

    /// Maximum number of forecast points rendered in the temperature chart.
    #[serde(default = "default_chart_points")]
    pub chart_points: usize,
}

fn default_place() -> String {
    "Marrakesh".to_string()
}

const fn default_suggestion_limit() -> usize {
    5
}

const fn default_chart_points() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            default_place: default_place(),
            suggestion_limit: default_suggestion_limit(),
            chart_points: default_chart_points(),
        }
    }
}

impl Config {
    /// Resolve the API key: environment variable first, stored key second.
    pub fn resolved_api_key(&self) -> Result<String> {
        let env_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
        resolve_api_key(env_key, self.api_key.as_deref()).ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `skycast configure` or set the {API_KEY_ENV} environment variable."
            )
        })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Precedence rule, split out so it is testable without touching the process
/// environment: a non-empty environment value wins over the stored key.
fn resolve_api_key(env_key: Option<String>, stored: Option<&str>) -> Option<String> {
    env_key.or_else(|| stored.map(str::to_string))
}
