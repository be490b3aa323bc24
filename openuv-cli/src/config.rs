use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use openuv_core::Coordinates;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default location used when `show` is run without `--lat`/`--lon`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// timeout_secs = 10
///
/// [location]
/// lat = 52.52
/// lon = 13.405
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_key: Option<String>,

    /// Overrides the public API base URL.
    pub api_url: Option<String>,

    pub timeout_secs: Option<u64>,

    // Tables have to come after plain values in TOML.
    pub location: Option<Location>,
}

impl Config {
    /// Returns the stored API key, or an error telling the user how to add one.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty()).ok_or_else(|| {
            anyhow!(
                "No OpenUV API key configured.\n\
                 Hint: run `openuv configure`, pass `--api-key` or set OPENUV_API_KEY."
            )
        })
    }

    /// Returns the stored location, or an error telling the user how to add one.
    pub fn coordinates(&self) -> Result<Coordinates> {
        self.location
            .map(|l| Coordinates::new(l.lat, l.lon))
            .ok_or_else(|| {
                anyhow!(
                    "No location configured.\n\
                     Hint: run `openuv configure` or pass `--lat` and `--lon`."
                )
            })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn set_location(&mut self, coordinates: Coordinates) {
        self.location = Some(Location { lat: coordinates.latitude, lon: coordinates.longitude });
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            tracing::debug!(message = "no config file found", path = %path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::debug!(message = "saved config file", path = %path.display());
        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "openuv", "openuv-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
