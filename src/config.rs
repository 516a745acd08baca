//! Profile configuration
//!
//! Loads display settings for the dataset descriptor from YAML.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "CATALOG_PROFILE_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "config/profile.yaml";

/// Display settings applied to every dataset profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileConfig {
    /// Do not resolve sibling platforms (sibling-merged views disabled).
    pub hide_siblings: bool,
    /// Tab selected when the caller does not choose one.
    pub default_tab: Option<String>,
    /// Color of the highlighted dataset icon.
    pub highlight_color: String,
    /// Color of the muted dataset icon.
    pub muted_color: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            hide_siblings: false,
            default_tab: None,
            highlight_color: "#B37FEB".to_string(),
            muted_color: "#BFBFBF".to_string(),
        }
    }
}

impl ProfileConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).context("Failed to parse profile config")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("highlight_color", &self.highlight_color),
            ("muted_color", &self.muted_color),
        ] {
            if !is_hex_color(value) {
                bail!("{field} must be a #RRGGBB color, got '{value}'");
            }
        }
        if self.default_tab.as_deref() == Some("") {
            bail!("default_tab must not be empty");
        }
        Ok(())
    }
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

pub struct ConfigLoader {
    path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Create loader from CATALOG_PROFILE_CONFIG or the default location
    ///
    /// Path resolution order:
    /// 1. CATALOG_PROFILE_CONFIG environment variable (explicit override)
    /// 2. Relative "config/profile.yaml" (running from workspace root)
    /// 3. CARGO_MANIFEST_DIR/config/profile.yaml
    /// 4. No file - built-in defaults
    pub fn from_env() -> Self {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::new(path);
        }

        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            return Self::new(DEFAULT_CONFIG_PATH);
        }

        let manifest_config = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CONFIG_PATH);
        if manifest_config.exists() {
            return Self::new(manifest_config);
        }

        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn load(&self) -> Result<ProfileConfig> {
        let Some(path) = &self.path else {
            info!("No profile config file found, using defaults");
            return Ok(ProfileConfig::default());
        };

        info!("Loading profile configuration from {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        ProfileConfig::from_yaml_str(&content)
            .with_context(|| format!("Invalid profile config in {}", path.display()))
    }
}
