//! Extraction settings, optionally loaded from `~/.config/pdftab/config.toml`.
//!
//! ```toml
//! parallel = true
//! try_bordered = true
//!
//! [grid]
//! row_tolerance = 3.0
//! col_tolerance = 10.0
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// Tolerances for borderless reconstruction, in PDF points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Vertical snapping step; words whose `top` snaps to the same multiple share a row.
    pub row_tolerance: f64,
    /// Horizontal gap above which a new cell starts.
    pub col_tolerance: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            row_tolerance: 3.0,
            col_tolerance: 10.0,
        }
    }
}

impl GridConfig {
    /// Both tolerances must be positive and finite.
    pub fn validate(&self) -> std::result::Result<(), TableError> {
        for (name, value) in [
            ("row_tolerance", self.row_tolerance),
            ("col_tolerance", self.col_tolerance),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TableError::InvalidInput(format!(
                    "{name} must be a positive finite number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Document-level extraction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub grid: GridConfig,
    /// Reconstruct pages on the rayon pool instead of one after another.
    pub parallel: bool,
    /// Ask the page source for ruled tables before falling back to word geometry.
    pub try_bordered: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            parallel: true,
            try_bordered: true,
        }
    }
}

impl ExtractConfig {
    pub fn validate(&self) -> std::result::Result<(), TableError> {
        self.grid.validate()
    }

    /// Parse a TOML document; absent keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("invalid pdftab config")?;
        config.validate()?;
        Ok(config)
    }
}

/// Load settings from the default config path.
///
/// Returns defaults if the file doesn't exist (configuration is optional).
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read, parsed or validated.
pub fn load_config() -> Result<ExtractConfig> {
    let path = config_path();
    if !path.exists() {
        return Ok(ExtractConfig::default());
    }
    load_config_from(&path)
}

/// Load settings from an explicit file, which must exist.
pub fn load_config_from(path: &Path) -> Result<ExtractConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    ExtractConfig::from_toml_str(&content).with_context(|| format!("in {}", path.display()))
}

/// Return the path to the default config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pdftab")
        .join("config.toml")
}
