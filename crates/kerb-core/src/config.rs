//! Engine configuration
//!
//! Every field carries a serde default, so an empty TOML document (or no
//! file at all) yields the stock engine constants. The config is owned by the
//! application root and handed to the street world at construction.

use crate::{KerbError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables and constants for layout and placement generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Height added per elevation level (meters)
    #[serde(default = "default_curb_height")]
    pub curb_height: f32,
    /// Depth of the base surface; also the minimum segment height
    #[serde(default = "default_base_surface_depth")]
    pub base_surface_depth: f32,
    /// Cycle offset used when a spaced placement config omits one
    #[serde(default = "default_cycle_offset")]
    pub default_cycle_offset: f32,
    /// Lower clamp for spacing / place length
    #[serde(default = "default_min_spacing")]
    pub min_spacing: f32,
    /// Root seed for all placement randomness
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Maximum placements kept per generator per pass (0 = unlimited)
    #[serde(default)]
    pub placement_budget: usize,
}

fn default_curb_height() -> f32 {
    0.15
}
fn default_base_surface_depth() -> f32 {
    0.15
}
fn default_cycle_offset() -> f32 {
    0.5
}
fn default_min_spacing() -> f32 {
    1.0
}
fn default_seed() -> u64 {
    42
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            curb_height: default_curb_height(),
            base_surface_depth: default_base_surface_depth(),
            default_cycle_offset: default_cycle_offset(),
            min_spacing: default_min_spacing(),
            seed: default_seed(),
            placement_budget: 0,
        }
    }
}

impl LayoutConfig {
    /// Parse a config from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: LayoutConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<()> {
        if !(self.curb_height >= 0.0) {
            return Err(KerbError::ValidationError(format!(
                "curb_height must be non-negative, got {}",
                self.curb_height
            )));
        }
        if !(self.base_surface_depth > 0.0) {
            return Err(KerbError::ValidationError(format!(
                "base_surface_depth must be positive, got {}",
                self.base_surface_depth
            )));
        }
        if !(self.min_spacing > 0.0) {
            return Err(KerbError::ValidationError(format!(
                "min_spacing must be positive, got {}",
                self.min_spacing
            )));
        }
        Ok(())
    }

    /// Surface height for an elevation level.
    ///
    /// `level * curb_height + base_surface_depth`, never below
    /// `base_surface_depth`.
    pub fn surface_height(&self, level: Option<i32>) -> f32 {
        match level {
            Some(level) if level > 0 => {
                level as f32 * self.curb_height + self.base_surface_depth
            }
            _ => self.base_surface_depth,
        }
    }
}
