//! Generator configuration
//!
//! Everything a run reads from the host: grid size, climate and sea level
//! presets, hub radii and noise grains. Configs load from JSON; any field left
//! out keeps its default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::climate::{ClimateParams, ClimatePreset, SeaLevel};
use crate::error::{GenerationError, Result};
use crate::landmass::{GridInfo, LandmassSettings};

/// Smallest disc diameter the generator accepts.
pub const MIN_GRID_SIZE: usize = 16;

/// World size presets, each with the rectangular grid a flat map of that
/// size would use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorldSize {
    Duel,
    Tiny,
    Small,
    #[default]
    Standard,
    Large,
    Huge,
}

impl WorldSize {
    pub fn all() -> &'static [Self] {
        &[Self::Duel, Self::Tiny, Self::Small, Self::Standard, Self::Large, Self::Huge]
    }

    /// Parse from string (for CLI)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "duel" => Some(Self::Duel),
            "tiny" => Some(Self::Tiny),
            "small" => Some(Self::Small),
            "standard" | "default" => Some(Self::Standard),
            "large" => Some(Self::Large),
            "huge" => Some(Self::Huge),
            _ => None,
        }
    }

    /// Grid of the equivalent rectangular map.
    pub fn rect_grid(&self) -> (usize, usize) {
        match self {
            Self::Duel => (40, 24),
            Self::Tiny => (52, 32),
            Self::Small => (64, 40),
            Self::Standard => (84, 52),
            Self::Large => (104, 64),
            Self::Huge => (128, 80),
        }
    }

    /// Diameter of a disc with the same playable area as the rectangular
    /// map, since the corners cut off by the round border are lost.
    pub fn disc_diameter(&self) -> usize {
        let (w, h) = self.rect_grid();
        let area = (w * h) as f64;
        (2.0 * (area / std::f64::consts::PI).sqrt()).ceil() as usize
    }
}

impl std::fmt::Display for WorldSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Duel => write!(f, "duel"),
            Self::Tiny => write!(f, "tiny"),
            Self::Small => write!(f, "small"),
            Self::Standard => write!(f, "standard"),
            Self::Large => write!(f, "large"),
            Self::Huge => write!(f, "huge"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub world_size: WorldSize,
    /// Explicit disc diameter, overriding the world size preset
    pub grid_size: Option<usize>,
    pub seed: Option<u64>,
    pub climate: ClimatePreset,
    /// Replaces the climate preset's values when present
    pub climate_overrides: Option<ClimateParams>,
    pub sea_level: SeaLevel,
    /// Share of the disc radius that is snow
    pub snow_radius: f64,
    /// Share of the disc radius that is tundra (includes the snow)
    pub tundra_radius: f64,
    /// Grain of the terrain latitude variation field
    pub terrain_grain: u32,
    /// Grain of the feature latitude variation field
    pub feature_grain: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            world_size: WorldSize::Standard,
            grid_size: None,
            seed: None,
            climate: ClimatePreset::Temperate,
            climate_overrides: None,
            sea_level: SeaLevel::Medium,
            snow_radius: 0.10,
            tundra_radius: 0.25,
            terrain_grain: 3,
            feature_grain: 4,
        }
    }
}

impl GeneratorConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: GeneratorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| GenerationError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&contents)?;
        log::info!("loaded generator config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let size = self.grid().width;
        if size < MIN_GRID_SIZE {
            return Err(GenerationError::InvalidConfig(format!(
                "grid size {} is below the minimum of {}",
                size, MIN_GRID_SIZE
            )));
        }
        if !(self.snow_radius > 0.0 && self.snow_radius < 1.0) {
            return Err(GenerationError::InvalidConfig(format!(
                "snow radius {} must lie strictly between 0 and 1",
                self.snow_radius
            )));
        }
        if !(self.tundra_radius > self.snow_radius && self.tundra_radius < 1.0) {
            return Err(GenerationError::InvalidConfig(format!(
                "tundra radius {} must lie between the snow radius {} and 1",
                self.tundra_radius, self.snow_radius
            )));
        }
        Ok(())
    }

    /// Square grid of the disc.
    pub fn grid(&self) -> GridInfo {
        let size = self.grid_size.unwrap_or_else(|| self.world_size.disc_diameter());
        GridInfo::new(size, size)
    }

    pub fn climate_params(&self) -> ClimateParams {
        self.climate_overrides.unwrap_or_else(|| self.climate.params())
    }

    pub fn landmass_settings(&self) -> LandmassSettings {
        LandmassSettings {
            grid: self.grid(),
            climate: self.climate_params(),
            sea_level_change: self.sea_level.change(),
            snow_radius: self.snow_radius,
        }
    }
}
