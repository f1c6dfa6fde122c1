//! Climate presets and the radial latitude model
//!
//! A disc has no equator: the coldest point is the center and the rim is the
//! warmest. "Latitude" here is the inverted distance from the center, so the
//! usual polar/tropical thresholds keep their meaning.

use serde::{Deserialize, Serialize};

use crate::landmass::GridInfo;
use crate::noise_field::NoiseField;

// =============================================================================
// CLIMATE CONFIGURATION
// =============================================================================

/// Climate preset chosen by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClimatePreset {
    #[default]
    Temperate,
    Tropical,
    Arid,
    Rocky,
    Cold,
}

impl ClimatePreset {
    pub fn all() -> &'static [Self] {
        &[Self::Temperate, Self::Tropical, Self::Arid, Self::Rocky, Self::Cold]
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Temperate => "Balanced hills, moderate ice",
            Self::Tropical => "Fewer deserts, little ice",
            Self::Arid => "Wide deserts",
            Self::Rocky => "Broad hill bands, many peaks",
            Self::Cold => "Extended ice near the hub",
        }
    }

    /// Parse from string (for CLI)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "temperate" | "default" => Some(Self::Temperate),
            "tropical" => Some(Self::Tropical),
            "arid" | "dry" => Some(Self::Arid),
            "rocky" => Some(Self::Rocky),
            "cold" => Some(Self::Cold),
            _ => None,
        }
    }

    pub fn params(&self) -> ClimateParams {
        match self {
            Self::Temperate => ClimateParams {
                hill_range: 5,
                peak_percent: 25,
                rand_ice_latitude: 0.9,
                desert_percent_change: 0,
            },
            Self::Tropical => ClimateParams {
                hill_range: 5,
                peak_percent: 25,
                rand_ice_latitude: 0.6,
                desert_percent_change: -10,
            },
            Self::Arid => ClimateParams {
                hill_range: 5,
                peak_percent: 25,
                rand_ice_latitude: 0.8,
                desert_percent_change: 20,
            },
            Self::Rocky => ClimateParams {
                hill_range: 7,
                peak_percent: 35,
                rand_ice_latitude: 0.9,
                desert_percent_change: 0,
            },
            Self::Cold => ClimateParams {
                hill_range: 5,
                peak_percent: 25,
                rand_ice_latitude: 1.1,
                desert_percent_change: -10,
            },
        }
    }
}

impl std::fmt::Display for ClimatePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Temperate => write!(f, "temperate"),
            Self::Tropical => write!(f, "tropical"),
            Self::Arid => write!(f, "arid"),
            Self::Rocky => write!(f, "rocky"),
            Self::Cold => write!(f, "cold"),
        }
    }
}

/// Climate values read by the plot and feature passes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClimateParams {
    /// Width in percentiles of each hill band around the 25th and 75th percentile
    pub hill_range: i32,
    /// Percentile of the peak field below which a hill becomes a peak
    pub peak_percent: i32,
    /// Controls how far ice reaches out from the hub
    pub rand_ice_latitude: f64,
    /// Added to the base desert percentile
    pub desert_percent_change: i32,
}

impl Default for ClimateParams {
    fn default() -> Self {
        ClimatePreset::Temperate.params()
    }
}

/// Sea level preset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeaLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl SeaLevel {
    pub fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High]
    }

    /// Parse from string (for CLI)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" | "normal" | "default" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Shift applied to the base water percentile.
    pub fn change(&self) -> i32 {
        match self {
            Self::Low => -8,
            Self::Medium => 0,
            Self::High => 6,
        }
    }
}

impl std::fmt::Display for SeaLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

// =============================================================================
// RADIAL LATITUDE
// =============================================================================

/// Source of the climate-driving latitude of a cell, 0.0 (warm) to 1.0 (cold).
pub trait LatitudeModel {
    fn latitude_at(&self, x: usize, y: usize) -> f64;
}

/// Chance of ice forming on a water cell at a given latitude.
pub trait IceRule {
    fn placement_probability(&self, latitude: f64) -> f64;
}

/// Distance from the grid center, normalized so the inscribed disc's rim is
/// at 1.0. The optional variation field nudges the result by about ±0.1.
pub fn distance_to_center_unscaled(grid: &GridInfo, x: usize, y: usize, variance: Option<&NoiseField>) -> f64 {
    let half_w = (grid.width as f64 - 1.0) / 2.0;
    let half_h = (grid.height as f64 - 1.0) / 2.0;
    let horizontal = (half_w - x as f64) / half_w;
    let vertical = (half_h - y as f64) / half_h;

    let mut distance = (horizontal * horizontal + vertical * vertical).sqrt();
    if let Some(field) = variance {
        distance += (128 - field.height(x, y)) as f64 / (255.0 * 5.0);
    }
    distance
}

/// Inverted distance: 1.0 at the center, 0.0 at and beyond the rim.
pub fn inverted_distance_to_center(grid: &GridInfo, x: usize, y: usize, variance: Option<&NoiseField>) -> f64 {
    1.0 - distance_to_center_unscaled(grid, x, y, variance).clamp(0.0, 1.0)
}

/// Whether the cell lies outside the playable disc. Never jittered.
pub fn is_outside_disc(grid: &GridInfo, x: usize, y: usize) -> bool {
    distance_to_center_unscaled(grid, x, y, None) > 1.0
}

/// Latitude that peaks at the disc center, optionally roughened by a
/// grid-sized variation field so the bands are not perfect circles.
#[derive(Clone, Debug)]
pub struct RadialLatitude {
    grid: GridInfo,
    variance: Option<NoiseField>,
}

impl RadialLatitude {
    pub fn new(grid: GridInfo, variance: Option<NoiseField>) -> Self {
        Self { grid, variance }
    }

    pub fn grid(&self) -> GridInfo {
        self.grid
    }
}

impl LatitudeModel for RadialLatitude {
    fn latitude_at(&self, x: usize, y: usize) -> f64 {
        inverted_distance_to_center(&self.grid, x, y, self.variance.as_ref())
    }
}

/// Ice rule for the disc: far less ice than a polar-band map, concentrated
/// around the hub.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiscIceRule {
    pub rand_ice_latitude: f64,
}

impl DiscIceRule {
    pub fn new(climate: &ClimateParams) -> Self {
        Self {
            rand_ice_latitude: climate.rand_ice_latitude,
        }
    }
}

impl IceRule for DiscIceRule {
    fn placement_probability(&self, latitude: f64) -> f64 {
        7.0 * (latitude - (1.0 - self.rand_ice_latitude / 2.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeds::MapRand;

    #[test]
    fn test_center_and_corners() {
        let grid = GridInfo::new(65, 65);

        assert_eq!(inverted_distance_to_center(&grid, 32, 32, None), 1.0);
        assert!(!is_outside_disc(&grid, 32, 32));
        assert!(is_outside_disc(&grid, 0, 0));
        assert!(is_outside_disc(&grid, 64, 64));
        assert_eq!(inverted_distance_to_center(&grid, 0, 0, None), 0.0);
        // Edge midpoints sit exactly on the rim.
        assert!(!is_outside_disc(&grid, 0, 32));
        assert_eq!(inverted_distance_to_center(&grid, 64, 32, None), 0.0);
    }

    #[test]
    fn test_latitude_decreases_outward() {
        let grid = GridInfo::new(64, 64);
        let model = RadialLatitude::new(grid, None);

        let mut previous = f64::MAX;
        for x in 32..64 {
            let lat = model.latitude_at(x, 31);
            assert!(lat <= previous + 1e-12);
            assert!((0.0..=1.0).contains(&lat));
            previous = lat;
        }
    }

    #[test]
    fn test_jitter_is_bounded() {
        let grid = GridInfo::new(48, 48);
        let mut rng = MapRand::new(13);
        let field = NoiseField::variation(48, 48, 3, &mut rng);
        let jittered = RadialLatitude::new(grid, Some(field));
        let plain = RadialLatitude::new(grid, None);

        for y in 0..48 {
            for x in 0..48 {
                let lat = jittered.latitude_at(x, y);
                assert!((0.0..=1.0).contains(&lat));
                assert!((lat - plain.latitude_at(x, y)).abs() <= 128.0 / 1275.0 + 1e-9);
            }
        }
    }

    #[test]
    fn test_ice_rule() {
        let rule = DiscIceRule::new(&ClimatePreset::Temperate.params());

        // Cut-off sits at 1 - 0.9 / 2 = 0.55.
        assert!(rule.placement_probability(0.5) < 0.0);
        assert!(rule.placement_probability(0.55).abs() < 1e-9);
        assert!((rule.placement_probability(0.6) - 0.35).abs() < 1e-9);
        assert!(rule.placement_probability(1.0) > 1.0);
    }

    #[test]
    fn test_preset_parsing() {
        for preset in ClimatePreset::all() {
            assert_eq!(ClimatePreset::from_str(&preset.to_string()), Some(*preset));
        }
        for level in SeaLevel::all() {
            assert_eq!(SeaLevel::from_str(&level.to_string()), Some(*level));
        }
        assert_eq!(SeaLevel::High.change(), 6);
        assert_eq!(ClimatePreset::from_str("swamp"), None);
    }
}
