//! Terrain classification driven by the radial latitude
//!
//! Snow and tundra ring the hub, deserts and plains are scattered by noise
//! through the warmer outer bands, and grassland fills the rest. Plot types
//! are only read here; terrain lives in its own grid.

use serde::{Deserialize, Serialize};

use crate::climate::{LatitudeModel, RadialLatitude};
use crate::config::GeneratorConfig;
use crate::landmass::{GridInfo, WorldGrid};
use crate::noise_field::NoiseField;
use crate::seeds::MapRand;
use crate::tilemap::Tilemap;

const DESERT_GRAIN: u32 = 4;
const PLAINS_GRAIN: u32 = 4;

const BASE_DESERT_PERCENT: i32 = 32;
const BASE_PLAINS_PERCENT: i32 = 18;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TerrainType {
    #[default]
    Ocean,
    Coast,
    Snow,
    Tundra,
    Grassland,
    Plains,
    Desert,
}

impl TerrainType {
    pub fn is_water(&self) -> bool {
        matches!(self, TerrainType::Ocean | TerrainType::Coast)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TerrainType::Ocean => "Ocean",
            TerrainType::Coast => "Coast",
            TerrainType::Snow => "Snow",
            TerrainType::Tundra => "Tundra",
            TerrainType::Grassland => "Grassland",
            TerrainType::Plains => "Plains",
            TerrainType::Desert => "Desert",
        }
    }

    pub fn all() -> &'static [TerrainType] {
        &[
            TerrainType::Ocean,
            TerrainType::Coast,
            TerrainType::Snow,
            TerrainType::Tundra,
            TerrainType::Grassland,
            TerrainType::Plains,
            TerrainType::Desert,
        ]
    }
}

/// Thresholds for terrain classification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainSettings {
    /// Latitude at or above which land is snow
    pub snow_latitude: f64,
    /// Latitude at or above which land is tundra
    pub tundra_latitude: f64,
    /// Share of the desert field, in percent, eligible for desert
    pub desert_percent: i32,
    /// Share of the plains field, in percent, eligible for plains
    pub plains_percent: i32,
    pub desert_bottom_latitude: f64,
    pub desert_top_latitude: f64,
    /// Grain of the latitude variation field
    pub variation_grain: u32,
}

impl TerrainSettings {
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            snow_latitude: 1.0 - config.snow_radius,
            tundra_latitude: 1.0 - config.tundra_radius,
            desert_percent: (BASE_DESERT_PERCENT + config.climate_params().desert_percent_change).clamp(0, 100),
            plains_percent: BASE_PLAINS_PERCENT,
            desert_bottom_latitude: 0.2,
            desert_top_latitude: 0.5,
            variation_grain: config.terrain_grain,
        }
    }
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self::from_config(&GeneratorConfig::default())
    }
}

/// Build the jittered radial latitude model and classify terrain with it.
pub fn generate_terrain(plots: &WorldGrid, settings: &TerrainSettings, rng: &mut MapRand) -> Tilemap<TerrainType> {
    let grid = GridInfo::new(plots.width, plots.height);
    let variation = NoiseField::variation(grid.width, grid.height, settings.variation_grain, rng);
    let latitude = RadialLatitude::new(grid, Some(variation));
    classify_terrain(plots, &latitude, settings, rng)
}

/// Classify every cell using any latitude model.
pub fn classify_terrain<L: LatitudeModel>(
    plots: &WorldGrid,
    latitude: &L,
    settings: &TerrainSettings,
    rng: &mut MapRand,
) -> Tilemap<TerrainType> {
    let (width, height) = (plots.width, plots.height);
    let desert = NoiseField::variation(width, height, DESERT_GRAIN, rng);
    let plains = NoiseField::variation(width, height, PLAINS_GRAIN, rng);

    let desert_bottom = desert.threshold_for_percentile((100 - settings.desert_percent).max(0));
    let plains_bottom = plains.threshold_for_percentile((100 - settings.desert_percent - settings.plains_percent).max(0));

    let mut terrain = Tilemap::new_with(width, height, TerrainType::Ocean);
    for (x, y, cell) in terrain.iter_mut() {
        if plots.get(x, y).is_water() {
            let near_land = plots.neighbors_8(x, y).into_iter().any(|(nx, ny)| !plots.get(nx, ny).is_water());
            *cell = if near_land { TerrainType::Coast } else { TerrainType::Ocean };
            continue;
        }

        let lat = latitude.latitude_at(x, y);
        *cell = if lat >= settings.snow_latitude {
            TerrainType::Snow
        } else if lat >= settings.tundra_latitude {
            TerrainType::Tundra
        } else if settings.desert_percent > 0
            && desert.height(x, y) > desert_bottom
            && lat >= settings.desert_bottom_latitude
            && lat < settings.desert_top_latitude
        {
            TerrainType::Desert
        } else if plains.height(x, y) > plains_bottom {
            TerrainType::Plains
        } else {
            TerrainType::Grassland
        };
    }

    log::debug!(
        "terrain: {} snow, {} tundra, {} desert, {} plains, {} grassland",
        terrain.count_where(|t| *t == TerrainType::Snow),
        terrain.count_where(|t| *t == TerrainType::Tundra),
        terrain.count_where(|t| *t == TerrainType::Desert),
        terrain.count_where(|t| *t == TerrainType::Plains),
        terrain.count_where(|t| *t == TerrainType::Grassland)
    );

    terrain
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmass::PlotType;

    /// Latitude that ignores position entirely.
    struct Flat(f64);

    impl LatitudeModel for Flat {
        fn latitude_at(&self, _x: usize, _y: usize) -> f64 {
            self.0
        }
    }

    fn all_land(size: usize) -> WorldGrid {
        WorldGrid::new_with(size, size, PlotType::Land)
    }

    #[test]
    fn test_cold_latitudes() {
        let settings = TerrainSettings::default();
        let plots = all_land(12);

        let snow = classify_terrain(&plots, &Flat(0.95), &settings, &mut MapRand::new(1));
        assert_eq!(snow.count_where(|t| *t == TerrainType::Snow), 144);

        let tundra = classify_terrain(&plots, &Flat(0.8), &settings, &mut MapRand::new(1));
        assert_eq!(tundra.count_where(|t| *t == TerrainType::Tundra), 144);
    }

    #[test]
    fn test_desert_only_in_its_band() {
        let settings = TerrainSettings::default();
        let plots = all_land(30);

        let cool = classify_terrain(&plots, &Flat(0.6), &settings, &mut MapRand::new(3));
        assert_eq!(cool.count_where(|t| *t == TerrainType::Desert), 0);

        let warm = classify_terrain(&plots, &Flat(0.3), &settings, &mut MapRand::new(3));
        let deserts = warm.count_where(|t| *t == TerrainType::Desert);
        assert!(deserts > 0 && deserts < 900 / 2, "{} desert cells", deserts);
        assert!(warm.count_where(|t| *t == TerrainType::Plains) > 0);
        assert!(warm.count_where(|t| *t == TerrainType::Grassland) > 0);
    }

    #[test]
    fn test_coast_rings_land() {
        let settings = TerrainSettings::default();
        let mut plots = WorldGrid::new_with(9, 9, PlotType::Ocean);
        plots.set(4, 4, PlotType::Hills);

        let terrain = classify_terrain(&plots, &Flat(0.0), &settings, &mut MapRand::new(5));

        assert_eq!(terrain.count_where(|t| *t == TerrainType::Coast), 8);
        assert_eq!(*terrain.get(0, 0), TerrainType::Ocean);
        assert!(!terrain.get(4, 4).is_water());
    }

    #[test]
    fn test_radial_bands_on_a_disc() {
        let plots = all_land(64);
        let settings = TerrainSettings::default();
        let terrain = generate_terrain(&plots, &settings, &mut MapRand::new(17));

        // The jitter is about 0.1, so the center is always frozen and the rim
        // is always too warm for ice or desert.
        assert!(matches!(*terrain.get(32, 32), TerrainType::Snow | TerrainType::Tundra));
        assert!(matches!(*terrain.get(0, 32), TerrainType::Plains | TerrainType::Grassland));
    }
}
