//! World data container module
//!
//! Bundles every generated layer of a disc into a single struct, and runs the
//! full pipeline that produces it.

use crate::climate::{inverted_distance_to_center, is_outside_disc, DiscIceRule};
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::features::{self, FeatureReport, FeatureType};
use crate::landmass::{self, GenerationSession, GridInfo, IrregularRegion, PlotStats, PlotType, WorldGrid};
use crate::seeds::MapRand;
use crate::terrain::{self, TerrainSettings, TerrainType};
use crate::tilemap::Tilemap;

/// All generated world data bundled together
pub struct WorldData {
    /// Seed of the random stream (replays the same world)
    pub seed: u64,
    /// Configuration the world was generated from
    pub config: GeneratorConfig,
    pub grid: GridInfo,
    /// Plot types: ocean, land, hills or peak
    pub plots: WorldGrid,
    /// Terrain classification
    pub terrain: Tilemap<TerrainType>,
    /// Features layered over the terrain
    pub features: Tilemap<FeatureType>,
    /// Regions where players may start, in creation order
    pub start_regions: Vec<IrregularRegion>,
    pub feature_report: FeatureReport,
}

impl WorldData {
    pub fn width(&self) -> usize {
        self.grid.width
    }

    pub fn height(&self) -> usize {
        self.grid.height
    }

    pub fn plot_stats(&self) -> PlotStats {
        PlotStats::of(&self.plots)
    }

    /// Whether a player may start on the cell.
    pub fn is_start_eligible(&self, x: usize, y: usize) -> bool {
        landmass::is_start_eligible(&self.start_regions, x as f64, y as f64)
    }

    /// Get tile info at coordinates
    pub fn get_tile_info(&self, x: usize, y: usize) -> TileInfo {
        TileInfo {
            x,
            y,
            plot: *self.plots.get(x, y),
            terrain: *self.terrain.get(x, y),
            feature: *self.features.get(x, y),
            latitude: inverted_distance_to_center(&self.grid, x, y, None),
            outside_disc: is_outside_disc(&self.grid, x, y),
            start_region: self
                .start_regions
                .iter()
                .find(|region| region.is_inside(x as f64, y as f64))
                .map(|region| region.name().to_string()),
        }
    }
}

/// Information about a single tile
#[derive(Clone, Debug)]
pub struct TileInfo {
    pub x: usize,
    pub y: usize,
    pub plot: PlotType,
    pub terrain: TerrainType,
    pub feature: FeatureType,
    /// Unjittered latitude, 1.0 at the hub
    pub latitude: f64,
    pub outside_disc: bool,
    /// Name of the first start region containing the tile
    pub start_region: Option<String>,
}

impl TileInfo {
    pub fn latitude_str(&self) -> String {
        let desc = if self.outside_disc {
            "beyond the rim"
        } else if self.latitude > 0.75 {
            "hub"
        } else if self.latitude > 0.4 {
            "middle"
        } else {
            "rim"
        };
        format!("{:.2} ({})", self.latitude, desc)
    }
}

/// Generate a complete disc from a configuration.
///
/// Landmass, terrain and features run in that order on one random stream, so
/// the configuration and seed fully determine the result.
pub fn generate_world(config: &GeneratorConfig) -> Result<WorldData> {
    config.validate()?;
    let mut rng = match config.seed {
        Some(seed) => MapRand::new(seed),
        None => MapRand::from_entropy(),
    };
    let grid = config.grid();
    log::info!("seed {}, {} world, {}x{} disc", rng.seed(), config.world_size, grid.width, grid.height);

    let (plots, start_regions) = GenerationSession::new(config.landmass_settings(), &mut rng).generate()?;
    log::info!("landmass done after {} draws", rng.draws());

    let terrain = terrain::generate_terrain(&plots, &TerrainSettings::from_config(config), &mut rng);
    log::info!("terrain done after {} draws", rng.draws());

    let ice_rule = DiscIceRule::new(&config.climate_params());
    let (features, feature_report) = features::add_features(&plots, &ice_rule, config.feature_grain, &mut rng);

    Ok(WorldData {
        seed: rng.seed(),
        config: config.clone(),
        grid,
        plots,
        terrain,
        features,
        start_regions,
        feature_report,
    })
}
