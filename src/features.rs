//! Feature placement: ice around the disc's rim and on the cold hub waters

use serde::{Deserialize, Serialize};

use crate::climate::{is_outside_disc, DiscIceRule, IceRule, LatitudeModel, RadialLatitude};
use crate::landmass::{GridInfo, WorldGrid};
use crate::noise_field::NoiseField;
use crate::seeds::MapRand;
use crate::tilemap::Tilemap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FeatureType {
    #[default]
    None,
    Ice,
}

/// Cells of each feature placed by one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeatureReport {
    pub border_ice: usize,
    pub latitude_ice: usize,
}

/// Ice every cell beyond the rim of the disc. Draws nothing.
pub fn add_border_ice(features: &mut Tilemap<FeatureType>, grid: &GridInfo) -> usize {
    let mut placed = 0;
    for (x, y, feature) in features.iter_mut() {
        if is_outside_disc(grid, x, y) {
            *feature = FeatureType::Ice;
            placed += 1;
        }
    }
    placed
}

/// Roll for ice on every water cell inside the disc.
///
/// One draw per candidate cell, in row-major order. Land is never iced.
pub fn add_latitude_ice<L: LatitudeModel, R: IceRule>(
    features: &mut Tilemap<FeatureType>,
    plots: &WorldGrid,
    grid: &GridInfo,
    latitude: &L,
    rule: &R,
    rng: &mut MapRand,
) -> usize {
    let mut placed = 0;
    for (x, y, feature) in features.iter_mut() {
        if !plots.get(x, y).is_water() || is_outside_disc(grid, x, y) {
            continue;
        }
        let roll = rng.get(100, "ice placement") as f64 / 100.0;
        if roll < rule.placement_probability(latitude.latitude_at(x, y)) {
            *feature = FeatureType::Ice;
            placed += 1;
        }
    }
    placed
}

/// Place every feature on a finished plot grid. The plot grid is only read.
pub fn add_features(
    plots: &WorldGrid,
    ice_rule: &DiscIceRule,
    variation_grain: u32,
    rng: &mut MapRand,
) -> (Tilemap<FeatureType>, FeatureReport) {
    let grid = GridInfo::new(plots.width, plots.height);
    let mut features = Tilemap::new_with(grid.width, grid.height, FeatureType::None);

    let border_ice = add_border_ice(&mut features, &grid);

    let variation = NoiseField::variation(grid.width, grid.height, variation_grain, rng);
    let latitude = RadialLatitude::new(grid, Some(variation));
    let latitude_ice = add_latitude_ice(&mut features, plots, &grid, &latitude, ice_rule, rng);

    let report = FeatureReport { border_ice, latitude_ice };
    log::info!("features: {} border ice, {} latitude ice", report.border_ice, report.latitude_ice);
    (features, report)
}
