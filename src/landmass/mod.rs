//! Landmass generation: irregular regions stamped onto one disc-shaped world grid

pub mod compositor;
pub mod geometry;
pub mod region;
pub mod stamper;
pub mod types;

pub use compositor::{generate_world_grid, GenerationSession, LandmassSettings, BASE_WATER_PERCENT};
pub use geometry::{point_in_polygon, BoundingBox, GridInfo, Point, RegionFrame};
pub use region::{IrregularRegion, BOUNDARY_MARGIN};
pub use stamper::{classify_area, merge_into, stamp, StampArea, StampParams, StampReport};
pub use types::{PlotStats, PlotType, WorldGrid};

/// Whether a player may start at the point: true inside any start-eligible region.
pub fn is_start_eligible(regions: &[IrregularRegion], x: f64, y: f64) -> bool {
    regions.iter().any(|region| region.is_inside(x, y))
}
