//! Irregular regions: rotated, jittered and noise-distorted polygon masks

use rayon::prelude::*;

use crate::error::{GenerationError, Result};
use crate::noise_field::NoiseField;
use crate::seeds::MapRand;
use crate::tilemap::Tilemap;

use super::geometry::{point_in_polygon, BoundingBox, GridInfo, Point, RegionFrame};

/// Headroom around the polygon for the boundary distortion.
pub const BOUNDARY_MARGIN: f64 = 4.0;

/// Grain of the two boundary displacement fields.
const DISPLACEMENT_GRAIN: u32 = 2;

/// A landmass outline of any polygonal shape, rotated about the grid center,
/// jittered vertex by vertex and distorted along its edge by two noise
/// fields. Membership is computed once for the whole bounding box, so
/// queries are a single mask lookup.
#[derive(Clone, Debug)]
pub struct IrregularRegion {
    name: String,
    vertices: Vec<Point>,
    bounds: BoundingBox,
    frame: RegionFrame,
    mask: Tilemap<bool>,
}

impl IrregularRegion {
    /// Build a region with the standard vertex jitter for this grid.
    pub fn new(name: &str, outline: &[Point], angle: f64, grid: &GridInfo, rng: &mut MapRand) -> Result<Self> {
        Self::with_jitter(name, outline, angle, grid, Self::default_jitter(grid), rng)
    }

    /// Half-width of the per-coordinate vertex jitter: `max(2, width / 12)`.
    pub fn default_jitter(grid: &GridInfo) -> u32 {
        (grid.width as u32 / 12).max(2)
    }

    /// Build a region whose rotated vertices are each displaced by an integer
    /// drawn from `[-jitter, +jitter]` on both axes. A zero jitter draws nothing.
    pub fn with_jitter(
        name: &str,
        outline: &[Point],
        angle: f64,
        grid: &GridInfo,
        jitter: u32,
        rng: &mut MapRand,
    ) -> Result<Self> {
        if outline.len() < 3 {
            return Err(GenerationError::MalformedPolygon {
                region: name.to_string(),
                vertices: outline.len(),
            });
        }

        let pivot = grid.center();
        let vertices: Vec<Point> = outline
            .iter()
            .map(|p| {
                let rotated = p.rotated_about(pivot, angle);
                let dx = random_displacement(jitter, rng);
                let dy = random_displacement(jitter, rng);
                Point::new(rotated.x + dx, rotated.y + dy)
            })
            .collect();

        let bounds = match BoundingBox::around(&vertices) {
            Some(tight) => tight.padded(BOUNDARY_MARGIN),
            None => {
                return Err(GenerationError::MalformedPolygon {
                    region: name.to_string(),
                    vertices: 0,
                })
            }
        };
        let frame = RegionFrame::covering(&bounds);

        let horizontal = NoiseField::variation(frame.width, frame.height, DISPLACEMENT_GRAIN, rng);
        let vertical = NoiseField::variation(frame.width, frame.height, DISPLACEMENT_GRAIN, rng);

        let mask_data: Vec<bool> = (0..frame.area())
            .into_par_iter()
            .map(|idx| {
                let lx = idx % frame.width;
                let ly = idx / frame.width;
                let (wx, wy) = frame.local_to_world(lx, ly);
                let px = wx as f64 + edge_displacement(horizontal.height(lx, ly));
                let py = wy as f64 + edge_displacement(vertical.height(lx, ly));
                point_in_polygon(px, py, &vertices)
            })
            .collect();
        let mask = Tilemap::from_vec(frame.width, frame.height, mask_data);

        log::debug!(
            "region '{}': {} vertices, frame {}x{} at ({}, {}), {} cells inside",
            name,
            vertices.len(),
            frame.width,
            frame.height,
            frame.origin_x,
            frame.origin_y,
            mask.count_where(|inside| *inside)
        );

        Ok(Self {
            name: name.to_string(),
            vertices,
            bounds,
            frame,
            mask,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rotated and jittered outline.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Bounding box of the outline, padded by [`BOUNDARY_MARGIN`].
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    /// Cell frame covering the padded bounding box.
    pub fn frame(&self) -> RegionFrame {
        self.frame
    }

    pub fn mask(&self) -> &Tilemap<bool> {
        &self.mask
    }

    /// Whether the point lies inside the distorted outline. Points outside
    /// the padded bounding box are never inside.
    pub fn is_inside(&self, x: f64, y: f64) -> bool {
        // The frame snaps outward to whole cells, so its last row and column
        // reach past the padded box.
        if !self.bounds.contains(Point::new(x, y)) {
            return false;
        }
        match self.frame.local_of_point(x, y) {
            Some((lx, ly)) => *self.mask.get(lx, ly),
            None => false,
        }
    }

    /// Membership by local cell index of the region's frame.
    pub fn is_inside_local(&self, lx: usize, ly: usize) -> bool {
        lx < self.frame.width && ly < self.frame.height && *self.mask.get(lx, ly)
    }
}

fn random_displacement(jitter: u32, rng: &mut MapRand) -> f64 {
    if jitter == 0 {
        return 0.0;
    }
    jitter as f64 - rng.get(2 * jitter + 1, "region vertex displacement") as f64
}

/// Map a 0-255 sample onto an edge displacement in [-4, +4].
fn edge_displacement(sample: i32) -> f64 {
    sample as f64 / 32.0 - 4.0
}
