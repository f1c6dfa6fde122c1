//! The landmass pass sequence: hub, continents, islands, filler and disc boundary

use std::f64::consts::PI;

use crate::climate::{is_outside_disc, ClimateParams};
use crate::error::Result;
use crate::seeds::MapRand;

use super::geometry::{GridInfo, Point, RegionFrame};
use super::region::IrregularRegion;
use super::stamper::{stamp, StampArea, StampParams};
use super::types::{PlotType, WorldGrid};

/// Water percentile every sea-level-relative pass starts from.
pub const BASE_WATER_PERCENT: i32 = 70;

const HUB_GRAIN: u32 = 3;
const HUB_HILLS_GRAIN: u32 = 1;
const HUB_HALO_SCALE: f64 = 1.8;
const HUB_HALO_WATER_OFFSET: i32 = 10;

const MAIN_GRAIN: u32 = 2;
const MAIN_HILLS_GRAIN: u32 = 4;
const MAIN_WATER_OFFSET: i32 = -15;

const COUNTERWEIGHT_GRAIN: u32 = 2;
const COUNTERWEIGHT_HILLS_GRAIN: u32 = 3;
const COUNTERWEIGHT_WATER_OFFSET: i32 = -20;

const ISLANDS_GRAIN: u32 = 4;
const ISLANDS_HILLS_GRAIN: u32 = 3;
const ISLANDS_WATER_PERCENT: i32 = 90;

const FILLER_GRAIN: u32 = 2;
const FILLER_HILLS_GRAIN: u32 = 3;

/// Inputs of a landmass run that come from the host configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LandmassSettings {
    pub grid: GridInfo,
    pub climate: ClimateParams,
    /// Sea level shift applied to [`BASE_WATER_PERCENT`]
    pub sea_level_change: i32,
    /// Share of the disc radius covered by the snowy hub
    pub snow_radius: f64,
}

impl LandmassSettings {
    pub fn base_sea_level(&self) -> i32 {
        BASE_WATER_PERCENT + self.sea_level_change
    }
}

/// State of one landmass generation run: the world grid, the random stream
/// and the regions where players may start. Lives for exactly one run.
pub struct GenerationSession<'r> {
    settings: LandmassSettings,
    rng: &'r mut MapRand,
    grid: WorldGrid,
    start_regions: Vec<IrregularRegion>,
}

impl<'r> GenerationSession<'r> {
    pub fn new(settings: LandmassSettings, rng: &'r mut MapRand) -> Self {
        let grid = WorldGrid::new_with(settings.grid.width, settings.grid.height, PlotType::Ocean);
        Self {
            settings,
            rng,
            grid,
            start_regions: Vec::new(),
        }
    }

    pub fn grid(&self) -> &WorldGrid {
        &self.grid
    }

    pub fn start_regions(&self) -> &[IrregularRegion] {
        &self.start_regions
    }

    /// Run every pass in order and return the finished grid with the
    /// start-eligible regions. The first failing pass aborts the run.
    pub fn generate(mut self) -> Result<(WorldGrid, Vec<IrregularRegion>)> {
        let base = self.settings.base_sea_level();
        log::info!(
            "generating {}x{} disc, base sea level {}",
            self.settings.grid.width,
            self.settings.grid.height,
            base
        );

        self.stamp_central_hub(base);
        let main_angle = self.stamp_main_continent(base)?;
        self.stamp_counterweight_continent(base, main_angle)?;
        let islands_angle = self.stamp_islands(main_angle)?;
        self.stamp_filler(base, islands_angle)?;
        let drowned = self.apply_disc_boundary();
        log::info!("disc boundary drowned {} cells", drowned);

        Ok((self.grid, self.start_regions))
    }

    /// A small land core that always covers the exact center, wrapped in a
    /// larger, sparser and hillier halo.
    pub fn stamp_central_hub(&mut self, base: i32) {
        let grid = self.settings.grid;
        let snow = self.settings.snow_radius;

        let core_w = ((grid.width as f64 * snow).round() as usize).max(1);
        let core_h = ((grid.height as f64 * snow).round() as usize).max(1);
        let core = centered_rect(&grid, core_w, core_h);
        log::info!("pass: hub core {}x{}", core_w, core_h);
        self.stamp_area(StampArea::Rect(core), 0, HUB_GRAIN, HUB_HILLS_GRAIN);

        let halo_w = ((grid.width as f64 * snow * HUB_HALO_SCALE) as usize).max(1);
        let halo_h = ((grid.height as f64 * snow * HUB_HALO_SCALE) as usize).max(1);
        let halo = centered_rect(&grid, halo_w, halo_h);
        log::info!("pass: hub halo {}x{}", halo_w, halo_h);
        self.stamp_area(StampArea::Rect(halo), base + HUB_HALO_WATER_OFFSET, HUB_GRAIN, HUB_HILLS_GRAIN);
    }

    /// The largest landmass: straddles the hub and reaches out in a random
    /// direction. Returns that direction in radians.
    pub fn stamp_main_continent(&mut self, base: i32) -> Result<f64> {
        let main_angle = (self.rng.get(360, "main continent angle") as f64).to_radians();
        log::info!("pass: main continent at {:.0} degrees", main_angle.to_degrees());

        let outline = main_continent_outline(&self.settings.grid, self.settings.snow_radius);
        let region = self.stamp_outline(
            "Main Continent",
            &outline,
            main_angle,
            base + MAIN_WATER_OFFSET,
            MAIN_GRAIN,
            MAIN_HILLS_GRAIN,
        )?;
        self.start_regions.push(region);

        Ok(main_angle)
    }

    /// A smaller continent roughly opposite the main one.
    pub fn stamp_counterweight_continent(&mut self, base: i32, main_angle: f64) -> Result<()> {
        let jitter = self.rng.get(40, "counterweight angle jitter") as f64 - 20.0;
        let angle = main_angle + PI + jitter.to_radians();
        let wide_left = self.rng.get(2, "counterweight lobe side") == 0;
        log::info!("pass: counterweight continent at {:.0} degrees", angle.to_degrees());

        let outline = counterweight_outline(&self.settings.grid, wide_left);
        let region = self.stamp_outline(
            "Counterweight Continent",
            &outline,
            angle,
            base + COUNTERWEIGHT_WATER_OFFSET,
            COUNTERWEIGHT_GRAIN,
            COUNTERWEIGHT_HILLS_GRAIN,
        )?;
        self.start_regions.push(region);

        Ok(())
    }

    /// Scattered islands to one side of the main continent. Returns their
    /// direction in radians.
    pub fn stamp_islands(&mut self, main_angle: f64) -> Result<f64> {
        let quarter = PI / 2.0;
        let islands_angle = if self.rng.get(2, "islands side") == 0 {
            main_angle + quarter
        } else {
            main_angle - quarter
        };
        log::info!("pass: islands at {:.0} degrees", islands_angle.to_degrees());

        let outline = islands_outline(&self.settings.grid);
        self.stamp_outline(
            "Islands",
            &outline,
            islands_angle,
            ISLANDS_WATER_PERCENT,
            ISLANDS_GRAIN,
            ISLANDS_HILLS_GRAIN,
        )?;

        Ok(islands_angle)
    }

    /// Fills the arc of the disc opposite the islands.
    pub fn stamp_filler(&mut self, base: i32, islands_angle: f64) -> Result<()> {
        let jitter = self.rng.get(20, "filler angle jitter") as f64 - 10.0;
        let angle = islands_angle + PI + jitter.to_radians();
        log::info!("pass: filler landmass at {:.0} degrees", angle.to_degrees());

        let outline = filler_outline(&self.settings.grid);
        self.stamp_outline("Filler Landmass", &outline, angle, base, FILLER_GRAIN, FILLER_HILLS_GRAIN)?;

        Ok(())
    }

    /// Force every cell outside the disc to water. Returns how many cells changed.
    pub fn apply_disc_boundary(&mut self) -> usize {
        let grid = self.settings.grid;
        let mut drowned = 0;
        for (x, y, plot) in self.grid.iter_mut() {
            if is_outside_disc(&grid, x, y) {
                if !plot.is_water() {
                    drowned += 1;
                }
                *plot = PlotType::Ocean;
            }
        }
        drowned
    }

    /// Build a region from an outline and stamp it. A malformed outline fails
    /// before any draw is taken or any cell is written.
    fn stamp_outline(
        &mut self,
        name: &str,
        outline: &[Point],
        angle: f64,
        water_percent: i32,
        grain: u32,
        hills_grain: u32,
    ) -> Result<IrregularRegion> {
        let region = IrregularRegion::new(name, outline, angle, &self.settings.grid, self.rng)?;
        self.stamp_area(StampArea::Region(&region), water_percent, grain, hills_grain);
        Ok(region)
    }

    fn stamp_area(&mut self, area: StampArea, water_percent: i32, grain: u32, hills_grain: u32) {
        let params = StampParams {
            water_percent,
            grain,
            hills_grain,
        };
        stamp(&mut self.grid, &area, &params, &self.settings.climate, self.rng);
    }
}

/// Run the full landmass pass sequence once.
pub fn generate_world_grid(settings: LandmassSettings, rng: &mut MapRand) -> Result<WorldGrid> {
    GenerationSession::new(settings, rng).generate().map(|(grid, _)| grid)
}

fn centered_rect(grid: &GridInfo, width: usize, height: usize) -> RegionFrame {
    let west = (grid.width as f64 / 2.0 - (width / 2) as f64) as i64;
    let south = (grid.height as f64 / 2.0 - (height / 2) as f64) as i64;
    RegionFrame::new(west, south, width, height)
}

/// Hexagon whose short side runs through the hub and whose far sides reach
/// toward the rim.
fn main_continent_outline(grid: &GridInfo, snow_radius: f64) -> Vec<Point> {
    let mid_x = grid.width as f64 / 2.0;
    let mid_y = grid.height as f64 / 2.0;
    let hub = grid.width as f64 * snow_radius * 1.2;

    vec![
        Point::new(mid_x - hub, mid_y),
        Point::new(mid_x + hub, mid_y),
        Point::new(mid_x + mid_x / 1.67, mid_y - mid_y / 3.0),
        Point::new(mid_x + mid_x / 2.25, mid_y - mid_y / 1.25),
        Point::new(mid_x - mid_x / 2.25, mid_y - mid_y / 1.25),
        Point::new(mid_x - mid_x / 1.67, mid_y - mid_y / 3.0),
    ]
}

/// A broad off-center lobe near the rim plus a narrow peninsula pointing at
/// the hub.
fn counterweight_outline(grid: &GridInfo, wide_left: bool) -> Vec<Point> {
    let w = grid.width as f64;
    let h = grid.height as f64;
    let mid_x = w / 2.0;

    let (left, right) = if wide_left { (w / 7.0, w / 10.0) } else { (w / 10.0, w / 7.0) };
    let peninsula = (w / 15.0).max(4.0);
    let lowest = h / 8.0;
    let biggest = h / 3.5;
    let peninsula_height = h / 3.0;

    vec![
        Point::new(mid_x - left, biggest),
        Point::new(mid_x - left, lowest),
        Point::new(mid_x + right, lowest),
        Point::new(mid_x + right, biggest),
        Point::new(mid_x + peninsula, biggest),
        Point::new(mid_x + peninsula, peninsula_height),
        Point::new(mid_x - peninsula, peninsula_height),
        Point::new(mid_x - peninsula, biggest),
    ]
}

/// Trapezoid from the rim narrowing toward the hub.
fn islands_outline(grid: &GridInfo) -> Vec<Point> {
    let w = grid.width as f64;
    let mid_x = w / 2.0;
    let mid_y = grid.height as f64 / 2.0;

    vec![
        Point::new(w / 6.0, 0.0),
        Point::new(mid_x - mid_x / 5.0, mid_y - mid_y / 5.0),
        Point::new(mid_x + mid_x / 5.0, mid_y - mid_y / 5.0),
        Point::new(w - w / 6.0, 0.0),
    ]
}

/// Narrow band along the rim.
fn filler_outline(grid: &GridInfo) -> Vec<Point> {
    let w = grid.width as f64;
    let h = grid.height as f64;
    let mid_x = w / 2.0;

    vec![
        Point::new(mid_x - w / 8.0, 0.0),
        Point::new(mid_x + w / 8.5, 0.0),
        Point::new(mid_x + w / 8.5, h / 6.0),
        Point::new(mid_x - w / 8.0, h / 6.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::climate::inverted_distance_to_center;
    use crate::error::GenerationError;
    use crate::landmass::types::PlotStats;

    fn settings(size: usize) -> LandmassSettings {
        LandmassSettings {
            grid: GridInfo::new(size, size),
            climate: ClimateParams::default(),
            sea_level_change: 0,
            snow_radius: 0.10,
        }
    }

    #[test]
    fn test_hub_core_is_solid_land() {
        let mut rng = MapRand::new(2024);
        let mut session = GenerationSession::new(settings(64), &mut rng);
        session.stamp_central_hub(BASE_WATER_PERCENT);

        // 6x6 core centered on (32, 32).
        for y in 29..35 {
            for x in 29..35 {
                assert!(!session.grid().get(x, y).is_water(), "({}, {}) is water", x, y);
            }
        }
    }

    #[test]
    fn test_disc_boundary_and_center() {
        for seed in [1u64, 7, 99, 31337] {
            let mut rng = MapRand::new(seed);
            let (grid, regions) = GenerationSession::new(settings(64), &mut rng).generate().unwrap();
            let info = GridInfo::new(64, 64);

            for (x, y, plot) in grid.iter() {
                if is_outside_disc(&info, x, y) {
                    assert!(plot.is_water(), "({}, {}) outside the disc is {}", x, y, plot);
                }
            }
            assert!(!grid.get(32, 32).is_water());
            assert_eq!(regions.len(), 2);
            assert_eq!(regions[0].name(), "Main Continent");
            assert_eq!(regions[1].name(), "Counterweight Continent");
        }
    }

    #[test]
    fn test_same_seed_same_world() {
        let mut a = MapRand::new(555);
        let mut b = MapRand::new(555);

        let first = generate_world_grid(settings(72), &mut a).unwrap();
        let second = generate_world_grid(settings(72), &mut b).unwrap();

        assert_eq!(first, second);
        assert_eq!(a.draws(), b.draws());
    }

    #[test]
    fn test_different_seeds_differ() {
        let first = generate_world_grid(settings(64), &mut MapRand::new(1)).unwrap();
        let second = generate_world_grid(settings(64), &mut MapRand::new(2)).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_world_has_land_and_sea() {
        let mut rng = MapRand::new(8);
        let grid = generate_world_grid(settings(80), &mut rng).unwrap();
        let stats = PlotStats::of(&grid);

        assert!(stats.non_water() > 0);
        assert!(stats.ocean > 0);
        // The disc covers about pi/4 of the square.
        assert!(stats.land_fraction() < 0.8);
    }

    #[test]
    fn test_disc_boundary_only_drowns() {
        let mut rng = MapRand::new(4);
        let mut session = GenerationSession::new(settings(40), &mut rng);
        session.stamp_central_hub(BASE_WATER_PERCENT);
        session.stamp_main_continent(BASE_WATER_PERCENT).unwrap();
        let before = session.grid().clone();

        session.apply_disc_boundary();

        let info = GridInfo::new(40, 40);
        for (x, y, plot) in session.grid().iter() {
            let old = before.get(x, y);
            if is_outside_disc(&info, x, y) {
                assert_eq!(*plot, PlotType::Ocean);
            } else {
                assert_eq!(plot, old);
            }
        }
    }

    #[test]
    fn test_malformed_outline_stamps_nothing() {
        let mut rng = MapRand::new(17);
        let mut session = GenerationSession::new(settings(48), &mut rng);
        session.stamp_central_hub(BASE_WATER_PERCENT);
        let before = session.grid().clone();
        let draws_before = session.rng.draws();

        let outline = main_continent_outline(&GridInfo::new(48, 48), 0.1);
        let err = session
            .stamp_outline("Broken", &outline[..2], 0.5, BASE_WATER_PERCENT, MAIN_GRAIN, MAIN_HILLS_GRAIN)
            .unwrap_err();

        assert!(matches!(err, GenerationError::MalformedPolygon { vertices: 2, .. }));
        assert_eq!(session.grid(), &before);
        assert!(session.start_regions().is_empty());
        assert_eq!(session.rng.draws(), draws_before);
    }

    #[test]
    fn test_start_regions_cover_their_continents() {
        let mut rng = MapRand::new(12);
        let (grid, regions) = GenerationSession::new(settings(96), &mut rng).generate().unwrap();

        // Some land inside the main continent's mask is start-eligible.
        let main = &regions[0];
        let eligible_land = grid
            .iter()
            .filter(|(x, y, plot)| !plot.is_water() && main.is_inside(*x as f64, *y as f64))
            .count();
        assert!(eligible_land > 0);
    }

    #[test]
    fn test_hub_latitude_is_coldest() {
        let info = GridInfo::new(64, 64);
        let center = inverted_distance_to_center(&info, 32, 32, None);
        let rim = inverted_distance_to_center(&info, 63, 32, None);
        assert!(center > 0.95);
        assert!(rim < 0.05);
    }

    #[test]
    fn test_outline_shapes() {
        let grid = GridInfo::new(60, 60);
        assert_eq!(main_continent_outline(&grid, 0.1).len(), 6);
        assert_eq!(counterweight_outline(&grid, true).len(), 8);
        assert_eq!(islands_outline(&grid).len(), 4);
        assert_eq!(filler_outline(&grid).len(), 4);

        // The wide lobe flips sides with the coin draw.
        let left = counterweight_outline(&grid, true);
        let right = counterweight_outline(&grid, false);
        assert!(left[0].x < right[0].x);
    }

    #[test]
    fn test_centered_rect() {
        let rect = centered_rect(&GridInfo::new(64, 64), 6, 6);
        assert_eq!((rect.origin_x, rect.origin_y, rect.width, rect.height), (29, 29, 6, 6));
    }
}
