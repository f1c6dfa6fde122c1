//! Region stamping: percentile classification of an area and its merge into the world grid

use crate::climate::ClimateParams;
use crate::noise_field::{NoiseField, NoiseFlags};
use crate::seeds::MapRand;
use crate::tilemap::Tilemap;

use super::geometry::RegionFrame;
use super::region::IrregularRegion;
use super::types::{PlotType, WorldGrid};

/// Area covered by one stamping pass.
#[derive(Clone, Copy, Debug)]
pub enum StampArea<'a> {
    /// Plain rectangle of world cells.
    Rect(RegionFrame),
    /// Bounding box of a region, clipped to its membership mask.
    Region(&'a IrregularRegion),
}

impl StampArea<'_> {
    pub fn frame(&self) -> RegionFrame {
        match self {
            StampArea::Rect(frame) => *frame,
            StampArea::Region(region) => region.frame(),
        }
    }

    fn contains_local(&self, lx: usize, ly: usize) -> bool {
        match self {
            StampArea::Rect(_) => true,
            StampArea::Region(region) => region.is_inside_local(lx, ly),
        }
    }
}

/// Per-pass stamping parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StampParams {
    /// Percentile of the shape field at or below which a cell stays water
    pub water_percent: i32,
    /// Grain of the continental shape field
    pub grain: u32,
    /// Grain of the hill field; the peak field uses one more
    pub hills_grain: u32,
}

/// Outcome of merging one pass into the world grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StampReport {
    pub land: usize,
    pub hills: usize,
    pub peaks: usize,
    /// Non-water cells that fell outside the world grid
    pub out_of_bounds: usize,
}

impl StampReport {
    pub fn written(&self) -> usize {
        self.land + self.hills + self.peaks
    }
}

/// Percentile thresholds for one pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Thresholds {
    water: i32,
    hill_bands: [(i32, i32); 2],
    peak: i32,
}

impl Thresholds {
    fn derive(shape: &NoiseField, hills: &NoiseField, peaks: &NoiseField, water_percent: i32, climate: &ClimateParams) -> Self {
        let band = |center: i32| {
            (
                hills.threshold_for_percentile((center - climate.hill_range).max(0)),
                hills.threshold_for_percentile((center + climate.hill_range).min(100)),
            )
        };
        Self {
            water: shape.threshold_for_percentile(water_percent),
            hill_bands: [band(25), band(75)],
            peak: peaks.threshold_for_percentile(climate.peak_percent),
        }
    }

    fn in_hill_band(&self, value: i32) -> bool {
        self.hill_bands.iter().any(|&(bottom, top)| value >= bottom && value <= top)
    }
}

/// Classify every cell of the area's frame into a local plot buffer.
///
/// Creates the shape, hill and peak fields in that order. The water test runs
/// before the membership test, which is the more expensive of the two.
pub fn classify_area(area: &StampArea, params: &StampParams, climate: &ClimateParams, rng: &mut MapRand) -> Tilemap<PlotType> {
    let frame = area.frame();
    let mut plots = Tilemap::new_with(frame.width, frame.height, PlotType::Ocean);

    let shape = NoiseField::new(frame.width, frame.height, params.grain, rng, NoiseFlags::POLAR);
    let hills = NoiseField::new(frame.width, frame.height, params.hills_grain, rng, NoiseFlags::NONE);
    let peaks = NoiseField::new(frame.width, frame.height, params.hills_grain + 1, rng, NoiseFlags::NONE);
    let thresholds = Thresholds::derive(&shape, &hills, &peaks, params.water_percent, climate);

    log::debug!(
        "classify {}x{} at ({}, {}): water <= {}, hill bands {:?}, peak <= {}",
        frame.width,
        frame.height,
        frame.origin_x,
        frame.origin_y,
        thresholds.water,
        thresholds.hill_bands,
        thresholds.peak
    );

    for (lx, ly, plot) in plots.iter_mut() {
        if shape.height(lx, ly) <= thresholds.water {
            continue;
        }
        if !area.contains_local(lx, ly) {
            continue;
        }
        *plot = if thresholds.in_hill_band(hills.height(lx, ly)) {
            if peaks.height(lx, ly) <= thresholds.peak {
                PlotType::Peak
            } else {
                PlotType::Hills
            }
        } else {
            PlotType::Land
        };
    }

    plots
}

/// Copy every non-water local plot into the world grid. Water plots are never
/// written, so earlier landmasses outside this area's land survive; cells that
/// map outside the grid are skipped.
pub fn merge_into(world: &mut WorldGrid, frame: &RegionFrame, plots: &Tilemap<PlotType>) -> StampReport {
    let mut report = StampReport::default();

    for (lx, ly, plot) in plots.iter() {
        if plot.is_water() {
            continue;
        }
        let (wx, wy) = frame.local_to_world(lx, ly);
        if !world.in_bounds(wx, wy) {
            report.out_of_bounds += 1;
            continue;
        }
        world.set(wx as usize, wy as usize, *plot);
        match plot {
            PlotType::Land => report.land += 1,
            PlotType::Hills => report.hills += 1,
            PlotType::Peak => report.peaks += 1,
            PlotType::Ocean => {}
        }
    }

    report
}

/// Classify an area and merge it into the world grid.
pub fn stamp(world: &mut WorldGrid, area: &StampArea, params: &StampParams, climate: &ClimateParams, rng: &mut MapRand) -> StampReport {
    let plots = classify_area(area, params, climate, rng);
    let report = merge_into(world, &area.frame(), &plots);
    log::debug!(
        "stamped {} cells ({} land, {} hills, {} peaks), {} off-grid",
        report.written(),
        report.land,
        report.hills,
        report.peaks,
        report.out_of_bounds
    );
    report
}
