//! Plot types and the world grid they fill

use serde::{Deserialize, Serialize};

use crate::tilemap::Tilemap;

/// Land/water classification of a single plot. A categorical tag, not a height.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlotType {
    #[default]
    Ocean,
    Land,
    Hills,
    Peak,
}

impl PlotType {
    pub fn is_water(&self) -> bool {
        matches!(self, PlotType::Ocean)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PlotType::Ocean => "Ocean",
            PlotType::Land => "Land",
            PlotType::Hills => "Hills",
            PlotType::Peak => "Peak",
        }
    }

    pub fn all() -> &'static [PlotType] {
        &[PlotType::Ocean, PlotType::Land, PlotType::Hills, PlotType::Peak]
    }
}

impl std::fmt::Display for PlotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// The shared plot grid of one generation run.
pub type WorldGrid = Tilemap<PlotType>;

/// Per-type cell counts of a plot grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlotStats {
    pub ocean: usize,
    pub land: usize,
    pub hills: usize,
    pub peaks: usize,
}

impl PlotStats {
    pub fn of(grid: &WorldGrid) -> Self {
        let mut stats = PlotStats::default();
        for (_, _, plot) in grid.iter() {
            match plot {
                PlotType::Ocean => stats.ocean += 1,
                PlotType::Land => stats.land += 1,
                PlotType::Hills => stats.hills += 1,
                PlotType::Peak => stats.peaks += 1,
            }
        }
        stats
    }

    pub fn non_water(&self) -> usize {
        self.land + self.hills + self.peaks
    }

    pub fn total(&self) -> usize {
        self.ocean + self.non_water()
    }

    /// Share of non-water plots, 0.0-1.0.
    pub fn land_fraction(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.non_water() as f64 / self.total() as f64
        }
    }
}
