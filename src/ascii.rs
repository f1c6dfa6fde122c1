//! ASCII rendering and export module for disc maps
//!
//! Provides functions to render world data as ASCII text and export to files.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Write};

use chrono::Local;

use crate::features::FeatureType;
use crate::landmass::{IrregularRegion, PlotType};
use crate::terrain::TerrainType;
use crate::tilemap::Tilemap;
use crate::world::WorldData;

/// ASCII rendering modes
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AsciiMode {
    /// Show plot types
    Plots,
    /// Show terrain
    Terrain,
    /// Show terrain with features drawn over it
    Features,
}

impl AsciiMode {
    pub fn name(&self) -> &'static str {
        match self {
            AsciiMode::Plots => "Plots",
            AsciiMode::Terrain => "Terrain",
            AsciiMode::Features => "Features",
        }
    }

    pub fn all() -> &'static [AsciiMode] {
        &[AsciiMode::Plots, AsciiMode::Terrain, AsciiMode::Features]
    }
}

pub fn plot_char(plot: &PlotType) -> char {
    match plot {
        PlotType::Ocean => '.',
        PlotType::Land => '#',
        PlotType::Hills => 'n',
        PlotType::Peak => '^',
    }
}

pub fn terrain_char(terrain: &TerrainType) -> char {
    match terrain {
        TerrainType::Ocean => '~',
        TerrainType::Coast => ',',
        TerrainType::Snow => '*',
        TerrainType::Tundra => ':',
        TerrainType::Grassland => '"',
        TerrainType::Plains => '-',
        TerrainType::Desert => 'd',
    }
}

/// Character of a feature, if it is drawn at all.
pub fn feature_char(feature: &FeatureType) -> Option<char> {
    match feature {
        FeatureType::None => None,
        FeatureType::Ice => Some('I'),
    }
}

/// Render a map to ASCII string
pub fn render_ascii_map(world: &WorldData, mode: AsciiMode) -> String {
    let width = world.width();
    let height = world.height();
    let mut result = String::with_capacity((width + 1) * height);

    for y in 0..height {
        for x in 0..width {
            let ch = match mode {
                AsciiMode::Plots => plot_char(world.plots.get(x, y)),
                AsciiMode::Terrain => terrain_char(world.terrain.get(x, y)),
                AsciiMode::Features => {
                    feature_char(world.features.get(x, y)).unwrap_or_else(|| terrain_char(world.terrain.get(x, y)))
                }
            };
            result.push(ch);
        }
        result.push('\n');
    }

    result
}

/// Render a region's membership mask over its own frame: `o` inside, `.`
/// outside, `+` on the rotated and jittered vertices.
pub fn render_region_mask(region: &IrregularRegion) -> String {
    let frame = region.frame();
    let mut rows: Vec<Vec<char>> = (0..frame.height)
        .map(|ly| {
            (0..frame.width)
                .map(|lx| if region.is_inside_local(lx, ly) { 'o' } else { '.' })
                .collect()
        })
        .collect();

    for vertex in region.vertices() {
        if let Some((lx, ly)) = frame.local_of_point(vertex.x, vertex.y) {
            rows[ly][lx] = '+';
        }
    }

    let mut result = String::with_capacity((frame.width + 1) * frame.height);
    for row in rows {
        result.extend(row);
        result.push('\n');
    }
    result
}

/// Generate legend for plot and terrain characters
pub fn legend() -> String {
    let mut legend = String::new();
    legend.push_str("=== LEGEND ===\n");
    legend.push_str("PLOTS:\n");
    legend.push_str("  . Ocean       # Land        n Hills       ^ Peak\n");
    legend.push_str("TERRAIN:\n");
    legend.push_str("  ~ Ocean       , Coast       * Snow        : Tundra\n");
    legend.push_str("  \" Grassland   - Plains      d Desert\n");
    legend.push_str("FEATURES:\n");
    legend.push_str("  I Ice\n");
    legend
}

pub fn calculate_terrain_stats(terrain: &Tilemap<TerrainType>) -> HashMap<TerrainType, usize> {
    let mut stats = HashMap::new();
    for (_, _, t) in terrain.iter() {
        *stats.entry(*t).or_insert(0) += 1;
    }
    stats
}

/// Export world data to ASCII file
pub fn export_world_file(world: &WorldData, path: &str, verbose: bool) -> io::Result<()> {
    let mut file = File::create(path)?;
    let width = world.width();
    let height = world.height();
    let total = width * height;

    // Header
    writeln!(file, "=== DISCWORLD GENERATOR WORLD FILE ===")?;
    writeln!(file, "Seed: {}", world.seed)?;
    writeln!(file, "Size: {}x{} ({} world)", width, height, world.config.world_size)?;
    writeln!(file, "Climate: {}  Sea level: {}", world.config.climate, world.config.sea_level)?;
    writeln!(file, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(file)?;

    writeln!(file, "=== MAP (Plot View) ===")?;
    write!(file, "{}", render_ascii_map(world, AsciiMode::Plots))?;
    writeln!(file)?;

    writeln!(file, "=== MAP (Feature View) ===")?;
    write!(file, "{}", render_ascii_map(world, AsciiMode::Features))?;
    writeln!(file)?;

    write!(file, "{}", legend())?;
    writeln!(file)?;

    // Statistics
    writeln!(file, "=== STATISTICS ===")?;
    writeln!(file, "Total tiles: {}", total)?;

    let plots = world.plot_stats();
    for plot in PlotType::all() {
        let count = match plot {
            PlotType::Ocean => plots.ocean,
            PlotType::Land => plots.land,
            PlotType::Hills => plots.hills,
            PlotType::Peak => plots.peaks,
        };
        writeln!(file, "  {:12} {:>6} ({:>5.1}%)", plot.display_name(), count, 100.0 * count as f64 / total as f64)?;
    }
    writeln!(file)?;

    writeln!(file, "Terrain Distribution:")?;
    let stats = calculate_terrain_stats(&world.terrain);
    let mut sorted_stats: Vec<_> = stats.iter().collect();
    sorted_stats.sort_by(|a, b| b.1.cmp(a.1));
    for (terrain, count) in sorted_stats {
        let pct = 100.0 * *count as f64 / total as f64;
        writeln!(file, "  {:12} {} {:>6} ({:>5.1}%)", terrain.display_name(), terrain_char(terrain), count, pct)?;
    }
    writeln!(file)?;

    writeln!(
        file,
        "Ice: {} border, {} latitude",
        world.feature_report.border_ice, world.feature_report.latitude_ice
    )?;
    writeln!(file)?;

    writeln!(file, "Start regions:")?;
    for region in &world.start_regions {
        let bounds = region.bounds();
        writeln!(
            file,
            "  {:24} ({:.1}, {:.1}) to ({:.1}, {:.1})",
            region.name(),
            bounds.min_x,
            bounds.min_y,
            bounds.max_x,
            bounds.max_y
        )?;
    }
    writeln!(file)?;

    if verbose {
        writeln!(file, "=== TILE DATA ===")?;
        writeln!(file, "[x,y,plot,terrain,feature,start]")?;
        for y in 0..height {
            for x in 0..width {
                writeln!(
                    file,
                    "{},{},{},{},{:?},{}",
                    x,
                    y,
                    world.plots.get(x, y).display_name(),
                    world.terrain.get(x, y).display_name(),
                    world.features.get(x, y),
                    world.is_start_eligible(x, y) as u8
                )?;
            }
        }
    }

    Ok(())
}

/// Print ASCII map to stdout
pub fn print_ascii_map(world: &WorldData, mode: AsciiMode) {
    print!("{}", render_ascii_map(world, mode));
}
