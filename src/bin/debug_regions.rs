//! Debug script to dump the landmass and its start-region masks as ASCII

use std::error::Error;
use std::fs::File;
use std::io::Write;

use env_logger::Env;

use discworld_generator::ascii::{plot_char, render_region_mask};
use discworld_generator::config::GeneratorConfig;
use discworld_generator::landmass::{GenerationSession, PlotStats};
use discworld_generator::seeds::MapRand;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("debug")).init();

    let seed = std::env::args().nth(1).and_then(|s| s.parse().ok()).unwrap_or(12345u64);
    let config = GeneratorConfig {
        seed: Some(seed),
        ..GeneratorConfig::default()
    };
    let grid = config.grid();

    let mut rng = MapRand::new(seed);
    let (plots, regions) = GenerationSession::new(config.landmass_settings(), &mut rng).generate()?;

    let mut file = File::create("region_debug.txt")?;
    writeln!(file, "=== REGION DEBUG MAP ({}x{}) seed={} ===", grid.width, grid.height, seed)?;
    writeln!(file, "Draws: {}", rng.draws())?;
    writeln!(file)?;

    writeln!(file, "LEGEND:")?;
    writeln!(file, "  . = Ocean   # = Land   n = Hills   ^ = Peak")?;
    writeln!(file, "  o = inside region   + = region vertex")?;
    writeln!(file)?;

    writeln!(file, "PLOT MAP:")?;
    for y in 0..plots.height {
        let line: String = (0..plots.width).map(|x| plot_char(plots.get(x, y))).collect();
        writeln!(file, "{}", line)?;
    }
    writeln!(file)?;

    for region in &regions {
        let frame = region.frame();
        writeln!(
            file,
            "REGION '{}': frame {}x{} at ({}, {}), {} cells inside",
            region.name(),
            frame.width,
            frame.height,
            frame.origin_x,
            frame.origin_y,
            region.mask().count_where(|inside| *inside)
        )?;
        for v in region.vertices() {
            writeln!(file, "  vertex ({:.1}, {:.1})", v.x, v.y)?;
        }
        write!(file, "{}", render_region_mask(region))?;
        writeln!(file)?;
    }

    let stats = PlotStats::of(&plots);
    writeln!(file, "STATISTICS:")?;
    writeln!(file, "  Ocean: {}  Land: {}  Hills: {}  Peaks: {}", stats.ocean, stats.land, stats.hills, stats.peaks)?;
    writeln!(file, "  Land fraction: {:.1}%", 100.0 * stats.land_fraction())?;

    println!("Wrote region_debug.txt ({} regions, seed {})", regions.len(), seed);
    Ok(())
}
