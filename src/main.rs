use std::error::Error;
use std::path::Path;

use clap::Parser;
use env_logger::Env;

use discworld_generator::ascii;
use discworld_generator::climate::{ClimatePreset, SeaLevel};
use discworld_generator::config::{GeneratorConfig, WorldSize};
use discworld_generator::export;
use discworld_generator::world;

#[derive(Parser, Debug)]
#[command(name = "discworld_generator")]
#[command(about = "Generate disc-shaped maps with a frozen hub and radial climate bands")]
struct Args {
    /// JSON generator config; flags below override its fields
    #[arg(short, long)]
    config: Option<String>,

    /// World size preset (duel, tiny, small, standard, large, huge)
    #[arg(short = 'w', long)]
    world_size: Option<String>,

    /// Explicit disc diameter in cells, overriding the world size
    #[arg(short = 'S', long)]
    size: Option<usize>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Climate preset (temperate, tropical, arid, rocky, cold)
    #[arg(long)]
    climate: Option<String>,

    /// Sea level preset (low, medium, high)
    #[arg(long)]
    sea_level: Option<String>,

    /// Output PNG with plots, terrain and start regions side by side
    #[arg(short, long, default_value = "discworld.png")]
    output: String,

    /// Also save the plot and terrain layers as separate PNGs:
    /// <PREFIX>_plots.png and <PREFIX>_terrain.png
    #[arg(long, value_name = "PREFIX")]
    layers: Option<String>,

    /// Print details of one tile
    #[arg(long, num_args = 2, value_names = ["X", "Y"])]
    tile: Option<Vec<usize>>,

    /// Export the world as an ASCII text file
    #[arg(long)]
    ascii: Option<String>,

    /// Include per-tile data in the ASCII export
    #[arg(long)]
    verbose: bool,

    /// Print the feature map to stdout
    #[arg(long)]
    print: bool,
}

fn build_config(args: &Args) -> Result<GeneratorConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::from_file(Path::new(path))?,
        None => GeneratorConfig::default(),
    };

    if let Some(name) = &args.world_size {
        config.world_size = WorldSize::from_str(name).ok_or_else(|| format!("unknown world size '{}'", name))?;
    }
    if let Some(size) = args.size {
        config.grid_size = Some(size);
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(name) = &args.climate {
        config.climate = ClimatePreset::from_str(name).ok_or_else(|| format!("unknown climate '{}'", name))?;
    }
    if let Some(name) = &args.sea_level {
        config.sea_level = SeaLevel::from_str(name).ok_or_else(|| format!("unknown sea level '{}'", name))?;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let config = build_config(&args)?;

    let grid = config.grid();
    println!("Generating disc: {} world, {}x{}", config.world_size, grid.width, grid.height);
    println!("Climate: {} ({})", config.climate, config.climate.description());
    println!("Sea level: {}", config.sea_level);

    let world = world::generate_world(&config)?;
    println!("Seed: {}", world.seed);

    let stats = world.plot_stats();
    println!(
        "Plots: {} ocean, {} land, {} hills, {} peaks ({:.1}% land)",
        stats.ocean,
        stats.land,
        stats.hills,
        stats.peaks,
        100.0 * stats.land_fraction()
    );
    println!(
        "Ice: {} border, {} latitude",
        world.feature_report.border_ice, world.feature_report.latitude_ice
    );
    for region in &world.start_regions {
        println!("Start region: {}", region.name());
    }

    export::export_combined(&world, &args.output)?;
    println!("Saved map to {}", args.output);

    if let Some(prefix) = &args.layers {
        let plots_path = format!("{}_plots.png", prefix);
        let terrain_path = format!("{}_terrain.png", prefix);
        export::export_plot_map(&world.plots, &plots_path)?;
        export::export_terrain_map(&world.terrain, &world.features, &terrain_path)?;
        println!("Saved layers to {} and {}", plots_path, terrain_path);
    }

    if let Some(coords) = &args.tile {
        let (x, y) = (coords[0], coords[1]);
        if x >= world.width() || y >= world.height() {
            return Err(format!("tile ({}, {}) is outside the {}x{} grid", x, y, world.width(), world.height()).into());
        }
        let info = world.get_tile_info(x, y);
        println!("Tile ({}, {}):", info.x, info.y);
        println!("  Plot: {}", info.plot.display_name());
        println!("  Terrain: {}", info.terrain.display_name());
        println!("  Feature: {:?}", info.feature);
        println!("  Latitude: {}", info.latitude_str());
        match &info.start_region {
            Some(name) => println!("  Start region: {}", name),
            None => println!("  Start region: none"),
        }
    }

    if let Some(path) = &args.ascii {
        ascii::export_world_file(&world, path, args.verbose)?;
        println!("Saved ASCII world to {}", path);
    }

    if args.print {
        ascii::print_ascii_map(&world, ascii::AsciiMode::Features);
    }

    Ok(())
}
