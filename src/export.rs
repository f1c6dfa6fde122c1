use image::{ImageBuffer, Rgb, RgbImage};

use crate::features::FeatureType;
use crate::landmass::{IrregularRegion, PlotType};
use crate::terrain::TerrainType;
use crate::tilemap::Tilemap;
use crate::world::WorldData;

const ICE_COLOR: [u8; 3] = [235, 245, 255];
const START_REGION_TINT: [u8; 3] = [255, 80, 80];
const PANEL_GAP: u32 = 4;

pub fn plot_color(plot: PlotType) -> [u8; 3] {
    match plot {
        PlotType::Ocean => [28, 62, 120],
        PlotType::Land => [96, 160, 72],
        PlotType::Hills => [150, 130, 84],
        PlotType::Peak => [220, 220, 220],
    }
}

pub fn terrain_color(terrain: TerrainType) -> [u8; 3] {
    match terrain {
        TerrainType::Ocean => [28, 62, 120],
        TerrainType::Coast => [64, 120, 180],
        TerrainType::Snow => [245, 245, 250],
        TerrainType::Tundra => [150, 160, 150],
        TerrainType::Grassland => [92, 156, 64],
        TerrainType::Plains => [180, 170, 90],
        TerrainType::Desert => [226, 200, 130],
    }
}

/// Render plot types, one pixel per cell.
pub fn render_plot_map(plots: &Tilemap<PlotType>) -> RgbImage {
    let mut img: RgbImage = ImageBuffer::new(plots.width as u32, plots.height as u32);
    for (x, y, plot) in plots.iter() {
        img.put_pixel(x as u32, y as u32, Rgb(plot_color(*plot)));
    }
    img
}

/// Render terrain with ice drawn over it.
pub fn render_terrain_map(terrain: &Tilemap<TerrainType>, features: &Tilemap<FeatureType>) -> RgbImage {
    let mut img: RgbImage = ImageBuffer::new(terrain.width as u32, terrain.height as u32);
    for (x, y, t) in terrain.iter() {
        let color = match features.get(x, y) {
            FeatureType::Ice => ICE_COLOR,
            FeatureType::None => terrain_color(*t),
        };
        img.put_pixel(x as u32, y as u32, Rgb(color));
    }
    img
}

/// Blend start-eligible cells toward red over an already rendered map.
pub fn tint_start_regions(img: &mut RgbImage, regions: &[IrregularRegion]) {
    for region in regions {
        let frame = region.frame();
        for (lx, ly, inside) in region.mask().iter() {
            if !*inside {
                continue;
            }
            let (wx, wy) = frame.local_to_world(lx, ly);
            if wx < 0 || wy < 0 || wx as u32 >= img.width() || wy as u32 >= img.height() {
                continue;
            }
            let pixel = img.get_pixel_mut(wx as u32, wy as u32);
            for c in 0..3 {
                pixel.0[c] = ((pixel.0[c] as u16 + START_REGION_TINT[c] as u16) / 2) as u8;
            }
        }
    }
}

pub fn export_plot_map(plots: &Tilemap<PlotType>, path: &str) -> Result<(), image::ImageError> {
    render_plot_map(plots).save(path)
}

pub fn export_terrain_map(
    terrain: &Tilemap<TerrainType>,
    features: &Tilemap<FeatureType>,
    path: &str,
) -> Result<(), image::ImageError> {
    render_terrain_map(terrain, features).save(path)
}

/// Plots, terrain, and plots with start regions, side by side.
pub fn render_combined(world: &WorldData) -> RgbImage {
    let tile_w = world.width() as u32;
    let tile_h = world.height() as u32;

    let mut regions = render_plot_map(&world.plots);
    tint_start_regions(&mut regions, &world.start_regions);
    let tiles = [
        render_plot_map(&world.plots),
        render_terrain_map(&world.terrain, &world.features),
        regions,
    ];

    let grid_w = tile_w * tiles.len() as u32 + PANEL_GAP * (tiles.len() as u32 - 1);
    let mut grid: RgbImage = ImageBuffer::from_pixel(grid_w, tile_h, Rgb([30, 30, 30]));

    for (idx, tile) in tiles.iter().enumerate() {
        let offset_x = idx as u32 * (tile_w + PANEL_GAP);
        for (tx, ty, pixel) in tile.enumerate_pixels() {
            grid.put_pixel(offset_x + tx, ty, *pixel);
        }
    }

    grid
}

pub fn export_combined(world: &WorldData, path: &str) -> Result<(), image::ImageError> {
    render_combined(world).save(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::world::generate_world;

    #[test]
    fn test_ice_overrides_terrain() {
        let terrain = Tilemap::new_with(2, 1, TerrainType::Desert);
        let mut features = Tilemap::new(2, 1);
        features.set(1, 0, FeatureType::Ice);

        let img = render_terrain_map(&terrain, &features);

        assert_eq!(img.get_pixel(0, 0).0, terrain_color(TerrainType::Desert));
        assert_eq!(img.get_pixel(1, 0).0, ICE_COLOR);
    }

    #[test]
    fn test_layer_exports_write_pngs() {
        let plots = Tilemap::new_with(8, 6, PlotType::Hills);
        let terrain = Tilemap::new_with(8, 6, TerrainType::Tundra);
        let features = Tilemap::new(8, 6);
        let dir = std::env::temp_dir();
        let plots_path = dir.join("discworld_layer_plots_test.png");
        let terrain_path = dir.join("discworld_layer_terrain_test.png");

        export_plot_map(&plots, plots_path.to_str().unwrap()).unwrap();
        export_terrain_map(&terrain, &features, terrain_path.to_str().unwrap()).unwrap();

        let read_back = image::open(&plots_path).unwrap().to_rgb8();
        assert_eq!(read_back.dimensions(), (8, 6));
        assert_eq!(read_back.get_pixel(3, 3).0, plot_color(PlotType::Hills));
        let read_back = image::open(&terrain_path).unwrap().to_rgb8();
        assert_eq!(read_back.get_pixel(0, 5).0, terrain_color(TerrainType::Tundra));

        let _ = std::fs::remove_file(plots_path);
        let _ = std::fs::remove_file(terrain_path);
    }

    #[test]
    fn test_combined_layout() {
        let config = GeneratorConfig {
            grid_size: Some(32),
            seed: Some(4),
            ..GeneratorConfig::default()
        };
        let world = generate_world(&config).unwrap();

        let img = render_combined(&world);

        assert_eq!(img.width(), 32 * 3 + PANEL_GAP * 2);
        assert_eq!(img.height(), 32);
        assert_eq!(img.get_pixel(0, 0).0, plot_color(PlotType::Ocean));
        assert_eq!(img.get_pixel(32 + PANEL_GAP, 0).0, ICE_COLOR);
    }
}
