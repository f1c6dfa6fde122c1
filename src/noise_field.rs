//! Fractal noise fields sampled onto integer grids
//!
//! A field is generated once at creation and normalized to the 0-255 range,
//! so percentile thresholds can be computed exactly from the stored samples.

use noise::{NoiseFn, Perlin, Seedable};

use crate::seeds::MapRand;
use crate::tilemap::Tilemap;

/// Largest sample a field can hold.
pub const MAX_SAMPLE: i32 = 255;

const FBM_OCTAVES: u32 = 4;
const FBM_PERSISTENCE: f64 = 0.5;
const FBM_LACUNARITY: f64 = 2.0;

/// Sampling options for a noise field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoiseFlags {
    /// Pin the first and last rows to zero. Only suitable for shape fields:
    /// a variation field built this way has degenerate all-zero rows.
    pub polar: bool,
}

impl NoiseFlags {
    pub const NONE: NoiseFlags = NoiseFlags { polar: false };
    pub const POLAR: NoiseFlags = NoiseFlags { polar: true };
}

/// A deterministic 2D scalar field with samples in `0..=255`.
#[derive(Clone, Debug)]
pub struct NoiseField {
    samples: Tilemap<u8>,
    sorted: Vec<u8>,
}

impl NoiseField {
    /// Build a field of `width x height` samples. Higher grain means finer
    /// variation; grain 0 is a single gentle swell across the whole field.
    ///
    /// Consumes three draws from `rng`: the Perlin seed and two lattice offsets.
    pub fn new(width: usize, height: usize, grain: u32, rng: &mut MapRand, flags: NoiseFlags) -> Self {
        let perlin = Perlin::new(1).set_seed(rng.next_seed("noise field seed"));
        let offset_x = rng.get(1 << 16, "noise field x offset") as f64 / 256.0;
        let offset_y = rng.get(1 << 16, "noise field y offset") as f64 / 256.0;

        let cycles = (1u64 << grain.min(16)) as f64 * 0.5;
        let extent = width.max(height).max(1) as f64;

        let mut raw = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let nx = offset_x + x as f64 / extent * cycles;
                let ny = offset_y + y as f64 / extent * cycles;
                raw.push(fbm(&perlin, nx, ny, FBM_OCTAVES, FBM_PERSISTENCE, FBM_LACUNARITY));
            }
        }

        let mut samples = normalize(width, height, &raw);
        if flags.polar && height > 0 {
            for x in 0..width {
                samples.set(x, 0, 0);
                samples.set(x, height - 1, 0);
            }
        }

        let mut sorted = samples.as_slice().to_vec();
        sorted.sort_unstable();

        Self { samples, sorted }
    }

    /// A field for climate or boundary variation. Polar mode is always off.
    pub fn variation(width: usize, height: usize, grain: u32, rng: &mut MapRand) -> Self {
        Self::new(width, height, grain, rng, NoiseFlags::NONE)
    }

    /// Sample at `(x, y)`; coordinates past the edge clamp to the nearest cell.
    pub fn height(&self, x: usize, y: usize) -> i32 {
        if self.sorted.is_empty() {
            return 0;
        }
        let x = x.min(self.samples.width - 1);
        let y = y.min(self.samples.height - 1);
        *self.samples.get(x, y) as i32
    }

    /// The sample value below which roughly `percent`% of the field lies.
    ///
    /// `percent <= 0` returns a value strictly below every sample, so a
    /// `sample <= threshold` test never matches. `percent >= 100` returns the
    /// maximum.
    pub fn threshold_for_percentile(&self, percent: i32) -> i32 {
        if self.sorted.is_empty() {
            return 0;
        }
        if percent <= 0 {
            return self.sorted[0] as i32 - 1;
        }
        let n = self.sorted.len();
        let idx = (percent.min(100) as usize * n / 100).min(n - 1);
        self.sorted[idx] as i32
    }
}

/// Stretch raw noise to fill `0..=255`. A flat field maps to the midpoint.
fn normalize(width: usize, height: usize, raw: &[f64]) -> Tilemap<u8> {
    let min = raw.iter().copied().fold(f64::MAX, f64::min);
    let max = raw.iter().copied().fold(f64::MIN, f64::max);
    let range = max - min;

    let data = raw
        .iter()
        .map(|&v| {
            if range < 1e-12 {
                128
            } else {
                (((v - min) / range) * MAX_SAMPLE as f64).round().clamp(0.0, MAX_SAMPLE as f64) as u8
            }
        })
        .collect();

    Tilemap::from_vec(width, height, data)
}

/// Fractional Brownian Motion - layers multiple octaves of noise for self-similar detail.
fn fbm(noise: &Perlin, x: f64, y: f64, octaves: u32, persistence: f64, lacunarity: f64) -> f64 {
    let mut total = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut max_value = 0.0;

    for _ in 0..octaves {
        total += amplitude * noise.get([x * frequency, y * frequency]);
        max_value += amplitude;
        amplitude *= persistence;
        frequency *= lacunarity;
    }

    total / max_value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_span_full_range() {
        let mut rng = MapRand::new(3);
        let field = NoiseField::new(40, 30, 3, &mut rng, NoiseFlags::NONE);

        let mut min = i32::MAX;
        let mut max = i32::MIN;
        for y in 0..30 {
            for x in 0..40 {
                let h = field.height(x, y);
                min = min.min(h);
                max = max.max(h);
            }
        }
        assert_eq!(min, 0);
        assert_eq!(max, MAX_SAMPLE);
    }

    #[test]
    fn test_percentile_thresholds() {
        let mut rng = MapRand::new(11);
        let field = NoiseField::new(32, 32, 2, &mut rng, NoiseFlags::NONE);

        assert!(field.threshold_for_percentile(0) < 0);
        assert_eq!(field.threshold_for_percentile(100), MAX_SAMPLE);
        assert_eq!(field.threshold_for_percentile(250), MAX_SAMPLE);

        let t25 = field.threshold_for_percentile(25);
        let t75 = field.threshold_for_percentile(75);
        assert!(t25 <= t75);

        // Roughly half of the samples sit at or below the median threshold.
        let t50 = field.threshold_for_percentile(50);
        let below = (0..32)
            .flat_map(|y| (0..32).map(move |x| (x, y)))
            .filter(|&(x, y)| field.height(x, y) <= t50)
            .count();
        assert!(below >= 512 && below < 700, "{} samples at or below median", below);
    }

    #[test]
    fn test_same_stream_same_field() {
        let a = NoiseField::new(20, 20, 4, &mut MapRand::new(5), NoiseFlags::NONE);
        let b = NoiseField::new(20, 20, 4, &mut MapRand::new(5), NoiseFlags::NONE);

        for y in 0..20 {
            for x in 0..20 {
                assert_eq!(a.height(x, y), b.height(x, y));
            }
        }
    }

    #[test]
    fn test_polar_pins_edge_rows() {
        let mut rng = MapRand::new(8);
        let field = NoiseField::new(16, 12, 2, &mut rng, NoiseFlags::POLAR);

        for x in 0..16 {
            assert_eq!(field.height(x, 0), 0);
            assert_eq!(field.height(x, 11), 0);
        }
    }

    #[test]
    fn test_variation_field_has_no_zero_rows() {
        let mut rng = MapRand::new(8);
        let field = NoiseField::variation(16, 12, 2, &mut rng);

        for y in [0, 11] {
            assert!((0..16).any(|x| field.height(x, y) > 0));
        }
    }

    #[test]
    fn test_empty_field() {
        let mut rng = MapRand::new(1);
        let field = NoiseField::new(0, 0, 2, &mut rng, NoiseFlags::NONE);
        assert_eq!(field.height(3, 3), 0);
        assert_eq!(field.threshold_for_percentile(50), 0);
    }
}
