//! Discworld map generation library
//!
//! A square grid holding a round world: a frozen hub at the center, warm
//! bands toward the rim, and ocean beyond it. Re-exports modules for use by
//! binaries and tools.

pub mod ascii;
pub mod climate;
pub mod config;
pub mod error;
pub mod export;
pub mod features;
pub mod landmass;
pub mod noise_field;
pub mod seeds;
pub mod terrain;
pub mod tilemap;
pub mod world;

pub use config::GeneratorConfig;
pub use error::{GenerationError, Result};
pub use world::{generate_world, WorldData};
