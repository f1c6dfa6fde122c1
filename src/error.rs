//! Error types for disc generation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("{region}: a polygon must have at least three vertices (got {vertices})")]
    MalformedPolygon { region: String, vertices: usize },
    #[error("invalid generator configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to parse generator config: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("failed to read generator config from {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, GenerationError>;
