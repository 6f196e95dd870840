use std::path::PathBuf;

use thiserror::Error;

use crate::pipeline::types::RegionLabel;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Pipeline Error: {0}")]
    Pipeline(String),
    #[error("Catalog Error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Resolve Error: {0}")]
    Resolve(#[from] ResolveError),
    #[error("Raster Error: {0}")]
    Raster(#[from] RasterError),
    #[error("Segmenter Error: {0}")]
    Segmenter(#[from] SegmenterError),
    #[error("Style '{0}' is not offered by any region of the catalog")]
    UnknownStyle(String),
    #[error("Image Error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Configuration Error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Report Error: {0}")]
    Report(#[from] serde_json::Error),
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),
}

// Catalog loading errors, fatal at startup
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read style catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed style catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid color '{0}', expected #RRGGBB")]
    InvalidColor(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum ResolveError {
    #[error("No catalog entry offers style '{style}' (requested for {region})")]
    CatalogExhausted { style: String, region: RegionLabel },
}

#[derive(Error, Debug, PartialEq)]
pub enum RasterError {
    #[error("Dimension mismatch: expected {expected:?}, found {found:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        found: (u32, u32),
    },
    #[error("Blend factor {0} is outside [0, 1]")]
    InvalidBlendFactor(f32),
}

// Upstream segmentation failures are carried as-is
#[derive(Error, Debug)]
#[error("{0}")]
pub struct SegmenterError(Box<dyn std::error::Error + Send + Sync>);

impl SegmenterError {
    pub fn new<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self(error.into())
    }
}
