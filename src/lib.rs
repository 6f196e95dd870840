pub mod config;
pub mod error;
pub mod pipeline;
pub mod segmentation;

pub use self::config::Configuration;
pub use error::{AppError, CatalogError, RasterError, ResolveError, SegmenterError};

pub use pipeline::{
    DesignOutcome, DesignPipeline, DesignPipelineBuilder, DesignReport, Mask, RegionLabel,
    Resolution, StyleCatalog, StyleOption, StyleResolver,
};
pub use segmentation::{MaskDirectorySegmenter, PrecomputedSegmenter, Segmenter};
