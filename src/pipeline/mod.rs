pub mod orchestration;
pub mod services;
pub mod types;

pub use orchestration::{DesignOutcome, DesignPipeline, DesignPipelineBuilder, DesignReport};
pub use services::{StyleCatalog, StyleResolver};
pub use types::{Mask, RegionLabel, Resolution, StyleOption};
