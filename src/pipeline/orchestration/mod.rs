pub mod design_job;
pub mod design_pipeline;
pub mod design_report;

pub use design_job::{catalog_listing, ensure_style_offered, write_composite};
pub use design_pipeline::{DesignOutcome, DesignPipeline, DesignPipelineBuilder, RegionDesign};
pub use design_report::DesignReport;
