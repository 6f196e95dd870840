use std::path::Path;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use uuid::Uuid;

use super::design_pipeline::{DesignOutcome, RegionDesign};
use crate::error::AppError;
use crate::pipeline::services::style::StyleCatalog;
use crate::pipeline::types::{RegionLabel, StyleOption};

/// Summary of one styling run, written next to the output images on request.
#[derive(Debug, Serialize)]
pub struct DesignReport<'a> {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub selected_style: &'a str,
    pub blend_alpha: f32,
    pub regions: &'a [RegionDesign],
    /// What the catalog offers each region for the selected style.
    pub region_recommendations: IndexMap<RegionLabel, &'a [StyleOption]>,
}

impl<'a> DesignReport<'a> {
    pub fn new(outcome: &'a DesignOutcome, catalog: &'a StyleCatalog, blend_alpha: f32) -> Self {
        Self {
            run_id: outcome.run_id,
            generated_at: Utc::now(),
            selected_style: &outcome.style,
            blend_alpha,
            regions: &outcome.regions,
            region_recommendations: catalog.recommendations_for_style(&outcome.style),
        }
    }

    pub fn to_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), AppError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
