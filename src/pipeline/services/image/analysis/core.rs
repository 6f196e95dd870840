use serde::Serialize;

use crate::pipeline::services::image::geometry::RegionStats;
use crate::pipeline::types::RegionLabel;

/// Which classifier branch produced a label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationRule {
    EmptyMask,
    Roof,
    Balcony,
    Pillars,
    SideWalls,
    UpperLowerWalls,
    MainWalls,
    Doors,
    Windows,
    LargeAreaFallback,
    Fallback,
}

/// Label assigned to one mask, with the rule that fired
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub label: RegionLabel,
    pub rule: ClassificationRule,
}

impl Classification {
    pub fn new(label: RegionLabel, rule: ClassificationRule) -> Self {
        Self { label, rule }
    }
}

/// Strategy pattern for region classification. `None` stands for an empty mask.
pub trait RegionClassifier: Send + Sync {
    fn classify(&self, stats: Option<&RegionStats>) -> Classification;
    fn name(&self) -> &'static str;
}
