use super::config::ClassifierThresholds;
use super::core::{Classification, ClassificationRule, RegionClassifier};
use crate::pipeline::services::image::geometry::RegionStats;
use crate::pipeline::types::RegionLabel;
use tracing::{debug, trace};

/// Ordered rule list; the first rule whose predicate holds decides the label.
///
/// Every input maps to exactly one label, with `main_walls` as the catch-all.
pub struct HeuristicRegionClassifier {
    thresholds: ClassifierThresholds,
}

impl HeuristicRegionClassifier {
    pub fn new() -> Self {
        Self::with_thresholds(ClassifierThresholds::default())
    }

    pub fn with_thresholds(thresholds: ClassifierThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ClassifierThresholds {
        &self.thresholds
    }

    fn is_roof(&self, s: &RegionStats) -> bool {
        let t = &self.thresholds;
        s.center_row < t.roof_max_center_row
            && s.aspect > t.roof_min_aspect
            && (s.box_height as f64) < t.roof_max_height * s.image_height as f64
    }

    fn is_balcony(&self, s: &RegionStats) -> bool {
        let t = &self.thresholds;
        let (row_lo, row_hi) = t.balcony_center_row;
        let (height_lo, height_hi) = t.balcony_height;
        let height = s.height_fraction();
        row_lo < s.center_row
            && s.center_row < row_hi
            && s.aspect > t.balcony_min_aspect
            && height_lo < height
            && height < height_hi
    }

    fn is_pillar(&self, s: &RegionStats) -> bool {
        let t = &self.thresholds;
        s.aspect < t.pillar_max_aspect
            && s.box_height as f64 > t.pillar_min_height * s.image_height as f64
            && near_side_edge(s.center_col, t.pillar_edge_margin)
    }

    fn is_large(&self, s: &RegionStats) -> bool {
        s.area_ratio > self.thresholds.wall_min_area_ratio
    }

    fn is_door(&self, s: &RegionStats) -> bool {
        let t = &self.thresholds;
        s.center_row > t.door_min_center_row
            && s.aspect > t.door_min_aspect
            && s.box_area as f64 > t.door_min_box_area * s.image_area()
            && s.mean_color.iter().all(|&c| c < t.door_max_channel)
    }

    fn is_window_shape(&self, s: &RegionStats) -> bool {
        let t = &self.thresholds;
        let tall_and_narrow = s.aspect < t.window_max_aspect
            && s.box_height as f64 > t.window_min_height * s.image_height as f64;
        let small_and_high = s.center_row < t.window_max_center_row
            && (s.box_area as f64) < t.window_max_box_area * s.image_area();
        tall_and_narrow || small_and_high
    }

    /// Blue-dominant glass tint. Reported only, it does not change the label.
    fn looks_glazed(&self, s: &RegionStats) -> bool {
        let [r, g, b] = s.mean_color;
        b > r && b > g && b > self.thresholds.window_min_blue
    }
}

fn near_side_edge(center_col: f64, margin: f64) -> bool {
    center_col < margin || center_col > 1.0 - margin
}

impl RegionClassifier for HeuristicRegionClassifier {
    fn classify(&self, stats: Option<&RegionStats>) -> Classification {
        use ClassificationRule as Rule;
        use RegionLabel as Label;

        let Some(s) = stats else {
            debug!("Empty mask, falling back to {}", Label::MainWalls);
            return Classification::new(Label::MainWalls, Rule::EmptyMask);
        };
        let t = &self.thresholds;

        if self.is_roof(s) {
            return Classification::new(Label::Roof, Rule::Roof);
        }
        if self.is_balcony(s) {
            return Classification::new(Label::Balcony, Rule::Balcony);
        }
        if self.is_pillar(s) {
            return Classification::new(Label::Pillars, Rule::Pillars);
        }
        if self.is_large(s) && near_side_edge(s.center_col, t.side_wall_edge_margin) {
            return Classification::new(Label::SideWalls, Rule::SideWalls);
        }
        if self.is_large(s) && s.center_row < t.upper_wall_max_center_row {
            return Classification::new(Label::UpperLowerWalls, Rule::UpperLowerWalls);
        }
        if self.is_large(s) && s.center_row >= t.upper_wall_max_center_row {
            return Classification::new(Label::MainWalls, Rule::MainWalls);
        }
        if self.is_door(s) {
            return Classification::new(Label::Doors, Rule::Doors);
        }
        if self.is_window_shape(s) {
            // Tinted and untinted candidates both end up as windows.
            trace!(glazed = self.looks_glazed(s), "Window candidate");
            return Classification::new(Label::Windows, Rule::Windows);
        }
        if s.area_ratio > t.fallback_min_area_ratio {
            return Classification::new(Label::MainWalls, Rule::LargeAreaFallback);
        }

        Classification::new(Label::MainWalls, Rule::Fallback)
    }

    fn name(&self) -> &'static str {
        "HeuristicRegionClassifier"
    }
}
