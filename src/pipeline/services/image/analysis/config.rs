use serde::Deserialize;

/// Tunable thresholds for the heuristic region classifier.
///
/// Heights and areas are fractions of the image height and image area; centers are
/// normalized to [0, 1]. The defaults are the reference façade heuristic.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClassifierThresholds {
    pub roof_max_center_row: f64,
    pub roof_min_aspect: f64,
    pub roof_max_height: f64,

    pub balcony_center_row: (f64, f64),
    pub balcony_min_aspect: f64,
    pub balcony_height: (f64, f64),

    pub pillar_max_aspect: f64,
    pub pillar_min_height: f64,
    pub pillar_edge_margin: f64,

    pub wall_min_area_ratio: f64,
    pub side_wall_edge_margin: f64,
    pub upper_wall_max_center_row: f64,

    pub door_min_center_row: f64,
    pub door_min_aspect: f64,
    pub door_min_box_area: f64,
    pub door_max_channel: f64,

    pub window_max_aspect: f64,
    pub window_min_height: f64,
    pub window_max_center_row: f64,
    pub window_max_box_area: f64,
    pub window_min_blue: f64,

    pub fallback_min_area_ratio: f64,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            roof_max_center_row: 0.2,
            roof_min_aspect: 2.5,
            roof_max_height: 0.15,

            balcony_center_row: (0.2, 0.5),
            balcony_min_aspect: 2.0,
            balcony_height: (0.08, 0.25),

            pillar_max_aspect: 0.25,
            pillar_min_height: 0.4,
            pillar_edge_margin: 0.2,

            wall_min_area_ratio: 0.15,
            side_wall_edge_margin: 0.3,
            upper_wall_max_center_row: 0.5,

            door_min_center_row: 0.7,
            door_min_aspect: 0.6,
            door_min_box_area: 0.01,
            door_max_channel: 120.0,

            window_max_aspect: 0.5,
            window_min_height: 0.1,
            window_max_center_row: 0.6,
            window_max_box_area: 0.15,
            window_min_blue: 130.0,

            fallback_min_area_ratio: 0.10,
        }
    }
}

impl ClassifierThresholds {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), String> {
        let unit = [
            ("roof_max_center_row", self.roof_max_center_row),
            ("roof_max_height", self.roof_max_height),
            ("pillar_min_height", self.pillar_min_height),
            ("pillar_edge_margin", self.pillar_edge_margin),
            ("wall_min_area_ratio", self.wall_min_area_ratio),
            ("side_wall_edge_margin", self.side_wall_edge_margin),
            ("upper_wall_max_center_row", self.upper_wall_max_center_row),
            ("door_min_center_row", self.door_min_center_row),
            ("door_min_box_area", self.door_min_box_area),
            ("window_min_height", self.window_min_height),
            ("window_max_center_row", self.window_max_center_row),
            ("window_max_box_area", self.window_max_box_area),
            ("fallback_min_area_ratio", self.fallback_min_area_ratio),
        ];
        for (name, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} must be between 0.0 and 1.0, got {}", name, value));
            }
        }

        if self.balcony_center_row.0 > self.balcony_center_row.1 {
            return Err("balcony_center_row range is inverted".to_string());
        }

        if self.balcony_height.0 > self.balcony_height.1 {
            return Err("balcony_height range is inverted".to_string());
        }

        if self.roof_min_aspect < 0.0
            || self.balcony_min_aspect < 0.0
            || self.pillar_max_aspect < 0.0
            || self.door_min_aspect < 0.0
            || self.window_max_aspect < 0.0
        {
            return Err("Aspect thresholds must be non-negative".to_string());
        }

        Ok(())
    }
}
