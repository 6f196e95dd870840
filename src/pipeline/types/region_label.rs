use std::fmt;

use serde::{Deserialize, Serialize};

/// Architectural element a mask is assigned to. Exactly one per mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionLabel {
    MainWalls,
    SideWalls,
    UpperLowerWalls,
    Pillars,
    Balcony,
    Roof,
    Doors,
    Windows,
}

impl RegionLabel {
    pub const ALL: [RegionLabel; 8] = [
        RegionLabel::MainWalls,
        RegionLabel::SideWalls,
        RegionLabel::UpperLowerWalls,
        RegionLabel::Pillars,
        RegionLabel::Balcony,
        RegionLabel::Roof,
        RegionLabel::Doors,
        RegionLabel::Windows,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RegionLabel::MainWalls => "main_walls",
            RegionLabel::SideWalls => "side_walls",
            RegionLabel::UpperLowerWalls => "upper_lower_walls",
            RegionLabel::Pillars => "pillars",
            RegionLabel::Balcony => "balcony",
            RegionLabel::Roof => "roof",
            RegionLabel::Doors => "doors",
            RegionLabel::Windows => "windows",
        }
    }
}

impl fmt::Display for RegionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
