pub mod analysis;
pub mod compositor;
pub mod geometry;

pub use analysis::{ClassifierThresholds, HeuristicRegionClassifier, RegionClassifier};
pub use compositor::{Composite, Compositor};
pub use geometry::{extract_region_stats, RegionStats};
