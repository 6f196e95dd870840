pub mod classifier;
pub mod config;
pub mod core;

pub use classifier::HeuristicRegionClassifier;
pub use self::config::ClassifierThresholds;
pub use self::core::{Classification, ClassificationRule, RegionClassifier};
