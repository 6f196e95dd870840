pub mod image;
pub mod style;

pub use self::image::{Composite, Compositor, HeuristicRegionClassifier, RegionClassifier};
pub use style::{StyleCatalog, StyleResolver};
