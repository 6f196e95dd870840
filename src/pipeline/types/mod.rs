mod mask;
mod region_label;
mod style_option;

pub use mask::Mask;
pub use region_label::RegionLabel;
pub use style_option::{HexColor, Resolution, StyleOption};
