mod mask_directory;

pub use mask_directory::MaskDirectorySegmenter;

use image::RgbImage;

use crate::error::SegmenterError;
use crate::pipeline::types::Mask;

/// Source of segment masks for an image.
///
/// Masks must match the image's dimensions. Their order is the paint order of the
/// compositor, so implementations should yield them in a stable order.
pub trait Segmenter: Send + Sync {
    fn segment(&self, image: &RgbImage) -> Result<Vec<Mask>, SegmenterError>;
    fn name(&self) -> &'static str;
}

/// Hands back a fixed list of masks.
pub struct PrecomputedSegmenter {
    masks: Vec<Mask>,
}

impl PrecomputedSegmenter {
    pub fn new(masks: Vec<Mask>) -> Self {
        Self { masks }
    }
}

impl Segmenter for PrecomputedSegmenter {
    fn segment(&self, _image: &RgbImage) -> Result<Vec<Mask>, SegmenterError> {
        Ok(self.masks.clone())
    }

    fn name(&self) -> &'static str {
        "PrecomputedSegmenter"
    }
}
