use image::RgbImage;
use serde::Serialize;

use crate::error::RasterError;
use crate::pipeline::types::Mask;

const ASPECT_EPSILON: f64 = 1e-5;

/// Shape, position and color statistics of one non-empty mask.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionStats {
    pub image_height: u32,
    pub image_width: u32,
    pub min_row: u32,
    pub max_row: u32,
    pub min_col: u32,
    pub max_col: u32,
    pub box_height: u32,
    pub box_width: u32,
    pub box_area: u64,
    pub pixel_count: u64,
    /// Mask pixels over total image pixels.
    pub area_ratio: f64,
    /// Box width over box height (plus a small epsilon).
    pub aspect: f64,
    /// Box midpoints normalized by image height and width, in [0, 1].
    pub center_row: f64,
    pub center_col: f64,
    /// Per-channel mean under the mask, in image channel order.
    pub mean_color: [f64; 3],
}

impl RegionStats {
    pub fn image_area(&self) -> f64 {
        self.image_height as f64 * self.image_width as f64
    }

    /// Box height as a fraction of image height.
    pub fn height_fraction(&self) -> f64 {
        self.box_height as f64 / self.image_height as f64
    }
}

/// Measures `mask` against `image`. `Ok(None)` means the mask has no set pixels.
pub fn extract_region_stats(
    mask: &Mask,
    image: &RgbImage,
) -> Result<Option<RegionStats>, RasterError> {
    if mask.dimensions() != image.dimensions() {
        return Err(RasterError::DimensionMismatch {
            expected: image.dimensions(),
            found: mask.dimensions(),
        });
    }

    let (width, height) = image.dimensions();
    let mut min_row = u32::MAX;
    let mut max_row = 0u32;
    let mut min_col = u32::MAX;
    let mut max_col = 0u32;
    let mut count = 0u64;
    let mut sums = [0u64; 3];

    for (x, y) in mask.iter_set() {
        min_row = min_row.min(y);
        max_row = max_row.max(y);
        min_col = min_col.min(x);
        max_col = max_col.max(x);
        count += 1;

        let px = image.get_pixel(x, y);
        for (sum, channel) in sums.iter_mut().zip(px.0) {
            *sum += channel as u64;
        }
    }

    if count == 0 {
        return Ok(None);
    }

    let h = height as f64;
    let w = width as f64;
    let box_height = max_row - min_row + 1;
    let box_width = max_col - min_col + 1;

    Ok(Some(RegionStats {
        image_height: height,
        image_width: width,
        min_row,
        max_row,
        min_col,
        max_col,
        box_height,
        box_width,
        box_area: box_height as u64 * box_width as u64,
        pixel_count: count,
        area_ratio: count as f64 / (h * w),
        aspect: box_width as f64 / (box_height as f64 + ASPECT_EPSILON),
        center_row: (min_row + max_row) as f64 / 2.0 / h,
        center_col: (min_col + max_col) as f64 / 2.0 / w,
        mean_color: sums.map(|s| s as f64 / count as f64),
    }))
}
