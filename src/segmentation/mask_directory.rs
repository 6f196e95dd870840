use std::path::{Path, PathBuf};

use image::RgbImage;
use tracing::{debug, info};

use super::Segmenter;
use crate::error::SegmenterError;
use crate::pipeline::types::Mask;

const MASK_EXTENSIONS: [&str; 5] = ["png", "bmp", "tif", "tiff", "pgm"];

/// Reads masks exported by an external segmentation model.
///
/// Every lossless image in the directory is one mask; any non-zero luma marks a
/// member pixel. Masks are yielded in file-name order.
pub struct MaskDirectorySegmenter {
    directory: PathBuf,
}

impl MaskDirectorySegmenter {
    pub fn new<P: Into<PathBuf>>(directory: P) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    fn mask_paths(&self) -> Result<Vec<PathBuf>, SegmenterError> {
        let entries = std::fs::read_dir(&self.directory).map_err(|e| {
            SegmenterError::new(format!(
                "Failed to read mask directory {}: {}",
                self.directory.display(),
                e
            ))
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(SegmenterError::new)?.path();
            if path.is_file() && has_mask_extension(&path) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

fn has_mask_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| MASK_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

impl Segmenter for MaskDirectorySegmenter {
    fn segment(&self, image: &RgbImage) -> Result<Vec<Mask>, SegmenterError> {
        let paths = self.mask_paths()?;
        let mut masks = Vec::with_capacity(paths.len());

        for path in paths {
            let luma = image::open(&path).map_err(SegmenterError::new)?.to_luma8();
            if luma.dimensions() != image.dimensions() {
                return Err(SegmenterError::new(format!(
                    "Mask {} is {:?}, image is {:?}",
                    path.display(),
                    luma.dimensions(),
                    image.dimensions()
                )));
            }
            debug!("Loaded mask {}", path.display());
            masks.push(Mask::from_luma(&luma));
        }

        info!(
            "Loaded {} masks from {}",
            masks.len(),
            self.directory.display()
        );
        Ok(masks)
    }

    fn name(&self) -> &'static str {
        "MaskDirectorySegmenter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb};
    use uuid::Uuid;

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("masks-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_masks_are_loaded_in_name_order() {
        let dir = scratch_dir();
        let mut top = GrayImage::from_pixel(6, 4, Luma([0]));
        top.put_pixel(0, 0, Luma([255]));
        let mut bottom = GrayImage::from_pixel(6, 4, Luma([0]));
        bottom.put_pixel(5, 3, Luma([1]));
        bottom.save(dir.join("02_bottom.png")).unwrap();
        top.save(dir.join("01_top.png")).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let image = RgbImage::from_pixel(6, 4, Rgb([0, 0, 0]));
        let masks = MaskDirectorySegmenter::new(&dir).segment(&image).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(masks.len(), 2);
        assert!(masks[0].get(0, 0));
        assert!(masks[1].get(5, 3));
        assert_eq!(masks[1].pixel_count(), 1);
    }

    #[test]
    fn test_mismatched_mask_fails() {
        let dir = scratch_dir();
        GrayImage::from_pixel(3, 3, Luma([255]))
            .save(dir.join("mask.png"))
            .unwrap();

        let image = RgbImage::from_pixel(6, 4, Rgb([0, 0, 0]));
        let result = MaskDirectorySegmenter::new(&dir).segment(&image);
        std::fs::remove_dir_all(&dir).unwrap();
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_directory_fails() {
        let image = RgbImage::from_pixel(2, 2, Rgb([0, 0, 0]));
        let missing = std::env::temp_dir().join(format!("absent-{}", Uuid::new_v4()));
        assert!(MaskDirectorySegmenter::new(missing).segment(&image).is_err());
    }
}
