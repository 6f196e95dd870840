use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use tracing::debug;

use crate::error::RasterError;
use crate::pipeline::types::{Mask, Resolution};

/// Styled and blended renderings of one image.
#[derive(Debug, Clone)]
pub struct Composite {
    pub styled: RgbImage,
    pub blended: RgbImage,
}

/// Paints resolved colors over masks and mixes the result with the original.
#[derive(Debug, Clone, Copy)]
pub struct Compositor {
    alpha: f32,
}

impl Compositor {
    /// `alpha` is the weight of the styled image: 0 keeps the original, 1 is fully styled.
    pub fn new(alpha: f32) -> Result<Self, RasterError> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(RasterError::InvalidBlendFactor(alpha));
        }
        Ok(Self { alpha })
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Copies `original` and overwrites every member pixel of each mask with its
    /// resolved color. Masks are applied in order, so later masks win on overlap.
    pub fn stylize<'a, I>(&self, original: &RgbImage, regions: I) -> Result<RgbImage, RasterError>
    where
        I: IntoIterator<Item = (&'a Mask, &'a Resolution)>,
    {
        let mut styled = original.clone();
        for (mask, resolution) in regions {
            if mask.dimensions() != styled.dimensions() {
                return Err(RasterError::DimensionMismatch {
                    expected: styled.dimensions(),
                    found: mask.dimensions(),
                });
            }
            let color = resolution.option.color.to_rgb();
            for (x, y) in mask.iter_set() {
                styled.put_pixel(x, y, color);
            }
        }
        Ok(styled)
    }

    /// `round(original * (1 - alpha) + styled * alpha)` per channel. A styled image of
    /// another size is resampled to the original's size first.
    pub fn blend(&self, original: &RgbImage, styled: &RgbImage) -> Result<RgbImage, RasterError> {
        let (width, height) = original.dimensions();
        let resampled;
        let styled = if styled.dimensions() == original.dimensions() {
            styled
        } else {
            if width == 0 || height == 0 || styled.width() == 0 || styled.height() == 0 {
                return Err(RasterError::DimensionMismatch {
                    expected: original.dimensions(),
                    found: styled.dimensions(),
                });
            }
            debug!(
                "Resampling styled image {:?} to {:?}",
                styled.dimensions(),
                original.dimensions()
            );
            resampled = imageops::resize(styled, width, height, FilterType::Triangle);
            &resampled
        };

        let a = self.alpha as f64;
        let blended = RgbImage::from_fn(width, height, |x, y| {
            let o = original.get_pixel(x, y).0;
            let s = styled.get_pixel(x, y).0;
            Rgb(std::array::from_fn(|c| {
                (o[c] as f64 * (1.0 - a) + s[c] as f64 * a)
                    .round()
                    .clamp(0.0, 255.0) as u8
            }))
        });
        Ok(blended)
    }

    pub fn compose<'a, I>(&self, original: &RgbImage, regions: I) -> Result<Composite, RasterError>
    where
        I: IntoIterator<Item = (&'a Mask, &'a Resolution)>,
    {
        let styled = self.stylize(original, regions)?;
        let blended = self.blend(original, &styled)?;
        Ok(Composite { styled, blended })
    }
}
