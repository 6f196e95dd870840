use image::GrayImage;

/// Binary membership grid for one segment, row-major, same size as the image it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// All-`false` mask.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; (width as usize) * (height as usize)],
        }
    }

    /// Builds a mask by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> bool,
    {
        let mut bits = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                bits.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            bits,
        }
    }

    /// Marks the inclusive rectangle `[x0, x1] x [y0, y1]`, clipped to the mask.
    pub fn from_rect(width: u32, height: u32, x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self::from_fn(width, height, |x, y| x >= x0 && x <= x1 && y >= y0 && y <= y1)
    }

    /// Any non-zero luma value is a member pixel.
    pub fn from_luma(image: &GrayImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            bits: image.pixels().map(|p| p[0] != 0).collect(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.bits[(y as usize) * (self.width as usize) + x as usize]
    }

    pub fn pixel_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.bits.iter().any(|&b| b)
    }

    /// Coordinates `(x, y)` of every member pixel in row-major order.
    pub fn iter_set(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width as usize;
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, &b)| b)
            .map(move |(i, _)| ((i % width) as u32, (i / width) as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_rect_mask_membership() {
        let mask = Mask::from_rect(10, 8, 2, 1, 4, 3);
        assert_eq!(mask.pixel_count(), 9);
        assert!(mask.get(2, 1));
        assert!(mask.get(4, 3));
        assert!(!mask.get(5, 3));
        assert!(!mask.get(100, 100));
        assert_eq!(mask.iter_set().next(), Some((2, 1)));
    }

    #[test]
    fn test_from_luma_treats_nonzero_as_member() {
        let mut gray = GrayImage::from_pixel(4, 4, Luma([0]));
        gray.put_pixel(1, 2, Luma([1]));
        gray.put_pixel(3, 0, Luma([255]));

        let mask = Mask::from_luma(&gray);
        assert_eq!(mask.dimensions(), (4, 4));
        assert_eq!(mask.pixel_count(), 2);
        assert!(mask.get(1, 2));
        assert!(mask.get(3, 0));
        assert!(Mask::empty(4, 4).is_empty());
    }
}
