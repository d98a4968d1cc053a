//! The uploaded background raster.

use std::sync::Arc;

use image::RgbaImage;

/// A decoded background image.
///
/// Immutable once constructed; clones share the same pixel buffer. Its
/// dimensions are the dimensions of every composite and export.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pixels: Arc<RgbaImage>,
}

impl SourceImage {
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(pixels),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl From<RgbaImage> for SourceImage {
    fn from(pixels: RgbaImage) -> Self {
        Self::new(pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_clones_share_pixels() {
        let source = SourceImage::new(RgbaImage::from_pixel(4, 3, Rgba([1, 2, 3, 255])));
        let copy = source.clone();
        assert_eq!(copy.dimensions(), (4, 3));
        assert!(std::ptr::eq(source.pixels(), copy.pixels()));
    }
}
