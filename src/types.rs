// Core value types shared by the engine, the rasterizer and the window.

use image::{GrayImage, Luma};

/// Packed RGB image, one `0x00RRGGBB` word per pixel (what minifb shows).
/// Used both as the source bitmap and as the screen buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>, // length = width * height
}

impl FrameBuffer {
    /// A frame of the given size filled with one color.
    pub fn filled(width: usize, height: usize, color: u32) -> Self {
        Self { width, height, pixels: vec![color; width * height] }
    }

    /// Pack an 8-bit RGB image.
    pub fn from_rgb(img: &image::RgbImage) -> Self {
        let (w, h) = img.dimensions();
        let pixels = img
            .pixels()
            .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
            .collect();
        Self { width: w as usize, height: h as usize, pixels }
    }

    /// Dimensions in the signed form `MaskEngine::finalize` takes.
    /// Saturates for frames too large to describe as `i32`.
    pub fn dimensions_i32(&self) -> (i32, i32) {
        let w = i32::try_from(self.width).unwrap_or(i32::MAX);
        let h = i32::try_from(self.height).unwrap_or(i32::MAX);
        (w, h)
    }
}

/// A point in source-image pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x as f32, y as f32)
    }
}

/// Value of a fully masked (editable) pixel.
pub const MASKED: u8 = 255;
/// Value of an unmasked (keep-as-is) pixel.
pub const UNMASKED: u8 = 0;

/// Grayscale inpainting mask: 255 = white/editable, 0 = black/keep.
/// In-between values only appear on anti-aliased stroke edges.
/// Every pixel is opaque; there is no alpha channel to leave undefined.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskBitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>, // row-major, length = width * height
}

impl MaskBitmap {
    /// All-black mask (nothing will be regenerated).
    pub fn unmasked(width: u32, height: u32) -> Self {
        Self { width, height, pixels: vec![UNMASKED; width as usize * height as usize] }
    }

    pub(crate) fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self { width, height, pixels }
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

    /// Row-major luminance values.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Pixel at (x, y), or `None` outside the bitmap.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// True when no pixel carries any stroke coverage.
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&v| v == UNMASKED)
    }

    /// Number of pixels at full coverage.
    pub fn masked_count(&self) -> usize {
        self.pixels.iter().filter(|&&v| v == MASKED).count()
    }

    /// Copy into an `image` grayscale buffer (for saving as PNG).
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            Luma([self.pixels[y as usize * self.width as usize + x as usize]])
        })
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}
