//! Still frames grabbed from the capture source.

use alloc::vec;
use alloc::vec::Vec;

use crate::geometry::{PixelRect, Rect, Size};

/// Bytes per RGBA8 pixel.
const BPP: usize = 4;

/// A captured frame, RGBA8, rows top to bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Still {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Still {
    /// Wrap an RGBA8 buffer. Returns `None` when the buffer length does not
    /// match `width × height × 4`.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        (pixels.len() == width as usize * height as usize * BPP).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    /// A frame filled with one color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = vec![0; count * BPP];
        for px in pixels.chunks_exact_mut(BPP) {
            px.copy_from_slice(&rgba);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA of the pixel at (`x`, `y`), if inside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * BPP;
        let mut px = [0; 4];
        px.copy_from_slice(&self.pixels[i..i + BPP]);
        Some(px)
    }

    /// Copy out the region under `area`, rounded to whole pixels and
    /// clamped to the frame.
    pub fn crop(&self, area: &Rect) -> Still {
        self.crop_pixels(area.to_pixels(self.width, self.height))
    }

    fn crop_pixels(&self, r: PixelRect) -> Still {
        let row_len = r.width as usize * BPP;
        let mut pixels = Vec::with_capacity(row_len * r.height as usize);
        for y in r.y..r.y + r.height {
            let start = (y as usize * self.width as usize + r.x as usize) * BPP;
            pixels.extend_from_slice(&self.pixels[start..start + row_len]);
        }
        Still {
            width: r.width,
            height: r.height,
            pixels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Frame whose pixel at (x, y) is `[x, y, 0, 255]`.
    fn gradient(w: u32, h: u32) -> Still {
        let mut pixels = Vec::new();
        for y in 0..h {
            for x in 0..w {
                pixels.extend_from_slice(&[x as u8, y as u8, 0, 255]);
            }
        }
        Still::from_rgba(w, h, pixels).unwrap()
    }

    #[test]
    fn from_rgba_checks_length() {
        assert!(Still::from_rgba(2, 2, vec![0; 15]).is_none());
        assert!(Still::from_rgba(2, 2, vec![0; 16]).is_some());
    }

    #[test]
    fn crop_copies_region() {
        let still = gradient(10, 8);
        let out = still.crop(&Rect::new(2.0, 3.0, 4.0, 2.0));
        assert_eq!((out.width(), out.height()), (4, 2));
        assert_eq!(out.pixel(0, 0), Some([2, 3, 0, 255]));
        assert_eq!(out.pixel(3, 1), Some([5, 4, 0, 255]));
        assert_eq!(out.pixel(4, 0), None);
    }

    #[test]
    fn crop_rounds_fractional_area() {
        let still = gradient(10, 10);
        let out = still.crop(&Rect::new(1.4, 1.6, 3.2, 2.0));
        assert_eq!((out.width(), out.height()), (4, 2));
        assert_eq!(out.pixel(0, 0), Some([1, 2, 0, 255]));
    }

    #[test]
    fn crop_clamps_to_frame() {
        let still = gradient(10, 10);
        let out = still.crop(&Rect::new(8.0, 8.0, 20.0, 20.0));
        assert_eq!((out.width(), out.height()), (2, 2));
        assert_eq!(out.pixel(1, 1), Some([9, 9, 0, 255]));
    }

    #[test]
    fn filled_frame() {
        let still = Still::filled(3, 2, [1, 2, 3, 4]);
        assert_eq!(still.pixels().len(), 24);
        assert_eq!(still.pixel(2, 1), Some([1, 2, 3, 4]));
    }
}
