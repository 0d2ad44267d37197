//! Semi-transparent mask drawn around the crop area.

use crate::geometry::{Rect, Size};

/// Fill used for the masked strips.
pub const MASK_FILL: &str = "rgba(0, 0, 0, .5)";

/// The four strips covering `canvas` outside `area`: left, top, bottom,
/// right. Strips are clipped to the canvas and may be empty.
///
/// The top and bottom strips span only the crop area's columns; the left
/// and right strips span the full canvas height.
pub fn mask_regions(canvas: Size, area: &Rect) -> [Rect; 4] {
    let left = area.x.clamp(0.0, canvas.width);
    let right = area.right().clamp(left, canvas.width);
    let top = area.y.clamp(0.0, canvas.height);
    let bottom = area.bottom().clamp(top, canvas.height);
    let columns = right - left;
    [
        Rect::new(0.0, 0.0, left, canvas.height),
        Rect::new(left, 0.0, columns, top),
        Rect::new(left, bottom, columns, canvas.height - bottom),
        Rect::new(right, 0.0, canvas.width - right, canvas.height),
    ]
}

/// Receiver of crop area changes that draws the mask.
pub trait MaskRenderer {
    fn draw_mask(&mut self, area: &Rect);
}

/// Headless mask: remembers the strips last drawn.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MaskLayer {
    canvas: Size,
    area: Option<Rect>,
    regions: [Rect; 4],
}

impl MaskLayer {
    /// Unmasked layer over a canvas of `canvas` size.
    pub fn new(canvas: Size) -> Self {
        Self {
            canvas,
            area: None,
            regions: [Rect::default(); 4],
        }
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    /// The crop area the mask was last drawn around.
    pub fn area(&self) -> Option<Rect> {
        self.area
    }

    /// The strips last drawn. All empty before the first draw.
    pub fn regions(&self) -> [Rect; 4] {
        self.regions
    }

    /// Change the canvas, redrawing around the current area if any.
    pub fn resize(&mut self, canvas: Size) {
        self.canvas = canvas;
        if let Some(area) = self.area {
            self.regions = mask_regions(canvas, &area);
        }
    }

    /// Clear the mask.
    pub fn unmask(&mut self) {
        self.area = None;
        self.regions = [Rect::default(); 4];
    }

    /// Render the canvas, crop area and mask as an SVG document.
    #[cfg(feature = "svg")]
    pub fn to_svg(&self) -> alloc::string::String {
        crate::svg::render_mask_svg(self.canvas, self.area.as_ref())
    }
}

impl MaskRenderer for MaskLayer {
    fn draw_mask(&mut self, area: &Rect) {
        self.area = Some(*area);
        self.regions = mask_regions(self.canvas, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Size = Size::new(400.0, 300.0);

    fn area_of(regions: &[Rect; 4]) -> f64 {
        regions.iter().map(|r| r.width * r.height).sum()
    }

    #[test]
    fn strips_surround_area() {
        let area = Rect::new(100.0, 50.0, 200.0, 150.0);
        let [left, top, bottom, right] = mask_regions(CANVAS, &area);
        assert_eq!(left, Rect::new(0.0, 0.0, 100.0, 300.0));
        assert_eq!(top, Rect::new(100.0, 0.0, 200.0, 50.0));
        assert_eq!(bottom, Rect::new(100.0, 200.0, 200.0, 100.0));
        assert_eq!(right, Rect::new(300.0, 0.0, 100.0, 300.0));
    }

    #[test]
    fn strips_and_area_tile_the_canvas() {
        let area = Rect::new(37.5, 12.25, 101.0, 99.0);
        let masked = area_of(&mask_regions(CANVAS, &area));
        let total = CANVAS.width * CANVAS.height;
        assert!((masked + area.width * area.height - total).abs() < 1e-9);
    }

    #[test]
    fn overflowing_area_clips_to_canvas() {
        let area = Rect::new(350.0, 250.0, 100.0, 100.0);
        let regions = mask_regions(CANVAS, &area);
        for r in regions {
            assert!(r.width >= 0.0 && r.height >= 0.0, "{r:?}");
            assert!(r.right() <= CANVAS.width && r.bottom() <= CANVAS.height, "{r:?}");
        }
        assert_eq!(regions[3].width, 0.0);
    }

    #[test]
    fn layer_tracks_last_draw() {
        let mut layer = MaskLayer::new(CANVAS);
        assert_eq!(layer.area(), None);
        let area = Rect::new(10.0, 10.0, 20.0, 20.0);
        layer.draw_mask(&area);
        assert_eq!(layer.area(), Some(area));
        assert_eq!(layer.regions(), mask_regions(CANVAS, &area));
        layer.unmask();
        assert_eq!(layer.regions(), [Rect::default(); 4]);
    }

    #[test]
    fn resize_redraws_current_area() {
        let mut layer = MaskLayer::new(CANVAS);
        let area = Rect::new(10.0, 10.0, 20.0, 20.0);
        layer.draw_mask(&area);
        let smaller = Size::new(100.0, 50.0);
        layer.resize(smaller);
        assert_eq!(layer.canvas(), smaller);
        assert_eq!(layer.regions(), mask_regions(smaller, &area));
    }
}
