//! SVG rendering of the crop mask.
//!
//! Draws the still's outline, the four masked strips and the crop area
//! with its corner handles, scaled to fit a fixed panel.
//!
//! # Example
//!
//! ```
//! use iconic::{MaskLayer, MaskRenderer, Rect, Size};
//!
//! let mut mask = MaskLayer::new(Size::new(400.0, 300.0));
//! mask.draw_mask(&Rect::new(100.0, 50.0, 200.0, 200.0));
//!
//! let svg = mask.to_svg();
//! assert!(svg.starts_with("<svg"));
//! ```

use alloc::format;
use alloc::string::String;

use crate::geometry::{Rect, Size};
use crate::mask::{MASK_FILL, mask_regions};
use crate::region::Region;

/// Maximum pixel width of the rendered panel.
const MAX_PANEL_W: f64 = 400.0;
/// Maximum pixel height of the rendered panel.
const MAX_PANEL_H: f64 = 300.0;
/// Margin around the panel.
const MARGIN: f64 = 20.0;
/// Side of a drawn corner handle.
const HANDLE: f64 = 8.0;

/// Render a complete SVG document of `canvas` masked around `area`.
/// With no area, only the canvas outline is drawn.
pub fn render_mask_svg(canvas: Size, area: Option<&Rect>) -> String {
    let scale = scale_to_fit(canvas);
    let total_w = canvas.width * scale + 2.0 * MARGIN;
    let total_h = canvas.height * scale + 2.0 * MARGIN;

    let mut svg = String::with_capacity(2048);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    ));
    svg.push('\n');

    svg.push_str(
        r##"<style>
  .canvas { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .crop { fill: none; stroke: #2c6faa; stroke-width: 1.5; }
  .handle { fill: #fff; stroke: #000; stroke-width: 1; }
  @media (prefers-color-scheme: dark) {
    .canvas { fill: #2d2d2d; stroke: #555; }
    .crop { stroke: #5a9fd4; }
  }
</style>
"##,
    );

    push_rect(&mut svg, &Rect::from_size(canvas), scale, r#"class="canvas""#);

    if let Some(area) = area {
        let fill = format!(r#"fill="{MASK_FILL}""#);
        for strip in mask_regions(canvas, area) {
            if strip.width > 0.0 && strip.height > 0.0 {
                push_rect(&mut svg, &strip, scale, &fill);
            }
        }
        push_rect(&mut svg, area, scale, r#"class="crop""#);
        for region in Region::ALL {
            let c = region.corner(area);
            let marker = Rect::centered_square(c, HANDLE / scale);
            push_rect(&mut svg, &marker, scale, r#"class="handle""#);
        }
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" font-size="11" fill="{}">{}</text>"#,
            MARGIN,
            MARGIN - 6.0,
            "#666",
            escape_xml(&format!(
                "crop {:.0}×{:.0} at ({:.0}, {:.0})",
                area.width, area.height, area.x, area.y
            ))
        ));
        svg.push('\n');
    }

    svg.push_str("</svg>\n");
    svg
}

fn push_rect(svg: &mut String, rect: &Rect, scale: f64, attrs: &str) {
    svg.push_str(&format!(
        r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" {attrs}/>"#,
        MARGIN + rect.x * scale,
        MARGIN + rect.y * scale,
        rect.width * scale,
        rect.height * scale,
    ));
    svg.push('\n');
}

/// Scale factor that fits `size` into the panel, never above 1.
fn scale_to_fit(size: Size) -> f64 {
    if size.width <= 0.0 || size.height <= 0.0 {
        return 1.0;
    }
    (MAX_PANEL_W / size.width).min(MAX_PANEL_H / size.height).min(1.0)
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
