//! Constraint pipeline for crop pane mutations.
//!
//! Every mutation of the crop pane is expressed as a [`PendingTransform`]
//! and run through three stages, in this order:
//!
//! 1. [`enforce_ratio`] — derive height from width.
//! 2. [`enforce_parent_bounds`] — keep the pane inside its parent.
//! 3. [`enforce_size`] — clamp width and height into [`SizeBounds`].
//!
//! Size bounds run last and always win: when the parent is smaller than the
//! minimum size, the pane keeps its minimum size and overflows the parent.
//!
//! # Example
//!
//! ```
//! use iconic::{PendingTransform, Ratio, Rect, Size, SizeBounds, constraint};
//!
//! let current = Rect::new(50.0, 50.0, 100.0, 100.0);
//! let pending = PendingTransform::default().width(120.0);
//! let out = constraint::apply(
//!     pending,
//!     &current,
//!     Size::new(500.0, 500.0),
//!     "4:3".parse::<Ratio>().unwrap(),
//!     &SizeBounds::default(),
//! );
//!
//! assert_eq!(out.width, Some(120.0));
//! assert_eq!(out.height, Some(90.0));
//! ```

use crate::geometry::{Rect, Size};
use crate::ratio::Ratio;

/// Default minimum width and height, in pixels.
pub const DEFAULT_MIN_SIZE: f64 = 20.0;

/// Minimum and maximum crop pane dimensions.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SizeBounds {
    pub min_width: f64,
    pub min_height: f64,
    /// `None` = unbounded.
    pub max_width: Option<f64>,
    /// `None` = unbounded.
    pub max_height: Option<f64>,
}

impl Default for SizeBounds {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_SIZE,
            min_height: DEFAULT_MIN_SIZE,
            max_width: None,
            max_height: None,
        }
    }
}

impl SizeBounds {
    /// Clamp `width` into `[min_width, max_width]`.
    pub fn clamp_width(&self, width: f64) -> f64 {
        keep_in_bounds(width, self.min_width, self.max_width)
    }

    /// Clamp `height` into `[min_height, max_height]`.
    pub fn clamp_height(&self, height: f64) -> f64 {
        keep_in_bounds(height, self.min_height, self.max_height)
    }
}

/// Partial patch to the crop pane, computed from a gesture before any
/// constraint runs. Absent fields leave the pane unchanged.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PendingTransform {
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl PendingTransform {
    /// Patch that sets every field from `rect`.
    pub fn from_rect(rect: &Rect) -> Self {
        Self {
            left: Some(rect.x),
            top: Some(rect.y),
            width: Some(rect.width),
            height: Some(rect.height),
        }
    }

    pub fn left(mut self, left: f64) -> Self {
        self.left = Some(left);
        self
    }

    pub fn top(mut self, top: f64) -> Self {
        self.top = Some(top);
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.top.is_none() && self.width.is_none() && self.height.is_none()
    }

    /// `rect` with every present field overwritten.
    pub fn applied_to(&self, rect: &Rect) -> Rect {
        Rect {
            x: self.left.unwrap_or(rect.x),
            y: self.top.unwrap_or(rect.y),
            width: self.width.unwrap_or(rect.width),
            height: self.height.unwrap_or(rect.height),
        }
    }
}

/// Run all three constraint stages over `pending`.
///
/// `current` is the pane as last read from its render target; `parent` is
/// the size of the bounding parent.
pub fn apply(
    pending: PendingTransform,
    current: &Rect,
    parent: Size,
    ratio: Ratio,
    bounds: &SizeBounds,
) -> PendingTransform {
    let pending = enforce_ratio(pending, current, ratio);
    let pending = enforce_parent_bounds(pending, current, parent);
    enforce_size(pending, bounds)
}

/// Set `height` from the pending width (or the current width when the
/// transform has none) according to `ratio`. [`Ratio::None`] is a no-op.
pub fn enforce_ratio(mut pending: PendingTransform, current: &Rect, ratio: Ratio) -> PendingTransform {
    let width = pending.width.unwrap_or(current.width);
    if let Some(height) = ratio.height_for(width) {
        pending.height = Some(height);
    }
    pending
}

/// Clamp each present field so the pane stays inside `parent`.
///
/// `left` is bounded by the parent width minus the pane's current width,
/// and `width` by the parent width minus the pane's left edge (the clamped
/// `left` when present, else `current.x`); `top`/`height` likewise on the
/// vertical axis. With a `current` pane at least the minimum size, the
/// size stage cannot then push the right or bottom edge past the parent.
pub fn enforce_parent_bounds(
    mut pending: PendingTransform,
    current: &Rect,
    parent: Size,
) -> PendingTransform {
    if let Some(left) = pending.left {
        pending.left = Some(keep_in_bounds(left, 0.0, Some(parent.width - current.width)));
    }
    if let Some(width) = pending.width {
        let left = pending.left.unwrap_or(current.x);
        pending.width = Some(keep_in_bounds(width, 0.0, Some(parent.width - left)));
    }
    if let Some(top) = pending.top {
        pending.top = Some(keep_in_bounds(top, 0.0, Some(parent.height - current.height)));
    }
    if let Some(height) = pending.height {
        let top = pending.top.unwrap_or(current.y);
        pending.height = Some(keep_in_bounds(height, 0.0, Some(parent.height - top)));
    }
    pending
}

/// Clamp present `width`/`height` fields into `bounds`.
pub fn enforce_size(mut pending: PendingTransform, bounds: &SizeBounds) -> PendingTransform {
    if let Some(width) = pending.width {
        pending.width = Some(bounds.clamp_width(width));
    }
    if let Some(height) = pending.height {
        pending.height = Some(bounds.clamp_height(height));
    }
    pending
}

/// Clamp `value` into `[min, max]`. A maximum below the minimum collapses
/// to the minimum; `None` is unbounded.
fn keep_in_bounds(value: f64, min: f64, max: Option<f64>) -> f64 {
    let value = value.max(min);
    match max {
        Some(max) => value.min(max.max(min)),
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARENT: Size = Size::new(500.0, 500.0);

    fn pane() -> Rect {
        Rect::new(50.0, 50.0, 100.0, 100.0)
    }

    // ── keep_in_bounds ──────────────────────────────────────────────────

    #[test]
    fn keep_in_bounds_clamps_both_ends() {
        assert_eq!(keep_in_bounds(-5.0, 0.0, Some(10.0)), 0.0);
        assert_eq!(keep_in_bounds(15.0, 0.0, Some(10.0)), 10.0);
        assert_eq!(keep_in_bounds(7.0, 0.0, None), 7.0);
    }

    #[test]
    fn keep_in_bounds_inverted_range_collapses_to_min() {
        assert_eq!(keep_in_bounds(50.0, 20.0, Some(-30.0)), 20.0);
    }

    // ── enforce_ratio ───────────────────────────────────────────────────

    #[test]
    fn ratio_none_leaves_height() {
        let p = enforce_ratio(PendingTransform::default().width(80.0), &pane(), Ratio::None);
        assert_eq!(p.height, None);
    }

    #[test]
    fn ratio_square_uses_pending_width() {
        let p = enforce_ratio(PendingTransform::default().width(80.0), &pane(), Ratio::Square);
        assert_eq!(p.height, Some(80.0));
    }

    #[test]
    fn ratio_falls_back_to_current_width() {
        let current = Rect::new(0.0, 0.0, 160.0, 10.0);
        let p = enforce_ratio(PendingTransform::default(), &current, "16:9".parse().unwrap());
        assert_eq!(p.height, Some(90.0));
        assert_eq!(p.width, None);
    }

    // ── enforce_parent_bounds ───────────────────────────────────────────

    #[test]
    fn left_bounded_by_parent_minus_width() {
        let p = enforce_parent_bounds(PendingTransform::default().left(450.0), &pane(), PARENT);
        assert_eq!(p.left, Some(400.0));
        let p = enforce_parent_bounds(PendingTransform::default().left(-3.0), &pane(), PARENT);
        assert_eq!(p.left, Some(0.0));
    }

    #[test]
    fn width_bounded_by_parent_minus_left() {
        let p = enforce_parent_bounds(PendingTransform::default().width(480.0), &pane(), PARENT);
        assert_eq!(p.width, Some(450.0));
    }

    #[test]
    fn growing_up_past_top_edge_keeps_bottom_inside() {
        // NW-style grow: top clamps at 0 and height is bounded from there.
        let current = Rect::new(50.0, 5.0, 100.0, 490.0);
        let pending = PendingTransform::default().top(-20.0).height(515.0);
        let p = enforce_parent_bounds(pending, &current, PARENT);
        assert_eq!(p.top, Some(0.0));
        assert_eq!(p.height, Some(500.0));
    }

    #[test]
    fn shrinking_past_right_edge_stays_inside() {
        // SW drag far right: pending width goes negative, left past the
        // parent. Left is bounded by the current width, not the pending one.
        let current = Rect::new(380.0, 50.0, 100.0, 100.0);
        let out = apply(
            PendingTransform::default().width(-100.0).left(580.0),
            &current,
            PARENT,
            Ratio::None,
            &SizeBounds::default(),
        );
        assert_eq!(out.left, Some(400.0));
        assert_eq!(out.width, Some(DEFAULT_MIN_SIZE));
        assert!(out.applied_to(&current).right() <= PARENT.width);
    }

    #[test]
    fn shrinking_past_bottom_edge_stays_inside() {
        let current = Rect::new(50.0, 380.0, 100.0, 100.0);
        let out = apply(
            PendingTransform::default().height(-100.0).top(580.0),
            &current,
            PARENT,
            Ratio::None,
            &SizeBounds::default(),
        );
        assert_eq!(out.top, Some(400.0));
        assert_eq!(out.height, Some(DEFAULT_MIN_SIZE));
    }

    #[test]
    fn absent_fields_stay_absent() {
        let p = enforce_parent_bounds(PendingTransform::default(), &pane(), PARENT);
        assert!(p.is_empty());
    }

    // ── enforce_size ────────────────────────────────────────────────────

    #[test]
    fn size_applies_minimum_and_maximum() {
        let bounds = SizeBounds {
            max_width: Some(300.0),
            ..SizeBounds::default()
        };
        let p = enforce_size(PendingTransform::default().width(400.0).height(3.0), &bounds);
        assert_eq!(p.width, Some(300.0));
        assert_eq!(p.height, Some(DEFAULT_MIN_SIZE));
    }

    #[test]
    fn size_wins_over_parent() {
        let tiny = Size::new(10.0, 10.0);
        let out = apply(
            PendingTransform::default().width(8.0).height(8.0),
            &Rect::default(),
            tiny,
            Ratio::None,
            &SizeBounds::default(),
        );
        assert_eq!(out.width, Some(20.0));
        assert_eq!(out.height, Some(20.0));
    }

    // ── apply ───────────────────────────────────────────────────────────

    #[test]
    fn ratio_height_is_then_bounded_by_parent() {
        // 4:3 wants height 150 for width 200, but only 100 fits below y=400.
        let current = Rect::new(0.0, 400.0, 100.0, 100.0);
        let out = apply(
            PendingTransform::default().width(200.0),
            &current,
            PARENT,
            "4:3".parse().unwrap(),
            &SizeBounds::default(),
        );
        assert_eq!(out.width, Some(200.0));
        assert_eq!(out.height, Some(100.0));
    }

    #[test]
    fn applied_to_overwrites_present_fields() {
        let r = PendingTransform::default().left(7.0).height(9.0).applied_to(&pane());
        assert_eq!(r, Rect::new(7.0, 50.0, 100.0, 9.0));
    }
}
