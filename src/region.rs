//! Compass regions of the crop pane's corner handles and the edge
//! operations each one performs.

use core::fmt;

use crate::constraint::PendingTransform;
use crate::geometry::{Delta, Point, Rect};

/// Which corner handle produced a resize delta.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    NorthEast,
    SouthEast,
    NorthWest,
    SouthWest,
}

/// Sign multipliers applied to a delta for each pane field.
///
/// `0` means the field is untouched by this region. `width` and `left`
/// scale `dx`; `height` and `top` scale `dy`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EdgeOps {
    pub width: i8,
    pub height: i8,
    pub top: i8,
    pub left: i8,
}

impl Region {
    /// All regions, in the order handles are attached.
    pub const ALL: [Self; 4] = [
        Self::NorthEast,
        Self::SouthEast,
        Self::NorthWest,
        Self::SouthWest,
    ];

    /// The edge-operation table.
    ///
    /// ```text
    ///          width  height  top  left
    ///     NE    +dx    -dy    +dy   .
    ///     SE    +dx    +dy     .    .
    ///     NW    -dx    -dy    +dy  +dx
    ///     SW    -dx    +dy     .   +dx
    /// ```
    ///
    /// A region that moves `top` or `left` anchors the opposite edge.
    pub const fn edge_ops(self) -> EdgeOps {
        match self {
            Self::NorthEast => EdgeOps {
                width: 1,
                height: -1,
                top: 1,
                left: 0,
            },
            Self::SouthEast => EdgeOps {
                width: 1,
                height: 1,
                top: 0,
                left: 0,
            },
            Self::NorthWest => EdgeOps {
                width: -1,
                height: -1,
                top: 1,
                left: 1,
            },
            Self::SouthWest => EdgeOps {
                width: -1,
                height: 1,
                top: 0,
                left: 1,
            },
        }
    }

    /// Short lowercase name (`ne`, `se`, `nw`, `sw`).
    pub const fn name(self) -> &'static str {
        match self {
            Self::NorthEast => "ne",
            Self::SouthEast => "se",
            Self::NorthWest => "nw",
            Self::SouthWest => "sw",
        }
    }

    /// Where this region's handle sits on `pane`.
    pub fn corner(self, pane: &Rect) -> Point {
        let [ne, se, nw, sw] = pane.corners();
        match self {
            Self::NorthEast => ne,
            Self::SouthEast => se,
            Self::NorthWest => nw,
            Self::SouthWest => sw,
        }
    }

    /// Absolute patch for dragging this region's handle by `delta`,
    /// computed from the pane as it currently is.
    pub fn resize_transform(self, current: &Rect, delta: Delta) -> PendingTransform {
        let ops = self.edge_ops();
        let scaled = |sign: i8, d: f64| f64::from(sign) * d;
        let mut t = PendingTransform::default();
        if ops.width != 0 {
            t.width = Some(current.width + scaled(ops.width, delta.dx));
        }
        if ops.height != 0 {
            t.height = Some(current.height + scaled(ops.height, delta.dy));
        }
        if ops.top != 0 {
            t.top = Some(current.y + scaled(ops.top, delta.dy));
        }
        if ops.left != 0 {
            t.left = Some(current.x + scaled(ops.left, delta.dx));
        }
        t
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pane() -> Rect {
        Rect::new(50.0, 50.0, 100.0, 100.0)
    }

    #[test]
    fn south_east_grows_with_delta() {
        let t = Region::SouthEast.resize_transform(&pane(), Delta::new(10.0, 5.0));
        assert_eq!(t, PendingTransform::default().width(110.0).height(105.0));
    }

    #[test]
    fn north_west_moves_origin_and_shrinks() {
        let t = Region::NorthWest.resize_transform(&pane(), Delta::new(10.0, 10.0));
        assert_eq!(
            t,
            PendingTransform::default()
                .left(60.0)
                .top(60.0)
                .width(90.0)
                .height(90.0)
        );
    }

    #[test]
    fn north_east_raises_top_and_grows_width() {
        let t = Region::NorthEast.resize_transform(&pane(), Delta::new(4.0, -6.0));
        assert_eq!(t, PendingTransform::default().width(104.0).top(44.0).height(106.0));
    }

    #[test]
    fn south_west_anchors_right_edge() {
        let t = Region::SouthWest.resize_transform(&pane(), Delta::new(-8.0, 3.0));
        assert_eq!(t, PendingTransform::default().left(42.0).width(108.0).height(103.0));
        let r = t.applied_to(&pane());
        assert_eq!(r.right(), pane().right());
    }

    #[test]
    fn moving_regions_anchor_opposite_edges() {
        let d = Delta::new(7.0, -9.0);
        for region in Region::ALL {
            let r = region.resize_transform(&pane(), d).applied_to(&pane());
            let ops = region.edge_ops();
            if ops.left != 0 {
                assert_eq!(r.right(), pane().right(), "{region}");
            } else {
                assert_eq!(r.x, pane().x, "{region}");
            }
            if ops.top != 0 {
                assert_eq!(r.bottom(), pane().bottom(), "{region}");
            } else {
                assert_eq!(r.y, pane().y, "{region}");
            }
        }
    }

    #[test]
    fn corner_positions() {
        let p = pane();
        assert_eq!(Region::NorthWest.corner(&p), Point::new(50.0, 50.0));
        assert_eq!(Region::SouthEast.corner(&p), Point::new(150.0, 150.0));
    }
}
