//! Pointer drag gestures.
//!
//! A [`DragSource`] turns pointer down → move → up sequences into deltas
//! relative to the previous pointer position. Anything that wants to be
//! dragged holds a `DragSource` and implements [`DragHost`] to receive the
//! deltas.
//!
//! ```text
//!     Idle ──begin(primary)──▶ Dragging ──end() / leave()──▶ Idle
//!                               │    ▲
//!                               └────┘ move_to(): emit delta
//! ```

use crate::geometry::{Delta, Point, Rect};

/// Pointer button that initiated a press.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Auxiliary,
}

/// Receiver of drag deltas.
pub trait DragHost {
    fn on_drag(&mut self, delta: Delta);
}

/// Gesture state.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Last scroll-adjusted pointer position.
        last: Point,
    },
}

/// Converts pointer events into drag deltas.
///
/// Positions passed in are client (viewport) coordinates; the source adds
/// the current scroll offset to get page coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DragSource {
    state: DragState,
    scroll: Point,
}

impl DragSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Update the document scroll offset added to client coordinates.
    pub fn set_scroll(&mut self, scroll: Point) {
        self.scroll = scroll;
    }

    /// Pointer pressed. Starts (or restarts) a drag for the primary button;
    /// any other button ends the current drag instead.
    ///
    /// Returns whether the source is now dragging.
    pub fn begin(&mut self, client: Point, button: PointerButton) -> bool {
        if button != PointerButton::Primary {
            self.end();
            return false;
        }
        self.state = DragState::Dragging {
            last: client.offset(self.scroll),
        };
        true
    }

    /// Pointer moved. Returns the delta from the previous position while
    /// dragging, `None` otherwise.
    pub fn move_to(&mut self, client: Point) -> Option<Delta> {
        let DragState::Dragging { last } = self.state else {
            return None;
        };
        let position = client.offset(self.scroll);
        self.state = DragState::Dragging { last: position };
        let delta = Delta::between(last, position);
        tracing::trace!(dx = delta.dx, dy = delta.dy, "drag delta");
        Some(delta)
    }

    /// Like [`move_to`](Self::move_to), forwarding the delta to `host`.
    /// Returns whether a delta was delivered.
    pub fn drive(&mut self, client: Point, host: &mut impl DragHost) -> bool {
        match self.move_to(client) {
            Some(delta) => {
                host.on_drag(delta);
                true
            }
            None => false,
        }
    }

    /// Pointer released.
    pub fn end(&mut self) {
        self.state = DragState::Idle;
    }

    /// Pointer left the tracking element whose page box is `bounds`.
    ///
    /// Ends the drag when the scroll-adjusted pointer is on or beyond an
    /// edge of `bounds`; a leave event fired while the pointer is still
    /// inside (entering a child element) is ignored. Returns whether the
    /// drag was ended.
    pub fn leave(&mut self, client: Point, bounds: &Rect) -> bool {
        let p = client.offset(self.scroll);
        let outside =
            p.x <= bounds.x || p.x >= bounds.right() || p.y <= bounds.y || p.y >= bounds.bottom();
        if outside && self.is_dragging() {
            tracing::debug!(x = p.x, y = p.y, "pointer left drag bounds, ending drag");
            self.end();
            return true;
        }
        false
    }
}
