//! The constrained rectangle editor behind the crop pane.
//!
//! [`CropEditor`] owns one rectangle (through its [`RenderTarget`]) and
//! guarantees it satisfies the ratio, parent-bounds and size-bounds
//! constraints after every mutation. Each mutation ends with a change
//! notification carrying the rectangle as read back from the target.
//!
//! # Example
//!
//! ```
//! use iconic::{CropEditor, CropOptions, Delta, Observers, PaneBox, Rect, Region};
//!
//! let parent = Rect::new(0.0, 0.0, 500.0, 500.0);
//! let mut editor = CropEditor::initialize(
//!     PaneBox::default(),
//!     parent,
//!     &CropOptions::default(),
//!     Observers::new(),
//! );
//!
//! // 100×100 default pane, centered.
//! assert_eq!(editor.current(), Rect::new(200.0, 200.0, 100.0, 100.0));
//!
//! editor.on_resize(Region::SouthEast, Delta::new(10.0, 5.0));
//! assert_eq!(editor.current(), Rect::new(200.0, 200.0, 110.0, 105.0));
//! ```

use alloc::rc::{Rc, Weak};
use core::time::Duration;

use crate::constraint::{self, PendingTransform, SizeBounds};
use crate::drag::DragHost;
use crate::error::ConfigError;
use crate::geometry::{Delta, Rect};
use crate::observer::{Observers, SubscriptionId};
use crate::options::CropOptions;
use crate::ratio::Ratio;
use crate::region::Region;

/// How often the host should resynchronize the parent bounds.
pub const DEFAULT_RELAYOUT_INTERVAL: Duration = Duration::from_millis(200);

/// The on-screen element the editor positions.
///
/// Coordinates are relative to the parent bounds.
pub trait RenderTarget {
    /// The element's current box.
    fn read(&self) -> Rect;

    /// Write every present field of `patch` onto the element.
    fn write(&mut self, patch: &PendingTransform);

    /// Release display resources held by the element.
    fn release(&mut self) {}
}

/// Headless render target: a rectangle in memory.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PaneBox {
    pub rect: Rect,
}

impl RenderTarget for PaneBox {
    fn read(&self) -> Rect {
        self.rect
    }

    fn write(&mut self, patch: &PendingTransform) {
        self.rect = patch.applied_to(&self.rect);
    }
}

/// Owns the crop rectangle and applies the constraint pipeline.
///
/// Construct with [`initialize`](Self::initialize); consume with
/// [`destroy`](Self::destroy).
#[derive(Debug)]
pub struct CropEditor<T: RenderTarget = PaneBox> {
    target: T,
    parent: Rect,
    ratio: Ratio,
    bounds: SizeBounds,
    changes: Observers<Rect>,
    /// Dropped on destroy, cancelling every [`RelayoutTask`].
    alive: Rc<()>,
}

impl<T: RenderTarget> CropEditor<T> {
    /// Place the pane centered in `parent` at the options' default size,
    /// run it through the constraint pipeline and notify `changes`.
    ///
    /// A parent smaller than the minimum size is not an error: the pane
    /// keeps its minimum size.
    pub fn initialize(target: T, parent: Rect, options: &CropOptions, changes: Observers<Rect>) -> Self {
        let bounds = options.size_bounds();
        if parent.width < bounds.min_width || parent.height < bounds.min_height {
            tracing::warn!(
                parent_width = parent.width,
                parent_height = parent.height,
                min_width = bounds.min_width,
                min_height = bounds.min_height,
                "parent is smaller than the minimum crop size"
            );
        }

        let mut editor = Self {
            target,
            parent,
            ratio: options.ratio,
            bounds,
            changes,
            alive: Rc::new(()),
        };
        let placement = PendingTransform {
            left: Some(parent.width / 2.0 - options.default_width / 2.0),
            top: Some(parent.height / 2.0 - options.default_height / 2.0),
            width: Some(options.default_width),
            height: Some(options.default_height),
        };
        tracing::debug!(?parent, ratio = %editor.ratio, "crop editor initialized");
        editor.refresh(placement);
        editor
    }

    /// The pane's current box, relative to the parent.
    pub fn current(&self) -> Rect {
        self.target.read()
    }

    /// The parent bounds, in page coordinates.
    pub fn parent(&self) -> Rect {
        self.parent
    }

    pub fn ratio(&self) -> Ratio {
        self.ratio
    }

    pub fn size_bounds(&self) -> SizeBounds {
        self.bounds
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Parse and set the ratio. Takes effect on the next refresh.
    ///
    /// On error the previous ratio stays active.
    pub fn set_ratio(&mut self, ratio: &str) -> Result<(), ConfigError> {
        match ratio.parse::<Ratio>() {
            Ok(parsed) => {
                self.set_ratio_value(parsed);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%err, previous = %self.ratio, "ratio rejected");
                Err(err)
            }
        }
    }

    /// Set an already parsed ratio. Takes effect on the next refresh.
    pub fn set_ratio_value(&mut self, ratio: Ratio) {
        tracing::debug!(from = %self.ratio, to = %ratio, "ratio changed");
        self.ratio = ratio;
    }

    /// Move the pane's top-left corner. `None` leaves that axis unchanged.
    pub fn move_to(&mut self, x: Option<f64>, y: Option<f64>) {
        self.refresh(PendingTransform {
            left: x,
            top: y,
            ..PendingTransform::default()
        });
    }

    /// Resize from the corner handle in `region`.
    ///
    /// The patch is computed from a fresh read of the pane so deltas never
    /// accumulate into stale state.
    pub fn on_resize(&mut self, region: Region, delta: Delta) {
        let current = self.target.read();
        tracing::trace!(%region, dx = delta.dx, dy = delta.dy, "resize");
        self.refresh(region.resize_transform(&current, delta));
    }

    /// Run `pending` through the constraint pipeline, write the result and
    /// notify subscribers with the pane as read back from the target.
    ///
    /// An empty transform still re-validates the ratio and still notifies.
    pub fn refresh(&mut self, pending: PendingTransform) {
        let current = self.target.read();
        let patch = constraint::apply(pending, &current, self.parent.size(), self.ratio, &self.bounds);
        tracing::trace!(?pending, ?patch, "constraint pipeline");
        if !patch.is_empty() {
            self.target.write(&patch);
        }
        let rect = self.target.read();
        self.changes.notify(&rect);
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&Rect) + 'static) -> SubscriptionId {
        self.changes.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.changes.unsubscribe(id)
    }

    /// Re-snap the parent bounds to `parent`.
    ///
    /// When the parent's size changed, the pane is re-run through the
    /// pipeline so it fits the new bounds.
    pub fn relayout(&mut self, parent: Rect) {
        if parent == self.parent {
            return;
        }
        let resized = parent.size() != self.parent.size();
        tracing::debug!(from = ?self.parent, to = ?parent, "relayout");
        self.parent = parent;
        if resized {
            let current = self.target.read();
            self.refresh(PendingTransform::from_rect(&current));
        }
    }

    /// A relayout timer tied to this editor's lifetime.
    pub fn schedule_relayout(&self, interval: Duration) -> RelayoutTask {
        RelayoutTask {
            interval,
            elapsed: Duration::ZERO,
            editor: Rc::downgrade(&self.alive),
        }
    }

    /// Tear down: cancel relayout tasks, drop subscribers and release the
    /// render target.
    pub fn destroy(mut self) {
        self.changes.clear();
        self.target.release();
        tracing::debug!("crop editor destroyed");
    }
}

impl<T: RenderTarget> DragHost for CropEditor<T> {
    /// Drag of the pane body: move by the delta.
    fn on_drag(&mut self, delta: Delta) {
        let current = self.target.read();
        self.move_to(Some(current.x + delta.dx), Some(current.y + delta.dy));
    }
}

/// Host-driven timer that says when to call [`CropEditor::relayout`].
///
/// Cancelled permanently once its editor is destroyed or dropped.
#[derive(Clone, Debug)]
pub struct RelayoutTask {
    interval: Duration,
    elapsed: Duration,
    editor: Weak<()>,
}

impl RelayoutTask {
    pub fn is_cancelled(&self) -> bool {
        self.editor.strong_count() == 0
    }

    /// Advance by `elapsed`. Returns `true` when a relayout is due.
    pub fn poll(&mut self, elapsed: Duration) -> bool {
        if self.is_cancelled() {
            return false;
        }
        self.elapsed += elapsed;
        if self.elapsed < self.interval {
            return false;
        }
        self.elapsed = Duration::ZERO;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    const EPS: f64 = 1e-9;

    fn no_ratio() -> CropOptions {
        CropOptions::default()
    }

    /// Editor over a 500×500 parent with the pane at 50,50 100×100.
    fn editor_with(options: &CropOptions) -> CropEditor {
        let mut editor = CropEditor::initialize(
            PaneBox::default(),
            Rect::new(0.0, 0.0, 500.0, 500.0),
            options,
            Observers::new(),
        );
        editor.refresh(PendingTransform::from_rect(&Rect::new(50.0, 50.0, 100.0, 100.0)));
        editor
    }

    fn recorder(editor: &mut CropEditor) -> Rc<RefCell<Vec<Rect>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        editor.subscribe(move |r| sink.borrow_mut().push(*r));
        seen
    }

    // ── initialize ──────────────────────────────────────────────────────

    #[test]
    fn initialize_centers_and_notifies_once() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut changes = Observers::new();
        let sink = Rc::clone(&seen);
        changes.subscribe(move |r: &Rect| sink.borrow_mut().push(*r));

        let editor = CropEditor::initialize(
            PaneBox::default(),
            Rect::new(0.0, 0.0, 400.0, 300.0),
            &CropOptions::default(),
            changes,
        );
        let expected = Rect::new(150.0, 100.0, 100.0, 100.0);
        assert_eq!(editor.current(), expected);
        assert_eq!(*seen.borrow(), [expected]);
    }

    #[test]
    fn initialize_applies_ratio() {
        let options = CropOptions::default().ratio("4:3".parse().unwrap()).default_size(200.0, 10.0);
        let editor = CropEditor::initialize(
            PaneBox::default(),
            Rect::new(0.0, 0.0, 400.0, 300.0),
            &options,
            Observers::new(),
        );
        let r = editor.current();
        assert_eq!(r.width, 200.0);
        assert_eq!(r.height, 150.0);
    }

    #[test]
    fn initialize_in_tiny_parent_keeps_minimum_size() {
        let editor = CropEditor::initialize(
            PaneBox::default(),
            Rect::new(0.0, 0.0, 10.0, 10.0),
            &no_ratio(),
            Observers::new(),
        );
        let r = editor.current();
        assert_eq!((r.width, r.height), (20.0, 20.0));
        assert_eq!((r.x, r.y), (0.0, 0.0));
    }

    // ── resize ──────────────────────────────────────────────────────────

    #[test]
    fn resize_south_east() {
        let mut editor = editor_with(&no_ratio());
        editor.on_resize(Region::SouthEast, Delta::new(10.0, 5.0));
        assert_eq!(editor.current(), Rect::new(50.0, 50.0, 110.0, 105.0));
    }

    #[test]
    fn resize_north_west() {
        let mut editor = editor_with(&no_ratio());
        editor.on_resize(Region::NorthWest, Delta::new(10.0, 10.0));
        assert_eq!(editor.current(), Rect::new(60.0, 60.0, 90.0, 90.0));
    }

    #[test]
    fn resize_reads_fresh_state_each_time() {
        let mut editor = editor_with(&no_ratio());
        for _ in 0..5 {
            editor.on_resize(Region::SouthEast, Delta::new(2.0, 1.0));
        }
        assert_eq!(editor.current(), Rect::new(50.0, 50.0, 110.0, 105.0));
    }

    #[test]
    fn resize_below_minimum_clamps() {
        let mut editor = editor_with(&no_ratio());
        editor.on_resize(Region::SouthEast, Delta::new(-95.0, -95.0));
        let r = editor.current();
        assert_eq!((r.width, r.height), (20.0, 20.0));
    }

    #[test]
    fn resize_square_follows_width() {
        let mut editor = editor_with(&no_ratio().ratio(Ratio::Square));
        editor.on_resize(Region::SouthEast, Delta::new(30.0, -40.0));
        let r = editor.current();
        assert_eq!(r.width, 130.0);
        assert_eq!(r.height, 130.0);
    }

    // ── move / drag ─────────────────────────────────────────────────────

    #[test]
    fn move_to_single_axis() {
        let mut editor = editor_with(&no_ratio());
        editor.move_to(None, Some(80.0));
        assert_eq!(editor.current(), Rect::new(50.0, 80.0, 100.0, 100.0));
    }

    #[test]
    fn drag_translates_and_stays_inside_parent() {
        let mut editor = editor_with(&no_ratio());
        editor.on_drag(Delta::new(25.0, -10.0));
        assert_eq!(editor.current(), Rect::new(75.0, 40.0, 100.0, 100.0));

        editor.on_drag(Delta::new(1000.0, -1000.0));
        assert_eq!(editor.current(), Rect::new(400.0, 0.0, 100.0, 100.0));
    }

    // ── ratio ───────────────────────────────────────────────────────────

    #[test]
    fn set_ratio_applies_on_refresh() {
        let mut editor = editor_with(&no_ratio());
        editor.set_ratio("4:3").unwrap();
        assert_eq!(editor.current().height, 100.0);
        editor.refresh(PendingTransform::default());
        assert_eq!(editor.current().height, 75.0);
    }

    #[test]
    fn malformed_ratio_keeps_previous() {
        let mut editor = editor_with(&no_ratio().ratio(Ratio::Square));
        assert_eq!(
            editor.set_ratio("7"),
            Err(ConfigError::UnknownRatio("7".into()))
        );
        assert_eq!(editor.ratio(), Ratio::Square);
    }

    #[test]
    fn ratio_none_leaves_height_free() {
        let mut editor = editor_with(&no_ratio().ratio(Ratio::Square));
        editor.set_ratio("none").unwrap();
        editor.on_resize(Region::SouthEast, Delta::new(0.0, 33.0));
        assert_eq!(editor.current().height, 133.0);
    }

    // ── refresh ─────────────────────────────────────────────────────────

    #[test]
    fn empty_refresh_is_idempotent_and_notifies() {
        let mut editor = editor_with(&no_ratio().ratio("16:9".parse().unwrap()));
        let seen = recorder(&mut editor);
        editor.refresh(PendingTransform::default());
        editor.refresh(PendingTransform::default());
        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], seen[1]);
        assert!((seen[0].height - seen[0].width * 9.0 / 16.0).abs() < EPS);
    }

    #[test]
    fn notification_reports_post_constraint_rect() {
        let mut editor = editor_with(&no_ratio());
        let seen = recorder(&mut editor);
        editor.move_to(Some(-40.0), None);
        assert_eq!(*seen.borrow(), [Rect::new(0.0, 50.0, 100.0, 100.0)]);
    }

    // ── relayout ────────────────────────────────────────────────────────

    #[test]
    fn relayout_refits_to_smaller_parent() {
        let mut editor = editor_with(&no_ratio());
        editor.move_to(Some(380.0), Some(380.0));
        editor.relayout(Rect::new(0.0, 0.0, 300.0, 300.0));
        let r = editor.current();
        assert!(r.right() <= 300.0 && r.bottom() <= 300.0, "{r:?}");
    }

    #[test]
    fn relayout_same_size_moves_parent_only() {
        let mut editor = editor_with(&no_ratio());
        let seen = recorder(&mut editor);
        editor.relayout(Rect::new(30.0, 40.0, 500.0, 500.0));
        assert_eq!(editor.parent(), Rect::new(30.0, 40.0, 500.0, 500.0));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn relayout_task_fires_on_interval() {
        let editor = editor_with(&no_ratio());
        let mut task = editor.schedule_relayout(Duration::from_millis(200));
        assert!(!task.poll(Duration::from_millis(150)));
        assert!(task.poll(Duration::from_millis(60)));
        assert!(!task.poll(Duration::from_millis(10)));
    }

    #[test]
    fn destroy_cancels_relayout_task() {
        let editor = editor_with(&no_ratio());
        let mut task = editor.schedule_relayout(DEFAULT_RELAYOUT_INTERVAL);
        editor.destroy();
        assert!(task.is_cancelled());
        assert!(!task.poll(Duration::from_secs(10)));
    }

    #[test]
    fn destroy_releases_target() {
        #[derive(Default)]
        struct Tracked {
            rect: Rect,
            released: Rc<RefCell<bool>>,
        }
        impl RenderTarget for Tracked {
            fn read(&self) -> Rect {
                self.rect
            }
            fn write(&mut self, patch: &PendingTransform) {
                self.rect = patch.applied_to(&self.rect);
            }
            fn release(&mut self) {
                *self.released.borrow_mut() = true;
            }
        }

        let released = Rc::new(RefCell::new(false));
        let target = Tracked {
            released: Rc::clone(&released),
            ..Tracked::default()
        };
        let editor = CropEditor::initialize(
            target,
            Rect::new(0.0, 0.0, 100.0, 100.0),
            &no_ratio(),
            Observers::new(),
        );
        editor.destroy();
        assert!(*released.borrow());
    }
}
