//! Crop UI over a still: wires pointer gestures to the editor and forwards
//! its change events to the mask and the crop position store.

use alloc::rc::Rc;
use core::cell::{Cell, RefCell};
use core::time::Duration;

use crate::constraint::PendingTransform;
use crate::drag::{DragSource, PointerButton};
use crate::editor::{CropEditor, DEFAULT_RELAYOUT_INTERVAL, PaneBox, RelayoutTask, RenderTarget};
use crate::error::ConfigError;
use crate::geometry::{Point, Rect};
use crate::handle::HandleSet;
use crate::mask::{MaskLayer, MaskRenderer};
use crate::observer::{Observers, SubscriptionId};
use crate::options::CropOptions;
use crate::region::Region;
use crate::still::Still;

/// What a pointer press landed on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerTarget {
    /// The pane body: drags move the pane.
    Pane,
    /// A corner handle: drags resize from that corner.
    Handle(Region),
}

/// Crop pane, handles and mask over one still.
///
/// Pointer positions are client coordinates; the scroll offset set with
/// [`set_scroll`](Self::set_scroll) converts them to page coordinates, the
/// space the parent bounds live in.
pub struct Cropper<T: RenderTarget = PaneBox> {
    still: Still,
    editor: CropEditor<T>,
    pane_drag: DragSource,
    handles: HandleSet,
    handle_size: f64,
    scroll: Point,
    mask: Rc<RefCell<MaskLayer>>,
    position: Rc<Cell<Rect>>,
    relayout: RelayoutTask,
}

impl Cropper<PaneBox> {
    /// Crop `still`, displayed at `parent` (page coordinates).
    pub fn new(still: Still, parent: Rect, options: &CropOptions) -> Self {
        Self::with_target(PaneBox::default(), still, parent, options)
    }
}

impl<T: RenderTarget> Cropper<T> {
    /// Like [`new`](Cropper::new), positioning the pane through `target`.
    pub fn with_target(target: T, still: Still, parent: Rect, options: &CropOptions) -> Self {
        let mask = Rc::new(RefCell::new(MaskLayer::new(parent.size())));
        let position = Rc::new(Cell::new(Rect::default()));

        let mut changes = Observers::new();
        let (mask_sink, position_sink) = (Rc::clone(&mask), Rc::clone(&position));
        changes.subscribe(move |area: &Rect| {
            position_sink.set(*area);
            mask_sink.borrow_mut().draw_mask(area);
        });

        let editor = CropEditor::initialize(target, parent, options, changes);
        let relayout = editor.schedule_relayout(DEFAULT_RELAYOUT_INTERVAL);
        Self {
            still,
            editor,
            pane_drag: DragSource::new(),
            handles: HandleSet::new(),
            handle_size: options.handle_size,
            scroll: Point::default(),
            mask,
            position,
            relayout,
        }
    }

    pub fn editor(&self) -> &CropEditor<T> {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut CropEditor<T> {
        &mut self.editor
    }

    pub fn still(&self) -> &Still {
        &self.still
    }

    /// The crop area as last reported by the editor, relative to the parent.
    pub fn position(&self) -> Rect {
        self.position.get()
    }

    /// The mask as last drawn.
    pub fn mask(&self) -> MaskLayer {
        *self.mask.borrow()
    }

    /// Set the ratio and re-run the constraint pipeline.
    pub fn set_ratio(&mut self, ratio: &str) -> Result<(), ConfigError> {
        self.editor.set_ratio(ratio)?;
        self.editor.refresh(PendingTransform::default());
        Ok(())
    }

    /// Subscribe to crop area changes.
    pub fn on_change(&mut self, subscriber: impl FnMut(&Rect) + 'static) -> SubscriptionId {
        self.editor.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.editor.unsubscribe(id)
    }

    /// Document scroll offset, applied to every client position.
    pub fn set_scroll(&mut self, scroll: Point) {
        self.scroll = scroll;
        self.pane_drag.set_scroll(scroll);
        self.handles.set_scroll(scroll);
    }

    /// What lies under the client position `client`. Handles take
    /// precedence over the pane body.
    pub fn hit_test(&self, client: Point) -> Option<PointerTarget> {
        let point = client.offset(self.scroll);
        let pane = self.editor.current().translate(self.parent_origin());
        if let Some(region) = self.handles.hit_test(&pane, self.handle_size, point) {
            return Some(PointerTarget::Handle(region));
        }
        pane.contains(point).then_some(PointerTarget::Pane)
    }

    /// Pointer pressed. Starts a drag on whatever lies under the pointer
    /// and returns it. Non-primary buttons end every drag.
    pub fn pointer_down(&mut self, client: Point, button: PointerButton) -> Option<PointerTarget> {
        if button != PointerButton::Primary {
            self.pointer_up();
            return None;
        }
        let target = self.hit_test(client)?;
        match target {
            PointerTarget::Handle(region) => {
                self.handles.begin(region, client, button);
            }
            PointerTarget::Pane => {
                self.pane_drag.begin(client, button);
            }
        }
        tracing::trace!(?target, "pointer down");
        Some(target)
    }

    /// Pointer moved over the parent bounds. Returns whether a drag
    /// delta reached the editor.
    pub fn pointer_move(&mut self, client: Point) -> bool {
        let resized = self.handles.drive(client, &mut self.editor);
        let moved = self.pane_drag.drive(client, &mut self.editor);
        resized || moved
    }

    pub fn pointer_up(&mut self) {
        self.pane_drag.end();
        self.handles.end();
    }

    /// Pointer left the parent bounds: ends any drag if it really left.
    pub fn pointer_out(&mut self, client: Point) {
        let bounds = self.editor.parent();
        self.pane_drag.leave(client, &bounds);
        self.handles.leave(client, &bounds);
    }

    /// Advance the relayout timer; re-snaps to `parent` when due.
    pub fn tick(&mut self, elapsed: Duration, parent: Rect) -> bool {
        if !self.relayout.poll(elapsed) {
            return false;
        }
        self.mask.borrow_mut().resize(parent.size());
        self.editor.relayout(parent);
        true
    }

    /// The still cropped to the current crop area.
    ///
    /// The crop area is in display pixels of the parent; it is scaled to
    /// the still's own resolution before cropping.
    pub fn get(&self) -> Still {
        let area = self.position();
        let parent = self.editor.parent();
        let sx = scale(f64::from(self.still.width()), parent.width);
        let sy = scale(f64::from(self.still.height()), parent.height);
        self.still.crop(&Rect::new(area.x * sx, area.y * sy, area.width * sx, area.height * sy))
    }

    /// Tear down the editor and clear the mask.
    pub fn destroy(self) {
        self.editor.destroy();
        self.mask.borrow_mut().unmask();
    }

    fn parent_origin(&self) -> Point {
        let parent = self.editor.parent();
        Point::new(parent.x, parent.y)
    }
}

fn scale(still: f64, display: f64) -> f64 {
    if display > 0.0 { still / display } else { 1.0 }
}

impl<T: RenderTarget> core::fmt::Debug for Cropper<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cropper")
            .field("position", &self.position())
            .field("parent", &self.editor.parent())
            .field("ratio", &self.editor.ratio())
            .finish_non_exhaustive()
    }
}
