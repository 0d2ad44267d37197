//! Corner handles: one drag source per compass region, forwarding deltas
//! to [`CropEditor::on_resize`].

use crate::drag::{DragHost, DragSource, PointerButton};
use crate::editor::{CropEditor, RenderTarget};
use crate::geometry::{Delta, Point, Rect};
use crate::region::Region;

/// A corner handle. Has no geometry of its own beyond its corner.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Handle {
    region: Region,
    drag: DragSource,
}

impl Handle {
    pub fn new(region: Region) -> Self {
        Self {
            region,
            drag: DragSource::new(),
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn drag(&self) -> &DragSource {
        &self.drag
    }

    pub fn drag_mut(&mut self) -> &mut DragSource {
        &mut self.drag
    }

    /// Hit area of side `size` centered on this handle's corner of `pane`.
    pub fn hit_area(&self, pane: &Rect, size: f64) -> Rect {
        Rect::centered_square(self.region.corner(pane), size)
    }

    /// Forward a pointer move to `editor` as a resize from this region.
    pub fn drive<T: RenderTarget>(&mut self, client: Point, editor: &mut CropEditor<T>) -> bool {
        let mut host = Resize {
            region: self.region,
            editor,
        };
        self.drag.drive(client, &mut host)
    }
}

/// Adapts a handle's drag deltas to a resize of one region.
struct Resize<'a, T: RenderTarget> {
    region: Region,
    editor: &'a mut CropEditor<T>,
}

impl<T: RenderTarget> DragHost for Resize<'_, T> {
    fn on_drag(&mut self, delta: Delta) {
        self.editor.on_resize(self.region, delta);
    }
}

/// The four corner handles of a crop pane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HandleSet {
    handles: [Handle; 4],
}

impl Default for HandleSet {
    fn default() -> Self {
        Self {
            handles: Region::ALL.map(Handle::new),
        }
    }
}

impl HandleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Handle> {
        self.handles.iter()
    }

    pub fn get(&self, region: Region) -> &Handle {
        &self.handles[Self::index(region)]
    }

    /// Region whose hit area on `pane` contains `point`. Corners are
    /// checked in [`Region::ALL`] order.
    pub fn hit_test(&self, pane: &Rect, size: f64, point: Point) -> Option<Region> {
        self.handles
            .iter()
            .find(|h| h.hit_area(pane, size).contains(point))
            .map(Handle::region)
    }

    /// Pointer pressed on the handle in `region`.
    pub fn begin(&mut self, region: Region, client: Point, button: PointerButton) -> bool {
        self.handles[Self::index(region)].drag.begin(client, button)
    }

    /// Forward a pointer move from every dragging handle to `editor`.
    pub fn drive<T: RenderTarget>(&mut self, client: Point, editor: &mut CropEditor<T>) -> bool {
        let mut delivered = false;
        for handle in &mut self.handles {
            delivered |= handle.drive(client, editor);
        }
        delivered
    }

    /// Whether any handle is mid-drag.
    pub fn is_dragging(&self) -> bool {
        self.handles.iter().any(|h| h.drag.is_dragging())
    }

    pub fn end(&mut self) {
        for handle in &mut self.handles {
            handle.drag.end();
        }
    }

    /// Apply the bounds-exit rule to every handle.
    pub fn leave(&mut self, client: Point, bounds: &Rect) {
        for handle in &mut self.handles {
            handle.drag.leave(client, bounds);
        }
    }

    pub fn set_scroll(&mut self, scroll: Point) {
        for handle in &mut self.handles {
            handle.drag.set_scroll(scroll);
        }
    }

    fn index(region: Region) -> usize {
        match region {
            Region::NorthEast => 0,
            Region::SouthEast => 1,
            Region::NorthWest => 2,
            Region::SouthWest => 3,
        }
    }
}
