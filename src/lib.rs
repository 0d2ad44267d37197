//! Webcam still capture with an interactive crop pane.
//!
//! Headless, `no_std` + `alloc` compatible. The host owns the display and
//! the camera; this crate owns the geometry, the gesture state machines and
//! the capture flow.
//!
//! # Modules
//!
//! - [`constraint`]: Ratio, parent-bounds and size-bounds enforcement
//! - [`editor`]: The constrained rectangle editor behind the crop pane
//! - [`region`]: Corner regions and their resize sign table
//! - [`drag`] / [`handle`]: Pointer drag state for the pane and its handles
//! - [`cropper`]: Pane, handles and mask composed over one still
//! - [`mask`]: The dimmed strips around the crop area
//! - [`iconic`]: The capture → confirm → crop widget flow

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod capture;
pub mod confirm;
pub mod constraint;
pub mod cropper;
pub mod drag;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod handle;
pub mod iconic;
pub mod mask;
pub mod observer;
pub mod options;
pub mod ratio;
pub mod region;
pub mod still;
#[cfg(feature = "svg")]
pub mod svg;

// Re-exports: geometry and constraint pipeline
pub use constraint::{PendingTransform, SizeBounds};
pub use geometry::{Delta, PixelRect, Point, Rect, Size};
pub use ratio::Ratio;
pub use region::Region;

// Re-exports: editor and interaction
pub use cropper::{Cropper, PointerTarget};
pub use drag::{DragHost, DragSource, PointerButton};
pub use editor::{CropEditor, DEFAULT_RELAYOUT_INTERVAL, PaneBox, RelayoutTask, RenderTarget};
pub use handle::{Handle, HandleSet};
pub use mask::{MaskLayer, MaskRenderer, mask_regions};
pub use observer::{Observers, SubscriptionId};

// Re-exports: widget
pub use capture::{CaptureSource, Frame, StreamInfo};
pub use confirm::{ConfirmAction, ConfirmLayer, Labels};
pub use error::{CaptureError, ConfigError, StateError};
pub use iconic::{Iconic, IconicEvent, Stage};
pub use options::{CaptureOptions, CropOptions, IconicOptions};
pub use still::Still;
#[cfg(feature = "svg")]
pub use svg::render_mask_svg;
