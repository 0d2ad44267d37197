//! Widget configuration.

use crate::confirm::Labels;
use crate::constraint::{DEFAULT_MIN_SIZE, SizeBounds};
use crate::ratio::Ratio;

/// Crop pane configuration.
///
/// # Example
///
/// ```
/// use iconic::{CropOptions, Ratio};
///
/// let options = CropOptions::default()
///     .ratio("4:3".parse().unwrap())
///     .min_size(40.0, 30.0)
///     .max_width(320.0);
///
/// assert_eq!(options.size_bounds().max_width, Some(320.0));
/// assert_ne!(options.ratio, Ratio::None);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct CropOptions {
    pub ratio: Ratio,
    pub min_width: f64,
    pub min_height: f64,
    pub max_width: Option<f64>,
    pub max_height: Option<f64>,
    /// Pane width on first draw.
    pub default_width: f64,
    /// Pane height on first draw.
    pub default_height: f64,
    /// Side of the square hit area around each corner handle.
    pub handle_size: f64,
}

impl Default for CropOptions {
    fn default() -> Self {
        Self {
            ratio: Ratio::None,
            min_width: DEFAULT_MIN_SIZE,
            min_height: DEFAULT_MIN_SIZE,
            max_width: None,
            max_height: None,
            default_width: 100.0,
            default_height: 100.0,
            handle_size: 10.0,
        }
    }
}

impl CropOptions {
    /// Defaults used by the [`Iconic`](crate::Iconic) widget: a square pane
    /// of at least 200×200.
    pub fn iconic() -> Self {
        Self {
            ratio: Ratio::Square,
            min_width: 200.0,
            min_height: 200.0,
            default_width: 200.0,
            default_height: 200.0,
            ..Self::default()
        }
    }

    pub fn ratio(mut self, ratio: Ratio) -> Self {
        self.ratio = ratio;
        self
    }

    pub fn min_size(mut self, width: f64, height: f64) -> Self {
        self.min_width = width;
        self.min_height = height;
        self
    }

    pub fn max_width(mut self, width: f64) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn max_height(mut self, height: f64) -> Self {
        self.max_height = Some(height);
        self
    }

    pub fn default_size(mut self, width: f64, height: f64) -> Self {
        self.default_width = width;
        self.default_height = height;
        self
    }

    pub fn handle_size(mut self, size: f64) -> Self {
        self.handle_size = size;
        self
    }

    pub fn size_bounds(&self) -> SizeBounds {
        SizeBounds {
            min_width: self.min_width,
            min_height: self.min_height,
            max_width: self.max_width,
            max_height: self.max_height,
        }
    }
}

/// Capture frame configuration.
///
/// Frames should be 4:3; other sizes are letterboxed by the device.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct CaptureOptions {
    pub width: u32,
    pub height: u32,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            width: 400,
            height: 300,
        }
    }
}

/// Everything the [`Iconic`](crate::Iconic) widget is configured with.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct IconicOptions {
    pub capture: CaptureOptions,
    pub crop: CropOptions,
    pub labels: Labels,
}

impl Default for IconicOptions {
    fn default() -> Self {
        Self {
            capture: CaptureOptions::default(),
            crop: CropOptions::iconic(),
            labels: Labels::default(),
        }
    }
}
