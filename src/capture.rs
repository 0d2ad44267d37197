//! Webcam capture contract.
//!
//! The widget never talks to a device directly; the host supplies a
//! [`CaptureSource`] that opens the stream and grabs frames.

use alloc::string::String;

use crate::error::CaptureError;
use crate::options::CaptureOptions;
use crate::still::Still;

/// A live stream that was opened.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct StreamInfo {
    pub width: u32,
    pub height: u32,
}

/// A grabbed frame and how the host displays it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub still: Still,
    /// Image source for the confirm layer, e.g. a data URI.
    pub src: String,
}

/// Camera stream provider.
pub trait CaptureSource {
    /// Ask for a live stream of the requested frame size. The host decides
    /// how long this may take; the widget treats the returned value as
    /// final. The stream may come back at a different size.
    fn start(&mut self, options: &CaptureOptions) -> Result<StreamInfo, CaptureError>;

    /// Grab the current frame of the live stream.
    fn snapshot(&mut self) -> Result<Frame, CaptureError>;

    /// Release the stream.
    fn stop(&mut self);
}
