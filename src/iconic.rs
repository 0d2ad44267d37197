//! The webcam crop widget: stream, snapshot, confirm, crop.

use alloc::string::String;
use core::fmt;

use crate::capture::{CaptureSource, Frame, StreamInfo};
use crate::confirm::{ConfirmAction, ConfirmLayer};
use crate::cropper::Cropper;
use crate::error::{CaptureError, StateError};
use crate::geometry::Rect;
use crate::observer::{Observers, SubscriptionId};
use crate::options::IconicOptions;
use crate::still::Still;

/// Where the widget is in its capture flow.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Nothing running.
    #[default]
    Idle,
    /// The live stream is shown.
    Streaming,
    /// A still was taken; asking whether to keep it.
    Confirming,
    /// Cropping the kept still.
    Cropping,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Streaming => "streaming",
            Self::Confirming => "confirming",
            Self::Cropping => "cropping",
        })
    }
}

/// Events passed through to widget subscribers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IconicEvent {
    /// The capture source opened a stream.
    UserMediaSuccess(StreamInfo),
    /// The capture source failed. Nothing retries.
    UserMediaError(CaptureError),
    /// The stream was released.
    Stop,
    /// The user saved a crop.
    Cropped(Still),
}

/// The widget. The host forwards user input to it and renders what the
/// accessors report.
pub struct Iconic<C: CaptureSource> {
    source: C,
    options: IconicOptions,
    stage: Stage,
    frame: Option<Frame>,
    confirm: Option<ConfirmLayer>,
    cropper: Option<Cropper>,
    events: Observers<IconicEvent>,
}

impl<C: CaptureSource> Iconic<C> {
    pub fn new(source: C, options: IconicOptions) -> Self {
        Self {
            source,
            options,
            stage: Stage::Idle,
            frame: None,
            confirm: None,
            cropper: None,
            events: Observers::new(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn options(&self) -> &IconicOptions {
        &self.options
    }

    pub fn source(&self) -> &C {
        &self.source
    }

    /// The still being confirmed or cropped.
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub fn confirm_layer(&self) -> Option<&ConfirmLayer> {
        self.confirm.as_ref()
    }

    /// Markup of the confirm layer with the configured labels, while it
    /// is shown.
    pub fn confirm_markup(&self) -> Option<String> {
        self.confirm
            .as_ref()
            .filter(|layer| layer.is_visible())
            .map(|layer| layer.markup(&self.options.labels))
    }

    pub fn cropper(&self) -> Option<&Cropper> {
        self.cropper.as_ref()
    }

    /// The cropper, for forwarding pointer input while cropping.
    pub fn cropper_mut(&mut self) -> Option<&mut Cropper> {
        self.cropper.as_mut()
    }

    /// Subscribe to the widget's events.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&IconicEvent) + 'static) -> SubscriptionId {
        self.events.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Open the stream at the configured frame size. A capture failure is
    /// reported to subscribers and leaves the widget idle.
    pub fn start_capture(&mut self) -> Result<(), StateError> {
        self.expect_stage("start_capture", &[Stage::Idle])?;
        match self.source.start(&self.options.capture) {
            Ok(info) => {
                tracing::debug!(width = info.width, height = info.height, "stream started");
                self.stage = Stage::Streaming;
                self.events.notify(&IconicEvent::UserMediaSuccess(info));
            }
            Err(err) => {
                tracing::warn!(%err, "stream failed to start");
                self.events.notify(&IconicEvent::UserMediaError(err));
            }
        }
        Ok(())
    }

    /// Grab a still and ask whether to keep it. A capture failure is
    /// reported to subscribers and keeps the stream running.
    pub fn take_picture(&mut self) -> Result<(), StateError> {
        self.expect_stage("take_picture", &[Stage::Streaming])?;
        let frame = match self.source.snapshot() {
            Ok(frame) => frame,
            Err(err) => {
                tracing::warn!(%err, "snapshot failed");
                self.events.notify(&IconicEvent::UserMediaError(err));
                return Ok(());
            }
        };
        let capture = self.options.capture;
        let layer = self
            .confirm
            .get_or_insert_with(|| ConfirmLayer::new("", capture.width, capture.height));
        layer.confirm_image(frame.src.as_str()).show();
        tracing::debug!(width = frame.still.width(), height = frame.still.height(), "still taken");
        self.frame = Some(frame);
        self.stage = Stage::Confirming;
        Ok(())
    }

    /// Drop the still and go back to the live stream.
    pub fn retake(&mut self) -> Result<(), StateError> {
        self.expect_stage("retake", &[Stage::Confirming])?;
        if let Some(layer) = self.confirm.as_mut() {
            layer.hide();
        }
        self.frame = None;
        self.stage = Stage::Streaming;
        Ok(())
    }

    /// Keep the still and start cropping it, or save the crop.
    pub fn confirm(&mut self) -> Result<(), StateError> {
        match self.stage {
            Stage::Confirming => {
                self.stop_stream();
                if let Some(frame) = &self.frame {
                    let still = frame.still.clone();
                    let parent = Rect::from_size(still.size());
                    self.cropper = Some(Cropper::new(still, parent, &self.options.crop));
                }
                if let Some(layer) = self.confirm.as_mut() {
                    layer.confirm_crop();
                }
                self.stage = Stage::Cropping;
                Ok(())
            }
            Stage::Cropping => {
                if let Some(cropper) = self.cropper.take() {
                    let cropped = cropper.get();
                    tracing::debug!(width = cropped.width(), height = cropped.height(), "crop saved");
                    self.events.notify(&IconicEvent::Cropped(cropped));
                    cropper.destroy();
                }
                self.reset();
                Ok(())
            }
            stage => Err(StateError {
                operation: "confirm",
                stage,
            }),
        }
    }

    /// Route a click on a confirm-layer element with class attribute
    /// `class`. Returns the action taken, if the click hit a button.
    pub fn click(&mut self, class: &str) -> Result<Option<ConfirmAction>, StateError> {
        self.expect_stage("click", &[Stage::Confirming, Stage::Cropping])?;
        let Some(action) = self.confirm.as_ref().and_then(|layer| layer.click(class)) else {
            return Ok(None);
        };
        match action {
            ConfirmAction::Confirm => self.confirm()?,
            ConfirmAction::Cancel => self.retake()?,
        }
        Ok(Some(action))
    }

    /// Stop whatever is running and return to idle.
    pub fn stop(&mut self) -> Result<(), StateError> {
        match self.stage {
            Stage::Idle => Err(StateError {
                operation: "stop",
                stage: Stage::Idle,
            }),
            Stage::Streaming | Stage::Confirming => {
                self.stop_stream();
                self.reset();
                Ok(())
            }
            Stage::Cropping => {
                if let Some(cropper) = self.cropper.take() {
                    cropper.destroy();
                }
                self.reset();
                Ok(())
            }
        }
    }

    fn stop_stream(&mut self) {
        self.source.stop();
        tracing::debug!("stream stopped");
        self.events.notify(&IconicEvent::Stop);
    }

    fn reset(&mut self) {
        self.frame = None;
        self.confirm = None;
        self.cropper = None;
        self.stage = Stage::Idle;
    }

    fn expect_stage(&self, operation: &'static str, allowed: &[Stage]) -> Result<(), StateError> {
        if allowed.contains(&self.stage) {
            Ok(())
        } else {
            Err(StateError {
                operation,
                stage: self.stage,
            })
        }
    }
}

impl<C: CaptureSource> fmt::Debug for Iconic<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iconic")
            .field("stage", &self.stage)
            .field("confirm", &self.confirm)
            .field("cropper", &self.cropper)
            .finish_non_exhaustive()
    }
}
