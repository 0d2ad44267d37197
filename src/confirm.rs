//! Confirm / retake overlay shown over a captured still, and the labels
//! the widget displays.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// Text shown by the widget.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct Labels {
    pub capture_message: String,
    pub capture_confirm: String,
    pub capture_cancel: String,
    pub capture_alt: String,
    pub crop_confirm: String,
    /// Video controls: stop streaming.
    pub cancel: String,
    /// Video controls: grab a still.
    pub take_picture: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            capture_message: "Good?".to_string(),
            capture_confirm: "Yes".to_string(),
            capture_cancel: "No, Retake".to_string(),
            capture_alt: "Captured image".to_string(),
            crop_confirm: "Save".to_string(),
            cancel: "Cancel".to_string(),
            take_picture: "Take Picture".to_string(),
        }
    }
}

/// Substitute `{key}` placeholders in `text` using `lookup`.
///
/// Whitespace around the key is ignored and anything after a `|` inside the
/// braces is skipped. Placeholders whose key `lookup` does not know are
/// left as written.
///
/// ```
/// use iconic::confirm::template;
///
/// let out = template("<b>{ name }</b> {missing}", |key| (key == "name").then_some("Ada"));
/// assert_eq!(out, "<b>Ada</b> {missing}");
/// ```
pub fn template<'a>(text: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let inner = &after[..close];
        let key = inner.split('|').next().unwrap_or("").trim();
        match lookup(key).filter(|_| !key.is_empty()) {
            Some(value) => out.push_str(value),
            None => out.push_str(&rest[open..open + close + 2]),
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}

const CONTAINER: &str = r#"<div class="iconic-confirm" style="width: {width}; height: {height}">{content}</div>"#;
const IMG: &str = r#"<img src="{src}" alt="{alt}">"#;
const PROMPT: &str = r#"<div class="iconic-confirm-content">{img}<div class="iconic-prompt"><div class="iconic-message">{message}</div>{controls}</div></div>"#;
const CANCEL: &str = r#"<button class="iconic-cancel" type="button">{text}</button>"#;
const CONFIRM: &str = r#"<button class="iconic-ok" type="button">{text}</button>"#;

/// Class name of the confirm button.
pub const CONFIRM_CLASS: &str = "iconic-ok";
/// Class name of the cancel button.
pub const CANCEL_CLASS: &str = "iconic-cancel";

/// What a confirm-layer button does.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConfirmAction {
    Confirm,
    Cancel,
}

/// Which question the layer is asking.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Prompt {
    /// "Keep this still, or retake?"
    Capture,
    /// "Save this crop?"
    Crop,
}

/// The confirm / retake overlay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmLayer {
    prompt: Prompt,
    visible: bool,
    /// Container size in pixels, matching the capture frame.
    width: u32,
    height: u32,
    /// Source of the image being confirmed.
    src: String,
}

impl ConfirmLayer {
    /// A hidden layer asking to confirm the still at `src`, sized
    /// `width`×`height` pixels.
    pub fn new(src: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            prompt: Prompt::Capture,
            visible: false,
            width,
            height,
            src: src.into(),
        }
    }

    /// Container size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn prompt(&self) -> Prompt {
        self.prompt
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) -> &mut Self {
        self.visible = true;
        self
    }

    pub fn hide(&mut self) -> &mut Self {
        self.visible = false;
        self
    }

    /// Ask to confirm a new still.
    pub fn confirm_image(&mut self, src: impl Into<String>) -> &mut Self {
        self.src = src.into();
        self.prompt = Prompt::Capture;
        self
    }

    /// Switch to asking for the crop to be saved.
    pub fn confirm_crop(&mut self) -> &mut Self {
        self.prompt = Prompt::Crop;
        self
    }

    /// Buttons for the current prompt, in display order.
    pub fn buttons<'a>(&self, labels: &'a Labels) -> Vec<(ConfirmAction, &'a str)> {
        match self.prompt {
            Prompt::Capture => alloc::vec![
                (ConfirmAction::Confirm, labels.capture_confirm.as_str()),
                (ConfirmAction::Cancel, labels.capture_cancel.as_str()),
            ],
            Prompt::Crop => alloc::vec![(ConfirmAction::Confirm, labels.crop_confirm.as_str())],
        }
    }

    /// Dispatch a click on an element with class attribute `class`.
    /// Clicks on anything but the layer's buttons return `None`.
    pub fn click(&self, class: &str) -> Option<ConfirmAction> {
        let action = class.split_whitespace().find_map(|c| match c {
            CONFIRM_CLASS => Some(ConfirmAction::Confirm),
            CANCEL_CLASS => Some(ConfirmAction::Cancel),
            _ => None,
        })?;
        self.buttons_allow(action).then_some(action)
    }

    fn buttons_allow(&self, action: ConfirmAction) -> bool {
        self.visible && (self.prompt == Prompt::Capture || action == ConfirmAction::Confirm)
    }

    /// Markup for the current prompt.
    pub fn markup(&self, labels: &Labels) -> String {
        let controls: String = self
            .buttons(labels)
            .into_iter()
            .map(|(action, text)| {
                let button = match action {
                    ConfirmAction::Confirm => CONFIRM,
                    ConfirmAction::Cancel => CANCEL,
                };
                template(button, |k| (k == "text").then_some(text))
            })
            .collect();
        let img = template(IMG, |k| match k {
            "src" => Some(self.src.as_str()),
            "alt" => Some(labels.capture_alt.as_str()),
            _ => None,
        });
        let message = match self.prompt {
            Prompt::Capture => labels.capture_message.as_str(),
            Prompt::Crop => "",
        };
        let content = template(PROMPT, |k| match k {
            "img" => Some(img.as_str()),
            "message" => Some(message),
            "controls" => Some(controls.as_str()),
            _ => None,
        });
        let (width, height) = (format!("{}px", self.width), format!("{}px", self.height));
        template(CONTAINER, |k| match k {
            "width" => Some(width.as_str()),
            "height" => Some(height.as_str()),
            "content" => Some(content.as_str()),
            _ => None,
        })
    }
}
