//! Single-slot status message shown after every console action.

use serde::Serialize;

/// Severity of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Success,
    /// Local notice; no request was sent.
    Info,
    Error,
}

impl FlashKind {
    /// CSS class for the flash area.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "flash-success",
            Self::Info => "flash-info",
            Self::Error => "flash-error",
        }
    }
}

/// A flash message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlashMessage {
    pub kind: FlashKind,
    pub text: String,
}

/// The flash area. Holds at most one message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Flash {
    message: Option<FlashMessage>,
}

impl Flash {
    /// Empty the slot.
    pub fn clear(&mut self) {
        self.message = None;
    }

    /// Replace the slot with a success message.
    pub fn success(&mut self, text: impl Into<String>) {
        self.set(FlashKind::Success, text);
    }

    /// Replace the slot with a local notice.
    pub fn info(&mut self, text: impl Into<String>) {
        self.set(FlashKind::Info, text);
    }

    /// Replace the slot with an error message.
    pub fn error(&mut self, text: impl Into<String>) {
        self.set(FlashKind::Error, text);
    }

    fn set(&mut self, kind: FlashKind, text: impl Into<String>) {
        self.message = Some(FlashMessage {
            kind,
            text: text.into(),
        });
    }

    /// Current message, if any.
    #[must_use]
    pub const fn message(&self) -> Option<&FlashMessage> {
        self.message.as_ref()
    }

    /// Text of the current message, or `""`.
    #[must_use]
    pub fn text(&self) -> &str {
        self.message.as_ref().map_or("", |m| m.text.as_str())
    }

    /// True when the current message is an error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.message
            .as_ref()
            .is_some_and(|m| m.kind == FlashKind::Error)
    }
}
