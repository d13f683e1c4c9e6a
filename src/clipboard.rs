use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardWriteFailed(pub String);

impl fmt::Display for ClipboardWriteFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "clipboard write failed: {}", self.0)
    }
}

impl std::error::Error for ClipboardWriteFailed {}

/// Plain-text sink for the "copy" action.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardWriteFailed>;
}
