//! Copy-to-clipboard for citation text.

use serde::Serialize;
use tracing::warn;

use crate::{Result, SiteError};

/// Clipboard the host provides.
pub trait Clipboard {
    /// Writes `text` to the clipboard.
    ///
    /// # Errors
    ///
    /// Returns a description of the failure when the write is refused.
    fn write_text(&mut self, text: &str) -> std::result::Result<(), String>;
}

/// Notice shown to the user after a copy attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Notice {
    /// Transient toast message.
    Copied(String),
    /// The write failed; the text is offered for manual copying.
    ManualCopy(String),
}

/// Message shown after a BibTeX entry has been copied.
pub const COPIED_MESSAGE: &str = "BibTeX Copied!";

/// Writes a citation to the clipboard.
///
/// # Errors
///
/// Returns [`SiteError::Clipboard`] with the host's reason when the write is refused.
pub fn write_citation<C: Clipboard + ?Sized>(clipboard: &mut C, text: &str) -> Result<()> {
    clipboard.write_text(text).map_err(SiteError::Clipboard)
}

/// Copies a citation and reports the outcome. Failures are never fatal.
pub fn copy_citation<C: Clipboard + ?Sized>(clipboard: &mut C, text: &str) -> Notice {
    match write_citation(clipboard, text) {
        Ok(()) => Notice::Copied(COPIED_MESSAGE.to_string()),
        Err(err) => {
            warn!(error = %err, "clipboard write failed");
            Notice::ManualCopy(text.to_string())
        }
    }
}

/// Clipboard held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> std::result::Result<(), String> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct DeniedClipboard;

    impl Clipboard for DeniedClipboard {
        fn write_text(&mut self, _text: &str) -> std::result::Result<(), String> {
            Err("permission denied".to_string())
        }
    }

    #[test]
    fn test_copy_success() {
        let mut clipboard = MemoryClipboard::default();
        let notice = copy_citation(&mut clipboard, "@inproceedings{kim2023}");
        assert_eq!(notice, Notice::Copied(COPIED_MESSAGE.to_string()));
        assert_eq!(clipboard.contents(), Some("@inproceedings{kim2023}"));
    }

    #[test]
    fn test_copy_failure_offers_manual_copy() {
        let notice = copy_citation(&mut DeniedClipboard, "@article{x}");
        assert_eq!(notice, Notice::ManualCopy("@article{x}".to_string()));

        let err = write_citation(&mut DeniedClipboard, "@article{x}").unwrap_err();
        assert_eq!(err.to_string(), "Clipboard error: permission denied");
    }
}
