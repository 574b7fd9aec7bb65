//! Clipboard abstraction layer.
//!
//! Provides a trait-based interface for clipboard operations,
//! allowing easy testing and a stdout fallback when no OS clipboard is wanted.

use std::io::Write;

/// Trait for clipboard operations.
pub trait ClipboardProvider {
    /// Set text to clipboard.
    fn set_text(&mut self, text: String) -> bool;
}

/// System clipboard implementation using arboard.
#[cfg(feature = "clipboard")]
pub struct SystemClipboard;

#[cfg(feature = "clipboard")]
impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: String) -> bool {
        let mut cb = match arboard::Clipboard::new() {
            Ok(cb) => cb,
            Err(_) => return false,
        };
        cb.set_text(text).is_ok()
    }
}

/// Writes copied text to stdout, one copy per block.
pub struct StdoutClipboard;

impl ClipboardProvider for StdoutClipboard {
    fn set_text(&mut self, text: String) -> bool {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", text).is_ok()
    }
}

/// In-memory clipboard, keeps only the latest text.
#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    pub text: Option<String>,
}

#[cfg(test)]
impl ClipboardProvider for MemoryClipboard {
    fn set_text(&mut self, text: String) -> bool {
        self.text = Some(text);
        true
    }
}
