//! Clipboard service

use std::cell::RefCell;
use std::rc::Rc;

/// Clipboard write failure
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Clipboard write denied")]
    Denied,

    #[error("Clipboard I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Somewhere text can be copied to
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug, Default)]
struct Buffer {
    contents: Option<String>,
    writes: Vec<String>,
}

/// In-process clipboard
///
/// Clones share one buffer so the writer and an observer can be handed out
/// separately.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    buffer: Rc<RefCell<Buffer>>,
    deny: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that rejects every write
    pub fn denying() -> Self {
        Self { deny: true, ..Self::default() }
    }

    /// Last copied text
    pub fn contents(&self) -> Option<String> {
        self.buffer.borrow().contents.clone()
    }

    /// Every successful write in order
    pub fn writes(&self) -> Vec<String> {
        self.buffer.borrow().writes.clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.deny {
            return Err(ClipboardError::Denied);
        }
        let mut buffer = self.buffer.borrow_mut();
        buffer.contents = Some(text.to_string());
        buffer.writes.push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_shared() {
        let observer = MemoryClipboard::new();
        let mut writer = observer.clone();
        writer.write_text("😀").unwrap();
        writer.write_text("🐱").unwrap();

        assert_eq!(observer.contents().as_deref(), Some("🐱"));
        assert_eq!(observer.writes(), vec!["😀", "🐱"]);
    }

    #[test]
    fn test_denying_clipboard() {
        let mut clipboard = MemoryClipboard::denying();
        assert!(matches!(clipboard.write_text("x"), Err(ClipboardError::Denied)));
        assert_eq!(clipboard.contents(), None);
    }
}
