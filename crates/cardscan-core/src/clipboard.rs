use std::sync::{Arc, Mutex};

use crate::CoreError;

/// Destination for copied text.
pub trait Clipboard: Send {
    fn write_text(&mut self, text: &str) -> Result<(), CoreError>;
}

/// In-memory clipboard. Clones share the same buffer, so a test can keep one
/// handle and give the other to the code under test.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose writes always fail.
    pub fn failing() -> Self {
        Self {
            contents: Arc::default(),
            fail: true,
        }
    }

    /// The most recently written text.
    pub fn last(&self) -> Option<String> {
        self.contents.lock().ok()?.last().cloned()
    }

    pub fn write_count(&self) -> usize {
        self.contents.lock().map(|c| c.len()).unwrap_or(0)
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), CoreError> {
        if self.fail {
            return Err(CoreError::Clipboard("clipboard unavailable".into()));
        }
        self.contents
            .lock()
            .map_err(|e| CoreError::Clipboard(e.to_string()))?
            .push(text.to_string());
        Ok(())
    }
}
