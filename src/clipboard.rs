//! Bridge to the operating system clipboard.

use crate::error::ClipboardError;

/// Write-only clipboard access.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// System clipboard using arboard. The handle is created on first use and
/// held until the process exits; on X11 and Wayland the copied text is only
/// served while the owning handle is alive.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self { inner: None }
    }

    fn ensure(&mut self) -> Result<&mut arboard::Clipboard, ClipboardError> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().map_err(ClipboardError::Unavailable)?,
        };
        Ok(self.inner.insert(clipboard))
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = self.ensure()?;
        clipboard
            .set_text(text.to_string())
            .map_err(ClipboardError::Write)
    }
}
