//! Clipboard collaborator
//!
//! The hash core never touches the OS clipboard directly; the CLI hands it a
//! `Clipboard` so tests can substitute a recorder and headless runs can opt
//! out entirely.

use log::debug;

use crate::hash::HashUtilityError;

/// Write-only access to a clipboard
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), HashUtilityError>;
}

/// The desktop clipboard, opened on first use
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), HashUtilityError> {
        if self.inner.is_none() {
            self.inner = Some(arboard::Clipboard::new().map_err(unavailable)?);
        }
        if let Some(clipboard) = self.inner.as_mut() {
            clipboard.set_text(text.to_owned()).map_err(unavailable)?;
        }
        debug!("copied {} characters to clipboard", text.len());
        // X11 and Wayland serve the selection from this process
        #[cfg(target_os = "linux")]
        debug!("clipboard contents outlive shahash only if a clipboard manager takes them");
        Ok(())
    }
}

fn unavailable(err: arboard::Error) -> HashUtilityError {
    HashUtilityError::ClipboardUnavailable {
        reason: err.to_string(),
    }
}

/// Used when clipboard output is disabled
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn set_text(&mut self, _text: &str) -> Result<(), HashUtilityError> {
        Ok(())
    }
}
