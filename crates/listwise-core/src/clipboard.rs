//! Clipboard support for generated text.
//!
//! Text is copied using (in order of preference):
//! 1. System clipboard via `arboard` crate
//! 2. OSC 52 - Terminal clipboard escape sequence on stderr (works over SSH)
//!
//! OSC 52 goes to stderr so that stdout stays clean for piping.

use std::io::{IsTerminal, Write};

/// Clipboard interface with multiple transport fallbacks.
pub struct Clipboard;

impl Clipboard {
    /// Copies text to the clipboard.
    ///
    /// Returns `Ok(())` if any method succeeded.
    ///
    /// # Errors
    /// Returns the system clipboard error when no transport worked.
    pub fn copy(text: &str) -> Result<(), ClipboardError> {
        match Self::copy_system(text) {
            Ok(()) => Ok(()),
            Err(system_err) => {
                tracing::debug!(error = %system_err, "system clipboard unavailable, trying OSC 52");
                if std::io::stderr().is_terminal() {
                    Self::copy_osc52(&mut std::io::stderr(), text)
                } else {
                    Err(system_err)
                }
            }
        }
    }

    /// Copies text using the system clipboard.
    fn copy_system(text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::System(e.to_string()))?;

        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::System(e.to_string()))?;

        Ok(())
    }

    /// Writes the OSC 52 escape sequence; the terminal copies the payload.
    fn copy_osc52(out: &mut impl Write, text: &str) -> Result<(), ClipboardError> {
        out.write_all(osc52_sequence(text).as_bytes())
            .map_err(|e| ClipboardError::Osc52(e.to_string()))?;
        out.flush()
            .map_err(|e| ClipboardError::Osc52(e.to_string()))?;

        Ok(())
    }
}

/// OSC 52 format: ESC ] 52 ; c ; <base64-data> ESC \
fn osc52_sequence(text: &str) -> String {
    use base64::Engine;

    let encoded = base64::engine::general_purpose::STANDARD.encode(text);
    format!("\x1b]52;c;{encoded}\x1b\\")
}

/// Clipboard operation errors.
#[derive(Debug)]
pub enum ClipboardError {
    /// OSC 52 write failed.
    Osc52(String),
    /// System clipboard operation failed.
    System(String),
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardError::Osc52(msg) => write!(f, "OSC 52 clipboard failed: {msg}"),
            ClipboardError::System(msg) => write!(f, "System clipboard failed: {msg}"),
        }
    }
}

impl std::error::Error for ClipboardError {}
