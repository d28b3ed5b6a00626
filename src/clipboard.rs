//! Best-effort clipboard sink for finished reports.
//!
//! Clipboard access fails in headless environments; failure is reported
//! to the caller and never escalated into an error.

use clipboard_rs::{Clipboard, ClipboardContext};

/// Copy `text` to the system clipboard; returns whether it worked
pub fn copy_text(text: &str) -> bool {
    let ctx = match ClipboardContext::new() {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::debug!("clipboard unavailable: {}", e);
            return false;
        }
    };
    match ctx.set_text(text.to_string()) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!("clipboard write failed: {}", e);
            false
        }
    }
}
