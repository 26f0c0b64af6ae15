//! Focus retention: the editor surface must hold keyboard focus at all
//! times. Event-driven reacquisition on blur, plus a polling fallback.

use fltk::{app, prelude::*, text::TextEditor};

/// Default reconciliation poll interval.
pub const FOCUS_POLL_DEFAULT_MS: u64 = 100;

/// Ask for focus back on the next scheduling turn. Never called
/// synchronously from inside a blur handler, so the platform cannot be
/// driven into recursive focus fighting. A refused request is simply
/// retried by the next trigger.
pub fn schedule_refocus(mut editor: TextEditor) {
    app::add_timeout3(0.0, move |_| {
        let _ = editor.take_focus();
    });
}

/// Repeating poll: whenever something other than the editor holds focus,
/// request it back. Best-effort against application-level focus loss.
pub fn install_retention(editor: &TextEditor, poll_ms: u64) {
    let period = poll_ms.max(1) as f64 / 1000.0;
    let mut editor = editor.clone();
    app::add_timeout3(period, move |handle| {
        let focused = app::focus().map(|w| w.as_widget_ptr());
        if focused != Some(editor.as_widget_ptr()) {
            if editor.take_focus().is_ok() {
                log::debug!("focus returned to the editor surface");
            }
        }
        app::repeat_timeout3(period, handle);
    });
}
