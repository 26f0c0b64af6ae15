//! KioskPad: a locked-down, full-screen kiosk notepad.
//!
//! One window captures all keyboard input, a classification policy
//! decides per event whether it is allowed through, suppressed, or
//! terminates the process, and a focus-retention loop keeps the text
//! surface focused. Ctrl+Alt+Shift+Q is the only way out.

pub mod app;
pub mod ui;
