//! Application layer.
//!
//! # Structure
//!
//! - `keyboard` - key classification policy and its FLTK translation
//! - `editor` - the owned text model: editing ops, case transform, counts
//! - `focus` - focus-retention loop
//! - `containment` - shell state machine, window hardening, shortcut guard
//! - `settings` / `error` / `messages` - configuration, errors, channel messages
//! - `state.rs` - main application coordinator

pub mod containment;
pub mod editor;
pub mod error;
pub mod focus;
pub mod keyboard;
pub mod messages;
pub mod settings;
pub mod state;

// Re-exports for convenient external access
pub use containment::{Shell, ShellPhase, ShortcutGuard};
pub use editor::{CaseMode, EditOp, EditorState, FONT_SIZES};
pub use error::AppError;
pub use keyboard::{KeyCode, KeyEvent, KeyPhase, KeyPolicy, Modifiers, Verdict};
pub use messages::Message;
pub use settings::AppSettings;
pub use state::AppState;
