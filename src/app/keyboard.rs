//! Key classification: every keyboard event is mapped to exactly one verdict.

use fltk::{
    app,
    enums::{Event, EventState, Key},
    prelude::*,
    text::TextEditor,
    window::Window,
};

use super::editor::EditOp;
use super::focus;
use super::messages::Message;
use fltk::app::Sender;

/// Outcome of classifying one input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Forward to the editing model.
    Allow,
    /// Consume and discard.
    Block,
    /// Terminate the process.
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    Down,
    Up,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

/// Toolkit-agnostic key identity. `Char` covers every printable glyph;
/// everything else is a named non-printable key, with `Other` as the
/// catch-all for raw codes the translation layer does not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Backspace,
    Delete,
    Enter,
    Tab,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Escape,
    Insert,
    Pause,
    PrintScreen,
    ContextMenu,
    CapsLock,
    NumLock,
    ScrollLock,
    /// Standalone Shift press (shift-modified glyphs arrive as `Char`).
    Shift,
    Control,
    Alt,
    Meta,
    Function(u8),
    VolumeUp,
    VolumeDown,
    VolumeMute,
    MediaPlay,
    MediaStop,
    MediaNext,
    MediaPrev,
    Other(u32),
}

/// One keyboard event as seen by the classification policy.
/// Produced by the input layer, consumed exactly once, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: KeyCode,
    pub modifiers: Modifiers,
    pub phase: KeyPhase,
}

/// The fixed containment policy: one escape combination, a danger-combo
/// set, and the allow/block key sets. Built once at startup, immutable.
#[derive(Debug, Clone)]
pub struct KeyPolicy {
    escape_letter: char,
    danger_letters: &'static [char],
}

/// Letters that, combined with Ctrl or Meta, trigger reload, quit,
/// new-tab or close-window in common shells and browsers.
const DANGER_LETTERS: &[char] = &['r', 'q', 'n', 't', 'w'];

impl Default for KeyPolicy {
    fn default() -> Self {
        Self {
            escape_letter: 'q',
            danger_letters: DANGER_LETTERS,
        }
    }
}

impl KeyPolicy {
    /// Classify one event. Pure; the first matching rule wins and the
    /// ordering of the rules is part of the contract.
    pub fn classify(&self, event: &KeyEvent) -> Verdict {
        let m = event.modifiers;

        // 1. The one authorized escape combination, case-insensitive.
        if m.ctrl && m.alt && m.shift && self.is_escape_letter(event.key) {
            return Verdict::Escape;
        }

        // 2. Meta in any form, before any allow rule.
        if m.meta || event.key == KeyCode::Meta {
            return Verdict::Block;
        }

        // 3. Reload/quit/new-tab/close-window combinations.
        if (m.ctrl || m.meta) && self.is_danger_key(event.key) {
            return Verdict::Block;
        }

        // 4. Bare alt combinations. Alt together with ctrl falls through,
        //    which keeps AltGr glyphs typable.
        if m.alt && !m.ctrl {
            return Verdict::Block;
        }

        // 5. Non-printable keys with system-level default actions.
        if is_blocked_system_key(event.key) {
            return Verdict::Block;
        }

        // 6. The editing and navigation keys the kiosk needs.
        if is_allowed_editing_key(event.key) {
            return Verdict::Allow;
        }

        // 7. Printable glyphs, including shift-modified ones.
        if matches!(event.key, KeyCode::Char(_)) {
            return Verdict::Allow;
        }

        // 8. Default-deny.
        Verdict::Block
    }

    fn is_escape_letter(&self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char(c) => c.eq_ignore_ascii_case(&self.escape_letter),
            _ => false,
        }
    }

    fn is_danger_key(&self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char(c) => self
                .danger_letters
                .iter()
                .any(|d| c.eq_ignore_ascii_case(d)),
            KeyCode::Function(4) => true,
            _ => false,
        }
    }
}

fn is_blocked_system_key(key: KeyCode) -> bool {
    matches!(
        key,
        KeyCode::Function(_)
            | KeyCode::Escape
            | KeyCode::ContextMenu
            | KeyCode::Insert
            | KeyCode::Pause
            | KeyCode::PrintScreen
            | KeyCode::CapsLock
            | KeyCode::NumLock
            | KeyCode::ScrollLock
            | KeyCode::Shift
            | KeyCode::Control
            | KeyCode::Alt
            | KeyCode::Meta
            | KeyCode::VolumeUp
            | KeyCode::VolumeDown
            | KeyCode::VolumeMute
            | KeyCode::MediaPlay
            | KeyCode::MediaStop
            | KeyCode::MediaNext
            | KeyCode::MediaPrev
    )
}

fn is_allowed_editing_key(key: KeyCode) -> bool {
    matches!(
        key,
        KeyCode::Backspace
            | KeyCode::Delete
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Up
            | KeyCode::Down
            | KeyCode::Home
            | KeyCode::End
            | KeyCode::PageUp
            | KeyCode::PageDown
            | KeyCode::Enter
            | KeyCode::Tab
    )
}

// --- FLTK translation layer ---

// X11 keysyms FLTK passes through untranslated.
const XF86_AUDIO_LOWER_VOLUME: i32 = 0x1008_FF11;
const XF86_AUDIO_MUTE: i32 = 0x1008_FF12;
const XF86_AUDIO_RAISE_VOLUME: i32 = 0x1008_FF13;
const XF86_AUDIO_PLAY: i32 = 0x1008_FF14;
const XF86_AUDIO_STOP: i32 = 0x1008_FF15;
const XF86_AUDIO_PREV: i32 = 0x1008_FF16;
const XF86_AUDIO_NEXT: i32 = 0x1008_FF17;

// Keypad keysym ranges (XK_KP_Multiply..XK_KP_Divide, XK_KP_0..XK_KP_9).
const KP_OPERATOR_FIRST: i32 = 0xFFAA;
const KP_OPERATOR_LAST: i32 = 0xFFAF;
const KP_DIGIT_FIRST: i32 = 0xFFB0;
const KP_DIGIT_LAST: i32 = 0xFFB9;

// Function key keysyms (XK_F1..XK_F12).
const FN_FIRST: i32 = 0xFFBE;
const FN_LAST: i32 = 0xFFBE + 11;

/// Map an FLTK key to the policy's key identity.
pub fn keycode_from_fltk(key: Key) -> KeyCode {
    match key {
        Key::BackSpace => KeyCode::Backspace,
        Key::Delete => KeyCode::Delete,
        Key::Enter | Key::KPEnter => KeyCode::Enter,
        Key::Tab => KeyCode::Tab,
        Key::Left => KeyCode::Left,
        Key::Right => KeyCode::Right,
        Key::Up => KeyCode::Up,
        Key::Down => KeyCode::Down,
        Key::Home => KeyCode::Home,
        Key::End => KeyCode::End,
        Key::PageUp => KeyCode::PageUp,
        Key::PageDown => KeyCode::PageDown,
        Key::Escape => KeyCode::Escape,
        Key::Insert => KeyCode::Insert,
        Key::Pause => KeyCode::Pause,
        Key::Print => KeyCode::PrintScreen,
        Key::Menu => KeyCode::ContextMenu,
        Key::CapsLock => KeyCode::CapsLock,
        Key::NumLock => KeyCode::NumLock,
        Key::ScrollLock => KeyCode::ScrollLock,
        Key::ShiftL | Key::ShiftR => KeyCode::Shift,
        Key::ControlL | Key::ControlR => KeyCode::Control,
        Key::AltL | Key::AltR => KeyCode::Alt,
        Key::MetaL | Key::MetaR => KeyCode::Meta,
        _ => keycode_from_raw(key.bits()),
    }
}

fn keycode_from_raw(bits: i32) -> KeyCode {
    match bits {
        b if (FN_FIRST..=FN_LAST).contains(&b) => KeyCode::Function((b - FN_FIRST + 1) as u8),
        b if (KP_DIGIT_FIRST..=KP_DIGIT_LAST).contains(&b) => {
            KeyCode::Char((b'0' + (b - KP_DIGIT_FIRST) as u8) as char)
        }
        b if (KP_OPERATOR_FIRST..=KP_OPERATOR_LAST).contains(&b) => {
            // XK_KP_Multiply.. line up with ASCII '*' '+' ',' '-' '.' '/'.
            KeyCode::Char((b'*' + (b - KP_OPERATOR_FIRST) as u8) as char)
        }
        XF86_AUDIO_LOWER_VOLUME => KeyCode::VolumeDown,
        XF86_AUDIO_MUTE => KeyCode::VolumeMute,
        XF86_AUDIO_RAISE_VOLUME => KeyCode::VolumeUp,
        XF86_AUDIO_PLAY => KeyCode::MediaPlay,
        XF86_AUDIO_STOP => KeyCode::MediaStop,
        XF86_AUDIO_PREV => KeyCode::MediaPrev,
        XF86_AUDIO_NEXT => KeyCode::MediaNext,
        b if (0x20..=0xFF).contains(&b) => match char::from_u32(b as u32) {
            Some(c) => KeyCode::Char(c),
            None => KeyCode::Other(b as u32),
        },
        b => KeyCode::Other(b as u32),
    }
}

impl Modifiers {
    fn from_event_state(state: EventState) -> Self {
        Self {
            ctrl: state.contains(EventState::Ctrl),
            alt: state.contains(EventState::Alt),
            shift: state.contains(EventState::Shift),
            meta: state.contains(EventState::Meta),
        }
    }
}

impl KeyEvent {
    /// Build a KeyEvent from FLTK's current event state. Only meaningful
    /// while handling a keyboard event.
    pub fn capture(event: Event) -> Self {
        let phase = if event == Event::KeyUp {
            KeyPhase::Up
        } else {
            KeyPhase::Down
        };
        Self {
            key: keycode_from_fltk(app::event_key()),
            modifiers: Modifiers::from_event_state(app::event_state()),
            phase,
        }
    }
}

/// The glyph the user actually typed (shift and layout applied), if any.
fn typed_char() -> Option<char> {
    app::event_text().chars().next().filter(|c| !c.is_control())
}

/// Intercept every keyboard event on the editor surface. Allowed events
/// are routed to the editing model through the channel; everything else
/// is consumed here so the widget's default handler never sees it.
pub fn install_interceptor(editor: &mut TextEditor, sender: Sender<Message>) {
    let policy = KeyPolicy::default();
    editor.handle(move |ed, event| match event {
        Event::KeyDown | Event::KeyUp => {
            let key_event = KeyEvent::capture(event);
            match policy.classify(&key_event) {
                Verdict::Escape => {
                    sender.send(Message::Terminate);
                    true
                }
                Verdict::Block => true,
                Verdict::Allow => {
                    if key_event.phase == KeyPhase::Down {
                        if let Some(op) = EditOp::from_key_event(&key_event, typed_char()) {
                            sender.send(Message::Edit(op));
                        }
                    }
                    true
                }
            }
        }
        Event::Unfocus => {
            focus::schedule_refocus(ed.clone());
            false
        }
        // Mouse repositioning is handled by the widget, then mirrored
        // back into the model once the event has settled. Middle-click
        // paste would edit the display buffer behind the model's back.
        Event::Push | Event::Released => {
            if app::event_button() == 2 {
                return true;
            }
            sender.send(Message::SyncCursor);
            false
        }
        _ => false,
    });
}

/// Second interception layer on the window itself. Keyboard events only
/// bubble up here when some control transiently holds focus; they get the
/// same classification, minus the editing ops.
pub fn install_window_guard(window: &mut Window, sender: Sender<Message>) {
    let policy = KeyPolicy::default();
    window.handle(move |_, event| match event {
        Event::KeyDown | Event::KeyUp | Event::Shortcut => {
            if policy.classify(&KeyEvent::capture(event)) == Verdict::Escape {
                sender.send(Message::Terminate);
            }
            true
        }
        Event::Focus => {
            sender.send(Message::WindowFocused);
            false
        }
        Event::Unfocus => {
            sender.send(Message::WindowUnfocused);
            false
        }
        _ => false,
    });
}
