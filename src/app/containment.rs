//! Host containment shell: window hardening, refusal of ordinary
//! termination paths, and best-effort OS-global shortcut suppression.

use fltk::{prelude::*, window::Window};
use global_hotkey::hotkey::{Code, HotKey, Modifiers};
use global_hotkey::GlobalHotKeyManager;

/// Process lifetime phases. Only the escape verdict leaves `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellPhase {
    Starting,
    Running,
    Terminating,
}

/// The window-lifecycle state machine. Close, quit and reload requests
/// are expected adversarial inputs and are counted and refused; the
/// escape verdict is the single transition out.
#[derive(Debug)]
pub struct Shell {
    phase: ShellPhase,
    refused_closes: u32,
}

impl Shell {
    pub fn new() -> Self {
        Self {
            phase: ShellPhase::Starting,
            refused_closes: 0,
        }
    }

    pub fn phase(&self) -> ShellPhase {
        self.phase
    }

    /// The privileged surface exists and is shown.
    pub fn surface_ready(&mut self) {
        if self.phase == ShellPhase::Starting {
            self.phase = ShellPhase::Running;
        }
    }

    /// A close/quit request from the window system. Always refused while
    /// the shell lives.
    pub fn close_requested(&mut self) {
        self.refused_closes += 1;
        log::debug!(
            "close request refused ({} so far); exit with Ctrl+Alt+Shift+Q",
            self.refused_closes
        );
    }

    pub fn refused_closes(&self) -> u32 {
        self.refused_closes
    }

    /// The escape verdict. Unconditional and immediate.
    pub fn escape(&mut self) {
        self.phase = ShellPhase::Terminating;
    }

    pub fn is_terminating(&self) -> bool {
        self.phase == ShellPhase::Terminating
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply the kiosk window policy: full-screen, borderless, kept on top.
/// Call after `show()`, topmost needs a realized window on some
/// platforms.
pub fn harden_window(window: &mut Window) {
    window.set_border(false);
    window.fullscreen(true);
    window.set_on_top();
}

/// Suppression of OS-global shortcuts while the kiosk window is focused.
/// Registering a combination with no action swallows it ahead of the
/// desktop shell. Everything here is best-effort: a manager that cannot
/// be created or a combination that cannot be grabbed is logged and
/// skipped, never fatal. Engage and release are idempotent.
pub struct ShortcutGuard {
    manager: Option<GlobalHotKeyManager>,
    combos: Vec<HotKey>,
    engaged: bool,
}

impl ShortcutGuard {
    pub fn new() -> Self {
        let manager = match GlobalHotKeyManager::new() {
            Ok(m) => Some(m),
            Err(e) => {
                log::warn!("global shortcut suppression unavailable: {e}");
                None
            }
        };
        Self {
            manager,
            combos: suppressed_combos(),
            engaged: false,
        }
    }

    /// A guard that never registers anything, for deployments that turn
    /// suppression off.
    pub fn disabled() -> Self {
        Self {
            manager: None,
            combos: suppressed_combos(),
            engaged: false,
        }
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    pub fn combos(&self) -> &[HotKey] {
        &self.combos
    }

    pub fn engage(&mut self) {
        if self.engaged {
            return;
        }
        self.engaged = true;
        let Some(manager) = &self.manager else {
            return;
        };
        for combo in &self.combos {
            if let Err(e) = manager.register(*combo) {
                log::warn!("could not suppress {combo:?}: {e}");
            }
        }
        log::debug!("global shortcut suppression engaged");
    }

    pub fn release(&mut self) {
        if !self.engaged {
            return;
        }
        self.engaged = false;
        let Some(manager) = &self.manager else {
            return;
        };
        for combo in &self.combos {
            if let Err(e) = manager.unregister(*combo) {
                log::debug!("could not release {combo:?}: {e}");
            }
        }
        log::debug!("global shortcut suppression released");
    }
}

impl Default for ShortcutGuard {
    fn default() -> Self {
        Self::new()
    }
}

fn primary_modifier() -> Modifiers {
    if cfg!(target_os = "macos") {
        Modifiers::META
    } else {
        Modifiers::CONTROL
    }
}

/// The fixed set of combinations grabbed while focused: reload, close,
/// quit, dev-tools, Alt+F4, and the common Super-key actions.
fn suppressed_combos() -> Vec<HotKey> {
    let primary = primary_modifier();
    let mut combos = vec![
        HotKey::new(Some(primary), Code::KeyR),
        HotKey::new(Some(primary | Modifiers::SHIFT), Code::KeyR),
        HotKey::new(None, Code::F5),
        HotKey::new(None, Code::F11),
        HotKey::new(None, Code::F12),
        HotKey::new(Some(primary), Code::KeyW),
        HotKey::new(Some(primary), Code::KeyQ),
        HotKey::new(Some(Modifiers::ALT), Code::F4),
    ];
    for code in [
        Code::KeyD,
        Code::KeyE,
        Code::KeyL,
        Code::KeyR,
        Code::KeyS,
        Code::Tab,
        Code::Space,
        Code::KeyM,
        Code::KeyA,
    ] {
        combos.push(HotKey::new(Some(Modifiers::SUPER), code));
    }
    combos
}
