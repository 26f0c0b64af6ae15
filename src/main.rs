use fltk::{app, prelude::*};

use kiosk_pad::app::state::AppState;
use kiosk_pad::app::{containment, focus, keyboard, AppSettings, Message};
use kiosk_pad::ui::main_window::build_main_window;
use kiosk_pad::ui::theme::apply_theme;

fn main() {
    env_logger::init();

    let settings = AppSettings::load();
    let app = app::App::default();
    let (sender, receiver) = app::channel::<Message>();

    let mut widgets = build_main_window(&sender);
    apply_theme(&mut widgets.editor, &mut widgets.wind);
    widgets.controls.apply_theme();

    keyboard::install_interceptor(&mut widgets.editor, sender);
    keyboard::install_window_guard(&mut widgets.wind, sender);

    // The window callback fires on every close request (and on Escape,
    // which the interceptor already swallows). Never closes the window.
    widgets.wind.set_callback({
        let s = sender;
        move |_| s.send(Message::CloseRequested)
    });

    let mut state = AppState::new(widgets, settings);

    state.window.show();
    containment::harden_window(&mut state.window);
    state.shell.surface_ready();

    focus::install_retention(&state.editor, state.settings.focus_poll_ms);
    let _ = state.editor.take_focus();
    state.refresh_all();

    log::info!("KioskPad running full-screen; exit with Ctrl+Alt+Shift+Q");

    while app.wait() {
        if let Some(msg) = receiver.recv() {
            match msg {
                Message::Edit(op) => state.apply_edit(op),
                Message::SyncCursor => state.sync_cursor_from_display(),
                Message::FontBigger => state.font_bigger(),
                Message::FontSmaller => state.font_smaller(),
                Message::SetCaseMode(mode) => state.set_case_mode(mode),
                Message::CloseRequested => state.refuse_close(),
                Message::WindowFocused => state.on_window_focused(),
                Message::WindowUnfocused => state.on_window_unfocused(),
                Message::Terminate => {
                    state.terminate();
                    break;
                }
            }
        }
    }
    // Terminating is terminal: drop everything and exit 0.
}
