use fltk::{
    prelude::*,
    text::{TextBuffer, TextEditor},
    window::Window,
};

use super::containment::{Shell, ShortcutGuard};
use super::editor::{byte_index_of_char, CaseMode, EditOp, EditorState};
use super::settings::AppSettings;
use crate::ui::control_bar::ControlBar;
use crate::ui::main_window::MainWidgets;

/// Main application coordinator: owns the editing model, the widgets it
/// is projected onto, and the containment shell.
pub struct AppState {
    pub model: EditorState,
    pub editor: TextEditor,
    pub buffer: TextBuffer,
    pub window: Window,
    pub controls: ControlBar,
    pub shell: Shell,
    pub guard: ShortcutGuard,
    pub settings: AppSettings,
}

impl AppState {
    pub fn new(widgets: MainWidgets, settings: AppSettings) -> Self {
        let model = EditorState::new(settings.font_size_index, settings.case_mode);
        let guard = if settings.suppress_global_shortcuts {
            ShortcutGuard::new()
        } else {
            ShortcutGuard::disabled()
        };
        Self {
            model,
            editor: widgets.editor,
            buffer: widgets.buffer,
            window: widgets.wind,
            controls: widgets.controls,
            shell: Shell::new(),
            guard,
            settings,
        }
    }

    /// Initial paint: font size, display text, counters, control states.
    pub fn refresh_all(&mut self) {
        self.editor.set_text_size(self.model.font_size());
        self.render_editor();
        self.controls.sync(&self.model);
    }

    pub fn apply_edit(&mut self, op: EditOp) {
        self.model.apply(op);
        self.render_editor();
        self.controls.sync(&self.model);
    }

    /// Mirror a mouse repositioning of the display cursor into the model.
    pub fn sync_cursor_from_display(&mut self) {
        let display = self.model.display_text();
        let mut pos = self.editor.insert_position().max(0) as usize;
        pos = pos.min(display.len());
        while pos > 0 && !display.is_char_boundary(pos) {
            pos -= 1;
        }
        self.model.set_cursor(display[..pos].chars().count());
    }

    pub fn font_bigger(&mut self) {
        if self.model.font_bigger() {
            self.apply_font_size();
        }
    }

    pub fn font_smaller(&mut self) {
        if self.model.font_smaller() {
            self.apply_font_size();
        }
    }

    fn apply_font_size(&mut self) {
        self.editor.set_text_size(self.model.font_size());
        self.render_editor();
        self.controls.sync(&self.model);
        self.editor.redraw();
    }

    pub fn set_case_mode(&mut self, mode: CaseMode) {
        self.model.set_case_mode(mode);
        self.render_editor();
        self.controls.sync(&self.model);
    }

    pub fn refuse_close(&mut self) {
        self.shell.close_requested();
    }

    pub fn on_window_focused(&mut self) {
        if self.settings.suppress_global_shortcuts {
            self.guard.engage();
        }
    }

    pub fn on_window_unfocused(&mut self) {
        self.guard.release();
    }

    pub fn terminate(&mut self) {
        self.shell.escape();
        self.guard.release();
        log::info!("escape combination received, terminating");
    }

    /// Rewrite the display buffer from the model and restore the cursor.
    /// The buffer always holds the transformed view; the model keeps the
    /// as-typed text.
    fn render_editor(&mut self) {
        let display = self.model.display_text();
        let pos = byte_index_of_char(&display, self.model.cursor());
        self.buffer.set_text(&display);
        self.editor.set_insert_position(pos as i32);
        self.editor.show_insert_position();
    }
}
