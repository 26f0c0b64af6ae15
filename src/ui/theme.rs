use fltk::{enums::Color, prelude::*, text::TextEditor, window::Window};

/// Kiosk palette: dark chrome around a bright, high-contrast text
/// surface sized for large print.
pub fn apply_theme(editor: &mut TextEditor, window: &mut Window) {
    window.set_color(Color::from_rgb(24, 26, 34));

    editor.set_color(Color::from_rgb(250, 250, 245));
    editor.set_text_color(Color::from_rgb(25, 25, 25));
    editor.set_cursor_color(Color::from_rgb(200, 40, 40));
    editor.set_selection_color(Color::from_rgb(173, 216, 230));

    editor.redraw();
    window.redraw();
}
