use fltk::{
    app::{self, Sender},
    group::{Flex, FlexType},
    image::PngImage,
    prelude::*,
    text::{TextBuffer, TextEditor, WrapMode},
    window::Window,
};

use super::control_bar::{ControlBar, CONTROL_BAR_HEIGHT};
use crate::app::messages::Message;

pub struct MainWidgets {
    pub wind: Window,
    pub flex: Flex,
    pub controls: ControlBar,
    pub editor: TextEditor,
    pub buffer: TextBuffer,
}

pub fn build_main_window(sender: &Sender<Message>) -> MainWidgets {
    let (screen_w, screen_h) = app::screen_size();
    let (w, h) = (screen_w as i32, screen_h as i32);

    let mut wind = Window::new(0, 0, w, h, "KioskPad");
    wind.set_xclass("KioskPad");

    let icon_data = include_bytes!("../../assets/kioskpad-icon.png");
    if let Ok(mut icon) = PngImage::from_data(icon_data) {
        icon.scale(32, 32, true, true);
        #[cfg(target_os = "linux")]
        wind.set_icon(Some(icon));
    }

    let mut flex = Flex::new(0, 0, w, h, None);
    flex.set_type(FlexType::Column);

    let controls = ControlBar::new(sender);
    flex.fixed(&controls.container, CONTROL_BAR_HEIGHT);

    let buffer = TextBuffer::default();
    let mut editor = TextEditor::new(0, 0, 0, 0, "");
    editor.set_buffer(buffer.clone());
    editor.wrap_mode(WrapMode::AtBounds, 0);
    editor.set_linenumber_width(0);

    flex.end();
    wind.resizable(&flex);
    wind.end();

    MainWidgets {
        wind,
        flex,
        controls,
        editor,
        buffer,
    }
}
