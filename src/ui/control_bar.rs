use fltk::{
    app::Sender,
    button::{Button, ToggleButton},
    enums::{Align, Color, FrameType},
    frame::Frame,
    group::{Flex, FlexType},
    prelude::*,
};

use crate::app::editor::{CaseMode, EditorState, FONT_SIZES};
use crate::app::messages::Message;

pub const CONTROL_BAR_HEIGHT: i32 = 64;

/// The kiosk's only chrome: font stepper, case selector and live
/// counters. Every control posts a message; `sync` projects the model
/// back onto the widgets, so the bar never owns state of its own.
pub struct ControlBar {
    pub container: Flex,
    font_smaller: Button,
    font_bigger: Button,
    size_display: Frame,
    case_as_typed: ToggleButton,
    case_upper: ToggleButton,
    case_lower: ToggleButton,
    char_count: Frame,
    word_count: Frame,
}

impl ControlBar {
    pub fn new(sender: &Sender<Message>) -> Self {
        let mut container = Flex::new(0, 0, 0, CONTROL_BAR_HEIGHT, None);
        container.set_type(FlexType::Row);
        container.set_margin(8);
        container.set_spacing(8);

        let font_smaller = control_button(&mut container, "A\u{2212}", 64, {
            let s = *sender;
            move |_| s.send(Message::FontSmaller)
        });
        let font_bigger = control_button(&mut container, "A+", 64, {
            let s = *sender;
            move |_| s.send(Message::FontBigger)
        });

        let mut size_display = Frame::default();
        size_display.set_label_size(18);
        container.fixed(&size_display, 72);

        let case_as_typed = case_button(&mut container, "Aa", CaseMode::AsTyped, sender);
        let case_upper = case_button(&mut container, "AA", CaseMode::Upper, sender);
        let case_lower = case_button(&mut container, "aa", CaseMode::Lower, sender);

        // Flexible spacer pushes the counters to the right edge.
        let _spacer = Frame::default();

        let mut char_count = Frame::default();
        char_count.set_label_size(18);
        char_count.set_align(Align::Right | Align::Inside);
        container.fixed(&char_count, 240);

        let mut word_count = Frame::default();
        word_count.set_label_size(18);
        word_count.set_align(Align::Right | Align::Inside);
        container.fixed(&word_count, 180);

        container.end();

        Self {
            container,
            font_smaller,
            font_bigger,
            size_display,
            case_as_typed,
            case_upper,
            case_lower,
            char_count,
            word_count,
        }
    }

    /// Project the model onto the controls: stepper bounds, the exclusive
    /// case selection, size indicator and counters.
    pub fn sync(&mut self, state: &EditorState) {
        self.size_display.set_label(&format!(
            "{} / {}",
            state.font_size_index() + 1,
            FONT_SIZES.len()
        ));

        set_enabled(&mut self.font_smaller, !state.at_smallest());
        set_enabled(&mut self.font_bigger, !state.at_largest());

        self.case_as_typed
            .set_value(state.case_mode() == CaseMode::AsTyped);
        self.case_upper.set_value(state.case_mode() == CaseMode::Upper);
        self.case_lower.set_value(state.case_mode() == CaseMode::Lower);

        self.char_count
            .set_label(&format!("Characters: {}", state.char_count()));
        self.word_count
            .set_label(&format!("Words: {}", state.word_count()));
    }

    pub fn apply_theme(&mut self) {
        self.container.set_frame(FrameType::FlatBox);
        self.container.set_color(Color::from_rgb(24, 26, 34));
        for btn in [&mut self.font_smaller, &mut self.font_bigger] {
            btn.set_color(Color::from_rgb(58, 62, 78));
            btn.set_label_color(Color::White);
        }
        for btn in [
            &mut self.case_as_typed,
            &mut self.case_upper,
            &mut self.case_lower,
        ] {
            btn.set_color(Color::from_rgb(58, 62, 78));
            btn.set_selection_color(Color::from_rgb(96, 140, 220));
            btn.set_label_color(Color::White);
        }
        for frame in [
            &mut self.size_display,
            &mut self.char_count,
            &mut self.word_count,
        ] {
            frame.set_label_color(Color::from_rgb(220, 220, 220));
        }
        self.container.redraw();
    }
}

fn control_button(
    container: &mut Flex,
    label: &str,
    width: i32,
    callback: impl FnMut(&mut Button) + 'static,
) -> Button {
    let mut btn = Button::default().with_label(label);
    btn.set_label_size(24);
    btn.clear_visible_focus();
    btn.set_callback(callback);
    container.fixed(&btn, width);
    btn
}

fn case_button(
    container: &mut Flex,
    label: &str,
    mode: CaseMode,
    sender: &Sender<Message>,
) -> ToggleButton {
    let mut btn = ToggleButton::default().with_label(label);
    btn.set_label_size(24);
    btn.clear_visible_focus();
    btn.set_callback({
        let s = *sender;
        move |_| s.send(Message::SetCaseMode(mode))
    });
    container.fixed(&btn, 64);
    btn
}

fn set_enabled<W: WidgetExt>(widget: &mut W, enabled: bool) {
    if enabled {
        widget.activate();
    } else {
        widget.deactivate();
    }
}
