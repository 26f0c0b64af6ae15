pub mod control_bar;
pub mod main_window;
pub mod theme;
