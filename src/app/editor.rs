use serde::{Deserialize, Serialize};

use super::keyboard::{KeyCode, KeyEvent};

/// The fixed 9-step font scale, smallest to largest, in FLTK text sizes.
pub const FONT_SIZES: [i32; 9] = [16, 24, 32, 48, 64, 80, 96, 112, 128];

/// Lines a PageUp/PageDown jump moves the cursor.
const PAGE_LINES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseMode {
    AsTyped,
    Upper,
    Lower,
}

/// An editing operation the classification layer has already allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    Insert(char),
    Backspace,
    DeleteForward,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
}

impl EditOp {
    /// Map an allowed key event to its editing operation. `typed` is the
    /// glyph the event produced, shift and layout applied. Allowed events
    /// without an operation (plain ctrl chords) map to None.
    pub fn from_key_event(event: &KeyEvent, typed: Option<char>) -> Option<EditOp> {
        match event.key {
            KeyCode::Backspace => Some(EditOp::Backspace),
            KeyCode::Delete => Some(EditOp::DeleteForward),
            KeyCode::Left => Some(EditOp::Left),
            KeyCode::Right => Some(EditOp::Right),
            KeyCode::Up => Some(EditOp::Up),
            KeyCode::Down => Some(EditOp::Down),
            KeyCode::Home => Some(EditOp::Home),
            KeyCode::End => Some(EditOp::End),
            KeyCode::PageUp => Some(EditOp::PageUp),
            KeyCode::PageDown => Some(EditOp::PageDown),
            KeyCode::Enter => Some(EditOp::Insert('\n')),
            KeyCode::Tab => Some(EditOp::Insert('\t')),
            KeyCode::Char(_) => {
                if event.modifiers.ctrl {
                    None
                } else {
                    typed.map(EditOp::Insert)
                }
            }
            _ => None,
        }
    }
}

/// The editor's owned state: the as-typed text (never case-transformed),
/// the cursor as a char index, and the two display controls. Mutated only
/// through named operations; lives for the whole process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    text: String,
    cursor: usize,
    font_size_index: usize,
    case_mode: CaseMode,
}

impl EditorState {
    pub fn new(font_size_index: usize, case_mode: CaseMode) -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            font_size_index: font_size_index.min(FONT_SIZES.len() - 1),
            case_mode,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn apply(&mut self, op: EditOp) {
        match op {
            EditOp::Insert(c) => {
                let at = byte_index_of_char(&self.text, self.cursor);
                self.text.insert(at, c);
                self.cursor += 1;
            }
            EditOp::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = byte_index_of_char(&self.text, self.cursor);
                    self.text.remove(at);
                }
            }
            EditOp::DeleteForward => {
                if self.cursor < self.char_count() {
                    let at = byte_index_of_char(&self.text, self.cursor);
                    self.text.remove(at);
                }
            }
            EditOp::Left => self.cursor = self.cursor.saturating_sub(1),
            EditOp::Right => self.cursor = (self.cursor + 1).min(self.char_count()),
            EditOp::Home => self.cursor = self.line_bounds().0,
            EditOp::End => self.cursor = self.line_bounds().1,
            EditOp::Up => self.move_lines(-1),
            EditOp::Down => self.move_lines(1),
            EditOp::PageUp => self.move_lines(-(PAGE_LINES as isize)),
            EditOp::PageDown => self.move_lines(PAGE_LINES as isize),
        }
    }

    /// Clamp-set the cursor to a char index, used when the display widget
    /// repositions it (mouse click).
    pub fn set_cursor(&mut self, char_index: usize) {
        self.cursor = char_index.min(self.char_count());
    }

    // --- Font scale ---

    pub fn font_size_index(&self) -> usize {
        self.font_size_index
    }

    pub fn font_size(&self) -> i32 {
        FONT_SIZES[self.font_size_index]
    }

    pub fn at_smallest(&self) -> bool {
        self.font_size_index == 0
    }

    pub fn at_largest(&self) -> bool {
        self.font_size_index == FONT_SIZES.len() - 1
    }

    /// Step the scale up. Returns false when already at the top bound.
    pub fn font_bigger(&mut self) -> bool {
        if self.at_largest() {
            return false;
        }
        self.font_size_index += 1;
        true
    }

    /// Step the scale down. Returns false when already at the bottom bound.
    pub fn font_smaller(&mut self) -> bool {
        if self.at_smallest() {
            return false;
        }
        self.font_size_index -= 1;
        true
    }

    // --- Case mode ---

    pub fn case_mode(&self) -> CaseMode {
        self.case_mode
    }

    pub fn set_case_mode(&mut self, mode: CaseMode) {
        self.case_mode = mode;
    }

    /// The text as shown: the case transform is display-only and keeps
    /// the char count of the stored text (one glyph per glyph).
    pub fn display_text(&self) -> String {
        match self.case_mode {
            CaseMode::AsTyped => self.text.clone(),
            CaseMode::Upper => map_chars(&self.text, |c| c.to_uppercase().next().unwrap_or(c)),
            CaseMode::Lower => map_chars(&self.text, |c| c.to_lowercase().next().unwrap_or(c)),
        }
    }

    // --- Counters ---

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    // --- Line arithmetic, all in char indices ---

    /// (start, end) of the line holding the cursor, end excluding the
    /// trailing newline.
    fn line_bounds(&self) -> (usize, usize) {
        let starts = line_starts(&self.text);
        let line = line_of(&starts, self.cursor);
        (starts[line], line_end(&starts, line, self.char_count()))
    }

    fn move_lines(&mut self, delta: isize) {
        let starts = line_starts(&self.text);
        let line = line_of(&starts, self.cursor);
        let col = self.cursor - starts[line];
        let target = line
            .saturating_add_signed(delta)
            .min(starts.len() - 1);
        let end = line_end(&starts, target, self.char_count());
        self.cursor = (starts[target] + col).min(end);
    }
}

fn map_chars(text: &str, f: impl Fn(char) -> char) -> String {
    text.chars().map(f).collect()
}

/// Char indices at which each line starts.
fn line_starts(text: &str) -> Vec<usize> {
    let mut starts = vec![0];
    for (i, c) in text.chars().enumerate() {
        if c == '\n' {
            starts.push(i + 1);
        }
    }
    starts
}

fn line_of(starts: &[usize], cursor: usize) -> usize {
    starts.partition_point(|s| *s <= cursor) - 1
}

fn line_end(starts: &[usize], line: usize, total_chars: usize) -> usize {
    if line + 1 < starts.len() {
        starts[line + 1] - 1
    } else {
        total_chars
    }
}

/// Byte offset of a char index; `char_index` past the end maps to the
/// end of the string.
pub fn byte_index_of_char(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::keyboard::{KeyPhase, Modifiers};

    fn state() -> EditorState {
        EditorState::new(FONT_SIZES.len() - 1, CaseMode::Upper)
    }

    fn type_str(st: &mut EditorState, s: &str) {
        for c in s.chars() {
            st.apply(EditOp::Insert(c));
        }
    }

    #[test]
    fn test_insert_and_counts() {
        let mut st = state();
        type_str(&mut st, "hello world");
        assert_eq!(st.text(), "hello world");
        assert_eq!(st.char_count(), 11);
        assert_eq!(st.word_count(), 2);
    }

    #[test]
    fn test_count_edge_cases() {
        let mut st = state();
        assert_eq!(st.char_count(), 0);
        assert_eq!(st.word_count(), 0);

        type_str(&mut st, "  ");
        assert_eq!(st.char_count(), 2);
        assert_eq!(st.word_count(), 0);
    }

    #[test]
    fn test_word_count_collapses_runs_of_whitespace() {
        let mut st = state();
        type_str(&mut st, "a  b   c");
        assert_eq!(st.word_count(), 3);
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut st = state();
        type_str(&mut st, "abc");
        st.apply(EditOp::Backspace);
        assert_eq!(st.text(), "ab");
        st.apply(EditOp::Left);
        st.apply(EditOp::DeleteForward);
        assert_eq!(st.text(), "a");
        // At the boundaries both are no-ops.
        st.apply(EditOp::DeleteForward);
        assert_eq!(st.text(), "a");
        st.apply(EditOp::Left);
        st.apply(EditOp::Backspace);
        assert_eq!(st.text(), "a");
        assert_eq!(st.cursor(), 0);
    }

    #[test]
    fn test_insert_mid_text() {
        let mut st = state();
        type_str(&mut st, "ac");
        st.apply(EditOp::Left);
        st.apply(EditOp::Insert('b'));
        assert_eq!(st.text(), "abc");
        assert_eq!(st.cursor(), 2);
    }

    #[test]
    fn test_multibyte_text_editing() {
        let mut st = state();
        type_str(&mut st, "héllo");
        assert_eq!(st.char_count(), 5);
        st.apply(EditOp::Home);
        st.apply(EditOp::Right);
        st.apply(EditOp::DeleteForward);
        assert_eq!(st.text(), "hllo");
    }

    #[test]
    fn test_home_end_and_vertical_moves() {
        let mut st = state();
        type_str(&mut st, "one\nlonger line\nx");
        // Cursor sits at the very end.
        st.apply(EditOp::Home);
        assert_eq!(st.cursor(), 16);
        st.apply(EditOp::Up);
        st.apply(EditOp::End);
        assert_eq!(st.cursor(), 15);
        st.apply(EditOp::Up);
        // Column clamps to the shorter first line.
        assert_eq!(st.cursor(), 3);
        st.apply(EditOp::Down);
        st.apply(EditOp::Down);
        st.apply(EditOp::Down);
        // Moving past the last line clamps to its end.
        assert_eq!(st.cursor(), 17);
    }

    #[test]
    fn test_page_moves_clamp() {
        let mut st = state();
        type_str(&mut st, "a\nb\nc");
        // Column 1 is kept while the line clamps to the first.
        st.apply(EditOp::PageUp);
        assert_eq!(st.cursor(), 1);
        st.apply(EditOp::Home);
        st.apply(EditOp::PageDown);
        assert_eq!(st.cursor(), 4);
    }

    #[test]
    fn test_font_scale_is_ascending() {
        for pair in FONT_SIZES.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_font_stepping_clamps_at_bounds() {
        let mut st = state();
        assert_eq!(st.font_size_index(), 8);
        assert!(st.at_largest());
        assert!(!st.font_bigger());
        assert_eq!(st.font_size_index(), 8);

        for _ in 0..FONT_SIZES.len() {
            st.font_smaller();
        }
        assert_eq!(st.font_size_index(), 0);
        assert!(st.at_smallest());
        assert!(!st.font_smaller());
        assert_eq!(st.font_size_index(), 0);

        assert!(st.font_bigger());
        assert_eq!(st.font_size(), FONT_SIZES[1]);
    }

    #[test]
    fn test_out_of_range_start_index_clamps() {
        let st = EditorState::new(99, CaseMode::AsTyped);
        assert_eq!(st.font_size_index(), 8);
    }

    #[test]
    fn test_case_transform_is_display_only() {
        let mut st = state();
        type_str(&mut st, "Hello World");
        assert_eq!(st.case_mode(), CaseMode::Upper);
        assert_eq!(st.display_text(), "HELLO WORLD");
        assert_eq!(st.text(), "Hello World");

        st.set_case_mode(CaseMode::Lower);
        assert_eq!(st.display_text(), "hello world");
        assert_eq!(st.text(), "Hello World");

        st.set_case_mode(CaseMode::AsTyped);
        assert_eq!(st.display_text(), "Hello World");
    }

    #[test]
    fn test_case_transform_preserves_char_count() {
        let mut st = state();
        type_str(&mut st, "straße");
        st.set_case_mode(CaseMode::Upper);
        assert_eq!(
            st.display_text().chars().count(),
            st.text().chars().count()
        );
    }

    #[test]
    fn test_set_cursor_clamps() {
        let mut st = state();
        type_str(&mut st, "ab");
        st.set_cursor(99);
        assert_eq!(st.cursor(), 2);
    }

    #[test]
    fn test_edit_op_mapping() {
        let event = |key, ctrl| KeyEvent {
            key,
            modifiers: Modifiers {
                ctrl,
                ..Modifiers::default()
            },
            phase: KeyPhase::Down,
        };

        assert_eq!(
            EditOp::from_key_event(&event(KeyCode::Enter, false), None),
            Some(EditOp::Insert('\n'))
        );
        assert_eq!(
            EditOp::from_key_event(&event(KeyCode::Tab, false), None),
            Some(EditOp::Insert('\t'))
        );
        assert_eq!(
            EditOp::from_key_event(&event(KeyCode::Char('a'), false), Some('a')),
            Some(EditOp::Insert('a'))
        );
        // Plain ctrl chords are allowed by the policy but are no-ops here.
        assert_eq!(
            EditOp::from_key_event(&event(KeyCode::Char('c'), true), Some('c')),
            None
        );
        assert_eq!(
            EditOp::from_key_event(&event(KeyCode::Backspace, false), None),
            Some(EditOp::Backspace)
        );
    }

    #[test]
    fn test_byte_index_of_char() {
        assert_eq!(byte_index_of_char("héllo", 0), 0);
        assert_eq!(byte_index_of_char("héllo", 2), 3);
        assert_eq!(byte_index_of_char("héllo", 99), 6);
    }
}
