//! # InputBox Component
//!
//! The text field of the comment composer.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste, backspace, delete, cursor movement)
//! - Re-measure its own height after every content change
//! - Emit `Submit` on Enter when the draft passes validation
//!
//! ## Height
//!
//! Every change resets the measured row count and measures the wrapped text
//! again, so the box grows and shrinks with its content. It never drops
//! below one row. Past `max_rows` the box stops growing and scrolls
//! internally to keep the cursor visible.
//!
//! The buffer is not cleared on submit. Clearing happens when the
//! submission is actually dispatched, which the parent decides.

pub(crate) mod wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::comment::validate_message;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use wrap::{
    BORDER_OFFSET, VERTICAL_OVERHEAD, cursor_position, inner_width, measure_rows,
    next_char_boundary, prev_char_boundary, wrapped_lines,
};

pub const PLACEHOLDER: &str = "Write a comment...";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed with a valid draft. Carries a copy of the text.
    Submit(String),
    ContentChanged,
}

/// # Props
///
/// - `max_rows`: rows the box may grow to before scrolling (from config)
///
/// # State
///
/// - `buffer`: the draft
/// - `cursor`: byte offset into `buffer`
/// - `rows`: wrapped row count from the last measurement
pub struct InputBox {
    pub buffer: String,
    pub max_rows: u16,
    cursor: usize,
    rows: u16,
    scroll_offset: u16,
    /// Area width used by the last measurement
    measured_width: u16,
}

impl InputBox {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new(max_rows: u16) -> Self {
        Self {
            buffer: String::new(),
            max_rows: max_rows.max(1),
            cursor: 0,
            rows: 1,
            scroll_offset: 0,
            measured_width: Self::DEFAULT_WIDTH,
        }
    }

    /// Empties the draft and shrinks back to one row.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.scroll_offset = 0;
        self.remeasure();
    }

    /// Measured content rows (unclamped).
    pub fn rows(&self) -> u16 {
        self.rows
    }

    fn remeasure(&mut self) {
        self.rows = measure_rows(&self.buffer, inner_width(self.measured_width));
    }

    /// Height for an area `area_width` columns wide, borders included.
    /// Re-measures when the width changed since the last measurement.
    pub fn calculate_height(&mut self, area_width: u16) -> u16 {
        if area_width != self.measured_width {
            self.measured_width = area_width;
            self.remeasure();
        }
        self.visible_rows() + VERTICAL_OVERHEAD
    }

    fn visible_rows(&self) -> u16 {
        self.rows.clamp(1, self.max_rows)
    }

    /// Keep the cursor row inside the visible window.
    fn update_scroll_offset(&mut self) {
        let visible = self.visible_rows();
        if self.rows <= visible {
            self.scroll_offset = 0;
            return;
        }
        let (row, _) = cursor_position(&self.buffer, self.cursor, inner_width(self.measured_width));
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + visible {
            self.scroll_offset = row + 1 - visible;
        }
    }

    fn insert(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    fn changed(&mut self) -> Option<InputEvent> {
        self.remeasure();
        self.update_scroll_offset();
        Some(InputEvent::ContentChanged)
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.width != self.measured_width {
            self.measured_width = area.width;
            self.remeasure();
        }
        self.update_scroll_offset();

        let block = Block::bordered().border_type(BorderType::Rounded);

        if self.buffer.is_empty() {
            let placeholder = Paragraph::new(PLACEHOLDER)
                .block(block)
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC));
            frame.render_widget(placeholder, area);
        } else {
            let lines: Vec<Line> = wrapped_lines(&self.buffer, inner_width(area.width))
                .into_iter()
                .skip(self.scroll_offset as usize)
                .take(self.visible_rows() as usize)
                .map(Line::from)
                .collect();
            let input = Paragraph::new(lines).block(block);
            frame.render_widget(input, area);
        }

        let (row, col) = cursor_position(&self.buffer, self.cursor, inner_width(area.width));
        let visible_row = row.saturating_sub(self.scroll_offset);
        frame.set_cursor_position((
            area.x + BORDER_OFFSET + col,
            area.y + BORDER_OFFSET + visible_row,
        ));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut encoded = [0u8; 4];
                self.insert(c.encode_utf8(&mut encoded));
                self.changed()
            }
            TuiEvent::Paste(text) => {
                self.insert(text);
                self.changed()
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                self.changed()
            }
            TuiEvent::Delete => {
                if self.cursor >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                self.changed()
            }
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor != line_start).then(|| {
                    self.cursor = line_start;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor != line_end).then(|| {
                    self.cursor = line_end;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::Submit => validate_message(&self.buffer)
                .ok()
                .map(|message| InputEvent::Submit(message.to_string())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_text(input: &mut InputBox, text: &str) {
        for c in text.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_handle_input() {
        let mut input = InputBox::new(6);

        let res = input.handle_event(&TuiEvent::InputChar('a'));
        assert_eq!(res, Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "a");

        input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(input.buffer, "ab");

        let res = input.handle_event(&TuiEvent::Backspace);
        assert_eq!(res, Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn test_submit_keeps_buffer() {
        let mut input = InputBox::new(6);
        type_text(&mut input, "hello");

        let res = input.handle_event(&TuiEvent::Submit);
        assert_eq!(res, Some(InputEvent::Submit("hello".to_string())));
        // Enter never inserts a newline and does not clear by itself
        assert_eq!(input.buffer, "hello");
    }

    #[test]
    fn test_submit_empty_is_blocked() {
        let mut input = InputBox::new(6);
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
    }

    #[test]
    fn test_clear_resets_height() {
        let mut input = InputBox::new(6);
        input.handle_event(&TuiEvent::Paste("a\nb\nc".to_string()));
        assert_eq!(input.rows(), 3);

        input.clear();
        assert!(input.buffer.is_empty());
        assert_eq!(input.rows(), 1);
        assert_eq!(input.calculate_height(InputBox::DEFAULT_WIDTH), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_height_grows_then_shrinks_to_one_row() {
        let mut input = InputBox::new(6);
        // 12 columns wide: 10 columns of content
        assert_eq!(input.calculate_height(12), 3);

        type_text(&mut input, "aaaaaaaaaabbbbbbbbbbcc");
        assert_eq!(input.rows(), 3);
        assert_eq!(input.calculate_height(12), 5);

        for _ in 0..22 {
            input.handle_event(&TuiEvent::Backspace);
        }
        assert_eq!(input.rows(), 1);
        assert_eq!(input.calculate_height(12), 3);
    }

    #[test]
    fn test_height_is_capped_at_max_rows() {
        let mut input = InputBox::new(2);
        input.handle_event(&TuiEvent::Paste("1\n2\n3\n4".to_string()));
        assert_eq!(input.rows(), 4);
        assert_eq!(input.calculate_height(40), 2 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_cursor_editing_multibyte() {
        let mut input = InputBox::new(6);
        type_text(&mut input, "café");
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "caé");
        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "aé");
        assert_eq!(input.handle_event(&TuiEvent::CursorHome), None);
    }

    #[test]
    fn test_render_shows_placeholder_when_empty() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut input = InputBox::new(6);

        terminal.draw(|f| input.render(f, f.area())).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains(PLACEHOLDER));
    }
}
