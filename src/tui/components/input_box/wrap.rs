//! Wrapping and measurement helpers for the comment input.
//!
//! Stateless: every function takes the buffer explicitly. The input owns the
//! text, these only measure it.

use unicode_width::UnicodeWidthStr;

/// Left + right border of the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 2;
/// Top + bottom borders
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Offset from area edge to content (border width)
pub(super) const BORDER_OFFSET: u16 = 1;

/// Wrapping that matches ratatui's `Paragraph` with `Wrap { trim: false }`.
pub(crate) fn wrap_options(inner_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(inner_width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Content width inside the borders. 0 if the area is too narrow.
pub(super) fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Wrapped lines of `text`, one entry per rendered row.
pub(super) fn wrapped_lines(text: &str, width: u16) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }
    let mut lines: Vec<String> = textwrap::wrap(text, wrap_options(width))
        .into_iter()
        .map(|line| line.into_owned())
        .collect();
    if text.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()) {
        lines.push(String::new());
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Rows needed to show `text` at `width`. Never less than one.
pub(super) fn measure_rows(text: &str, width: u16) -> u16 {
    if width == 0 || text.is_empty() {
        return 1;
    }
    u16::try_from(wrapped_lines(text, width).len())
        .unwrap_or(u16::MAX)
        .max(1)
}

/// Row and column of the byte offset `pos`, in wrapped coordinates.
pub(super) fn cursor_position(text: &str, pos: usize, width: u16) -> (u16, u16) {
    if width == 0 {
        return (0, 0);
    }
    let before = &text[..pos];
    let row = measure_rows(before, width).saturating_sub(1);

    // Column from the last wrapped segment of the current logical line.
    // Wrapping trims spaces at break points, so widths are taken from the
    // original text rather than the wrapped output.
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let logical = &before[line_start..];
    let segments = textwrap::wrap(logical, wrap_options(width));
    let consumed: usize = segments
        .iter()
        .take(segments.len().saturating_sub(1))
        .map(|seg| seg.width())
        .sum();
    let col = u16::try_from(logical.width().saturating_sub(consumed)).unwrap_or(u16::MAX);

    // A full row keeps the cursor on its last cell, off the border
    (row, col.min(width.saturating_sub(1)))
}

pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
