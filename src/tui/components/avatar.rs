//! # Avatar Component
//!
//! Terminal stand-in for the user's profile picture: their initials in a
//! rounded box. Profile images are URLs, which a terminal cannot show.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::Component;

/// Columns the avatar occupies, including one column of spacing.
pub const AVATAR_WIDTH: u16 = 6;

pub struct Avatar {
    pub name: Option<String>,
}

impl Avatar {
    pub fn new(name: Option<String>) -> Self {
        Self { name }
    }
}

/// Up to two uppercase initials from the first two words. `?` when unknown.
pub fn initials(name: Option<&str>) -> String {
    let letters: String = name
        .unwrap_or_default()
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    if letters.is_empty() {
        "?".to_string()
    } else {
        letters
    }
}

impl Component for Avatar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let area = Rect {
            width: area.width.min(AVATAR_WIDTH - 1),
            height: area.height.min(3),
            ..area
        };
        let avatar = Paragraph::new(initials(self.name.as_deref()))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        frame.render_widget(avatar, area);
    }
}
