//! # TitleBar Component
//!
//! Top status line: which post the composer writes to and what is going on.
//!
//! Stateless. All three props are synced from `App` before each frame:
//!
//! 1. **Post + status**: `"Commenter (post: clx1) | Posting comment..."`
//! 2. **Post only**: `"Commenter (post: clx1)"`
//! 3. **No post**: `"Commenter (no post) | No post selected"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    pub post_id: Option<String>,
    pub status_message: String,
    /// Comments submitted but not yet settled
    pub pending_comments: usize,
}

impl TitleBar {
    pub fn new(post_id: Option<String>, status_message: String, pending_comments: usize) -> Self {
        Self {
            post_id,
            status_message,
            pending_comments,
        }
    }

    fn title_text(&self) -> String {
        let post = match &self.post_id {
            Some(id) => format!("Commenter (post: {id})"),
            None => String::from("Commenter (no post)"),
        };
        if self.status_message.is_empty() {
            post
        } else {
            format!("{post} | {}", self.status_message)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::raw(self.title_text())];
        if self.pending_comments > 1 {
            spans.push(Span::styled(
                format!(" ({} pending)", self.pending_comments),
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Line::from(spans), area);
    }
}
