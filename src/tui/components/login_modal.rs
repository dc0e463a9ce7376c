//! # Login Modal
//!
//! Overlay shown when a signed-out user activates the composer. Signing in
//! happens in the browser; this only says where, and lets the user re-check
//! the session once they have a token configured.
//!
//! Follows the persistent state + render pattern used by the other overlays:
//! `LoginModalState` lives in `TuiState` while the modal is open.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::tui::event::TuiEvent;

pub struct LoginModalState {
    pub sign_in_url: String,
    /// True after a re-check was requested, until the session answers.
    pub checking: bool,
}

pub enum LoginEvent {
    Recheck,
    Dismiss,
}

impl LoginModalState {
    pub fn new(sign_in_url: String) -> Self {
        Self {
            sign_in_url,
            checking: false,
        }
    }

    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<LoginEvent> {
        match event {
            TuiEvent::Escape => Some(LoginEvent::Dismiss),
            TuiEvent::InputChar('r') | TuiEvent::Submit => {
                self.checking = true;
                Some(LoginEvent::Recheck)
            }
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 50, area);
        frame.render_widget(Clear, overlay);

        let help_text = if self.checking {
            " Checking session... "
        } else {
            " r / Enter Re-check  Esc Close "
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Sign in to comment ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::uniform(1));

        let lines = vec![
            Line::from("You need to be signed in to write a comment."),
            Line::from(""),
            Line::from("Sign in with your browser:"),
            Line::from(Span::styled(
                self.sign_in_url.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Then copy the session cookie into COMMENTER_SESSION_TOKEN \
                 or [api].session_token in ~/.commenter/config.toml, and re-check.",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let body = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
        frame.render_widget(body, overlay);
    }
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_escape_dismisses() {
        let mut modal = LoginModalState::new("http://forum/api/auth/signin".to_string());
        assert!(matches!(modal.handle_event(&TuiEvent::Escape), Some(LoginEvent::Dismiss)));
    }

    #[test]
    fn test_recheck_marks_checking() {
        let mut modal = LoginModalState::new("http://forum/api/auth/signin".to_string());
        assert!(matches!(
            modal.handle_event(&TuiEvent::InputChar('r')),
            Some(LoginEvent::Recheck)
        ));
        assert!(modal.checking);
        assert!(modal.handle_event(&TuiEvent::InputChar('x')).is_none());
    }

    #[test]
    fn test_render_shows_sign_in_url() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let modal = LoginModalState::new("http://forum/signin".to_string());

        terminal.draw(|f| modal.render(f, f.area())).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("http://forum/signin"));
        assert!(text.contains("Sign in to comment"));
    }
}
