//! # Composer Component
//!
//! The comment form, gated on session status.
//!
//! ```text
//! Loading          Loading session...
//!
//! Authenticated    ╭───╮ ╭──────────────────────────╮
//!                  │AL │ │ draft text, grows with   │
//!                  ╰───╯ │ its content              │
//!                        ╰──────────────────────────╯
//!                                        [ Comment ]
//!
//! Unauthenticated  ┌──────────────────────────────────┐
//!                  │ Write a comment...               │  ← opens login
//!                  └──────────────────────────────────┘
//!                                        [ Comment ]  ← opens login
//! ```
//!
//! Enter and a click on the button go through the same path: the input
//! validates the draft and the composer emits `ComposerEvent::Submit`.
//! The composer never talks to the network itself.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph};

use crate::core::session::SessionStatus;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::avatar::{AVATAR_WIDTH, Avatar};
use crate::tui::components::input_box::{InputBox, InputEvent, PLACEHOLDER};
use crate::tui::event::TuiEvent;

pub const BUTTON_LABEL: &str = "[ Comment ]";
const BUTTON_ROWS: u16 = 1;
const PROMPT_HEIGHT: u16 = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum ComposerEvent {
    Submit(String),
    /// The signed-out prompt was activated.
    OpenLogin,
    ContentChanged,
}

/// # Props
///
/// - `session`: synced from `App` every frame
///
/// # State
///
/// - `input`: the draft field
/// - `button_area` / `prompt_area`: hit areas from the last render
pub struct Composer {
    pub session: SessionStatus,
    pub input: InputBox,
    button_area: Rect,
    prompt_area: Rect,
}

impl Composer {
    pub fn new(max_rows: u16) -> Self {
        Self {
            session: SessionStatus::Loading,
            input: InputBox::new(max_rows),
            button_area: Rect::default(),
            prompt_area: Rect::default(),
        }
    }

    /// Rows the composer needs at the given width.
    pub fn height(&mut self, width: u16) -> u16 {
        match self.session {
            SessionStatus::Loading => 1,
            SessionStatus::Authenticated(_) => {
                self.input
                    .calculate_height(width.saturating_sub(AVATAR_WIDTH))
                    + BUTTON_ROWS
            }
            SessionStatus::Unauthenticated => PROMPT_HEIGHT + BUTTON_ROWS,
        }
    }

    fn clicked(area: Rect, col: u16, row: u16) -> bool {
        area.contains(Position::new(col, row))
    }

    fn button_rect(area: Rect) -> Rect {
        let width = (BUTTON_LABEL.len() as u16).min(area.width);
        Rect {
            x: area.right().saturating_sub(width),
            y: area.bottom().saturating_sub(BUTTON_ROWS),
            width,
            height: BUTTON_ROWS.min(area.height),
        }
    }

    fn render_button(&mut self, frame: &mut Frame, area: Rect, enabled: bool) {
        self.button_area = Self::button_rect(area);
        let style = if enabled {
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        frame.render_widget(Paragraph::new(BUTTON_LABEL).style(style), self.button_area);
    }

    fn render_signed_in(&mut self, frame: &mut Frame, area: Rect) {
        let [avatar_area, form_area] =
            Layout::horizontal([Constraint::Length(AVATAR_WIDTH), Constraint::Min(0)]).areas(area);
        let [input_area, _] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(BUTTON_ROWS)]).areas(form_area);

        let name = self.session.user().and_then(|u| u.name.clone());
        Avatar::new(name).render(frame, avatar_area);
        self.input.render(frame, input_area);
        let enabled = !self.input.buffer.is_empty();
        self.render_button(frame, form_area, enabled);
        self.prompt_area = Rect::default();
    }

    fn render_signed_out(&mut self, frame: &mut Frame, area: Rect) {
        let [prompt_area, _] =
            Layout::vertical([Constraint::Length(PROMPT_HEIGHT), Constraint::Min(0)]).areas(area);
        let prompt = Paragraph::new(PLACEHOLDER)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::bordered().border_style(Style::default().fg(Color::DarkGray)));
        frame.render_widget(prompt, prompt_area);
        self.prompt_area = prompt_area;
        self.render_button(frame, area, false);
    }
}

impl Component for Composer {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        match self.session {
            SessionStatus::Loading => {
                self.button_area = Rect::default();
                self.prompt_area = Rect::default();
                let placeholder = Paragraph::new("Loading session...")
                    .style(Style::default().fg(Color::DarkGray));
                frame.render_widget(placeholder, area);
            }
            SessionStatus::Authenticated(_) => self.render_signed_in(frame, area),
            SessionStatus::Unauthenticated => self.render_signed_out(frame, area),
        }
    }
}

impl EventHandler for Composer {
    type Event = ComposerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match &self.session {
            SessionStatus::Loading => None,
            SessionStatus::Unauthenticated => match event {
                TuiEvent::Submit | TuiEvent::InputChar(_) | TuiEvent::Paste(_) => {
                    Some(ComposerEvent::OpenLogin)
                }
                TuiEvent::MouseClick(col, row)
                    if Self::clicked(self.prompt_area, *col, *row)
                        || Self::clicked(self.button_area, *col, *row) =>
                {
                    Some(ComposerEvent::OpenLogin)
                }
                _ => None,
            },
            SessionStatus::Authenticated(_) => {
                let input_event = match event {
                    // A button click is the same as pressing Enter in the field
                    TuiEvent::MouseClick(col, row) => {
                        if !Self::clicked(self.button_area, *col, *row) {
                            return None;
                        }
                        self.input.handle_event(&TuiEvent::Submit)
                    }
                    other => self.input.handle_event(other),
                };
                input_event.map(|e| match e {
                    InputEvent::Submit(text) => ComposerEvent::Submit(text),
                    InputEvent::ContentChanged => ComposerEvent::ContentChanged,
                })
            }
        }
    }
}
