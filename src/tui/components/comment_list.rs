//! # CommentList Component
//!
//! Scrollable thread of the selected post: the post itself, then its
//! comments in order. Optimistic comments (no server id yet) are drawn
//! dimmed with a `sending` marker until the refetch replaces them.
//!
//! `CommentList` is created each frame around `&mut CommentListState`
//! (persistent scroll state) and the post from the cache (props).
//!
//! The post card title also carries the feed status: `refreshing` while an
//! invalidated feed waits for its refetch, `offline` after a failed fetch.
//! Heights saturate at `u16::MAX` rows; anything past that is not drawn.

use chrono::{DateTime, Local, Utc};
use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Padding, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::api::types::{Comment, Post};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::input_box::wrap::wrap_options;
use crate::tui::event::TuiEvent;

/// Borders (2) + horizontal padding (2)
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders
const VERTICAL_OVERHEAD: u16 = 2;

pub struct CommentListState {
    pub scroll_state: ScrollViewState,
    /// Follow new comments while the user has not scrolled up.
    pub stick_to_bottom: bool,
    viewport_height: u16,
    content_height: u16,
}

impl Default for CommentListState {
    fn default() -> Self {
        Self::new()
    }
}

impl CommentListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true,
            viewport_height: 0,
            content_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    fn repin_if_at_bottom(&mut self) {
        let current = self.scroll_state.offset();
        if current.y >= self.max_offset() {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: self.max_offset(),
            });
        }
    }
}

impl EventHandler for CommentListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Rows a card needs for `text` at the given outer width.
fn card_height(text: &str, width: u16) -> u16 {
    let inner = width.saturating_sub(HORIZONTAL_OVERHEAD);
    if inner == 0 {
        return VERTICAL_OVERHEAD + 1;
    }
    let rows = textwrap::wrap(text, wrap_options(inner)).len().max(1);
    u16::try_from(rows)
        .unwrap_or(u16::MAX)
        .saturating_add(VERTICAL_OVERHEAD)
}

fn format_date(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%b %d %H:%M").to_string()
}

fn comment_title(comment: &Comment) -> String {
    let name = if comment.author.name.is_empty() {
        "anonymous"
    } else {
        comment.author.name.as_str()
    };
    match (&comment.created_at, comment.is_provisional()) {
        (_, true) => format!(" {name} · sending "),
        (Some(ts), false) => format!(" {name} · {} ", format_date(ts)),
        (None, false) => format!(" {name} "),
    }
}

fn comment_card(comment: &Comment) -> Paragraph<'_> {
    let (text_style, border_style) = if comment.is_provisional() {
        (
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (
            Style::default(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::DIM),
        )
    };
    Paragraph::new(comment.message.as_str())
        .style(text_style)
        .wrap(Wrap { trim: false })
        .block(
            Block::bordered()
                .title(comment_title(comment))
                .border_style(border_style)
                .padding(Padding::horizontal(1)),
        )
}

/// Feed state shown next to the post title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedStatus<'a> {
    #[default]
    Fresh,
    /// Invalidated, refetch pending
    Refreshing,
    /// Last fetch failed
    Failed(&'a str),
}

fn post_title(post: &Post, status: FeedStatus<'_>) -> String {
    let author = post
        .author
        .as_ref()
        .map(|a| a.name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("anonymous");
    let count = post.comments.len();
    match status {
        FeedStatus::Fresh => format!(" {author} · {count} comments "),
        FeedStatus::Refreshing => format!(" {author} · {count} comments · refreshing "),
        FeedStatus::Failed(_) => format!(" {author} · {count} comments · offline "),
    }
}

fn post_card<'a>(post: &'a Post, status: FeedStatus<'_>) -> Paragraph<'a> {
    Paragraph::new(post.content.as_deref().unwrap_or_default())
        .wrap(Wrap { trim: false })
        .block(
            Block::bordered()
                .title(post_title(post, status))
                .border_style(Style::default().fg(Color::Yellow))
                .padding(Padding::horizontal(1)),
        )
}

pub struct CommentList<'a> {
    pub state: &'a mut CommentListState,
    pub post: Option<&'a Post>,
    /// False when no post id was configured at all.
    pub has_post_id: bool,
    pub feed_status: FeedStatus<'a>,
}

impl<'a> CommentList<'a> {
    pub fn new(state: &'a mut CommentListState, post: Option<&'a Post>, has_post_id: bool) -> Self {
        Self {
            state,
            post,
            has_post_id,
            feed_status: FeedStatus::Fresh,
        }
    }

    pub fn with_feed_status(mut self, feed_status: FeedStatus<'a>) -> Self {
        self.feed_status = feed_status;
        self
    }

    fn render_hint(&self, frame: &mut Frame, area: Rect) {
        let hint = match (self.has_post_id, self.feed_status) {
            (false, _) => {
                String::from("No post selected. Pass --post <ID> or set COMMENTER_POST_ID.")
            }
            (true, FeedStatus::Failed(e)) => format!("Could not load the feed: {e}"),
            (true, _) => String::from("Post not found in the loaded feed."),
        };
        let paragraph = Paragraph::new(hint)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(paragraph, area);
    }
}

impl<'a> Component for CommentList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some(post) = self.post else {
            self.render_hint(frame, area);
            return;
        };

        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        let post_height = card_height(post.content.as_deref().unwrap_or_default(), content_width);
        let heights: Vec<u16> = post
            .comments
            .iter()
            .map(|c| card_height(&c.message, content_width))
            .collect();
        let total_height = heights
            .iter()
            .fold(post_height, |total, h| total.saturating_add(*h));

        self.state.viewport_height = area.height;
        self.state.content_height = total_height;

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        scroll_view.render_widget(
            post_card(post, self.feed_status),
            Rect::new(0, 0, content_width, post_height),
        );
        let mut y_offset = post_height;
        for (comment, height) in post.comments.iter().zip(heights) {
            if y_offset >= total_height {
                break;
            }
            scroll_view.render_widget(
                comment_card(comment),
                Rect::new(0, y_offset, content_width, height.min(total_height - y_offset)),
            );
            y_offset = y_offset.saturating_add(height);
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        } else if self.state.scroll_state.offset().y > self.state.max_offset() {
            let max_y = self.state.max_offset();
            self.state.scroll_state.set_offset(Position { x: 0, y: max_y });
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
