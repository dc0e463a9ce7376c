//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard and mouse events into `core::Action` values, and
//! performs the `Effect`s that `update()` returns.
//!
//! ## Effects
//!
//! Remote calls run as tokio tasks. Each one sends exactly one `Action`
//! back over an `mpsc` channel, which the loop drains between frames:
//!
//! ```text
//! Effect::CheckSession       ──► client.session()        ──► SessionResolved / SessionFailed
//! Effect::FetchPosts         ──► client.infinite_posts() ──► PostsFetched
//! Effect::AddComment(input)  ──► client.add_comment()    ──► CommentSettled
//! ```
//!
//! Only one feed fetch is kept alive at a time. Starting a comment aborts it;
//! the cache generation check drops its result if it still arrives.
//!
//! ## Redraw Strategy
//!
//! Idle frames sleep up to 250ms and only redraw on events, resizes, or
//! actions from background tasks.

mod component;
pub mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::api::types::AddCommentInput;
use crate::api::{ForumClient, TrpcForumClient};
use crate::core::action::{Action, Effect, update};
use crate::core::cache::PostListKey;
use crate::core::config::ResolvedConfig;
use crate::core::session::SessionStatus;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    CommentListState, Composer, ComposerEvent, LoginEvent, LoginModalState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub comment_list: CommentListState,
    pub composer: Composer,
    /// Login overlay (None = hidden)
    pub login_modal: Option<LoginModalState>,
}

impl TuiState {
    pub fn new(max_input_rows: u16) -> Self {
        Self {
            comment_list: CommentListState::new(),
            composer: Composer::new(max_input_rows),
            login_modal: None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBar,
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// Handles of tasks that can be cancelled.
#[derive(Default)]
struct Tasks {
    feed_fetch: Option<tokio::task::AbortHandle>,
}

impl Tasks {
    fn abort_feed_fetch(&mut self) {
        if let Some(handle) = self.feed_fetch.take() {
            debug!("Aborting in-flight feed fetch");
            handle.abort();
        }
    }
}

pub fn build_client(config: &ResolvedConfig) -> Arc<dyn ForumClient> {
    if config.session_token.is_none() {
        info!("No session token configured, requests are anonymous");
    }
    Arc::new(TrpcForumClient::new(
        config.base_url.clone(),
        config.session_token.clone(),
        config.session_cookie.clone(),
    ))
}

/// Sends a draft through the reducer. The draft is cleared only when the
/// reducer accepted it and a comment request is about to start.
pub fn submit_comment(app: &mut App, tui: &mut TuiState, text: String) -> Effect {
    let effect = update(app, Action::Submit(text));
    if matches!(effect, Effect::AddComment(_)) {
        tui.composer.input.clear();
        tui.comment_list.stick_to_bottom = true;
    }
    effect
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let client = build_client(&config);
    let mut app = App::from_config(client, &config);
    let mut tui = TuiState::new(config.max_input_rows);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut tasks = Tasks::default();

    for action in [Action::CheckSession, Action::RefreshFeed] {
        let effect = update(&mut app, action);
        perform(effect, &app, &tx, &mut tasks);
    }

    let mut needs_redraw = true;

    'main: loop {
        // Sync props
        tui.composer.session = app.session.clone();

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(std::time::Duration::from_millis(250));
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain all pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }
            if matches!(event, TuiEvent::ForceQuit) {
                break 'main;
            }

            // When the login modal is open, route all key events to it
            if let Some(ref mut modal) = tui.login_modal {
                match modal.handle_event(&event) {
                    Some(LoginEvent::Recheck) => {
                        let effect = update(&mut app, Action::CheckSession);
                        perform(effect, &app, &tx, &mut tasks);
                    }
                    Some(LoginEvent::Dismiss) => tui.login_modal = None,
                    None => {}
                }
                continue;
            }

            if matches!(event, TuiEvent::Escape) {
                break 'main;
            }

            if matches!(
                event,
                TuiEvent::ScrollUp
                    | TuiEvent::ScrollDown
                    | TuiEvent::ScrollPageUp
                    | TuiEvent::ScrollPageDown
            ) {
                tui.comment_list.handle_event(&event);
                continue;
            }

            match tui.composer.handle_event(&event) {
                Some(ComposerEvent::Submit(text)) => {
                    let effect = submit_comment(&mut app, &mut tui, text);
                    if perform(effect, &app, &tx, &mut tasks) {
                        break 'main;
                    }
                }
                Some(ComposerEvent::OpenLogin) => {
                    tui.login_modal = Some(LoginModalState::new(app.client.sign_in_url()));
                }
                Some(ComposerEvent::ContentChanged) | None => {}
            }
        }

        // Handle background task actions
        let mut session_settled = false;
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if matches!(
                action,
                Action::SessionResolved(_) | Action::SessionFailed(_)
            ) {
                session_settled = true;
            }
            let effect = update(&mut app, action);
            if perform(effect, &app, &tx, &mut tasks) {
                break 'main;
            }
        }

        if session_settled && let Some(modal) = tui.login_modal.as_mut() {
            if app.session.is_authenticated() {
                info!("Signed in, closing login modal");
                tui.login_modal = None;
            } else {
                modal.checking = false;
            }
        }
    }

    if app.pending_comments > 0 {
        warn!("Exiting with {} comment(s) still in flight", app.pending_comments);
    }
    ratatui::restore();
    Ok(())
}

/// Carries out an effect. Returns true when the app should quit.
fn perform(effect: Effect, app: &App, tx: &mpsc::Sender<Action>, tasks: &mut Tasks) -> bool {
    match effect {
        Effect::None => {}
        Effect::Quit => return true,
        Effect::CheckSession => spawn_session_check(app.client.clone(), tx.clone()),
        Effect::FetchPosts { key, generation } => {
            tasks.abort_feed_fetch();
            tasks.feed_fetch = Some(spawn_fetch_posts(
                app.client.clone(),
                key,
                generation,
                tx.clone(),
            ));
        }
        Effect::AddComment(input) => {
            tasks.abort_feed_fetch();
            spawn_add_comment(app.client.clone(), input, tx.clone());
        }
    }
    false
}

fn spawn_session_check(client: Arc<dyn ForumClient>, tx: mpsc::Sender<Action>) {
    info!("Checking session");
    tokio::spawn(async move {
        let action = match client.session().await {
            Ok(user) => Action::SessionResolved(SessionStatus::from_user(user)),
            Err(e) => Action::SessionFailed(e.to_string()),
        };
        if tx.send(action).is_err() {
            warn!("Failed to send session result: receiver dropped");
        }
    });
}

fn spawn_fetch_posts(
    client: Arc<dyn ForumClient>,
    key: PostListKey,
    generation: u64,
    tx: mpsc::Sender<Action>,
) -> tokio::task::AbortHandle {
    debug!("Spawning feed fetch for {:?} (generation {})", key, generation);
    let handle = tokio::spawn(async move {
        let result = client
            .infinite_posts(&key, None)
            .await
            .map_err(|e| e.to_string());
        if tx
            .send(Action::PostsFetched {
                key,
                generation,
                result,
            })
            .is_err()
        {
            warn!("Failed to send feed result: receiver dropped");
        }
    });
    handle.abort_handle()
}

fn spawn_add_comment(client: Arc<dyn ForumClient>, input: AddCommentInput, tx: mpsc::Sender<Action>) {
    info!("Spawning comments.add for post {}", input.post_id);
    tokio::spawn(async move {
        let result = client.add_comment(&input).await.map_err(|e| e.to_string());
        if tx.send(Action::CommentSettled(result)).is_err() {
            warn!("Failed to send comment result: receiver dropped");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockForumClient, sample_page, signed_in_app, test_app};

    fn load_feed(app: &mut App) {
        let Effect::FetchPosts { key, generation } = update(app, Action::RefreshFeed) else {
            panic!("Expected FetchPosts");
        };
        update(
            app,
            Action::PostsFetched {
                key,
                generation,
                result: Ok(sample_page()),
            },
        );
    }

    fn type_draft(tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            tui.composer.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_submit_clears_draft_and_patches_cache() {
        let mut app = signed_in_app();
        load_feed(&mut app);
        let mut tui = TuiState::new(6);
        tui.composer.session = app.session.clone();
        type_draft(&mut tui, "Nice!");

        let Some(ComposerEvent::Submit(text)) = tui.composer.handle_event(&TuiEvent::Submit)
        else {
            panic!("Expected Submit");
        };
        let effect = submit_comment(&mut app, &mut tui, text);

        assert!(matches!(effect, Effect::AddComment(_)));
        assert!(tui.composer.input.buffer.is_empty());
        let last = app.selected_post().unwrap().comments.last().unwrap();
        assert_eq!(last.message, "Nice!");
        assert_eq!(last.author.name, "Ada");
    }

    #[test]
    fn test_rejected_submit_keeps_draft() {
        let mut app = signed_in_app();
        load_feed(&mut app);
        app.post_id = None;
        let mut tui = TuiState::new(6);
        tui.composer.session = app.session.clone();
        type_draft(&mut tui, "Nice!");

        let effect = submit_comment(&mut app, &mut tui, "Nice!".to_string());

        assert_eq!(effect, Effect::None);
        assert_eq!(tui.composer.input.buffer, "Nice!");
    }

    #[test]
    fn test_signed_out_cannot_reach_submit() {
        let mut app = test_app();
        app.session = SessionStatus::Unauthenticated;
        let mut tui = TuiState::new(6);
        tui.composer.session = app.session.clone();

        assert_eq!(
            tui.composer.handle_event(&TuiEvent::Submit),
            Some(ComposerEvent::OpenLogin)
        );
    }

    #[tokio::test]
    async fn test_add_comment_effect_reports_settle() {
        let client = Arc::new(MockForumClient::default());
        let (tx, rx) = mpsc::channel();
        let input = AddCommentInput {
            message: "hi".to_string(),
            post_id: "p1".to_string(),
        };

        spawn_add_comment(client.clone(), input.clone(), tx);
        // Yield until the task has sent its result
        let action = loop {
            if let Ok(action) = rx.try_recv() {
                break action;
            }
            tokio::task::yield_now().await;
        };

        assert!(matches!(action, Action::CommentSettled(Ok(ref c)) if c.message == "hi"));
        assert_eq!(*client.added.lock().unwrap(), vec![input]);
    }

    #[tokio::test]
    async fn test_perform_add_comment_aborts_feed_fetch() {
        let app = signed_in_app();
        let (tx, _rx) = mpsc::channel();
        let mut tasks = Tasks::default();

        let pending = tokio::spawn(std::future::pending::<()>());
        tasks.feed_fetch = Some(pending.abort_handle());

        let input = AddCommentInput {
            message: "hi".to_string(),
            post_id: "p1".to_string(),
        };
        assert!(!perform(Effect::AddComment(input), &app, &tx, &mut tasks));
        assert!(tasks.feed_fetch.is_none());
        assert!(pending.await.unwrap_err().is_cancelled());
    }
}
