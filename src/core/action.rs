//! # Actions
//!
//! Everything that can happen in Commenter becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! The forum answers? That's `Action::CommentSettled(result)`.
//!
//! `update()` applies an action to the state and returns the `Effect` the
//! adapter has to perform (spawn a request, quit). No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! ## Comment mutation lifecycle
//!
//! ```text
//! Submit(text)
//!   ├── invalid text / no post / not signed in ──► Effect::None
//!   └── cancel feed fetches, patch cache, pending += 1 ──► Effect::AddComment
//!
//! CommentSettled(Ok | Err)
//!   └── pending -= 1, invalidate feed ──► Effect::FetchPosts
//! ```
//!
//! A failed comment is only logged. The optimistic entry stays in the cache
//! until the refetch replaces the feed with the server's copy.

use log::{debug, info, warn};

use crate::api::types::{AddCommentInput, Comment, PostPage};
use crate::core::cache::PostListKey;
use crate::core::comment::{optimistic_comment, validate_message};
use crate::core::session::SessionStatus;
use crate::core::state::App;

#[derive(Debug)]
pub enum Action {
    Quit,
    /// Ask the server who is signed in.
    CheckSession,
    SessionResolved(SessionStatus),
    SessionFailed(String),
    /// Load the feed for the app's key.
    RefreshFeed,
    PostsFetched {
        key: PostListKey,
        generation: u64,
        result: Result<PostPage, String>,
    },
    Submit(String),
    CommentSettled(Result<Comment, String>),
}

/// Side effects the adapter performs after `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    CheckSession,
    FetchPosts { key: PostListKey, generation: u64 },
    AddComment(AddCommentInput),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,
        Action::CheckSession => Effect::CheckSession,
        Action::SessionResolved(status) => {
            info!("Session resolved: {}", status.label());
            app.status_message = match status.user() {
                Some(user) => format!(
                    "Signed in as {}",
                    user.name.as_deref().unwrap_or("anonymous")
                ),
                None => String::from("Not signed in"),
            };
            app.session = status;
            Effect::None
        }
        Action::SessionFailed(e) => {
            warn!("Session check failed, treating as signed out: {}", e);
            app.session = SessionStatus::Unauthenticated;
            app.status_message = String::from("Not signed in");
            Effect::None
        }
        Action::RefreshFeed => fetch_feed(app),
        Action::PostsFetched {
            key,
            generation,
            result,
        } => {
            match result {
                Ok(page) => {
                    if app.cache.resolve_fetch(&key, generation, page) && key == app.feed_key {
                        app.feed_error = None;
                    }
                }
                Err(e) => {
                    warn!("Feed fetch for {:?} failed: {}", key, e);
                    app.cache.fail_fetch(&key, generation);
                    if key == app.feed_key {
                        app.feed_error = Some(e);
                        app.status_message = String::from("Feed unavailable");
                    }
                }
            }
            Effect::None
        }
        Action::Submit(message) => submit(app, message),
        Action::CommentSettled(result) => {
            app.pending_comments = app.pending_comments.saturating_sub(1);
            match result {
                Ok(comment) => {
                    info!(
                        "Comment {} confirmed",
                        comment.id.as_deref().unwrap_or("?")
                    );
                    app.status_message = if app.pending_comments > 0 {
                        String::from("Posting comment...")
                    } else {
                        String::from("Comment posted")
                    };
                }
                Err(e) => {
                    // TODO: drop the optimistic comment here instead of waiting for the refetch
                    warn!("Adding comment failed: {}", e);
                    if app.pending_comments == 0 {
                        app.status_message = String::new();
                    }
                }
            }
            let invalidated = app.cache.invalidate_all();
            debug!("Invalidated {} post list keys", invalidated.len());
            fetch_feed(app)
        }
    }
}

/// Validates the draft and, if it may be sent, applies the optimistic patch.
fn submit(app: &mut App, message: String) -> Effect {
    if let Err(e) = validate_message(&message) {
        debug!("Submit blocked: {}", e);
        return Effect::None;
    }
    let Some(post_id) = app.post_id.clone() else {
        debug!("Submit ignored: no post selected");
        return Effect::None;
    };
    if !app.session.is_authenticated() {
        debug!("Submit ignored: session is {}", app.session.label());
        return Effect::None;
    }

    let input = AddCommentInput { message, post_id };

    app.cache.cancel_all();
    let comment = optimistic_comment(&input, app.session.user());
    app.cache.set_infinite_data(&app.feed_key, |data| {
        data.map(|mut data| {
            if !data.append_comment(&input.post_id, &comment) {
                debug!("Post {} not in cached feed, nothing to patch", input.post_id);
            }
            data
        })
    });

    app.pending_comments += 1;
    app.status_message = String::from("Posting comment...");
    info!("Submitting comment to post {}", input.post_id);
    Effect::AddComment(input)
}

fn fetch_feed(app: &mut App) -> Effect {
    let key = app.feed_key.clone();
    let generation = app.cache.begin_fetch(&key);
    Effect::FetchPosts { key, generation }
}
