//! # Application State
//!
//! Core business state for Commenter. Domain data only, no TUI types.
//! Presentation state (the draft buffer, scroll offsets, overlays) lives in
//! the `tui` module.
//!
//! ```text
//! App
//! ├── client: Arc<dyn ForumClient>  // remote procedures
//! ├── session: SessionStatus        // loading / authenticated / unauthenticated
//! ├── post_id: Option<String>       // post the composer writes to
//! ├── feed_key: PostListKey         // cache key the optimistic patch targets
//! ├── cache: QueryCache             // client-side post list
//! ├── pending_comments: usize       // mutations not yet settled
//! ├── status_message: String        // status bar text
//! └── feed_error: Option<String>    // last feed fetch failure
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::api::ForumClient;
use crate::api::types::Post;
use crate::core::cache::{PostListKey, QueryCache};
use crate::core::config::ResolvedConfig;
use crate::core::session::SessionStatus;

pub struct App {
    pub client: Arc<dyn ForumClient>,
    pub session: SessionStatus,
    pub post_id: Option<String>,
    pub feed_key: PostListKey,
    pub cache: QueryCache,
    /// Submitted comments whose remote call has not settled yet.
    pub pending_comments: usize,
    pub status_message: String,
    pub feed_error: Option<String>,
}

impl App {
    pub fn new(client: Arc<dyn ForumClient>, post_id: Option<String>, feed_key: PostListKey) -> Self {
        let status_message = if post_id.is_some() {
            String::from("Loading session...")
        } else {
            String::from("No post selected")
        };
        Self {
            client,
            session: SessionStatus::Loading,
            post_id,
            feed_key,
            cache: QueryCache::new(),
            pending_comments: 0,
            status_message,
            feed_error: None,
        }
    }

    pub fn from_config(client: Arc<dyn ForumClient>, config: &ResolvedConfig) -> Self {
        Self::new(client, config.post_id.clone(), config.feed_key())
    }

    /// The selected post as currently cached for the feed key.
    pub fn selected_post(&self) -> Option<&Post> {
        let post_id = self.post_id.as_deref()?;
        self.cache.get(&self.feed_key)?.find_post(post_id)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.session, crate::core::session::SessionStatus::Loading);
        assert_eq!(app.post_id.as_deref(), Some("p1"));
        assert_eq!(app.pending_comments, 0);
        assert_eq!(app.status_message, "Loading session...");
    }

    #[test]
    fn test_selected_post_needs_cached_feed() {
        let app = test_app();
        assert!(app.selected_post().is_none());
    }
}
