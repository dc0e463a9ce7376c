use std::fmt;

use async_trait::async_trait;

use super::types::{AddCommentInput, Comment, PostPage, SessionUser};
use crate::core::cache::PostListKey;

/// Errors that can occur while talking to the forum.
#[derive(Debug)]
pub enum ApiError {
    /// Client misconfigured (bad base URL). Not retryable.
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The server answered with a non-success status.
    Api { status: u16, message: String },
    /// The response body did not have the expected shape.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Config(msg) => write!(f, "config error: {msg}"),
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            ApiError::Config(e.to_string())
        } else if e.is_decode() {
            ApiError::Parse(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

/// Remote procedures the composer depends on.
#[async_trait]
pub trait ForumClient: Send + Sync {
    /// `comments.add`: creates a comment on a post.
    async fn add_comment(&self, input: &AddCommentInput) -> Result<Comment, ApiError>;

    /// `post.infinitePosts`: fetches one page of the feed.
    async fn infinite_posts(
        &self,
        key: &PostListKey,
        cursor: Option<&str>,
    ) -> Result<PostPage, ApiError>;

    /// Reads the current session. `None` means nobody is signed in.
    async fn session(&self) -> Result<Option<SessionUser>, ApiError>;

    /// Where a user goes to sign in.
    fn sign_in_url(&self) -> String;
}
