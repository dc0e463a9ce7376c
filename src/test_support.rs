//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::types::{AddCommentInput, Author, Comment, Post, PostPage, SessionUser};
use crate::api::{ApiError, ForumClient};
use crate::core::cache::PostListKey;
use crate::core::session::SessionStatus;
use crate::core::state::App;

/// A forum client that records calls and never touches the network.
#[derive(Default)]
pub struct MockForumClient {
    pub added: Mutex<Vec<AddCommentInput>>,
}

#[async_trait]
impl ForumClient for MockForumClient {
    async fn add_comment(&self, input: &AddCommentInput) -> Result<Comment, ApiError> {
        self.added
            .lock()
            .map_err(|e| ApiError::Config(e.to_string()))?
            .push(input.clone());
        Ok(Comment {
            id: Some("server-id".to_string()),
            message: input.message.clone(),
            post_id: Some(input.post_id.clone()),
            author: Author::default(),
            created_at: None,
        })
    }

    async fn infinite_posts(
        &self,
        _key: &PostListKey,
        _cursor: Option<&str>,
    ) -> Result<PostPage, ApiError> {
        Ok(sample_page())
    }

    async fn session(&self) -> Result<Option<SessionUser>, ApiError> {
        Ok(Some(test_user()))
    }

    fn sign_in_url(&self) -> String {
        "http://forum.test/api/auth/signin".to_string()
    }
}

pub fn test_user() -> SessionUser {
    SessionUser {
        name: Some("Ada".to_string()),
        image: None,
    }
}

pub fn test_comment(message: &str) -> Comment {
    Comment {
        id: Some(format!("c-{message}")),
        message: message.to_string(),
        post_id: Some("p1".to_string()),
        author: Author {
            name: "Grace".to_string(),
            image: None,
        },
        created_at: None,
    }
}

/// Two posts: `p1` with one comment, `p2` with none.
pub fn sample_page() -> PostPage {
    PostPage {
        posts: vec![
            Post {
                id: "p1".to_string(),
                content: Some("Hello forum".to_string()),
                author: Some(Author {
                    name: "Grace".to_string(),
                    image: None,
                }),
                comments: vec![test_comment("welcome")],
                created_at: None,
            },
            Post {
                id: "p2".to_string(),
                content: Some("Second post".to_string()),
                author: None,
                comments: Vec::new(),
                created_at: None,
            },
        ],
        next_cursor: None,
    }
}

/// Creates a test App on post `p1` with a MockForumClient. Session is still loading.
pub fn test_app() -> App {
    App::new(
        Arc::new(MockForumClient::default()),
        Some("p1".to_string()),
        PostListKey::default(),
    )
}

/// Same as `test_app()` but signed in as Ada.
pub fn signed_in_app() -> App {
    let mut app = test_app();
    app.session = SessionStatus::Authenticated(test_user());
    app
}
