//! # Comment Drafts
//!
//! Validation for the composer form and construction of the optimistic
//! comment that stands in for the server's record until the next refetch.

use std::fmt;

use crate::api::types::{AddCommentInput, Author, Comment, SessionUser};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The message field is empty.
    EmptyMessage,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyMessage => write!(f, "message must not be empty"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Checks the form schema: a message of at least one character.
///
/// Whitespace counts as content, the same as a minimum-length string rule.
pub fn validate_message(message: &str) -> Result<&str, ValidationError> {
    if message.is_empty() {
        Err(ValidationError::EmptyMessage)
    } else {
        Ok(message)
    }
}

/// Builds the provisional comment shown before the server confirms.
///
/// It has no id; author details come from the session, falling back to an
/// empty name.
pub fn optimistic_comment(input: &AddCommentInput, user: Option<&SessionUser>) -> Comment {
    Comment {
        id: None,
        message: input.message.clone(),
        post_id: Some(input.post_id.clone()),
        author: Author {
            name: user.and_then(|u| u.name.clone()).unwrap_or_default(),
            image: user.and_then(|u| u.image.clone()),
        },
        created_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_message_is_rejected() {
        assert_eq!(validate_message(""), Err(ValidationError::EmptyMessage));
    }

    #[test]
    fn test_whitespace_message_passes() {
        assert_eq!(validate_message(" "), Ok(" "));
        assert_eq!(validate_message("hi"), Ok("hi"));
    }

    #[test]
    fn test_optimistic_comment_uses_session_user() {
        let input = AddCommentInput {
            message: "First!".to_string(),
            post_id: "p1".to_string(),
        };
        let user = SessionUser {
            name: Some("Ada".to_string()),
            image: Some("https://img/ada.png".to_string()),
        };
        let comment = optimistic_comment(&input, Some(&user));
        assert!(comment.is_provisional());
        assert_eq!(comment.message, "First!");
        assert_eq!(comment.post_id.as_deref(), Some("p1"));
        assert_eq!(comment.author.name, "Ada");
        assert_eq!(comment.author.image.as_deref(), Some("https://img/ada.png"));
    }

    #[test]
    fn test_optimistic_comment_without_name() {
        let input = AddCommentInput {
            message: "x".to_string(),
            post_id: "p1".to_string(),
        };
        let comment = optimistic_comment(&input, None);
        assert_eq!(comment.author.name, "");
        assert_eq!(comment.author.image, None);
    }
}
