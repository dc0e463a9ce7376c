//! # Session Status
//!
//! The composer never owns authentication. It reads a tri-state status that
//! the session endpoint drives:
//!
//! ```text
//! Loading ──► Authenticated(user)
//!    │
//!    └──────► Unauthenticated
//! ```
//!
//! A re-check can move between the two resolved states at any time.

use crate::api::types::SessionUser;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Loading,
    Authenticated(SessionUser),
    Unauthenticated,
}

impl SessionStatus {
    /// Builds a status from the session endpoint's answer.
    pub fn from_user(user: Option<SessionUser>) -> Self {
        match user {
            Some(user) => SessionStatus::Authenticated(user),
            None => SessionStatus::Unauthenticated,
        }
    }

    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            SessionStatus::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionStatus::Authenticated(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionStatus::Loading => "loading",
            SessionStatus::Authenticated(_) => "authenticated",
            SessionStatus::Unauthenticated => "unauthenticated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_loading() {
        assert_eq!(SessionStatus::default(), SessionStatus::Loading);
    }

    #[test]
    fn test_from_user() {
        let user = SessionUser {
            name: Some("Ada".to_string()),
            image: None,
        };
        let status = SessionStatus::from_user(Some(user.clone()));
        assert!(status.is_authenticated());
        assert_eq!(status.user(), Some(&user));

        let status = SessionStatus::from_user(None);
        assert_eq!(status, SessionStatus::Unauthenticated);
        assert!(status.user().is_none());
    }
}
