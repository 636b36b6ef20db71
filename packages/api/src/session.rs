//! Session seam injected at app bootstrap.
//!
//! Replaces ambient auth state with explicit dependency injection: whoever
//! composes the app supplies readiness, sign-in state, and a token source.
//! Domain hooks gate their reads on the first two; [`crate::ApiClient`]
//! consumes the third. Token issuance itself happens outside this crate.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;

#[async_trait(?Send)]
pub trait Session {
    /// Whether the session layer has finished loading.
    fn is_ready(&self) -> bool;

    /// Whether a user is currently signed in.
    fn is_authenticated(&self) -> bool;

    /// Current bearer token, if any. Async because real providers may have
    /// to refresh before answering.
    async fn token(&self) -> Option<String>;
}

/// [`Session`] backed by a bearer token held in memory.
///
/// Ready from construction; authenticated while a token is set.
#[derive(Clone, Default)]
pub struct BearerSession {
    token: Rc<RefCell<Option<String>>>,
}

impl BearerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.set_token(Some(token.into()));
        session
    }

    /// Install or clear the token. Clearing signs the session out.
    pub fn set_token(&self, token: Option<String>) {
        *self.token.borrow_mut() = token.filter(|t| !t.trim().is_empty());
    }
}

#[async_trait(?Send)]
impl Session for BearerSession {
    fn is_ready(&self) -> bool {
        true
    }

    fn is_authenticated(&self) -> bool {
        self.token.borrow().is_some()
    }

    async fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bearer_session_tracks_token() {
        let session = BearerSession::new();
        assert!(session.is_ready());
        assert!(!session.is_authenticated());
        assert_eq!(session.token().await, None);

        session.set_token(Some("tok-123".to_string()));
        assert!(session.is_authenticated());
        assert_eq!(session.token().await, Some("tok-123".to_string()));

        session.set_token(Some("   ".to_string()));
        assert!(!session.is_authenticated());
    }
}
