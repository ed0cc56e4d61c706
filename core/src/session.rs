//! Per-client session context: the entity token and the error handler.
//!
//! A `Session` is built once after authentication and handed to the client.
//! It is never mutated during a call; rotating a token means building a new
//! session and swapping it in with `EconomyClient::with_session`.

use std::fmt;
use std::sync::Arc;

use crate::error::{ApiError, ErrorInfo};

/// Callback notified of every wire-level failure before it is returned.
pub type ErrorHandler = Arc<dyn Fn(&ErrorInfo) + Send + Sync>;

#[derive(Clone, Default)]
pub struct Session {
    entity_token: Option<String>,
    error_handler: Option<ErrorHandler>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity_token(mut self, token: impl Into<String>) -> Self {
        self.entity_token = Some(token.into());
        self
    }

    pub fn without_entity_token(mut self) -> Self {
        self.entity_token = None;
        self
    }

    pub fn with_error_handler(
        mut self,
        handler: impl Fn(&ErrorInfo) + Send + Sync + 'static,
    ) -> Self {
        self.error_handler = Some(Arc::new(handler));
        self
    }

    /// The entity token, or `MissingCredential` when none (or an empty one)
    /// is set.
    pub fn entity_token(&self) -> Result<&str, ApiError> {
        match self.entity_token.as_deref() {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(ApiError::MissingCredential),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.entity_token().is_ok()
    }

    pub(crate) fn report(&self, info: &ErrorInfo) {
        if let Some(handler) = &self.error_handler {
            handler(info);
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("entity_token", &self.entity_token.as_ref().map(|_| "<redacted>"))
            .field("error_handler", &self.error_handler.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn empty_session_has_no_credential() {
        let err = Session::new().entity_token().unwrap_err();
        assert_eq!(err, ApiError::MissingCredential);
    }

    #[test]
    fn empty_token_counts_as_missing() {
        let session = Session::new().with_entity_token("");
        assert!(!session.is_authenticated());
    }

    #[test]
    fn token_can_be_cleared() {
        let session = Session::new().with_entity_token("T").without_entity_token();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn report_invokes_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let session = Session::new().with_error_handler(move |info| {
            assert_eq!(info.error_code, ErrorCode::ItemNotFound);
            seen.fetch_add(1, Ordering::SeqCst);
        });
        session.report(&ErrorInfo::new(404, ErrorCode::ItemNotFound, "gone"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn debug_output_redacts_token() {
        let session = Session::new().with_entity_token("secret-token");
        let printed = format!("{session:?}");
        assert!(!printed.contains("secret-token"));
        assert!(printed.contains("<redacted>"));
    }
}
