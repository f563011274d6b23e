use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::session::{Session, SessionEvent, SessionToken};

// IdentityProvider port trait and errors
#[derive(Debug, Error)]
pub enum IdentityProviderError {
    #[error("Identity provider did not answer in time")]
    TimedOut,
    #[error("Invalid or expired authorization code")]
    InvalidCode,
    #[error("Identity provider rejected the request with status {status}")]
    Rejected { status: u16 },
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for IdentityProviderError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::TimedOut, Self::TimedOut) => true,
            (Self::InvalidCode, Self::InvalidCode) => true,
            (Self::Rejected { status: a }, Self::Rejected { status: b }) => a == b,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Receives session change notifications for one subscribed session.
pub trait SessionObserver: Send + Sync {
    fn on_session_event(&self, event: &SessionEvent);
}

/// Handle to a live session subscription.
///
/// The subscription ends when `release` is called or the handle is dropped,
/// whichever happens first.
#[must_use = "dropping the subscription releases it immediately"]
pub struct SessionSubscription {
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl SessionSubscription {
    pub fn new(release: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription with nothing to release, for providers that never notify.
    pub fn detached() -> Self {
        Self { release: None }
    }

    pub fn release(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for SessionSubscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for SessionSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSubscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// Port for the external identity provider that owns every session.
///
/// Federated sign-in is a redirect round trip: the browser is sent to
/// `authorization_url` and comes back with a one-time code that
/// `exchange_code` turns into a session.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    fn authorization_url(&self, state: &str) -> Result<String, IdentityProviderError>;

    async fn exchange_code(&self, code: &str) -> Result<Session, IdentityProviderError>;

    /// `Ok(None)` means the provider knows no live session for the token.
    async fn current_session(
        &self,
        token: &SessionToken,
    ) -> Result<Option<Session>, IdentityProviderError>;

    fn subscribe(
        &self,
        token: &SessionToken,
        observer: Arc<dyn SessionObserver>,
    ) -> SessionSubscription;

    async fn sign_out(&self, token: &SessionToken) -> Result<(), IdentityProviderError>;
}
