use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};

use super::email::Email;

/// Opaque bearer token identifying a session at the identity provider.
#[derive(Debug, Clone)]
pub struct SessionToken(Secret<String>);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Secret::new(token.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl AsRef<Secret<String>> for SessionToken {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for SessionToken {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for SessionToken {}

/// A session issued by the identity provider. The portal only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: SessionToken,
    email: Email,
    expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(token: SessionToken, email: Email, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            token,
            email,
            expires_at,
        }
    }

    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

/// Change notification delivered to session observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(Session),
    Refreshed(Session),
    SignedOut,
    Expired,
}

impl SessionEvent {
    pub fn is_session_loss(&self) -> bool {
        matches!(self, SessionEvent::SignedOut | SessionEvent::Expired)
    }
}
