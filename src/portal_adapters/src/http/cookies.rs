use axum_extra::extract::cookie::{Cookie, SameSite};
use portal_core::{PortalRequest, SessionToken};

use crate::config::SessionSettings;

/// Builds and reads the three portal cookies: the session token, the OAuth
/// `state` nonce and the gate id keying the in-flight guard.
///
/// Builders return complete `Set-Cookie` values.
#[derive(Debug, Clone)]
pub struct PortalCookies {
    settings: SessionSettings,
}

impl PortalCookies {
    pub fn new(settings: SessionSettings) -> Self {
        Self { settings }
    }

    pub fn session_token<R: PortalRequest>(&self, request: &R) -> Option<SessionToken> {
        request
            .cookie(&self.settings.cookie_name)
            .filter(|token| !token.is_empty())
            .map(SessionToken::new)
    }

    pub fn set_session(&self, token: &SessionToken) -> String {
        self.build(&self.settings.cookie_name, token.expose())
    }

    pub fn clear_session(&self) -> String {
        self.removal(&self.settings.cookie_name)
    }

    pub fn oauth_state<'r, R: PortalRequest>(&self, request: &'r R) -> Option<&'r str> {
        request.cookie(&self.settings.state_cookie_name)
    }

    pub fn set_oauth_state(&self, state: &str) -> String {
        self.build(&self.settings.state_cookie_name, state)
    }

    pub fn clear_oauth_state(&self) -> String {
        self.removal(&self.settings.state_cookie_name)
    }

    pub fn gate_id<'r, R: PortalRequest>(&self, request: &'r R) -> Option<&'r str> {
        request
            .cookie(&self.settings.gate_cookie_name)
            .filter(|id| !id.is_empty())
    }

    pub fn set_gate_id(&self, id: &str) -> String {
        self.build(&self.settings.gate_cookie_name, id)
    }

    fn build(&self, name: &str, value: &str) -> String {
        Cookie::build((name.to_owned(), value.to_owned()))
            .http_only(true)
            .secure(self.settings.secure_cookies)
            .same_site(SameSite::Lax)
            .path("/")
            .build()
            .to_string()
    }

    fn removal(&self, name: &str) -> String {
        let mut cookie = Cookie::build((name.to_owned(), String::new()))
            .http_only(true)
            .secure(self.settings.secure_cookies)
            .same_site(SameSite::Lax)
            .path("/")
            .build();
        cookie.make_removal();
        cookie.to_string()
    }
}
