use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use dashmap::DashMap;
use portal_core::{
    Email, IdentityProvider, IdentityProviderError, Session, SessionEvent, SessionObserver,
    SessionSubscription, SessionToken,
};
use reqwest::Url;

use super::session_event_hub::SessionEventHub;

/// Identity provider that keeps accounts and sessions in memory.
///
/// Authorization codes are registered up front with `add_account` and are
/// single use, like the codes of a real provider.
#[derive(Clone)]
pub struct InMemoryIdentityProvider {
    authorize_url: String,
    accounts: Arc<DashMap<String, Email>>,
    sessions: Arc<DashMap<String, Session>>,
    hub: SessionEventHub,
    fail_sign_out: Arc<AtomicBool>,
}

impl InMemoryIdentityProvider {
    pub fn new(authorize_url: impl Into<String>) -> Self {
        Self {
            authorize_url: authorize_url.into(),
            accounts: Arc::new(DashMap::new()),
            sessions: Arc::new(DashMap::new()),
            hub: SessionEventHub::new(),
            fail_sign_out: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Register an authorization code that signs in as `email`.
    pub fn add_account(&self, code: impl Into<String>, email: Email) {
        self.accounts.insert(code.into(), email);
    }

    /// Create a live session directly, bypassing the redirect round trip.
    pub fn issue_session(&self, email: Email) -> Session {
        let session = Session::new(
            SessionToken::new(uuid::Uuid::new_v4().to_string()),
            email,
            None,
        );
        self.sessions
            .insert(session.token().expose().to_owned(), session.clone());
        session
    }

    /// End a session on the provider side, as an expiry would.
    pub fn expire(&self, token: &SessionToken) {
        if self.sessions.remove(token.expose()).is_some() {
            self.hub.publish(token, SessionEvent::Expired);
        }
    }

    pub fn fail_sign_out(&self, fail: bool) {
        self.fail_sign_out.store(fail, Ordering::SeqCst);
    }

    pub fn has_session(&self, token: &SessionToken) -> bool {
        self.sessions.contains_key(token.expose())
    }

    pub fn observer_count(&self, token: &SessionToken) -> usize {
        self.hub.observer_count(token)
    }
}

#[async_trait::async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    fn authorization_url(&self, state: &str) -> Result<String, IdentityProviderError> {
        let mut url = Url::parse(&self.authorize_url)
            .map_err(|e| IdentityProviderError::UnexpectedError(e.to_string()))?;
        url.query_pairs_mut().append_pair("state", state);
        Ok(url.into())
    }

    async fn exchange_code(&self, code: &str) -> Result<Session, IdentityProviderError> {
        let (_, email) = self
            .accounts
            .remove(code)
            .ok_or(IdentityProviderError::InvalidCode)?;

        let session = self.issue_session(email);
        self.hub
            .publish(session.token(), SessionEvent::SignedIn(session.clone()));
        Ok(session)
    }

    async fn current_session(
        &self,
        token: &SessionToken,
    ) -> Result<Option<Session>, IdentityProviderError> {
        Ok(self
            .sessions
            .get(token.expose())
            .map(|entry| entry.value().clone()))
    }

    fn subscribe(
        &self,
        token: &SessionToken,
        observer: Arc<dyn SessionObserver>,
    ) -> SessionSubscription {
        self.hub.subscribe(token, observer)
    }

    async fn sign_out(&self, token: &SessionToken) -> Result<(), IdentityProviderError> {
        if self.fail_sign_out.load(Ordering::SeqCst) {
            return Err(IdentityProviderError::Rejected { status: 503 });
        }

        self.sessions.remove(token.expose());
        self.hub.publish(token, SessionEvent::SignedOut);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::Fake;
    use fake::faker::internet::en::SafeEmail;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingObserver {
        events: Mutex<Vec<SessionEvent>>,
    }

    impl SessionObserver for RecordingObserver {
        fn on_session_event(&self, event: &SessionEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    fn provider() -> InMemoryIdentityProvider {
        InMemoryIdentityProvider::new("http://localhost:9999/authorize")
    }

    #[tokio::test]
    async fn test_codes_are_single_use() {
        let provider = provider();
        let email = Email::parse(SafeEmail().fake::<String>()).unwrap();
        provider.add_account("code", email.clone());

        let session = provider.exchange_code("code").await.unwrap();
        assert_eq!(session.email(), &email);
        assert!(provider.has_session(session.token()));

        let again = provider.exchange_code("code").await;
        assert_eq!(again.unwrap_err(), IdentityProviderError::InvalidCode);
    }

    #[tokio::test]
    async fn test_expire_notifies_and_drops_session() {
        let provider = provider();
        let session = provider.issue_session(Email::parse(SafeEmail().fake::<String>()).unwrap());
        let observer = Arc::new(RecordingObserver::default());
        let _subscription = provider.subscribe(session.token(), observer.clone());

        provider.expire(session.token());

        assert_eq!(*observer.events.lock().unwrap(), vec![SessionEvent::Expired]);
        assert!(
            provider
                .current_session(session.token())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_failing_sign_out_keeps_session() {
        let provider = provider();
        let session = provider.issue_session(Email::parse(SafeEmail().fake::<String>()).unwrap());
        provider.fail_sign_out(true);

        assert!(provider.sign_out(session.token()).await.is_err());
        assert!(provider.has_session(session.token()));
    }

    #[test]
    fn test_authorization_url_echoes_state() {
        let url = provider().authorization_url("nonce").unwrap();
        assert_eq!(url, "http://localhost:9999/authorize?state=nonce");
    }
}
