use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use portal_core::{
    Email, IdentityProvider, IdentityProviderError, Session, SessionEvent, SessionObserver,
    SessionSubscription, SessionToken,
};
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, Secret};

use super::session_event_hub::SessionEventHub;

/// Identity provider reached over its HTTP API.
///
/// Provider-side expiry is detected by polling the user endpoint for every
/// live subscription.
#[derive(Clone)]
pub struct HttpIdentityProvider {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
    provider: String,
    redirect_url: String,
    poll_interval: Duration,
    hub: SessionEventHub,
}

impl HttpIdentityProvider {
    pub fn new(
        base_url: String,
        api_key: Secret<String>,
        provider: String,
        redirect_url: String,
        poll_interval: Duration,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            api_key,
            provider,
            redirect_url,
            poll_interval,
            hub: SessionEventHub::new(),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, IdentityProviderError> {
        let base = if self.base_url.ends_with('/') {
            Url::parse(&self.base_url)
        } else {
            Url::parse(&format!("{}/", self.base_url))
        }
        .map_err(|e| IdentityProviderError::UnexpectedError(e.to_string()))?;

        base.join(path)
            .map_err(|e| IdentityProviderError::UnexpectedError(e.to_string()))
    }

    async fn fetch_user(
        &self,
        token: &SessionToken,
    ) -> Result<Option<UserResponse>, IdentityProviderError> {
        let url = self.endpoint(USER_PATH)?;

        let response = self
            .http_client
            .get(url)
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .bearer_auth(token.expose())
            .send()
            .await
            .map_err(transport_error)?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(
                response.json::<UserResponse>().await.map_err(transport_error)?,
            )),
            status => Err(IdentityProviderError::Rejected {
                status: status.as_u16(),
            }),
        }
    }
}

#[async_trait::async_trait]
impl IdentityProvider for HttpIdentityProvider {
    fn authorization_url(&self, state: &str) -> Result<String, IdentityProviderError> {
        let mut url = self.endpoint(AUTHORIZE_PATH)?;
        url.query_pairs_mut()
            .append_pair("provider", &self.provider)
            .append_pair("redirect_to", &self.redirect_url)
            .append_pair("state", state);

        Ok(url.into())
    }

    #[tracing::instrument(name = "Exchanging authorization code", skip_all)]
    async fn exchange_code(&self, code: &str) -> Result<Session, IdentityProviderError> {
        let url = self.endpoint(TOKEN_PATH)?;

        let response = self
            .http_client
            .post(url)
            .query(&[("grant_type", GRANT_TYPE)])
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .json(&TokenRequest { code })
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if matches!(
            status,
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND
        ) {
            return Err(IdentityProviderError::InvalidCode);
        }
        if !status.is_success() {
            return Err(IdentityProviderError::Rejected {
                status: status.as_u16(),
            });
        }

        let body: TokenResponse = response.json().await.map_err(transport_error)?;
        let email = Email::parse(body.user.email)
            .map_err(|e| IdentityProviderError::UnexpectedError(e.to_string()))?;
        let expires_at = body.expires_in.map(expiry_after).transpose()?;

        Ok(Session::new(
            SessionToken::new(body.access_token),
            email,
            expires_at,
        ))
    }

    #[tracing::instrument(name = "Fetching current session", skip_all)]
    async fn current_session(
        &self,
        token: &SessionToken,
    ) -> Result<Option<Session>, IdentityProviderError> {
        let Some(user) = self.fetch_user(token).await? else {
            return Ok(None);
        };

        let email = Email::parse(user.email)
            .map_err(|e| IdentityProviderError::UnexpectedError(e.to_string()))?;

        Ok(Some(Session::new(token.clone(), email, None)))
    }

    fn subscribe(
        &self,
        token: &SessionToken,
        observer: Arc<dyn SessionObserver>,
    ) -> SessionSubscription {
        let hub_subscription = self.hub.subscribe(token, observer);

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("no runtime to poll session expiry, notifications are sign-out only");
            return hub_subscription;
        };

        let provider = self.clone();
        let token = token.clone();
        let poller = runtime.spawn(async move {
            let mut interval = tokio::time::interval(provider.poll_interval);
            interval.tick().await;
            loop {
                interval.tick().await;
                match provider.fetch_user(&token).await {
                    Ok(None) => {
                        provider.hub.publish(&token, SessionEvent::Expired);
                        break;
                    }
                    Ok(Some(_)) => {}
                    Err(e) => tracing::debug!(error = %e, "session poll failed"),
                }
            }
        });

        SessionSubscription::new(move || {
            poller.abort();
            hub_subscription.release();
        })
    }

    #[tracing::instrument(name = "Signing out", skip_all)]
    async fn sign_out(&self, token: &SessionToken) -> Result<(), IdentityProviderError> {
        let url = self.endpoint(LOGOUT_PATH)?;

        self.http_client
            .post(url)
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .bearer_auth(token.expose())
            .send()
            .await
            .map_err(transport_error)?
            .error_for_status()
            .map_err(transport_error)?;

        self.hub.publish(token, SessionEvent::SignedOut);
        Ok(())
    }
}

fn transport_error(e: reqwest::Error) -> IdentityProviderError {
    if e.is_timeout() {
        IdentityProviderError::TimedOut
    } else if let Some(status) = e.status() {
        IdentityProviderError::Rejected {
            status: status.as_u16(),
        }
    } else {
        IdentityProviderError::UnexpectedError(e.to_string())
    }
}

const AUTHORIZE_PATH: &str = "authorize";
const TOKEN_PATH: &str = "token";
const USER_PATH: &str = "user";
const LOGOUT_PATH: &str = "logout";
const GRANT_TYPE: &str = "authorization_code";
const API_KEY_HEADER: &str = "apikey";

#[derive(serde::Serialize, Debug)]
struct TokenRequest<'a> {
    code: &'a str,
}

fn expiry_after(seconds: i64) -> Result<DateTime<Utc>, IdentityProviderError> {
    chrono::Duration::try_seconds(seconds)
        .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
        .ok_or_else(|| {
            IdentityProviderError::UnexpectedError(format!(
                "session lifetime out of range: {seconds}s"
            ))
        })
}

#[derive(serde::Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<i64>,
    user: UserResponse,
}

#[derive(serde::Deserialize)]
struct UserResponse {
    email: String,
}
