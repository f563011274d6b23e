use std::sync::Arc;
use std::time::Duration;

use portal_adapters::{
    InMemoryIdentityProvider, MockRegistrationEndpoint, PortalContext,
    config::{PortalSettings, cookies::SESSION_COOKIE_NAME, test},
};
use portal_core::{Email, Session};
use portal_service::PortalService;
use reqwest::{Url, cookie::Jar, redirect::Policy};
use tokio::net::TcpListener;

pub const INSTITUTIONAL_EMAIL: &str = "maria.silva@aluno.faeterj-prc.faetec.rj.gov.br";
pub const PROVIDER_AUTHORIZE_URL: &str = "http://idp.test/authorize?provider=google";

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub provider: InMemoryIdentityProvider,
    pub endpoint: MockRegistrationEndpoint,
    cookie_jar: Arc<Jar>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_endpoint(MockRegistrationEndpoint::new()).await
    }

    pub async fn with_endpoint(endpoint: MockRegistrationEndpoint) -> Self {
        let provider = InMemoryIdentityProvider::new(PROVIDER_AUTHORIZE_URL);

        let mut settings = PortalSettings::from_sources(Some(Default::default()))
            .expect("Failed to build test settings");
        settings.session.secure_cookies = false;
        settings.identity_provider.timeout_millis = 1_000;
        settings.registration.timeout_millis = 1_000;

        let context = PortalContext::new(provider.clone(), endpoint.clone(), &settings);
        let service = PortalService::new(context, "../../assets".to_owned());

        let listener = TcpListener::bind(test::APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!(
            "http://{}",
            listener.local_addr().expect("Failed to read local address")
        );

        tokio::spawn(service.run_standalone(listener));

        let cookie_jar = Arc::new(Jar::default());
        let http_client = reqwest::Client::builder()
            .redirect(Policy::none())
            .cookie_provider(cookie_jar.clone())
            .build()
            .expect("Failed to build http client");

        Self {
            address,
            http_client,
            provider,
            endpoint,
            cookie_jar,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Issue a provider session and hand its cookie to the client.
    pub fn sign_in(&self) -> Session {
        let session = self.provider.issue_session(institutional_email());
        let url = Url::parse(&self.address).expect("Invalid app address");
        self.cookie_jar.add_cookie_str(
            &format!("{}={}", SESSION_COOKIE_NAME, session.token().expose()),
            &url,
        );
        session
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.http_client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_federated(&self) -> reqwest::Response {
        self.http_client
            .post(self.url("/auth/federated"))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_register(&self, form: &[(&str, &str)]) -> reqwest::Response {
        self.http_client
            .post(self.url("/register"))
            .form(form)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_logout(&self) -> reqwest::Response {
        self.http_client
            .post(self.url("/logout"))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

pub fn institutional_email() -> Email {
    Email::parse(INSTITUTIONAL_EMAIL).expect("valid email")
}

pub fn location(response: &reqwest::Response) -> &str {
    response
        .headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

/// Read an event stream until `needle` shows up or `limit` elapses.
pub async fn read_stream_until(
    mut response: reqwest::Response,
    needle: &str,
    limit: Duration,
) -> String {
    let mut received = String::new();
    let _ = tokio::time::timeout(limit, async {
        while let Ok(Some(chunk)) = response.chunk().await {
            received.push_str(&String::from_utf8_lossy(&chunk));
            if received.contains(needle) {
                break;
            }
        }
    })
    .await;
    received
}
