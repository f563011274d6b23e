use std::sync::Arc;
use std::time::Duration;

use portal_core::{
    CaptchaToken, RegistrationEndpoint, RegistrationEndpointError, RegistrationRequest,
};
use tokio::sync::RwLock;

/// A registration request as the endpoint received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSubmission {
    pub email: String,
    pub cpf: String,
    pub captcha_token: String,
}

/// Registration endpoint that records submissions instead of sending them.
#[derive(Debug, Clone, Default)]
pub struct MockRegistrationEndpoint {
    submissions: Arc<RwLock<Vec<RecordedSubmission>>>,
    delay: Option<Duration>,
    reject_with: Option<u16>,
}

impl MockRegistrationEndpoint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn rejecting(mut self, status: u16) -> Self {
        self.reject_with = Some(status);
        self
    }

    pub async fn submissions(&self) -> Vec<RecordedSubmission> {
        self.submissions.read().await.clone()
    }
}

#[async_trait::async_trait]
impl RegistrationEndpoint for MockRegistrationEndpoint {
    async fn submit(
        &self,
        request: &RegistrationRequest,
        captcha_token: &CaptchaToken,
    ) -> Result<(), RegistrationEndpointError> {
        self.submissions.write().await.push(RecordedSubmission {
            email: request.email().expose().to_owned(),
            cpf: request.cpf().as_str().to_owned(),
            captcha_token: captcha_token.expose().to_owned(),
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.reject_with {
            Some(status) => Err(RegistrationEndpointError::Rejected { status }),
            None => Ok(()),
        }
    }
}
