use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{captcha_token::CaptchaToken, registration_request::RegistrationRequest};

#[derive(Debug, Error)]
pub enum RegistrationEndpointError {
    #[error("Registration endpoint did not answer in time")]
    TimedOut,
    #[error("Registration endpoint rejected the request with status {status}")]
    Rejected { status: u16 },
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

/// Port for the external receiver of manual access requests.
#[async_trait]
pub trait RegistrationEndpoint: Send + Sync {
    async fn submit(
        &self,
        request: &RegistrationRequest,
        captcha_token: &CaptchaToken,
    ) -> Result<(), RegistrationEndpointError>;
}
