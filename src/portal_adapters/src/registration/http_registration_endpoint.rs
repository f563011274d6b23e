use portal_core::{
    CaptchaToken, RegistrationEndpoint, RegistrationEndpointError, RegistrationRequest,
};
use reqwest::{Client, Url};

/// Forwards registration requests to the back-office endpoint as JSON.
#[derive(Clone)]
pub struct HttpRegistrationEndpoint {
    http_client: Client,
    url: String,
}

impl HttpRegistrationEndpoint {
    pub fn new(url: String, http_client: Client) -> Self {
        Self { http_client, url }
    }
}

#[async_trait::async_trait]
impl RegistrationEndpoint for HttpRegistrationEndpoint {
    #[tracing::instrument(name = "Submitting registration request", skip_all)]
    async fn submit(
        &self,
        request: &RegistrationRequest,
        captcha_token: &CaptchaToken,
    ) -> Result<(), RegistrationEndpointError> {
        let url = Url::parse(&self.url)
            .map_err(|e| RegistrationEndpointError::UnexpectedError(e.to_string()))?;

        let request_body = SubmitRegistrationRequest {
            email: request.email().expose(),
            cpf: request.cpf().as_str(),
            captcha_token: captcha_token.expose(),
        };

        self.http_client
            .post(url)
            .json(&request_body)
            .send()
            .await
            .map_err(transport_error)?
            .error_for_status()
            .map_err(transport_error)?;

        Ok(())
    }
}

fn transport_error(e: reqwest::Error) -> RegistrationEndpointError {
    if e.is_timeout() {
        RegistrationEndpointError::TimedOut
    } else if let Some(status) = e.status() {
        RegistrationEndpointError::Rejected {
            status: status.as_u16(),
        }
    } else {
        RegistrationEndpointError::UnexpectedError(e.to_string())
    }
}

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SubmitRegistrationRequest<'a> {
    email: &'a str,
    cpf: &'a str,
    captcha_token: &'a str,
}
