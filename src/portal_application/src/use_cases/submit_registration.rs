use portal_core::{
    CaptchaToken, Cpf, CpfError, Email, EmailError, InstitutionalDomain, RegistrationEndpoint,
    RegistrationEndpointError, RegistrationRequest,
};

use crate::one_shot::OneShot;

/// Raw registration form fields as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub email: String,
    pub cpf: String,
    pub captcha_token: Option<String>,
}

/// Field-local validation failures. At least one is set when returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub email: Option<EmailError>,
    pub cpf: Option<CpfError>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.cpf.is_none()
    }
}

/// Error types for the registration submit use case
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("Invalid registration fields")]
    InvalidFields(FieldErrors),
    #[error("CAPTCHA token missing")]
    MissingCaptcha,
    #[error("Registration endpoint error: {0}")]
    RegistrationEndpointError(#[from] RegistrationEndpointError),
}

/// Registration submit use case - validates the manual access request and
/// forwards it to the registration endpoint
pub struct SubmitRegistrationUseCase<R>
where
    R: RegistrationEndpoint,
{
    endpoint: R,
    domain: InstitutionalDomain,
    one_shot: OneShot,
}

impl<R> SubmitRegistrationUseCase<R>
where
    R: RegistrationEndpoint,
{
    pub fn new(endpoint: R, domain: InstitutionalDomain, one_shot: OneShot) -> Self {
        Self {
            endpoint,
            domain,
            one_shot,
        }
    }

    /// Validate both fields, then require the CAPTCHA token.
    ///
    /// Both fields are always checked so the form can show every problem at once.
    pub fn validate(
        &self,
        form: &RegistrationForm,
    ) -> Result<(RegistrationRequest, CaptchaToken), RegistrationError> {
        let email = Email::parse(form.email.as_str())
            .and_then(|email| self.domain.check(&email).map(|()| email));
        let cpf = Cpf::parse(&form.cpf);

        let (email, cpf) = match (email, cpf) {
            (Ok(email), Ok(cpf)) => (email, cpf),
            (email, cpf) => {
                return Err(RegistrationError::InvalidFields(FieldErrors {
                    email: email.err(),
                    cpf: cpf.err(),
                }));
            }
        };

        let captcha_token = CaptchaToken::from_form_field(form.captcha_token.as_deref())
            .ok_or(RegistrationError::MissingCaptcha)?;

        let request = RegistrationRequest::new(email, cpf, &self.domain)
            .map_err(|e| RegistrationError::InvalidFields(FieldErrors {
                email: Some(e),
                cpf: None,
            }))?;

        Ok((request, captcha_token))
    }

    /// Execute the registration submit use case
    ///
    /// # Arguments
    /// * `form` - Raw form fields, including the CAPTCHA widget token
    ///
    /// # Returns
    /// The request that was forwarded, or RegistrationError. The endpoint is
    /// never called unless validation passed and a CAPTCHA token is present.
    #[tracing::instrument(name = "SubmitRegistrationUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        form: &RegistrationForm,
    ) -> Result<RegistrationRequest, RegistrationError> {
        let (request, captcha_token) = self.validate(form)?;

        self.one_shot
            .call(self.endpoint.submit(&request, &captcha_token), || {
                RegistrationEndpointError::TimedOut
            })
            .await?;

        tracing::info!(cpf = ?request.cpf(), "registration request forwarded");
        Ok(request)
    }
}
