use portal_core::{CaptchaToken, CaptchaTokenError, Cpf, RegistrationRequest, Session};

use crate::use_cases::{
    federated_login::FederatedLoginError,
    submit_registration::{RegistrationError, RegistrationForm},
};

/// Fixed user-facing messages of the portal.
pub mod messages {
    pub const LOGIN_SUCCESS: &str = "Login realizado com sucesso!";
    pub const DOMAIN_DENIED: &str =
        "Acesso negado. Apenas e-mails institucionais podem acessar o portal.";
    pub const LOGIN_FAILED: &str = "Não foi possível entrar com sua conta. Tente novamente.";
    pub const REGISTRATION_SUCCESS: &str =
        "Solicitação enviada! Você receberá um e-mail quando seu acesso for liberado.";
    pub const REGISTRATION_FAILED: &str =
        "Não foi possível enviar sua solicitação. Tente novamente.";
    pub const REQUEST_IN_PROGRESS: &str = "Aguarde, sua solicitação está sendo processada.";
    pub const SIGNED_OUT: &str = "Você saiu da sua conta.";
    pub const SIGN_OUT_FAILED: &str = "Erro ao sair da conta. Tente novamente.";
    pub const SESSION_ENDED: &str = "Sua sessão terminou. Entre novamente.";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateMode {
    #[default]
    FederatedLogin,
    RegistrationForm,
}

impl GateMode {
    pub fn toggled(self) -> Self {
        match self {
            GateMode::FederatedLogin => GateMode::RegistrationForm,
            GateMode::RegistrationForm => GateMode::FederatedLogin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
}

impl Banner {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Info,
            text: text.into(),
        }
    }
}

/// UI state of one Access Gate activation.
#[derive(Debug, Clone, Default)]
pub struct AccessGate {
    mode: GateMode,
    email: String,
    cpf: String,
    cpf_input: String,
    email_error: Option<String>,
    cpf_error: Option<String>,
    banner: Option<Banner>,
    captcha_token: Option<CaptchaToken>,
    loading: bool,
}

impl AccessGate {
    pub fn new(mode: GateMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Rebuild the registration-mode state from a submitted form.
    pub fn from_form(form: &RegistrationForm) -> Self {
        let mut gate = Self::new(GateMode::RegistrationForm);
        gate.set_email(&form.email);
        gate.set_cpf(&form.cpf);
        if let Some(token) = CaptchaToken::from_form_field(form.captcha_token.as_deref()) {
            gate.captcha_solved(token);
        }
        gate
    }

    pub fn mode(&self) -> GateMode {
        self.mode
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.banner = None;
        self.clear_field_errors();
    }

    pub fn set_email(&mut self, raw: &str) {
        self.email = raw.trim().to_string();
        self.email_error = None;
    }

    pub fn set_cpf(&mut self, raw: &str) {
        self.cpf = Cpf::mask_input(raw);
        self.cpf_input = raw.trim().to_string();
        self.cpf_error = None;
    }

    pub fn captcha_solved(&mut self, token: CaptchaToken) {
        self.captcha_token = Some(token);
    }

    pub fn captcha_expired(&mut self) {
        self.captcha_token = None;
    }

    pub fn notify(&mut self, banner: Banner) {
        self.banner = Some(banner);
    }

    /// Submission is blocked until the CAPTCHA is solved and nothing is in flight.
    pub fn can_submit(&self) -> bool {
        self.captcha_token.is_some() && !self.loading
    }

    /// Raise the loading flag. Returns false when a request is already in flight.
    pub fn start_loading(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        true
    }

    pub fn form(&self) -> RegistrationForm {
        RegistrationForm {
            email: self.email.clone(),
            cpf: self.cpf.clone(),
            captcha_token: self.captcha_token.as_ref().map(|t| t.expose().to_string()),
        }
    }

    /// Apply the outcome of a registration submit and drop the loading flag.
    ///
    /// The widget token is single use and the page shows a fresh widget, so
    /// every outcome drops it.
    pub fn finish_registration(&mut self, outcome: &Result<RegistrationRequest, RegistrationError>) {
        self.loading = false;
        self.clear_field_errors();
        self.captcha_token = None;

        match outcome {
            Ok(_) => {
                self.email.clear();
                self.cpf.clear();
                self.cpf_input.clear();
                self.banner = Some(Banner::success(messages::REGISTRATION_SUCCESS));
            }
            Err(RegistrationError::InvalidFields(errors)) => {
                self.email_error = errors.email.as_ref().map(ToString::to_string);
                self.cpf_error = errors.cpf.as_ref().map(ToString::to_string);
                if self.cpf_error.is_some() {
                    // A rejected CPF is shown as typed, not reformatted
                    self.cpf = self.cpf_input.clone();
                }
                self.banner = None;
            }
            Err(RegistrationError::MissingCaptcha) => {
                self.banner = Some(Banner::error(CaptchaTokenError::Missing.to_string()));
            }
            Err(RegistrationError::RegistrationEndpointError(_)) => {
                self.banner = Some(Banner::error(messages::REGISTRATION_FAILED));
            }
        }
    }

    /// Apply the outcome of a federated login round trip and drop the loading flag.
    pub fn finish_federated_login(&mut self, outcome: &Result<Session, FederatedLoginError>) {
        self.loading = false;
        self.mode = GateMode::FederatedLogin;
        self.banner = Some(match outcome {
            Ok(_) => Banner::success(messages::LOGIN_SUCCESS),
            Err(FederatedLoginError::Denied) => Banner::error(messages::DOMAIN_DENIED),
            Err(FederatedLoginError::IdentityProviderError(_)) => {
                Banner::error(messages::LOGIN_FAILED)
            }
        });
    }

    /// Mark the gate as refused because another request is outstanding.
    pub fn refuse_busy(&mut self) {
        self.captcha_token = None;
        self.banner = Some(Banner::info(messages::REQUEST_IN_PROGRESS));
    }

    fn clear_field_errors(&mut self) {
        self.email_error = None;
        self.cpf_error = None;
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn cpf(&self) -> &str {
        &self.cpf
    }

    pub fn email_error(&self) -> Option<&str> {
        self.email_error.as_deref()
    }

    pub fn cpf_error(&self) -> Option<&str> {
        self.cpf_error.as_deref()
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn has_captcha_token(&self) -> bool {
        self.captcha_token.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
