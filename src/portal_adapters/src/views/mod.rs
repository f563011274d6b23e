//! Server-rendered pages for the two portal screens.

use askama::Template;
use portal_application::{AccessGate, Banner, BannerKind, DashboardPanel, GateMode};
use portal_core::InstitutionalDomain;

use crate::config::routes;

pub struct BannerView {
    pub css_class: &'static str,
    pub text: String,
}

impl From<&Banner> for BannerView {
    fn from(banner: &Banner) -> Self {
        let css_class = match banner.kind {
            BannerKind::Success => "success",
            BannerKind::Error => "error",
            BannerKind::Info => "info",
        };
        Self {
            css_class,
            text: banner.text.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "gate.html")]
pub struct GatePage<'a> {
    pub registration_mode: bool,
    pub email: &'a str,
    pub cpf: &'a str,
    pub email_error: Option<&'a str>,
    pub cpf_error: Option<&'a str>,
    pub banner: Option<BannerView>,
    pub can_submit: bool,
    pub captcha_site_key: &'a str,
    pub domain_suffix: &'a str,
}

impl<'a> GatePage<'a> {
    pub fn new(
        gate: &'a AccessGate,
        captcha_site_key: &'a str,
        domain: &'a InstitutionalDomain,
    ) -> Self {
        Self {
            registration_mode: gate.mode() == GateMode::RegistrationForm,
            email: gate.email(),
            cpf: gate.cpf(),
            email_error: gate.email_error(),
            cpf_error: gate.cpf_error(),
            banner: gate.banner().map(BannerView::from),
            can_submit: gate.can_submit(),
            captcha_site_key,
            domain_suffix: domain.suffix(),
        }
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage<'a> {
    pub email: &'a str,
    pub panels: &'a [DashboardPanel],
    pub banner: Option<BannerView>,
    pub events_url: &'a str,
}

impl<'a> DashboardPage<'a> {
    pub fn new(email: &'a str, panels: &'a [DashboardPanel], banner: Option<&Banner>) -> Self {
        Self {
            email,
            panels,
            banner: banner.map(BannerView::from),
            events_url: routes::DASHBOARD_EVENTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_application::{DEFAULT_PANELS, RegistrationForm, messages};

    #[test]
    fn test_federated_mode_renders_login_button_only() {
        let gate = AccessGate::new(GateMode::FederatedLogin);
        let domain = InstitutionalDomain::default();

        let html = GatePage::new(&gate, "site-key", &domain).render().unwrap();

        assert!(html.contains("action=\"/auth/federated\""));
        assert!(!html.contains("action=\"/register\""));
    }

    #[test]
    fn test_registration_mode_keeps_input_and_field_errors() {
        let mut gate = AccessGate::from_form(&RegistrationForm {
            email: "joao@gmail.com".to_owned(),
            cpf: "11122233344".to_owned(),
            captcha_token: None,
        });
        gate.notify(Banner::error(messages::REGISTRATION_FAILED));
        let domain = InstitutionalDomain::default();

        let html = GatePage::new(&gate, "site-key", &domain).render().unwrap();

        assert!(html.contains("value=\"joao@gmail.com\""));
        assert!(html.contains("value=\"111.222.333-44\""));
        assert!(html.contains("data-sitekey=\"site-key\""));
        assert!(html.contains("banner-error"));
        assert!(html.contains(" disabled>"));
    }

    #[test]
    fn test_dashboard_lists_every_panel() {
        let html = DashboardPage::new("maria@aluno.faeterj-prc.faetec.rj.gov.br", DEFAULT_PANELS, None)
            .render()
            .unwrap();

        for panel in DEFAULT_PANELS {
            assert!(html.contains(panel.title));
        }
        assert!(html.contains("data-events="));
    }
}
