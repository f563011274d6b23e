use std::sync::Arc;

use portal_application::{
    DashboardScreen, FederatedLoginUseCase, InFlightRegistry, OneShot, SignOutUseCase,
    SubmitRegistrationUseCase,
};
use portal_core::{IdentityProvider, InstitutionalDomain, RegistrationEndpoint};

use crate::{config::PortalSettings, http::PortalCookies};

/// Everything the screen handlers share: use cases, the in-flight guard and
/// cookie handling.
///
/// Cloning is cheap; use cases live behind `Arc`.
pub struct PortalContext<P, R>
where
    P: IdentityProvider,
    R: RegistrationEndpoint,
{
    pub(crate) federated_login: Arc<FederatedLoginUseCase<P>>,
    pub(crate) registration: Arc<SubmitRegistrationUseCase<R>>,
    pub(crate) sign_out: Arc<SignOutUseCase<P>>,
    pub(crate) dashboard: Arc<DashboardScreen<P>>,
    pub(crate) in_flight: InFlightRegistry,
    pub(crate) cookies: PortalCookies,
    pub(crate) domain: InstitutionalDomain,
    pub(crate) captcha_site_key: Arc<str>,
}

impl<P, R> PortalContext<P, R>
where
    P: IdentityProvider + Clone,
    R: RegistrationEndpoint,
{
    pub fn new(provider: P, endpoint: R, settings: &PortalSettings) -> Self {
        let domain = settings.gate.institutional_domain.clone();
        let identity_calls = OneShot::new(settings.identity_provider.timeout());
        let registration_calls = OneShot::new(settings.registration.timeout());

        Self {
            federated_login: Arc::new(FederatedLoginUseCase::new(
                provider.clone(),
                domain.clone(),
                identity_calls,
            )),
            registration: Arc::new(SubmitRegistrationUseCase::new(
                endpoint,
                domain.clone(),
                registration_calls,
            )),
            sign_out: Arc::new(SignOutUseCase::new(provider.clone(), identity_calls)),
            dashboard: Arc::new(DashboardScreen::new(provider, identity_calls)),
            in_flight: InFlightRegistry::new(),
            cookies: PortalCookies::new(settings.session.clone()),
            domain,
            captcha_site_key: Arc::from(settings.gate.captcha_site_key.as_str()),
        }
    }
}

impl<P, R> PortalContext<P, R>
where
    P: IdentityProvider,
    R: RegistrationEndpoint,
{
    pub fn cookies(&self) -> &PortalCookies {
        &self.cookies
    }

    pub fn in_flight(&self) -> &InFlightRegistry {
        &self.in_flight
    }
}

impl<P, R> Clone for PortalContext<P, R>
where
    P: IdentityProvider,
    R: RegistrationEndpoint,
{
    fn clone(&self) -> Self {
        Self {
            federated_login: self.federated_login.clone(),
            registration: self.registration.clone(),
            sign_out: self.sign_out.clone(),
            dashboard: self.dashboard.clone(),
            in_flight: self.in_flight.clone(),
            cookies: self.cookies.clone(),
            domain: self.domain.clone(),
            captcha_site_key: self.captcha_site_key.clone(),
        }
    }
}
