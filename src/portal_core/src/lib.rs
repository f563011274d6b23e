pub mod domain;
pub mod http_abstraction;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    captcha_token::{CaptchaToken, CaptchaTokenError},
    cpf::{Cpf, CpfError},
    email::{Email, EmailError},
    institutional_domain::{DEFAULT_INSTITUTIONAL_SUFFIX, InstitutionalDomain},
    registration_request::RegistrationRequest,
    session::{Session, SessionEvent, SessionToken},
};

pub use ports::{
    identity_provider::{
        IdentityProvider, IdentityProviderError, SessionObserver, SessionSubscription,
    },
    registration_endpoint::{RegistrationEndpoint, RegistrationEndpointError},
};

pub use http_abstraction::{PortalRequest, PortalResponseBuilder, PortalResponseHelpers};
