pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{
    AppSettings, GateSettings, IdentityProviderSettings, PortalSettings, RegistrationSettings,
    SessionSettings,
};
