use std::collections::HashMap;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use portal_core::{DEFAULT_INSTITUTIONAL_SUFFIX, InstitutionalDomain};
use secrecy::Secret;
use serde::Deserialize;

use super::constants::{cookies, env, prod};

/// Runtime configuration of the portal.
///
/// Sources, lowest precedence first: built-in defaults, the optional
/// `config/portal.json` file, then `PORTAL__SECTION__KEY` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct PortalSettings {
    pub app: AppSettings,
    pub gate: GateSettings,
    pub identity_provider: IdentityProviderSettings,
    pub registration: RegistrationSettings,
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    pub address: String,
    pub assets_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GateSettings {
    pub institutional_domain: InstitutionalDomain,
    pub captcha_site_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdentityProviderSettings {
    pub base_url: String,
    pub api_key: Secret<String>,
    pub provider: String,
    pub redirect_url: String,
    pub timeout_millis: u64,
    pub poll_interval_secs: u64,
}

impl IdentityProviderSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationSettings {
    pub url: String,
    pub timeout_millis: u64,
}

impl RegistrationSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    pub cookie_name: String,
    pub state_cookie_name: String,
    pub gate_cookie_name: String,
    pub secure_cookies: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            cookie_name: cookies::SESSION_COOKIE_NAME.to_owned(),
            state_cookie_name: cookies::STATE_COOKIE_NAME.to_owned(),
            gate_cookie_name: cookies::GATE_COOKIE_NAME.to_owned(),
            secure_cookies: true,
        }
    }
}

impl PortalSettings {
    /// Load settings from `.env`, the config file and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!(error = %e, "no .env file loaded");
        }
        Self::from_sources(None)
    }

    /// Build settings with an explicit environment map in place of the process environment.
    pub fn from_sources(environment: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("app.address", prod::APP_ADDRESS)?
            .set_default("app.assets_dir", prod::ASSETS_DIR)?
            .set_default("gate.institutional_domain", DEFAULT_INSTITUTIONAL_SUFFIX)?
            .set_default("gate.captcha_site_key", "")?
            .set_default("identity_provider.base_url", prod::identity_provider::BASE_URL)?
            .set_default("identity_provider.api_key", "")?
            .set_default("identity_provider.provider", prod::identity_provider::PROVIDER)?
            .set_default(
                "identity_provider.redirect_url",
                prod::identity_provider::REDIRECT_URL,
            )?
            .set_default(
                "identity_provider.timeout_millis",
                prod::identity_provider::TIMEOUT_MILLIS,
            )?
            .set_default(
                "identity_provider.poll_interval_secs",
                prod::identity_provider::POLL_INTERVAL_SECS,
            )?
            .set_default("registration.url", prod::registration::URL)?
            .set_default(
                "registration.timeout_millis",
                prod::registration::TIMEOUT_MILLIS,
            )?
            .set_default("session.cookie_name", cookies::SESSION_COOKIE_NAME)?
            .set_default("session.state_cookie_name", cookies::STATE_COOKIE_NAME)?
            .set_default("session.gate_cookie_name", cookies::GATE_COOKIE_NAME)?
            .set_default("session.secure_cookies", true)?
            .add_source(File::with_name(env::CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(env::ENV_PREFIX)
                    .prefix_separator(env::ENV_SEPARATOR)
                    .separator(env::ENV_SEPARATOR)
                    .try_parsing(true)
                    .source(environment),
            )
            .build()?;

        config.try_deserialize()
    }
}
