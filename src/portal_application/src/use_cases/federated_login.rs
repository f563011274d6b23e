use portal_core::{IdentityProvider, IdentityProviderError, InstitutionalDomain, Session};

use crate::one_shot::OneShot;

/// Error types for the federated login use case
#[derive(Debug, thiserror::Error)]
pub enum FederatedLoginError {
    #[error("Account is outside the institutional domain")]
    Denied,
    #[error("Identity provider error: {0}")]
    IdentityProviderError(#[from] IdentityProviderError),
}

/// Federated login use case - signs in through the identity provider and
/// enforces the institutional domain on the account it returns
pub struct FederatedLoginUseCase<P>
where
    P: IdentityProvider,
{
    provider: P,
    domain: InstitutionalDomain,
    one_shot: OneShot,
}

impl<P> FederatedLoginUseCase<P>
where
    P: IdentityProvider,
{
    pub fn new(provider: P, domain: InstitutionalDomain, one_shot: OneShot) -> Self {
        Self {
            provider,
            domain,
            one_shot,
        }
    }

    /// Build the provider URL the browser is sent to.
    ///
    /// # Arguments
    /// * `state` - Random nonce echoed back on the callback
    pub fn begin(&self, state: &str) -> Result<String, FederatedLoginError> {
        Ok(self.provider.authorization_url(state)?)
    }

    /// Execute the federated login use case
    ///
    /// # Arguments
    /// * `code` - One-time authorization code from the provider callback
    ///
    /// # Returns
    /// The provider's session when its e-mail carries the institutional suffix.
    /// A session for any other account is signed out again and `Denied` is returned.
    #[tracing::instrument(name = "FederatedLoginUseCase::complete", skip_all)]
    pub async fn complete(&self, code: &str) -> Result<Session, FederatedLoginError> {
        let session = self
            .one_shot
            .call(self.provider.exchange_code(code), || {
                IdentityProviderError::TimedOut
            })
            .await?;

        if self.domain.admits(session.email()) {
            tracing::info!("federated login accepted");
            return Ok(session);
        }

        tracing::warn!("federated login denied for non-institutional account");
        let revoked = self
            .one_shot
            .call(self.provider.sign_out(session.token()), || {
                IdentityProviderError::TimedOut
            })
            .await;
        if let Err(e) = revoked {
            tracing::warn!(error = %e, "could not revoke non-institutional session");
        }

        Err(FederatedLoginError::Denied)
    }
}
