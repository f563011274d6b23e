use portal_core::{IdentityProvider, IdentityProviderError, SessionToken};

use crate::one_shot::OneShot;

/// Error types for sign-out use case
#[derive(Debug, thiserror::Error)]
pub enum SignOutError {
    #[error("Identity provider error: {0}")]
    IdentityProviderError(#[from] IdentityProviderError),
}

/// Sign-out use case - asks the identity provider to end a session
pub struct SignOutUseCase<P>
where
    P: IdentityProvider,
{
    provider: P,
    one_shot: OneShot,
}

impl<P> SignOutUseCase<P>
where
    P: IdentityProvider,
{
    pub fn new(provider: P, one_shot: OneShot) -> Self {
        Self { provider, one_shot }
    }

    /// Execute the sign-out use case
    ///
    /// # Arguments
    /// * `token` - The session to terminate
    ///
    /// # Returns
    /// Ok(()) once the provider confirmed, or SignOutError. Failures are not retried.
    #[tracing::instrument(name = "SignOutUseCase::execute", skip_all)]
    pub async fn execute(&self, token: &SessionToken) -> Result<(), SignOutError> {
        self.one_shot
            .call(self.provider.sign_out(token), || {
                IdentityProviderError::TimedOut
            })
            .await?;

        Ok(())
    }
}
