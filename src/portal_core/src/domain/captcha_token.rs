use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptchaTokenError {
    #[error("Confirme que você não é um robô")]
    Missing,
}

/// Token handed out by the CAPTCHA widget after a successful challenge.
///
/// The portal never verifies it; it only requires its presence and forwards it.
#[derive(Debug, Clone)]
pub struct CaptchaToken(Secret<String>);

impl CaptchaToken {
    pub fn parse(raw: impl Into<String>) -> Result<Self, CaptchaTokenError> {
        Self::try_from(Secret::new(raw.into()))
    }

    /// Reads the widget's form field. An absent or blank field means the
    /// challenge was never solved or the token expired.
    pub fn from_form_field(field: Option<&str>) -> Option<Self> {
        field.and_then(|raw| Self::parse(raw).ok())
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl TryFrom<Secret<String>> for CaptchaToken {
    type Error = CaptchaTokenError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        let trimmed = value.expose_secret().trim();
        if trimmed.is_empty() {
            return Err(CaptchaTokenError::Missing);
        }
        Ok(Self(Secret::new(trimmed.to_owned())))
    }
}

impl AsRef<Secret<String>> for CaptchaToken {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_field_means_missing() {
        assert!(CaptchaToken::from_form_field(None).is_none());
        assert!(CaptchaToken::from_form_field(Some("")).is_none());
        assert!(CaptchaToken::from_form_field(Some("   ")).is_none());
    }

    #[test]
    fn test_present_token_is_kept() {
        let token = CaptchaToken::from_form_field(Some("10000000-aaaa-bbbb")).unwrap();
        assert_eq!(token.expose(), "10000000-aaaa-bbbb");
    }
}
