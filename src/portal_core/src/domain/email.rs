use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("Informe um e-mail válido")]
    Malformed,
    #[error("Use seu e-mail institucional ({suffix})")]
    OutsideInstitution { suffix: String },
}

/// A syntactically valid e-mail address.
///
/// The address is kept behind a `Secret` so it never ends up in logs via `Debug`.
#[derive(Debug, Clone)]
pub struct Email(Secret<String>);

impl Email {
    pub fn parse(raw: impl Into<String>) -> Result<Self, EmailError> {
        Self::try_from(Secret::new(raw.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl TryFrom<Secret<String>> for Email {
    type Error = EmailError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        let trimmed = value.expose_secret().trim();
        if !EMAIL_PATTERN.is_match(trimmed) {
            return Err(EmailError::Malformed);
        }
        Ok(Self(Secret::new(trimmed.to_owned())))
    }
}

impl AsRef<Secret<String>> for Email {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.expose().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_accepts_plain_address() {
        let email = Email::parse("joao@aluno.faeterj-prc.faetec.rj.gov.br").unwrap();
        assert_eq!(email.expose(), "joao@aluno.faeterj-prc.faetec.rj.gov.br");
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        let email = Email::parse("  maria@example.com \n").unwrap();
        assert_eq!(email.expose(), "maria@example.com");
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        for raw in ["", "joao", "joao@", "@gmail.com", "joao@gmail", "jo ao@gmail.com", "a@b@c.com"] {
            assert_eq!(Email::parse(raw), Err(EmailError::Malformed), "{raw:?}");
        }
    }

    #[test]
    fn test_debug_does_not_leak_address() {
        let email = Email::parse("secret@example.com").unwrap();
        assert!(!format!("{email:?}").contains("secret@example.com"));
    }

    #[quickcheck]
    fn prop_addresses_without_at_sign_are_rejected(raw: String) -> bool {
        raw.contains('@') || Email::parse(raw).is_err()
    }
}
