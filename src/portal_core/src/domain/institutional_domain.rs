use serde::Deserialize;

use super::email::{Email, EmailError};

pub const DEFAULT_INSTITUTIONAL_SUFFIX: &str = "@aluno.faeterj-prc.faetec.rj.gov.br";

/// The e-mail suffix every student account must carry.
///
/// Matching is an exact, case-sensitive suffix comparison. A configured value
/// without the leading `@` is normalized so `example.edu` never admits
/// `someone@notexample.edu`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub struct InstitutionalDomain {
    suffix: String,
}

impl InstitutionalDomain {
    pub fn new(suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        let suffix = suffix.trim();
        let suffix = if suffix.starts_with('@') {
            suffix.to_owned()
        } else {
            format!("@{suffix}")
        };
        Self { suffix }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn admits(&self, email: &Email) -> bool {
        email.expose().ends_with(&self.suffix)
    }

    pub fn check(&self, email: &Email) -> Result<(), EmailError> {
        if self.admits(email) {
            Ok(())
        } else {
            Err(EmailError::OutsideInstitution {
                suffix: self.suffix.clone(),
            })
        }
    }
}

impl Default for InstitutionalDomain {
    fn default() -> Self {
        Self::new(DEFAULT_INSTITUTIONAL_SUFFIX)
    }
}

impl From<String> for InstitutionalDomain {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_admits_institutional_address() {
        let domain = InstitutionalDomain::default();
        let email = Email::parse("joao@aluno.faeterj-prc.faetec.rj.gov.br").unwrap();
        assert!(domain.admits(&email));
        assert_eq!(domain.check(&email), Ok(()));
    }

    #[test]
    fn test_rejects_other_domains() {
        let domain = InstitutionalDomain::default();
        let email = Email::parse("joao@gmail.com").unwrap();
        assert_eq!(
            domain.check(&email),
            Err(EmailError::OutsideInstitution {
                suffix: DEFAULT_INSTITUTIONAL_SUFFIX.to_string()
            })
        );
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let domain = InstitutionalDomain::default();
        let email = Email::parse("joao@ALUNO.faeterj-prc.faetec.rj.gov.br").unwrap();
        assert!(!domain.admits(&email));
    }

    #[test]
    fn test_lookalike_domain_is_rejected() {
        let domain = InstitutionalDomain::new("example.edu");
        assert_eq!(domain.suffix(), "@example.edu");

        let lookalike = Email::parse("someone@notexample.edu").unwrap();
        assert!(!domain.admits(&lookalike));
    }

    #[quickcheck]
    fn prop_addresses_without_suffix_are_rejected(local: String, host: String) -> bool {
        let domain = InstitutionalDomain::default();
        let raw = format!("{local}@{host}.com");
        match Email::parse(raw) {
            Ok(email) => !domain.admits(&email),
            Err(_) => true,
        }
    }
}
