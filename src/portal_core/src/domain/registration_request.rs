use super::{
    cpf::Cpf,
    email::{Email, EmailError},
    institutional_domain::InstitutionalDomain,
};

/// A manual access request, valid only for institutional addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    email: Email,
    cpf: Cpf,
}

impl RegistrationRequest {
    pub fn new(email: Email, cpf: Cpf, domain: &InstitutionalDomain) -> Result<Self, EmailError> {
        domain.check(&email)?;
        Ok(Self { email, cpf })
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn cpf(&self) -> &Cpf {
        &self.cpf
    }
}
