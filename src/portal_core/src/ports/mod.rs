pub mod identity_provider;
pub mod registration_endpoint;
