pub mod federated_login;
pub mod sign_out;
pub mod submit_registration;
