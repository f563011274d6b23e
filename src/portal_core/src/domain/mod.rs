pub mod captcha_token;
pub mod cpf;
pub mod email;
pub mod institutional_domain;
pub mod registration_request;
pub mod session;
