pub mod http_registration_endpoint;
pub mod mock_registration_endpoint;

pub use http_registration_endpoint::HttpRegistrationEndpoint;
pub use mock_registration_endpoint::{MockRegistrationEndpoint, RecordedSubmission};
