pub mod http_identity_provider;
pub mod in_memory_identity_provider;
pub mod session_event_hub;

pub use http_identity_provider::HttpIdentityProvider;
pub use in_memory_identity_provider::InMemoryIdentityProvider;
pub use session_event_hub::SessionEventHub;
