pub mod cookies;

pub use cookies::PortalCookies;

// Re-export HTTP traits from portal_core for convenience
pub use portal_core::{PortalRequest, PortalResponseBuilder, PortalResponseHelpers};
