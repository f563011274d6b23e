pub mod portal_service;
pub mod tracing;

pub use portal_service::PortalService;
