//! # Portal - Student Portal Library
//!
//! This is a facade crate that re-exports all public APIs from the portal components.
//! Use this crate to get access to the access gate, the session dashboard and their
//! adapters in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! portal = { path = "../portal" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Cpf`, `CaptchaToken`, `Session`, etc.
//! - **Ports**: `IdentityProvider`, `RegistrationEndpoint`
//! - **Use cases and screens**: `FederatedLoginUseCase`, `AccessGate`, `DashboardScreen`, etc.
//! - **Adapters**: `HttpIdentityProvider`, `HttpRegistrationEndpoint`, in-memory doubles
//! - **Service**: `PortalService` - The main entry point for the portal

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use portal_core::*;
}

// Re-export most commonly used core types at the root level
pub use portal_core::{
    CaptchaToken, Cpf, CpfError, Email, EmailError, InstitutionalDomain, RegistrationRequest,
    Session, SessionEvent, SessionToken,
};

// ============================================================================
// Ports
// ============================================================================

/// External collaborators the portal talks to
pub mod ports {
    pub use portal_core::{
        IdentityProvider, IdentityProviderError, RegistrationEndpoint,
        RegistrationEndpointError, SessionObserver, SessionSubscription,
    };
}

// Re-export ports at root level
pub use ports::{IdentityProvider, RegistrationEndpoint, SessionObserver};

// ============================================================================
// Use Cases and Screens (Application Layer)
// ============================================================================

/// Application use cases and screen state machines
pub mod use_cases {
    pub use portal_application::*;
}

// Re-export use cases at root level
pub use portal_application::{
    AccessGate, DashboardActivation, DashboardScreen, FederatedLoginUseCase, GateMode,
    SignOutUseCase, SubmitRegistrationUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Framework-agnostic screen handlers
    pub mod handlers {
        pub use portal_adapters::handlers::*;
    }

    /// Identity provider implementations
    pub mod identity {
        pub use portal_adapters::identity::*;
    }

    /// Registration endpoint implementations
    pub mod registration {
        pub use portal_adapters::registration::*;
    }

    /// Configuration
    pub mod config {
        pub use portal_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use portal_adapters::{
    HttpIdentityProvider, HttpRegistrationEndpoint, InMemoryIdentityProvider,
    MockRegistrationEndpoint, PortalContext, config::PortalSettings,
};

// ============================================================================
// Portal Service (Main Entry Point)
// ============================================================================

/// Main portal service
pub use portal_service::PortalService;

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
