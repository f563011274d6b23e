//! Screen state for the two portal screens.
//!
//! These types hold the ephemeral UI state of one screen activation and apply
//! use case outcomes to it. Rendering lives in the adapters.

pub mod access_gate;
pub mod dashboard;
