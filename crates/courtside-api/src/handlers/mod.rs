//! HTTP request handlers.

pub mod health;
pub mod interactions;

pub use health::{health_check, liveness_check};
pub use interactions::{handle_interaction, interactions_method_fallback};
