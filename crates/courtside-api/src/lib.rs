//! Courtside HTTP API.
//!
//! Verifies signed interaction requests, dispatches them to autocomplete
//! resolution or downstream forwarding, and serves health endpoints.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod autocomplete;
pub mod config;
pub mod forward;
pub mod handlers;
pub mod server;
pub mod verify;

pub use config::Config;
pub use forward::{ForwardConfig, Forwarder};
pub use server::{create_router, start_server, AppState};
