//! Sports-data API access for the Courtside interaction service.
//!
//! Provides the HTTP client for the external sports-data source, the
//! defensive row normalization shared by roster and search paths, and the
//! per-sport roster cache with time-bounded validity.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cache;
pub mod client;
pub mod error;
pub mod normalize;

pub use cache::RosterCache;
pub use client::{ClientConfig, SportsClient};
pub use error::{Result, RosterError};
pub use normalize::normalize_player;
