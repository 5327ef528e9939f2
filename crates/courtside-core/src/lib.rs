//! Core domain types for the Courtside interaction service.
//!
//! Provides the interaction wire model, player records, sport categories,
//! and the clock abstraction used for testable cache expiry. All other
//! crates depend on these foundational types.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod interaction;
pub mod player;
pub mod time;

pub use interaction::{
    Choice, Interaction, InteractionData, InteractionOption, InteractionResponse, InteractionType,
};
pub use player::{Player, Sport};
pub use time::{Clock, RealClock, TestClock};
