//! Yuri chat responder core.
//!
//! Text events are normalized, matched against an ordered keyword table (the last
//! matching rule wins) and answered either from a canned reply pool or by a
//! side-effect action such as a search, a profile lookup or leaving a room.

pub mod actors;
pub mod brain;
pub mod cards;
pub mod clients;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod state;

pub use actors::responder::{ResponderEngine, ResponderHandle};
pub use config::ResponderConfig;
pub use error::AppError;
pub use events::InboundEvent;

#[cfg(test)]
mod tests;
