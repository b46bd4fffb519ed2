//! # Actors
//!
//! The responder actor and the collaborator seams it talks through.

pub mod dispatcher;
pub mod messages;
pub mod responder;
pub mod sink;
pub mod traits;
