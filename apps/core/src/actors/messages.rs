use crate::brain::Intent;
use crate::events::InboundEvent;
use crate::models::OutboundMessage;
use serde::Serialize;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Defines errors that can occur within the actor system and its collaborators.
#[derive(Debug, thiserror::Error, Serialize, Clone, PartialEq, Eq)]
pub enum ActorError {
    /// A collaborator rejected the call. The message is shown to users as is.
    #[error("{0}")]
    Collaborator(String),
    /// The collaborator answered, but had nothing for this query.
    #[error("Not found: {0}")]
    NotFound(String),
    /// A generic internal error within an actor.
    #[error("Internal system error: {0}")]
    Internal(String),
    /// An error indicating that an actor operation timed out.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

impl From<tokio::time::error::Elapsed> for ActorError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        ActorError::Timeout(format!("Actor operation timed out: {}", err))
    }
}

impl From<reqwest::Error> for ActorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ActorError::Timeout(err.to_string())
        } else {
            ActorError::Collaborator(err.to_string())
        }
    }
}

// Re-export AppError for convenience
pub use crate::error::AppError;

/// What the responder did with one inbound event.
#[derive(Debug)]
pub struct Delivery {
    /// Resolved intent, for text events only.
    pub intent: Option<Intent>,
    /// The batch sent right away. Empty when nothing was sent.
    pub sent: Vec<OutboundMessage>,
    /// Completes once the deferred reply (if any) has been sent, yielding that batch.
    pub follow_up: Option<JoinHandle<Vec<OutboundMessage>>>,
}

/// Messages that can be sent to the `ResponderActor`.
#[derive(Debug)]
pub enum ResponderMessage {
    /// A request to answer one inbound webhook event.
    HandleEvent {
        reply_token: String,
        event: InboundEvent,
        /// A channel to send the delivery report back.
        responder: oneshot::Sender<Result<Delivery, AppError>>,
    },
    /// A command to shut down the responder loop.
    Shutdown,
}
