use crate::actors::messages::{ActorError, AppError};
use crate::models::{Advice, ConversationKind, OutboundMessage, Profile, VideoResult, WeatherReport};
use async_trait::async_trait;
use std::sync::Arc;

/// Delivers reply batches to the messaging platform.
///
/// Implementations may assume a non-empty token and a non-empty batch; callers go
/// through [`crate::actors::sink::send_reply`], which enforces both.
#[async_trait]
pub trait ReplySink: Send + Sync + 'static {
    async fn send_reply(&self, reply_token: String, messages: Vec<OutboundMessage>) -> Result<(), AppError>;
}

/// Looks up participant profiles.
#[async_trait]
pub trait ProfileService: Send + Sync + 'static {
    /// Profile of `participant_id`, as a member of `group_id` when given.
    async fn profile(&self, participant_id: String, group_id: Option<String>) -> Result<Profile, ActorError>;
}

/// Makes the bot leave a conversation.
#[async_trait]
pub trait LeaveService: Send + Sync + 'static {
    async fn leave(&self, kind: ConversationKind, conversation_id: String) -> Result<(), ActorError>;
}

/// Third-party lookups behind the search intents.
///
/// "Nothing found" is reported as [`ActorError::NotFound`], distinct from
/// transport failures.
#[async_trait]
pub trait SearchService: Send + Sync + 'static {
    async fn video(&self, keyword: String) -> Result<VideoResult, ActorError>;

    async fn weather(&self, city: String) -> Result<WeatherReport, ActorError>;

    async fn advice(&self, topic: String) -> Result<Advice, ActorError>;
}

/// Everything the responder talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub sink: Arc<dyn ReplySink>,
    pub profiles: Arc<dyn ProfileService>,
    pub conversations: Arc<dyn LeaveService>,
    pub search: Arc<dyn SearchService>,
}
