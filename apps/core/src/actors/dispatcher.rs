use crate::actors::messages::{ActorError, AppError};
use crate::actors::traits::{Collaborators, LeaveService, ProfileService, SearchService};
use crate::brain::{extract_keyword, Intent, ReplyPoolRegistry, ReplySelector, SearchKind};
use crate::cards::{weather_card, WEATHER_CARD_ALT_TEXT};
use crate::models::{ConversationKind, OutboundMessage, Source, Utterance};
use crate::state::LastWeatherLocation;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub const REFUSAL: &str = "I don't think so...";
pub const LEAVING_ROOM: &str = "Leaving room";
pub const CANNOT_LEAVE_DIRECT: &str = "Bot can't leave from 1:1 chat";
pub const MASTER_INTRO: &str = "Here's my Master!";
pub const NEED_MORE_INFO: &str = "Gomen ne! I need more information...";
pub const NEED_CITY: &str = "Please specify a city!";
pub const VIDEO_NOT_FOUND: &str = "Gomen ne! I couldn't find any video about that...";
pub const CITY_NOT_FOUND: &str = "Couldn't find that or you requested a wrong city name.";
pub const ADVICE_NOT_FOUND: &str = "Gomen ne! I don't have any advice about that...";
pub const SEARCH_FAILED: &str = "Gomen ne! Something went wrong, try again later...";

/// Work that finishes after the immediate reply, yielding its own batch.
pub type FollowUp = Pin<Box<dyn Future<Output = Vec<OutboundMessage>> + Send + 'static>>;

/// The outcome of dispatching one intent.
pub struct Dispatch {
    /// Sent as soon as dispatch returns.
    pub immediate: Vec<OutboundMessage>,
    /// Sent when the external call behind it completes.
    pub follow_up: Option<FollowUp>,
}

impl Dispatch {
    pub fn reply(messages: Vec<OutboundMessage>) -> Self {
        Self {
            immediate: messages,
            follow_up: None,
        }
    }

    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = Vec<OutboundMessage>> + Send + 'static,
    {
        Self {
            immediate: Vec::new(),
            follow_up: Some(Box::pin(future)),
        }
    }

    fn then<F>(mut self, future: F) -> Self
    where
        F: Future<Output = Vec<OutboundMessage>> + Send + 'static,
    {
        self.follow_up = Some(Box::pin(future));
        self
    }
}

impl std::fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatch")
            .field("immediate", &self.immediate)
            .field("follow_up", &self.follow_up.is_some())
            .finish()
    }
}

/// Turns a resolved intent into replies, running side-effect actions for the
/// intents that have one and drawing from the reply pools for the rest.
pub struct ActionDispatcher {
    registry: ReplyPoolRegistry,
    selector: Arc<ReplySelector>,
    profiles: Arc<dyn ProfileService>,
    conversations: Arc<dyn LeaveService>,
    search: Arc<dyn SearchService>,
    last_location: LastWeatherLocation,
    master_user_id: Option<String>,
}

impl ActionDispatcher {
    pub fn new(
        registry: ReplyPoolRegistry,
        selector: Arc<ReplySelector>,
        collaborators: &Collaborators,
        last_location: LastWeatherLocation,
        master_user_id: Option<String>,
    ) -> Self {
        Self {
            registry,
            selector,
            profiles: collaborators.profiles.clone(),
            conversations: collaborators.conversations.clone(),
            search: collaborators.search.clone(),
            last_location,
            master_user_id,
        }
    }

    pub fn last_location(&self) -> &LastWeatherLocation {
        &self.last_location
    }

    /// Dispatches `intent` for `utterance` sent from `source`.
    ///
    /// Only a malformed `source` is an error. Collaborator failures become
    /// reply text inside the follow-up.
    #[instrument(skip_all, fields(intent = %intent.label()))]
    pub fn dispatch(
        &self,
        intent: Intent,
        utterance: &Utterance,
        source: &Source,
    ) -> Result<Dispatch, AppError> {
        source.validate()?;
        let dispatch = match intent {
            Intent::Master => self.master(source),
            Intent::Leave => self.leave(source)?,
            Intent::Farewell if source.kind == ConversationKind::Room => self.leave(source)?,
            Intent::VideoSearch => self.search(SearchKind::Video, utterance),
            Intent::WeatherSearch => self.search(SearchKind::Weather, utterance),
            Intent::AdviceSearch => self.search(SearchKind::Advice, utterance),
            Intent::WeatherCardDemo => self.weather_card_demo(),
            _ => Dispatch::reply(self.selector.select_reply(self.registry.lookup(intent))),
        };
        Ok(dispatch)
    }

    fn master(&self, source: &Source) -> Dispatch {
        let (participant, group_id) = match source.kind {
            ConversationKind::Group => match &self.master_user_id {
                Some(master) => (master.clone(), source.conversation_id.clone()),
                None => {
                    info!("No master configured, refusing profile lookup in group");
                    return Dispatch::reply(vec![OutboundMessage::text(REFUSAL)]);
                }
            },
            _ => (source.sender_id.clone(), None),
        };

        let profiles = self.profiles.clone();
        Dispatch::deferred(async move {
            let in_group = group_id.is_some();
            match profiles.profile(participant, group_id).await {
                Ok(profile) if in_group => {
                    let mut messages = vec![OutboundMessage::text(MASTER_INTRO)];
                    if let Some(picture) = profile.picture_url {
                        messages.push(OutboundMessage::image(picture));
                    }
                    messages
                }
                Ok(profile) => vec![
                    OutboundMessage::text(format!("Display name: {}", profile.display_name)),
                    OutboundMessage::text(format!(
                        "Status message: {}",
                        profile.status_message.unwrap_or_default()
                    )),
                ],
                Err(e) => {
                    warn!("Profile lookup failed: {}", e);
                    vec![OutboundMessage::text(e.to_string())]
                }
            }
        })
    }

    fn leave(&self, source: &Source) -> Result<Dispatch, AppError> {
        match source.kind {
            ConversationKind::Group => Ok(Dispatch::reply(vec![OutboundMessage::text(REFUSAL)])),
            ConversationKind::Direct => Ok(Dispatch::reply(vec![OutboundMessage::text(
                CANNOT_LEAVE_DIRECT,
            )])),
            ConversationKind::Room => {
                let room_id = source.conversation_id.clone().ok_or_else(|| {
                    AppError::InvalidArgument("conversationId is required for room conversations".to_string())
                })?;
                let conversations = self.conversations.clone();
                Ok(Dispatch::reply(vec![OutboundMessage::text(LEAVING_ROOM)]).then(async move {
                    match conversations.leave(ConversationKind::Room, room_id.clone()).await {
                        Ok(()) => {
                            info!("Left room {}", room_id);
                            Vec::new()
                        }
                        Err(e) => {
                            warn!("Leaving room {} failed: {}", room_id, e);
                            vec![OutboundMessage::text(e.to_string())]
                        }
                    }
                }))
            }
        }
    }

    fn search(&self, kind: SearchKind, utterance: &Utterance) -> Dispatch {
        let Some(keyword) = extract_keyword(utterance.normalized(), kind) else {
            return Dispatch::reply(vec![OutboundMessage::text(need_more_info(kind))]);
        };

        let search = self.search.clone();
        let last_location = self.last_location.clone();
        Dispatch::deferred(async move {
            info!("Searching {:?} for '{}'", kind, keyword);
            match kind {
                SearchKind::Video => match search.video(keyword).await {
                    Ok(video) => vec![OutboundMessage::text(video.share_url())],
                    Err(e) => search_failure(kind, e),
                },
                SearchKind::Weather => match search.weather(keyword).await {
                    Ok(report) => {
                        last_location.set(report.location());
                        vec![
                            OutboundMessage::image(report.icon_url()),
                            OutboundMessage::text(report.summary()),
                        ]
                    }
                    Err(e) => search_failure(kind, e),
                },
                SearchKind::Advice => match search.advice(keyword).await {
                    Ok(advice) => vec![OutboundMessage::text(advice.text)],
                    Err(e) => search_failure(kind, e),
                },
            }
        })
    }

    fn weather_card_demo(&self) -> Dispatch {
        let location = self.last_location.get();
        Dispatch::reply(vec![OutboundMessage::Card {
            alt_text: WEATHER_CARD_ALT_TEXT.to_string(),
            contents: weather_card(&location),
        }])
    }
}

fn need_more_info(kind: SearchKind) -> &'static str {
    match kind {
        SearchKind::Weather => NEED_CITY,
        SearchKind::Video | SearchKind::Advice => NEED_MORE_INFO,
    }
}

fn search_failure(kind: SearchKind, err: ActorError) -> Vec<OutboundMessage> {
    let text = match (&err, kind) {
        (ActorError::NotFound(_), SearchKind::Video) => VIDEO_NOT_FOUND,
        (ActorError::NotFound(_), SearchKind::Weather) => CITY_NOT_FOUND,
        (ActorError::NotFound(_), SearchKind::Advice) => ADVICE_NOT_FOUND,
        _ => {
            warn!("{:?} search failed: {}", kind, err);
            SEARCH_FAILED
        }
    };
    vec![OutboundMessage::text(text)]
}
