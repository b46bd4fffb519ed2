//! Inbound webhook events and the canned replies for everything that isn't text.

use crate::brain::replies::{IMAGE_REACTIONS, VIDEO_REACTIONS};
use crate::brain::ReplySelector;
use crate::models::{OutboundMessage, Source};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

pub const FILE_REPLY: &str = "I'll look at that later, I'm busy now!";
pub const FOLLOW_REPLY: &str = "Now what?";
pub const JOIN_REPLY: &str = "Thanks for adding me to your group!";
pub const MEMBER_JOINED_REPLY: &str =
    "Welcome to this group! Rules are basic: respect each other and have fun!";

/// One webhook event, already decoded by the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InboundEvent {
    Text {
        source: Source,
        text: String,
    },
    Image {
        source: Source,
    },
    Video {
        source: Source,
    },
    File {
        source: Source,
        file_name: String,
        file_size: u64,
    },
    Sticker {
        source: Source,
        package_id: String,
        sticker_id: String,
    },
    Location {
        source: Source,
        title: String,
        address: String,
        latitude: f64,
        longitude: f64,
    },
    Follow {
        source: Source,
    },
    Unfollow {
        source: Source,
    },
    Join {
        source: Source,
    },
    MemberJoined {
        source: Source,
    },
    MemberLeft {
        source: Source,
        member_ids: Vec<String>,
    },
    Postback {
        source: Source,
        data: String,
        #[serde(default)]
        params: BTreeMap<String, String>,
    },
    Beacon {
        source: Source,
        hwid: String,
    },
}

impl InboundEvent {
    pub fn text(source: Source, text: impl Into<String>) -> Self {
        InboundEvent::Text {
            source,
            text: text.into(),
        }
    }

    pub fn source(&self) -> &Source {
        match self {
            InboundEvent::Text { source, .. }
            | InboundEvent::Image { source }
            | InboundEvent::Video { source }
            | InboundEvent::File { source, .. }
            | InboundEvent::Sticker { source, .. }
            | InboundEvent::Location { source, .. }
            | InboundEvent::Follow { source }
            | InboundEvent::Unfollow { source }
            | InboundEvent::Join { source }
            | InboundEvent::MemberJoined { source }
            | InboundEvent::MemberLeft { source, .. }
            | InboundEvent::Postback { source, .. }
            | InboundEvent::Beacon { source, .. } => source,
        }
    }

    /// Unfollow and member-left events carry no reply token.
    pub fn expects_reply(&self) -> bool {
        !matches!(
            self,
            InboundEvent::Unfollow { .. } | InboundEvent::MemberLeft { .. }
        )
    }
}

/// The reply batch for a non-text event. Text events go through the intent
/// pipeline instead and yield an empty batch here.
pub fn canned_reply(event: &InboundEvent, selector: &ReplySelector) -> Vec<OutboundMessage> {
    match event {
        InboundEvent::Text { .. } => Vec::new(),
        InboundEvent::Image { .. } => selector.select_reply(IMAGE_REACTIONS),
        InboundEvent::Video { .. } => selector.select_reply(VIDEO_REACTIONS),
        InboundEvent::File {
            file_name,
            file_size,
            ..
        } => {
            info!("Received file {} ({} bytes)", file_name, file_size);
            vec![OutboundMessage::text(FILE_REPLY)]
        }
        InboundEvent::Sticker {
            package_id,
            sticker_id,
            ..
        } => vec![OutboundMessage::sticker(package_id.clone(), sticker_id.clone())],
        InboundEvent::Location {
            title,
            address,
            latitude,
            longitude,
            ..
        } => vec![OutboundMessage::Location {
            title: title.clone(),
            address: address.clone(),
            latitude: *latitude,
            longitude: *longitude,
        }],
        InboundEvent::Follow { .. } => vec![OutboundMessage::text(FOLLOW_REPLY)],
        InboundEvent::Join { .. } => vec![OutboundMessage::text(JOIN_REPLY)],
        InboundEvent::MemberJoined { .. } => vec![OutboundMessage::text(MEMBER_JOINED_REPLY)],
        InboundEvent::Postback { data, params, .. } => vec![OutboundMessage::text(format!(
            "Got postback data {}, param {}",
            data,
            format_params(params)
        ))],
        InboundEvent::Beacon { hwid, .. } => {
            vec![OutboundMessage::text(format!("Got beacon message {}", hwid))]
        }
        InboundEvent::Unfollow { source } => {
            info!("Unfollowed by {}", source.sender_id);
            Vec::new()
        }
        InboundEvent::MemberLeft { member_ids, .. } => {
            info!("Members left: {}", member_ids.join(", "));
            Vec::new()
        }
    }
}

// "{key=value, key2=value2}", the usual map rendering.
fn format_params(params: &BTreeMap<String, String>) -> String {
    let pairs: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    format!("{{{}}}", pairs.join(", "))
}
