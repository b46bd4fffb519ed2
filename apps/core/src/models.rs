use crate::brain::normalize;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest text reply the messaging platform accepts.
pub const MAX_TEXT_LENGTH: usize = 1000;

/// Appended to text replies cut at [`MAX_TEXT_LENGTH`].
pub const TRUNCATION_MARKER: &str = "……";

/// The kind of conversation an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationKind {
    /// One-to-one chat between a user and the bot.
    Direct,
    /// A named group chat.
    Group,
    /// An ad hoc multi-person room.
    Room,
}

impl fmt::Display for ConversationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConversationKind::Direct => "direct",
            ConversationKind::Group => "group",
            ConversationKind::Room => "room",
        };
        f.write_str(label)
    }
}

/// Who sent an event and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub sender_id: String,
    pub kind: ConversationKind,
    /// Group or room id. Required for group and room conversations.
    pub conversation_id: Option<String>,
}

impl Source {
    pub fn direct(sender_id: impl Into<String>) -> Self {
        Self {
            sender_id: sender_id.into(),
            kind: ConversationKind::Direct,
            conversation_id: None,
        }
    }

    pub fn group(sender_id: impl Into<String>, group_id: impl Into<String>) -> Self {
        Self {
            sender_id: sender_id.into(),
            kind: ConversationKind::Group,
            conversation_id: Some(group_id.into()),
        }
    }

    pub fn room(sender_id: impl Into<String>, room_id: impl Into<String>) -> Self {
        Self {
            sender_id: sender_id.into(),
            kind: ConversationKind::Room,
            conversation_id: Some(room_id.into()),
        }
    }

    /// Checks the fields every handler relies on.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.sender_id.trim().is_empty() {
            return Err(AppError::InvalidArgument(
                "senderId must not be empty".to_string(),
            ));
        }
        if self.kind == ConversationKind::Direct {
            return Ok(());
        }
        match self.conversation_id.as_deref() {
            Some(id) if !id.trim().is_empty() => Ok(()),
            _ => Err(AppError::InvalidArgument(format!(
                "conversationId is required for {} conversations",
                self.kind
            ))),
        }
    }
}

/// One inbound text, kept both as typed and normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    raw: String,
    normalized: String,
}

impl Utterance {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = normalize(&raw);
        Self { raw, normalized }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

/// A single message in a reply batch, serialized in the platform's envelope shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutboundMessage {
    Text {
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    Sticker {
        package_id: String,
        sticker_id: String,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        original_content_url: String,
        preview_image_url: String,
    },
    Location {
        title: String,
        address: String,
        latitude: f64,
        longitude: f64,
    },
    /// Structured card; `contents` is the card body as built by `cards`.
    #[serde(rename = "flex", rename_all = "camelCase")]
    Card {
        alt_text: String,
        contents: serde_json::Value,
    },
}

impl OutboundMessage {
    /// Builds a text message, truncating anything past [`MAX_TEXT_LENGTH`].
    pub fn text(text: impl Into<String>) -> Self {
        OutboundMessage::Text {
            text: truncate_text(text.into()),
        }
    }

    pub fn sticker(package_id: impl Into<String>, sticker_id: impl Into<String>) -> Self {
        OutboundMessage::Sticker {
            package_id: package_id.into(),
            sticker_id: sticker_id.into(),
        }
    }

    /// An image whose preview is the same picture.
    pub fn image(url: impl Into<String>) -> Self {
        let url = url.into();
        OutboundMessage::Image {
            original_content_url: url.clone(),
            preview_image_url: url,
        }
    }

    /// Text payload, if this is a text message.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            OutboundMessage::Text { text } => Some(text),
            _ => None,
        }
    }
}

/// Cuts `text` to 998 characters plus [`TRUNCATION_MARKER`] when it exceeds
/// [`MAX_TEXT_LENGTH`]. Lengths are counted in characters, not bytes.
pub fn truncate_text(text: String) -> String {
    if text.chars().count() <= MAX_TEXT_LENGTH {
        return text;
    }
    let keep = MAX_TEXT_LENGTH - TRUNCATION_MARKER.chars().count();
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}

/// A participant's public profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub display_name: String,
    #[serde(default)]
    pub status_message: Option<String>,
    #[serde(default)]
    pub picture_url: Option<String>,
}

/// First hit of a video search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResult {
    pub video_id: String,
}

impl VideoResult {
    pub fn share_url(&self) -> String {
        format!("https://youtu.be/{}", self.video_id)
    }
}

/// Current conditions for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub country: String,
    pub description: String,
    pub temperature: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: f64,
    pub icon: String,
}

impl WeatherReport {
    /// `"City, CC"`, the value remembered as the last weather location.
    pub fn location(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }

    pub fn icon_url(&self) -> String {
        format!("https://openweathermap.org/img/wn/{}@2x.png", self.icon)
    }

    pub fn summary(&self) -> String {
        format!(
            "We have {} in {}. \nThe current temperature is {}°C, the lowest for today is {}°C and the highest is {}°C. \nHumidity is at {}%.",
            self.description,
            self.location(),
            reading(self.temperature),
            reading(self.temp_min),
            reading(self.temp_max),
            reading(self.humidity),
        )
    }
}

// Whole readings keep one decimal ("21.0"), others print as-is ("21.37").
fn reading(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// One piece of advice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advice {
    pub text: String,
}
