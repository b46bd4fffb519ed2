use crate::actors::messages::{ActorError, AppError};
use crate::actors::traits::{LeaveService, ProfileService, ReplySink};
use crate::models::{ConversationKind, OutboundMessage, Profile};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method, Response};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, instrument};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Messaging API client: replies, profile lookups and leaving conversations.
#[derive(Clone)]
pub struct LineClient {
    client: Client,
    api_url: String,
    channel_token: Option<String>,
}

impl LineClient {
    pub fn new(api_url: impl Into<String>, channel_token: Option<String>) -> Result<Self, AppError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            channel_token,
        })
    }

    fn build_request(&self, method: Method, path: &str) -> Result<reqwest::RequestBuilder, ActorError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &self.channel_token {
            let auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ActorError::Internal(format!("Invalid channel token: {}", e)))?;
            headers.insert(AUTHORIZATION, auth_value);
        }
        Ok(self
            .client
            .request(method, format!("{}{}", self.api_url, path))
            .headers(headers))
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<Response, ActorError> {
        let res = timeout(REQUEST_TIMEOUT, request.send()).await??;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ActorError::Collaborator(format!(
                "Request failed with status {}: {}",
                status, body
            )));
        }
        Ok(res)
    }
}

#[async_trait]
impl ReplySink for LineClient {
    #[instrument(skip(self, messages))]
    async fn send_reply(&self, reply_token: String, messages: Vec<OutboundMessage>) -> Result<(), AppError> {
        let payload = serde_json::json!({
            "replyToken": reply_token,
            "messages": messages,
        });
        let request = self.build_request(Method::POST, "/v2/bot/message/reply")?.json(&payload);
        self.execute(request).await?;
        Ok(())
    }
}

#[async_trait]
impl ProfileService for LineClient {
    #[instrument(skip(self))]
    async fn profile(&self, participant_id: String, group_id: Option<String>) -> Result<Profile, ActorError> {
        let path = match &group_id {
            Some(group) => format!("/v2/bot/group/{}/member/{}", group, participant_id),
            None => format!("/v2/bot/profile/{}", participant_id),
        };
        let res = self.execute(self.build_request(Method::GET, &path)?).await?;
        res.json::<Profile>()
            .await
            .map_err(|e| ActorError::Internal(format!("Malformed profile: {}", e)))
    }
}

#[async_trait]
impl LeaveService for LineClient {
    #[instrument(skip(self))]
    async fn leave(&self, kind: ConversationKind, conversation_id: String) -> Result<(), ActorError> {
        let path = match kind {
            ConversationKind::Group => format!("/v2/bot/group/{}/leave", conversation_id),
            ConversationKind::Room => format!("/v2/bot/room/{}/leave", conversation_id),
            ConversationKind::Direct => {
                return Err(ActorError::Collaborator(
                    "Bot can't leave from 1:1 chat".to_string(),
                ))
            }
        };
        self.execute(self.build_request(Method::POST, &path)?).await?;
        info!("Left {} {}", kind, conversation_id);
        Ok(())
    }
}
