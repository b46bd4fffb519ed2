use crate::actors::messages::AppError;
use crate::actors::traits::ReplySink;
use crate::models::OutboundMessage;
use async_trait::async_trait;
use std::io::Write;
use tracing::{debug, info};

/// The only path replies take to a sink.
///
/// Rejects an empty reply token before the sink is reached. An empty batch is
/// a no-op.
pub async fn send_reply(
    sink: &dyn ReplySink,
    reply_token: &str,
    messages: Vec<OutboundMessage>,
) -> Result<(), AppError> {
    if reply_token.is_empty() {
        return Err(AppError::InvalidArgument(
            "replyToken must not be empty".to_string(),
        ));
    }
    if messages.is_empty() {
        debug!("Nothing to send for reply token {}", reply_token);
        return Ok(());
    }
    let count = messages.len();
    sink.send_reply(reply_token.to_string(), messages).await?;
    info!("Sent {} message(s) for reply token {}", count, reply_token);
    Ok(())
}

/// Prints each batch as one JSON line on stdout.
#[derive(Debug, Default, Clone)]
pub struct ConsoleSink;

#[async_trait]
impl ReplySink for ConsoleSink {
    async fn send_reply(&self, reply_token: String, messages: Vec<OutboundMessage>) -> Result<(), AppError> {
        let line = serde_json::to_string(&serde_json::json!({
            "replyToken": reply_token,
            "messages": messages,
        }))?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", line)?;
        stdout.flush()?;
        Ok(())
    }
}
