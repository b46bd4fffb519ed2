// Yuri console entry point
// Reads one utterance per line from stdin and prints reply batches to stdout.

use anyhow::Context;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use yuri_core::actors::sink::ConsoleSink;
use yuri_core::actors::traits::Collaborators;
use yuri_core::clients::{HttpSearchClient, LineClient};
use yuri_core::models::Source;
use yuri_core::{InboundEvent, ResponderConfig, ResponderHandle};

const CONSOLE_USER: &str = "console-user";

// Logs go to stderr; stdout carries the replies.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let json = std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(JsonStorageLayer)
            .with(BunyanFormattingLayer::new("yuri-core".into(), std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ResponderConfig::from_env().context("loading configuration")?;
    if config.channel_access_token.is_none() {
        warn!("LINE_CHANNEL_TOKEN is not set; profile lookups and leaving will fail");
    }

    let line = Arc::new(LineClient::new(
        config.line_api_url.clone(),
        config.channel_access_token.clone(),
    )?);
    let collaborators = Collaborators {
        sink: Arc::new(ConsoleSink),
        profiles: line.clone(),
        conversations: line,
        search: Arc::new(HttpSearchClient::from_config(&config)?),
    };
    let responder = ResponderHandle::new(&config, collaborators).context("starting responder")?;
    info!("Yuri is listening on stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let reply_token = uuid::Uuid::new_v4().to_string();
        let event = InboundEvent::text(Source::direct(CONSOLE_USER), line);
        match responder.handle_event(reply_token, event).await {
            Ok(delivery) => {
                if let Some(follow_up) = delivery.follow_up {
                    if let Err(e) = follow_up.await {
                        error!("Deferred reply task failed: {}", e);
                    }
                }
            }
            Err(e) => error!("Failed to handle utterance: {}", e),
        }
    }

    responder.shutdown().await?;
    info!("stdin closed, bye");
    Ok(())
}
