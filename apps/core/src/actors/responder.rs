use crate::actors::dispatcher::{ActionDispatcher, Dispatch};
use crate::actors::messages::{ActorError, AppError, Delivery, ResponderMessage};
use crate::actors::sink::send_reply;
use crate::actors::traits::{Collaborators, ReplySink};
use crate::brain::{Intent, IntentResolver, ReplyPoolRegistry, ReplySelector};
use crate::config::ResponderConfig;
use crate::events::{canned_reply, InboundEvent};
use crate::models::Utterance;
use crate::state::LastWeatherLocation;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{sleep, timeout, Duration};
use tracing::{error, info, instrument};

/// A handle to the responder actor.
///
/// This is the entry point for inbound events. Each event is answered on its own
/// task, so a slow collaborator never holds up the next event.
#[derive(Clone)]
pub struct ResponderHandle {
    sender: mpsc::Sender<ResponderMessage>,
    request_timeout: Duration,
}

impl ResponderHandle {
    /// Spawns a responder with a fresh entropy-seeded selector.
    ///
    /// Fails with [`AppError::Config`] when some reachable intent has no reply pool.
    pub fn new(config: &ResponderConfig, collaborators: Collaborators) -> Result<Self, AppError> {
        Self::with_selector(config, collaborators, ReplySelector::from_entropy())
    }

    /// Spawns a responder drawing replies from `selector`.
    pub fn with_selector(
        config: &ResponderConfig,
        collaborators: Collaborators,
        selector: ReplySelector,
    ) -> Result<Self, AppError> {
        let engine = ResponderEngine::new(config, collaborators, selector)?;
        let (sender, receiver) = mpsc::channel(32);
        let runner = ResponderRunner::new(receiver, Arc::new(engine));
        tokio::spawn(async move { runner.run().await });
        Ok(Self {
            sender,
            request_timeout: config.responder_timeout(),
        })
    }

    /// Answers one inbound event.
    ///
    /// Returns once the immediate batch has been sent. Deferred replies keep
    /// running; await [`Delivery::follow_up`] to observe them.
    #[instrument(skip(self, event))]
    pub async fn handle_event(&self, reply_token: String, event: InboundEvent) -> Result<Delivery, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = ResponderMessage::HandleEvent {
            reply_token,
            event,
            responder: send,
        };
        self.sender
            .send(msg)
            .await
            .map_err(|e| AppError::Actor(ActorError::Internal(e.to_string())))?;
        timeout(self.request_timeout, recv)
            .await?
            .map_err(|e| AppError::Actor(ActorError::Internal(e.to_string())))?
    }

    /// Stops the actor loop. Events already handed out keep running.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.sender
            .send(ResponderMessage::Shutdown)
            .await
            .map_err(|e| AppError::Actor(ActorError::Internal(e.to_string())))
    }
}

// --- Actor Runner ---
struct ResponderRunner {
    receiver: mpsc::Receiver<ResponderMessage>,
    engine: Arc<ResponderEngine>,
}

impl ResponderRunner {
    fn new(receiver: mpsc::Receiver<ResponderMessage>, engine: Arc<ResponderEngine>) -> Self {
        Self { receiver, engine }
    }

    async fn run(mut self) {
        info!("Responder started");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResponderMessage::HandleEvent {
                    reply_token,
                    event,
                    responder,
                } => {
                    let engine = self.engine.clone();
                    tokio::spawn(async move {
                        let result = engine.handle_event(reply_token, event).await;
                        if let Err(e) = &result {
                            error!("Error handling event: {:?}", e);
                        }
                        let _ = responder.send(result);
                    });
                }
                ResponderMessage::Shutdown => {
                    info!("Responder shutting down...");
                    break;
                }
            }
        }
        info!("Responder stopped");
    }
}

/// The event pipeline without the actor around it.
pub struct ResponderEngine {
    resolver: IntentResolver,
    dispatcher: ActionDispatcher,
    selector: Arc<ReplySelector>,
    sink: Arc<dyn ReplySink>,
    typing_delay_ms: (u64, u64),
}

impl ResponderEngine {
    pub fn new(
        config: &ResponderConfig,
        collaborators: Collaborators,
        selector: ReplySelector,
    ) -> Result<Self, AppError> {
        config.check()?;
        let resolver = IntentResolver::default();
        let registry = ReplyPoolRegistry::default();
        registry.validate(&resolver)?;

        let selector = Arc::new(selector);
        let dispatcher = ActionDispatcher::new(
            registry,
            selector.clone(),
            &collaborators,
            LastWeatherLocation::default(),
            config.master_user_id.clone(),
        );
        Ok(Self {
            resolver,
            dispatcher,
            selector,
            sink: collaborators.sink,
            typing_delay_ms: config.typing_delay_ms,
        })
    }

    pub fn last_weather_location(&self) -> &LastWeatherLocation {
        self.dispatcher.last_location()
    }

    #[instrument(skip(self, event))]
    pub async fn handle_event(&self, reply_token: String, event: InboundEvent) -> Result<Delivery, AppError> {
        event.source().validate()?;
        if event.expects_reply() && reply_token.is_empty() {
            return Err(AppError::InvalidArgument(
                "replyToken must not be empty".to_string(),
            ));
        }

        let (intent, dispatch) = match &event {
            InboundEvent::Text { source, text } => {
                let utterance = Utterance::new(text.as_str());
                let intent = self.resolver.resolve(utterance.normalized());
                info!("Resolved '{}' to {}", utterance.raw(), intent.label());
                (Some(intent), self.dispatcher.dispatch(intent, &utterance, source)?)
            }
            other => (None, Dispatch::reply(canned_reply(other, &self.selector))),
        };

        let Dispatch { immediate, follow_up } = dispatch;
        if !immediate.is_empty() {
            if intent.is_some() {
                self.typing_pause().await;
            }
            send_reply(self.sink.as_ref(), &reply_token, immediate.clone()).await?;
        }

        let follow_up = follow_up.map(|future| {
            let sink = self.sink.clone();
            let token = reply_token.clone();
            tokio::spawn(async move {
                let messages = future.await;
                if let Err(e) = send_reply(sink.as_ref(), &token, messages.clone()).await {
                    error!("Failed to send deferred reply: {}", e);
                }
                messages
            })
        });

        Ok(Delivery {
            intent,
            sent: immediate,
            follow_up,
        })
    }

    async fn typing_pause(&self) {
        let (min, max) = self.typing_delay_ms;
        if max == 0 {
            return;
        }
        let millis = self.selector.draw_between(min, max);
        sleep(Duration::from_millis(millis)).await;
    }

    /// Resolves `raw` without dispatching.
    pub fn resolve(&self, raw: &str) -> Intent {
        self.resolver.resolve(Utterance::new(raw).normalized())
    }
}
