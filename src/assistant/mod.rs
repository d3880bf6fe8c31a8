//! Chat-completion plumbing for the assistant panel.
//!
//! `AssistantClient` lives on the UI side. It checks the credential
//! synchronously, then hands the request to a task on the tokio runtime and
//! reports the outcome back over the `AppEvent` channel.

pub mod config;
pub mod error;
pub mod openai;

use crate::event::AppEvent;
use crate::session::{ChatMessage, Role};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::{mpsc, Arc};
use tokio::runtime::Handle;

pub use config::AssistantConfig;
pub use error::{AssistantError, ErrorKind};
pub use openai::OpenAiClient;

pub const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant for a Tic Tac Toe game.
Be concise and friendly. Help with:
- Rules: turns, winning conditions, valid moves
- Strategy: center start, forks, blocks, optimal play
- General chat: answer briefly and helpfully
If asked about code or app issues, provide short actionable tips.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireMessage {
    pub role: Role,
    pub content: String,
}

impl WireMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

impl From<&ChatMessage> for WireMessage {
    fn from(message: &ChatMessage) -> Self {
        Self::new(message.role, message.content.clone())
    }
}

/// Body of a chat-completion request. The system instruction is always first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, temperature: f32, conversation: Vec<WireMessage>) -> Self {
        let mut messages = Vec::with_capacity(conversation.len() + 1);
        messages.push(WireMessage::new(Role::System, SYSTEM_INSTRUCTION));
        messages.extend(
            conversation
                .into_iter()
                .filter(|message| message.role != Role::System),
        );
        Self {
            model: model.into(),
            messages,
            temperature,
        }
    }
}

/// A chat-completion endpoint. Returns the reply text of the first choice.
#[async_trait]
pub trait CompletionApi: Send + Sync {
    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<String, AssistantError>;
}

#[derive(Clone)]
pub struct AssistantClient {
    config: Arc<AssistantConfig>,
    api: Arc<dyn CompletionApi>,
    tx: mpsc::Sender<AppEvent>,
    runtime_handle: Handle,
}

impl AssistantClient {
    /// Builds a client backed by the OpenAI chat-completions endpoint.
    pub fn new(
        config: AssistantConfig,
        tx: mpsc::Sender<AppEvent>,
        runtime_handle: Handle,
    ) -> Result<Self, AssistantError> {
        let api = OpenAiClient::new(&config.base_url, config.timeouts)?;
        Ok(Self::with_api(config, Arc::new(api), tx, runtime_handle))
    }

    pub fn with_api(
        config: AssistantConfig,
        api: Arc<dyn CompletionApi>,
        tx: mpsc::Sender<AppEvent>,
        runtime_handle: Handle,
    ) -> Self {
        Self {
            config: Arc::new(config),
            api,
            tx,
            runtime_handle,
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Issues one completion request for `conversation`.
    ///
    /// A missing credential is reported on the channel before this returns and
    /// no request is made. Otherwise exactly one `ReplyReceived` or
    /// `RequestFailed` event follows once the request resolves.
    pub fn send(&self, conversation: Vec<WireMessage>) {
        let api_key = match self.config.api_key() {
            Ok(api_key) => api_key,
            Err(err) => {
                tracing::warn!(error = %err, "completion request not sent");
                let _ = self.tx.send(AppEvent::RequestFailed(err));
                return;
            }
        };

        let request = CompletionRequest::new(
            self.config.model.clone(),
            self.config.temperature,
            conversation,
        );
        tracing::info!(
            model = %request.model,
            messages = request.messages.len(),
            "sending completion request"
        );

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        self.runtime_handle.spawn(async move {
            let event = match api.complete(&api_key, &request).await {
                Ok(reply) => {
                    tracing::info!(chars = reply.len(), "completion received");
                    AppEvent::ReplyReceived(reply)
                }
                Err(err) => {
                    tracing::warn!(error = %err, "completion request failed");
                    AppEvent::RequestFailed(err)
                }
            };
            let _ = tx.send(event);
        });
    }
}
