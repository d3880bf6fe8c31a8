use crate::assistant::{AssistantError, WireMessage};
use serde::{Deserialize, Serialize};
use std::iter;
use std::time::{Duration, Instant};

pub mod notification;

pub use notification::{Notification, NotificationKind, Toast, NOTIFICATION_TTL};

pub const GREETING: &str =
    "Hi! I'm your Tic Tac Toe assistant. Ask me about rules, strategies, or anything else.";
pub const EMPTY_REPLY_FALLBACK: &str = "I'm here to help with Tic Tac Toe and more.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Sending,
}

/// Chat history, busy flag and notification slot for the assistant panel.
///
/// At most one request is outstanding: `submit` refuses while `Sending`, and
/// only `resolve` returns the session to `Idle`.
#[derive(Debug, Clone)]
pub struct AssistantSession {
    history: Vec<ChatMessage>,
    state: SessionState,
    toast: Toast,
    next_id: u64,
    pub draft: String,
}

impl Default for AssistantSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AssistantSession {
    pub fn new() -> Self {
        Self {
            history: vec![ChatMessage {
                id: "greeting".to_string(),
                role: Role::Assistant,
                content: GREETING.to_string(),
            }],
            state: SessionState::Idle,
            toast: Toast::default(),
            next_id: 1,
            draft: String::new(),
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state == SessionState::Sending
    }

    pub fn can_send(&self) -> bool {
        !self.is_busy() && !self.draft.trim().is_empty()
    }

    fn next_message_id(&mut self, prefix: &str) -> String {
        let id = format!("{prefix}-{}", self.next_id);
        self.next_id += 1;
        id
    }

    fn push(&mut self, role: Role, content: String) {
        let prefix = match role {
            Role::System => "s",
            Role::User => "u",
            Role::Assistant => "a",
        };
        let id = self.next_message_id(prefix);
        self.history.push(ChatMessage { id, role, content });
    }

    /// Accepts `text` when idle and non-blank: records the user message,
    /// enters `Sending` and returns the conversation to send.
    pub fn submit(&mut self, text: &str) -> Option<Vec<WireMessage>> {
        if self.is_busy() {
            tracing::debug!("submit ignored: request already in flight");
            return None;
        }
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let conversation = self
            .history
            .iter()
            .filter(|message| message.role != Role::System)
            .map(WireMessage::from)
            .chain(iter::once(WireMessage::new(Role::User, text)))
            .collect();

        self.push(Role::User, text.to_string());
        self.state = SessionState::Sending;
        Some(conversation)
    }

    /// Submits the draft, clearing it only if the submission was accepted.
    pub fn submit_draft(&mut self) -> Option<Vec<WireMessage>> {
        let draft = self.draft.clone();
        let conversation = self.submit(&draft)?;
        self.draft.clear();
        Some(conversation)
    }

    /// Applies the outcome of the in-flight request and returns to `Idle`.
    pub fn resolve(&mut self, outcome: Result<String, AssistantError>, now: Instant) {
        match outcome {
            Ok(reply) => {
                let content = if reply.is_empty() {
                    EMPTY_REPLY_FALLBACK.to_string()
                } else {
                    reply
                };
                self.push(Role::Assistant, content);
            }
            Err(err) => {
                self.notify(Notification::error(err.notification_text()), now);
            }
        }
        self.state = SessionState::Idle;
    }

    pub fn notify(&mut self, notification: Notification, now: Instant) {
        self.toast.show(notification, now);
    }

    pub fn notification(&self, now: Instant) -> Option<&Notification> {
        self.toast.current(now)
    }

    pub fn notification_remaining(&self, now: Instant) -> Option<Duration> {
        self.toast.remaining(now)
    }

    pub fn expire_notification(&mut self, now: Instant) {
        self.toast.expire(now);
    }
}
