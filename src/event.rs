use crate::assistant::AssistantError;

#[derive(Debug, Clone)]
pub enum AppEvent {
    ReplyReceived(String),
    RequestFailed(AssistantError),
}
