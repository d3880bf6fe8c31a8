//! OpenAI `/chat/completions` client.

use super::config::Timeouts;
use super::{AssistantError, CompletionApi, CompletionRequest};
use async_trait::async_trait;
use serde::Deserialize;

pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(base_url: &str, timeouts: Timeouts) -> Result<Self, AssistantError> {
        let http = reqwest::Client::builder()
            .timeout(timeouts.request())
            .connect_timeout(timeouts.connect())
            .build()
            .map_err(|e| AssistantError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionApi for OpenAiClient {
    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<String, AssistantError> {
        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| AssistantError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| AssistantError::Request(e.to_string()))?;
        parse_reply(&text)
    }
}

// =============================================================================
// RESPONSE — wire types
// =============================================================================

#[derive(Deserialize)]
struct CcResponse {
    #[serde(default)]
    choices: Option<Vec<CcChoice>>,
}

#[derive(Deserialize)]
struct CcChoice {
    #[serde(default)]
    message: Option<CcReply>,
}

#[derive(Deserialize)]
struct CcReply {
    #[serde(default)]
    content: Option<String>,
}

/// Extracts `choices[0].message.content`, or `""` when any part is absent.
fn parse_reply(text: &str) -> Result<String, AssistantError> {
    let response: CcResponse =
        serde_json::from_str(text).map_err(|e| AssistantError::Parse(e.to_string()))?;
    Ok(response
        .choices
        .and_then(|choices| choices.into_iter().next())
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .unwrap_or_default())
}
