#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Service,
}

/// Errors from the completion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssistantError {
    /// The credential environment variable is not set or empty.
    #[error("missing API key: env var {var} not set")]
    MissingCredential { var: String },

    /// The HTTP request could not be sent or its body could not be read.
    #[error("API request failed: {0}")]
    Request(String),

    /// The endpoint returned a non-success HTTP status.
    #[error("API response error: status {status} {body}")]
    Status { status: u16, body: String },

    /// The success body was not valid JSON.
    #[error("API response parse failed: {0}")]
    Parse(String),

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl AssistantError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCredential { .. } | Self::HttpClientBuild(_) => ErrorKind::Configuration,
            Self::Request(_) | Self::Status { .. } | Self::Parse(_) => ErrorKind::Service,
        }
    }

    /// Text shown to the user in the transient notification banner.
    pub fn notification_text(&self) -> String {
        match self {
            Self::MissingCredential { var } => {
                format!("Missing OpenAI API key. Set {var} in your environment and try again.")
            }
            _ => "Unable to reach OpenAI. Check your API key and try again.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AssistantError, ErrorKind};

    #[test]
    fn missing_credential_is_a_configuration_error() {
        let err = AssistantError::MissingCredential {
            var: "OPENAI_API_KEY".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.notification_text().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn status_error_is_a_service_error_with_generic_text() {
        let err = AssistantError::Status {
            status: 401,
            body: "unauthorized".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Service);
        assert!(err.notification_text().starts_with("Unable to reach OpenAI"));
        assert_eq!(err.to_string(), "API response error: status 401 unauthorized");
    }
}
