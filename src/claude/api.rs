use super::dto::{ErrorResponse, MessageResponse, MessagesBody};
use super::model::{MessageRequest, Reply};
use crate::config::model::ApiConfig;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, info, instrument, warn};

const MESSAGES_PATH: &str = "/v1/messages";
const API_VERSION: &str = "2023-06-01";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const MAX_TOKENS_STOP_REASON: &str = "max_tokens";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("ANTHROPIC_API_KEY must be set.")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("service returned {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("invalid response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

pub struct ClaudeAPI {
    client: Client,
    api_key: String,
    messages_url: String,
}

impl ClaudeAPI {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let api_key = config.api_key.clone().ok_or(ApiError::MissingApiKey)?;
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            api_key,
            messages_url: format!("{}{}", config.base_url.trim_end_matches('/'), MESSAGES_PATH),
        })
    }

    /// Sends a single message and waits for the whole answer.
    /// With web search enabled this can take a few minutes.
    #[instrument(skip(self, request), fields(model = %request.model, web_search = request.web_search))]
    pub async fn send(&self, request: &MessageRequest) -> Result<Reply, ApiError> {
        info!("Sending request");

        let response = self
            .client
            .post(&self.messages_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&MessagesBody::from_model(request))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(error) => format!("{} ({})", error.error.message, error.error.error_type),
                Err(_) => body,
            };

            error!("Request failed with {}", status);
            return Err(ApiError::Status { status, message });
        }

        let parsed = serde_json::from_str::<MessageResponse>(&body).map_err(|err| {
            error!("Response parse failed: {:?}", err);
            ApiError::InvalidResponse(err)
        })?;

        if let Some(usage) = &parsed.usage {
            info!(
                "Got response from {}: input_tokens={}, output_tokens={}",
                parsed.model.as_deref().unwrap_or("unknown model"),
                usage.input_tokens,
                usage.output_tokens
            );
        }

        let reply = parsed.to_model();

        debug!(
            "Reply has {} segments, stop reason {:?}",
            reply.segments.len(),
            reply.stop_reason
        );

        if reply.stop_reason.as_deref() == Some(MAX_TOKENS_STOP_REASON) {
            warn!("Reply was cut off by the token budget, the JSON is likely incomplete");
        }

        Ok(reply)
    }
}
