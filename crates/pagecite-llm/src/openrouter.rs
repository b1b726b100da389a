//! OpenRouter Provider Implementation
//!
//! Talks to an OpenAI-compatible chat-completions endpoint. OpenRouter is the
//! default target; any service speaking the same wire format works by
//! changing `base_url`.
//!
//! # Features
//!
//! - Async HTTP communication via `reqwest`
//! - Configurable endpoint, model, sampling settings and app title
//! - Per-request timeout
//!
//! # Examples
//!
//! ```no_run
//! use pagecite_llm::{OpenRouterConfig, OpenRouterProvider};
//!
//! let api_key = std::env::var("OPENROUTER_API_KEY").ok();
//! let provider = OpenRouterProvider::new(OpenRouterConfig::default(), api_key).unwrap();
//! ```

use crate::LlmError;
use pagecite_domain::traits::LlmProvider;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default OpenRouter API base URL
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "mistralai/mistral-7b-instruct";

/// Default value of the `X-Title` header
pub const DEFAULT_APP_TITLE: &str = "PDF Chat Application";

/// Default timeout for LLM requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Settings for [`OpenRouterProvider`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenRouterConfig {
    /// API base URL, without the trailing `/chat/completions`
    pub base_url: String,

    /// Model to request
    pub model: String,

    /// Sent as the `X-Title` header
    pub app_title: String,

    /// Completion length cap
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// HTTP request timeout (seconds)
    pub timeout_secs: u64,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            app_title: DEFAULT_APP_TITLE.to_string(),
            max_tokens: 1000,
            temperature: 0.3,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Chat-completions provider
pub struct OpenRouterProvider {
    config: OpenRouterConfig,
    api_key: Option<String>,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenRouterProvider {
    /// Create a new provider
    ///
    /// A missing `api_key` is not an error here; every `generate` call then
    /// fails with [`LlmError::Configuration`].
    pub fn new(config: OpenRouterConfig, api_key: Option<String>) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                LlmError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            config,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            client,
        })
    }

    /// The model this provider requests
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send one prompt as a single user message and return the reply text
    ///
    /// An empty `choices` array or a missing message body yields an empty
    /// string rather than an error.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - No API key is configured
    /// - Network communication fails or times out
    /// - The endpoint answers with a non-success status
    /// - The response body is not valid chat-completions JSON
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            LlmError::Configuration("API key not found in environment variables".to_string())
        })?;

        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let request_body = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!("Sending {} char prompt to {} ({})", prompt.len(), url, self.config.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .header("X-Title", &self.config.app_title)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.config.model.clone()));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimitExceeded);
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Communication(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| {
                LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
            })?;

        Ok(body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_default())
    }
}

impl LlmProvider for OpenRouterProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.complete(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    async fn spawn_endpoint(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn provider_for(base_url: String) -> OpenRouterProvider {
        let config = OpenRouterConfig {
            base_url,
            ..OpenRouterConfig::default()
        };
        OpenRouterProvider::new(config, Some("test-key".to_string())).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = OpenRouterConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_tokens, 1000);
        assert!((config.temperature - 0.3).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let provider = OpenRouterProvider::new(OpenRouterConfig::default(), None).unwrap();
        let result = provider.generate("test").await;
        assert!(matches!(result, Err(LlmError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_blank_api_key_counts_as_missing() {
        let provider =
            OpenRouterProvider::new(OpenRouterConfig::default(), Some("  ".to_string())).unwrap();
        let result = provider.generate("test").await;
        assert!(matches!(result, Err(LlmError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        let provider = provider_for("http://127.0.0.1:1".to_string());
        let result = provider.generate("test").await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }

    #[tokio::test]
    async fn test_successful_completion() {
        async fn complete(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
            let auth = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            let title = headers
                .get("x-title")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            let content = format!(
                "{}|{}|{}|{}",
                auth, title, body["model"], body["messages"][0]["content"]
            );
            Json(json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] }))
        }

        let app = Router::new().route("/chat/completions", post(complete));
        let base = spawn_endpoint(app).await;
        let reply = provider_for(base).generate("hi there").await.unwrap();

        assert_eq!(
            reply,
            "Bearer test-key|PDF Chat Application|\"mistralai/mistral-7b-instruct\"|\"hi there\""
        );
    }

    #[tokio::test]
    async fn test_empty_choices_yield_empty_reply() {
        let app = Router::new().route(
            "/chat/completions",
            post(|| async { Json(json!({ "choices": [] })) }),
        );
        let base = spawn_endpoint(app).await;

        let reply = provider_for(base).generate("hi").await.unwrap();
        assert_eq!(reply, "");
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let app = Router::new().route(
            "/chat/completions",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base = spawn_endpoint(app).await;

        match provider_for(base).generate("hi").await {
            Err(LlmError::Communication(msg)) => {
                assert!(msg.contains("500"));
                assert!(msg.contains("boom"));
            }
            other => panic!("Expected Communication error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rate_limited_status() {
        let app = Router::new().route(
            "/chat/completions",
            post(|| async { StatusCode::TOO_MANY_REQUESTS }),
        );
        let base = spawn_endpoint(app).await;

        let result = provider_for(base).generate("hi").await;
        assert!(matches!(result, Err(LlmError::RateLimitExceeded)));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let app = Router::new().route("/chat/completions", post(|| async { "not json" }));
        let base = spawn_endpoint(app).await;

        let result = provider_for(base).generate("hi").await;
        assert!(matches!(result, Err(LlmError::InvalidResponse(_))));
    }
}
