//! OpenAI-compatible vision provider.
//!
//! Speaks the `/chat/completions` format with multimodal content parts, which
//! most hosted vision models accept. The reply is requested as a JSON object
//! via `response_format`; parsing it into result types happens upstream.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::sanitize::sanitize_api_error;
use super::traits::{VisionModel, VisionRequest};
use crate::error::LlmError;

/// Connection settings for an OpenAI-compatible endpoint.
///
/// Plain data, no file loading. `name` labels the endpoint in errors and
/// logs; `base_url` may point at any compatible host.
#[derive(Debug, Clone)]
pub struct VisionModelConfig {
    pub name: String,
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: Option<u32>,
    pub request_timeout: Duration,
}

impl Default for VisionModelConfig {
    fn default() -> Self {
        Self {
            name: "openai".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "gpt-4o".to_string(),
            temperature: 0.0,
            max_tokens: None,
            request_timeout: Duration::from_secs(120),
        }
    }
}

pub struct OpenAiVisionModel {
    config: VisionModelConfig,
    /// Pre-computed `"Bearer <key>"` header value (avoids `format!` per request).
    cached_auth_header: Option<String>,
    /// Pre-computed chat completions URL (avoids `format!` per request).
    cached_chat_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    r#type: &'static str,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiVisionModel {
    pub fn new(config: VisionModelConfig) -> Self {
        let base_url = config.base_url.trim_end_matches('/');
        let cached_chat_url = if base_url.ends_with("chat/completions") {
            base_url.to_string()
        } else {
            format!("{base_url}/chat/completions")
        };
        let cached_auth_header = config.api_key.as_deref().map(|k| format!("Bearer {k}"));
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            config,
            cached_auth_header,
            cached_chat_url,
            client,
        }
    }

    fn build_request(&self, request: &VisionRequest) -> ChatRequest {
        let mut parts = Vec::with_capacity(1 + request.images.len());
        parts.push(ContentPart::Text {
            text: request.user_text.clone(),
        });
        for image in &request.images {
            parts.push(ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: image.to_data_url(),
                },
            });
        }

        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                Message {
                    role: "system",
                    content: MessageContent::Text(request.system.clone()),
                },
                Message {
                    role: "user",
                    content: MessageContent::Parts(parts),
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            response_format: ResponseFormat {
                r#type: "json_object",
            },
        }
    }

    fn transport_error(&self, error: &reqwest::Error) -> LlmError {
        if error.is_timeout() {
            LlmError::Timeout {
                provider: self.config.name.clone(),
                timeout_secs: self.config.request_timeout.as_secs(),
            }
        } else {
            LlmError::Request {
                provider: self.config.name.clone(),
                message: error.to_string(),
            }
        }
    }

    fn classify_status(provider: &str, status: u16, body: &str) -> LlmError {
        match status {
            401 | 403 => LlmError::Auth {
                provider: provider.to_string(),
                status,
            },
            429 => LlmError::RateLimited {
                provider: provider.to_string(),
                status,
            },
            _ => LlmError::Api {
                provider: provider.to_string(),
                status,
                message: sanitize_api_error(body),
            },
        }
    }
}

#[async_trait]
impl VisionModel for OpenAiVisionModel {
    async fn complete(&self, request: &VisionRequest) -> Result<String, LlmError> {
        let auth_header = self.cached_auth_header.as_ref().ok_or_else(|| {
            LlmError::MissingApiKey {
                provider: self.config.name.clone(),
            }
        })?;

        let body = self.build_request(request);
        tracing::debug!(
            provider = %self.config.name,
            model = %self.config.model,
            images = request.images.len(),
            "dispatching vision completion"
        );

        let response = self
            .client
            .post(&self.cached_chat_url)
            .header("Authorization", auth_header)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(Self::classify_status(
                &self.config.name,
                status.as_u16(),
                &error_body,
            ));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| self.transport_error(&e))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| LlmError::EmptyCompletion {
                provider: self.config.name.clone(),
            })
    }
}
