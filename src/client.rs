//! OpenRouter HTTP client — one chat-completion POST for image analysis,
//! one GET for the model catalog.
//!
//! Fully sequential: one request in flight at a time, no retries, no
//! streaming. Timeouts are whatever reqwest defaults to.

use crate::config::EffectiveConfig;
use crate::error::{GlimpseError, Result};
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Production API base. Tests point the client at a local mock instead.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Client-identification headers sent with every inference request.
const APP_TITLE: &str = "glimpse";
const APP_REFERER: &str = "https://github.com/glimpse-cli/glimpse";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    /// Omitted entirely when unset so the remote default applies; a null
    /// would not mean the same thing.
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Thin wrapper over reqwest bound to one API base URL.
pub struct OpenRouterClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpenRouterClient {
    /// Client against the production OpenRouter API.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client against an arbitrary base URL (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Send one image plus prompt to the chat-completions endpoint and
    /// return the extracted answer text.
    ///
    /// The image is inlined as a base64 data URI with the MIME type fixed
    /// to JPEG regardless of the source extension; vision endpoints key on
    /// the payload bytes, not the declared type.
    pub async fn analyze(
        &self,
        image_bytes: &[u8],
        prompt: &str,
        config: &EffectiveConfig,
    ) -> Result<String> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(image_bytes);

        let request = ChatRequest {
            model: &config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text { text: prompt },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: format!("data:image/jpeg;base64,{encoded}"),
                        },
                    },
                ],
            }],
            temperature: config.temperature,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&config.api_key)
            .header("X-Title", APP_TITLE)
            .header("HTTP-Referer", APP_REFERER)
            .json(&request)
            .send()
            .await
            .map_err(|e| GlimpseError::Api {
                status: None,
                body: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(GlimpseError::Api {
                status: Some(status.as_u16()),
                body,
            });
        }

        extract_answer(&body)
    }

    /// Fetch the full model catalog as a raw body, suitable for caching
    /// verbatim. Any transport failure or non-success status is a
    /// [`GlimpseError::Network`] so the caller can fall back to the cache.
    pub async fn fetch_catalog(&self) -> Result<String> {
        let response = self
            .http
            .get(format!("{}/models", self.base_url))
            .send()
            .await
            .map_err(|e| GlimpseError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GlimpseError::Network(format!(
                "catalog endpoint returned HTTP {status}"
            )));
        }

        response
            .text()
            .await
            .map_err(|e| GlimpseError::Network(e.to_string()))
    }
}

impl Default for OpenRouterClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull `choices[0].message.content` out of a successful response body.
/// Any deviation from that shape is a fatal extraction error.
fn extract_answer(body: &str) -> Result<String> {
    let parsed: ChatResponse = serde_json::from_str(body).map_err(|e| GlimpseError::Api {
        status: None,
        body: format!("unparsable response body: {e}"),
    })?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| GlimpseError::Api {
            status: None,
            body: "response contained no choices[0].message.content".to_string(),
        })
}
