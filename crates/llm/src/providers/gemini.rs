use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::provider::{LlmError, LlmProvider, Message, Role};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Transient failures (429, 5xx, timeouts) are retried this many times.
const MAX_RETRIES: u32 = 2;

pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
        }
    }

    /// Build the request body for the `generateContent` API. Gemini takes the
    /// system prompt in a separate `system_instruction` field and calls the
    /// assistant role "model".
    fn build_request_body(
        messages: &[Message],
        temperature: f32,
        max_tokens: u32,
    ) -> GenerateRequest {
        let system_instruction = messages
            .iter()
            .find(|m| matches!(m.role, Role::System))
            .map(|m| Content {
                role: None,
                parts: vec![Part {
                    text: m.content.clone(),
                }],
            });

        let contents = messages
            .iter()
            .filter(|m| !matches!(m.role, Role::System))
            .map(|m| Content {
                role: Some(
                    match m.role {
                        Role::User => "user",
                        Role::Assistant => "model",
                        Role::System => unreachable!(),
                    }
                    .to_string(),
                ),
                parts: vec![Part {
                    text: m.content.clone(),
                }],
            })
            .collect();

        GenerateRequest {
            contents,
            system_instruction,
            generation_config: GenerationConfig {
                temperature,
                max_output_tokens: max_tokens,
            },
        }
    }

    async fn complete_once(&self, body: &GenerateRequest) -> Result<String, LlmError> {
        let url = format!(
            "{BASE_URL}/models/{}:generateContent?key={}",
            self.model, self.api_key,
        );

        let response = self.client.post(&url).json(body).send().await?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError { status, body });
        }

        let resp: serde_json::Value = response.json().await?;
        let content = resp["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                LlmError::ParseError("missing candidates[0].content.parts[0].text".into())
            })?
            .to_string();

        Ok(content)
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn complete(
        &self,
        messages: Vec<Message>,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        let body = Self::build_request_body(&messages, temperature, max_tokens);
        debug!("Gemini request to model={}", self.model);

        let mut attempt = 0u32;
        loop {
            match self.complete_once(&body).await {
                Ok(text) => return Ok(text),
                Err(err) if err.is_transient() && attempt < MAX_RETRIES => {
                    attempt += 1;
                    warn!(attempt, error = %err, "transient Gemini failure, retrying");
                    tokio::time::sleep(Duration::from_millis(500 * u64::from(attempt))).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
