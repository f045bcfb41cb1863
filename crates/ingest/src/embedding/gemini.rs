use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::traits::{Embedder, EmbeddingError};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Embedding backend for the Gemini `batchEmbedContents` API.
///
/// `text-embedding-004` returns 768-dimensional vectors, which is what the
/// vector index is provisioned for.
pub struct GeminiEmbedder {
    client: Client,
    api_key: String,
    model: String,
    dimensions: usize,
}

impl GeminiEmbedder {
    pub fn new(api_key: String, model: String, dimensions: usize) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_key,
            model,
            dimensions,
        }
    }

    fn build_request(&self, texts: &[&str]) -> BatchEmbedRequest {
        BatchEmbedRequest {
            requests: texts
                .iter()
                .map(|text| EmbedRequest {
                    model: format!("models/{}", self.model),
                    content: Content {
                        parts: vec![Part {
                            text: text.to_string(),
                        }],
                    },
                })
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct BatchEmbedRequest {
    requests: Vec<EmbedRequest>,
}

#[derive(Serialize)]
struct EmbedRequest {
    model: String,
    content: Content,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct BatchEmbedResponse {
    embeddings: Vec<ContentEmbedding>,
}

#[derive(Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}

#[async_trait]
impl Embedder for GeminiEmbedder {
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!(
            "{BASE_URL}/models/{}:batchEmbedContents?key={}",
            self.model, self.api_key
        );
        let request = self.build_request(texts);

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Api(format!("{status}: {body}")));
        }

        let parsed: BatchEmbedResponse = response.json().await?;
        if parsed.embeddings.len() != texts.len() {
            return Err(EmbeddingError::CountMismatch {
                expected: texts.len(),
                actual: parsed.embeddings.len(),
            });
        }

        let vectors: Vec<Vec<f32>> = parsed.embeddings.into_iter().map(|e| e.values).collect();

        if let Some(first) = vectors.first() {
            if first.len() != self.dimensions {
                return Err(EmbeddingError::DimensionMismatch {
                    expected: self.dimensions,
                    actual: first.len(),
                });
            }
        }

        Ok(vectors)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
