use std::env;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_usize(key: &str, default: usize) -> usize {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_u32(key: &str, default: u32) -> u32 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_f32(key: &str, default: f32) -> f32 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub chunking: ChunkingConfig,
    pub retrieval: RetrievalConfig,
    pub embedding: EmbeddingConfig,
    pub llm: LlmConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first)
    /// and validate it. Bad values are fatal here, never mid-pipeline.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            chunking: ChunkingConfig::from_env(),
            retrieval: RetrievalConfig::from_env(),
            embedding: EmbeddingConfig::from_env(),
            llm: LlmConfig::from_env(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.chunking.validate()?;
        self.retrieval.validate()?;
        Ok(())
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!(
            "  chunking:  heading_level={}, window_size={}, overlap_size={}",
            self.chunking.heading_level,
            self.chunking.window_size,
            self.chunking.overlap_size
        );
        tracing::info!(
            "  retrieval: top_k={}, context_budget_chars={}",
            self.retrieval.top_k,
            self.retrieval.context_budget_chars
        );
        tracing::info!(
            "  embedding: model={}, dimensions={}, batch_size={}",
            self.embedding.model,
            self.embedding.dimensions,
            self.embedding.batch_size
        );
        tracing::info!(
            "  llm:       model={}, configured={}",
            self.llm.model,
            self.llm.is_configured()
        );
    }
}

// ── Chunking ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Heading level that opens a new segment (1..=6).
    pub heading_level: usize,
    /// Window width in characters.
    pub window_size: usize,
    /// Characters repeated between adjacent windows. Must be < window_size.
    pub overlap_size: usize,
}

impl ChunkingConfig {
    fn from_env() -> Self {
        Self {
            heading_level: env_usize("HEADING_LEVEL", 2),
            window_size: env_usize("WINDOW_SIZE", 1000),
            overlap_size: env_usize("OVERLAP_SIZE", 100),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        if self.overlap_size >= self.window_size {
            return Err(ConfigError::OverlapTooLarge {
                overlap: self.overlap_size,
                window: self.window_size,
            });
        }
        if !(1..=6).contains(&self.heading_level) {
            return Err(ConfigError::BadHeadingLevel(self.heading_level));
        }
        Ok(())
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            heading_level: 2,
            window_size: 1000,
            overlap_size: 100,
        }
    }
}

// ── Retrieval ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// How many candidates to request from the vector search.
    pub top_k: usize,
    /// Maximum total character length of the assembled context.
    pub context_budget_chars: usize,
}

impl RetrievalConfig {
    fn from_env() -> Self {
        Self {
            top_k: env_usize("TOP_K", 3),
            context_budget_chars: env_usize("CONTEXT_BUDGET_CHARS", 6000),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.context_budget_chars == 0 {
            return Err(ConfigError::ZeroBudget);
        }
        if self.top_k == 0 {
            return Err(ConfigError::ZeroTopK);
        }
        Ok(())
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            context_budget_chars: 6000,
        }
    }
}

// ── Embedding ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub dimensions: usize,
    pub batch_size: usize,
    pub cache_capacity: usize,
}

impl EmbeddingConfig {
    fn from_env() -> Self {
        Self {
            api_key: env_opt("GEMINI_API_KEY"),
            model: env_or("EMBEDDING_MODEL", "text-embedding-004"),
            dimensions: env_usize("EMBEDDING_DIMENSIONS", 768),
            batch_size: env_usize("EMBEDDING_BATCH_SIZE", 64),
            cache_capacity: env_usize("EMBEDDING_CACHE_CAPACITY", 1024),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

// ── LLM ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl LlmConfig {
    fn from_env() -> Self {
        Self {
            api_key: env_opt("GEMINI_API_KEY"),
            model: env_or("LLM_MODEL", "gemini-2.5-flash"),
            temperature: env_f32("LLM_TEMPERATURE", 0.0),
            max_tokens: env_u32("LLM_MAX_TOKENS", 4096),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
