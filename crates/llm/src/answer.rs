//! Grounded answer generation over assembled retrieval context.

use docqa_core::config::LlmConfig;
use tracing::{debug, info};

use crate::provider::{LlmError, LlmProvider, Message, Role};

/// Placeholders the prompt template must contain exactly once each.
const CONTEXT_PLACEHOLDER: &str = "{context}";
const QUERY_PLACEHOLDER: &str = "{query}";

const SYSTEM_PROMPT: &str = "\
You are a document question-answering assistant. Answer using ONLY the \
provided context excerpts. Each excerpt is preceded by a source marker of \
the form [n] document | section | page. When you use an excerpt, cite its \
marker number in square brackets. If the context does not contain the \
answer, say you cannot answer from the provided document — do not invent \
information.";

const ANSWER_TEMPLATE: &str = "\
Context excerpts:

{context}

Question: {query}

Answer the question from the context above, citing sources.";

/// Fills the answer prompt with retrieved context and the user question,
/// then asks the provider for a grounded answer.
pub struct AnswerGenerator {
    provider: Box<dyn LlmProvider>,
    temperature: f32,
    max_tokens: u32,
}

impl AnswerGenerator {
    pub fn new(provider: Box<dyn LlmProvider>, temperature: f32, max_tokens: u32) -> Self {
        debug_assert_eq!(ANSWER_TEMPLATE.matches(CONTEXT_PLACEHOLDER).count(), 1);
        debug_assert_eq!(ANSWER_TEMPLATE.matches(QUERY_PLACEHOLDER).count(), 1);
        Self {
            provider,
            temperature,
            max_tokens,
        }
    }

    /// Build from config, creating the appropriate provider.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let provider = crate::providers::create_provider(config)?;
        Ok(Self::new(provider, config.temperature, config.max_tokens))
    }

    /// Generate an answer for `question` grounded in the formatted `context`
    /// block produced by the citation formatter.
    pub async fn answer(&self, question: &str, context: &str) -> Result<String, LlmError> {
        let user_prompt = ANSWER_TEMPLATE
            .replace(CONTEXT_PLACEHOLDER, context)
            .replace(QUERY_PLACEHOLDER, question);

        info!("Generating answer for: {}", question);

        let messages = vec![
            Message {
                role: Role::System,
                content: SYSTEM_PROMPT.to_string(),
            },
            Message {
                role: Role::User,
                content: user_prompt,
            },
        ];

        let response = self
            .provider
            .complete(messages, self.temperature, self.max_tokens)
            .await?;

        debug!("LLM response: {}", response);
        Ok(response)
    }
}
