//! Embedding clients: trait seam, Gemini backend, batching, and caching.
//!
//! Embedding generation is an external collaborator — the pipeline only
//! consumes it through the [`Embedder`] trait.

pub mod cache;
pub mod chunks;
pub mod gemini;
pub mod traits;

pub use cache::EmbeddingCache;
pub use chunks::ChunkEmbedder;
pub use gemini::GeminiEmbedder;
pub use traits::{Embedder, EmbeddingError};
