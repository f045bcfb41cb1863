//! Cache-aware batch embedding of document chunks.

use std::sync::Arc;

use docqa_core::types::Chunk;
use tracing::debug;

use super::cache::EmbeddingCache;
use super::traits::{Embedder, EmbeddingError};

/// Embeds a document's chunks through the cache, sending misses to the
/// backend in batches of at most `batch_size` texts.
pub struct ChunkEmbedder {
    embedder: Arc<dyn Embedder>,
    cache: EmbeddingCache,
    batch_size: usize,
}

impl ChunkEmbedder {
    pub fn new(embedder: Arc<dyn Embedder>, cache: EmbeddingCache, batch_size: usize) -> Self {
        Self {
            embedder,
            cache,
            batch_size: batch_size.max(1),
        }
    }

    /// Embed every chunk, returning one vector per chunk in input order.
    /// Cached texts are served without an API call; misses are embedded in
    /// batches and cached as each batch returns, so a text repeated across
    /// calls (or after an earlier batch) is only sent once.
    pub async fn embed_chunks(&mut self, chunks: &[Chunk]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut vectors: Vec<Option<Vec<f32>>> = vec![None; chunks.len()];
        let mut misses: Vec<usize> = Vec::new();

        for (i, chunk) in chunks.iter().enumerate() {
            match self.cache.get(&chunk.text) {
                Some(vector) => vectors[i] = Some(vector),
                None => misses.push(i),
            }
        }

        for batch in misses.chunks(self.batch_size) {
            let texts: Vec<&str> = batch.iter().map(|&i| chunks[i].text.as_str()).collect();
            let embedded = self.embedder.embed_batch(&texts).await?;
            if embedded.len() != texts.len() {
                return Err(EmbeddingError::CountMismatch {
                    expected: texts.len(),
                    actual: embedded.len(),
                });
            }
            for (&i, vector) in batch.iter().zip(embedded) {
                self.cache.put(&chunks[i].text, vector.clone());
                vectors[i] = Some(vector);
            }
        }

        debug!(
            chunks = chunks.len(),
            embedded = misses.len(),
            hit_rate = self.cache.hit_rate(),
            "embedded document chunks"
        );

        let mut out = Vec::with_capacity(vectors.len());
        for (i, vector) in vectors.into_iter().enumerate() {
            match vector {
                Some(vector) => out.push(vector),
                None => {
                    return Err(EmbeddingError::CountMismatch {
                        expected: chunks.len(),
                        actual: i,
                    })
                }
            }
        }
        Ok(out)
    }

    /// Embed a query string, also through the cache, so repeated questions
    /// skip the API.
    pub async fn embed_query(&mut self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if let Some(vector) = self.cache.get(text) {
            return Ok(vector);
        }
        let vector = self.embedder.embed_query(text).await?;
        self.cache.put(text, vector.clone());
        Ok(vector)
    }

    /// Cache statistics for reporting.
    pub fn cache(&self) -> &EmbeddingCache {
        &self.cache
    }
}
