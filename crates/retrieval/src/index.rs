//! Vector index seam.
//!
//! Persistent nearest-neighbor storage is an external collaborator; the
//! pipeline talks to it through [`VectorIndex`]. The in-memory implementation
//! backs tests and the single-shot CLI flow.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use docqa_core::types::{Chunk, ScoredChunk};

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("query dimension {query} does not match indexed dimension {indexed}")]
    DimensionMismatch { query: usize, indexed: usize },

    #[error("storage error: {0}")]
    Storage(String),
}

/// A chunk together with its embedding, as handed to storage.
#[derive(Debug, Clone)]
pub struct ChunkRecord {
    pub chunk: Chunk,
    pub embedding: Vec<f32>,
}

/// Contract with the vector store: upserts are keyed by
/// `(source_document, sequence_index)`, search returns candidates sorted by
/// similarity descending (ties broken arbitrarily).
#[async_trait]
pub trait VectorIndex: Send + Sync {
    async fn upsert(&self, records: Vec<ChunkRecord>) -> Result<(), IndexError>;

    async fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<ScoredChunk>, IndexError>;
}

/// Brute-force cosine-similarity index held in memory.
#[derive(Default)]
pub struct InMemoryIndex {
    records: RwLock<Vec<ChunkRecord>>,
}

impl InMemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl VectorIndex for InMemoryIndex {
    async fn upsert(&self, records: Vec<ChunkRecord>) -> Result<(), IndexError> {
        let mut store = self.records.write().await;
        for record in records {
            let key = (
                record.chunk.source_document.clone(),
                record.chunk.sequence_index,
            );
            match store.iter_mut().find(|r| {
                r.chunk.source_document == key.0 && r.chunk.sequence_index == key.1
            }) {
                Some(existing) => *existing = record,
                None => store.push(record),
            }
        }
        Ok(())
    }

    async fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<ScoredChunk>, IndexError> {
        let store = self.records.read().await;
        if let Some(first) = store.first() {
            if first.embedding.len() != query.len() {
                return Err(IndexError::DimensionMismatch {
                    query: query.len(),
                    indexed: first.embedding.len(),
                });
            }
        }

        let mut scored: Vec<ScoredChunk> = store
            .iter()
            .map(|record| ScoredChunk {
                chunk: record.chunk.clone(),
                similarity: cosine_similarity(query, &record.embedding),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(top_k);
        Ok(scored)
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
