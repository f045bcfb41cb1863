use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;

use lru::LruCache;

/// LRU cache of embedding vectors, keyed by `(model, text)` hash so vectors
/// from different embedding models never collide.
pub struct EmbeddingCache {
    cache: LruCache<u64, Vec<f32>>,
    model: String,
    hits: u64,
    misses: u64,
}

impl EmbeddingCache {
    pub fn new(model: impl Into<String>, capacity: usize) -> Self {
        Self {
            cache: LruCache::new(
                NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(1).unwrap()),
            ),
            model: model.into(),
            hits: 0,
            misses: 0,
        }
    }

    fn key(&self, text: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.model.hash(&mut hasher);
        text.hash(&mut hasher);
        hasher.finish()
    }

    /// Look up a cached embedding by text.
    pub fn get(&mut self, text: &str) -> Option<Vec<f32>> {
        let key = self.key(text);
        if let Some(vec) = self.cache.get(&key) {
            self.hits += 1;
            Some(vec.clone())
        } else {
            self.misses += 1;
            None
        }
    }

    /// Store an embedding for a text.
    pub fn put(&mut self, text: &str, embedding: Vec<f32>) {
        let key = self.key(text);
        self.cache.put(key, embedding);
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
