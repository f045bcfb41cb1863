//! Merging of vector-search results into a bounded context.

use std::collections::HashSet;

use docqa_core::types::{AssembledContext, ScoredChunk};

use crate::citation::CitationFormatter;

/// Deduplicates, budget-truncates, and re-orders externally-ranked chunks.
///
/// Input is expected sorted by similarity descending; the output is sorted by
/// document position instead, so the generation prompt reads in natural
/// document order rather than relevance order.
pub struct RetrievalMerger {
    budget_chars: usize,
}

impl RetrievalMerger {
    /// `budget_chars` is assumed validated (> 0) at configuration load.
    pub fn new(budget_chars: usize) -> Self {
        Self { budget_chars }
    }

    /// Build the final context from ranked candidates. An empty input yields
    /// an empty context — a defined "no relevant content found" state, not an
    /// error.
    pub fn merge(&self, ranked: Vec<ScoredChunk>) -> AssembledContext {
        let mut seen: HashSet<(String, usize)> = HashSet::new();
        let mut admitted: Vec<ScoredChunk> = Vec::new();
        let mut total_chars = 0usize;

        for scored in ranked {
            let key = (
                scored.chunk.source_document.clone(),
                scored.chunk.sequence_index,
            );
            // An imperfect ranker may return the same chunk more than once;
            // only the first-seen copy is admitted.
            if !seen.insert(key) {
                continue;
            }

            let len = scored.chunk.text.chars().count();
            if !admitted.is_empty() && total_chars + len > self.budget_chars {
                break;
            }
            // The first chunk is admitted even when it alone exceeds the
            // budget: never return an empty context when a candidate exists.
            total_chars += len;
            admitted.push(scored);
        }

        admitted.sort_by(|a, b| {
            (&a.chunk.source_document, a.chunk.sequence_index)
                .cmp(&(&b.chunk.source_document, b.chunk.sequence_index))
        });

        let citations = CitationFormatter::collapse(&admitted);
        tracing::debug!(
            chunks = admitted.len(),
            total_chars,
            citations = citations.len(),
            "assembled retrieval context"
        );

        AssembledContext {
            ordered_chunks: admitted,
            citations,
            total_chars,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docqa_core::types::Chunk;

    fn scored(doc: &str, seq: usize, text: &str, similarity: f32) -> ScoredChunk {
        ScoredChunk {
            chunk: Chunk {
                text: text.to_string(),
                source_document: doc.to_string(),
                page: 1,
                header: Some("Section".to_string()),
                sequence_index: seq,
                char_start: 0,
                char_end: text.chars().count(),
            },
            similarity,
        }
    }

    #[test]
    fn empty_input_yields_empty_context() {
        let context = RetrievalMerger::new(1000).merge(vec![]);
        assert!(context.is_empty());
        assert!(context.citations.is_empty());
        assert_eq!(context.total_chars, 0);
    }

    #[test]
    fn duplicates_admitted_once_first_seen_wins() {
        let ranked = vec![
            scored("doc", 4, "first copy", 0.9),
            scored("doc", 4, "second copy", 0.8),
        ];
        let context = RetrievalMerger::new(1000).merge(ranked);
        assert_eq!(context.ordered_chunks.len(), 1);
        assert_eq!(context.ordered_chunks[0].chunk.text, "first copy");
        assert!((context.ordered_chunks[0].similarity - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn same_sequence_index_different_documents_both_kept() {
        let ranked = vec![
            scored("a.pdf", 0, "from a", 0.9),
            scored("b.pdf", 0, "from b", 0.8),
        ];
        let context = RetrievalMerger::new(1000).merge(ranked);
        assert_eq!(context.ordered_chunks.len(), 2);
    }

    #[test]
    fn stops_at_budget() {
        let ranked = vec![
            scored("doc", 0, "aaaaaaaaaa", 0.9), // 10 chars
            scored("doc", 1, "bbbbbbbbbb", 0.8), // 10 chars
            scored("doc", 2, "cccccccccc", 0.7), // would exceed 25
        ];
        let context = RetrievalMerger::new(25).merge(ranked);
        assert_eq!(context.ordered_chunks.len(), 2);
        assert_eq!(context.total_chars, 20);
    }

    #[test]
    fn oversized_first_chunk_is_force_admitted() {
        let ranked = vec![scored("doc", 0, &"x".repeat(500), 0.9)];
        let context = RetrievalMerger::new(100).merge(ranked);
        assert_eq!(context.ordered_chunks.len(), 1);
        assert_eq!(context.total_chars, 500);
    }

    #[test]
    fn output_is_in_document_order_not_similarity_order() {
        let ranked = vec![
            scored("doc", 7, "late section", 0.95),
            scored("doc", 2, "early section", 0.80),
            scored("doc", 5, "middle section", 0.70),
        ];
        let context = RetrievalMerger::new(1000).merge(ranked);
        let sequence: Vec<usize> = context
            .ordered_chunks
            .iter()
            .map(|s| s.chunk.sequence_index)
            .collect();
        assert_eq!(sequence, vec![2, 5, 7]);
    }

    #[test]
    fn budget_counts_characters_not_bytes() {
        // 10 chars, 20 bytes each.
        let ranked = vec![
            scored("doc", 0, &"é".repeat(10), 0.9),
            scored("doc", 1, &"ü".repeat(10), 0.8),
        ];
        let context = RetrievalMerger::new(20).merge(ranked);
        assert_eq!(context.ordered_chunks.len(), 2);
        assert_eq!(context.total_chars, 20);
    }
}
