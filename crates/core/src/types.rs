//! Value records shared across the ingestion and retrieval pipelines.

use serde::{Deserialize, Serialize};

// ── Ingestion ───────────────────────────────────────────────────────────────

/// A header-delimited span of document text, produced by the segmenter.
///
/// Segments are emitted in document order and never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// The raw text of the span (heading line included, when present).
    pub text: String,
    /// Section heading with the marker stripped; `None` for preamble content.
    pub header: Option<String>,
    /// Byte offset of the span start in the source markdown.
    pub start_offset: usize,
    /// Byte offset one past the span end in the source markdown.
    pub end_offset: usize,
    /// Page number at the span start.
    pub page: usize,
}

/// A fixed-width (possibly overlapping) slice of a segment — the unit that
/// gets embedded and stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// The chunk text content.
    pub text: String,
    /// Name of the source document (typically the original filename).
    pub source_document: String,
    /// Page number inherited from the owning segment.
    pub page: usize,
    /// Section heading inherited from the owning segment.
    pub header: Option<String>,
    /// Document-global position, strictly increasing and contiguous from 0.
    /// Tie-break key when restoring document order after similarity ranking.
    pub sequence_index: usize,
    /// Character offset of the window start, relative to the segment.
    pub char_start: usize,
    /// Character offset of the window end, relative to the segment.
    pub char_end: usize,
}

impl Chunk {
    /// Identity key used for storage upserts and retrieval dedup.
    pub fn key(&self) -> (&str, usize) {
        (&self.source_document, self.sequence_index)
    }
}

// ── Retrieval ───────────────────────────────────────────────────────────────

/// A chunk paired with the similarity score the vector search assigned it.
/// Ephemeral: lives only for the duration of one query's merge step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub similarity: f32,
}

/// Attribution of a chunk to its source location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub document: String,
    pub page: usize,
    pub header: Option<String>,
}

impl Citation {
    pub fn for_chunk(chunk: &Chunk) -> Self {
        Self {
            document: chunk.source_document.clone(),
            page: chunk.page,
            header: chunk.header.clone(),
        }
    }
}

/// The merged, budget-bounded retrieval result handed to answer generation.
/// Built fresh per query; never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssembledContext {
    /// Admitted chunks in document order (not similarity order).
    pub ordered_chunks: Vec<ScoredChunk>,
    /// Citations with consecutive duplicates collapsed, aligned with the
    /// markers the formatter emits.
    pub citations: Vec<Citation>,
    /// Total character count across the admitted chunk texts.
    pub total_chars: usize,
}

impl AssembledContext {
    /// True when retrieval found nothing — a defined state the caller must
    /// render as "no relevant content found", not an error.
    pub fn is_empty(&self) -> bool {
        self.ordered_chunks.is_empty()
    }
}
