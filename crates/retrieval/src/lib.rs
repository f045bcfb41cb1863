//! Retrieval-side assembly: merge ranked chunks into a bounded,
//! citation-tracked context and render it for answer generation.

pub mod citation;
pub mod index;
pub mod merger;

pub use citation::CitationFormatter;
pub use index::{ChunkRecord, InMemoryIndex, IndexError, VectorIndex};
pub use merger::RetrievalMerger;
