pub mod document;
pub mod embedding;

pub use document::pages::{page_breaks_from_markers, PageBreak, PageTracker};
pub use document::segmenter::{HeaderSegmenter, Segmenter};
pub use document::windows::WindowChunker;
pub use document::{ingest, IngestError, MarkdownSource};
pub use embedding::{Embedder, EmbeddingError};
