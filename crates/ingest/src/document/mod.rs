//! Document ingestion: markdown in, ordered citation-bearing chunks out.
//!
//! The pipeline is two-stage: header-aware segmentation (with page-number
//! propagation) followed by overlapping fixed-width character windowing.
//! Each call is a pure, self-contained computation over immutable inputs,
//! so concurrent ingestion of different documents needs no locking.

pub mod pages;
pub mod segmenter;
pub mod windows;

#[cfg(test)]
mod tests;

use docqa_core::config::ChunkingConfig;
use docqa_core::types::Chunk;
use thiserror::Error;

use pages::{PageBreak, PageTracker};
use segmenter::{HeaderSegmenter, Segmenter};
use windows::WindowChunker;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("document '{0}' contains no text")]
    EmptyDocument(String),

    #[error("breakpoint offsets must be strictly increasing: offset {offset} at index {index}")]
    NonIncreasingBreakpoints { index: usize, offset: usize },
}

/// Converter output for one document: the markdown text plus the page
/// breakpoints the converter annotated it with.
#[derive(Debug, Clone)]
pub struct MarkdownSource {
    /// Document name carried into every chunk (typically the filename).
    pub name: String,
    /// The full converted markdown.
    pub markdown: String,
    /// `(offset, page)` breakpoints, strictly increasing in offset.
    pub breakpoints: Vec<PageBreak>,
}

impl MarkdownSource {
    pub fn new(name: impl Into<String>, markdown: impl Into<String>, breakpoints: Vec<PageBreak>) -> Self {
        Self {
            name: name.into(),
            markdown: markdown.into(),
            breakpoints,
        }
    }

    /// Contract checks on the converter handoff. Runs before any chunk is
    /// produced — ingestion is all-or-nothing per document.
    fn validate(&self) -> Result<(), IngestError> {
        if self.markdown.trim().is_empty() {
            return Err(IngestError::EmptyDocument(self.name.clone()));
        }
        for (i, pair) in self.breakpoints.windows(2).enumerate() {
            if pair[1].offset <= pair[0].offset {
                return Err(IngestError::NonIncreasingBreakpoints {
                    index: i + 1,
                    offset: pair[1].offset,
                });
            }
        }
        Ok(())
    }
}

/// Run the full ingestion pipeline for one document.
pub fn ingest(source: &MarkdownSource, config: &ChunkingConfig) -> Result<Vec<Chunk>, IngestError> {
    source.validate()?;

    let tracker = PageTracker::new(source.breakpoints.clone());
    let segmenter = HeaderSegmenter::new(config.heading_level);
    let segments = segmenter.split(&source.markdown, &tracker);

    let chunker = WindowChunker::new(config);
    let chunks = chunker.chunk(&source.name, &segments);

    tracing::info!(
        document = %source.name,
        segments = segments.len(),
        chunks = chunks.len(),
        "ingested document"
    );
    Ok(chunks)
}
