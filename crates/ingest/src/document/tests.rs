//! Pipeline-level tests for document ingestion.

use docqa_core::config::ChunkingConfig;

use super::pages::{page_breaks_from_markers, PageBreak};
use super::{ingest, IngestError, MarkdownSource};

fn config(window: usize, overlap: usize) -> ChunkingConfig {
    ChunkingConfig {
        heading_level: 2,
        window_size: window,
        overlap_size: overlap,
    }
}

#[test]
fn intro_methods_results_scenario() {
    let source = MarkdownSource::new(
        "paper.pdf",
        "Intro text\n## Methods\nBody one.\n## Results\nBody two.",
        vec![PageBreak { offset: 0, page: 1 }],
    );
    let chunks = ingest(&source, &config(20, 5)).unwrap();

    let headers: Vec<Option<&str>> = {
        let mut seen = Vec::new();
        for c in &chunks {
            let h = c.header.as_deref();
            if seen.last() != Some(&h) {
                seen.push(h);
            }
        }
        seen
    };
    assert_eq!(headers, vec![None, Some("Methods"), Some("Results")]);

    for chunk in &chunks {
        assert_eq!(chunk.page, 1);
        assert_eq!(chunk.source_document, "paper.pdf");
    }
    // Every segment yielded at least one chunk.
    assert!(chunks.len() >= 3);
}

#[test]
fn sequence_indices_are_contiguous_from_zero() {
    let md = "Preamble paragraph with some length to it.\n\
              ## One\nFirst body text that spans a couple of windows easily.\n\
              ## Two\nSecond body.\n\
              ## Three\nThird body text, also long enough to window twice over.";
    let source = MarkdownSource::new("doc.md", md, vec![]);
    let chunks = ingest(&source, &config(30, 10)).unwrap();
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.sequence_index, i);
    }
}

#[test]
fn empty_markdown_is_rejected() {
    let source = MarkdownSource::new("empty.md", "   \n\t\n", vec![]);
    let err = ingest(&source, &config(1000, 100)).unwrap_err();
    assert!(matches!(err, IngestError::EmptyDocument(name) if name == "empty.md"));
}

#[test]
fn non_increasing_breakpoints_are_rejected() {
    let source = MarkdownSource::new(
        "doc.md",
        "## A\ntext",
        vec![
            PageBreak { offset: 0, page: 1 },
            PageBreak { offset: 50, page: 2 },
            PageBreak { offset: 50, page: 3 },
        ],
    );
    let err = ingest(&source, &config(1000, 100)).unwrap_err();
    assert!(matches!(
        err,
        IngestError::NonIncreasingBreakpoints { index: 2, offset: 50 }
    ));
}

#[test]
fn converter_markers_drive_page_attribution() {
    // Shape of the markdown the upstream converter emits: a `# Page N`
    // marker line ahead of each page's content.
    let md = "# Page 1\n\n## Abstract\nShort abstract.\n\n# Page 2\n\n## Conclusion\nWrap-up text.\n";
    let breakpoints = page_breaks_from_markers(md);
    let source = MarkdownSource::new("report.pdf", md, breakpoints);
    let chunks = ingest(&source, &config(1000, 100)).unwrap();

    let abstract_chunk = chunks
        .iter()
        .find(|c| c.header.as_deref() == Some("Abstract"))
        .unwrap();
    let conclusion_chunk = chunks
        .iter()
        .find(|c| c.header.as_deref() == Some("Conclusion"))
        .unwrap();
    assert_eq!(abstract_chunk.page, 1);
    assert_eq!(conclusion_chunk.page, 2);
}

#[test]
fn document_with_no_headings_still_chunks() {
    let source = MarkdownSource::new("plain.md", "One plain paragraph of text.", vec![]);
    let chunks = ingest(&source, &config(1000, 100)).unwrap();
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].header, None);
    assert_eq!(chunks[0].text, "One plain paragraph of text.");
}
