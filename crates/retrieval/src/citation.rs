//! Rendering of assembled context with inline source markers.

use docqa_core::types::{AssembledContext, Citation, ScoredChunk};

/// Renders ordered chunks into one text block with `[n]` source markers, and
/// produces the structured citation list shown to the end user.
pub struct CitationFormatter;

impl CitationFormatter {
    /// Citations for a run of chunks, with identical consecutive keys merged
    /// into one entry. Adjacent chunks routinely share a page and header, and
    /// one marker per chunk would just be citation spam.
    pub fn collapse(chunks: &[ScoredChunk]) -> Vec<Citation> {
        let mut citations: Vec<Citation> = Vec::new();
        for scored in chunks {
            let citation = Citation::for_chunk(&scored.chunk);
            if citations.last() != Some(&citation) {
                citations.push(citation);
            }
        }
        citations
    }

    /// Render the context for the generation prompt: each citation group gets
    /// one `[n] document | header | p.page` marker line followed by the texts
    /// of its chunks.
    pub fn format(context: &AssembledContext) -> String {
        let mut blocks: Vec<String> = Vec::new();
        let mut current: Option<Citation> = None;

        for scored in &context.ordered_chunks {
            let citation = Citation::for_chunk(&scored.chunk);
            let text = scored.chunk.text.trim();
            match blocks.last_mut() {
                Some(block) if current.as_ref() == Some(&citation) => {
                    block.push('\n');
                    block.push_str(text);
                }
                _ => {
                    blocks.push(format!("{}\n{}", marker(blocks.len() + 1, &citation), text));
                    current = Some(citation);
                }
            }
        }
        blocks.join("\n\n")
    }
}

fn marker(n: usize, citation: &Citation) -> String {
    format!(
        "[{n}] {} | {} | p.{}",
        citation.document,
        citation.header.as_deref().unwrap_or("untitled"),
        citation.page
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use docqa_core::types::Chunk;

    fn scored(doc: &str, page: usize, header: Option<&str>, seq: usize, text: &str) -> ScoredChunk {
        ScoredChunk {
            chunk: Chunk {
                text: text.to_string(),
                source_document: doc.to_string(),
                page,
                header: header.map(str::to_string),
                sequence_index: seq,
                char_start: 0,
                char_end: text.chars().count(),
            },
            similarity: 0.5,
        }
    }

    fn context(chunks: Vec<ScoredChunk>) -> AssembledContext {
        let citations = CitationFormatter::collapse(&chunks);
        let total_chars = chunks.iter().map(|s| s.chunk.text.chars().count()).sum();
        AssembledContext {
            ordered_chunks: chunks,
            citations,
            total_chars,
        }
    }

    #[test]
    fn consecutive_identical_keys_collapse_to_one_citation() {
        let chunks = vec![
            scored("doc.pdf", 1, Some("Methods"), 0, "one"),
            scored("doc.pdf", 1, Some("Methods"), 1, "two"),
            scored("doc.pdf", 2, Some("Results"), 2, "three"),
        ];
        let citations = CitationFormatter::collapse(&chunks);
        assert_eq!(citations.len(), 2);
        assert_eq!(citations[0].header.as_deref(), Some("Methods"));
        assert_eq!(citations[1].page, 2);
    }

    #[test]
    fn non_adjacent_repeats_are_kept() {
        let chunks = vec![
            scored("doc.pdf", 1, Some("A"), 0, "one"),
            scored("doc.pdf", 2, Some("B"), 5, "two"),
            scored("doc.pdf", 1, Some("A"), 9, "three"),
        ];
        let citations = CitationFormatter::collapse(&chunks);
        assert_eq!(citations.len(), 3);
    }

    #[test]
    fn merged_group_shares_one_marker() {
        let rendered = CitationFormatter::format(&context(vec![
            scored("doc.pdf", 1, Some("Methods"), 0, "First window."),
            scored("doc.pdf", 1, Some("Methods"), 1, "Second window."),
            scored("doc.pdf", 2, Some("Results"), 4, "Findings."),
        ]));
        assert_eq!(rendered.matches("[1]").count(), 1);
        assert!(rendered.contains("[1] doc.pdf | Methods | p.1"));
        assert!(rendered.contains("[2] doc.pdf | Results | p.2"));
        assert!(rendered.contains("First window.\nSecond window."));
    }

    #[test]
    fn long_run_of_identical_keys_appends_to_one_block() {
        let rendered = CitationFormatter::format(&context(vec![
            scored("doc.pdf", 1, Some("Intro"), 0, "a"),
            scored("doc.pdf", 1, Some("Intro"), 1, "b"),
            scored("doc.pdf", 1, Some("Intro"), 2, "c"),
        ]));
        assert_eq!(rendered, "[1] doc.pdf | Intro | p.1\na\nb\nc");
    }

    #[test]
    fn missing_header_renders_as_untitled() {
        let rendered = CitationFormatter::format(&context(vec![scored(
            "doc.pdf",
            3,
            None,
            0,
            "Preamble text.",
        )]));
        assert!(rendered.contains("[1] doc.pdf | untitled | p.3"));
    }

    #[test]
    fn empty_context_renders_empty_string() {
        let rendered = CitationFormatter::format(&AssembledContext::default());
        assert!(rendered.is_empty());
    }
}
