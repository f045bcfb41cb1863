//! Overlapping fixed-width character windowing over segments.

use docqa_core::config::ChunkingConfig;
use docqa_core::types::{Chunk, Segment};

/// Splits each segment's text into overlapping character windows, carrying
/// the segment's page and header onto every chunk.
///
/// Boundaries are character-based, not token- or word-aware — splitting
/// mid-word is a known approximation. Offsets are counted in characters so a
/// multi-byte codepoint is never cut.
pub struct WindowChunker {
    window_size: usize,
    overlap_size: usize,
}

impl WindowChunker {
    /// `config` is assumed validated (`overlap_size < window_size`).
    pub fn new(config: &ChunkingConfig) -> Self {
        Self {
            window_size: config.window_size,
            overlap_size: config.overlap_size,
        }
    }

    /// Chunk all segments of one document, in order. `sequence_index` is a
    /// running counter across the whole document, not reset per segment.
    pub fn chunk(&self, document: &str, segments: &[Segment]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        for segment in segments {
            self.chunk_segment(document, segment, &mut chunks);
        }
        chunks
    }

    fn chunk_segment(&self, document: &str, segment: &Segment, out: &mut Vec<Chunk>) {
        // Byte offset of every char boundary, so windows slice valid UTF-8.
        let mut bounds: Vec<usize> = segment.text.char_indices().map(|(i, _)| i).collect();
        bounds.push(segment.text.len());
        let total = bounds.len() - 1;
        if total == 0 {
            return;
        }

        let step = self.window_size - self.overlap_size;
        let mut start = 0usize;
        loop {
            let end = (start + self.window_size).min(total);
            out.push(Chunk {
                text: segment.text[bounds[start]..bounds[end]].to_string(),
                source_document: document.to_string(),
                page: segment.page,
                header: segment.header.clone(),
                sequence_index: out.len(),
                char_start: start,
                char_end: end,
            });
            if end == total {
                break;
            }
            start += step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(window: usize, overlap: usize) -> ChunkingConfig {
        ChunkingConfig {
            heading_level: 2,
            window_size: window,
            overlap_size: overlap,
        }
    }

    fn segment(text: &str) -> Segment {
        Segment {
            text: text.to_string(),
            header: Some("Section".to_string()),
            start_offset: 0,
            end_offset: text.len(),
            page: 4,
        }
    }

    fn chunk_one(text: &str, window: usize, overlap: usize) -> Vec<Chunk> {
        WindowChunker::new(&config(window, overlap)).chunk("doc.pdf", &[segment(text)])
    }

    /// ceil(max(L - overlap, 0) / (window - overlap)), at least 1 for L > 0.
    fn expected_count(len: usize, window: usize, overlap: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let step = window - overlap;
        len.saturating_sub(overlap).div_ceil(step).max(1)
    }

    #[test]
    fn chunk_count_matches_formula() {
        for len in [1, 5, 15, 19, 20, 21, 30, 35, 36, 100, 101] {
            let text: String = "x".repeat(len);
            let chunks = chunk_one(&text, 20, 5);
            assert_eq!(
                chunks.len(),
                expected_count(len, 20, 5),
                "length {len} produced wrong chunk count"
            );
        }
    }

    #[test]
    fn short_segment_emits_one_whole_chunk() {
        let chunks = chunk_one("tiny", 1000, 100);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "tiny");
        assert_eq!(chunks[0].char_start, 0);
        assert_eq!(chunks[0].char_end, 4);
    }

    #[test]
    fn segment_shorter_than_overlap_emits_one_whole_chunk() {
        let chunks = chunk_one("ab", 1000, 100);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "ab");
    }

    #[test]
    fn empty_segment_emits_no_chunks() {
        let chunks = chunk_one("", 20, 5);
        assert!(chunks.is_empty());
    }

    #[test]
    fn windows_overlap_by_exactly_overlap_size() {
        let text: String = ('a'..='z').cycle().take(50).collect();
        let chunks = chunk_one(&text, 20, 5);
        for pair in chunks.windows(2) {
            assert_eq!(pair[1].char_start, pair[0].char_end - 5);
            assert!(pair[0].char_end - pair[0].char_start <= 20);
        }
    }

    #[test]
    fn overlap_removal_reconstructs_segment_text() {
        let text = "The quick brown fox jumps over the lazy dog again and again until done.";
        let chunks = chunk_one(text, 20, 5);
        assert!(chunks.len() > 1);

        let mut rebuilt: String = chunks[0].text.clone();
        for chunk in &chunks[1..] {
            rebuilt.extend(chunk.text.chars().skip(5));
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn multibyte_text_is_never_split_mid_codepoint() {
        let text: String = "héllo wörld ünïcodé ".repeat(5);
        let chunks = chunk_one(&text, 12, 3);
        let char_len = text.chars().count();
        assert_eq!(chunks.len(), expected_count(char_len, 12, 3));

        let mut rebuilt: String = chunks[0].text.clone();
        for chunk in &chunks[1..] {
            rebuilt.extend(chunk.text.chars().skip(3));
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn metadata_propagates_to_every_chunk() {
        let text: String = "y".repeat(45);
        let chunks = chunk_one(&text, 20, 5);
        for chunk in &chunks {
            assert_eq!(chunk.source_document, "doc.pdf");
            assert_eq!(chunk.page, 4);
            assert_eq!(chunk.header.as_deref(), Some("Section"));
        }
    }

    #[test]
    fn sequence_index_runs_across_segments() {
        let config = config(20, 5);
        let chunker = WindowChunker::new(&config);
        let segments = vec![
            segment(&"a".repeat(30)),
            segment(&"b".repeat(10)),
            segment(&"c".repeat(40)),
        ];
        let chunks = chunker.chunk("doc.pdf", &segments);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.sequence_index, i);
        }
        assert!(chunks.len() > 3);
    }

    #[test]
    fn exact_window_length_emits_single_chunk() {
        let text: String = "z".repeat(20);
        let chunks = chunk_one(&text, 20, 5);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].char_end, 20);
    }

    #[test]
    fn no_zero_length_or_duplicate_trailing_window() {
        // 35 chars with window 20 / step 15: [0,20) then [15,35), no third.
        let text: String = "q".repeat(35);
        let chunks = chunk_one(&text, 20, 5);
        assert_eq!(chunks.len(), 2);
        assert_eq!((chunks[1].char_start, chunks[1].char_end), (15, 35));
    }
}
