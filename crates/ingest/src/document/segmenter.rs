//! Header-aware segmentation of markdown text.

use docqa_core::types::Segment;

use super::pages::PageTracker;

/// A segmentation strategy. One method so alternative strategies can be
/// swapped in without touching the window chunker or anything downstream.
pub trait Segmenter {
    /// Split `markdown` into ordered segments. Order is load-bearing: it
    /// drives `sequence_index` assignment downstream.
    fn split(&self, markdown: &str, pages: &PageTracker) -> Vec<Segment>;
}

/// Splits at heading lines of a configured level.
///
/// A heading of exactly the configured level opens a new segment and becomes
/// its `header`; a shallower heading also closes the current segment but the
/// new one carries no header (the heading line stays in the text). Deeper
/// headings are plain content. Heading lines are retained in segment text so
/// chunks keep their section title inline.
pub struct HeaderSegmenter {
    heading_level: usize,
}

impl HeaderSegmenter {
    pub fn new(heading_level: usize) -> Self {
        Self { heading_level }
    }
}

impl Segmenter for HeaderSegmenter {
    fn split(&self, markdown: &str, pages: &PageTracker) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut seg_start = 0usize;
        let mut seg_header: Option<String> = None;
        let mut offset = 0usize;

        for line in markdown.split_inclusive('\n') {
            if let Some(level) = heading_level_of(line) {
                if level <= self.heading_level {
                    close_segment(markdown, seg_start, offset, seg_header.take(), pages, &mut segments);
                    seg_start = offset;
                    if level == self.heading_level {
                        seg_header = Some(strip_marker(line));
                    }
                }
            }
            offset += line.len();
        }
        close_segment(markdown, seg_start, markdown.len(), seg_header, pages, &mut segments);

        segments
    }
}

/// Emit the span `[start, end)` as a segment. The preamble (a span with no
/// header that never saw a boundary) is dropped when it is whitespace-only;
/// header-only segments are always emitted — they still carry citation value.
fn close_segment(
    markdown: &str,
    start: usize,
    end: usize,
    header: Option<String>,
    pages: &PageTracker,
    segments: &mut Vec<Segment>,
) {
    let text = &markdown[start..end];
    if segments.is_empty() && header.is_none() && start == 0 && text.trim().is_empty() {
        return;
    }
    segments.push(Segment {
        text: text.to_string(),
        header,
        start_offset: start,
        end_offset: end,
        page: pages.page_for_offset(start),
    });
}

/// ATX heading level of `line` (1..=6), or `None` for non-heading lines.
/// Markers must be followed by a space or tab.
fn heading_level_of(line: &str) -> Option<usize> {
    let level = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    match line.as_bytes().get(level) {
        Some(b' ') | Some(b'\t') => Some(level),
        _ => None,
    }
}

fn strip_marker(line: &str) -> String {
    line.trim_start_matches('#').trim().to_string()
}
