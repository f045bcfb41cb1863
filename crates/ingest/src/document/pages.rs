//! Offset → page-number mapping.

use serde::{Deserialize, Serialize};

/// A page boundary: everything from `offset` onward is on `page`, until the
/// next breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageBreak {
    pub offset: usize,
    pub page: usize,
}

/// Maps a character offset in the source markdown to a page number.
///
/// Breakpoints must be strictly increasing in offset; that is validated at
/// the ingest entry point, not here.
#[derive(Debug, Clone)]
pub struct PageTracker {
    breakpoints: Vec<PageBreak>,
}

impl PageTracker {
    pub fn new(breakpoints: Vec<PageBreak>) -> Self {
        Self { breakpoints }
    }

    /// Page of the greatest breakpoint `<= offset`. Offsets preceding the
    /// first breakpoint are on page 1; an offset lying exactly on a
    /// breakpoint takes the new page.
    pub fn page_for_offset(&self, offset: usize) -> usize {
        let idx = self.breakpoints.partition_point(|b| b.offset <= offset);
        if idx == 0 {
            1
        } else {
            self.breakpoints[idx - 1].page
        }
    }
}

/// Recover page breakpoints from the `# Page N` marker lines the upstream
/// converter injects into its markdown output.
pub fn page_breaks_from_markers(markdown: &str) -> Vec<PageBreak> {
    let mut breaks = Vec::new();
    let mut offset = 0usize;
    for line in markdown.split_inclusive('\n') {
        if let Some(page) = parse_page_marker(line) {
            breaks.push(PageBreak { offset, page });
        }
        offset += line.len();
    }
    breaks
}

fn parse_page_marker(line: &str) -> Option<usize> {
    let rest = line.strip_prefix("# ")?.trim();
    let number = rest.strip_prefix("Page")?.trim();
    number.parse().ok()
}
