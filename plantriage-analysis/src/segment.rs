//! Splitting raw plan output into candidate error blocks.
//!
//! Terraform prints each diagnostic as a block separated by blank lines,
//! often framed with box-drawing characters:
//!
//! ```text
//! ╷
//! │ Error: Unsupported block type
//! │
//! │   on main.tf line 12:
//! ╵
//! ```
//!
//! The segmenter strips the frame, tolerates CRLF line endings, and keeps
//! only blocks that carry an `Error:` or `Warning:` marker. It never fails;
//! input without markers yields an empty vec.

use tracing::debug;

/// A contiguous span of plan output treated as one candidate error report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Block text with the box-drawing frame removed, lines joined by `\n`.
    pub text: String,
    /// Byte offset of the block's first line in the original input.
    pub start: usize,
}

impl Segment {
    pub fn has_error_marker(&self) -> bool {
        self.text.contains("Error:")
    }
}

pub fn split_segments(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut block_lines: Vec<&str> = Vec::new();
    let mut block_start = 0usize;
    let mut offset = 0usize;

    for raw_line in input.split_inclusive('\n') {
        let line = raw_line.trim_end_matches(['\n', '\r']);
        let cleaned = strip_frame(line);

        // A bare `│` is a blank continuation line inside one framed
        // diagnostic; only truly blank lines and the `╷`/`╵` frame
        // boundaries separate blocks.
        let continuation = line.trim_start().starts_with('│');

        if cleaned.trim().is_empty() && !continuation {
            flush_block(&mut segments, &mut block_lines, block_start);
        } else if !block_lines.is_empty() || !cleaned.trim().is_empty() {
            if block_lines.is_empty() {
                block_start = offset;
            }
            block_lines.push(cleaned);
        }

        offset += raw_line.len();
    }
    flush_block(&mut segments, &mut block_lines, block_start);

    debug!(segments = segments.len(), "segmented plan output");
    segments
}

fn flush_block(segments: &mut Vec<Segment>, block_lines: &mut Vec<&str>, start: usize) {
    if block_lines.is_empty() {
        return;
    }
    let text = block_lines.join("\n").trim_end().to_string();
    block_lines.clear();

    if text.contains("Error:") || text.contains("Warning:") {
        segments.push(Segment { text, start });
    }
}

/// Remove Terraform's diagnostic frame from one line. Lines consisting only
/// of frame glyphs become empty and therefore act as block separators.
fn strip_frame(line: &str) -> &str {
    line.trim_start_matches([' ', '\t'])
        .trim_start_matches(['╷', '╵', '│'])
        .trim_start_matches(' ')
}
