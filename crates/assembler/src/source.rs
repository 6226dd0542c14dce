//! Source ingestion for Hack assembly files.
//!
//! Lines are read one at a time from any [`BufRead`]. Blank lines are
//! skipped, and every remaining line is reduced to its instruction text:
//! leading whitespace is dropped and everything from the first whitespace
//! run onward is treated as a trailing comment. Instructions never contain
//! internal whitespace.
//!
//! Line numbers are preserved so diagnostics can point at the original file.

use std::io::{self, BufRead};

/// A cleaned instruction line with its original location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// Instruction text with whitespace and trailing comment removed.
    pub text: String,
    /// 1-indexed line number in the original file.
    pub original_line: usize,
}

/// Reduces a raw line to its instruction text.
///
/// Returns `None` for blank lines.
#[must_use]
pub fn clean_line(raw: &str) -> Option<&str> {
    let trimmed = raw.trim_start();
    let end = trimmed
        .find(char::is_whitespace)
        .unwrap_or(trimmed.len());
    let text = &trimmed[..end];
    (!text.is_empty()).then_some(text)
}

/// Iterator over the non-blank, cleaned lines of a reader.
///
/// Lines are read as raw bytes and decoded lossily, so stray non-UTF-8 bytes
/// in a trailing comment are discarded along with the comment. A bad byte
/// inside an instruction survives as `U+FFFD` and fails at encoding with its
/// line number.
#[derive(Debug)]
pub struct SourceLines<R> {
    reader: R,
    buf: Vec<u8>,
    line_number: usize,
}

impl<R: BufRead> Iterator for SourceLines<R> {
    type Item = io::Result<SourceLine>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }
            self.line_number += 1;

            let raw = String::from_utf8_lossy(&self.buf);
            if let Some(text) = clean_line(&raw) {
                return Some(Ok(SourceLine {
                    text: text.to_string(),
                    original_line: self.line_number,
                }));
            }
        }
    }
}

/// Wraps a reader so it yields cleaned [`SourceLine`]s.
pub fn source_lines<R: BufRead>(reader: R) -> SourceLines<R> {
    SourceLines {
        reader,
        buf: Vec::new(),
        line_number: 0,
    }
}
