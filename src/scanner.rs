//! The byte scanner (§4.1): walks the script with a cursor, advances a line
//! counter on newline bytes, skips control sequences, and hands off string
//! candidates to the extractor.
//!
//! The scanner never decodes; it only classifies candidacy. It is the only
//! stateful piece of the pipeline (a cursor and a line counter), by design
//! (§9 "avoid building a parser-combinator framework").

use crate::error::ScanProblem;
use crate::pattern::{self, Mode};
use crate::sjis::is_sjis_lead;

/// A discovered candidate start, with the mode the extractor should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub start: usize,
    pub mode:  Mode,
    pub line:  u32,
}

/// Stateful cursor over a whole script file (§5: fully read into memory, no
/// streaming).
pub struct Scanner<'a> {
    bytes:    &'a [u8],
    cursor:   usize,
    line:     u32,
    problems: Vec<ScanProblem>,
}

impl<'a> Scanner<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Scanner {
            bytes,
            cursor: 0,
            line: 1,
            problems: Vec::new(),
        }
    }

    pub fn total_lines(&self) -> u32 { self.line }

    /// Drain any [`ScanProblem`]s recorded so far (currently only
    /// unterminated control sequences; see [`ScanProblem::ControlSequenceUnterminated`]).
    pub fn take_problems(&mut self) -> Vec<ScanProblem> { std::mem::take(&mut self.problems) }

    /// Advance the cursor to the next candidate start, or `None` at EOF.
    /// Consumes whatever lies between the previous position and the
    /// returned candidate (newline runs, control sequences, uninteresting
    /// bytes); the caller is expected to then extend the candidate via the
    /// string extractor and move the cursor past it with
    /// [`Scanner::resume_after`].
    pub fn next_candidate(&mut self) -> Option<Candidate> {
        while self.cursor < self.bytes.len() {
            let byte = self.bytes[self.cursor];

            if byte == 0x0A || byte == 0x0D {
                self.consume_newline_run();
                self.skip_control_sequence();
                continue;
            }

            if let Some(mode) = pattern::recognize(self.bytes, self.cursor) {
                return Some(Candidate {
                    start: self.cursor,
                    mode,
                    line: self.line,
                });
            }

            if is_sjis_lead(byte) {
                return Some(Candidate {
                    start: self.cursor,
                    mode:  Mode::Sjis,
                    line:  self.line,
                });
            }

            self.cursor += 1;
        }
        None
    }

    /// Move the cursor past an extracted string's terminator (§4.2 "Advance
    /// cursor"). `terminator_inclusive` is true for `0x00` (consumed) and
    /// false for `0x09`/`0x0A`/`0x0D` (left for the newline handler).
    pub fn resume_after(&mut self, end_of_body: usize) {
        self.cursor = end_of_body;
        if self.cursor < self.bytes.len() && self.bytes[self.cursor] == 0x00 {
            self.cursor += 1;
        }
    }

    /// Called by the extractor when a candidate is discarded outright (no
    /// viable body at all, e.g. an SJIS lead byte at EOF): just step past it.
    pub fn skip_one(&mut self) { self.cursor += 1; }

    /// Step 1: "increment the line counter once, consume the entire run of
    /// newline bytes" (§4.1).
    fn consume_newline_run(&mut self) {
        self.line += 1;
        while self.cursor < self.bytes.len()
            && matches!(self.bytes[self.cursor], 0x0A | 0x0D)
        {
            self.cursor += 1;
        }
    }

    /// "check for a control sequence: if the next two bytes are `0x01 0x01`,
    /// skip forward until a byte in `{0x1A, 0x00, 0x0A, 0x0D}` is found; if
    /// that byte is `0x1A`, consume it" (§4.1).
    ///
    /// Control-sequence bodies are raw opcode parameter bytes and routinely
    /// contain embedded `0x00` (§8 scenario 4's own worked example has two
    /// right after the opener); only a real `0x1A` closes the sequence, and
    /// only a line break forces an early, unterminated stop.
    fn skip_control_sequence(&mut self) {
        if self.bytes[self.cursor..].starts_with(&[0x01, 0x01]) {
            let start = self.cursor;
            self.cursor += 2;
            while self.cursor < self.bytes.len() && !matches!(self.bytes[self.cursor], 0x1A | 0x0A | 0x0D) {
                self.cursor += 1;
            }
            if self.cursor < self.bytes.len() && self.bytes[self.cursor] == 0x1A {
                self.cursor += 1;
            } else {
                self.problems.push(ScanProblem::ControlSequenceUnterminated(
                    start,
                    std::panic::Location::caller(),
                ));
            }
        }
    }

    pub fn bytes(&self) -> &'a [u8] { self.bytes }
}
