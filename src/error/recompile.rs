use std::fmt;
use std::panic::Location;

/// One patch whose encoded translation would not fit its original byte
/// range, reported as part of a [`RecompileProblem::LengthOverflow`] batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthOverflowEntry {
    pub offset:       usize,
    pub original_len: usize,
    pub new_len:      usize,
}

impl fmt::Display for LengthOverflowEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "offset {} is {} bytes, original is {} bytes", self.offset, self.new_len, self.original_len)
    }
}

/// Problems that can occur while recompiling translated entries back into a
/// script binary (§4.6, §7). Unlike [`crate::error::ScanProblem`], these are
/// surfaced: the recompiler is loud by design.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum RecompileProblem {
    /// One or more translations are longer than the byte range they replace
    /// and strict mode is in effect (§4.6: "refuse the file, emit a
    /// length-overflow diagnostic listing offending entries"). Every
    /// offending patch from the pass is listed together, not just the
    /// first one found.
    #[error("{} entr{} too long for strict mode: {}", entries.len(), if entries.len() == 1 { "y" } else { "ies" }, entries.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    LengthOverflow {
        entries:  Vec<LengthOverflowEntry>,
        location: &'static Location<'static>,
    },

    /// A translation contains a code point with no Shift-JIS encoding.
    #[error("unrepresentable code point {codepoint:?} in translation at offset {offset}")]
    UnrepresentableCodepoint {
        offset:    usize,
        codepoint: char,
        location:  &'static Location<'static>,
    },

    /// The offset map was not strictly non-decreasing (§3 invariant 5); the
    /// recompiler refuses to guess which entry is authoritative.
    #[error("offset {0} is out of order relative to the previous entry")]
    OffsetOutOfOrder(usize, &'static Location<'static>),

    /// A translation entry's byte range falls outside the original file.
    #[error("entry at offset {offset} (len {len}) is out of bounds for a {file_len}-byte file")]
    OutOfBounds {
        offset:   usize,
        len:      usize,
        file_len: usize,
        location: &'static Location<'static>,
    },
}
