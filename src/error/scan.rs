use std::panic::Location;

/// Problems that can occur while the byte scanner or string extractor walks
/// a script file. These are never returned as a hard [`crate::Error`] from
/// file-level extraction: the extractor is defensive by default (§7), so
/// every variant here is collected into a [`crate::ScanReport`] and the
/// offending candidate is simply dropped.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ScanProblem {
    /// A byte range did not round-trip through Shift-JIS.
    #[error("decode failure at offset {0}: {1}")]
    DecodeFailure(usize, &'static str, &'static Location<'static>),

    /// An SJIS lead byte was the last byte in the file.
    #[error("out-of-bounds candidate at offset {0}")]
    OutOfBoundsCandidate(usize, &'static Location<'static>),

    /// A `0x01 0x01` control sequence was never closed by `0x1A` before EOF.
    #[error("unterminated control sequence starting at offset {0}")]
    ControlSequenceUnterminated(usize, &'static Location<'static>),

    /// A decoded SJIS-mode candidate contained no CJK code point.
    #[error("no CJK code point found in candidate at offset {0}")]
    NotCjk(usize, &'static Location<'static>),
}
