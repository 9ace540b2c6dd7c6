//! Shift-JIS encode/decode, and the byte-level predicates the scanner and
//! extractor are built on (§6 "Byte-level constants (normative)").
//!
//! `picori`, the library this crate's structure is otherwise closely modeled
//! on, decodes Shift-JIS through a build-time code-generated lookup table
//! (see its `scripts/build.rs`), and its own encoder (`ShiftJis1997::write_str`)
//! is an unimplemented `todo!()`. The table's source data file is not part of
//! this workspace, and the recompiler (§4.6) needs a real two-way codec, so
//! this module is built directly on [`encoding_rs`] instead — the crate
//! `stringsext` (a sibling binary string-extraction tool) and `shift_or_euc`
//! (a legacy Japanese encoding detector) both lean on it for exactly this.

use encoding_rs::SHIFT_JIS;

use crate::error::{ProblemLocation, ScanProblem};

/// Shift-JIS lead byte ranges (§6).
#[inline]
pub fn is_sjis_lead(byte: u8) -> bool {
    matches!(byte, 0x81..=0x9F | 0xE0..=0xEF)
}

/// Printable ASCII range used by the back-scan (§4.2).
#[inline]
pub fn is_printable_ascii(byte: u8) -> bool {
    matches!(byte, 0x20..=0x7E)
}

/// String-breaking whitespace / terminator bytes (§6).
#[inline]
pub fn is_terminator(byte: u8) -> bool {
    matches!(byte, 0x00 | 0x09 | 0x0A | 0x0D)
}

/// Decode a byte range as Shift-JIS, failing (rather than substituting
/// `U+FFFD`) on any byte sequence that does not round-trip cleanly. This is
/// invariant 1 (§3): "every emitted entry's `original` decodes cleanly from
/// Shift-JIS (no partial lead bytes)".
#[track_caller]
pub fn decode(bytes: &[u8]) -> Result<String, ScanProblem> {
    let (cow, _encoding, had_errors) = SHIFT_JIS.decode(bytes);
    if had_errors {
        return Err(ScanProblem::DecodeFailure(
            0,
            "invalid Shift-JIS byte sequence",
            std::panic::Location::current(),
        ));
    }
    Ok(cow.into_owned())
}

/// Encode a string as Shift-JIS, failing on any code point with no
/// representation in the target encoding (§4.6 `UnrepresentableCodepoint`).
pub fn encode(text: &str) -> Result<Vec<u8>, char> {
    let (cow, _encoding, had_errors) = SHIFT_JIS.encode(text);
    if had_errors {
        let bad = text
            .chars()
            .find(|&c| SHIFT_JIS.encode(&c.to_string()).2)
            .unwrap_or('\u{FFFD}');
        return Err(bad);
    }
    Ok(cow.into_owned())
}

/// True if `text` contains at least one CJK code point: unified ideographs,
/// hiragana, katakana, or CJK symbols/punctuation (§4.2 "CJK validation").
pub fn has_cjk(text: &str) -> bool {
    text.chars().any(is_cjk_char)
}

#[inline]
fn is_cjk_char(c: char) -> bool {
    matches!(
        c as u32,
        0x3000..=0x303F  // CJK symbols and punctuation
        | 0x3040..=0x309F // hiragana
        | 0x30A0..=0x30FF // katakana
        | 0x3400..=0x4DBF // CJK unified ideographs extension A
        | 0x4E00..=0x9FFF // CJK unified ideographs
        | 0xFF00..=0xFFEF // halfwidth/fullwidth forms (fullwidth punctuation, e.g. ％)
    )
}
