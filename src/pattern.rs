//! The pattern recognizer (§4.3): known ASCII prefixes and the
//! sprite-position fusion case, consulted by the scanner before it falls
//! back to plain SJIS-lead-byte candidacy.

use crate::entry::EntryKind;

/// The mode a candidate should be extracted in. ASCII-mode candidates also
/// carry the taxonomy type the pattern recognizer already determined
/// (§4.4 step 1: "Pattern-recognizer mode already declares a type").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// An SJIS-lead-byte candidate with no recognized ASCII pattern.
    Sjis,
    /// A recognized ASCII pattern, already typed.
    Ascii(EntryKind),
    /// The `_・` sprite-position fusion case: extraction must first
    /// back-scan to the sprite-name stem (§4.3).
    SpriteFusion,
}

const SPRITE_PREFIXES: [&[u8]; 2] = [b"ST_N\\", b"ST_L\\"];
const EFFECT_PREFIX: &[u8] = b"EFF\\";
const BACKGROUND_PREFIX: &[u8] = b"BG\\";
const WAV_EXTENSION: &[u8] = b".wav";
const FUSION_MARKER: [u8; 2] = [0x81, 0x45]; // ・

/// Try every known pattern at `pos`, first match wins (table order in §4.3).
pub fn recognize(bytes: &[u8], pos: usize) -> Option<Mode> {
    let rest = &bytes[pos..];

    for prefix in SPRITE_PREFIXES {
        if rest.starts_with(prefix) {
            return Some(Mode::Ascii(EntryKind::SpriteReference));
        }
    }

    if rest.starts_with(EFFECT_PREFIX) {
        return Some(Mode::Ascii(EntryKind::EffectReference));
    }

    if rest.starts_with(BACKGROUND_PREFIX) {
        return Some(Mode::Ascii(EntryKind::BackgroundReference));
    }

    if rest.first() == Some(&b'#') {
        return Some(Mode::Ascii(EntryKind::HashtagLabel));
    }

    if is_sound_effect_start(rest) {
        return Some(Mode::Ascii(EntryKind::SoundEffect));
    }

    if rest.first() == Some(&b'_') && rest.get(1..3) == Some(&FUSION_MARKER[..]) {
        return Some(Mode::SpriteFusion);
    }

    None
}

/// "`.wav` occurs within the next 4 bytes *and* the current byte initiates a
/// path-like ASCII run" (§4.3). A path-like run here means the byte at
/// `pos` is itself printable ASCII and not whitespace/terminator — the
/// scanner only calls this while walking forward byte-by-byte, so "current
/// byte initiates" reduces to "this byte is a plausible path character".
fn is_sound_effect_start(rest: &[u8]) -> bool {
    let Some(&first) = rest.first() else { return false };
    if !crate::sjis::is_printable_ascii(first) || crate::sjis::is_terminator(first) {
        return false;
    }
    let window = &rest[..rest.len().min(4 + WAV_EXTENSION.len())];
    window
        .windows(WAV_EXTENSION.len())
        .any(|w| w == WAV_EXTENSION)
}

/// Back-scan from a `_・` fusion marker to the start of the sprite-name stem
/// (§4.3): walk backward from `_` over printable ASCII. Returns the
/// recovered start offset.
pub fn fusion_stem_start(bytes: &[u8], underscore_pos: usize) -> usize {
    let mut start = underscore_pos;
    while start > 0 && crate::sjis::is_printable_ascii(bytes[start - 1]) {
        start -= 1;
    }
    start
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sprite_prefix() {
        let bytes = b"ST_N\\kanade.png\0";
        assert_eq!(
            recognize(bytes, 0),
            Some(Mode::Ascii(EntryKind::SpriteReference))
        );
    }

    #[test]
    fn effect_prefix() {
        let bytes = b"EFF\\flash.fx\0";
        assert_eq!(
            recognize(bytes, 0),
            Some(Mode::Ascii(EntryKind::EffectReference))
        );
    }

    #[test]
    fn background_prefix() {
        let bytes = b"BG\\room01.png\0";
        assert_eq!(
            recognize(bytes, 0),
            Some(Mode::Ascii(EntryKind::BackgroundReference))
        );
    }

    #[test]
    fn hashtag() {
        let bytes = b"#scene1\0";
        assert_eq!(
            recognize(bytes, 0),
            Some(Mode::Ascii(EntryKind::HashtagLabel))
        );
    }

    #[test]
    fn sound_effect() {
        let bytes = b"a.wav\0";
        assert_eq!(
            recognize(bytes, 0),
            Some(Mode::Ascii(EntryKind::SoundEffect))
        );
    }

    #[test]
    fn sprite_position_fusion() {
        let mut bytes = b"kanade_D_2".to_vec();
        bytes.push(b'_');
        bytes.extend_from_slice(&FUSION_MARKER);
        bytes.extend_from_slice(b"079\0");
        // the fusion marker is recognized at the `_` right before 0x81 0x45
        let underscore_pos = bytes.iter().rposition(|&b| b == b'_').unwrap();
        assert_eq!(recognize(&bytes, underscore_pos), Some(Mode::SpriteFusion));
        assert_eq!(fusion_stem_start(&bytes, underscore_pos), 0);
    }

    #[test]
    fn no_pattern_for_plain_text() {
        let bytes = b"hello\0";
        assert_eq!(recognize(bytes, 0), None);
    }
}
