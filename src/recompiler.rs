//! The recompiler (§4.6): a sequential, byte-positional patcher that writes
//! translations back into the original script bytes using the offset map
//! produced by extraction.

use crate::error::{ensure, LengthOverflowEntry, RecompileProblem};
use crate::sjis;

/// One translation to apply: the byte range it replaces, and the new text.
#[derive(Debug, Clone)]
pub struct Patch {
    pub offset:      usize,
    pub original_len: usize,
    pub translation: String,
}

/// How to handle a translation longer than the byte range it replaces
/// (§4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Refuse the whole file; report every offending patch.
    Strict,
    /// Splice the new bytes in, shifting every subsequent offset.
    Expand,
}

/// The result of a successful recompilation: the new bytes, plus any
/// per-entry problems that left entries untranslated in place.
#[derive(Debug, Clone)]
pub struct RecompileOutput {
    pub bytes:    Vec<u8>,
    pub problems: Vec<RecompileProblem>,
}

/// Apply `patches` (sorted by `offset`, non-decreasing per §3 invariant 5)
/// to `original`. In [`Mode::Strict`], a length-overflowing translation
/// aborts the whole operation — but only after every patch has been
/// checked, so the caller sees every offending entry in one diagnostic
/// instead of re-running `compile` once per overflow (§4.6).
#[track_caller]
pub fn recompile(original: &[u8], patches: &[Patch], mode: Mode) -> crate::error::Result<RecompileOutput> {
    // Pass 1: validate ordering and bounds, and encode every translation.
    // Ordering/bounds violations abort immediately (the caller gave us a
    // malformed patch list); length overflow in strict mode does not, so
    // every offending patch can be collected before we refuse the file.
    let mut encoded: Vec<Result<Vec<u8>, char>> = Vec::with_capacity(patches.len());
    let mut cursor = 0usize;
    let mut last_offset = None;

    for patch in patches {
        if let Some(prev) = last_offset {
            ensure!(
                patch.offset >= prev,
                RecompileProblem::OffsetOutOfOrder(patch.offset, std::panic::Location::caller())
            );
        }
        last_offset = Some(patch.offset);

        ensure!(
            patch.offset >= cursor && patch.offset + patch.original_len <= original.len(),
            RecompileProblem::OutOfBounds {
                offset:   patch.offset,
                len:      patch.original_len,
                file_len: original.len(),
                location: std::panic::Location::caller(),
            }
        );
        cursor = patch.offset + patch.original_len;

        encoded.push(sjis::encode(&patch.translation));
    }

    if mode == Mode::Strict {
        let overflows: Vec<LengthOverflowEntry> = patches
            .iter()
            .zip(&encoded)
            .filter_map(|(patch, encoded)| match encoded {
                Ok(bytes) if bytes.len() > patch.original_len => Some(LengthOverflowEntry {
                    offset:       patch.offset,
                    original_len: patch.original_len,
                    new_len:      bytes.len(),
                }),
                _ => None,
            })
            .collect();
        if !overflows.is_empty() {
            return Err(RecompileProblem::LengthOverflow {
                entries:  overflows,
                location: std::panic::Location::caller(),
            }
            .into());
        }
    }

    // Pass 2: every remaining patch is either within range or (in expand
    // mode) allowed to grow, so build the output.
    let mut problems = Vec::new();
    let mut out = Vec::with_capacity(original.len());
    let mut cursor = 0usize;

    for (patch, encoded) in patches.iter().zip(&encoded) {
        out.extend_from_slice(&original[cursor..patch.offset]);

        match encoded {
            Err(codepoint) => {
                problems.push(RecompileProblem::UnrepresentableCodepoint {
                    offset: patch.offset,
                    codepoint: *codepoint,
                    location: std::panic::Location::caller(),
                });
                // leave the original bytes in place for this entry.
                out.extend_from_slice(&original[patch.offset..patch.offset + patch.original_len]);
            },
            Ok(bytes) if bytes.len() > patch.original_len => {
                // only reachable here in Mode::Expand; Mode::Strict already
                // refused the file above.
                out.extend_from_slice(bytes);
            },
            Ok(bytes) => {
                out.extend_from_slice(bytes);
                out.resize(out.len() + (patch.original_len - bytes.len()), 0x00);
            },
        }

        cursor = patch.offset + patch.original_len;
    }

    out.extend_from_slice(&original[cursor..]);

    Ok(RecompileOutput {
        bytes: out,
        problems,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_identity_with_identical_translation() {
        let mut original = vec![b'A'];
        original.extend_from_slice(&[0x82, 0xa0, 0x82, 0xa0]);
        original.push(0x00);
        let patches = vec![Patch {
            offset:       1,
            original_len: 4,
            translation:  "ああ".to_string(),
        }];
        let result = recompile(&original, &patches, Mode::Strict).unwrap();
        assert_eq!(result.bytes, original);
        assert!(result.problems.is_empty());
    }

    #[test]
    fn shorter_translation_is_null_padded() {
        let mut original = vec![b'A'];
        original.extend_from_slice(&[0x82, 0xa0, 0x82, 0xa0]);
        original.push(0x00);
        let patches = vec![Patch {
            offset:       1,
            original_len: 4,
            translation:  "あ".to_string(),
        }];
        let result = recompile(&original, &patches, Mode::Strict).unwrap();
        assert_eq!(&result.bytes[1..3], &[0x82, 0xa0]);
        assert_eq!(&result.bytes[3..5], &[0x00, 0x00]);
    }

    #[test]
    fn longer_translation_is_rejected_in_strict_mode() {
        let mut original = vec![b'A'];
        original.extend_from_slice(&[0x82, 0xa0]);
        original.push(0x00);
        let patches = vec![Patch {
            offset:       1,
            original_len: 2,
            translation:  "ああああ".to_string(),
        }];
        let err = recompile(&original, &patches, Mode::Strict).unwrap_err();
        assert!(matches!(err, crate::error::Error::Recompile(RecompileProblem::LengthOverflow { .. })));
    }

    #[test]
    fn longer_translation_splices_in_expand_mode() {
        let mut original = vec![b'A'];
        original.extend_from_slice(&[0x82, 0xa0]);
        original.push(0x00);
        let patches = vec![Patch {
            offset:       1,
            original_len: 2,
            translation:  "ああああ".to_string(),
        }];
        let result = recompile(&original, &patches, Mode::Expand).unwrap();
        assert_eq!(result.bytes.len(), original.len() + 6);
    }

    #[test]
    fn unrepresentable_codepoint_leaves_original_in_place() {
        let mut original = vec![b'A'];
        original.extend_from_slice(&[0x82, 0xa0]);
        original.push(0x00);
        let patches = vec![Patch {
            offset:       1,
            original_len: 2,
            translation:  "😀".to_string(),
        }];
        let result = recompile(&original, &patches, Mode::Strict).unwrap();
        assert_eq!(&result.bytes[1..3], &[0x82, 0xa0]);
        assert_eq!(result.problems.len(), 1);
        assert!(matches!(result.problems[0], RecompileProblem::UnrepresentableCodepoint { .. }));
    }

    #[test]
    fn non_translatable_bytes_pass_through_untouched() {
        let original = vec![b'x', b'y', b'z'];
        let result = recompile(&original, &[], Mode::Strict).unwrap();
        assert_eq!(result.bytes, original);
    }

    #[test]
    fn strict_mode_reports_every_overflowing_patch_in_one_pass() {
        let mut original = vec![b'A'];
        original.extend_from_slice(&[0x82, 0xa0]);
        original.push(b'B');
        original.extend_from_slice(&[0x82, 0xa0]);
        original.push(0x00);
        let patches = vec![
            Patch {
                offset:       1,
                original_len: 2,
                translation:  "ああああ".to_string(),
            },
            Patch {
                offset:       4,
                original_len: 2,
                translation:  "いいいい".to_string(),
            },
        ];
        let err = recompile(&original, &patches, Mode::Strict).unwrap_err();
        match err {
            crate::error::Error::Recompile(RecompileProblem::LengthOverflow { entries, .. }) => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0].offset, 1);
                assert_eq!(entries[1].offset, 4);
            },
            other => panic!("expected LengthOverflow with both entries, got {other:?}"),
        }
    }
}
