//! The audit linter (§6, §8): re-applies a subset of the testable
//! invariants to already-extracted JSON, independent of the extraction
//! pipeline that produced it. Offset monotonicity (P2) is not checkable
//! here — `offset`/`byte_len` are deliberately dropped from the wire shape
//! (§6) — so this only re-verifies what a translator-facing JSON file can
//! still attest to: the placeholder invariant (P5), dialogue-line
//! cleanliness (P6), and the `translation`-field presence rule (§6).

use crate::entry::{EntryKind, SerializedFile};

const PLACEHOLDER_TOKEN: &str = "％名％";

/// One invariant violation found while auditing a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub line:    String,
    pub message: String,
}

/// Audit one already-serialized file, returning every violation found.
pub fn audit(file: &SerializedFile) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (line, entries) in &file.lines {
        let has_dialogue = entries.iter().any(|e| e.kind == EntryKind::Dialogue);

        for entry in entries {
            // P5: any surviving NamePlaceholder must be the exact token.
            if entry.kind == EntryKind::NamePlaceholder && entry.original != PLACEHOLDER_TOKEN {
                findings.push(Finding {
                    line:    line.clone(),
                    message: format!("name placeholder entry is not the exact token: {:?}", entry.original),
                });
            }

            // P6: no short Narration beside a Dialogue.
            if has_dialogue
                && entry.kind == EntryKind::Narration
                && entry.original.chars().count() <= 2
            {
                findings.push(Finding {
                    line:    line.clone(),
                    message: format!("short narration fragment on a dialogue line: {:?}", entry.original),
                });
            }

            // §6: translation presence must match translatability.
            let present = entry.translation.is_some();
            if entry.kind.is_translatable() != present {
                findings.push(Finding {
                    line:    line.clone(),
                    message: format!(
                        "translation field presence mismatch for {:?} entry {:?}",
                        entry.kind, entry.original
                    ),
                });
            }
        }
    }

    findings
}
