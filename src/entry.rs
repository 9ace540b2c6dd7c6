//! The data model (§3): the closed taxonomy, the `Entry` record, and the
//! per-file record that groups entries by engine line.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The closed taxonomy of extracted string types (§3).
///
/// Order here drives nothing at runtime; it mirrors the order the type
/// classifier (§4.4) tests for each variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    // -- translatable --
    Dialogue,
    Narration,
    InnerThought,
    EmailMessage,

    // -- non-translatable --
    CharacterName,
    NamePlaceholder,
    SpriteReference,
    SoundEffect,
    HashtagLabel,
    EffectReference,
    BackgroundReference,
    PositionCode,
    UIMarker,
    SeasonDateMarker,
    SystemCode,
}

impl EntryKind {
    /// Translatable types get a `translation` slot in the output (§3, §6).
    pub fn is_translatable(self) -> bool {
        matches!(
            self,
            EntryKind::Dialogue
                | EntryKind::Narration
                | EntryKind::InnerThought
                | EntryKind::EmailMessage
        )
    }
}

/// One extracted, classified string (§3).
///
/// `offset`/`byte_len` are the recompiler's key (§4.6) and are intentionally
/// not serialized into translator-facing JSON (§6); see [`OutputEntry`] for
/// the wire shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub kind:     EntryKind,
    pub original: String,
    pub offset:   usize,
    pub byte_len: usize,
    /// Present only for translatable kinds; `None` means "not yet
    /// translated", matching the `translation: null` wire value.
    pub translation: Option<String>,
}

impl Entry {
    pub fn new(kind: EntryKind, original: String, offset: usize, byte_len: usize) -> Self {
        Entry {
            kind,
            original,
            offset,
            byte_len,
            translation: None,
        }
    }

    /// Character length of `original`, used by post-processor passes that
    /// reason about short fragments (P1) or placeholder exactness (P3/P5).
    pub fn char_len(&self) -> usize { self.original.chars().count() }
}

/// The wire shape of one entry (§6): `offset`/`byte_len` are dropped,
/// `translation` is present-and-nullable on translatable kinds and absent
/// otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputEntry {
    #[serde(rename = "type")]
    pub kind:     EntryKind,
    pub original: String,
    /// Outer `None` omits the field entirely (non-translatable kinds);
    /// `Some(None)` serializes as `translation: null`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<Option<String>>,
}

impl From<&Entry> for OutputEntry {
    fn from(entry: &Entry) -> Self {
        OutputEntry {
            kind:        entry.kind,
            original:    entry.original.clone(),
            translation: entry.kind.is_translatable().then(|| entry.translation.clone()),
        }
    }
}

/// Metadata attached to a file record (§3, §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileMetadata {
    pub file: String,
    pub total_lines: u32,
    #[serde(rename = "translatable")]
    pub translatable_count: usize,
}

/// The full per-file result of extraction (§3): entries grouped by the
/// 1-based line counter the scanner maintains, in ascending numeric order
/// (§5), with insertion order preserved within each line.
///
/// `total_lines` is the scanner's own line counter (every newline run
/// increments it, whether or not that line produced an entry), not the
/// highest key in `lines` — a file can end in control-sequence or
/// all-filtered lines that own no entry at all.
#[derive(Debug, Clone, Default)]
pub struct FileRecord {
    pub lines: BTreeMap<u32, Vec<Entry>>,
    pub total_lines: u32,
}

impl FileRecord {
    pub fn translatable_count(&self) -> usize {
        self.lines
            .values()
            .flatten()
            .filter(|entry| entry.kind.is_translatable())
            .count()
    }

    pub fn to_output(&self, file_name: &str) -> SerializedFile {
        let lines = self
            .lines
            .iter()
            .map(|(line, entries)| {
                (
                    line.to_string(),
                    entries.iter().map(OutputEntry::from).collect(),
                )
            })
            .collect();

        SerializedFile {
            lines,
            metadata: FileMetadata {
                file: file_name.to_string(),
                total_lines: self.total_lines,
                translatable_count: self.translatable_count(),
            },
        }
    }
}

/// The JSON-serializable projection of a [`FileRecord`] (§6). Line keys are
/// strings because JSON object keys always are; [`FileRecord`] keeps them as
/// `u32` internally so ordering and arithmetic stay natural.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedFile {
    pub lines: BTreeMap<String, Vec<OutputEntry>>,
    pub metadata: FileMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_slot_present_only_for_translatable() {
        let dialogue = Entry::new(EntryKind::Dialogue, "「…」".into(), 0, 10);
        assert!(dialogue.translation.is_none());
        let output: OutputEntry = (&dialogue).into();
        assert!(output.translation.is_some());

        let sprite = Entry::new(EntryKind::SpriteReference, "kanade_D_2".into(), 0, 10);
        let output: OutputEntry = (&sprite).into();
        assert!(output.translation.is_none());
    }

    #[test]
    fn serialized_translation_is_present_and_null_when_untranslated() {
        let dialogue = Entry::new(EntryKind::Dialogue, "「…」".into(), 0, 10);
        let output: OutputEntry = (&dialogue).into();
        let json = serde_json::to_value(&output).unwrap();
        assert!(json.get("translation").is_some());
        assert!(json["translation"].is_null());
    }

    #[test]
    fn serialized_translation_absent_for_non_translatable() {
        let sprite = Entry::new(EntryKind::SpriteReference, "kanade_D_2".into(), 0, 10);
        let output: OutputEntry = (&sprite).into();
        let json = serde_json::to_value(&output).unwrap();
        assert!(json.get("translation").is_none());
    }
}
