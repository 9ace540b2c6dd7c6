//! Ties the scanner, extractor, classifier, and post-processor together into
//! a single pure function from file bytes to a [`FileRecord`] (§2 data flow,
//! §5 "Per-file processing is a pure function: `bytes -> FileRecord`").

use std::collections::BTreeMap;

use crate::classifier::{self, KnownTables};
use crate::entry::{Entry, FileRecord};
use crate::error::ScanProblem;
use crate::extractor;
use crate::postprocess;
use crate::scanner::Scanner;

/// The result of extracting one file: the grouped, post-processed entries,
/// plus every dropped-candidate problem encountered along the way (§7: the
/// extractor is silent by default, so these are informational, not fatal).
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub record:   FileRecord,
    pub problems: Vec<ScanProblem>,
}

/// Extract, classify, group, and post-process one script file's bytes,
/// using only the compiled-in classifier tables.
pub fn extract_file(bytes: &[u8]) -> ExtractionResult {
    extract_file_with_tables(bytes, &KnownTables::default())
}

/// As [`extract_file`], but consulting `tables` in addition to the
/// compiled-in known-name and known-UI-marker lists (the CLI's
/// `--names`/`--ui-markers` escape hatch).
pub fn extract_file_with_tables(bytes: &[u8], tables: &KnownTables) -> ExtractionResult {
    let mut problems = Vec::new();
    let mut by_line: BTreeMap<u32, Vec<Entry>> = BTreeMap::new();

    let mut scanner = Scanner::new(bytes);
    while let Some(candidate) = scanner.next_candidate() {
        match extractor::extract(bytes, candidate.start, candidate.mode, &mut problems) {
            Some(raw) => {
                let kind = classifier::classify_with(&raw, tables);
                let entry = Entry::new(kind, raw.text.clone(), raw.start, raw.len);
                by_line.entry(candidate.line).or_default().push(entry);
                scanner.resume_after(raw.body_end);
            },
            None => scanner.skip_one(),
        }
    }

    let total_lines = scanner.total_lines();
    problems.extend(scanner.take_problems());

    for entries in by_line.values_mut() {
        postprocess::process_line(entries);
    }

    ExtractionResult {
        record: FileRecord { lines: by_line, total_lines },
        problems,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryKind;

    #[test]
    fn basic_sjis_dialogue_with_no_brackets_is_narration() {
        let bytes = [
            0x82, 0xbb, 0x82, 0xa4, 0x81, 0x41, 0x82, 0xc5, 0x82, 0xb7, 0x82, 0xe6, 0x82, 0xcb,
            0x81, 0x63, 0x81, 0x63, 0x00,
        ];
        let result = extract_file(&bytes);
        let entries = &result.record.lines[&1];
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, EntryKind::Narration);
        assert_eq!(entries[0].original, "そう、ですよね……");
    }

    #[test]
    fn control_sequence_produces_no_entries() {
        let bytes = [
            0x0A, 0x01, 0x01, 0x00, 0x00, 0x9F, 0x8E, 0x01, 0x00, 0x9B, 0xF8, 0xFD, 0x11, 0x1A,
            0x00,
        ];
        let result = extract_file(&bytes);
        assert!(result.record.lines.is_empty());
    }

    #[test]
    fn speaker_promotion_runs_end_to_end() {
        let mut bytes = Vec::new();
        // "ヒーローお兄さん" narration, then a dialogue in 「」.
        let name = crate::sjis::encode("ヒーローお兄さん").unwrap();
        bytes.extend_from_slice(&name);
        bytes.push(0x00);
        let dialogue = crate::sjis::encode("「……」").unwrap();
        bytes.extend_from_slice(&dialogue);
        bytes.push(0x00);

        let result = extract_file(&bytes);
        let entries = &result.record.lines[&1];
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, EntryKind::CharacterName);
        assert_eq!(entries[1].kind, EntryKind::Dialogue);
    }

    #[test]
    fn total_lines_counts_trailing_lines_with_no_entries() {
        // Line 1 has a real dialogue; line 2 is nothing but a control
        // sequence and produces no entry at all. total_lines must still
        // report 2, not 1 (the highest line key that owns an entry).
        let mut bytes = crate::sjis::encode("「……」").unwrap();
        bytes.push(0x0A);
        bytes.extend_from_slice(&[0x01, 0x01, 0x00, 0x00, 0x1A]);
        bytes.push(0x00);

        let result = extract_file(&bytes);
        assert_eq!(result.record.lines.keys().max().copied(), Some(1));
        assert_eq!(result.record.total_lines, 2);
    }

    #[test]
    fn offsets_are_non_decreasing() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&crate::sjis::encode("あああ").unwrap());
        bytes.push(0x00);
        bytes.extend_from_slice(&crate::sjis::encode("いいい").unwrap());
        bytes.push(0x00);
        let result = extract_file(&bytes);
        let offsets: Vec<usize> = result
            .record
            .lines
            .values()
            .flatten()
            .map(|e| e.offset)
            .collect();
        assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
    }
}
