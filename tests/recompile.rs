//! Round-trip and ordering properties tying extraction to recompilation
//! (§8 P2, P3, P4).

use ki2_extract::recompiler::{recompile, Mode, Patch};
use ki2_extract::{extract_file, sjis};

#[test]
fn offsets_are_strictly_non_decreasing_in_emission_order() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&sjis::encode("あああ").unwrap());
    bytes.push(0x00);
    bytes.extend_from_slice(&sjis::encode("いいい").unwrap());
    bytes.push(0x00);
    bytes.extend_from_slice(&sjis::encode("ううう").unwrap());
    bytes.push(0x00);

    let result = extract_file(&bytes);
    let offsets: Vec<usize> = result.record.lines.values().flatten().map(|e| e.offset).collect();
    assert_eq!(offsets.len(), 3);
    assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn recompiling_with_identical_translations_is_byte_identical() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&sjis::encode("あああ").unwrap());
    bytes.push(0x00);
    bytes.extend_from_slice(&sjis::encode("いいい").unwrap());
    bytes.push(0x00);

    let result = extract_file(&bytes);
    let patches: Vec<Patch> = result
        .record
        .lines
        .values()
        .flatten()
        .map(|e| Patch {
            offset:       e.offset,
            original_len: e.byte_len,
            translation:  e.original.clone(),
        })
        .collect();

    let recompiled = recompile(&bytes, &patches, Mode::Strict).unwrap();
    assert_eq!(recompiled.bytes, bytes);
    assert!(recompiled.problems.is_empty());
}

#[test]
fn extracting_an_identical_round_trip_yields_the_same_entries() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&sjis::encode("あああ").unwrap());
    bytes.push(0x00);
    bytes.extend_from_slice(&sjis::encode("いいい").unwrap());
    bytes.push(0x00);

    let first = extract_file(&bytes);
    let patches: Vec<Patch> = first
        .record
        .lines
        .values()
        .flatten()
        .map(|e| Patch {
            offset:       e.offset,
            original_len: e.byte_len,
            translation:  e.original.clone(),
        })
        .collect();
    let recompiled = recompile(&bytes, &patches, Mode::Strict).unwrap();

    let second = extract_file(&recompiled.bytes);
    let first_texts: Vec<&str> = first.record.lines.values().flatten().map(|e| e.original.as_str()).collect();
    let second_texts: Vec<&str> = second.record.lines.values().flatten().map(|e| e.original.as_str()).collect();
    assert_eq!(first_texts, second_texts);
}

#[test]
fn strict_mode_refuses_overflow_and_expand_mode_splices() {
    let mut bytes = vec![b'A'];
    bytes.extend_from_slice(&sjis::encode("あ").unwrap());
    bytes.push(0x00);

    let patches = vec![Patch {
        offset:       1,
        original_len: 2,
        translation:  "ああああ".to_string(),
    }];

    assert!(recompile(&bytes, &patches, Mode::Strict).is_err());
    let expanded = recompile(&bytes, &patches, Mode::Expand).unwrap();
    assert!(expanded.bytes.len() > bytes.len());
}
