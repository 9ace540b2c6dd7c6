//! The line post-processor (§4.5): five ordered passes over a line's entry
//! list, repairing cross-entry artifacts the scanner/classifier cannot see
//! on their own. The order is load-bearing (§9); do not reorder passes.

const TERMINAL_PUNCTUATION: [char; 6] = ['。', '．', '…', '！', '？', '、'];
const BRACKETS: [char; 6] = ['「', '」', '『', '』', '＜', '＞'];
const PLACEHOLDER_TOKEN: &str = "％名％";

use crate::entry::{Entry, EntryKind};

/// Run all five passes over one line's entries, in place.
pub fn process_line(entries: &mut Vec<Entry>) {
    p1_drop_short_narration_beside_dialogue(entries);
    p2_promote_speakers(entries);
    p3_promote_leading_placeholder(entries);
    p4_merge_remaining_placeholders(entries);
    // P5 (translation-field attachment) has no in-memory effect: `Entry`
    // already carries an `Option<String>` translation slot, and presence
    // in the wire format is derived per-kind at serialization time
    // (`OutputEntry::from`).
}

/// P1: drop `Narration` entries of length ≤ 2 when the line also has a
/// `Dialogue`.
fn p1_drop_short_narration_beside_dialogue(entries: &mut Vec<Entry>) {
    if !entries.iter().any(|e| e.kind == EntryKind::Dialogue) {
        return;
    }
    entries.retain(|e| !(e.kind == EntryKind::Narration && e.char_len() <= 2));
}

/// P2: a `Narration` immediately preceding a `Dialogue`, with no terminal
/// punctuation or brackets, is promoted to `CharacterName`.
fn p2_promote_speakers(entries: &mut Vec<Entry>) {
    for i in 0..entries.len().saturating_sub(1) {
        if entries[i].kind != EntryKind::Narration || entries[i + 1].kind != EntryKind::Dialogue {
            continue;
        }
        let text = entries[i].original.as_str();
        let clean = !text.contains(|c| TERMINAL_PUNCTUATION.contains(&c))
            && !text.contains(|c| BRACKETS.contains(&c));
        if clean {
            entries[i].kind = EntryKind::CharacterName;
        }
    }
}

/// P3: a `NamePlaceholder` that appears before any `Dialogue` on a line
/// that has one is promoted to `CharacterName`. Otherwise it falls through
/// to P4.
fn p3_promote_leading_placeholder(entries: &mut Vec<Entry>) {
    let Some(first_dialogue) = entries.iter().position(|e| e.kind == EntryKind::Dialogue) else {
        return;
    };
    for entry in entries.iter_mut().take(first_dialogue) {
        if entry.kind == EntryKind::NamePlaceholder {
            entry.kind = EntryKind::CharacterName;
        }
    }
}

/// P4: any remaining `NamePlaceholder` is merged into an adjacent
/// `Dialogue` — preceding first, then following — and removed. Left alone
/// if neither neighbor is a `Dialogue`.
fn p4_merge_remaining_placeholders(entries: &mut Vec<Entry>) {
    let mut i = 0;
    while i < entries.len() {
        if entries[i].kind != EntryKind::NamePlaceholder {
            i += 1;
            continue;
        }

        debug_assert_eq!(entries[i].original, PLACEHOLDER_TOKEN);

        if i > 0 && entries[i - 1].kind == EntryKind::Dialogue {
            let token = entries[i].original.clone();
            entries[i - 1].original.push_str(&token);
            entries.remove(i);
            continue;
        }

        if i + 1 < entries.len() && entries[i + 1].kind == EntryKind::Dialogue {
            let token = entries[i].original.clone();
            entries[i + 1].original.insert_str(0, &token);
            entries.remove(i);
            continue;
        }

        i += 1;
    }
}
