//! The type classifier (§4.4): maps an extracted string to one of the
//! closed taxonomy variants. First-match-wins over an ordered rule list;
//! character-name promotion is deferred to the post-processor, which has
//! cross-entry context this module does not.

mod known;

use crate::entry::EntryKind;
use crate::extractor::RawString;
use crate::pattern::Mode;

const PLACEHOLDER_TOKEN: &str = "％名％";
const DIALOGUE_OPEN: char = '「';
const DIALOGUE_CLOSE: char = '」';
const EMAIL_OPEN: char = '『';
const EMAIL_CLOSE: char = '』';
const THOUGHT_OPEN: char = '＜';
const THOUGHT_CLOSE: char = '＞';
const FUSION_MARKER: &str = "_・";
const POSITION_MARKER: char = '・';
const SEASON_DATE_SEP: char = '：';

/// Runtime extensions to the compiled-in known-name and known-UI-marker
/// tables (§9 "read-only configuration, ideally compiled in", with a CLI
/// escape hatch to extend them from a file). Empty by default, in which
/// case classification behaves exactly as if only `classifier::known`'s
/// compiled-in tables existed.
#[derive(Debug, Clone, Default)]
pub struct KnownTables {
    pub extra_names:      Vec<String>,
    pub extra_ui_markers: Vec<String>,
}

/// Classify one extracted string (§4.4), using only the compiled-in tables.
pub fn classify(raw: &RawString) -> EntryKind { classify_with(raw, &KnownTables::default()) }

/// Classify one extracted string (§4.4), consulting `tables` in addition to
/// the compiled-in known-name and known-UI-marker lists.
pub fn classify_with(raw: &RawString, tables: &KnownTables) -> EntryKind {
    // 1. the pattern recognizer already settled it.
    match raw.mode {
        Mode::Ascii(kind) => return kind,
        Mode::SpriteFusion => return EntryKind::SpriteReference,
        Mode::Sjis => {},
    }

    let text = raw.text.as_str();

    // 2. sprite+position fusion that slipped in via plain SJIS scanning.
    if text.contains(FUSION_MARKER) {
        return EntryKind::SpriteReference;
    }

    // 3. a bare position code (no sprite stem attached).
    if text.starts_with(POSITION_MARKER) && !text.contains('_') {
        return EntryKind::PositionCode;
    }

    // 4. the exact placeholder token, nothing else.
    if text == PLACEHOLDER_TOKEN {
        return EntryKind::NamePlaceholder;
    }

    // 5. dialogue brackets.
    if text.contains(DIALOGUE_OPEN) || text.ends_with(DIALOGUE_CLOSE) {
        return EntryKind::Dialogue;
    }

    // 6. email brackets.
    if text.contains(EMAIL_OPEN) || text.ends_with(EMAIL_CLOSE) {
        return EntryKind::EmailMessage;
    }

    // 7. inner-thought brackets.
    if text.contains(THOUGHT_OPEN) || text.contains(THOUGHT_CLOSE) {
        return EntryKind::InnerThought;
    }

    // 8. season/date marker: known name, fullwidth colon, ASCII token.
    if season_date_marker(text, &tables.extra_names) {
        return EntryKind::SeasonDateMarker;
    }

    // 9. known UI marker, verbatim.
    if known::KNOWN_UI_MARKERS.contains(&text) || tables.extra_ui_markers.iter().any(|m| m == text) {
        return EntryKind::UIMarker;
    }

    // 10. system code: known prefix, then ASCII digits.
    if system_code(text) {
        return EntryKind::SystemCode;
    }

    // 11. default.
    EntryKind::Narration
}

fn season_date_marker(text: &str, extra_names: &[String]) -> bool {
    known::KNOWN_CHARACTER_NAMES
        .iter()
        .copied()
        .chain(extra_names.iter().map(String::as_str))
        .any(|name| {
            text.strip_prefix(name)
                .and_then(|rest| rest.strip_prefix(SEASON_DATE_SEP))
                .is_some_and(|token| !token.is_empty() && token.chars().all(|c| c.is_ascii_graphic()))
        })
}

fn system_code(text: &str) -> bool {
    text.strip_prefix(known::SYSTEM_CODE_PREFIX)
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
}
