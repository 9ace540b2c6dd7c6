//! Compiled-in read-only tables the classifier consults for the
//! season/date-marker and UI-marker rules (§4.4 steps 8–9, §9 "Global
//! state: ... read-only configuration, ideally compiled in").

/// Character names recognized by the season/date-marker rule (§4.4 step 8):
/// a known name followed by the fullwidth colon `：` and an ASCII token.
pub const KNOWN_CHARACTER_NAMES: &[&str] = &["カナデ", "ヒカリ", "ミズキ", "ツバサ", "アカネ"];

/// Exact UI-marker strings (§4.4 step 9).
pub const KNOWN_UI_MARKERS: &[&str] = &["選択パネル", "メッセージウィンドウ", "セーブ画面", "ロード画面"];

/// System-code prefix (§4.4 step 10): the literal `常：` followed by ASCII
/// digits.
pub const SYSTEM_CODE_PREFIX: &str = "常：";
