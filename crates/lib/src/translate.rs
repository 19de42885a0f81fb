//! Trigger detection and reply composition.
//!
//! A message opts into translation with a literal marker: `#e2j` (English to
//! Japanese) or `#j2e` (Japanese to English), matched case-insensitively.
//! Messages without a marker are left alone — the bot never echoes.

use std::fmt;

/// Supported translation languages. A trigger always pairs the two, so source
/// and target are never equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    En,
    Ja,
}

impl Lang {
    /// Short code used in reply headers.
    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Ja => "ja",
        }
    }

    /// English name used when prompting the model.
    pub fn name(self) -> &'static str {
        match self {
            Lang::En => "English",
            Lang::Ja => "Japanese",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

const MARKER_E2J: &str = "#e2j";
const MARKER_J2E: &str = "#j2e";

/// A matched trigger: direction plus the text left over after stripping the
/// marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerMatch {
    pub source: Lang,
    pub target: Lang,
    pub text: String,
}

/// Scan `text` for a translation marker.
///
/// `#e2j` is checked before `#j2e`; when both appear the first check wins
/// (fixed tie-break, not an error). Every case variant of the matched marker is
/// stripped and the remainder trimmed; an empty remainder means there is
/// nothing to translate and resolves to `None`.
pub fn resolve_trigger(text: &str) -> Option<TriggerMatch> {
    let lower = text.to_ascii_lowercase();
    let (marker, source, target) = if lower.contains(MARKER_E2J) {
        (MARKER_E2J, Lang::En, Lang::Ja)
    } else if lower.contains(MARKER_J2E) {
        (MARKER_J2E, Lang::Ja, Lang::En)
    } else {
        return None;
    };
    let stripped = strip_marker(text, &lower, marker);
    let remainder = stripped.trim();
    if remainder.is_empty() {
        return None;
    }
    Some(TriggerMatch {
        source,
        target,
        text: remainder.to_string(),
    })
}

/// Remove every occurrence of `marker` from `text`, matching
/// case-insensitively. `lower` is `text` ASCII-lowercased, so byte offsets line
/// up even when the text contains multibyte characters.
fn strip_marker(text: &str, lower: &str, marker: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    for (start, found) in lower.match_indices(marker) {
        out.push_str(&text[pos..start]);
        pos = start + found.len();
    }
    out.push_str(&text[pos..]);
    out
}

/// Reply sent when translation succeeded.
pub fn compose_reply(display_name: &str, source: Lang, target: Lang, translated: &str) -> String {
    format!(
        "Message from @{}: ({} -> {}):\n--------------------\n{}",
        display_name,
        source.code(),
        target.code(),
        translated
    )
}

/// Reply sent when the model call failed. Deliberately distinct from the
/// success template so the sender is not shown a broken translation.
pub fn compose_failure_reply(source: Lang, target: Lang) -> String {
    format!(
        "Translation ({} -> {}) failed. Please try again later.",
        source.code(),
        target.code()
    )
}

/// Reply sent when handling a message failed before or after translation.
pub const PROCESSING_ERROR_REPLY: &str = "An error occurred while processing your message.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_without_marker_is_noop() {
        assert_eq!(resolve_trigger("hello world"), None);
        assert_eq!(resolve_trigger(""), None);
        assert_eq!(resolve_trigger("e2j without the hash"), None);
        assert_eq!(resolve_trigger("#e2x close but no"), None);
    }

    #[test]
    fn uppercase_marker_matches_and_strips() {
        let m = resolve_trigger("Hello #E2J").expect("trigger");
        assert_eq!(m.source, Lang::En);
        assert_eq!(m.target, Lang::Ja);
        assert_eq!(m.text, "Hello");
    }

    #[test]
    fn mixed_case_marker_matches() {
        let m = resolve_trigger("#e2J Hello").expect("trigger");
        assert_eq!(m.text, "Hello");
    }

    #[test]
    fn every_marker_occurrence_is_stripped() {
        let m = resolve_trigger("#e2j#E2J only markers").expect("trigger");
        assert_eq!(m.text, "only markers");
    }

    #[test]
    fn marker_with_empty_remainder_is_noop() {
        assert_eq!(resolve_trigger("#j2e"), None);
        assert_eq!(resolve_trigger("  #J2E  "), None);
        assert_eq!(resolve_trigger("#e2j #E2J"), None);
    }

    #[test]
    fn e2j_wins_when_both_markers_present() {
        let m = resolve_trigger("#j2e #e2j hola").expect("trigger");
        assert_eq!(m.source, Lang::En);
        assert_eq!(m.target, Lang::Ja);
        // Only the matched marker is stripped; the other stays in the text.
        assert_eq!(m.text, "#j2e  hola");
    }

    #[test]
    fn j2e_direction_with_japanese_text() {
        let m = resolve_trigger("#j2e こんにちは").expect("trigger");
        assert_eq!(m.source, Lang::Ja);
        assert_eq!(m.target, Lang::En);
        assert_eq!(m.text, "こんにちは");
    }

    #[test]
    fn reply_header_and_separator() {
        let reply = compose_reply("Alice", Lang::En, Lang::Ja, "こんにちは");
        assert_eq!(
            reply,
            "Message from @Alice: (en -> ja):\n--------------------\nこんにちは"
        );
    }

    #[test]
    fn failure_reply_names_the_direction() {
        let reply = compose_failure_reply(Lang::Ja, Lang::En);
        assert!(reply.contains("(ja -> en)"));
        assert_ne!(reply, compose_reply("x", Lang::Ja, Lang::En, ""));
    }
}
