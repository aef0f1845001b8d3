//! Draft sanitization: strips banned phrases and normalizes whitespace.
//!
//! Runs between parsing and validation. Removal is case-insensitive and
//! applies to every occurrence; afterwards all whitespace runs (newlines
//! included) collapse to single spaces, so a sanitized body is one line.

use crate::outreach::lexicon::BANNED_PHRASES;

/// Removes every banned phrase from `text`, then collapses whitespace.
///
/// Removal leaves the surrounding words in place; the collapse pass mops
/// up the double spaces that removal leaves behind.
pub fn sanitize_banned(text: &str) -> String {
    let mut cleaned = text.to_string();
    for phrase in BANNED_PHRASES {
        if contains_ignore_ascii_case(&cleaned, phrase) {
            cleaned = remove_all_ignore_ascii_case(&cleaned, phrase);
        }
    }
    collapse_whitespace(&cleaned)
}

/// Collapses every whitespace run to a single space and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    let hay = haystack.as_bytes();
    let pat = needle.as_bytes();
    if pat.is_empty() || hay.len() < pat.len() {
        return false;
    }
    hay.windows(pat.len()).any(|w| w.eq_ignore_ascii_case(pat))
}

/// Removes all case-insensitive occurrences of `needle` from `haystack`.
///
/// The phrase tables are pure ASCII, so every matched window sits on char
/// boundaries and the non-matched remainder stays valid UTF-8.
fn remove_all_ignore_ascii_case(haystack: &str, needle: &str) -> String {
    let mut out = String::with_capacity(haystack.len());
    let mut rest = haystack;
    while let Some(ch) = rest.chars().next() {
        match strip_prefix_ignore_ascii_case(rest, needle) {
            Some(after) => rest = after,
            None => {
                out.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }
    out
}

fn strip_prefix_ignore_ascii_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() || s.len() < prefix.len() {
        return None;
    }
    if s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes()) {
        s.get(prefix.len()..)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_banned_phrase() {
        let out = sanitize_banned("I have a proven track record in Rust.");
        assert!(!out.to_lowercase().contains("proven track record"));
        assert!(out.contains("Rust"));
    }

    #[test]
    fn test_removal_is_case_insensitive() {
        let out = sanitize_banned("I am EXCITED to join. Dear Hiring Manager,");
        let lower = out.to_lowercase();
        assert!(!lower.contains("i am excited"));
        assert!(!lower.contains("dear hiring manager"));
    }

    #[test]
    fn test_removes_multiple_phrases() {
        let out = sanitize_banned("Thrilled to apply. My solid background aligns well here.");
        let lower = out.to_lowercase();
        assert!(!lower.contains("thrilled"));
        assert!(!lower.contains("solid background"));
        assert!(!lower.contains("aligns well"));
    }

    #[test]
    fn test_no_banned_phrase_survives_any_removal() {
        for phrase in crate::outreach::lexicon::BANNED_PHRASES {
            let input = format!("Before {phrase} after.");
            let out = sanitize_banned(&input);
            assert!(
                !out.to_lowercase().contains(phrase),
                "phrase '{phrase}' survived sanitization: {out}"
            );
        }
    }

    #[test]
    fn test_collapses_newlines_into_spaces() {
        let out = sanitize_banned("First paragraph.\n\nSecond paragraph.");
        assert_eq!(out, "First paragraph. Second paragraph.");
    }

    #[test]
    fn test_collapses_gap_left_by_removal() {
        let out = sanitize_banned("I shipped the feature and I am excited to do more.");
        assert_eq!(out, "I shipped the feature and to do more.");
    }

    #[test]
    fn test_clean_text_only_gets_whitespace_normalized() {
        let out = sanitize_banned("  I built a  parser.  ");
        assert_eq!(out, "I built a parser.");
    }

    #[test]
    fn test_phrase_at_start_and_end() {
        let out = sanitize_banned("thrilled to report: I debugged the scheduler and was thrilled");
        assert!(!out.to_lowercase().contains("thrilled"));
        assert!(out.contains("debugged the scheduler"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize_banned(""), "");
    }

    #[test]
    fn test_non_ascii_text_survives() {
        let out = sanitize_banned("I improved the café's ordering flow, not a thrilled rewrite.");
        assert!(out.contains("café's"));
        assert!(!out.to_lowercase().contains("thrilled"));
    }

    #[test]
    fn test_collapse_whitespace_tabs_and_crlf() {
        assert_eq!(collapse_whitespace("a\tb\r\nc"), "a b c");
    }
}
