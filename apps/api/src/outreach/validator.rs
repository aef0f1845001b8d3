//! The acceptance gate for generated drafts.
//!
//! Fourteen deterministic rules run in a fixed order and short-circuit on
//! the first failure, so each rejection carries exactly one reason and the
//! retry loop sees stable, comparable feedback across attempts.
//!
//! Scoping: phrase rules (banned, generic, adjective balance, JD overlap,
//! grounding) scan subject, body and signature joined by newlines; the
//! structural rules look at the body alone. The final empty-body rule is a
//! backstop only, since an empty body already fails the closing-line rule.

use std::collections::HashSet;

use crate::models::job::JobDescriptor;
use crate::models::profile::ResumeProfile;
use crate::outreach::lexicon::{
    BANNED_PHRASES, BUZZWORD_ADJECTIVES, CONCRETE_VERBS, GENERIC_TEMPLATES, NOUN_SUFFIXES,
    REQUIRED_CLOSING, RESUME_SUMMARY_MARKERS,
};
use crate::outreach::parser::Draft;

const MAX_BODY_WORDS: usize = 120;
const MAX_CLAIMS: usize = 3;
const MAX_SENTENCES: usize = 6;
const JD_OVERLAP_LIMIT: f64 = 0.6;

/// Outcome of the acceptance gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    /// Reason from the first rule that failed, in rule order.
    Reject(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Acceptance gate
// ────────────────────────────────────────────────────────────────────────────

/// Runs every rule against the draft and returns the first failure, if any.
pub fn validate_draft(draft: &Draft, profile: &ResumeProfile, jd: &JobDescriptor) -> Verdict {
    let body = draft.body.as_str();
    let full_text = format!("{}\n{}\n{}", draft.subject, draft.body, draft.signature);
    let full_lower = full_text.to_lowercase();
    let body_lower = body.to_lowercase();

    // 1. Length cap
    if word_count(body) > MAX_BODY_WORDS {
        return Verdict::Reject("Word count exceeds 120".to_string());
    }

    // 2. Claim density
    if count_claims(body) > MAX_CLAIMS {
        return Verdict::Reject("Too many claims".to_string());
    }

    // 3. Banned phrases, subject and signature included
    for phrase in BANNED_PHRASES {
        if full_lower.contains(phrase) {
            return Verdict::Reject(format!("Contains banned phrase: {phrase}"));
        }
    }

    // 4. Stock template phrasing
    for phrase in GENERIC_TEMPLATES {
        if full_lower.contains(phrase) {
            return Verdict::Reject(format!("Generic template language detected: {phrase}"));
        }
    }

    // 5. Adjective/verb balance
    if adjective_heavy(&full_text) {
        return Verdict::Reject("Too many adjectives vs verbs".to_string());
    }

    // 6. Noun density
    if noun_heavy(body) {
        return Verdict::Reject("Too noun-heavy vs verbs".to_string());
    }

    // 7. Pasted resume summary
    if looks_like_resume_summary(body) {
        return Verdict::Reject("Reads like a resume summary".to_string());
    }

    // 8. JD parroting
    if repeats_jd_language(&full_text, &jd.summary) {
        return Verdict::Reject("Repeats JD language too closely".to_string());
    }

    // 9. Grounding: claimed skills must appear in the resume
    if let Some(skill) = find_unbacked_skill(&full_lower, profile, jd) {
        return Verdict::Reject(format!("Mentions skill not in resume: {skill}"));
    }

    // 10. Bullet formatting
    if contains_bullets(body) {
        return Verdict::Reject("Contains bullet points".to_string());
    }

    // 11. Placeholder and signature leakage
    if body_lower.contains("<name") || body_lower.contains("signature:") {
        return Verdict::Reject("Contains placeholder or signature markers".to_string());
    }

    // 12. Required closing line
    if !body_lower.contains(REQUIRED_CLOSING) {
        return Verdict::Reject("Missing required closing line".to_string());
    }

    // 13. Paragraph shape
    let sentences = sentence_count(body);
    if sentences == 0 || sentences > MAX_SENTENCES {
        return Verdict::Reject(
            "Paragraph structure not in expected 2-3 short paragraphs".to_string(),
        );
    }

    // 14. Empty body backstop
    if body.trim().is_empty() {
        return Verdict::Reject("Empty email body".to_string());
    }

    Verdict::Accept
}

// ────────────────────────────────────────────────────────────────────────────
// Rule helpers
// ────────────────────────────────────────────────────────────────────────────

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Lowercased alphabetic words, apostrophes allowed ("i've", "don't").
fn alpha_words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_ascii_alphabetic() && c != '\'')
        .filter(|word| !word.is_empty())
        .map(|word| word.to_ascii_lowercase())
}

/// A claim is a sentence-like chunk containing at least one concrete verb.
fn count_claims(body: &str) -> usize {
    body.split(['.', '!', '?'])
        .filter(|chunk| alpha_words(chunk).any(|word| CONCRETE_VERBS.contains(&word.as_str())))
        .count()
}

fn sentence_count(body: &str) -> usize {
    body.split(['.', '!', '?'])
        .filter(|chunk| !chunk.trim().is_empty())
        .count()
}

/// More than `max(verbs, 1) + 2` buzzword adjectives reads as fluff.
/// Words ending in "ive" count as adjectives even off the blocklist.
fn adjective_heavy(text: &str) -> bool {
    let mut adjectives = 0usize;
    let mut verbs = 0usize;
    for token in text.split_whitespace() {
        let word = token
            .trim_matches(|c: char| ".,!?:;()[]{}\"'".contains(c))
            .to_lowercase();
        if BUZZWORD_ADJECTIVES.contains(&word.as_str()) || word.ends_with("ive") {
            adjectives += 1;
        }
        if CONCRETE_VERBS.contains(&word.as_str()) {
            verbs += 1;
        }
    }
    adjectives > verbs.max(1) + 2
}

/// Nominalization pileup: suffix-derived nouns outnumbering verbs badly.
fn noun_heavy(body: &str) -> bool {
    let words: Vec<String> = alpha_words(body).collect();
    if words.is_empty() {
        return false;
    }
    let verbs = words
        .iter()
        .filter(|word| CONCRETE_VERBS.contains(&word.as_str()))
        .count();
    let nouns = words
        .iter()
        .filter(|word| NOUN_SUFFIXES.iter().any(|suffix| word.ends_with(suffix)))
        .count();
    nouns > verbs * 2 + 2
}

/// Marker substring anywhere, or a comma-stacked verbless first line.
fn looks_like_resume_summary(body: &str) -> bool {
    let lowered = body.to_lowercase();
    if RESUME_SUMMARY_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
    {
        return true;
    }

    let first_line = body.lines().next().unwrap_or("");
    let has_verb = first_line
        .to_lowercase()
        .split_whitespace()
        .any(|word| CONCRETE_VERBS.contains(&word));
    first_line.matches(',').count() >= 2 && !has_verb
}

/// Word-set overlap against the JD summary. Blank summaries skip the rule.
fn repeats_jd_language(email_text: &str, jd_summary: &str) -> bool {
    if jd_summary.trim().is_empty() {
        return false;
    }
    let email_words: HashSet<String> = long_alpha_words(email_text).collect();
    let jd_words: HashSet<String> = long_alpha_words(jd_summary).collect();
    if jd_words.is_empty() {
        return false;
    }
    let overlap = email_words.intersection(&jd_words).count();
    overlap as f64 / jd_words.len() as f64 > JD_OVERLAP_LIMIT
}

/// Words of four or more letters, the signal band for shared vocabulary.
fn long_alpha_words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_ascii_alphabetic())
        .filter(|word| word.len() >= 4)
        .map(|word| word.to_ascii_lowercase())
}

/// First JD key skill mentioned in the email but absent from the resume
/// corpus, returned in its original casing for the rejection reason.
fn find_unbacked_skill(
    email_lower: &str,
    profile: &ResumeProfile,
    jd: &JobDescriptor,
) -> Option<String> {
    let corpus = profile.corpus();
    for skill in &jd.key_skills {
        let needle = skill.trim().to_lowercase();
        if needle.is_empty() {
            continue;
        }
        if email_lower.contains(&needle) && !corpus.contains(&needle) {
            return Some(skill.clone());
        }
    }
    None
}

fn contains_bullets(body: &str) -> bool {
    body.lines().any(|line| {
        let stripped = line.trim_start();
        stripped.starts_with('-') || stripped.starts_with('*') || stripped.starts_with('•')
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
