//! Builds the compact context block handed to the generation prompt.
//!
//! Deliberately small: company, role, the JD summary cut to three
//! sentences, one resume summary line and at most two concrete
//! highlights. Feeding the model less than everything is what keeps the
//! drafts short and specific.

use crate::models::job::JobDescriptor;
use crate::models::profile::ResumeProfile;

const MAX_JD_SENTENCES: usize = 3;
const MAX_HIGHLIGHTS: usize = 2;

/// Renders the context block for one profile/job pairing.
pub fn build_context(profile: &ResumeProfile, jd: &JobDescriptor) -> String {
    let jd_summary = clipped_jd_summary(&jd.summary);

    let resume_summary = if !profile.summary.is_empty() {
        profile.summary.trim()
    } else if !profile.current_title.is_empty() {
        profile.current_title.trim()
    } else {
        ""
    };

    let highlights = select_highlights(profile);
    let highlight_block = if highlights.is_empty() {
        "- ".to_string()
    } else {
        highlights
            .iter()
            .map(|line| format!("- {line}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "Company Name: {}\nRole Title: {}\n\nJD Summary:\n{}\n\nResume Summary:\n{}\n\nRelevant Resume Highlights:\n{}\n",
        jd.company, jd.role, jd_summary, resume_summary, highlight_block
    )
}

/// First three sentences of the JD summary, terminal punctuation kept.
fn clipped_jd_summary(summary: &str) -> String {
    let raw = summary.trim();
    split_sentences(raw)
        .into_iter()
        .take(MAX_JD_SENTENCES)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Splits on `.`, `!` or `?` followed by whitespace, keeping the
/// punctuation with its sentence. Unterminated trailing text is its own
/// segment.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, ch)) = chars.next() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        let Some(&(break_idx, next_ch)) = chars.peek() else {
            continue;
        };
        if !next_ch.is_whitespace() {
            continue;
        }
        segments.push(&text[start..break_idx]);
        start = break_idx;
        while let Some(&(idx, ws)) = chars.peek() {
            if ws.is_whitespace() {
                start = idx + ws.len_utf8();
                chars.next();
            } else {
                start = idx;
                break;
            }
        }
    }

    if start < text.len() {
        segments.push(&text[start..]);
    }
    segments
}

/// Up to two non-blank highlights: experience entries first, then
/// projects if experience came up short.
fn select_highlights(profile: &ResumeProfile) -> Vec<String> {
    let mut highlights: Vec<String> = Vec::new();

    for block in &profile.experience {
        if highlights.len() >= MAX_HIGHLIGHTS {
            break;
        }
        let trimmed = block.trim();
        if !trimmed.is_empty() {
            highlights.push(trimmed.to_string());
        }
    }

    if highlights.len() < MAX_HIGHLIGHTS {
        for block in &profile.projects {
            if highlights.len() >= MAX_HIGHLIGHTS {
                break;
            }
            let trimmed = block.trim();
            if !trimmed.is_empty() {
                highlights.push(trimmed.to_string());
            }
        }
    }

    highlights
}
