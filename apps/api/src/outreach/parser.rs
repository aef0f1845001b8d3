//! Parses raw model output into a structured draft.
//!
//! The model is instructed to answer with `Subject:` and `Email Body:`
//! sections, but output drifts; the parser is a forgiving line state
//! machine with a whole-text fallback for marker-free replies. Malformed
//! output never errors here — a hollow draft is the validator's problem.

/// One candidate email as parsed from model output.
///
/// `signature` is always empty at this stage; the composer appends one
/// after validation so the model never controls the sign-off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub subject: String,
    pub body: String,
    pub signature: String,
}

/// Extracts subject and body from raw model output.
///
/// Rules, in line order:
/// - a line starting with `subject:` (any case) sets the subject to the
///   text after the first colon and exits body mode
/// - a line starting with `email body:` (any case) enters body mode
/// - while in body mode, lines are collected verbatim
///
/// If no body was collected and the text is non-blank, every line except
/// the two marker kinds becomes the body.
pub fn parse_generated_email(text: &str) -> Draft {
    let mut subject = String::new();
    let mut body_lines: Vec<&str> = Vec::new();
    let mut in_body = false;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        let lower = line.to_lowercase();

        if lower.starts_with("subject:") {
            subject = line.splitn(2, ':').nth(1).unwrap_or("").trim().to_string();
            in_body = false;
            continue;
        }
        if lower.starts_with("email body:") {
            in_body = true;
            continue;
        }
        if in_body {
            body_lines.push(raw_line);
        }
    }

    let mut body = body_lines.join("\n").trim().to_string();

    if body.is_empty() && !text.trim().is_empty() {
        let kept: Vec<&str> = text
            .lines()
            .filter(|raw_line| {
                let lower = raw_line.trim().to_lowercase();
                !lower.starts_with("subject:") && !lower.starts_with("email body:")
            })
            .collect();
        body = kept.join("\n").trim().to_string();
    }

    Draft {
        subject,
        body,
        signature: String::new(),
    }
}
