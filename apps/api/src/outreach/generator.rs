//! The generation attempt loop.
//!
//! Flow per attempt: complete → parse → sanitize → validate. Every
//! failure consumes one attempt, whether the model call died on the wire
//! or the draft failed a rule; after the third miss the last reason
//! surfaces to the caller. There is no feedback channel to the model
//! between attempts, a fresh sample at temperature is the whole strategy.

use tracing::{debug, warn};

use crate::errors::AppError;
use crate::llm_client::CompletionBackend;
use crate::models::job::JobDescriptor;
use crate::models::profile::ResumeProfile;
use crate::outreach::context::build_context;
use crate::outreach::parser::{parse_generated_email, Draft};
use crate::outreach::prompts::{build_email_prompt, email_system};
use crate::outreach::sanitizer::sanitize_banned;
use crate::outreach::validator::{validate_draft, Verdict};

/// Attempt budget for one generation request.
pub const MAX_ATTEMPTS: u32 = 3;
/// Fixed sampling temperature, low enough to stay grounded.
const TEMPERATURE: f32 = 0.4;
/// Output cap. A rule-compliant draft fits well under this.
const MAX_OUTPUT_TOKENS: u32 = 500;

/// Generates a validated draft, or fails with the last rejection reason
/// after the attempt budget runs out.
pub async fn generate_email(
    backend: &dyn CompletionBackend,
    profile: &ResumeProfile,
    jd: &JobDescriptor,
) -> Result<Draft, AppError> {
    let context = build_context(profile, jd);
    let prompt = build_email_prompt(&context);
    let system = email_system();

    let mut last_error = String::new();

    for attempt in 1..=MAX_ATTEMPTS {
        let raw = match backend
            .complete(&system, &prompt, TEMPERATURE, MAX_OUTPUT_TOKENS)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                warn!("Generation attempt {attempt}/{MAX_ATTEMPTS}: LLM call failed: {e}");
                last_error = e.to_string();
                continue;
            }
        };

        let mut draft = parse_generated_email(&raw);
        draft.subject = sanitize_banned(&draft.subject);
        draft.body = sanitize_banned(&draft.body);

        match validate_draft(&draft, profile, jd) {
            Verdict::Accept => {
                debug!("Draft accepted on attempt {attempt}");
                return Ok(draft);
            }
            Verdict::Reject(reason) => {
                warn!("Generation attempt {attempt}/{MAX_ATTEMPTS}: draft rejected: {reason}");
                last_error = reason;
            }
        }
    }

    Err(AppError::Generation(format!(
        "Failed to generate email after validation: {last_error}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::{ScriptedBackend, ScriptedReply};

    fn sample_profile() -> ResumeProfile {
        ResumeProfile {
            name: "Asha Rao".to_string(),
            current_title: "Backend Engineer".to_string(),
            summary: "Backend engineer working in Rust and Postgres.".to_string(),
            skills: vec!["Rust".to_string(), "Postgres".to_string()],
            experience: vec!["Built a billing pipeline in Rust handling 2M events/day".to_string()],
            projects: vec!["Shipped an open source rate limiter".to_string()],
            raw_text: String::new(),
        }
    }

    fn sample_jd() -> JobDescriptor {
        JobDescriptor {
            company: "Acme".to_string(),
            role: "Backend Engineer".to_string(),
            summary: "We need a backend engineer comfortable with distributed queues. \
                      You will own billing infrastructure."
                .to_string(),
            key_skills: vec!["Rust".to_string()],
            email: "jobs@acme.dev".to_string(),
            raw_text: String::new(),
        }
    }

    const GOOD_OUTPUT: &str = "Subject: Quick note about the backend role\nEmail Body:\n\
        I built a billing pipeline in Rust that handles two million events a day. At Acme \
        I would start with the queue work. Resume attached. Happy to share more details if useful.";

    const NO_CLOSING_OUTPUT: &str =
        "Subject: Hi\nEmail Body:\nI built a parser for invoices. It cut review time.";

    #[tokio::test]
    async fn test_accepts_valid_draft_on_first_attempt() {
        let backend = ScriptedBackend::new(vec![ScriptedReply::text(GOOD_OUTPUT)]);
        let draft = generate_email(&backend, &sample_profile(), &sample_jd())
            .await
            .unwrap();
        assert_eq!(draft.subject, "Quick note about the backend role");
        assert!(draft.body.starts_with("I built a billing pipeline"));
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_sanitizes_banned_phrase_before_validation() {
        let raw = "Subject: Quick note about the backend role\nEmail Body:\n\
            I built a billing pipeline in Rust at my current job, and I am excited every \
            day. Resume attached. Happy to share more details if useful.";
        let backend = ScriptedBackend::new(vec![ScriptedReply::text(raw)]);
        let draft = generate_email(&backend, &sample_profile(), &sample_jd())
            .await
            .unwrap();
        assert!(!draft.body.to_lowercase().contains("i am excited"));
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_retries_after_rejection_then_accepts() {
        let backend = ScriptedBackend::new(vec![
            ScriptedReply::text(NO_CLOSING_OUTPUT),
            ScriptedReply::text(GOOD_OUTPUT),
        ]);
        let draft = generate_email(&backend, &sample_profile(), &sample_jd())
            .await
            .unwrap();
        assert!(draft.body.contains("Resume attached."));
        assert_eq!(backend.call_count(), 2);
    }

    #[tokio::test]
    async fn test_client_errors_consume_attempts() {
        let backend = ScriptedBackend::new(vec![
            ScriptedReply::api_error(429, "rate limited"),
            ScriptedReply::api_error(500, "upstream fell over"),
            ScriptedReply::text(GOOD_OUTPUT),
        ]);
        let draft = generate_email(&backend, &sample_profile(), &sample_jd())
            .await
            .unwrap();
        assert_eq!(draft.subject, "Quick note about the backend role");
        assert_eq!(backend.call_count(), 3);
    }

    #[tokio::test]
    async fn test_empty_model_output_consumes_attempt() {
        let backend = ScriptedBackend::new(vec![
            ScriptedReply::text(""),
            ScriptedReply::text(GOOD_OUTPUT),
        ]);
        let draft = generate_email(&backend, &sample_profile(), &sample_jd())
            .await
            .unwrap();
        assert!(!draft.body.is_empty());
        assert_eq!(backend.call_count(), 2);
    }

    #[tokio::test]
    async fn test_exhaustion_surfaces_last_reason_after_three_attempts() {
        let placeholder_output = "Subject: Hi\nEmail Body:\nHi <Name>, I built a parser \
            last month. Resume attached. Happy to share more details if useful.";
        let generic_output = "Subject: Hi\nEmail Body:\nI am writing to apply for this \
            role. Resume attached. Happy to share more details if useful.";
        let backend = ScriptedBackend::new(vec![
            ScriptedReply::text(NO_CLOSING_OUTPUT),
            ScriptedReply::text(generic_output),
            ScriptedReply::text(placeholder_output),
        ]);

        let err = generate_email(&backend, &sample_profile(), &sample_jd())
            .await
            .unwrap_err();

        assert_eq!(backend.call_count(), 3);
        match err {
            AppError::Generation(message) => {
                assert_eq!(
                    message,
                    "Failed to generate email after validation: Contains placeholder or \
                     signature markers"
                );
            }
            other => panic!("expected Generation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_all_transport_failures_surface_last_client_error() {
        let backend = ScriptedBackend::new(vec![
            ScriptedReply::api_error(500, "boom"),
            ScriptedReply::api_error(500, "boom"),
            ScriptedReply::api_error(503, "maintenance"),
        ]);
        let err = generate_email(&backend, &sample_profile(), &sample_jd())
            .await
            .unwrap_err();
        assert_eq!(backend.call_count(), 3);
        match err {
            AppError::Generation(message) => {
                assert!(message.starts_with("Failed to generate email after validation:"));
                assert!(message.contains("status 503"));
                assert!(message.contains("maintenance"));
            }
            other => panic!("expected Generation error, got {other:?}"),
        }
    }
}
