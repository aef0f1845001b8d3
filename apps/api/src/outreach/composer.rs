//! End-to-end composition: recipient resolution, generation, subject
//! fallback, signature.
//!
//! The recipient is resolved before any model call so a missing address
//! fails fast instead of burning the attempt budget. The signature is
//! appended after validation; the model never writes the sign-off.

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::CompletionBackend;
use crate::models::email::EmailMessage;
use crate::models::job::JobDescriptor;
use crate::models::profile::ResumeProfile;
use crate::outreach::generator::generate_email;

/// Composes a complete outreach email for one profile/job pairing.
pub async fn compose_email(
    backend: &dyn CompletionBackend,
    profile: &ResumeProfile,
    jd: &JobDescriptor,
    recipient: Option<&str>,
    sender: &str,
) -> Result<EmailMessage, AppError> {
    let jd = jd.normalized();

    // Explicit recipient wins; blank falls back to the posting's contact.
    let to = match recipient {
        Some(address) if !address.trim().is_empty() => address.trim().to_string(),
        _ => jd.email.clone(),
    };
    if to.is_empty() {
        return Err(AppError::Validation(
            "No recipient email found. Provide one in the request or include a contact \
             email in the job description."
                .to_string(),
        ));
    }

    let draft = generate_email(backend, profile, &jd).await?;

    let subject = if !draft.subject.trim().is_empty() {
        draft.subject.trim().to_string()
    } else if !jd.role.is_empty() {
        format!("Application – {}", jd.role)
    } else {
        "Application – This Role".to_string()
    };

    let mut body = draft.body.trim().to_string();
    let name = profile.name.trim();
    if !name.is_empty() {
        body.push_str(&format!("\n\nThanks,\n{name}"));
    }

    info!(
        "Composed outreach email to {to} for role '{}' at '{}'",
        jd.role, jd.company
    );

    Ok(EmailMessage {
        subject,
        body,
        from: sender.to_string(),
        to,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::{ScriptedBackend, ScriptedReply};

    const SENDER: &str = "asha@example.dev";

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

    const VALID_BODY: &str = "I built a billing pipeline in Rust that handles two million \
        events a day. At Acme I would start with the queue work. Resume attached. Happy to \
        share more details if useful.";

    fn full_output() -> String {
        format!("Subject: Quick note about the backend role\nEmail Body:\n{VALID_BODY}")
    }

    fn subjectless_output() -> String {
        format!("Email Body:\n{VALID_BODY}")
    }

    #[tokio::test]
    async fn test_composes_message_with_model_subject() {
        let backend = ScriptedBackend::new(vec![ScriptedReply::text(full_output())]);
        let message = compose_email(&backend, &sample_profile(), &sample_jd(), None, SENDER)
            .await
            .unwrap();
        assert_eq!(message.subject, "Quick note about the backend role");
        assert_eq!(message.from, SENDER);
        assert_eq!(message.to, "jobs@acme.dev");
    }

    #[tokio::test]
    async fn test_subject_falls_back_to_role() {
        let backend = ScriptedBackend::new(vec![ScriptedReply::text(subjectless_output())]);
        let message = compose_email(&backend, &sample_profile(), &sample_jd(), None, SENDER)
            .await
            .unwrap();
        assert_eq!(message.subject, "Application – Backend Engineer");
    }

    #[tokio::test]
    async fn test_subject_fallback_without_role() {
        let jd = JobDescriptor {
            role: "   ".to_string(),
            ..sample_jd()
        };
        let backend = ScriptedBackend::new(vec![ScriptedReply::text(subjectless_output())]);
        let message = compose_email(&backend, &sample_profile(), &jd, None, SENDER)
            .await
            .unwrap();
        assert_eq!(message.subject, "Application – This Role");
    }

    #[tokio::test]
    async fn test_signature_appended_when_profile_has_name() {
        let backend = ScriptedBackend::new(vec![ScriptedReply::text(full_output())]);
        let message = compose_email(&backend, &sample_profile(), &sample_jd(), None, SENDER)
            .await
            .unwrap();
        assert!(message.body.ends_with("\n\nThanks,\nAsha Rao"));
    }

    #[tokio::test]
    async fn test_no_signature_when_name_is_empty() {
        let profile = ResumeProfile {
            name: String::new(),
            ..sample_profile()
        };
        let backend = ScriptedBackend::new(vec![ScriptedReply::text(full_output())]);
        let message = compose_email(&backend, &profile, &sample_jd(), None, SENDER)
            .await
            .unwrap();
        assert!(!message.body.contains("Thanks,"));
        assert!(message.body.ends_with("if useful."));
    }

    #[tokio::test]
    async fn test_explicit_recipient_wins_over_jd_contact() {
        let backend = ScriptedBackend::new(vec![ScriptedReply::text(full_output())]);
        let message = compose_email(
            &backend,
            &sample_profile(),
            &sample_jd(),
            Some("cto@acme.dev"),
            SENDER,
        )
        .await
        .unwrap();
        assert_eq!(message.to, "cto@acme.dev");
    }

    #[tokio::test]
    async fn test_blank_recipient_falls_back_to_jd_contact() {
        let backend = ScriptedBackend::new(vec![ScriptedReply::text(full_output())]);
        let message = compose_email(
            &backend,
            &sample_profile(),
            &sample_jd(),
            Some("   "),
            SENDER,
        )
        .await
        .unwrap();
        assert_eq!(message.to, "jobs@acme.dev");
    }

    #[tokio::test]
    async fn test_no_recipient_fails_before_any_model_call() {
        let jd = JobDescriptor {
            email: String::new(),
            ..sample_jd()
        };
        let backend = ScriptedBackend::new(vec![]);
        let err = compose_email(&backend, &sample_profile(), &jd, None, SENDER)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_generation_exhaustion_propagates() {
        let bad = "Subject: Hi\nEmail Body:\nNo closing line here at all.";
        let backend = ScriptedBackend::new(vec![
            ScriptedReply::text(bad),
            ScriptedReply::text(bad),
            ScriptedReply::text(bad),
        ]);
        let err = compose_email(&backend, &sample_profile(), &sample_jd(), None, SENDER)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Generation(_)));
        assert_eq!(backend.call_count(), 3);
    }

    #[tokio::test]
    async fn test_end_to_end_retry_then_full_message() {
        let no_closing = "Subject: Hi\nEmail Body:\nI built a parser for invoices. It cut \
                          review time.";
        let backend = ScriptedBackend::new(vec![
            ScriptedReply::text(no_closing),
            ScriptedReply::text(full_output()),
        ]);

        let message = compose_email(&backend, &sample_profile(), &sample_jd(), None, SENDER)
            .await
            .unwrap();

        assert_eq!(backend.call_count(), 2);
        assert_eq!(message.subject, "Quick note about the backend role");
        assert_eq!(message.to, "jobs@acme.dev");
        assert_eq!(message.from, SENDER);
        assert!(message.body.starts_with("I built a billing pipeline"));
        assert!(message
            .body
            .contains("Resume attached. Happy to share more details if useful."));
        assert!(message.body.ends_with("\n\nThanks,\nAsha Rao"));
    }
}
