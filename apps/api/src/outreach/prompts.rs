//! Prompt constants for the outreach email generation call.
//!
//! The directive mirrors the validator: every hard rule stated here is
//! enforced mechanically after parsing, so a model that follows the
//! prompt passes the gate on the first attempt.

use crate::outreach::lexicon::BANNED_PHRASES;

/// System directive template. `{banned_phrases}` is filled from the
/// lexicon so prompt and validator can never drift apart.
const EMAIL_SYSTEM_TEMPLATE: &str = r#"You write short cold emails for job applications. The reader is a busy engineer or hiring manager who deletes anything that smells like a template.

HARD RULES:
1. Body under 120 words, in 2-3 short paragraphs. No bullet points.
2. At most 3 factual claims, each backed by the resume context you are given.
3. Mention only skills that appear in the resume context.
4. Do not reuse the job description's wording.
5. Never use any of these phrases: {banned_phrases}.
6. No greeting line, no recipient name, no placeholders such as <Name>.
7. Do not add a signature or the candidate's name. That is appended later.
8. End the body with exactly: "Resume attached. Happy to share more details if useful."

OUTPUT FORMAT (exactly two sections, nothing else):
Subject: <short subject line>
Email Body:
<the body>"#;

/// Style guidance embedded in the user prompt.
const HUMANIZATION_RULES: &str = "\
- Vary sentence length; short is fine.
- Prefer concrete nouns and verbs over abstractions.
- One specific detail beats three vague ones.
- Read it back: if it sounds like a cover letter, rewrite it.";

/// Worked examples of the register to hit. Bodies only; the model must
/// not copy their facts.
const STYLE_EXAMPLES: &str = r#"Saw the platform engineer opening. I spent the last two years running the ingest pipeline at a logistics startup, where I moved our queue off RabbitMQ without dropping a message. The posting's focus on reliability is the part I want to work on.

Resume attached. Happy to share more details if useful.

---

Quick note about the backend role. I built the billing service at my current company, then spent six months debugging the tail latency it inherited. Most of that work was unglamorous profiling, which seems close to what this role needs.

Resume attached. Happy to share more details if useful.

---

Your data engineer posting mentions warehouse migrations. I led one last year, eighty tables and two painful weekends, and wrote the runbook we still use. I would rather do that again than talk about it in the abstract.

Resume attached. Happy to share more details if useful.

---

I noticed the search team is hiring. I shipped the typo-tolerant lookup at a marketplace startup and tested it against three months of query logs before launch. I can walk through what worked and what did not.

Resume attached. Happy to share more details if useful."#;

/// User prompt template. Replace `{context}` before sending; the other
/// slots are filled here.
const EMAIL_PROMPT_TEMPLATE: &str = r#"Write a cold outreach email for the job below, grounded only in the resume facts provided.

{context}

HUMANIZATION RULES:
{humanization_rules}

EXAMPLES OF THE REGISTER TO HIT (do not copy their facts):

{examples}

Write one new email now. Keep the "Subject:" line and the "Email Body:" marker."#;

/// Builds the system directive with the banned phrase list spliced in.
pub fn email_system() -> String {
    EMAIL_SYSTEM_TEMPLATE.replace("{banned_phrases}", &BANNED_PHRASES.join(", "))
}

/// Builds the user prompt around a rendered context block.
pub fn build_email_prompt(context: &str) -> String {
    EMAIL_PROMPT_TEMPLATE
        .replace("{humanization_rules}", HUMANIZATION_RULES)
        .replace("{examples}", STYLE_EXAMPLES)
        .replace("{context}", context)
}
