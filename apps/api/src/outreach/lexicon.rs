//! Fixed vocabularies shared by the sanitizer and the validator.
//!
//! All entries are lowercase; matchers lowercase their input before
//! comparing. Keep it that way when editing these tables.

/// Phrases that are stripped from drafts and rejected if they survive.
pub const BANNED_PHRASES: &[&str] = &[
    "solid background",
    "hands-on experience",
    "extensive experience",
    "proven track record",
    "passionate about",
    "dynamic environment",
    "full software lifecycle",
    "aligns well",
    "enhancing user experience",
    "saas environment",
    "i am excited",
    "thrilled",
    "dear hiring manager",
    "to whom it may concern",
];

/// Stock cover-letter phrasing. Any hit rejects the draft outright.
pub const GENERIC_TEMPLATES: &[&str] = &[
    "i am writing to apply",
    "i'm writing to apply",
    "please find my resume attached",
    "my resume is attached for your review",
    "thank you for your time and consideration",
    "i believe i am a great fit",
    "with x years of experience",
];

/// Self-praise adjectives counted against the adjective/verb balance.
pub const BUZZWORD_ADJECTIVES: &[&str] = &[
    "innovative",
    "dynamic",
    "motivated",
    "driven",
    "dedicated",
    "hardworking",
    "detail-oriented",
    "collaborative",
    "strategic",
    "proactive",
    "fast-paced",
];

/// Concrete action verbs. These mark claims and offset adjective/noun weight.
pub const CONCRETE_VERBS: &[&str] = &[
    "built",
    "shipped",
    "designed",
    "implemented",
    "led",
    "owned",
    "delivered",
    "debugged",
    "refactored",
    "scaled",
    "optimized",
    "deployed",
    "maintained",
    "improved",
    "integrated",
    "tested",
    "reviewed",
    "applied",
    "integrating",
    "experimented",
];

/// Markers that expose a pasted resume summary instead of a written email.
pub const RESUME_SUMMARY_MARKERS: &[&str] = &[
    "professional summary",
    "summary",
    "experience includes",
    "years of experience",
    "proven track record",
];

/// Nominalizing suffixes used by the noun-density check.
pub const NOUN_SUFFIXES: &[&str] = &["ion", "ment", "ness", "ity", "ence", "ance", "ism"];

/// Every accepted email must contain this line (compared lowercased).
pub const REQUIRED_CLOSING: &str = "resume attached. happy to share more details if useful.";
