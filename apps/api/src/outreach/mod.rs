// Outreach engine: context building, generation, sanitization, rule-based
// validation, and final composition.
// All LLM calls go through llm_client; no direct Anthropic calls here.

pub mod composer;
pub mod context;
pub mod generator;
pub mod handlers;
pub mod lexicon;
pub mod parser;
pub mod prompts;
pub mod sanitizer;
pub mod validator;
