// Intake endpoints: structured resume profiles and job descriptions.
// PDF extraction happens upstream; these accept already-structured records.

pub mod handlers;
