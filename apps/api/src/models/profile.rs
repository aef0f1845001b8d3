//! Candidate profile record.

use serde::{Deserialize, Serialize};

use crate::models::strip_list;

/// Structured resume data for one candidate.
///
/// Every field is optional on intake: missing JSON fields deserialize to
/// empty strings and lists, so downstream code never branches on absence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeProfile {
    pub name: String,
    pub current_title: String,
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub projects: Vec<String>,
    /// Full resume text as supplied. Only consulted by the blank-source
    /// check; the grounding corpus uses the structured fields.
    pub raw_text: String,
}

impl ResumeProfile {
    /// Returns a copy with every string trimmed and blank list entries dropped.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            current_title: self.current_title.trim().to_string(),
            summary: self.summary.trim().to_string(),
            skills: strip_list(&self.skills),
            experience: strip_list(&self.experience),
            projects: strip_list(&self.projects),
            raw_text: self.raw_text.trim().to_string(),
        }
    }

    /// True when the record carries no usable content at all.
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
            && self.current_title.trim().is_empty()
            && self.summary.trim().is_empty()
            && self.raw_text.trim().is_empty()
            && [&self.skills, &self.experience, &self.projects]
                .iter()
                .all(|list| list.iter().all(|item| item.trim().is_empty()))
    }

    /// Lowercased concatenation of everything the candidate can back up.
    ///
    /// The grounding rule checks claimed skills against this text, so the
    /// field order (summary, title, name, then the lists) is part of the
    /// contract only insofar as every field must be present.
    pub fn corpus(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        for field in [&self.summary, &self.current_title, &self.name] {
            if !field.is_empty() {
                parts.push(field);
            }
        }
        parts.extend(self.skills.iter().map(String::as_str));
        parts.extend(self.experience.iter().map(String::as_str));
        parts.extend(self.projects.iter().map(String::as_str));
        parts.join(" \n").to_lowercase()
    }
}
