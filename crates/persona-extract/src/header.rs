//! Persona header fields: title, classification and numeric scores
//!
//! Each function returns `None` when nothing recognisable is found; the
//! extractor decides the default.

use crate::text::labeled_value;
use once_cell::sync::Lazy;
use persona_model::{PersonaType, ValidationStatus};
use regex::Regex;

static PERSONA_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mi)^[ \t]*#{1,6}[ \t]*persona:[ \t]*(.*?)[ \t]*$").unwrap());

static TOP_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#[ \t]+(.*?)[ \t]*$").unwrap());

static EXAMPLE_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^example:[ \t]*").unwrap());

static VALIDATED_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(not[ \t]+(?:yet[ \t]+)?)?validated\b").unwrap());

static SCORE_LABELED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)score[:\s]+(\d)").unwrap());

static SCORE_OUT_OF_FIVE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d)\s*/\s*5").unwrap());

static INTERVIEW_COUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s+interview").unwrap());

/// Title used when no name marker is found
pub const UNKNOWN_PERSONA: &str = "Unknown Persona";

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Persona name
///
/// Tries, in order: a `Persona: NAME` heading, a `**Name:**` field, then a
/// top-level `# TITLE` heading with any leading `Example:` removed.
#[must_use]
pub fn extract_title(text: &str) -> Option<String> {
    if let Some(name) = PERSONA_HEADING
        .captures(text)
        .and_then(|caps| non_empty(&caps[1]))
    {
        return Some(name);
    }

    if let Some(name) = labeled_value(text, "Name").and_then(|v| non_empty(&v)) {
        return Some(name);
    }

    TOP_HEADING
        .captures(text)
        .and_then(|caps| non_empty(&EXAMPLE_PREFIX.replace(&caps[1], "")))
}

/// Persona type by keyword anywhere in the text
///
/// Keywords are checked in [`PersonaType::ALL`] order and the first hit wins,
/// so a bio mentioning "partner" beats a `**Type:** Stakeholder` line.
#[must_use]
pub fn detect_persona_type(text: &str) -> Option<PersonaType> {
    let haystack = text.to_lowercase();

    PersonaType::ALL
        .into_iter()
        .find(|t| haystack.contains(t.as_str()))
}

/// Validation status from the `**Validation Status:**` line only
#[must_use]
pub fn parse_validation_status(text: &str) -> Option<ValidationStatus> {
    classify_status(&labeled_value(text, "Validation Status")?)
}

/// Classify a validation status line
///
/// Rules in order:
/// 1. "validated" not preceded by "not" maps to validated
/// 2. "inferred" or "not yet validated" maps to inferred
/// 3. "hybrid" or "partial" maps to hybrid
/// 4. a bare "not validated" maps to inferred
#[must_use]
pub fn classify_status(line: &str) -> Option<ValidationStatus> {
    let line = line.to_lowercase();

    let mut negated = false;
    let mut not_yet = false;
    for caps in VALIDATED_WORD.captures_iter(&line) {
        match caps.get(1) {
            None => return Some(ValidationStatus::Validated),
            Some(prefix) => {
                negated = true;
                not_yet |= prefix.as_str().contains("yet");
            }
        }
    }

    if not_yet || line.contains("inferred") {
        Some(ValidationStatus::Inferred)
    } else if line.contains("hybrid") || line.contains("partial") {
        Some(ValidationStatus::Hybrid)
    } else if negated {
        Some(ValidationStatus::Inferred)
    } else {
        None
    }
}

/// Quality score: `score: N` / `Score N`, else `N/5`
#[must_use]
pub fn extract_quality_score(text: &str) -> Option<i32> {
    SCORE_LABELED
        .captures(text)
        .or_else(|| SCORE_OUT_OF_FIVE.captures(text))
        .and_then(|caps| caps[1].parse().ok())
}

/// Interview count: the number before the first "interview"
#[must_use]
pub fn extract_interview_count(text: &str) -> Option<u32> {
    INTERVIEW_COUNT
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
}

/// Subtitle: `**Subtitle:**`, else `**Geographic Context:**`
#[must_use]
pub fn extract_subtitle(text: &str) -> Option<String> {
    labeled_value(text, "Subtitle")
        .and_then(|v| non_empty(&v))
        .or_else(|| labeled_value(text, "Geographic Context").and_then(|v| non_empty(&v)))
}

/// Evidence summary: `**Evidence Summary:**`, else `**Sources:**`
#[must_use]
pub fn extract_evidence_summary(text: &str) -> Option<String> {
    labeled_value(text, "Evidence Summary")
        .and_then(|v| non_empty(&v))
        .or_else(|| labeled_value(text, "Sources").and_then(|v| non_empty(&v)))
}
