//! Text primitives for template-shaped persona write-ups
//!
//! Everything here is best-effort: a miss is `None` or an empty list, never
//! an error. Inputs are expected to use `\n` line endings (see
//! [`normalize_newlines`]).

use once_cell::sync::Lazy;
use persona_model::Quote;
use pulldown_cmark::{Event, Parser, Tag};
use regex::Regex;
use std::borrow::Cow;
use std::ops::Range;

/// Source attributed to a quote with no explicit source clause
pub const DEFAULT_QUOTE_SOURCE: &str = "Interview";

/// Source attributed to content with no evidence notes
pub const DEFAULT_EVIDENCE_SOURCE: &str = "Interview data";

/// Any bold label: `**Label:**` or `**Label**:`
static BOLD_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*[^*\n]+(?::\*\*|\*\*:)").unwrap());

static EVIDENCE_NOTES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[*_]{0,2}evidence notes\b").unwrap());

static RULE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*-{3,}[ \t]*$").unwrap());

static HEADING_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*#{1,6}(?:[ \t]|$)").unwrap());

static NUMBERED_BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s").unwrap());

static QUOTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"(?m)["“]([^"”\n]+)["”][ \t]*[-–—][ \t]*"#,
        r"([^,\s][^,\n]*?)[ \t]*(?:,[ \t]*([^\n]*?))?[ \t]*$",
    ))
    .unwrap()
});

static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]*\n\s*").unwrap());

/// Convert `\r\n` line endings to `\n`
#[must_use]
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Collapse internal line breaks to single spaces and trim
#[must_use]
pub fn collapse_lines(text: &str) -> String {
    LINE_BREAK.replace_all(text.trim(), " ").into_owned()
}

/// Whether a line is a horizontal rule (`---`)
#[must_use]
pub fn is_rule(line: &str) -> bool {
    RULE_LINE.is_match(line)
}

/// Regex source matching `**{label}:**` or `**{label}**:`
fn label_pattern(label: &str) -> String {
    format!(
        r"\*\*[ \t]*{}[ \t]*(?::\*\*|\*\*[ \t]*:)",
        regex::escape(label.trim())
    )
}

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::debug!(pattern, error = %e, "label pattern rejected");
            None
        }
    }
}

/// Single-line value following a bold label, e.g. `**Type:** Partner`
///
/// Returns `None` if the label is absent. The value may be empty.
#[must_use]
pub fn labeled_value(text: &str, label: &str) -> Option<String> {
    let re = compile(&format!(r"(?mi){}[ \t]*(.*?)[ \t]*$", label_pattern(label)))?;
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Block structure needed for section isolation
///
/// Only `#` headings count; a `text\n---` pair is a paragraph followed by a
/// rule, not a setext heading. Lines inside code blocks are never boundaries.
#[derive(Debug, Default)]
struct Outline {
    /// Full source lines of ATX headings, in document order
    headings: Vec<Range<usize>>,
    code_blocks: Vec<Range<usize>>,
}

impl Outline {
    fn scan(text: &str) -> Self {
        let mut outline = Self::default();
        for (event, range) in Parser::new(text).into_offset_iter() {
            match event {
                Event::Start(Tag::Heading { .. }) => {
                    let line = line_around(text, range.start);
                    if text[line.clone()].trim_start().starts_with('#') {
                        outline.headings.push(line);
                    }
                }
                Event::Start(Tag::CodeBlock(_)) => outline.code_blocks.push(range),
                _ => {}
            }
        }
        outline
    }

    fn in_code(&self, offset: usize) -> bool {
        self.code_blocks.iter().any(|block| block.contains(&offset))
    }

    /// Offset of the first heading or rule line at or after `from`
    fn block_end(&self, text: &str, from: usize) -> usize {
        let next_heading = self
            .headings
            .iter()
            .map(|h| h.start)
            .find(|&start| start >= from)
            .unwrap_or(text.len());

        let mut offset = from;
        for line in text[from..next_heading].split_inclusive('\n') {
            if is_rule(line.trim_end_matches('\n')) && !self.in_code(offset) {
                return offset;
            }
            offset += line.len();
        }
        next_heading
    }
}

/// Byte range of the whole line containing `offset`, newline included
fn line_around(text: &str, offset: usize) -> Range<usize> {
    let start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
    let end = text[offset..]
        .find('\n')
        .map_or(text.len(), |i| offset + i + 1);
    start..end
}

/// Isolate the section under the first heading containing one of `keywords`
///
/// Keywords are tried in order and matched case-insensitively against
/// heading lines. The section runs from the line after the heading to the
/// next heading, horizontal rule or end of text, and is returned trimmed.
#[must_use]
pub fn isolate_section<'a>(text: &'a str, keywords: &[&str]) -> Option<&'a str> {
    let outline = Outline::scan(text);

    for keyword in keywords {
        let needle = keyword.to_lowercase();
        if needle.is_empty() {
            continue;
        }

        let found = outline
            .headings
            .iter()
            .find(|line| text[line.start..line.end].to_lowercase().contains(&needle));
        if let Some(heading) = found {
            let end = outline.block_end(text, heading.end);
            tracing::trace!(keyword, len = end - heading.end, "section isolated");
            return Some(text[heading.end..end].trim());
        }
    }

    tracing::trace!(?keywords, "no section heading matched");
    None
}

/// Offset where a labeled field's text stops: the next bold label, an
/// evidence-notes label, a rule, a heading, or the end of text
fn field_end(rest: &str) -> usize {
    [
        BOLD_LABEL.find(rest).map(|m| m.start()),
        EVIDENCE_NOTES.find(rest).map(|m| m.start()),
        RULE_LINE.find(rest).map(|m| m.start()),
        HEADING_LINE.find(rest).map(|m| m.start()),
    ]
    .into_iter()
    .flatten()
    .min()
    .unwrap_or(rest.len())
}

/// Raw text following `**{label}:**` up to the field boundary
fn field_block<'a>(section: &'a str, label: &str) -> Option<&'a str> {
    let re = compile(&format!("(?i){}", label_pattern(label)))?;
    let found = re.find(section)?;
    let rest = &section[found.end()..];
    Some(&rest[..field_end(rest)])
}

/// Text of a labeled field, with line breaks collapsed to spaces
///
/// Returns `None` when the label is missing or its text is empty.
#[must_use]
pub fn extract_field_content(section: &str, label: &str) -> Option<String> {
    let content = collapse_lines(field_block(section, label)?);
    (!content.is_empty()).then_some(content)
}

/// Bullet items of a labeled field
///
/// Returns `None` when the label is missing or carries no bullets.
#[must_use]
pub fn extract_list_field(section: &str, label: &str) -> Option<Vec<String>> {
    let items = extract_bullets(field_block(section, label)?);
    (!items.is_empty()).then_some(items)
}

/// Bullet items of a block
///
/// A line is a bullet if, once trimmed, it starts with `- `, `* ` or a
/// number followed by `. `. Markers are stripped and items trimmed; other
/// lines are ignored, so multi-line bullets keep only their first line.
#[must_use]
pub fn extract_bullets(block: &str) -> Vec<String> {
    block
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if let Some(item) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
                return Some(item.trim().to_string());
            }
            NUMBERED_BULLET
                .find(line)
                .map(|m| line[m.end()..].trim().to_string())
        })
        .filter(|item| !item.is_empty())
        .collect()
}

/// All attributed quotes in a block, e.g. `"It works" - Jane Doe, Interview #2`
///
/// Quotes without a source clause get [`DEFAULT_QUOTE_SOURCE`].
#[must_use]
pub fn extract_quotes(block: &str) -> Vec<Quote> {
    extract_quotes_with_default(block, DEFAULT_QUOTE_SOURCE)
}

/// Like [`extract_quotes`] with a custom default source
#[must_use]
pub fn extract_quotes_with_default(block: &str, default_source: &str) -> Vec<Quote> {
    QUOTE
        .captures_iter(block)
        .map(|caps| {
            let source = caps
                .get(3)
                .map(|m| m.as_str().trim())
                .filter(|s| !s.is_empty())
                .unwrap_or(default_source);
            Quote {
                text: caps[1].trim().to_string(),
                author: caps[2].trim().to_string(),
                source: source.to_string(),
            }
        })
        .collect()
}

/// Evidence-note bullets of a section joined with `"; "`
///
/// Returns `None` when there are no evidence notes or they hold no bullets.
#[must_use]
pub fn evidence_source(section: &str) -> Option<String> {
    let found = EVIDENCE_NOTES.find(section)?;
    let rest = &section[found.end()..];
    let rest = rest.find('\n').map_or("", |pos| &rest[pos + 1..]);

    let end = [
        BOLD_LABEL.find(rest).map(|m| m.start()),
        RULE_LINE.find(rest).map(|m| m.start()),
        HEADING_LINE.find(rest).map(|m| m.start()),
    ]
    .into_iter()
    .flatten()
    .min()
    .unwrap_or(rest.len());

    let notes = extract_bullets(&rest[..end]);
    (!notes.is_empty()).then(|| notes.join("; "))
}

/// Section text with any evidence-notes block removed
#[must_use]
pub fn strip_evidence_notes(section: &str) -> &str {
    match EVIDENCE_NOTES.find(section) {
        Some(found) => section[..found.start()].trim(),
        None => section.trim(),
    }
}

/// Parts of a "current solutions" section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    /// Narrative body
    pub content: String,
    /// Evidence attribution, if evidence notes were found
    pub source: Option<String>,
    /// Bullets under the gaps label
    pub gaps: Vec<String>,
}

/// Split a solution section into narrative, attribution and gaps
///
/// The narrative is the `narrative_label` field; without it, the whole
/// section minus its evidence notes.
#[must_use]
pub fn extract_solution(
    section: &str,
    narrative_label: &str,
    gaps_label: Option<&str>,
) -> Solution {
    let content = extract_field_content(section, narrative_label)
        .unwrap_or_else(|| collapse_lines(strip_evidence_notes(section)));
    let gaps = gaps_label
        .and_then(|label| extract_list_field(section, label))
        .unwrap_or_default();

    Solution {
        content,
        source: evidence_source(section),
        gaps,
    }
}
