//! Parsing pipeline for generated text
//!
//! raw text → [`split_sections`] → [`LineClassifier`] per line of the graph
//! section → [`GraphBuilder`] → [`ParsedDocument`]. Detail and question
//! sections are split per level alongside.
//!
//! Malformed lines are dropped locally and reported in [`ParseReport`];
//! only a missing required delimiter or an empty graph section fails the
//! whole parse.

mod details;
mod error;
mod grammar;
mod line;
mod section;

pub use details::LevelTexts;
pub use error::{GrammarError, ParseError, ParseResult};
pub use grammar::{CategorySpec, Grammar, SectionKind, SectionSpec};
pub use line::{ClassifiedLine, LineClassifier, LineOutcome, SkipReason};
pub use section::{split_sections, Section, Sections};

use crate::graph::{Graph, GraphBuilder, NodeId, Upsert};
use tracing::debug;

/// A line dropped from a graph section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub section: String,
    /// 1-based line number within the section body
    pub line: usize,
    pub reason: SkipReason,
}

/// Informational findings from one parse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub skipped: Vec<SkippedLine>,
    /// Entries whose label overwrote an earlier one
    pub replaced: usize,
    /// Optional sections absent from the text
    pub missing_sections: Vec<String>,
}

/// Everything extracted from one raw text
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub graph: Graph,
    pub details: LevelTexts,
    pub questions: LevelTexts,
    pub report: ParseReport,
}

/// Parse raw generated text into a graph centred on `center`.
pub fn parse_document(
    text: &str,
    center: impl Into<NodeId>,
    grammar: &Grammar,
) -> ParseResult<ParsedDocument> {
    let sections = split_sections(text, &grammar.sections)?;
    let classifier = LineClassifier::new(grammar);
    let mut builder = GraphBuilder::new(center);
    let mut report = ParseReport {
        missing_sections: sections.missing.clone(),
        ..Default::default()
    };
    let mut details = LevelTexts::default();
    let mut questions = LevelTexts::default();

    for section in sections.iter() {
        match section.kind {
            SectionKind::Graph => {
                for (i, raw) in section.body.lines().enumerate() {
                    let reason = match classifier.classify(raw) {
                        LineOutcome::Entry(entry) => {
                            let route = grammar.route(&entry.category);
                            match builder.upsert(entry.label, entry.category, entry.description, route) {
                                Upsert::Inserted => continue,
                                Upsert::Replaced => {
                                    report.replaced += 1;
                                    continue;
                                }
                                Upsert::ReservedLabel => SkipReason::ReservedLabel,
                            }
                        }
                        LineOutcome::Skipped(SkipReason::Blank) => continue,
                        LineOutcome::Skipped(reason) => reason,
                    };
                    debug!(section = %section.name, line = i + 1, %reason, "skipping line");
                    report.skipped.push(SkippedLine {
                        section: section.name.clone(),
                        line: i + 1,
                        reason,
                    });
                }
                if builder.is_empty() {
                    return Err(ParseError::EmptySection {
                        section: section.name.clone(),
                    });
                }
            }
            SectionKind::Detail => match &section.level {
                Some(level) => details.append(level, &section.body),
                None => {
                    let parsed = LevelTexts::split_tagged(&section.body, grammar);
                    for level in &grammar.levels {
                        if let Some(text) = parsed.get(level) {
                            details.append(level, text);
                        }
                    }
                }
            },
            SectionKind::Questions => {
                let parsed = LevelTexts::split_tagged(&section.body, grammar);
                for level in &grammar.levels {
                    if let Some(text) = parsed.get(level) {
                        questions.append(level, text);
                    }
                }
            }
        }
    }

    Ok(ParsedDocument {
        graph: builder.build(),
        details,
        questions,
        report,
    })
}
