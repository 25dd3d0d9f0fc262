//! Generation prompt derived from a grammar
//!
//! The prompt tells the text generator exactly which delimiters, line
//! grammar and vocabulary the parser will accept, then appends the search
//! context verbatim.

use crate::collab::SearchHit;
use crate::parse::{Grammar, SectionKind};
use std::fmt::Write;

/// Build the prompt for one query.
pub fn build_prompt(grammar: &Grammar, query: &str, hits: &[SearchHit]) -> String {
    let sep = grammar.separator;
    let mut out = String::new();

    let _ = writeln!(out, "Analyse the concept \"{}\".", query.trim());
    let _ = writeln!(
        out,
        "Answer in plain text using exactly these section markers, in this order:"
    );

    for section in &grammar.sections {
        let optional = if section.required { "" } else { " (optional)" };
        let _ = write!(out, "\n{}{}\n", section.token, optional);
        match section.kind {
            SectionKind::Graph => {
                let _ = writeln!(
                    out,
                    "One entry per line: CATEGORY{sep}label{sep}one-sentence description"
                );
                let names: Vec<&str> = grammar.categories.iter().map(|c| c.name.as_str()).collect();
                let _ = writeln!(out, "CATEGORY is one of: {}", names.join(", "));
                let _ = writeln!(
                    out,
                    "Do not use \"{}\" itself as a label.",
                    query.trim()
                );
            }
            SectionKind::Detail => match &section.level {
                Some(level) => {
                    let _ = writeln!(out, "Explanation at level {}.", level);
                }
                None => {
                    let _ = writeln!(out, "One explanation per level, each starting with its tag:");
                    for level in &grammar.levels {
                        let _ = writeln!(out, "- {level}{sep} ...");
                    }
                }
            },
            SectionKind::Questions => {
                let _ = writeln!(
                    out,
                    "For each level after the first, a question asking why the previous level leads to it:"
                );
                for level in grammar.levels.iter().skip(1) {
                    let _ = writeln!(out, "Q_{level}{sep} ...");
                }
            }
        }
    }

    if !hits.is_empty() {
        let _ = writeln!(out, "\nData:");
        for hit in hits {
            let _ = writeln!(out, "Content: {}", hit.content.trim());
        }
    }

    out
}
