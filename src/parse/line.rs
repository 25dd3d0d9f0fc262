//! Line classification: one `category:label:description` line → entry

use super::grammar::{CategorySpec, Grammar};
use crate::graph::Category;

/// A line that encodes a graph entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub category: Category,
    pub label: String,
    pub description: String,
}

/// Why a line was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Blank,
    NoSeparator,
    EmptyLabel,
    /// Label equals the center id
    ReservedLabel,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank => write!(f, "blank line"),
            Self::NoSeparator => write!(f, "no field separator"),
            Self::EmptyLabel => write!(f, "empty label"),
            Self::ReservedLabel => write!(f, "label reserved for the center node"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Entry(ClassifiedLine),
    Skipped(SkipReason),
}

/// Classifies lines against a grammar's separator and category vocabulary
#[derive(Debug, Clone, Copy)]
pub struct LineClassifier<'g> {
    separator: char,
    categories: &'g [CategorySpec],
}

impl<'g> LineClassifier<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self {
            separator: grammar.separator,
            categories: &grammar.categories,
        }
    }

    /// Classify one line.
    ///
    /// The line is split on the separator at most twice, so separators
    /// inside the description survive. A single separator yields an empty
    /// description.
    pub fn classify(&self, line: &str) -> LineOutcome {
        let line = line.trim();
        if line.is_empty() {
            return LineOutcome::Skipped(SkipReason::Blank);
        }

        let mut fields = line.splitn(3, self.separator);
        let head = fields.next().unwrap_or_default();
        let Some(label) = fields.next().map(str::trim) else {
            return LineOutcome::Skipped(SkipReason::NoSeparator);
        };
        if label.is_empty() {
            return LineOutcome::Skipped(SkipReason::EmptyLabel);
        }
        let description = fields.next().map(str::trim).unwrap_or_default();

        LineOutcome::Entry(ClassifiedLine {
            category: self.category_of(head),
            label: label.to_string(),
            description: description.to_string(),
        })
    }

    /// Resolve a first field against the precedence list.
    pub fn category_of(&self, head: &str) -> Category {
        self.categories
            .iter()
            .find(|c| c.matches(head))
            .map(|c| Category::named(c.name.clone()))
            .unwrap_or(Category::Unknown)
    }
}
