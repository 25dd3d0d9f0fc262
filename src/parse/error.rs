//! Errors raised while loading a grammar or parsing generated text

use std::path::PathBuf;
use thiserror::Error;

/// Whole-text or section-level parse failure
///
/// Per-line problems never surface here; see
/// [`SkippedLine`](super::SkippedLine).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing section delimiter: {token}")]
    MissingDelimiter { token: String },

    #[error("section '{section}' contains no usable entries")]
    EmptySection { section: String },
}

/// Result type for parse operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors from loading or validating a [`Grammar`](super::Grammar)
#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("cannot read grammar file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid grammar YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("grammar declares no sections")]
    NoSections,

    #[error("grammar must declare exactly one graph section, found {0}")]
    GraphSectionCount(usize),

    #[error("graph section '{0}' must be required")]
    OptionalGraphSection(String),

    #[error("duplicate section name: {0}")]
    DuplicateSection(String),

    #[error("duplicate section token: {0}")]
    DuplicateToken(String),

    #[error("section '{0}' has an empty token")]
    EmptyToken(String),

    #[error("category with empty name")]
    EmptyCategory,

    #[error("duplicate category: {0}")]
    DuplicateCategory(String),

    #[error("grammar declares no levels")]
    NoLevels,

    #[error("duplicate level: {0}")]
    DuplicateLevel(String),

    #[error("'{owner}' refers to unknown level '{level}'")]
    UnknownLevel { owner: String, level: String },

    #[error("separator must be a visible character")]
    InvalidSeparator,
}
