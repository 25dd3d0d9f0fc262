//! Section splitting: raw text → named, delimiter-bounded spans

use super::error::{ParseError, ParseResult};
use super::grammar::{SectionKind, SectionSpec};
use tracing::debug;

/// A delimiter-bounded region of the raw text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub kind: SectionKind,
    pub level: Option<String>,
    /// Trimmed text between this section's token and the next found token
    pub body: String,
}

/// Sections found in one raw text, in delimiter order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    sections: Vec<Section>,
    /// Optional sections whose token was absent
    pub missing: Vec<String>,
}

impl Sections {
    pub fn get(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn of_kind(&self, kind: SectionKind) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(move |s| s.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Split `text` into sections.
///
/// Tokens are searched in declaration order, each one after the end of the
/// previous token found, so a token that only appears out of order counts
/// as absent. The body of a section runs to the start of the next found
/// token, or to end of text for the last one; text before the first token
/// is ignored. A missing required token fails the whole split.
pub fn split_sections(text: &str, specs: &[SectionSpec]) -> ParseResult<Sections> {
    // (spec, token start, body start)
    let mut found: Vec<(&SectionSpec, usize, usize)> = Vec::with_capacity(specs.len());
    let mut missing = Vec::new();
    let mut cursor = 0;

    for spec in specs {
        match text[cursor..].find(spec.token.as_str()) {
            Some(offset) => {
                let start = cursor + offset;
                let body = start + spec.token.len();
                found.push((spec, start, body));
                cursor = body;
            }
            None if spec.required => {
                return Err(ParseError::MissingDelimiter {
                    token: spec.token.clone(),
                });
            }
            None => {
                debug!(section = %spec.name, token = %spec.token, "optional section absent");
                missing.push(spec.name.clone());
            }
        }
    }

    let sections = found
        .iter()
        .enumerate()
        .map(|(i, (spec, _, body_start))| {
            let end = found.get(i + 1).map(|(_, start, _)| *start).unwrap_or(text.len());
            Section {
                name: spec.name.clone(),
                kind: spec.kind,
                level: spec.level.clone(),
                body: text[*body_start..end].trim().to_string(),
            }
        })
        .collect();

    Ok(Sections { sections, missing })
}
