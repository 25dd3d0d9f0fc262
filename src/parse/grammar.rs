//! Grammar: the configurable shape of generated text
//!
//! A grammar names the section delimiters (in order), the single field
//! separator used by entry lines, the category vocabulary with its
//! precedence and edge routes, and the ordered gate levels. Grammars are
//! plain data loaded from YAML:
//!
//! ```yaml
//! separator: ":"
//! sections:
//!   - { name: map, token: "=== MAP ===", kind: graph }
//!   - { name: detail, token: "=== DETAIL ===", kind: detail }
//!   - { name: gates, token: "=== GATES ===", kind: questions, required: false }
//! categories:
//!   - { name: PRE, direction: inbound, style: solid }
//!   - { name: POST, direction: outbound, style: solid }
//!   - { name: ISSUE, direction: outbound, style: dashed }
//! levels: [PRE, POST, ISSUE]
//! ```

use super::error::GrammarError;
use crate::graph::{Category, EdgeDirection, EdgeStyle, Route};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// What a section's body is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    /// Entry lines that become graph nodes
    Graph,
    /// Narrative detail text, gated per level
    Detail,
    /// Gate questions, one per level
    Questions,
}

/// One delimiter-bounded section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub name: String,
    /// Marker that starts the section
    pub token: String,
    pub kind: SectionKind,
    #[serde(default = "default_required")]
    pub required: bool,
    /// Binds a detail section's whole body to one level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

fn default_required() -> bool {
    true
}

impl SectionSpec {
    pub fn new(name: impl Into<String>, token: impl Into<String>, kind: SectionKind) -> Self {
        Self {
            name: name.into(),
            token: token.into(),
            kind,
            required: true,
            level: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn for_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }
}

/// One entry of the category vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpec {
    /// Canonical name stored on nodes
    pub name: String,
    /// Case-insensitive substrings matched against a line's first field;
    /// the name itself when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<String>,
    pub direction: EdgeDirection,
    pub style: EdgeStyle,
}

impl CategorySpec {
    pub fn new(name: impl Into<String>, direction: EdgeDirection, style: EdgeStyle) -> Self {
        Self {
            name: name.into(),
            patterns: Vec::new(),
            direction,
            style,
        }
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    pub fn route(&self) -> Route {
        Route::new(self.direction, self.style)
    }

    /// Whether `field` names this category. Case-insensitive containment.
    pub fn matches(&self, field: &str) -> bool {
        let field = field.to_lowercase();
        if self.patterns.is_empty() {
            return field.contains(&self.name.to_lowercase());
        }
        self.patterns
            .iter()
            .any(|p| field.contains(&p.to_lowercase()))
    }
}

/// The full grammar of one generated document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grammar {
    #[serde(default = "default_separator")]
    pub separator: char,
    pub sections: Vec<SectionSpec>,
    /// Precedence list: the first matching category wins
    pub categories: Vec<CategorySpec>,
    /// Route for lines whose category matches nothing
    #[serde(default)]
    pub fallback: Route,
    /// Gate levels in ascending order; the first is always unlocked
    pub levels: Vec<String>,
}

fn default_separator() -> char {
    ':'
}

impl Default for Grammar {
    fn default() -> Self {
        Self::causal()
    }
}

impl Grammar {
    /// Map + detail layout with PRE / POST / ISSUE categories.
    pub fn causal() -> Self {
        Self {
            separator: ':',
            sections: vec![
                SectionSpec::new("map", "=== MAP ===", SectionKind::Graph),
                SectionSpec::new("detail", "=== DETAIL ===", SectionKind::Detail),
                SectionSpec::new("gates", "=== GATES ===", SectionKind::Questions).optional(),
            ],
            categories: vec![
                CategorySpec::new("PRE", EdgeDirection::Inbound, EdgeStyle::Solid),
                CategorySpec::new("POST", EdgeDirection::Outbound, EdgeStyle::Solid),
                CategorySpec::new("ISSUE", EdgeDirection::Outbound, EdgeStyle::Dashed),
            ],
            fallback: Route::default(),
            levels: vec!["PRE".into(), "POST".into(), "ISSUE".into()],
        }
    }

    /// Map + one detail section per level, with Lv1 / Lv3 / Lv5 categories.
    pub fn tiered() -> Self {
        Self {
            separator: ':',
            sections: vec![
                SectionSpec::new("map", "=== MAP ===", SectionKind::Graph),
                SectionSpec::new("lv1", "=== LV1 ===", SectionKind::Detail).for_level("Lv1"),
                SectionSpec::new("lv3", "=== LV3 ===", SectionKind::Detail).for_level("Lv3"),
                SectionSpec::new("lv5", "=== LV5 ===", SectionKind::Detail).for_level("Lv5"),
                SectionSpec::new("gates", "=== GATES ===", SectionKind::Questions).optional(),
            ],
            categories: vec![
                CategorySpec::new("Lv1", EdgeDirection::Outbound, EdgeStyle::Solid),
                CategorySpec::new("Lv3", EdgeDirection::Outbound, EdgeStyle::Dashed),
                CategorySpec::new("Lv5", EdgeDirection::Outbound, EdgeStyle::Dotted),
            ],
            fallback: Route::default(),
            levels: vec!["Lv1".into(), "Lv3".into(), "Lv5".into()],
        }
    }

    /// Look up a built-in grammar by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "causal" => Some(Self::causal()),
            "tiered" => Some(Self::tiered()),
            _ => None,
        }
    }

    /// Parse and validate a YAML grammar.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, GrammarError> {
        let grammar: Self = serde_yaml::from_str(yaml)?;
        grammar.validate()?;
        Ok(grammar)
    }

    /// Read, parse and validate a YAML grammar file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GrammarError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| GrammarError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    pub fn to_yaml(&self) -> Result<String, GrammarError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), GrammarError> {
        if self.separator.is_whitespace() || self.separator.is_control() {
            return Err(GrammarError::InvalidSeparator);
        }
        if self.sections.is_empty() {
            return Err(GrammarError::NoSections);
        }
        if self.levels.is_empty() {
            return Err(GrammarError::NoLevels);
        }

        let mut levels = HashSet::new();
        for level in &self.levels {
            if !levels.insert(level.as_str()) {
                return Err(GrammarError::DuplicateLevel(level.clone()));
            }
        }

        let mut names = HashSet::new();
        let mut tokens = HashSet::new();
        for section in &self.sections {
            if section.token.trim().is_empty() {
                return Err(GrammarError::EmptyToken(section.name.clone()));
            }
            if !names.insert(section.name.as_str()) {
                return Err(GrammarError::DuplicateSection(section.name.clone()));
            }
            if !tokens.insert(section.token.as_str()) {
                return Err(GrammarError::DuplicateToken(section.token.clone()));
            }
            if let Some(level) = &section.level {
                if !levels.contains(level.as_str()) {
                    return Err(GrammarError::UnknownLevel {
                        owner: section.name.clone(),
                        level: level.clone(),
                    });
                }
            }
        }

        let graph_sections: Vec<&SectionSpec> = self
            .sections
            .iter()
            .filter(|s| s.kind == SectionKind::Graph)
            .collect();
        match graph_sections.as_slice() {
            [section] if !section.required => {
                return Err(GrammarError::OptionalGraphSection(section.name.clone()));
            }
            [_] => {}
            other => return Err(GrammarError::GraphSectionCount(other.len())),
        }

        let mut categories = HashSet::new();
        for category in &self.categories {
            if category.name.trim().is_empty() {
                return Err(GrammarError::EmptyCategory);
            }
            if !categories.insert(category.name.as_str()) {
                return Err(GrammarError::DuplicateCategory(category.name.clone()));
            }
        }

        Ok(())
    }

    /// The always-unlocked level
    pub fn base_level(&self) -> &str {
        self.levels.first().map(String::as_str).unwrap_or_default()
    }

    /// Route for a category, falling back for `Unknown` and unlisted names
    pub fn route(&self, category: &Category) -> Route {
        match category {
            Category::Named(name) => self
                .categories
                .iter()
                .find(|c| &c.name == name)
                .map(CategorySpec::route)
                .unwrap_or(self.fallback),
            Category::Unknown => self.fallback,
        }
    }

    /// Find the level named by a tag such as `Lv3`, `- Lv3` or `Q_Lv3`.
    ///
    /// List markers and a `Q_` prefix are stripped; the rest must equal a
    /// level name, ignoring case.
    pub fn level_in(&self, tag: &str) -> Option<&str> {
        let head = tag
            .trim()
            .trim_start_matches(|c: char| c == '-' || c == '*' || c.is_whitespace())
            .trim_end_matches(|c: char| c == '*' || c.is_whitespace());
        let head = match head.get(..2) {
            Some(prefix) if prefix.eq_ignore_ascii_case("q_") => &head[2..],
            _ => head,
        };
        self.levels
            .iter()
            .find(|level| level.eq_ignore_ascii_case(head))
            .map(String::as_str)
    }
}
