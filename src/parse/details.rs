//! Per-level text: detail narratives and gate questions

use super::grammar::Grammar;
use std::collections::HashMap;

/// Text keyed by gate level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelTexts {
    texts: HashMap<String, String>,
}

impl LevelTexts {
    pub fn get(&self, level: &str) -> Option<&str> {
        self.texts.get(level).map(String::as_str)
    }

    pub fn contains(&self, level: &str) -> bool {
        self.texts.contains_key(level)
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Append a paragraph to a level, separated by a newline.
    pub fn append(&mut self, level: &str, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        let entry = self.texts.entry(level.to_string()).or_default();
        if !entry.is_empty() {
            entry.push('\n');
        }
        entry.push_str(text);
    }

    /// Split a body into levels by its tag lines.
    ///
    /// A line whose text before the first separator is a level name (e.g.
    /// `- Lv3: ...` or `Q_Lv3: ...`) starts that level. Untagged lines
    /// continue the current level; untagged lines before any tag belong to
    /// the base level.
    pub fn split_tagged(body: &str, grammar: &Grammar) -> Self {
        let mut texts = Self::default();
        let mut current = grammar.base_level().to_string();

        for line in body.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match trimmed.split_once(grammar.separator) {
                Some((head, rest)) => match grammar.level_in(head) {
                    Some(level) => {
                        current = level.to_string();
                        texts.append(&current, rest);
                    }
                    None => texts.append(&current, trimmed),
                },
                None => texts.append(&current, trimmed),
            }
        }
        texts
    }
}
