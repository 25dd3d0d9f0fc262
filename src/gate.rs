//! Gate state machine: which detail levels are revealed
//!
//! Levels are unlocked strictly in ascending order, so the unlocked set is
//! always a prefix of the level list and the base level is always in it.
//! No transition re-locks a level; only [`GateState::reset`] returns to
//! the base level.
//!
//! An unlock fires on any confirmation. The justification is recorded but
//! never graded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// State of a single level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelState {
    Locked,
    Unlocked,
}

/// Result of an unlock request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlockOutcome {
    /// The level moved from locked to unlocked
    Unlocked { level: String },
    /// No-op: already unlocked
    AlreadyUnlocked,
    /// No-op: the preceding level is still locked
    NotEligible { prerequisite: String },
    /// No-op: the level is not part of this gate
    UnknownLevel,
}

impl UnlockOutcome {
    /// Whether the request changed the gate
    pub fn changed(&self) -> bool {
        matches!(self, Self::Unlocked { .. })
    }
}

/// A user's confirmation that unlocked a level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockRecord {
    pub level: String,
    pub justification: String,
    pub unlocked_at: DateTime<Utc>,
}

/// Why a deserialized gate was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateShapeError {
    #[error("gate has no levels")]
    NoLevels,

    #[error("duplicate level: {0}")]
    DuplicateLevel(String),

    #[error("unlocked count {unlocked} outside 1..={levels}")]
    UnlockedCount { unlocked: usize, levels: usize },
}

/// Tracks the unlocked prefix of an ordered level list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GateRepr")]
pub struct GateState {
    levels: Vec<String>,
    /// Number of unlocked levels, never below 1
    unlocked: usize,
    records: Vec<UnlockRecord>,
}

impl GateState {
    /// Create a gate with `base` unlocked and `higher` levels locked.
    pub fn new<I, S>(base: impl Into<String>, higher: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut levels: Vec<String> = vec![base.into()];
        levels.extend(higher.into_iter().map(Into::into));
        Self {
            levels,
            unlocked: 1,
            records: Vec::new(),
        }
    }

    /// Create a gate from an ordered level list; `None` when empty.
    pub fn from_levels(levels: &[String]) -> Option<Self> {
        let (base, higher) = levels.split_first()?;
        Some(Self::new(base.clone(), higher.iter().cloned()))
    }

    pub fn base_level(&self) -> &str {
        &self.levels[0]
    }

    /// All levels in ascending order
    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    pub fn unlocked_levels(&self) -> &[String] {
        &self.levels[..self.unlocked]
    }

    pub fn state(&self, level: &str) -> Option<LevelState> {
        let index = self.index_of(level)?;
        Some(if index < self.unlocked {
            LevelState::Unlocked
        } else {
            LevelState::Locked
        })
    }

    pub fn is_unlocked(&self, level: &str) -> bool {
        self.state(level) == Some(LevelState::Unlocked)
    }

    /// The next level eligible for unlocking
    pub fn next_locked(&self) -> Option<&str> {
        self.levels.get(self.unlocked).map(String::as_str)
    }

    /// True once every level is unlocked
    pub fn is_complete(&self) -> bool {
        self.unlocked == self.levels.len()
    }

    pub fn records(&self) -> &[UnlockRecord] {
        &self.records
    }

    /// Unlock `level` if its prerequisite is unlocked.
    pub fn request_unlock(&mut self, level: &str, justification: &str) -> UnlockOutcome {
        let Some(index) = self.index_of(level) else {
            return UnlockOutcome::UnknownLevel;
        };
        if index < self.unlocked {
            return UnlockOutcome::AlreadyUnlocked;
        }
        if index > self.unlocked {
            return UnlockOutcome::NotEligible {
                prerequisite: self.levels[index - 1].clone(),
            };
        }

        self.unlocked += 1;
        self.records.push(UnlockRecord {
            level: level.to_string(),
            justification: justification.trim().to_string(),
            unlocked_at: Utc::now(),
        });
        info!(unlocked = level, "gate level unlocked");
        UnlockOutcome::Unlocked {
            level: level.to_string(),
        }
    }

    /// Return to the base level only.
    pub fn reset(&mut self) {
        self.unlocked = 1;
        self.records.clear();
    }

    fn index_of(&self, level: &str) -> Option<usize> {
        self.levels.iter().position(|l| l == level)
    }
}

/// Wire form of [`GateState`], checked before it becomes one
#[derive(Deserialize)]
struct GateRepr {
    levels: Vec<String>,
    unlocked: usize,
    #[serde(default)]
    records: Vec<UnlockRecord>,
}

impl TryFrom<GateRepr> for GateState {
    type Error = GateShapeError;

    fn try_from(repr: GateRepr) -> Result<Self, Self::Error> {
        if repr.levels.is_empty() {
            return Err(GateShapeError::NoLevels);
        }
        for (i, level) in repr.levels.iter().enumerate() {
            if repr.levels[..i].contains(level) {
                return Err(GateShapeError::DuplicateLevel(level.clone()));
            }
        }
        if repr.unlocked == 0 || repr.unlocked > repr.levels.len() {
            return Err(GateShapeError::UnlockedCount {
                unlocked: repr.unlocked,
                levels: repr.levels.len(),
            });
        }
        Ok(Self {
            levels: repr.levels,
            unlocked: repr.unlocked,
            records: repr.records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> GateState {
        GateState::new("Lv1", ["Lv3", "Lv5"])
    }

    #[test]
    fn starts_with_base_only() {
        let gate = gate();
        assert_eq!(gate.unlocked_levels(), ["Lv1"]);
        assert_eq!(gate.state("Lv3"), Some(LevelState::Locked));
        assert_eq!(gate.next_locked(), Some("Lv3"));
        assert!(!gate.is_complete());
    }

    #[test]
    fn unlock_is_monotonic_and_idempotent() {
        let mut gate = gate();
        assert!(gate.request_unlock("Lv3", "because ITAM").changed());
        assert_eq!(gate.unlocked_levels(), ["Lv1", "Lv3"]);

        assert_eq!(gate.request_unlock("Lv3", "again"), UnlockOutcome::AlreadyUnlocked);
        assert_eq!(gate.request_unlock("Lv1", ""), UnlockOutcome::AlreadyUnlocked);
        assert_eq!(gate.unlocked_levels(), ["Lv1", "Lv3"]);
        assert_eq!(gate.records().len(), 1);
        assert_eq!(gate.records()[0].justification, "because ITAM");
    }

    #[test]
    fn skipping_a_level_is_a_no_op() {
        let mut gate = gate();
        assert_eq!(
            gate.request_unlock("Lv5", "jump"),
            UnlockOutcome::NotEligible {
                prerequisite: "Lv3".into()
            }
        );
        assert_eq!(gate.unlocked_levels(), ["Lv1"]);
    }

    #[test]
    fn unknown_level_is_a_no_op() {
        let mut gate = gate();
        assert_eq!(gate.request_unlock("Lv9", ""), UnlockOutcome::UnknownLevel);
        assert_eq!(gate.state("Lv9"), None);
    }

    #[test]
    fn terminal_state_is_stable_until_reset() {
        let mut gate = gate();
        gate.request_unlock("Lv3", "");
        gate.request_unlock("Lv5", "");
        assert!(gate.is_complete());
        assert_eq!(gate.next_locked(), None);
        assert_eq!(gate.request_unlock("Lv5", ""), UnlockOutcome::AlreadyUnlocked);

        gate.reset();
        assert_eq!(gate.unlocked_levels(), ["Lv1"]);
        assert!(gate.records().is_empty());
    }

    #[test]
    fn builds_from_level_list() {
        assert!(GateState::from_levels(&[]).is_none());
        let gate = GateState::from_levels(&["PRE".to_string(), "POST".to_string()]).unwrap();
        assert_eq!(gate.base_level(), "PRE");
        assert_eq!(gate.levels().len(), 2);
    }

    #[test]
    fn deserialized_gate_keeps_its_prefix() {
        let mut gate = gate();
        gate.request_unlock("Lv3", "ITAM");
        let json = serde_json::to_value(&gate).unwrap();
        let back: GateState = serde_json::from_value(json).unwrap();
        assert_eq!(back.unlocked_levels(), ["Lv1", "Lv3"]);
    }

    #[test]
    fn deserialized_gate_rejects_out_of_range_counts() {
        let err = serde_json::from_str::<GateState>(r#"{"levels":["PRE"],"unlocked":5}"#)
            .unwrap_err();
        assert!(err.to_string().contains("unlocked count 5 outside 1..=1"));

        assert!(serde_json::from_str::<GateState>(r#"{"levels":["PRE"],"unlocked":0}"#).is_err());
        assert!(serde_json::from_str::<GateState>(r#"{"levels":[],"unlocked":1}"#).is_err());
        assert!(
            serde_json::from_str::<GateState>(r#"{"levels":["PRE","PRE"],"unlocked":1}"#).is_err()
        );
    }
}
