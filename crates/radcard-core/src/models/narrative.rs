use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Ordinal likelihood of a differential candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Likelihood {
    Low,
    Medium,
    High,
}

/// Direction of a single ordinal adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Up,
    Down,
}

impl Likelihood {
    /// Move one step along Low < Medium < High, clamped at both ends.
    pub fn step(self, direction: Step) -> Self {
        match (self, direction) {
            (Likelihood::Low, Step::Up) => Likelihood::Medium,
            (Likelihood::Medium, Step::Up) | (Likelihood::High, Step::Up) => Likelihood::High,
            (Likelihood::High, Step::Down) => Likelihood::Medium,
            (Likelihood::Medium, Step::Down) | (Likelihood::Low, Step::Down) => Likelihood::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Likelihood::Low => "Low",
            Likelihood::Medium => "Medium",
            Likelihood::High => "High",
        }
    }
}

impl fmt::Display for Likelihood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub enum Urgency {
    #[default]
    Routine,
    Priority,
    Emergency,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Routine => "Routine",
            Urgency::Priority => "Priority",
            Urgency::Emergency => "Emergency",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Differential {
    pub name: String,
    pub likelihood: Likelihood,
    pub rationale: Vec<String>,
}

/// Ranked candidates that share a category, e.g. "Hemorrhage".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DifferentialGroup {
    pub category: String,
    pub entries: Vec<Differential>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Suggestion {
    pub title: String,
    pub urgency: Urgency,
    pub details: Vec<String>,
}

/// Everything composed from one selection-state snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Narrative {
    pub module: String,
    pub report_lines: Vec<String>,
    pub differentials: Vec<DifferentialGroup>,
    pub recommendations: Vec<String>,
    pub warnings: Vec<String>,
    pub next_studies: Vec<String>,
    pub suggestions: Vec<Suggestion>,
    pub final_sentence: String,
    pub export_text: String,
    /// Ids of the differential rules that took effect, in evaluation order.
    pub fired_rules: Vec<String>,
}

impl Narrative {
    /// Most urgent suggestion level, `Routine` when nothing was suggested.
    pub fn overall_urgency(&self) -> Urgency {
        self.suggestions
            .iter()
            .map(|s| s.urgency)
            .max()
            .unwrap_or_default()
    }

    pub fn differential(&self, category: &str, name: &str) -> Option<&Differential> {
        self.differentials
            .iter()
            .find(|g| g.category == category)
            .and_then(|g| g.entries.iter().find(|d| d.name == name))
    }
}
