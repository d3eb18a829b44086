//! radcard-narrative
//!
//! Deterministic findings-to-report composition. Each organ module maps a
//! set of discrete selections to report sentences, ranked differentials,
//! recommendations, and one final impression sentence.

pub mod board;
pub mod cascade;
pub mod choice;
pub mod compose;
pub mod findings;
pub mod measure;
pub mod modules;
pub mod resolve;
pub mod rules;
pub mod sentence;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use radcard_core::models::narrative::Narrative;

use modules::brain::selection::BrainSelection;
use modules::brain::BrainModule;
use modules::liver::selection::LiverSelection;
use modules::liver::LiverModule;

/// Trait implemented by each organ module.
pub trait NarrativeModule: Send + Sync {
    type Selection;

    /// Unique identifier for this module (e.g., "liver", "brain").
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Compose report lines, differentials, findings, and the impression.
    fn compose(&self, selection: &Self::Selection) -> Narrative;
}

/// Selections for one case, tagged with the module they belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "module", rename_all = "snake_case")]
#[ts(export)]
pub enum SelectionState {
    Liver(LiverSelection),
    Brain(BrainSelection),
}

impl SelectionState {
    pub fn module_id(&self) -> &'static str {
        match self {
            SelectionState::Liver(_) => "liver",
            SelectionState::Brain(_) => "brain",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ModuleSummary {
    pub id: String,
    pub name: String,
}

fn summary(module: &impl NarrativeModule) -> ModuleSummary {
    ModuleSummary {
        id: module.id().to_string(),
        name: module.name().to_string(),
    }
}

pub fn all_modules() -> Vec<ModuleSummary> {
    vec![summary(&LiverModule), summary(&BrainModule)]
}

/// Compose the narrative for a selection state. Never fails: absent or
/// unknown selections simply contribute nothing.
pub fn compose_narrative(state: &SelectionState) -> Narrative {
    match state {
        SelectionState::Liver(selection) => LiverModule.compose(selection),
        SelectionState::Brain(selection) => BrainModule.compose(selection),
    }
}
