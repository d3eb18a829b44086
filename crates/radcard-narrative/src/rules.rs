use radcard_core::models::narrative::Likelihood;

use crate::board::DifferentialBoard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleAction {
    /// Add the candidate at this likelihood unless it is already on the board.
    Propose(Likelihood),
    /// One ordinal step up for an already-proposed candidate.
    Raise,
    /// One ordinal step down for an already-proposed candidate.
    Lower,
}

/// "If this combination, then this candidate, because of this."
pub struct DifferentialRule<S> {
    pub id: &'static str,
    pub category: &'static str,
    pub candidate: &'static str,
    pub action: RuleAction,
    pub rationale: &'static str,
    pub applies: fn(&S) -> bool,
}

impl<S> DifferentialRule<S> {
    /// Apply to the board if the predicate holds. Returns whether the board changed.
    pub fn apply(&self, state: &S, board: &mut DifferentialBoard) -> bool {
        if !(self.applies)(state) {
            return false;
        }
        match self.action {
            RuleAction::Propose(likelihood) => {
                board.propose(self.category, self.candidate, likelihood, self.rationale)
            }
            RuleAction::Raise => board.raise(self.category, self.candidate, self.rationale),
            RuleAction::Lower => board.lower(self.category, self.candidate, self.rationale),
        }
    }
}

/// Run a rule table in order. Returns ids of the rules that changed the board.
pub fn apply_rules<S>(
    rules: &[DifferentialRule<S>],
    state: &S,
    board: &mut DifferentialBoard,
) -> Vec<&'static str> {
    rules
        .iter()
        .filter(|rule| rule.apply(state, board))
        .map(|rule| rule.id)
        .collect()
}

impl<S> DifferentialRule<S> {
    pub fn propose(
        id: &'static str,
        category: &'static str,
        candidate: &'static str,
        likelihood: Likelihood,
        rationale: &'static str,
        applies: fn(&S) -> bool,
    ) -> Self {
        Self {
            id,
            category,
            candidate,
            action: RuleAction::Propose(likelihood),
            rationale,
            applies,
        }
    }

    pub fn raise(
        id: &'static str,
        category: &'static str,
        candidate: &'static str,
        rationale: &'static str,
        applies: fn(&S) -> bool,
    ) -> Self {
        Self {
            id,
            category,
            candidate,
            action: RuleAction::Raise,
            rationale,
            applies,
        }
    }

    pub fn lower(
        id: &'static str,
        category: &'static str,
        candidate: &'static str,
        rationale: &'static str,
        applies: fn(&S) -> bool,
    ) -> Self {
        Self {
            id,
            category,
            candidate,
            action: RuleAction::Lower,
            rationale,
            applies,
        }
    }
}
