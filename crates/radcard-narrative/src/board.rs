use radcard_core::models::narrative::{Differential, DifferentialGroup, Likelihood, Step};

/// Accumulates differential candidates per category while rules fire.
///
/// A candidate's likelihood is set once, when first proposed. After that it
/// only moves by single ordinal steps.
#[derive(Debug, Clone, Default)]
pub struct DifferentialBoard {
    groups: Vec<(String, Vec<Differential>)>,
}

fn push_reason(entry: &mut Differential, rationale: &str) {
    if !rationale.is_empty() && !entry.rationale.iter().any(|r| r == rationale) {
        entry.rationale.push(rationale.to_string());
    }
}

impl DifferentialBoard {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry_mut(&mut self, category: &str, name: &str) -> Option<&mut Differential> {
        self.groups
            .iter_mut()
            .find(|(c, _)| c == category)
            .and_then(|(_, entries)| entries.iter_mut().find(|d| d.name == name))
    }

    pub fn get(&self, category: &str, name: &str) -> Option<&Differential> {
        self.groups
            .iter()
            .find(|(c, _)| c == category)
            .and_then(|(_, entries)| entries.iter().find(|d| d.name == name))
    }

    pub fn contains(&self, category: &str, name: &str) -> bool {
        self.get(category, name).is_some()
    }

    /// Add a candidate. Re-proposing an existing name is a no-op and returns `false`.
    pub fn propose(
        &mut self,
        category: &str,
        name: &str,
        likelihood: Likelihood,
        rationale: &str,
    ) -> bool {
        if self.contains(category, name) {
            return false;
        }
        let idx = match self.groups.iter().position(|(c, _)| c == category) {
            Some(idx) => idx,
            None => {
                self.groups.push((category.to_string(), Vec::new()));
                self.groups.len() - 1
            }
        };
        let mut entry = Differential {
            name: name.to_string(),
            likelihood,
            rationale: Vec::new(),
        };
        push_reason(&mut entry, rationale);
        self.groups[idx].1.push(entry);
        true
    }

    /// Step an existing candidate by one ordinal step. Unknown candidates are left alone.
    pub fn adjust(&mut self, category: &str, name: &str, direction: Step, rationale: &str) -> bool {
        match self.entry_mut(category, name) {
            Some(entry) => {
                entry.likelihood = entry.likelihood.step(direction);
                push_reason(entry, rationale);
                true
            }
            None => false,
        }
    }

    pub fn raise(&mut self, category: &str, name: &str, rationale: &str) -> bool {
        self.adjust(category, name, Step::Up, rationale)
    }

    pub fn lower(&mut self, category: &str, name: &str, rationale: &str) -> bool {
        self.adjust(category, name, Step::Down, rationale)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|(_, entries)| entries.is_empty())
    }

    /// Categories in first-seen order; entries by likelihood, ties in proposal order.
    pub fn into_groups(self) -> Vec<DifferentialGroup> {
        self.groups
            .into_iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(category, mut entries)| {
                entries.sort_by(|a, b| b.likelihood.cmp(&a.likelihood));
                DifferentialGroup { category, entries }
            })
            .collect()
    }
}

/// Highest-likelihood candidate across groups, earliest group first on ties.
pub fn leading_candidate(groups: &[DifferentialGroup]) -> Option<&Differential> {
    let mut best: Option<&Differential> = None;
    for entry in groups.iter().flat_map(|g| g.entries.first()) {
        if best.is_none_or(|b| entry.likelihood > b.likelihood) {
            best = Some(entry);
        }
    }
    best
}
