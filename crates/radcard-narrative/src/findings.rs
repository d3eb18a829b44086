use indexmap::IndexSet;

use radcard_core::models::narrative::{Suggestion, Urgency};

/// Recommendations, warnings, studies, and suggestions gathered during composition.
///
/// Text lists deduplicate on exact string equality and keep first-seen order.
/// Suggestions merge by title, keeping the highest urgency.
#[derive(Debug, Clone, Default)]
pub struct Findings {
    recommendations: IndexSet<String>,
    warnings: IndexSet<String>,
    next_studies: IndexSet<String>,
    suggestions: Vec<Suggestion>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recommend(&mut self, text: impl Into<String>) {
        self.recommendations.insert(text.into());
    }

    pub fn warn(&mut self, text: impl Into<String>) {
        self.warnings.insert(text.into());
    }

    pub fn study(&mut self, text: impl Into<String>) {
        self.next_studies.insert(text.into());
    }

    pub fn suggest(&mut self, title: &str, urgency: Urgency, details: Vec<String>) {
        if let Some(existing) = self.suggestions.iter_mut().find(|s| s.title == title) {
            existing.urgency = existing.urgency.max(urgency);
            for detail in details {
                if !existing.details.contains(&detail) {
                    existing.details.push(detail);
                }
            }
            return;
        }
        let mut unique: Vec<String> = Vec::with_capacity(details.len());
        for detail in details {
            if !unique.contains(&detail) {
                unique.push(detail);
            }
        }
        self.suggestions.push(Suggestion {
            title: title.to_string(),
            urgency,
            details: unique,
        });
    }

    pub fn recommendations(&self) -> impl Iterator<Item = &str> {
        self.recommendations.iter().map(String::as_str)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.warnings.iter().map(String::as_str)
    }

    pub fn next_studies(&self) -> impl Iterator<Item = &str> {
        self.next_studies.iter().map(String::as_str)
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<String>, Vec<String>, Vec<Suggestion>) {
        (
            self.recommendations.into_iter().collect(),
            self.warnings.into_iter().collect(),
            self.next_studies.into_iter().collect(),
            self.suggestions,
        )
    }
}
