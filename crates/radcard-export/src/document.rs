use serde::Serialize;

use radcard_core::models::narrative::{Differential, Narrative};

pub mod heading {
    pub const FINDINGS: &str = "FINDINGS";
    pub const DIFFERENTIAL: &str = "DIFFERENTIAL DIAGNOSIS";
    pub const RECOMMENDATIONS: &str = "RECOMMENDATIONS";
    pub const WARNINGS: &str = "WARNINGS";
    pub const NEXT_STUDIES: &str = "SUGGESTED STUDIES";
    pub const IMPRESSION: &str = "IMPRESSION";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSection {
    pub heading: String,
    /// Prefix every line with `- `.
    pub bulleted: bool,
    pub lines: Vec<String>,
}

/// Template input: a title line followed by labeled sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportDocument {
    pub title: String,
    pub sections: Vec<ExportSection>,
}

/// `Name (Likelihood): reason; reason`
pub fn differential_line(entry: &Differential) -> String {
    if entry.rationale.is_empty() {
        format!("{} ({})", entry.name, entry.likelihood)
    } else {
        format!(
            "{} ({}): {}",
            entry.name,
            entry.likelihood,
            entry.rationale.join("; ")
        )
    }
}

impl ExportDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Append a section; empty sections are skipped.
    pub fn push_section(&mut self, heading: &str, bulleted: bool, lines: Vec<String>) {
        if lines.is_empty() {
            return;
        }
        self.sections.push(ExportSection {
            heading: heading.to_string(),
            bulleted,
            lines,
        });
    }

    /// Lay out a narrative under the fixed headings. The impression is always present.
    pub fn from_narrative(title: impl Into<String>, narrative: &Narrative) -> Self {
        let mut doc = Self::new(title);
        doc.push_section(heading::FINDINGS, true, narrative.report_lines.clone());
        doc.push_section(
            heading::DIFFERENTIAL,
            true,
            narrative
                .differentials
                .iter()
                .flat_map(|group| &group.entries)
                .map(differential_line)
                .collect(),
        );
        doc.push_section(heading::RECOMMENDATIONS, true, narrative.recommendations.clone());
        doc.push_section(heading::WARNINGS, true, narrative.warnings.clone());
        doc.push_section(heading::NEXT_STUDIES, true, narrative.next_studies.clone());
        doc.push_section(heading::IMPRESSION, false, vec![narrative.final_sentence.clone()]);
        doc
    }
}
