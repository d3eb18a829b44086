use radcard_core::models::narrative::{DifferentialGroup, Narrative};
use radcard_export::{render_export, ExportDocument};

use crate::board::DifferentialBoard;
use crate::findings::Findings;

/// Intermediate output of one module pass, before ranking and export.
#[derive(Debug, Default)]
pub struct Draft {
    pub report_lines: Vec<String>,
    pub board: DifferentialBoard,
    pub findings: Findings,
    pub fired_rules: Vec<&'static str>,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, line: Option<String>) {
        if let Some(line) = line {
            self.report_lines.push(line);
        }
    }

    /// Rank differentials, derive the final sentence, and render the export block.
    pub fn finish(
        self,
        module_id: &str,
        export_title: &str,
        final_sentence: impl FnOnce(&[String], &[DifferentialGroup]) -> String,
    ) -> Narrative {
        let differentials = self.board.into_groups();
        let final_sentence = final_sentence(&self.report_lines, &differentials);
        let (recommendations, warnings, next_studies, suggestions) = self.findings.into_parts();

        let mut narrative = Narrative {
            module: module_id.to_string(),
            report_lines: self.report_lines,
            differentials,
            recommendations,
            warnings,
            next_studies,
            suggestions,
            final_sentence,
            export_text: String::new(),
            fired_rules: self.fired_rules.into_iter().map(str::to_string).collect(),
        };

        let document = ExportDocument::from_narrative(export_title, &narrative);
        narrative.export_text = render_export(&document).unwrap_or_else(|e| {
            tracing::error!(module = module_id, "export rendering failed: {e}");
            String::new()
        });

        tracing::debug!(
            module = module_id,
            lines = narrative.report_lines.len(),
            candidates = narrative.differentials.iter().map(|g| g.entries.len()).sum::<usize>(),
            rules = narrative.fired_rules.len(),
            "composed narrative"
        );
        narrative
    }
}
