use radcard_core::models::narrative::{
    Differential, DifferentialGroup, Likelihood, Narrative,
};
use radcard_export::document::{differential_line, heading};
use radcard_export::{render_export, ExportDocument};

fn narrative() -> Narrative {
    Narrative {
        module: "brain".to_string(),
        report_lines: vec![
            "Left acute subdural hematoma.".to_string(),
            "Midline shift ≥5 mm & <10 mm.".to_string(),
        ],
        differentials: vec![DifferentialGroup {
            category: "Hemorrhage".to_string(),
            entries: vec![Differential {
                name: "Acute subdural hematoma".to_string(),
                likelihood: Likelihood::High,
                rationale: vec!["crescentic".to_string(), "hyperdense".to_string()],
            }],
        }],
        recommendations: vec!["Urgent neurosurgical consultation.".to_string()],
        warnings: Vec::new(),
        next_studies: Vec::new(),
        suggestions: Vec::new(),
        final_sentence: "Acute left subdural hematoma with mass effect.".to_string(),
        export_text: String::new(),
        fired_rules: Vec::new(),
    }
}

#[test]
fn export_has_headings_bullets_and_blank_line_separation() {
    let doc = ExportDocument::from_narrative("CT BRAIN", &narrative());
    let text = render_export(&doc).unwrap();

    assert_eq!(
        text,
        "CT BRAIN\n\
         \n\
         FINDINGS\n\
         - Left acute subdural hematoma.\n\
         - Midline shift ≥5 mm & <10 mm.\n\
         \n\
         DIFFERENTIAL DIAGNOSIS\n\
         - Acute subdural hematoma (High): crescentic; hyperdense\n\
         \n\
         RECOMMENDATIONS\n\
         - Urgent neurosurgical consultation.\n\
         \n\
         IMPRESSION\n\
         Acute left subdural hematoma with mass effect.\n"
    );
}

#[test]
fn empty_sections_are_omitted_but_impression_stays() {
    let mut n = narrative();
    n.report_lines.clear();
    n.differentials.clear();
    n.recommendations.clear();

    let doc = ExportDocument::from_narrative("CT BRAIN", &n);
    assert_eq!(doc.sections.len(), 1);
    assert_eq!(doc.sections[0].heading, heading::IMPRESSION);

    let text = render_export(&doc).unwrap();
    assert!(!text.contains(heading::FINDINGS));
    assert!(text.ends_with("IMPRESSION\nAcute left subdural hematoma with mass effect.\n"));
}

#[test]
fn differential_line_without_rationale() {
    let entry = Differential {
        name: "Hemangioma".to_string(),
        likelihood: Likelihood::Low,
        rationale: Vec::new(),
    };
    assert_eq!(differential_line(&entry), "Hemangioma (Low)");
}
