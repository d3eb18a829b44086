use radcard_core::models::narrative::{Likelihood, Urgency};
use radcard_narrative::choice::{Degree, Laterality, Multiplicity, Presence};
use radcard_narrative::modules::brain::rules::{HEMORRHAGE, ISCHEMIA, MASS};
use radcard_narrative::modules::brain::selection::{
    BleedType, BrainSelection, CtDensity, ExtraAxialAge, Herniation, InfarctStage,
    MassEnhancement,
};
use radcard_narrative::modules::brain::{
    hemorrhage_urgency, resolved_age, resolved_infarct_stage, BrainModule, NO_ACUTE_FINDING,
};
use radcard_narrative::resolve::ResolutionSource;
use radcard_narrative::{compose_narrative, NarrativeModule, SelectionState};

fn brain(json: &str) -> BrainSelection {
    match serde_json::from_str::<SelectionState>(json).unwrap() {
        SelectionState::Brain(selection) => selection,
        other => panic!("expected brain selection, got {other:?}"),
    }
}

fn sdh() -> BrainSelection {
    BrainSelection {
        bleed_type: BleedType::Sdh,
        ..Default::default()
    }
}

#[test]
fn shift_of_six_mm_is_an_emergency() {
    let selection = brain(
        r#"{"module":"brain","bleedType":"SDH","midlineShiftMm":"6",
            "basalCisternEffacement":"none","herniations":[]}"#,
    );
    assert_eq!(hemorrhage_urgency(&selection), Urgency::Emergency);

    let narrative = BrainModule.compose(&selection);
    assert_eq!(narrative.overall_urgency(), Urgency::Emergency);
    assert_eq!(
        narrative.report_lines,
        vec!["Subdural hematoma with 6 mm midline shift.".to_string()]
    );
    assert!(narrative
        .recommendations
        .contains(&"Immediate neurosurgical consultation.".to_string()));
}

#[test]
fn hyperdense_collection_is_inferred_acute() {
    let selection = brain(
        r#"{"module":"brain","bleedType":"SDH","ctDensity":"Hyperdense","extraAxialAge":"Unknown"}"#,
    );
    let age = resolved_age(&selection);
    assert_eq!(age.value, ExtraAxialAge::Acute);
    assert_eq!(age.source, ResolutionSource::Inferred);

    let narrative = BrainModule.compose(&selection);
    let line = narrative.report_lines[0].to_lowercase();
    assert!(line.contains("acute subdural hematoma"), "{line}");
    assert!(!line.contains("unknown"));
    assert_eq!(narrative.final_sentence, "Acute subdural hematoma.");

    let suggestion = &narrative.suggestions[0];
    assert!(suggestion
        .details
        .contains(&"Estimated age: acute (inferred from CT density)".to_string()));
}

#[test]
fn explicit_age_hides_the_density_suggestion() {
    let selection = BrainSelection {
        ct_density: CtDensity::Hyperdense,
        extra_axial_age: ExtraAxialAge::Chronic,
        ..sdh()
    };
    let age = resolved_age(&selection);
    assert_eq!(age.value, ExtraAxialAge::Chronic);
    assert_eq!(age.source, ResolutionSource::Explicit);

    let narrative = BrainModule.compose(&selection);
    assert_eq!(narrative.report_lines, vec!["Chronic subdural hematoma.".to_string()]);
    assert!(narrative.differential(HEMORRHAGE, "Chronic subdural hematoma").is_some());
    assert!(narrative
        .differential(HEMORRHAGE, "Acute traumatic subdural hematoma")
        .is_none());
}

#[test]
fn empty_state_yields_the_default_impression() {
    let narrative = compose_narrative(&SelectionState::Brain(BrainSelection::default()));

    assert!(narrative.report_lines.is_empty());
    assert!(narrative.differentials.is_empty());
    assert!(narrative.fired_rules.is_empty());
    assert_eq!(narrative.final_sentence, NO_ACUTE_FINDING);
    assert_eq!(
        narrative.export_text,
        "BRAIN IMAGING\n\nIMPRESSION\nNo significant acute intracranial finding.\n"
    );
}

#[test]
fn urgency_cascade_stops_at_the_first_match() {
    let herniated = BrainSelection {
        herniations: vec![Herniation::Uncal],
        midline_shift_mm: "2".to_string(),
        ..sdh()
    };
    assert_eq!(hemorrhage_urgency(&herniated), Urgency::Emergency);

    let cisterns = BrainSelection {
        basal_cistern_effacement: Degree::Mild,
        ..sdh()
    };
    assert_eq!(hemorrhage_urgency(&cisterns), Urgency::Priority);

    let ventricles = BrainSelection {
        ventricular_compression: Degree::Mild,
        midline_shift_mm: "0".to_string(),
        ..sdh()
    };
    assert_eq!(hemorrhage_urgency(&ventricles), Urgency::Priority);

    let quiet = BrainSelection {
        midline_shift_mm: "0".to_string(),
        ..sdh()
    };
    assert_eq!(hemorrhage_urgency(&quiet), Urgency::Routine);
}

#[test]
fn unparsable_shift_is_unmeasured_not_zero() {
    let selection = BrainSelection {
        midline_shift_mm: "abc".to_string(),
        ..sdh()
    };
    assert_eq!(hemorrhage_urgency(&selection), Urgency::Routine);

    let narrative = BrainModule.compose(&selection);
    assert_eq!(narrative.report_lines, vec!["Subdural hematoma.".to_string()]);
    assert!(narrative.suggestions[0]
        .details
        .contains(&"Midline shift: unmeasured".to_string()));
}

#[test]
fn hemorrhage_sentence_follows_clause_order() {
    let selection = BrainSelection {
        laterality: Laterality::Left,
        bleed_region: "  frontoparietal   convexity ".to_string(),
        thickness_mm: "12".to_string(),
        ct_density: CtDensity::Hyperdense,
        midline_shift_mm: "7,5".to_string(),
        basal_cistern_effacement: Degree::Marked,
        ventricular_compression: Degree::Mild,
        herniations: vec![Herniation::Subfalcine],
        ..sdh()
    };
    let narrative = BrainModule.compose(&selection);
    assert_eq!(
        narrative.report_lines[0],
        "Left frontoparietal convexity 12 mm acute subdural hematoma with 7.5 mm midline shift \
         and marked basal cistern effacement, mild ventricular compression and subfalcine herniation."
    );
    assert_eq!(
        narrative.final_sentence,
        "Acute left subdural hematoma with significant mass effect requiring emergency \
         neurosurgical assessment."
    );
}

#[test]
fn mass_effect_without_shift_is_contrasted() {
    let selection = BrainSelection {
        midline_shift_mm: "0".to_string(),
        ventricular_compression: Degree::Mild,
        ..sdh()
    };
    let narrative = BrainModule.compose(&selection);
    assert_eq!(
        narrative.report_lines[0],
        "Subdural hematoma without midline shift but with mild ventricular compression."
    );
}

#[test]
fn shared_recommendations_appear_once() {
    let selection = BrainSelection {
        midline_shift_mm: "3".to_string(),
        hydrocephalus: Presence::Present,
        ..sdh()
    };
    let narrative = BrainModule.compose(&selection);
    let count = narrative
        .recommendations
        .iter()
        .filter(|r| r.as_str() == "Urgent neurosurgical consultation.")
        .count();
    assert_eq!(count, 1);
    assert_eq!(narrative.report_lines.len(), 2);
    assert!(narrative.final_sentence.ends_with("; additional findings as described."));
}

#[test]
fn trauma_rule_takes_precedence_over_the_generic_one() {
    let selection = BrainSelection {
        ct_density: CtDensity::Hyperdense,
        trauma: Presence::Present,
        ..sdh()
    };
    let narrative = BrainModule.compose(&selection);
    let entry = narrative
        .differential(HEMORRHAGE, "Acute traumatic subdural hematoma")
        .unwrap();
    assert_eq!(entry.likelihood, Likelihood::High);
    assert_eq!(entry.rationale, vec!["Acute crescentic collection after trauma".to_string()]);
    assert!(narrative.fired_rules.contains(&"hem.sdh.acute.trauma".to_string()));
    assert!(!narrative.fired_rules.contains(&"hem.sdh.acute".to_string()));
}

#[test]
fn hygroma_is_raised_without_mass_effect_and_ranked_below_chronic_sdh() {
    let selection = BrainSelection {
        ct_density: CtDensity::Hypodense,
        midline_shift_mm: "0".to_string(),
        basal_cistern_effacement: Degree::None,
        ..sdh()
    };
    let narrative = BrainModule.compose(&selection);
    let group = &narrative.differentials[0];
    assert_eq!(group.category, HEMORRHAGE);
    assert_eq!(group.entries[0].name, "Chronic subdural hematoma");
    assert_eq!(group.entries[1].name, "Subdural hygroma");
    assert_eq!(group.entries[1].likelihood, Likelihood::Medium);
    assert_eq!(
        group.entries[1].rationale,
        vec!["CSF-density subdural collection".to_string(), "No mass effect".to_string()]
    );
}

#[test]
fn hyperdense_vessel_implies_hyperacute_infarct() {
    let selection = BrainSelection {
        infarct: Presence::Present,
        hyperdense_vessel: Presence::Present,
        ..Default::default()
    };
    let stage = resolved_infarct_stage(&selection);
    assert_eq!(stage.value, InfarctStage::Hyperacute);
    assert_eq!(stage.source, ResolutionSource::Inferred);

    let narrative = BrainModule.compose(&selection);
    assert_eq!(narrative.overall_urgency(), Urgency::Emergency);
    assert!(narrative.next_studies.contains(&"CT perfusion".to_string()));
    let entry = narrative.differential(ISCHEMIA, "Acute arterial infarct").unwrap();
    assert_eq!(entry.likelihood, Likelihood::High);
    assert_eq!(entry.rationale.len(), 2);

    let chronic = BrainSelection {
        infarct_stage: InfarctStage::Chronic,
        ..selection
    };
    let narrative = BrainModule.compose(&chronic);
    assert!(narrative.fired_rules.contains(&"isch.chronic".to_string()));
    assert!(!narrative.fired_rules.contains(&"isch.early".to_string()));
}

#[test]
fn ring_enhancing_mass_with_fever_favors_abscess() {
    let selection = BrainSelection {
        mass: Presence::Present,
        mass_location: "right frontal lobe".to_string(),
        mass_size_mm: "25".to_string(),
        mass_enhancement: MassEnhancement::Ring,
        mass_multiplicity: Multiplicity::Single,
        fever: Presence::Present,
        ..Default::default()
    };
    let narrative = BrainModule.compose(&selection);

    assert_eq!(
        narrative.report_lines,
        vec!["25 mm ring-enhancing mass in the right frontal lobe.".to_string()]
    );
    let group = &narrative.differentials[0];
    assert_eq!(group.category, MASS);
    assert_eq!(group.entries[0].name, "Cerebral abscess");
    assert_eq!(group.entries[0].likelihood, Likelihood::High);
    assert_eq!(group.entries[1].name, "High-grade glioma");
    assert_eq!(
        narrative.final_sentence,
        "Intracranial mass lesion, most consistent with cerebral abscess."
    );
}

#[test]
fn known_malignancy_counts_once_toward_metastases() {
    let selection = BrainSelection {
        mass: Presence::Present,
        known_malignancy: Presence::Present,
        ..Default::default()
    };
    let narrative = BrainModule.compose(&selection);
    let entry = narrative.differential(MASS, "Metastases").unwrap();
    assert_eq!(entry.likelihood, Likelihood::Medium);
    assert_eq!(entry.rationale, vec!["Known malignancy".to_string()]);
    assert!(narrative.fired_rules.contains(&"mass.malignancy".to_string()));
    assert!(!narrative.fired_rules.iter().any(|id| id == "mass.malignancy.metastases"));

    let edematous = BrainSelection {
        mass_edema: Degree::Marked,
        ..selection
    };
    let narrative = BrainModule.compose(&edematous);
    let entry = narrative.differential(MASS, "Metastases").unwrap();
    assert_eq!(entry.likelihood, Likelihood::High);
    assert_eq!(
        entry.rationale,
        vec![
            "Known malignancy".to_string(),
            "Edema out of proportion to lesion size".to_string()
        ]
    );
}

#[test]
fn shared_studies_appear_once() {
    let selection = BrainSelection {
        infarct: Presence::Present,
        mass: Presence::Present,
        mass_enhancement: MassEnhancement::Ring,
        ..Default::default()
    };
    let narrative = BrainModule.compose(&selection);
    let count = narrative
        .next_studies
        .iter()
        .filter(|s| s.as_str() == "MRI with DWI/ADC")
        .count();
    assert_eq!(count, 1);
}

#[test]
fn composition_is_idempotent() {
    let selection = BrainSelection {
        laterality: Laterality::Right,
        ct_density: CtDensity::Mixed,
        midline_shift_mm: "4".to_string(),
        anticoagulated: Presence::Present,
        ..sdh()
    };
    let state = SelectionState::Brain(selection);
    assert_eq!(compose_narrative(&state), compose_narrative(&state));
}
