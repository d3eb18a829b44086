//! Brain CT/MR findings: intracranial hemorrhage, ischemia, mass lesions, and
//! ventricular size.

pub mod rules;
pub mod selection;

use radcard_core::models::narrative::{DifferentialGroup, Narrative, Urgency};

use crate::board::leading_candidate;
use crate::cascade::first_match;
use crate::choice::{Degree, Multiplicity};
use crate::compose::Draft;
use crate::findings::Findings;
use crate::measure::format_mm;
use crate::resolve::{resolve, ResolutionSource, Resolved};
use crate::rules::apply_rules;
use crate::sentence::{capitalize, join_clauses, list_phrase, sentence};
use crate::NarrativeModule;

use selection::{
    BleedType, BrainSelection, CtDensity, ExtraAxialAge, InfarctAppearance, InfarctStage,
    MassEnhancement,
};

pub const NO_ACUTE_FINDING: &str = "No significant acute intracranial finding.";

/// Midline shift at or above this is an emergency on its own.
pub const EMERGENCY_SHIFT_MM: f64 = 5.0;

/// Suggested hematoma age for a CT density reading, with its caveat.
pub fn age_from_density(density: CtDensity) -> (ExtraAxialAge, &'static str) {
    match density {
        CtDensity::Hyperdense => (
            ExtraAxialAge::Acute,
            "Hyperdense blood is usually acute (under 3 days); anemia or coagulopathy can lower density.",
        ),
        CtDensity::Isodense => (
            ExtraAxialAge::Subacute,
            "Isodense collections suggest a subacute stage (about 3 days to 3 weeks).",
        ),
        CtDensity::Hypodense => (
            ExtraAxialAge::Chronic,
            "Hypodense collections suggest a chronic stage (over 3 weeks); hyperacute unclotted blood can look similar.",
        ),
        CtDensity::Mixed => (
            ExtraAxialAge::AcuteOnChronic,
            "Mixed density suggests acute-on-chronic bleeding or hyperacute unclotted blood.",
        ),
        CtDensity::Unknown => (
            ExtraAxialAge::Unknown,
            "Density not assessed; age cannot be inferred.",
        ),
    }
}

/// Explicit age selection, else the density-based suggestion, else unknown.
pub fn resolved_age(selection: &BrainSelection) -> Resolved<ExtraAxialAge> {
    let (inferred, _) = age_from_density(selection.ct_density);
    resolve(selection.extra_axial_age, Some(inferred))
}

pub fn infarct_stage_from_appearance(selection: &BrainSelection) -> InfarctStage {
    match selection.infarct_appearance {
        InfarctAppearance::SubtleHypodensity => InfarctStage::Acute,
        InfarctAppearance::EstablishedHypodensity => InfarctStage::Subacute,
        InfarctAppearance::Encephalomalacia => InfarctStage::Chronic,
        InfarctAppearance::Unknown if selection.hyperdense_vessel.is_present() => {
            InfarctStage::Hyperacute
        }
        InfarctAppearance::Unknown => InfarctStage::Unknown,
    }
}

/// Explicit stage selection, else the stage suggested by CT appearance, else unknown.
pub fn resolved_infarct_stage(selection: &BrainSelection) -> Resolved<InfarctStage> {
    resolve(
        selection.infarct_stage,
        Some(infarct_stage_from_appearance(selection)),
    )
}

/// Urgency of an intracranial hemorrhage from its mass effect.
pub fn hemorrhage_urgency(selection: &BrainSelection) -> Urgency {
    let shift = selection.midline_shift();
    first_match(
        &[
            (selection.has_herniation(), Urgency::Emergency),
            (selection.basal_cistern_effacement == Degree::Marked, Urgency::Emergency),
            (shift.is_some_and(|s| s >= EMERGENCY_SHIFT_MM), Urgency::Emergency),
            (selection.ventricular_compression == Degree::Marked, Urgency::Priority),
            (selection.basal_cistern_effacement == Degree::Mild, Urgency::Priority),
            (shift.is_some_and(|s| s > 0.0), Urgency::Priority),
            (selection.ventricular_compression == Degree::Mild, Urgency::Priority),
        ],
        Urgency::Routine,
    )
}

pub fn infarct_urgency(selection: &BrainSelection) -> Urgency {
    let stage = resolved_infarct_stage(selection).value;
    first_match(
        &[
            (stage.is_early(), Urgency::Emergency),
            (selection.hemorrhagic_transformation.is_present(), Urgency::Priority),
            (stage == InfarctStage::Subacute, Urgency::Priority),
        ],
        Urgency::Routine,
    )
}

pub fn mass_urgency(selection: &BrainSelection) -> Urgency {
    first_match(
        &[
            (selection.has_herniation(), Urgency::Emergency),
            (selection.mass_edema == Degree::Marked, Urgency::Priority),
            (selection.hydrocephalus.is_present(), Urgency::Priority),
            (selection.midline_shift().is_some_and(|s| s > 0.0), Urgency::Priority),
        ],
        Urgency::Routine,
    )
}

fn source_label(source: ResolutionSource) -> &'static str {
    match source {
        ResolutionSource::Explicit => "selected",
        ResolutionSource::Inferred => "inferred from CT density",
        ResolutionSource::Unknown => "unknown",
    }
}

/// Effacement, compression, and herniation phrases in fixed order.
fn mass_effect_parts(selection: &BrainSelection) -> Vec<String> {
    let mut parts = Vec::new();
    if let Some(adj) = selection.basal_cistern_effacement.adjective() {
        parts.push(format!("{adj} basal cistern effacement"));
    }
    if let Some(adj) = selection.ventricular_compression.adjective() {
        parts.push(format!("{adj} ventricular compression"));
    }
    parts.extend(selection.herniations.iter().map(|h| h.phrase().to_string()));
    parts
}

fn shift_clause(shift: Option<f64>) -> Option<String> {
    match shift {
        Some(s) if s > 0.0 => Some(format!("with {} midline shift", format_mm(Some(s)))),
        Some(_) => Some("without midline shift".to_string()),
        None => None,
    }
}

fn joined_mass_effect(shift: Option<f64>, parts: &[String]) -> Option<String> {
    list_phrase(parts).map(|phrase| match shift {
        Some(s) if s > 0.0 => format!("and {phrase}"),
        Some(_) => format!("but with {phrase}"),
        None => format!("with {phrase}"),
    })
}

/// laterality → region → thickness → age → type → shift → mass effect
pub fn hemorrhage_line(selection: &BrainSelection) -> Option<String> {
    let noun = selection.bleed_type.noun()?;
    let shift = selection.midline_shift();
    let region = selection.bleed_region.trim();
    sentence([
        selection.laterality.adjective().map(str::to_string),
        (!region.is_empty()).then(|| region.to_string()),
        selection.thickness().map(|t| format_mm(Some(t))),
        resolved_age(selection).value.adjective().map(str::to_string),
        Some(noun.to_string()),
        shift_clause(shift),
        joined_mass_effect(shift, &mass_effect_parts(selection)),
    ])
}

fn infarct_line(selection: &BrainSelection) -> Option<String> {
    if !selection.infarct.is_present() {
        return None;
    }
    let appearance = selection.infarct_appearance.phrase();
    let mut extras = Vec::new();
    if selection.hemorrhagic_transformation.is_present() {
        extras.push("hemorrhagic transformation");
    }
    if selection.hyperdense_vessel.is_present() {
        extras.push("a hyperdense vessel sign");
    }
    let extras = list_phrase(&extras).map(|phrase| match appearance {
        Some(_) => format!("and {phrase}"),
        None => format!("with {phrase}"),
    });
    sentence([
        resolved_infarct_stage(selection).value.adjective().map(str::to_string),
        selection.infarct_laterality.adjective().map(str::to_string),
        selection.infarct_territory.phrase().map(str::to_string),
        Some("infarct".to_string()),
        appearance.map(str::to_string),
        extras,
    ])
}

fn mass_line(selection: &BrainSelection) -> Option<String> {
    if !selection.mass.is_present() {
        return None;
    }
    let multiple = selection.mass_multiplicity == Multiplicity::Multiple;
    let size = selection.mass_size();
    let location = selection.mass_location.trim();
    let edema = selection
        .mass_edema
        .adjective()
        .map(|adj| format!("with {adj} perilesional edema"));
    let has_edema = edema.is_some();

    // Hemorrhage lines already carry mass effect.
    let mass_effect = if selection.has_bleed() {
        None
    } else {
        let mut parts = Vec::new();
        if let Some(s) = selection.midline_shift().filter(|s| *s > 0.0) {
            parts.push(format!("{} midline shift", format_mm(Some(s))));
        }
        parts.extend(mass_effect_parts(selection));
        list_phrase(&parts).map(|phrase| {
            if has_edema {
                format!("and {phrase}")
            } else {
                format!("with {phrase}")
            }
        })
    };

    sentence([
        multiple.then(|| "multiple".to_string()),
        size.filter(|_| !multiple).map(|s| format_mm(Some(s))),
        selection.mass_enhancement.adjective().map(str::to_string),
        Some(if multiple { "masses" } else { "mass" }.to_string()),
        (!location.is_empty()).then(|| format!("in the {location}")),
        size.filter(|_| multiple)
            .map(|s| format!("measuring up to {}", format_mm(Some(s)))),
        edema,
        mass_effect,
    ])
}

fn ventricle_line(selection: &BrainSelection) -> Option<String> {
    if !selection.hydrocephalus.is_present() {
        return None;
    }
    sentence([
        Some("hydrocephalus"),
        selection
            .transependymal_flow
            .is_present()
            .then_some("with transependymal CSF flow"),
    ])
}

fn fracture_line(selection: &BrainSelection) -> Option<String> {
    selection
        .skull_fracture
        .is_present()
        .then(|| "Skull fracture.".to_string())
}

fn hemorrhage_findings(selection: &BrainSelection, findings: &mut Findings) {
    let Some(noun) = selection.bleed_type.noun() else {
        return;
    };
    let urgency = hemorrhage_urgency(selection);
    let age = resolved_age(selection);
    let shift = selection.midline_shift();

    let mut details = vec![
        format!("Type: {noun}"),
        format!("Midline shift: {}", format_mm(shift)),
    ];
    if selection.bleed_type.is_extra_axial() {
        details.push(format!("Maximum thickness: {}", format_mm(selection.thickness())));
    }
    match age.value.adjective() {
        Some(adj) => details.push(format!("Estimated age: {adj} ({})", source_label(age.source))),
        None => details.push("Estimated age: unknown".to_string()),
    }
    if age.source == ResolutionSource::Inferred {
        details.push(age_from_density(selection.ct_density).1.to_string());
    }
    findings.suggest("Intracranial hemorrhage", urgency, details);

    match urgency {
        Urgency::Emergency => {
            findings.recommend("Immediate neurosurgical consultation.");
            findings.warn(
                "Herniation or significant mass effect: emergency neurosurgical assessment required.",
            );
        }
        Urgency::Priority => findings.recommend("Urgent neurosurgical consultation."),
        Urgency::Routine => findings.recommend("Short-interval follow-up CT to assess stability."),
    }

    for herniation in &selection.herniations {
        findings.warn(format!("{} present.", capitalize(herniation.phrase())));
    }
    if selection.anticoagulated.is_present() {
        findings.warn("Intracranial hemorrhage on anticoagulation: consider urgent reversal.");
        findings.recommend("Review coagulation profile (INR, platelets).");
    }
    if selection.ct_density == CtDensity::Mixed {
        findings.warn("Mixed density may indicate active bleeding (swirl sign).");
    }
    if !age.is_known() {
        findings.recommend("Correlate with time of injury; MRI can help date the hemorrhage.");
        findings.study("MRI brain");
    }
    if selection.bleed_type.is_extra_axial() && selection.ct_density == CtDensity::Isodense {
        findings.warn(
            "Isodense collections are easily missed; review with subdural window settings.",
        );
        findings.study("MRI brain");
    }
    match selection.bleed_type {
        BleedType::Sah if !selection.trauma.is_present() => {
            findings.recommend("Exclude an aneurysm with vascular imaging.");
            findings.study("CT angiography of the circle of Willis");
        }
        BleedType::Iph if !selection.trauma.is_present() => {
            findings.recommend("Follow-up MRI to exclude an underlying lesion.");
            findings.study("MRI with SWI");
            findings.study("MRI with post-contrast T1");
        }
        BleedType::Ivh => {
            findings.warn("Intraventricular blood: monitor for obstructive hydrocephalus.");
        }
        BleedType::Edh if selection.skull_fracture.is_present() => {
            findings.warn(
                "Epidural hematoma with fracture can expand rapidly; close neurological monitoring.",
            );
        }
        _ => {}
    }
}

fn infarct_findings(selection: &BrainSelection, findings: &mut Findings) {
    if !selection.infarct.is_present() {
        return;
    }
    let stage = resolved_infarct_stage(selection);
    let mut details = Vec::new();
    match stage.value.adjective() {
        Some(adj) => details.push(format!(
            "Stage: {adj} ({})",
            match stage.source {
                ResolutionSource::Inferred => "inferred from CT appearance",
                _ => "selected",
            }
        )),
        None => details.push("Stage: unknown".to_string()),
    }
    if let Some(territory) = selection.infarct_territory.phrase() {
        details.push(format!("Territory: {territory}"));
    }
    if stage.source == ResolutionSource::Inferred {
        details.push(
            "Stage inferred from CT appearance; correlate with symptom onset.".to_string(),
        );
    }
    findings.suggest("Ischemic stroke", infarct_urgency(selection), details);

    if stage.value.is_early() {
        findings.recommend("Activate the stroke pathway; correlate with symptom onset time.");
        findings.study("CT angiography of the head and neck");
        findings.study("CT perfusion");
        findings.study("MRI with DWI/ADC");
    } else if !stage.is_known() {
        findings.study("MRI with DWI/ADC");
    }
    if selection.hemorrhagic_transformation.is_present() {
        findings.warn(
            "Hemorrhagic transformation: review antithrombotic and thrombolytic therapy.",
        );
    }
    if selection.hyperdense_vessel.is_present() {
        findings.warn("Hyperdense vessel sign suggests large vessel occlusion.");
    }
}

fn mass_findings(selection: &BrainSelection, findings: &mut Findings) {
    if !selection.mass.is_present() {
        return;
    }
    let mut details = vec![format!("Size: {}", format_mm(selection.mass_size()))];
    let location = selection.mass_location.trim();
    if !location.is_empty() {
        details.push(format!("Location: {location}"));
    }
    findings.suggest("Intracranial mass", mass_urgency(selection), details);

    findings.recommend("Neuro-oncology multidisciplinary review.");
    findings.study("MRI with post-contrast T1");
    if selection.mass_enhancement == MassEnhancement::Ring {
        findings.study("MRI with DWI/ADC");
        findings.study("MR perfusion");
        if selection.fever.is_present() {
            findings.warn("Ring enhancement with fever: exclude cerebral abscess.");
        }
    }
    if selection.mass_multiplicity == Multiplicity::Multiple
        || selection.known_malignancy.is_present()
    {
        findings.study("Staging CT of the chest, abdomen and pelvis");
    }
    if selection.mass_edema == Degree::Marked {
        findings.recommend("Consider corticosteroids for vasogenic edema.");
    }
}

fn ventricle_findings(selection: &BrainSelection, findings: &mut Findings) {
    if !selection.hydrocephalus.is_present() {
        return;
    }
    let transependymal = selection.transependymal_flow.is_present();
    let urgency = if transependymal {
        Urgency::Emergency
    } else {
        Urgency::Priority
    };
    findings.suggest("Hydrocephalus", urgency, Vec::new());
    findings.recommend("Urgent neurosurgical consultation.");
    if transependymal {
        findings.warn("Transependymal CSF flow suggests acute or decompensated hydrocephalus.");
    }
}

fn final_sentence(
    selection: &BrainSelection,
    lines: &[String],
    differentials: &[DifferentialGroup],
) -> String {
    if lines.is_empty() {
        return NO_ACUTE_FINDING.to_string();
    }

    let lead = if let Some(noun) = selection.bleed_type.noun() {
        let suffix = match hemorrhage_urgency(selection) {
            Urgency::Emergency => {
                Some("with significant mass effect requiring emergency neurosurgical assessment")
            }
            Urgency::Priority => Some("with mild mass effect"),
            Urgency::Routine => None,
        };
        join_clauses([
            resolved_age(selection).value.adjective(),
            selection.laterality.adjective(),
            Some(noun),
            suffix,
        ])
    } else if selection.infarct.is_present() {
        join_clauses([
            resolved_infarct_stage(selection).value.adjective(),
            selection.infarct_laterality.adjective(),
            selection.infarct_territory.phrase(),
            Some("infarct"),
        ])
    } else if selection.mass.is_present() {
        let favored = differentials
            .iter()
            .find(|g| g.category == rules::MASS)
            .map(std::slice::from_ref)
            .and_then(leading_candidate)
            .map(|d| format!("most consistent with {}", d.name.to_lowercase()));
        match favored {
            Some(favored) => format!("intracranial mass lesion, {favored}"),
            None => "intracranial mass lesion".to_string(),
        }
    } else if selection.hydrocephalus.is_present() {
        "hydrocephalus".to_string()
    } else {
        "skull fracture without intracranial hemorrhage".to_string()
    };

    let mut text = capitalize(&lead);
    if lines.len() > 1 {
        text.push_str("; additional findings as described");
    }
    text.push('.');
    text
}

pub struct BrainModule;

impl NarrativeModule for BrainModule {
    type Selection = BrainSelection;

    fn id(&self) -> &str {
        "brain"
    }

    fn name(&self) -> &str {
        "Brain"
    }

    fn compose(&self, selection: &BrainSelection) -> Narrative {
        let mut draft = Draft::new();

        draft.line(hemorrhage_line(selection));
        draft.line(fracture_line(selection));
        draft.line(infarct_line(selection));
        draft.line(mass_line(selection));
        draft.line(ventricle_line(selection));

        draft.fired_rules = apply_rules(&rules::RULES, selection, &mut draft.board);

        hemorrhage_findings(selection, &mut draft.findings);
        infarct_findings(selection, &mut draft.findings);
        mass_findings(selection, &mut draft.findings);
        ventricle_findings(selection, &mut draft.findings);

        draft.finish(self.id(), "BRAIN IMAGING", |lines, differentials| {
            final_sentence(selection, lines, differentials)
        })
    }
}
