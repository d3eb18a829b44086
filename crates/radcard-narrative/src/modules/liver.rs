//! Hepatobiliary ultrasound/CT findings: parenchyma, focal lesions, portal
//! venous system, bile ducts, gallbladder, ascites, and spleen.

pub mod rules;
pub mod selection;

use radcard_core::models::narrative::{DifferentialGroup, Narrative, Urgency};

use crate::board::leading_candidate;
use crate::cascade::first_match;
use crate::choice::Presence;
use crate::compose::Draft;
use crate::findings::Findings;
use crate::measure::format_mm;
use crate::resolve::{resolve, ResolutionSource, Resolved};
use crate::rules::apply_rules;
use crate::sentence::{capitalize, list_phrase, sentence};
use crate::NarrativeModule;

use selection::{
    Ascites, Contour, Echogenicity, Enhancement, LesionCategory, LesionEcho, LiverSelection,
    LiverSize, PortalVein, SteatosisGrade,
};

pub const NO_ACUTE_FINDING: &str = "No significant acute hepatobiliary finding.";

pub const GB_WALL_THICK_MM: f64 = 3.0;
pub const CBD_DILATED_MM: f64 = 6.0;
pub const PORTAL_DILATED_MM: f64 = 13.0;
pub const SPLEEN_ENLARGED_MM: f64 = 130.0;
pub const LIVER_ENLARGED_MM: f64 = 160.0;
pub const POLYP_REFERRAL_MM: f64 = 10.0;
pub const POLYP_FOLLOW_UP_MM: f64 = 6.0;

/// Steatosis grade suggested by parenchymal echogenicity.
pub fn inferred_steatosis(selection: &LiverSelection) -> SteatosisGrade {
    let obscured = selection.vessel_obscuration.is_present();
    match selection.echogenicity {
        Echogenicity::Normal => SteatosisGrade::None,
        Echogenicity::MildlyIncreased | Echogenicity::MarkedlyIncreased if obscured => {
            SteatosisGrade::Severe
        }
        Echogenicity::MildlyIncreased => SteatosisGrade::Mild,
        Echogenicity::MarkedlyIncreased => SteatosisGrade::Moderate,
        Echogenicity::Coarse | Echogenicity::Unknown => SteatosisGrade::Unknown,
    }
}

pub fn resolved_steatosis(selection: &LiverSelection) -> Resolved<SteatosisGrade> {
    resolve(selection.steatosis_grade, Some(inferred_steatosis(selection)))
}

pub fn resolved_liver_size(selection: &LiverSelection) -> Resolved<LiverSize> {
    let inferred = selection.liver_span().map(|span| {
        if span > LIVER_ENLARGED_MM {
            LiverSize::Enlarged
        } else {
            LiverSize::Normal
        }
    });
    resolve(selection.liver_size, inferred)
}

pub fn resolved_splenomegaly(selection: &LiverSelection) -> Resolved<Presence> {
    resolve(
        selection.splenomegaly,
        Some(Presence::from_measure(selection.spleen_span(), |v| {
            v > SPLEEN_ENLARGED_MM
        })),
    )
}

pub fn wall_thickened(selection: &LiverSelection) -> bool {
    selection.gb_wall().is_some_and(|w| w >= GB_WALL_THICK_MM)
}

pub fn cbd_dilated(selection: &LiverSelection) -> bool {
    selection.cbd().is_some_and(|d| d > CBD_DILATED_MM)
}

pub fn biliary_dilatation(selection: &LiverSelection) -> bool {
    cbd_dilated(selection) || selection.intrahepatic_dilatation.is_present()
}

pub fn portal_dilated(selection: &LiverSelection) -> bool {
    selection.portal_diameter().is_some_and(|d| d > PORTAL_DILATED_MM)
}

pub fn cirrhotic(selection: &LiverSelection) -> bool {
    selection.known_cirrhosis.is_present() || selection.contour == Contour::Nodular
}

/// Lesion category suggested by echo pattern, enhancement, and context.
pub fn inferred_lesion_category(selection: &LiverSelection) -> LesionCategory {
    if !selection.has_lesion() {
        return LesionCategory::Unknown;
    }
    let enhancement = selection.lesion_enhancement;
    let malignancy = selection.known_malignancy.is_present();
    first_match(
        &[
            (
                enhancement == Enhancement::Rim && selection.fever.is_present(),
                LesionCategory::Infective,
            ),
            (
                enhancement == Enhancement::ArterialWashout && cirrhotic(selection),
                LesionCategory::Suspicious,
            ),
            (
                selection.portal_vein == PortalVein::TumorThrombus,
                LesionCategory::Suspicious,
            ),
            (
                malignancy
                    && (selection.multiple_lesions()
                        || enhancement == Enhancement::Rim
                        || selection.lesion_echo == LesionEcho::Hypoechoic),
                LesionCategory::Suspicious,
            ),
            (
                selection.lesion_echo == LesionEcho::Anechoic,
                LesionCategory::Benign,
            ),
            (
                enhancement == Enhancement::PeripheralNodular,
                LesionCategory::Benign,
            ),
        ],
        LesionCategory::Indeterminate,
    )
}

pub fn resolved_lesion_category(selection: &LiverSelection) -> Resolved<LesionCategory> {
    resolve(
        selection.lesion_category,
        Some(inferred_lesion_category(selection)),
    )
}

pub fn suspicious_in_cirrhosis(selection: &LiverSelection) -> bool {
    cirrhotic(selection)
        && resolved_lesion_category(selection).value == LesionCategory::Suspicious
}

/// Calculous cholecystitis: stones, Murphy sign, and wall thickening or fluid.
pub fn acute_cholecystitis(selection: &LiverSelection) -> bool {
    selection.gallstones.is_present()
        && selection.sonographic_murphy.is_present()
        && (wall_thickened(selection) || selection.pericholecystic_fluid.is_present())
}

pub fn acalculous_cholecystitis(selection: &LiverSelection) -> bool {
    selection.gallstones.is_absent()
        && wall_thickened(selection)
        && (selection.gb_distension.is_present() || selection.pericholecystic_fluid.is_present())
}

/// Dilated ducts with fever and jaundice.
pub fn cholangitis(selection: &LiverSelection) -> bool {
    biliary_dilatation(selection) && selection.fever.is_present() && selection.jaundice.is_present()
}

pub fn gallbladder_urgency(selection: &LiverSelection) -> Urgency {
    let stones = selection.gallstones.is_present();
    first_match(
        &[
            (acute_cholecystitis(selection), Urgency::Emergency),
            (acalculous_cholecystitis(selection), Urgency::Emergency),
            (stones && wall_thickened(selection), Urgency::Priority),
            (stones && selection.sonographic_murphy.is_present(), Urgency::Priority),
        ],
        Urgency::Routine,
    )
}

pub fn biliary_urgency(selection: &LiverSelection) -> Urgency {
    first_match(
        &[
            (cholangitis(selection), Urgency::Emergency),
            (
                biliary_dilatation(selection) && selection.jaundice.is_present(),
                Urgency::Priority,
            ),
            (selection.choledocholithiasis.is_present(), Urgency::Priority),
        ],
        Urgency::Routine,
    )
}

pub fn lesion_urgency(selection: &LiverSelection) -> Urgency {
    let category = resolved_lesion_category(selection).value;
    first_match(
        &[
            (suspicious_in_cirrhosis(selection), Urgency::Priority),
            (category == LesionCategory::Suspicious, Urgency::Priority),
            (category == LesionCategory::Infective, Urgency::Priority),
        ],
        Urgency::Routine,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolypAction {
    Referral,
    FollowUp,
    NoFollowUp,
}

/// Management of a measured gallbladder polyp. Small polyps need follow-up
/// only when the adjacent wall is thickened.
pub fn polyp_action(selection: &LiverSelection) -> Option<PolypAction> {
    let size = selection.polyp_size()?;
    Some(first_match(
        &[
            (size >= POLYP_REFERRAL_MM, PolypAction::Referral),
            (size >= POLYP_FOLLOW_UP_MM, PolypAction::FollowUp),
            (wall_thickened(selection), PolypAction::FollowUp),
        ],
        PolypAction::NoFollowUp,
    ))
}

fn size_line(selection: &LiverSelection) -> Option<String> {
    if resolved_liver_size(selection).value != LiverSize::Enlarged {
        return None;
    }
    sentence([
        Some("hepatomegaly".to_string()),
        selection
            .liver_span()
            .map(|s| format!("with a craniocaudal span of {}", format_mm(Some(s)))),
    ])
}

fn parenchyma_lines(selection: &LiverSelection) -> [Option<String>; 2] {
    let coarse = (selection.echogenicity == Echogenicity::Coarse)
        .then(|| "Coarse heterogeneous parenchymal echotexture.".to_string());

    let steatosis = resolved_steatosis(selection);
    let steatosis = steatosis.value.adjective().and_then(|grade| {
        sentence([
            Some(format!("{grade} hepatic steatosis")),
            (steatosis.source == ResolutionSource::Inferred)
                .then(|| "based on increased parenchymal echogenicity".to_string()),
            selection
                .vessel_obscuration
                .is_present()
                .then(|| "with obscuration of the portal vein walls and diaphragm".to_string()),
        ])
    });
    [coarse, steatosis]
}

fn morphology_line(selection: &LiverSelection) -> Option<String> {
    let mut parts = Vec::new();
    if selection.contour == Contour::Nodular {
        parts.push("nodular liver surface contour");
    }
    if selection.caudate_hypertrophy.is_present() {
        parts.push("caudate lobe hypertrophy");
    }
    sentence([list_phrase(&parts)])
}

fn lesion_line(selection: &LiverSelection) -> Option<String> {
    if !selection.has_lesion() {
        return None;
    }
    let multiple = selection.multiple_lesions();
    let segment = selection.lesion_segment.trim();
    let size = selection.lesion_size().map(|s| {
        if multiple {
            format!("measuring up to {}", format_mm(Some(s)))
        } else {
            format!("measuring {}", format_mm(Some(s)))
        }
    });
    sentence([
        multiple.then(|| "multiple".to_string()),
        selection.lesion_echo.adjective().map(str::to_string),
        Some(if multiple { "focal liver lesions" } else { "focal liver lesion" }.to_string()),
        (!segment.is_empty()).then(|| format!("in segment {segment}")),
        size,
        selection.lesion_enhancement.phrase().map(str::to_string),
    ])
}

fn vascular_line(selection: &LiverSelection) -> Option<String> {
    let diameter = selection
        .portal_diameter()
        .filter(|_| portal_dilated(selection))
        .map(|d| format_mm(Some(d)));
    match selection.portal_vein {
        PortalVein::Thrombus | PortalVein::TumorThrombus => {
            let noun = if selection.portal_vein == PortalVein::TumorThrombus {
                "portal vein tumor thrombus"
            } else {
                "portal vein thrombus"
            };
            sentence([
                Some(noun.to_string()),
                diameter.map(|d| format!("with an expanded portal vein measuring {d}")),
            ])
        }
        _ => diameter.map(|d| format!("Dilated portal vein measuring {d}.")),
    }
}

fn biliary_line(selection: &LiverSelection) -> Option<String> {
    let mut parts = Vec::new();
    if selection.intrahepatic_dilatation.is_present() {
        parts.push("intrahepatic biliary dilatation".to_string());
    }
    if cbd_dilated(selection) {
        parts.push(format!(
            "dilated common bile duct measuring {}",
            format_mm(selection.cbd())
        ));
    }
    if selection.choledocholithiasis.is_present() {
        parts.push("choledocholithiasis".to_string());
    }
    sentence([list_phrase(&parts)])
}

fn gallbladder_line(selection: &LiverSelection) -> Option<String> {
    let mut parts = Vec::new();
    if selection.gallstones.is_present() {
        parts.push("cholelithiasis".to_string());
    }
    if wall_thickened(selection) {
        parts.push(format!(
            "gallbladder wall thickening measuring {}",
            format_mm(selection.gb_wall())
        ));
    }
    if selection.gb_distension.is_present() {
        parts.push("gallbladder distension".to_string());
    }
    if selection.pericholecystic_fluid.is_present() {
        parts.push("pericholecystic fluid".to_string());
    }
    if selection.sonographic_murphy.is_present() {
        parts.push("positive sonographic Murphy sign".to_string());
    }
    sentence([list_phrase(&parts)])
}

fn polyp_line(selection: &LiverSelection) -> Option<String> {
    selection
        .polyp_size()
        .map(|s| format!("Gallbladder polyp measuring {}.", format_mm(Some(s))))
}

fn peritoneum_lines(selection: &LiverSelection) -> [Option<String>; 2] {
    let ascites = selection
        .ascites
        .adjective()
        .and_then(|adj| sentence([Some(format!("{adj} ascites"))]));
    let spleen = resolved_splenomegaly(selection)
        .value
        .is_present()
        .then(|| {
            sentence([
                Some("splenomegaly".to_string()),
                selection
                    .spleen_span()
                    .map(|s| format!("with a span of {}", format_mm(Some(s)))),
            ])
        })
        .flatten();
    [ascites, spleen]
}

fn parenchyma_findings(selection: &LiverSelection, findings: &mut Findings) {
    let steatosis = resolved_steatosis(selection);
    if let Some(grade) = steatosis.value.adjective() {
        let source = match steatosis.source {
            ResolutionSource::Inferred => "inferred from echogenicity",
            _ => "selected",
        };
        findings.suggest(
            "Hepatic steatosis",
            Urgency::Routine,
            vec![format!("Grade: {grade} ({source})")],
        );
        findings.recommend("Correlate with metabolic risk factors and liver function tests.");
        if steatosis.value >= SteatosisGrade::Moderate {
            findings.study("Liver elastography");
        }
    }

    if cirrhotic(selection) || selection.echogenicity == Echogenicity::Coarse {
        let urgency = if selection.ascites == Ascites::Marked {
            Urgency::Priority
        } else {
            Urgency::Routine
        };
        findings.suggest("Chronic liver disease", urgency, Vec::new());
        findings.study("Liver elastography");
    }
    if cirrhotic(selection) {
        findings.recommend("Hepatocellular carcinoma surveillance with ultrasound every 6 months.");
    }
}

fn lesion_findings(selection: &LiverSelection, findings: &mut Findings) {
    if !selection.has_lesion() {
        return;
    }
    let category = resolved_lesion_category(selection);
    let mut details = Vec::new();
    if let Some(adj) = category.value.adjective() {
        let source = match category.source {
            ResolutionSource::Inferred => "inferred",
            _ => "selected",
        };
        details.push(format!("Category: {adj} ({source})"));
    }
    details.push(format!("Size: {}", format_mm(selection.lesion_size())));
    let segment = selection.lesion_segment.trim();
    if !segment.is_empty() {
        details.push(format!("Segment: {segment}"));
    }
    findings.suggest("Focal liver lesion", lesion_urgency(selection), details);

    match category.value {
        LesionCategory::Suspicious => {
            findings.recommend("Hepatobiliary multidisciplinary review.");
            findings.study("Multiphase contrast-enhanced MRI of the liver");
            if cirrhotic(selection) {
                findings.warn(
                    "Suspicious lesion in a cirrhotic liver: characterize with LI-RADS criteria.",
                );
                findings.recommend("Check serum AFP.");
            }
        }
        LesionCategory::Infective => {
            findings.warn(
                "Possible hepatic abscess: correlate with inflammatory markers and blood cultures.",
            );
            findings.recommend("Consider image-guided aspiration.");
        }
        LesionCategory::Indeterminate | LesionCategory::Unknown => {
            findings.study("Multiphase contrast-enhanced MRI of the liver");
        }
        LesionCategory::Benign => {}
    }
    if selection.multiple_lesions() && selection.known_malignancy.is_present() {
        findings.study("Staging CT of the chest, abdomen and pelvis");
    }
}

fn vascular_findings(selection: &LiverSelection, findings: &mut Findings) {
    if selection.portal_vein.has_thrombus() {
        findings.suggest("Portal vein thrombosis", Urgency::Priority, Vec::new());
        findings.warn("Portal vein thrombosis: assess extension and consider anticoagulation.");
        findings.study("Contrast-enhanced CT in the portal venous phase");
        if selection.portal_vein == PortalVein::TumorThrombus {
            findings.warn("Tumor thrombus: evaluate for hepatocellular carcinoma.");
        }
    }
    if portal_dilated(selection) {
        findings.suggest(
            "Portal hypertension",
            Urgency::Routine,
            vec![format!(
                "Portal vein diameter: {}",
                format_mm(selection.portal_diameter())
            )],
        );
        findings.study("Doppler ultrasound of the portal venous system");
    }
}

fn biliary_findings(selection: &LiverSelection, findings: &mut Findings) {
    if cholangitis(selection) {
        findings.warn("Biliary dilatation with fever and jaundice: suspect acute cholangitis.");
        findings.recommend("Urgent biliary decompression (ERCP).");
    }
    if biliary_dilatation(selection) || selection.choledocholithiasis.is_present() {
        findings.suggest(
            "Biliary obstruction",
            biliary_urgency(selection),
            vec![format!("CBD diameter: {}", format_mm(selection.cbd()))],
        );
        findings.recommend("Correlate with liver function tests (bilirubin, ALP, GGT).");
        findings.study("MRCP");
    }
    if selection.choledocholithiasis.is_present() {
        findings.recommend("ERCP for stone clearance.");
    }
}

fn gallbladder_findings(selection: &LiverSelection, findings: &mut Findings) {
    let acute = acute_cholecystitis(selection) || acalculous_cholecystitis(selection);
    if acute {
        let mut details = vec![format!("Wall thickness: {}", format_mm(selection.gb_wall()))];
        if acalculous_cholecystitis(selection) {
            details.push("No gallstones".to_string());
        }
        findings.suggest("Acute cholecystitis", gallbladder_urgency(selection), details);
        findings.recommend("Urgent surgical consultation.");
        if selection.pericholecystic_fluid.is_present() {
            findings.warn(
                "Pericholecystic fluid: assess for gangrenous cholecystitis or perforation.",
            );
        }
    } else if selection.gallstones.is_present() {
        findings.suggest("Cholelithiasis", gallbladder_urgency(selection), Vec::new());
        findings.recommend("Surgical review if symptomatic.");
    }

    if wall_thickened(selection)
        && !acute
        && (selection.ascites.is_present() || cirrhotic(selection))
    {
        findings.warn(
            "Gallbladder wall thickening may be secondary to ascites or chronic liver disease.",
        );
    }
    if selection.jaundice.is_present() && wall_thickened(selection) {
        findings.recommend("Correlate with liver function tests (bilirubin, ALP, GGT).");
    }

    if let Some(action) = polyp_action(selection) {
        let plan = match action {
            PolypAction::Referral => {
                findings.recommend("Surgical referral for cholecystectomy.");
                "Surgical referral"
            }
            PolypAction::FollowUp => {
                findings.recommend("Ultrasound follow-up of the gallbladder polyp in 6 months.");
                "Ultrasound follow-up"
            }
            PolypAction::NoFollowUp => "No follow-up required",
        };
        findings.suggest(
            "Gallbladder polyp",
            Urgency::Routine,
            vec![
                format!("Size: {}", format_mm(selection.polyp_size())),
                format!("Plan: {plan}"),
            ],
        );
    }
}

fn peritoneum_findings(selection: &LiverSelection, findings: &mut Findings) {
    if selection.ascites == Ascites::Marked {
        findings.recommend("Consider diagnostic paracentesis.");
    }
    if selection.ascites.is_present() && selection.fever.is_present() {
        findings.warn("Ascites with fever: exclude spontaneous bacterial peritonitis.");
    }
}

fn final_sentence(
    selection: &LiverSelection,
    lines: &[String],
    differentials: &[DifferentialGroup],
) -> String {
    if lines.is_empty() {
        return NO_ACUTE_FINDING.to_string();
    }

    let lead = if cholangitis(selection) {
        "findings suspicious for acute cholangitis".to_string()
    } else if acute_cholecystitis(selection) {
        "findings consistent with acute calculous cholecystitis".to_string()
    } else if acalculous_cholecystitis(selection) {
        "findings consistent with acute acalculous cholecystitis".to_string()
    } else if selection.portal_vein == PortalVein::TumorThrombus {
        "portal vein tumor thrombus".to_string()
    } else if selection.portal_vein == PortalVein::Thrombus {
        "portal vein thrombosis".to_string()
    } else if let Some(leading) = leading_candidate(differentials) {
        format!("findings most consistent with {}", leading.name.to_lowercase())
    } else {
        lines[0].trim_end_matches('.').to_lowercase()
    };

    let mut text = capitalize(&lead);
    if lines.len() > 1 {
        text.push_str("; additional findings as described");
    }
    text.push('.');
    text
}

pub struct LiverModule;

impl NarrativeModule for LiverModule {
    type Selection = LiverSelection;

    fn id(&self) -> &str {
        "liver"
    }

    fn name(&self) -> &str {
        "Liver and biliary"
    }

    fn compose(&self, selection: &LiverSelection) -> Narrative {
        let mut draft = Draft::new();

        draft.line(size_line(selection));
        for line in parenchyma_lines(selection) {
            draft.line(line);
        }
        draft.line(morphology_line(selection));
        draft.line(lesion_line(selection));
        draft.line(vascular_line(selection));
        draft.line(biliary_line(selection));
        draft.line(gallbladder_line(selection));
        draft.line(polyp_line(selection));
        for line in peritoneum_lines(selection) {
            draft.line(line);
        }

        draft.fired_rules = apply_rules(&rules::RULES, selection, &mut draft.board);

        parenchyma_findings(selection, &mut draft.findings);
        lesion_findings(selection, &mut draft.findings);
        vascular_findings(selection, &mut draft.findings);
        biliary_findings(selection, &mut draft.findings);
        gallbladder_findings(selection, &mut draft.findings);
        peritoneum_findings(selection, &mut draft.findings);

        draft.finish(self.id(), "LIVER AND BILIARY", |lines, differentials| {
            final_sentence(selection, lines, differentials)
        })
    }
}
