use std::sync::LazyLock;

use radcard_core::models::narrative::Likelihood::{High, Low, Medium};

use crate::rules::DifferentialRule;

use super::selection::{
    Contour, Echogenicity, Enhancement, LesionEcho, LiverSelection, LiverSize, PortalVein,
    SteatosisGrade,
};
use super::{
    acalculous_cholecystitis, acute_cholecystitis, biliary_dilatation, cholangitis, cirrhotic,
    polyp_action, portal_dilated, resolved_liver_size, resolved_splenomegaly, resolved_steatosis,
    wall_thickened, PolypAction,
};

pub const DIFFUSE: &str = "Diffuse parenchymal";
pub const FOCAL: &str = "Focal lesion";
pub const GALLBLADDER: &str = "Gallbladder";
pub const BILIARY: &str = "Biliary";
pub const VASCULAR: &str = "Vascular";

type Rule = DifferentialRule<LiverSelection>;

fn steatosis(s: &LiverSelection) -> SteatosisGrade {
    resolved_steatosis(s).value
}

fn lesion_with(s: &LiverSelection, enhancement: Enhancement) -> bool {
    s.has_lesion() && s.lesion_enhancement == enhancement
}

fn splenomegaly(s: &LiverSelection) -> bool {
    resolved_splenomegaly(s).value.is_present()
}

/// Ordered differential rules for the liver module.
pub static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        // Diffuse parenchymal
        Rule::propose(
            "diffuse.steatosis.marked",
            DIFFUSE,
            "Hepatic steatosis",
            High,
            "Moderate or severe fatty infiltration",
            |s| steatosis(s) >= SteatosisGrade::Moderate,
        ),
        Rule::propose(
            "diffuse.steatosis",
            DIFFUSE,
            "Hepatic steatosis",
            Medium,
            "Increased parenchymal echogenicity",
            |s| steatosis(s).is_positive(),
        ),
        Rule::propose(
            "diffuse.cirrhosis.nodular",
            DIFFUSE,
            "Cirrhosis",
            High,
            "Nodular surface contour",
            |s| s.contour == Contour::Nodular,
        ),
        Rule::propose(
            "diffuse.cirrhosis.coarse",
            DIFFUSE,
            "Cirrhosis",
            Medium,
            "Coarse parenchymal echotexture",
            |s| s.echogenicity == Echogenicity::Coarse,
        ),
        Rule::raise(
            "diffuse.cirrhosis.caudate",
            DIFFUSE,
            "Cirrhosis",
            "Caudate lobe hypertrophy",
            |s| s.caudate_hypertrophy.is_present(),
        ),
        Rule::raise(
            "diffuse.cirrhosis.known",
            DIFFUSE,
            "Cirrhosis",
            "Known cirrhosis",
            |s| s.known_cirrhosis.is_present(),
        ),
        Rule::propose(
            "diffuse.fibrosis",
            DIFFUSE,
            "Chronic hepatitis or fibrosis",
            Low,
            "Coarse echotexture without nodular contour",
            |s| s.echogenicity == Echogenicity::Coarse && s.contour != Contour::Nodular,
        ),
        Rule::propose(
            "diffuse.congestion",
            DIFFUSE,
            "Congestive hepatopathy",
            Low,
            "Hepatomegaly with ascites and smooth contour",
            |s| {
                resolved_liver_size(s).value == LiverSize::Enlarged
                    && s.ascites.is_present()
                    && s.contour != Contour::Nodular
            },
        ),
        Rule::propose(
            "diffuse.infiltration",
            DIFFUSE,
            "Diffuse infiltrative process",
            Low,
            "Hepatomegaly with splenomegaly",
            |s| resolved_liver_size(s).value == LiverSize::Enlarged && splenomegaly(s),
        ),
        // Focal lesion
        Rule::propose(
            "focal.cyst",
            FOCAL,
            "Simple hepatic cyst",
            High,
            "Anechoic lesion",
            |s| s.has_lesion() && s.lesion_echo == LesionEcho::Anechoic,
        ),
        Rule::lower(
            "focal.cyst.enhancing",
            FOCAL,
            "Simple hepatic cyst",
            "Enhancing components",
            |s| {
                s.has_lesion()
                    && !matches!(s.lesion_enhancement, Enhancement::None | Enhancement::Unknown)
            },
        ),
        Rule::propose(
            "focal.hemangioma.enhancement",
            FOCAL,
            "Hemangioma",
            High,
            "Peripheral nodular discontinuous enhancement",
            |s| lesion_with(s, Enhancement::PeripheralNodular),
        ),
        Rule::propose(
            "focal.hemangioma.echo",
            FOCAL,
            "Hemangioma",
            Medium,
            "Well-defined hyperechoic lesion",
            |s| {
                s.has_lesion()
                    && s.lesion_echo == LesionEcho::Hyperechoic
                    && !s.known_malignancy.is_present()
            },
        ),
        Rule::propose(
            "focal.hcc.cirrhosis",
            FOCAL,
            "Hepatocellular carcinoma",
            High,
            "Arterial hyperenhancement and washout in a cirrhotic liver",
            |s| lesion_with(s, Enhancement::ArterialWashout) && cirrhotic(s),
        ),
        Rule::propose(
            "focal.hcc",
            FOCAL,
            "Hepatocellular carcinoma",
            Medium,
            "Arterial hyperenhancement and washout",
            |s| lesion_with(s, Enhancement::ArterialWashout),
        ),
        Rule::raise(
            "focal.hcc.tumor_thrombus",
            FOCAL,
            "Hepatocellular carcinoma",
            "Portal vein tumor thrombus",
            |s| s.portal_vein == PortalVein::TumorThrombus,
        ),
        Rule::propose(
            "focal.metastases.multiple",
            FOCAL,
            "Metastases",
            High,
            "Multiple lesions with known malignancy",
            |s| s.has_lesion() && s.multiple_lesions() && s.known_malignancy.is_present(),
        ),
        Rule::propose(
            "focal.metastases",
            FOCAL,
            "Metastases",
            Medium,
            "Known malignancy",
            |s| s.has_lesion() && s.known_malignancy.is_present(),
        ),
        Rule::propose(
            "focal.metastases.rim",
            FOCAL,
            "Metastases",
            Low,
            "Rim enhancement",
            |s| lesion_with(s, Enhancement::Rim),
        ),
        Rule::propose(
            "focal.abscess",
            FOCAL,
            "Hepatic abscess",
            Medium,
            "Rim-enhancing lesion with fever",
            |s| lesion_with(s, Enhancement::Rim) && s.fever.is_present(),
        ),
        Rule::raise(
            "focal.abscess.mixed",
            FOCAL,
            "Hepatic abscess",
            "Complex mixed-echogenicity content",
            |s| s.has_lesion() && s.lesion_echo == LesionEcho::Mixed && s.fever.is_present(),
        ),
        Rule::propose(
            "focal.fnh",
            FOCAL,
            "Focal nodular hyperplasia",
            Low,
            "Homogeneous enhancement in a non-cirrhotic liver",
            |s| lesion_with(s, Enhancement::Homogeneous) && !cirrhotic(s),
        ),
        Rule::propose(
            "focal.fat_sparing",
            FOCAL,
            "Focal fatty sparing",
            Low,
            "Hypoechoic area within a steatotic liver",
            |s| {
                s.has_lesion()
                    && s.lesion_echo == LesionEcho::Hypoechoic
                    && steatosis(s).is_positive()
            },
        ),
        // Gallbladder
        Rule::propose(
            "gb.cholecystitis.calculous",
            GALLBLADDER,
            "Acute calculous cholecystitis",
            High,
            "Gallstones with Murphy sign and wall thickening or fluid",
            acute_cholecystitis,
        ),
        Rule::propose(
            "gb.cholecystitis.possible",
            GALLBLADDER,
            "Acute calculous cholecystitis",
            Medium,
            "Gallstones with wall thickening",
            |s| s.gallstones.is_present() && wall_thickened(s),
        ),
        Rule::propose(
            "gb.cholecystitis.acalculous",
            GALLBLADDER,
            "Acute acalculous cholecystitis",
            Medium,
            "Wall thickening and distension without gallstones",
            acalculous_cholecystitis,
        ),
        Rule::raise(
            "gb.cholecystitis.acalculous.fever",
            GALLBLADDER,
            "Acute acalculous cholecystitis",
            "Fever",
            |s| s.fever.is_present(),
        ),
        Rule::propose(
            "gb.cholelithiasis",
            GALLBLADDER,
            "Cholelithiasis",
            High,
            "Gallstones",
            |s| s.gallstones.is_present(),
        ),
        Rule::propose(
            "gb.wall.secondary",
            GALLBLADDER,
            "Secondary wall thickening",
            Medium,
            "Wall thickening with ascites or chronic liver disease",
            |s| wall_thickened(s) && (s.ascites.is_present() || cirrhotic(s)),
        ),
        Rule::lower(
            "gb.cholecystitis.ascites",
            GALLBLADDER,
            "Acute calculous cholecystitis",
            "Ascites can thicken the wall without inflammation",
            |s| s.ascites.is_present() && !s.sonographic_murphy.is_present(),
        ),
        Rule::propose(
            "gb.polyp.large",
            GALLBLADDER,
            "Neoplastic gallbladder polyp",
            Medium,
            "Polyp 10 mm or larger",
            |s| polyp_action(s) == Some(PolypAction::Referral),
        ),
        Rule::propose(
            "gb.polyp",
            GALLBLADDER,
            "Cholesterol polyp",
            Medium,
            "Polyp smaller than 10 mm",
            |s| polyp_action(s).is_some_and(|a| a != PolypAction::Referral),
        ),
        // Biliary
        Rule::propose(
            "bil.choledocholithiasis",
            BILIARY,
            "Choledocholithiasis",
            High,
            "Stone seen in the common bile duct",
            |s| s.choledocholithiasis.is_present(),
        ),
        Rule::propose(
            "bil.choledocholithiasis.inferred",
            BILIARY,
            "Choledocholithiasis",
            Medium,
            "Duct dilatation with gallstones",
            |s| biliary_dilatation(s) && s.gallstones.is_present(),
        ),
        Rule::propose(
            "bil.cholangitis",
            BILIARY,
            "Acute cholangitis",
            High,
            "Duct dilatation with fever and jaundice",
            cholangitis,
        ),
        Rule::propose(
            "bil.cholangitis.possible",
            BILIARY,
            "Acute cholangitis",
            Medium,
            "Duct dilatation with fever",
            |s| biliary_dilatation(s) && s.fever.is_present(),
        ),
        Rule::propose(
            "bil.malignant",
            BILIARY,
            "Malignant biliary obstruction",
            Medium,
            "Painless jaundice with dilatation and no duct stone",
            |s| {
                biliary_dilatation(s)
                    && s.jaundice.is_present()
                    && !s.choledocholithiasis.is_present()
            },
        ),
        Rule::raise(
            "bil.malignant.history",
            BILIARY,
            "Malignant biliary obstruction",
            "Known malignancy",
            |s| s.known_malignancy.is_present(),
        ),
        // Vascular
        Rule::propose(
            "vasc.pvt",
            VASCULAR,
            "Portal vein thrombosis",
            High,
            "Thrombus in the portal vein",
            |s| s.portal_vein == PortalVein::Thrombus,
        ),
        Rule::propose(
            "vasc.tumor_thrombus",
            VASCULAR,
            "Portal vein tumor thrombus",
            High,
            "Expansile thrombus",
            |s| s.portal_vein == PortalVein::TumorThrombus,
        ),
        Rule::propose(
            "vasc.portal_hypertension",
            VASCULAR,
            "Portal hypertension",
            High,
            "Dilated portal vein with splenomegaly",
            |s| portal_dilated(s) && splenomegaly(s),
        ),
        Rule::propose(
            "vasc.portal_hypertension.possible",
            VASCULAR,
            "Portal hypertension",
            Medium,
            "Dilated portal vein, or splenomegaly with ascites",
            |s| portal_dilated(s) || (splenomegaly(s) && s.ascites.is_present()),
        ),
        Rule::raise(
            "vasc.portal_hypertension.cirrhosis",
            VASCULAR,
            "Portal hypertension",
            "Cirrhotic liver",
            cirrhotic,
        ),
    ]
});
