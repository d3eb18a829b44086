use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::choice::{Choice, Multiplicity, Presence};
use crate::measure::parse_measure;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum LiverSize {
    #[default]
    Unknown,
    Normal,
    Enlarged,
}

impl Choice for LiverSize {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Echogenicity {
    #[default]
    Unknown,
    Normal,
    MildlyIncreased,
    MarkedlyIncreased,
    Coarse,
}

impl Choice for Echogenicity {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SteatosisGrade {
    #[default]
    Unknown,
    None,
    Mild,
    Moderate,
    Severe,
}

impl SteatosisGrade {
    pub fn adjective(self) -> Option<&'static str> {
        match self {
            SteatosisGrade::Mild => Some("mild"),
            SteatosisGrade::Moderate => Some("moderate"),
            SteatosisGrade::Severe => Some("severe"),
            SteatosisGrade::Unknown | SteatosisGrade::None => None,
        }
    }

    pub fn is_positive(self) -> bool {
        self.adjective().is_some()
    }
}

impl Choice for SteatosisGrade {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Contour {
    #[default]
    Unknown,
    Smooth,
    Nodular,
}

impl Choice for Contour {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum LesionEcho {
    #[default]
    Unknown,
    Anechoic,
    Hypoechoic,
    Isoechoic,
    Hyperechoic,
    Mixed,
}

impl LesionEcho {
    pub fn adjective(self) -> Option<&'static str> {
        match self {
            LesionEcho::Unknown => None,
            LesionEcho::Anechoic => Some("anechoic"),
            LesionEcho::Hypoechoic => Some("hypoechoic"),
            LesionEcho::Isoechoic => Some("isoechoic"),
            LesionEcho::Hyperechoic => Some("hyperechoic"),
            LesionEcho::Mixed => Some("mixed-echogenicity"),
        }
    }
}

impl Choice for LesionEcho {}

/// Dynamic contrast behavior of a focal lesion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Enhancement {
    #[default]
    Unknown,
    None,
    ArterialWashout,
    PeripheralNodular,
    Homogeneous,
    Rim,
}

impl Enhancement {
    pub fn phrase(self) -> Option<&'static str> {
        match self {
            Enhancement::Unknown => None,
            Enhancement::None => Some("without enhancement"),
            Enhancement::ArterialWashout => {
                Some("with arterial phase hyperenhancement and washout")
            }
            Enhancement::PeripheralNodular => {
                Some("with peripheral nodular discontinuous enhancement")
            }
            Enhancement::Homogeneous => Some("with homogeneous enhancement"),
            Enhancement::Rim => Some("with rim enhancement"),
        }
    }
}

impl Choice for Enhancement {}

/// Working category of a focal liver lesion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum LesionCategory {
    #[default]
    Unknown,
    Benign,
    Indeterminate,
    Suspicious,
    Infective,
}

impl LesionCategory {
    pub fn adjective(self) -> Option<&'static str> {
        match self {
            LesionCategory::Unknown => None,
            LesionCategory::Benign => Some("probably benign"),
            LesionCategory::Indeterminate => Some("indeterminate"),
            LesionCategory::Suspicious => Some("suspicious"),
            LesionCategory::Infective => Some("probably infective"),
        }
    }
}

impl Choice for LesionCategory {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PortalVein {
    #[default]
    Unknown,
    Patent,
    Thrombus,
    TumorThrombus,
}

impl PortalVein {
    pub fn has_thrombus(self) -> bool {
        matches!(self, PortalVein::Thrombus | PortalVein::TumorThrombus)
    }
}

impl Choice for PortalVein {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Ascites {
    #[default]
    Unknown,
    None,
    Mild,
    Moderate,
    Marked,
}

impl Ascites {
    pub fn adjective(self) -> Option<&'static str> {
        match self {
            Ascites::Mild => Some("mild"),
            Ascites::Moderate => Some("moderate"),
            Ascites::Marked => Some("marked"),
            Ascites::Unknown | Ascites::None => None,
        }
    }

    pub fn is_present(self) -> bool {
        self.adjective().is_some()
    }
}

impl Choice for Ascites {}

/// One clinician's hepatobiliary findings for one case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
#[ts(export)]
pub struct LiverSelection {
    // Liver size and parenchyma
    pub liver_size: LiverSize,
    pub liver_span_mm: String,
    pub echogenicity: Echogenicity,
    pub steatosis_grade: SteatosisGrade,
    /// Poor visualization of portal vein walls and diaphragm.
    pub vessel_obscuration: Presence,
    pub contour: Contour,
    pub caudate_hypertrophy: Presence,

    // Focal lesion
    pub lesion: Presence,
    pub lesion_segment: String,
    pub lesion_size_mm: String,
    pub lesion_echo: LesionEcho,
    pub lesion_enhancement: Enhancement,
    pub lesion_multiplicity: Multiplicity,
    pub lesion_category: LesionCategory,

    // Vascular
    pub portal_vein: PortalVein,
    pub portal_diameter_mm: String,

    // Biliary
    pub intrahepatic_dilatation: Presence,
    pub cbd_mm: String,
    pub choledocholithiasis: Presence,

    // Gallbladder
    pub gallstones: Presence,
    pub gb_wall_mm: String,
    pub pericholecystic_fluid: Presence,
    pub sonographic_murphy: Presence,
    pub polyp_size_mm: String,
    pub gb_distension: Presence,

    // Peritoneum and spleen
    pub ascites: Ascites,
    pub splenomegaly: Presence,
    pub spleen_span_mm: String,

    // Clinical context
    pub known_cirrhosis: Presence,
    pub known_malignancy: Presence,
    pub fever: Presence,
    pub jaundice: Presence,
}

impl LiverSelection {
    pub fn liver_span(&self) -> Option<f64> {
        parse_measure(&self.liver_span_mm)
    }

    pub fn lesion_size(&self) -> Option<f64> {
        parse_measure(&self.lesion_size_mm)
    }

    pub fn portal_diameter(&self) -> Option<f64> {
        parse_measure(&self.portal_diameter_mm)
    }

    pub fn cbd(&self) -> Option<f64> {
        parse_measure(&self.cbd_mm)
    }

    pub fn gb_wall(&self) -> Option<f64> {
        parse_measure(&self.gb_wall_mm)
    }

    pub fn polyp_size(&self) -> Option<f64> {
        parse_measure(&self.polyp_size_mm)
    }

    pub fn spleen_span(&self) -> Option<f64> {
        parse_measure(&self.spleen_span_mm)
    }

    pub fn has_lesion(&self) -> bool {
        self.lesion.is_present()
    }

    pub fn multiple_lesions(&self) -> bool {
        self.lesion_multiplicity == Multiplicity::Multiple
    }
}
