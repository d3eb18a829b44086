use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::choice::{Choice, Degree, Laterality, Multiplicity, Presence};
use crate::measure::parse_measure;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum BleedType {
    #[default]
    None,
    #[serde(rename = "EDH")]
    Edh,
    #[serde(rename = "SDH")]
    Sdh,
    #[serde(rename = "SAH")]
    Sah,
    #[serde(rename = "IPH")]
    Iph,
    #[serde(rename = "IVH")]
    Ivh,
}

impl BleedType {
    pub fn noun(self) -> Option<&'static str> {
        match self {
            BleedType::None => None,
            BleedType::Edh => Some("epidural hematoma"),
            BleedType::Sdh => Some("subdural hematoma"),
            BleedType::Sah => Some("subarachnoid hemorrhage"),
            BleedType::Iph => Some("intraparenchymal hemorrhage"),
            BleedType::Ivh => Some("intraventricular hemorrhage"),
        }
    }

    pub fn is_extra_axial(self) -> bool {
        matches!(self, BleedType::Edh | BleedType::Sdh)
    }
}

impl Choice for BleedType {}

/// Qualitative CT attenuation of a collection relative to brain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum CtDensity {
    #[default]
    Unknown,
    Hyperdense,
    Isodense,
    Hypodense,
    Mixed,
}

impl Choice for CtDensity {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ExtraAxialAge {
    #[default]
    Unknown,
    Acute,
    Subacute,
    Chronic,
    AcuteOnChronic,
}

impl ExtraAxialAge {
    pub fn adjective(self) -> Option<&'static str> {
        match self {
            ExtraAxialAge::Unknown => None,
            ExtraAxialAge::Acute => Some("acute"),
            ExtraAxialAge::Subacute => Some("subacute"),
            ExtraAxialAge::Chronic => Some("chronic"),
            ExtraAxialAge::AcuteOnChronic => Some("acute-on-chronic"),
        }
    }
}

impl Choice for ExtraAxialAge {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Herniation {
    Subfalcine,
    Uncal,
    Transtentorial,
    Tonsillar,
}

impl Herniation {
    pub fn phrase(self) -> &'static str {
        match self {
            Herniation::Subfalcine => "subfalcine herniation",
            Herniation::Uncal => "uncal herniation",
            Herniation::Transtentorial => "transtentorial herniation",
            Herniation::Tonsillar => "tonsillar herniation",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Territory {
    #[default]
    Unknown,
    Aca,
    Mca,
    Pca,
    Vertebrobasilar,
    Watershed,
    Lacunar,
}

impl Territory {
    pub fn phrase(self) -> Option<&'static str> {
        match self {
            Territory::Unknown => None,
            Territory::Aca => Some("ACA territory"),
            Territory::Mca => Some("MCA territory"),
            Territory::Pca => Some("PCA territory"),
            Territory::Vertebrobasilar => Some("vertebrobasilar territory"),
            Territory::Watershed => Some("watershed"),
            Territory::Lacunar => Some("lacunar"),
        }
    }
}

impl Choice for Territory {}

/// CT appearance of an ischemic region, used to suggest its stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum InfarctAppearance {
    #[default]
    Unknown,
    /// Loss of gray-white differentiation, sulcal effacement.
    SubtleHypodensity,
    /// Well-defined hypodensity with swelling.
    EstablishedHypodensity,
    /// Volume loss, CSF-density cavity.
    Encephalomalacia,
}

impl InfarctAppearance {
    pub fn phrase(self) -> Option<&'static str> {
        match self {
            InfarctAppearance::Unknown => None,
            InfarctAppearance::SubtleHypodensity => {
                Some("with loss of gray-white matter differentiation")
            }
            InfarctAppearance::EstablishedHypodensity => {
                Some("with well-defined hypodensity and swelling")
            }
            InfarctAppearance::Encephalomalacia => {
                Some("with encephalomalacia and volume loss")
            }
        }
    }
}

impl Choice for InfarctAppearance {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum InfarctStage {
    #[default]
    Unknown,
    Hyperacute,
    Acute,
    Subacute,
    Chronic,
}

impl InfarctStage {
    pub fn adjective(self) -> Option<&'static str> {
        match self {
            InfarctStage::Unknown => None,
            InfarctStage::Hyperacute => Some("hyperacute"),
            InfarctStage::Acute => Some("acute"),
            InfarctStage::Subacute => Some("subacute"),
            InfarctStage::Chronic => Some("chronic"),
        }
    }

    pub fn is_early(self) -> bool {
        matches!(self, InfarctStage::Hyperacute | InfarctStage::Acute)
    }
}

impl Choice for InfarctStage {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum MassEnhancement {
    #[default]
    Unknown,
    None,
    Homogeneous,
    Ring,
    Heterogeneous,
    DuralTail,
}

impl MassEnhancement {
    pub fn adjective(self) -> Option<&'static str> {
        match self {
            MassEnhancement::Unknown => None,
            MassEnhancement::None => Some("non-enhancing"),
            MassEnhancement::Homogeneous => Some("homogeneously enhancing"),
            MassEnhancement::Ring => Some("ring-enhancing"),
            MassEnhancement::Heterogeneous => Some("heterogeneously enhancing"),
            MassEnhancement::DuralTail => Some("extra-axial enhancing"),
        }
    }
}

impl Choice for MassEnhancement {}

/// One clinician's brain CT/MR findings for one case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
#[ts(export)]
pub struct BrainSelection {
    // Hemorrhage
    pub bleed_type: BleedType,
    pub laterality: Laterality,
    /// Free text, e.g. "frontoparietal convexity".
    pub bleed_region: String,
    pub thickness_mm: String,
    pub ct_density: CtDensity,
    pub extra_axial_age: ExtraAxialAge,
    pub midline_shift_mm: String,
    pub basal_cistern_effacement: Degree,
    pub ventricular_compression: Degree,
    pub herniations: Vec<Herniation>,
    pub skull_fracture: Presence,

    // Ischemia
    pub infarct: Presence,
    pub infarct_laterality: Laterality,
    pub infarct_territory: Territory,
    pub infarct_appearance: InfarctAppearance,
    pub infarct_stage: InfarctStage,
    pub hyperdense_vessel: Presence,
    pub hemorrhagic_transformation: Presence,

    // Mass lesion
    pub mass: Presence,
    pub mass_location: String,
    pub mass_size_mm: String,
    pub mass_enhancement: MassEnhancement,
    pub mass_edema: Degree,
    pub mass_multiplicity: Multiplicity,

    // Ventricles
    pub hydrocephalus: Presence,
    pub transependymal_flow: Presence,

    // Clinical context
    pub trauma: Presence,
    pub anticoagulated: Presence,
    pub known_malignancy: Presence,
    pub fever: Presence,
}

impl BrainSelection {
    pub fn has_bleed(&self) -> bool {
        self.bleed_type != BleedType::None
    }

    pub fn thickness(&self) -> Option<f64> {
        parse_measure(&self.thickness_mm)
    }

    pub fn midline_shift(&self) -> Option<f64> {
        parse_measure(&self.midline_shift_mm)
    }

    pub fn mass_size(&self) -> Option<f64> {
        parse_measure(&self.mass_size_mm)
    }

    pub fn has_herniation(&self) -> bool {
        !self.herniations.is_empty()
    }

    /// Case-insensitive check of the free-text bleed region.
    pub fn region_mentions(&self, needles: &[&str]) -> bool {
        let region = self.bleed_region.to_lowercase();
        needles.iter().any(|n| region.contains(n))
    }
}
