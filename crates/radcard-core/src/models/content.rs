use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Lowest and highest clinical salience an item can carry.
pub const MIN_WEIGHT: u8 = 1;
pub const MAX_WEIGHT: u8 = 5;

/// A single statement on a card, weighted by clinical salience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WeightedItem {
    pub text: String,
    #[serde(default = "default_weight")]
    pub weight: u8,
}

fn default_weight() -> u8 {
    MIN_WEIGHT
}

impl WeightedItem {
    pub fn new(text: impl Into<String>, weight: u8) -> Self {
        Self {
            text: text.into(),
            weight,
        }
    }

    /// Weight clamped into the 1–5 salience scale.
    pub fn effective_weight(&self) -> u32 {
        u32::from(self.weight.clamp(MIN_WEIGHT, MAX_WEIGHT))
    }
}

/// One labeled facet of a card, e.g. "Etiology" or "Red flags".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CardBlock {
    pub title: String,
    #[serde(default)]
    pub items: Vec<WeightedItem>,
}

impl CardBlock {
    pub fn new(title: impl Into<String>, items: Vec<WeightedItem>) -> Self {
        Self {
            title: title.into(),
            items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Imaging modality a card section is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum Modality {
    Xr,
    Us,
    Ct,
    Mr,
}

impl Modality {
    pub const ALL: [Modality; 4] = [Modality::Xr, Modality::Us, Modality::Ct, Modality::Mr];

    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Xr => "XR",
            Modality::Us => "US",
            Modality::Ct => "CT",
            Modality::Mr => "MR",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Modality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "XR" | "X-RAY" | "XRAY" => Ok(Modality::Xr),
            "US" | "USG" => Ok(Modality::Us),
            "CT" => Ok(Modality::Ct),
            "MR" | "MRI" => Ok(Modality::Mr),
            other => Err(format!("unknown modality: {other}")),
        }
    }
}

/// Imaging facets for a single modality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ImagingBlock {
    pub when_to_image: CardBlock,
    pub main_findings: CardBlock,
    pub supportive_findings: CardBlock,
    pub complications: CardBlock,
    pub pitfalls: CardBlock,
    pub differential: CardBlock,
    /// "How to distinguish" sub-items.
    pub distinguishing: CardBlock,
}

impl ImagingBlock {
    /// Blocks in display order.
    pub fn blocks(&self) -> [&CardBlock; 7] {
        [
            &self.when_to_image,
            &self.main_findings,
            &self.supportive_findings,
            &self.complications,
            &self.pitfalls,
            &self.differential,
            &self.distinguishing,
        ]
    }
}

/// Per-modality imaging content. Every modality is always present, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ImagingSection {
    pub xr: ImagingBlock,
    pub us: ImagingBlock,
    pub ct: ImagingBlock,
    pub mr: ImagingBlock,
}

impl ImagingSection {
    pub fn for_modality(&self, modality: Modality) -> &ImagingBlock {
        match modality {
            Modality::Xr => &self.xr,
            Modality::Us => &self.us,
            Modality::Ct => &self.ct,
            Modality::Mr => &self.mr,
        }
    }

    pub fn for_modality_mut(&mut self, modality: Modality) -> &mut ImagingBlock {
        match modality {
            Modality::Xr => &mut self.xr,
            Modality::Us => &mut self.us,
            Modality::Ct => &mut self.ct,
            Modality::Mr => &mut self.mr,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CoreSection {
    pub definition: CardBlock,
    pub etiology: CardBlock,
    pub risk_factors: CardBlock,
    pub pathophysiology: CardBlock,
}

impl CoreSection {
    pub fn blocks(&self) -> [&CardBlock; 4] {
        [
            &self.definition,
            &self.etiology,
            &self.risk_factors,
            &self.pathophysiology,
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClinicalSection {
    pub symptoms: CardBlock,
    pub exam: CardBlock,
    pub red_flags: CardBlock,
    pub scores: CardBlock,
}

impl ClinicalSection {
    pub fn blocks(&self) -> [&CardBlock; 4] {
        [&self.symptoms, &self.exam, &self.red_flags, &self.scores]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LabsSection {
    pub key_labs: CardBlock,
    pub notes: CardBlock,
}

impl LabsSection {
    pub fn blocks(&self) -> [&CardBlock; 2] {
        [&self.key_labs, &self.notes]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ManagementSection {
    pub first_line: CardBlock,
    pub escalation: CardBlock,
    pub complications: CardBlock,
    pub follow_up: CardBlock,
}

impl ManagementSection {
    pub fn blocks(&self) -> [&CardBlock; 4] {
        [
            &self.first_line,
            &self.escalation,
            &self.complications,
            &self.follow_up,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SpecialtyNote {
    pub specialty: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SourceCitation {
    pub title: String,
    pub url: Option<String>,
    pub year: Option<u16>,
}

/// Search vocabulary grouped by who tends to use it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct KeywordGroups {
    pub patient: Vec<String>,
    pub clinician: Vec<String>,
    pub radiology: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum LinkRelation {
    ProgressesTo,
    RiskOf,
    RedFlagFor,
}

/// A typed reference to another pathology card by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CrossLink {
    pub relation: LinkRelation,
    pub target_id: String,
}

/// A fully normalized pathology card. All sections are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Pathology {
    pub id: String,
    pub name: String,
    pub organ: String,
    pub core: CoreSection,
    pub clinical: ClinicalSection,
    pub labs: LabsSection,
    pub imaging: ImagingSection,
    pub management: ManagementSection,
    pub specialty_notes: Vec<SpecialtyNote>,
    pub sources: Vec<SourceCitation>,
    pub keywords: KeywordGroups,
    pub links: Vec<CrossLink>,
}

impl Pathology {
    /// An empty card with every section present.
    pub fn empty(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            organ: String::new(),
            core: CoreSection::default(),
            clinical: ClinicalSection::default(),
            labs: LabsSection::default(),
            imaging: ImagingSection::default(),
            management: ManagementSection::default(),
            specialty_notes: Vec::new(),
            sources: Vec::new(),
            keywords: KeywordGroups::default(),
            links: Vec::new(),
        }
    }
}
