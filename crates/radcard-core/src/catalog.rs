//! Content catalog: loads loosely-shaped pathology JSON, normalizes it once,
//! and serves read-only records by id.
//!
//! Downstream engines never see raw documents. After normalization every
//! section exists (possibly empty), every block carries its canonical title,
//! and every item weight sits in the 1–5 scale.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use crate::error::CoreError;
use crate::models::content::{
    CardBlock, ClinicalSection, CoreSection, CrossLink, ImagingBlock, ImagingSection,
    KeywordGroups, LabsSection, LinkRelation, ManagementSection, Modality, Pathology,
    SourceCitation, SpecialtyNote, WeightedItem, MAX_WEIGHT, MIN_WEIGHT,
};

/// A block item as it appears on disk: either a bare string or a weighted object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawItem {
    Text(String),
    Weighted {
        text: String,
        #[serde(default)]
        weight: Option<f64>,
    },
}

/// A block as it appears on disk.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawBlock {
    Text(String),
    Items(Vec<RawItem>),
    Titled {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        items: Vec<RawItem>,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCore {
    pub definition: Option<RawBlock>,
    pub etiology: Option<RawBlock>,
    #[serde(alias = "riskFactors")]
    pub risk_factors: Option<RawBlock>,
    pub pathophysiology: Option<RawBlock>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawClinical {
    pub symptoms: Option<RawBlock>,
    #[serde(alias = "physical_exam")]
    pub exam: Option<RawBlock>,
    #[serde(alias = "redFlags")]
    pub red_flags: Option<RawBlock>,
    pub scores: Option<RawBlock>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawLabs {
    #[serde(alias = "keyLabs")]
    pub key_labs: Option<RawBlock>,
    pub notes: Option<RawBlock>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawImaging {
    #[serde(alias = "whenToImage")]
    pub when_to_image: Option<RawBlock>,
    #[serde(alias = "mainFindings")]
    pub main_findings: Option<RawBlock>,
    #[serde(alias = "supportiveFindings")]
    pub supportive_findings: Option<RawBlock>,
    pub complications: Option<RawBlock>,
    pub pitfalls: Option<RawBlock>,
    #[serde(alias = "ddx")]
    pub differential: Option<RawBlock>,
    #[serde(alias = "how_to_distinguish", alias = "howToDistinguish")]
    pub distinguishing: Option<RawBlock>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawManagement {
    #[serde(alias = "firstLine")]
    pub first_line: Option<RawBlock>,
    pub escalation: Option<RawBlock>,
    pub complications: Option<RawBlock>,
    #[serde(alias = "followUp")]
    pub follow_up: Option<RawBlock>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawLinks {
    #[serde(alias = "progression")]
    pub progresses_to: Vec<String>,
    pub risk_of: Vec<String>,
    pub red_flag_for: Vec<String>,
}

/// A pathology document exactly as authored. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPathology {
    pub id: String,
    pub name: String,
    pub organ: String,
    pub core: RawCore,
    pub clinical: RawClinical,
    pub labs: RawLabs,
    /// Keyed by modality code ("CT", "US", ...).
    pub imaging: BTreeMap<String, RawImaging>,
    pub management: RawManagement,
    pub specialty_notes: Vec<SpecialtyNote>,
    pub sources: Vec<SourceCitation>,
    pub keywords: KeywordGroups,
    pub links: RawLinks,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDocuments {
    Many(Vec<RawPathology>),
    One(Box<RawPathology>),
}

/// Map an authored weight onto the 1–5 scale. Missing or non-finite → 1.
pub fn normalize_weight(weight: Option<f64>) -> u8 {
    match weight {
        Some(w) if w.is_finite() => {
            w.round().clamp(f64::from(MIN_WEIGHT), f64::from(MAX_WEIGHT)) as u8
        }
        _ => MIN_WEIGHT,
    }
}

fn normalize_item(raw: RawItem) -> Option<WeightedItem> {
    let (text, weight) = match raw {
        RawItem::Text(text) => (text, None),
        RawItem::Weighted { text, weight } => (text, weight),
    };
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(WeightedItem::new(text, normalize_weight(weight)))
}

/// Normalize an optional raw block, falling back to `default_title`.
pub fn normalize_block(raw: Option<RawBlock>, default_title: &str) -> CardBlock {
    let (title, items) = match raw {
        None => (None, Vec::new()),
        Some(RawBlock::Text(text)) => (None, vec![RawItem::Text(text)]),
        Some(RawBlock::Items(items)) => (None, items),
        Some(RawBlock::Titled { title, items }) => (title, items),
    };
    let title = title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| default_title.to_string());
    CardBlock::new(title, items.into_iter().filter_map(normalize_item).collect())
}

fn normalize_imaging(raw: RawImaging) -> ImagingBlock {
    ImagingBlock {
        when_to_image: normalize_block(raw.when_to_image, "When to image"),
        main_findings: normalize_block(raw.main_findings, "Main findings"),
        supportive_findings: normalize_block(raw.supportive_findings, "Supportive findings"),
        complications: normalize_block(raw.complications, "Complications"),
        pitfalls: normalize_block(raw.pitfalls, "Pitfalls"),
        differential: normalize_block(raw.differential, "Differential diagnosis"),
        distinguishing: normalize_block(raw.distinguishing, "How to distinguish"),
    }
}

fn empty_imaging() -> ImagingBlock {
    normalize_imaging(RawImaging::default())
}

/// Normalize one authored document into a complete [`Pathology`].
pub fn normalize(raw: RawPathology) -> Result<Pathology, CoreError> {
    let id = raw.id.trim().to_string();
    if id.is_empty() {
        return Err(CoreError::MissingField("id".to_string()));
    }
    let name = match raw.name.trim() {
        "" => id.clone(),
        name => name.to_string(),
    };

    let mut imaging = ImagingSection {
        xr: empty_imaging(),
        us: empty_imaging(),
        ct: empty_imaging(),
        mr: empty_imaging(),
    };
    for (key, block) in raw.imaging {
        match key.parse::<Modality>() {
            Ok(modality) => *imaging.for_modality_mut(modality) = normalize_imaging(block),
            Err(e) => tracing::warn!(pathology = %id, "skipping imaging block: {e}"),
        }
    }

    let mut links = Vec::new();
    for (relation, targets) in [
        (LinkRelation::ProgressesTo, raw.links.progresses_to),
        (LinkRelation::RiskOf, raw.links.risk_of),
        (LinkRelation::RedFlagFor, raw.links.red_flag_for),
    ] {
        links.extend(
            targets
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .map(|target_id| CrossLink {
                    relation,
                    target_id,
                }),
        );
    }

    Ok(Pathology {
        id,
        name,
        organ: raw.organ.trim().to_string(),
        core: CoreSection {
            definition: normalize_block(raw.core.definition, "Definition"),
            etiology: normalize_block(raw.core.etiology, "Etiology"),
            risk_factors: normalize_block(raw.core.risk_factors, "Risk factors"),
            pathophysiology: normalize_block(raw.core.pathophysiology, "Pathophysiology"),
        },
        clinical: ClinicalSection {
            symptoms: normalize_block(raw.clinical.symptoms, "Symptoms"),
            exam: normalize_block(raw.clinical.exam, "Examination"),
            red_flags: normalize_block(raw.clinical.red_flags, "Red flags"),
            scores: normalize_block(raw.clinical.scores, "Scores"),
        },
        labs: LabsSection {
            key_labs: normalize_block(raw.labs.key_labs, "Key labs"),
            notes: normalize_block(raw.labs.notes, "Lab notes"),
        },
        imaging,
        management: ManagementSection {
            first_line: normalize_block(raw.management.first_line, "First line"),
            escalation: normalize_block(raw.management.escalation, "Escalation"),
            complications: normalize_block(raw.management.complications, "Complication management"),
            follow_up: normalize_block(raw.management.follow_up, "Follow-up"),
        },
        specialty_notes: raw.specialty_notes,
        sources: raw.sources,
        keywords: raw.keywords,
        links,
    })
}

/// Read-only set of normalized pathology cards keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: BTreeMap<String, Pathology>,
}

impl Catalog {
    /// Normalize and index documents. Duplicate ids are rejected; cross-links
    /// pointing outside the catalog are dropped.
    pub fn from_documents(documents: Vec<RawPathology>) -> Result<Self, CoreError> {
        let mut records = BTreeMap::new();
        for raw in documents {
            let pathology = normalize(raw)?;
            if records.contains_key(&pathology.id) {
                return Err(CoreError::DuplicateId(pathology.id));
            }
            records.insert(pathology.id.clone(), pathology);
        }

        let known: HashSet<String> = records.keys().cloned().collect();
        for pathology in records.values_mut() {
            let id = pathology.id.clone();
            pathology.links.retain(|link| {
                let ok = known.contains(&link.target_id);
                if !ok {
                    tracing::warn!(
                        pathology = %id,
                        target = %link.target_id,
                        "dropping dangling cross-link"
                    );
                }
                ok
            });
        }

        Ok(Self { records })
    }

    /// Parse a JSON string holding one document or an array of documents.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let documents = match serde_json::from_str::<RawDocuments>(json)? {
            RawDocuments::Many(docs) => docs,
            RawDocuments::One(doc) => vec![*doc],
        };
        Self::from_documents(documents)
    }

    /// Load every `*.json` file in `dir`, in path order.
    pub fn load_dir(dir: &Path) -> Result<Self, CoreError> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut documents = Vec::new();
        for path in &paths {
            tracing::debug!(path = %path.display(), "loading pathology document");
            let contents = std::fs::read_to_string(path)?;
            match serde_json::from_str::<RawDocuments>(&contents)? {
                RawDocuments::Many(docs) => documents.extend(docs),
                RawDocuments::One(doc) => documents.push(*doc),
            }
        }
        Self::from_documents(documents)
    }

    pub fn get(&self, id: &str) -> Option<&Pathology> {
        self.records.get(id)
    }

    /// All ids in sorted order.
    pub fn ids(&self) -> Vec<&str> {
        self.records.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pathology> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
