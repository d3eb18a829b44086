use serde::{Deserialize, Serialize};
use ts_rs::TS;

use radcard_core::config::DEFAULT_TOP_MATCH_LIMIT;
use radcard_core::models::content::{CardBlock, Modality, Pathology};

use crate::pool::{flatten, score, PoolItem, Score};
use crate::tokens::{matches, tokenize};

/// A strong match surfaced next to the scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TopMatch {
    pub text: String,
    pub section_title: String,
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SectionRelevance {
    pub clinical: Score,
    pub labs: Score,
    pub imaging: Score,
    pub management: Score,
    pub top_matches: Vec<TopMatch>,
}

/// Overall and per-section relevance of one card for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RelevanceReport {
    pub pathology_id: String,
    pub modality: Modality,
    pub tokens: Vec<String>,
    pub overall: Score,
    pub sections: SectionRelevance,
}

fn wrap<'a, const N: usize>(blocks: [&'a CardBlock; N]) -> Vec<Option<&'a CardBlock>> {
    blocks.into_iter().map(Some).collect()
}

fn clinical_blocks(pathology: &Pathology) -> Vec<Option<&CardBlock>> {
    wrap(pathology.clinical.blocks())
}

fn labs_blocks(pathology: &Pathology) -> Vec<Option<&CardBlock>> {
    wrap(pathology.labs.blocks())
}

fn imaging_blocks(pathology: &Pathology, modality: Modality) -> Vec<Option<&CardBlock>> {
    wrap(pathology.imaging.for_modality(modality).blocks())
}

fn management_blocks(pathology: &Pathology) -> Vec<Option<&CardBlock>> {
    wrap(pathology.management.blocks())
}

/// Core, clinical, labs, the selected modality's imaging, and management.
fn all_blocks(pathology: &Pathology, modality: Modality) -> Vec<Option<&CardBlock>> {
    let mut blocks = wrap(pathology.core.blocks());
    blocks.extend(clinical_blocks(pathology));
    blocks.extend(labs_blocks(pathology));
    blocks.extend(imaging_blocks(pathology, modality));
    blocks.extend(management_blocks(pathology));
    blocks
}

/// Matching items ranked by descending weight; equal weights keep pool order.
pub fn top_matches(pool: &[PoolItem<'_>], tokens: &[String], limit: usize) -> Vec<TopMatch> {
    let mut hits: Vec<&PoolItem<'_>> = pool
        .iter()
        .filter(|item| matches(item.text, tokens))
        .collect();
    // `sort_by` is stable, which gives the first-encountered tie-break.
    hits.sort_by(|a, b| b.weight.cmp(&a.weight));
    hits.into_iter()
        .take(limit)
        .map(|item| TopMatch {
            text: item.text.to_string(),
            section_title: item.section_title.to_string(),
            weight: item.weight,
        })
        .collect()
}

/// Score a query against every section of the card at once.
pub fn overall_relevance(pathology: &Pathology, modality: Modality, query: &str) -> Score {
    let tokens = tokenize(query);
    score(&flatten(&all_blocks(pathology, modality)), &tokens)
}

pub fn section_relevance(
    pathology: &Pathology,
    modality: Modality,
    query: &str,
) -> SectionRelevance {
    section_relevance_with_limit(pathology, modality, query, DEFAULT_TOP_MATCH_LIMIT)
}

/// Per-section scores plus the `limit` strongest matches across all sections.
pub fn section_relevance_with_limit(
    pathology: &Pathology,
    modality: Modality,
    query: &str,
    limit: usize,
) -> SectionRelevance {
    let tokens = tokenize(query);
    section_scores(pathology, modality, &tokens, limit)
}

fn section_scores(
    pathology: &Pathology,
    modality: Modality,
    tokens: &[String],
    limit: usize,
) -> SectionRelevance {
    SectionRelevance {
        clinical: score(&flatten(&clinical_blocks(pathology)), tokens),
        labs: score(&flatten(&labs_blocks(pathology)), tokens),
        imaging: score(&flatten(&imaging_blocks(pathology, modality)), tokens),
        management: score(&flatten(&management_blocks(pathology)), tokens),
        top_matches: top_matches(&flatten(&all_blocks(pathology, modality)), tokens, limit),
    }
}

pub fn relevance(pathology: &Pathology, modality: Modality, query: &str) -> RelevanceReport {
    relevance_with_limit(pathology, modality, query, DEFAULT_TOP_MATCH_LIMIT)
}

pub fn relevance_with_limit(
    pathology: &Pathology,
    modality: Modality,
    query: &str,
    limit: usize,
) -> RelevanceReport {
    let tokens = tokenize(query);
    let overall = score(&flatten(&all_blocks(pathology, modality)), &tokens);
    let sections = section_scores(pathology, modality, &tokens, limit);
    tracing::debug!(
        pathology = %pathology.id,
        %modality,
        tokens = tokens.len(),
        score = overall.score,
        "computed relevance"
    );
    RelevanceReport {
        pathology_id: pathology.id.clone(),
        modality,
        tokens,
        overall,
        sections,
    }
}
