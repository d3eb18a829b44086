use serde::{Deserialize, Serialize};
use ts_rs::TS;

use radcard_core::models::content::CardBlock;

use crate::tokens::matches;

/// One weighted statement lifted out of its block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolItem<'a> {
    pub text: &'a str,
    pub weight: u32,
    pub section_title: &'a str,
}

/// Flatten blocks into pool items, skipping absent blocks and blank items.
pub fn flatten<'a>(blocks: &[Option<&'a CardBlock>]) -> Vec<PoolItem<'a>> {
    blocks
        .iter()
        .flatten()
        .flat_map(|block| {
            block
                .items
                .iter()
                .filter(|item| !item.text.trim().is_empty())
                .map(move |item| PoolItem {
                    text: item.text.as_str(),
                    weight: item.effective_weight(),
                    section_title: block.title.as_str(),
                })
        })
        .collect()
}

/// Weighted hit rate of a query over a pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Score {
    /// `round(matched_weight / total_weight * 100)`, 0 for an empty pool or query.
    pub score: u8,
    pub match_count: usize,
    pub pool_size: usize,
    pub matched_weight: u32,
    pub total_weight: u32,
}

pub fn score(pool: &[PoolItem<'_>], tokens: &[String]) -> Score {
    let total_weight: u32 = pool.iter().map(|item| item.weight).sum();
    if tokens.is_empty() {
        return Score {
            pool_size: pool.len(),
            total_weight,
            ..Score::default()
        };
    }

    let mut matched_weight = 0;
    let mut match_count = 0;
    for item in pool.iter().filter(|item| matches(item.text, tokens)) {
        matched_weight += item.weight;
        match_count += 1;
    }

    let score = if total_weight == 0 {
        0
    } else {
        (f64::from(matched_weight) / f64::from(total_weight) * 100.0).round() as u8
    };

    Score {
        score,
        match_count,
        pool_size: pool.len(),
        matched_weight,
        total_weight,
    }
}
