//! radcard-search
//!
//! Weighted free-text relevance: tokenize a query, pool the weighted items of
//! a pathology card, and score how much of the pool's weight the query hits.

pub mod pool;
pub mod relevance;
pub mod tokens;

pub use relevance::{overall_relevance, relevance, section_relevance};
