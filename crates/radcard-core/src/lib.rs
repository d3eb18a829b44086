//! radcard-core
//!
//! Pure domain types for the radcard system: normalized pathology cards,
//! narrative output vocabulary, the content catalog, and configuration.
//! Nothing in here knows about scoring or report composition.

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
