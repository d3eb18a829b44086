//! radcard-export
//!
//! Plain-text clipboard export of a composed narrative.

pub mod document;
pub mod error;
pub mod render;

pub use document::{ExportDocument, ExportSection};
pub use render::render_export;
