pub mod content;
pub mod narrative;
