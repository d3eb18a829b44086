use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::choice::Choice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ResolutionSource {
    Explicit,
    Inferred,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<T> {
    pub value: T,
    pub source: ResolutionSource,
}

impl<T: Choice> Resolved<T> {
    pub fn is_known(&self) -> bool {
        self.source != ResolutionSource::Unknown
    }
}

/// Explicit selection, else the inferred suggestion, else unknown.
///
/// An inferred value is never visible once the user has chosen explicitly.
pub fn resolve<T: Choice>(explicit: T, inferred: Option<T>) -> Resolved<T> {
    if !explicit.is_unknown() {
        return Resolved {
            value: explicit,
            source: ResolutionSource::Explicit,
        };
    }
    match inferred.filter(|v| !v.is_unknown()) {
        Some(value) => Resolved {
            value,
            source: ResolutionSource::Inferred,
        },
        None => Resolved {
            value: T::default(),
            source: ResolutionSource::Unknown,
        },
    }
}
