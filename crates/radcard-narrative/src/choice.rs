//! Discrete selection values shared by the organ modules.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A selection whose `Default` is the "nothing asserted" state.
pub trait Choice: Copy + PartialEq + Default {
    fn is_unknown(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Presence {
    #[default]
    Unknown,
    Absent,
    Present,
}

impl Presence {
    pub fn is_present(self) -> bool {
        self == Presence::Present
    }

    pub fn is_absent(self) -> bool {
        self == Presence::Absent
    }

    /// `Present`/`Absent` from a measured threshold test, `Unknown` when unmeasured.
    pub fn from_measure(value: Option<f64>, test: impl Fn(f64) -> bool) -> Self {
        match value {
            Some(v) if test(v) => Presence::Present,
            Some(_) => Presence::Absent,
            None => Presence::Unknown,
        }
    }
}

impl Choice for Presence {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Laterality {
    #[default]
    Unknown,
    Left,
    Right,
    Bilateral,
    Midline,
}

impl Laterality {
    pub fn adjective(self) -> Option<&'static str> {
        match self {
            Laterality::Unknown => None,
            Laterality::Left => Some("left"),
            Laterality::Right => Some("right"),
            Laterality::Bilateral => Some("bilateral"),
            Laterality::Midline => Some("midline"),
        }
    }
}

impl Choice for Laterality {}

/// Three-step severity used for effacement, compression, and edema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Degree {
    #[default]
    Unknown,
    None,
    Mild,
    Marked,
}

impl Degree {
    pub fn is_positive(self) -> bool {
        matches!(self, Degree::Mild | Degree::Marked)
    }

    pub fn adjective(self) -> Option<&'static str> {
        match self {
            Degree::Mild => Some("mild"),
            Degree::Marked => Some("marked"),
            Degree::Unknown | Degree::None => None,
        }
    }
}

impl Choice for Degree {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Multiplicity {
    #[default]
    Unknown,
    Single,
    Multiple,
}

impl Choice for Multiplicity {}
