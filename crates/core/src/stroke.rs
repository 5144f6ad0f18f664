//! Stroke taxonomy shared by sessions, results and personal bests.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Swim stroke. `Drill` marks technique work and is valid for training
/// sessions only; competition results reject it at validation.
///
/// Wire form is the exact label, matching the store's check constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stroke {
    Free,
    Back,
    Breast,
    Fly,
    #[serde(rename = "IM")]
    Im,
    Drill,
}

impl Stroke {
    pub const ALL: [Stroke; 6] = [
        Stroke::Free,
        Stroke::Back,
        Stroke::Breast,
        Stroke::Fly,
        Stroke::Im,
        Stroke::Drill,
    ];

    /// Case-insensitive parse; `None` for unrecognized labels.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "free" => Some(Self::Free),
            "back" => Some(Self::Back),
            "breast" => Some(Self::Breast),
            "fly" => Some(Self::Fly),
            "im" => Some(Self::Im),
            "drill" => Some(Self::Drill),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Back => "Back",
            Self::Breast => "Breast",
            Self::Fly => "Fly",
            Self::Im => "IM",
            Self::Drill => "Drill",
        }
    }

    /// Strokes legal on a competition result.
    pub fn is_competition(&self) -> bool {
        !matches!(self, Self::Drill)
    }
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
