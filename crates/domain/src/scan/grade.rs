use serde::{Deserialize, Serialize};

/// Recognized condition grades
///
/// Anything else a scanner reports (including the "N/A" placeholder)
/// is counted in the separate unknown bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
}

impl Grade {
    pub const ALL: [Grade; 5] = [Grade::APlus, Grade::A, Grade::B, Grade::C, Grade::D];

    /// Exact, case-sensitive match against the grade labels
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "A+" => Some(Self::APlus),
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}
