use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EcoConnectError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TipCategory {
    Energy,
    Water,
    Waste,
    Food,
    Transportation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Impact {
    Low,
    Medium,
    High,
}

impl TipCategory {
    pub const ALL: [TipCategory; 5] = [
        TipCategory::Energy,
        TipCategory::Water,
        TipCategory::Waste,
        TipCategory::Food,
        TipCategory::Transportation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TipCategory::Energy => "Energy",
            TipCategory::Water => "Water",
            TipCategory::Waste => "Waste",
            TipCategory::Food => "Food",
            TipCategory::Transportation => "Transportation",
        }
    }
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl Impact {
    pub const ALL: [Impact; 3] = [Impact::Low, Impact::Medium, Impact::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::Low => "Low",
            Impact::Medium => "Medium",
            Impact::High => "High",
        }
    }
}

/// Parse a facet value by its display name, ignoring case.
fn parse_facet<T: Copy>(
    facet: &str,
    candidates: &[T],
    name_of: fn(&T) -> &'static str,
    raw: &str,
) -> Result<T, EcoConnectError> {
    let wanted = raw.trim();
    candidates
        .iter()
        .find(|c| name_of(c).eq_ignore_ascii_case(wanted))
        .copied()
        .ok_or_else(|| EcoConnectError::Validation(format!("Unknown {}: {}", facet, raw)))
}

impl FromStr for TipCategory {
    type Err = EcoConnectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_facet("category", &TipCategory::ALL, TipCategory::as_str, s)
    }
}

impl FromStr for Difficulty {
    type Err = EcoConnectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_facet("difficulty", &Difficulty::ALL, Difficulty::as_str, s)
    }
}

impl FromStr for Impact {
    type Err = EcoConnectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_facet("impact", &Impact::ALL, Impact::as_str, s)
    }
}

impl fmt::Display for TipCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the tips catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tip {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub category: TipCategory,
    pub difficulty: Difficulty,
    pub impact: Impact,
}

/// The full catalog as loaded from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipCatalog {
    pub tips: Vec<Tip>,
    /// One-line tips for the dashboard's rotating card.
    #[serde(default)]
    pub daily: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_facets_case_insensitive() {
        assert_eq!("energy".parse::<TipCategory>().unwrap(), TipCategory::Energy);
        assert_eq!(" Transportation ".parse::<TipCategory>().unwrap(), TipCategory::Transportation);
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!("Medium".parse::<Impact>().unwrap(), Impact::Medium);
    }

    #[test]
    fn test_parse_unknown_facet_is_validation_error() {
        let err = "Air".parse::<TipCategory>().unwrap_err();
        assert!(matches!(err, EcoConnectError::Validation(_)));
        assert!(err.to_string().contains("Unknown category: Air"));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for impact in Impact::ALL {
            assert_eq!(impact.to_string().parse::<Impact>().unwrap(), impact);
        }
    }
}
