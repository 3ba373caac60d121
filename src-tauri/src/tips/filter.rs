//! Text and facet filtering over the tip catalog.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::EcoConnectError;

use super::types::{Difficulty, Impact, Tip, TipCategory};

/// A filter over the catalog. An empty facet set places no restriction on
/// that facet; an empty text query matches every tip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipQuery {
    pub text: String,
    pub categories: BTreeSet<TipCategory>,
    pub difficulties: BTreeSet<Difficulty>,
    pub impacts: BTreeSet<Impact>,
}

/// Facet selections as plain strings, as they arrive from the UI. The
/// client owns search state; the backend only validates and applies it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTipQuery {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub difficulties: Vec<String>,
    #[serde(default)]
    pub impacts: Vec<String>,
}

impl TipQuery {
    pub fn matches(&self, tip: &Tip) -> bool {
        let needle = self.text.to_lowercase();
        let matches_text = needle.is_empty()
            || tip.title.to_lowercase().contains(&needle)
            || tip.description.to_lowercase().contains(&needle);

        matches_text
            && (self.categories.is_empty() || self.categories.contains(&tip.category))
            && (self.difficulties.is_empty() || self.difficulties.contains(&tip.difficulty))
            && (self.impacts.is_empty() || self.impacts.contains(&tip.impact))
    }
}

impl TryFrom<RawTipQuery> for TipQuery {
    type Error = EcoConnectError;

    fn try_from(raw: RawTipQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            text: raw.text,
            categories: raw
                .categories
                .iter()
                .map(|s| s.parse::<TipCategory>())
                .collect::<Result<_, _>>()?,
            difficulties: raw
                .difficulties
                .iter()
                .map(|s| s.parse::<Difficulty>())
                .collect::<Result<_, _>>()?,
            impacts: raw
                .impacts
                .iter()
                .map(|s| s.parse::<Impact>())
                .collect::<Result<_, _>>()?,
        })
    }
}

/// Keep the tips matching `query`, in catalog order.
pub fn filter_tips(catalog: &[Tip], query: &TipQuery) -> Vec<Tip> {
    catalog.iter().filter(|t| query.matches(t)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tips::catalog::default_catalog;

    fn ids(tips: &[Tip]) -> Vec<u32> {
        tips.iter().map(|t| t.id).collect()
    }

    fn text(query: &str) -> TipQuery {
        TipQuery {
            text: query.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_query_returns_full_catalog_in_order() {
        let catalog = default_catalog().tips;
        let result = filter_tips(&catalog, &TipQuery::default());
        assert_eq!(result, catalog);
    }

    #[test]
    fn test_text_query_led() {
        let catalog = default_catalog().tips;
        assert_eq!(ids(&filter_tips(&catalog, &text("LED"))), vec![2]);
        assert_eq!(ids(&filter_tips(&catalog, &text("led"))), vec![2]);
    }

    #[test]
    fn test_text_query_matches_description() {
        let catalog = default_catalog().tips;
        // "landfill" only appears in the composting description
        assert_eq!(ids(&filter_tips(&catalog, &text("LANDFILL"))), vec![5]);
    }

    #[test]
    fn test_category_facet() {
        let catalog = default_catalog().tips;
        let mut query = TipQuery {
            categories: BTreeSet::from([TipCategory::Energy]),
            ..Default::default()
        };
        assert_eq!(ids(&filter_tips(&catalog, &query)), vec![2, 4]);

        query.categories.insert(TipCategory::Food);
        assert_eq!(ids(&filter_tips(&catalog, &query)), vec![2, 4, 6]);
    }

    #[test]
    fn test_facets_combine_with_and() {
        let catalog = default_catalog().tips;
        let mut query = TipQuery {
            impacts: BTreeSet::from([Impact::High]),
            difficulties: BTreeSet::from([Difficulty::Medium]),
            ..Default::default()
        };
        assert_eq!(ids(&filter_tips(&catalog, &query)), vec![3, 5]);

        query.text = "compost".to_string();
        assert_eq!(ids(&filter_tips(&catalog, &query)), vec![5]);
    }

    #[test]
    fn test_no_matches() {
        let catalog = default_catalog().tips;
        let query = TipQuery {
            difficulties: BTreeSet::from([Difficulty::Hard]),
            ..Default::default()
        };
        assert!(filter_tips(&catalog, &query).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let catalog = default_catalog().tips;
        let query = TipQuery {
            text: "energy".to_string(),
            impacts: BTreeSet::from([Impact::Medium, Impact::High]),
            ..Default::default()
        };
        let once = filter_tips(&catalog, &query);
        let twice = filter_tips(&once, &query);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_raw_query_conversion() {
        let raw = RawTipQuery {
            text: "x".to_string(),
            categories: vec!["energy".to_string(), "Water".to_string()],
            difficulties: vec![],
            impacts: vec!["High".to_string()],
        };
        let query = TipQuery::try_from(raw).unwrap();
        assert_eq!(query.categories.len(), 2);
        assert!(query.impacts.contains(&Impact::High));

        let bad = RawTipQuery {
            difficulties: vec!["Impossible".to_string()],
            ..Default::default()
        };
        assert!(TipQuery::try_from(bad).is_err());
    }
}
