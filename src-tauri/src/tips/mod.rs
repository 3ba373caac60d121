//! Sustainability tips: the static catalog and its text/facet filter.
//!
//! - **Catalog**: loaded from TOML (embedded default or a custom file)
//! - **Filter**: case-insensitive text match on title/description, AND-ed
//!   with optional category, difficulty and impact facets
//! - **Daily tip**: random pick for the dashboard card, never repeating the
//!   tip currently shown

mod catalog;
mod filter;
mod types;

pub use catalog::{default_catalog, load_catalog, next_daily_index, parse_catalog};
pub use filter::{filter_tips, RawTipQuery, TipQuery};
pub use types::*;
