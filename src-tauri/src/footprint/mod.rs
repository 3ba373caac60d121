//! Carbon-footprint estimation from a lifestyle questionnaire.
//!
//! # Scoring
//!
//! | Category       | Score                                                     |
//! |----------------|-----------------------------------------------------------|
//! | Transportation | miles/week x 0.1 (electric) or 0.3 (hybrid, gasoline)     |
//! | Energy         | kWh x (1 - renewable%/100) x 0.5 + therms x 0.2           |
//! | Diet           | vegan 50, vegetarian 100, omnivore 200                    |
//! | Waste          | 100 - (recycling% + composting%) / 2, floored at 0        |
//!
//! # Example
//!
//! ```ignore
//! use ecoconnect_tauri::footprint::{estimate, LifestyleProfile};
//!
//! let result = estimate(&LifestyleProfile::default());
//! assert_eq!(result.total_footprint, 490);
//! ```

mod estimator;
mod types;

pub use estimator::{
    estimate, estimate_deferred, gauge_percent, rating, recommendations, ADVICE_RECYCLING,
    ADVICE_REDUCE_MEAT, ADVICE_RENEWABLE_ENERGY, ADVICE_SWITCH_VEHICLE, GAUGE_MAX,
};
pub use types::*;
