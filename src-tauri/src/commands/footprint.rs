use std::time::Duration;

use serde::Serialize;
use tauri::State;
use tracing::info;

use crate::footprint::{
    estimate_deferred, gauge_percent, rating, FootprintRating, FootprintResult, LifestyleProfile,
};
use crate::state::AppState;

/// Estimator output plus the values the result card derives from it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FootprintReport {
    #[serde(flatten)]
    pub result: FootprintResult,
    pub rating: FootprintRating,
    pub rating_summary: String,
    pub gauge_percent: f64,
}

impl From<FootprintResult> for FootprintReport {
    fn from(result: FootprintResult) -> Self {
        let band = rating(result.total_footprint);
        Self {
            rating: band,
            rating_summary: band.summary().to_string(),
            gauge_percent: gauge_percent(result.total_footprint),
            result,
        }
    }
}

/// Estimate the footprint for a questionnaire. Inputs are clamped to the
/// slider ranges first; the result arrives after the configured delay.
#[tauri::command]
pub async fn calculate_footprint(
    state: State<'_, AppState>,
    profile: LifestyleProfile,
) -> Result<FootprintReport, String> {
    let delay = Duration::from_millis(state.config.calculator.delay_ms);
    let result = estimate_deferred(profile.clamped(), delay).await;
    info!(
        "Calculated footprint: {} kg CO2e, {} recommendations",
        result.total_footprint,
        result.recommendations.len()
    );
    Ok(result.into())
}

/// The questionnaire's initial values.
#[tauri::command]
pub fn default_profile() -> LifestyleProfile {
    LifestyleProfile::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::estimate;

    #[test]
    fn test_report_for_reference_profile() {
        let report = FootprintReport::from(estimate(&LifestyleProfile::default()));
        assert_eq!(report.result.total_footprint, 490);
        assert_eq!(report.rating, FootprintRating::High);
        assert_eq!(report.gauge_percent, 98.0);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["totalFootprint"], 490);
        assert_eq!(json["ratingSummary"], "High. Consider making lifestyle changes.");
        assert_eq!(json["breakdown"]["energy"], 210);
    }
}
