//! Footprint scoring.
//!
//! `estimate` is pure and total: every input produces a result, and the same
//! input always produces the same result.

use std::time::Duration;

use tracing::debug;

use super::types::*;

/// Emission factor per mile for electric cars.
const ELECTRIC_FACTOR_PER_MILE: f64 = 0.1;
/// Emission factor per mile for everything else (hybrid and gasoline).
const COMBUSTION_FACTOR_PER_MILE: f64 = 0.3;
const ELECTRICITY_FACTOR_PER_KWH: f64 = 0.5;
const GAS_FACTOR_PER_THERM: f64 = 0.2;

/// Totals at or above this fill the result gauge.
pub const GAUGE_MAX: f64 = 500.0;
const LOW_RATING_BELOW: i64 = 150;
const MODERATE_RATING_BELOW: i64 = 300;

/// Threshold below which renewable share triggers the energy advice.
const RENEWABLE_ADVICE_BELOW: f64 = 50.0;
/// Threshold below which the recycling rate triggers the waste advice.
const RECYCLING_ADVICE_BELOW: f64 = 70.0;

pub const ADVICE_SWITCH_VEHICLE: &str =
    "Consider switching to an electric or hybrid vehicle to reduce emissions.";
pub const ADVICE_RENEWABLE_ENERGY: &str =
    "Increase your use of renewable energy sources or switch to a green energy provider.";
pub const ADVICE_REDUCE_MEAT: &str =
    "Try reducing meat consumption by having more plant-based meals each week.";
pub const ADVICE_RECYCLING: &str =
    "Improve your recycling habits and reduce single-use plastics.";

pub fn transportation_score(t: &Transportation) -> f64 {
    let factor = match t.car_type {
        CarType::Electric => ELECTRIC_FACTOR_PER_MILE,
        CarType::Hybrid | CarType::Gasoline => COMBUSTION_FACTOR_PER_MILE,
    };
    t.miles_driven_per_week * factor
}

pub fn energy_score(e: &Energy) -> f64 {
    e.electricity_kwh_per_month * (1.0 - e.renewable_percent / 100.0) * ELECTRICITY_FACTOR_PER_KWH
        + e.gas_therms_per_month * GAS_FACTOR_PER_THERM
}

pub fn diet_score(d: &Diet) -> f64 {
    match d.diet_type {
        DietType::Vegan => 50.0,
        DietType::Vegetarian => 100.0,
        DietType::Omnivore => 200.0,
    }
}

/// Waste score, floored at zero when combined rates exceed 200%.
pub fn waste_score(w: &Waste) -> f64 {
    let score = 100.0 - (w.recycling_rate_percent + w.composting_rate_percent) / 2.0;
    score.max(0.0)
}

/// Advice strings in rule order. Each rule fires independently.
pub fn recommendations(profile: &LifestyleProfile) -> Vec<String> {
    let mut advice = Vec::new();

    if profile.transportation.car_type == CarType::Gasoline {
        advice.push(ADVICE_SWITCH_VEHICLE.to_string());
    }
    if profile.energy.renewable_percent < RENEWABLE_ADVICE_BELOW {
        advice.push(ADVICE_RENEWABLE_ENERGY.to_string());
    }
    if profile.diet.diet_type == DietType::Omnivore {
        advice.push(ADVICE_REDUCE_MEAT.to_string());
    }
    if profile.waste.recycling_rate_percent < RECYCLING_ADVICE_BELOW {
        advice.push(ADVICE_RECYCLING.to_string());
    }

    advice
}

/// Convert a lifestyle profile into a scored result.
///
/// Breakdown values are rounded one by one, while the total is rounded from
/// the unrounded sum, so the total can differ from the sum of the breakdown.
pub fn estimate(profile: &LifestyleProfile) -> FootprintResult {
    let transportation = transportation_score(&profile.transportation);
    let energy = energy_score(&profile.energy);
    let diet = diet_score(&profile.diet);
    let waste = waste_score(&profile.waste);

    let total = transportation + energy + diet + waste;

    FootprintResult {
        total_footprint: total.round() as i64,
        breakdown: FootprintBreakdown {
            transportation: transportation.round() as i64,
            energy: energy.round() as i64,
            diet: diet.round() as i64,
            waste: waste.round() as i64,
        },
        recommendations: recommendations(profile),
    }
}

/// `estimate`, surfaced after `delay` to model a slow computation.
pub async fn estimate_deferred(profile: LifestyleProfile, delay: Duration) -> FootprintResult {
    tokio::time::sleep(delay).await;
    let result = estimate(&profile);
    debug!(
        "Estimated footprint {} kg CO2e after {:?}",
        result.total_footprint, delay
    );
    result
}

pub fn rating(total_footprint: i64) -> FootprintRating {
    if total_footprint < LOW_RATING_BELOW {
        FootprintRating::Low
    } else if total_footprint < MODERATE_RATING_BELOW {
        FootprintRating::Moderate
    } else {
        FootprintRating::High
    }
}

/// Share of the gauge filled by a total, capped at 100.
pub fn gauge_percent(total_footprint: i64) -> f64 {
    (total_footprint as f64 / GAUGE_MAX * 100.0).min(100.0)
}
