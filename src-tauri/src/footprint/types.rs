use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarType {
    Electric,
    Hybrid,
    Gasoline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DietType {
    Vegan,
    Vegetarian,
    Omnivore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transportation {
    pub car_type: CarType,
    pub miles_driven_per_week: f64,
    pub public_transport_trips_per_week: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Energy {
    pub electricity_kwh_per_month: f64,
    /// Share of electricity from renewable sources, 0-100.
    pub renewable_percent: f64,
    pub gas_therms_per_month: f64,
}

/// Diet answers. Only `diet_type` feeds the score; the percentages are
/// collected by the questionnaire but do not change the estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diet {
    pub diet_type: DietType,
    pub local_food_percent: f64,
    pub food_waste_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Waste {
    pub recycling_rate_percent: f64,
    pub composting_rate_percent: f64,
    pub single_use_items_per_week: f64,
}

/// The four-category lifestyle questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifestyleProfile {
    pub transportation: Transportation,
    pub energy: Energy,
    pub diet: Diet,
    pub waste: Waste,
}

impl Default for LifestyleProfile {
    /// The questionnaire's initial answers.
    fn default() -> Self {
        Self {
            transportation: Transportation {
                car_type: CarType::Gasoline,
                miles_driven_per_week: 50.0,
                public_transport_trips_per_week: 5.0,
            },
            energy: Energy {
                electricity_kwh_per_month: 500.0,
                renewable_percent: 20.0,
                gas_therms_per_month: 50.0,
            },
            diet: Diet {
                diet_type: DietType::Omnivore,
                local_food_percent: 30.0,
                food_waste_percent: 20.0,
            },
            waste: Waste {
                recycling_rate_percent: 50.0,
                composting_rate_percent: 20.0,
                single_use_items_per_week: 10.0,
            },
        }
    }
}

fn clamp_field(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, max)
    }
}

impl LifestyleProfile {
    /// Pin every numeric answer to the range its slider allows.
    pub fn clamped(&self) -> Self {
        let t = &self.transportation;
        let e = &self.energy;
        let d = &self.diet;
        let w = &self.waste;
        Self {
            transportation: Transportation {
                car_type: t.car_type,
                miles_driven_per_week: clamp_field(t.miles_driven_per_week, 500.0),
                public_transport_trips_per_week: clamp_field(t.public_transport_trips_per_week, 30.0),
            },
            energy: Energy {
                electricity_kwh_per_month: clamp_field(e.electricity_kwh_per_month, 2000.0),
                renewable_percent: clamp_field(e.renewable_percent, 100.0),
                gas_therms_per_month: clamp_field(e.gas_therms_per_month, 200.0),
            },
            diet: Diet {
                diet_type: d.diet_type,
                local_food_percent: clamp_field(d.local_food_percent, 100.0),
                food_waste_percent: clamp_field(d.food_waste_percent, 100.0),
            },
            waste: Waste {
                recycling_rate_percent: clamp_field(w.recycling_rate_percent, 100.0),
                composting_rate_percent: clamp_field(w.composting_rate_percent, 100.0),
                single_use_items_per_week: clamp_field(w.single_use_items_per_week, 50.0),
            },
        }
    }
}

/// Scoring categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FootprintCategory {
    Transportation,
    Energy,
    Diet,
    Waste,
}

impl FootprintCategory {
    pub const ALL: [FootprintCategory; 4] = [
        FootprintCategory::Transportation,
        FootprintCategory::Energy,
        FootprintCategory::Diet,
        FootprintCategory::Waste,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FootprintCategory::Transportation => "Transportation",
            FootprintCategory::Energy => "Energy",
            FootprintCategory::Diet => "Diet",
            FootprintCategory::Waste => "Waste",
        }
    }
}

/// Per-category sub-scores, each rounded independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FootprintBreakdown {
    pub transportation: i64,
    pub energy: i64,
    pub diet: i64,
    pub waste: i64,
}

impl FootprintBreakdown {
    pub fn get(&self, category: FootprintCategory) -> i64 {
        match category {
            FootprintCategory::Transportation => self.transportation,
            FootprintCategory::Energy => self.energy,
            FootprintCategory::Diet => self.diet,
            FootprintCategory::Waste => self.waste,
        }
    }

    /// (category, value) pairs in display order.
    pub fn entries(&self) -> Vec<(FootprintCategory, i64)> {
        FootprintCategory::ALL
            .iter()
            .map(|c| (*c, self.get(*c)))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FootprintResult {
    /// Total in kg CO2e, rounded from the unrounded category sum.
    pub total_footprint: i64,
    pub breakdown: FootprintBreakdown,
    pub recommendations: Vec<String>,
}

/// Qualitative band for a total footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FootprintRating {
    Low,
    Moderate,
    High,
}

impl FootprintRating {
    pub fn summary(&self) -> &'static str {
        match self {
            FootprintRating::Low => "Excellent! Your carbon footprint is low.",
            FootprintRating::Moderate => "Good. There's room for improvement.",
            FootprintRating::High => "High. Consider making lifestyle changes.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_serializes_camel_case() {
        let json = serde_json::to_value(LifestyleProfile::default()).unwrap();
        assert_eq!(json["transportation"]["carType"], "gasoline");
        assert_eq!(json["transportation"]["milesDrivenPerWeek"], 50.0);
        assert_eq!(json["energy"]["renewablePercent"], 20.0);
        assert_eq!(json["diet"]["dietType"], "omnivore");
        assert_eq!(json["waste"]["singleUseItemsPerWeek"], 10.0);
    }

    #[test]
    fn test_clamped_pins_out_of_range_values() {
        let mut profile = LifestyleProfile::default();
        profile.transportation.miles_driven_per_week = 9000.0;
        profile.energy.renewable_percent = -20.0;
        profile.waste.recycling_rate_percent = f64::NAN;
        profile.waste.single_use_items_per_week = 51.0;

        let clamped = profile.clamped();
        assert_eq!(clamped.transportation.miles_driven_per_week, 500.0);
        assert_eq!(clamped.energy.renewable_percent, 0.0);
        assert_eq!(clamped.waste.recycling_rate_percent, 0.0);
        assert_eq!(clamped.waste.single_use_items_per_week, 50.0);
        assert_eq!(clamped.diet, profile.diet);
    }

    #[test]
    fn test_breakdown_serializes_as_category_map() {
        let breakdown = FootprintBreakdown {
            transportation: 15,
            energy: 210,
            diet: 200,
            waste: 65,
        };
        let json = serde_json::to_string(&breakdown).unwrap();
        assert_eq!(
            json,
            r#"{"transportation":15,"energy":210,"diet":200,"waste":65}"#
        );
    }

    #[test]
    fn test_breakdown_entries_in_display_order() {
        let breakdown = FootprintBreakdown {
            transportation: 1,
            energy: 2,
            diet: 3,
            waste: 4,
        };
        let labels: Vec<_> = breakdown.entries().iter().map(|(c, _)| c.label()).collect();
        assert_eq!(labels, vec!["Transportation", "Energy", "Diet", "Waste"]);
        assert_eq!(breakdown.get(FootprintCategory::Diet), 3);
    }
}
