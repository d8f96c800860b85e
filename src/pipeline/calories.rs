//! Calorie estimation with a static fallback.

use std::fmt;

use crate::catalog;
use crate::model::LoadedRegressor;
use crate::telemetry;
use crate::types::{KCAL_PER_GRAM_CARBS, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN, NutritionProfile};

/// Why an estimate came from the static table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No regressor is loaded.
    NoRegressor,
    /// The regressor's encoder never saw this category.
    UnseenCategory,
    /// The regressor failed or returned a non-physical value.
    InferenceFailed(String),
}

impl FallbackReason {
    /// Metric label value.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoRegressor => "no_regressor",
            Self::UnseenCategory => "unseen_category",
            Self::InferenceFailed(_) => "inference_failed",
        }
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRegressor => f.write_str("no calorie regressor loaded"),
            Self::UnseenCategory => f.write_str("category unseen by the calorie regressor"),
            Self::InferenceFailed(msg) => write!(f, "calorie regression failed: {msg}"),
        }
    }
}

/// Where a calorie value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalorieSource {
    Regressed,
    Fallback(FallbackReason),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalorieEstimate {
    pub calories: f64,
    pub source: CalorieSource,
}

impl CalorieEstimate {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, CalorieSource::Fallback(_))
    }
}

/// Regressor input row for a category: its encoded id, the four macros in
/// grams, then protein, carbs and fat converted to kcal.
pub fn calorie_features(food_id: usize, profile: &NutritionProfile) -> [f32; 8] {
    [
        food_id as f32,
        profile.protein_g as f32,
        profile.carbs_g as f32,
        profile.fat_g as f32,
        profile.fiber_g as f32,
        (profile.protein_g * KCAL_PER_GRAM_PROTEIN) as f32,
        (profile.carbs_g * KCAL_PER_GRAM_CARBS) as f32,
        (profile.fat_g * KCAL_PER_GRAM_FAT) as f32,
    ]
}

/// Estimates calories per serving, refining the catalog value with the
/// regressor when one is loaded.
#[derive(Clone, Copy)]
pub struct CalorieEstimator<'a> {
    regressor: Option<&'a LoadedRegressor>,
}

impl<'a> CalorieEstimator<'a> {
    pub fn new(regressor: Option<&'a LoadedRegressor>) -> Self {
        Self { regressor }
    }

    /// Estimate calories with their provenance, or `None` for a category
    /// missing from the catalog.
    pub fn estimate(&self, food_type: &str) -> Option<CalorieEstimate> {
        let profile = catalog::nutrition_profile(food_type)?;
        let estimate = match self.regress(food_type, &profile) {
            Ok(calories) => CalorieEstimate {
                calories,
                source: CalorieSource::Regressed,
            },
            Err(reason) => {
                tracing::debug!(food_type, %reason, "using nominal calories");
                metrics::counter!(telemetry::CALORIE_FALLBACKS_TOTAL,
                    "reason" => reason.label(),
                )
                .increment(1);
                CalorieEstimate {
                    calories: profile.calories,
                    source: CalorieSource::Fallback(reason),
                }
            }
        };
        Some(estimate)
    }

    pub fn estimate_calories(&self, food_type: &str) -> Option<f64> {
        self.estimate(food_type).map(|e| e.calories)
    }

    /// Catalog profile with its calories replaced by the estimate.
    pub fn nutrition_info(&self, food_type: &str) -> Option<NutritionProfile> {
        let calories = self.estimate_calories(food_type)?;
        catalog::nutrition_profile(food_type).map(|p| p.with_calories(calories))
    }

    fn regress(
        &self,
        food_type: &str,
        profile: &NutritionProfile,
    ) -> std::result::Result<f64, FallbackReason> {
        let regressor = self.regressor.ok_or(FallbackReason::NoRegressor)?;
        let id = regressor
            .foods
            .transform(food_type)
            .ok_or(FallbackReason::UnseenCategory)?;
        let value = regressor
            .model
            .predict(&calorie_features(id, profile))
            .map_err(|e| FallbackReason::InferenceFailed(e.to_string()))?;
        if !value.is_finite() || value < 0.0 {
            return Err(FallbackReason::InferenceFailed(format!(
                "non-physical estimate {value}"
            )));
        }
        Ok(f64::from(value))
    }
}
