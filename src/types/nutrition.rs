//! Nutrition profiles and macro accumulators.

use serde::{Deserialize, Serialize};

/// Nutritional profile of one serving of a food category.
///
/// Macro values come from the static catalog; `calories` may be replaced by
/// the regression estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionProfile {
    /// Energy in kcal.
    pub calories: f64,
    /// Protein in grams.
    pub protein_g: f64,
    /// Carbohydrates in grams.
    pub carbs_g: f64,
    /// Fat in grams.
    pub fat_g: f64,
    /// Dietary fiber in grams.
    pub fiber_g: f64,
}

impl NutritionProfile {
    /// Create a profile from its five components.
    pub const fn new(calories: f64, protein_g: f64, carbs_g: f64, fat_g: f64, fiber_g: f64) -> Self {
        Self {
            calories,
            protein_g,
            carbs_g,
            fat_g,
            fiber_g,
        }
    }

    /// Same profile with `calories` replaced.
    pub fn with_calories(self, calories: f64) -> Self {
        Self { calories, ..self }
    }

    /// Macro totals of this profile (fiber is not tracked in daily totals).
    pub fn macros(&self) -> MacroTotals {
        MacroTotals {
            calories: self.calories,
            protein_g: self.protein_g,
            carbs_g: self.carbs_g,
            fat_g: self.fat_g,
        }
    }
}

/// Calorie and macro totals used for daily budgets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTotals {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl MacroTotals {
    /// The state after eating one serving of `profile`.
    pub fn with_meal(&self, profile: &NutritionProfile) -> MacroTotals {
        MacroTotals {
            calories: self.calories + profile.calories,
            protein_g: self.protein_g + profile.protein_g,
            carbs_g: self.carbs_g + profile.carbs_g,
            fat_g: self.fat_g + profile.fat_g,
        }
    }

    /// Per-field `max(0, self - other)`.
    pub fn saturating_sub(&self, other: &MacroTotals) -> MacroTotals {
        MacroTotals {
            calories: (self.calories - other.calories).max(0.0),
            protein_g: (self.protein_g - other.protein_g).max(0.0),
            carbs_g: (self.carbs_g - other.carbs_g).max(0.0),
            fat_g: (self.fat_g - other.fat_g).max(0.0),
        }
    }
}

/// What the user has already eaten today.
///
/// Owned by the caller and passed by value; the pipeline only derives
/// hypothetical states from it.
pub type ConsumedState = MacroTotals;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_meal_adds_macros_and_leaves_original() {
        let consumed = ConsumedState {
            calories: 500.0,
            protein_g: 20.0,
            carbs_g: 60.0,
            fat_g: 10.0,
        };
        let pizza = NutritionProfile::new(285.0, 12.0, 36.0, 10.0, 2.5);

        let after = consumed.with_meal(&pizza);
        assert_eq!(after.calories, 785.0);
        assert_eq!(after.protein_g, 32.0);
        assert_eq!(after.carbs_g, 96.0);
        assert_eq!(after.fat_g, 20.0);
        assert_eq!(consumed.calories, 500.0);
    }

    #[test]
    fn saturating_sub_never_goes_negative() {
        let target = MacroTotals {
            calories: 2000.0,
            protein_g: 125.0,
            carbs_g: 250.0,
            fat_g: 55.0,
        };
        let eaten = MacroTotals {
            calories: 2479.0,
            protein_g: 100.0,
            carbs_g: 300.0,
            fat_g: 55.0,
        };
        let remaining = target.saturating_sub(&eaten);
        assert_eq!(remaining.calories, 0.0);
        assert_eq!(remaining.protein_g, 25.0);
        assert_eq!(remaining.carbs_g, 0.0);
        assert_eq!(remaining.fat_g, 0.0);
    }

    #[test]
    fn with_calories_keeps_macros() {
        let egg = NutritionProfile::new(155.0, 13.0, 1.1, 11.0, 0.0);
        let refined = egg.with_calories(160.5);
        assert_eq!(refined.calories, 160.5);
        assert_eq!(refined.protein_g, 13.0);
        assert_eq!(refined.fiber_g, 0.0);
    }
}
