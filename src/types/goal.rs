//! Dietary goal types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::nutrition::ConsumedState;
use crate::NutrilensError;

/// kcal per gram of protein.
pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
/// kcal per gram of carbohydrate.
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
/// kcal per gram of fat.
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// The named goals the suggestion engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    WeightLoss,
    #[default]
    Maintenance,
    MuscleGain,
}

impl GoalKind {
    /// Every goal, in catalog order.
    pub const ALL: [GoalKind; 3] = [Self::WeightLoss, Self::Maintenance, Self::MuscleGain];

    /// Canonical identifier (`weight_loss`, `maintenance`, `muscle_gain`).
    pub fn name(&self) -> &'static str {
        match self {
            Self::WeightLoss => "weight_loss",
            Self::Maintenance => "maintenance",
            Self::MuscleGain => "muscle_gain",
        }
    }

    /// Look up a goal by identifier; `-` and `_` are interchangeable.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "weight_loss" => Some(Self::WeightLoss),
            "maintenance" => Some(Self::Maintenance),
            "muscle_gain" => Some(Self::MuscleGain),
            _ => None,
        }
    }

    /// Parameters of this goal from the static goal table.
    pub fn profile(&self) -> &'static DietaryGoal {
        crate::catalog::goal_profile(*self)
    }
}

impl fmt::Display for GoalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GoalKind {
    type Err = NutrilensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            NutrilensError::Configuration(format!(
                "unknown dietary goal '{s}' (expected weight_loss, maintenance or muscle_gain)"
            ))
        })
    }
}

/// Daily calorie budget and macro split of a goal.
///
/// The three ratios sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DietaryGoal {
    pub daily_calories: u32,
    pub protein_ratio: f64,
    pub carbs_ratio: f64,
    pub fat_ratio: f64,
    pub description: &'static str,
}

impl DietaryGoal {
    /// Daily protein target in grams.
    pub fn protein_target_g(&self) -> f64 {
        f64::from(self.daily_calories) * self.protein_ratio / KCAL_PER_GRAM_PROTEIN
    }

    /// Daily carbohydrate target in grams.
    pub fn carbs_target_g(&self) -> f64 {
        f64::from(self.daily_calories) * self.carbs_ratio / KCAL_PER_GRAM_CARBS
    }

    /// Daily fat target in grams.
    pub fn fat_target_g(&self) -> f64 {
        f64::from(self.daily_calories) * self.fat_ratio / KCAL_PER_GRAM_FAT
    }

    /// Calories still available before the next meal, never negative.
    pub fn remaining_before_meal(&self, consumed: &ConsumedState) -> f64 {
        (f64::from(self.daily_calories) - consumed.calories).max(0.0)
    }

    /// Fraction of the calorie budget already consumed, capped at 1.0.
    pub fn progress(&self, consumed: &ConsumedState) -> f64 {
        if self.daily_calories == 0 {
            return 1.0;
        }
        (consumed.calories / f64::from(self.daily_calories)).clamp(0.0, 1.0)
    }
}
