//! Public types for the Nutrilens API.

mod goal;
mod nutrition;
mod prediction;
mod report;

pub use goal::{
    DietaryGoal, GoalKind, KCAL_PER_GRAM_CARBS, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN,
};
pub use nutrition::{ConsumedState, MacroTotals, NutritionProfile};
pub use prediction::{PredictionEnvelope, PredictionResult, UNCLASSIFIED_ERROR};
pub use report::{SuggestionKind, SuggestionReport};
