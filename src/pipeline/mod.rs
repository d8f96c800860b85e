//! The prediction pipeline.
//!
//! Each stage borrows what it needs from the loaded model set:
//! [`FoodClassifier`] turns an image into a label, [`CalorieEstimator`]
//! refines the label's calories and [`SuggestionEngine`] builds the report.
//! [`NutritionPredictor`] owns the models and runs the stages in order.

pub mod calories;
pub mod classifier;
pub mod predictor;
pub mod suggestions;

pub use calories::{
    CalorieEstimate, CalorieEstimator, CalorieSource, FallbackReason, calorie_features,
};
pub use classifier::FoodClassifier;
pub use predictor::NutritionPredictor;
pub use suggestions::{Rule, RuleContext, SuggestionEngine};
