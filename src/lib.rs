//! Nutrilens - food photo recognition with goal-aware nutrition advice
//!
//! A [`NutritionPredictor`] classifies a food photo into one of a fixed set
//! of categories, estimates the serving's calories and builds a
//! [`SuggestionReport`] against a dietary goal and what has already been
//! eaten today.
//!
//! # Example
//!
//! ```rust,no_run
//! use nutrilens::{Config, ConsumedState, ImageInput, NutritionPredictor};
//!
//! fn main() -> nutrilens::Result<()> {
//!     let config = Config::load(None)?;
//!     let predictor = NutritionPredictor::from_config(&config)?;
//!
//!     let consumed = ConsumedState {
//!         calories: 1200.0,
//!         ..Default::default()
//!     };
//!     let envelope = predictor.predict(
//!         &ImageInput::from(std::path::Path::new("lunch.jpg")),
//!         "weight_loss",
//!         Some(consumed),
//!     )?;
//!
//!     if let Some(report) = envelope.suggestions {
//!         for line in &report.suggestions {
//!             println!("{line}");
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Models
//!
//! The classifier and calorie regressor are ONNX artifacts run through ONNX
//! Runtime when the `local-inference` feature is enabled. Without them the
//! pipeline degrades: images are reported unclassified and calories come
//! from the static catalog. Any type implementing [`ClassifierModel`] or
//! [`RegressorModel`] can stand in for the ONNX backends.

pub mod catalog;
pub mod config;
pub mod error;
pub mod features;
pub mod model;
pub mod pipeline;
pub mod providers;
pub mod telemetry;
pub mod types;
pub mod version;

// Re-export main types at crate root
pub use config::Config;
pub use error::{NutrilensError, Result};
pub use features::{FeatureConfig, FeatureExtractor, ImageInput};
pub use model::{Device, LabelEncoder, LoadedModels, ModelArtifacts, ModelManager};
pub use pipeline::{
    CalorieEstimate, CalorieEstimator, CalorieSource, FallbackReason, FoodClassifier,
    NutritionPredictor, SuggestionEngine,
};
pub use providers::{ClassifierModel, RegressorModel};
pub use types::{
    ConsumedState, DietaryGoal, GoalKind, MacroTotals, NutritionProfile, PredictionEnvelope,
    PredictionResult, SuggestionKind, SuggestionReport,
};
pub use version::{PKG_VERSION, version_string};
