//! End-to-end prediction: image in, goal-aware report out.

use std::sync::Arc;
use std::time::Instant;

use tracing::instrument;

use crate::config::Config;
use crate::error::Result;
use crate::features::{FeatureExtractor, ImageInput};
use crate::model::{LoadedModels, ModelManager};
use crate::telemetry;
use crate::types::{
    ConsumedState, NutritionProfile, PredictionEnvelope, PredictionResult, SuggestionReport,
};

use super::calories::{CalorieEstimate, CalorieEstimator};
use super::classifier::FoodClassifier;
use super::suggestions::SuggestionEngine;

/// The orchestrator callers talk to.
///
/// Models are loaded once, on first use, and shared by every later call.
/// The predictor keeps no per-request state, so it can be shared across
/// threads.
#[derive(Debug)]
pub struct NutritionPredictor {
    extractor: FeatureExtractor,
    models: ModelManager,
}

impl NutritionPredictor {
    pub fn new(extractor: FeatureExtractor, models: ModelManager) -> Self {
        Self { extractor, models }
    }

    /// Build a predictor from configuration. Models are not touched until
    /// the first request.
    pub fn from_config(config: &Config) -> Result<Self> {
        let extractor = FeatureExtractor::new(config.features.clone())?;
        let models =
            ModelManager::with_artifacts(config.models.artifacts.clone(), config.device()?);
        Ok(Self::new(extractor, models))
    }

    /// A predictor over models built in memory, with the default extractor.
    pub fn with_models(models: LoadedModels) -> Self {
        Self::new(FeatureExtractor::default(), ModelManager::preloaded(models))
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    pub fn manager(&self) -> &ModelManager {
        &self.models
    }

    /// Classify an image and build its report.
    ///
    /// Unclassifiable and malformed images produce a failed envelope.
    /// Errors are reserved for configuration and model faults.
    #[instrument(skip(self, image, consumed))]
    pub fn predict(
        &self,
        image: &ImageInput,
        goal: &str,
        consumed: Option<ConsumedState>,
    ) -> Result<PredictionEnvelope> {
        let start = Instant::now();
        let result = self.predict_inner(image, goal, consumed.unwrap_or_default());
        let status = match &result {
            Ok((_, status)) => *status,
            Err(_) => "error",
        };
        metrics::counter!(telemetry::PREDICTIONS_TOTAL, "status" => status).increment(1);
        metrics::histogram!(telemetry::PREDICTION_DURATION_SECONDS)
            .record(start.elapsed().as_secs_f64());
        result.map(|(envelope, _)| envelope)
    }

    fn predict_inner(
        &self,
        image: &ImageInput,
        goal: &str,
        consumed: ConsumedState,
    ) -> Result<(PredictionEnvelope, &'static str)> {
        let models = self.models.models()?;
        let classified = match self.classifier(&models).predict_food(image) {
            Ok(result) => result,
            Err(e) if e.is_input_error() => {
                tracing::warn!(error = %e, "rejected image");
                return Ok((PredictionEnvelope::failure(e.to_string()), "invalid_image"));
            }
            Err(e) => return Err(e),
        };

        let Some(food_type) = classified.food_type else {
            return Ok((PredictionEnvelope::unclassified(), "unclassified"));
        };
        let report = self
            .suggestions(&models)
            .build_report(&food_type, goal, &consumed);
        if report.is_none() {
            tracing::warn!(%food_type, "classifier label has no nutrition profile");
        }
        let envelope = PredictionEnvelope::success(food_type, classified.confidence, report);
        Ok((envelope, "ok"))
    }

    /// Classify an image without building a report.
    pub fn predict_food(&self, image: &ImageInput) -> Result<PredictionResult> {
        let models = self.models.models()?;
        self.classifier(&models).predict_food(image)
    }

    /// Calorie estimate with its provenance.
    pub fn estimate(&self, food_type: &str) -> Result<Option<CalorieEstimate>> {
        let models = self.models.models()?;
        Ok(calories(&models).estimate(food_type))
    }

    pub fn estimate_calories(&self, food_type: &str) -> Result<Option<f64>> {
        Ok(self.estimate(food_type)?.map(|e| e.calories))
    }

    pub fn nutrition_info(&self, food_type: &str) -> Result<Option<NutritionProfile>> {
        let models = self.models.models()?;
        Ok(calories(&models).nutrition_info(food_type))
    }

    /// Report for a known food, skipping classification.
    pub fn dietary_suggestions(
        &self,
        food_type: &str,
        goal: &str,
        consumed: Option<ConsumedState>,
    ) -> Result<Option<SuggestionReport>> {
        let models = self.models.models()?;
        Ok(self
            .suggestions(&models)
            .build_report(food_type, goal, &consumed.unwrap_or_default()))
    }

    fn classifier<'a>(&'a self, models: &'a Arc<LoadedModels>) -> FoodClassifier<'a> {
        FoodClassifier::new(&self.extractor, models.classifier.as_ref())
    }

    fn suggestions<'a>(&self, models: &'a Arc<LoadedModels>) -> SuggestionEngine<'a> {
        SuggestionEngine::new(calories(models))
    }
}

fn calories(models: &LoadedModels) -> CalorieEstimator<'_> {
    CalorieEstimator::new(models.regressor.as_ref())
}
