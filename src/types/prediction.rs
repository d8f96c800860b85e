//! Classification results and the prediction envelope.

use serde::{Deserialize, Serialize};

use super::report::SuggestionReport;

/// Error text of an envelope whose image could not be classified.
pub const UNCLASSIFIED_ERROR: &str = "Could not classify food image";

/// Outcome of food classification.
///
/// `confidence` is the classifier's probability for the predicted class,
/// which is the maximum over all classes. It is meaningless (and zero)
/// when `success` is false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub food_type: Option<String>,
    pub confidence: f64,
    pub success: bool,
    pub error: Option<String>,
}

impl PredictionResult {
    /// A successful classification.
    pub fn classified(food_type: impl Into<String>, confidence: f64) -> Self {
        Self {
            food_type: Some(food_type.into()),
            confidence,
            success: true,
            error: None,
        }
    }

    /// No classification because no classifier is loaded.
    pub fn unclassified(reason: impl Into<String>) -> Self {
        Self {
            food_type: None,
            confidence: 0.0,
            success: false,
            error: Some(reason.into()),
        }
    }
}

/// Terminal result of [`NutritionPredictor::predict`](crate::NutritionPredictor::predict).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<SuggestionReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PredictionEnvelope {
    /// Successful prediction with its suggestion report.
    ///
    /// `suggestions` is `None` only if the classifier emits a label missing
    /// from the nutrition catalog.
    pub fn success(
        food_type: impl Into<String>,
        confidence: f64,
        suggestions: Option<SuggestionReport>,
    ) -> Self {
        Self {
            success: true,
            food_type: Some(food_type.into()),
            confidence: Some(confidence),
            suggestions,
            error: None,
        }
    }

    /// Failed prediction carrying a message for the caller.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            food_type: None,
            confidence: None,
            suggestions: None,
            error: Some(error.into()),
        }
    }

    /// The image could not be mapped to a food type.
    pub fn unclassified() -> Self {
        Self::failure(UNCLASSIFIED_ERROR)
    }
}
