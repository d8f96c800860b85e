//! Model traits.
//!
//! The pipeline talks to trained models only through these traits, so a
//! backend (ONNX Runtime, an in-memory double in tests) can be swapped
//! without touching the stages that use it.

use crate::Result;

/// A multi-class probabilistic classifier over feature vectors.
pub trait ClassifierModel: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Class probabilities for one feature vector, in label-encoder order.
    fn predict_proba(&self, features: &[f32]) -> Result<Vec<f32>>;

    /// Feature width the model was fit on, when the backend knows it.
    fn n_features(&self) -> Option<usize> {
        None
    }
}

/// A scalar regressor over the 8-value calorie feature row.
///
/// The row is `[category id, protein, carbs, fat, fiber, protein kcal,
/// carbs kcal, fat kcal]`, macros in grams.
pub trait RegressorModel: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Predicted calories for one row.
    fn predict(&self, row: &[f32; 8]) -> Result<f32>;
}
