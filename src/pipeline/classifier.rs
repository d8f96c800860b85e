//! Food classification stage.

use tracing::instrument;

use crate::error::{NutrilensError, Result};
use crate::features::{FeatureExtractor, ImageInput};
use crate::model::LoadedClassifier;
use crate::types::{PredictionResult, UNCLASSIFIED_ERROR};

/// Maps images to food categories through the loaded classifier.
///
/// Without a classifier every image is reported unclassified; the image is
/// not even decoded.
#[derive(Clone, Copy)]
pub struct FoodClassifier<'a> {
    extractor: &'a FeatureExtractor,
    model: Option<&'a LoadedClassifier>,
}

impl<'a> FoodClassifier<'a> {
    pub fn new(extractor: &'a FeatureExtractor, model: Option<&'a LoadedClassifier>) -> Self {
        Self { extractor, model }
    }

    pub fn is_available(&self) -> bool {
        self.model.is_some()
    }

    /// Classify an image.
    ///
    /// Malformed images are input errors; a descriptor width that differs
    /// from what the classifier was fit on is a [`NutrilensError::FeatureMismatch`].
    #[instrument(skip_all)]
    pub fn predict_food(&self, image: &ImageInput) -> Result<PredictionResult> {
        let Some(model) = self.model else {
            tracing::debug!("no classifier loaded");
            return Ok(PredictionResult::unclassified(UNCLASSIFIED_ERROR));
        };
        let features = self.extractor.extract(image)?;
        classify(model, &features)
    }
}

/// Run a feature vector through a classifier and pick the most probable class.
pub fn classify(model: &LoadedClassifier, features: &[f32]) -> Result<PredictionResult> {
    let expected = model.model.n_features().or(model.labels.n_features());
    if let Some(expected) = expected
        && expected != features.len()
    {
        return Err(NutrilensError::FeatureMismatch {
            expected,
            actual: features.len(),
        });
    }

    let probabilities = model.model.predict_proba(features)?;
    if probabilities.len() != model.labels.len() {
        return Err(NutrilensError::Configuration(format!(
            "classifier returned {} probabilities for {} labels",
            probabilities.len(),
            model.labels.len()
        )));
    }

    let (index, confidence) = argmax(&probabilities)?;
    let food_type = model.labels.inverse_transform(index).ok_or_else(|| {
        NutrilensError::Configuration(format!("class index {index} has no label"))
    })?;

    tracing::debug!(food_type, confidence, "classified image");
    Ok(PredictionResult::classified(food_type, f64::from(confidence)))
}

/// Index and value of the largest probability; the first maximum wins.
fn argmax(probabilities: &[f32]) -> Result<(usize, f32)> {
    if let Some(bad) = probabilities
        .iter()
        .find(|p| !p.is_finite() || !(0.0..=1.0).contains(*p))
    {
        return Err(NutrilensError::Inference(format!(
            "classifier returned {bad}, which is not a probability"
        )));
    }
    probabilities
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best: Option<(usize, f32)>, (i, p)| match best {
            Some((_, b)) if b >= p => best,
            _ => Some((i, p)),
        })
        .ok_or_else(|| NutrilensError::Inference("classifier returned no probabilities".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LabelEncoder;
    use crate::providers::ClassifierModel;

    struct Fixed(Vec<f32>);

    impl ClassifierModel for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn predict_proba(&self, _features: &[f32]) -> Result<Vec<f32>> {
            Ok(self.0.clone())
        }
    }

    fn loaded(probs: Vec<f32>, labels: &[&str]) -> LoadedClassifier {
        LoadedClassifier {
            model: Box::new(Fixed(probs)),
            labels: LabelEncoder::new(labels.iter().copied()).unwrap(),
        }
    }

    #[test]
    fn first_maximum_wins() {
        assert_eq!(argmax(&[0.2, 0.4, 0.4]).unwrap(), (1, 0.4));
        assert_eq!(argmax(&[1.0]).unwrap(), (0, 1.0));
        assert!(argmax(&[]).is_err());
        assert!(argmax(&[0.5, f32::NAN]).is_err());
        assert!(argmax(&[2.5, -1.0]).is_err());
    }

    #[test]
    fn confidence_is_max_probability() {
        let model = loaded(vec![0.1, 0.7, 0.2], &["apple", "pizza", "rice"]);
        let result = classify(&model, &[0.0; 4]).unwrap();
        assert!(result.success);
        assert_eq!(result.food_type.as_deref(), Some("pizza"));
        assert!((result.confidence - 0.7).abs() < 1e-6);
    }

    #[test]
    fn probability_count_must_match_labels() {
        let model = loaded(vec![0.5, 0.5], &["apple", "pizza", "rice"]);
        let err = classify(&model, &[0.0; 4]).unwrap_err();
        assert!(matches!(err, NutrilensError::Configuration(_)));
    }

    #[test]
    fn width_recorded_in_encoder_is_enforced() {
        let mut model = loaded(vec![1.0], &["apple"]);
        model.labels = model.labels.with_n_features(10);
        let err = classify(&model, &[0.0; 4]).unwrap_err();
        assert!(matches!(
            err,
            NutrilensError::FeatureMismatch {
                expected: 10,
                actual: 4
            }
        ));
    }

    #[test]
    fn missing_classifier_skips_extraction() {
        let extractor = FeatureExtractor::default();
        let stage = FoodClassifier::new(&extractor, None);
        // The path does not exist; it must not be opened.
        let image = ImageInput::Path("/nonexistent/meal.jpg".into());
        let result = stage.predict_food(&image).unwrap();
        assert!(!result.success);
        assert_eq!(result.food_type, None);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.error.as_deref(), Some(UNCLASSIFIED_ERROR));
    }
}
