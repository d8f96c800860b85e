//! Food classifier backed by ONNX Runtime.

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;

use super::onnx::{build_session, run_row};
use super::traits::ClassifierModel;
use crate::Result;
use crate::model::Device;

/// A probabilistic classifier exported to ONNX.
///
/// The graph takes a `[1, n_features]` float tensor and yields a
/// `[1, n_classes]` probability tensor.
pub struct OnnxClassifier {
    session: Mutex<Session>,
    input: String,
    output: String,
    n_features: Option<usize>,
}

impl OnnxClassifier {
    pub fn new(
        model_path: &Path,
        device: &Device,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Result<Self> {
        let session = build_session(model_path, device)?;
        tracing::debug!(path = ?model_path, device = device.name(), "loaded classifier session");
        Ok(Self {
            session: Mutex::new(session),
            input: input.into(),
            output: output.into(),
            n_features: None,
        })
    }

    /// Record the feature width the model was fit on.
    pub fn with_n_features(mut self, n_features: Option<usize>) -> Self {
        self.n_features = n_features;
        self
    }
}

impl ClassifierModel for OnnxClassifier {
    fn name(&self) -> &str {
        "onnx"
    }

    fn predict_proba(&self, features: &[f32]) -> Result<Vec<f32>> {
        run_row(&self.session, &self.input, &self.output, features)
    }

    fn n_features(&self) -> Option<usize> {
        self.n_features
    }
}
