//! Calorie regressor backed by ONNX Runtime.

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;

use super::onnx::{build_session, run_row};
use super::traits::RegressorModel;
use crate::error::{NutrilensError, Result};
use crate::model::Device;

/// A scalar regressor exported to ONNX, taking a `[1, 8]` float row.
pub struct OnnxRegressor {
    session: Mutex<Session>,
    input: String,
    output: String,
}

impl OnnxRegressor {
    pub fn new(
        model_path: &Path,
        device: &Device,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Result<Self> {
        let session = build_session(model_path, device)?;
        tracing::debug!(path = ?model_path, device = device.name(), "loaded regressor session");
        Ok(Self {
            session: Mutex::new(session),
            input: input.into(),
            output: output.into(),
        })
    }
}

impl RegressorModel for OnnxRegressor {
    fn name(&self) -> &str {
        "onnx"
    }

    fn predict(&self, row: &[f32; 8]) -> Result<f32> {
        let values = run_row(&self.session, &self.input, &self.output, row)?;
        values
            .first()
            .copied()
            .ok_or_else(|| NutrilensError::Inference("regressor returned no values".to_string()))
    }
}
