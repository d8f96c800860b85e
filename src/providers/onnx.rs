//! ONNX Runtime session plumbing shared by the model backends.

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::TensorRef;

use crate::error::{NutrilensError, Result};
use crate::model::Device;

/// Build an ONNX session with the appropriate execution provider.
pub(crate) fn build_session(model_path: &Path, device: &Device) -> Result<Session> {
    let builder = Session::builder()
        .map_err(|e| {
            NutrilensError::Configuration(format!("Failed to create session builder: {e}"))
        })?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .map_err(|e| {
            NutrilensError::Configuration(format!("Failed to set optimization level: {e}"))
        })?;

    let builder = match device {
        Device::Cpu => builder,
        #[cfg(feature = "cuda")]
        Device::Cuda { device_id } => {
            use ort::execution_providers::CUDAExecutionProvider;
            builder
                .with_execution_providers([CUDAExecutionProvider::default()
                    .with_device_id(*device_id as i32)
                    .build()])
                .map_err(|e| {
                    NutrilensError::Configuration(format!("Failed to configure CUDA: {e}"))
                })?
        }
    };

    builder.commit_from_file(model_path).map_err(|e| {
        NutrilensError::Configuration(format!("Failed to load ONNX model {model_path:?}: {e}"))
    })
}

/// Run a single `[1, row.len()]` float row through a session and return the
/// flattened float output named `output`.
pub(crate) fn run_row(
    session: &Mutex<Session>,
    input: &str,
    output: &str,
    row: &[f32],
) -> Result<Vec<f32>> {
    let shape = [1_usize, row.len()];
    let tensor = TensorRef::from_array_view((shape, row))
        .map_err(|e| NutrilensError::Inference(format!("Failed to create input tensor: {e}")))?;

    // A session run needs exclusive access.
    let mut session = session
        .lock()
        .map_err(|e| NutrilensError::Inference(format!("Session lock poisoned: {e}")))?;
    let outputs = session
        .run(ort::inputs![input => tensor])
        .map_err(|e| NutrilensError::Inference(format!("ONNX inference failed: {e}")))?;

    let value = outputs
        .get(output)
        .ok_or_else(|| NutrilensError::Inference(format!("No {output:?} output found")))?;
    let (_shape, data) = value
        .try_extract_tensor::<f32>()
        .map_err(|e| NutrilensError::Inference(format!("Failed to extract {output:?}: {e}")))?;

    Ok(data.to_vec())
}
