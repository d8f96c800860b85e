//! Model backends.
//!
//! Trained models are reached through the [`ClassifierModel`] and
//! [`RegressorModel`] traits. The ONNX Runtime backend is compiled with the
//! `local-inference` feature.

pub mod traits;

#[cfg(feature = "local-inference")]
mod onnx;
#[cfg(feature = "local-inference")]
pub mod onnx_classifier;
#[cfg(feature = "local-inference")]
pub mod onnx_regressor;

pub use traits::{ClassifierModel, RegressorModel};

#[cfg(feature = "local-inference")]
pub use onnx_classifier::OnnxClassifier;
#[cfg(feature = "local-inference")]
pub use onnx_regressor::OnnxRegressor;
