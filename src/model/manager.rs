//! Model manager for lazy loading and caching.
//!
//! The classifier and regressor are loaded together on first use with
//! double-checked locking, so concurrent first calls load them at most once.
//! Loaded models are shared through an `Arc` and used without further
//! locking.

use std::sync::{Arc, RwLock};

use crate::error::{NutrilensError, Result};
use crate::providers::{ClassifierModel, RegressorModel};
use crate::telemetry;

use super::{Device, LabelEncoder, ModelArtifacts};

/// A classifier with the encoder that names its classes.
pub struct LoadedClassifier {
    pub model: Box<dyn ClassifierModel>,
    pub labels: LabelEncoder,
}

/// A calorie regressor with the encoder it was fit with.
pub struct LoadedRegressor {
    pub model: Box<dyn RegressorModel>,
    pub foods: LabelEncoder,
}

/// The models available to the pipeline. Either stage may be absent.
#[derive(Default)]
pub struct LoadedModels {
    pub classifier: Option<LoadedClassifier>,
    pub regressor: Option<LoadedRegressor>,
}

impl LoadedModels {
    pub fn with_classifier(
        mut self,
        model: impl ClassifierModel + 'static,
        labels: LabelEncoder,
    ) -> Self {
        self.classifier = Some(LoadedClassifier {
            model: Box::new(model),
            labels,
        });
        self
    }

    pub fn with_regressor(
        mut self,
        model: impl RegressorModel + 'static,
        foods: LabelEncoder,
    ) -> Self {
        self.regressor = Some(LoadedRegressor {
            model: Box::new(model),
            foods,
        });
        self
    }
}

impl std::fmt::Debug for LoadedModels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModels")
            .field("classifier", &self.classifier.as_ref().map(|c| c.model.name()))
            .field("regressor", &self.regressor.as_ref().map(|r| r.model.name()))
            .finish()
    }
}

/// Produces the model set on first use.
pub trait ModelLoader: Send + Sync {
    fn load(&self) -> Result<LoadedModels>;
}

/// Loads ONNX artifacts from a models directory.
///
/// Missing artifacts disable their stage. Present but unreadable artifacts
/// are errors. Without the `local-inference` feature present artifacts are
/// reported and skipped.
#[derive(Debug, Clone, Default)]
pub struct ArtifactLoader {
    artifacts: ModelArtifacts,
    device: Device,
}

impl ArtifactLoader {
    pub fn new(artifacts: ModelArtifacts, device: Device) -> Self {
        Self { artifacts, device }
    }

    pub fn artifacts(&self) -> &ModelArtifacts {
        &self.artifacts
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    fn load_classifier(&self) -> Result<Option<LoadedClassifier>> {
        let a = &self.artifacts;
        if !a.has_classifier() {
            tracing::warn!(
                dir = ?a.dir,
                "classifier artifacts not found; images will not be classified"
            );
            record_load("classifier", "absent");
            return Ok(None);
        }
        if !cfg!(feature = "local-inference") {
            tracing::warn!(
                path = ?a.classifier_path(),
                device = %self.device,
                "classifier present but built without local-inference; ignoring it"
            );
            record_load("classifier", "disabled");
            return Ok(None);
        }
        self.open_classifier()
            .inspect(|_| record_load("classifier", "loaded"))
            .inspect_err(|e| {
                tracing::error!(error = %e, "failed to load classifier");
                record_load("classifier", "error");
            })
            .map(Some)
    }

    fn load_regressor(&self) -> Result<Option<LoadedRegressor>> {
        let a = &self.artifacts;
        if !a.has_regressor() {
            tracing::warn!(
                dir = ?a.dir,
                "calorie regressor not found; using nominal calories"
            );
            record_load("regressor", "absent");
            return Ok(None);
        }
        if !cfg!(feature = "local-inference") {
            tracing::warn!(
                path = ?a.regressor_path(),
                device = %self.device,
                "regressor present but built without local-inference; ignoring it"
            );
            record_load("regressor", "disabled");
            return Ok(None);
        }
        self.open_regressor()
            .inspect(|_| record_load("regressor", "loaded"))
            .inspect_err(|e| {
                tracing::error!(error = %e, "failed to load calorie regressor");
                record_load("regressor", "error");
            })
            .map(Some)
    }

    #[cfg(feature = "local-inference")]
    fn open_classifier(&self) -> Result<LoadedClassifier> {
        use crate::providers::OnnxClassifier;

        let a = &self.artifacts;
        let labels = LabelEncoder::from_file(&a.label_encoder_path())?;
        let model = OnnxClassifier::new(
            &a.classifier_path(),
            &self.device,
            &a.tensors.classifier_input,
            &a.tensors.classifier_output,
        )?
        .with_n_features(labels.n_features());
        tracing::info!(
            classes = labels.len(),
            device = self.device.name(),
            "loaded food classifier"
        );
        Ok(LoadedClassifier {
            model: Box::new(model),
            labels,
        })
    }

    #[cfg(feature = "local-inference")]
    fn open_regressor(&self) -> Result<LoadedRegressor> {
        use crate::providers::OnnxRegressor;

        let a = &self.artifacts;
        let foods = LabelEncoder::from_file(&a.food_encoder_path())?;
        let model = OnnxRegressor::new(
            &a.regressor_path(),
            &self.device,
            &a.tensors.regressor_input,
            &a.tensors.regressor_output,
        )?;
        tracing::info!(
            foods = foods.len(),
            device = self.device.name(),
            "loaded calorie regressor"
        );
        Ok(LoadedRegressor {
            model: Box::new(model),
            foods,
        })
    }

    #[cfg(not(feature = "local-inference"))]
    fn open_classifier(&self) -> Result<LoadedClassifier> {
        Err(NutrilensError::Configuration(
            "local inference is not enabled".to_string(),
        ))
    }

    #[cfg(not(feature = "local-inference"))]
    fn open_regressor(&self) -> Result<LoadedRegressor> {
        Err(NutrilensError::Configuration(
            "local inference is not enabled".to_string(),
        ))
    }
}

impl ModelLoader for ArtifactLoader {
    fn load(&self) -> Result<LoadedModels> {
        Ok(LoadedModels {
            classifier: self.load_classifier()?,
            regressor: self.load_regressor()?,
        })
    }
}

/// A loader with nothing to load.
struct NoModels;

impl ModelLoader for NoModels {
    fn load(&self) -> Result<LoadedModels> {
        Ok(LoadedModels::default())
    }
}

fn record_load(model: &'static str, status: &'static str) {
    metrics::counter!(telemetry::MODEL_LOADS_TOTAL,
        "model" => model,
        "status" => status,
    )
    .increment(1);
}

/// Which stages are currently available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModelStatus {
    /// Whether a load has completed.
    pub loaded: bool,
    pub classifier: bool,
    pub regressor: bool,
}

/// Lazily loads and caches the model set.
pub struct ModelManager {
    loader: Box<dyn ModelLoader>,
    models: RwLock<Option<Arc<LoadedModels>>>,
}

impl ModelManager {
    /// Create a manager that loads through `loader` on first use.
    pub fn new(loader: impl ModelLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            models: RwLock::new(None),
        }
    }

    /// Create a manager over ONNX artifacts.
    pub fn with_artifacts(artifacts: ModelArtifacts, device: Device) -> Self {
        Self::new(ArtifactLoader::new(artifacts, device))
    }

    /// Create a manager holding models built in memory.
    ///
    /// After [`unload`](Self::unload) such a manager has no models.
    pub fn preloaded(models: LoadedModels) -> Self {
        Self {
            loader: Box::new(NoModels),
            models: RwLock::new(Some(Arc::new(models))),
        }
    }

    /// Get or lazily load the model set.
    ///
    /// A failed load is returned and not cached; the next call retries.
    pub fn models(&self) -> Result<Arc<LoadedModels>> {
        // Fast path: check if already loaded (read lock)
        {
            let models = self.models.read().map_err(|e| {
                NutrilensError::Configuration(format!("Failed to acquire read lock: {e}"))
            })?;
            if let Some(models) = models.as_ref() {
                return Ok(Arc::clone(models));
            }
        }

        // Slow path: need to load (write lock)
        let mut models = self.models.write().map_err(|e| {
            NutrilensError::Configuration(format!("Failed to acquire write lock: {e}"))
        })?;

        // Double-check after acquiring write lock
        if let Some(models) = models.as_ref() {
            return Ok(Arc::clone(models));
        }

        let loaded = Arc::new(self.loader.load()?);
        *models = Some(Arc::clone(&loaded));
        Ok(loaded)
    }

    /// Load the models now rather than on the first request.
    pub fn preload(&self) -> Result<()> {
        let _ = self.models()?;
        Ok(())
    }

    /// Drop the cached models. Returns true if any were loaded.
    ///
    /// Callers still holding the previous `Arc` keep using it.
    pub fn unload(&self) -> bool {
        self.models
            .write()
            .map(|mut models| models.take().is_some())
            .unwrap_or(false)
    }

    pub fn status(&self) -> ModelStatus {
        self.models
            .read()
            .ok()
            .and_then(|models| {
                models.as_ref().map(|m| ModelStatus {
                    loaded: true,
                    classifier: m.classifier.is_some(),
                    regressor: m.regressor.is_some(),
                })
            })
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for ModelManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelManager")
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_dir_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ModelManager::with_artifacts(ModelArtifacts::in_dir(dir.path()), Device::Cpu);
        assert_eq!(manager.status(), ModelStatus::default());

        let models = manager.models().unwrap();
        assert!(models.classifier.is_none());
        assert!(models.regressor.is_none());
        assert_eq!(
            manager.status(),
            ModelStatus {
                loaded: true,
                classifier: false,
                regressor: false,
            }
        );
    }

    #[test]
    fn unload_then_reload() {
        let manager = ModelManager::preloaded(LoadedModels::default());
        assert!(manager.status().loaded);
        assert!(manager.unload());
        assert!(!manager.unload());
        assert!(!manager.status().loaded);
        manager.preload().unwrap();
        assert!(manager.status().loaded);
    }

    #[cfg(not(feature = "local-inference"))]
    #[test]
    fn present_artifacts_are_skipped_without_local_inference() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts = ModelArtifacts::in_dir(dir.path());
        std::fs::write(artifacts.classifier_path(), b"not a model").unwrap();
        std::fs::write(artifacts.label_encoder_path(), br#"{"classes": ["apple"]}"#).unwrap();

        let loader = ArtifactLoader::new(artifacts, Device::Cpu);
        assert_eq!(loader.device(), &Device::Cpu);
        let models = loader.load().unwrap();
        assert!(models.classifier.is_none());
    }

    #[cfg(feature = "local-inference")]
    #[test]
    fn corrupt_classifier_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts = ModelArtifacts::in_dir(dir.path());
        std::fs::write(artifacts.classifier_path(), b"not a model").unwrap();
        std::fs::write(artifacts.label_encoder_path(), br#"{"classes": ["apple"]}"#).unwrap();

        let manager = ModelManager::with_artifacts(artifacts, Device::Cpu);
        assert!(manager.models().is_err());
        // Not cached: the status still reports nothing loaded.
        assert!(!manager.status().loaded);
    }
}
