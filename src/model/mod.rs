//! Model artifacts, label encoders and the lazy model manager.

pub mod artifacts;
pub mod device;
pub mod encoder;
pub mod manager;

pub use artifacts::{ModelArtifacts, TensorNames};
pub use device::Device;
pub use encoder::LabelEncoder;
pub use manager::{
    ArtifactLoader, LoadedClassifier, LoadedModels, LoadedRegressor, ModelLoader, ModelManager,
    ModelStatus,
};
