//! Execution device for ONNX sessions.

use std::fmt;
use std::str::FromStr;

use crate::error::NutrilensError;

/// Compute device the models run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Device {
    #[default]
    Cpu,

    /// CUDA GPU execution.
    #[cfg(feature = "cuda")]
    Cuda {
        /// GPU device ID (0-indexed).
        device_id: u32,
    },
}

impl Device {
    /// Create CUDA device with the given device ID.
    #[cfg(feature = "cuda")]
    pub fn cuda(device_id: u32) -> Self {
        Self::Cuda { device_id }
    }

    /// Device name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            #[cfg(feature = "cuda")]
            Self::Cuda { .. } => "CUDA",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => f.write_str("cpu"),
            #[cfg(feature = "cuda")]
            Self::Cuda { device_id } => write!(f, "cuda:{device_id}"),
        }
    }
}

/// Parses `cpu`, `cuda` or `cuda:<id>`.
impl FromStr for Device {
    type Err = NutrilensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if s == "cpu" {
            return Ok(Self::Cpu);
        }
        let Some(rest) = s.strip_prefix("cuda") else {
            return Err(NutrilensError::Configuration(format!(
                "unknown device {s:?}, expected \"cpu\" or \"cuda[:<id>]\""
            )));
        };
        let device_id = match rest.strip_prefix(':') {
            Some(id) => id.parse::<u32>().map_err(|e| {
                NutrilensError::Configuration(format!("invalid CUDA device id {id:?}: {e}"))
            })?,
            None if rest.is_empty() => 0,
            None => {
                return Err(NutrilensError::Configuration(format!(
                    "unknown device {s:?}"
                )));
            }
        };
        cuda_device(device_id)
    }
}

#[cfg(feature = "cuda")]
fn cuda_device(device_id: u32) -> Result<Device, NutrilensError> {
    Ok(Device::Cuda { device_id })
}

#[cfg(not(feature = "cuda"))]
fn cuda_device(_device_id: u32) -> Result<Device, NutrilensError> {
    Err(NutrilensError::Configuration(
        "CUDA requested but nutrilens was built without the `cuda` feature".to_string(),
    ))
}
