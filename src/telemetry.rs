//! Telemetry metric name constants.
//!
//! Consumers install their own `metrics` recorder (e.g. prometheus, statsd);
//! without a recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `nutrilens_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `status`: outcome of the operation (values listed per metric)
//! - `model`: artifact involved: "classifier" or "regressor"
//! - `reason`: why a calorie estimate fell back to the static table

/// Total `predict` calls.
///
/// Labels: `status` ("ok" | "unclassified" | "invalid_image" | "error").
pub const PREDICTIONS_TOTAL: &str = "nutrilens_predictions_total";

/// Duration of a full `predict` call in seconds.
pub const PREDICTION_DURATION_SECONDS: &str = "nutrilens_prediction_duration_seconds";

/// Model artifact load attempts.
///
/// Labels: `model`, `status` ("loaded" | "absent" | "disabled" | "error").
pub const MODEL_LOADS_TOTAL: &str = "nutrilens_model_loads_total";

/// Calorie estimates served from the static table instead of the regressor.
///
/// Labels: `reason` ("no_regressor" | "unseen_category" | "inference_failed").
pub const CALORIE_FALLBACKS_TOTAL: &str = "nutrilens_calorie_fallbacks_total";
