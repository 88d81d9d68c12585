use crate::LaneError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Tunables of the lane pipeline.
///
/// Every field has a default, so a JSON file only needs the keys it changes:
///
/// ```json
/// { "model_path": "models/lane.onnx", "label_interval_ms": 250 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneConfig {
    input_width: usize,
    input_height: usize,
    threshold: f32,
    deadband: f32,
    label_interval_ms: u64,
    model_path: Option<PathBuf>,
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            input_width: 320,
            input_height: 256,
            threshold: 0.5,
            deadband: 10.0,
            label_interval_ms: 500,
            model_path: None,
        }
    }
}

impl LaneConfig {
    pub fn from_json_str(json: &str) -> Result<Self, LaneError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| LaneError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LaneError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| LaneError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    pub fn to_json(&self) -> Result<String, LaneError> {
        serde_json::to_string_pretty(self).map_err(|e| LaneError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), LaneError> {
        if self.input_width == 0 || self.input_height == 0 {
            return Err(LaneError::Config(format!(
                "model input must be non-empty, got {}x{}",
                self.input_width, self.input_height
            )));
        }
        if !self.threshold.is_finite() {
            return Err(LaneError::Config(format!(
                "threshold must be finite, got {}",
                self.threshold
            )));
        }
        if !self.deadband.is_finite() || self.deadband < 0.0 {
            return Err(LaneError::Config(format!(
                "deadband must be a finite non-negative number, got {}",
                self.deadband
            )));
        }
        Ok(())
    }

    /// Set the model input width in pixels.
    pub fn with_input_width(mut self, width: usize) -> Self {
        self.input_width = width;
        self
    }

    /// Set the model input height in pixels.
    pub fn with_input_height(mut self, height: usize) -> Self {
        self.input_height = height;
        self
    }

    /// Set the probability above which a pixel counts as lane.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the offset magnitude, in model pixels, still treated as centered.
    pub fn with_deadband(mut self, deadband: f32) -> Self {
        self.deadband = deadband;
        self
    }

    /// Set the minimum time between two direction label updates.
    pub fn with_label_interval(mut self, interval: Duration) -> Self {
        self.label_interval_ms = interval.as_millis() as u64;
        self
    }

    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = Some(path.into());
        self
    }

    pub fn input_width(&self) -> usize {
        self.input_width
    }

    pub fn input_height(&self) -> usize {
        self.input_height
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn deadband(&self) -> f32 {
        self.deadband
    }

    pub fn label_interval(&self) -> Duration {
        Duration::from_millis(self.label_interval_ms)
    }

    pub fn model_path(&self) -> Option<&Path> {
        self.model_path.as_deref()
    }
}
