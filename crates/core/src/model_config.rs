//! Generation parameter configuration.

use serde::{Deserialize, Serialize};

/// Bounds for the temperature slider.
pub const TEMPERATURE_MIN: f32 = 0.0;
pub const TEMPERATURE_MAX: f32 = 1.0;

/// Bounds for the max-output-token setting.
pub const MAX_OUTPUT_TOKENS_MIN: u32 = 100;
pub const MAX_OUTPUT_TOKENS_MAX: u32 = 8000;

/// Generation parameters for a model request.
///
/// A value object, freely copied, no identity. Out-of-range values are
/// clamped rather than rejected so UI-sourced input can never produce an
/// invalid config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Sampling temperature, [0.0, 1.0]. Low by default for factual answers.
    pub temperature: f32,

    /// Maximum tokens the model may generate, [100, 8000].
    pub max_output_tokens: u32,
}

impl ModelConfig {
    /// Create a config, clamping both fields into bounds.
    pub fn new(temperature: f32, max_output_tokens: u32) -> Self {
        Self {
            temperature: temperature.clamp(TEMPERATURE_MIN, TEMPERATURE_MAX),
            max_output_tokens: max_output_tokens.clamp(MAX_OUTPUT_TOKENS_MIN, MAX_OUTPUT_TOKENS_MAX),
        }
    }

    /// Set the temperature, clamping into [0.0, 1.0].
    pub fn set_temperature(&mut self, temperature: f32) {
        self.temperature = temperature.clamp(TEMPERATURE_MIN, TEMPERATURE_MAX);
    }

    /// Set the output cap, clamping into [100, 8000].
    pub fn set_max_output_tokens(&mut self, max_output_tokens: u32) {
        self.max_output_tokens =
            max_output_tokens.clamp(MAX_OUTPUT_TOKENS_MIN, MAX_OUTPUT_TOKENS_MAX);
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_output_tokens: 2048,
        }
    }
}
