//! Edit parameters
//!
//! An immutable configuration record for the band editor. The preset matches
//! the lip-sync suppression reference settings; every field can be overridden
//! from a JSON file without touching the processing chain.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SuppressError};

/// Number of bands in a HuMo audio embedding
pub const NUM_BANDS: usize = 5;

/// Channel width of a HuMo audio embedding
pub const EMBED_CHANNELS: usize = 1280;

/// Preset per-band gains (band 0 = shallow edges/onsets, band 4 = top semantic)
pub const PRESET_GAINS: [f64; NUM_BANDS] = [4.00, 4.00, 0.50, 0.01, 0.01];

/// Preset EMA decay factor
pub const PRESET_EMA_BETA: f64 = 0.90;

/// Preset blend factor (1.0 = full edit)
pub const PRESET_ALPHA_MIX: f64 = 1.00;

/// Preset global gain
pub const PRESET_GLOBAL_GAIN: f64 = 1.00;

/// Preset clamp width in standard deviations (0 = disabled)
pub const PRESET_CLAMP_STD: f64 = 0.00;

/// Band editor configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditParams {
    /// Per-band gains, broadcast over time and channel
    pub band_gains: [f64; NUM_BANDS],
    /// EMA decay factor (0 to <1, 0 = no smoothing)
    pub ema_beta: f64,
    /// Rescale each (time, band) row back to its original RMS
    pub preserve_rms: bool,
    /// Blend between original (0) and edited (1)
    pub alpha_mix: f64,
    /// Scalar gain applied after blending
    pub global_gain: f64,
    /// Symmetric clamp width in standard deviations (0 = disabled)
    pub clamp_std: f64,
}

impl Default for EditParams {
    fn default() -> Self {
        Self::preset()
    }
}

impl EditParams {
    /// The lip-sync suppression preset
    pub fn preset() -> Self {
        Self {
            band_gains: PRESET_GAINS,
            ema_beta: PRESET_EMA_BETA,
            preserve_rms: false,
            alpha_mix: PRESET_ALPHA_MIX,
            global_gain: PRESET_GLOBAL_GAIN,
            clamp_std: PRESET_CLAMP_STD,
        }
    }

    pub fn with_band_gains(mut self, band_gains: [f64; NUM_BANDS]) -> Self {
        self.band_gains = band_gains;
        self
    }

    pub fn with_ema_beta(mut self, ema_beta: f64) -> Self {
        self.ema_beta = ema_beta;
        self
    }

    pub fn with_preserve_rms(mut self, preserve_rms: bool) -> Self {
        self.preserve_rms = preserve_rms;
        self
    }

    pub fn with_alpha_mix(mut self, alpha_mix: f64) -> Self {
        self.alpha_mix = alpha_mix;
        self
    }

    pub fn with_global_gain(mut self, global_gain: f64) -> Self {
        self.global_gain = global_gain;
        self
    }

    pub fn with_clamp_std(mut self, clamp_std: f64) -> Self {
        self.clamp_std = clamp_std;
        self
    }

    /// Load parameters from a JSON file; absent fields fall back to the preset
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let params: EditParams = serde_json::from_str(&text)?;
        params.validate()?;
        Ok(params)
    }

    /// Validate parameters are within their domains
    pub fn validate(&self) -> Result<()> {
        for (band, gain) in self.band_gains.iter().enumerate() {
            if !gain.is_finite() {
                return Err(invalid(
                    &format!("band_gains[{}]", band),
                    *gain,
                    "a finite number",
                ));
            }
        }
        if !(0.0..1.0).contains(&self.ema_beta) {
            return Err(invalid("ema_beta", self.ema_beta, "0 <= beta < 1"));
        }
        if !(0.0..=1.0).contains(&self.alpha_mix) {
            return Err(invalid("alpha_mix", self.alpha_mix, "0 to 1"));
        }
        if !self.global_gain.is_finite() {
            return Err(invalid("global_gain", self.global_gain, "a finite number"));
        }
        if !(self.clamp_std >= 0.0 && self.clamp_std.is_finite()) {
            return Err(invalid("clamp_std", self.clamp_std, "a finite number >= 0"));
        }
        Ok(())
    }
}

fn invalid(param: &str, value: f64, expected: &str) -> SuppressError {
    SuppressError::InvalidParameter {
        param: param.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    }
}
