//! Loudness gate (RMS threshold switch)
//!
//! Decides from raw audio whether lip-sync suppression should be enabled.
//! By default suppression is enabled when the audio is silent, i.e. its RMS
//! is below the threshold; `invert` flips the decision.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use super::audio::AudioLike;
use crate::error::{Result, SuppressError};

/// Default RMS threshold below which audio counts as silent
pub const DEFAULT_THRESHOLD: f64 = 0.01;

/// RMS amplitude of a sample sequence
///
/// Empty input and non-finite results are reported as 0.0.
pub fn rms(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    // Accumulate in f64 so squares of large f32-range samples stay finite.
    let sum_squares: f64 = samples.iter().map(|s| s * s).sum();
    let rms = (sum_squares / samples.len() as f64).sqrt();
    if rms.is_finite() {
        rms
    } else {
        warn!("non-finite RMS over {} samples, treating as silence", samples.len());
        0.0
    }
}

/// Classify audio against a threshold
///
/// Returns `true` when suppression should be enabled.
pub fn classify(audio: &AudioLike, threshold: f64, invert: bool) -> Result<bool> {
    Ok(analyze(audio, threshold, invert)?.enabled)
}

fn analyze(audio: &AudioLike, threshold: f64, invert: bool) -> Result<LoudnessReport> {
    let samples = audio.to_samples()?;
    let rms = rms(&samples);
    let is_silent = rms < threshold;
    let enabled = is_silent != invert;
    trace!(
        "rms={:.6} over {} samples, threshold={}, invert={}",
        rms,
        samples.len(),
        threshold,
        invert
    );
    Ok(LoudnessReport {
        rms,
        is_silent,
        enabled,
    })
}

/// Outcome of a single gate decision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoudnessReport {
    /// RMS amplitude of the audio (0.0 for empty or degenerate input)
    pub rms: f64,
    /// RMS was below the threshold
    pub is_silent: bool,
    /// Suppression should be enabled
    pub enabled: bool,
}

/// RMS threshold switch with a validated threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoudnessGate {
    threshold: f64,
    invert: bool,
}

impl Default for LoudnessGate {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            invert: false,
        }
    }
}

impl LoudnessGate {
    /// Create a gate; the threshold must lie in 0.0..=1.0
    pub fn new(threshold: f64, invert: bool) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(SuppressError::InvalidParameter {
                param: "threshold".to_string(),
                value: threshold.to_string(),
                expected: "0.0 to 1.0".to_string(),
            });
        }
        Ok(Self { threshold, invert })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn invert(&self) -> bool {
        self.invert
    }

    /// Decide whether suppression should be enabled for `audio`
    pub fn classify(&self, audio: &AudioLike) -> Result<bool> {
        Ok(self.analyze(audio)?.enabled)
    }

    /// Decide and report the measured RMS
    pub fn analyze(&self, audio: &AudioLike) -> Result<LoudnessReport> {
        let report = analyze(audio, self.threshold, self.invert)?;
        debug!(
            "loudness gate: rms={:.6} silent={} -> enabled={}",
            report.rms, report.is_silent, report.enabled
        );
        Ok(report)
    }
}
