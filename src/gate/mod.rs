//! Loudness Gate
//!
//! Audio-driven switch for the band editor's `enabled` input.

mod audio;
mod loudness;

pub use audio::AudioLike;
pub use loudness::{classify, rms, LoudnessGate, LoudnessReport, DEFAULT_THRESHOLD};
