//! humo-suppress - Lip-sync suppression for HuMo audio embeddings
//!
//! Two stateless components:
//! 1. Band Editor - rewrites the `[T, 5, C]` audio embedding with EMA
//!    smoothing, per-band gains, optional RMS preservation, blending,
//!    global gain and optional clamping
//! 2. Loudness Gate - decides from raw audio, via an RMS threshold, whether
//!    the editor should be enabled
//!
//! # Architecture
//!
//! The gate's boolean feeds the editor's `enabled` input; when disabled the
//! editor passes embeddings through untouched. [`SuppressPipeline`] wires the
//! two together.

pub mod cli;
pub mod edit;
pub mod error;
pub mod gate;
pub mod nested;
pub mod pipeline;

pub use edit::{BandEditor, EditParams, ImageEmbeds};
pub use error::{Result, SuppressError};
pub use gate::{AudioLike, LoudnessGate};
pub use pipeline::SuppressPipeline;
