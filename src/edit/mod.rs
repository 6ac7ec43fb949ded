//! Band Editor
//!
//! Signal editing of the multi-band HuMo audio embedding that drives
//! lip-sync motion.

mod band_editor;
mod embeds;
mod params;
mod smoothing;
mod stats;

pub use band_editor::BandEditor;
pub use embeds::{EmbedTensor, EmbedValue, ImageEmbeds, AUDIO_EMBED_KEY};
pub use params::{
    EditParams, EMBED_CHANNELS, NUM_BANDS, PRESET_ALPHA_MIX, PRESET_CLAMP_STD, PRESET_EMA_BETA,
    PRESET_GAINS, PRESET_GLOBAL_GAIN,
};
pub use smoothing::ema_smooth;
pub use stats::{channel_rms, mean_std, STAT_EPSILON};
