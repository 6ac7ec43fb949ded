//! Band editor
//!
//! Rewrites a `[T, 5, C]` HuMo audio embedding with a fixed chain:
//! EMA smoothing → per-band gain → optional RMS preservation → blend with the
//! original → global gain → optional symmetric clamp.
//!
//! The editor is stateless between calls and never writes into its input.

use std::sync::Arc;

use log::{debug, trace};
use ndarray::{Array3, ArrayD, ArrayView3, ArrayViewD, Axis, Ix3, Zip};
use num_traits::Float;

use super::embeds::{EmbedTensor, EmbedValue, ImageEmbeds, AUDIO_EMBED_KEY};
use super::params::{EditParams, NUM_BANDS};
use super::smoothing::ema_smooth;
use super::stats::{cast, channel_rms, mean_std, STAT_EPSILON};
use crate::error::{Result, SuppressError};

/// Preset band-gain editor for lip-sync suppression
///
/// # Example
/// ```
/// use humo_suppress::edit::BandEditor;
/// use ndarray::Array3;
///
/// let editor = BandEditor::preset();
/// let x = Array3::<f32>::ones((3, 5, 4));
/// let y = editor.edit(x.view(), true).unwrap();
/// assert_eq!(y.shape(), x.shape());
/// assert!((y[[2, 0, 0]] - 4.0).abs() < 1e-5);
/// ```
#[derive(Debug, Clone)]
pub struct BandEditor {
    params: EditParams,
}

impl BandEditor {
    /// Create an editor, validating the parameters once
    pub fn new(params: EditParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Editor with the lip-sync suppression preset
    pub fn preset() -> Self {
        Self {
            params: EditParams::preset(),
        }
    }

    pub fn params(&self) -> &EditParams {
        &self.params
    }

    /// Edit a `[T, 5, C]` tensor
    ///
    /// When `enabled` is false the input is returned unchanged. Any band count
    /// other than 5 is a [`SuppressError::Shape`].
    pub fn edit<F: Float>(&self, x: ArrayView3<'_, F>, enabled: bool) -> Result<Array3<F>> {
        if !enabled {
            return Ok(x.to_owned());
        }
        if x.len_of(Axis(1)) != NUM_BANDS {
            return Err(SuppressError::embedding_shape(x.shape()));
        }
        if self.params.alpha_mix == 0.0 {
            debug!("alpha_mix is 0, edit reduces to identity");
            return Ok(x.to_owned());
        }

        let p = &self.params;
        let beta: F = cast(p.ema_beta);

        let smoothed = ema_smooth(x, beta);
        if x.len_of(Axis(0)) <= 1 || p.ema_beta == 0.0 {
            debug!("temporal smoothing skipped ({} steps)", x.len_of(Axis(0)));
        }

        let mut edited = smoothed;
        for (band, mut slab) in edited.axis_iter_mut(Axis(1)).enumerate() {
            let gain: F = cast(p.band_gains[band]);
            slab.mapv_inplace(|v| v * gain);
        }

        if p.preserve_rms {
            let eps: F = cast(STAT_EPSILON);
            let rms_orig = channel_rms(x, eps);
            let rms_edit = channel_rms(edited.view(), eps);
            Zip::from(edited.lanes_mut(Axis(2)))
                .and(&rms_orig)
                .and(&rms_edit)
                .for_each(|mut lane, &orig, &edit| {
                    let ratio = orig / edit;
                    lane.mapv_inplace(|v| v * ratio);
                });
        }

        let alpha: F = cast(p.alpha_mix);
        let keep = F::one() - alpha;
        Zip::from(&mut edited)
            .and(&x)
            .for_each(|e, &o| *e = keep * o + alpha * *e);

        if p.global_gain != 1.0 {
            let gain: F = cast(p.global_gain);
            edited.mapv_inplace(|v| v * gain);
        }

        if p.clamp_std > 0.0 {
            let (mean, std) = mean_std(edited.view());
            let std = std.max(cast(STAT_EPSILON));
            let k: F = cast(p.clamp_std);
            let (lo, hi) = (mean - k * std, mean + k * std);
            trace!("clamping to [{:?}, {:?}]", lo.to_f64(), hi.to_f64());
            edited.mapv_inplace(|v| clamp_value(v, lo, hi));
        }

        Ok(edited)
    }

    /// Edit a tensor of dynamic rank; anything other than rank 3 is a shape error
    pub fn edit_dyn<F: Float>(&self, x: ArrayViewD<'_, F>, enabled: bool) -> Result<ArrayD<F>> {
        if !enabled {
            return Ok(x.to_owned());
        }
        let shape = x.shape().to_vec();
        let x3 = x
            .into_dimensionality::<Ix3>()
            .map_err(|_| SuppressError::embedding_shape(&shape))?;
        Ok(self.edit(x3, true)?.into_dyn())
    }

    /// Edit a tensor of either precision, keeping its precision
    pub fn edit_tensor(&self, tensor: &EmbedTensor, enabled: bool) -> Result<EmbedTensor> {
        Ok(match tensor {
            EmbedTensor::F32(a) => EmbedTensor::F32(self.edit_dyn(a.view(), enabled)?),
            EmbedTensor::F64(a) => EmbedTensor::F64(self.edit_dyn(a.view(), enabled)?),
        })
    }

    /// Rewrite the audio embedding inside image embeds
    ///
    /// The returned mapping shares every untouched entry with the input.
    pub fn apply(&self, embeds: &ImageEmbeds, enabled: bool) -> Result<ImageEmbeds> {
        if !enabled {
            debug!("suppression disabled, passing embeds through");
            return Ok(embeds.clone());
        }

        let mut out = embeds.clone();
        let tensor = match embeds.get(AUDIO_EMBED_KEY) {
            Some(EmbedValue::Tensor(tensor)) => tensor,
            Some(EmbedValue::Other(_)) => {
                return Err(SuppressError::Shape {
                    expected: format!("[T, {}, C] tensor", NUM_BANDS),
                    actual: Vec::new(),
                })
            }
            None => {
                return Err(SuppressError::MissingKey {
                    key: AUDIO_EMBED_KEY.to_string(),
                })
            }
        };

        debug!("editing {} with shape {:?}", AUDIO_EMBED_KEY, tensor.shape());
        let edited = self.edit_tensor(tensor, true)?;
        out.insert(AUDIO_EMBED_KEY, EmbedValue::Tensor(Arc::new(edited)));
        Ok(out)
    }
}

impl Default for BandEditor {
    fn default() -> Self {
        Self::preset()
    }
}

#[inline]
fn clamp_value<F: Float>(v: F, lo: F, hi: F) -> F {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}
