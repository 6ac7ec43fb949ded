//! Gated suppression pipeline
//!
//! Wires the loudness gate's decision into the band editor's `enabled`
//! input. Both stages are stateless, so one pipeline can serve concurrent
//! callers.

use log::info;

use crate::edit::{BandEditor, ImageEmbeds};
use crate::error::Result;
use crate::gate::{AudioLike, LoudnessGate, LoudnessReport};

/// Loudness gate followed by the band editor
#[derive(Debug, Clone, Default)]
pub struct SuppressPipeline {
    gate: LoudnessGate,
    editor: BandEditor,
}

/// Result of one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub report: LoudnessReport,
    pub embeds: ImageEmbeds,
}

impl SuppressPipeline {
    pub fn new(gate: LoudnessGate, editor: BandEditor) -> Self {
        Self { gate, editor }
    }

    pub fn gate(&self) -> &LoudnessGate {
        &self.gate
    }

    pub fn editor(&self) -> &BandEditor {
        &self.editor
    }

    /// Classify `audio` and edit `embeds` when suppression is enabled
    pub fn run(&self, audio: &AudioLike, embeds: &ImageEmbeds) -> Result<PipelineOutput> {
        let report = self.gate.analyze(audio)?;
        info!(
            "suppression {} (rms {:.4}, threshold {})",
            if report.enabled { "enabled" } else { "disabled" },
            report.rms,
            self.gate.threshold()
        );
        let embeds = self.editor.apply(embeds, report.enabled)?;
        Ok(PipelineOutput { report, embeds })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::{EmbedTensor, AUDIO_EMBED_KEY};
    use ndarray::ArrayD;
    use std::sync::Arc;

    fn embeds() -> ImageEmbeds {
        let mut embeds = ImageEmbeds::new();
        embeds.insert_tensor(AUDIO_EMBED_KEY, ArrayD::<f32>::ones(vec![3, 5, 4]));
        embeds
    }

    #[test]
    fn test_silence_edits() {
        let pipeline = SuppressPipeline::default();
        let input = embeds();
        let out = pipeline
            .run(&AudioLike::Flat(vec![0.0; 32]), &input)
            .unwrap();

        assert!(out.report.enabled);
        match out.embeds.audio_embedding().unwrap().as_ref() {
            EmbedTensor::F32(a) => assert!((a[[2, 0, 0]] - 4.0).abs() < 1e-5),
            other => panic!("unexpected precision: {:?}", other),
        }
    }

    #[test]
    fn test_loud_audio_passes_through() {
        let pipeline = SuppressPipeline::default();
        let input = embeds();
        let out = pipeline
            .run(&AudioLike::Flat(vec![1.0, -1.0, 1.0, -1.0]), &input)
            .unwrap();

        assert!(!out.report.enabled);
        assert!(Arc::ptr_eq(
            out.embeds.audio_embedding().unwrap(),
            input.audio_embedding().unwrap()
        ));
    }

    #[test]
    fn test_missing_key_propagates() {
        let pipeline = SuppressPipeline::default();
        let err = pipeline
            .run(&AudioLike::Flat(vec![0.0]), &ImageEmbeds::new())
            .unwrap_err();
        assert_eq!(err.error_code(), "MISSING_KEY");
    }
}
