//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::path::Path;

use log::info;
use serde_json::Value;

use crate::edit::{BandEditor, EditParams, ImageEmbeds};
use crate::error::Result;
use crate::gate::{AudioLike, LoudnessGate, LoudnessReport};
use crate::pipeline::SuppressPipeline;

/// Load an audio payload from a JSON file.
pub fn load_audio(path: &Path) -> Result<AudioLike> {
    let text = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text)?;
    AudioLike::from_json(&value)
}

fn load_editor(params: Option<&Path>) -> Result<BandEditor> {
    match params {
        Some(path) => {
            info!("Loading edit parameters: {}", path.display());
            BandEditor::new(EditParams::from_json_file(path)?)
        }
        None => Ok(BandEditor::preset()),
    }
}

/// Classify an audio payload.
pub fn classify(audio: &Path, threshold: f64, invert: bool) -> Result<LoudnessReport> {
    info!("Classifying audio: {}", audio.display());

    let gate = LoudnessGate::new(threshold, invert)?;
    let report = gate.analyze(&load_audio(audio)?)?;

    println!("enabled={} rms={:.6}", report.enabled, report.rms);

    Ok(report)
}

/// Edit an image embeds file.
pub fn edit(embeds: &Path, output: &Path, enabled: bool, params: Option<&Path>) -> Result<()> {
    info!("Editing embeds: {}", embeds.display());

    let editor = load_editor(params)?;
    let input = ImageEmbeds::load(embeds)?;
    let edited = editor.apply(&input, enabled)?;
    edited.save(output)?;

    println!("Embeds written: {}", output.display());

    Ok(())
}

/// Classify audio and edit embeds accordingly.
pub fn run(
    audio: &Path,
    embeds: &Path,
    output: &Path,
    threshold: f64,
    invert: bool,
    params: Option<&Path>,
) -> Result<LoudnessReport> {
    info!(
        "Running suppression: audio={} embeds={}",
        audio.display(),
        embeds.display()
    );

    let pipeline = SuppressPipeline::new(LoudnessGate::new(threshold, invert)?, load_editor(params)?);
    let result = pipeline.run(&load_audio(audio)?, &ImageEmbeds::load(embeds)?)?;
    result.embeds.save(output)?;

    println!(
        "enabled={} rms={:.6}; embeds written: {}",
        result.report.enabled,
        result.report.rms,
        output.display()
    );

    Ok(result.report)
}

/// Print the preset edit parameters.
pub fn print_preset() -> Result<()> {
    let json = serde_json::to_string_pretty(&EditParams::preset())?;
    println!("{}", json);
    Ok(())
}
