//! CLI command tests against files on disk

use std::path::Path;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::TempDir;

use humo_suppress::cli::commands;

fn write_json(dir: &TempDir, name: &str, value: &Value) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, value.to_string()).unwrap();
    path
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn constant_embeds() -> Value {
    json!({
        "humo_audio_emb": [
            [[1.0, 1.0], [1.0, 1.0], [1.0, 1.0], [1.0, 1.0], [1.0, 1.0]],
            [[1.0, 1.0], [1.0, 1.0], [1.0, 1.0], [1.0, 1.0], [1.0, 1.0]]
        ],
        "target_shape": [16, 21, 60, 104]
    })
}

#[test]
fn test_edit_command_applies_preset() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_json(&dir, "embeds.json", &constant_embeds());
    let output = dir.path().join("out.json");

    commands::edit(&input, &output, true, None).unwrap();

    let result = read_json(&output);
    assert_eq!(result["target_shape"], json!([16, 21, 60, 104]));
    let band0 = result["humo_audio_emb"][1][0][0].as_f64().unwrap();
    let band4 = result["humo_audio_emb"][1][4][1].as_f64().unwrap();
    assert!((band0 - 4.0).abs() < 1e-5);
    assert!((band4 - 0.01).abs() < 1e-6);
}

#[test]
fn test_edit_command_disabled_passthrough() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_json(&dir, "embeds.json", &constant_embeds());
    let output = dir.path().join("out.json");

    commands::edit(&input, &output, false, None).unwrap();

    assert_eq!(read_json(&output), constant_embeds());
}

#[test]
fn test_edit_command_disabled_keeps_exact_values() {
    let dir = tempfile::tempdir().unwrap();
    let embeds = json!({
        "humo_audio_emb": [[[0.1, 0.2], [0.3, 0.7], [1.1, -0.9], [2.2, 0.05], [3.3, 1e-7]]]
    });
    let input = write_json(&dir, "embeds.json", &embeds);
    let output = dir.path().join("out.json");

    commands::edit(&input, &output, false, None).unwrap();

    assert_eq!(read_json(&output), embeds);
}

#[test]
fn test_edit_command_with_params_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_json(&dir, "embeds.json", &constant_embeds());
    let params = write_json(&dir, "params.json", &json!({ "global_gain": 2.0 }));
    let output = dir.path().join("out.json");

    commands::edit(&input, &output, true, Some(params.as_path())).unwrap();

    let band2 = read_json(&output)["humo_audio_emb"][0][2][0].as_f64().unwrap();
    assert!((band2 - 1.0).abs() < 1e-6);
}

#[test]
fn test_edit_command_missing_key() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_json(&dir, "embeds.json", &json!({ "clip_fea": null }));
    let output = dir.path().join("out.json");

    let err = commands::edit(&input, &output, true, None).unwrap_err();
    assert_eq!(err.error_code(), "MISSING_KEY");
    assert!(!output.exists());
}

#[test]
fn test_run_command_loud_audio() {
    let dir = tempfile::tempdir().unwrap();
    let audio = write_json(&dir, "audio.json", &json!([1.0, -1.0, 1.0, -1.0]));
    let input = write_json(&dir, "embeds.json", &constant_embeds());
    let output = dir.path().join("out.json");

    let report = commands::run(&audio, &input, &output, 0.01, false, None).unwrap();

    assert!(!report.enabled);
    assert_eq!(read_json(&output), constant_embeds());
}

#[test]
fn test_run_command_inverted() {
    let dir = tempfile::tempdir().unwrap();
    let audio = write_json(&dir, "audio.json", &json!([44100, [1.0, -1.0]]));
    let input = write_json(&dir, "embeds.json", &constant_embeds());
    let output = dir.path().join("out.json");

    let report = commands::run(&audio, &input, &output, 0.01, true, None).unwrap();

    assert!(report.enabled);
    let band1 = read_json(&output)["humo_audio_emb"][0][1][0].as_f64().unwrap();
    assert!((band1 - 4.0).abs() < 1e-6);
}

#[test]
fn test_run_command_unsupported_audio() {
    let dir = tempfile::tempdir().unwrap();
    let audio = write_json(&dir, "audio.json", &json!("speech.wav"));
    let input = write_json(&dir, "embeds.json", &constant_embeds());
    let output = dir.path().join("out.json");

    let err = commands::run(&audio, &input, &output, 0.01, false, None).unwrap_err();
    assert_eq!(err.error_code(), "UNSUPPORTED_FORMAT");
}
