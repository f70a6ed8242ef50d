//! Tests for CLI command handlers

use super::*;
use crate::config::parse_args;
use crate::data::{encode_idx_images, encode_idx_labels, load_dataset, save_dataset, Dataset};
use crate::model::{AffineDecoder, AffineEncoder};
use ndarray::{array, Array1, Array2};
use std::path::Path;

fn run(args: &[&str]) -> Result<(), String> {
    let mut argv = vec!["alinear", "--quiet"];
    argv.extend_from_slice(args);
    run_command(parse_args(argv).map_err(|e| e.to_string())?)
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) {
    std::fs::write(path, serde_json::to_string(value).unwrap()).unwrap();
}

/// Two classes, one style coordinate, 4-pixel images.
fn write_fixture(dir: &Path, with_modes: bool) -> std::path::PathBuf {
    let mut weights = Array2::zeros((4, 3));
    weights[[0, 0]] = 5.0;
    weights[[1, 1]] = 5.0;
    weights[[2, 2]] = 1.0;
    let encoder = AffineEncoder::new(weights, Array1::zeros(3), 2).unwrap();
    let decoder = AffineDecoder::new(Array2::zeros((3, 4)), Array1::zeros(4)).unwrap();
    write_json(&dir.join("enc.json"), &encoder);
    write_json(&dir.join("dec.json"), &decoder);

    let validation = Dataset::new(
        array![
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [1.0, 0.0, 0.5, 0.0],
            [0.0, 1.0, 0.0, 0.0]
        ],
        vec![0, 1, 0, 1],
    )
    .unwrap();
    save_dataset(&validation, dir.join("validation.json")).unwrap();

    let mut yaml = format!(
        "model:\n  n_classes: 2\n  style_dim: 1\n  input_size: 4\n  encoder: {}\n  decoder: {}\n",
        dir.join("enc.json").display(),
        dir.join("dec.json").display()
    );
    if with_modes {
        let modes = AffineDecoder::new(Array2::zeros((2, 4)), Array1::zeros(4)).unwrap();
        write_json(&dir.join("modes.json"), &modes);
        yaml.push_str(&format!("  mode_decoder: {}\n", dir.join("modes.json").display()));
    }
    yaml.push_str(&format!(
        "data:\n  validation: {}\n  batch_size: 3\nevaluation:\n  seed: 5\n  feature_sweep_steps: 3\n  output_dir: {}\n",
        dir.join("validation.json").display(),
        dir.join("out").display()
    ));
    let config = dir.join("eval.yaml");
    std::fs::write(&config, yaml).unwrap();
    config
}

#[test]
fn test_prepare_writes_three_splits() {
    let dir = tempfile::tempdir().unwrap();
    let images: Vec<Vec<u8>> = (0..6u8).map(|i| vec![i, 0, 0, 255]).collect();
    std::fs::write(dir.path().join("images.idx"), encode_idx_images(&images, 2, 2)).unwrap();
    std::fs::write(dir.path().join("labels.idx"), encode_idx_labels(&[0, 1, 0, 1, 0, 1])).unwrap();
    let out = dir.path().join("splits");

    run(&[
        "prepare",
        "--images",
        dir.path().join("images.idx").to_str().unwrap(),
        "--labels",
        dir.path().join("labels.idx").to_str().unwrap(),
        "--output-dir",
        out.to_str().unwrap(),
        "--labeled-per-class",
        "1",
        "--validation-per-class",
        "1",
        "--n-classes",
        "2",
    ])
    .unwrap();

    let labeled = load_dataset(out.join("train_labeled.json")).unwrap();
    let validation = load_dataset(out.join("validation.json")).unwrap();
    let unlabeled = load_dataset(out.join("train_unlabeled.json")).unwrap();
    assert_eq!(labeled.labels(), &[0, 1]);
    assert_eq!(validation.labels(), &[0, 1]);
    assert_eq!(unlabeled.labels(), &[-1, -1]);
    assert_eq!(unlabeled.images()[[0, 0]], 4.0 / 255.0);
}

#[test]
fn test_prepare_missing_idx_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.idx");
    let err = run(&[
        "prepare",
        "--images",
        missing.to_str().unwrap(),
        "--labels",
        missing.to_str().unwrap(),
        "-o",
        dir.path().to_str().unwrap(),
    ])
    .unwrap_err();
    assert!(err.contains("IO error"));
}

#[test]
fn test_sample_command() {
    assert!(run(&["sample", "-b", "3", "-n", "4", "--seed", "1"]).is_ok());
    assert!(run(&["sample", "-b", "0"]).is_err());
    assert!(run(&["sample", "-b", "2", "-n", "1"]).is_err());
}

#[test]
fn test_sample_rows_written_when_quiet() {
    let args = crate::config::SampleArgs { batch_size: 3, n_classes: 4, seed: Some(5) };
    let mut out = Vec::new();
    sample::write_sample(args, LogLevel::Quiet, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    for line in lines {
        assert_eq!(line.split(' ').filter(|&d| d == "1").count(), 1);
        assert_eq!(line.split(' ').count(), 4);
    }
}

#[test]
fn test_sample_format_rows() {
    let rows = array![[0.0, 1.0, 0.0], [1.0, 0.0, 0.0]];
    assert_eq!(sample::format_rows(&rows), "0 1 0\n1 0 0");
}

#[test]
fn test_validate_command() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path(), false);
    assert!(run(&["validate", config.to_str().unwrap(), "--detailed"]).is_ok());

    let err = run(&["validate", "/nonexistent/eval.yaml"]).unwrap_err();
    assert!(err.starts_with("Validation failed"));
}

#[test]
fn test_evaluate_writes_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path(), true);

    run(&["evaluate", config.to_str().unwrap()]).unwrap();

    let out = dir.path().join("out");
    for name in [
        "supervised_accuracy",
        "label_alignment",
        "reconstruction_loss",
        "predicted_labels",
        "y_distribution",
        "z_distribution",
        "class_gallery",
        "reconstruction",
        "latent_features",
        "learned_modes",
    ] {
        assert!(out.join(format!("{name}.json")).exists(), "missing artifact {name}");
    }
}

#[test]
fn test_evaluate_batch_size_override_is_validated() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path(), false);
    let err = run(&["evaluate", config.to_str().unwrap(), "--batch-size", "0"]).unwrap_err();
    assert!(err.starts_with("Validation failed"));
}

#[test]
fn test_evaluate_rejects_mismatched_model() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path(), false);
    let yaml = std::fs::read_to_string(&config).unwrap().replace("style_dim: 1", "style_dim: 2");
    std::fs::write(&config, yaml).unwrap();

    let err = run(&["evaluate", config.to_str().unwrap()]).unwrap_err();
    assert!(err.contains("style_dim"));
}
