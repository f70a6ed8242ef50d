//! Tests for dataset splitting and persistence

use super::idx::{encode_idx_images, encode_idx_labels};
use super::*;
use crate::error::Error;
use ndarray::Array2;

/// `per_class` samples for each of `n_classes`, interleaved 0,1,..,9,0,1,..
/// with pixel value equal to the source index.
fn interleaved(n_classes: usize, per_class: usize) -> Dataset {
    let n = n_classes * per_class;
    let images = Array2::from_shape_fn((n, 2), |(r, _)| r as f32);
    let labels = (0..n).map(|i| (i % n_classes) as i64).collect();
    Dataset::new(images, labels).unwrap()
}

#[test]
fn test_split_thirty_samples_one_labeled_per_class() {
    let source = interleaved(10, 3);
    let config = SplitConfig { labeled_per_class: 1, validation_per_class: 0 };

    let splits = split_dataset(&source, config, 10).unwrap();

    assert_eq!(splits.labeled.len(), 10);
    assert_eq!(splits.validation.len(), 0);
    assert_eq!(splits.unlabeled.len(), 20);
    assert_eq!(splits.unlabeled.count_of(UNLABELED), 20);
    for class in 0..10 {
        assert_eq!(splits.labeled.count_of(class), 1);
    }
}

#[test]
fn test_split_slices_in_class_order() {
    let source = interleaved(3, 4);
    let config = SplitConfig { labeled_per_class: 1, validation_per_class: 2 };

    let splits = split_dataset(&source, config, 3).unwrap();

    // labeled: first sample of each class, classes ascending
    assert_eq!(splits.labeled.labels(), &[0, 1, 2]);
    assert_eq!(splits.labeled.images().column(0).to_vec(), vec![0.0, 1.0, 2.0]);

    // validation: next two samples per class
    assert_eq!(splits.validation.labels(), &[0, 0, 1, 1, 2, 2]);
    assert_eq!(
        splits.validation.images().column(0).to_vec(),
        vec![3.0, 6.0, 4.0, 7.0, 5.0, 8.0]
    );

    // unlabeled: remainder in source order
    assert_eq!(splits.unlabeled.images().column(0).to_vec(), vec![9.0, 10.0, 11.0]);
}

#[test]
fn test_split_is_deterministic() {
    let source = interleaved(10, 5);
    let config = SplitConfig { labeled_per_class: 2, validation_per_class: 1 };
    let a = split_dataset(&source, config, 10).unwrap();
    let b = split_dataset(&source, config, 10).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_split_small_class_contributes_what_it_has() {
    let source = interleaved(2, 2);
    let splits = split_dataset(&source, SplitConfig::default(), 2).unwrap();
    assert_eq!(splits.labeled.len(), 4);
    assert!(splits.validation.is_empty());
    assert!(splits.unlabeled.is_empty());
}

#[test]
fn test_split_rejects_unlabeled_source() {
    let source = Dataset::new(Array2::zeros((2, 1)), vec![0, UNLABELED]).unwrap();
    let err = split_dataset(&source, SplitConfig::default(), 10).unwrap_err();
    assert!(matches!(err, Error::UnlabeledSample { index: 1 }));
}

#[test]
fn test_split_rejects_out_of_range_label() {
    let source = Dataset::new(Array2::zeros((1, 1)), vec![10]).unwrap();
    let err = split_dataset(&source, SplitConfig::default(), 10).unwrap_err();
    assert!(matches!(err, Error::LabelOutOfRange { label: 10, n_classes: 10 }));
}

#[test]
fn test_default_split_sizes() {
    let config = SplitConfig::default();
    assert_eq!(config.labeled_per_class, 300);
    assert_eq!(config.validation_per_class, 1000);
}

#[test]
fn test_save_and_load_splits() {
    let dir = tempfile::tempdir().unwrap();
    let source = interleaved(3, 3);
    let splits =
        split_dataset(&source, SplitConfig { labeled_per_class: 1, validation_per_class: 1 }, 3)
            .unwrap();

    let [labeled, validation, unlabeled] = save_splits(&splits, dir.path()).unwrap();
    assert!(labeled.ends_with(LABELED_FILE));
    assert!(validation.ends_with(VALIDATION_FILE));
    assert!(unlabeled.ends_with(UNLABELED_FILE));

    assert_eq!(load_dataset(&labeled).unwrap(), splits.labeled);
    assert_eq!(load_dataset(&validation).unwrap(), splits.validation);
    assert_eq!(load_dataset(&unlabeled).unwrap(), splits.unlabeled);
}

#[test]
fn test_load_missing_dataset_reports_path() {
    let err = load_dataset("/nonexistent/validation.json").unwrap_err();
    assert!(err.to_string().contains("validation.json"));
}

#[test]
fn test_read_idx_dataset_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join("images.idx3-ubyte");
    let labels = dir.path().join("labels.idx1-ubyte");
    std::fs::write(&images, encode_idx_images(&[vec![0; 4], vec![255; 4]], 2, 2)).unwrap();
    std::fs::write(&labels, encode_idx_labels(&[7, 3])).unwrap();

    let ds = read_idx_dataset(&images, &labels).unwrap();
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.input_dim(), 4);
    assert_eq!(ds.labels(), &[7, 3]);
}
