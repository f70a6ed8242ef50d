//! Per-sample binary cross-entropy for `[0, 1]` pixel intensities
//!
//! # Formula
//!
//! ```text
//! L = -mean_i( t_i * ln(x_i) + (1 - t_i) * ln(1 - x_i) )
//! ```
//!
//! Each log term is clamped at -100 so saturated reconstructions give a large
//! finite loss instead of infinity.

use crate::error::{Error, Result};
use ndarray::{ArrayView1, ArrayView2};

const LOG_FLOOR: f32 = -100.0;

/// Mean binary cross-entropy between one reconstruction and its target.
///
/// Fails with [`Error::ShapeMismatch`] when the lengths differ.
pub fn binary_cross_entropy(
    reconstruction: ArrayView1<'_, f32>,
    target: ArrayView1<'_, f32>,
) -> Result<f32> {
    let n = reconstruction.len();
    if n != target.len() {
        return Err(Error::ShapeMismatch { expected: vec![target.len()], actual: vec![n] });
    }
    if n == 0 {
        return Ok(0.0);
    }
    let total: f32 = reconstruction
        .iter()
        .zip(target.iter())
        .map(|(&x, &t)| {
            let log_x = x.ln().max(LOG_FLOOR);
            let log_1mx = (1.0 - x).ln().max(LOG_FLOOR);
            -(t * log_x + (1.0 - t) * log_1mx)
        })
        .sum();
    Ok(total / n as f32)
}

/// Row-wise [`binary_cross_entropy`] for a batch.
pub fn per_sample_bce(
    reconstructions: ArrayView2<'_, f32>,
    targets: ArrayView2<'_, f32>,
) -> Result<Vec<f64>> {
    if reconstructions.shape() != targets.shape() {
        return Err(Error::ShapeMismatch {
            expected: targets.shape().to_vec(),
            actual: reconstructions.shape().to_vec(),
        });
    }
    reconstructions
        .rows()
        .into_iter()
        .zip(targets.rows())
        .map(|(x, t)| binary_cross_entropy(x, t).map(f64::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_perfect_reconstruction_of_binary_image_is_near_zero() {
        let x = array![1.0f32, 0.0, 1.0];
        assert!(binary_cross_entropy(x.view(), x.view()).unwrap() < 1e-6);
    }

    #[test]
    fn test_known_value() {
        let x = array![0.5f32, 0.5];
        let t = array![1.0f32, 0.0];
        assert_relative_eq!(binary_cross_entropy(x.view(), t.view()).unwrap(), std::f32::consts::LN_2, epsilon = 1e-6);
    }

    #[test]
    fn test_saturated_prediction_is_finite() {
        let x = array![0.0f32];
        let t = array![1.0f32];
        assert_relative_eq!(binary_cross_entropy(x.view(), t.view()).unwrap(), 100.0);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let x = array![0.5f32, 0.5, 0.5];
        let t = array![1.0f32];
        let err = binary_cross_entropy(x.view(), t.view()).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { ref expected, ref actual } if expected == &[1] && actual == &[3]));
    }

    #[test]
    fn test_per_sample_shape_mismatch() {
        let x = array![[0.5f32, 0.5]];
        let t = array![[0.5f32, 0.5, 0.5]];
        assert!(matches!(per_sample_bce(x.view(), t.view()), Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn test_per_sample_one_loss_per_row() {
        let x = array![[0.5f32, 0.5], [1.0, 0.0]];
        let t = array![[1.0f32, 0.0], [1.0, 0.0]];
        let losses = per_sample_bce(x.view(), t.view()).unwrap();
        assert_eq!(losses.len(), 2);
        assert!(losses[0] > losses[1]);
    }
}
