//! Inference adapter: encoder forward pass to discrete label plus style
//!
//! The adapter switches the encoder into [`ModelMode::Eval`] before running
//! it and leaves it there. Batches are only viewed as `(batch, input_size)`;
//! their storage is never modified.

use crate::data::Batch;
use crate::device::ExecutionContext;
use crate::error::{Error, Result};
use crate::model::{Encoder, EncoderOutput, ModelMode};
use ndarray::{concatenate, Array2, ArrayView2, Axis};

/// Latent code for a batch: categorical component and optional style component.
#[derive(Debug, Clone, PartialEq)]
pub struct LatentCode {
    /// `(batch, n_classes)` probabilities or one-hot rows
    pub categorical: Array2<f32>,
    /// `(batch, style_dim)` continuous component, absent for classification-only encoders
    pub style: Option<Array2<f32>>,
}

impl LatentCode {
    /// Number of samples
    pub fn batch_size(&self) -> usize {
        self.categorical.nrows()
    }

    /// Width of the categorical component
    pub fn n_classes(&self) -> usize {
        self.categorical.ncols()
    }

    /// Width of the style component (0 when absent)
    pub fn style_dim(&self) -> usize {
        self.style.as_ref().map_or(0, Array2::ncols)
    }

    /// Argmax of each categorical row
    pub fn predicted_labels(&self) -> Vec<usize> {
        argmax_rows(self.categorical.view())
    }

    /// Largest categorical entry of each row
    pub fn highest_probability(&self) -> Vec<f32> {
        self.categorical
            .rows()
            .into_iter()
            .map(|row| row.fold(f32::NEG_INFINITY, |m, &v| m.max(v)))
            .collect()
    }

    /// `[categorical | style]`, the decoder input
    pub fn concatenated(&self) -> Result<Array2<f32>> {
        let Some(style) = &self.style else {
            return Ok(self.categorical.clone());
        };
        concatenate(Axis(1), &[self.categorical.view(), style.view()]).map_err(|_| {
            Error::ShapeMismatch {
                expected: vec![self.batch_size(), style.ncols()],
                actual: style.shape().to_vec(),
            }
        })
    }
}

impl From<EncoderOutput> for LatentCode {
    fn from(output: EncoderOutput) -> Self {
        match output {
            EncoderOutput::Categorical(categorical) => Self { categorical, style: None },
            EncoderOutput::Decomposed { categorical, style } => {
                Self { categorical, style: Some(style) }
            }
        }
    }
}

/// Row-wise argmax; ties resolve to the lowest index.
pub fn argmax_rows(matrix: ArrayView2<'_, f32>) -> Vec<usize> {
    matrix
        .rows()
        .into_iter()
        .map(|row| {
            let mut best = 0;
            for (i, &v) in row.iter().enumerate().skip(1) {
                if v > row[best] {
                    best = i;
                }
            }
            best
        })
        .collect()
}

/// Encode a batch in inference mode.
///
/// Fails with [`Error::ShapeMismatch`] if the batch images do not flatten to
/// the encoder's `input_size` or the encoder returns a malformed code.
pub fn infer<E>(encoder: &mut E, batch: &Batch, ctx: &ExecutionContext) -> Result<LatentCode>
where
    E: Encoder + ?Sized,
{
    encoder.place(ctx.device())?;
    encoder.set_mode(ModelMode::Eval);

    let inputs = batch.flat_images(encoder.input_size())?;
    let code = LatentCode::from(encoder.forward(inputs)?);

    if code.batch_size() != batch.size() {
        return Err(Error::ShapeMismatch {
            expected: vec![batch.size(), code.n_classes()],
            actual: code.categorical.shape().to_vec(),
        });
    }
    if code.n_classes() < 2 {
        return Err(Error::InvalidClassCount(code.n_classes()));
    }
    if let Some(style) = &code.style {
        if style.nrows() != batch.size() {
            return Err(Error::ShapeMismatch {
                expected: vec![batch.size(), style.ncols()],
                actual: style.shape().to_vec(),
            });
        }
    }

    tracing::trace!(batch = batch.size(), device = %ctx.device(), "encoded batch");
    Ok(code)
}

/// Predicted class per sample: argmax of the categorical component.
pub fn predict_labels<E>(encoder: &mut E, batch: &Batch, ctx: &ExecutionContext) -> Result<Vec<usize>>
where
    E: Encoder + ?Sized,
{
    Ok(infer(encoder, batch, ctx)?.predicted_labels())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Module;
    use ndarray::array;

    /// Returns a fixed code regardless of input
    struct Canned {
        output: EncoderOutput,
        mode: ModelMode,
        input_size: usize,
    }

    impl Module for Canned {
        fn set_mode(&mut self, mode: ModelMode) {
            self.mode = mode;
        }
        fn mode(&self) -> ModelMode {
            self.mode
        }
    }

    impl Encoder for Canned {
        fn input_size(&self) -> usize {
            self.input_size
        }
        fn forward(&self, _inputs: ArrayView2<'_, f32>) -> Result<EncoderOutput> {
            Ok(self.output.clone())
        }
    }

    fn batch(n: usize, dim: usize) -> Batch {
        Batch::new(Array2::<f32>::zeros((n, dim)).into_dyn(), vec![0; n]).unwrap()
    }

    #[test]
    fn test_argmax_tie_breaks_low() {
        let m = array![[0.5, 0.5, 0.0], [0.1, 0.3, 0.3], [0.0, 0.0, 0.9]];
        assert_eq!(argmax_rows(m.view()), vec![0, 1, 2]);
    }

    #[test]
    fn test_infer_sets_eval_mode() {
        let mut enc = Canned {
            output: EncoderOutput::Categorical(array![[0.2, 0.8]]),
            mode: ModelMode::Train,
            input_size: 3,
        };
        let code = infer(&mut enc, &batch(1, 3), &ExecutionContext::cpu()).unwrap();
        assert_eq!(enc.mode(), ModelMode::Eval);
        assert_eq!(code.predicted_labels(), vec![1]);
        assert!(code.style.is_none());
    }

    #[test]
    fn test_infer_decomposed_concatenates() {
        let mut enc = Canned {
            output: EncoderOutput::Decomposed {
                categorical: array![[1.0, 0.0], [0.0, 1.0]],
                style: array![[0.5], [-0.5]],
            },
            mode: ModelMode::Train,
            input_size: 2,
        };
        let code = infer(&mut enc, &batch(2, 2), &ExecutionContext::cpu()).unwrap();
        assert_eq!(code.style_dim(), 1);
        assert_eq!(code.concatenated().unwrap(), array![[1.0, 0.0, 0.5], [0.0, 1.0, -0.5]]);
        assert_eq!(code.highest_probability(), vec![1.0, 1.0]);
    }

    #[test]
    fn test_infer_rejects_wrong_input_size() {
        let mut enc = Canned {
            output: EncoderOutput::Categorical(array![[0.2, 0.8]]),
            mode: ModelMode::Train,
            input_size: 4,
        };
        let err = infer(&mut enc, &batch(1, 3), &ExecutionContext::cpu()).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_infer_rejects_wrong_row_count() {
        let mut enc = Canned {
            output: EncoderOutput::Categorical(array![[0.2, 0.8]]),
            mode: ModelMode::Train,
            input_size: 1,
        };
        let err = predict_labels(&mut enc, &batch(2, 1), &ExecutionContext::cpu()).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }
}
