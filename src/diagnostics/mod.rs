//! Diagnostics for a trained model
//!
//! Everything here produces plain data (counts, histograms, image grids)
//! and hands it to an [`ArtifactSink`]; rendering happens elsewhere.

mod gallery;
mod grid;
mod histogram;
mod sink;

pub use gallery::{
    class_gallery, latent_feature_sweep, learned_modes, reconstruction_example,
    ReconstructionExample,
};
pub use grid::{ImageGrid, ImageSlot};
pub use histogram::Histogram;
pub use sink::{Artifact, ArtifactSink, JsonArtifactSink, MemorySink};

use crate::data::{Batch, BatchSource};
use crate::device::ExecutionContext;
use crate::error::{Error, Result};
use crate::inference::infer;
use crate::model::Encoder;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How often each cluster is predicted over a full pass.
pub fn predicted_label_distribution<E, S>(
    encoder: &mut E,
    source: &S,
    n_classes: usize,
    ctx: &ExecutionContext,
) -> Result<Vec<usize>>
where
    E: Encoder + ?Sized,
    S: BatchSource + ?Sized,
{
    let mut counts = vec![0usize; n_classes];
    for batch in source.batches() {
        for cluster in infer(encoder, &batch, ctx)?.predicted_labels() {
            let slot = counts.get_mut(cluster).ok_or_else(|| Error::ShapeMismatch {
                expected: vec![n_classes],
                actual: vec![cluster + 1],
            })?;
            *slot += 1;
        }
    }
    if counts.iter().all(|&c| c == 0) {
        return Err(Error::empty("label distribution needs at least one sample"));
    }
    Ok(counts)
}

/// Histograms of the latent code of one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatentDistribution {
    /// Highest categorical probability per sample
    pub highest_probability: Histogram,
    /// First style coordinate per sample, when the encoder has one
    pub first_style: Option<Histogram>,
}

/// Summarize how confident the categorical head is and how the style spreads.
pub fn latent_distribution<E>(
    encoder: &mut E,
    batch: &Batch,
    ctx: &ExecutionContext,
    bins: usize,
) -> Result<LatentDistribution>
where
    E: Encoder + ?Sized,
{
    if batch.is_empty() {
        return Err(Error::empty("latent distribution needs a non-empty batch"));
    }
    let code = infer(encoder, batch, ctx)?;
    let highest: Vec<f64> = code.highest_probability().into_iter().map(f64::from).collect();
    let first_style = code
        .style
        .as_ref()
        .filter(|s| s.ncols() > 0)
        .map(|s| s.column(0).iter().map(|&v| f64::from(v)).collect::<Vec<_>>())
        .map(|values| Histogram::from_values(&values, bins));

    Ok(LatentDistribution {
        highest_probability: Histogram::from_values(&highest, bins),
        first_style,
    })
}

/// Pick one batch uniformly at random from `source`.
pub fn select_batch<S, R>(source: &S, rng: &mut R) -> Result<Batch>
where
    S: BatchSource + ?Sized,
    R: Rng,
{
    let count = source.batches().count();
    if count == 0 {
        return Err(Error::empty("no batches to choose from"));
    }
    let index = rng.random_range(0..count);
    source.batches().nth(index).ok_or_else(|| Error::empty("batch source shrank"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EncoderOutput, ModelMode, Module};
    use ndarray::{Array2, ArrayView2};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Softmax-free encoder: categorical row is the raw input, style is `-x0`.
    struct Raw(ModelMode);

    impl Module for Raw {
        fn set_mode(&mut self, mode: ModelMode) {
            self.0 = mode;
        }
        fn mode(&self) -> ModelMode {
            self.0
        }
    }

    impl Encoder for Raw {
        fn input_size(&self) -> usize {
            2
        }
        fn forward(&self, inputs: ArrayView2<'_, f32>) -> Result<EncoderOutput> {
            let style = inputs.column(0).mapv(|v| -v).insert_axis(ndarray::Axis(1));
            Ok(EncoderOutput::Decomposed { categorical: inputs.to_owned(), style })
        }
    }

    fn batches() -> Vec<Batch> {
        let rows = [[0.9, 0.1], [0.2, 0.8], [0.7, 0.3]];
        rows.chunks(2)
            .map(|chunk| {
                let images = Array2::from_shape_fn((chunk.len(), 2), |(r, c)| chunk[r][c]);
                Batch::new(images.into_dyn(), vec![0; chunk.len()]).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_predicted_label_distribution() {
        let mut enc = Raw(ModelMode::Train);
        let counts =
            predicted_label_distribution(&mut enc, &batches(), 2, &ExecutionContext::cpu()).unwrap();
        assert_eq!(counts, vec![2, 1]);
    }

    #[test]
    fn test_predicted_label_distribution_rejects_wide_code() {
        let mut enc = Raw(ModelMode::Train);
        let mut data = batches();
        data.truncate(1);
        // Cluster 1 is predicted but only one cluster is expected
        let err = predicted_label_distribution(&mut enc, &data, 1, &ExecutionContext::cpu())
            .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_latent_distribution() {
        let mut enc = Raw(ModelMode::Train);
        let data = batches();
        let dist = latent_distribution(&mut enc, &data[0], &ExecutionContext::cpu(), 4).unwrap();

        assert_eq!(dist.highest_probability.total(), 2);
        let style = dist.first_style.unwrap();
        assert_eq!(style.total(), 2);
        assert!(style.edges[0] < -0.8);
    }

    #[test]
    fn test_select_batch_is_seeded() {
        let data = batches();
        let a = select_batch(&data, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = select_batch(&data, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);

        let empty: Vec<Batch> = Vec::new();
        assert!(select_batch(&empty, &mut StdRng::seed_from_u64(7)).is_err());
    }
}
