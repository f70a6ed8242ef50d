//! Per-class reconstruction-loss accumulation and ranking

use super::loss::per_sample_bce;
use crate::data::{Batch, BatchSource, UNLABELED};
use crate::device::ExecutionContext;
use crate::error::{Error, Result};
use crate::inference::{infer, LatentCode};
use crate::model::{Decoder, Encoder, ModelMode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Accumulated loss for one observed class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassLoss {
    /// True label
    pub label: usize,
    /// Sum of per-sample losses
    pub total: f64,
    /// Samples contributing to `total`
    pub samples: usize,
}

impl ClassLoss {
    /// Average loss per sample
    pub fn mean(&self) -> f64 {
        self.total / self.samples as f64
    }
}

/// Classes ranked by cumulative reconstruction loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossRanking {
    /// Observed class with the largest cumulative loss (lowest label on ties)
    pub highest_loss_label: usize,
    /// Totals for observed classes, ascending by label
    pub per_class: Vec<ClassLoss>,
}

impl LossRanking {
    /// Totals for `label`, `None` if it was never observed
    pub fn get(&self, label: usize) -> Option<&ClassLoss> {
        self.per_class.iter().find(|c| c.label == label)
    }
}

impl fmt::Display for LossRanking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Highest reconstruction loss: label {}", self.highest_loss_label)?;
        writeln!(f, "{:>6} {:>12} {:>8} {:>10}", "label", "total", "samples", "mean")?;
        for class in &self.per_class {
            writeln!(
                f,
                "{:>6} {:>12.4} {:>8} {:>10.4}",
                class.label,
                class.total,
                class.samples,
                class.mean()
            )?;
        }
        Ok(())
    }
}

/// Sums reconstruction loss per true label over an evaluation pass.
///
/// Labels never seen stay absent rather than zero, and only observed labels
/// take part in the ranking.
#[derive(Debug, Clone)]
pub struct ReconstructionLossRanker {
    totals: Vec<Option<(f64, usize)>>,
}

impl ReconstructionLossRanker {
    /// Ranker for labels in `[0, n_classes)`
    pub fn new(n_classes: usize) -> Result<Self> {
        if n_classes < 2 {
            return Err(Error::InvalidClassCount(n_classes));
        }
        Ok(Self { totals: vec![None; n_classes] })
    }

    /// Add precomputed per-sample losses.
    ///
    /// The batch is validated before anything is added.
    pub fn add_losses(&mut self, labels: &[i64], losses: &[f64]) -> Result<()> {
        if labels.len() != losses.len() {
            return Err(Error::LengthMismatch { left: labels.len(), right: losses.len() });
        }
        let n_classes = self.totals.len();
        for (index, &label) in labels.iter().enumerate() {
            if label == UNLABELED {
                return Err(Error::UnlabeledSample { index });
            }
            if label < 0 || label as usize >= n_classes {
                return Err(Error::LabelOutOfRange { label, n_classes });
            }
        }

        for (&label, &loss) in labels.iter().zip(losses) {
            let entry = self.totals[label as usize].get_or_insert((0.0, 0));
            entry.0 += loss;
            entry.1 += 1;
        }
        Ok(())
    }

    /// Decode `code`, score it against the batch images, and add the losses.
    pub fn accumulate<D>(
        &mut self,
        decoder: &mut D,
        code: &LatentCode,
        batch: &Batch,
        ctx: &ExecutionContext,
    ) -> Result<()>
    where
        D: Decoder + ?Sized,
    {
        decoder.place(ctx.device())?;
        decoder.set_mode(ModelMode::Eval);

        let latent = code.concatenated()?;
        if latent.ncols() != decoder.latent_size() {
            return Err(Error::ShapeMismatch {
                expected: vec![latent.nrows(), decoder.latent_size()],
                actual: latent.shape().to_vec(),
            });
        }
        let reconstructions = decoder.forward(latent.view())?;
        let targets = batch.flat_images(reconstructions.ncols())?;
        let losses = per_sample_bce(reconstructions.view(), targets)?;

        tracing::debug!(batch = batch.size(), "reconstruction losses");
        self.add_losses(&batch.labels, &losses)
    }

    /// Loss total for `label`; `None` if the label has not been observed
    pub fn total(&self, label: usize) -> Option<f64> {
        self.totals.get(label).copied().flatten().map(|(total, _)| total)
    }

    /// Rank observed labels by cumulative loss.
    pub fn finalize(&self) -> Result<LossRanking> {
        let per_class: Vec<ClassLoss> = self
            .totals
            .iter()
            .enumerate()
            .filter_map(|(label, entry)| {
                entry.map(|(total, samples)| ClassLoss { label, total, samples })
            })
            .collect();

        let mut highest: Option<&ClassLoss> = None;
        for class in &per_class {
            if highest.is_none_or(|h| class.total > h.total) {
                highest = Some(class);
            }
        }
        let highest_loss_label = highest
            .map(|c| c.label)
            .ok_or_else(|| Error::empty("reconstruction ranking needs at least one sample"))?;

        tracing::info!(label = highest_loss_label, "highest reconstruction loss");
        Ok(LossRanking { highest_loss_label, per_class })
    }
}

/// Run a full pass and rank classes by reconstruction loss.
pub fn highest_loss_label<E, D, S>(
    encoder: &mut E,
    decoder: &mut D,
    source: &S,
    n_classes: usize,
    ctx: &ExecutionContext,
) -> Result<LossRanking>
where
    E: Encoder + ?Sized,
    D: Decoder + ?Sized,
    S: BatchSource + ?Sized,
{
    let mut ranker = ReconstructionLossRanker::new(n_classes)?;
    for batch in source.batches() {
        let code = infer(encoder, &batch, ctx)?;
        ranker.accumulate(decoder, &code, &batch, ctx)?;
    }
    ranker.finalize()
}
