//! Label-alignment engine: accumulate a pass, then finalize once

use super::contingency::{argmax_count, ContingencyTable};
use super::report::{AlignmentReport, ClassMatch, ClusterMapping};
use crate::data::{BatchSource, UNLABELED};
use crate::device::ExecutionContext;
use crate::error::{Error, Result};
use crate::inference::predict_labels;
use crate::model::Encoder;

/// Lifecycle of a [`LabelAlignment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentState {
    /// Nothing recorded yet
    Empty,
    /// At least one batch recorded
    Accumulating,
    /// Report derived; further accumulation is rejected
    Finalized,
}

/// Reconciles unsupervised cluster ids with true labels.
///
/// Feed `(true, predicted)` pairs with [`LabelAlignment::accumulate`] across a
/// full pass, then call [`LabelAlignment::finalize`]. Finalize is idempotent:
/// the report is derived once and cached.
#[derive(Debug, Clone)]
pub struct LabelAlignment {
    table: ContingencyTable,
    report: Option<AlignmentReport>,
}

impl LabelAlignment {
    /// Engine with one cluster per class
    pub fn new(n_classes: usize) -> Result<Self> {
        Self::with_clusters(n_classes, n_classes)
    }

    /// Engine whose encoder emits `n_clusters` categories for `n_classes` true labels
    pub fn with_clusters(n_classes: usize, n_clusters: usize) -> Result<Self> {
        if n_classes < 2 {
            return Err(Error::InvalidClassCount(n_classes));
        }
        if n_clusters < 2 {
            return Err(Error::InvalidClassCount(n_clusters));
        }
        Ok(Self { table: ContingencyTable::new(n_classes, n_clusters), report: None })
    }

    /// Current lifecycle state
    pub fn state(&self) -> AlignmentState {
        if self.report.is_some() {
            AlignmentState::Finalized
        } else if self.table.total() == 0 {
            AlignmentState::Empty
        } else {
            AlignmentState::Accumulating
        }
    }

    /// The table accumulated so far
    pub fn table(&self) -> &ContingencyTable {
        &self.table
    }

    /// Record one batch of paired labels.
    ///
    /// The whole batch is validated before anything is counted, so a rejected
    /// batch leaves the table untouched.
    pub fn accumulate(&mut self, true_labels: &[i64], predicted: &[usize]) -> Result<()> {
        if self.report.is_some() {
            return Err(Error::AlreadyFinalized);
        }
        if true_labels.len() != predicted.len() {
            return Err(Error::LengthMismatch { left: true_labels.len(), right: predicted.len() });
        }

        let n_classes = self.table.n_classes();
        let n_clusters = self.table.n_clusters();
        let mut rows = Vec::with_capacity(true_labels.len());
        for (index, (&t, &p)) in true_labels.iter().zip(predicted).enumerate() {
            if t == UNLABELED {
                return Err(Error::UnlabeledSample { index });
            }
            if t < 0 || t as usize >= n_classes {
                return Err(Error::LabelOutOfRange { label: t, n_classes });
            }
            if p >= n_clusters {
                return Err(Error::LabelOutOfRange { label: p as i64, n_classes: n_clusters });
            }
            rows.push(t as usize);
        }

        for (t, &p) in rows.into_iter().zip(predicted) {
            self.table.record(t, p);
        }
        tracing::debug!(batch = predicted.len(), total = self.table.total(), "alignment batch");
        Ok(())
    }

    /// Derive the per-class report, label mapping and accuracy.
    ///
    /// Fails with [`Error::EmptyDataset`] if nothing was accumulated; the
    /// engine stays open in that case.
    pub fn finalize(&mut self) -> Result<&AlignmentReport> {
        if self.report.is_none() {
            let report = derive_report(&self.table)?;
            self.report = Some(report);
        }
        self.report.as_ref().ok_or_else(|| Error::empty("alignment report"))
    }
}

fn derive_report(table: &ContingencyTable) -> Result<AlignmentReport> {
    let total = table.total();
    if total == 0 {
        return Err(Error::empty("label alignment needs at least one sample"));
    }

    let per_class: Vec<ClassMatch> = (0..table.n_classes())
        .map(|t| {
            let row = table.row(t);
            match argmax_count(row) {
                Some(best_match) => ClassMatch::Matched {
                    best_match,
                    count: row[best_match],
                    total: table.row_total(t),
                },
                None => {
                    tracing::warn!(label = t, "no samples for true label");
                    ClassMatch::NoData
                }
            }
        })
        .collect();

    let clusters: Vec<ClusterMapping> = (0..table.n_clusters())
        .map(|p| {
            let column = table.column(p);
            match argmax_count(&column) {
                Some(true_label) => ClusterMapping::Mapped {
                    true_label,
                    correct: column[true_label],
                    total: table.column_total(p),
                },
                None => {
                    tracing::warn!(cluster = p, "cluster is never predicted");
                    ClusterMapping::NeverPredicted
                }
            }
        })
        .collect();

    let correct = clusters
        .iter()
        .map(|m| match m {
            ClusterMapping::Mapped { correct, .. } => *correct,
            ClusterMapping::NeverPredicted => 0,
        })
        .sum();

    let report = AlignmentReport { per_class, clusters, correct, total };
    tracing::info!(
        accuracy = report.overall_accuracy(),
        correct,
        total,
        "label alignment finalized"
    );
    Ok(report)
}

/// Run a full alignment pass of `encoder` over `source`.
pub fn unsupervised_accuracy<E, S>(
    encoder: &mut E,
    source: &S,
    n_classes: usize,
    ctx: &ExecutionContext,
) -> Result<AlignmentReport>
where
    E: Encoder + ?Sized,
    S: BatchSource + ?Sized,
{
    let mut engine = LabelAlignment::new(n_classes)?;
    for batch in source.batches() {
        let predicted = predict_labels(encoder, &batch, ctx)?;
        engine.accumulate(&batch.labels, &predicted)?;
    }
    Ok(engine.finalize()?.clone())
}
