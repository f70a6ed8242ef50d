//! Finalized label-alignment results

use serde::{Deserialize, Serialize};
use std::fmt;

/// Best-matching cluster for one true class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClassMatch {
    /// The class was observed; `count` of its `total` samples fell in `best_match`
    Matched { best_match: usize, count: usize, total: usize },
    /// No sample of this class was seen, so the match rate is undefined
    NoData,
}

impl ClassMatch {
    /// Fraction of the class captured by its best cluster
    pub fn rate(&self) -> Option<f64> {
        match *self {
            Self::Matched { count, total, .. } => Some(count as f64 / total as f64),
            Self::NoData => None,
        }
    }

    /// The best-matching cluster, if the class was observed
    pub fn best_match(&self) -> Option<usize> {
        match *self {
            Self::Matched { best_match, .. } => Some(best_match),
            Self::NoData => None,
        }
    }
}

/// True label assigned to one predicted cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClusterMapping {
    /// `correct` of the cluster's `total` samples carry `true_label`
    Mapped { true_label: usize, correct: usize, total: usize },
    /// The cluster was never predicted; it contributes nothing to accuracy
    NeverPredicted,
}

impl ClusterMapping {
    /// The mapped true label, if the cluster was ever predicted
    pub fn true_label(&self) -> Option<usize> {
        match *self {
            Self::Mapped { true_label, .. } => Some(true_label),
            Self::NeverPredicted => None,
        }
    }
}

/// Predicted cluster → best-matching true label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelMapping(Vec<Option<usize>>);

impl LabelMapping {
    /// True label for `cluster`; `None` if never predicted or out of range
    pub fn get(&self, cluster: usize) -> Option<usize> {
        self.0.get(cluster).copied().flatten()
    }

    /// Translate a sequence of cluster ids into true labels
    pub fn apply(&self, clusters: &[usize]) -> Vec<Option<usize>> {
        clusters.iter().map(|&c| self.get(c)).collect()
    }

    /// Number of clusters covered
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the mapping covers no clusters
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Result of a completed label-alignment pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentReport {
    /// Indexed by true label
    pub per_class: Vec<ClassMatch>,
    /// Indexed by predicted cluster
    pub clusters: Vec<ClusterMapping>,
    /// Samples whose cluster maps to their true label
    pub correct: usize,
    /// Samples processed
    pub total: usize,
}

impl AlignmentReport {
    /// Permutation-invariant accuracy in `[0, 1]`
    pub fn overall_accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }

    /// [`Self::overall_accuracy`] as a percentage
    pub fn accuracy_percent(&self) -> f64 {
        100.0 * self.overall_accuracy()
    }

    /// Cluster → true label mapping
    pub fn label_mapping(&self) -> LabelMapping {
        LabelMapping(self.clusters.iter().map(ClusterMapping::true_label).collect())
    }

    /// Clusters that never received a sample
    pub fn never_predicted(&self) -> Vec<usize> {
        self.clusters
            .iter()
            .enumerate()
            .filter(|(_, m)| matches!(m, ClusterMapping::NeverPredicted))
            .map(|(p, _)| p)
            .collect()
    }

    /// True classes with no samples in the pass
    pub fn classes_without_data(&self) -> Vec<usize> {
        self.per_class
            .iter()
            .enumerate()
            .filter(|(_, m)| matches!(m, ClassMatch::NoData))
            .map(|(t, _)| t)
            .collect()
    }
}

impl fmt::Display for AlignmentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, class_match) in self.per_class.iter().enumerate() {
            match class_match {
                ClassMatch::Matched { best_match, .. } => writeln!(
                    f,
                    "Label {label}: {:.2}%, best matching cluster: {best_match}",
                    100.0 * class_match.rate().unwrap_or(0.0)
                )?,
                ClassMatch::NoData => writeln!(f, "Label {label}: no data")?,
            }
        }
        for cluster in self.never_predicted() {
            writeln!(f, "Cluster {cluster} is never predicted")?;
        }
        writeln!(f, "ACCURACY: {:.2}%", self.accuracy_percent())?;

        let mapping: Vec<String> = self
            .clusters
            .iter()
            .enumerate()
            .filter_map(|(p, m)| m.true_label().map(|t| format!("{p}→{t}")))
            .collect();
        write!(f, "Mapping: {{{}}}", mapping.join(", "))
    }
}
