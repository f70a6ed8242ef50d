//! Unsupervised-to-supervised label alignment
//!
//! Clusters found without ground truth carry arbitrary ids. Counting how often
//! each true label lands in each cluster and taking the most frequent match in
//! both directions yields an accuracy that is invariant to cluster
//! permutation.

mod contingency;
mod engine;
mod report;


pub use contingency::ContingencyTable;
pub use engine::{unsupervised_accuracy, AlignmentState, LabelAlignment};
pub use report::{AlignmentReport, ClassMatch, ClusterMapping, LabelMapping};
