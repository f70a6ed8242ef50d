//! Evaluation of a trained adversarial autoencoder
//!
//! ## Architecture
//!
//! - `accuracy`: supervised accuracy over a labeled validation set
//! - `alignment`: permutation-invariant accuracy via cluster/label matching
//! - `reconstruction`: per-class reconstruction loss and worst-class ranking
//!
//! Every evaluator runs one synchronous pass over a [`BatchSource`] and either
//! completes or fails; no partial aggregate is returned on error.
//!
//! ## Example
//!
//! ```ignore
//! use alinear::eval::{classification_accuracy, unsupervised_accuracy};
//!
//! let pct = classification_accuracy(&mut encoder, &loader, &ctx)?;
//! let report = unsupervised_accuracy(&mut encoder, &loader, 10, &ctx)?;
//! println!("supervised {pct:.2}%, aligned {:.2}%", report.accuracy_percent());
//! ```
//!
//! [`BatchSource`]: crate::data::BatchSource

mod accuracy;
pub mod alignment;
pub mod reconstruction;

pub use accuracy::{classification_accuracy, AccuracyCounter};
pub use alignment::{
    unsupervised_accuracy, AlignmentReport, AlignmentState, ClassMatch, ClusterMapping,
    ContingencyTable, LabelAlignment, LabelMapping,
};
pub use reconstruction::{
    binary_cross_entropy, highest_loss_label, ClassLoss, LossRanking, ReconstructionLossRanker,
};
