//! Reconstruction-loss error analysis
//!
//! Decodes each sample's latent code, scores it with binary cross-entropy
//! against the original image, and sums the scores per true label to find the
//! class the autoencoder reconstructs worst.

mod loss;
mod ranker;


pub use loss::{binary_cross_entropy, per_sample_bce};
pub use ranker::{highest_loss_label, ClassLoss, LossRanking, ReconstructionLossRanker};
