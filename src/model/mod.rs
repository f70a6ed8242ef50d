//! Encoder/decoder capabilities consumed by the evaluators
//!
//! The evaluators never define or train networks. They call into anything
//! implementing [`Encoder`] or [`Decoder`]; [`AffineEncoder`] and
//! [`AffineDecoder`] read single-layer weights exported by a training run.

mod affine;
mod traits;

pub use affine::{AffineDecoder, AffineEncoder};
pub use traits::{eval_all, train_all, Decoder, Encoder, EncoderOutput, Module, ModelMode};
