//! Model capability traits

use crate::device::Device;
use crate::error::Result;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

/// Whether training-only behavior (dropout, noise) is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelMode {
    /// Training-only behavior enabled
    #[default]
    Train,
    /// Deterministic inference
    Eval,
}

/// Mode and placement control shared by encoders and decoders.
pub trait Module {
    /// Switch between training and inference behavior
    fn set_mode(&mut self, mode: ModelMode);

    /// Current mode
    fn mode(&self) -> ModelMode;

    /// Move model state to `device`. Host-only models ignore this.
    fn place(&mut self, _device: Device) -> Result<()> {
        Ok(())
    }
}

/// Output of an encoder forward pass.
#[derive(Debug, Clone, PartialEq)]
pub enum EncoderOutput {
    /// Classification-only encoder: `(batch, n_classes)`
    Categorical(Array2<f32>),
    /// Full latent decomposition: `(batch, n_classes)` and `(batch, style_dim)`
    Decomposed {
        categorical: Array2<f32>,
        style: Array2<f32>,
    },
}

impl EncoderOutput {
    /// The categorical component
    pub fn categorical(&self) -> &Array2<f32> {
        match self {
            Self::Categorical(categorical) | Self::Decomposed { categorical, .. } => categorical,
        }
    }

    /// The continuous style component, if the encoder produces one
    pub fn style(&self) -> Option<&Array2<f32>> {
        match self {
            Self::Categorical(_) => None,
            Self::Decomposed { style, .. } => Some(style),
        }
    }
}

/// Maps flattened images to a latent code.
pub trait Encoder: Module {
    /// Flattened input dimensionality, e.g. 784 for 28x28 images
    fn input_size(&self) -> usize;

    /// Encode a `(batch, input_size)` matrix
    fn forward(&self, inputs: ArrayView2<'_, f32>) -> Result<EncoderOutput>;
}

/// Maps latent vectors back to flattened images with values in `[0, 1]`.
pub trait Decoder: Module {
    /// Expected latent width (`n_classes + style_dim`, or `n_classes` for a mode decoder)
    fn latent_size(&self) -> usize;

    /// Decode a `(batch, latent_size)` matrix
    fn forward(&self, latent: ArrayView2<'_, f32>) -> Result<Array2<f32>>;
}

/// Put every model into inference mode.
pub fn eval_all(models: &mut [&mut dyn Module]) {
    for model in models.iter_mut() {
        model.set_mode(ModelMode::Eval);
    }
}

/// Put every model into training mode.
pub fn train_all(models: &mut [&mut dyn Module]) {
    for model in models.iter_mut() {
        model.set_mode(ModelMode::Train);
    }
}
