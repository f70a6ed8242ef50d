//! Single dense-layer encoder/decoder loaded from exported JSON weights

use super::traits::{Decoder, Encoder, EncoderOutput, Module, ModelMode};
use crate::error::{Error, Result};
use ndarray::{s, Array1, Array2, ArrayView2, Axis};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn check_layer(weights: &Array2<f32>, bias: &Array1<f32>) -> Result<()> {
    if weights.ncols() != bias.len() {
        return Err(Error::ShapeMismatch {
            expected: vec![weights.ncols()],
            actual: vec![bias.len()],
        });
    }
    Ok(())
}

fn dense(inputs: ArrayView2<'_, f32>, weights: &Array2<f32>, bias: &Array1<f32>) -> Result<Array2<f32>> {
    if inputs.ncols() != weights.nrows() {
        return Err(Error::ShapeMismatch {
            expected: vec![inputs.nrows(), weights.nrows()],
            actual: inputs.shape().to_vec(),
        });
    }
    Ok(inputs.dot(weights) + bias)
}

fn softmax_rows(mut logits: Array2<f32>) -> Array2<f32> {
    for mut row in logits.axis_iter_mut(Axis(0)) {
        let max = row.fold(f32::NEG_INFINITY, |m, &v| m.max(v));
        row.mapv_inplace(|v| (v - max).exp());
        let sum = row.sum();
        row.mapv_inplace(|v| v / sum);
    }
    logits
}

fn sigmoid(v: f32) -> f32 {
    if v >= 0.0 {
        1.0 / (1.0 + (-v).exp())
    } else {
        let e = v.exp();
        e / (1.0 + e)
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(Error::ModelNotFound { path: path.to_path_buf() });
    }
    let json = fs::read_to_string(path)
        .map_err(|e| Error::io(format!("reading {}", path.display()), e))?;
    Ok(serde_json::from_str(&json)?)
}

/// Encoder `x -> [softmax(xW + b)[..n_classes], (xW + b)[n_classes..]]`.
///
/// With `style_dim == 0` it is a classification-only encoder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffineEncoder {
    weights: Array2<f32>,
    bias: Array1<f32>,
    n_classes: usize,
    #[serde(skip)]
    mode: ModelMode,
}

impl AffineEncoder {
    /// Build from `(input_size, n_classes + style_dim)` weights
    pub fn new(weights: Array2<f32>, bias: Array1<f32>, n_classes: usize) -> Result<Self> {
        check_layer(&weights, &bias)?;
        if n_classes < 2 {
            return Err(Error::InvalidClassCount(n_classes));
        }
        if weights.ncols() < n_classes {
            return Err(Error::ShapeMismatch {
                expected: vec![weights.nrows(), n_classes],
                actual: weights.shape().to_vec(),
            });
        }
        Ok(Self { weights, bias, n_classes, mode: ModelMode::default() })
    }

    /// Load weights exported as JSON
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw: Self = load_json(path.as_ref())?;
        Self::new(raw.weights, raw.bias, raw.n_classes)
    }

    /// Number of categorical outputs
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Number of continuous style outputs
    pub fn style_dim(&self) -> usize {
        self.weights.ncols() - self.n_classes
    }
}

impl Module for AffineEncoder {
    fn set_mode(&mut self, mode: ModelMode) {
        self.mode = mode;
    }

    fn mode(&self) -> ModelMode {
        self.mode
    }
}

impl Encoder for AffineEncoder {
    fn input_size(&self) -> usize {
        self.weights.nrows()
    }

    fn forward(&self, inputs: ArrayView2<'_, f32>) -> Result<EncoderOutput> {
        let out = dense(inputs, &self.weights, &self.bias)?;
        let categorical = softmax_rows(out.slice(s![.., ..self.n_classes]).to_owned());
        if self.style_dim() == 0 {
            return Ok(EncoderOutput::Categorical(categorical));
        }
        let style = out.slice(s![.., self.n_classes..]).to_owned();
        Ok(EncoderOutput::Decomposed { categorical, style })
    }
}

/// Decoder `z -> sigmoid(zW + b)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffineDecoder {
    weights: Array2<f32>,
    bias: Array1<f32>,
    #[serde(skip)]
    mode: ModelMode,
}

impl AffineDecoder {
    /// Build from `(latent_size, output_size)` weights
    pub fn new(weights: Array2<f32>, bias: Array1<f32>) -> Result<Self> {
        check_layer(&weights, &bias)?;
        Ok(Self { weights, bias, mode: ModelMode::default() })
    }

    /// Load weights exported as JSON
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw: Self = load_json(path.as_ref())?;
        Self::new(raw.weights, raw.bias)
    }

    /// Flattened image dimensionality produced
    pub fn output_size(&self) -> usize {
        self.weights.ncols()
    }
}

impl Module for AffineDecoder {
    fn set_mode(&mut self, mode: ModelMode) {
        self.mode = mode;
    }

    fn mode(&self) -> ModelMode {
        self.mode
    }
}

impl Decoder for AffineDecoder {
    fn latent_size(&self) -> usize {
        self.weights.nrows()
    }

    fn forward(&self, latent: ArrayView2<'_, f32>) -> Result<Array2<f32>> {
        Ok(dense(latent, &self.weights, &self.bias)?.mapv(sigmoid))
    }
}
