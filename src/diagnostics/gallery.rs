//! Decoded image grids: per-cluster galleries, style sweeps, learned modes

use super::grid::{ImageGrid, ImageSlot};
use crate::data::Batch;
use crate::device::ExecutionContext;
use crate::error::{Error, Result};
use crate::inference::infer;
use crate::model::{Decoder, Encoder, ModelMode};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

fn decode<D>(decoder: &mut D, latent: &Array2<f32>, ctx: &ExecutionContext) -> Result<Array2<f32>>
where
    D: Decoder + ?Sized,
{
    decoder.place(ctx.device())?;
    decoder.set_mode(ModelMode::Eval);
    if latent.ncols() != decoder.latent_size() {
        return Err(Error::ShapeMismatch {
            expected: vec![latent.nrows(), decoder.latent_size()],
            actual: latent.shape().to_vec(),
        });
    }
    decoder.forward(latent.view())
}

/// `n_classes` rows: one-hot class `c` followed by `style_dim` zeros
fn mode_latents(n_classes: usize, style_dim: usize) -> Array2<f32> {
    Array2::from_shape_fn((n_classes, n_classes + style_dim), |(r, c)| f32::from(u8::from(r == c)))
}

/// Evenly spaced points over `[-1, 1]`; a single step sits at 0
fn sweep_points(steps: usize) -> Array1<f32> {
    if steps == 1 {
        return Array1::zeros(1);
    }
    Array1::linspace(-1.0, 1.0, steps)
}

/// One cluster row per class: the decoded mode, then up to `per_class` members.
///
/// Members are taken in batch order from samples whose predicted cluster is
/// the row's class. Rows with fewer members are padded with
/// [`ImageSlot::Absent`].
pub fn class_gallery<E, D>(
    encoder: &mut E,
    decoder: &mut D,
    batch: &Batch,
    ctx: &ExecutionContext,
    per_class: usize,
) -> Result<ImageGrid>
where
    E: Encoder + ?Sized,
    D: Decoder + ?Sized,
{
    let code = infer(encoder, batch, ctx)?;
    let n_classes = code.n_classes();
    let modes = decode(decoder, &mode_latents(n_classes, code.style_dim()), ctx)?;
    let images = batch.flat_images(encoder.input_size())?;

    let mut grid = ImageGrid::new("samples per predicted class", n_classes, per_class + 1);
    let mut filled = vec![0usize; n_classes];
    for (row, mode) in modes.rows().into_iter().enumerate() {
        grid.set(row, 0, ImageSlot::Present(mode.to_vec()));
    }
    for (sample, &cluster) in code.predicted_labels().iter().enumerate() {
        if filled[cluster] < per_class {
            filled[cluster] += 1;
            grid.set(cluster, filled[cluster], ImageSlot::Present(images.row(sample).to_vec()));
        }
    }

    tracing::debug!(?filled, "class gallery");
    Ok(grid)
}

/// Original image next to its reconstruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconstructionExample {
    /// Input pixels
    pub original: Vec<f32>,
    /// Decoded pixels
    pub reconstruction: Vec<f32>,
    /// Cluster the encoder assigned
    pub predicted: usize,
}

/// Encode and decode the first image of `batch`.
pub fn reconstruction_example<E, D>(
    encoder: &mut E,
    decoder: &mut D,
    batch: &Batch,
    ctx: &ExecutionContext,
) -> Result<ReconstructionExample>
where
    E: Encoder + ?Sized,
    D: Decoder + ?Sized,
{
    if batch.is_empty() {
        return Err(Error::empty("reconstruction example needs a non-empty batch"));
    }
    let code = infer(encoder, batch, ctx)?;
    let reconstructions = decode(decoder, &code.concatenated()?, ctx)?;
    let images = batch.flat_images(encoder.input_size())?;

    Ok(ReconstructionExample {
        original: images.row(0).to_vec(),
        reconstruction: reconstructions.row(0).to_vec(),
        predicted: code.predicted_labels()[0],
    })
}

/// Decode a sweep of the first style coordinate for every class.
///
/// Row `c` holds `steps` decodings of one-hot class `c` with style
/// coordinate 0 spread over `[-1, 1]` and all other style coordinates 0.
pub fn latent_feature_sweep<D>(
    decoder: &mut D,
    n_classes: usize,
    style_dim: usize,
    steps: usize,
    ctx: &ExecutionContext,
) -> Result<ImageGrid>
where
    D: Decoder + ?Sized,
{
    if n_classes < 2 {
        return Err(Error::InvalidClassCount(n_classes));
    }
    if style_dim == 0 {
        return Err(Error::Config("feature sweep needs a style component".into()));
    }
    if steps == 0 {
        return Err(Error::Config("feature sweep needs at least one step".into()));
    }

    let points = sweep_points(steps);
    let width = n_classes + style_dim;
    let latent = Array2::from_shape_fn((n_classes * steps, width), |(r, c)| {
        let (class, step) = (r / steps, r % steps);
        if c == class {
            1.0
        } else if c == n_classes {
            points[step]
        } else {
            0.0
        }
    });
    let decoded = decode(decoder, &latent, ctx)?;

    let mut grid = ImageGrid::new("latent feature sweep", n_classes, steps);
    for (r, image) in decoded.rows().into_iter().enumerate() {
        grid.set(r / steps, r % steps, ImageSlot::Present(image.to_vec()));
    }
    Ok(grid)
}

/// Decode each one-hot class vector with a categorical-only decoder.
pub fn learned_modes<D>(mode_decoder: &mut D, n_classes: usize, ctx: &ExecutionContext) -> Result<ImageGrid>
where
    D: Decoder + ?Sized,
{
    if n_classes < 2 {
        return Err(Error::InvalidClassCount(n_classes));
    }
    let decoded = decode(mode_decoder, &mode_latents(n_classes, 0), ctx)?;

    let mut grid = ImageGrid::new("learned modes", 1, n_classes);
    for (c, image) in decoded.rows().into_iter().enumerate() {
        grid.set(0, c, ImageSlot::Present(image.to_vec()));
    }
    Ok(grid)
}
