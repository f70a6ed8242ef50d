//! IDX file parsing (the canonical handwritten-digit distribution format)
//!
//! Layout: a big-endian `u32` magic (`0x0000_0803` for rank-3 `u8` images,
//! `0x0000_0801` for rank-1 `u8` labels), one big-endian `u32` per dimension,
//! then the raw bytes.

use super::dataset::Dataset;
use crate::error::{Error, Result};
use ndarray::Array2;
use std::fs;
use std::path::Path;

const IMAGES_MAGIC: u32 = 0x0000_0803;
const LABELS_MAGIC: u32 = 0x0000_0801;

fn read_u32(bytes: &[u8], offset: usize) -> Result<u32> {
    bytes
        .get(offset..offset + 4)
        .and_then(|b| b.try_into().ok())
        .map(u32::from_be_bytes)
        .ok_or_else(|| Error::InvalidIdx(format!("header truncated at byte {offset}")))
}

fn payload(bytes: &[u8], offset: usize, expected: usize) -> Result<&[u8]> {
    let data = bytes.get(offset..).unwrap_or_default();
    if data.len() != expected {
        return Err(Error::InvalidIdx(format!(
            "expected {expected} payload bytes, found {}",
            data.len()
        )));
    }
    Ok(data)
}

/// Parse an IDX image file into `(n_images, rows * cols)` pixels scaled to `[0, 1]`.
pub fn parse_idx_images(bytes: &[u8]) -> Result<Array2<f32>> {
    let magic = read_u32(bytes, 0)?;
    if magic != IMAGES_MAGIC {
        return Err(Error::InvalidIdx(format!("bad image magic {magic:#010x}")));
    }
    let n = read_u32(bytes, 4)? as usize;
    let rows = read_u32(bytes, 8)? as usize;
    let cols = read_u32(bytes, 12)? as usize;
    let overflow = || Error::InvalidIdx("header dimensions overflow".to_string());
    let dim = rows.checked_mul(cols).ok_or_else(overflow)?;
    let len = n.checked_mul(dim).ok_or_else(overflow)?;

    let data = payload(bytes, 16, len)?;
    let pixels: Vec<f32> = data.iter().map(|&p| f32::from(p) / 255.0).collect();

    Array2::from_shape_vec((n, dim), pixels).map_err(|e| Error::InvalidIdx(e.to_string()))
}

/// Parse an IDX label file.
pub fn parse_idx_labels(bytes: &[u8]) -> Result<Vec<i64>> {
    let magic = read_u32(bytes, 0)?;
    if magic != LABELS_MAGIC {
        return Err(Error::InvalidIdx(format!("bad label magic {magic:#010x}")));
    }
    let n = read_u32(bytes, 4)? as usize;
    Ok(payload(bytes, 8, n)?.iter().map(|&l| i64::from(l)).collect())
}

/// Read a paired images/labels IDX file set into a [`Dataset`].
pub fn read_idx_dataset(images: impl AsRef<Path>, labels: impl AsRef<Path>) -> Result<Dataset> {
    let images = images.as_ref();
    let labels = labels.as_ref();

    let image_bytes = fs::read(images)
        .map_err(|e| Error::io(format!("reading {}", images.display()), e))?;
    let label_bytes = fs::read(labels)
        .map_err(|e| Error::io(format!("reading {}", labels.display()), e))?;

    Dataset::new(parse_idx_images(&image_bytes)?, parse_idx_labels(&label_bytes)?)
}

#[cfg(test)]
pub(crate) fn encode_idx_images(images: &[Vec<u8>], rows: u32, cols: u32) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&IMAGES_MAGIC.to_be_bytes());
    out.extend_from_slice(&(images.len() as u32).to_be_bytes());
    out.extend_from_slice(&rows.to_be_bytes());
    out.extend_from_slice(&cols.to_be_bytes());
    for img in images {
        out.extend_from_slice(img);
    }
    out
}

#[cfg(test)]
pub(crate) fn encode_idx_labels(labels: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&LABELS_MAGIC.to_be_bytes());
    out.extend_from_slice(&(labels.len() as u32).to_be_bytes());
    out.extend_from_slice(labels);
    out
}
