//! Image grids handed to the rendering side

use serde::{Deserialize, Serialize};

/// One cell of an [`ImageGrid`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "slot", content = "pixels", rename_all = "snake_case")]
pub enum ImageSlot {
    /// Flattened pixels in `[0, 1]`
    Present(Vec<f32>),
    /// Nothing to show here, e.g. a cluster with fewer members than columns
    Absent,
}

impl ImageSlot {
    /// Whether the slot holds an image
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}

/// Row-major grid of flattened images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageGrid {
    /// Caption for the whole grid
    pub title: String,
    /// Grid rows
    pub rows: usize,
    /// Grid columns
    pub cols: usize,
    /// `rows * cols` cells, row-major
    pub cells: Vec<ImageSlot>,
}

impl ImageGrid {
    /// Grid of `rows x cols` absent cells
    pub fn new(title: impl Into<String>, rows: usize, cols: usize) -> Self {
        Self { title: title.into(), rows, cols, cells: vec![ImageSlot::Absent; rows * cols] }
    }

    /// Cell at `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> Option<&ImageSlot> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col)
    }

    /// Replace the cell at `(row, col)`; out-of-range positions are ignored
    pub fn set(&mut self, row: usize, col: usize, slot: ImageSlot) {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col] = slot;
        }
    }

    /// Cells holding an image
    pub fn present(&self) -> usize {
        self.cells.iter().filter(|c| c.is_present()).count()
    }
}
