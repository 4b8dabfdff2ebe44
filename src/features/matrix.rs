//! Dense features-by-segments matrix.

use serde::Serialize;

use crate::error::{Error, Result};

/// Row-major matrix with one row per feature and one column per segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl FeatureMatrix {
    /// Create a matrix from row-major data.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::FeatureExtraction {
                reason: format!(
                    "matrix data has {} values, expected {rows}x{cols}",
                    data.len()
                ),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Create a matrix from feature rows of equal length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().position(|row| row.len() != cols) {
            return Err(Error::FeatureExtraction {
                reason: format!(
                    "feature row {bad} has {} columns, expected {cols}",
                    rows[bad].len()
                ),
            });
        }
        let n_rows = rows.len();
        Ok(Self {
            rows: n_rows,
            cols,
            data: rows.into_iter().flatten().collect(),
        })
    }

    /// Zero-filled matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Number of features.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of segments.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Value at (`row`, `col`), if in range.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        (row < self.rows && col < self.cols).then(|| self.data[row * self.cols + col])
    }

    /// One feature across all segments.
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        (row < self.rows).then(|| &self.data[row * self.cols..(row + 1) * self.cols])
    }

    /// Nested row vectors.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.data.chunks(self.cols).map(<[f64]>::to_vec).collect()
    }

    /// Copy the given columns, in the given order.
    ///
    /// Out-of-range column indices are skipped.
    #[must_use]
    pub fn select_columns(&self, columns: &[usize]) -> Self {
        let columns: Vec<usize> = columns.iter().copied().filter(|&c| c < self.cols).collect();
        let mut data = Vec::with_capacity(self.rows * columns.len());
        for row in 0..self.rows {
            let base = row * self.cols;
            data.extend(columns.iter().map(|&c| self.data[base + c]));
        }
        Self {
            rows: self.rows,
            cols: columns.len(),
            data,
        }
    }
}
