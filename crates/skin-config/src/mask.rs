use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Keep-mask over the magnet grid: `rows × cols`, row-major like the grid.
///
/// In parameter documents it is a nested array of numbers where `1` (or
/// `1.0`) keeps a position and anything else drops it. It is written back as
/// integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<u8>>")]
pub struct Mask {
    rows: usize,
    cols: usize,
    keep: Vec<bool>,
}

impl Mask {
    /// Mask keeping every position.
    pub fn ones(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            keep: vec![true; rows * cols],
        }
    }

    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, ConfigError> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != cols) {
            return Err(ConfigError::RaggedMask);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            keep: rows.into_iter().flatten().collect(),
        })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        if row < self.rows && col < self.cols {
            Some(self.keep[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn count_kept(&self) -> usize {
        self.keep.iter().filter(|k| **k).count()
    }

    /// Items at kept positions, order preserved. `items` is the flattened
    /// `rows × cols` grid; any other shape is rejected.
    pub fn select<T: Copy>(&self, items: &[T], rows: usize, cols: usize) -> Result<Vec<T>, ConfigError> {
        if (rows, cols) != self.shape() || items.len() != rows * cols {
            return Err(ConfigError::MaskShape {
                expected: (rows, cols),
                actual: self.shape(),
            });
        }
        Ok(items
            .iter()
            .zip(&self.keep)
            .filter(|(_, keep)| **keep)
            .map(|(item, _)| *item)
            .collect())
    }
}

impl TryFrom<Vec<Vec<f64>>> for Mask {
    type Error = ConfigError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Mask::from_rows(
            rows.into_iter()
                .map(|r| r.into_iter().map(|v| v == 1.0).collect())
                .collect(),
        )
    }
}

impl From<Mask> for Vec<Vec<u8>> {
    fn from(mask: Mask) -> Self {
        if mask.cols == 0 {
            return vec![Vec::new(); mask.rows];
        }
        mask.keep
            .chunks(mask.cols)
            .map(|r| r.iter().map(|k| u8::from(*k)).collect())
            .collect()
    }
}
