//! Comparison Matrix - Pairwise importance ratios between the items of a category.

use nalgebra::DMatrix;

use crate::domain::foundation::RiskError;

/// Square matrix where entry (i, j) is the importance of item i relative to item j.
///
/// All entries are finite and strictly positive. Matrices built from rankings
/// are reciprocal with a unit diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonMatrix {
    values: DMatrix<f64>,
}

impl ComparisonMatrix {
    /// Builds `M[i][j] = v[i] / v[j]` from ranking values.
    ///
    /// # Errors
    /// `InvalidInput` if there are no rankings or any ranking is zero,
    /// negative, or non-finite.
    pub fn from_rankings(rankings: &[f64]) -> Result<Self, RiskError> {
        if rankings.is_empty() {
            return Err(RiskError::invalid_input(
                "ranking",
                "at least one ranking value is required",
            ));
        }

        for (position, &value) in rankings.iter().enumerate() {
            if !(value.is_finite() && value > 0.0) {
                return Err(RiskError::invalid_input(
                    "ranking",
                    format!(
                        "value at position {} must be strictly positive, got {}",
                        position, value
                    ),
                ));
            }
        }

        let n = rankings.len();
        let values = DMatrix::from_fn(n, n, |i, j| rankings[i] / rankings[j]);
        Ok(Self { values })
    }

    /// Builds a matrix from explicit rows.
    ///
    /// # Errors
    /// `InvalidInput` if the rows are empty, not square, or contain an entry
    /// that is zero, negative, or non-finite.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, RiskError> {
        let n = rows.len();
        if n == 0 {
            return Err(RiskError::invalid_input("matrix", "matrix must not be empty"));
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(RiskError::invalid_input(
                    "matrix",
                    format!(
                        "matrix is not square: row {} has {} entries, expected {}",
                        i,
                        row.len(),
                        n
                    ),
                ));
            }
            for (j, &value) in row.iter().enumerate() {
                if !(value.is_finite() && value > 0.0) {
                    return Err(RiskError::invalid_input(
                        "matrix",
                        format!(
                            "entry ({}, {}) must be strictly positive, got {}",
                            i, j, value
                        ),
                    ));
                }
            }
        }

        let values = DMatrix::from_fn(n, n, |i, j| rows[i][j]);
        Ok(Self { values })
    }

    /// Returns the number of items compared.
    pub fn size(&self) -> usize {
        self.values.nrows()
    }

    /// Returns entry (i, j).
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[(i, j)]
    }

    /// Returns the underlying dense matrix.
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.values
    }
}
