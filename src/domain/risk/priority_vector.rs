//! Priority Vector Resolver - Dominant-eigenvector weights from pairwise comparisons.
//!
//! # Algorithm
//! 1. Eigenvalues of `M` via a real Schur decomposition.
//! 2. `lambda_max` = eigenvalue with the largest real part (the Perron root for
//!    positive matrices, real and positive).
//! 3. Eigenvector = null space of `M - lambda_max * I`, taken as the right
//!    singular vector of its smallest singular value.
//! 4. Component-wise absolute value, normalized by the sum.

use nalgebra::{DMatrix, DVector, Schur, SVD};
use serde::{Deserialize, Serialize};

use super::ComparisonMatrix;
use crate::domain::foundation::RiskError;

/// Saaty's random consistency index by matrix size (n = 1..=15).
pub const RANDOM_INDEX: [f64; 15] = [
    0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49, 1.51, 1.48, 1.56, 1.57, 1.59,
];

const CONVERGENCE_EPS: f64 = f64::EPSILON;
const MAX_ITERATIONS: usize = 10_000;

/// Normalized weights of the items of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityVector {
    /// Non-negative weights summing to 1, in item order.
    pub weights: Vec<f64>,
    /// Dominant eigenvalue of the comparison matrix.
    pub lambda_max: f64,
    /// `(lambda_max - n) / (n - 1)`, zero for n <= 2.
    pub consistency_index: f64,
    /// `consistency_index / RI(n)`; `None` when RI is zero or n is beyond the table.
    pub consistency_ratio: Option<f64>,
}

impl PriorityVector {
    /// The trivial vector for a single item.
    pub fn single() -> Self {
        Self {
            weights: vec![1.0],
            lambda_max: 1.0,
            consistency_index: 0.0,
            consistency_ratio: None,
        }
    }
}

/// Derives priority vectors from comparison matrices.
pub struct PriorityVectorResolver;

impl PriorityVectorResolver {
    /// Resolves the priority vector of a comparison matrix.
    ///
    /// # Edge Cases
    /// - 1x1 matrix: returns `[1.0]` without decomposition
    ///
    /// # Errors
    /// `InvalidInput` if the decomposition does not converge or yields a
    /// degenerate eigenvector.
    pub fn resolve(matrix: &ComparisonMatrix) -> Result<PriorityVector, RiskError> {
        let n = matrix.size();
        if n == 1 {
            return Ok(PriorityVector::single());
        }

        let m = matrix.as_matrix();
        let lambda_max = Self::dominant_eigenvalue(m)?;
        let eigenvector = Self::eigenvector_for(m, lambda_max)?;

        let magnitudes = eigenvector.map(f64::abs);
        let total = magnitudes.sum();
        if !(total.is_finite() && total > 0.0) {
            return Err(RiskError::invalid_input(
                "matrix",
                "dominant eigenvector is degenerate",
            ));
        }

        let weights = magnitudes.iter().map(|w| w / total).collect();
        let consistency_index = Self::consistency_index(lambda_max, n);

        Ok(PriorityVector {
            weights,
            lambda_max,
            consistency_index,
            consistency_ratio: Self::consistency_ratio(consistency_index, n),
        })
    }

    /// Builds the reciprocal matrix from ranking values and resolves it.
    pub fn from_rankings(rankings: &[f64]) -> Result<PriorityVector, RiskError> {
        let matrix = ComparisonMatrix::from_rankings(rankings)?;
        Self::resolve(&matrix)
    }

    fn dominant_eigenvalue(m: &DMatrix<f64>) -> Result<f64, RiskError> {
        let schur = Schur::try_new(m.clone(), CONVERGENCE_EPS, MAX_ITERATIONS).ok_or_else(|| {
            RiskError::invalid_input("matrix", "eigen-decomposition did not converge")
        })?;

        schur
            .complex_eigenvalues()
            .iter()
            .map(|eigenvalue| eigenvalue.re)
            .filter(|re| re.is_finite())
            .fold(None, |best: Option<f64>, re| match best {
                Some(b) if b >= re => Some(b),
                _ => Some(re),
            })
            .ok_or_else(|| RiskError::invalid_input("matrix", "matrix has no finite eigenvalue"))
    }

    fn eigenvector_for(m: &DMatrix<f64>, lambda: f64) -> Result<DVector<f64>, RiskError> {
        let n = m.nrows();
        let shifted = m - DMatrix::<f64>::identity(n, n) * lambda;

        let svd = SVD::try_new(shifted, false, true, CONVERGENCE_EPS, MAX_ITERATIONS)
            .ok_or_else(|| {
                RiskError::invalid_input("matrix", "singular value decomposition did not converge")
            })?;

        let smallest = svd
            .singular_values
            .iter()
            .enumerate()
            .fold((0, f64::INFINITY), |(best_i, best_s), (i, &s)| {
                if s < best_s {
                    (i, s)
                } else {
                    (best_i, best_s)
                }
            })
            .0;

        let v_t = svd
            .v_t
            .ok_or_else(|| RiskError::invalid_input("matrix", "right singular vectors unavailable"))?;

        Ok(v_t.row(smallest).transpose())
    }

    fn consistency_index(lambda_max: f64, n: usize) -> f64 {
        if n <= 2 {
            return 0.0;
        }
        ((lambda_max - n as f64) / (n as f64 - 1.0)).max(0.0)
    }

    fn consistency_ratio(consistency_index: f64, n: usize) -> Option<f64> {
        RANDOM_INDEX
            .get(n.checked_sub(1)?)
            .filter(|&&ri| ri > 0.0)
            .map(|ri| consistency_index / ri)
    }
}

/// Index of the largest weight; the first one wins ties.
pub fn dominant_index(weights: &[f64]) -> Option<usize> {
    weights
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &w)| match best {
            Some((_, best_w)) if best_w >= w => best,
            _ => Some((i, w)),
        })
        .map(|(i, _)| i)
}

/// Resolves the priority weights of a matrix given as rows.
///
/// # Errors
/// `InvalidInput` on empty, non-square, or non-positive input, or when the
/// decomposition fails.
pub fn resolve_priority_vector(rows: &[Vec<f64>]) -> Result<Vec<f64>, RiskError> {
    let matrix = ComparisonMatrix::from_rows(rows)?;
    Ok(PriorityVectorResolver::resolve(&matrix)?.weights)
}
