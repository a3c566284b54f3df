//! Covariance matrices and their Cholesky decomposition.
//!
//! The engine turns independent standard normals `Z` into correlated
//! increments `W = L Z`, where `L` is a lower triangular square root of
//! the per-step covariance matrix `C = L L^T`.
//!
//! The decomposition here is tolerant of positive *semi*-definite input:
//! a zero pivot (a degenerate, zero-variance direction) produces a zero
//! row in the factor instead of failing, so baskets containing riskless
//! or perfectly correlated assets decompose cleanly. Only genuinely
//! indefinite matrices are rejected.
//!
//! ## Usage
//!
//! ```
//! use basket_core::math::covariance::CovarianceMatrix;
//!
//! // 2x2 covariance: vols 20% and 15%, correlation 0.6
//! let cov = CovarianceMatrix::new(&[0.04_f64, 0.018, 0.018, 0.0225], 2).unwrap();
//!
//! let factor = cov.cholesky().unwrap();
//! let w = factor.transform(&[0.5, 0.8]);
//! assert_eq!(w.len(), 2);
//! ```

use num_traits::Float;
use thiserror::Error;

/// Structurally invalid covariance input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CovarianceError {
    /// Flat data length does not equal `dim * dim`.
    #[error("invalid matrix data: expected {expected} elements, got {got}")]
    InvalidDimensions {
        /// `dim * dim`.
        expected: usize,
        /// Number of elements provided.
        got: usize,
    },

    /// An entry differs from its transpose counterpart.
    #[error("matrix is not symmetric at ({i}, {j})")]
    NotSymmetric {
        /// Row of the offending entry.
        i: usize,
        /// Column of the offending entry.
        j: usize,
    },

    /// An entry is NaN or infinite.
    #[error("matrix entry at ({i}, {j}) is not finite")]
    NotFinite {
        /// Row of the offending entry.
        i: usize,
        /// Column of the offending entry.
        j: usize,
    },
}

/// Covariance matrix that admits no real square root.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecompositionError {
    /// A pivot turned negative, or a zero-variance row carries residual
    /// covariance: the matrix is not positive semi-definite.
    #[error("covariance matrix is not positive semi-definite (detected at row {row})")]
    NotPositiveSemiDefinite {
        /// Row at which the violation was detected.
        row: usize,
    },
}

/// Symmetric covariance matrix in row-major storage.
#[derive(Clone, Debug, PartialEq)]
pub struct CovarianceMatrix<T: Float> {
    /// Matrix elements in row-major order.
    data: Vec<T>,
    /// Matrix dimension (n x n).
    dim: usize,
}

impl<T: Float> CovarianceMatrix<T> {
    /// Creates a covariance matrix from flat row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`CovarianceError`] if the data length is not `dim * dim`,
    /// an entry is not finite, or the matrix is not symmetric (up to a
    /// small relative tolerance).
    pub fn new(data: &[T], dim: usize) -> Result<Self, CovarianceError> {
        let expected = dim * dim;
        if data.len() != expected {
            return Err(CovarianceError::InvalidDimensions {
                expected,
                got: data.len(),
            });
        }

        for i in 0..dim {
            for j in 0..dim {
                if !data[i * dim + j].is_finite() {
                    return Err(CovarianceError::NotFinite { i, j });
                }
            }
        }

        let tol = T::from(1e-12).unwrap_or_else(T::zero);
        for i in 0..dim {
            for j in (i + 1)..dim {
                let a = data[i * dim + j];
                let b = data[j * dim + i];
                let scale = T::one() + a.abs().max(b.abs());
                if (a - b).abs() > tol * scale {
                    return Err(CovarianceError::NotSymmetric { i, j });
                }
            }
        }

        Ok(Self {
            data: data.to_vec(),
            dim,
        })
    }

    /// Creates a covariance matrix from nested rows.
    ///
    /// Rows must already be square; use this after structural
    /// validation of caller-supplied input.
    ///
    /// # Errors
    ///
    /// As [`new`](Self::new); ragged rows surface as
    /// [`CovarianceError::InvalidDimensions`].
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self, CovarianceError> {
        let dim = rows.len();
        let flat: Vec<T> = rows.iter().flatten().copied().collect();
        Self::new(&flat, dim)
    }

    /// Matrix dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Element at (i, j).
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.data[i * self.dim + j]
    }

    /// The main diagonal (per-asset variances).
    pub fn diagonal(&self) -> Vec<T> {
        (0..self.dim).map(|i| self.get(i, i)).collect()
    }

    /// Returns this matrix scaled by a non-negative factor.
    ///
    /// Scaling by the per-step time increment turns an annualised
    /// covariance into a per-step covariance.
    pub fn scale(&self, factor: T) -> Self {
        Self {
            data: self.data.iter().map(|&v| v * factor).collect(),
            dim: self.dim,
        }
    }

    /// Computes a lower triangular `L` with `L L^T` equal to this matrix.
    ///
    /// Zero pivots are admitted: the corresponding row of `L` is zero,
    /// which is the correct square root for a degenerate (zero-variance)
    /// direction.
    ///
    /// # Errors
    ///
    /// Returns [`DecompositionError::NotPositiveSemiDefinite`] if a pivot
    /// is negative beyond tolerance, or if a zero-pivot row carries
    /// covariance that no real factor can reproduce.
    pub fn cholesky(&self) -> Result<CholeskyFactor<T>, DecompositionError> {
        let n = self.dim;
        let mut lower = vec![T::zero(); n * n];

        // Tolerances scaled to the largest diagonal entry. A pivot within
        // `tol` of zero is treated as a degenerate direction; its residual
        // covariance is only bounded by sqrt(pivot * diag), hence the wider
        // residual tolerance.
        let max_diag = self
            .diagonal()
            .into_iter()
            .fold(T::zero(), |acc, v| acc.max(v.abs()));
        let tol = T::from(1e-12).unwrap_or_else(T::zero) * (T::one() + max_diag);
        let residual_tol = tol.sqrt() * (T::one() + max_diag).sqrt();

        for i in 0..n {
            for j in 0..=i {
                let mut sum = T::zero();
                for k in 0..j {
                    sum = sum + lower[i * n + k] * lower[j * n + k];
                }

                if i == j {
                    let pivot = self.get(i, i) - sum;
                    if pivot < -tol {
                        return Err(DecompositionError::NotPositiveSemiDefinite { row: i });
                    }
                    lower[i * n + i] = if pivot > tol { pivot.sqrt() } else { T::zero() };
                } else {
                    let l_jj = lower[j * n + j];
                    let residual = self.get(i, j) - sum;
                    if l_jj > T::zero() {
                        lower[i * n + j] = residual / l_jj;
                    } else if residual.abs() > residual_tol {
                        return Err(DecompositionError::NotPositiveSemiDefinite { row: j });
                    }
                }
            }
        }

        Ok(CholeskyFactor {
            data: lower,
            dim: n,
        })
    }
}

/// Lower triangular Cholesky factor of a covariance matrix.
///
/// Shared read-only across simulation workers once computed.
#[derive(Clone, Debug, PartialEq)]
pub struct CholeskyFactor<T: Float> {
    /// Lower triangular elements, row-major.
    data: Vec<T>,
    /// Matrix dimension.
    dim: usize,
}

impl<T: Float> CholeskyFactor<T> {
    /// Matrix dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Element at (i, j); zero above the diagonal.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        if j > i {
            T::zero()
        } else {
            self.data[i * self.dim + j]
        }
    }

    /// Correlates independent standard normals: computes `w = L z`.
    ///
    /// # Panics
    ///
    /// Panics if `z` is shorter than the matrix dimension, or if `out`
    /// has a different length than `z`.
    pub fn transform_into(&self, z: &[T], out: &mut [T]) {
        assert!(
            z.len() >= self.dim && out.len() >= self.dim,
            "buffer length is less than matrix dimension {}",
            self.dim
        );

        for i in 0..self.dim {
            let mut sum = T::zero();
            for j in 0..=i {
                sum = sum + self.data[i * self.dim + j] * z[j];
            }
            out[i] = sum;
        }
    }

    /// Allocating convenience wrapper over
    /// [`transform_into`](Self::transform_into).
    pub fn transform(&self, z: &[T]) -> Vec<T> {
        let mut out = vec![T::zero(); self.dim];
        self.transform_into(z, &mut out);
        out
    }
}
