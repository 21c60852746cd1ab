//! Low level implementation of the eigenvalue decomposition of a square matrix.
//!
//! The eigenvalues of a square matrix $M$ of shape $(n, n)$ are the $n$ roots (counted with their
//! algebraic multiplicity) of its characteristic polynomial, and an eigenvector associated with
//! the eigenvalue $\lambda$ is a nonzero vector $v$ such that
//!
//! $$M v = \lambda v.$$
//!
//! Two solvers are provided:
//! - [`compute_symmetric_evd`] for real symmetric matrices, using Jacobi rotations. The
//!   eigenvectors it returns are orthonormal.
//! - [`compute_evd`] for general matrices. The matrix is balanced, reduced to upper Hessenberg
//!   form, then triangularized by a shifted QR iteration with deflation. Eigenvectors are
//!   recovered from the null spaces of the shifted triangular matrix, and inverse iteration is
//!   used to look for the ones that are missing. A defective matrix returns fewer eigenvectors
//!   than its dimension.
//!
//! In both cases, the eigenvalues are sorted by nondecreasing magnitude.

use crate::{assert, ComplexField, Mat};

pub mod balance;
pub mod block22;
pub mod eigenvectors;
pub mod hessenberg;
pub mod shifted_qr;
pub mod symmetric;

pub use symmetric::compute_symmetric_evd;

/// Indicates whether the eigenvectors are computed or skipped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ComputeVectors {
    No,
    Yes,
}

/// Budgets of the inverse iteration used to look for eigenvectors that are missing from the null
/// space of the triangularized matrix.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[non_exhaustive]
pub struct InverseIterationParams {
    /// Number of random starting directions that are tried.
    pub max_attempts: usize,
    /// Number of refinement steps applied to an accepted starting direction.
    pub max_refinements: usize,
    /// A starting direction is accepted only if the first solve amplifies it by more than this
    /// factor.
    pub min_amplification: f64,
}

impl Default for InverseIterationParams {
    #[inline]
    fn default() -> Self {
        Self {
            max_attempts: 5,
            max_refinements: 10,
            min_amplification: 1000.0,
        }
    }
}

/// Eigenvalue decomposition tuning parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[non_exhaustive]
pub struct EvdParams {
    /// Number of consecutive QR sweeps without any deflation after which the iteration is
    /// abandoned.
    pub max_sweeps: usize,
    /// Inverse iteration budgets.
    pub inverse_iteration: InverseIterationParams,
    /// Seed of the random starting directions of the inverse iteration. When `None`, the
    /// generator is seeded from the operating system.
    pub seed: Option<u64>,
}

impl Default for EvdParams {
    #[inline]
    fn default() -> Self {
        Self {
            max_sweeps: 100,
            inverse_iteration: InverseIterationParams::default(),
            seed: None,
        }
    }
}

/// An eigenvalue along with one of its eigenvectors.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Eigenvector<E> {
    pub value: E,
    pub vector: Vec<E>,
}

/// Result of an eigenvalue decomposition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Eigen<E> {
    /// Eigenvalues counted with their algebraic multiplicity, sorted by nondecreasing magnitude.
    pub values: Vec<E>,
    /// Eigenvectors grouped by eigenvalue, in the order of `values`, when they were requested.
    ///
    /// An eigenvalue of geometric multiplicity $k$ contributes $k$ entries.
    pub eigenvectors: Option<Vec<Eigenvector<E>>>,
}

/// Errors of the general eigenvalue decomposition.
#[derive(Clone, Debug, PartialEq)]
pub enum EvdError<E> {
    /// The QR iteration stopped deflating. Contains the eigenvalues that were found, sorted by
    /// magnitude.
    NoConvergence { values: Vec<E> },
    /// The matrix is real, but some of its eigenvalues are not. The decomposition should be
    /// computed over the complex numbers instead.
    ComplexSpectrum,
}

impl<E: core::fmt::Debug> core::fmt::Display for EvdError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EvdError::NoConvergence { values } => write!(
                f,
                "the QR iteration did not converge ({} eigenvalues found)",
                values.len()
            ),
            EvdError::ComplexSpectrum => f.write_str("the matrix has non-real eigenvalues"),
        }
    }
}

impl<E: core::fmt::Debug> std::error::Error for EvdError<E> {}

/// Matrix produced by one of the reduction stages of the general solver, along with the
/// accumulated transform $R$ such that `h` equals $R M R^{-1}$ for the input matrix $M$.
///
/// `r` is `None` when the eigenvectors are not requested.
#[derive(Clone, Debug)]
pub struct Reduction<E> {
    pub h: Mat<E>,
    pub r: Option<Mat<E>>,
}

/// Stable sort by nondecreasing magnitude.
pub(crate) fn sort_by_magnitude<E: ComplexField>(values: &mut [E]) {
    values.sort_by(|a, b| {
        a.abs()
            .partial_cmp(&b.abs())
            .unwrap_or(core::cmp::Ordering::Equal)
    });
}

/// Computes the eigenvalues of `matrix`, and its eigenvectors if `compute_vectors` is
/// [`ComputeVectors::Yes`].
///
/// Values with a magnitude below `epsilon` are treated as zero during the convergence tests.
///
/// # Panics
/// Panics if the matrix is not square.
#[track_caller]
pub fn compute_evd<E: ComplexField>(
    matrix: &Mat<E>,
    epsilon: E::Real,
    compute_vectors: ComputeVectors,
    params: EvdParams,
) -> Result<Eigen<E>, EvdError<E>> {
    assert!(matrix.nrows() == matrix.ncols());
    let n = matrix.nrows();

    if n == 0 {
        return Ok(Eigen {
            values: Vec::new(),
            eigenvectors: (compute_vectors == ComputeVectors::Yes).then(Vec::new),
        });
    }

    let reduction = balance::balance(matrix.clone(), compute_vectors);
    let Reduction { h, r } = hessenberg::reduce_to_hessenberg(reduction, epsilon);

    let shifted_qr::Triangularized { values, basis } =
        shifted_qr::iterate_until_triangular(&h, epsilon, compute_vectors, params.max_sweeps)?;

    let eigenvectors = match (r, basis) {
        (Some(r), Some(c)) => Some(eigenvectors::reconstruct_eigenvectors(
            &h, &r, &c, &values, epsilon, &params,
        )),
        _ => None,
    };

    Ok(Eigen {
        values,
        eigenvectors,
    })
}

/// Returns the relative residual $\|Mv - \lambda v\| / \|v\|$ of an eigenpair.
pub fn residual<E: ComplexField>(matrix: &Mat<E>, pair: &Eigenvector<E>) -> E::Real {
    let mv = crate::linalg::matmul::matvec(matrix, &pair.vector);
    let diff: Vec<E> = mv
        .iter()
        .zip(&pair.vector)
        .map(|(&mv, &v)| mv - pair.value * v)
        .collect();
    let norm = crate::linalg::reductions::norm_l2(&pair.vector);
    if norm == E::Real::zero() {
        return norm;
    }
    crate::linalg::reductions::norm_l2(&diff) / norm
}
