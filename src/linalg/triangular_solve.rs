//! Triangular solve module.
//!
//! Only the upper triangular part of the input matrix is ever read.

use crate::{assert, linalg::SingularMatrixError, ComplexField, Mat};

/// Solves $Ux = b$ by back substitution and returns $x$.
///
/// A zero diagonal entry is accepted when the corresponding entry of the partially reduced
/// right-hand side is also zero, in which case the matching entry of the solution is set to zero.
/// Otherwise an error is returned.
///
/// # Panics
/// Panics if `upper` is not square, or if its dimension differs from `rhs.len()`.
#[track_caller]
pub fn solve_upper_triangular<E: ComplexField>(
    upper: &Mat<E>,
    rhs: &[E],
) -> Result<Vec<E>, SingularMatrixError> {
    assert!(all(upper.nrows() == upper.ncols(), upper.ncols() == rhs.len()));
    let n = rhs.len();
    let mut b = rhs.to_vec();
    let mut x = vec![E::zero(); n];

    for j in (0..n).rev() {
        let diag = upper.read(j, j);
        if diag != E::zero() {
            let xj = b[j] / diag;
            x[j] = xj;
            for i in 0..j {
                b[i] = b[i] - xj * upper.read(i, j);
            }
        } else if b[j] != E::zero() {
            return Err(SingularMatrixError { index: j });
        }
    }

    Ok(x)
}

/// Finds every solution of $Ux = b$.
///
/// Diagonal entries and right-hand side entries with a magnitude below `epsilon` are treated as
/// zero. The first returned vector is a particular solution (all free variables set to zero), and
/// each following vector is obtained by setting one more free variable to one. An empty list is
/// returned when the system has no solution.
///
/// For a homogeneous system, the first vector is the trivial solution and the remaining vectors
/// span the null space of $U$.
///
/// # Panics
/// Panics if `upper` is not square, or if its dimension differs from `rhs.len()`.
#[track_caller]
pub fn solve_upper_triangular_all<E: ComplexField>(
    upper: &Mat<E>,
    rhs: &[E],
    epsilon: E::Real,
) -> Vec<Vec<E>> {
    assert!(all(upper.nrows() == upper.ncols(), upper.ncols() == rhs.len()));
    let n = rhs.len();
    let is_zero = |value: E| value.abs() < epsilon;

    let mut solutions = vec![rhs.to_vec()];

    for i in (0..n).rev() {
        let diag = upper.read(i, i);
        let pending = solutions.len();

        let mut k = 0;
        let mut remaining = pending;
        while k < remaining {
            let b = &mut solutions[k];
            if !is_zero(diag) {
                let xi = b[i] / diag;
                b[i] = xi;
                for j in 0..i {
                    b[j] = b[j] - xi * upper.read(j, i);
                }
                k += 1;
            } else if !is_zero(b[i]) {
                if k == 0 {
                    return Vec::new();
                }
                solutions.remove(k);
                remaining -= 1;
            } else {
                b[i] = E::zero();
                if k == 0 {
                    let mut free = b.clone();
                    free[i] = E::one();
                    for j in 0..i {
                        free[j] = free[j] - upper.read(j, i);
                    }
                    solutions.push(free);
                }
                k += 1;
            }
        }
    }

    solutions
}
