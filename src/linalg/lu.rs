//! The LU decomposition with partial (row) pivoting of a square matrix $M$ is a decomposition into
//! a row permutation $P$, a unit lower triangular $L$ and an upper triangular $U$, such that
//! $$PM = LU.$$
//!
//! It is used here to invert small dense matrices.

use crate::{assert, linalg::SingularMatrixError, ComplexField, Mat};

/// Computes the LU decomposition of `matrix` in place, and returns the row permutation as
/// `perm[i] = original index of row i`.
///
/// On output, the strictly lower part of `matrix` contains $L$ (with an implicit unit diagonal)
/// and its upper part contains $U$.
///
/// # Panics
/// Panics if the matrix is not square.
#[track_caller]
pub fn lu_in_place<E: ComplexField>(
    matrix: &mut Mat<E>,
) -> Result<Vec<usize>, SingularMatrixError> {
    assert!(matrix.nrows() == matrix.ncols());
    let n = matrix.nrows();
    let mut perm: Vec<usize> = (0..n).collect();

    for k in 0..n {
        let mut pivot_row = k;
        let mut pivot_abs = matrix.read(k, k).abs();
        for i in k + 1..n {
            let abs = matrix.read(i, k).abs();
            if abs > pivot_abs {
                pivot_abs = abs;
                pivot_row = i;
            }
        }
        if pivot_abs == E::Real::zero() {
            return Err(SingularMatrixError { index: k });
        }
        if pivot_row != k {
            matrix.swap_rows(k, pivot_row);
            perm.swap(k, pivot_row);
        }

        let pivot_inv = matrix.read(k, k).inv();
        for i in k + 1..n {
            let factor = matrix.read(i, k) * pivot_inv;
            matrix.write(i, k, factor);
            if factor == E::zero() {
                continue;
            }
            for j in k + 1..n {
                matrix.write(i, j, matrix.read(i, j) - factor * matrix.read(k, j));
            }
        }
    }

    Ok(perm)
}

/// Returns the inverse of `matrix`.
///
/// # Panics
/// Panics if the matrix is not square.
#[track_caller]
pub fn inverse<E: ComplexField>(matrix: &Mat<E>) -> Result<Mat<E>, SingularMatrixError> {
    let mut lu = matrix.clone();
    let perm = lu_in_place(&mut lu)?;
    let n = lu.nrows();

    let mut inv = Mat::<E>::zeros(n, n);
    for j in 0..n {
        // column j of the identity, permuted
        let mut x: Vec<E> = perm
            .iter()
            .map(|&p| if p == j { E::one() } else { E::zero() })
            .collect();

        for i in 0..n {
            let mut acc = x[i];
            for k in 0..i {
                acc = acc - lu.read(i, k) * x[k];
            }
            x[i] = acc;
        }
        for i in (0..n).rev() {
            let mut acc = x[i];
            for k in i + 1..n {
                acc = acc - lu.read(i, k) * x[k];
            }
            x[i] = acc / lu.read(i, i);
        }

        inv.col_mut(j).copy_from_slice(&x);
    }
    Ok(inv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert, c64, mat};
    use assert_approx_eq::assert_approx_eq;

    fn check_inverse<E: ComplexField<Real = f64>>(a: &Mat<E>) {
        let inv = inverse(a).unwrap();
        let prod = a * &inv;
        for i in 0..a.nrows() {
            for j in 0..a.ncols() {
                let expected = if i == j { E::one() } else { E::zero() };
                assert_approx_eq!((prod.read(i, j) - expected).abs(), 0.0, 1e-10);
            }
        }
    }

    #[test]
    fn inverse_needs_pivoting() {
        check_inverse(&mat![[0.0, 1.0], [1.0, 0.0f64]]);
        check_inverse(&mat![[0.0, 2.0, 1.0], [1.0, 1.0, 0.0], [3.0, 0.0, 1.0f64]]);
    }

    #[test]
    fn inverse_random() {
        for n in [1, 2, 4, 7] {
            let a = Mat::from_fn(n, n, |i, j| {
                rand::random::<f64>() + if i == j { n as f64 } else { 0.0 }
            });
            check_inverse(&a);
        }
    }

    #[test]
    fn inverse_complex() {
        let i = c64::new(0.0, 1.0);
        let one = c64::new(1.0, 0.0);
        check_inverse(&mat![[one, i], [-i, one + one]]);
    }

    #[test]
    fn singular() {
        let a = mat![[1.0, 2.0], [2.0, 4.0f64]];
        assert!(inverse(&a) == Err(SingularMatrixError { index: 1 }));
    }
}
