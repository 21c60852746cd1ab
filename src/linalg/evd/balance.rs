//! Balancing of a square matrix by diagonal similarity transforms.
//!
//! Each row/column pair `i` is rescaled by a power of the field's radix
//! ([`ComplexField::balance_radix`]) so that the taxicab norms of the off-diagonal parts of row `i`
//! and column `i` become comparable. This reduces the norm of the matrix without changing its
//! eigenvalues, and the rescaling itself is exact.

use super::{ComputeVectors, Reduction};
use crate::{ComplexField, Mat};

/// Balances `matrix` in place of its own storage, and returns it along with the accumulated
/// diagonal transform $R$ (when `compute_vectors` is [`ComputeVectors::Yes`]), such that the
/// balanced matrix is $R M R^{-1}$.
pub fn balance<E: ComplexField>(
    mut matrix: Mat<E>,
    compute_vectors: ComputeVectors,
) -> Reduction<E> {
    let n = matrix.nrows();

    let zero = E::Real::zero();
    let one = E::Real::one();
    let radix = E::balance_radix();
    let radix_sq = radix * radix;
    let threshold = E::Real::from_f64(0.95);

    let mut r_diag = match compute_vectors {
        ComputeVectors::Yes => Some(vec![E::one(); n]),
        ComputeVectors::No => None,
    };

    let mut passes = 0usize;
    let mut done = false;
    while !done {
        done = true;
        passes += 1;

        for i in 0..n {
            let mut col_norm = zero;
            let mut row_norm = zero;
            for j in 0..n {
                if i == j {
                    continue;
                }
                col_norm = col_norm + matrix.read(j, i).abs();
                row_norm = row_norm + matrix.read(i, j).abs();
            }

            if col_norm == zero || row_norm == zero {
                continue;
            }

            let mut f = one;
            let mut c = col_norm;

            let row_div_radix = row_norm / radix;
            let row_mul_radix = row_norm * radix;
            while c < row_div_radix {
                c = c * radix_sq;
                f = f * radix;
            }
            while c > row_mul_radix {
                c = c / radix_sq;
                f = f / radix;
            }

            if (c + row_norm) / f < threshold * (col_norm + row_norm) {
                done = false;
                let g = f.inv();
                for j in 0..n {
                    if i == j {
                        continue;
                    }
                    matrix.write(i, j, matrix.read(i, j).scale_real(g));
                    matrix.write(j, i, matrix.read(j, i).scale_real(f));
                }
                if let Some(r_diag) = &mut r_diag {
                    r_diag[i] = r_diag[i].scale_real(g);
                }
            }
        }
    }
    log::trace!("balancing of a {n}x{n} matrix took {passes} passes");

    Reduction {
        h: matrix,
        r: r_diag.map(|diag| Mat::from_diagonal(&diag)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{linalg::lu::inverse, mat, DoubleF64, RealField};
    use assert_approx_eq::assert_approx_eq;

    fn off_diagonal_norms(m: &Mat<f64>, i: usize) -> (f64, f64) {
        let mut col = 0.0;
        let mut row = 0.0;
        for j in 0..m.nrows() {
            if i != j {
                col += m.read(j, i).abs();
                row += m.read(i, j).abs();
            }
        }
        (col, row)
    }

    #[test]
    fn balances_badly_scaled_matrix() {
        let a = mat![[1.0, 1e6, 0.0], [1e-6, 2.0, 1e4], [0.0, 1e-4, 3.0f64]];
        let Reduction { h, r } = balance(a.clone(), ComputeVectors::Yes);
        let r = r.unwrap();

        for i in 0..3 {
            let (col, row) = off_diagonal_norms(&h, i);
            assert!(col / row < 4.0 && row / col < 4.0);
            assert!(h.read(i, i) == a.read(i, i));
        }

        let expected = &(&r * &a) * &inverse(&r).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let tol = 1e-9 * a.read(i, j).abs().max(1.0);
                assert_approx_eq!(h.read(i, j), expected.read(i, j), tol);
            }
        }
    }

    #[test]
    fn scaling_factors_are_powers_of_two() {
        let a = mat![[1.0, 1000.0], [0.001, 1.0f64]];
        let Reduction { r, .. } = balance(a, ComputeVectors::Yes);
        let r = r.unwrap();
        for i in 0..2 {
            let exponent = r.read(i, i).log2();
            assert!(exponent == exponent.round());
        }
    }

    #[test]
    fn decimal_radix_for_extended_precision() {
        let a = mat![[1.0, 1000.0], [0.001, 1.0f64]].map(|&x| DoubleF64::from(x));
        let Reduction { h, r } = balance(a, ComputeVectors::Yes);
        let r0 = r.unwrap().read(0, 0).to_f64();
        let exponent = r0.log10();
        assert_approx_eq!(exponent, exponent.round(), 1e-9);
        assert!(h.read(0, 1).to_f64() < 1000.0);
    }

    #[test]
    fn already_balanced_is_unchanged() {
        let a = mat![[1.0, 2.0], [2.0, 1.0f64]];
        let Reduction { h, r } = balance(a.clone(), ComputeVectors::Yes);
        assert!(h == a);
        assert!(r.unwrap() == Mat::identity(2, 2));
    }

    #[test]
    fn zero_off_diagonal_is_skipped() {
        let a = mat![[1.0, 0.0], [5.0, 2.0f64]];
        let Reduction { h, r } = balance(a.clone(), ComputeVectors::No);
        assert!(h == a);
        assert!(r.is_none());
    }
}
