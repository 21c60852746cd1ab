//! Reduction of a square matrix to upper Hessenberg form by stabilized elementary similarity
//! transforms (Gaussian elimination with row interchanges).
//!
//! For each column `i`, the subdiagonal entry of largest magnitude is moved to position `i + 1`
//! by a row and column interchange, then the entries below it are eliminated by subtracting
//! multiples of row `i + 1`, and the similarity is completed by adding the same multiples of the
//! eliminated columns to column `i + 1`.

use super::Reduction;
use crate::{ComplexField, Mat};

/// Reduces `reduction.h` to upper Hessenberg form, folding the row operations into
/// `reduction.r` when it is tracked.
///
/// Columns whose subdiagonal part has a magnitude below `epsilon` are left untouched.
pub fn reduce_to_hessenberg<E: ComplexField>(
    reduction: Reduction<E>,
    epsilon: E::Real,
) -> Reduction<E> {
    let Reduction { h: mut a, mut r } = reduction;
    let n = a.nrows();

    for i in 0..n.saturating_sub(2) {
        let mut max_index = 0;
        let mut max = E::zero();
        for j in i + 1..n {
            let el = a.read(j, i);
            if max.abs() < el.abs() {
                max = el;
                max_index = j;
            }
        }

        if max.abs() < epsilon {
            continue;
        }

        if max_index != i + 1 {
            a.swap_rows(max_index, i + 1);
            a.swap_cols(max_index, i + 1);
            if let Some(r) = &mut r {
                r.swap_rows(max_index, i + 1);
            }
        }

        for j in i + 2..n {
            let factor = a.read(j, i) / max;
            if factor == E::zero() {
                continue;
            }

            subtract_row_multiple(&mut a, j, i + 1, factor);
            for k in 0..n {
                a.write(k, i + 1, a.read(k, i + 1) + factor * a.read(k, j));
            }
            if let Some(r) = &mut r {
                subtract_row_multiple(r, j, i + 1, factor);
            }
        }
    }

    Reduction { h: a, r }
}

/// `row[dst] -= factor * row[src]`
#[inline]
fn subtract_row_multiple<E: ComplexField>(m: &mut Mat<E>, dst: usize, src: usize, factor: E) {
    for k in 0..m.ncols() {
        m.write(dst, k, m.read(dst, k) - factor * m.read(src, k));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{c64, linalg::lu::inverse, mat};
    use assert_approx_eq::assert_approx_eq;

    fn check<E: ComplexField<Real = f64>>(a: &Mat<E>) {
        let n = a.nrows();
        let reduction = Reduction {
            h: a.clone(),
            r: Some(Mat::identity(n, n)),
        };
        let Reduction { h, r } = reduce_to_hessenberg(reduction, 1e-12);
        let r = r.unwrap();

        for j in 0..n {
            for i in j + 2..n {
                assert_approx_eq!(h.read(i, j).abs(), 0.0, 1e-12);
            }
        }

        // h = r a r^-1
        let expected = &(&r * a) * &inverse(&r).unwrap();
        for i in 0..n {
            for j in 0..n {
                assert_approx_eq!((h.read(i, j) - expected.read(i, j)).abs(), 0.0, 1e-9);
            }
        }
    }

    #[test]
    fn real() {
        check(&mat![
            [4.0, 1.0, -2.0, 2.0],
            [1.0, 2.0, 0.0, 1.0],
            [-2.0, 0.0, 3.0, -2.0],
            [2.0, 1.0, -2.0, -1.0f64],
        ]);
        for n in [1, 2, 3, 6, 9] {
            check(&Mat::from_fn(n, n, |_, _| rand::random::<f64>()));
        }
    }

    #[test]
    fn complex() {
        for n in [3, 5] {
            check(&Mat::from_fn(n, n, |_, _| c64::new(rand::random(), rand::random())));
        }
    }

    #[test]
    fn pivots_on_largest_subdiagonal_entry() {
        let a = mat![[1.0, 2.0, 3.0], [0.5, 1.0, 1.0], [4.0, 1.0, 2.0f64]];
        let reduction = Reduction { h: a.clone(), r: None };
        let Reduction { h, .. } = reduce_to_hessenberg(reduction, 1e-12);
        assert!(h.read(1, 0) == 4.0);
        assert!(h.read(2, 0) == 0.0);
        check(&a);
    }

    #[test]
    fn already_hessenberg_is_unchanged() {
        let a = mat![[0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0f64]];
        let reduction = Reduction { h: a.clone(), r: None };
        let Reduction { h, r } = reduce_to_hessenberg(reduction, 1e-12);
        assert!(h == a);
        assert!(r.is_none());
    }
}
