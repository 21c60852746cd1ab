//! Matrix multiplication.

use crate::{assert, ComplexField, Conj, Mat};

/// Inner product of two vectors.
pub mod inner_prod {
    use super::*;
    use crate::assert;

    /// Returns `sum(conj_lhs(lhs[i]) * conj_rhs(rhs[i]))`.
    ///
    /// # Panics
    /// Panics if `lhs` and `rhs` have different lengths.
    #[inline]
    #[track_caller]
    pub fn inner_prod_with_conj<E: ComplexField>(
        lhs: &[E],
        conj_lhs: Conj,
        rhs: &[E],
        conj_rhs: Conj,
    ) -> E {
        assert!(lhs.len() == rhs.len());
        let mut acc = E::zero();
        for (&a, &b) in lhs.iter().zip(rhs) {
            acc = acc + conj_lhs.apply(a) * conj_rhs.apply(b);
        }
        acc
    }
}

/// Returns the product `lhs * rhs`.
///
/// # Panics
/// Panics if `lhs.ncols() != rhs.nrows()`.
#[track_caller]
pub fn matmul<E: ComplexField>(lhs: &Mat<E>, rhs: &Mat<E>) -> Mat<E> {
    assert!(lhs.ncols() == rhs.nrows());
    let m = lhs.nrows();
    let mut acc = Mat::<E>::zeros(m, rhs.ncols());

    for j in 0..rhs.ncols() {
        for k in 0..lhs.ncols() {
            let b = rhs.read(k, j);
            if b == E::zero() {
                continue;
            }
            let a = lhs.col(k);
            let dst = acc.col_mut(j);
            for i in 0..m {
                dst[i] = dst[i] + a[i] * b;
            }
        }
    }
    acc
}

/// Returns the product `lhs * rhs`, where `rhs` is a column vector.
///
/// # Panics
/// Panics if `lhs.ncols() != rhs.len()`.
#[track_caller]
pub fn matvec<E: ComplexField>(lhs: &Mat<E>, rhs: &[E]) -> Vec<E> {
    assert!(lhs.ncols() == rhs.len());
    let mut acc = vec![E::zero(); lhs.nrows()];
    for (k, &b) in rhs.iter().enumerate() {
        for (dst, &a) in acc.iter_mut().zip(lhs.col(k)) {
            *dst = *dst + a * b;
        }
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::{inner_prod::inner_prod_with_conj, *};
    use crate::{assert, c64, mat};

    #[test]
    fn matmul_2x3_3x2() {
        let a = mat![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0f64]];
        let b = mat![[7.0, 8.0], [9.0, 10.0], [11.0, 12.0f64]];
        let c = &a * &b;
        assert!(c == mat![[58.0, 64.0], [139.0, 154.0]]);
    }

    #[test]
    #[should_panic]
    fn matmul_dimension_mismatch() {
        let a = Mat::<f64>::zeros(2, 3);
        let _ = matmul(&a, &a);
    }

    #[test]
    fn identity_is_neutral() {
        let a = Mat::from_fn(4, 4, |i, j| (i * 4 + j) as f64);
        let id = Mat::<f64>::identity(4, 4);
        assert!(&a * &id == a);
        assert!(&id * &a == a);
    }

    #[test]
    fn matvec_matches_matmul() {
        let a = mat![[1.0, 2.0], [3.0, 4.0f64]];
        assert!(matvec(&a, &[1.0, -1.0]) == vec![-1.0, -1.0]);
    }

    #[test]
    fn inner_prod_conjugates() {
        let i = c64::new(0.0, 1.0);
        let x = [i, c64::new(1.0, 0.0)];
        let dot = inner_prod_with_conj(&x, Conj::Yes, &x, Conj::No);
        assert!(dot == c64::new(2.0, 0.0));
        let dot = inner_prod_with_conj(&x, Conj::No, &x, Conj::No);
        assert!(dot == c64::new(0.0, 0.0));
    }
}
