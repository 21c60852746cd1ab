//! The QR decomposition of a matrix $M$ of shape $(m, n)$ is a decomposition into two components
//! $Q$ and $R$, such that:
//!
//! - $Q$ is a unitary matrix of shape $(m, m)$,
//! - $R$ is an upper trapezoidal matrix of shape $(m, n)$,
//! - and $M = QR$.
//!
//! The decomposition is computed with a sequence of Householder reflections, without pivoting,
//! and $Q$ is formed explicitly.

use crate::{
    linalg::{
        householder::{
            apply_householder_on_the_left_in_place, apply_householder_on_the_right_in_place,
            make_householder_in_place,
        },
        reductions::norm_l2,
    },
    ComplexField, Mat,
};

/// Explicit factors of a QR decomposition.
#[derive(Clone, Debug)]
pub struct Qr<E> {
    /// Unitary factor.
    pub q: Mat<E>,
    /// Upper trapezoidal factor.
    pub r: Mat<E>,
}

/// Computes the QR decomposition of `matrix`.
pub fn qr<E: ComplexField>(matrix: &Mat<E>) -> Qr<E> {
    let m = matrix.nrows();
    let n = matrix.ncols();

    let mut r = matrix.clone();
    let mut q = Mat::<E>::identity(m, m);

    let zero = E::Real::zero();

    for k in 0..Ord::min(m.saturating_sub(1), n) {
        let head = r.read(k, k);
        let mut essential: Vec<E> = r.col(k)[k + 1..].to_vec();
        let tail_norm = norm_l2(&essential);
        if tail_norm == zero {
            continue;
        }

        let (tau, beta) = make_householder_in_place(Some(&mut essential), head, tail_norm);
        let tau_inv = tau.real().inv();

        r.write(k, k, beta);
        for i in k + 1..m {
            r.write(i, k, E::zero());
        }

        let mut trailing = r.submatrix(k, k + 1, m - k, n - k - 1);
        apply_householder_on_the_left_in_place(&mut trailing, 0, &essential, tau_inv);
        for j in 0..n - k - 1 {
            for i in 0..m - k {
                r.write(k + i, k + 1 + j, trailing.read(i, j));
            }
        }

        let mut q_cols = q.submatrix(0, k, m, m - k);
        apply_householder_on_the_right_in_place(&mut q_cols, 0, &essential, tau_inv);
        for j in 0..m - k {
            for i in 0..m {
                q.write(i, k + j, q_cols.read(i, j));
            }
        }
    }

    Qr { q, r }
}
