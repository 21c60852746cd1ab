//! Householder reflections.
//!
//! A Householder reflection is a linear transformation that describes a reflection about a
//! hyperplane that crosses the origin of the space.
//!
//! Let $v$ be a unit vector that is orthogonal to the hyperplane. Then the corresponding
//! Householder transformation in matrix form is $I - 2vv^H$, where $I$ is the identity matrix.
//!
//! In practice, a non unit vector $v$ is used, so the transformation is written as
//! $$H = I - \frac{vv^H}{\tau}.$$
//!
//! In order to avoid ambiguity in the normalization of $v$, we assume that $v$ is scaled so that
//! its first component is $1$. The remaining components are called the *essential* part of the
//! vector.

use crate::{assert, ComplexField, Mat};

/// Computes the Householder reflection $I - \frac{v v^H}{\tau}$ such that when multiplied by $x$
/// from the left, the result is $\beta e_0$. $\tau$ and $\beta$ are returned and $\tau$ is
/// real-valued.
///
/// $x$ is determined by $x_0$, contained in `head`, and $|x_{1\dots}|$, contained in `tail_norm`.
/// The vector $v$ is such that $v_0 = 1$ and $v_{1\dots}$ is stored in `essential` (when
/// provided), which must contain $x_{1\dots}$ on input.
///
/// If `tail_norm` is zero, $\tau$ is infinite and the reflection is the identity.
pub fn make_householder_in_place<E: ComplexField>(
    essential: Option<&mut [E]>,
    head: E,
    tail_norm: E::Real,
) -> (E, E) {
    let zero = E::Real::zero();
    if tail_norm == zero {
        return (E::from_real(zero.inv()), head);
    }

    let one_half = E::Real::from_f64(0.5);

    let head_norm = head.abs();
    let norm = (head_norm * head_norm + tail_norm * tail_norm).sqrt();

    let sign = if head_norm != zero {
        head.scale_real(head_norm.inv())
    } else {
        E::one()
    };

    let signed_norm = sign * E::from_real(norm);
    let head_with_beta = head + signed_norm;
    let head_with_beta_inv = head_with_beta.inv();

    if head_with_beta != E::zero() {
        if let Some(essential) = essential {
            for e in essential.iter_mut() {
                *e = *e * head_with_beta_inv;
            }
        }
        let tau = one_half * (E::Real::one() + (tail_norm * head_with_beta_inv.abs()).abs2());
        (E::from_real(tau), -signed_norm)
    } else {
        (E::from_real(zero.inv()), E::zero())
    }
}

/// Applies the reflection $I - \frac{v v^H}{\tau}$ to the rows `offset..` of every column of
/// `matrix` from the left, where $v = (1, \text{essential})$.
#[track_caller]
pub fn apply_householder_on_the_left_in_place<E: ComplexField>(
    matrix: &mut Mat<E>,
    offset: usize,
    essential: &[E],
    tau_inv: E::Real,
) {
    assert!(offset + 1 + essential.len() == matrix.nrows());
    for j in 0..matrix.ncols() {
        let col = matrix.col_mut(j);
        let (head, tail) = col[offset..].split_at_mut(1);

        let mut dot = head[0];
        for (&e, &x) in essential.iter().zip(tail.iter()) {
            dot = dot + e.conj() * x;
        }
        let factor = dot.scale_real(tau_inv);

        head[0] = head[0] - factor;
        for (&e, x) in essential.iter().zip(tail.iter_mut()) {
            *x = *x - e * factor;
        }
    }
}

/// Applies the reflection $I - \frac{v v^H}{\tau}$ to the columns `offset..` of every row of
/// `matrix` from the right, where $v = (1, \text{essential})$.
#[track_caller]
pub fn apply_householder_on_the_right_in_place<E: ComplexField>(
    matrix: &mut Mat<E>,
    offset: usize,
    essential: &[E],
    tau_inv: E::Real,
) {
    assert!(offset + 1 + essential.len() == matrix.ncols());
    for i in 0..matrix.nrows() {
        let mut dot = matrix.read(i, offset);
        for (k, &e) in essential.iter().enumerate() {
            dot = dot + matrix.read(i, offset + 1 + k) * e;
        }
        let factor = dot.scale_real(tau_inv);

        matrix.write(i, offset, matrix.read(i, offset) - factor);
        for (k, &e) in essential.iter().enumerate() {
            let j = offset + 1 + k;
            matrix.write(i, j, matrix.read(i, j) - factor * e.conj());
        }
    }
}
