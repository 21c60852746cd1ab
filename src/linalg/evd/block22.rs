//! Closed form eigenvalues and Jordan basis of a $2 \times 2$ block
//! $\begin{bmatrix} a & b \\ c & d \end{bmatrix}$.

use crate::{ComplexField, Mat};

/// Returns the two eigenvalues $\frac{a + d}{2} \pm \frac{1}{2}\sqrt{(a + d)^2 - 4(ad - bc)}$, or
/// `None` when the discriminant has no square root in the field, i.e. when the eigenvalues of a
/// real block are not real.
pub fn eigenvalues_2x2<E: ComplexField>(a: E, b: E, c: E, d: E) -> Option<(E, E)> {
    let half = E::Real::from_f64(0.5);

    let trace = a + d;
    let det = a * d - b * c;
    let discriminant = trace * trace - E::from_f64(4.0) * det;

    let x = trace.scale_real(half);
    let y = discriminant.try_sqrt()?.scale_real(half);

    Some((x + y, x - y))
}

/// Returns a matrix whose columns are a Jordan basis of the block, given its eigenvalues `l1` and
/// `l2` as computed by [`eigenvalues_2x2`].
///
/// - when `|c| < epsilon`, the block is already upper triangular and the basis is the identity,
/// - when the eigenvalues are distinct, the columns are the eigenvectors $(l_k - d, c)$,
/// - otherwise, the columns are an eigenvector followed by a generalized eigenvector.
pub fn jordan_basis_2x2<E: ComplexField>(
    a: E,
    b: E,
    c: E,
    d: E,
    l1: E,
    l2: E,
    epsilon: E::Real,
) -> Mat<E> {
    let zero = E::zero();
    let one = E::one();

    if c.abs() < epsilon {
        return Mat::identity(2, 2);
    }

    if (l1 - l2).abs() > epsilon {
        return crate::mat![[l1 - d, l2 - d], [c, c]];
    }

    let na = a - l1;
    let nd = d - l1;

    if b.abs() < epsilon && nd.abs() < epsilon {
        crate::mat![[na, one], [c, zero]]
    } else {
        crate::mat![[b, zero], [nd, one]]
    }
}
