//! Jacobi (Givens) plane rotations.

use crate::{assert, Mat, RealField};

/// Plane rotation $J = \begin{bmatrix} c & s \\ -s & c \end{bmatrix}$ acting on two coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct JacobiRotation<T> {
    pub c: T,
    pub s: T,
}

impl<E: RealField> JacobiRotation<E> {
    /// Returns the rotation that annihilates the off-diagonal entry of the symmetric matrix
    /// $\begin{bmatrix} x & y \\ y & z \end{bmatrix}$ under $J^T A J$.
    ///
    /// The rotation angle is $\theta = \frac{1}{2}\arctan\frac{2y}{z - x}$, or $\frac{\pi}{4}$ when
    /// $|z - x| \leq \epsilon$. It is computed without trigonometric functions.
    #[inline]
    pub fn from_triplet(x: E, y: E, z: E, epsilon: E) -> Self {
        let zero = E::zero();
        let one = E::one();

        if y == zero {
            return Self { c: one, s: zero };
        }

        let diff = z - x;
        let t = if diff.abs() <= epsilon {
            one
        } else {
            let tau = diff / (y + y);
            let w = (tau * tau + one).sqrt();
            if tau >= zero {
                (tau + w).inv()
            } else {
                -(w - tau).inv()
            }
        };

        let c = (t * t + one).sqrt().inv();
        Self { c, s: t * c }
    }

    /// Replaces columns `i` and `j` of `matrix` by the corresponding columns of `matrix * J`.
    #[track_caller]
    pub fn apply_on_the_right_in_place(&self, matrix: &mut Mat<E>, i: usize, j: usize) {
        assert!(all(i < matrix.ncols(), j < matrix.ncols(), i != j));
        let Self { c, s } = *self;
        for k in 0..matrix.nrows() {
            let xi = matrix.read(k, i);
            let xj = matrix.read(k, j);
            matrix.write(k, i, c * xi - s * xj);
            matrix.write(k, j, s * xi + c * xj);
        }
    }

    /// Replaces rows `i` and `j` of `matrix` by the corresponding rows of `J^T * matrix`.
    #[track_caller]
    pub fn apply_on_the_left_in_place(&self, matrix: &mut Mat<E>, i: usize, j: usize) {
        assert!(all(i < matrix.nrows(), j < matrix.nrows(), i != j));
        let Self { c, s } = *self;
        for k in 0..matrix.ncols() {
            let xi = matrix.read(i, k);
            let xj = matrix.read(j, k);
            matrix.write(i, k, c * xi - s * xj);
            matrix.write(j, k, s * xi + c * xj);
        }
    }
}
