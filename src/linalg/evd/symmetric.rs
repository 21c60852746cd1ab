//! Eigenvalue decomposition of a real symmetric matrix by cyclic annihilation of its largest
//! off-diagonal entry with Jacobi rotations.

use super::{ComputeVectors, Eigen, Eigenvector};
use crate::{assert, linalg::jacobi::JacobiRotation, Mat, RealField};

/// Computes the eigenvalues of the real symmetric matrix `matrix`, and its eigenvectors if
/// `compute_vectors` is [`ComputeVectors::Yes`].
///
/// Only the upper triangular part is used to select the rotations. The iteration stops once every
/// off-diagonal entry has a magnitude below `epsilon / n`. The eigenvectors are orthonormal, and
/// each eigenvalue has exactly one eigenvector per multiplicity slot.
///
/// # Panics
/// Panics if the matrix is not square.
#[track_caller]
pub fn compute_symmetric_evd<E: RealField>(
    matrix: &Mat<E>,
    epsilon: E,
    compute_vectors: ComputeVectors,
) -> Eigen<E> {
    assert!(matrix.nrows() == matrix.ncols());
    let n = matrix.nrows();

    let mut x = matrix.clone();
    let mut s = match compute_vectors {
        ComputeVectors::Yes => Some(Mat::<E>::identity(n, n)),
        ComputeVectors::No => None,
    };

    let threshold = epsilon / E::from_f64(n.max(1) as f64);
    let mut rotations = 0usize;

    loop {
        let mut max = E::zero();
        let mut pivot = (0, 0);
        for j in 0..n {
            for i in 0..j {
                let abs = x.read(i, j).abs();
                if abs > max {
                    max = abs;
                    pivot = (i, j);
                }
            }
        }
        if max < threshold || max == E::zero() {
            break;
        }

        let (i, j) = pivot;
        let rot = JacobiRotation::from_triplet(x.read(i, i), x.read(i, j), x.read(j, j), epsilon);
        rot.apply_on_the_left_in_place(&mut x, i, j);
        rot.apply_on_the_right_in_place(&mut x, i, j);
        x.write(i, j, E::zero());
        x.write(j, i, E::zero());

        if let Some(s) = &mut s {
            rot.apply_on_the_right_in_place(s, i, j);
        }
        rotations += 1;
    }
    log::trace!("jacobi iteration on a {n}x{n} matrix took {rotations} rotations");

    let mut values = x.diagonal();

    // selection sort by magnitude, carrying the columns of `s` along
    for k in 0..n {
        let mut min_index = k;
        for l in k + 1..n {
            if values[l].abs() < values[min_index].abs() {
                min_index = l;
            }
        }
        if min_index != k {
            values.swap(k, min_index);
            if let Some(s) = &mut s {
                s.swap_cols(k, min_index);
            }
        }
    }

    let eigenvectors = s.map(|s| {
        values
            .iter()
            .enumerate()
            .map(|(k, &value)| Eigenvector {
                value,
                vector: s.col(k).to_vec(),
            })
            .collect()
    });

    Eigen {
        values,
        eigenvectors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert, linalg::evd::residual, mat, DoubleF64};
    use assert_approx_eq::assert_approx_eq;

    fn random_symmetric(n: usize) -> Mat<f64> {
        let a = Mat::from_fn(n, n, |_, _| rand::random::<f64>() - 0.5);
        Mat::from_fn(n, n, |i, j| a.read(i, j) + a.read(j, i))
    }

    #[test]
    fn diagonal() {
        let a = mat![[3.0, 0.0], [0.0, -2.0f64]];
        let eigen = compute_symmetric_evd(&a, 1e-12, ComputeVectors::Yes);
        assert!(eigen.values == vec![-2.0, 3.0]);
        let eigenvectors = eigen.eigenvectors.unwrap();
        assert!(eigenvectors[0].vector == vec![0.0, 1.0]);
        assert!(eigenvectors[1].vector == vec![1.0, 0.0]);
    }

    #[test]
    fn two_by_two() {
        let a = mat![[2.0, 1.0], [1.0, 2.0f64]];
        let eigen = compute_symmetric_evd(&a, 1e-12, ComputeVectors::Yes);
        assert_approx_eq!(eigen.values[0], 1.0);
        assert_approx_eq!(eigen.values[1], 3.0);
        for pair in eigen.eigenvectors.as_ref().unwrap() {
            assert!(residual(&a, pair) < 1e-12);
        }
    }

    #[test]
    fn random() {
        for n in [1, 3, 4, 8, 15] {
            let a = random_symmetric(n);
            let eigen = compute_symmetric_evd(&a, 1e-12, ComputeVectors::Yes);

            let trace: f64 = a.diagonal().iter().sum();
            let sum: f64 = eigen.values.iter().sum();
            assert_approx_eq!(sum, trace, 1e-10);

            for k in 1..n {
                assert!(eigen.values[k - 1].abs() <= eigen.values[k].abs());
            }

            let eigenvectors = eigen.eigenvectors.unwrap();
            assert!(eigenvectors.len() == n);
            for pair in &eigenvectors {
                assert!(residual(&a, pair) < 1e-10);
            }

            // orthonormal
            for p in 0..n {
                for q in 0..n {
                    let dot: f64 = eigenvectors[p]
                        .vector
                        .iter()
                        .zip(&eigenvectors[q].vector)
                        .map(|(a, b)| a * b)
                        .sum();
                    assert_approx_eq!(dot, if p == q { 1.0 } else { 0.0 }, 1e-10);
                }
            }
        }
    }

    #[test]
    fn repeated_eigenvalue() {
        let a = mat![[2.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 5.0f64]];
        let eigen = compute_symmetric_evd(&a, 1e-12, ComputeVectors::Yes);
        assert!(eigen.values == vec![2.0, 2.0, 5.0]);
        assert!(eigen.eigenvectors.unwrap().len() == 3);
    }

    #[test]
    fn without_vectors() {
        let a = mat![[1.0, 2.0], [2.0, 1.0f64]];
        let eigen = compute_symmetric_evd(&a, 1e-12, ComputeVectors::No);
        assert!(eigen.eigenvectors.is_none());
        assert_approx_eq!(eigen.values[0], -1.0);
        assert_approx_eq!(eigen.values[1], 3.0);
    }

    #[test]
    fn empty() {
        let eigen = compute_symmetric_evd(&Mat::<f64>::new(), 1e-12, ComputeVectors::Yes);
        assert!(eigen.values.is_empty());
        assert!(eigen.eigenvectors == Some(Vec::new()));
    }

    #[test]
    fn extended_precision() {
        let a = mat![[2.0, 1.0], [1.0, 2.0f64]].map(|&x| DoubleF64::from(x));
        let eigen = compute_symmetric_evd(&a, DoubleF64::from(1e-28), ComputeVectors::Yes);
        assert!((eigen.values[0] - DoubleF64::from(1.0)).abs() < DoubleF64::from(1e-28));
        assert!((eigen.values[1] - DoubleF64::from(3.0)).abs() < DoubleF64::from(1e-28));
        for pair in eigen.eigenvectors.as_ref().unwrap() {
            assert!(residual(&a, pair) < DoubleF64::from(1e-28));
        }
    }
}
