//! Shifted QR iteration with deflation.
//!
//! Each sweep shifts the active block by its bottom right entry, factors it as $QR$, and replaces
//! it by $RQ$ plus the shift, which is a unitary similarity transform. Once the last subdiagonal
//! entry becomes negligible, the bottom right entry is an eigenvalue and the active block shrinks
//! by one. Once the entry above it becomes negligible instead, the bottom right $2 \times 2$ block
//! is solved in closed form and the active block shrinks by two.

use super::{
    block22::{eigenvalues_2x2, jordan_basis_2x2},
    sort_by_magnitude, ComputeVectors, EvdError,
};
use crate::{linalg::qr::qr, ComplexField, Mat};

/// Output of [`iterate_until_triangular`].
#[derive(Clone, Debug)]
pub struct Triangularized<E> {
    /// Eigenvalues, sorted by magnitude.
    pub values: Vec<E>,
    /// The transform $C = Q S$, where $Q$ is the accumulated unitary similarity and $S$ is the
    /// block diagonal matrix of the Jordan bases of the deflated blocks, so that $C^{-1} H C$ is
    /// upper triangular.
    pub basis: Option<Mat<E>>,
}

/// Returns the $n \times n$ matrix that equals `q` in its top left block and the identity
/// elsewhere.
pub fn embed_in_identity<E: ComplexField>(q: &Mat<E>, n: usize) -> Mat<E> {
    let m = q.nrows();
    Mat::from_fn(n, n, |i, j| {
        if i < m && j < m {
            q.read(i, j)
        } else if i == j {
            E::one()
        } else {
            E::zero()
        }
    })
}

/// Returns the block diagonal matrix whose diagonal blocks are `blocks`, from top left to bottom
/// right.
pub fn block_diagonal<E: ComplexField>(blocks: &[Mat<E>], n: usize) -> Mat<E> {
    let mut out = Mat::<E>::zeros(n, n);
    let mut offset = 0;
    for block in blocks {
        for j in 0..block.ncols() {
            for i in 0..block.nrows() {
                out.write(offset + i, offset + j, block.read(i, j));
            }
        }
        offset += block.nrows();
    }
    out
}

/// Runs the shifted QR iteration on the Hessenberg matrix `h` until every eigenvalue has been
/// deflated.
///
/// Fails with [`EvdError::NoConvergence`] once more than `max_sweeps` consecutive sweeps pass
/// without any deflation, and with [`EvdError::ComplexSpectrum`] when a deflated $2 \times 2$
/// block of a real matrix has non-real eigenvalues.
pub fn iterate_until_triangular<E: ComplexField>(
    h: &Mat<E>,
    epsilon: E::Real,
    compute_vectors: ComputeVectors,
    max_sweeps: usize,
) -> Result<Triangularized<E>, EvdError<E>> {
    let size = h.nrows();
    let track = compute_vectors == ComputeVectors::Yes;

    let mut arr = h.clone();
    let mut n = size;
    let mut values = Vec::with_capacity(size);

    // jordan bases of the deflated blocks, from top left to bottom right
    let mut bases: Vec<Mat<E>> = Vec::new();
    let mut q_total = track.then(|| Mat::<E>::identity(size, size));
    let mut q_partial = track.then(|| Mat::<E>::identity(size, size));

    let mut sweeps_since_deflation = 0usize;
    let mut total_sweeps = 0usize;

    while n > 0 {
        if sweeps_since_deflation >= max_sweeps + 1 {
            sort_by_magnitude(&mut values);
            log::debug!(
                "shifted QR stalled after {total_sweeps} sweeps with {n} of {size} eigenvalues left"
            );
            return Err(EvdError::NoConvergence { values });
        }
        sweeps_since_deflation += 1;
        total_sweeps += 1;

        let shift = arr.read(n - 1, n - 1);
        for i in 0..n {
            arr.write(i, i, arr.read(i, i) - shift);
        }
        let factors = qr(&arr);
        arr = &factors.r * &factors.q;
        for i in 0..n {
            arr.write(i, i, arr.read(i, i) + shift);
        }
        if let Some(q_partial) = &mut q_partial {
            *q_partial = &*q_partial * &factors.q;
        }

        if n == 1 || arr.read(n - 1, n - 2).abs() < epsilon {
            values.push(arr.read(n - 1, n - 1));
            log::debug!("deflated a 1x1 block at size {n} after {sweeps_since_deflation} sweeps");
            sweeps_since_deflation = 0;

            if let (Some(q_total), Some(q_partial)) = (&mut q_total, &mut q_partial) {
                bases.insert(0, Mat::identity(1, 1));
                *q_total = &*q_total * &embed_in_identity(q_partial, size);
                *q_partial = Mat::identity(n - 1, n - 1);
            }

            n -= 1;
            arr = arr.submatrix(0, 0, n, n);
        } else if n == 2 || arr.read(n - 2, n - 3).abs() < epsilon {
            let a = arr.read(n - 2, n - 2);
            let b = arr.read(n - 2, n - 1);
            let c = arr.read(n - 1, n - 2);
            let d = arr.read(n - 1, n - 1);

            let (l1, l2) = eigenvalues_2x2(a, b, c, d).ok_or(EvdError::ComplexSpectrum)?;
            values.push(l1);
            values.push(l2);
            log::debug!("deflated a 2x2 block at size {n} after {sweeps_since_deflation} sweeps");
            sweeps_since_deflation = 0;

            if let (Some(q_total), Some(q_partial)) = (&mut q_total, &mut q_partial) {
                bases.insert(0, jordan_basis_2x2(a, b, c, d, l1, l2, epsilon));
                *q_total = &*q_total * &embed_in_identity(q_partial, size);
                *q_partial = Mat::identity(n - 2, n - 2);
            }

            n -= 2;
            arr = arr.submatrix(0, 0, n, n);
        }
    }

    sort_by_magnitude(&mut values);

    let basis = q_total.map(|q_total| &q_total * &block_diagonal(&bases, size));
    Ok(Triangularized { values, basis })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{c64, linalg::lu::inverse, mat};
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn embed() {
        let q = mat![[0.0, 1.0], [1.0, 0.0f64]];
        let e = embed_in_identity(&q, 3);
        assert!(e == mat![[0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        assert!(embed_in_identity(&q, 2) == q);
    }

    #[test]
    fn block_diag() {
        let blocks = vec![mat![[2.0]], mat![[1.0, 2.0], [3.0, 4.0f64]]];
        let d = block_diagonal(&blocks, 3);
        assert!(d == mat![[2.0, 0.0, 0.0], [0.0, 1.0, 2.0], [0.0, 3.0, 4.0]]);
    }

    #[test]
    fn triangular_input() {
        let h = mat![[1.0, 2.0, 3.0], [0.0, 4.0, 5.0], [0.0, 0.0, 6.0f64]];
        let out = iterate_until_triangular(&h, 1e-12, ComputeVectors::No, 100).unwrap();
        assert!(out.basis.is_none());
        let expected = [1.0, 4.0, 6.0];
        for (v, e) in out.values.iter().zip(expected) {
            assert_approx_eq!(*v, e, 1e-10);
        }
    }

    #[test]
    fn basis_triangularizes() {
        // unreduced symmetric tridiagonal, so the spectrum is real and simple
        let h = mat![
            [4.0, 1.0, 0.0, 0.0],
            [1.0, 3.0, 1.0, 0.0],
            [0.0, 1.0, 2.0, 1.0],
            [0.0, 0.0, 1.0, 1.0f64],
        ];
        let out = iterate_until_triangular(&h, 1e-12, ComputeVectors::Yes, 100).unwrap();
        let c = out.basis.unwrap();
        let u = &(&inverse(&c).unwrap() * &h) * &c;
        for j in 0..4 {
            for i in j + 1..4 {
                assert_approx_eq!(u.read(i, j), 0.0, 1e-8);
            }
        }

        let trace: f64 = out.values.iter().sum();
        assert_approx_eq!(trace, 10.0, 1e-9);
    }

    #[test]
    fn real_block_with_complex_pair() {
        let h = mat![[0.0, 1.0], [-1.0, 0.0f64]];
        let err = iterate_until_triangular(&h, 1e-12, ComputeVectors::Yes, 100).unwrap_err();
        assert!(err == EvdError::ComplexSpectrum);

        let h = h.map(|&x| c64::new(x, 0.0));
        let out = iterate_until_triangular(&h, 1e-12, ComputeVectors::Yes, 100).unwrap();
        assert_approx_eq!(out.values[0].im, 1.0);
        assert_approx_eq!(out.values[1].im, -1.0);
    }

    #[test]
    fn cyclic_permutation_stalls() {
        let h = mat![[0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0f64]];
        let err = iterate_until_triangular(&h, 1e-12, ComputeVectors::No, 100).unwrap_err();
        match err {
            EvdError::NoConvergence { values } => assert!(values.len() < 3),
            EvdError::ComplexSpectrum => panic!(),
        }
    }
}
