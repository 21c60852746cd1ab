//! Recovery of the eigenvectors of a matrix from its triangularization.
//!
//! Given the reduced matrix $H = R M R^{-1}$ and a basis $C$ such that $U = C^{-1} H C$ is upper
//! triangular, the eigenvectors of $M$ associated with $\lambda$ are the vectors $R^{-1} C x$ for
//! the nonzero solutions $x$ of $(U - \lambda I) x = 0$.

use super::{EvdParams, Eigenvector, InverseIterationParams};
use crate::{
    linalg::{
        lu::inverse,
        matmul::{inner_prod::inner_prod_with_conj, matvec},
        reductions::{norm_l2, normalize},
        triangular_solve::{solve_upper_triangular, solve_upper_triangular_all},
    },
    ComplexField, Conj, Mat,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Returns the distinct values of `values` along with their multiplicities, in order of first
/// appearance. Two values are considered equal when their distance is below `epsilon`.
pub fn group_by_value<E: ComplexField>(values: &[E], epsilon: E::Real) -> Vec<(E, usize)> {
    let mut groups: Vec<(E, usize)> = Vec::new();
    for &value in values {
        match groups
            .iter_mut()
            .find(|(representative, _)| (*representative - value).abs() < epsilon)
        {
            Some((_, multiplicity)) => *multiplicity += 1,
            None => groups.push((value, 1)),
        }
    }
    groups
}

/// Computes the eigenvectors of $M$ from the reduced matrix `h`, the reduction transform `r` and
/// the triangularizing basis `c`.
///
/// Each distinct value of `values` contributes at most as many eigenvectors as its multiplicity.
/// If `c` is numerically singular, no eigenvectors are returned.
pub fn reconstruct_eigenvectors<E: ComplexField>(
    h: &Mat<E>,
    r: &Mat<E>,
    c: &Mat<E>,
    values: &[E],
    epsilon: E::Real,
    params: &EvdParams,
) -> Vec<Eigenvector<E>> {
    let n = h.nrows();

    let (c_inv, r_inv) = match (inverse(c), inverse(r)) {
        (Ok(c_inv), Ok(r_inv)) => (c_inv, r_inv),
        (Err(err), _) | (_, Err(err)) => {
            log::warn!(
                "eigenvector basis could not be inverted ({err}), returning no eigenvectors"
            );
            return Vec::new();
        }
    };

    let u = &(&c_inv * h) * c;
    let correction = &r_inv * c;

    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let zero_rhs = vec![E::zero(); n];
    let mut eigenvectors = Vec::with_capacity(n);

    for (value, multiplicity) in group_by_value(values, epsilon) {
        let mut shifted = u.clone();
        for i in 0..n {
            shifted.write(i, i, shifted.read(i, i) - value);
        }

        let mut solutions = solve_upper_triangular_all(&shifted, &zero_rhs, epsilon);
        // the first solution is the trivial one
        if !solutions.is_empty() {
            solutions.remove(0);
        }

        while solutions.len() < multiplicity {
            match inverse_iterate(
                &shifted,
                &solutions,
                epsilon,
                &params.inverse_iteration,
                &mut rng,
            ) {
                Some(solution) => solutions.push(solution),
                None => {
                    log::debug!(
                        "eigenvalue {value:?} of multiplicity {multiplicity} has {} eigenvectors",
                        solutions.len()
                    );
                    break;
                }
            }
        }

        for solution in solutions {
            eigenvectors.push(Eigenvector {
                value,
                vector: matvec(&correction, &solution),
            });
        }
    }

    eigenvectors
}

/// Returns an orthonormal basis of the span of `vectors`, by modified Gram-Schmidt.
///
/// A vector whose component orthogonal to the previous ones is smaller than `epsilon` times its
/// norm is considered dependent and skipped.
fn orthonormalize<E: ComplexField>(vectors: &[Vec<E>], epsilon: E::Real) -> Vec<Vec<E>> {
    let mut basis: Vec<Vec<E>> = Vec::with_capacity(vectors.len());
    for v in vectors {
        let w = project_out(v, &basis);
        if norm_l2(&w) < epsilon * norm_l2(v) {
            continue;
        }
        if let Some(q) = normalize(&w) {
            basis.push(q);
        }
    }
    basis
}

/// Returns `v` minus its orthogonal projection on the span of the orthonormal `basis`.
fn project_out<E: ComplexField>(v: &[E], basis: &[Vec<E>]) -> Vec<E> {
    let mut v = v.to_vec();
    for q in basis {
        let proj = inner_prod_with_conj(q, Conj::Yes, &v, Conj::No);
        for (vi, &qi) in v.iter_mut().zip(q) {
            *vi = *vi - proj * qi;
        }
    }
    v
}

/// Looks for a solution of $Sx = 0$ outside the span of `found`, where `shifted` is the upper
/// triangular matrix $S$.
///
/// Random starting directions orthogonal to `found` are amplified by solving with $S$, and the
/// first one that grows by more than `params.min_amplification` is refined until its direction
/// stops changing.
fn inverse_iterate<E: ComplexField>(
    shifted: &Mat<E>,
    found: &[Vec<E>],
    epsilon: E::Real,
    params: &InverseIterationParams,
    rng: &mut StdRng,
) -> Option<Vec<E>> {
    let n = shifted.nrows();
    let basis = orthonormalize(found, epsilon);
    let min_amplification = E::Real::from_f64(params.min_amplification);

    let mut amplified = None;
    for _ in 0..params.max_attempts {
        let start: Vec<E> = (0..n)
            .map(|_| E::from_f64(rng.gen_range(-1.0..1.0)))
            .collect();
        let Some(start) = normalize(&project_out(&start, &basis)) else {
            continue;
        };

        let Ok(x) = solve_upper_triangular(shifted, &start) else {
            continue;
        };
        if norm_l2(&x) > min_amplification {
            amplified = Some(x);
            break;
        }
    }

    let mut b = normalize(&amplified?)?;
    for _ in 0..params.max_refinements {
        let c = normalize(&solve_upper_triangular(shifted, &b).ok()?)?;

        let proj = inner_prod_with_conj(&b, Conj::Yes, &c, Conj::No);
        let change: Vec<E> = c.iter().zip(&b).map(|(&ci, &bi)| ci - proj * bi).collect();
        if norm_l2(&change) < epsilon {
            // a direction already spanned by `found` adds nothing
            if norm_l2(&project_out(&c, &basis)) < epsilon.sqrt() {
                return None;
            }
            return Some(c);
        }
        b = c;
    }

    None
}
