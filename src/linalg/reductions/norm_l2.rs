use crate::ComplexField;

/// Returns the euclidean norm of `data`.
///
/// The sum of squares is computed on values scaled by the largest magnitude, so that it neither
/// overflows nor underflows for representable inputs.
pub fn norm_l2<E: ComplexField>(data: &[E]) -> E::Real {
    let zero = E::Real::zero();

    let mut max = zero;
    for &x in data {
        let abs = x.abs();
        if abs > max {
            max = abs;
        }
    }
    if max == zero || !max.is_finite() {
        return max;
    }

    let max_inv = max.inv();
    let mut acc = zero;
    for &x in data {
        acc = acc + x.scale_real(max_inv).abs2();
    }
    acc.sqrt() * max
}

/// Returns `data` divided by its euclidean norm, or `None` if the norm is zero.
pub fn normalize<E: ComplexField>(data: &[E]) -> Option<Vec<E>> {
    let norm = norm_l2(data);
    if norm == E::Real::zero() {
        return None;
    }
    let norm_inv = norm.inv();
    Some(data.iter().map(|&x| x.scale_real(norm_inv)).collect())
}
