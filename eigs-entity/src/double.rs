use core::fmt;

/// Unevaluated sum of two values, `hi + lo`, with `|lo| <= ulp(hi) / 2`.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Double<T>(pub T, pub T);

/// Extended precision real number with roughly 32 significant decimal digits.
pub type DoubleF64 = Double<f64>;

#[inline(always)]
fn quick_two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let err = b - (s - a);
    (s, err)
}

#[inline(always)]
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bb = s - a;

    // (a - (s - bb)) + (b - bb)
    let err = (a - (s - bb)) + (b - bb);
    (s, err)
}

#[inline(always)]
fn two_diff(a: f64, b: f64) -> (f64, f64) {
    let s = a - b;
    let bb = s - a;

    // (a - (s - bb)) - (b + bb)
    let err = (a - (s - bb)) - (b + bb);
    (s, err)
}

#[inline(always)]
fn two_prod(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    let err = f64::mul_add(a, b, -p);
    (p, err)
}

impl DoubleF64 {
    /// 2.0^{-100}
    pub const EPSILON: Self = Self(7.888609052210118e-31, 0.0);
    pub const ZERO: Self = Self(0.0, 0.0);
    pub const ONE: Self = Self(1.0, 0.0);
    pub const NAN: Self = Self(f64::NAN, f64::NAN);
    pub const INFINITY: Self = Self(f64::INFINITY, f64::INFINITY);

    #[inline(always)]
    pub fn abs(self) -> Self {
        if self.0 < 0.0 {
            -self
        } else {
            self
        }
    }

    #[inline(always)]
    pub fn recip(self) -> Self {
        Self::ONE / self
    }

    #[inline(always)]
    fn mul_f64(self, b: f64) -> Self {
        let (p1, p2) = two_prod(self.0, b);
        let p2 = p2 + self.1 * b;
        let (p1, p2) = quick_two_sum(p1, p2);
        Double(p1, p2)
    }

    #[inline]
    pub fn sqrt(self) -> Self {
        if self == Self::ZERO {
            Self::ZERO
        } else if self < Self::ZERO {
            Self::NAN
        } else if self == Self::INFINITY {
            Self::INFINITY
        } else {
            let a = self;
            let x = a.0.sqrt().recip();
            let ax = Self(a.0 * x, 0.0);

            ax + (a - ax * ax) * Double(x * 0.5, 0.0)
        }
    }
}

impl From<f64> for DoubleF64 {
    #[inline(always)]
    fn from(value: f64) -> Self {
        Double(value, 0.0)
    }
}

impl From<DoubleF64> for f64 {
    #[inline(always)]
    fn from(value: DoubleF64) -> Self {
        value.0 + value.1
    }
}

impl fmt::Display for DoubleF64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:e} + {:e}", self.0, self.1)
    }
}

impl core::ops::Add for DoubleF64 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        let (s, e) = two_sum(self.0, rhs.0);
        let e = e + (self.1 + rhs.1);
        let (s, e) = quick_two_sum(s, e);
        Double(s, e)
    }
}

impl core::ops::Sub for DoubleF64 {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        let (s, e) = two_diff(self.0, rhs.0);
        let e = e + self.1;
        let e = e - rhs.1;
        let (s, e) = quick_two_sum(s, e);
        Double(s, e)
    }
}

impl core::ops::Mul for DoubleF64 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        let (p1, p2) = two_prod(self.0, rhs.0);
        let p2 = p2 + (self.0 * rhs.1 + self.1 * rhs.0);
        let (p1, p2) = quick_two_sum(p1, p2);
        Double(p1, p2)
    }
}

impl core::ops::Div for DoubleF64 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self::Output {
        let (a, b) = (self, rhs);
        if b == Self::ZERO {
            return if a == Self::ZERO {
                Self::NAN
            } else {
                let inf = f64::INFINITY.copysign(a.0) * 1.0f64.copysign(b.0);
                Double(inf, inf)
            };
        }
        if b.0.is_infinite() {
            return if a.0.is_infinite() {
                Self::NAN
            } else {
                Self::ZERO
            };
        }

        let q1 = a.0 / b.0;
        let r = b.mul_f64(q1);

        let (s1, s2) = two_diff(a.0, r.0);
        let s2 = s2 - r.1;
        let s2 = s2 + a.1;

        let q2 = (s1 + s2) / b.0;
        let (r0, r1) = quick_two_sum(q1, q2);
        Double(r0, r1)
    }
}

impl core::ops::Neg for DoubleF64 {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self::Output {
        Self(-self.0, -self.1)
    }
}

impl core::ops::AddAssign for DoubleF64 {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl core::ops::SubAssign for DoubleF64 {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl core::ops::MulAssign for DoubleF64 {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl core::ops::DivAssign for DoubleF64 {
    #[inline(always)]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_third_keeps_more_digits_than_f64() {
        let third = DoubleF64::ONE / Double(3.0, 0.0);
        let back = third * Double(3.0, 0.0);
        let err = (back - DoubleF64::ONE).abs();
        assert!(err < Double(1e-30, 0.0));
        assert!(third.1 != 0.0);
    }

    #[test]
    fn sqrt_two_squared() {
        let two = Double(2.0, 0.0);
        let root = two.sqrt();
        let err = (root * root - two).abs();
        assert!(err < Double(1e-30, 0.0));
    }

    #[test]
    fn sqrt_special_values() {
        assert_eq!(DoubleF64::ZERO.sqrt(), DoubleF64::ZERO);
        assert!(Double(-1.0, 0.0).sqrt().0.is_nan());
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(Double(1.0, 0.0) < Double(1.0, 1e-20));
        assert!(Double(1.0, 1e-20) < Double(2.0, -1e-20));
        assert!(Double(-1.0, 0.0).abs() == Double(1.0, 0.0));
    }

    #[test]
    fn division_by_zero() {
        let q = Double(1.0, 0.0) / DoubleF64::ZERO;
        assert!(q.0.is_infinite() && q.0 > 0.0);
        assert!((DoubleF64::ZERO / DoubleF64::ZERO).0.is_nan());
    }
}
