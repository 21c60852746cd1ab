//! Scalar fields used by `eigs`.
//!
//! This crate contains:
//! - the [`ComplexField`] and [`RealField`] traits that the eigenvalue routines are generic over,
//! - their implementations for [`f64`], [`c64`] and the extended precision real [`DoubleF64`].

#![warn(rust_2018_idioms)]

use core::{
    fmt::Debug,
    ops::{Add, Div, Mul, Neg, Sub},
};

mod double;

pub use double::{Double, DoubleF64};

/// Complex floating point number type, where the real and imaginary parts each occupy 64 bits.
#[allow(non_camel_case_types)]
pub type c64 = num_complex::Complex<f64>;

/// Trait that describes a complex number field.
///
/// Real numbers can also be seen as complex numbers, where the imaginary part is always zero.
///
/// # Note
///
/// The implementation currently implies [`Copy`], since every supported scalar is a small plain
/// value.
pub trait ComplexField:
    Copy
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Send
    + Sync
    + Debug
    + 'static
{
    type Real: RealField;

    /// `true` if the imaginary part of every value of this type is zero.
    const IS_REAL: bool;

    /// Returns a complex number whose real part is equal to `real`, and a zero imaginary part.
    fn from_real(real: Self::Real) -> Self;
    /// Returns the real and imaginary part.
    fn into_real_imag(self) -> (Self::Real, Self::Real);
    /// Returns the real part.
    #[inline(always)]
    fn real(self) -> Self::Real {
        self.into_real_imag().0
    }
    /// Returns the imaginary part.
    #[inline(always)]
    fn imag(self) -> Self::Real {
        self.into_real_imag().1
    }

    /// Returns the value representing `0.0`.
    fn zero() -> Self;
    /// Returns the value representing `1.0`.
    fn one() -> Self;

    /// Returns the closest value to `value`.
    #[inline(always)]
    fn from_f64(value: f64) -> Self {
        Self::from_real(Self::Real::from_f64(value))
    }

    /// Returns the inverse of the number.
    fn inv(self) -> Self;
    /// Returns the conjugate of the number.
    fn conj(self) -> Self;
    /// Returns the square root of the number.
    ///
    /// For real fields, the result for negative inputs is unspecified. Use [`Self::try_sqrt`]
    /// when the input may be negative.
    fn sqrt(self) -> Self;
    /// Returns the square root of the number, or `None` if it does not belong to the field.
    fn try_sqrt(self) -> Option<Self>;
    /// Returns the input, scaled by `factor`.
    #[inline(always)]
    fn scale_real(self, factor: Self::Real) -> Self {
        self * Self::from_real(factor)
    }

    /// Returns the squared norm of the number.
    #[inline(always)]
    fn abs2(self) -> Self::Real {
        let (re, im) = self.into_real_imag();
        re * re + im * im
    }
    /// Returns the norm of the number.
    #[inline(always)]
    fn abs(self) -> Self::Real {
        self.abs2().sqrt()
    }

    /// Returns `true` if both parts of the number are finite.
    fn is_finite(self) -> bool;

    /// Radix used when rescaling rows and columns of a matrix over this field.
    ///
    /// The default radix of 2 matches binary floating point, so scaling by its powers only
    /// changes exponents.
    #[inline(always)]
    fn balance_radix() -> Self::Real {
        Self::Real::from_f64(2.0)
    }
}

/// Trait that describes a real number field.
pub trait RealField: ComplexField<Real = Self> + PartialOrd {
    /// Returns the distance between `1.0` and the next representable value.
    fn epsilon() -> Self;
    /// Returns the closest `f64` to the number.
    fn to_f64(self) -> f64;
}

impl RealField for f64 {
    #[inline(always)]
    fn epsilon() -> Self {
        f64::EPSILON
    }

    #[inline(always)]
    fn to_f64(self) -> f64 {
        self
    }
}

impl ComplexField for f64 {
    type Real = f64;

    const IS_REAL: bool = true;

    #[inline(always)]
    fn from_real(real: Self::Real) -> Self {
        real
    }

    #[inline(always)]
    fn into_real_imag(self) -> (Self::Real, Self::Real) {
        (self, 0.0)
    }

    #[inline(always)]
    fn zero() -> Self {
        0.0
    }

    #[inline(always)]
    fn one() -> Self {
        1.0
    }

    #[inline(always)]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline(always)]
    fn inv(self) -> Self {
        1.0 / self
    }

    #[inline(always)]
    fn conj(self) -> Self {
        self
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    #[inline(always)]
    fn try_sqrt(self) -> Option<Self> {
        if self < 0.0 {
            None
        } else {
            Some(f64::sqrt(self))
        }
    }

    #[inline(always)]
    fn abs2(self) -> Self::Real {
        self * self
    }

    #[inline(always)]
    fn abs(self) -> Self::Real {
        f64::abs(self)
    }

    #[inline(always)]
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
}

impl ComplexField for c64 {
    type Real = f64;

    const IS_REAL: bool = false;

    #[inline(always)]
    fn from_real(real: Self::Real) -> Self {
        c64 { re: real, im: 0.0 }
    }

    #[inline(always)]
    fn into_real_imag(self) -> (Self::Real, Self::Real) {
        (self.re, self.im)
    }

    #[inline(always)]
    fn zero() -> Self {
        c64 { re: 0.0, im: 0.0 }
    }

    #[inline(always)]
    fn one() -> Self {
        c64 { re: 1.0, im: 0.0 }
    }

    #[inline(always)]
    fn inv(self) -> Self {
        1.0 / self
    }

    #[inline(always)]
    fn conj(self) -> Self {
        c64 {
            re: self.re,
            im: -self.im,
        }
    }

    /// Principal square root. Both signed zeros of the imaginary part map the negative real axis
    /// to the positive imaginary axis.
    #[inline(always)]
    fn sqrt(self) -> Self {
        if self.im == 0.0 {
            if self.re >= 0.0 {
                c64 {
                    re: self.re.sqrt(),
                    im: 0.0,
                }
            } else {
                c64 {
                    re: 0.0,
                    im: (-self.re).sqrt(),
                }
            }
        } else {
            c64::sqrt(self)
        }
    }

    #[inline(always)]
    fn try_sqrt(self) -> Option<Self> {
        Some(ComplexField::sqrt(self))
    }

    #[inline(always)]
    fn abs(self) -> Self::Real {
        self.norm()
    }

    #[inline(always)]
    fn is_finite(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}

impl RealField for DoubleF64 {
    #[inline(always)]
    fn epsilon() -> Self {
        Self::EPSILON
    }

    #[inline(always)]
    fn to_f64(self) -> f64 {
        self.0 + self.1
    }
}

impl ComplexField for DoubleF64 {
    type Real = DoubleF64;

    const IS_REAL: bool = true;

    #[inline(always)]
    fn from_real(real: Self::Real) -> Self {
        real
    }

    #[inline(always)]
    fn into_real_imag(self) -> (Self::Real, Self::Real) {
        (self, Self::ZERO)
    }

    #[inline(always)]
    fn zero() -> Self {
        Self::ZERO
    }

    #[inline(always)]
    fn one() -> Self {
        Double(1.0, 0.0)
    }

    #[inline(always)]
    fn from_f64(value: f64) -> Self {
        Double(value, 0.0)
    }

    #[inline(always)]
    fn inv(self) -> Self {
        self.recip()
    }

    #[inline(always)]
    fn conj(self) -> Self {
        self
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        DoubleF64::sqrt(self)
    }

    #[inline(always)]
    fn try_sqrt(self) -> Option<Self> {
        if self < Self::ZERO {
            None
        } else {
            Some(DoubleF64::sqrt(self))
        }
    }

    #[inline(always)]
    fn abs2(self) -> Self::Real {
        self * self
    }

    #[inline(always)]
    fn abs(self) -> Self::Real {
        DoubleF64::abs(self)
    }

    #[inline(always)]
    fn is_finite(self) -> bool {
        self.0.is_finite() && self.1.is_finite()
    }

    /// Decimal radix. Scaling by its powers rounds in binary, within the double-double
    /// precision.
    #[inline(always)]
    fn balance_radix() -> Self::Real {
        Double(10.0, 0.0)
    }
}
