use crate::{c64, DoubleF64};

/// Dynamically typed matrix entry accepted by [`eigs`](crate::eigs()).
///
/// Only the numeric variants are supported by the eigenvalue routines. The other variants exist so
/// that heterogeneous input can be passed as is and rejected with a precise error.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Machine precision real number.
    Real(f64),
    /// Exact fraction, converted to the closest machine precision real number.
    Fraction { numer: i64, denom: i64 },
    /// Extended precision real number.
    Extended(DoubleF64),
    /// Machine precision complex number.
    Complex(c64),
    /// Boolean, unsupported.
    Bool(bool),
    /// String, unsupported.
    Str(String),
}

impl Value {
    /// Returns a short name of the kind of value, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Real(_) => "real",
            Value::Fraction { .. } => "fraction",
            Value::Extended(_) => "extended",
            Value::Complex(_) => "complex",
            Value::Bool(_) => "boolean",
            Value::Str(_) => "string",
        }
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(value: i32) -> Self {
        Value::Real(value as f64)
    }
}

impl From<DoubleF64> for Value {
    #[inline]
    fn from(value: DoubleF64) -> Self {
        Value::Extended(value)
    }
}

impl From<c64> for Value {
    #[inline]
    fn from(value: c64) -> Self {
        Value::Complex(value)
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

/// Numeric entry after coercion.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Scalar {
    Real(f64),
    Extended(DoubleF64),
    Complex(c64),
}

impl Scalar {
    /// Converts `value`, or returns `None` if it is not a supported number.
    pub(crate) fn from_value(value: &Value) -> Option<Self> {
        match *value {
            Value::Real(x) => Some(Scalar::Real(x)),
            Value::Fraction { numer, denom } => {
                if denom == 0 {
                    None
                } else {
                    Some(Scalar::Real(numer as f64 / denom as f64))
                }
            }
            Value::Extended(x) => Some(Scalar::Extended(x)),
            Value::Complex(z) => Some(Scalar::Complex(z)),
            Value::Bool(_) | Value::Str(_) => None,
        }
    }

    /// Returns `true` unless the imaginary part has a magnitude of at least `precision`.
    #[inline]
    pub(crate) fn is_real(self, precision: f64) -> bool {
        match self {
            Scalar::Real(_) | Scalar::Extended(_) => true,
            Scalar::Complex(z) => z.im.abs() < precision,
        }
    }

    #[inline]
    pub(crate) fn to_f64(self) -> f64 {
        match self {
            Scalar::Real(x) => x,
            Scalar::Extended(x) => x.into(),
            Scalar::Complex(z) => z.re,
        }
    }

    #[inline]
    pub(crate) fn to_extended(self) -> DoubleF64 {
        match self {
            Scalar::Real(x) => DoubleF64::from(x),
            Scalar::Extended(x) => x,
            Scalar::Complex(z) => DoubleF64::from(z.re),
        }
    }

    #[inline]
    pub(crate) fn to_c64(self) -> c64 {
        match self {
            Scalar::Real(x) => c64::new(x, 0.0),
            Scalar::Extended(x) => c64::new(x.into(), 0.0),
            Scalar::Complex(z) => z,
        }
    }
}
