//! Dynamically typed entry point.
//!
//! [`eigs`] accepts any matrix whose entries convert to [`Value`], chooses the scalar field the
//! computation runs in, and routes the matrix to the appropriate solver:
//!
//! - entries are coerced to machine precision reals when possible, to extended precision reals
//!   when some entries are extended precision, and to complex numbers when some entries have a
//!   non negligible imaginary part,
//! - real symmetric matrices are handed to [`compute_symmetric_evd`], everything else to
//!   [`compute_evd`],
//! - a real matrix that turns out to have non-real eigenvalues is solved again over the complex
//!   numbers.

use crate::{
    c64,
    linalg::evd::{
        compute_evd, compute_symmetric_evd, ComputeVectors, Eigen, Eigenvector, EvdError,
        EvdParams,
    },
    ComplexField, Config, DoubleF64, Mat, RealField,
};

mod value;

pub(crate) use value::Scalar;
pub use value::Value;

/// Scalar field an eigenvalue computation runs in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalarDomain {
    /// [`f64`].
    Real,
    /// [`DoubleF64`].
    Extended,
    /// [`c64`].
    Complex,
}

/// Options of [`eigs`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EigsOptions {
    /// Magnitude below which a value is treated as zero. Defaults to [`Config::rel_tol`].
    pub precision: Option<f64>,
    /// Whether the eigenvectors are computed.
    pub eigenvectors: bool,
    /// Tuning parameters of the general solver.
    pub params: EvdParams,
}

impl Default for EigsOptions {
    #[inline]
    fn default() -> Self {
        Self {
            precision: None,
            eigenvectors: true,
            params: EvdParams::default(),
        }
    }
}

impl From<f64> for EigsOptions {
    /// Options with the given precision.
    #[inline]
    fn from(precision: f64) -> Self {
        Self {
            precision: Some(precision),
            ..Default::default()
        }
    }
}

impl EigsOptions {
    /// Options whose precision is the relative tolerance of `config`.
    #[inline]
    pub fn from_config(config: &Config) -> Self {
        Self {
            precision: Some(config.rel_tol),
            ..Default::default()
        }
    }

    #[inline]
    pub fn with_precision(self, precision: f64) -> Self {
        Self {
            precision: Some(precision),
            ..self
        }
    }

    #[inline]
    pub fn with_eigenvectors(self, eigenvectors: bool) -> Self {
        Self {
            eigenvectors,
            ..self
        }
    }

    #[inline]
    pub fn with_params(self, params: EvdParams) -> Self {
        Self { params, ..self }
    }
}

/// Result of [`eigs`], in the scalar field the computation ran in.
#[derive(Clone, Debug, PartialEq)]
pub enum Eigs {
    Real(Eigen<f64>),
    Extended(Eigen<DoubleF64>),
    Complex(Eigen<c64>),
}

impl Eigs {
    /// Returns the scalar field of the result.
    #[inline]
    pub fn domain(&self) -> ScalarDomain {
        match self {
            Eigs::Real(_) => ScalarDomain::Real,
            Eigs::Extended(_) => ScalarDomain::Extended,
            Eigs::Complex(_) => ScalarDomain::Complex,
        }
    }

    /// Returns the number of eigenvalues.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Eigs::Real(eigen) => eigen.values.len(),
            Eigs::Extended(eigen) => eigen.values.len(),
            Eigs::Complex(eigen) => eigen.values.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the result converted to machine precision complex numbers.
    pub fn to_complex(&self) -> Eigen<c64> {
        match self {
            Eigs::Real(eigen) => widen(eigen, |x| c64::new(x, 0.0)),
            Eigs::Extended(eigen) => widen(eigen, |x| c64::new(x.into(), 0.0)),
            Eigs::Complex(eigen) => eigen.clone(),
        }
    }
}

fn widen<E: Copy>(eigen: &Eigen<E>, f: impl Fn(E) -> c64) -> Eigen<c64> {
    Eigen {
        values: eigen.values.iter().map(|&x| f(x)).collect(),
        eigenvectors: eigen.eigenvectors.as_ref().map(|eigenvectors| {
            eigenvectors
                .iter()
                .map(|pair| Eigenvector {
                    value: f(pair.value),
                    vector: pair.vector.iter().map(|&x| f(x)).collect(),
                })
                .collect()
        }),
    }
}

/// Errors of [`eigs`].
#[derive(Clone, Debug, PartialEq)]
pub enum EigsError {
    /// The matrix is not square.
    NotSquare { nrows: usize, ncols: usize },
    /// The entry at `(row, col)` is not a supported number.
    UnsupportedType {
        row: usize,
        col: usize,
        kind: &'static str,
    },
    /// The QR iteration stopped deflating. `partial` contains the eigenvalues that were found,
    /// and no eigenvectors.
    NoConvergence { partial: Eigs },
}

impl core::fmt::Display for EigsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EigsError::NotSquare { nrows, ncols } => {
                write!(f, "matrix must be square (size: {nrows}x{ncols})")
            }
            EigsError::UnsupportedType { row, col, kind } => {
                write!(f, "unsupported {kind} value at ({row}, {col})")
            }
            EigsError::NoConvergence { partial } => write!(
                f,
                "the eigenvalue iteration did not converge ({} eigenvalues found)",
                partial.len()
            ),
        }
    }
}

impl std::error::Error for EigsError {}

/// Computes the eigenvalues of `matrix`, and its eigenvectors if `options.eigenvectors` is set.
///
/// ```
/// use eigs::{c64, eigs, mat, EigsOptions, ScalarDomain};
///
/// let a = mat![[0.0, 1.0], [-1.0, 0.0]];
/// let result = eigs(&a, EigsOptions::default()).unwrap();
/// assert_eq!(result.domain(), ScalarDomain::Complex);
/// assert_eq!(result.to_complex().values, vec![c64::new(0.0, 1.0), c64::new(0.0, -1.0)]);
/// ```
pub fn eigs<V: Clone + Into<Value>>(
    matrix: &Mat<V>,
    options: EigsOptions,
) -> Result<Eigs, EigsError> {
    let (nrows, ncols) = matrix.shape();
    if nrows != ncols {
        return Err(EigsError::NotSquare { nrows, ncols });
    }
    let n = nrows;

    let precision = options
        .precision
        .unwrap_or_else(|| Config::default().rel_tol);
    let compute_vectors = if options.eigenvectors {
        ComputeVectors::Yes
    } else {
        ComputeVectors::No
    };

    let mut scalars = Vec::with_capacity(n * n);
    for col in 0..n {
        for row in 0..n {
            let value: Value = matrix.read(row, col).into();
            match Scalar::from_value(&value) {
                Some(scalar) => scalars.push(scalar),
                None => {
                    return Err(EigsError::UnsupportedType {
                        row,
                        col,
                        kind: value.kind(),
                    })
                }
            }
        }
    }
    let scalars = Mat::from_fn(n, n, |i, j| scalars[i + j * n]);

    // imaginary parts are only dropped if all of them are negligible
    let has_extended = scalars.iter().any(|s| matches!(s, Scalar::Extended(_)));
    let has_complex = scalars.iter().any(|s| !s.is_real(precision));
    let domain = match (has_extended, has_complex) {
        (true, true) => {
            log::warn!("extended precision complex numbers are not supported, falling back to c64");
            ScalarDomain::Complex
        }
        (false, true) => ScalarDomain::Complex,
        (true, false) => ScalarDomain::Extended,
        (false, false) => ScalarDomain::Real,
    };

    let solve = Solve {
        precision,
        compute_vectors,
        params: options.params,
    };

    match domain {
        ScalarDomain::Real => {
            let matrix = scalars.map(|s| s.to_f64());
            match solve.real(&matrix) {
                Ok(eigen) => Ok(Eigs::Real(eigen)),
                Err(EvdError::ComplexSpectrum) => {
                    log::debug!("real matrix has non-real eigenvalues, solving over c64");
                    solve.complex(&matrix.map(|&x| c64::new(x, 0.0)))
                }
                Err(EvdError::NoConvergence { values }) => Err(no_convergence(Eigs::Real(
                    partial(values),
                ))),
            }
        }
        ScalarDomain::Extended => {
            let matrix = scalars.map(|s| s.to_extended());
            match solve.real(&matrix) {
                Ok(eigen) => Ok(Eigs::Extended(eigen)),
                Err(EvdError::ComplexSpectrum) => {
                    log::warn!(
                        "extended precision matrix has non-real eigenvalues, falling back to c64"
                    );
                    solve.complex(&matrix.map(|&x| c64::new(x.into(), 0.0)))
                }
                Err(EvdError::NoConvergence { values }) => Err(no_convergence(Eigs::Extended(
                    partial(values),
                ))),
            }
        }
        ScalarDomain::Complex => solve.complex(&scalars.map(|s| s.to_c64())),
    }
}

fn partial<E>(values: Vec<E>) -> Eigen<E> {
    Eigen {
        values,
        eigenvectors: Some(Vec::new()),
    }
}

fn no_convergence(partial: Eigs) -> EigsError {
    log::debug!(
        "eigenvalue iteration did not converge, {} eigenvalues found",
        partial.len()
    );
    EigsError::NoConvergence { partial }
}

/// Returns `true` if `|a[i][j] - a[j][i]| < epsilon` for every pair of indices.
pub(crate) fn is_symmetric<E: ComplexField>(matrix: &Mat<E>, epsilon: E::Real) -> bool {
    let n = matrix.nrows();
    for j in 0..n {
        for i in 0..j {
            if !((matrix.read(i, j) - matrix.read(j, i)).abs() < epsilon) {
                return false;
            }
        }
    }
    true
}

struct Solve {
    precision: f64,
    compute_vectors: ComputeVectors,
    params: EvdParams,
}

impl Solve {
    fn real<E: RealField>(&self, matrix: &Mat<E>) -> Result<Eigen<E>, EvdError<E>> {
        let epsilon = E::from_f64(self.precision);
        let n = matrix.nrows();
        if is_symmetric(matrix, epsilon) {
            log::debug!("solving a {n}x{n} real symmetric matrix with Jacobi rotations");
            Ok(compute_symmetric_evd(matrix, epsilon, self.compute_vectors))
        } else {
            log::debug!("solving a {n}x{n} real matrix with the shifted QR iteration");
            compute_evd(matrix, epsilon, self.compute_vectors, self.params)
        }
    }

    fn complex(&self, matrix: &Mat<c64>) -> Result<Eigs, EigsError> {
        let n = matrix.nrows();
        log::debug!("solving a {n}x{n} complex matrix with the shifted QR iteration");
        match compute_evd(matrix, self.precision, self.compute_vectors, self.params) {
            Ok(eigen) => Ok(Eigs::Complex(eigen)),
            Err(EvdError::NoConvergence { values }) => {
                Err(no_convergence(Eigs::Complex(partial(values))))
            }
            Err(EvdError::ComplexSpectrum) => {
                unreachable!("every complex number has a complex square root")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert, linalg::evd::residual, mat};
    use assert_approx_eq::assert_approx_eq;

    fn options() -> EigsOptions {
        EigsOptions::default().with_params(EvdParams {
            seed: Some(0),
            ..Default::default()
        })
    }

    #[test]
    fn not_square() {
        let a = Mat::from_fn(2, 3, |i, j| (i + j) as f64);
        assert!(eigs(&a, options()) == Err(EigsError::NotSquare { nrows: 2, ncols: 3 }));
    }

    #[test]
    fn unsupported_entries() {
        let a = mat![[Value::from(1.0), Value::from(true)], [Value::from(0.0), Value::from(1.0)]];
        assert!(
            eigs(&a, options())
                == Err(EigsError::UnsupportedType {
                    row: 0,
                    col: 1,
                    kind: "boolean"
                })
        );

        let a = mat![[Value::Fraction { numer: 1, denom: 0 }]];
        assert!(
            eigs(&a, options())
                == Err(EigsError::UnsupportedType {
                    row: 0,
                    col: 0,
                    kind: "fraction"
                })
        );
    }

    #[test]
    fn domains() {
        let a = mat![[1.0, 2.0], [3.0, 4.0f64]];
        assert!(eigs(&a, options()).unwrap().domain() == ScalarDomain::Real);

        let a = a.map(|&x| DoubleF64::from(x));
        assert!(eigs(&a, options()).unwrap().domain() == ScalarDomain::Extended);

        let a = mat![
            [c64::new(1.0, 0.0), c64::new(2.0, 1.0)],
            [c64::new(2.0, -1.0), c64::new(3.0, 0.0)],
        ];
        assert!(eigs(&a, options()).unwrap().domain() == ScalarDomain::Complex);

        // negligible imaginary parts are dropped
        let a = mat![
            [c64::new(2.0, 1e-15), c64::new(0.0, 0.0)],
            [c64::new(0.0, 0.0), c64::new(3.0, 0.0)],
        ];
        let Eigs::Real(eigen) = eigs(&a, options()).unwrap() else {
            panic!()
        };
        assert!(eigen.values == vec![2.0, 3.0]);
    }

    #[test]
    fn small_imaginary_parts_kept_in_complex_matrix() {
        let zero = c64::new(0.0, 0.0);
        let a = mat![[c64::new(2.0, 1.0), zero], [zero, c64::new(1.0, 5e-4)]];
        let Eigs::Complex(eigen) = eigs(&a, options().with_precision(1e-3)).unwrap() else {
            panic!()
        };
        assert_approx_eq!(eigen.values[0].re, 1.0, 1e-12);
        assert_approx_eq!(eigen.values[0].im, 5e-4, 1e-12);
        assert_approx_eq!(eigen.values[1].re, 2.0, 1e-12);
        assert_approx_eq!(eigen.values[1].im, 1.0, 1e-12);
        for pair in eigen.eigenvectors.as_ref().unwrap() {
            assert!(residual(&a, pair) < 1e-12);
        }
    }

    #[test]
    fn mixed_extended_and_complex_falls_back_to_c64() {
        let a = mat![
            [Value::from(DoubleF64::from(2.0)), Value::from(c64::new(0.0, 1.0))],
            [Value::from(c64::new(0.0, -1.0)), Value::from(2.0)],
        ];
        let result = eigs(&a, options()).unwrap();
        assert!(result.domain() == ScalarDomain::Complex);
        let values = result.to_complex().values;
        assert_approx_eq!(values[0].re, 1.0, 1e-10);
        assert_approx_eq!(values[1].re, 3.0, 1e-10);
    }

    #[test]
    fn fractions_and_integers() {
        let a = mat![
            [Value::Fraction { numer: 1, denom: 2 }, Value::from(0)],
            [Value::from(0), Value::from(3)],
        ];
        let Eigs::Real(eigen) = eigs(&a, options()).unwrap() else {
            panic!()
        };
        assert!(eigen.values == vec![0.5, 3.0]);
    }

    #[test]
    fn complex_promotion() {
        let a = mat![[0.0, 1.0], [-1.0, 0.0f64]];
        let Eigs::Complex(eigen) = eigs(&a, options()).unwrap() else {
            panic!()
        };
        assert!(eigen.values == vec![c64::new(0.0, 1.0), c64::new(0.0, -1.0)]);
        assert!(eigen.eigenvectors.unwrap().len() == 2);

        let a = a.map(|&x| DoubleF64::from(x));
        assert!(eigs(&a, options()).unwrap().domain() == ScalarDomain::Complex);
    }

    #[test]
    fn symmetric_detection() {
        let a = mat![[1.0, 2.0], [2.0 + 1e-14, 1.0f64]];
        assert!(is_symmetric(&a, 1e-12));
        assert!(!is_symmetric(&a, 1e-15));
    }

    #[test]
    fn no_convergence() {
        let a = mat![[0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0f64]];
        match eigs(&a, options()) {
            Err(EigsError::NoConvergence { partial }) => {
                assert!(partial.len() < 3);
                let Eigs::Real(eigen) = partial else { panic!() };
                assert!(eigen.eigenvectors == Some(Vec::new()));
            }
            _ => panic!(),
        }
    }

    #[test]
    fn options_constructors() {
        let o = EigsOptions::from(1e-6);
        assert!(o.precision == Some(1e-6));
        assert!(o.eigenvectors);

        let config = Config { rel_tol: 1e-9 };
        assert!(EigsOptions::from_config(&config).precision == Some(1e-9));
        assert!(!EigsOptions::default().with_eigenvectors(false).eigenvectors);
    }

    #[test]
    fn empty() {
        let a = Mat::<f64>::new();
        let Eigs::Real(eigen) = eigs(&a, options()).unwrap() else {
            panic!()
        };
        assert!(eigen.values.is_empty());
        assert!(eigen.eigenvectors == Some(Vec::new()));

        let eigen = eigs(&a, options().with_eigenvectors(false)).unwrap();
        assert!(eigen.is_empty());
    }

    #[test]
    fn error_display() {
        let err = EigsError::NotSquare { nrows: 2, ncols: 3 };
        assert!(err.to_string() == "matrix must be square (size: 2x3)");
        let err = EigsError::UnsupportedType {
            row: 1,
            col: 0,
            kind: "string",
        };
        assert!(err.to_string() == "unsupported string value at (1, 0)");
    }
}
