//! `eigs` computes the eigenvalues and eigenvectors of dense square matrices.
//!
//! The entry point is [`eigs()`], which accepts matrices whose entries may mix real, extended
//! precision and complex scalars, picks the scalar field the computation runs in, and routes the
//! matrix to either the Jacobi solver (real symmetric input) or the general solver (balancing,
//! Hessenberg reduction and shifted QR iteration with deflation).
//!
//! ```
//! use eigs::{eigs, mat, Eigs, EigsOptions};
//!
//! let a = mat![[2.0, 0.0], [0.0, 3.0]];
//! let Eigs::Real(eigen) = eigs(&a, EigsOptions::default()).unwrap() else {
//!     panic!()
//! };
//! assert_eq!(eigen.values, vec![2.0, 3.0]);
//! ```
//!
//! The typed solvers in [`linalg::evd`] can be used directly when the scalar field is known in
//! advance.

#![allow(clippy::type_complexity)]
#![allow(clippy::too_many_arguments)]
#![warn(rust_2018_idioms)]

use equator::assert;

pub mod config;
pub mod dispatch;
pub mod linalg;
pub mod mat;

pub use config::Config;
pub use dispatch::{eigs, Eigs, EigsError, EigsOptions, ScalarDomain, Value};
pub use eigs_entity::{c64, ComplexField, Double, DoubleF64, RealField};
pub use mat::Mat;

/// Whether a vector should be implicitly conjugated when read or not.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Conj {
    /// Do conjugate.
    Yes,
    /// Do not conjugate.
    No,
}

impl Conj {
    #[inline(always)]
    pub(crate) fn apply<E: ComplexField>(self, value: E) -> E {
        match self {
            Conj::Yes => value.conj(),
            Conj::No => value,
        }
    }
}

/// Creates a [`Mat`] containing the arguments, given row by row.
///
/// ```
/// use eigs::mat;
///
/// let matrix = mat![
///     [1.0, 5.0, 9.0],
///     [2.0, 6.0, 10.0],
///     [3.0, 7.0, 11.0],
///     [4.0, 8.0, 12.0f64],
/// ];
///
/// assert_eq!(matrix.read(0, 0), 1.0);
/// assert_eq!(matrix.read(1, 0), 2.0);
/// assert_eq!(matrix.read(3, 0), 4.0);
/// assert_eq!(matrix.read(0, 2), 9.0);
/// assert_eq!(matrix.read(3, 2), 12.0);
/// ```
#[macro_export]
macro_rules! mat {
    () => {
        {
            compile_error!("number of columns in the matrix is ambiguous");
        }
    };

    ($([$($v:expr),* $(,)?] ),* $(,)?) => {
        {
            $crate::mat::Mat::from_rows(::std::vec![$(::std::vec![$($v),*]),*])
        }
    };
}
