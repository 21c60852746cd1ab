//! Linear algebra module.
//!
//! Contains the dense kernels the eigenvalue routines are built from: products, Householder QR,
//! LU based inversion, triangular solves, vector reductions and Jacobi rotations, as well as the
//! eigenvalue decompositions themselves in [`evd`].
//!
//! All routines allocate their outputs and leave their inputs untouched, unless their name ends
//! in `_in_place`.

pub mod evd;
pub mod householder;
pub mod jacobi;
pub mod lu;
pub mod matmul;
pub mod qr;
pub mod reductions;
pub mod triangular_solve;

/// Error returned when a routine needs to divide by an exactly zero pivot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SingularMatrixError {
    /// Index of the zero pivot.
    pub index: usize,
}

impl core::fmt::Display for SingularMatrixError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "matrix is singular: pivot {} is zero", self.index)
    }
}

impl std::error::Error for SingularMatrixError {}
