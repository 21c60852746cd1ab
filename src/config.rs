//! Library-wide numerical tolerances.
//!
//! There is no global configuration state: a [`Config`] is a plain value that callers build
//! (or deserialize, with the `serde` feature) and pass to [`EigsOptions::from_config`].
//!
//! [`EigsOptions::from_config`]: crate::EigsOptions::from_config

/// Numerical tolerances shared by the routines of the library.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Relative tolerance. Used as the default precision of the eigenvalue routines, i.e. the
    /// magnitude below which a value is treated as zero during convergence tests.
    pub rel_tol: f64,
}

impl Default for Config {
    #[inline]
    fn default() -> Self {
        Self { rel_tol: 1e-12 }
    }
}
