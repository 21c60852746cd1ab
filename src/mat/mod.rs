//! Dense owned matrix storage.
//!
//! [`Mat`] stores its elements in column-major order, so that columns are contiguous slices.
//! The element type is unconstrained for storage and indexing; arithmetic helpers require
//! [`ComplexField`](crate::ComplexField).

mod matown;

pub use matown::Mat;
