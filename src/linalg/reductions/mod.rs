//! Reductions of vectors to a single scalar.

mod norm_l2;

pub use norm_l2::{norm_l2, normalize};
