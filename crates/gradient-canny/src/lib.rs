//! Umbrella crate for the `gradient-canny` workspace.
//!
//! Re-exports the gradient-field primitives from `gc-core` and the edge
//! refinement chain from `gc-canny`.

pub use gc_canny::*;
pub use gc_core::*;
