//! Foundational primitives for gradient-field edge detection.
//!
//! ## Fields and Views
//! A gradient field is a dense, row-major raster with exactly two channels
//! per cell: gradient `magnitude` (non-negative, nominally in `[0, 1]`) and
//! gradient `direction` (radians, East-counterclockwise convention, so 0 is
//! East and `PI/2` is North). [`GradientField`] owns its buffer;
//! [`FieldView`] / [`FieldViewMut`] borrow, with element stride so views
//! over padded buffers remain possible.
//!
//! ## Border Policies
//! Neighbor resolution supports edge-clamp and toroidal wrap behavior.
//! Clamp resolves an out-of-range coordinate to the nearest in-range
//! row/column; wrap resolves it to the opposite edge.
//!
//! ## Neighborhoods
//! [`Neighborhood`] gathers the 8 neighbors of a raster cell under a border
//! policy in one place, so the scanning algorithms never do their own
//! boundary arithmetic.

mod border;
mod error;
mod field;
mod neighbors;

pub use border::{BorderPolicy, map_index};
pub use error::Error;
pub use field::{FieldView, FieldViewMut, Gradient, GradientField};
pub use neighbors::{Neighborhood, neighbor_indices};
