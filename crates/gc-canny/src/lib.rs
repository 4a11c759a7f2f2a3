//! Canny-style refinement of a raw gradient field into a binary edge map.
//!
//! The chain is three raster transforms plus an optional final pass:
//! direction-quantized non-maximum suppression ([`suppress_non_maxima`]),
//! double-threshold classification ([`apply_double_threshold`]), hysteresis
//! edge linking ([`link_edges`]), and [`collapse_weak`] to binarize any
//! pixel left weak. [`detect_edges`] runs the whole chain.
//!
//! Inputs are two-channel (magnitude, direction) fields from `gc-core`.
//! The upstream gradient computation (grayscale conversion, blur,
//! Sobel/Scharr) is a collaborator, not part of this crate; magnitudes are
//! nominally normalized to `[0, 1]` by that collaborator but nothing here
//! requires it until the thresholding stage assigns meaning to 0 and 1.

pub mod axis;
pub mod hysteresis;
pub mod nms;
pub mod pipeline;
pub mod threshold;

pub use axis::{DirectionAxis, quantize_direction};
pub use hysteresis::{LinkStats, PixelClass, classify, link_edges, link_edges_rescan};
pub use nms::{suppress_non_maxima, suppress_non_maxima_into};
pub use pipeline::{CannyConfig, detect_edges};
pub use threshold::{apply_double_threshold, apply_double_threshold_into, collapse_weak};
