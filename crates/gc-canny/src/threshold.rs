//! Elementwise double-threshold classification.
//!
//! Magnitudes below the low threshold drop to 0 (suppressed), magnitudes
//! above the high threshold saturate to 1 (strong), anything in between
//! passes through unchanged (weak). The direction channel is copied as-is.
//!
//! When `high <= low` the mapping degenerates into a step function at the
//! low threshold. That is documented behavior, not an error;
//! [`collapse_weak`] relies on it to binarize a linked field.

use gc_core::{Error, FieldView, FieldViewMut, Gradient, GradientField};

/// Applies the double threshold, returning a new field of the same size.
/// A zero-area input yields an empty field.
pub fn apply_double_threshold(src: &FieldView<'_>, low: f32, high: f32) -> GradientField {
    let mut out = GradientField::new_fill(src.width(), src.height(), Gradient::default());
    apply_double_threshold_into(src, &mut out.as_view_mut(), low, high)
        .expect("freshly allocated output matches source size");
    out
}

/// Applies the double threshold into an existing destination.
///
/// Source and destination must have identical dimensions.
pub fn apply_double_threshold_into(
    src: &FieldView<'_>,
    dst: &mut FieldViewMut<'_>,
    low: f32,
    high: f32,
) -> Result<(), Error> {
    same_size(src, dst)?;

    for y in 0..src.height() {
        let row = src.row(y);
        let out_row = dst.row_mut(y);

        for (out_cell, cell) in out_row.iter_mut().zip(row.iter()) {
            let magnitude = if cell.magnitude < low {
                0.0
            } else if cell.magnitude > high {
                1.0
            } else {
                cell.magnitude
            };
            *out_cell = Gradient {
                magnitude,
                direction: cell.direction,
            };
        }
    }

    Ok(())
}

/// Collapses every pixel below `strong` to suppressed and everything above
/// to strong, leaving magnitudes exactly equal to `strong` unchanged.
///
/// This is the degenerate `low == high` double threshold. Applied after
/// hysteresis linking with `strong = 1.0` it turns any still-weak pixel
/// into a suppressed one, producing a strictly binary magnitude channel.
pub fn collapse_weak(src: &FieldView<'_>, strong: f32) -> GradientField {
    apply_double_threshold(src, strong, strong)
}

fn same_size(src: &FieldView<'_>, dst: &FieldViewMut<'_>) -> Result<(), Error> {
    if src.width() != dst.width() || src.height() != dst.height() {
        return Err(Error::DimensionMismatch {
            src_width: src.width(),
            src_height: src.height(),
            dst_width: dst.width(),
            dst_height: dst.height(),
        });
    }
    Ok(())
}
