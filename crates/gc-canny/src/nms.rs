//! Direction-quantized non-maximum suppression over a gradient field.
//!
//! For each pixel the gradient direction selects the two neighbors along
//! its quantized axis; the magnitude survives only when strictly greater
//! than both, so ties are suppressed and edges bias thinner. The direction
//! channel passes through unchanged for every pixel, suppressed or not.
//!
//! The scan covers the full raster including the border; border neighbors
//! resolve through the caller's [`BorderPolicy`]. Under clamp, a gradient
//! orthogonal to the image edge can never be a border-local maximum (the
//! clamped neighbor equals the center), while a gradient along or diagonal
//! to the edge still can.

use gc_core::{
    BorderPolicy, Error, FieldView, FieldViewMut, Gradient, GradientField, Neighborhood,
};

use crate::axis::{DirectionAxis, quantize_direction};

/// Suppresses non-maximal magnitudes, returning a new field of the same
/// size. A zero-area input yields an empty field.
pub fn suppress_non_maxima(src: &FieldView<'_>, border: BorderPolicy) -> GradientField {
    let mut out = GradientField::new_fill(src.width(), src.height(), Gradient::default());
    suppress_non_maxima_into(src, &mut out.as_view_mut(), border)
        .expect("freshly allocated output matches source size");
    out
}

/// Suppresses non-maximal magnitudes into an existing destination.
///
/// Source and destination must have identical dimensions.
pub fn suppress_non_maxima_into(
    src: &FieldView<'_>,
    dst: &mut FieldViewMut<'_>,
    border: BorderPolicy,
) -> Result<(), Error> {
    same_size(src, dst)?;

    let w = src.width();
    let h = src.height();

    for y in 0..h {
        let row = src.row(y);
        let out_row = dst.row_mut(y);

        for x in 0..w {
            let center = row[x];
            let nb = Neighborhood::of(src, x, y, border);

            let (first, second) = match quantize_direction(center.direction) {
                DirectionAxis::NorthSouth => (nb.top, nb.bottom),
                DirectionAxis::NwSe => (nb.top_left, nb.bottom_right),
                DirectionAxis::EastWest => (nb.left, nb.right),
                DirectionAxis::SwNe => (nb.bottom_left, nb.top_right),
            };

            let keep = center.magnitude > first.magnitude && center.magnitude > second.magnitude;
            out_row[x] = Gradient {
                magnitude: if keep { center.magnitude } else { 0.0 },
                direction: center.direction,
            };
        }
    }

    Ok(())
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

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    use gc_core::{BorderPolicy, Error, Gradient, GradientField};

    use super::{suppress_non_maxima, suppress_non_maxima_into};

    fn field_from_magnitudes(
        width: usize,
        height: usize,
        magnitudes: &[f32],
        direction: f32,
    ) -> GradientField {
        let cells = magnitudes
            .iter()
            .map(|&m| Gradient::new(m, direction))
            .collect();
        GradientField::from_vec(width, height, cells).expect("valid field")
    }

    #[test]
    fn east_west_gradient_compares_left_and_right() {
        // Horizontal gradient: the ridge column should survive, flanks drop.
        let field = field_from_magnitudes(
            3,
            3,
            &[
                0.2, 0.9, 0.1, //
                0.2, 0.9, 0.1, //
                0.2, 0.9, 0.1,
            ],
            0.0,
        );

        let out = suppress_non_maxima(&field.as_view(), BorderPolicy::Clamp);
        for y in 0..3 {
            assert_eq!(out.as_view().row(y)[0].magnitude, 0.0);
            assert_eq!(out.as_view().row(y)[1].magnitude, 0.9);
            assert_eq!(out.as_view().row(y)[2].magnitude, 0.0);
        }
    }

    #[test]
    fn north_south_gradient_compares_top_and_bottom() {
        let field = field_from_magnitudes(
            3,
            3,
            &[
                0.1, 0.1, 0.1, //
                0.8, 0.8, 0.8, //
                0.3, 0.3, 0.3,
            ],
            FRAC_PI_2,
        );

        let out = suppress_non_maxima(&field.as_view(), BorderPolicy::Clamp);
        assert_eq!(out.as_view().row(0)[1].magnitude, 0.0);
        assert_eq!(out.as_view().row(1)[1].magnitude, 0.8);
        assert_eq!(out.as_view().row(2)[1].magnitude, 0.0);
    }

    #[test]
    fn diagonal_gradient_compares_diagonal_neighbors() {
        // NwSe axis: top-left and bottom-right are the competitors.
        let mut magnitudes = [0.5f32; 9];
        magnitudes[4] = 0.9; // center
        magnitudes[0] = 0.2; // top-left
        magnitudes[8] = 0.3; // bottom-right
        let field = field_from_magnitudes(3, 3, &magnitudes, FRAC_PI_4);

        let out = suppress_non_maxima(&field.as_view(), BorderPolicy::Clamp);
        assert_eq!(out.as_view().row(1)[1].magnitude, 0.9);
    }

    #[test]
    fn ties_are_suppressed() {
        let field = field_from_magnitudes(3, 1, &[0.5, 0.5, 0.1], 0.0);
        let out = suppress_non_maxima(&field.as_view(), BorderPolicy::Clamp);

        // Strict inequality: the plateau loses on both sides.
        assert_eq!(out.as_view().row(0)[0].magnitude, 0.0);
        assert_eq!(out.as_view().row(0)[1].magnitude, 0.0);
    }

    #[test]
    fn border_policy_changes_border_survivors() {
        let field = field_from_magnitudes(3, 1, &[0.5, 0.3, 0.9], 0.0);

        // Clamp: the rightmost pixel's right neighbor is itself, so the
        // strict test fails at the border.
        let clamped = suppress_non_maxima(&field.as_view(), BorderPolicy::Clamp);
        assert_eq!(clamped.as_view().row(0)[2].magnitude, 0.0);

        // Wrap: its right neighbor is the opposite edge (0.5), so it wins.
        let wrapped = suppress_non_maxima(&field.as_view(), BorderPolicy::Wrap);
        assert_eq!(wrapped.as_view().row(0)[2].magnitude, 0.9);
    }

    #[test]
    fn direction_channel_is_invariant() {
        let cells = vec![
            Gradient::new(0.1, -2.0),
            Gradient::new(0.9, 0.4),
            Gradient::new(0.5, 3.0),
            Gradient::new(0.0, f32::NAN),
        ];
        let field = GradientField::from_vec(2, 2, cells.clone()).expect("valid field");

        let out = suppress_non_maxima(&field.as_view(), BorderPolicy::Clamp);
        for (cell, original) in out.data().iter().zip(cells.iter()) {
            if original.direction.is_nan() {
                assert!(cell.direction.is_nan());
            } else {
                assert_eq!(cell.direction, original.direction);
            }
        }
    }

    #[test]
    fn into_rejects_mismatched_sizes() {
        let src = GradientField::new_fill(3, 3, Gradient::default());
        let mut dst = GradientField::new_fill(2, 3, Gradient::default());

        let err = suppress_non_maxima_into(
            &src.as_view(),
            &mut dst.as_view_mut(),
            BorderPolicy::Clamp,
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                src_width: 3,
                src_height: 3,
                dst_width: 2,
                dst_height: 3,
            }
        );
    }

    #[test]
    fn zero_area_field_yields_empty_output() {
        let field = GradientField::new_fill(0, 5, Gradient::default());
        let out = suppress_non_maxima(&field.as_view(), BorderPolicy::Clamp);
        assert_eq!(out.width(), 0);
        assert_eq!(out.height(), 5);
        assert!(out.data().is_empty());
    }
}
