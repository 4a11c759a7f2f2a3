//! Hysteresis (brushfire) edge linking.
//!
//! Classification is derived from the magnitude channel alone: suppressed
//! (`<= 0`), strong (`>= 1`), weak in between. A weak pixel becomes strong
//! when it is 8-connected, through a path of weak/strong pixels, to a
//! strong pixel; suppressed and already-strong pixels never change. The
//! final strong set is a monotone reachability fixed point and does not
//! depend on scan order.
//!
//! [`link_edges`] computes the fixed point directly by flood fill from the
//! strong seeds and is the production formulation. [`link_edges_rescan`]
//! reproduces the literal repeated full-raster scan, promoting in place so
//! earlier promotions are visible later in the same scan; it exists for
//! compatibility testing and converges to the same strong set.

use gc_core::{BorderPolicy, FieldView, Gradient, GradientField, neighbor_indices};
use log::debug;
use serde::Serialize;

/// Derived pixel classification over the magnitude channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelClass {
    /// Magnitude `<= 0`: confirmed non-edge.
    Suppressed,
    /// Magnitude strictly between 0 and 1: candidate awaiting connectivity.
    Weak,
    /// Magnitude `>= 1`: confirmed edge.
    Strong,
}

/// Classifies a magnitude value.
pub fn classify(magnitude: f32) -> PixelClass {
    if magnitude <= 0.0 {
        PixelClass::Suppressed
    } else if magnitude >= 1.0 {
        PixelClass::Strong
    } else {
        PixelClass::Weak
    }
}

/// Scan accounting for [`link_edges_rescan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LinkStats {
    /// Full-raster scans performed, including the final non-promoting one.
    pub scans: usize,
    /// Weak pixels promoted to strong.
    pub promoted: usize,
}

/// Promotes every weak pixel 8-connected to a strong pixel, returning a
/// new field. Promoted pixels get magnitude 1.0; everything else,
/// including weak pixels with no strong connection, is returned unchanged.
/// The direction channel is never touched.
pub fn link_edges(src: &FieldView<'_>, border: BorderPolicy) -> GradientField {
    let w = src.width();
    let h = src.height();

    let mut out = GradientField::new_fill(w, h, Gradient::default());
    {
        let data = out.data_mut();
        for y in 0..h {
            data[y * w..(y + 1) * w].copy_from_slice(src.row(y));
        }
    }

    if w == 0 || h == 0 {
        return out;
    }

    let data = out.data_mut();
    let mut stack: Vec<usize> = Vec::new();
    for (idx, cell) in data.iter().enumerate() {
        if classify(cell.magnitude) == PixelClass::Strong {
            stack.push(idx);
        }
    }

    let mut promoted = 0usize;
    while let Some(idx) = stack.pop() {
        let x = idx % w;
        let y = idx / w;

        let neighbors = neighbor_indices(x, y, w, h, border).expect("non-empty raster");
        for (nx, ny) in neighbors {
            let nidx = ny * w + nx;
            if classify(data[nidx].magnitude) == PixelClass::Weak {
                // Promotion doubles as the visited mark.
                data[nidx].magnitude = 1.0;
                stack.push(nidx);
                promoted += 1;
            }
        }
    }

    debug!("link_edges: promoted {promoted} weak pixels");
    out
}

/// Repeatedly scans the whole raster in row-major order, promoting weak
/// pixels with a strong neighbor in place, until one scan promotes
/// nothing. A promotion made earlier in a scan is visible to pixels
/// visited later in the same scan.
///
/// Zero-area fields return zeroed stats without scanning.
pub fn link_edges_rescan(field: &mut GradientField, border: BorderPolicy) -> LinkStats {
    let w = field.width();
    let h = field.height();
    if w == 0 || h == 0 {
        return LinkStats::default();
    }

    let data = field.data_mut();
    let mut stats = LinkStats::default();

    loop {
        stats.scans += 1;
        let mut promoted_this_scan = 0usize;

        for y in 0..h {
            for x in 0..w {
                if classify(data[y * w + x].magnitude) != PixelClass::Weak {
                    continue;
                }

                let neighbors = neighbor_indices(x, y, w, h, border).expect("non-empty raster");
                let has_strong_neighbor = neighbors
                    .iter()
                    .any(|&(nx, ny)| classify(data[ny * w + nx].magnitude) == PixelClass::Strong);

                if has_strong_neighbor {
                    data[y * w + x].magnitude = 1.0;
                    promoted_this_scan += 1;
                }
            }
        }

        stats.promoted += promoted_this_scan;
        debug!(
            "link_edges_rescan: scan {} promoted {} pixels",
            stats.scans, promoted_this_scan
        );

        if promoted_this_scan == 0 {
            return stats;
        }
    }
}

#[cfg(test)]
mod tests {
    use gc_core::{BorderPolicy, Gradient, GradientField};

    use super::{LinkStats, PixelClass, classify, link_edges, link_edges_rescan};

    fn field_from_magnitudes(width: usize, height: usize, magnitudes: &[f32]) -> GradientField {
        let cells = magnitudes.iter().map(|&m| Gradient::new(m, 0.0)).collect();
        GradientField::from_vec(width, height, cells).expect("valid field")
    }

    fn magnitudes(field: &GradientField) -> Vec<f32> {
        field.data().iter().map(|c| c.magnitude).collect()
    }

    #[test]
    fn classify_partitions_the_magnitude_range() {
        assert_eq!(classify(-0.5), PixelClass::Suppressed);
        assert_eq!(classify(0.0), PixelClass::Suppressed);
        assert_eq!(classify(0.001), PixelClass::Weak);
        assert_eq!(classify(0.999), PixelClass::Weak);
        assert_eq!(classify(1.0), PixelClass::Strong);
        assert_eq!(classify(1.5), PixelClass::Strong);
    }

    #[test]
    fn weak_pixel_next_to_strong_is_promoted() {
        // One strong pixel at (1,1), one 8-connected weak pixel at (2,1).
        let field = field_from_magnitudes(
            3,
            3,
            &[
                0.0, 0.0, 0.0, //
                0.0, 1.0, 0.5, //
                0.0, 0.0, 0.0,
            ],
        );

        let out = link_edges(&field.as_view(), BorderPolicy::Clamp);
        assert_eq!(
            magnitudes(&out),
            vec![
                0.0, 0.0, 0.0, //
                0.0, 1.0, 1.0, //
                0.0, 0.0, 0.0,
            ]
        );
    }

    #[test]
    fn promotion_propagates_through_weak_chains() {
        // Strong seed at the left end, weak chain to the right, separated
        // island at the far end.
        let field = field_from_magnitudes(6, 1, &[1.0, 0.2, 0.4, 0.6, 0.0, 0.3]);

        let out = link_edges(&field.as_view(), BorderPolicy::Clamp);
        assert_eq!(magnitudes(&out), vec![1.0, 1.0, 1.0, 1.0, 0.0, 0.3]);
    }

    #[test]
    fn strong_set_only_grows() {
        let field = field_from_magnitudes(4, 1, &[1.0, 0.5, 0.0, 1.0]);
        let out = link_edges(&field.as_view(), BorderPolicy::Clamp);

        for (before, after) in field.data().iter().zip(out.data().iter()) {
            if classify(before.magnitude) == PixelClass::Strong {
                assert_eq!(classify(after.magnitude), PixelClass::Strong);
            }
        }
    }

    #[test]
    fn all_weak_field_is_a_fixed_point_after_one_scan() {
        let original = field_from_magnitudes(3, 2, &[0.2, 0.4, 0.6, 0.8, 0.5, 0.3]);

        let mut rescanned = original.clone();
        let stats = link_edges_rescan(&mut rescanned, BorderPolicy::Clamp);
        assert_eq!(
            stats,
            LinkStats {
                scans: 1,
                promoted: 0
            }
        );
        assert_eq!(magnitudes(&rescanned), magnitudes(&original));

        let flooded = link_edges(&original.as_view(), BorderPolicy::Clamp);
        assert_eq!(magnitudes(&flooded), magnitudes(&original));
    }

    #[test]
    fn rescan_and_flood_fill_reach_the_same_fixed_point() {
        // A chain laid out against raster order so the rescan needs
        // several passes: the seed sits at the bottom and the weak path
        // runs up column 1. Column 2 is a suppressed moat keeping the two
        // weak pixels in column 3 disconnected.
        let field = field_from_magnitudes(
            4,
            4,
            &[
                0.5, 0.6, 0.0, 0.2, //
                0.0, 0.7, 0.0, 0.2, //
                0.0, 0.8, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0,
            ],
        );

        let flooded = link_edges(&field.as_view(), BorderPolicy::Clamp);

        let mut rescanned = field.clone();
        let stats = link_edges_rescan(&mut rescanned, BorderPolicy::Clamp);

        assert_eq!(magnitudes(&flooded), magnitudes(&rescanned));
        assert!(stats.scans > 1, "chain should need more than one scan");
        assert_eq!(stats.promoted, 4);

        // The disconnected weak pixels in the last column stay weak.
        assert_eq!(flooded.data()[3].magnitude, 0.2);
        assert_eq!(flooded.data()[7].magnitude, 0.2);
    }

    #[test]
    fn wrap_policy_links_across_opposite_edges() {
        let field = field_from_magnitudes(4, 1, &[1.0, 0.0, 0.0, 0.5]);

        let clamped = link_edges(&field.as_view(), BorderPolicy::Clamp);
        assert_eq!(magnitudes(&clamped), vec![1.0, 0.0, 0.0, 0.5]);

        let wrapped = link_edges(&field.as_view(), BorderPolicy::Wrap);
        assert_eq!(magnitudes(&wrapped), vec![1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn suppressed_pixels_never_change() {
        let field = field_from_magnitudes(3, 1, &[1.0, 0.0, 0.5]);
        let out = link_edges(&field.as_view(), BorderPolicy::Clamp);

        // The suppressed gap blocks the fire: 0.5 stays weak.
        assert_eq!(magnitudes(&out), vec![1.0, 0.0, 0.5]);
    }

    #[test]
    fn direction_channel_is_untouched() {
        let cells = vec![
            Gradient::new(1.0, 0.3),
            Gradient::new(0.5, -2.1),
            Gradient::new(0.0, 1.9),
        ];
        let field = GradientField::from_vec(3, 1, cells).expect("valid field");
        let out = link_edges(&field.as_view(), BorderPolicy::Clamp);

        assert_eq!(out.data()[0].direction, 0.3);
        assert_eq!(out.data()[1].direction, -2.1);
        assert_eq!(out.data()[2].direction, 1.9);
    }

    #[test]
    fn zero_area_field_returns_without_scanning() {
        let mut field = GradientField::new_fill(0, 3, Gradient::default());
        let stats = link_edges_rescan(&mut field, BorderPolicy::Clamp);
        assert_eq!(stats, LinkStats::default());

        let out = link_edges(&field.as_view(), BorderPolicy::Clamp);
        assert!(out.data().is_empty());
    }
}
