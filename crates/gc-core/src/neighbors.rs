use crate::border::{BorderPolicy, map_index};
use crate::field::{FieldView, Gradient};

/// Resolved coordinates of the 8 neighbors of `(x, y)`, in raster order:
/// top-left, top, top-right, left, right, bottom-left, bottom, bottom-right.
///
/// The center must be in bounds. Returns `None` for a zero-area raster.
/// Under [`BorderPolicy::Clamp`] a border pixel's neighbor set may contain
/// repeated coordinates (including the center itself).
pub fn neighbor_indices(
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    policy: BorderPolicy,
) -> Option<[(usize, usize); 8]> {
    if width == 0 || height == 0 {
        return None;
    }
    debug_assert!(x < width && y < height, "center out of bounds");

    let xm = map_index(x as isize - 1, width, policy)?;
    let xp = map_index(x as isize + 1, width, policy)?;
    let ym = map_index(y as isize - 1, height, policy)?;
    let yp = map_index(y as isize + 1, height, policy)?;

    Some([
        (xm, ym),
        (x, ym),
        (xp, ym),
        (xm, y),
        (xp, y),
        (xm, yp),
        (x, yp),
        (xp, yp),
    ])
}

/// The 8 neighboring cells of a raster position, resolved under a border
/// policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighborhood {
    pub top_left: Gradient,
    pub top: Gradient,
    pub top_right: Gradient,
    pub left: Gradient,
    pub right: Gradient,
    pub bottom_left: Gradient,
    pub bottom: Gradient,
    pub bottom_right: Gradient,
}

impl Neighborhood {
    /// Gathers the 8 neighbors of `(x, y)` from `view`.
    ///
    /// Interior pixels take a direct three-row path; border pixels resolve
    /// each coordinate through [`map_index`]. The center must be in bounds
    /// of a non-empty view.
    pub fn of(view: &FieldView<'_>, x: usize, y: usize, policy: BorderPolicy) -> Self {
        let w = view.width();
        let h = view.height();
        debug_assert!(x < w && y < h, "center out of bounds");

        if x >= 1 && x + 1 < w && y >= 1 && y + 1 < h {
            let above = view.row(y - 1);
            let mid = view.row(y);
            let below = view.row(y + 1);
            return Self {
                top_left: above[x - 1],
                top: above[x],
                top_right: above[x + 1],
                left: mid[x - 1],
                right: mid[x + 1],
                bottom_left: below[x - 1],
                bottom: below[x],
                bottom_right: below[x + 1],
            };
        }

        let [tl, t, tr, l, r, bl, b, br] =
            neighbor_indices(x, y, w, h, policy).expect("non-empty raster");
        let at =
            |(cx, cy): (usize, usize)| *view.get(cx, cy).expect("mapped neighbor index in bounds");

        Self {
            top_left: at(tl),
            top: at(t),
            top_right: at(tr),
            left: at(l),
            right: at(r),
            bottom_left: at(bl),
            bottom: at(b),
            bottom_right: at(br),
        }
    }
}
