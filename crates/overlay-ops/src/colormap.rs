//! Palette remapping with weighted-random fallthrough.
//!
//! Histogram matching produces, for each source intensity, either a single
//! replacement color or a weighted distribution over several candidates
//! (when one source bucket must be split across neighboring target
//! buckets). [`map_colors`] applies such a table pixel by pixel: fixed
//! entries map deterministically, everything else draws from the weighted
//! entries so that, in aggregate, the output histogram approaches the
//! target distribution.
//!
//! The random generator is an explicit parameter. Seed it for reproducible
//! output; draws are consumed in row-major pixel order, one per
//! fallthrough pixel.
//!
//! # Example
//!
//! ```rust
//! use overlay_core::{Plane, PlaneBuf};
//! use overlay_ops::colormap::{map_colors, ColorMap};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut map = ColorMap::new();
//! map.set_fixed(10, 200);
//!
//! let src_data = [10u8; 4];
//! let src = Plane::from_gray(&src_data, 2, 2, 2).unwrap();
//! let mut dst = PlaneBuf::new(2, 2, 1);
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! map_colors(&src, &mut dst.view_mut(), &map, &mut rng).unwrap();
//! assert!(dst.data().iter().all(|&b| b == 200));
//! ```

use overlay_core::{Plane, PlaneMut};
use rand::Rng;
use tracing::trace;

use crate::{OpsError, OpsResult};

/// Palette table: fixed byte-to-byte substitutions plus per-intensity
/// weighted alternatives.
///
/// A fixed entry of 0 is the "no entry" sentinel and falls through to the
/// weighted entries for that intensity (0 is never a fixed target in the
/// histogram-matching tables this serves). Weighted entries are walked in
/// insertion order; their weights are expected to sum to about 1.0 per
/// intensity, which is not enforced - an under-summing list clamps to its
/// last entry, see [`map_colors`].
#[derive(Debug, Clone)]
pub struct ColorMap {
    fixed: [u8; 256],
    weighted: Vec<Vec<(f64, u8)>>,
}

impl ColorMap {
    /// Creates an empty table: every intensity falls through, with no
    /// weighted entries yet.
    pub fn new() -> Self {
        Self {
            fixed: [0; 256],
            weighted: vec![Vec::new(); 256],
        }
    }

    /// Sets the deterministic substitution for `from`.
    ///
    /// Setting `to = 0` restores the fallthrough sentinel.
    pub fn set_fixed(&mut self, from: u8, to: u8) {
        self.fixed[from as usize] = to;
    }

    /// Appends a weighted alternative for `from`.
    ///
    /// `weight` is the probability mass of this entry, nominally in
    /// `[0, 1]`; entries are consulted in the order they were added.
    pub fn add_weighted(&mut self, from: u8, weight: f64, to: u8) {
        self.weighted[from as usize].push((weight, to));
    }

    /// Fixed substitution for `from` (0 = fallthrough sentinel).
    pub fn fixed(&self, from: u8) -> u8 {
        self.fixed[from as usize]
    }

    /// Weighted entries for `from`, in insertion order.
    pub fn weighted(&self, from: u8) -> &[(f64, u8)] {
        &self.weighted[from as usize]
    }

    /// Picks the output color for `from` given a uniform draw in `[0, 1)`.
    ///
    /// Walks the weighted entries subtracting each weight from `draw`; the
    /// first entry where the remainder drops below machine epsilon wins.
    /// An under-summing list clamps to its last entry rather than walking
    /// past the table. `None` when the intensity has no weighted entries.
    fn pick_weighted(&self, from: u8, mut draw: f64) -> Option<u8> {
        let entries = &self.weighted[from as usize];
        let (_, mut chosen) = *entries.last()?;
        for &(weight, color) in entries {
            draw -= weight;
            if draw < f64::EPSILON {
                chosen = color;
                break;
            }
        }
        Some(chosen)
    }
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Remaps every pixel of `src` into `dst` through `map`.
///
/// Fixed entries map deterministically regardless of `rng`; fallthrough
/// intensities consume one uniform draw each, in row-major order. Only the
/// primary byte of each pixel is read and written; any remaining pixel
/// bytes in `dst` keep their prior contents.
///
/// # Errors
///
/// Returns [`OpsError`] when extents or pixel sizes differ, or a
/// fallthrough intensity has no weighted entries at all
/// ([`OpsError::IncompleteColorMap`]).
pub fn map_colors<R: Rng>(
    src: &Plane<'_>,
    dst: &mut PlaneMut<'_>,
    map: &ColorMap,
    rng: &mut R,
) -> OpsResult<()> {
    if src.width() != dst.width() || src.height() != dst.height() {
        return Err(OpsError::SizeMismatch(format!(
            "map_colors requires equal extents, got {}x{} and {}x{}",
            src.width(),
            src.height(),
            dst.width(),
            dst.height()
        )));
    }
    if src.pixel_size() != dst.pixel_size() {
        return Err(OpsError::PixelSizeMismatch(format!(
            "map_colors requires equal pixel sizes, got {} and {}",
            src.pixel_size(),
            dst.pixel_size()
        )));
    }
    trace!(
        width = src.width(),
        height = src.height(),
        pixel_size = src.pixel_size(),
        "map_colors"
    );

    let step = src.pixel_size();
    for y in 0..src.height() {
        let src_row = src.row(y);
        let dst_row = dst.row_mut(y);
        for x in 0..src.width() {
            let old = src_row[x * step];
            let fixed = map.fixed(old);
            let new = if fixed != 0 {
                fixed
            } else {
                let draw = rng.gen_range(0.0..1.0);
                map.pick_weighted(old, draw)
                    .ok_or(OpsError::IncompleteColorMap { value: old })?
            };
            dst_row[x * step] = new;
        }
    }
    Ok(())
}
