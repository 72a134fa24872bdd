//! Mean squared difference between two planes.
//!
//! The alignment search scores each candidate placement with this metric:
//! lower is better, 0.0 means identical content. Both planes must be
//! single-channel (1 byte per pixel) and share the same extent; strides may
//! differ, so padded and cropped layouts compare correctly.
//!
//! # Example
//!
//! ```rust
//! use overlay_core::Plane;
//! use overlay_ops::diff::squared_diff_sum;
//!
//! let a = [0u8, 0, 0, 0];
//! let b = [255u8, 255, 255, 255];
//! let pa = Plane::from_gray(&a, 2, 2, 2).unwrap();
//! let pb = Plane::from_gray(&b, 2, 2, 2).unwrap();
//!
//! assert_eq!(squared_diff_sum(&pa, &pb).unwrap(), 255.0 * 255.0);
//! ```

use overlay_core::Plane;
use tracing::trace;

use crate::{OpsError, OpsResult};

fn ensure_gray_pair(what: &str, a: &Plane<'_>, b: &Plane<'_>) -> OpsResult<()> {
    if a.pixel_size() != 1 || b.pixel_size() != 1 {
        return Err(OpsError::PixelSizeMismatch(format!(
            "{} requires single-channel planes, got {} and {} bytes per pixel",
            what,
            a.pixel_size(),
            b.pixel_size()
        )));
    }
    if a.width() != b.width() || a.height() != b.height() {
        return Err(OpsError::SizeMismatch(format!(
            "{} requires equal extents, got {}x{} and {}x{}",
            what,
            a.width(),
            a.height(),
            b.width(),
            b.height()
        )));
    }
    if a.width() == 0 || a.height() == 0 {
        return Err(OpsError::InvalidDimensions(format!(
            "{} is undefined for an empty plane",
            what
        )));
    }
    Ok(())
}

fn ensure_mask(what: &str, data: &Plane<'_>, mask: &Plane<'_>) -> OpsResult<()> {
    if mask.pixel_size() != 1 {
        return Err(OpsError::PixelSizeMismatch(format!(
            "{} mask must be single-channel, got {} bytes per pixel",
            what,
            mask.pixel_size()
        )));
    }
    if mask.width() != data.width() || mask.height() != data.height() {
        return Err(OpsError::SizeMismatch(format!(
            "{} mask extent {}x{} does not match plane {}x{}",
            what,
            mask.width(),
            mask.height(),
            data.width(),
            data.height()
        )));
    }
    Ok(())
}

/// Mean squared difference between two single-channel planes.
///
/// Computes `sum((src[p] - over[p])^2) / (width * height)` with a signed
/// 64-bit accumulator, promoted to `f64` only for the final division.
///
/// # Errors
///
/// Returns [`OpsError`] when the planes differ in extent, are not
/// single-channel, or have zero area.
pub fn squared_diff_sum(src: &Plane<'_>, over: &Plane<'_>) -> OpsResult<f64> {
    ensure_gray_pair("squared_diff_sum", src, over)?;
    trace!(
        width = src.width(),
        height = src.height(),
        "squared_diff_sum"
    );

    let mut sum: i64 = 0;
    for y in 0..src.height() {
        for (&s, &o) in src.row(y).iter().zip(over.row(y)) {
            let diff = s as i64 - o as i64;
            sum += diff * diff;
        }
    }
    Ok(sum as f64 / (src.width() * src.height()) as f64)
}

/// Mean squared difference restricted to mask-included pixels.
///
/// A pixel contributes only when every supplied mask is nonzero at its
/// position; `None` means "include all". Excluded pixels shrink the
/// denominator, so the result stays a mean over the pixels that actually
/// participated.
///
/// Returns `f64::NAN` when every pixel is excluded - the metric is
/// undefined there, and NaN will not be mistaken for a valid score by a
/// caller picking the minimum.
///
/// # Errors
///
/// Returns [`OpsError`] when the data planes violate
/// [`squared_diff_sum`]'s preconditions, or a mask does not match the data
/// extent.
pub fn squared_diff_sum_masked(
    src: &Plane<'_>,
    src_mask: Option<&Plane<'_>>,
    over: &Plane<'_>,
    over_mask: Option<&Plane<'_>>,
) -> OpsResult<f64> {
    ensure_gray_pair("squared_diff_sum_masked", src, over)?;
    if let Some(mask) = src_mask {
        ensure_mask("squared_diff_sum_masked source", src, mask)?;
    }
    if let Some(mask) = over_mask {
        ensure_mask("squared_diff_sum_masked overlay", over, mask)?;
    }
    trace!(
        width = src.width(),
        height = src.height(),
        src_masked = src_mask.is_some(),
        over_masked = over_mask.is_some(),
        "squared_diff_sum_masked"
    );

    let (width, height) = (src.width(), src.height());
    let mut sum: i64 = 0;
    let mut pixel_count = (width * height) as i64;
    for y in 0..height {
        let src_row = src.row(y);
        let over_row = over.row(y);
        let src_mask_row = src_mask.map(|m| m.row(y));
        let over_mask_row = over_mask.map(|m| m.row(y));
        for x in 0..width {
            let included = src_mask_row.is_none_or(|m| m[x] > 0)
                && over_mask_row.is_none_or(|m| m[x] > 0);
            if included {
                let diff = src_row[x] as i64 - over_row[x] as i64;
                sum += diff * diff;
            } else {
                pixel_count -= 1;
            }
        }
    }
    if pixel_count == 0 {
        return Ok(f64::NAN);
    }
    Ok(sum as f64 / pixel_count as f64)
}
