//! Arbitrary-angle rotation with bilinear interpolation.
//!
//! Rotates a source plane about its geometric center into a destination
//! plane of possibly different extent. Each destination pixel is
//! inverse-mapped to a continuous source coordinate and sampled from its
//! four integer neighbors; destination pixels whose source coordinate
//! lands outside the source extent are left untouched, so the caller
//! controls the background by pre-filling the destination.
//!
//! Positive angles rotate clockwise. A specialized path handles
//! single-byte pixels; the generic path interpolates each pixel byte
//! independently.
//!
//! # Example
//!
//! ```rust
//! use overlay_core::{Plane, PlaneBuf};
//! use overlay_ops::rotate::rotate_bilinear;
//!
//! let src_data: Vec<u8> = (0..16).collect();
//! let src = Plane::from_gray(&src_data, 4, 4, 4).unwrap();
//! let mut dst = PlaneBuf::new(4, 4, 1);
//!
//! // Angle 0 reproduces the source exactly
//! rotate_bilinear(&src, &mut dst.view_mut(), 0.0).unwrap();
//! assert_eq!(dst.data(), &src_data[..]);
//! ```

use overlay_core::{Plane, PlaneMut};
use tracing::trace;

use crate::{OpsError, OpsResult};

/// Rotates `src` by `angle_deg` degrees (clockwise positive) into `dst`.
///
/// Rotation is about the center `((w-1)/2, (h-1)/2)` of each plane,
/// mapping the destination center onto the source center. Interpolation
/// weights come from the fractional source coordinate; the bottom-right
/// neighbor clamps at the last row/column, and the weighted sum truncates
/// to a byte. Destination pixels without a valid source mapping keep
/// their prior contents.
///
/// # Errors
///
/// Returns [`OpsError::PixelSizeMismatch`] when the planes differ in bytes
/// per pixel.
pub fn rotate_bilinear(src: &Plane<'_>, dst: &mut PlaneMut<'_>, angle_deg: f64) -> OpsResult<()> {
    if src.pixel_size() != dst.pixel_size() {
        return Err(OpsError::PixelSizeMismatch(format!(
            "rotate_bilinear requires equal pixel sizes, got {} and {}",
            src.pixel_size(),
            dst.pixel_size()
        )));
    }
    trace!(
        src_width = src.width(),
        src_height = src.height(),
        dst_width = dst.width(),
        dst_height = dst.height(),
        pixel_size = src.pixel_size(),
        angle_deg,
        "rotate_bilinear"
    );
    if src.width() == 0 || src.height() == 0 || dst.width() == 0 || dst.height() == 0 {
        return Ok(());
    }
    if src.pixel_size() == 1 {
        rotate_gray(src, dst, angle_deg);
    } else {
        rotate_generic(src, dst, angle_deg);
    }
    Ok(())
}

/// Fast path for single-byte pixels: no inner channel loop.
fn rotate_gray(src: &Plane<'_>, dst: &mut PlaneMut<'_>, angle_deg: f64) {
    let (src_w, src_h) = (src.width(), src.height());
    let (dst_w, dst_h) = (dst.width(), dst.height());

    let old_x_radius = (src_w as f64 - 1.0) / 2.0;
    let old_y_radius = (src_h as f64 - 1.0) / 2.0;
    let new_x_radius = (dst_w as f64 - 1.0) / 2.0;
    let new_y_radius = (dst_h as f64 - 1.0) / 2.0;

    // Clockwise-positive convention: negate before the matrix
    let angle_rad = -angle_deg.to_radians();
    let angle_cos = angle_rad.cos();
    let angle_sin = angle_rad.sin();

    let x_max = src_w - 1;
    let y_max = src_h - 1;

    let mut cy = -new_y_radius;
    for y in 0..dst_h {
        // Per-row terms of the affine map, constant across the x sweep
        let tx = angle_sin * cy + old_x_radius;
        let ty = angle_cos * cy + old_y_radius;

        let dst_row = dst.row_mut(y);
        let mut cx = -new_x_radius;
        for x in 0..dst_w {
            let ox = tx + angle_cos * cx;
            let oy = ty - angle_sin * cx;

            // Top-left neighbor, truncated toward zero
            let ox1 = ox as i64;
            let oy1 = oy as i64;

            if ox1 >= 0 && oy1 >= 0 && (ox1 as usize) < src_w && (oy1 as usize) < src_h {
                let ox1 = ox1 as usize;
                let oy1 = oy1 as usize;
                let ox2 = if ox1 == x_max { ox1 } else { ox1 + 1 };
                let oy2 = if oy1 == y_max { oy1 } else { oy1 + 1 };

                let dx1 = (ox - ox1 as f64).max(0.0);
                let dx2 = 1.0 - dx1;
                let dy1 = (oy - oy1 as f64).max(0.0);
                let dy2 = 1.0 - dy1;

                let top = src.row(oy1);
                let bottom = src.row(oy2);
                let p1 = top[ox1] as f64;
                let p2 = top[ox2] as f64;
                let p3 = bottom[ox1] as f64;
                let p4 = bottom[ox2] as f64;

                dst_row[x] = (dy2 * (dx2 * p1 + dx1 * p2) + dy1 * (dx2 * p3 + dx1 * p4)) as u8;
            }
            cx += 1.0;
        }
        cy += 1.0;
    }
}

/// Generic path: interpolates every byte of an N-byte pixel.
fn rotate_generic(src: &Plane<'_>, dst: &mut PlaneMut<'_>, angle_deg: f64) {
    let (src_w, src_h) = (src.width(), src.height());
    let (dst_w, dst_h) = (dst.width(), dst.height());
    let pixel_size = src.pixel_size();

    let old_x_radius = (src_w as f64 - 1.0) / 2.0;
    let old_y_radius = (src_h as f64 - 1.0) / 2.0;
    let new_x_radius = (dst_w as f64 - 1.0) / 2.0;
    let new_y_radius = (dst_h as f64 - 1.0) / 2.0;

    let angle_rad = -angle_deg.to_radians();
    let angle_cos = angle_rad.cos();
    let angle_sin = angle_rad.sin();

    let x_max = src_w - 1;
    let y_max = src_h - 1;

    let mut cy = -new_y_radius;
    for y in 0..dst_h {
        let tx = angle_sin * cy + old_x_radius;
        let ty = angle_cos * cy + old_y_radius;

        let dst_row = dst.row_mut(y);
        let mut cx = -new_x_radius;
        for x in 0..dst_w {
            let ox = tx + angle_cos * cx;
            let oy = ty - angle_sin * cx;

            let ox1 = ox as i64;
            let oy1 = oy as i64;

            if ox1 >= 0 && oy1 >= 0 && (ox1 as usize) < src_w && (oy1 as usize) < src_h {
                let ox1 = ox1 as usize;
                let oy1 = oy1 as usize;
                let ox2 = if ox1 == x_max { ox1 } else { ox1 + 1 };
                let oy2 = if oy1 == y_max { oy1 } else { oy1 + 1 };

                let dx1 = (ox - ox1 as f64).max(0.0);
                let dx2 = 1.0 - dx1;
                let dy1 = (oy - oy1 as f64).max(0.0);
                let dy2 = 1.0 - dy1;

                let top = src.row(oy1);
                let bottom = src.row(oy2);
                let left = ox1 * pixel_size;
                let right = ox2 * pixel_size;
                let out = x * pixel_size;

                for z in 0..pixel_size {
                    let p1 = top[left + z] as f64;
                    let p2 = top[right + z] as f64;
                    let p3 = bottom[left + z] as f64;
                    let p4 = bottom[right + z] as f64;
                    dst_row[out + z] =
                        (dy2 * (dx2 * p1 + dx1 * p2) + dy1 * (dx2 * p3 + dx1 * p4)) as u8;
                }
            }
            cx += 1.0;
        }
        cy += 1.0;
    }
}
