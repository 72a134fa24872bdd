//! Intensity histograms over a plane's primary channel.
//!
//! The host uses these to match tonal distributions between source and
//! overlay frames before scoring. Multi-byte pixels are subsampled at byte
//! 0 of each pixel, so an interleaved BGR plane yields a histogram of its
//! first channel.
//!
//! # Example
//!
//! ```rust
//! use overlay_core::Plane;
//! use overlay_ops::histogram::histogram;
//!
//! let data = [0u8, 0, 7, 255];
//! let plane = Plane::from_gray(&data, 2, 2, 2).unwrap();
//!
//! let hist = histogram(&plane);
//! assert_eq!(hist[0], 2);
//! assert_eq!(hist[7], 1);
//! assert_eq!(hist[255], 1);
//! ```

use overlay_core::Plane;
use tracing::trace;

use crate::{OpsError, OpsResult};

/// Number of histogram buckets (8-bit intensities).
pub const BUCKETS: usize = 256;

/// Counts 8-bit intensities over every pixel of `image`.
///
/// Steps through each row by the plane's pixel size, counting the primary
/// sample of each pixel. The bucket counts always sum to
/// `width * height`.
pub fn histogram(image: &Plane<'_>) -> [u32; BUCKETS] {
    trace!(
        width = image.width(),
        height = image.height(),
        pixel_size = image.pixel_size(),
        "histogram"
    );

    let mut hist = [0u32; BUCKETS];
    let step = image.pixel_size();
    for y in 0..image.height() {
        for &value in image.row(y).iter().step_by(step) {
            hist[value as usize] += 1;
        }
    }
    hist
}

/// Counts 8-bit intensities where the paired mask sample is nonzero.
///
/// Image and mask may have independent strides and pixel sizes but must
/// agree in width and height. The bucket counts sum to the number of
/// nonzero mask samples.
///
/// # Errors
///
/// Returns [`OpsError::SizeMismatch`] when the mask extent differs from
/// the image extent.
pub fn histogram_masked(image: &Plane<'_>, mask: &Plane<'_>) -> OpsResult<[u32; BUCKETS]> {
    if image.width() != mask.width() || image.height() != mask.height() {
        return Err(OpsError::SizeMismatch(format!(
            "histogram mask extent {}x{} does not match image {}x{}",
            mask.width(),
            mask.height(),
            image.width(),
            image.height()
        )));
    }
    trace!(
        width = image.width(),
        height = image.height(),
        image_pixel_size = image.pixel_size(),
        mask_pixel_size = mask.pixel_size(),
        "histogram_masked"
    );

    let mut hist = [0u32; BUCKETS];
    for y in 0..image.height() {
        let samples = image.row(y).iter().step_by(image.pixel_size());
        let mask_samples = mask.row(y).iter().step_by(mask.pixel_size());
        for (&value, &included) in samples.zip(mask_samples) {
            if included > 0 {
                hist[value as usize] += 1;
            }
        }
    }
    Ok(hist)
}

#[cfg(test)]
mod tests {
    use super::*;
    use overlay_core::Plane;

    #[test]
    fn counts_sum_to_area() {
        let data: Vec<u8> = (0..48).map(|i| (i % 7) as u8).collect();
        let plane = Plane::from_gray(&data, 8, 6, 8).unwrap();
        let hist = histogram(&plane);
        assert_eq!(hist.iter().sum::<u32>(), 48);
    }

    #[test]
    fn ramp_fills_singleton_buckets() {
        let data: Vec<u8> = (0..16).collect();
        let plane = Plane::from_gray(&data, 4, 4, 4).unwrap();
        let hist = histogram(&plane);
        for v in 0..16 {
            assert_eq!(hist[v], 1, "bucket {v}");
        }
        assert_eq!(hist[16..].iter().sum::<u32>(), 0);
    }

    #[test]
    fn multibyte_pixels_count_primary_channel_only() {
        // 2x2 plane, 3 bytes per pixel: primary samples 9, 9, 4, 4
        let data = [9u8, 1, 2, 9, 3, 4, 4, 5, 6, 4, 7, 8];
        let plane = Plane::from_slice(&data, 2, 2, 6, 3).unwrap();
        let hist = histogram(&plane);
        assert_eq!(hist[9], 2);
        assert_eq!(hist[4], 2);
        assert_eq!(hist.iter().sum::<u32>(), 4);
    }

    #[test]
    fn padded_rows_are_skipped() {
        let data = [1u8, 2, 0xEE, 0xEE, 3, 4, 0xEE, 0xEE];
        let plane = Plane::from_gray(&data, 2, 2, 4).unwrap();
        let hist = histogram(&plane);
        assert_eq!(hist[0xEE], 0);
        assert_eq!(hist.iter().sum::<u32>(), 4);
    }

    #[test]
    fn masked_counts_match_mask_population() {
        let data: Vec<u8> = (0..36).map(|i| (i * 5 % 256) as u8).collect();
        let mask: Vec<u8> = (0..36).map(|i| if i % 3 == 0 { 200 } else { 0 }).collect();
        let image = Plane::from_gray(&data, 6, 6, 6).unwrap();
        let mask_plane = Plane::from_gray(&mask, 6, 6, 6).unwrap();

        let hist = histogram_masked(&image, &mask_plane).unwrap();
        let included = mask.iter().filter(|&&m| m > 0).count() as u32;
        assert_eq!(hist.iter().sum::<u32>(), included);
    }

    #[test]
    fn masked_with_differing_pixel_sizes() {
        // Image 2 bytes per pixel, mask 1 byte per pixel
        let data = [50u8, 0, 60, 0, 70, 0, 80, 0];
        let mask = [255u8, 0, 0, 255];
        let image = Plane::from_slice(&data, 2, 2, 4, 2).unwrap();
        let mask_plane = Plane::from_gray(&mask, 2, 2, 2).unwrap();

        let hist = histogram_masked(&image, &mask_plane).unwrap();
        assert_eq!(hist[50], 1);
        assert_eq!(hist[60], 0);
        assert_eq!(hist[70], 0);
        assert_eq!(hist[80], 1);
    }

    #[test]
    fn masked_rejects_extent_mismatch() {
        let data = [0u8; 4];
        let mask = [0u8; 6];
        let image = Plane::from_gray(&data, 2, 2, 2).unwrap();
        let mask_plane = Plane::from_gray(&mask, 3, 2, 3).unwrap();
        assert!(matches!(
            histogram_masked(&image, &mask_plane),
            Err(OpsError::SizeMismatch(_))
        ));
    }
}
