//! Borrowed and owned raster plane types.
//!
//! [`Plane`] and [`PlaneMut`] are non-owning windows into caller-owned byte
//! buffers. Construction validates the full geometry up front, so every row
//! access after that is known to stay inside the buffer. [`PlaneBuf`] is the
//! owned, contiguous counterpart used by hosts and tests.

use crate::{Error, Result};

/// Immutable borrowed view of a strided pixel plane.
///
/// The view borrows the backing buffer for its lifetime and never outlives
/// it. Rows advance by `stride` bytes regardless of content width, which
/// preserves the padded-row layouts video frame buffers use.
#[derive(Debug, Clone, Copy)]
pub struct Plane<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
    pixel_size: usize,
}

/// Minimum buffer length for a plane, or `None` on overflow.
///
/// Only the content bytes of the last row are required, not its padding.
fn min_required_len(
    width: usize,
    height: usize,
    stride: usize,
    pixel_size: usize,
) -> Option<usize> {
    if width == 0 || height == 0 {
        return Some(0);
    }
    let row_bytes = width.checked_mul(pixel_size)?;
    let base = height.checked_sub(1)?.checked_mul(stride)?;
    base.checked_add(row_bytes)
}

fn check_geometry(
    len: usize,
    width: usize,
    height: usize,
    stride: usize,
    pixel_size: usize,
) -> Result<()> {
    if pixel_size == 0 {
        return Err(Error::InvalidPixelSize { pixel_size });
    }
    let row_bytes = width
        .checked_mul(pixel_size)
        .ok_or(Error::GeometryOverflow {
            width,
            height,
            stride,
        })?;
    if stride < row_bytes {
        return Err(Error::StrideTooSmall { stride, row_bytes });
    }
    let required = min_required_len(width, height, stride, pixel_size).ok_or(
        Error::GeometryOverflow {
            width,
            height,
            stride,
        },
    )?;
    if len < required {
        return Err(Error::BufferTooSmall {
            required,
            actual: len,
        });
    }
    Ok(())
}

impl<'a> Plane<'a> {
    /// Creates a view over `data` with the given geometry.
    ///
    /// # Errors
    ///
    /// Returns an error if `pixel_size` is zero, `stride` cannot span a row
    /// of content, or `data` is too short for the described plane.
    ///
    /// # Example
    ///
    /// ```rust
    /// use overlay_core::Plane;
    ///
    /// let data = vec![0u8; 16];
    /// let plane = Plane::from_slice(&data, 4, 4, 4, 1).unwrap();
    /// assert_eq!(plane.width(), 4);
    /// ```
    pub fn from_slice(
        data: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
        pixel_size: usize,
    ) -> Result<Self> {
        check_geometry(data.len(), width, height, stride, pixel_size)?;
        Ok(Self {
            data,
            width,
            height,
            stride,
            pixel_size,
        })
    }

    /// Creates a single-channel (1 byte per pixel) view.
    pub fn from_gray(data: &'a [u8], width: usize, height: usize, stride: usize) -> Result<Self> {
        Self::from_slice(data, width, height, stride, 1)
    }

    /// Plane width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Plane height in rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes between the starts of consecutive rows.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Bytes per pixel.
    #[inline]
    pub fn pixel_size(&self) -> usize {
        self.pixel_size
    }

    /// Content bytes per row (`width * pixel_size`), excluding padding.
    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.width * self.pixel_size
    }

    /// Content bytes of row `y`, padding excluded.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.row_bytes()]
    }

    /// Primary sample (byte 0) of pixel `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn sample(&self, x: usize, y: usize) -> u8 {
        assert!(x < self.width, "column index out of bounds");
        self.data[y * self.stride + x * self.pixel_size]
    }

    /// Primary sample of pixel `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.stride + x * self.pixel_size).copied()
    }
}

/// Mutable borrowed view of a strided pixel plane.
#[derive(Debug)]
pub struct PlaneMut<'a> {
    data: &'a mut [u8],
    width: usize,
    height: usize,
    stride: usize,
    pixel_size: usize,
}

impl<'a> PlaneMut<'a> {
    /// Creates a mutable view over `data` with the given geometry.
    ///
    /// # Errors
    ///
    /// Same validation as [`Plane::from_slice`].
    pub fn from_slice_mut(
        data: &'a mut [u8],
        width: usize,
        height: usize,
        stride: usize,
        pixel_size: usize,
    ) -> Result<Self> {
        check_geometry(data.len(), width, height, stride, pixel_size)?;
        Ok(Self {
            data,
            width,
            height,
            stride,
            pixel_size,
        })
    }

    /// Plane width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Plane height in rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes between the starts of consecutive rows.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Bytes per pixel.
    #[inline]
    pub fn pixel_size(&self) -> usize {
        self.pixel_size
    }

    /// Content bytes per row (`width * pixel_size`), excluding padding.
    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.width * self.pixel_size
    }

    /// Content bytes of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.width * self.pixel_size]
    }

    /// Mutable content bytes of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        let row_bytes = self.width * self.pixel_size;
        &mut self.data[start..start + row_bytes]
    }

    /// Reborrows as an immutable [`Plane`].
    pub fn as_plane(&self) -> Plane<'_> {
        Plane {
            data: self.data,
            width: self.width,
            height: self.height,
            stride: self.stride,
            pixel_size: self.pixel_size,
        }
    }
}

/// Owned, contiguous pixel buffer.
///
/// Stride equals `width * pixel_size`; use [`Plane`] views directly for
/// padded layouts. Mainly a convenience for hosts and tests that need a
/// destination buffer to hand out as [`PlaneMut`].
///
/// # Example
///
/// ```rust
/// use overlay_core::PlaneBuf;
///
/// let mut buf = PlaneBuf::new(4, 4, 1);
/// buf.data_mut()[0] = 255;
/// assert_eq!(buf.view().sample(0, 0), 255);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaneBuf {
    data: Vec<u8>,
    width: usize,
    height: usize,
    pixel_size: usize,
}

impl PlaneBuf {
    /// Creates a zero-filled buffer.
    ///
    /// # Panics
    ///
    /// Panics if the total size overflows `usize`.
    pub fn new(width: usize, height: usize, pixel_size: usize) -> Self {
        let len = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(pixel_size))
            .expect("plane size overflow");
        Self {
            data: vec![0; len],
            width,
            height,
            pixel_size,
        }
    }

    /// Creates a buffer filled with `value` in every byte.
    pub fn filled(width: usize, height: usize, pixel_size: usize, value: u8) -> Self {
        let mut buf = Self::new(width, height, pixel_size);
        buf.data.fill(value);
        buf
    }

    /// Wraps an existing byte vector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferTooSmall`] when `data` does not hold exactly
    /// `width * height * pixel_size` bytes.
    pub fn from_vec(
        width: usize,
        height: usize,
        pixel_size: usize,
        data: Vec<u8>,
    ) -> Result<Self> {
        if pixel_size == 0 {
            return Err(Error::InvalidPixelSize { pixel_size });
        }
        let expected = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(pixel_size))
            .ok_or(Error::GeometryOverflow {
                width,
                height,
                stride: width.saturating_mul(pixel_size),
            })?;
        if data.len() != expected {
            return Err(Error::BufferTooSmall {
                required: expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            pixel_size,
        })
    }

    /// Buffer width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Buffer height in rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per pixel.
    #[inline]
    pub fn pixel_size(&self) -> usize {
        self.pixel_size
    }

    /// Raw bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Immutable view of the whole buffer.
    pub fn view(&self) -> Plane<'_> {
        Plane {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width * self.pixel_size,
            pixel_size: self.pixel_size,
        }
    }

    /// Mutable view of the whole buffer.
    pub fn view_mut(&mut self) -> PlaneMut<'_> {
        PlaneMut {
            width: self.width,
            height: self.height,
            stride: self.width * self.pixel_size,
            pixel_size: self.pixel_size,
            data: &mut self.data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Plane, PlaneBuf, PlaneMut};
    use crate::Error;

    #[test]
    fn view_indexing_with_stride() {
        let data = vec![1u8, 2, 3, 99, 4, 5, 6, 88];
        let plane = Plane::from_gray(&data, 3, 2, 4).expect("valid plane");

        assert_eq!(plane.row(0), &[1, 2, 3]);
        assert_eq!(plane.row(1), &[4, 5, 6]);
        assert_eq!(plane.sample(0, 1), 4);
        assert_eq!(plane.get(2, 1), Some(6));
        assert_eq!(plane.get(3, 1), None);
    }

    #[test]
    fn multibyte_pixels_sample_first_byte() {
        // 2x2 BGRA-style plane, 4 bytes per pixel
        let data: Vec<u8> = (0..32).collect();
        let plane = Plane::from_slice(&data, 2, 2, 16, 4).expect("valid plane");

        assert_eq!(plane.sample(0, 0), 0);
        assert_eq!(plane.sample(1, 0), 4);
        assert_eq!(plane.sample(1, 1), 20);
        assert_eq!(plane.row_bytes(), 8);
    }

    #[test]
    fn last_row_padding_not_required() {
        // 2 rows of 3 pixels, stride 5: last row needs only 3 content bytes
        let data = vec![0u8; 5 + 3];
        assert!(Plane::from_gray(&data, 3, 2, 5).is_ok());
        let short = vec![0u8; 5 + 2];
        assert!(matches!(
            Plane::from_gray(&short, 3, 2, 5),
            Err(Error::BufferTooSmall { required: 8, .. })
        ));
    }

    #[test]
    fn rejects_bad_geometry() {
        let data = vec![0u8; 64];
        assert!(matches!(
            Plane::from_slice(&data, 4, 4, 4, 0),
            Err(Error::InvalidPixelSize { .. })
        ));
        assert!(matches!(
            Plane::from_slice(&data, 4, 4, 3, 1),
            Err(Error::StrideTooSmall { .. })
        ));
    }

    #[test]
    fn empty_plane_is_valid() {
        let plane = Plane::from_gray(&[], 0, 0, 0).expect("empty plane");
        assert_eq!(plane.width(), 0);
        assert_eq!(plane.row_bytes(), 0);
    }

    #[test]
    fn mutable_rows_write_through() {
        let mut data = vec![0u8; 8];
        let mut plane = PlaneMut::from_slice_mut(&mut data, 3, 2, 4, 1).expect("valid plane");
        plane.row_mut(1).copy_from_slice(&[7, 8, 9]);

        assert_eq!(plane.as_plane().row(1), &[7, 8, 9]);
        assert_eq!(&data[4..7], &[7, 8, 9]);
        assert_eq!(data[3], 0); // padding untouched
    }

    #[test]
    fn plane_buf_round_trip() {
        let buf = PlaneBuf::from_vec(2, 2, 1, vec![1, 2, 3, 4]).expect("valid buf");
        assert_eq!(buf.view().row(1), &[3, 4]);
        assert!(PlaneBuf::from_vec(2, 2, 1, vec![0; 3]).is_err());

        let filled = PlaneBuf::filled(2, 2, 2, 0xAB);
        assert!(filled.data().iter().all(|&b| b == 0xAB));
    }
}
