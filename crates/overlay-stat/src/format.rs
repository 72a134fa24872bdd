//! On-disk record format for frame alignment results.
//!
//! Records are fixed-size and little-endian. Each starts with a marker
//! word of `frame + 1`, so a region of zeroes (a hole left by sparse
//! writes) reads back as "no result for this frame".

use std::io::{Read, Write};

use crate::{StatError, StatResult};

/// Alignment result for a single frame.
///
/// Placement of the overlay frame over the source frame: integer offset,
/// scaled extent, rotation angle, and the difference metric the search
/// settled on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// Frame number within the clip.
    pub frame: u32,
    /// Horizontal offset of the overlay, in pixels.
    pub x: i32,
    /// Vertical offset of the overlay, in pixels.
    pub y: i32,
    /// Overlay width after scaling, in pixels.
    pub width: u32,
    /// Overlay height after scaling, in pixels.
    pub height: u32,
    /// Rotation angle in degrees, clockwise positive.
    pub angle_deg: f64,
    /// Mean squared difference at this placement.
    pub diff: f64,
}

/// Record codec for one stat file format version.
#[derive(Debug, Clone, Copy)]
pub struct StatFormat {
    version: u8,
}

impl StatFormat {
    /// Current format version.
    pub const VERSION: u8 = 1;

    /// Bytes per record: marker u32, x i32, y i32, width u32, height u32,
    /// angle f64, diff f64.
    const RECORD_SIZE: usize = 4 + 4 + 4 + 4 + 4 + 8 + 8;

    /// Codec for the current version.
    pub fn current() -> Self {
        Self {
            version: Self::VERSION,
        }
    }

    /// Format version this codec reads and writes.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Fixed record size in bytes.
    pub fn record_size(&self) -> usize {
        Self::RECORD_SIZE
    }

    /// Validates a file's version byte against this codec.
    pub fn check_header(&self, header: u8) -> StatResult<()> {
        if header > self.version {
            return Err(StatError::UnsupportedVersion {
                found: header,
                supported: self.version,
            });
        }
        if header > 0 && header < self.version {
            return Err(StatError::StaleVersion {
                found: header,
                expected: self.version,
            });
        }
        Ok(())
    }

    /// Reads one record; `None` when the marker word is zero.
    pub fn read_record<R: Read>(&self, reader: &mut R) -> StatResult<Option<FrameInfo>> {
        let mut buf = [0u8; Self::RECORD_SIZE];
        reader.read_exact(&mut buf)?;

        let marker = u32::from_le_bytes(buf[0..4].try_into().unwrap());
        if marker == 0 {
            return Ok(None);
        }
        Ok(Some(FrameInfo {
            frame: marker - 1,
            x: i32::from_le_bytes(buf[4..8].try_into().unwrap()),
            y: i32::from_le_bytes(buf[8..12].try_into().unwrap()),
            width: u32::from_le_bytes(buf[12..16].try_into().unwrap()),
            height: u32::from_le_bytes(buf[16..20].try_into().unwrap()),
            angle_deg: f64::from_le_bytes(buf[20..28].try_into().unwrap()),
            diff: f64::from_le_bytes(buf[28..36].try_into().unwrap()),
        }))
    }

    /// Writes one record at the current position.
    pub fn write_record<W: Write>(&self, writer: &mut W, info: &FrameInfo) -> StatResult<()> {
        let mut buf = [0u8; Self::RECORD_SIZE];
        buf[0..4].copy_from_slice(&(info.frame + 1).to_le_bytes());
        buf[4..8].copy_from_slice(&info.x.to_le_bytes());
        buf[8..12].copy_from_slice(&info.y.to_le_bytes());
        buf[12..16].copy_from_slice(&info.width.to_le_bytes());
        buf[16..20].copy_from_slice(&info.height.to_le_bytes());
        buf[20..28].copy_from_slice(&info.angle_deg.to_le_bytes());
        buf[28..36].copy_from_slice(&info.diff.to_le_bytes());
        writer.write_all(&buf)?;
        Ok(())
    }

    /// Writes an "absent" record (zero marker) at the current position.
    pub fn write_absent<W: Write>(&self, writer: &mut W) -> StatResult<()> {
        writer.write_all(&[0u8; Self::RECORD_SIZE])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample_info() -> FrameInfo {
        FrameInfo {
            frame: 100,
            x: -7,
            y: 3,
            width: 1920,
            height: 1080,
            angle_deg: -1.75,
            diff: 123.456,
        }
    }

    #[test]
    fn record_round_trip() {
        let format = StatFormat::current();
        let mut buf = Vec::new();
        format.write_record(&mut buf, &sample_info()).unwrap();
        assert_eq!(buf.len(), format.record_size());

        let read = format.read_record(&mut Cursor::new(buf)).unwrap();
        assert_eq!(read, Some(sample_info()));
    }

    #[test]
    fn zero_marker_reads_as_absent() {
        let format = StatFormat::current();
        let buf = vec![0u8; format.record_size()];
        let read = format.read_record(&mut Cursor::new(buf)).unwrap();
        assert_eq!(read, None);
    }

    #[test]
    fn header_versions() {
        let format = StatFormat::current();
        assert!(format.check_header(0).is_ok()); // fresh file
        assert!(format.check_header(StatFormat::VERSION).is_ok());
        assert!(matches!(
            format.check_header(StatFormat::VERSION + 1),
            Err(StatError::UnsupportedVersion { .. })
        ));

        let future = StatFormat { version: 2 };
        assert!(matches!(
            future.check_header(1),
            Err(StatError::StaleVersion { .. })
        ));
    }

    #[test]
    fn truncated_record_is_an_io_error() {
        let format = StatFormat::current();
        let buf = vec![1u8; format.record_size() - 1];
        assert!(matches!(
            format.read_record(&mut Cursor::new(buf)),
            Err(StatError::Io(_))
        ));
    }
}
