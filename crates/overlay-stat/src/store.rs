//! Random-access frame statistics store.

use std::fs::{File, OpenOptions};
use std::io::{Cursor, Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::debug;

use crate::{FrameInfo, StatFormat, StatResult};

/// Store of per-frame alignment results over a seekable stream.
///
/// Backed by a file via [`FrameStat::open`], or by an in-memory buffer via
/// [`FrameStat::in_memory`] when no stat path is configured. All methods
/// take `&mut self`; callers sharing a store across threads wrap it in
/// their own lock.
#[derive(Debug)]
pub struct FrameStat<S = File> {
    stream: S,
    format: StatFormat,
}

impl FrameStat<File> {
    /// Opens (or creates) a stat file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be opened, or its version
    /// byte does not match the current format.
    pub fn open<P: AsRef<Path>>(path: P) -> StatResult<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        debug!(path = %path.display(), "opening stat file");
        let mut stat = Self {
            stream: file,
            format: StatFormat::current(),
        };
        stat.check_existing_header()?;
        Ok(stat)
    }
}

impl FrameStat<Cursor<Vec<u8>>> {
    /// Creates a store backed by memory, for runs without a stat path.
    pub fn in_memory() -> Self {
        Self {
            stream: Cursor::new(Vec::new()),
            format: StatFormat::current(),
        }
    }
}

impl<S: Read + Write + Seek> FrameStat<S> {
    fn len(&mut self) -> StatResult<u64> {
        Ok(self.stream.seek(SeekFrom::End(0))?)
    }

    fn position(&self, frame: u32) -> u64 {
        1 + self.format.record_size() as u64 * frame as u64
    }

    /// Validates the version byte of a non-empty stream.
    fn check_existing_header(&mut self) -> StatResult<()> {
        if self.len()? == 0 {
            return Ok(());
        }
        self.stream.seek(SeekFrom::Start(0))?;
        let mut header = [0u8; 1];
        self.stream.read_exact(&mut header)?;
        self.format.check_header(header[0])
    }

    /// Writes the version byte when the stream is still empty.
    fn ensure_header(&mut self) -> StatResult<()> {
        if self.len()? == 0 {
            self.stream.seek(SeekFrom::Start(0))?;
            self.stream.write_all(&[self.format.version()])?;
        }
        Ok(())
    }

    /// Result for `frame`, or `None` when nothing was stored for it.
    pub fn get(&mut self, frame: u32) -> StatResult<Option<FrameInfo>> {
        let len = self.len()?;
        if len == 0 {
            return Ok(None);
        }
        self.check_existing_header()?;
        let position = self.position(frame);
        if position + self.format.record_size() as u64 > len {
            return Ok(None);
        }
        self.stream.seek(SeekFrom::Start(position))?;
        self.format.read_record(&mut self.stream)
    }

    /// Stores (or clears, with `None`) the result for `frame`.
    ///
    /// Writing a far frame into a short file leaves zero-filled records in
    /// between, which read back as absent.
    pub fn set(&mut self, frame: u32, info: Option<&FrameInfo>) -> StatResult<()> {
        self.ensure_header()?;
        self.stream.seek(SeekFrom::Start(self.position(frame)))?;
        match info {
            Some(info) => {
                // The record's frame field follows its slot, not the input
                let record = FrameInfo { frame, ..*info };
                self.format.write_record(&mut self.stream, &record)?;
            }
            None => self.format.write_absent(&mut self.stream)?,
        }
        self.stream.flush()?;
        Ok(())
    }

    /// Stores a batch of results, each at its own frame slot.
    pub fn save<I>(&mut self, frames: I) -> StatResult<()>
    where
        I: IntoIterator<Item = FrameInfo>,
    {
        self.ensure_header()?;
        for info in frames {
            self.stream
                .seek(SeekFrom::Start(self.position(info.frame)))?;
            self.format.write_record(&mut self.stream, &info)?;
        }
        self.stream.flush()?;
        Ok(())
    }

    /// Every stored result, in frame order, skipping absent slots.
    pub fn frames(&mut self) -> StatResult<Vec<FrameInfo>> {
        let len = self.len()?;
        if len == 0 {
            return Ok(Vec::new());
        }
        self.check_existing_header()?;

        let record_size = self.format.record_size() as u64;
        let mut result = Vec::new();
        let mut position = 1;
        while position + record_size <= len {
            self.stream.seek(SeekFrom::Start(position))?;
            if let Some(info) = self.format.read_record(&mut self.stream)? {
                result.push(info);
            }
            position += record_size;
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StatError;
    use tempfile::tempdir;

    fn info(frame: u32, diff: f64) -> FrameInfo {
        FrameInfo {
            frame,
            x: frame as i32 * 2,
            y: -(frame as i32),
            width: 640,
            height: 480,
            angle_deg: 0.5,
            diff,
        }
    }

    #[test]
    fn set_get_round_trip_in_memory() {
        let mut stat = FrameStat::in_memory();
        stat.set(3, Some(&info(3, 10.0))).unwrap();

        assert_eq!(stat.get(3).unwrap(), Some(info(3, 10.0)));
        assert_eq!(stat.get(0).unwrap(), None);
        assert_eq!(stat.get(100).unwrap(), None);
    }

    #[test]
    fn sparse_writes_leave_absent_holes() {
        let mut stat = FrameStat::in_memory();
        stat.set(0, Some(&info(0, 1.0))).unwrap();
        stat.set(5, Some(&info(5, 6.0))).unwrap();

        for frame in 1..5 {
            assert_eq!(stat.get(frame).unwrap(), None, "frame {frame}");
        }
        let all = stat.frames().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].frame, 0);
        assert_eq!(all[1].frame, 5);
    }

    #[test]
    fn clearing_a_frame() {
        let mut stat = FrameStat::in_memory();
        stat.set(2, Some(&info(2, 4.0))).unwrap();
        stat.set(2, None).unwrap();
        assert_eq!(stat.get(2).unwrap(), None);
        assert!(stat.frames().unwrap().is_empty());
    }

    #[test]
    fn slot_overrides_record_frame_number() {
        let mut stat = FrameStat::in_memory();
        // Record claims frame 99 but is stored in slot 7
        stat.set(7, Some(&info(99, 2.0))).unwrap();
        let read = stat.get(7).unwrap().unwrap();
        assert_eq!(read.frame, 7);
    }

    #[test]
    fn save_batch_and_enumerate() {
        let mut stat = FrameStat::in_memory();
        stat.save([info(4, 4.0), info(1, 1.0), info(9, 9.0)]).unwrap();

        let all = stat.frames().unwrap();
        let numbers: Vec<u32> = all.iter().map(|i| i.frame).collect();
        assert_eq!(numbers, vec![1, 4, 9]);
    }

    #[test]
    fn file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clip.stat");

        {
            let mut stat = FrameStat::open(&path).unwrap();
            stat.save((0..20).map(|f| info(f, f as f64))).unwrap();
        }

        let mut reopened = FrameStat::open(&path).unwrap();
        assert_eq!(reopened.frames().unwrap().len(), 20);
        assert_eq!(reopened.get(13).unwrap(), Some(info(13, 13.0)));
    }

    #[test]
    fn rejects_newer_version_byte() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("future.stat");
        std::fs::write(&path, [StatFormat::VERSION + 1]).unwrap();

        assert!(matches!(
            FrameStat::open(&path),
            Err(StatError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn empty_store_reads_cleanly() {
        let mut stat = FrameStat::in_memory();
        assert_eq!(stat.get(0).unwrap(), None);
        assert!(stat.frames().unwrap().is_empty());
    }
}
