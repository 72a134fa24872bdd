//! # overlay-stat
//!
//! Versioned binary store for per-frame overlay alignment results.
//!
//! An alignment pass over a clip is expensive; this crate persists its
//! output - one [`FrameInfo`] per frame - so later passes and render runs
//! can seek straight to a frame's result. The file is a 1-byte format
//! version followed by fixed-size records addressed by frame number, so
//! lookups are a single seek and frames can be written in any order.
//!
//! # Example
//!
//! ```rust
//! use overlay_stat::{FrameInfo, FrameStat};
//!
//! let mut stat = FrameStat::in_memory();
//! let info = FrameInfo {
//!     frame: 5,
//!     x: 12,
//!     y: -3,
//!     width: 1280,
//!     height: 720,
//!     angle_deg: 0.25,
//!     diff: 41.5,
//! };
//! stat.set(5, Some(&info)).unwrap();
//!
//! assert_eq!(stat.get(5).unwrap(), Some(info));
//! assert_eq!(stat.get(4).unwrap(), None);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod format;
mod store;

pub use error::{StatError, StatResult};
pub use format::{FrameInfo, StatFormat};
pub use store::FrameStat;
