//! # overlay-core
//!
//! Core raster types for overlay alignment processing.
//!
//! This crate provides the borrowed plane views that all overlay operations
//! work on: caller-owned byte buffers addressed row-major with an explicit
//! stride in bytes.
//!
//! # Types
//!
//! - [`Plane`] - Immutable borrowed view into a pixel buffer
//! - [`PlaneMut`] - Mutable borrowed view into a pixel buffer
//! - [`PlaneBuf`] - Owned, contiguous pixel buffer for hosts and tests
//!
//! # Addressing Model
//!
//! A plane is `{width, height, stride, pixel_size}` over a byte slice.
//! Rows start `stride` bytes apart; `stride` may exceed
//! `width * pixel_size` to allow row padding. Within a row, pixels are
//! `pixel_size` bytes apart and byte 0 of each pixel is its primary
//! (intensity) sample.
//!
//! ```text
//! Memory: [p p p p p p . .]  <- row 0 (content, then padding)
//!         [p p p p p p . .]  <- row 1
//!         ...
//! ```
//!
//! # Example
//!
//! ```rust
//! use overlay_core::Plane;
//!
//! // 3x2 single-channel plane with one padding byte per row
//! let data = [1u8, 2, 3, 0, 4, 5, 6, 0];
//! let plane = Plane::from_slice(&data, 3, 2, 4, 1).unwrap();
//!
//! assert_eq!(plane.row(0), &[1, 2, 3]);
//! assert_eq!(plane.sample(1, 1), 5);
//! ```
//!
//! # Used By
//!
//! - `overlay-ops` - Difference, histogram, color map, and rotation routines

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod plane;

pub use error::{Error, Result};
pub use plane::{Plane, PlaneBuf, PlaneMut};
