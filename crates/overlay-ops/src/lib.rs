//! # overlay-ops
//!
//! Pixel-buffer algorithms for overlay alignment pipelines.
//!
//! This crate provides the numerically sensitive routines an
//! overlay-alignment host calls while searching for the best placement of
//! one video frame over another. All routines operate on borrowed
//! [`Plane`](overlay_core::Plane) views; the host owns every buffer and
//! controls parallelism across calls.
//!
//! # Modules
//!
//! - [`diff`] - Mean squared difference between two planes, maskable
//! - [`histogram`] - 256-bucket intensity histograms, maskable
//! - [`colormap`] - Palette remapping with weighted-random fallthrough
//! - [`rotate`] - Arbitrary-angle rotation with bilinear interpolation
//!
//! # Example
//!
//! ```rust
//! use overlay_core::Plane;
//! use overlay_ops::diff::squared_diff_sum;
//!
//! let a = vec![10u8; 16];
//! let b = vec![12u8; 16];
//! let pa = Plane::from_gray(&a, 4, 4, 4).unwrap();
//! let pb = Plane::from_gray(&b, 4, 4, 4).unwrap();
//!
//! let diff = squared_diff_sum(&pa, &pb).unwrap();
//! assert_eq!(diff, 4.0);
//! ```
//!
//! # Caller Contract
//!
//! Planes are assumed shape-valid at construction (overlay-core checks
//! geometry against the backing buffer). Routines here additionally check
//! the cross-plane preconditions they need - matching extents, pixel sizes,
//! nonzero areas - and return [`OpsError`] instead of degrading silently.
//!
//! No routine partitions work internally; each is safely parallelizable by
//! the caller across independent row ranges.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod colormap;
pub mod diff;
pub mod histogram;
pub mod rotate;

pub use colormap::ColorMap;
pub use error::{OpsError, OpsResult};
