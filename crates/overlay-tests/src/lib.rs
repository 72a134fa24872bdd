//! Integration tests for overlay-rs crates.
//!
//! This crate contains end-to-end tests that verify the interaction
//! between the overlay crates, including the golden 4x4 ramp scenario
//! the alignment host uses as its regression baseline.
