//! Common utilities for Tress.
//!
//! This crate provides foundational types used across all Tress crates:
//!
//! - [`BinaryReader`] - Position-tracked little-endian reading from byte slices
//! - [`Error`] / [`Result`] - The shared low-level error type

mod error;
mod reader;

pub use error::{Error, Result};
pub use reader::BinaryReader;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
