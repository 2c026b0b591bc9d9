//! HAIR strand-geometry file format.
//!
//! HAIR files store hair strands as flat arrays of control points plus
//! per-strand segment counts. This crate decodes and re-encodes the format
//! without interpreting the geometry.
//!
//! # File Format
//!
//! Little-endian throughout:
//! - 128-byte fixed header: 4-byte signature (`HAIR` or `hair`), strand
//!   count, point count, section bitmask, default segment count, default
//!   thickness, default transparency, default rgb color, 88-byte NUL-padded
//!   info string
//! - Optional sections in bitmask-bit order: segments (u16 per strand),
//!   points (3 x f32 per point), thickness (f32 per point), transparency
//!   (f32 per point), color (3 x f32 per point)
//!
//! A section whose bit is unset falls back to the matching header default.
//!
//! # Example
//!
//! ```no_run
//! use tress_hair::HairFile;
//!
//! let file = HairFile::open("straight.hair")?;
//! println!(
//!     "{} strands, {} points",
//!     file.header().strand_count,
//!     file.header().point_count
//! );
//!
//! // Round-trips byte-for-byte
//! file.save("copy.hair")?;
//! # Ok::<(), tress_hair::Error>(())
//! ```

mod error;
mod file;
mod header;

pub use error::{Error, Result, Section};
pub use file::HairFile;
pub use header::{HairHeader, INFO_SIZE};
