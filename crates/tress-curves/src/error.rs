//! Error types for curve construction.

use thiserror::Error;

/// Errors that can occur when building curve geometry.
#[derive(Debug, Error)]
pub enum Error {
    /// HAIR file error.
    #[error("{0}")]
    Hair(#[from] tress_hair::Error),

    /// The offset table's final value disagrees with the recorded point
    /// count.
    #[error("segment counts sum to {computed} points but the header records {recorded}")]
    PointCountMismatch { computed: u64, recorded: u32 },

    /// The file carries no points section; no geometry can be built.
    #[error("file contains no points section")]
    MissingPoints,
}

/// Result type for curve operations.
pub type Result<T> = std::result::Result<T, Error>;
