//! Error types for HAIR file parsing.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The bitmask-gated data sections of a HAIR file, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Segments,
    Points,
    Thickness,
    Transparency,
    Color,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Segments => "segments",
            Section::Points => "points",
            Section::Thickness => "thickness",
            Section::Transparency => "transparency",
            Section::Color => "color",
        };
        f.write_str(name)
    }
}

/// Errors that can occur when working with HAIR files.
#[derive(Debug, Error)]
pub enum Error {
    /// The file could not be opened or read.
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// I/O error while writing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Fewer bytes than the fixed header size were available.
    #[error("truncated header: expected {expected} bytes, got {available}")]
    TruncatedHeader { expected: usize, available: usize },

    /// The signature matched neither accepted spelling.
    #[error("invalid signature {found:?}: not a HAIR file")]
    BadMagic { found: [u8; 4] },

    /// A gated section was shorter than its recorded element count.
    #[error("truncated {section} section: needed {needed} bytes, got {available}")]
    TruncatedSection {
        section: Section,
        needed: usize,
        available: usize,
    },
}

/// Result type for HAIR file operations.
pub type Result<T> = std::result::Result<T, Error>;
