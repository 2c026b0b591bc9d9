//! Tress - HAIR strand-geometry ingestion and density augmentation.
//!
//! This crate provides a unified interface to the Tress library ecosystem
//! for working with strand-based hair assets.
//!
//! # Crates
//!
//! - [`tress_common`] - Common utilities (binary reading, shared errors)
//! - [`tress_hair`] - HAIR file format decoding and encoding
//! - [`tress_curves`] - Curve geometry: offsets, axis mapping, density
//!   augmentation, derived views
//!
//! # Example
//!
//! ```no_run
//! use tress::prelude::*;
//!
//! let options = LoadOptions {
//!     augmentation: Augmentation::new(2.0, 0.5),
//!     spline_mode: SplineMode::Cubic,
//!     ..Default::default()
//! };
//!
//! let curves = Curves::load("straight.hair", &options)?;
//! println!("{curves}");
//!
//! // Hand the derived views to the geometry-upload layer
//! let _segments = curves.segments();
//! let _info = curves.strand_info();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use tress_common as common;
pub use tress_curves as curves;
pub use tress_hair as hair;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use tress_common::BinaryReader;
    pub use tress_curves::{
        Aabb, Augmentation, AxisMapping, Curves, LoadOptions, RadiusMode, Side, SplineMode,
        StrandOffsets, VertexAttributes,
    };
    pub use tress_hair::{HairFile, HairHeader};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
