//! Curve geometry for HAIR assets.
//!
//! This crate turns a decoded [`tress_hair::HairFile`] into the index/offset
//! representation a curve-primitive ray tracer consumes, and synthetically
//! increases apparent strand density without re-authoring the asset.
//!
//! The pipeline runs once per asset load, synchronously:
//!
//! 1. Per-strand segment counts become a strictly increasing offset table
//!    ([`StrandOffsets`]), checked against the recorded point count.
//! 2. Points are remapped from the on-disk axis convention
//!    ([`AxisMapping`]), optionally folding a bilateral asset onto one side.
//! 3. Density augmentation ([`Augmentation`]) appends length-perturbed
//!    copies of the original strands.
//!
//! The finished [`Curves`] aggregate exposes the derived views the renderer
//! needs: segment lists, per-segment parametrization, per-strand run-length
//! tables, radius profiles, tangents, and bounds.
//!
//! # Example
//!
//! ```no_run
//! use tress_curves::{Augmentation, Curves, LoadOptions, SplineMode};
//!
//! let options = LoadOptions {
//!     augmentation: Augmentation::new(1.5, 0.3),
//!     spline_mode: SplineMode::Cubic,
//!     ..Default::default()
//! };
//! let curves = Curves::load("straight.hair", &options)?;
//! println!("{} renderable segments", curves.segment_count());
//! # Ok::<(), tress_curves::Error>(())
//! ```

mod augment;
mod bounds;
mod curves;
mod directions;
mod error;
mod mapping;
mod offsets;
mod views;

pub use augment::Augmentation;
pub use bounds::Aabb;
pub use curves::{Curves, LoadOptions, RadiusMode, SplineMode, VertexAttributes};
pub use error::{Error, Result};
pub use mapping::{AxisMapping, Side};
pub use offsets::StrandOffsets;
