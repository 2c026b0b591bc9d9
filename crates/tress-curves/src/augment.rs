//! Procedural density augmentation.
//!
//! Synthesizes extra strands from an authored asset so a low-density groom
//! can be rendered denser without re-authoring. Every synthetic strand is a
//! resampling of an *original* strand, scaled component-wise by a random
//! length ratio so the duplicates do not repeat identical geometry.

use glam::Vec3;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::curves::VertexAttributes;
use crate::offsets::StrandOffsets;

/// Density-augmentation parameters.
///
/// `density` is a real multiplier >= 1 on the strand count; its integer part
/// above one adds full copies of every strand and its fractional part is the
/// per-strand probability of one more copy, so the parameter behaves
/// continuously. `disparity` in `[0, 1]` scales the variance of the random
/// length ratio applied to each copy (0 = exact repeats).
///
/// Out-of-range values are clamped with a diagnostic, never rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Augmentation {
    density: f32,
    disparity: f32,
}

impl Default for Augmentation {
    fn default() -> Self {
        Self::NONE
    }
}

impl Augmentation {
    /// No augmentation.
    pub const NONE: Self = Self {
        density: 1.0,
        disparity: 0.0,
    };

    /// Create parameters, clamping out-of-range values.
    pub fn new(density: f32, disparity: f32) -> Self {
        let density = if density >= 1.0 {
            density
        } else {
            log::warn!("density {density} is below 1, clamping to 1 (no augmentation)");
            1.0
        };
        let disparity = if (0.0..=1.0).contains(&disparity) {
            disparity
        } else {
            let clamped = if disparity > 1.0 { 1.0 } else { 0.0 };
            log::warn!("disparity {disparity} is outside [0, 1], clamping to {clamped}");
            clamped
        };
        Self { density, disparity }
    }

    pub fn density(&self) -> f32 {
        self.density
    }

    pub fn disparity(&self) -> f32 {
        self.disparity
    }

    /// Whether applying these parameters leaves the geometry unchanged.
    pub fn is_noop(&self) -> bool {
        self.density == 1.0
    }

    /// Number of full extra copies of every strand.
    fn full_copies(&self) -> usize {
        self.density.floor() as usize - 1
    }

    /// Per-strand probability of one additional copy.
    fn fractional(&self) -> f32 {
        self.density - self.density.floor()
    }

    /// Draw one length-scale ratio, Normal(1, disparity / 20).
    fn draw_ratio<R: Rng>(&self, rng: &mut R) -> f32 {
        let z: f32 = rng.sample(StandardNormal);
        1.0 + self.disparity / 20.0 * z
    }
}

/// Expand the strand set in place.
///
/// Appends the synthetic strands (full passes first, then the fractionally
/// marked duplicates), extends the per-point arrays in lockstep, and rebuilds
/// the offset table from the expanded segment-count sequence. Copies always
/// resample the original strand's geometry, never a copy of a copy.
pub(crate) fn apply<R: Rng>(
    params: &Augmentation,
    segments: &mut Vec<u16>,
    offsets: &mut StrandOffsets,
    points: &mut Vec<Vec3>,
    thickness: &mut Vec<f32>,
    attributes: &mut Vec<VertexAttributes>,
    rng: &mut R,
) {
    if params.is_noop() {
        return;
    }

    let originals = offsets.strand_count();
    let full = params.full_copies();
    let fractional = params.fractional();

    let mut marked = Vec::new();
    if fractional > 0.0 {
        for i in 0..originals {
            if rng.gen::<f32>() <= fractional {
                marked.push(i);
            }
        }
    }

    let mut expanded = segments.clone();
    for _ in 0..full {
        expanded.extend_from_slice(segments);
    }
    for &i in &marked {
        expanded.push(segments[i]);
    }

    let mut append_scaled = |strand: usize, ratio: f32, points: &mut Vec<Vec3>| {
        for j in offsets.strand_range(strand) {
            let point = points[j] * ratio;
            points.push(point);
            attributes.push(VertexAttributes { position: point });
            let t = thickness[j];
            thickness.push(t);
        }
    };

    for _ in 0..full {
        for i in 0..originals {
            let ratio = params.draw_ratio(rng);
            append_scaled(i, ratio, points);
        }
    }
    for &i in &marked {
        let ratio = params.draw_ratio(rng);
        append_scaled(i, ratio, points);
    }

    *segments = expanded;
    *offsets = StrandOffsets::prefix_sum(segments);

    log::debug!(
        "augmented {} strands to {} (density {}, disparity {})",
        originals,
        offsets.strand_count(),
        params.density,
        params.disparity
    );
}
