//! Derived views consumed by the ray-tracing backend.
//!
//! All views are computed from the offsets table and the selected spline
//! mode. A strand whose point count does not exceed the curve degree has no
//! renderable segment and contributes nothing.

use glam::{UVec2, Vec2, Vec3};
use rand::Rng;
use rand_distr::StandardNormal;

use crate::curves::Curves;

impl Curves {
    /// Control-point indices of all ray-traceable curve segments, in strand
    /// order.
    ///
    /// Each segment is identified by the index of its first control point:
    /// strand `[start, end)` contributes `[start, end - degree)`, empty when
    /// the strand is shorter than one segment.
    pub fn segments(&self) -> Vec<u32> {
        let degree = self.curve_degree();
        let mut segments = Vec::with_capacity(self.segment_count());
        for range in self.offsets().iter_ranges() {
            let end = range.end.saturating_sub(degree);
            segments.extend((range.start..end).map(|i| i as u32));
        }
        segments
    }

    /// Total number of renderable segments.
    pub fn segment_count(&self) -> usize {
        let degree = self.curve_degree();
        self.offsets()
            .iter_ranges()
            .map(|r| r.len().saturating_sub(degree))
            .sum()
    }

    /// Per-segment `(u, 1 / segments)` parametrization along the owning
    /// strand, independent of absolute strand length.
    pub fn strand_u(&self) -> Vec<Vec2> {
        let degree = self.curve_degree();
        let mut strand_u = Vec::with_capacity(self.segment_count());
        for range in self.offsets().iter_ranges() {
            let segments = range.len().saturating_sub(degree);
            if segments == 0 {
                continue;
            }
            let scale = 1.0 / segments as f32;
            strand_u.extend((0..segments).map(|i| Vec2::new(i as f32 * scale, scale)));
        }
        strand_u
    }

    /// Per-segment ordinal of the owning strand, monotonically
    /// non-decreasing.
    pub fn strand_indices(&self) -> Vec<u32> {
        let degree = self.curve_degree();
        let mut indices = Vec::with_capacity(self.segment_count());
        for (strand, range) in self.offsets().iter_ranges().enumerate() {
            let segments = range.len().saturating_sub(degree);
            indices.extend(std::iter::repeat(strand as u32).take(segments));
        }
        indices
    }

    /// Per-strand random seed for shading-time variation: one
    /// (uniform, normal, normal) tuple drawn per strand and replicated across
    /// that strand's segments.
    ///
    /// Regenerated on every call from the supplied RNG; seed the RNG for
    /// reproducible output.
    pub fn strand_rand<R: Rng>(&self, rng: &mut R) -> Vec<Vec3> {
        let degree = self.curve_degree();
        let mut rand = Vec::with_capacity(self.segment_count());
        for range in self.offsets().iter_ranges() {
            let tuple = Vec3::new(
                rng.gen(),
                rng.sample(StandardNormal),
                rng.sample(StandardNormal),
            );
            let segments = range.len().saturating_sub(degree);
            rand.extend(std::iter::repeat(tuple).take(segments));
        }
        rand
    }

    /// Per-strand `(first segment index, segment count)` run-length index
    /// into [`segments`](Self::segments).
    pub fn strand_info(&self) -> Vec<UVec2> {
        let degree = self.curve_degree();
        let mut info = Vec::with_capacity(self.offsets().strand_count());
        let mut first = 0u32;
        for range in self.offsets().iter_ranges() {
            let segments = range.len().saturating_sub(degree) as u32;
            info.push(UVec2::new(first, segments));
            first += segments;
        }
        info
    }
}
