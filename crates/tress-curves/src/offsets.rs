//! Strand offset table.

use std::ops::Range;

use crate::{Error, Result};

/// Point offsets locating each strand inside the flat point array.
///
/// For `n` strands the table has `n + 1` entries: entry `i` is the index of
/// strand `i`'s first point and the final entry is one past the last point of
/// the last strand. A strand with `s` segments occupies `s + 1` points, so
/// the table is the prefix sum of `1 + segments[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrandOffsets(Vec<u32>);

impl StrandOffsets {
    /// Build the offset table from per-strand segment counts, checking the
    /// total against the recorded point count.
    ///
    /// Fails before any geometry is built when the prefix sum disagrees with
    /// `recorded_points`; a mismatched table would corrupt every downstream
    /// computation.
    pub fn from_segment_counts(segments: &[u16], recorded_points: u32) -> Result<Self> {
        // Sum in u64: a crafted segment list can overflow a u32 total, and
        // an overflowed total is itself a mismatch that must surface as the
        // typed error rather than wrap or panic.
        let computed: u64 = segments.iter().map(|&s| 1 + u64::from(s)).sum();
        if computed != u64::from(recorded_points) {
            return Err(Error::PointCountMismatch {
                computed,
                recorded: recorded_points,
            });
        }
        Ok(Self::prefix_sum(segments))
    }

    /// Build the offset table without the point-count check.
    ///
    /// Used after augmentation, where the expanded totals are true by
    /// construction (the originals passed the checked constructor) and the
    /// header is updated from the table.
    pub(crate) fn prefix_sum(segments: &[u16]) -> Self {
        let mut offsets = Vec::with_capacity(segments.len() + 1);
        let mut total = 0u32;
        offsets.push(0);
        for &s in segments {
            total += 1 + u32::from(s);
            offsets.push(total);
        }
        Self(offsets)
    }

    /// Number of strands the table indexes.
    pub fn strand_count(&self) -> usize {
        self.0.len() - 1
    }

    /// One past the last point of the last strand.
    pub fn total_points(&self) -> u32 {
        *self.0.last().unwrap_or(&0)
    }

    /// The point range of strand `i`.
    pub fn strand_range(&self, i: usize) -> Range<usize> {
        self.0[i] as usize..self.0[i + 1] as usize
    }

    /// Number of points in strand `i`.
    pub fn point_count(&self, i: usize) -> usize {
        (self.0[i + 1] - self.0[i]) as usize
    }

    /// Iterate over all strand point ranges in strand order.
    pub fn iter_ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.0
            .windows(2)
            .map(|w| w[0] as usize..w[1] as usize)
    }

    /// The raw offset entries.
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_sum_locates_strands() {
        let offsets = StrandOffsets::from_segment_counts(&[3, 1], 6).unwrap();
        assert_eq!(offsets.as_slice(), &[0, 4, 6]);
        assert_eq!(offsets.strand_count(), 2);
        assert_eq!(offsets.total_points(), 6);
        assert_eq!(offsets.strand_range(0), 0..4);
        assert_eq!(offsets.strand_range(1), 4..6);
    }

    #[test]
    fn test_offsets_strictly_increasing() {
        let offsets = StrandOffsets::prefix_sum(&[0, 2, 5, 1]);
        let slice = offsets.as_slice();
        assert_eq!(slice[0], 0);
        for w in slice.windows(2) {
            assert!(w[0] < w[1]);
        }
        // a zero-segment strand still occupies one point
        assert_eq!(offsets.point_count(0), 1);
    }

    #[test]
    fn test_point_count_mismatch_fails_fast() {
        let err = StrandOffsets::from_segment_counts(&[3, 1], 7).unwrap_err();
        assert!(matches!(
            err,
            Error::PointCountMismatch {
                computed: 6,
                recorded: 7
            }
        ));
    }

    #[test]
    fn test_overflowing_total_is_a_mismatch() {
        // 65537 strands of 65535 segments: the true total (4,295,032,832)
        // exceeds u32::MAX, so the sum must not wrap or panic
        let counts = vec![u16::MAX; 65537];
        let err = StrandOffsets::from_segment_counts(&counts, 12345).unwrap_err();
        assert!(matches!(
            err,
            Error::PointCountMismatch {
                computed: 4_295_032_832,
                recorded: 12345
            }
        ));
    }

    #[test]
    fn test_empty() {
        let offsets = StrandOffsets::from_segment_counts(&[], 0).unwrap();
        assert_eq!(offsets.strand_count(), 0);
        assert_eq!(offsets.total_points(), 0);
    }
}
