//! Per-point strand tangents for shading.

use glam::Vec3;

use crate::offsets::StrandOffsets;

/// Normalize, leaving the zero vector untouched.
fn safe_normalize(v: Vec3) -> Vec3 {
    let len_sq = v.length_squared();
    if len_sq > 0.0 {
        v / len_sq.sqrt()
    } else {
        v
    }
}

/// Blended tangent at `p1` given its neighbors, plus the two edge lengths.
///
/// The incoming edge is rescaled to the outgoing edge's length before the
/// blend so a long edge does not dominate the direction.
fn blended_direction(p0: Vec3, p1: Vec3, p2: Vec3) -> (Vec3, f32, f32) {
    let d0 = p1 - p0;
    let len0 = if d0.length_squared() > 0.0 {
        d0.length()
    } else {
        1.0
    };

    let d1 = p2 - p1;
    let len1 = if d1.length_squared() > 0.0 {
        d1.length()
    } else {
        1.0
    };

    let dir = safe_normalize(d0 * (len1 / len0) + d1);
    (dir, len0, len1)
}

/// One unit tangent per point.
///
/// Interior points blend their incoming and outgoing edges; the root and tip
/// extrapolate from their neighbor's tangent using a third of the adjacent
/// edge length. A two-point strand gets the normalized edge at both ends and
/// a single-point strand the zero vector.
pub(crate) fn fill_directions(offsets: &StrandOffsets, points: &[Vec3]) -> Vec<Vec3> {
    let mut dirs = vec![Vec3::ZERO; points.len()];

    for range in offsets.iter_ranges() {
        let start = range.start;
        let segments = range.len() - 1;

        if segments >= 2 {
            let (dir, len0, mut len1) =
                blended_direction(points[start], points[start + 1], points[start + 2]);
            dirs[start + 1] = dir;

            // root: extrapolate back from the second point's tangent
            let d0 = points[start + 1] - dirs[start + 1] * len0 * 0.3333 - points[start];
            dirs[start] = safe_normalize(d0);

            for p in start + 2..start + segments {
                let (dir, _, l1) = blended_direction(points[p - 1], points[p], points[p + 1]);
                dirs[p] = dir;
                len1 = l1;
            }

            // tip: extrapolate forward from the second-to-last tangent
            let tip = start + segments;
            let d0 = points[tip] - points[tip - 1] + dirs[tip - 1] * len1 * 0.3333;
            dirs[tip] = safe_normalize(d0);
        } else if segments == 1 {
            let dir = safe_normalize(points[start + 1] - points[start]);
            dirs[start] = dir;
            dirs[start + 1] = dir;
        }
    }

    dirs
}
