//! Axis remapping from the on-disk coordinate convention to the renderer's.

use glam::Vec3;

/// Which half of a bilaterally split asset to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The lateral coordinate is forced to `+|y|`.
    Left,
    /// The lateral coordinate is forced to `-|y|`.
    Right,
}

/// Pure, stateless coordinate transform applied to every decoded point.
///
/// The on-disk convention differs from the renderer's: the renderer's x is
/// the file's y, its y the file's z, its z the file's x. A bilateral asset
/// (one file holding both halves of a head of hair, split to assign two
/// materials) additionally folds the lateral coordinate onto a known sign per
/// half; the two halves come from two independent pipeline runs over the same
/// file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisMapping {
    /// Whole-asset swap: `(y, z, x)`.
    #[default]
    Whole,
    /// Same swap with the lateral coordinate folded onto one sign.
    Half(Side),
}

impl AxisMapping {
    /// Map one point into the renderer's convention.
    pub fn apply(&self, p: Vec3) -> Vec3 {
        match self {
            AxisMapping::Whole => Vec3::new(p.y, p.z, p.x),
            AxisMapping::Half(Side::Left) => Vec3::new(p.y.abs(), p.z, p.x),
            AxisMapping::Half(Side::Right) => Vec3::new(-p.y.abs(), p.z, p.x),
        }
    }

    /// Undo the axis permutation, returning to the on-disk convention.
    ///
    /// The bilateral fold is not invertible; for a half-mapped point this
    /// returns the folded lateral coordinate as-is.
    pub fn unapply(&self, p: Vec3) -> Vec3 {
        Vec3::new(p.z, p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_mode_swap() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(AxisMapping::Whole.apply(p), Vec3::new(2.0, 3.0, 1.0));
    }

    #[test]
    fn test_half_split_forces_sign() {
        for p in [Vec3::new(1.0, -2.0, 3.0), Vec3::new(1.0, 2.0, 3.0)] {
            let left = AxisMapping::Half(Side::Left).apply(p);
            let right = AxisMapping::Half(Side::Right).apply(p);

            assert_eq!(left, Vec3::new(2.0, 3.0, 1.0));
            assert_eq!(right, Vec3::new(-2.0, 3.0, 1.0));
            assert!(left.x >= 0.0);
            assert!(right.x <= 0.0);
            // y/z agree with whole mode
            let whole = AxisMapping::Whole.apply(p);
            assert_eq!(left.y, whole.y);
            assert_eq!(left.z, whole.z);
        }
    }

    #[test]
    fn test_unapply_inverts_whole_mode() {
        let mapping = AxisMapping::Whole;
        let p = Vec3::new(-1.5, 0.25, 9.0);
        assert_eq!(mapping.unapply(mapping.apply(p)), p);
    }
}
