//! The curves aggregate: owns the finished geometry and orchestrates loading.

use std::fmt;
use std::path::Path;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tress_hair::{HairFile, HairHeader};

use crate::augment::{self, Augmentation};
use crate::bounds::Aabb;
use crate::directions::fill_directions;
use crate::mapping::AxisMapping;
use crate::offsets::StrandOffsets;
use crate::{Error, Result};

/// B-spline representation, selected once per asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplineMode {
    Linear,
    Quadratic,
    #[default]
    Cubic,
}

impl SplineMode {
    /// Control-point span of one renderable segment.
    pub fn degree(&self) -> usize {
        match self {
            SplineMode::Linear => 1,
            SplineMode::Quadratic => 2,
            SplineMode::Cubic => 3,
        }
    }
}

impl fmt::Display for SplineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SplineMode::Linear => "linear",
            SplineMode::Quadratic => "quadratic",
            SplineMode::Cubic => "cubic",
        };
        f.write_str(name)
    }
}

/// Policy for deriving per-point thickness from each strand's root thickness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadiusMode {
    /// Broadcast the root thickness across the whole strand.
    ConstantR,
    /// Interpolate linearly from the root thickness to zero at the tip.
    TaperedR,
}

/// Per-point attribute record handed to the geometry-upload layer.
///
/// Plain-old-data so the backend can byte-cast the array; kept in lockstep
/// with the point array at every stage.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct VertexAttributes {
    pub position: Vec3,
}

/// Configuration for one pipeline run.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    pub mapping: AxisMapping,
    pub augmentation: Augmentation,
    pub spline_mode: SplineMode,
}

/// Finished curve geometry for one hair asset.
///
/// Built from a [`HairFile`] in one synchronous pass: offsets, axis
/// remapping, density augmentation. Mutated afterwards only by radius-mode
/// changes; everything else is read accessors and derived views.
#[derive(Debug, Clone)]
pub struct Curves {
    header: HairHeader,
    mapping: AxisMapping,
    spline_mode: SplineMode,
    radius_mode: Option<RadiusMode>,
    offsets: StrandOffsets,
    points: Vec<Vec3>,
    thickness: Vec<f32>,
    attributes: Vec<VertexAttributes>,
}

impl Curves {
    /// Load a hair asset from disk, seeding the augmentation RNG from OS
    /// entropy.
    pub fn load<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Self> {
        Self::load_with(path, options, &mut StdRng::from_entropy())
    }

    /// Load a hair asset from disk with a caller-provided RNG.
    ///
    /// Seeding the RNG makes the augmentation reproducible; two runs with the
    /// same seed produce identical geometry.
    pub fn load_with<P: AsRef<Path>, R: Rng>(
        path: P,
        options: &LoadOptions,
        rng: &mut R,
    ) -> Result<Self> {
        let file = HairFile::open(path)?;
        Self::from_hair_file(&file, options, rng)
    }

    /// Build curve geometry from a decoded file.
    pub fn from_hair_file<R: Rng>(
        file: &HairFile,
        options: &LoadOptions,
        rng: &mut R,
    ) -> Result<Self> {
        let mut header = *file.header();
        let raw_points = file.points().ok_or(Error::MissingPoints)?;

        // Without a segments section the default fill allocates strand_count
        // entries driven solely by the 128-byte header, so check the implied
        // total against the recorded point count before allocating.
        if !header.has_segments() {
            let per_strand = 1 + u64::from(header.default_segments as u16);
            let computed = u64::from(header.strand_count) * per_strand;
            if computed != u64::from(header.point_count) {
                return Err(Error::PointCountMismatch {
                    computed,
                    recorded: header.point_count,
                });
            }
        }

        let mut segments = file.segment_counts();
        let mut offsets = StrandOffsets::from_segment_counts(&segments, header.point_count)?;
        let mut points: Vec<Vec3> = raw_points
            .iter()
            .map(|&p| options.mapping.apply(p))
            .collect();
        let mut thickness = file.thickness_or_default();
        let mut attributes: Vec<VertexAttributes> = points
            .iter()
            .map(|&p| VertexAttributes { position: p })
            .collect();

        if header.has_transparency() {
            log::warn!("transparency data present but unused");
        }
        if header.has_color() {
            log::warn!("color data present but unused");
        }

        augment::apply(
            &options.augmentation,
            &mut segments,
            &mut offsets,
            &mut points,
            &mut thickness,
            &mut attributes,
            rng,
        );

        header.strand_count = offsets.strand_count() as u32;
        header.point_count = offsets.total_points();

        Ok(Self {
            header,
            mapping: options.mapping,
            spline_mode: options.spline_mode,
            radius_mode: None,
            offsets,
            points,
            thickness,
            attributes,
        })
    }

    /// The header, with counts reflecting any augmentation.
    pub fn header(&self) -> &HairHeader {
        &self.header
    }

    pub fn number_of_strands(&self) -> u32 {
        self.header.strand_count
    }

    pub fn number_of_points(&self) -> u32 {
        self.header.point_count
    }

    pub fn spline_mode(&self) -> SplineMode {
        self.spline_mode
    }

    /// Control-point span of one segment under the selected spline mode.
    pub fn curve_degree(&self) -> usize {
        self.spline_mode.degree()
    }

    pub fn radius_mode(&self) -> Option<RadiusMode> {
        self.radius_mode
    }

    pub fn mapping(&self) -> AxisMapping {
        self.mapping
    }

    pub fn offsets(&self) -> &StrandOffsets {
        &self.offsets
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn thickness(&self) -> &[f32] {
        &self.thickness
    }

    pub fn attributes(&self) -> &[VertexAttributes] {
        &self.attributes
    }

    /// One unit tangent per point, for shading.
    pub fn directions(&self) -> Vec<Vec3> {
        fill_directions(&self.offsets, &self.points)
    }

    /// Bounding box of all points, grown by the maximum thickness so the
    /// backend's acceleration structure covers the swept curve width.
    pub fn bounds(&self) -> Aabb {
        let aabb: Aabb = self.points.iter().copied().collect();
        let max_width = self.thickness.iter().copied().fold(0.0, f32::max);
        aabb.grown(max_width)
    }

    /// Rewrite per-point thickness from each strand's root thickness.
    ///
    /// Re-applying the current mode is a no-op.
    pub fn set_radius_mode(&mut self, mode: RadiusMode) {
        if self.radius_mode == Some(mode) {
            return;
        }
        self.radius_mode = Some(mode);

        match mode {
            RadiusMode::ConstantR => {
                for range in self.offsets.iter_ranges() {
                    let root = self.thickness[range.start];
                    for t in &mut self.thickness[range] {
                        *t = root;
                    }
                }
            }
            RadiusMode::TaperedR => {
                for range in self.offsets.iter_ranges() {
                    let root = self.thickness[range.start];
                    let n = range.len();
                    if n < 2 {
                        // a single point keeps its root value
                        continue;
                    }
                    for (i, t) in self.thickness[range].iter_mut().enumerate() {
                        *t = root * (n - 1 - i) as f32 / (n - 1) as f32;
                    }
                }
            }
        }
    }

    /// Export the processed geometry back to the HAIR format.
    ///
    /// Writes segments, points, and thickness sections with updated counts.
    /// The axis permutation is undone so the asset re-enters the on-disk
    /// convention; the bilateral fold of a half-mapped asset is not
    /// invertible and its folded coordinates are kept.
    pub fn to_hair_file(&self) -> HairFile {
        let mut file = HairFile::new();
        *file.header_mut() = self.header;
        file.header_mut().arrays = 0;

        let segments: Vec<u16> = self
            .offsets
            .iter_ranges()
            .map(|r| (r.len() - 1) as u16)
            .collect();
        file.set_segments(segments);
        file.set_points(self.points.iter().map(|&p| self.mapping.unapply(p)).collect());
        file.set_thickness(self.thickness.clone());
        file
    }
}

impl fmt::Display for Curves {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Hair:")?;
        writeln!(f, "Number of strands:          {}", self.number_of_strands())?;
        writeln!(f, "Number of points:           {}", self.number_of_points())?;
        writeln!(f, "Spline mode:                {}", self.spline_mode)?;
        writeln!(f, "Contains segments:          {}", self.header.has_segments())?;
        writeln!(f, "Contains points:            {}", self.header.has_points())?;
        writeln!(f, "Contains thickness:         {}", self.header.has_thickness())?;
        writeln!(f, "Contains alpha:             {}", self.header.has_transparency())?;
        writeln!(f, "Contains color:             {}", self.header.has_color())?;
        writeln!(f, "Default number of segments: {}", self.header.default_segments)?;
        writeln!(f, "Default thickness:          {}", self.header.default_thickness)?;
        writeln!(f, "Default alpha:              {}", self.header.default_transparency)?;
        let [r, g, b] = self.header.default_color;
        writeln!(f, "Default color:              ({r}, {g}, {b})")?;
        let info = self.header.info_str();
        writeln!(
            f,
            "File info:                  {}",
            if info.is_empty() { "n/a" } else { info }
        )?;
        let offsets = self.offsets.as_slice();
        writeln!(
            f,
            "Strands: [{}...{}]",
            offsets[0],
            offsets[offsets.len() - 1]
        )?;
        writeln!(f, "Segments: {}", self.segment_count())
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::mapping::Side;

    use super::*;

    fn sample_file() -> HairFile {
        let mut file = HairFile::new();
        file.set_segments(vec![3, 1]);
        file.set_points(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, -2.0, 3.0),
            Vec3::new(2.0, -4.0, 6.0),
            Vec3::new(3.0, -6.0, 9.0),
            Vec3::new(5.0, 1.0, 0.5),
            Vec3::new(6.0, 2.0, 1.5),
        ]);
        file.set_thickness(vec![0.4, 0.3, 0.2, 0.1, 0.8, 0.6]);
        file
    }

    fn build(options: &LoadOptions) -> Curves {
        let mut rng = StdRng::seed_from_u64(1);
        Curves::from_hair_file(&sample_file(), options, &mut rng).unwrap()
    }

    #[test]
    fn test_load_builds_offsets_and_attributes() {
        let curves = build(&LoadOptions::default());

        assert_eq!(curves.offsets().as_slice(), &[0, 4, 6]);
        assert_eq!(curves.number_of_strands(), 2);
        assert_eq!(curves.number_of_points(), 6);
        assert_eq!(curves.attributes().len(), curves.points().len());
        for (a, p) in curves.attributes().iter().zip(curves.points()) {
            assert_eq!(a.position, *p);
        }
    }

    #[test]
    fn test_whole_mode_remaps_every_point() {
        let curves = build(&LoadOptions::default());

        assert_eq!(curves.points()[1], Vec3::new(-2.0, 3.0, 1.0));
        assert_eq!(curves.points()[4], Vec3::new(1.0, 0.5, 5.0));
    }

    #[test]
    fn test_half_split_folds_the_lateral_axis() {
        let left = build(&LoadOptions {
            mapping: AxisMapping::Half(Side::Left),
            ..Default::default()
        });
        let right = build(&LoadOptions {
            mapping: AxisMapping::Half(Side::Right),
            ..Default::default()
        });
        let whole = build(&LoadOptions::default());

        for ((l, r), w) in left
            .points()
            .iter()
            .zip(right.points())
            .zip(whole.points())
        {
            assert_eq!(l.x, w.x.abs());
            assert_eq!(r.x, -w.x.abs());
            assert_eq!(l.y, w.y);
            assert_eq!(l.z, w.z);
            assert_eq!(r.y, w.y);
            assert_eq!(r.z, w.z);
        }
    }

    #[test]
    fn test_missing_points_is_rejected() {
        let mut file = HairFile::new();
        file.set_segments(vec![3, 1]);
        file.header_mut().point_count = 6;

        let mut rng = StdRng::seed_from_u64(1);
        let result = Curves::from_hair_file(&file, &LoadOptions::default(), &mut rng);
        assert!(matches!(result, Err(Error::MissingPoints)));
    }

    #[test]
    fn test_recorded_point_count_mismatch_is_rejected() {
        let mut file = sample_file();
        file.header_mut().point_count = 7;

        let mut rng = StdRng::seed_from_u64(1);
        let result = Curves::from_hair_file(&file, &LoadOptions::default(), &mut rng);
        assert!(matches!(
            result,
            Err(Error::PointCountMismatch {
                computed: 6,
                recorded: 7
            })
        ));
    }

    #[test]
    fn test_header_driven_default_fill_is_checked_before_allocating() {
        // segments bit unset with an absurd strand count: the implied total
        // must be rejected without materializing the default fill
        let mut file = HairFile::new();
        file.set_points(vec![Vec3::ZERO; 4]);
        file.header_mut().strand_count = u32::MAX;
        file.header_mut().default_segments = 3;

        let mut rng = StdRng::seed_from_u64(1);
        let result = Curves::from_hair_file(&file, &LoadOptions::default(), &mut rng);
        assert!(matches!(
            result,
            Err(Error::PointCountMismatch { recorded: 4, .. })
        ));
    }

    #[test]
    fn test_default_segment_counts_build_offsets() {
        let mut file = HairFile::new();
        file.set_points((0..15).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect());
        file.header_mut().strand_count = 3;
        file.header_mut().default_segments = 4;

        let mut rng = StdRng::seed_from_u64(1);
        let curves =
            Curves::from_hair_file(&file, &LoadOptions::default(), &mut rng).unwrap();
        assert_eq!(curves.offsets().as_slice(), &[0, 5, 10, 15]);
    }

    #[test]
    fn test_augmentation_updates_header_counts() {
        let curves = build(&LoadOptions {
            augmentation: Augmentation::new(2.0, 0.0),
            ..Default::default()
        });

        assert_eq!(curves.number_of_strands(), 4);
        assert_eq!(curves.number_of_points(), 12);
        assert_eq!(curves.offsets().total_points(), 12);
        assert_eq!(curves.thickness().len(), 12);
        assert_eq!(curves.attributes().len(), 12);
    }

    #[test]
    fn test_constant_radius_broadcasts_the_root() {
        let mut curves = build(&LoadOptions::default());
        curves.set_radius_mode(RadiusMode::ConstantR);

        assert_eq!(curves.thickness(), &[0.4, 0.4, 0.4, 0.4, 0.8, 0.8]);
    }

    #[test]
    fn test_tapered_radius_decreases_to_zero() {
        let mut curves = build(&LoadOptions::default());
        curves.set_radius_mode(RadiusMode::TaperedR);

        for range in curves.offsets().iter_ranges() {
            let strand = &curves.thickness()[range];
            for w in strand.windows(2) {
                assert!(w[0] >= w[1]);
            }
            assert_eq!(*strand.last().unwrap(), 0.0);
        }
        // root values are preserved
        assert_eq!(curves.thickness()[0], 0.4);
        assert_eq!(curves.thickness()[4], 0.8);
    }

    #[test]
    fn test_radius_mode_is_idempotent() {
        let mut curves = build(&LoadOptions::default());
        curves.set_radius_mode(RadiusMode::TaperedR);
        let first = curves.thickness().to_vec();
        curves.set_radius_mode(RadiusMode::TaperedR);
        assert_eq!(curves.thickness(), &first[..]);
    }

    #[test]
    fn test_tapered_radius_keeps_single_point_strands() {
        let mut file = HairFile::new();
        file.set_segments(vec![0]);
        file.set_points(vec![Vec3::ONE]);
        file.set_thickness(vec![0.5]);

        let mut rng = StdRng::seed_from_u64(1);
        let mut curves =
            Curves::from_hair_file(&file, &LoadOptions::default(), &mut rng).unwrap();
        curves.set_radius_mode(RadiusMode::TaperedR);
        assert_eq!(curves.thickness(), &[0.5]);
    }

    #[test]
    fn test_bounds_contain_all_points_inflated() {
        let curves = build(&LoadOptions::default());
        let aabb = curves.bounds();

        for &p in curves.points() {
            assert!(aabb.contains(p));
        }
        // grown by the max thickness (0.8)
        let tight: crate::Aabb = curves.points().iter().copied().collect();
        assert_eq!(aabb.min(), tight.min() - Vec3::splat(0.8));
        assert_eq!(aabb.max(), tight.max() + Vec3::splat(0.8));
    }

    #[test]
    fn test_export_returns_to_disk_convention() {
        let source = sample_file();
        let curves = build(&LoadOptions::default());

        let exported = curves.to_hair_file();
        assert_eq!(exported.header().strand_count, 2);
        assert_eq!(exported.header().point_count, 6);
        assert_eq!(exported.segments(), Some(&[3u16, 1][..]));
        assert_eq!(exported.points(), source.points());
        assert_eq!(exported.thickness(), source.thickness());
    }

    #[test]
    fn test_densified_export_parses_and_reloads() {
        let curves = build(&LoadOptions {
            augmentation: Augmentation::new(2.0, 0.0),
            ..Default::default()
        });

        let bytes = curves.to_hair_file().to_bytes();
        let reparsed = HairFile::parse(&bytes).unwrap();
        assert_eq!(reparsed.header().strand_count, 4);

        let mut rng = StdRng::seed_from_u64(9);
        let reloaded =
            Curves::from_hair_file(&reparsed, &LoadOptions::default(), &mut rng).unwrap();
        assert_eq!(reloaded.points(), curves.points());
    }

    #[test]
    fn test_same_seed_reproduces_geometry() {
        let options = LoadOptions {
            augmentation: Augmentation::new(1.7, 0.9),
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(77);
        let a = Curves::from_hair_file(&sample_file(), &options, &mut rng).unwrap();
        let mut rng = StdRng::seed_from_u64(77);
        let b = Curves::from_hair_file(&sample_file(), &options, &mut rng).unwrap();

        assert_eq!(a.points(), b.points());
        assert_eq!(a.offsets(), b.offsets());
    }

    #[test]
    fn test_display_summary() {
        let summary = build(&LoadOptions::default()).to_string();
        assert!(summary.contains("Number of strands:          2"));
        assert!(summary.contains("Strands: [0...6]"));
    }
}
