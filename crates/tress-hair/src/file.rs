//! HAIR file decoding and encoding.

use std::fs;
use std::path::Path;

use glam::Vec3;
use tress_common::BinaryReader;
use zerocopy::IntoBytes;

use crate::{Error, HairHeader, Result, Section};

/// A decoded HAIR strand-geometry file.
///
/// Holds the fixed header plus whichever of the five bitmask-gated data
/// sections the file carried. Decoding performs no cross-array validation and
/// builds no geometry; that is the concern of the curves layer.
#[derive(Debug, Clone, Default)]
pub struct HairFile {
    header: HairHeader,
    segments: Option<Vec<u16>>,
    points: Option<Vec<Vec3>>,
    thickness: Option<Vec<f32>>,
    transparency: Option<Vec<f32>>,
    colors: Option<Vec<Vec3>>,
}

impl HairFile {
    /// Create an empty file with default header values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a HAIR file from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("reading hair file {}", path.display());

        let bytes = fs::read(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&bytes)
    }

    /// Decode a HAIR file from bytes.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(data);

        if reader.remaining() < HairHeader::SIZE {
            return Err(Error::TruncatedHeader {
                expected: HairHeader::SIZE,
                available: reader.remaining(),
            });
        }

        let header: HairHeader = reader
            .read_struct()
            .map_err(|_| Error::TruncatedHeader {
                expected: HairHeader::SIZE,
                available: data.len(),
            })?;

        if !header.has_valid_magic() {
            return Err(Error::BadMagic {
                found: header.magic,
            });
        }

        let strands = header.strand_count as usize;
        let points = header.point_count as usize;

        // The gated sections follow in bitmask-bit order. A failed read does
        // not advance the cursor, so `remaining` reflects the short section.
        let segments = if header.has_segments() {
            Some(reader.read_u16_array(strands).map_err(|_| {
                Error::TruncatedSection {
                    section: Section::Segments,
                    needed: strands * 2,
                    available: reader.remaining(),
                }
            })?)
        } else {
            None
        };

        let point_array = if header.has_points() {
            Some(reader.read_vec3_array(points).map_err(|_| {
                Error::TruncatedSection {
                    section: Section::Points,
                    needed: points * 12,
                    available: reader.remaining(),
                }
            })?)
        } else {
            None
        };

        let thickness = if header.has_thickness() {
            Some(reader.read_f32_array(points).map_err(|_| {
                Error::TruncatedSection {
                    section: Section::Thickness,
                    needed: points * 4,
                    available: reader.remaining(),
                }
            })?)
        } else {
            None
        };

        let transparency = if header.has_transparency() {
            Some(reader.read_f32_array(points).map_err(|_| {
                Error::TruncatedSection {
                    section: Section::Transparency,
                    needed: points * 4,
                    available: reader.remaining(),
                }
            })?)
        } else {
            None
        };

        let colors = if header.has_color() {
            Some(reader.read_vec3_array(points).map_err(|_| {
                Error::TruncatedSection {
                    section: Section::Color,
                    needed: points * 12,
                    available: reader.remaining(),
                }
            })?)
        } else {
            None
        };

        log::debug!(
            "decoded hair file: {} strands, {} points, arrays {:#07b}",
            strands,
            points,
            header.arrays
        );

        Ok(Self {
            header,
            segments,
            points: point_array,
            thickness,
            transparency,
            colors,
        })
    }

    /// Encode back to the on-disk byte layout.
    ///
    /// Sections are written exactly when their bitmask bit is set, in file
    /// order, so `parse` followed by `to_bytes` reproduces the input
    /// byte-for-byte.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HairHeader::SIZE + self.sections_size());
        out.extend_from_slice(self.header.as_bytes());

        if let Some(segments) = &self.segments {
            for s in segments {
                out.extend_from_slice(&s.to_le_bytes());
            }
        }
        if let Some(points) = &self.points {
            for p in points {
                out.extend_from_slice(&p.x.to_le_bytes());
                out.extend_from_slice(&p.y.to_le_bytes());
                out.extend_from_slice(&p.z.to_le_bytes());
            }
        }
        if let Some(thickness) = &self.thickness {
            for t in thickness {
                out.extend_from_slice(&t.to_le_bytes());
            }
        }
        if let Some(transparency) = &self.transparency {
            for t in transparency {
                out.extend_from_slice(&t.to_le_bytes());
            }
        }
        if let Some(colors) = &self.colors {
            for c in colors {
                out.extend_from_slice(&c.x.to_le_bytes());
                out.extend_from_slice(&c.y.to_le_bytes());
                out.extend_from_slice(&c.z.to_le_bytes());
            }
        }

        out
    }

    /// Write to a HAIR file on disk.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_bytes())?;
        Ok(())
    }

    fn sections_size(&self) -> usize {
        self.segments.as_ref().map_or(0, |s| s.len() * 2)
            + self.points.as_ref().map_or(0, |p| p.len() * 12)
            + self.thickness.as_ref().map_or(0, |t| t.len() * 4)
            + self.transparency.as_ref().map_or(0, |t| t.len() * 4)
            + self.colors.as_ref().map_or(0, |c| c.len() * 12)
    }

    /// Access the header.
    pub fn header(&self) -> &HairHeader {
        &self.header
    }

    /// Mutable access to the header (defaults, info string).
    pub fn header_mut(&mut self) -> &mut HairHeader {
        &mut self.header
    }

    /// The segments section, if present.
    pub fn segments(&self) -> Option<&[u16]> {
        self.segments.as_deref()
    }

    /// The points section, if present.
    pub fn points(&self) -> Option<&[Vec3]> {
        self.points.as_deref()
    }

    /// The thickness section, if present.
    pub fn thickness(&self) -> Option<&[f32]> {
        self.thickness.as_deref()
    }

    /// The transparency section, if present.
    pub fn transparency(&self) -> Option<&[f32]> {
        self.transparency.as_deref()
    }

    /// The color section, if present.
    pub fn colors(&self) -> Option<&[Vec3]> {
        self.colors.as_deref()
    }

    /// Per-strand segment counts, falling back to the header default when the
    /// segments section is absent.
    pub fn segment_counts(&self) -> Vec<u16> {
        match &self.segments {
            Some(segments) => segments.clone(),
            None => vec![
                self.header.default_segments as u16;
                self.header.strand_count as usize
            ],
        }
    }

    /// Per-point thickness, falling back to the header default when the
    /// thickness section is absent.
    pub fn thickness_or_default(&self) -> Vec<f32> {
        match &self.thickness {
            Some(thickness) => thickness.clone(),
            None => vec![
                self.header.default_thickness;
                self.header.point_count as usize
            ],
        }
    }

    /// Store a segments section, setting its presence bit and the strand
    /// count.
    pub fn set_segments(&mut self, segments: Vec<u16>) {
        self.header.strand_count = segments.len() as u32;
        self.header.arrays |= HairHeader::ARRAY_SEGMENTS;
        self.segments = Some(segments);
    }

    /// Store a points section, setting its presence bit and the point count.
    pub fn set_points(&mut self, points: Vec<Vec3>) {
        self.header.point_count = points.len() as u32;
        self.header.arrays |= HairHeader::ARRAY_POINTS;
        self.points = Some(points);
    }

    /// Store a thickness section, setting its presence bit.
    pub fn set_thickness(&mut self, thickness: Vec<f32>) {
        self.header.arrays |= HairHeader::ARRAY_THICKNESS;
        self.thickness = Some(thickness);
    }

    /// Store a transparency section, setting its presence bit.
    pub fn set_transparency(&mut self, transparency: Vec<f32>) {
        self.header.arrays |= HairHeader::ARRAY_TRANSPARENCY;
        self.transparency = Some(transparency);
    }

    /// Store a color section, setting its presence bit.
    pub fn set_colors(&mut self, colors: Vec<Vec3>) {
        self.header.arrays |= HairHeader::ARRAY_COLOR;
        self.colors = Some(colors);
    }
}
