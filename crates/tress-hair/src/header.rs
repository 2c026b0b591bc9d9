//! HAIR file header structure.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Size of the free-form info string at the end of the header.
pub const INFO_SIZE: usize = 88;

/// Fixed 128-byte header at the start of every HAIR file.
///
/// All fields are little-endian. The five `ARRAY_*` bits of [`arrays`] gate
/// which data sections follow the header; any absent section falls back to the
/// corresponding `default_*` field.
///
/// [`arrays`]: HairHeader::arrays
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct HairHeader {
    /// Signature, either `HAIR` or `hair`.
    pub magic: [u8; 4],
    /// Number of hair strands.
    pub strand_count: u32,
    /// Total number of points of all strands.
    pub point_count: u32,
    /// Bit array of data sections present in the file.
    pub arrays: u32,
    /// Default number of segments per strand, used when the segments
    /// section is absent.
    pub default_segments: u32,
    /// Default strand thickness, used when the thickness section is absent.
    pub default_thickness: f32,
    /// Default strand transparency, used when the transparency section is
    /// absent.
    pub default_transparency: f32,
    /// Default strand color (rgb), used when the color section is absent.
    pub default_color: [f32; 3],
    /// Free-form information about the file, NUL-padded.
    pub info: [u8; INFO_SIZE],
}

impl HairHeader {
    /// Byte size of the fixed header.
    pub const SIZE: usize = 128;

    /// Segments section present (u16 per strand).
    pub const ARRAY_SEGMENTS: u32 = 1 << 0;
    /// Points section present (3 x f32 per point).
    pub const ARRAY_POINTS: u32 = 1 << 1;
    /// Thickness section present (f32 per point).
    pub const ARRAY_THICKNESS: u32 = 1 << 2;
    /// Transparency section present (f32 per point).
    pub const ARRAY_TRANSPARENCY: u32 = 1 << 3;
    /// Color section present (3 x f32 per point).
    pub const ARRAY_COLOR: u32 = 1 << 4;

    /// Check the signature against the two accepted spellings.
    pub fn has_valid_magic(&self) -> bool {
        &self.magic == b"HAIR" || &self.magic == b"hair"
    }

    pub fn has_segments(&self) -> bool {
        self.arrays & Self::ARRAY_SEGMENTS != 0
    }

    pub fn has_points(&self) -> bool {
        self.arrays & Self::ARRAY_POINTS != 0
    }

    pub fn has_thickness(&self) -> bool {
        self.arrays & Self::ARRAY_THICKNESS != 0
    }

    pub fn has_transparency(&self) -> bool {
        self.arrays & Self::ARRAY_TRANSPARENCY != 0
    }

    pub fn has_color(&self) -> bool {
        self.arrays & Self::ARRAY_COLOR != 0
    }

    /// The info string, up to the first NUL byte.
    ///
    /// Returns an empty string if the bytes are not valid UTF-8.
    pub fn info_str(&self) -> &str {
        let end = self.info.iter().position(|&b| b == 0).unwrap_or(INFO_SIZE);
        std::str::from_utf8(&self.info[..end]).unwrap_or("")
    }

    /// Set the info string, truncating to what fits and NUL-padding the rest.
    pub fn set_info(&mut self, info: &str) {
        self.info = [0; INFO_SIZE];
        let len = info.len().min(INFO_SIZE - 1);
        self.info[..len].copy_from_slice(&info.as_bytes()[..len]);
    }
}

impl Default for HairHeader {
    fn default() -> Self {
        Self {
            magic: *b"hair",
            strand_count: 0,
            point_count: 0,
            arrays: 0,
            default_segments: 0,
            default_thickness: 1.0,
            default_transparency: 0.0,
            default_color: [1.0, 1.0, 1.0],
            info: [0; INFO_SIZE],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        assert_eq!(std::mem::size_of::<HairHeader>(), HairHeader::SIZE);
    }

    #[test]
    fn test_magic_spellings() {
        let mut header = HairHeader::default();
        assert!(header.has_valid_magic());

        header.magic = *b"HAIR";
        assert!(header.has_valid_magic());

        header.magic = *b"Hair";
        assert!(!header.has_valid_magic());
    }

    #[test]
    fn test_array_bits() {
        let mut header = HairHeader::default();
        assert!(!header.has_segments());

        header.arrays = HairHeader::ARRAY_SEGMENTS | HairHeader::ARRAY_POINTS;
        assert!(header.has_segments());
        assert!(header.has_points());
        assert!(!header.has_thickness());
        assert!(!header.has_transparency());
        assert!(!header.has_color());
    }

    #[test]
    fn test_info_string() {
        let mut header = HairHeader::default();
        assert_eq!(header.info_str(), "");

        header.set_info("exported from groom v2");
        assert_eq!(header.info_str(), "exported from groom v2");

        // over-long info truncates, keeping the trailing NUL
        let long = "x".repeat(200);
        header.set_info(&long);
        assert_eq!(header.info_str().len(), INFO_SIZE - 1);
    }
}
