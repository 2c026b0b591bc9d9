//! Binary reader for zero-copy parsing of byte slices.
//!
//! This module provides [`BinaryReader`], a cursor-like type that reads
//! little-endian binary data from a byte slice without copying where possible.

use glam::Vec3;
use zerocopy::FromBytes;

use crate::{Error, Result};

/// A binary reader that provides position-tracked reading from a byte slice.
///
/// All multi-byte reads are little-endian, matching the on-disk layout of the
/// formats this workspace handles.
///
/// # Example
///
/// ```
/// use tress_common::BinaryReader;
///
/// let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
/// let mut reader = BinaryReader::new(&data);
///
/// assert_eq!(reader.read_u16_array(2).unwrap(), vec![0x0201, 0x0403]);
/// assert_eq!(reader.remaining(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Get the current position in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the total length of the underlying buffer.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if there are no more bytes to read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Peek at bytes without advancing the position.
    #[inline]
    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(Error::UnexpectedEof {
                needed: count,
                available: self.remaining(),
            });
        }
        Ok(&self.data[self.position..self.position + count])
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Read `count` little-endian u16 values.
    pub fn read_u16_array(&mut self, count: usize) -> Result<Vec<u16>> {
        let bytes = self.read_bytes(count * 2)?;
        Ok(bytes
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .collect())
    }

    /// Read `count` little-endian f32 values.
    pub fn read_f32_array(&mut self, count: usize) -> Result<Vec<f32>> {
        let bytes = self.read_bytes(count * 4)?;
        Ok(bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }

    /// Read `count` xyz triples of little-endian f32 values.
    pub fn read_vec3_array(&mut self, count: usize) -> Result<Vec<Vec3>> {
        let bytes = self.read_bytes(count * 12)?;
        Ok(bytes
            .chunks_exact(12)
            .map(|c| {
                Vec3::new(
                    f32::from_le_bytes([c[0], c[1], c[2], c[3]]),
                    f32::from_le_bytes([c[4], c[5], c[6], c[7]]),
                    f32::from_le_bytes([c[8], c[9], c[10], c[11]]),
                )
            })
            .collect())
    }

    /// Read a struct using zerocopy.
    ///
    /// The struct must implement `FromBytes` from the zerocopy crate.
    #[inline]
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let bytes = self.read_bytes(size)?;
        T::read_from_bytes(bytes).map_err(|_| Error::UnexpectedEof {
            needed: size,
            available: bytes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_bytes_advances() {
        let data = [0x01u8, 0x02, 0x03, 0x04, 0x05, 0x06];
        let mut reader = BinaryReader::new(&data);

        assert_eq!(reader.peek_bytes(2).unwrap(), &[0x01, 0x02]);
        assert_eq!(reader.position(), 0);

        assert_eq!(reader.read_bytes(4).unwrap(), &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(reader.position(), 4);
        assert_eq!(reader.remaining(), 2);
        assert!(!reader.is_empty());

        assert_eq!(reader.read_bytes(2).unwrap(), &[0x05, 0x06]);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_read_arrays() {
        let mut data = Vec::new();
        for v in [1u16, 2, 3] {
            data.extend_from_slice(&v.to_le_bytes());
        }
        for v in [1.0f32, 2.5, -3.0] {
            data.extend_from_slice(&v.to_le_bytes());
        }
        let mut reader = BinaryReader::new(&data);

        assert_eq!(reader.read_u16_array(3).unwrap(), vec![1, 2, 3]);
        assert_eq!(reader.read_f32_array(3).unwrap(), vec![1.0, 2.5, -3.0]);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_read_vec3_array() {
        let mut data = Vec::new();
        for v in [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0] {
            data.extend_from_slice(&v.to_le_bytes());
        }
        let mut reader = BinaryReader::new(&data);

        let points = reader.read_vec3_array(2).unwrap();
        assert_eq!(points[0], Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(points[1], Vec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_eof_error() {
        let data = [0x01, 0x02];
        let mut reader = BinaryReader::new(&data);

        assert!(matches!(
            reader.read_f32_array(1),
            Err(Error::UnexpectedEof {
                needed: 4,
                available: 2
            })
        ));
    }

    #[test]
    fn test_short_array_read() {
        let data = [0u8; 10];
        let mut reader = BinaryReader::new(&data);

        assert!(reader.read_f32_array(3).is_err());
        // a failed read does not advance
        assert_eq!(reader.position(), 0);
    }
}
