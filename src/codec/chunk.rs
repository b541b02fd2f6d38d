//! Bounded byte reader and chunk-aware writer.

use super::format::{CHUNK_HEADER_SIZE, U32_SIZE};
use super::ChunkTag;
use crate::error::FormatError;
use crate::math::Point3;

/// A chunk split off a reader: its tag and a reader bounded to its payload.
pub struct Chunk<'a> {
    pub tag: ChunkTag,
    pub payload: ChunkReader<'a>,
}

/// Little-endian reader over a byte slice that never reads past its end.
pub struct ChunkReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ChunkReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    pub fn has_data(&self) -> bool {
        self.position < self.data.len()
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Takes the next `len` bytes.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8], FormatError> {
        if len > self.remaining() {
            return Err(FormatError::Truncated {
                needed: len,
                available: self.remaining(),
            });
        }
        let bytes = &self.data[self.position..self.position + len];
        self.position += len;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], FormatError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Reads a chunk header and splits its payload off.
    pub fn read_chunk(&mut self) -> Result<Chunk<'a>, FormatError> {
        if self.remaining() < CHUNK_HEADER_SIZE {
            return Err(FormatError::Truncated {
                needed: CHUNK_HEADER_SIZE,
                available: self.remaining(),
            });
        }
        let tag = ChunkTag(self.take_array()?);
        let declared = self.read_u32()? as usize;
        if declared > self.remaining() {
            return Err(FormatError::ChunkOverrun {
                tag,
                declared,
                available: self.remaining(),
            });
        }
        Ok(Chunk {
            tag,
            payload: ChunkReader::new(self.take(declared)?),
        })
    }

    /// Fails unless every byte has been consumed.
    pub fn finish(&self, tag: ChunkTag) -> Result<(), FormatError> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(FormatError::TrailingBytes { tag, remaining }),
        }
    }

    /// Reads a record count and checks that `count` records of at least
    /// `record_size` bytes fit in what is left.
    pub fn read_count(&mut self, record_size: usize) -> Result<u32, FormatError> {
        let count = self.read_u32()?;
        let available = self.remaining();
        let fits = (count as usize)
            .checked_mul(record_size)
            .is_some_and(|needed| needed <= available);
        if !fits {
            return Err(FormatError::CountOverrun {
                count,
                record_size,
                available,
            });
        }
        Ok(count)
    }

    pub fn read_u8(&mut self) -> Result<u8, FormatError> {
        Ok(self.take_array::<1>()?[0])
    }

    pub fn read_u32(&mut self) -> Result<u32, FormatError> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    pub fn read_f32(&mut self) -> Result<f32, FormatError> {
        Ok(f32::from_le_bytes(self.take_array()?))
    }

    pub fn read_f64(&mut self) -> Result<f64, FormatError> {
        Ok(f64::from_le_bytes(self.take_array()?))
    }

    pub fn read_vec3f(&mut self) -> Result<Point3, FormatError> {
        Ok(Point3::new(
            f64::from(self.read_f32()?),
            f64::from(self.read_f32()?),
            f64::from(self.read_f32()?),
        ))
    }

    pub fn read_vec3d(&mut self) -> Result<Point3, FormatError> {
        Ok(Point3::new(
            self.read_f64()?,
            self.read_f64()?,
            self.read_f64()?,
        ))
    }

    /// Reads a `u32` length-prefixed byte string.
    pub fn read_string(&mut self) -> Result<&'a [u8], FormatError> {
        let len = self.read_u32()? as usize;
        self.take(len)
    }
}

/// Little-endian writer producing length-prefixed chunks.
pub struct ChunkWriter {
    buffer: Vec<u8>,
}

impl ChunkWriter {
    pub fn new() -> Self {
        Self {
            buffer: Vec::with_capacity(1024),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Writes `tag`, runs `body` and back-patches the payload length.
    pub fn chunk<F>(&mut self, tag: ChunkTag, body: F) -> Result<(), FormatError>
    where
        F: FnOnce(&mut Self) -> Result<(), FormatError>,
    {
        self.buffer.extend_from_slice(&tag.0);
        let length_at = self.buffer.len();
        self.write_u32(0); // Placeholder for length
        body(self)?;

        let content_length = self.buffer.len() - length_at - U32_SIZE;
        let length_bytes = to_u32(content_length)?.to_le_bytes();
        self.buffer[length_at..length_at + U32_SIZE].copy_from_slice(&length_bytes);
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a collection size as `u32`.
    pub fn write_count(&mut self, count: usize) -> Result<(), FormatError> {
        self.write_u32(to_u32(count)?);
        Ok(())
    }

    pub fn write_f32(&mut self, value: f32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_f64(&mut self, value: f64) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn write_vec3f(&mut self, value: &Point3) {
        self.write_f32(value.x as f32);
        self.write_f32(value.y as f32);
        self.write_f32(value.z as f32);
    }

    pub fn write_vec3d(&mut self, value: &Point3) {
        self.write_f64(value.x);
        self.write_f64(value.y);
        self.write_f64(value.z);
    }

    /// Writes raw bytes without a length prefix.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Writes a `u32` length-prefixed byte string.
    pub fn write_string(&mut self, bytes: &[u8]) -> Result<(), FormatError> {
        self.write_count(bytes.len())?;
        self.write_bytes(bytes);
        Ok(())
    }
}

impl Default for ChunkWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn to_u32(len: usize) -> Result<u32, FormatError> {
    u32::try_from(len).map_err(|_| FormatError::TooLarge(len))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn write_and_read_primitives() {
        let mut writer = ChunkWriter::new();
        writer.write_u8(0x42);
        writer.write_u32(12345);
        writer.write_f32(3.5);
        writer.write_vec3f(&Point3::new(1.0, 2.0, 3.0));
        writer.write_vec3d(&Point3::new(0.1, 0.2, 0.3));
        writer.write_string(b"abc").unwrap();

        let data = writer.into_bytes();
        assert_eq!(data.len(), 1 + 4 + 4 + 12 + 24 + 4 + 3);
        let mut reader = ChunkReader::new(&data);

        assert_eq!(reader.read_u8().unwrap(), 0x42);
        assert_eq!(reader.read_u32().unwrap(), 12345);
        assert!((reader.read_f32().unwrap() - 3.5).abs() < f32::EPSILON);
        assert_eq!(reader.read_vec3f().unwrap(), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(reader.read_vec3d().unwrap(), Point3::new(0.1, 0.2, 0.3));
        assert_eq!(reader.read_string().unwrap(), b"abc");
        assert!(!reader.has_data());
    }

    #[test]
    fn little_endian_layout() {
        let mut writer = ChunkWriter::new();
        writer.write_u32(0x0403_0201);
        assert_eq!(writer.into_bytes(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn chunk_header_round_trip() {
        let mut writer = ChunkWriter::new();
        writer
            .chunk(ChunkTag(*b"TEST"), |w| {
                w.write_u32(12345);
                w.write_u32(67890);
                Ok(())
            })
            .unwrap();

        let data = writer.into_bytes();
        assert_eq!(&data[..4], b"TEST");
        assert_eq!(&data[4..8], &8u32.to_le_bytes());

        let mut reader = ChunkReader::new(&data);
        let mut chunk = reader.read_chunk().unwrap();
        assert_eq!(chunk.tag, ChunkTag(*b"TEST"));
        assert_eq!(chunk.payload.remaining(), 8);
        assert_eq!(chunk.payload.read_u32().unwrap(), 12345);
        assert_eq!(chunk.payload.read_u32().unwrap(), 67890);
        chunk.payload.finish(chunk.tag).unwrap();
        assert!(!reader.has_data());
    }

    #[test]
    fn payload_reader_stops_at_chunk_end() {
        let mut writer = ChunkWriter::new();
        writer
            .chunk(ChunkTag(*b"AAAA"), |w| {
                w.write_u8(1);
                Ok(())
            })
            .unwrap();
        writer.write_u32(0xFFFF_FFFF);

        let data = writer.into_bytes();
        let mut reader = ChunkReader::new(&data);
        let mut chunk = reader.read_chunk().unwrap();
        assert_eq!(chunk.payload.read_u8().unwrap(), 1);
        assert!(matches!(
            chunk.payload.read_u32(),
            Err(FormatError::Truncated {
                needed: 4,
                available: 0
            })
        ));
        assert_eq!(reader.read_u32().unwrap(), 0xFFFF_FFFF);
    }

    #[test]
    fn declared_length_beyond_data_is_rejected() {
        let mut data = b"TRKS".to_vec();
        data.extend_from_slice(&100u32.to_le_bytes());
        data.extend_from_slice(&[0; 10]);

        let mut reader = ChunkReader::new(&data);
        assert_eq!(
            reader.read_chunk().err(),
            Some(FormatError::ChunkOverrun {
                tag: ChunkTag(*b"TRKS"),
                declared: 100,
                available: 10
            })
        );
    }

    #[test]
    fn count_overrun_is_detected_before_reading() {
        let mut writer = ChunkWriter::new();
        writer.write_u32(u32::MAX);
        writer.write_u8(0);
        let data = writer.into_bytes();

        let mut reader = ChunkReader::new(&data);
        assert_eq!(
            reader.read_count(25),
            Err(FormatError::CountOverrun {
                count: u32::MAX,
                record_size: 25,
                available: 1
            })
        );
    }

    #[test]
    fn trailing_bytes_are_reported() {
        let data = [1u8, 2, 3];
        let mut reader = ChunkReader::new(&data);
        reader.read_u8().unwrap();
        assert_eq!(
            reader.finish(ChunkTag(*b"HEAD")),
            Err(FormatError::TrailingBytes {
                tag: ChunkTag(*b"HEAD"),
                remaining: 2
            })
        );
    }
}
