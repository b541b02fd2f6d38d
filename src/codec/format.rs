//! Binary scenery format constants.
//!
//! A file is a flat sequence of chunks, each a 4-byte tag, a `u32` payload
//! length and the payload. All numbers are little-endian without padding.

use super::ChunkTag;

/// Version written into the header of newly created sceneries.
pub const FORMAT_VERSION: u32 = 1;

pub const CHUNK_HEAD: ChunkTag = ChunkTag(*b"HEAD");
pub const CHUNK_TRACKS: ChunkTag = ChunkTag(*b"TRKS");
pub const CHUNK_SWITCHES: ChunkTag = ChunkTag(*b"SWCH");

/// Chunks every file must contain, in this order.
pub const REQUIRED_CHUNKS: [ChunkTag; 3] = [CHUNK_HEAD, CHUNK_TRACKS, CHUNK_SWITCHES];

pub const CHUNK_HEADER_SIZE: usize = 8; // 4 tag + 4 length

pub const U32_SIZE: usize = 4;
pub const VEC3F_SIZE: usize = 12;
pub const VEC3D_SIZE: usize = 24;

/// Size of a track record: kind byte plus its points as vec3f.
#[must_use]
pub const fn track_record_size(point_count: usize) -> usize {
    1 + point_count * VEC3F_SIZE
}
