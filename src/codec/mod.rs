//! Binary scenery codec.
//!
//! Encodes a [`Scenery`] as three chunks, `HEAD` (opaque header bytes),
//! `TRKS` (track lists) and `SWCH` (switch list); see [`format`] for the
//! framing and the per-list modules for record layouts. Decoding is strict:
//! malformed input fails as a whole and never yields a partial scenery.

mod chunk;
pub mod format;
mod switch_list;
mod track_list;

pub use chunk::{Chunk, ChunkReader, ChunkWriter};
pub use format::*;
pub use switch_list::{shape_kinds, SHAPE_PAYLOAD_SIZES};

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::{debug, trace};

use crate::error::{FormatError, Result};
use crate::scenery::Scenery;

/// Four-byte chunk tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkTag(pub [u8; 4]);

impl fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            write!(f, "{}", std::ascii::escape_default(b))?;
        }
        Ok(())
    }
}

/// Precision of vectors stored outside the fixed track records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Precision {
    /// 3 x `f32`.
    Single,
    /// 3 x `f64`.
    #[default]
    Double,
}

impl Precision {
    /// Encoded size of a vec3 at this precision.
    #[must_use]
    pub fn vec3_size(self) -> usize {
        match self {
            Self::Single => VEC3F_SIZE,
            Self::Double => VEC3D_SIZE,
        }
    }
}

/// Codec settings. Encoder and decoder must agree on them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecOptions {
    /// Precision of switch origin positions.
    pub position_precision: Precision,
}

impl CodecOptions {
    /// Sets the precision of switch origin positions.
    #[must_use]
    pub fn with_position_precision(mut self, precision: Precision) -> Self {
        self.position_precision = precision;
        self
    }
}

/// Encodes a scenery with default options.
///
/// # Errors
///
/// Returns an error if a collection does not fit a 32-bit count.
pub fn encode_scenery(scenery: &Scenery) -> Result<Vec<u8>> {
    encode_scenery_with_options(scenery, CodecOptions::default())
}

/// Encodes a scenery.
///
/// # Errors
///
/// Returns an error if a collection does not fit a 32-bit count.
pub fn encode_scenery_with_options(scenery: &Scenery, options: CodecOptions) -> Result<Vec<u8>> {
    let mut writer = ChunkWriter::new();
    writer.chunk(CHUNK_HEAD, |w| {
        w.write_bytes(scenery.header());
        Ok(())
    })?;
    writer.chunk(CHUNK_TRACKS, |w| track_list::write(w, scenery))?;
    writer.chunk(CHUNK_SWITCHES, |w| switch_list::write(w, scenery, options))?;

    let bytes = writer.into_bytes();
    debug!(
        tracks = scenery.track_count(),
        switches = scenery.switch_count(),
        bytes = bytes.len(),
        "encoded scenery"
    );
    Ok(bytes)
}

/// Decodes a scenery with default options.
///
/// # Errors
///
/// Returns a format error for malformed, truncated or out-of-order input.
pub fn decode_scenery(data: &[u8]) -> Result<Scenery> {
    decode_scenery_with_options(data, CodecOptions::default())
}

/// Decodes a scenery.
///
/// Unknown chunks are skipped. The required chunks must each appear once,
/// in `HEAD`, `TRKS`, `SWCH` order.
///
/// # Errors
///
/// Returns a format error for malformed, truncated or out-of-order input,
/// and a model error if more than two elements meet at one connection.
pub fn decode_scenery_with_options(data: &[u8], options: CodecOptions) -> Result<Scenery> {
    let mut reader = ChunkReader::new(data);
    let mut next_required = 0;
    let mut header = Vec::new();
    let mut tracks = Vec::new();
    let mut switches = Vec::new();

    while reader.has_data() {
        let Chunk { tag, mut payload } = reader.read_chunk()?;
        let Some(index) = REQUIRED_CHUNKS.iter().position(|&t| t == tag) else {
            trace!(%tag, bytes = payload.remaining(), "skipping unknown chunk");
            continue;
        };
        if index < next_required {
            return Err(FormatError::DuplicateChunk(tag).into());
        }
        if index > next_required {
            return Err(FormatError::UnexpectedChunk {
                expected: REQUIRED_CHUNKS[next_required],
                found: tag,
            }
            .into());
        }
        trace!(%tag, bytes = payload.remaining(), "reading chunk");

        match index {
            0 => header = payload.take(payload.remaining())?.to_vec(),
            1 => tracks = track_list::read(&mut payload)?,
            _ => switches = switch_list::read(&mut payload, options)?,
        }
        payload.finish(tag)?;
        next_required += 1;
    }

    if let Some(&missing) = REQUIRED_CHUNKS.get(next_required) {
        return Err(FormatError::MissingChunk(missing).into());
    }

    let mut scenery = Scenery::with_header(header);
    for track in tracks {
        scenery.add_track(track)?;
    }
    for switch in switches {
        scenery.add_switch(switch)?;
    }
    debug!(
        tracks = scenery.track_count(),
        switches = scenery.switch_count(),
        bytes = data.len(),
        "decoded scenery"
    );
    Ok(scenery)
}

/// Encodes `scenery` into `writer`.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn write_scenery<W: Write>(writer: &mut W, scenery: &Scenery) -> Result<()> {
    let bytes = encode_scenery(scenery)?;
    writer.write_all(&bytes)?;
    Ok(())
}

/// Reads `reader` to its end and decodes the bytes.
///
/// # Errors
///
/// Returns an error if reading or decoding fails.
pub fn read_scenery<R: Read>(reader: &mut R) -> Result<Scenery> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    decode_scenery(&data)
}

/// Writes `scenery` to a file, replacing any existing content.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_scenery(path: impl AsRef<Path>, scenery: &Scenery) -> Result<()> {
    let path = path.as_ref();
    let mut file = BufWriter::new(File::create(path)?);
    write_scenery(&mut file, scenery)?;
    file.flush()?;
    debug!(path = %path.display(), "saved scenery");
    Ok(())
}

/// Loads a scenery from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is malformed.
pub fn load_scenery(path: impl AsRef<Path>) -> Result<Scenery> {
    let path = path.as_ref();
    let mut file = BufReader::new(File::open(path)?);
    let scenery = read_scenery(&mut file)?;
    debug!(path = %path.display(), "loaded scenery");
    Ok(scenery)
}
