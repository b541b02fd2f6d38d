//! `SWCH` chunk: switch records in one of four shapes.
//!
//! A record is the shape byte `straight.kind + diverted.kind * 2`, the
//! straight branch points, the diverted branch points (all vec3f), then the
//! origin position as a length-prefixed byte string holding a vec3.

use super::chunk::{ChunkReader, ChunkWriter};
use super::format::U32_SIZE;
use super::track_list::{read_points, write_points};
use super::{CodecOptions, Precision};
use crate::error::FormatError;
use crate::geometry::PathKind;
use crate::math::Point3;
use crate::scenery::{Scenery, Switch};

/// Byte size of the branch points for each shape index.
pub const SHAPE_PAYLOAD_SIZES: [usize; 4] = [48, 72, 72, 96];

/// Branch kinds `(straight, diverted)` encoded by a shape index.
pub fn shape_kinds(shape: u8) -> Result<(PathKind, PathKind), FormatError> {
    if shape > 3 {
        return Err(FormatError::UnknownShape(shape));
    }
    Ok((
        PathKind::try_from(shape & 1)?,
        PathKind::try_from(shape >> 1)?,
    ))
}

pub(super) fn write(
    writer: &mut ChunkWriter,
    scenery: &Scenery,
    options: CodecOptions,
) -> Result<(), FormatError> {
    writer.write_count(scenery.switch_count())?;
    for (_, switch) in scenery.switches() {
        writer.write_u8(switch.shape_index());
        write_points(writer, &switch.straight);
        write_points(writer, &switch.diverted);
        writer.write_string(&position_bytes(&switch.position, options.position_precision))?;
    }
    Ok(())
}

pub(super) fn read(
    reader: &mut ChunkReader,
    options: CodecOptions,
) -> Result<Vec<Switch>, FormatError> {
    let precision = options.position_precision;
    let smallest_record = 1 + SHAPE_PAYLOAD_SIZES[0] + U32_SIZE + precision.vec3_size();
    let count = reader.read_count(smallest_record)?;

    let mut switches = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let (straight_kind, diverted_kind) = shape_kinds(reader.read_u8()?)?;
        let straight = read_points(reader, straight_kind)?;
        let diverted = read_points(reader, diverted_kind)?;

        let raw = reader.read_string()?;
        if raw.len() != precision.vec3_size() {
            return Err(FormatError::PositionLength {
                expected: precision.vec3_size(),
                found: raw.len(),
            });
        }
        let mut vec3 = ChunkReader::new(raw);
        let position = match precision {
            Precision::Single => vec3.read_vec3f()?,
            Precision::Double => vec3.read_vec3d()?,
        };
        switches.push(Switch::new(straight, diverted, position));
    }
    Ok(switches)
}

fn position_bytes(position: &Point3, precision: Precision) -> Vec<u8> {
    let mut writer = ChunkWriter::new();
    match precision {
        Precision::Single => writer.write_vec3f(position),
        Precision::Double => writer.write_vec3d(position),
    }
    writer.into_bytes()
}
