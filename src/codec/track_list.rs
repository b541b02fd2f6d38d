//! `TRKS` chunk: one homogeneous record array per path kind.

use super::chunk::{ChunkReader, ChunkWriter};
use super::format::track_record_size;
use crate::error::FormatError;
use crate::geometry::{PathKind, TrackPath};
use crate::scenery::{Scenery, Track};

pub(super) fn write(writer: &mut ChunkWriter, scenery: &Scenery) -> Result<(), FormatError> {
    for kind in PathKind::ALL {
        let tracks: Vec<&Track> = scenery.tracks_of_kind(kind).collect();
        writer.write_count(tracks.len())?;
        for track in tracks {
            writer.write_u8(kind.tag());
            write_points(writer, &track.path);
        }
    }
    Ok(())
}

pub(super) fn read(reader: &mut ChunkReader) -> Result<Vec<Track>, FormatError> {
    let mut tracks = Vec::new();
    for kind in PathKind::ALL {
        let count = reader.read_count(track_record_size(kind.point_count()))?;
        tracks.reserve(count as usize);
        for _ in 0..count {
            let found = PathKind::try_from(reader.read_u8()?)?;
            if found != kind {
                return Err(FormatError::KindMismatch {
                    expected: kind,
                    found,
                });
            }
            tracks.push(Track::new(read_points(reader, kind)?));
        }
    }
    Ok(tracks)
}

/// Writes the points of a path as vec3f, without a kind tag.
pub(super) fn write_points(writer: &mut ChunkWriter, path: &TrackPath) {
    for point in path.points() {
        writer.write_vec3f(&point);
    }
}

/// Reads the points of a path of `kind`, without a kind tag.
pub(super) fn read_points(
    reader: &mut ChunkReader,
    kind: PathKind,
) -> Result<TrackPath, FormatError> {
    Ok(match kind {
        PathKind::Straight => TrackPath::Straight {
            start: reader.read_vec3f()?,
            end: reader.read_vec3f()?,
        },
        PathKind::Bezier => TrackPath::Bezier {
            start: reader.read_vec3f()?,
            ctrl1: reader.read_vec3f()?,
            ctrl2: reader.read_vec3f()?,
            end: reader.read_vec3f()?,
        },
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn sample_scenery() -> Scenery {
        let mut scenery = Scenery::new();
        scenery
            .add_track(Track::new(TrackPath::Bezier {
                start: p(0.0, 0.0, 0.0),
                ctrl1: p(0.0, 1.0, 0.0),
                ctrl2: p(1.0, 2.0, 0.0),
                end: p(2.0, 2.0, 0.0),
            }))
            .unwrap();
        scenery
            .add_track(Track::new(TrackPath::Straight {
                start: p(2.0, 2.0, 0.0),
                end: p(12.0, 2.0, 0.5),
            }))
            .unwrap();
        scenery
            .add_track(Track::new(TrackPath::Straight {
                start: p(12.0, 2.0, 0.5),
                end: p(22.0, 2.0, 1.0),
            }))
            .unwrap();
        scenery
    }

    #[test]
    fn record_sizes() {
        let mut writer = ChunkWriter::new();
        write(&mut writer, &sample_scenery()).unwrap();
        let bytes = writer.into_bytes();
        assert_eq!(bytes.len(), 4 + 2 * 25 + 4 + 49);
        assert_eq!(&bytes[..4], &2u32.to_le_bytes());
        assert_eq!(bytes[4], 0);
        assert_eq!(&bytes[54..58], &1u32.to_le_bytes());
        assert_eq!(bytes[58], 1);
    }

    #[test]
    fn straight_list_precedes_bezier_list() {
        let mut writer = ChunkWriter::new();
        write(&mut writer, &sample_scenery()).unwrap();
        let bytes = writer.into_bytes();

        let tracks = read(&mut ChunkReader::new(&bytes)).unwrap();
        let kinds: Vec<_> = tracks.iter().map(Track::kind).collect();
        assert_eq!(
            kinds,
            vec![PathKind::Straight, PathKind::Straight, PathKind::Bezier]
        );
        assert_eq!(tracks[1].path.back(), p(22.0, 2.0, 1.0));
    }

    #[test]
    fn unknown_kind_tag_is_rejected() {
        let mut writer = ChunkWriter::new();
        writer.write_u32(1);
        writer.write_u8(9);
        writer.write_vec3f(&p(0.0, 0.0, 0.0));
        writer.write_vec3f(&p(1.0, 0.0, 0.0));
        writer.write_u32(0);
        let bytes = writer.into_bytes();
        assert_eq!(
            read(&mut ChunkReader::new(&bytes)),
            Err(FormatError::UnknownKind(9))
        );
    }

    #[test]
    fn bezier_tag_in_straight_list_is_rejected() {
        let mut writer = ChunkWriter::new();
        writer.write_u32(1);
        writer.write_u8(1);
        writer.write_vec3f(&p(0.0, 0.0, 0.0));
        writer.write_vec3f(&p(1.0, 0.0, 0.0));
        writer.write_u32(0);
        let bytes = writer.into_bytes();
        assert_eq!(
            read(&mut ChunkReader::new(&bytes)),
            Err(FormatError::KindMismatch {
                expected: PathKind::Straight,
                found: PathKind::Bezier
            })
        );
    }

    #[test]
    fn count_beyond_payload_is_rejected() {
        let mut writer = ChunkWriter::new();
        writer.write_u32(3);
        writer.write_u8(0);
        writer.write_vec3f(&p(0.0, 0.0, 0.0));
        writer.write_vec3f(&p(1.0, 0.0, 0.0));
        let bytes = writer.into_bytes();
        assert_eq!(
            read(&mut ChunkReader::new(&bytes)),
            Err(FormatError::CountOverrun {
                count: 3,
                record_size: 25,
                available: 25
            })
        );
    }
}
