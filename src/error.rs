use thiserror::Error;

use crate::codec::ChunkTag;
use crate::geometry::PathKind;

/// Top-level error type for scenery construction and persistence.
#[derive(Debug, Error)]
pub enum SceneryError {
    #[error(transparent)]
    InvalidArgument(#[from] ArgumentError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rejected parameters of a geometry or factory call.
///
/// Raised before any base point mutation takes place.
#[derive(Debug, Error, PartialEq)]
pub enum ArgumentError {
    #[error("{parameter} = {value} must be positive and finite")]
    NonPositive { parameter: &'static str, value: f64 },

    #[error("a single curve must sweep less than a full turn, got {degrees} degrees")]
    FullTurn { degrees: f64 },

    #[error("unknown curve direction: {0}")]
    UnknownDirection(String),

    #[error("switch name must not be empty")]
    EmptyName,

    #[error("zero-length vector")]
    ZeroVector,

    #[error("reference direction must be perpendicular to the arc normal")]
    NotPerpendicular,
}

/// Malformed, truncated or out-of-order binary input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("unexpected end of data: needed {needed} bytes, {available} available")]
    Truncated { needed: usize, available: usize },

    #[error("chunk {tag} declares {declared} bytes but only {available} remain")]
    ChunkOverrun {
        tag: ChunkTag,
        declared: usize,
        available: usize,
    },

    #[error("missing required chunk {0}")]
    MissingChunk(ChunkTag),

    #[error("chunk {0} appears more than once")]
    DuplicateChunk(ChunkTag),

    #[error("expected chunk {expected}, found {found}")]
    UnexpectedChunk { expected: ChunkTag, found: ChunkTag },

    #[error("chunk {tag} has {remaining} unread trailing bytes")]
    TrailingBytes { tag: ChunkTag, remaining: usize },

    #[error("unknown track kind tag {0}")]
    UnknownKind(u8),

    #[error("{expected:?} track list contains a record tagged {found:?}")]
    KindMismatch { expected: PathKind, found: PathKind },

    #[error("unknown switch shape index {0}")]
    UnknownShape(u8),

    #[error("{count} records of {record_size} bytes overrun the {available} bytes left")]
    CountOverrun {
        count: u32,
        record_size: usize,
        available: usize,
    },

    #[error("switch position string holds {found} bytes, expected {expected}")]
    PositionLength { expected: usize, found: usize },

    #[error("{0} does not fit a 32-bit length prefix")]
    TooLarge(usize),
}

/// Errors raised by the scenery store.
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("{kind} named '{name}' already exists")]
    NameTaken { kind: &'static str, name: String },

    #[error("entity not found: {0}")]
    NotFound(String),

    #[error("({x:.3}, {y:.3}, {z:.3}) is not an entry of this element")]
    UnknownEntry { x: f64, y: f64, z: f64 },

    #[error("connection at ({x:.3}, {y:.3}, {z:.3}) already joins two elements")]
    ConnectionOccupied { x: f64, y: f64, z: f64 },

    #[error("no connection at ({x:.3}, {y:.3}, {z:.3})")]
    NoConnection { x: f64, y: f64, z: f64 },

    #[error("element is not connected at ({x:.3}, {y:.3}, {z:.3})")]
    NotConnected { x: f64, y: f64, z: f64 },

    #[error("dead end at ({x:.3}, {y:.3}, {z:.3})")]
    DeadEnd { x: f64, y: f64, z: f64 },
}

/// Convenience type alias for results using [`SceneryError`].
pub type Result<T> = std::result::Result<T, SceneryError>;
