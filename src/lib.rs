//! Rail scenery geometry and persistence.
//!
//! Tracks are laid out from a moving [`BasePoint`] with the factories in
//! [`operations::creation`], collected in a [`Scenery`] and persisted with
//! the chunked binary format in [`codec`].

pub mod codec;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod scenery;

pub use codec::{decode_scenery, encode_scenery, load_scenery, save_scenery, CodecOptions};
pub use error::{Result, SceneryError};
pub use geometry::{BasePoint, Direction, PathKind, TrackPath};
pub use scenery::{ElementId, Scenery, Switch, Track};
