mod connection;
pub mod switch;
pub mod track;

pub use connection::{Connection, ElementId};
pub use switch::{Switch, SwitchId, SwitchState};
pub use track::{Track, TrackId};

use std::collections::HashMap;

use crate::codec::FORMAT_VERSION;
use crate::error::ModelError;
use crate::geometry::PathKind;
use crate::math::Point3;
use connection::ConnectionKey;
use slotmap::SlotMap;

/// Central arena that owns all tracks and switches of a layout.
///
/// Entities are addressed by typed generational ids and iterated in
/// insertion order. Names, when present, are unique per entity type.
///
/// Every endpoint is registered in a connection index keyed by the position
/// at model precision. A connection joins at most two elements.
#[derive(Debug, Clone)]
pub struct Scenery {
    header: Vec<u8>,
    tracks: SlotMap<TrackId, Track>,
    track_order: Vec<TrackId>,
    switches: SlotMap<SwitchId, Switch>,
    switch_order: Vec<SwitchId>,
    connections: HashMap<ConnectionKey, Connection>,
}

/// Elements with an endpoint at a given position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Connections {
    pub tracks: Vec<TrackId>,
    pub switches: Vec<SwitchId>,
}

impl Connections {
    /// Returns whether nothing is connected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty() && self.switches.is_empty()
    }
}

impl Default for Scenery {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenery {
    /// Creates a new, empty scenery carrying the current format version as
    /// its header.
    #[must_use]
    pub fn new() -> Self {
        Self::with_header(FORMAT_VERSION.to_le_bytes().to_vec())
    }

    /// Creates an empty scenery with an opaque header payload.
    #[must_use]
    pub fn with_header(header: Vec<u8>) -> Self {
        Self {
            header,
            tracks: SlotMap::with_key(),
            track_order: Vec::new(),
            switches: SlotMap::with_key(),
            switch_order: Vec::new(),
            connections: HashMap::new(),
        }
    }

    /// Raw header payload, persisted verbatim.
    #[must_use]
    pub fn header(&self) -> &[u8] {
        &self.header
    }

    /// Replaces the header payload.
    pub fn set_header(&mut self, header: Vec<u8>) {
        self.header = header;
    }

    // --- Track operations ---

    /// Inserts a track and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if another track already uses the same name, or an
    /// endpoint lands on a connection that already joins two elements.
    pub fn add_track(&mut self, track: Track) -> Result<TrackId, ModelError> {
        if let Some(name) = &track.name {
            if self.track_by_name(name).is_some() {
                return Err(ModelError::NameTaken {
                    kind: "track",
                    name: name.clone(),
                });
            }
        }
        let endpoints = track.endpoints();
        self.ensure_free(&endpoints)?;
        let id = self.tracks.insert(track);
        self.track_order.push(id);
        self.link(id.into(), &endpoints);
        Ok(id)
    }

    /// Returns a reference to the track, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the scenery.
    pub fn track(&self, id: TrackId) -> Result<&Track, ModelError> {
        self.tracks
            .get(id)
            .ok_or_else(|| ModelError::NotFound("track".into()))
    }

    /// Looks a track up by name.
    #[must_use]
    pub fn track_by_name(&self, name: &str) -> Option<(TrackId, &Track)> {
        self.tracks()
            .find(|(_, track)| track.name.as_deref() == Some(name))
    }

    /// Removes a track and hands it back.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the scenery.
    pub fn remove_track(&mut self, id: TrackId) -> Result<Track, ModelError> {
        let track = self
            .tracks
            .remove(id)
            .ok_or_else(|| ModelError::NotFound("track".into()))?;
        self.track_order.retain(|&other| other != id);
        self.unlink(id.into(), &track.endpoints());
        Ok(track)
    }

    /// Removes a track by name.
    ///
    /// # Errors
    ///
    /// Returns an error if no track has that name.
    pub fn remove_track_by_name(&mut self, name: &str) -> Result<Track, ModelError> {
        let (id, _) = self
            .track_by_name(name)
            .ok_or_else(|| ModelError::NotFound(format!("track '{name}'")))?;
        self.remove_track(id)
    }

    /// Iterates over all tracks in insertion order.
    pub fn tracks(&self) -> impl Iterator<Item = (TrackId, &Track)> + '_ {
        self.track_order
            .iter()
            .filter_map(move |&id| self.tracks.get(id).map(|track| (id, track)))
    }

    /// Iterates over the tracks of one kind in insertion order.
    pub fn tracks_of_kind(&self, kind: PathKind) -> impl Iterator<Item = &Track> + '_ {
        self.tracks()
            .map(|(_, track)| track)
            .filter(move |track| track.kind() == kind)
    }

    /// Number of tracks.
    #[must_use]
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    // --- Switch operations ---

    /// Inserts a switch and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if another switch already uses the same name, or an
    /// endpoint lands on a connection that already joins two elements.
    pub fn add_switch(&mut self, switch: Switch) -> Result<SwitchId, ModelError> {
        if let Some(name) = &switch.name {
            if self.switch_by_name(name).is_some() {
                return Err(ModelError::NameTaken {
                    kind: "switch",
                    name: name.clone(),
                });
            }
        }
        let endpoints = switch.endpoints();
        self.ensure_free(&endpoints)?;
        let id = self.switches.insert(switch);
        self.switch_order.push(id);
        self.link(id.into(), &endpoints);
        Ok(id)
    }

    /// Returns a reference to the switch, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the scenery.
    pub fn switch(&self, id: SwitchId) -> Result<&Switch, ModelError> {
        self.switches
            .get(id)
            .ok_or_else(|| ModelError::NotFound("switch".into()))
    }

    /// Routes a switch onto one of its branches.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the scenery.
    pub fn set_switch_state(
        &mut self,
        id: SwitchId,
        state: SwitchState,
    ) -> Result<(), ModelError> {
        self.switches
            .get_mut(id)
            .ok_or_else(|| ModelError::NotFound("switch".into()))?
            .state = state;
        Ok(())
    }

    /// Looks a switch up by name.
    #[must_use]
    pub fn switch_by_name(&self, name: &str) -> Option<(SwitchId, &Switch)> {
        self.switches()
            .find(|(_, switch)| switch.name.as_deref() == Some(name))
    }

    /// Removes a switch and hands it back.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the scenery.
    pub fn remove_switch(&mut self, id: SwitchId) -> Result<Switch, ModelError> {
        let switch = self
            .switches
            .remove(id)
            .ok_or_else(|| ModelError::NotFound("switch".into()))?;
        self.switch_order.retain(|&other| other != id);
        self.unlink(id.into(), &switch.endpoints());
        Ok(switch)
    }

    /// Removes a switch by name.
    ///
    /// # Errors
    ///
    /// Returns an error if no switch has that name.
    pub fn remove_switch_by_name(&mut self, name: &str) -> Result<Switch, ModelError> {
        let (id, _) = self
            .switch_by_name(name)
            .ok_or_else(|| ModelError::NotFound(format!("switch '{name}'")))?;
        self.remove_switch(id)
    }

    /// Iterates over all switches in insertion order.
    pub fn switches(&self) -> impl Iterator<Item = (SwitchId, &Switch)> + '_ {
        self.switch_order
            .iter()
            .filter_map(move |&id| self.switches.get(id).map(|switch| (id, switch)))
    }

    /// Number of switches.
    #[must_use]
    pub fn switch_count(&self) -> usize {
        self.switches.len()
    }

    // --- Queries ---

    /// Returns whether the scenery holds no tracks and no switches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty() && self.switches.is_empty()
    }

    /// Elements having an endpoint at `point` (model precision).
    #[must_use]
    pub fn connections_at(&self, point: &Point3) -> Connections {
        let mut found = Connections::default();
        for element in self.connection(point).into_iter().flat_map(Connection::elements) {
            match element {
                ElementId::Track(id) => found.tracks.push(id),
                ElementId::Switch(id) => found.switches.push(id),
            }
        }
        found
    }

    /// The connection registered at `point`, if any.
    #[must_use]
    pub fn connection(&self, point: &Point3) -> Option<&Connection> {
        self.connections.get(&ConnectionKey::new(point))
    }

    /// Element reached when leaving `from` at `position`.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no connection at `position`, `from` is
    /// not part of it, or nothing continues beyond `from`.
    pub fn next_track(
        &self,
        position: &Point3,
        from: impl Into<ElementId>,
    ) -> Result<ElementId, ModelError> {
        let from = from.into();
        let (x, y, z) = (position.x, position.y, position.z);
        let connection = self
            .connection(position)
            .ok_or(ModelError::NoConnection { x, y, z })?;
        if !connection.contains(from) {
            return Err(ModelError::NotConnected { x, y, z });
        }
        connection.other(from).ok_or(ModelError::DeadEnd { x, y, z })
    }

    /// Endpoint reached when entering `element` at `entry`.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is not found or `entry` is not one
    /// of its endpoints.
    pub fn exit(&self, element: ElementId, entry: &Point3) -> crate::error::Result<Point3> {
        match element {
            ElementId::Track(id) => self.track(id)?.exit(entry),
            ElementId::Switch(id) => self.switch(id)?.exit(entry),
        }
    }

    fn ensure_free(&self, endpoints: &[Point3]) -> Result<(), ModelError> {
        for (i, point) in endpoints.iter().enumerate() {
            let key = ConnectionKey::new(point);
            let taken = self.connections.get(&key).map_or(0, Connection::len)
                + endpoints[..i]
                    .iter()
                    .filter(|other| ConnectionKey::new(other) == key)
                    .count();
            if taken >= 2 {
                return Err(ModelError::ConnectionOccupied {
                    x: point.x,
                    y: point.y,
                    z: point.z,
                });
            }
        }
        Ok(())
    }

    fn link(&mut self, element: ElementId, endpoints: &[Point3]) {
        for point in endpoints {
            self.connections
                .entry(ConnectionKey::new(point))
                .and_modify(|connection| connection.attach(element))
                .or_insert_with(|| Connection::new(element));
        }
    }

    fn unlink(&mut self, element: ElementId, endpoints: &[Point3]) {
        for point in endpoints {
            let key = ConnectionKey::new(point);
            if self
                .connections
                .get_mut(&key)
                .is_some_and(|connection| connection.detach(element))
            {
                self.connections.remove(&key);
            }
        }
    }
}
