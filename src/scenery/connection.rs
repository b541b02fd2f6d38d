use crate::math::{round_to_precision, Point3, PRECISION_DIGITS};

use super::{SwitchId, TrackId};

/// Any element that can take part in a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    Track(TrackId),
    Switch(SwitchId),
}

impl From<TrackId> for ElementId {
    fn from(id: TrackId) -> Self {
        Self::Track(id)
    }
}

impl From<SwitchId> for ElementId {
    fn from(id: SwitchId) -> Self {
        Self::Switch(id)
    }
}

/// Position rounded to model precision, in integer units of the last digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) struct ConnectionKey([i64; 3]);

impl ConnectionKey {
    #[allow(clippy::cast_possible_truncation)]
    pub(super) fn new(point: &Point3) -> Self {
        let scale = 10f64.powi(PRECISION_DIGITS);
        let unit = |v: f64| (round_to_precision(v) * scale).round() as i64;
        Self([unit(point.x), unit(point.y), unit(point.z)])
    }
}

/// Elements meeting at one position: at most a pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    slots: [Option<ElementId>; 2],
}

impl Connection {
    pub(super) fn new(element: ElementId) -> Self {
        Self {
            slots: [Some(element), None],
        }
    }

    /// Elements in the order they were connected.
    pub fn elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.slots.iter().flatten().copied()
    }

    /// Returns whether both sides are taken.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Returns whether `element` is one side of this connection.
    #[must_use]
    pub fn contains(&self, element: ElementId) -> bool {
        self.slots.contains(&Some(element))
    }

    /// The side opposite to `from`, `None` at a dead end.
    ///
    /// Returns `None` as well if `from` is not part of the connection; use
    /// [`Connection::contains`] to tell the two apart.
    #[must_use]
    pub fn other(&self, from: ElementId) -> Option<ElementId> {
        match self.slots {
            [Some(a), b] if a == from => b,
            [a, Some(b)] if b == from => a,
            _ => None,
        }
    }

    pub(super) fn len(&self) -> usize {
        self.elements().count()
    }

    /// Caller checks that a slot is free.
    pub(super) fn attach(&mut self, element: ElementId) {
        if let Some(slot) = self.slots.iter_mut().find(|slot| slot.is_none()) {
            *slot = Some(element);
        }
    }

    /// Detaches `element` and returns whether the connection is now empty.
    pub(super) fn detach(&mut self, element: ElementId) -> bool {
        for slot in &mut self.slots {
            if *slot == Some(element) {
                *slot = None;
            }
        }
        if self.slots[0].is_none() {
            self.slots.swap(0, 1);
        }
        self.slots[0].is_none()
    }
}
