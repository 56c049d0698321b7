use super::{MapId, ObjectId};
use glam::UVec2;
use std::collections::VecDeque;

/// An object living on a map's objects layer
#[derive(Debug, Clone)]
pub struct MapObject {
    pub name: String,
    /// Footprint width in cells
    pub width: u32,
    /// Footprint height in cells
    pub height: u32,
    pub(crate) cell: UVec2,
    pub(crate) parent: Option<MapId>,
}

impl MapObject {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width: width.max(1),
            height: height.max(1),
            cell: UVec2::ZERO,
            parent: None,
        }
    }

    /// The map this object is attached to
    pub fn parent_map(&self) -> Option<MapId> {
        self.parent
    }

    /// Lower-left cell of the footprint
    pub fn cell(&self) -> UVec2 {
        self.cell
    }

    pub fn footprint(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }
}

/// Attachment change of a map object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectEvent {
    Attached { object: ObjectId, map: MapId },
    Detached { object: ObjectId, map: MapId },
}

impl ObjectEvent {
    pub fn object(&self) -> ObjectId {
        match *self {
            ObjectEvent::Attached { object, .. } | ObjectEvent::Detached { object, .. } => object,
        }
    }
}

/// Handle of an attach/detach subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) usize);

/// Pending events for one subscriber of one object
#[derive(Debug)]
pub(crate) struct Subscription {
    pub(crate) object: ObjectId,
    pub(crate) queue: VecDeque<ObjectEvent>,
}
