//! Scene arena holding maps, cube layouts and map objects
//!
//! Maps, layouts and objects are addressed by small copyable handles. The
//! scene also carries the attach/detach notifications of map objects:
//! interested parties [`Scene::subscribe`] to one object and drain their own
//! event queue, and [`Scene::unsubscribe`] when they go away.

mod map;
mod object;
mod traversal;

pub use map::{BackgroundQuad, Map, Neighbour, ObjectsLayer, QuadFacing};
pub use object::{MapObject, ObjectEvent, SubscriptionId};
pub use traversal::{EdgeLinker, Step};

use crate::layout::{CubeLayout, CubeLayoutConfig};
use crate::{CubeError, Result, Transform};
use glam::{UVec2, Vec2};
use object::Subscription;
use std::collections::VecDeque;
use std::fmt;

/// Pending events kept per subscription; older ones are dropped past this
pub(crate) const MAX_PENDING_EVENTS: usize = 256;

/// Handle of a map in a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MapId(usize);

/// Handle of a cube layout in a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayoutId(usize);

/// Handle of a map object in a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(usize);

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "map#{}", self.0)
    }
}

impl fmt::Display for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layout#{}", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object#{}", self.0)
    }
}

/// Owner of every map, layout and map object of a world
#[derive(Debug, Default)]
pub struct Scene {
    maps: Vec<Map>,
    layouts: Vec<CubeLayout>,
    objects: Vec<MapObject>,
    subscriptions: Vec<Option<Subscription>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------------
    // Layouts
    // ------------------------------------------------------------------------

    /// Add an empty cube layout. Maps become its faces once assembled.
    pub fn add_layout(&mut self, config: CubeLayoutConfig, transform: Transform) -> LayoutId {
        let id = LayoutId(self.layouts.len());
        self.layouts.push(CubeLayout::new(config, transform));
        id
    }

    pub fn layout(&self, id: LayoutId) -> Option<&CubeLayout> {
        self.layouts.get(id.0)
    }

    pub(crate) fn layout_mut(&mut self, id: LayoutId) -> Option<&mut CubeLayout> {
        self.layouts.get_mut(id.0)
    }

    // ------------------------------------------------------------------------
    // Maps
    // ------------------------------------------------------------------------

    /// Add a map, optionally as a child of a layout
    pub fn add_map(&mut self, mut map: Map, parent: Option<LayoutId>) -> Result<MapId> {
        if let Some(layout) = parent {
            if self.layout(layout).is_none() {
                return Err(CubeError::UnknownLayout(layout));
            }
        }
        map.parent = parent;
        let id = MapId(self.maps.len());
        self.maps.push(map);
        Ok(id)
    }

    pub fn map(&self, id: MapId) -> Option<&Map> {
        self.maps.get(id.0)
    }

    pub fn map_mut(&mut self, id: MapId) -> Option<&mut Map> {
        self.maps.get_mut(id.0)
    }

    pub fn maps(&self) -> impl Iterator<Item = (MapId, &Map)> {
        self.maps.iter().enumerate().map(|(i, m)| (MapId(i), m))
    }

    /// Find a map by name
    pub fn find_map(&self, name: &str) -> Option<MapId> {
        self.maps().find(|(_, m)| m.name == name).map(|(id, _)| id)
    }

    /// Child maps of a layout, in insertion order
    pub fn children(&self, layout: LayoutId) -> Vec<MapId> {
        self.maps()
            .filter(|(_, m)| m.parent == Some(layout))
            .map(|(id, _)| id)
            .collect()
    }

    /// The layout enclosing a map, if the map is a layout child
    pub fn enclosing_layout(&self, map: MapId) -> Option<(LayoutId, &CubeLayout)> {
        let layout = self.map(map)?.parent?;
        self.layout(layout).map(|l| (layout, l))
    }

    // ------------------------------------------------------------------------
    // Objects
    // ------------------------------------------------------------------------

    /// Add a detached map object
    pub fn spawn_object(&mut self, object: MapObject) -> ObjectId {
        let id = ObjectId(self.objects.len());
        self.objects.push(object);
        id
    }

    pub fn object(&self, id: ObjectId) -> Option<&MapObject> {
        self.objects.get(id.0)
    }

    /// Position of the object inside its parent map's local plane
    pub fn object_local_position(&self, id: ObjectId) -> Option<Vec2> {
        let object = self.object(id)?;
        let map = self.map(object.parent?)?;
        Some(map.cell_position(object.cell))
    }

    /// Attach an object to a map at the given cell.
    ///
    /// An object already attached somewhere is detached first, so subscribers
    /// always see a `Detached` before the next `Attached`.
    pub fn attach(&mut self, id: ObjectId, map: MapId, cell: UVec2) -> Result<()> {
        let footprint = self.object(id).ok_or(CubeError::UnknownObject(id))?.footprint();
        let target = self.map(map).ok_or(CubeError::UnknownMap(map))?;
        if !target.fits(cell, footprint) {
            return Err(CubeError::OutOfBounds {
                map,
                x: cell.x,
                y: cell.y,
            });
        }

        if self.objects[id.0].parent.is_some() {
            self.detach(id)?;
        }
        let object = &mut self.objects[id.0];
        object.parent = Some(map);
        object.cell = cell;
        self.emit(ObjectEvent::Attached { object: id, map });
        Ok(())
    }

    /// Detach an object from its map
    pub fn detach(&mut self, id: ObjectId) -> Result<()> {
        let object = self
            .objects
            .get_mut(id.0)
            .ok_or(CubeError::UnknownObject(id))?;
        let map = object.parent.take().ok_or(CubeError::NotAttached(id))?;
        self.emit(ObjectEvent::Detached { object: id, map });
        Ok(())
    }

    /// Move an attached object to another cell of its current map without
    /// firing events
    pub fn place(&mut self, id: ObjectId, cell: UVec2) -> Result<()> {
        let object = self.object(id).ok_or(CubeError::UnknownObject(id))?;
        let map_id = object.parent.ok_or(CubeError::NotAttached(id))?;
        let map = self.map(map_id).ok_or(CubeError::UnknownMap(map_id))?;
        if !map.fits(cell, object.footprint()) {
            return Err(CubeError::OutOfBounds {
                map: map_id,
                x: cell.x,
                y: cell.y,
            });
        }
        self.objects[id.0].cell = cell;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Attach/detach notifications
    // ------------------------------------------------------------------------

    /// Start receiving attach/detach events of an object
    pub fn subscribe(&mut self, object: ObjectId) -> Result<SubscriptionId> {
        if self.object(object).is_none() {
            return Err(CubeError::UnknownObject(object));
        }
        let subscription = Subscription {
            object,
            queue: VecDeque::new(),
        };
        // Reuse a released slot if there is one.
        let slot = self.subscriptions.iter().position(Option::is_none);
        let index = match slot {
            Some(index) => {
                self.subscriptions[index] = Some(subscription);
                index
            }
            None => {
                self.subscriptions.push(Some(subscription));
                self.subscriptions.len() - 1
            }
        };
        Ok(SubscriptionId(index))
    }

    /// Stop receiving events. Pending events are dropped.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        if let Some(slot) = self.subscriptions.get_mut(id.0) {
            *slot = None;
        }
    }

    /// Take every pending event of a subscription, oldest first
    pub fn drain_events(&mut self, id: SubscriptionId) -> Vec<ObjectEvent> {
        match self.subscriptions.get_mut(id.0) {
            Some(Some(subscription)) => subscription.queue.drain(..).collect(),
            _ => Vec::new(),
        }
    }

    fn emit(&mut self, event: ObjectEvent) {
        let object = event.object();
        for subscription in self.subscriptions.iter_mut().flatten() {
            if subscription.object != object {
                continue;
            }
            if subscription.queue.len() >= MAX_PENDING_EVENTS {
                // Likely a leaked subscriber.
                tracing::warn!("Dropping the oldest pending event of {object}");
                subscription.queue.pop_front();
            }
            subscription.queue.push_back(event);
        }
    }
}
