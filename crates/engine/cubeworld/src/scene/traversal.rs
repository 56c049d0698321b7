//! Edge links between maps and walking across them

use super::{MapId, Neighbour, ObjectId, Scene};
use crate::{CubeError, Edge, Result};
use glam::{IVec2, UVec2, Vec3};

/// Strategy establishing cross-map traversal at map edges
///
/// Both calls must be safe to repeat: unlinking a free edge does nothing and
/// linking an already linked pair leaves the same single link in place.
pub trait EdgeLinker {
    /// Remove the link at `edge` of `map`, if any
    fn unlink(&mut self, map: MapId, edge: Edge);

    /// Link `edge` of `map` with `other_edge` of `other`
    fn link(&mut self, map: MapId, edge: Edge, other: MapId, other_edge: Edge);
}

impl EdgeLinker for Scene {
    fn unlink(&mut self, map: MapId, edge: Edge) {
        let Some(source) = self.map_mut(map) else {
            return;
        };
        let Some(neighbour) = source.objects.neighbour(edge) else {
            return;
        };
        source.objects.set_neighbour(edge, None);

        // Drop the back link too, unless it was already pointed elsewhere.
        if let Some(other) = self.map_mut(neighbour.map) {
            if other.objects.neighbour(neighbour.edge) == Some(Neighbour { map, edge }) {
                other.objects.set_neighbour(neighbour.edge, None);
            }
        }
    }

    fn link(&mut self, map: MapId, edge: Edge, other: MapId, other_edge: Edge) {
        if self.map(map).is_none() || self.map(other).is_none() {
            tracing::warn!("cannot link {map}:{edge:?} -> {other}:{other_edge:?}: unknown map");
            return;
        }
        self.unlink(map, edge);
        self.unlink(other, other_edge);

        if let Some(source) = self.map_mut(map) {
            source.objects.set_neighbour(
                edge,
                Some(Neighbour {
                    map: other,
                    edge: other_edge,
                }),
            );
        }
        if let Some(destination) = self.map_mut(other) {
            destination
                .objects
                .set_neighbour(other_edge, Some(Neighbour { map, edge }));
        }
    }
}

/// Outcome of a single-cell step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Moved inside the same map
    Moved { map: MapId, cell: UVec2 },
    /// Left the map through a linked edge and arrived on the neighbour
    Crossed { from: MapId, to: MapId, cell: UVec2 },
    /// Reached an edge without a link
    Blocked,
}

impl Scene {
    /// Move an attached object one cell toward `edge`.
    ///
    /// Stepping over a linked edge detaches the object from its map and
    /// attaches it to the linked neighbour.
    pub fn walk(&mut self, id: ObjectId, edge: Edge) -> Result<Step> {
        let object = self.object(id).ok_or(CubeError::UnknownObject(id))?;
        let map_id = object.parent_map().ok_or(CubeError::NotAttached(id))?;
        let (cell, footprint) = (object.cell(), object.footprint());
        let map = self.map(map_id).ok_or(CubeError::UnknownMap(map_id))?;

        let next = cell.as_ivec2() + edge.step();
        let last = map.last_cell(footprint).as_ivec2();
        if next.cmpge(IVec2::ZERO).all() && next.cmple(last).all() {
            let next = next.as_uvec2();
            self.place(id, next)?;
            return Ok(Step::Moved { map: map_id, cell: next });
        }

        let Some(neighbour) = map.objects.neighbour(edge) else {
            return Ok(Step::Blocked);
        };
        let arrival = self.arrival_cell(map_id, cell, footprint, edge, neighbour)?;
        self.attach(id, neighbour.map, arrival)?;
        tracing::debug!(
            "object {id} crossed {map_id}:{edge:?} -> {}:{:?}",
            neighbour.map,
            neighbour.edge
        );
        Ok(Step::Crossed {
            from: map_id,
            to: neighbour.map,
            cell: arrival,
        })
    }

    /// Cell at which an object leaving `map` through `edge` enters the
    /// neighbour.
    ///
    /// When both maps share a layout, the exit point is carried through their
    /// layout-space transforms so the crossing is continuous in 3D. Otherwise
    /// the position along the edge is kept as is.
    fn arrival_cell(
        &self,
        map_id: MapId,
        cell: UVec2,
        footprint: UVec2,
        edge: Edge,
        neighbour: Neighbour,
    ) -> Result<UVec2> {
        let source = self.map(map_id).ok_or(CubeError::UnknownMap(map_id))?;
        let target = self
            .map(neighbour.map)
            .ok_or(CubeError::UnknownMap(neighbour.map))?;
        if !target.fits(UVec2::ZERO, footprint) {
            return Err(CubeError::OutOfBounds {
                map: neighbour.map,
                x: 0,
                y: 0,
            });
        }
        let last = target.last_cell(footprint);
        let half = footprint.as_vec2() / 2.0;

        let along = if source.parent.is_some() && source.parent == target.parent {
            // Exit point: footprint center, pushed onto the edge line.
            let mut exit = (cell.as_vec2() + half) * source.cell_size;
            match edge {
                Edge::Down => exit.y = 0.0,
                Edge::Up => exit.y = source.height as f32 * source.cell_size.y,
                Edge::Left => exit.x = 0.0,
                Edge::Right => exit.x = source.width as f32 * source.cell_size.x,
            }
            let shared = source.transform.transform_point(exit.extend(0.0));
            let local: Vec3 = target.transform.inverse_transform_point(shared);
            let entry = local.truncate() / target.cell_size - half;
            if neighbour.edge.is_horizontal() {
                entry.x
            } else {
                entry.y
            }
        } else if edge.is_horizontal() {
            cell.x as f32
        } else {
            cell.y as f32
        };

        let along = along.round().max(0.0) as u32;
        let arrival = match neighbour.edge {
            Edge::Down => UVec2::new(along.min(last.x), 0),
            Edge::Up => UVec2::new(along.min(last.x), last.y),
            Edge::Left => UVec2::new(0, along.min(last.y)),
            Edge::Right => UVec2::new(last.x, along.min(last.y)),
        };
        Ok(arrival)
    }
}
