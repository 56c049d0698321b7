use super::{LayoutId, MapId};
use crate::layout::Color;
use crate::{Edge, FaceDescriptor, Transform};
use glam::{UVec2, Vec2, Vec3};

/// A rectangular tile map
///
/// The map lies on its local XY plane with cell `(0, 0)` at the origin;
/// `transform` places it in its parent layout's space.
#[derive(Debug, Clone)]
pub struct Map {
    pub name: String,
    /// Width in cells
    pub width: u32,
    /// Height in cells
    pub height: u32,
    /// Size of a single cell in world units
    pub cell_size: Vec2,
    pub transform: Transform,
    /// Face metadata, when the map is meant to be a cube face
    pub face: Option<FaceDescriptor>,
    pub objects: ObjectsLayer,
    /// Quads sealing the basement shaft, owned by this face
    pub backgrounds: Vec<BackgroundQuad>,
    pub(crate) parent: Option<LayoutId>,
}

impl Map {
    /// Create a map with square cells of the given size
    pub fn new(name: impl Into<String>, width: u32, height: u32, cell_size: f32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            cell_size: Vec2::splat(cell_size),
            transform: Transform::IDENTITY,
            face: None,
            objects: ObjectsLayer::default(),
            backgrounds: Vec::new(),
            parent: None,
        }
    }

    pub fn with_face(mut self, face: FaceDescriptor) -> Self {
        self.face = Some(face);
        self
    }

    pub fn with_cell_size(mut self, cell_size: Vec2) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Layout this map is a child of
    pub fn parent(&self) -> Option<LayoutId> {
        self.parent
    }

    /// Largest cell an object of the given footprint may occupy
    pub fn last_cell(&self, footprint: UVec2) -> UVec2 {
        UVec2::new(
            self.width.saturating_sub(footprint.x),
            self.height.saturating_sub(footprint.y),
        )
    }

    /// Whether an object of the given footprint fits at `cell`
    pub fn fits(&self, cell: UVec2, footprint: UVec2) -> bool {
        footprint.x <= self.width
            && footprint.y <= self.height
            && cell.cmple(self.last_cell(footprint)).all()
    }

    /// Map-local position of a cell's lower-left corner
    pub fn cell_position(&self, cell: UVec2) -> Vec2 {
        cell.as_vec2() * self.cell_size
    }
}

/// The other side of an edge link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Neighbour {
    pub map: MapId,
    pub edge: Edge,
}

/// Objects layer of a map: where map objects live, and where edge links
/// to neighbouring maps are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectsLayer {
    neighbours: [Option<Neighbour>; 4],
}

impl ObjectsLayer {
    /// The neighbour linked at `edge`, if any
    pub fn neighbour(&self, edge: Edge) -> Option<Neighbour> {
        self.neighbours[edge.index()]
    }

    /// All linked edges with their neighbours
    pub fn links(&self) -> impl Iterator<Item = (Edge, Neighbour)> + '_ {
        Edge::ALL
            .into_iter()
            .filter_map(|edge| self.neighbour(edge).map(|n| (edge, n)))
    }

    pub(crate) fn set_neighbour(&mut self, edge: Edge, neighbour: Option<Neighbour>) {
        self.neighbours[edge.index()] = neighbour;
    }
}

/// Which side of a background quad is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadFacing {
    /// Seen from outside the cube
    Outward,
    /// Normals inverted: seen from inside the basement shaft
    Inward,
}

/// A flat colored square parented to a surface face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundQuad {
    /// Center of the quad in the face's local space
    pub local_position: Vec3,
    /// Side length of the quad
    pub scale: f32,
    pub color: Color,
    pub facing: QuadFacing,
}
