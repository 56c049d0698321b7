//! Cube worlds built out of square tile maps
//!
//! Six surface maps are placed on the faces of a cube, and an optional stack
//! of basement maps is nested toward the cube's center. Once placed, the
//! surface maps are linked edge to edge so objects can walk across faces.
//!
//! - [`FaceOrientation`]: the six cube faces, with their rotation and pivot corner
//! - [`FaceDescriptor`]: per-map face metadata (surface or basement)
//! - [`Scene`]: arena of maps, layouts and map objects
//! - [`CubeLayout`] and [`assemble`]: placement, validation and edge linking

mod edge;
mod error;
mod face;
mod orientation;
mod transform;

pub mod layout;
pub mod scene;

pub use edge::Edge;
pub use error::{CubeError, Result};
pub use face::{FaceDescriptor, FaceKind};
pub use layout::{
    assemble, join_surfaces, AssemblyObserver, AssemblyReport, Color, CubeLayout,
    CubeLayoutConfig, LinkSetting, Rejection, LINK_SETTINGS,
};
pub use orientation::FaceOrientation;
pub use scene::{
    BackgroundQuad, EdgeLinker, LayoutId, Map, MapId, MapObject, Neighbour, ObjectEvent,
    ObjectId, ObjectsLayer, QuadFacing, Scene, Step, SubscriptionId,
};
pub use transform::Transform;

// Re-export glam for convenience
pub use glam;
