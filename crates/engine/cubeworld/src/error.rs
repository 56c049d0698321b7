//! Error types for cube world construction and traversal

use crate::scene::{LayoutId, MapId, ObjectId};
use thiserror::Error;

/// Result type for cube world operations
pub type Result<T> = std::result::Result<T, CubeError>;

/// Errors raised by the scene and the face metadata conversions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CubeError {
    /// A raw orientation value outside the six cube faces
    #[error("unexpected face orientation value: {0}")]
    UnknownOrientation(u8),

    /// A raw face kind value that is neither surface nor basement
    #[error("unknown face type: {0}")]
    UnknownFaceKind(u8),

    #[error("unknown map: {0}")]
    UnknownMap(MapId),

    #[error("unknown layout: {0}")]
    UnknownLayout(LayoutId),

    #[error("unknown object: {0}")]
    UnknownObject(ObjectId),

    /// The object has no parent map
    #[error("object {0} is not attached to a map")]
    NotAttached(ObjectId),

    /// The requested cell does not fit the object's footprint inside the map
    #[error("cell ({x}, {y}) is outside of map {map}")]
    OutOfBounds { map: MapId, x: u32, y: u32 },
}
