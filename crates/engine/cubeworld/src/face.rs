use crate::{CubeError, FaceOrientation, Result};
use glam::Quat;
use serde::{Deserialize, Serialize};

/// Kind of face a map plays in a cube layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceKind {
    /// One of the outer faces of the cube
    Surface,
    /// An underground level nested below the entry face
    Basement,
}

impl TryFrom<u8> for FaceKind {
    type Error = CubeError;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(FaceKind::Surface),
            1 => Ok(FaceKind::Basement),
            other => Err(CubeError::UnknownFaceKind(other)),
        }
    }
}

/// Face metadata attached to a map
///
/// `orientation` is only meaningful for surface faces and `level` only for
/// basement faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceDescriptor {
    pub kind: FaceKind,
    pub orientation: FaceOrientation,
    pub level: u8,
}

impl FaceDescriptor {
    /// A surface face with the given orientation
    pub fn surface(orientation: FaceOrientation) -> Self {
        Self {
            kind: FaceKind::Surface,
            orientation,
            level: 0,
        }
    }

    /// A basement face at the given level (1 is the shallowest)
    pub fn basement(level: u8) -> Self {
        Self {
            kind: FaceKind::Basement,
            orientation: FaceOrientation::Front,
            level,
        }
    }

    /// Build a descriptor out of raw designer values.
    ///
    /// The orientation is only checked for surface faces.
    pub fn from_raw(kind: u8, orientation: u8, level: u8) -> Result<Self> {
        match FaceKind::try_from(kind)? {
            FaceKind::Surface => Ok(Self::surface(FaceOrientation::try_from(orientation)?)),
            FaceKind::Basement => Ok(Self::basement(level)),
        }
    }

    #[inline]
    pub fn is_surface(&self) -> bool {
        self.kind == FaceKind::Surface
    }

    /// Rotation applied to the map when aligned into the cube.
    /// Basement levels always face front.
    pub fn alignment_rotation(&self) -> Quat {
        match self.kind {
            FaceKind::Surface => self.orientation.rotation(),
            FaceKind::Basement => FaceOrientation::Front.rotation(),
        }
    }
}
