//! Cube layouts: six surface faces plus basement levels nested toward the
//! center of the cube
//!
//! The entry face is usually the front one. Each basement level faces front,
//! is centered on the cube and has `2 * delta` fewer cells per side than the
//! level above it, forming a squared cone toward the center.

mod adjacency;
mod assembler;
mod config;

pub use adjacency::{join_surfaces, LinkSetting, LINK_SETTINGS};
pub use assembler::{assemble, AssemblyObserver, AssemblyReport, Rejection};
pub use config::{Color, CubeLayoutConfig, MIN_CELL_SIZE};

use crate::scene::MapId;
use crate::{FaceOrientation, Transform};

/// Placement state of one cube layout
#[derive(Debug, Clone)]
pub struct CubeLayout {
    config: CubeLayoutConfig,
    /// Placement of the whole cube in world space
    pub transform: Transform,
    surfaces: [Option<MapId>; 6],
    basements: Vec<Option<MapId>>,
}

impl CubeLayout {
    pub(crate) fn new(config: CubeLayoutConfig, transform: Transform) -> Self {
        let config = config.sanitized();
        let basements = vec![None; config.basements as usize];
        Self {
            config,
            transform,
            surfaces: [None; 6],
            basements,
        }
    }

    /// The sanitized configuration of this layout
    pub fn config(&self) -> &CubeLayoutConfig {
        &self.config
    }

    pub fn delta(&self) -> u8 {
        self.config.delta
    }

    pub fn cell_size(&self) -> f32 {
        self.config.cell_size
    }

    /// Side of every surface map, in cells
    pub fn surface_size(&self) -> u32 {
        self.config.surface_size()
    }

    /// The face size of the cube, in world units
    pub fn face_size(&self) -> f32 {
        self.config.face_size()
    }

    /// Map placed at a surface orientation
    pub fn surface(&self, orientation: FaceOrientation) -> Option<MapId> {
        self.surfaces[orientation.index()]
    }

    /// All six surface slots, indexed by [`FaceOrientation::index`]
    pub fn surfaces(&self) -> &[Option<MapId>; 6] {
        &self.surfaces
    }

    /// Map placed at a basement level (1-based)
    pub fn basement(&self, level: u8) -> Option<MapId> {
        let index = (level as usize).checked_sub(1)?;
        self.basements.get(index).copied().flatten()
    }

    /// Orientation a map was placed at, if it is a surface of this layout
    pub fn orientation_of(&self, map: MapId) -> Option<FaceOrientation> {
        FaceOrientation::ALL
            .into_iter()
            .find(|o| self.surfaces[o.index()] == Some(map))
    }

    /// Whether the map was accepted as a face of this layout
    pub fn contains(&self, map: MapId) -> bool {
        self.surfaces.contains(&Some(map)) || self.basements.contains(&Some(map))
    }

    /// Empty every slot, returning the maps that were placed
    fn clear_slots(&mut self) -> Vec<MapId> {
        let placed = self
            .surfaces
            .iter()
            .chain(&self.basements)
            .flatten()
            .copied()
            .collect();
        self.surfaces = [None; 6];
        self.basements.iter_mut().for_each(|slot| *slot = None);
        placed
    }
}
