//! Placement and validation of a layout's child maps

use super::join_surfaces;
use crate::scene::{BackgroundQuad, EdgeLinker, LayoutId, MapId, QuadFacing, Scene};
use crate::{CubeError, Edge, FaceKind, FaceOrientation, Result, Transform};
use glam::Vec3;
use thiserror::Error;

/// Tolerance used when comparing cell sizes
const CELL_SIZE_TOLERANCE: f32 = 1e-4;

/// Offset of the outward background quad off the face plane
const OUTER_QUAD_BUFFER: f32 = 0.001;
/// Offset of the inward background quad off the face plane
const INNER_QUAD_BUFFER: f32 = 0.002;

/// Why a child map was left out of its layout
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    #[error("the map is not square")]
    NotSquare,

    #[error("the map has an unexpected cell size (expected: {expected})")]
    UnexpectedCellSize { expected: f32 },

    #[error("orientation {0:?} is already occupied by another map")]
    OrientationOccupied(FaceOrientation),

    #[error("a surface map must be {expected}x{expected} cells, got {actual}")]
    SurfaceSize { expected: u32, actual: u32 },

    #[error("level {level} is 0 or above the number of basements ({basements})")]
    LevelOutOfRange { level: u8, basements: u8 },

    #[error("level {0} is already occupied by another map")]
    LevelOccupied(u8),

    #[error("a basement map at level {level} must be {expected}x{expected} cells, got {actual}")]
    BasementSize { level: u8, expected: u32, actual: u32 },
}

/// Outcome of assembling a layout
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyReport {
    pub layout: LayoutId,
    /// Accepted surface maps
    pub surfaces: Vec<(FaceOrientation, MapId)>,
    /// Accepted basement maps, by level
    pub basements: Vec<(u8, MapId)>,
    /// Maps left out, with the reason
    pub rejections: Vec<(MapId, Rejection)>,
    /// Number of edge links established
    pub links: usize,
}

impl AssemblyReport {
    /// Whether all six surfaces were placed
    pub fn is_complete(&self) -> bool {
        self.surfaces.len() == FaceOrientation::ALL.len()
    }
}

/// Notified once a layout finished assembling
///
/// Followers register here to reframe their camera against the placed faces,
/// whether they were created before or after assembly.
pub trait AssemblyObserver {
    fn layout_assembled(&mut self, scene: &Scene, layout: LayoutId);
}

/// Validate, place and link every child map of a layout.
///
/// Maps failing validation are skipped with a warning and listed in the
/// report; the rest of the layout is assembled regardless. Running this again
/// on the same scene yields the same placement and links.
pub fn assemble(
    scene: &mut Scene,
    layout: LayoutId,
    observers: &mut [&mut dyn AssemblyObserver],
) -> Result<AssemblyReport> {
    let config = scene
        .layout(layout)
        .ok_or(CubeError::UnknownLayout(layout))?
        .config()
        .clone();
    let children = scene.children(layout);

    let previous = scene
        .layout_mut(layout)
        .map(|state| state.clear_slots())
        .unwrap_or_default();
    // Faces of a previous run start over unlinked and unplaced.
    for map in previous {
        for edge in Edge::ALL {
            scene.unlink(map, edge);
        }
        if let Some(map) = scene.map_mut(map) {
            map.transform = Transform::IDENTITY;
        }
    }
    for &child in &children {
        if let Some(map) = scene.map_mut(child) {
            map.backgrounds.clear();
        }
    }

    let surface_size = config.surface_size();
    let half = config.half_extent();
    let mut report = AssemblyReport {
        layout,
        surfaces: Vec::new(),
        basements: Vec::new(),
        rejections: Vec::new(),
        links: 0,
    };

    for child in children {
        let Some(map) = scene.map(child) else {
            continue;
        };
        let Some(face) = map.face else {
            continue;
        };
        let side = map.width;

        let rejection = if map.width != map.height
            || (map.cell_size.x - map.cell_size.y).abs() > CELL_SIZE_TOLERANCE
        {
            Some(Rejection::NotSquare)
        } else if (map.cell_size.x - config.cell_size).abs() > CELL_SIZE_TOLERANCE {
            Some(Rejection::UnexpectedCellSize {
                expected: config.cell_size,
            })
        } else {
            None
        };
        if let Some(rejection) = rejection {
            reject(&mut report, child, &map.name, rejection);
            continue;
        }

        match face.kind {
            FaceKind::Surface => {
                let orientation = face.orientation;
                let occupied = scene
                    .layout(layout)
                    .and_then(|l| l.surface(orientation))
                    .is_some();
                if occupied {
                    let name = map.name.clone();
                    let rejection = Rejection::OrientationOccupied(orientation);
                    reject(&mut report, child, &name, rejection);
                    continue;
                }
                if side != surface_size {
                    let name = map.name.clone();
                    let rejection = Rejection::SurfaceSize {
                        expected: surface_size,
                        actual: side,
                    };
                    reject(&mut report, child, &name, rejection);
                    continue;
                }

                if let Some(state) = scene.layout_mut(layout) {
                    state.surfaces[orientation.index()] = Some(child);
                }
                if let Some(map) = scene.map_mut(child) {
                    map.transform = Transform::new(
                        orientation.cubic_assembly_position() * half,
                        face.alignment_rotation(),
                    );
                    map.backgrounds = background_quads(half, config.basement_background);
                }
                report.surfaces.push((orientation, child));
            }
            FaceKind::Basement => {
                let level = face.level;
                if level == 0 || level > config.basements {
                    let name = map.name.clone();
                    let rejection = Rejection::LevelOutOfRange {
                        level,
                        basements: config.basements,
                    };
                    reject(&mut report, child, &name, rejection);
                    continue;
                }
                let occupied = scene
                    .layout(layout)
                    .and_then(|l| l.basement(level))
                    .is_some();
                if occupied {
                    let name = map.name.clone();
                    reject(&mut report, child, &name, Rejection::LevelOccupied(level));
                    continue;
                }
                let expected = config.basement_size(level);
                if side != expected {
                    let name = map.name.clone();
                    let rejection = Rejection::BasementSize {
                        level,
                        expected,
                        actual: side,
                    };
                    reject(&mut report, child, &name, rejection);
                    continue;
                }

                if let Some(state) = scene.layout_mut(layout) {
                    state.basements[level as usize - 1] = Some(child);
                }
                if let Some(map) = scene.map_mut(child) {
                    let depth = (config.basements as f32 + 1.0 - level as f32)
                        * config.cell_size
                        * config.delta as f32;
                    map.transform = Transform::new(-Vec3::ONE * depth, face.alignment_rotation());
                }
                report.basements.push((level, child));
            }
        }
    }

    let surfaces = *scene
        .layout(layout)
        .ok_or(CubeError::UnknownLayout(layout))?
        .surfaces();
    report.links = join_surfaces(&surfaces, scene);

    tracing::info!(
        "Assembled {layout}: {} surfaces, {} basements, {} links, {} rejected",
        report.surfaces.len(),
        report.basements.len(),
        report.links,
        report.rejections.len()
    );

    let scene: &Scene = scene;
    for observer in observers.iter_mut() {
        observer.layout_assembled(scene, layout);
    }
    Ok(report)
}

fn reject(report: &mut AssemblyReport, map: MapId, name: &str, rejection: Rejection) {
    tracing::warn!("Skipping map '{name}' ({map}): {rejection}");
    report.rejections.push((map, rejection));
}

/// The pair of quads sealing the basement shaft behind a surface face
fn background_quads(half: f32, color: crate::Color) -> Vec<BackgroundQuad> {
    [
        (OUTER_QUAD_BUFFER, QuadFacing::Outward),
        (INNER_QUAD_BUFFER, QuadFacing::Inward),
    ]
    .into_iter()
    .map(|(buffer, facing)| BackgroundQuad {
        local_position: Vec3::new(half, half, 0.0) + Vec3::splat(buffer),
        scale: (half - buffer) * 2.0,
        color,
        facing,
    })
    .collect()
}
