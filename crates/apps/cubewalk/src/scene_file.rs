//! TOML scene files
//!
//! A scene file describes one cube layout, its maps, the walking character
//! and the path it walks:
//!
//! ```toml
//! path = "R8 U4"
//!
//! [layout]
//! delta = 2
//! basements = 1
//!
//! [follow]
//! rotation_time = 0.5
//!
//! [[maps]]
//! name = "front"
//! width = 8
//! height = 8
//! face = { kind = 0, orientation = 0 }
//!
//! [character]
//! map = "front"
//! x = 3
//! y = 3
//! ```
//!
//! Face values are the raw designer ones: `kind` is 0 for surface and 1 for
//! basement, `orientation` follows Front, Back, Down, Up, Left, Right.

use anyhow::{Context, Result};
use cubeworld::{
    CubeLayoutConfig, FaceDescriptor, FaceOrientation, LayoutId, Map, MapObject, ObjectId, Scene,
    Transform,
};
use cubeworld_watch::FollowConfig;
use glam::UVec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Raw face values of a map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceSpec {
    pub kind: u8,
    #[serde(default)]
    pub orientation: u8,
    #[serde(default)]
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSpec {
    pub name: String,
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
    #[serde(default)]
    pub face: Option<FaceSpec>,
    /// Whether the map is a child of the layout
    #[serde(default = "default_in_layout")]
    pub in_layout: bool,
}

fn default_cell_size() -> f32 {
    1.0
}

fn default_in_layout() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSpec {
    /// Name of the starting map
    pub map: String,
    pub x: u32,
    pub y: u32,
    #[serde(default = "default_footprint")]
    pub width: u32,
    #[serde(default = "default_footprint")]
    pub height: u32,
}

fn default_footprint() -> u32 {
    1
}

/// A whole scene: layout, maps, character and path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub layout: CubeLayoutConfig,
    #[serde(default)]
    pub follow: FollowConfig,
    #[serde(default)]
    pub maps: Vec<MapSpec>,
    pub character: CharacterSpec,
    /// Steps such as `"R3 U2 L"`
    #[serde(default)]
    pub path: String,
}

/// A built, not yet assembled, scene
#[derive(Debug)]
pub struct World {
    pub scene: Scene,
    pub layout: LayoutId,
    pub character: ObjectId,
}

impl SceneConfig {
    /// Load a scene from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse scene file {}", path.display()))
    }

    /// A complete cube with every basement level, the character standing in
    /// the middle of the front face and a path around the equator then up
    pub fn demo(delta: u8, basements: u8) -> Self {
        let layout = CubeLayoutConfig::new(delta, basements, 1.0).sanitized();
        let size = layout.surface_size();

        let mut maps: Vec<MapSpec> = FaceOrientation::ALL
            .into_iter()
            .map(|o| MapSpec {
                name: format!("{o:?}").to_lowercase(),
                width: size,
                height: size,
                cell_size: layout.cell_size,
                face: Some(FaceSpec {
                    kind: 0,
                    orientation: o.index() as u8,
                    level: 0,
                }),
                in_layout: true,
            })
            .collect();
        for level in 1..=layout.basements {
            let side = layout.basement_size(level);
            maps.push(MapSpec {
                name: format!("basement-{level}"),
                width: side,
                height: side,
                cell_size: layout.cell_size,
                face: Some(FaceSpec {
                    kind: 1,
                    orientation: 0,
                    level,
                }),
                in_layout: true,
            });
        }

        Self {
            layout,
            follow: FollowConfig::default(),
            maps,
            character: CharacterSpec {
                map: "front".into(),
                x: size / 2,
                y: size / 2,
                width: 1,
                height: 1,
            },
            path: format!("R{} U{}", 4 * size, size),
        }
    }

    /// Create the scene and put the character on its starting map.
    ///
    /// Maps with invalid raw face values are kept, without face metadata.
    pub fn build(&self) -> Result<World> {
        let mut scene = Scene::new();
        let layout = scene.add_layout(self.layout.clone(), Transform::IDENTITY);

        for spec in &self.maps {
            let mut map = Map::new(spec.name.as_str(), spec.width, spec.height, spec.cell_size);
            if let Some(face) = spec.face {
                match FaceDescriptor::from_raw(face.kind, face.orientation, face.level) {
                    Ok(face) => map = map.with_face(face),
                    Err(e) => tracing::warn!("Map '{}' has an invalid face: {e}", spec.name),
                }
            }
            let parent = spec.in_layout.then_some(layout);
            scene
                .add_map(map, parent)
                .with_context(|| format!("Failed to add map '{}'", spec.name))?;
        }

        let c = &self.character;
        let map = scene
            .find_map(&c.map)
            .with_context(|| format!("Unknown starting map '{}'", c.map))?;
        let character = scene.spawn_object(MapObject::new("character", c.width, c.height));
        scene
            .attach(character, map, UVec2::new(c.x, c.y))
            .with_context(|| format!("Cannot place the character on '{}'", c.map))?;

        Ok(World {
            scene,
            layout,
            character,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_sizes() {
        let demo = SceneConfig::demo(2, 2);
        assert_eq!(demo.maps.len(), 8);
        assert_eq!(demo.maps[0].width, 12);
        assert_eq!(demo.maps[6].name, "basement-1");
        assert_eq!(demo.maps[6].width, 8);
        assert_eq!(demo.maps[7].width, 4);
        assert_eq!((demo.character.x, demo.character.y), (6, 6));
        assert_eq!(demo.path, "R48 U12");
    }

    #[test]
    fn test_invalid_face_is_dropped() {
        let mut config = SceneConfig::demo(1, 0);
        config.maps[1].face = Some(FaceSpec {
            kind: 0,
            orientation: 9,
            level: 0,
        });
        let world = config.build().unwrap();
        let back = world.scene.find_map("back").unwrap();
        assert_eq!(world.scene.map(back).unwrap().face, None);
    }

    #[test]
    fn test_unknown_starting_map() {
        let mut config = SceneConfig::demo(1, 0);
        config.character.map = "nowhere".into();
        let err = config.build().unwrap_err();
        assert!(err.to_string().contains("nowhere"));
    }
}
