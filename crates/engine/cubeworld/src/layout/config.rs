use serde::{Deserialize, Serialize};

/// Smallest accepted cell size
pub const MIN_CELL_SIZE: f32 = f32::EPSILON;

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Saddle brown, the default basement background
    pub const SADDLE_BROWN: Color = Color::rgb(139, 69, 19);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Designer-authored parameters of a cube layout
///
/// Surface maps must be `surface_size()` cells wide; the basement at level
/// `L` must be `basement_size(L)` cells wide, each level `2 * delta` cells
/// narrower than the one above it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeLayoutConfig {
    /// Cells added on each side per level, at least 1
    pub delta: u8,
    /// Number of basement levels below the surface
    pub basements: u8,
    /// Expected cell size of every face map
    pub cell_size: f32,
    /// Color of the quads sealing the basement shaft
    pub basement_background: Color,
}

impl Default for CubeLayoutConfig {
    fn default() -> Self {
        Self {
            delta: 5,
            basements: 1,
            cell_size: 1.0,
            basement_background: Color::SADDLE_BROWN,
        }
    }
}

impl CubeLayoutConfig {
    pub fn new(delta: u8, basements: u8, cell_size: f32) -> Self {
        Self {
            delta,
            basements,
            cell_size,
            ..Self::default()
        }
    }

    /// Clamp `delta` to at least 1 and `cell_size` to a positive value
    pub fn sanitized(mut self) -> Self {
        self.delta = self.delta.max(1);
        if self.cell_size.is_nan() || self.cell_size < MIN_CELL_SIZE {
            self.cell_size = MIN_CELL_SIZE;
        }
        self
    }

    /// Side of every surface map, in cells
    pub fn surface_size(&self) -> u32 {
        2 * self.delta as u32 * (self.basements as u32 + 1)
    }

    /// Side of the basement map at `level`, in cells
    pub fn basement_size(&self, level: u8) -> u32 {
        2 * self.delta as u32 * (self.basements as u32 + 1).saturating_sub(level as u32)
    }

    /// Side of a surface face in world units
    pub fn face_size(&self) -> f32 {
        self.cell_size * self.surface_size() as f32
    }

    /// Half the cube's side in world units
    pub fn half_extent(&self) -> f32 {
        (self.basements as f32 + 1.0) * self.cell_size * self.delta as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sizes() {
        let config = CubeLayoutConfig::default();
        assert_eq!(config.surface_size(), 20);
        assert_eq!(config.basement_size(1), 10);
        assert_eq!(config.face_size(), 20.0);
        assert_eq!(config.half_extent(), 10.0);
    }

    #[test]
    fn test_surface_size_formula() {
        for delta in 1..=6u8 {
            for basements in 0..=4u8 {
                let config = CubeLayoutConfig::new(delta, basements, 1.0);
                assert_eq!(
                    config.surface_size(),
                    2 * delta as u32 * (basements as u32 + 1)
                );
                // Each level shrinks by delta on every side.
                for level in 1..=basements {
                    assert_eq!(
                        config.basement_size(level - 1) - config.basement_size(level),
                        2 * delta as u32
                    );
                }
            }
        }
    }

    #[test]
    fn test_sanitized() {
        let config = CubeLayoutConfig::new(0, 2, -1.0).sanitized();
        assert_eq!(config.delta, 1);
        assert_eq!(config.cell_size, MIN_CELL_SIZE);
        assert_eq!(config.surface_size(), 6);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: CubeLayoutConfig = toml::from_str("delta = 3\nbasements = 2").unwrap();
        assert_eq!(config.delta, 3);
        assert_eq!(config.basements, 2);
        assert_eq!(config.cell_size, 1.0);
        assert_eq!(config.basement_background, Color::SADDLE_BROWN);
    }
}
