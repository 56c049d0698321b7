use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Compass edge of a map (and direction of a single-cell step)
///
/// Map cells grow rightward along +x and upward along +y, so `Up` is the
/// edge at the largest y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Down,
    Left,
    Right,
    Up,
}

impl Edge {
    /// All four edges in order
    pub const ALL: [Edge; 4] = [Edge::Down, Edge::Left, Edge::Right, Edge::Up];

    /// Slot of this edge in per-edge tables
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Get the opposite edge
    pub fn opposite(self) -> Self {
        match self {
            Edge::Down => Edge::Up,
            Edge::Left => Edge::Right,
            Edge::Right => Edge::Left,
            Edge::Up => Edge::Down,
        }
    }

    /// Cell offset of a single step toward this edge
    pub fn step(self) -> IVec2 {
        match self {
            Edge::Down => IVec2::NEG_Y,
            Edge::Left => IVec2::NEG_X,
            Edge::Right => IVec2::X,
            Edge::Up => IVec2::Y,
        }
    }

    /// Whether the edge runs along the x axis (bottom and top edges)
    pub fn is_horizontal(self) -> bool {
        matches!(self, Edge::Down | Edge::Up)
    }

    /// Parse a single-letter step (`U`, `D`, `L`, `R`, any case)
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'u' | 'U' => Some(Edge::Up),
            'd' | 'D' => Some(Edge::Down),
            'l' | 'L' => Some(Edge::Left),
            'r' | 'R' => Some(Edge::Right),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite() {
        for edge in Edge::ALL {
            assert_ne!(edge, edge.opposite());
            assert_eq!(edge, edge.opposite().opposite());
            assert_eq!(edge.step(), -edge.opposite().step());
        }
    }

    #[test]
    fn test_from_char() {
        assert_eq!(Edge::from_char('U'), Some(Edge::Up));
        assert_eq!(Edge::from_char('l'), Some(Edge::Left));
        assert_eq!(Edge::from_char('x'), None);
    }
}
