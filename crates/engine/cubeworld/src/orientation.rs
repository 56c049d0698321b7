use crate::CubeError;
use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// The orientation of a surface face in the cube
///
/// The declaration order is also the raw (designer-authored) value order:
/// Front = 0, Back = 1, Down = 2, Up = 3, Left = 4, Right = 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceOrientation {
    Front,
    Back,
    Down,
    Up,
    Left,
    Right,
}

impl FaceOrientation {
    /// All six faces in raw value order
    pub const ALL: [FaceOrientation; 6] = [
        FaceOrientation::Front,
        FaceOrientation::Back,
        FaceOrientation::Down,
        FaceOrientation::Up,
        FaceOrientation::Left,
        FaceOrientation::Right,
    ];

    /// Slot of this orientation in per-face tables
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Rotation that turns a map (lying on its local XY plane) into this face.
    ///
    /// Angles are composed yaw, then pitch, then roll (`EulerRot::YXZ`).
    pub fn rotation(self) -> Quat {
        let (pitch, yaw): (f32, f32) = match self {
            FaceOrientation::Front => (0.0, 0.0),
            FaceOrientation::Back => (0.0, 180.0),
            FaceOrientation::Down => (-90.0, 180.0),
            FaceOrientation::Up => (90.0, 0.0),
            FaceOrientation::Left => (0.0, 90.0),
            FaceOrientation::Right => (0.0, -90.0),
        };
        Quat::from_euler(EulerRot::YXZ, yaw.to_radians(), pitch.to_radians(), 0.0)
    }

    /// Cube corner (out of the eight `(±1, ±1, ±1)` ones) where the map's
    /// origin cell is pivoted during assembly.
    ///
    /// Right and Down share the `(1, -1, -1)` corner and two corners stay unused.
    pub fn cubic_assembly_position(self) -> Vec3 {
        match self {
            FaceOrientation::Front => Vec3::new(-1.0, -1.0, -1.0),
            FaceOrientation::Back => Vec3::new(1.0, -1.0, 1.0),
            FaceOrientation::Down => Vec3::new(1.0, -1.0, -1.0),
            FaceOrientation::Left => Vec3::new(-1.0, -1.0, 1.0),
            FaceOrientation::Up => Vec3::new(-1.0, 1.0, -1.0),
            FaceOrientation::Right => Vec3::new(1.0, -1.0, -1.0),
        }
    }
}

impl TryFrom<u8> for FaceOrientation {
    type Error = CubeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(CubeError::UnknownOrientation(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert!(a.abs_diff_eq(b, 1e-5), "{a} != {b}");
    }

    #[test]
    fn test_rotation_axes() {
        use FaceOrientation::*;

        assert_eq!(Front.rotation(), Quat::IDENTITY);

        assert_vec_eq(Back.rotation() * Vec3::X, Vec3::NEG_X);
        assert_vec_eq(Back.rotation() * Vec3::Y, Vec3::Y);

        assert_vec_eq(Up.rotation() * Vec3::X, Vec3::X);
        assert_vec_eq(Up.rotation() * Vec3::Y, Vec3::Z);

        assert_vec_eq(Down.rotation() * Vec3::X, Vec3::NEG_X);
        assert_vec_eq(Down.rotation() * Vec3::Y, Vec3::Z);

        assert_vec_eq(Left.rotation() * Vec3::X, Vec3::NEG_Z);
        assert_vec_eq(Left.rotation() * Vec3::Y, Vec3::Y);

        assert_vec_eq(Right.rotation() * Vec3::X, Vec3::Z);
        assert_vec_eq(Right.rotation() * Vec3::Y, Vec3::Y);
    }

    #[test]
    fn test_assembly_positions() {
        use FaceOrientation::*;

        assert_eq!(Front.cubic_assembly_position(), Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(Back.cubic_assembly_position(), Vec3::new(1.0, -1.0, 1.0));
        assert_eq!(Down.cubic_assembly_position(), Vec3::new(1.0, -1.0, -1.0));
        assert_eq!(Up.cubic_assembly_position(), Vec3::new(-1.0, 1.0, -1.0));
        assert_eq!(Left.cubic_assembly_position(), Vec3::new(-1.0, -1.0, 1.0));
        assert_eq!(Right.cubic_assembly_position(), Vec3::new(1.0, -1.0, -1.0));
    }

    #[test]
    fn test_right_and_down_share_a_pivot() {
        // Known asymmetry of the corner table: kept as is.
        assert_eq!(
            FaceOrientation::Right.cubic_assembly_position(),
            FaceOrientation::Down.cubic_assembly_position()
        );
    }

    #[test]
    fn test_faces_lie_on_the_cube() {
        // A unit half-extent cube: each face spans 2x2 local units.
        for orientation in FaceOrientation::ALL {
            let pivot = orientation.cubic_assembly_position();
            let rotation = orientation.rotation();
            let corners = [(0.0, 0.0), (2.0, 0.0), (0.0, 2.0), (2.0, 2.0)]
                .map(|(u, v)| pivot + rotation * Vec3::new(u, v, 0.0));

            for corner in corners {
                assert!(corner.abs().max_element() <= 1.0 + 1e-5, "{orientation:?}: {corner}");
            }
            // All four corners share one coordinate fixed at +-1.
            let shared = (0..3).any(|axis| {
                corners
                    .iter()
                    .all(|c| {
                        (c[axis].abs() - 1.0).abs() < 1e-5
                            && (c[axis] - corners[0][axis]).abs() < 1e-5
                    })
            });
            assert!(shared, "{orientation:?} is not on a cube face");
        }
    }

    #[test]
    fn test_try_from_raw() {
        assert_eq!(FaceOrientation::try_from(0), Ok(FaceOrientation::Front));
        assert_eq!(FaceOrientation::try_from(5), Ok(FaceOrientation::Right));
        assert_eq!(
            FaceOrientation::try_from(6),
            Err(CubeError::UnknownOrientation(6))
        );
    }
}
