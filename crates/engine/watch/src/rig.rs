//! Camera rig: a pivot node carrying one camera at a distance
//!
//! The rig sits on a face (its `transform` is relative to the face's
//! layout) and looks at it through a child camera placed at `-distance`
//! along its local Z axis. The camera's in-plane offset, projection mode,
//! vertical size and clip distance are exposed through mode-independent
//! getters and setters.
//!
//! # Components
//!
//! - [`Camera`]: the bound camera's raw parameters
//! - [`RigChild`]: a child node, possibly carrying a camera
//! - [`CameraRig`]: the pivot with its projection-transparent accessors
//! - [`CameraFrame`]: an observable snapshot of the rig's camera

use cubeworld::{LayoutId, Transform};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Near clipping plane pinned whenever the clip distance is set
pub const NEAR_PLANE: f32 = 0.3;

/// Default vertical field of view, in degrees
pub const DEFAULT_FOV: f32 = 60.0;

// ============================================================================
// Camera
// ============================================================================

/// Raw parameters of a camera bound to a rig
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Position relative to the rig; `z` is minus the distance
    pub local_position: Vec3,
    pub orthographic: bool,
    /// Half height of the view when orthographic
    pub orthographic_size: f32,
    /// Vertical field of view in degrees, when perspective
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            local_position: Vec3::new(0.0, 0.0, -10.0),
            orthographic: false,
            orthographic_size: 5.0,
            fov: DEFAULT_FOV,
            near: NEAR_PLANE,
            far: 1000.0,
        }
    }
}

/// A child node of the rig
#[derive(Debug, Clone, PartialEq)]
pub enum RigChild {
    Camera(Camera),
    /// Anything else (lights, markers...)
    Node(String),
}

// ============================================================================
// Camera Frame
// ============================================================================

/// Externally observable configuration of a rig's camera
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraFrame {
    pub distance: f32,
    pub position: Vec2,
    pub orthographic: bool,
    /// Vertical half size: orthographic size, or `distance * tan(fov / 2)`
    pub size: f32,
    pub clip_far: f32,
}

// ============================================================================
// Camera Rig
// ============================================================================

/// A pivot holding at most one camera
///
/// Every setter is a no-op while no camera is bound, and the getters then
/// report zero (or `false`).
#[derive(Debug, Clone, Default)]
pub struct CameraRig {
    /// Layout whose space `transform` is expressed in; `None` for world space
    pub parent: Option<LayoutId>,
    pub transform: Transform,
    camera: Option<Camera>,
}

impl CameraRig {
    pub fn with_camera(camera: Camera) -> Self {
        Self {
            camera: Some(camera),
            ..Self::default()
        }
    }

    /// Bind the first child carrying a camera
    pub fn bind(children: impl IntoIterator<Item = RigChild>) -> Self {
        let camera = children.into_iter().find_map(|child| match child {
            RigChild::Camera(camera) => Some(camera),
            RigChild::Node(_) => None,
        });
        if camera.is_none() {
            tracing::warn!("This camera rig has no child camera");
        }
        Self {
            camera,
            ..Self::default()
        }
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    #[inline]
    pub fn is_bound(&self) -> bool {
        self.camera.is_some()
    }

    /// Distance from the camera to the rig's pivot plane
    pub fn distance(&self) -> f32 {
        self.camera.map_or(0.0, |c| -c.local_position.z)
    }

    /// Set the distance, floored to a small positive value
    pub fn set_distance(&mut self, distance: f32) {
        if let Some(camera) = &mut self.camera {
            camera.local_position.z = -distance.max(f32::EPSILON);
        }
    }

    /// The camera's (x, y) position on its plane
    pub fn camera_position(&self) -> Vec2 {
        self.camera.map_or(Vec2::ZERO, |c| c.local_position.truncate())
    }

    /// Move the camera on its plane, keeping the current size
    pub fn set_camera_position(&mut self, position: Vec2) {
        let size = self.size();
        if let Some(camera) = &mut self.camera {
            camera.local_position = position.extend(camera.local_position.z);
            self.set_size(size);
        }
    }

    pub fn is_orthographic(&self) -> bool {
        self.camera.is_some_and(|c| c.orthographic)
    }

    /// Switch projection, keeping the current size
    pub fn set_orthographic(&mut self, orthographic: bool) {
        let size = self.size();
        if let Some(camera) = &mut self.camera {
            camera.orthographic = orthographic;
            self.set_size(size);
        }
    }

    /// Vertical half size of the view, whatever the projection
    pub fn size(&self) -> f32 {
        match self.camera {
            Some(c) if c.orthographic => c.orthographic_size,
            Some(c) => -c.local_position.z * (c.fov.to_radians() / 2.0).tan(),
            None => 0.0,
        }
    }

    /// Set the vertical half size. For perspective cameras the field of
    /// view is derived from the current distance.
    pub fn set_size(&mut self, size: f32) {
        let size = size.max(f32::EPSILON);
        if let Some(camera) = &mut self.camera {
            if camera.orthographic {
                camera.orthographic_size = size;
            } else {
                camera.fov = 2.0 * size.atan2(-camera.local_position.z).to_degrees();
            }
        }
    }

    /// Far clipping plane
    pub fn clip_distance(&self) -> f32 {
        self.camera.map_or(0.0, |c| c.far)
    }

    /// Set the far clipping plane and pin the near one to [`NEAR_PLANE`]
    pub fn set_clip_distance(&mut self, distance: f32) {
        let distance = distance.max(NEAR_PLANE + f32::EPSILON);
        if let Some(camera) = &mut self.camera {
            camera.far = distance;
            camera.near = NEAR_PLANE;
        }
    }

    /// Snapshot of the camera configuration
    pub fn frame(&self) -> CameraFrame {
        CameraFrame {
            distance: self.distance(),
            position: self.camera_position(),
            orthographic: self.is_orthographic(),
            size: self.size(),
            clip_far: self.clip_distance(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_bind_first_camera() {
        let second = Camera {
            fov: 30.0,
            ..Camera::default()
        };
        let rig = CameraRig::bind([
            RigChild::Node("light".into()),
            RigChild::Camera(Camera::default()),
            RigChild::Camera(second),
        ]);
        assert_eq!(rig.camera(), Some(&Camera::default()));
    }

    #[test]
    fn test_unbound_rig_is_inert() {
        let mut rig = CameraRig::bind([RigChild::Node("light".into())]);
        assert!(!rig.is_bound());

        rig.set_distance(4.0);
        rig.set_orthographic(true);
        rig.set_size(3.0);
        rig.set_clip_distance(20.0);
        rig.set_camera_position(Vec2::new(1.0, 2.0));

        assert_eq!(rig.frame(), CameraFrame::default());
    }

    #[test]
    fn test_distance_is_floored() {
        let mut rig = CameraRig::with_camera(Camera::default());
        rig.set_distance(-3.0);
        assert_eq!(rig.distance(), f32::EPSILON);
        rig.set_distance(7.5);
        assert_eq!(rig.distance(), 7.5);
    }

    #[test]
    fn test_perspective_size_drives_fov() {
        let mut rig = CameraRig::with_camera(Camera::default());
        rig.set_distance(10.0);
        rig.set_size(10.0);
        // atan2(10, 10) = 45 degrees on each side.
        assert!(approx(rig.camera().unwrap().fov, 90.0));
        assert!(approx(rig.size(), 10.0));
    }

    #[test]
    fn test_projection_toggle_preserves_size() {
        let mut rig = CameraRig::with_camera(Camera::default());
        rig.set_distance(6.0);
        rig.set_size(12.0);

        rig.set_orthographic(true);
        assert!(rig.is_orthographic());
        assert!(approx(rig.size(), 12.0));
        assert!(approx(rig.camera().unwrap().orthographic_size, 12.0));

        rig.set_orthographic(false);
        assert!(approx(rig.size(), 12.0));
        assert!(approx(rig.distance(), 6.0));
    }

    #[test]
    fn test_camera_position_preserves_size() {
        let mut rig = CameraRig::with_camera(Camera::default());
        rig.set_size(3.0);
        rig.set_camera_position(Vec2::new(4.0, -2.0));
        assert_eq!(rig.camera_position(), Vec2::new(4.0, -2.0));
        assert_eq!(rig.distance(), 10.0);
        assert!(approx(rig.size(), 3.0));
    }

    #[test]
    fn test_clip_distance_pins_near_plane() {
        let mut rig = CameraRig::with_camera(Camera {
            near: 0.01,
            ..Camera::default()
        });
        rig.set_clip_distance(0.1);
        let camera = rig.camera().unwrap();
        assert_eq!(camera.near, NEAR_PLANE);
        assert_eq!(camera.far, NEAR_PLANE + f32::EPSILON);

        rig.set_clip_distance(30.0);
        assert_eq!(rig.clip_distance(), 30.0);
    }
}
