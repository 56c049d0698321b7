//! Animated reorientation of a rig between two adjacent surface faces

use crate::rig::CameraRig;
use cubeworld::{MapId, Transform};
use glam::Vec2;

/// Hermite easing of `t` clamped to `[0, 1]`
#[inline]
pub fn smooth_step(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// A running face-to-face camera animation
///
/// Progress is accumulated elapsed time. Distance and projection mode are
/// left untouched: both faces are surfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub from: MapId,
    pub to: MapId,
    start: Transform,
    target: Transform,
    initial_camera: Vec2,
    duration: f32,
    elapsed: f32,
}

impl Transition {
    /// Create a transition between two face transforms, starting from the
    /// rig's current in-plane camera position
    pub fn new(
        from: MapId,
        to: MapId,
        start: Transform,
        target: Transform,
        initial_camera: Vec2,
        duration: f32,
    ) -> Self {
        Self {
            from,
            to,
            start,
            target,
            initial_camera,
            duration: duration.max(f32::EPSILON),
            elapsed: 0.0,
        }
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Accumulate frame time
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Smoothed progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        smooth_step(self.elapsed / self.duration)
    }

    /// Pose the rig at the current progress. `focus` is where the camera
    /// should end up on the new face.
    pub fn apply(&self, rig: &mut CameraRig, focus: Vec2) {
        let t = self.progress();
        rig.transform = self.start.interpolate(&self.target, t);
        rig.set_camera_position(self.initial_camera.lerp(focus, t));
    }

    /// Snap the rig exactly onto the new face
    pub fn finish(&self, rig: &mut CameraRig, focus: Vec2) {
        rig.transform = self.target;
        rig.set_camera_position(focus);
    }
}
