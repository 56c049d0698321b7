//! Camera follow controller for one map object
//!
//! The controller listens to its object's attach/detach events. Whenever the
//! object lands on a map, it either reframes the rig instantly on that map or,
//! for a move between two surface faces of the same cube, animates the rig
//! from the previous face to the new one over several ticks. While idle, the
//! rig's camera is kept centered on the object every tick.

use crate::rig::CameraRig;
use crate::transition::Transition;
use cubeworld::{
    AssemblyObserver, FaceKind, LayoutId, MapId, ObjectEvent, ObjectId, Scene,
    SubscriptionId,
};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Per-follower tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowConfig {
    /// Camera distance on maps that are neither faces nor in a layout
    pub default_distance: f32,
    /// Vertical half size applied on every instant reframe
    pub camera_size: f32,
    /// Far clipping plane
    pub clip_distance: f32,
    /// Duration of a face-to-face animation, in seconds
    pub rotation_time: f32,
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            default_distance: 1.0,
            camera_size: 12.0,
            clip_distance: 30.0,
            rotation_time: 1.0,
        }
    }
}

/// How the rig gets onto a newly entered map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reframe {
    Instant,
    Animated,
}

/// Decide how to reframe after moving from `previous` to `current`.
///
/// Only a move between two different surface faces parented to the same
/// layout is animated.
pub fn classify(scene: &Scene, previous: Option<MapId>, current: MapId) -> Reframe {
    let Some(previous) = previous.filter(|&p| p != current) else {
        return Reframe::Instant;
    };
    let (Some(from), Some(to)) = (scene.map(previous), scene.map(current)) else {
        return Reframe::Instant;
    };
    let (Some(from_face), Some(to_face)) = (from.face, to.face) else {
        return Reframe::Instant;
    };
    match (from.parent(), to.parent()) {
        (Some(a), Some(b)) if a == b && scene.layout(a).is_some() => {}
        _ => return Reframe::Instant,
    }
    if from_face.kind != FaceKind::Surface || to_face.kind != FaceKind::Surface {
        return Reframe::Instant;
    }
    Reframe::Animated
}

/// Keeps a camera rig framed on one map object
///
/// The controller holds an event subscription on the scene. Hand it back with
/// [`FollowController::release`]; a controller that is simply dropped leaves
/// its queue registered until the scene caps it.
#[derive(Debug)]
pub struct FollowController {
    object: ObjectId,
    subscription: SubscriptionId,
    config: FollowConfig,
    rig: Option<CameraRig>,
    previous_map: Option<MapId>,
    current_map: Option<MapId>,
    offset: Vec2,
    transition: Option<Transition>,
}

impl FollowController {
    /// Start following `object`, driving `rig` if one is given
    pub fn new(
        scene: &mut Scene,
        object: ObjectId,
        rig: Option<CameraRig>,
        config: FollowConfig,
    ) -> cubeworld::Result<Self> {
        let subscription = scene.subscribe(object)?;
        Ok(Self {
            object,
            subscription,
            config,
            rig,
            previous_map: None,
            current_map: None,
            offset: Vec2::ZERO,
            transition: None,
        })
    }

    /// Stop following, handing the rig back
    pub fn release(self, scene: &mut Scene) -> Option<CameraRig> {
        scene.unsubscribe(self.subscription);
        self.rig
    }

    pub fn object(&self) -> ObjectId {
        self.object
    }

    pub fn config(&self) -> &FollowConfig {
        &self.config
    }

    pub fn rig(&self) -> Option<&CameraRig> {
        self.rig.as_ref()
    }

    pub fn rig_mut(&mut self) -> Option<&mut CameraRig> {
        self.rig.as_mut()
    }

    pub fn previous_map(&self) -> Option<MapId> {
        self.previous_map
    }

    pub fn current_map(&self) -> Option<MapId> {
        self.current_map
    }

    /// Half the object's footprint, in map units
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Advance one frame: react to pending events, then tick the rig.
    ///
    /// A transition started by this frame's events keeps its first pose
    /// until the next update.
    pub fn update(&mut self, scene: &mut Scene, dt: f32) {
        let events = scene.drain_events(self.subscription);
        let reacted = !events.is_empty();
        for event in events {
            self.handle_event(scene, event);
        }
        // Every event either drops the running transition or starts a new one.
        if !(reacted && self.transition.is_some()) {
            self.tick(scene, dt);
        }
    }

    pub fn handle_event(&mut self, scene: &Scene, event: ObjectEvent) {
        match event {
            ObjectEvent::Attached { .. } => self.refresh(scene),
            ObjectEvent::Detached { map, .. } => {
                tracing::debug!("{} left {map}", self.object);
                self.current_map = None;
                self.transition = None;
            }
        }
    }

    /// Re-evaluate the rig against the map the object is attached to.
    ///
    /// Does nothing while the object is detached.
    pub fn refresh(&mut self, scene: &Scene) {
        let Some(object) = scene.object(self.object) else {
            return;
        };
        let Some(current) = object.parent_map() else {
            return;
        };
        let Some(map) = scene.map(current) else {
            return;
        };
        self.current_map = Some(current);
        self.offset = map.cell_size * object.footprint().as_vec2() / 2.0;
        self.transition = None;

        match (self.previous_map, classify(scene, self.previous_map, current)) {
            (Some(previous), Reframe::Animated) => self.start_transition(scene, previous, current),
            _ => self.instant_fix(scene, current),
        }
        self.previous_map = Some(current);
    }

    /// Where the camera should sit: the object's position plus the offset
    fn focus(&self, scene: &Scene) -> Vec2 {
        scene
            .object_local_position(self.object)
            .unwrap_or_default()
            + self.offset
    }

    /// Snap the rig onto `map` and configure the camera for it
    pub fn instant_fix(&mut self, scene: &Scene, map_id: MapId) {
        let focus = self.focus(scene);
        let Some(rig) = self.rig.as_mut() else {
            return;
        };
        let Some(map) = scene.map(map_id) else {
            return;
        };
        let face = map.face;
        let layout = scene.enclosing_layout(map_id).map(|(_, layout)| layout);

        rig.parent = map.parent();
        rig.transform = map.transform;
        let distance = match (layout, face) {
            (Some(layout), Some(face)) => match face.kind {
                FaceKind::Surface => layout.face_size() / 2.0,
                FaceKind::Basement => (layout.delta() as f32 - 0.5) * layout.cell_size(),
            },
            (None, Some(_)) => map.width as f32 * map.cell_size.x,
            (_, None) => self.config.default_distance,
        };
        rig.set_distance(distance);
        rig.set_orthographic(!face.is_some_and(|f| f.is_surface()));
        rig.set_size(self.config.camera_size);
        rig.set_clip_distance(self.config.clip_distance);
        rig.set_camera_position(focus);
        tracing::debug!("{} framed instantly on {map_id}", self.object);
    }

    /// Replace any running animation with one from `from` to `to`, posing
    /// the rig at its first step right away
    pub fn start_transition(&mut self, scene: &Scene, from: MapId, to: MapId) {
        self.transition = None;
        let focus = self.focus(scene);
        let Some(rig) = self.rig.as_mut() else {
            return;
        };
        let (Some(start), Some(target)) = (scene.map(from), scene.map(to)) else {
            return;
        };
        rig.parent = target.parent();
        let transition = Transition::new(
            from,
            to,
            start.transform,
            target.transform,
            rig.camera_position(),
            self.config.rotation_time,
        );
        transition.apply(rig, focus);
        tracing::info!("{} rotating from {from} to {to}", self.object);
        self.transition = Some(transition);
    }

    /// Advance the running animation, or keep the camera on the object
    pub fn tick(&mut self, scene: &Scene, dt: f32) {
        let focus = self.focus(scene);
        let Some(rig) = self.rig.as_mut() else {
            self.transition = None;
            return;
        };
        match self.transition.as_mut() {
            Some(transition) => {
                transition.advance(dt);
                if transition.is_finished() {
                    transition.finish(rig, focus);
                    tracing::info!("{} arrived on {}", self.object, transition.to);
                    self.transition = None;
                } else {
                    transition.apply(rig, focus);
                }
            }
            None if self.current_map.is_some() => rig.set_camera_position(focus),
            None => {}
        }
    }
}

impl AssemblyObserver for FollowController {
    fn layout_assembled(&mut self, scene: &Scene, layout: LayoutId) {
        let on_layout = scene
            .object(self.object)
            .and_then(|o| o.parent_map())
            .and_then(|m| scene.map(m))
            .is_some_and(|m| m.parent() == Some(layout));
        if on_layout {
            self.refresh(scene);
        }
    }
}
