//! Camera rig and follow controller for cube worlds
//!
//! - [`CameraRig`]: a pivot carrying one camera, with projection-transparent
//!   distance, size, clip and in-plane position accessors
//! - [`Transition`]: an eased face-to-face rig animation advanced per tick
//! - [`FollowController`]: keeps a rig framed on a map object, snapping or
//!   animating whenever the object changes map

pub mod follow;
pub mod rig;
pub mod transition;

pub use follow::{classify, FollowConfig, FollowController, Reframe};
pub use rig::{Camera, CameraFrame, CameraRig, RigChild, DEFAULT_FOV, NEAR_PLANE};
pub use transition::{smooth_step, Transition};
