//! Headless cube world walker
//!
//! Builds a cube world from a [`SceneConfig`], follows a character with a
//! camera rig and walks it along a scripted path, sampling the rig after
//! every frame.

pub mod runner;
pub mod scene_file;

pub use runner::{parse_path, run, FrameSample, RunOptions, Summary};
pub use scene_file::{CharacterSpec, FaceSpec, MapSpec, SceneConfig, World};
