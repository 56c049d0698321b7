//! Scripted walk: one cell per step, a fixed number of frames per step

use crate::scene_file::World;
use anyhow::{bail, Context, Result};
use cubeworld::{assemble, AssemblyReport, Edge, Step};
use cubeworld_watch::{CameraFrame, CameraRig, FollowConfig, FollowController, RigChild};
use glam::{Quat, UVec2, Vec3};
use serde::Serialize;

/// Frame timing of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOptions {
    /// Seconds per frame
    pub dt: f32,
    pub frames_per_step: u32,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0,
            frames_per_step: 30,
        }
    }
}

/// Rig state after one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSample {
    pub step: usize,
    pub frame: u32,
    /// Map the character stands on
    pub map: String,
    pub cell: UVec2,
    pub transitioning: bool,
    pub rig_position: Vec3,
    pub rig_rotation: Quat,
    pub camera: CameraFrame,
}

/// Totals of a run
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Summary {
    pub steps: usize,
    pub moves: usize,
    pub crossings: usize,
    pub blocked: usize,
    /// Animated face-to-face transitions started
    pub transitions: usize,
    pub final_map: String,
    pub final_cell: UVec2,
}

/// Parse a path such as `"R3 U2 L"`: a step letter, optionally followed by
/// a repeat count. Whitespace is ignored.
pub fn parse_path(path: &str) -> Result<Vec<Edge>> {
    let mut steps = Vec::new();
    let mut chars = path.chars().filter(|c| !c.is_whitespace()).peekable();
    while let Some(c) = chars.next() {
        let Some(edge) = Edge::from_char(c) else {
            bail!("Unexpected step '{c}' in path \"{path}\"");
        };
        let mut digits = String::new();
        while let Some(d) = chars.next_if(char::is_ascii_digit) {
            digits.push(d);
        }
        let count = if digits.is_empty() {
            1
        } else {
            digits
                .parse::<usize>()
                .with_context(|| format!("Bad repeat count '{digits}' in path \"{path}\""))?
        };
        steps.extend(std::iter::repeat(edge).take(count));
    }
    Ok(steps)
}

/// The rig every run uses: a light and a default camera
fn default_rig() -> CameraRig {
    CameraRig::bind([
        RigChild::Node("light".into()),
        RigChild::Camera(Default::default()),
    ])
}

/// Assemble the world, then walk the character along `path`.
///
/// The follower is created before assembly, so its first framing comes from
/// the assembly notification. `sink` receives every frame sample.
pub fn run(
    world: &mut World,
    follow: FollowConfig,
    path: &[Edge],
    options: &RunOptions,
    mut sink: impl FnMut(&FrameSample) -> Result<()>,
) -> Result<(AssemblyReport, Summary)> {
    let rig = Some(default_rig());
    let mut follower = FollowController::new(&mut world.scene, world.character, rig, follow)
        .context("Failed to follow the character")?;
    let report = assemble(&mut world.scene, world.layout, &mut [&mut follower])
        .context("Failed to assemble the cube")?;

    let mut summary = Summary::default();
    let mut running = None;
    for (step, &edge) in path.iter().enumerate() {
        match world.scene.walk(world.character, edge)? {
            Step::Moved { .. } => summary.moves += 1,
            Step::Crossed { from, to, .. } => {
                summary.crossings += 1;
                tracing::debug!("Step {step}: crossed from {from} to {to}");
            }
            Step::Blocked => {
                summary.blocked += 1;
                tracing::debug!("Step {step}: blocked toward {edge:?}");
            }
        }
        summary.steps += 1;

        for frame in 0..options.frames_per_step {
            follower.update(&mut world.scene, options.dt);
            let current = follower.transition().map(|t| (t.from, t.to));
            if current.is_some() && current != running {
                summary.transitions += 1;
            }
            running = current;
            sink(&sample(world, &follower, step, frame)?)?;
        }
    }

    let (map, cell) = location(world)?;
    summary.final_map = map;
    summary.final_cell = cell;
    tracing::info!(
        "Walked {} steps: {} moves, {} crossings, {} blocked, {} transitions",
        summary.steps,
        summary.moves,
        summary.crossings,
        summary.blocked,
        summary.transitions
    );
    follower.release(&mut world.scene);
    Ok((report, summary))
}

fn location(world: &World) -> Result<(String, UVec2)> {
    let character = world
        .scene
        .object(world.character)
        .context("The character is gone")?;
    let map = character
        .parent_map()
        .and_then(|id| world.scene.map(id))
        .map(|m| m.name.clone())
        .unwrap_or_default();
    Ok((map, character.cell()))
}

fn sample(
    world: &World,
    follower: &FollowController,
    step: usize,
    frame: u32,
) -> Result<FrameSample> {
    let (map, cell) = location(world)?;
    let rig = follower.rig().context("The follower lost its rig")?;
    Ok(FrameSample {
        step,
        frame,
        map,
        cell,
        transitioning: follower.is_transitioning(),
        rig_position: rig.transform.position,
        rig_rotation: rig.transform.rotation,
        camera: rig.frame(),
    })
}
