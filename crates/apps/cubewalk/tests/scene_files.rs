use cubewalk::{parse_path, run, RunOptions, SceneConfig};
use cubeworld::Rejection;
use glam::UVec2;
use std::io::Write;
use std::path::Path;

fn write_scene(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_shipped_demo_scene() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenes/demo.toml");
    let config = SceneConfig::load(&path).unwrap();
    assert_eq!(config.layout.delta, 2);
    assert_eq!(config.follow.rotation_time, 0.5);
    assert_eq!(config.maps.len(), 7);

    let mut world = config.build().unwrap();
    let steps = parse_path(&config.path).unwrap();
    let options = RunOptions {
        dt: 1.0 / 30.0,
        frames_per_step: 20,
    };
    let mut frames = 0;
    let (report, summary) = run(&mut world, config.follow.clone(), &steps, &options, |_| {
        frames += 1;
        Ok(())
    })
    .unwrap();

    assert!(report.is_complete());
    assert_eq!(report.links, 24);
    assert_eq!(report.basements.len(), 1);
    assert_eq!(summary.crossings, 5);
    assert_eq!(summary.transitions, 5);
    assert_eq!(summary.final_map, "up");
    assert_eq!(summary.final_cell, UVec2::new(1, 1));
    assert_eq!(frames, steps.len() * 20);
}

#[test]
fn test_mismatched_maps_are_reported() {
    let file = write_scene(
        r#"
path = "L L L"

[layout]
delta = 1
basements = 1

[[maps]]
name = "front"
width = 4
height = 4
face = { kind = 0, orientation = 0 }

[[maps]]
name = "left"
width = 3
height = 3
face = { kind = 0, orientation = 4 }

[[maps]]
name = "cellar"
width = 3
height = 3
face = { kind = 1, level = 1 }

[character]
map = "front"
x = 1
y = 1
"#,
    );
    let config = SceneConfig::load(file.path()).unwrap();
    let mut world = config.build().unwrap();
    let steps = parse_path(&config.path).unwrap();
    let (report, summary) = run(
        &mut world,
        config.follow.clone(),
        &steps,
        &RunOptions::default(),
        |_| Ok(()),
    )
    .unwrap();

    let reasons: Vec<_> = report.rejections.iter().map(|(_, r)| r.clone()).collect();
    assert_eq!(
        reasons,
        vec![
            Rejection::SurfaceSize { expected: 4, actual: 3 },
            Rejection::BasementSize { level: 1, expected: 2, actual: 3 },
        ]
    );
    // Without a left face the front's left edge is a wall.
    assert_eq!(summary.moves, 1);
    assert_eq!(summary.blocked, 2);
    assert_eq!(summary.final_cell, UVec2::new(0, 1));
}

#[test]
fn test_broken_scene_file() {
    let file = write_scene("[layout]\ndelta = \"five\"\n");
    let err = SceneConfig::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse scene file"));

    let err = SceneConfig::load(Path::new("/nonexistent/scene.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read scene file"));
}
