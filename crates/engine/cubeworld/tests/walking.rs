use cubeworld::glam::UVec2;
use cubeworld::{
    assemble, CubeLayoutConfig, Edge, FaceDescriptor, FaceOrientation, Map, MapObject, ObjectEvent,
    Scene, Step, Transform,
};

/// A fully assembled cube with `size`-cell faces and a 1x1 hero on the front
fn world(delta: u8) -> (Scene, cubeworld::LayoutId, cubeworld::ObjectId) {
    let mut scene = Scene::new();
    let config = CubeLayoutConfig::new(delta, 0, 1.0);
    let size = config.surface_size();
    let layout = scene.add_layout(config, Transform::IDENTITY);
    for orientation in FaceOrientation::ALL {
        let map = Map::new(format!("{orientation:?}"), size, size, 1.0)
            .with_face(FaceDescriptor::surface(orientation));
        scene.add_map(map, Some(layout)).unwrap();
    }
    assemble(&mut scene, layout, &mut []).unwrap();
    let hero = scene.spawn_object(MapObject::new("hero", 1, 1));
    (scene, layout, hero)
}

fn face(scene: &Scene, layout: cubeworld::LayoutId, o: FaceOrientation) -> cubeworld::MapId {
    scene.layout(layout).unwrap().surface(o).unwrap()
}

#[test]
fn test_cross_front_to_left() {
    let (mut scene, layout, hero) = world(2);
    let front = face(&scene, layout, FaceOrientation::Front);
    let left = face(&scene, layout, FaceOrientation::Left);
    scene.attach(hero, front, UVec2::new(0, 2)).unwrap();

    let step = scene.walk(hero, Edge::Left).unwrap();
    assert_eq!(
        step,
        Step::Crossed { from: front, to: left, cell: UVec2::new(3, 2) }
    );
    assert_eq!(scene.object(hero).unwrap().parent_map(), Some(left));
}

#[test]
fn test_loop_around_the_equator() {
    let (mut scene, layout, hero) = world(1);
    let front = face(&scene, layout, FaceOrientation::Front);
    scene.attach(hero, front, UVec2::new(0, 1)).unwrap();
    let sub = scene.subscribe(hero).unwrap();

    let mut visited = Vec::new();
    for _ in 0..8 {
        if let Step::Crossed { to, .. } = scene.walk(hero, Edge::Right).unwrap() {
            visited.push(to);
        }
    }

    let expected: Vec<_> = [
        FaceOrientation::Right,
        FaceOrientation::Back,
        FaceOrientation::Left,
        FaceOrientation::Front,
    ]
    .into_iter()
    .map(|o| face(&scene, layout, o))
    .collect();
    assert_eq!(visited, expected);
    assert_eq!(scene.object(hero).unwrap().cell(), UVec2::new(0, 1));

    let events = scene.drain_events(sub);
    assert_eq!(events.len(), 8);
    assert!(matches!(events[0], ObjectEvent::Detached { .. }));
    assert_eq!(events[7], ObjectEvent::Attached { object: hero, map: front });
}

#[test]
fn test_over_the_top_and_back() {
    let (mut scene, layout, hero) = world(2);
    let front = face(&scene, layout, FaceOrientation::Front);
    let up = face(&scene, layout, FaceOrientation::Up);
    scene.attach(hero, front, UVec2::new(1, 3)).unwrap();

    assert_eq!(
        scene.walk(hero, Edge::Up).unwrap(),
        Step::Crossed { from: front, to: up, cell: UVec2::new(1, 0) }
    );
    assert_eq!(
        scene.walk(hero, Edge::Down).unwrap(),
        Step::Crossed { from: up, to: front, cell: UVec2::new(1, 3) }
    );
}
