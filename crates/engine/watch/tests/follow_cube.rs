use cubeworld::glam::{UVec2, Vec2};
use cubeworld::{
    assemble, CubeLayoutConfig, Edge, FaceDescriptor, FaceOrientation, Map, MapObject, Scene,
    Step, Transform,
};
use cubeworld_watch::{Camera, CameraRig, FollowConfig, FollowController, RigChild};

/// Walk a character all the way around the cube's equator, ticking at 60 fps
#[test]
fn test_follow_around_the_cube() {
    let mut scene = Scene::new();
    let config = CubeLayoutConfig::new(2, 1, 1.0);
    let size = config.surface_size();
    let layout = scene.add_layout(config, Transform::IDENTITY);
    for o in FaceOrientation::ALL {
        let map = Map::new(format!("{o:?}"), size, size, 1.0).with_face(FaceDescriptor::surface(o));
        scene.add_map(map, Some(layout)).unwrap();
    }
    let hero = scene.spawn_object(MapObject::new("hero", 1, 1));
    let front = scene.find_map("Front").unwrap();
    scene.attach(hero, front, UVec2::new(4, 4)).unwrap();

    let rig = CameraRig::bind([
        RigChild::Node("sun".into()),
        RigChild::Camera(Camera::default()),
    ]);
    let config = FollowConfig {
        rotation_time: 0.5,
        ..FollowConfig::default()
    };
    let mut follow = FollowController::new(&mut scene, hero, Some(rig), config).unwrap();

    // Followers created before assembly get framed by it.
    assemble(&mut scene, layout, &mut [&mut follow]).unwrap();
    let distance = follow.rig().unwrap().distance();
    assert_eq!(distance, 4.0);

    let dt = 1.0 / 60.0;
    let mut crossings = 0;
    for _ in 0..(size * 4) {
        if let Step::Crossed { .. } = scene.walk(hero, Edge::Right).unwrap() {
            crossings += 1;
        }
        for _ in 0..40 {
            follow.update(&mut scene, dt);
        }
        assert!(!follow.is_transitioning());
        let rig = follow.rig().unwrap();
        let map = scene.object(hero).unwrap().parent_map().unwrap();
        assert_eq!(rig.transform, scene.map(map).unwrap().transform);
        assert_eq!(rig.distance(), distance);
        let cell = scene.object(hero).unwrap().cell();
        assert_eq!(rig.camera_position(), cell.as_vec2() + Vec2::splat(0.5));
    }
    assert_eq!(crossings, 4);
    assert_eq!(scene.object(hero).unwrap().parent_map(), Some(front));
    assert_eq!(scene.object(hero).unwrap().cell(), UVec2::new(4, 4));
}

#[test]
fn test_camera_frame_serializes() {
    let mut rig = CameraRig::with_camera(Camera::default());
    rig.set_orthographic(true);
    rig.set_size(12.0);
    let json = serde_json::to_string(&rig.frame()).unwrap();
    assert!(json.contains("\"orthographic\":true"));
    assert!(json.contains("\"size\":12.0"));
}
