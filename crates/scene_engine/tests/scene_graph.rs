//! End-to-end scene graph behavior through the public API

use std::sync::Arc;

use approx::assert_relative_eq;
use scene_engine::foundation::math::utils;
use scene_engine::prelude::*;
use scene_engine::render::DrawCommand;

fn mesh(path: &str) -> Arc<Mesh> {
    Arc::new(
        Mesh::new(
            path,
            vec![Vec3::zeros(), Vec3::x(), Vec3::y()],
            vec![Vec3::z(); 3],
            vec![0, 1, 2],
        )
        .unwrap(),
    )
}

fn entity_at(path: &str, center: Vec3, radius: f32) -> Entity {
    Entity::new(mesh(path), Material::default()).with_local_bounds(BoundingSphere::new(center, radius))
}

fn orbital_scene() -> Scene {
    let camera = Camera::orbital(CameraParams::default(), CameraLimits::default()).unwrap();
    Scene::new(800, 600, camera)
}

/// Compact label per command, for order assertions
fn labels(pipeline: &RecordingPipeline) -> Vec<String> {
    pipeline
        .commands()
        .iter()
        .map(|command| match command {
            DrawCommand::BeginFrame { .. } => "begin".to_string(),
            DrawCommand::Mesh { path, .. } => format!("mesh:{path}"),
            DrawCommand::BoundingSphere { .. } => "sphere".to_string(),
            DrawCommand::Normals { path, .. } => format!("normals:{path}"),
            DrawCommand::LineStrip { .. } => "path".to_string(),
            DrawCommand::Axes { .. } => "axes".to_string(),
        })
        .collect()
}

#[test]
fn two_entity_group_bounds() {
    let mut group = Group::new("pair");
    group.add_entity(entity_at("a", Vec3::zeros(), 1.0));
    group.add_entity(entity_at("b", Vec3::new(10.0, 0.0, 0.0), 1.0));

    let mut scene = orbital_scene();
    scene.add_group(group);
    scene.update_bounding_spheres();

    let bounds = scene.groups()[0].world_bounds();
    assert_relative_eq!(bounds.center, Vec3::new(5.0, 0.0, 0.0), epsilon = 1e-5);
    assert!(bounds.radius >= 6.0 - 1e-5);
    for entity in scene.groups()[0].entities() {
        assert!(bounds.contains_sphere(&entity.world_bounds(), 1e-4));
    }
}

#[test]
fn orbital_zoom_through_scene() {
    let mut scene = orbital_scene();
    scene.camera_mut().zoom(1.0);
    assert_relative_eq!(scene.camera().orbit().unwrap().radius, 10.0 / 1.8, epsilon = 1e-4);
    assert_relative_eq!(scene.camera_position().magnitude(), 10.0 / 1.8, epsilon = 1e-4);

    scene.camera_mut().zoom(-1.0);
    assert_relative_eq!(scene.camera().orbit().unwrap().radius, 10.0, epsilon = 1e-4);
}

#[test]
fn culling_counts_entities() {
    let mut mixed = Group::new("mixed");
    mixed.add_entity(entity_at("front", Vec3::zeros(), 1.0));
    mixed.add_entity(entity_at("behind", Vec3::new(0.0, 0.0, 50.0), 1.0));

    let mut far_behind = Group::new("far_behind");
    far_behind.add_entity(entity_at("hidden", Vec3::new(0.0, 0.0, 100.0), 1.0));

    let mut scene = orbital_scene();
    scene.add_group(mixed);
    scene.add_group(far_behind);

    let mut pipeline = RecordingPipeline::new();
    let stats = scene.draw(&mut pipeline, DrawFlags::default());
    assert_eq!(stats.entities_total, 3);
    assert_eq!(stats.entities_drawn, 1);
    assert_eq!(stats.entities_culled(), 2);
    assert_eq!(pipeline.mesh_draws(), vec!["front"]);

    let stats = scene.draw(&mut pipeline, DrawFlags::FILL);
    assert_eq!(stats.entities_drawn, 3);
    assert_eq!(pipeline.mesh_draws(), vec!["front", "behind", "hidden"]);
}

#[test]
fn draw_order_entities_children_then_own_sphere() {
    let mut child = Group::new("child");
    child.add_entity(entity_at("b", Vec3::new(1.0, 0.0, 0.0), 0.5));
    let mut root = Group::new("root");
    root.add_entity(entity_at("a", Vec3::zeros(), 0.5));
    root.add_group(child);

    let mut scene = orbital_scene();
    scene.add_group(root);

    let mut pipeline = RecordingPipeline::new();
    scene.draw(&mut pipeline, DrawFlags::FILL | DrawFlags::SHOW_BOUNDING_SPHERES);
    assert_eq!(
        labels(&pipeline),
        vec!["begin", "mesh:a", "sphere", "mesh:b", "sphere", "sphere", "sphere"]
    );

    // Last sphere belongs to the root group
    let Some(DrawCommand::BoundingSphere { sphere, .. }) = pipeline.commands().last() else {
        panic!("expected a bounding sphere last");
    };
    assert_eq!(*sphere, scene.groups()[0].world_bounds());
}

#[test]
fn overlay_flags_gate_commands() {
    let mut group = Group::new("g");
    group.add_entity(entity_at("a", Vec3::zeros(), 1.0));
    let mut scene = orbital_scene();
    scene.add_group(group);

    let mut pipeline = RecordingPipeline::new();
    scene.draw(&mut pipeline, DrawFlags::default());
    assert_eq!(labels(&pipeline), vec!["begin", "mesh:a"]);

    scene.draw(&mut pipeline, DrawFlags::default() | DrawFlags::SHOW_AXES | DrawFlags::SHOW_NORMALS);
    assert_eq!(labels(&pipeline), vec!["begin", "axes", "mesh:a", "normals:a"]);

    let wireframe = DrawFlags::CULL;
    scene.draw(&mut pipeline, wireframe);
    assert!(matches!(pipeline.commands()[1], DrawCommand::Mesh { fill: false, .. }));
}

#[test]
fn animation_path_drawn_in_prefix_space() {
    let points = vec![
        Vec3::new(5.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -5.0),
        Vec3::new(-5.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 5.0),
    ];
    let transform = CompositeTransform::from_transforms([
        Transform::scale(Vec3::repeat(2.0)),
        Transform::animated_translation(points, 4.0, false).unwrap(),
    ])
    .unwrap();
    let mut group = Group::new("orbit").with_transform(transform);
    group.add_entity(entity_at("moon", Vec3::zeros(), 0.5));

    let mut scene = orbital_scene();
    scene.add_group(group);

    let mut pipeline = RecordingPipeline::new();
    scene.draw(&mut pipeline, DrawFlags::FILL | DrawFlags::SHOW_ANIMATION_PATHS);
    let Some(DrawCommand::LineStrip { points, closed }) = pipeline.commands().get(1) else {
        panic!("expected the path before the group's meshes");
    };
    assert!(closed);
    assert_eq!(points.len(), 64);
    assert_relative_eq!(points[0], Vec3::new(10.0, 0.0, 0.0), epsilon = 1e-4);
    assert_relative_eq!(points[16], Vec3::new(0.0, 0.0, -10.0), epsilon = 1e-4);

    scene.draw(&mut pipeline, DrawFlags::FILL);
    assert!(!labels(&pipeline).contains(&"path".to_string()));
}

#[test]
fn update_then_bounds_follow_animation() {
    let points = vec![
        Vec3::new(5.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -5.0),
        Vec3::new(-5.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 5.0),
    ];
    let mut planet = Group::new("planet")
        .with_transform(CompositeTransform::from_transforms([Transform::animated_translation(points, 4.0, false).unwrap()]).unwrap());
    planet.add_entity(entity_at("planet", Vec3::zeros(), 0.5));

    let mut sun = Group::new("sun").with_transform(
        CompositeTransform::from_transforms([Transform::translation(Vec3::new(0.0, 1.0, 0.0))]).unwrap(),
    );
    sun.add_entity(entity_at("sun", Vec3::zeros(), 1.0));
    sun.add_group(planet);

    let mut scene = orbital_scene();
    scene.add_group(sun);

    scene.update(1.0);
    scene.update_bounding_spheres();
    let planet = &scene.groups()[0].groups()[0];
    assert_relative_eq!(planet.entities()[0].world_bounds().center, Vec3::new(0.0, 1.0, -5.0), epsilon = 1e-4);
    assert!(scene.groups()[0].world_bounds().contains_sphere(&planet.world_bounds(), 1e-4));

    // A full period later the hierarchy is back where it was
    scene.update(5.0);
    scene.update_bounding_spheres();
    let planet = &scene.groups()[0].groups()[0];
    assert_relative_eq!(planet.entities()[0].world_bounds().center, Vec3::new(0.0, 1.0, -5.0), epsilon = 1e-4);
}

#[test]
fn third_person_followed_group_drawn_at_look_at() {
    let mut player = Group::new("player");
    player.add_entity(entity_at("ship", Vec3::zeros(), 1.0));
    let camera = Camera::third_person(CameraParams::default(), CameraLimits::default(), player).unwrap();
    let mut scene = Scene::new(800, 600, camera);
    assert_eq!(scene.entity_count(), 1);

    let mut pipeline = RecordingPipeline::new();
    let stats = scene.draw(&mut pipeline, DrawFlags::default());
    assert_eq!(stats.entities_drawn, 1);

    scene.camera_mut().move_by(&Vec3::new(0.0, 0.0, 3.0));
    scene.draw(&mut pipeline, DrawFlags::default());
    let Some(DrawCommand::Mesh { path, model, .. }) = pipeline.commands().get(1) else {
        panic!("expected the followed mesh");
    };
    assert_eq!(path, "ship");
    assert_relative_eq!(utils::origin_of(model), Vec3::new(0.0, 0.0, -3.0), epsilon = 1e-4);
    // Ship faces away from the camera: its local +Z maps onto world -Z
    assert_relative_eq!(utils::transform_point(model, &Vec3::z()), Vec3::new(0.0, 0.0, -4.0), epsilon = 1e-4);
}

#[test]
fn controller_drives_scene_camera() {
    let mut scene = orbital_scene();
    let controller = CameraController::new(scene_engine::config::CameraControlConfig::default());
    let mut input = InputManager::new();
    input.handle_key_input(KeyCode::Z, true);

    let before = scene.camera().orbit().unwrap().radius;
    controller.update(&mut input, scene.camera_mut(), 0.5);
    assert!(scene.camera().orbit().unwrap().radius < before);

    input.handle_key_input(KeyCode::Z, false);
    let deltas = controller.update(&mut input, scene.camera_mut(), 0.5);
    assert!(deltas.is_zero());
}

#[test]
fn lights_reach_the_pipeline_every_frame() {
    let mut scene = orbital_scene();
    let point = Light::point(Vec3::new(0.0, 5.0, 0.0), Vec3::new(1.0, 0.9, 0.8));
    let sun = Light::directional(Vec3::new(0.0, -2.0, 0.0), Vec3::repeat(0.3)).unwrap();
    scene.add_light(point.clone());
    scene.add_light(sun.clone());

    let mut pipeline = RecordingPipeline::new();
    for _ in 0..2 {
        scene.draw(&mut pipeline, DrawFlags::default());
        let Some(DrawCommand::BeginFrame { lights, .. }) = pipeline.commands().first() else {
            panic!("expected the frame to start with BeginFrame");
        };
        assert_eq!(lights, &vec![point.uniform(), sun.uniform()]);
        assert_eq!(lights[0].position, [0.0, 5.0, 0.0, 1.0]);
        assert_eq!(lights[1].direction, [0.0, -1.0, 0.0, 0.0]);
    }

    let mut empty = orbital_scene();
    empty.draw(&mut pipeline, DrawFlags::default());
    assert!(matches!(
        pipeline.commands().first(),
        Some(DrawCommand::BeginFrame { lights, .. }) if lights.is_empty()
    ));
}
