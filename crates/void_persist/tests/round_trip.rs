//! Flatten then resolve, without touching the filesystem.

use std::path::Path;

use glam::{Quat, Vec3};
use void_persist::convert::{flatten_project, flatten_registry, resolve_project, resolve_registry};
use void_persist::{Diagnostic, ResolveOptions, RotationMode};
use void_scene::{
    BaseLight, Fog, KeyboardLayout, ModelInstance, Project, ProjectRef, Registry,
    TerrainInstance, Transform,
};

fn sample_project() -> Project {
    let mut project = Project::new("Island", "/projects/island");
    let grass = project.add_texture("grass", "textures/grass.png");
    let rock = project.add_model("rock", "models/rock.obj");
    let hills = project.add_terrain("hills", 128);
    if let Some(terrain) = project.terrains.get_mut(hills) {
        terrain.texture = Some(void_scene::TerrainTexture { base_texture: grass });
    }

    let beach = project.add_scene("Beach");
    let cave = project.add_scene("Cave");

    let rock_a = project.next_id();
    let rock_b = project.next_id();
    let ground = project.next_id();
    let scene = project.scene_mut(beach).unwrap();
    scene.environment.fog = Some(Fog::default());
    scene.environment.ambient_light = Some(BaseLight {
        color: [1.0, 0.9, 0.8, 1.0],
        intensity: 0.4,
    });
    scene.add_model_instance(
        ModelInstance::new(rock_a, "rock A", rock)
            .with_transform(Transform::from_translation(Vec3::new(1.0, 0.0, 2.0)).with_uniform_scale(2.0)),
    );
    scene.add_model_instance(ModelInstance::new(rock_b, "rock B", rock));
    scene.add_terrain_instance(TerrainInstance::new(ground, "ground", hills).at(Vec3::new(-600.0, 0.0, -600.0)));

    project.set_current_scene(cave);
    project
}

#[test]
fn test_project_round_trip_preserves_everything() {
    let project = sample_project();
    let tree = flatten_project(&project);
    let resolution = resolve_project(&tree, project.root(), &ResolveOptions::default());

    assert!(resolution.is_clean(), "{:?}", resolution.diagnostics);
    assert_eq!(resolution.value, project);
}

#[test]
fn test_ids_are_stable_and_counter_resumes() {
    let project = sample_project();
    let tree = flatten_project(&project);
    let mut loaded = resolve_project(&tree, project.root(), &ResolveOptions::default()).value;

    let ids = |p: &Project| -> Vec<u64> {
        p.models
            .ids()
            .map(|id| id.raw())
            .chain(p.terrains.ids().map(|id| id.raw()))
            .chain(p.textures.ids().map(|id| id.raw()))
            .chain(p.scenes.iter().map(|s| s.id.raw()))
            .collect()
    };
    assert_eq!(ids(&loaded), ids(&project));

    let fresh: void_scene::Id<()> = loaded.next_id();
    assert!(fresh.raw() > project.max_id());
}

#[test]
fn test_shared_terrain_scenario() {
    let mut project = Project::new("Terrains", "/projects/terrains");
    let first = project.add_terrain("first", 64);
    let second = project.add_terrain("second", 64);
    assert_eq!((first.raw(), second.raw()), (1, 2));

    let scene = project.add_scene("Main");
    let instance = project.next_id();
    project
        .scene_mut(scene)
        .unwrap()
        .add_terrain_instance(TerrainInstance::new(instance, "patch", second).at(Vec3::new(3.0, 0.0, -1.5)));

    let tree = flatten_project(&project);
    let terrain_ids: Vec<u64> = tree.project.terrains.iter().map(|t| t.id).collect();
    assert_eq!(terrain_ids, vec![1, 2]);
    assert_eq!(tree.scenes[0].terrains[0].terrain_id, 2);
    assert_eq!(tree.scenes[0].terrains[0].position, [3.0, 0.0, -1.5]);

    let loaded = resolve_project(&tree, project.root(), &ResolveOptions::default()).value;
    let placed = &loaded.scenes[0].terrain_instances[0];
    assert_eq!(placed.terrain, second);
    assert_eq!(placed.position, Vec3::new(3.0, 0.0, -1.5));
    assert_eq!(loaded.terrains.get(placed.terrain).unwrap().name, "second");
}

#[test]
fn test_dangling_terrain_reference_is_tolerated() {
    let project = sample_project();
    let mut tree = flatten_project(&project);
    tree.scenes[0].terrains[0].terrain_id = 999;

    let resolution = resolve_project(&tree, project.root(), &ResolveOptions::default());
    let beach = &resolution.value.scenes[0];
    assert!(beach.terrain_instances.is_empty());
    assert_eq!(beach.model_instances.len(), 2);
    assert!(matches!(
        resolution.diagnostics.as_slice(),
        [Diagnostic::DanglingTerrain { terrain: 999, .. }]
    ));
}

#[test]
fn test_current_scene_fallback_on_deleted_scene() {
    let project = sample_project();
    let mut tree = flatten_project(&project);
    let cave = tree.project.current_scene_id.unwrap();
    tree.scenes.retain(|s| s.id != cave);
    tree.project.scenes.retain(|s| s.id != cave);

    let resolution = resolve_project(&tree, project.root(), &ResolveOptions::default());
    let beach = resolution.value.scenes[0].id;
    assert_eq!(resolution.value.current_scene_id(), Some(beach));
    assert_eq!(
        resolution.diagnostics,
        vec![Diagnostic::CurrentSceneFallback {
            requested: cave,
            fallback: Some(beach.raw()),
        }]
    );
}

#[test]
fn test_rotation_modes() {
    let mut project = sample_project();
    let rotation = Quat::from_rotation_y(std::f32::consts::FRAC_PI_3);
    let beach = project.scenes[0].id;
    project.scene_mut(beach).unwrap().model_instances[0].transform.rotation = rotation;
    let tree = flatten_project(&project);

    let legacy = resolve_project(&tree, Path::new("/p"), &ResolveOptions::default()).value;
    assert!(legacy.scenes[0].model_instances[0]
        .transform
        .rotation
        .abs_diff_eq(Quat::IDENTITY, 1e-6));

    let options = ResolveOptions {
        rotation: RotationMode::QuaternionXyz,
    };
    let exact = resolve_project(&tree, Path::new("/p"), &options).value;
    assert!(exact.scenes[0].model_instances[0]
        .transform
        .rotation
        .abs_diff_eq(rotation, 1e-5));
}

#[test]
fn test_registry_round_trip() {
    let mut registry = Registry::new();
    registry.settings.keyboard_layout = KeyboardLayout::Azerty;
    registry.remember(ProjectRef::new("a", "/projects/a"));
    let at = std::time::UNIX_EPOCH + std::time::Duration::from_millis(1_700_000_000_000);
    registry.mark_opened(ProjectRef::new("b", "/projects/b"), at);

    let restored = resolve_registry(&flatten_registry(&registry));
    assert_eq!(restored, registry);
}
