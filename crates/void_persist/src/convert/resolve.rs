use std::collections::HashSet;
use std::path::{Path, PathBuf};

use glam::{Quat, Vec3};
use void_core::MAX_RAW_ID;
use void_scene::{
    Assets, BaseLight, Camera, Environment, Fog, Id, IdCounter, KeyboardLayout, Model,
    ModelInstance, Project, ProjectRef, Registry, Scene, Settings, Terrain, TerrainInstance,
    TerrainTexture, Texture, Transform,
};

use super::{Diagnostic, Resolution, ResolveOptions, RotationMode};
use crate::descriptor::{
    BaseLightDescriptor, FogDescriptor, KeyboardLayoutDescriptor, ModelDescriptor,
    ModelInstanceDescriptor, ProjectRefDescriptor, ProjectTree, RegistryDescriptor,
    SceneDescriptor, TerrainDescriptor, TerrainInstanceDescriptor, TextureDescriptor,
};

/// Read-only view of the asset arenas that scene instances resolve against.
#[derive(Clone, Copy)]
pub struct AssetLookup<'a> {
    pub models: &'a Assets<Model>,
    pub terrains: &'a Assets<Terrain>,
}

impl<'a> AssetLookup<'a> {
    pub fn of(project: &'a Project) -> Self {
        Self {
            models: &project.models,
            terrains: &project.terrains,
        }
    }
}

pub fn resolve_registry(descriptor: &RegistryDescriptor) -> Registry {
    Registry {
        projects: descriptor.projects.iter().map(resolve_project_ref).collect(),
        last_project: descriptor.last_project.as_ref().map(resolve_project_ref),
        settings: Settings {
            keyboard_layout: descriptor.settings.keyboard_layout.into(),
        },
    }
}

pub fn resolve_project_ref(descriptor: &ProjectRefDescriptor) -> ProjectRef {
    ProjectRef {
        name: descriptor.name.clone(),
        path: PathBuf::from(&descriptor.path),
        last_opened: descriptor.last_opened.map(|t| t.to_system_time()),
    }
}

/// Rebuild a project from its descriptor tree.
///
/// `root` is the directory the project was loaded from; it is not stored in
/// the project file so that projects can be moved.
pub fn resolve_project(
    tree: &ProjectTree,
    root: &Path,
    options: &ResolveOptions,
) -> Resolution<Project> {
    let descriptor = &tree.project;
    let mut diagnostics = Vec::new();
    let mut project = Project::with_counter(
        Id::new(descriptor.id),
        descriptor.name.clone(),
        root,
        IdCounter::starting_at(descriptor.next_available_id),
    );

    // Pass 1: assets. Textures go first so terrains can check theirs.
    for texture in &descriptor.textures {
        if project.textures.insert(resolve_texture(texture)).is_err() {
            duplicate(&mut diagnostics, "texture", texture.id);
        }
    }
    for model in &descriptor.models {
        if project.models.insert(resolve_model(model)).is_err() {
            duplicate(&mut diagnostics, "model", model.id);
        }
    }
    for terrain in &descriptor.terrains {
        let mut resolved = resolve_terrain(terrain);
        if let Some(texture) = resolved.texture {
            if !project.textures.contains(texture.base_texture) {
                log::warn!(
                    "Terrain {} ('{}') references missing texture {}",
                    terrain.id,
                    terrain.name,
                    texture.base_texture
                );
                diagnostics.push(Diagnostic::DanglingTexture {
                    terrain: terrain.id,
                    texture: texture.base_texture.raw(),
                });
                resolved.texture = None;
            }
        }
        if project.terrains.insert(resolved).is_err() {
            duplicate(&mut diagnostics, "terrain", terrain.id);
        }
    }

    // Pass 2: scenes, against the finished arenas.
    let mut scenes = Vec::with_capacity(tree.scenes.len());
    let mut seen = HashSet::new();
    {
        let lookup = AssetLookup::of(&project);
        for scene in &tree.scenes {
            if !seen.insert(scene.id) {
                duplicate(&mut diagnostics, "scene", scene.id);
                continue;
            }
            let (resolved, scene_diagnostics) =
                resolve_scene(scene, &lookup, options).into_parts();
            diagnostics.extend(scene_diagnostics);
            scenes.push(resolved);
        }
    }
    for scene in scenes {
        project.insert_scene(scene);
    }

    for stub in &descriptor.scenes {
        if !seen.contains(&stub.id) {
            log::warn!("Scene '{}' ({}) is listed but was not loaded", stub.name, stub.id);
            diagnostics.push(Diagnostic::MissingScene {
                id: stub.id,
                name: stub.name.clone(),
            });
        }
    }

    // Current scene, by ID, only once every scene exists.
    if let Some(requested) = descriptor.current_scene_id {
        if !project.set_current_scene(Id::new(requested)) {
            let fallback = project.scenes.first().map(|s| s.id);
            match fallback {
                Some(id) => {
                    project.set_current_scene(id);
                }
                None => project.clear_current_scene(),
            }
            log::warn!(
                "Current scene {} not found in project '{}'; falling back to {:?}",
                requested,
                descriptor.name,
                fallback.map(|id| id.raw())
            );
            diagnostics.push(Diagnostic::CurrentSceneFallback {
                requested,
                fallback: fallback.map(|id| id.raw()),
            });
        }
    }

    let max_id = project.max_id();
    if max_id > MAX_RAW_ID {
        log::error!("Project '{}' uses id {}, which is out of range", descriptor.name, max_id);
        diagnostics.push(Diagnostic::IdOutOfRange { id: max_id });
    }
    project.ids_mut().reserve_past(max_id);
    if project.next_available_id() != descriptor.next_available_id {
        log::warn!(
            "Project '{}' stored next id {} but id {} is in use",
            descriptor.name,
            descriptor.next_available_id,
            max_id
        );
        diagnostics.push(Diagnostic::IdCounterRaised {
            stored: descriptor.next_available_id,
            raised_to: project.next_available_id(),
        });
    }

    Resolution::new(project, diagnostics)
}

fn duplicate(diagnostics: &mut Vec<Diagnostic>, kind: &'static str, id: u64) {
    log::warn!("Duplicate {} id {}; keeping the first record", kind, id);
    diagnostics.push(Diagnostic::DuplicateId { kind, id });
}

/// Rebuild one scene. Instances whose asset is missing from `assets` are
/// skipped and reported; their siblings still load.
pub fn resolve_scene(
    descriptor: &SceneDescriptor,
    assets: &AssetLookup<'_>,
    options: &ResolveOptions,
) -> Resolution<Scene> {
    let mut diagnostics = Vec::new();
    let mut scene = Scene::new(Id::new(descriptor.id), descriptor.name.clone());

    scene.camera = Camera::new(
        Vec3::from_array(descriptor.cam_pos),
        Vec3::from_array(descriptor.cam_dir),
    );
    scene.environment = Environment {
        fog: descriptor.fog.as_ref().map(resolve_fog),
        ambient_light: descriptor.ambient_light.as_ref().map(resolve_base_light),
    };

    for instance in &descriptor.models {
        if assets.models.contains(Id::new(instance.model_id)) {
            scene.add_model_instance(resolve_model_instance(instance, options));
        } else {
            log::error!(
                "Model instance {} in scene '{}' ({}) references missing model {}; skipped",
                instance.id,
                descriptor.name,
                descriptor.id,
                instance.model_id
            );
            diagnostics.push(Diagnostic::DanglingModel {
                scene: descriptor.id,
                scene_name: descriptor.name.clone(),
                instance: instance.id,
                model: instance.model_id,
            });
        }
    }

    for instance in &descriptor.terrains {
        if assets.terrains.contains(Id::new(instance.terrain_id)) {
            scene.add_terrain_instance(resolve_terrain_instance(instance));
        } else {
            log::error!(
                "Terrain instance {} in scene '{}' ({}) references missing terrain {}; skipped",
                instance.id,
                descriptor.name,
                descriptor.id,
                instance.terrain_id
            );
            diagnostics.push(Diagnostic::DanglingTerrain {
                scene: descriptor.id,
                scene_name: descriptor.name.clone(),
                instance: instance.id,
                terrain: instance.terrain_id,
            });
        }
    }

    Resolution::new(scene, diagnostics)
}

pub fn resolve_model(descriptor: &ModelDescriptor) -> Model {
    Model {
        id: Id::new(descriptor.id),
        name: descriptor.name.clone(),
        mesh_path: descriptor.mesh_path.clone(),
        texture_path: descriptor.texture_path.clone(),
    }
}

/// Rebuild a terrain. The texture reference is taken as-is; the caller
/// checks it against the texture arena.
pub fn resolve_terrain(descriptor: &TerrainDescriptor) -> Terrain {
    Terrain {
        id: Id::new(descriptor.id),
        name: descriptor.name.clone(),
        heightmap_path: descriptor.path.clone(),
        width: descriptor.width,
        depth: descriptor.depth,
        vertex_resolution: descriptor.vertex_resolution,
        texture: descriptor.texture.map(|t| TerrainTexture {
            base_texture: Id::new(t.base_texture_id),
        }),
    }
}

pub fn resolve_texture(descriptor: &TextureDescriptor) -> Texture {
    Texture::new(Id::new(descriptor.id), descriptor.name.clone(), descriptor.path.clone())
}

pub fn resolve_model_instance(
    descriptor: &ModelInstanceDescriptor,
    options: &ResolveOptions,
) -> ModelInstance {
    let transform = Transform::from_translation(Vec3::from_array(descriptor.position))
        .with_rotation(resolve_rotation(descriptor.rotation, options.rotation))
        .with_scale(Vec3::from_array(descriptor.scale));
    ModelInstance::new(
        Id::new(descriptor.id),
        descriptor.name.clone(),
        Id::new(descriptor.model_id),
    )
    .with_transform(transform)
}

pub fn resolve_terrain_instance(descriptor: &TerrainInstanceDescriptor) -> TerrainInstance {
    TerrainInstance::new(
        Id::new(descriptor.id),
        descriptor.name.clone(),
        Id::new(descriptor.terrain_id),
    )
    .at(Vec3::from_array(descriptor.position))
}

pub fn resolve_fog(descriptor: &FogDescriptor) -> Fog {
    Fog {
        density: descriptor.density,
        gradient: descriptor.gradient,
    }
}

pub fn resolve_base_light(descriptor: &BaseLightDescriptor) -> BaseLight {
    BaseLight {
        color: descriptor.color,
        intensity: descriptor.intensity,
    }
}

/// Turn the stored x/y/z components back into an orientation.
pub fn resolve_rotation(xyz: [f32; 3], mode: RotationMode) -> Quat {
    let v = Vec3::from_array(xyz);
    match mode {
        RotationMode::AxisAngleZero => {
            Quat::from_axis_angle(v.try_normalize().unwrap_or(Vec3::Y), 0.0)
        }
        RotationMode::QuaternionXyz => {
            let w = (1.0 - v.length_squared()).max(0.0).sqrt();
            let q = Quat::from_xyzw(v.x, v.y, v.z, w);
            if q.is_finite() && q.length_squared() > 0.0 {
                q.normalize()
            } else {
                Quat::IDENTITY
            }
        }
    }
}

impl From<KeyboardLayoutDescriptor> for KeyboardLayout {
    fn from(layout: KeyboardLayoutDescriptor) -> Self {
        match layout {
            KeyboardLayoutDescriptor::Qwerty => Self::Qwerty,
            KeyboardLayoutDescriptor::Qwertz => Self::Qwertz,
            KeyboardLayoutDescriptor::Azerty => Self::Azerty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ProjectDescriptor, SceneStubDescriptor, TerrainTextureDescriptor};

    fn empty_scene(id: u64, name: &str) -> SceneDescriptor {
        SceneDescriptor {
            id,
            name: name.to_string(),
            fog: None,
            ambient_light: None,
            cam_pos: [0.0, 1.0, -3.0],
            cam_dir: [0.0, 0.0, -1.0],
            models: Vec::new(),
            terrains: Vec::new(),
        }
    }

    fn tree(scenes: Vec<SceneDescriptor>, current: Option<u64>) -> ProjectTree {
        ProjectTree {
            project: ProjectDescriptor {
                id: 0,
                name: "demo".to_string(),
                next_available_id: 100,
                current_scene_id: current,
                models: vec![ModelDescriptor {
                    id: 1,
                    name: "crate".to_string(),
                    mesh_path: "models/crate.obj".to_string(),
                    texture_path: None,
                }],
                terrains: Vec::new(),
                textures: Vec::new(),
                scenes: scenes
                    .iter()
                    .map(|s| SceneStubDescriptor {
                        id: s.id,
                        name: s.name.clone(),
                    })
                    .collect(),
            },
            scenes,
        }
    }

    #[test]
    fn test_dangling_model_skips_only_that_instance() {
        let mut scene = empty_scene(10, "Main");
        for (id, model_id) in [(11, 1), (12, 99), (13, 1)] {
            scene.models.push(ModelInstanceDescriptor {
                id,
                name: format!("instance {}", id),
                model_id,
                position: [0.0; 3],
                rotation: [0.0; 3],
                scale: [1.0; 3],
            });
        }

        let resolution = resolve_project(&tree(vec![scene], Some(10)), Path::new("/p"), &ResolveOptions::default());
        let project = &resolution.value;
        let ids: Vec<u64> = project.scenes[0].model_instances.iter().map(|i| i.id.raw()).collect();
        assert_eq!(ids, vec![11, 13]);
        assert_eq!(
            resolution.diagnostics,
            vec![Diagnostic::DanglingModel {
                scene: 10,
                scene_name: "Main".to_string(),
                instance: 12,
                model: 99,
            }]
        );
    }

    #[test]
    fn test_current_scene_resolved_by_id_not_position() {
        let scenes = vec![empty_scene(10, "A"), empty_scene(11, "B")];
        let resolution = resolve_project(&tree(scenes, Some(11)), Path::new("/p"), &ResolveOptions::default());
        assert!(resolution.is_clean());
        assert_eq!(resolution.value.current_scene_id().map(|id| id.raw()), Some(11));
    }

    #[test]
    fn test_missing_current_scene_falls_back_to_first() {
        let scenes = vec![empty_scene(10, "A"), empty_scene(11, "B")];
        let resolution = resolve_project(&tree(scenes, Some(42)), Path::new("/p"), &ResolveOptions::default());
        assert_eq!(resolution.value.current_scene_id().map(|id| id.raw()), Some(10));
        assert_eq!(
            resolution.diagnostics,
            vec![Diagnostic::CurrentSceneFallback {
                requested: 42,
                fallback: Some(10),
            }]
        );
    }

    #[test]
    fn test_missing_current_scene_without_scenes() {
        let resolution = resolve_project(&tree(Vec::new(), Some(42)), Path::new("/p"), &ResolveOptions::default());
        assert_eq!(resolution.value.current_scene_id(), None);
        assert_eq!(resolution.diagnostics.len(), 1);
    }

    #[test]
    fn test_no_current_scene_stays_none() {
        let resolution = resolve_project(&tree(vec![empty_scene(10, "A")], None), Path::new("/p"), &ResolveOptions::default());
        assert!(resolution.is_clean());
        assert_eq!(resolution.value.current_scene_id(), None);
    }

    #[test]
    fn test_stale_counter_is_raised() {
        let mut t = tree(vec![empty_scene(10, "A")], Some(10));
        t.project.next_available_id = 5;
        let resolution = resolve_project(&t, Path::new("/p"), &ResolveOptions::default());
        assert_eq!(resolution.value.next_available_id(), 11);
        assert_eq!(
            resolution.diagnostics,
            vec![Diagnostic::IdCounterRaised {
                stored: 5,
                raised_to: 11,
            }]
        );
    }

    #[test]
    fn test_duplicate_asset_keeps_first() {
        let mut t = tree(Vec::new(), None);
        t.project.models.push(ModelDescriptor {
            id: 1,
            name: "impostor".to_string(),
            mesh_path: "models/other.obj".to_string(),
            texture_path: None,
        });
        let resolution = resolve_project(&t, Path::new("/p"), &ResolveOptions::default());
        assert_eq!(resolution.value.models.len(), 1);
        assert_eq!(resolution.value.models.get(Id::new(1)).unwrap().name, "crate");
        assert_eq!(
            resolution.diagnostics,
            vec![Diagnostic::DuplicateId { kind: "model", id: 1 }]
        );
    }

    #[test]
    fn test_dangling_terrain_texture_is_dropped() {
        let mut t = tree(Vec::new(), None);
        t.project.terrains.push(TerrainDescriptor {
            id: 2,
            name: "hills".to_string(),
            path: "heightmaps/hills.png".to_string(),
            width: 1200,
            depth: 1200,
            vertex_resolution: 128,
            texture: Some(TerrainTextureDescriptor { base_texture_id: 77 }),
        });
        let resolution = resolve_project(&t, Path::new("/p"), &ResolveOptions::default());
        assert_eq!(resolution.value.terrains.get(Id::new(2)).unwrap().texture, None);
        assert_eq!(
            resolution.diagnostics,
            vec![Diagnostic::DanglingTexture { terrain: 2, texture: 77 }]
        );
    }

    #[test]
    fn test_unloaded_stub_is_reported() {
        let mut t = tree(vec![empty_scene(10, "A")], None);
        t.scenes.clear();
        let resolution = resolve_project(&t, Path::new("/p"), &ResolveOptions::default());
        assert!(resolution.value.scenes.is_empty());
        assert_eq!(
            resolution.diagnostics,
            vec![Diagnostic::MissingScene {
                id: 10,
                name: "A".to_string(),
            }]
        );
    }

    #[test]
    fn test_max_id_does_not_overflow_counter() {
        let mut t = tree(Vec::new(), None);
        t.project.models[0].id = u64::MAX;
        let resolution = resolve_project(&t, Path::new("/p"), &ResolveOptions::default());
        assert!(resolution.value.models.ids().any(|id| id.raw() == u64::MAX));
        assert_eq!(resolution.value.next_available_id(), u64::MAX);
        assert!(resolution
            .diagnostics
            .contains(&Diagnostic::IdOutOfRange { id: u64::MAX }));
    }

    #[test]
    fn test_axis_angle_zero_is_always_identity() {
        for xyz in [[0.0, 0.0, 0.0], [0.3, 0.2, 0.1], [1.0, 0.0, 0.0]] {
            let q = resolve_rotation(xyz, RotationMode::AxisAngleZero);
            assert!(q.abs_diff_eq(Quat::IDENTITY, 1e-6));
        }
    }

    #[test]
    fn test_quaternion_xyz_rebuilds_w() {
        let rotation = Quat::from_euler(glam::EulerRot::YXZ, 0.7, -0.2, 0.4);
        let stored = super::super::flatten_rotation(rotation);
        let q = resolve_rotation(stored, RotationMode::QuaternionXyz);
        let rotation = if rotation.w < 0.0 { -rotation } else { rotation };
        assert!(q.abs_diff_eq(rotation, 1e-5));
    }
}
