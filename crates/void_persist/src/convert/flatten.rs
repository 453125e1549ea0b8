use glam::Quat;
use void_scene::{
    BaseLight, Fog, Model, ModelInstance, Project, ProjectRef, Registry, Scene, Terrain,
    TerrainInstance, Texture,
};

use crate::descriptor::{
    BaseLightDescriptor, FogDescriptor, KeyboardLayoutDescriptor, ModelDescriptor,
    ModelInstanceDescriptor, ProjectDescriptor, ProjectRefDescriptor, ProjectTree,
    RegistryDescriptor, SceneDescriptor, SceneStubDescriptor, SettingsDescriptor,
    TerrainDescriptor, TerrainInstanceDescriptor, TerrainTextureDescriptor, TextureDescriptor,
    Timestamp,
};

pub fn flatten_registry(registry: &Registry) -> RegistryDescriptor {
    RegistryDescriptor {
        projects: registry.projects.iter().map(flatten_project_ref).collect(),
        last_project: registry.last_project.as_ref().map(flatten_project_ref),
        settings: SettingsDescriptor {
            keyboard_layout: registry.settings.keyboard_layout.into(),
        },
    }
}

pub fn flatten_project_ref(project: &ProjectRef) -> ProjectRefDescriptor {
    ProjectRefDescriptor {
        name: project.name.clone(),
        path: project.path.to_string_lossy().into_owned(),
        last_opened: project.last_opened.map(Timestamp::from_system_time),
    }
}

/// Flatten a whole project. Scenes become stubs in the project descriptor
/// and full descriptors in [`ProjectTree::scenes`], both in project order.
pub fn flatten_project(project: &Project) -> ProjectTree {
    let scenes: Vec<SceneDescriptor> = project.scenes.iter().map(flatten_scene).collect();

    let descriptor = ProjectDescriptor {
        id: project.id.raw(),
        name: project.name.clone(),
        next_available_id: project.next_available_id(),
        current_scene_id: project.current_scene_id().map(|id| id.raw()),
        models: project.models.iter().map(flatten_model).collect(),
        terrains: project.terrains.iter().map(flatten_terrain).collect(),
        textures: project.textures.iter().map(flatten_texture).collect(),
        scenes: scenes
            .iter()
            .map(|s| SceneStubDescriptor {
                id: s.id,
                name: s.name.clone(),
            })
            .collect(),
    };

    ProjectTree {
        project: descriptor,
        scenes,
    }
}

pub fn flatten_scene(scene: &Scene) -> SceneDescriptor {
    SceneDescriptor {
        id: scene.id.raw(),
        name: scene.name.clone(),
        fog: scene.environment.fog.as_ref().map(flatten_fog),
        ambient_light: scene.environment.ambient_light.as_ref().map(flatten_base_light),
        cam_pos: scene.camera.position.to_array(),
        cam_dir: scene.camera.direction.to_array(),
        models: scene.model_instances.iter().map(flatten_model_instance).collect(),
        terrains: scene.terrain_instances.iter().map(flatten_terrain_instance).collect(),
    }
}

pub fn flatten_model(model: &Model) -> ModelDescriptor {
    ModelDescriptor {
        id: model.id.raw(),
        name: model.name.clone(),
        mesh_path: model.mesh_path.clone(),
        texture_path: model.texture_path.clone(),
    }
}

pub fn flatten_terrain(terrain: &Terrain) -> TerrainDescriptor {
    TerrainDescriptor {
        id: terrain.id.raw(),
        name: terrain.name.clone(),
        path: terrain.heightmap_path.clone(),
        width: terrain.width,
        depth: terrain.depth,
        vertex_resolution: terrain.vertex_resolution,
        texture: terrain.texture.map(|t| TerrainTextureDescriptor {
            base_texture_id: t.base_texture.raw(),
        }),
    }
}

pub fn flatten_texture(texture: &Texture) -> TextureDescriptor {
    TextureDescriptor {
        id: texture.id.raw(),
        name: texture.name.clone(),
        path: texture.path.clone(),
    }
}

pub fn flatten_model_instance(instance: &ModelInstance) -> ModelInstanceDescriptor {
    let transform = &instance.transform;
    ModelInstanceDescriptor {
        id: instance.id.raw(),
        name: instance.name.clone(),
        model_id: instance.model.raw(),
        position: transform.translation.to_array(),
        rotation: flatten_rotation(transform.rotation),
        scale: transform.scale.to_array(),
    }
}

pub fn flatten_terrain_instance(instance: &TerrainInstance) -> TerrainInstanceDescriptor {
    TerrainInstanceDescriptor {
        id: instance.id.raw(),
        name: instance.name.clone(),
        terrain_id: instance.terrain.raw(),
        position: instance.position.to_array(),
    }
}

pub fn flatten_fog(fog: &Fog) -> FogDescriptor {
    FogDescriptor {
        density: fog.density,
        gradient: fog.gradient,
    }
}

pub fn flatten_base_light(light: &BaseLight) -> BaseLightDescriptor {
    BaseLightDescriptor {
        color: light.color,
        intensity: light.intensity,
    }
}

/// Vector part of the orientation, sign-flipped so the dropped `w` is >= 0.
pub fn flatten_rotation(rotation: Quat) -> [f32; 3] {
    let q = if rotation.w < 0.0 { -rotation } else { rotation };
    [q.x, q.y, q.z]
}

impl From<void_scene::KeyboardLayout> for KeyboardLayoutDescriptor {
    fn from(layout: void_scene::KeyboardLayout) -> Self {
        use void_scene::KeyboardLayout;
        match layout {
            KeyboardLayout::Qwerty => Self::Qwerty,
            KeyboardLayout::Qwertz => Self::Qwertz,
            KeyboardLayout::Azerty => Self::Azerty,
        }
    }
}
