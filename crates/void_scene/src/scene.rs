//! A scene: placed instances, camera pose and environment.

use void_core::Id;

use crate::asset::ModelId;
use crate::environment::{Camera, Environment};
use crate::instance::{ModelInstance, TerrainInstance};

pub type SceneId = Id<Scene>;

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub id: SceneId,
    pub name: String,
    pub camera: Camera,
    pub environment: Environment,
    pub model_instances: Vec<ModelInstance>,
    pub terrain_instances: Vec<TerrainInstance>,
}

impl Scene {
    pub fn new(id: SceneId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            camera: Camera::default(),
            environment: Environment::default(),
            model_instances: Vec::new(),
            terrain_instances: Vec::new(),
        }
    }

    pub fn add_model_instance(&mut self, instance: ModelInstance) {
        self.model_instances.push(instance);
    }

    pub fn add_terrain_instance(&mut self, instance: TerrainInstance) {
        self.terrain_instances.push(instance);
    }

    /// Models placed in this scene, in placement order (may repeat).
    pub fn referenced_models(&self) -> impl Iterator<Item = ModelId> + '_ {
        self.model_instances.iter().map(|i| i.model)
    }
}
