//! Placements of shared assets inside a scene.

use glam::{Quat, Vec3};

use void_core::Id;

use crate::asset::{ModelId, TerrainId};

pub type ModelInstanceId = Id<ModelInstance>;
pub type TerrainInstanceId = Id<TerrainInstance>;

/// Local transform of a placed model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }
}

/// A model placed in a scene.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelInstance {
    pub id: ModelInstanceId,
    pub name: String,
    pub model: ModelId,
    pub transform: Transform,
}

impl ModelInstance {
    pub fn new(id: ModelInstanceId, name: impl Into<String>, model: ModelId) -> Self {
        Self {
            id,
            name: name.into(),
            model,
            transform: Transform::IDENTITY,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

/// A terrain placed in a scene. Terrains are only ever translated.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainInstance {
    pub id: TerrainInstanceId,
    pub name: String,
    pub terrain: TerrainId,
    pub position: Vec3,
}

impl TerrainInstance {
    pub fn new(id: TerrainInstanceId, name: impl Into<String>, terrain: TerrainId) -> Self {
        Self {
            id,
            name: name.into(),
            terrain,
            position: Vec3::ZERO,
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }
}
