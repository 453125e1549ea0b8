use serde::{Deserialize, Serialize};

use super::Descriptor;

/// Contents of the project file: assets and scene stubs, never scene bodies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    pub id: u64,
    pub name: String,
    pub next_available_id: u64,
    #[serde(default)]
    pub current_scene_id: Option<u64>,
    #[serde(default)]
    pub models: Vec<ModelDescriptor>,
    #[serde(default)]
    pub terrains: Vec<TerrainDescriptor>,
    #[serde(default)]
    pub textures: Vec<TextureDescriptor>,
    #[serde(default)]
    pub scenes: Vec<SceneStubDescriptor>,
}

impl Descriptor for ProjectDescriptor {
    const NAME: &'static str = "project";
}

/// Scene reference inside the project file. The body lives in the scene file
/// named after `name`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneStubDescriptor {
    pub id: u64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub id: u64,
    pub name: String,
    pub mesh_path: String,
    #[serde(default)]
    pub texture_path: Option<String>,
}

impl Descriptor for ModelDescriptor {
    const NAME: &'static str = "model";
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainDescriptor {
    pub id: u64,
    pub name: String,
    pub path: String,
    pub width: u32,
    pub depth: u32,
    pub vertex_resolution: u32,
    #[serde(default)]
    pub texture: Option<TerrainTextureDescriptor>,
}

impl Descriptor for TerrainDescriptor {
    const NAME: &'static str = "terrain";
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextureDescriptor {
    pub id: u64,
    pub name: String,
    pub path: String,
}

impl Descriptor for TextureDescriptor {
    const NAME: &'static str = "texture";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainTextureDescriptor {
    pub base_texture_id: u64,
}

impl Descriptor for TerrainTextureDescriptor {
    const NAME: &'static str = "terrain-texture";
}
