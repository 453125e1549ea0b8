use serde::{Deserialize, Serialize};

use super::Descriptor;

/// Contents of one scene file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDescriptor {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub fog: Option<FogDescriptor>,
    #[serde(default)]
    pub ambient_light: Option<BaseLightDescriptor>,
    pub cam_pos: [f32; 3],
    pub cam_dir: [f32; 3],
    #[serde(default)]
    pub models: Vec<ModelInstanceDescriptor>,
    #[serde(default)]
    pub terrains: Vec<TerrainInstanceDescriptor>,
}

impl Descriptor for SceneDescriptor {
    const NAME: &'static str = "scene";
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FogDescriptor {
    pub density: f32,
    pub gradient: f32,
}

impl Descriptor for FogDescriptor {
    const NAME: &'static str = "fog";
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BaseLightDescriptor {
    pub color: [f32; 4],
    pub intensity: f32,
}

impl Descriptor for BaseLightDescriptor {
    const NAME: &'static str = "base-light";
}

/// A placed model. `rotation` holds the x/y/z components of the orientation
/// quaternion, canonicalised so that w >= 0.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelInstanceDescriptor {
    pub id: u64,
    pub name: String,
    pub model_id: u64,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
}

impl Descriptor for ModelInstanceDescriptor {
    const NAME: &'static str = "model-component";
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainInstanceDescriptor {
    pub id: u64,
    pub name: String,
    pub terrain_id: u64,
    pub position: [f32; 3],
}

impl Descriptor for TerrainInstanceDescriptor {
    const NAME: &'static str = "terrain-component";
}
