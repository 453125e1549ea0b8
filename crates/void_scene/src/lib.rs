//! # void_scene - Editor Scene Projects
//!
//! The live, graph-shaped model the editor works on:
//!
//! ```text
//! Project ──owns──► Assets<Model>, Assets<Terrain>, Assets<Texture>
//!    │
//!    └──owns──► Scene ──owns──► ModelInstance ──ModelId──► Model
//!                  │
//!                  └──owns──► TerrainInstance ──TerrainId──► Terrain
//! ```
//!
//! Shared assets live in ID-keyed arenas owned by the project. Instances
//! hold typed ID handles instead of references, so a project can be flattened
//! and rebuilt without reference cycles.
//!
//! The global [`Registry`] (known projects and editor settings) lives here too,
//! since it is domain state the editor reads at startup.

pub mod asset;
pub mod environment;
pub mod instance;
pub mod project;
pub mod registry;
pub mod scene;

pub use asset::{Asset, Assets, Model, ModelId, Terrain, TerrainId, TerrainTexture, Texture, TextureId};
pub use environment::{BaseLight, Camera, Environment, Fog};
pub use instance::{ModelInstance, ModelInstanceId, TerrainInstance, TerrainInstanceId, Transform};
pub use project::{IntegrityIssue, Project, ProjectId};
pub use registry::{KeyboardLayout, ProjectRef, Registry, Settings};
pub use scene::{Scene, SceneId};

pub use void_core::{Id, IdCounter};
