//! The project: asset arenas, scenes and the project-scoped ID counter.
//!
//! Every ID referenced anywhere in a project must resolve to an asset or
//! scene owned by that same project. [`Project::integrity_issues`] reports
//! anything that breaks this.

use std::fmt;
use std::path::{Path, PathBuf};

use void_core::{Id, IdCounter};

use crate::asset::{Asset, Assets, Model, ModelId, Terrain, TerrainId, Texture, TextureId};
use crate::instance::{ModelInstanceId, TerrainInstanceId};
use crate::scene::{Scene, SceneId};

pub type ProjectId = Id<Project>;

#[derive(Clone, Debug, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    /// Directory holding the project file and the scenes directory
    pub root: PathBuf,
    ids: IdCounter,
    pub models: Assets<Model>,
    pub terrains: Assets<Terrain>,
    pub textures: Assets<Texture>,
    pub scenes: Vec<Scene>,
    current_scene: Option<SceneId>,
}

impl Project {
    /// Create an empty project. The project's own ID is the first one drawn
    /// from its counter.
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        let mut ids = IdCounter::new();
        let id = ids.next();
        Self::with_counter(id, name, root, ids)
    }

    /// Rebuild a project shell around a persisted ID counter.
    pub fn with_counter(
        id: ProjectId,
        name: impl Into<String>,
        root: impl Into<PathBuf>,
        ids: IdCounter,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            root: root.into(),
            ids,
            models: Assets::new(),
            terrains: Assets::new(),
            textures: Assets::new(),
            scenes: Vec::new(),
            current_scene: None,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Draw a fresh ID from the project counter.
    pub fn next_id<T>(&mut self) -> Id<T> {
        self.ids.next()
    }

    /// The next-available ID, as persisted.
    pub fn next_available_id(&self) -> u64 {
        self.ids.peek()
    }

    pub fn ids_mut(&mut self) -> &mut IdCounter {
        &mut self.ids
    }

    pub fn add_model(&mut self, name: impl Into<String>, mesh_path: impl Into<String>) -> ModelId {
        let id = self.next_id();
        insert_asset(&mut self.models, Model::new(id, name, mesh_path))
    }

    pub fn add_terrain(&mut self, name: impl Into<String>, vertex_resolution: u32) -> TerrainId {
        let id = self.next_id();
        insert_asset(&mut self.terrains, Terrain::new(id, name, vertex_resolution))
    }

    pub fn add_texture(&mut self, name: impl Into<String>, path: impl Into<String>) -> TextureId {
        let id = self.next_id();
        insert_asset(&mut self.textures, Texture::new(id, name, path))
    }

    /// Create a new empty scene. The first scene becomes the current one.
    pub fn add_scene(&mut self, name: impl Into<String>) -> SceneId {
        let id = self.next_id();
        self.scenes.push(Scene::new(id, name));
        if self.current_scene.is_none() {
            self.current_scene = Some(id);
        }
        id
    }

    /// Adopt an already built scene, e.g. one loaded from disk.
    pub fn insert_scene(&mut self, scene: Scene) {
        self.ids.reserve_past(scene.id.raw());
        if let Some(existing) = self.scenes.iter_mut().find(|s| s.id == scene.id) {
            *existing = scene;
        } else {
            self.scenes.push(scene);
        }
    }

    pub fn remove_scene(&mut self, id: SceneId) -> Option<Scene> {
        let position = self.scenes.iter().position(|s| s.id == id)?;
        let removed = self.scenes.remove(position);
        if self.current_scene == Some(id) {
            self.current_scene = self.scenes.first().map(|s| s.id);
        }
        Some(removed)
    }

    pub fn scene(&self, id: SceneId) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == id)
    }

    pub fn scene_mut(&mut self, id: SceneId) -> Option<&mut Scene> {
        self.scenes.iter_mut().find(|s| s.id == id)
    }

    pub fn scene_by_name(&self, name: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.name == name)
    }

    pub fn current_scene_id(&self) -> Option<SceneId> {
        self.current_scene
    }

    pub fn current_scene(&self) -> Option<&Scene> {
        self.current_scene.and_then(|id| self.scene(id))
    }

    /// Switch scenes. Returns `false` if the project owns no such scene.
    pub fn set_current_scene(&mut self, id: SceneId) -> bool {
        if self.scene(id).is_some() {
            self.current_scene = Some(id);
            true
        } else {
            false
        }
    }

    pub fn clear_current_scene(&mut self) {
        self.current_scene = None;
    }

    /// Largest ID used by any entity in the project.
    pub fn max_id(&self) -> u64 {
        let assets = self
            .models
            .ids()
            .map(|id| id.raw())
            .chain(self.terrains.ids().map(|id| id.raw()))
            .chain(self.textures.ids().map(|id| id.raw()));
        let scenes = self.scenes.iter().flat_map(|s| {
            std::iter::once(s.id.raw())
                .chain(s.model_instances.iter().map(|i| i.id.raw()))
                .chain(s.terrain_instances.iter().map(|i| i.id.raw()))
        });
        std::iter::once(self.id.raw()).chain(assets).chain(scenes).max().unwrap_or(0)
    }

    /// Check the referential invariants of the project graph.
    pub fn integrity_issues(&self) -> Vec<IntegrityIssue> {
        let mut issues = Vec::new();

        for terrain in &self.terrains {
            if let Some(texture) = terrain.texture {
                if !self.textures.contains(texture.base_texture) {
                    issues.push(IntegrityIssue::MissingTexture {
                        terrain: terrain.id,
                        texture: texture.base_texture,
                    });
                }
            }
        }

        for scene in &self.scenes {
            for instance in &scene.model_instances {
                if !self.models.contains(instance.model) {
                    issues.push(IntegrityIssue::MissingModel {
                        scene: scene.id,
                        instance: instance.id,
                        model: instance.model,
                    });
                }
            }
            for instance in &scene.terrain_instances {
                if !self.terrains.contains(instance.terrain) {
                    issues.push(IntegrityIssue::MissingTerrain {
                        scene: scene.id,
                        instance: instance.id,
                        terrain: instance.terrain,
                    });
                }
            }
        }

        if let Some(current) = self.current_scene {
            if self.scene(current).is_none() {
                issues.push(IntegrityIssue::MissingCurrentScene(current));
            }
        }

        let max = self.max_id();
        if self.ids.peek() <= max {
            issues.push(IntegrityIssue::StaleIdCounter {
                next: self.ids.peek(),
                max_used: max,
            });
        }

        issues
    }
}

fn insert_asset<T: Asset>(assets: &mut Assets<T>, asset: T) -> Id<T> {
    let id = asset.id();
    if let Err(rejected) = assets.insert(asset) {
        log::warn!("Asset id {} already taken, dropped '{}'", id, rejected.name());
    }
    id
}

/// A broken reference inside a project graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IntegrityIssue {
    MissingModel {
        scene: SceneId,
        instance: ModelInstanceId,
        model: ModelId,
    },
    MissingTerrain {
        scene: SceneId,
        instance: TerrainInstanceId,
        terrain: TerrainId,
    },
    MissingTexture {
        terrain: TerrainId,
        texture: TextureId,
    },
    MissingCurrentScene(SceneId),
    /// The counter would hand out an ID that is already taken
    StaleIdCounter { next: u64, max_used: u64 },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingModel { scene, instance, model } => {
                write!(f, "model instance {} in scene {} references missing model {}", instance, scene, model)
            }
            Self::MissingTerrain { scene, instance, terrain } => {
                write!(f, "terrain instance {} in scene {} references missing terrain {}", instance, scene, terrain)
            }
            Self::MissingTexture { terrain, texture } => {
                write!(f, "terrain {} references missing texture {}", terrain, texture)
            }
            Self::MissingCurrentScene(id) => write!(f, "current scene {} does not exist", id),
            Self::StaleIdCounter { next, max_used } => {
                write!(f, "next available id {} is not above largest used id {}", next, max_used)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{ModelInstance, TerrainInstance};

    #[test]
    fn test_new_project_ids() {
        let mut project = Project::new("demo", "/tmp/demo");
        assert_eq!(project.id.raw(), 0);
        let t1 = project.add_terrain("hills", 180);
        let t2 = project.add_terrain("dunes", 180);
        assert_eq!((t1.raw(), t2.raw()), (1, 2));
        assert_eq!(project.next_available_id(), 3);
    }

    #[test]
    fn test_first_scene_becomes_current() {
        let mut project = Project::new("demo", "/tmp/demo");
        let main = project.add_scene("Main");
        let other = project.add_scene("Other");
        assert_eq!(project.current_scene_id(), Some(main));
        assert!(project.set_current_scene(other));
        assert!(!project.set_current_scene(Id::new(999)));
        assert_eq!(project.current_scene().unwrap().name, "Other");

        project.remove_scene(other);
        assert_eq!(project.current_scene_id(), Some(main));
    }

    #[test]
    fn test_integrity_clean_project() {
        let mut project = Project::new("demo", "/tmp/demo");
        let terrain = project.add_terrain("hills", 180);
        let model = project.add_model("tree", "models/tree.g3db");
        let scene = project.add_scene("Main");
        let ti = project.next_id();
        let mi = project.next_id();
        let s = project.scene_mut(scene).unwrap();
        s.add_terrain_instance(TerrainInstance::new(ti, "hills", terrain));
        s.add_model_instance(ModelInstance::new(mi, "tree", model));

        assert!(project.integrity_issues().is_empty());
    }

    #[test]
    fn test_integrity_reports_dangling_references() {
        let mut project = Project::new("demo", "/tmp/demo");
        let model = project.add_model("tree", "models/tree.g3db");
        let scene = project.add_scene("Main");
        let mi = project.next_id();
        project
            .scene_mut(scene)
            .unwrap()
            .add_model_instance(ModelInstance::new(mi, "tree", model));
        project.models.remove(model);

        let issues = project.integrity_issues();
        assert_eq!(
            issues,
            vec![IntegrityIssue::MissingModel { scene, instance: mi, model }]
        );
        assert!(issues[0].to_string().contains("missing model"));
    }

    #[test]
    fn test_insert_scene_moves_counter() {
        let mut project = Project::new("demo", "/tmp/demo");
        project.insert_scene(Scene::new(Id::new(40), "Imported"));
        assert_eq!(project.next_available_id(), 41);
        assert!(project.integrity_issues().is_empty());
    }
}
