//! File-level save and load orchestration.
//!
//! On disk a project is one directory:
//!
//! ```text
//! <root>/<project name>.pro
//! <root>/scenes/<scene name>.scn
//! ```
//!
//! plus one global registry file shared by every project. All writes go
//! through [`write_atomic`], so a crash mid-save never leaves a half-written
//! file at the target path.
//!
//! Scene files are named after their scene, so two scenes whose names map to
//! the same file are refused before anything is written. Once a project has
//! been saved, scene files it no longer lists are removed.

use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use void_scene::{Project, ProjectRef, Registry, Scene};

use crate::codec;
use crate::config::PersistConfig;
use crate::convert::{
    flatten_project, flatten_registry, flatten_scene, resolve_project, resolve_registry,
    resolve_scene, AssetLookup, Resolution,
};
use crate::descriptor::{ProjectDescriptor, ProjectTree, RegistryDescriptor, SceneDescriptor};
use crate::error::{PersistError, Result};

/// Reads and writes registry, project and scene files.
#[derive(Debug, Clone, Default)]
pub struct PersistenceManager {
    config: PersistConfig,
}

impl PersistenceManager {
    pub fn new(config: PersistConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PersistConfig {
        &self.config
    }

    /// Load the global registry. A missing or unreadable file yields an
    /// empty registry; this never fails.
    pub fn load_registry(&self) -> Registry {
        let path = &self.config.registry_path;
        if !path.exists() {
            log::info!("No registry at {}, starting fresh", path.display());
            return Registry::new();
        }

        match read_file(path).and_then(|bytes| codec::decode::<RegistryDescriptor>(&bytes, path)) {
            Ok(descriptor) => {
                let registry = resolve_registry(&descriptor);
                log::info!(
                    "Loaded registry from {} ({} projects)",
                    path.display(),
                    registry.projects.len()
                );
                registry
            }
            Err(e) => {
                log::warn!("Ignoring unreadable registry {}: {}", path.display(), e);
                Registry::new()
            }
        }
    }

    pub fn save_registry(&self, registry: &Registry) -> Result<()> {
        let path = &self.config.registry_path;
        let bytes = codec::encode(&flatten_registry(registry), self.config.encoding)?;
        if let Some(parent) = path.parent() {
            create_dir(parent)?;
        }
        write_atomic(path, &bytes)?;
        log::info!("Saved registry to {}", path.display());
        Ok(())
    }

    pub fn project_file_path(&self, project: &Project) -> PathBuf {
        project.root().join(format!(
            "{}.{}",
            file_stem(&project.name),
            self.config.project_extension
        ))
    }

    pub fn scenes_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.config.scenes_dir)
    }

    pub fn scene_file_path(&self, root: &Path, scene_name: &str) -> PathBuf {
        self.scenes_dir(root).join(format!(
            "{}.{}",
            file_stem(scene_name),
            self.config.scene_extension
        ))
    }

    /// Save every scene file, then the project file, then remove scene files
    /// the project no longer lists.
    ///
    /// Scenes go first so that a project file on disk never lists a scene
    /// that has not been written yet.
    pub fn save_project(&self, project: &Project) -> Result<()> {
        let tree = flatten_project(project);
        let root = project.root();
        self.check_scene_files(root, tree.scenes.iter().map(|s| s.name.as_str()))?;

        let scenes_dir = self.scenes_dir(root);
        create_dir(&scenes_dir)?;
        for scene in &tree.scenes {
            self.write_scene(root, scene)?;
        }

        let path = self.project_file_path(project);
        let bytes = codec::encode(&tree.project, self.config.encoding)?;
        write_atomic(&path, &bytes)?;

        let keep: HashSet<String> = tree
            .scenes
            .iter()
            .filter_map(|s| {
                self.scene_file_path(root, &s.name)
                    .file_name()
                    .map(|n| n.to_string_lossy().to_lowercase())
            })
            .collect();
        self.prune_scene_files(&scenes_dir, &keep);

        log::info!(
            "Saved project '{}' to {} ({} scenes)",
            project.name,
            path.display(),
            tree.scenes.len()
        );
        Ok(())
    }

    /// Save a single scene file.
    ///
    /// Fails if another scene of the project would be stored in the same file.
    pub fn save_scene(&self, project: &Project, scene: &Scene) -> Result<()> {
        let root = project.root();
        let others = project
            .scenes
            .iter()
            .filter(|s| s.id != scene.id)
            .map(|s| s.name.as_str());
        self.check_scene_files(root, others.chain(std::iter::once(scene.name.as_str())))?;

        create_dir(&self.scenes_dir(root))?;
        self.write_scene(root, &flatten_scene(scene))
    }

    /// Refuse scene names that would share a file. Names are compared the way
    /// a case-insensitive file system would see them.
    fn check_scene_files<'a>(
        &self,
        root: &Path,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<()> {
        let mut seen: HashMap<String, &str> = HashMap::new();
        for name in names {
            if let Some(first) = seen.insert(file_stem(name).to_lowercase(), name) {
                return Err(PersistError::SceneFileConflict {
                    path: self.scene_file_path(root, name),
                    first: first.to_string(),
                    second: name.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Remove scene files in `dir` whose lowercased name is not in `keep`.
    /// Failures are logged; the save itself has already succeeded.
    fn prune_scene_files(&self, dir: &Path, keep: &HashSet<String>) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Could not list {} for cleanup: {}", dir.display(), e);
                return;
            }
        };

        for path in entries.filter_map(|entry| entry.ok()).map(|entry| entry.path()) {
            let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_lowercase()) else {
                continue;
            };
            let stale = path.is_file()
                && !name.starts_with('.')
                && path
                    .extension()
                    .is_some_and(|ext| ext == self.config.scene_extension.as_str())
                && !keep.contains(&name);
            if !stale {
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) => log::info!("Removed stale scene file {}", path.display()),
                Err(e) => log::warn!("Failed to remove stale scene file {}: {}", path.display(), e),
            }
        }
    }

    fn write_scene(&self, root: &Path, scene: &SceneDescriptor) -> Result<()> {
        let path = self.scene_file_path(root, &scene.name);
        let bytes = codec::encode(scene, self.config.encoding)?;
        write_atomic(&path, &bytes)?;
        log::debug!("Saved scene '{}' to {}", scene.name, path.display());
        Ok(())
    }

    /// Load the project stored in `dir`, with every scene it lists.
    pub fn load_project(&self, dir: &Path) -> Result<Resolution<Project>> {
        let path = self.find_project_file(dir)?;
        let project: ProjectDescriptor = codec::decode(&read_file(&path)?, &path)?;

        let mut scenes = Vec::with_capacity(project.scenes.len());
        for stub in &project.scenes {
            scenes.push(self.read_scene(dir, &stub.name)?);
        }

        let tree = ProjectTree { project, scenes };
        let resolution = resolve_project(&tree, dir, &self.config.resolve_options());

        log::info!(
            "Loaded project '{}' from {} ({} scenes, {} diagnostics)",
            resolution.value.name,
            path.display(),
            resolution.value.scenes.len(),
            resolution.diagnostics.len()
        );
        for diagnostic in &resolution.diagnostics {
            log::warn!("{}: {}", path.display(), diagnostic);
        }
        Ok(resolution)
    }

    pub fn load_project_ref(&self, project: &ProjectRef) -> Result<Resolution<Project>> {
        self.load_project(&project.path)
    }

    /// Load one scene file by name, resolved against the project's current
    /// assets. The project itself is left untouched.
    pub fn load_scene(&self, project: &Project, name: &str) -> Result<Resolution<Scene>> {
        let descriptor = self.read_scene(project.root(), name)?;
        Ok(resolve_scene(
            &descriptor,
            &AssetLookup::of(project),
            &self.config.resolve_options(),
        ))
    }

    fn read_scene(&self, root: &Path, name: &str) -> Result<SceneDescriptor> {
        let path = self.scene_file_path(root, name);
        codec::decode(&read_file(&path)?, &path)
    }

    /// First file in `dir` with the project extension, by file name.
    pub fn find_project_file(&self, dir: &Path) -> Result<PathBuf> {
        let entries = fs::read_dir(dir).map_err(|e| PersistError::Io {
            operation: "read directory",
            path: dir.to_path_buf(),
            source: e,
        })?;

        let mut candidates: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .is_some_and(|ext| ext == self.config.project_extension.as_str())
            })
            .collect();
        candidates.sort();

        candidates
            .into_iter()
            .next()
            .ok_or_else(|| PersistError::ProjectFileNotFound {
                dir: dir.to_path_buf(),
                extension: self.config.project_extension.clone(),
            })
    }
}

/// Write `bytes` to `path` via a temp file in the same directory.
///
/// The temp file is synced before the rename and removed if anything fails.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = temp_path_for(path);

    let result = write_temp(&temp_path, bytes).and_then(|()| {
        fs::rename(&temp_path, path).map_err(|e| PersistError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.to_path_buf(),
            source: e,
        })
    });

    if result.is_err() && temp_path.exists() {
        if let Err(e) = fs::remove_file(&temp_path) {
            log::warn!("Failed to remove temp file {}: {}", temp_path.display(), e);
        }
    }
    result
}

fn write_temp(temp_path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(temp_path).map_err(|e| PersistError::Io {
        operation: "create",
        path: temp_path.to_path_buf(),
        source: e,
    })?;

    file.write_all(bytes).map_err(|e| PersistError::Io {
        operation: "write",
        path: temp_path.to_path_buf(),
        source: e,
    })?;

    file.sync_all().map_err(|e| PersistError::Io {
        operation: "sync",
        path: temp_path.to_path_buf(),
        source: e,
    })
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| PersistError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| PersistError::Io {
        operation: "create directory",
        path: dir.to_path_buf(),
        source: e,
    })
}

/// Make a display name usable as a file name.
fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    match stem.trim() {
        "" | "." | ".." => "_".to_string(),
        trimmed => trimmed.to_string(),
    }
}
