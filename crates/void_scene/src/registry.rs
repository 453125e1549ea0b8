//! Global editor registry: known projects and editor settings.
//!
//! This is bootstrap state that lives outside any project. An empty registry
//! is a perfectly valid first-run state.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Keyboard layout used for editor shortcuts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum KeyboardLayout {
    #[default]
    Qwerty,
    Qwertz,
    Azerty,
}

impl KeyboardLayout {
    pub fn name(&self) -> &'static str {
        match self {
            KeyboardLayout::Qwerty => "QWERTY",
            KeyboardLayout::Qwertz => "QWERTZ",
            KeyboardLayout::Azerty => "AZERTY",
        }
    }
}

/// Last-used editor settings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    pub keyboard_layout: KeyboardLayout,
}

/// Where a project lives on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectRef {
    pub name: String,
    /// Project root directory
    pub path: PathBuf,
    pub last_opened: Option<SystemTime>,
}

impl ProjectRef {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            last_opened: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registry {
    pub projects: Vec<ProjectRef>,
    pub last_project: Option<ProjectRef>,
    pub settings: Settings,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_by_path(&self, path: &Path) -> Option<&ProjectRef> {
        self.projects.iter().find(|p| p.path == path)
    }

    /// Add a project, or refresh the entry with the same root path.
    pub fn remember(&mut self, project: ProjectRef) {
        match self.projects.iter_mut().find(|p| p.path == project.path) {
            Some(existing) => *existing = project,
            None => self.projects.push(project),
        }
    }

    /// Record that a project was just opened.
    pub fn mark_opened(&mut self, project: ProjectRef, at: SystemTime) {
        let mut project = project;
        project.last_opened = Some(at);
        self.last_project = Some(project.clone());
        self.remember(project);
    }

    /// Drop a project from the list. Returns `true` if it was known.
    pub fn forget(&mut self, path: &Path) -> bool {
        let before = self.projects.len();
        self.projects.retain(|p| p.path != path);
        if self.last_project.as_ref().is_some_and(|p| p.path == path) {
            self.last_project = None;
        }
        self.projects.len() != before
    }
}
