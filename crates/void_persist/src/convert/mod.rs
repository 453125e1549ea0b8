//! Domain ⇄ descriptor conversion.
//!
//! Flattening walks the live project graph and emits plain descriptors with
//! integer foreign keys. It cannot fail.
//!
//! Resolving goes the other way in two passes: assets first, then scenes,
//! whose instances look their model or terrain up by ID. Dangling references
//! are not errors. The offending instance is skipped, the problem is logged
//! and recorded as a [`Diagnostic`] on the returned [`Resolution`], and the
//! rest of the project loads normally.

mod flatten;
mod resolve;

use std::fmt;

pub use flatten::{
    flatten_base_light, flatten_fog, flatten_model, flatten_model_instance, flatten_project,
    flatten_project_ref, flatten_registry, flatten_rotation, flatten_scene, flatten_terrain,
    flatten_terrain_instance, flatten_texture,
};
pub use resolve::{
    resolve_base_light, resolve_fog, resolve_model, resolve_model_instance, resolve_project,
    resolve_project_ref, resolve_registry, resolve_rotation, resolve_scene, resolve_terrain,
    resolve_terrain_instance, resolve_texture, AssetLookup,
};

/// How a stored orientation is turned back into a quaternion.
///
/// Files only keep the x, y and z components of the orientation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RotationMode {
    /// Treat the stored components as a rotation axis with a zero angle.
    /// Every instance loads with the identity orientation; this is how the
    /// editor has always read these files.
    #[default]
    AxisAngleZero,
    /// Treat the stored components as the vector part of a unit quaternion
    /// with `w >= 0` and rebuild `w`. Round-trips any orientation.
    QuaternionXyz,
}

/// Knobs for descriptor resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    pub rotation: RotationMode,
}

/// A non-fatal integrity problem found while resolving.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// A model instance names a model the project does not have.
    DanglingModel {
        scene: u64,
        scene_name: String,
        instance: u64,
        model: u64,
    },
    /// A terrain instance names a terrain the project does not have.
    DanglingTerrain {
        scene: u64,
        scene_name: String,
        instance: u64,
        terrain: u64,
    },
    /// A terrain's base texture is unknown. The terrain loads untextured.
    DanglingTexture { terrain: u64, texture: u64 },
    /// Two records of the same kind share an ID. The first one wins.
    DuplicateId { kind: &'static str, id: u64 },
    /// The stored current scene does not exist.
    CurrentSceneFallback {
        requested: u64,
        fallback: Option<u64>,
    },
    /// The project file lists a scene that was not loaded.
    MissingScene { id: u64, name: String },
    /// The stored next-available ID was not above every ID in use.
    IdCounterRaised { stored: u64, raised_to: u64 },
    /// An ID so large that the counter cannot move past it.
    IdOutOfRange { id: u64 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingModel {
                scene,
                scene_name,
                instance,
                model,
            } => write!(
                f,
                "model instance {} in scene '{}' ({}) references missing model {}",
                instance, scene_name, scene, model
            ),
            Self::DanglingTerrain {
                scene,
                scene_name,
                instance,
                terrain,
            } => write!(
                f,
                "terrain instance {} in scene '{}' ({}) references missing terrain {}",
                instance, scene_name, scene, terrain
            ),
            Self::DanglingTexture { terrain, texture } => write!(
                f,
                "terrain {} references missing texture {}; texture dropped",
                terrain, texture
            ),
            Self::DuplicateId { kind, id } => {
                write!(f, "duplicate {} id {}; later record ignored", kind, id)
            }
            Self::CurrentSceneFallback {
                requested,
                fallback: Some(fallback),
            } => write!(
                f,
                "current scene {} not found; using scene {}",
                requested, fallback
            ),
            Self::CurrentSceneFallback {
                requested,
                fallback: None,
            } => write!(f, "current scene {} not found; project has no scenes", requested),
            Self::MissingScene { id, name } => {
                write!(f, "scene '{}' ({}) is listed but was not loaded", name, id)
            }
            Self::IdCounterRaised { stored, raised_to } => write!(
                f,
                "next available id {} already in use; raised to {}",
                stored, raised_to
            ),
            Self::IdOutOfRange { id } => {
                write!(f, "id {} is out of range; new ids may collide", id)
            }
        }
    }
}

/// A resolved value plus everything that had to be skipped or repaired.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Resolution<T> {
    pub fn new(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        Self { value, diagnostics }
    }

    /// No integrity problems were found.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_parts(self) -> (T, Vec<Diagnostic>) {
        (self.value, self.diagnostics)
    }
}
