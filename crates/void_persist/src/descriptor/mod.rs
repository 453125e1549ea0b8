//! Flat, wire-shaped records mirroring the domain model.
//!
//! Descriptors hold primitives and integer foreign keys only. Containment is
//! expressed through ordered `Vec`s; no descriptor ever points at another.
//! They live for the duration of one save or load and are then dropped.
//!
//! Fields added after the first release carry `#[serde(default)]` so that
//! JSON files written before the field existed keep loading. Binary files do
//! not get this; see [`crate::codec`].

mod project;
mod registry;
mod scene;

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use void_core::Tag;

pub use project::{
    ModelDescriptor, ProjectDescriptor, SceneStubDescriptor, TerrainDescriptor,
    TerrainTextureDescriptor, TextureDescriptor,
};
pub use registry::{KeyboardLayoutDescriptor, ProjectRefDescriptor, RegistryDescriptor, SettingsDescriptor};
pub use scene::{
    BaseLightDescriptor, FogDescriptor, ModelInstanceDescriptor, SceneDescriptor,
    TerrainInstanceDescriptor,
};

/// A record type that can sit at the root of a persisted file.
///
/// The wire tag is looked up in [`crate::schema`]; `NAME` is the schema name
/// the type was registered under.
pub trait Descriptor: Serialize + DeserializeOwned + 'static {
    const NAME: &'static str;

    /// Wire tag of this record type.
    fn tag() -> crate::Result<Tag> {
        crate::schema::tag_of::<Self>().ok_or(crate::PersistError::Unregistered(Self::NAME))
    }
}

/// Milliseconds since the Unix epoch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    pub millis: u64,
}

impl Timestamp {
    pub fn now() -> Self {
        Self::from_system_time(SystemTime::now())
    }

    /// Times before the epoch clamp to zero.
    pub fn from_system_time(time: SystemTime) -> Self {
        let millis = time
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self { millis }
    }

    pub fn to_system_time(self) -> SystemTime {
        UNIX_EPOCH + Duration::from_millis(self.millis)
    }
}

/// Full descriptor tree of a project for one save or load.
///
/// The project descriptor only stubs its scenes; the scene bodies travel next
/// to it because each one is written to its own file.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectTree {
    pub project: ProjectDescriptor,
    pub scenes: Vec<SceneDescriptor>,
}

impl ProjectTree {
    /// Largest ID used anywhere in the tree, stubs included.
    pub fn max_id(&self) -> u64 {
        let project = &self.project;
        let assets = project
            .models
            .iter()
            .map(|m| m.id)
            .chain(project.terrains.iter().map(|t| t.id))
            .chain(project.textures.iter().map(|t| t.id))
            .chain(project.scenes.iter().map(|s| s.id));
        let scenes = self.scenes.iter().flat_map(|s| {
            std::iter::once(s.id)
                .chain(s.models.iter().map(|i| i.id))
                .chain(s.terrains.iter().map(|i| i.id))
        });
        std::iter::once(project.id).chain(assets).chain(scenes).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_system_time_roundtrip() {
        let ts = Timestamp { millis: 1_450_000_000_123 };
        assert_eq!(Timestamp::from_system_time(ts.to_system_time()), ts);
    }

    #[test]
    fn test_timestamp_before_epoch_clamps() {
        let before = UNIX_EPOCH - Duration::from_secs(10);
        assert_eq!(Timestamp::from_system_time(before).millis, 0);
    }
}
