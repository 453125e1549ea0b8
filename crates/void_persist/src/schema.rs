//! The descriptor tag table.
//!
//! Every persisted file starts with the tag of its root record. The table
//! below is append-only: never renumber, reorder or reuse a row, or files that
//! are already on disk become unreadable. New descriptor types go at the end.

use std::sync::LazyLock;

use void_core::{Tag, TagRegistry};

use crate::descriptor::{
    BaseLightDescriptor, Descriptor, FogDescriptor, KeyboardLayoutDescriptor, ModelDescriptor,
    ModelInstanceDescriptor, ProjectDescriptor, ProjectRefDescriptor, RegistryDescriptor,
    SceneDescriptor, SettingsDescriptor, TerrainDescriptor, TerrainInstanceDescriptor,
    TerrainTextureDescriptor, TextureDescriptor,
};

static SCHEMA: LazyLock<TagRegistry> = LazyLock::new(|| {
    build_schema().unwrap_or_else(|e| panic!("descriptor tag table is inconsistent: {}", e))
});

/// Build the table in its fixed order.
pub fn build_schema() -> void_core::Result<TagRegistry> {
    let mut registry = TagRegistry::new();
    registry
        // built-in containers
        .register_container(0, "sequence")?
        .register_container(1, "timestamp")?
        // core records
        .register::<RegistryDescriptor>(2, RegistryDescriptor::NAME)?
        .register::<ProjectRefDescriptor>(3, ProjectRefDescriptor::NAME)?
        .register::<SettingsDescriptor>(4, SettingsDescriptor::NAME)?
        .register::<KeyboardLayoutDescriptor>(5, KeyboardLayoutDescriptor::NAME)?
        .register::<ProjectDescriptor>(6, ProjectDescriptor::NAME)?
        .register::<SceneDescriptor>(7, SceneDescriptor::NAME)?
        // building blocks
        .register::<TerrainDescriptor>(8, TerrainDescriptor::NAME)?
        .register::<ModelDescriptor>(9, ModelDescriptor::NAME)?
        .register::<TextureDescriptor>(10, TextureDescriptor::NAME)?
        .register::<FogDescriptor>(11, FogDescriptor::NAME)?
        .reserve(12, "game-object")?
        .register::<BaseLightDescriptor>(13, BaseLightDescriptor::NAME)?
        // components
        .register::<ModelInstanceDescriptor>(14, ModelInstanceDescriptor::NAME)?
        .register::<TerrainInstanceDescriptor>(15, TerrainInstanceDescriptor::NAME)?
        .register::<TerrainTextureDescriptor>(16, TerrainTextureDescriptor::NAME)?;
    Ok(registry)
}

/// The process-wide table, built on first use and read-only afterwards.
pub fn schema() -> &'static TagRegistry {
    &SCHEMA
}

/// Tag of a descriptor type, if it has one.
pub fn tag_of<T: Descriptor>() -> Option<Tag> {
    schema().tag_of::<T>()
}

/// Human-readable name for a raw tag, for error messages.
pub fn tag_name(tag: u16) -> &'static str {
    schema().entry(tag).map(|e| e.name).unwrap_or("unknown")
}
