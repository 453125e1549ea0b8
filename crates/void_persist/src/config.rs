//! Persistence configuration.

use std::env;
use std::path::PathBuf;

use crate::codec::Encoding;
use crate::convert::{ResolveOptions, RotationMode};

/// Overrides [`PersistConfig::registry_path`].
pub const REGISTRY_PATH_ENV: &str = "VOID_REGISTRY_PATH";
/// Overrides [`PersistConfig::encoding`] (`binary` or `json`).
pub const ENCODING_ENV: &str = "VOID_PERSIST_ENCODING";

/// Persistence configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PersistConfig {
    /// Location of the global registry file
    pub registry_path: PathBuf,
    /// Extension of the project file, without the dot
    pub project_extension: String,
    /// Extension of scene files, without the dot
    pub scene_extension: String,
    /// Scenes directory, relative to the project root
    pub scenes_dir: String,
    /// Payload encoding used when writing
    pub encoding: Encoding,
    /// How stored orientations are rebuilt on load
    pub rotation: RotationMode,
}

impl Default for PersistConfig {
    fn default() -> Self {
        Self {
            registry_path: default_registry_path()
                .unwrap_or_else(|| PathBuf::from("registry.vreg")),
            project_extension: "pro".to_string(),
            scene_extension: "scn".to_string(),
            scenes_dir: "scenes".to_string(),
            encoding: Encoding::default(),
            rotation: RotationMode::default(),
        }
    }
}

impl PersistConfig {
    /// Create config for development (registry in the working directory)
    pub fn development() -> Self {
        Self {
            registry_path: PathBuf::from("./registry.vreg"),
            ..Self::default()
        }
    }

    /// Create config for testing (uses temp directory)
    pub fn testing() -> Self {
        Self {
            registry_path: env::temp_dir().join("void_persist_test").join("registry.vreg"),
            ..Self::default()
        }
    }

    pub fn with_registry_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.registry_path = path.into();
        self
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_rotation(mut self, rotation: RotationMode) -> Self {
        self.rotation = rotation;
        self
    }

    /// Default config with environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(path) = env::var_os(REGISTRY_PATH_ENV) {
            config.registry_path = PathBuf::from(path);
        }

        if let Ok(value) = env::var(ENCODING_ENV) {
            match value.parse() {
                Ok(encoding) => config.encoding = encoding,
                Err(e) => log::warn!("Ignoring {}: {}", ENCODING_ENV, e),
            }
        }

        config
    }

    /// Options handed to the descriptor resolver.
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            rotation: self.rotation,
        }
    }
}

/// Get the default registry path.
pub fn default_registry_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut p| {
        p.push("void_editor");
        p.push("registry.vreg");
        p
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = PersistConfig::default();
        assert_eq!(config.project_extension, "pro");
        assert_eq!(config.scene_extension, "scn");
        assert_eq!(config.scenes_dir, "scenes");
        assert_eq!(config.encoding, Encoding::Json);
        assert_eq!(config.rotation, RotationMode::AxisAngleZero);
    }

    #[test]
    fn test_builders() {
        let config = PersistConfig::testing()
            .with_registry_path("/tmp/reg.vreg")
            .with_encoding(Encoding::Binary)
            .with_rotation(RotationMode::QuaternionXyz);
        assert_eq!(config.registry_path, PathBuf::from("/tmp/reg.vreg"));
        assert_eq!(config.encoding, Encoding::Binary);
        assert_eq!(config.resolve_options().rotation, RotationMode::QuaternionXyz);
    }

    #[test]
    fn test_development_writes_json() {
        assert_eq!(PersistConfig::development().encoding, Encoding::Json);
    }
}
