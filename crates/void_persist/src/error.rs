//! Persistence error types.
//!
//! Only file I/O and file-format problems are errors. Broken references inside
//! a well-formed file are reported as diagnostics on the load result instead.

use std::path::PathBuf;

use thiserror::Error;
use void_core::Tag;

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum PersistError {
    /// File I/O error.
    #[error("Failed to {operation} file: {}", .path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No project file in the project directory.
    #[error("No .{extension} project file found in {}", .dir.display())]
    ProjectFileNotFound { dir: PathBuf, extension: String },

    /// Not one of our files, or truncated.
    #[error("Invalid file format in {}: {reason}", .path.display())]
    InvalidFormat { path: PathBuf, reason: String },

    /// Written by a newer editor.
    #[error("File format version {found} is not supported (maximum: {max_supported})")]
    UnsupportedVersion {
        found: u16,
        max_supported: u16,
        path: PathBuf,
    },

    /// File holds a different record type than the caller asked for.
    #[error("Expected a {expected_name} record (tag {expected}) in {}, found tag {found} ({found_name})", .path.display())]
    TagMismatch {
        path: PathBuf,
        expected: Tag,
        expected_name: &'static str,
        found: u16,
        found_name: &'static str,
    },

    /// Two scenes of one project would be saved to the same file.
    #[error("Scenes '{first}' and '{second}' would both be saved to {}", .path.display())]
    SceneFileConflict {
        path: PathBuf,
        first: String,
        second: String,
    },

    /// Descriptor type missing from the tag table.
    #[error("Descriptor type '{0}' has no tag in the schema")]
    Unregistered(&'static str),

    /// Serialization error.
    #[error("Failed to serialize {what} record")]
    Serialization {
        what: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Deserialization error.
    #[error("Failed to deserialize {}", .path.display())]
    Deserialization {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save to {}", .target_path.display())]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistError {
    /// Whether the error means "the file is not there".
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            Self::ProjectFileNotFound { .. } => true,
            _ => false,
        }
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io { operation, path, .. } => {
                format!("Could not {} {}", operation, path.display())
            }
            Self::ProjectFileNotFound { dir, .. } => {
                format!("Could not open project: {} does not contain a project file", dir.display())
            }
            Self::InvalidFormat { path, .. } | Self::Deserialization { path, .. } => {
                format!("Could not open {}: the file is damaged or not an editor file", path.display())
            }
            Self::UnsupportedVersion { path, .. } => {
                format!(
                    "Could not open {}: it was saved by a newer editor version",
                    path.display()
                )
            }
            Self::TagMismatch { path, expected_name, .. } => {
                format!("Could not open {}: it is not a {} file", path.display(), expected_name)
            }
            Self::SceneFileConflict { first, second, .. } => {
                format!(
                    "Could not save: scenes '{}' and '{}' need different names",
                    first, second
                )
            }
            Self::Unregistered(_) | Self::Serialization { .. } => {
                "An internal error occurred while saving.".to_string()
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistError>;
