//! Error types for the core library

use core::fmt;
use alloc::boxed::Box;

/// The core error type
#[derive(Debug, Clone)]
pub enum Error {
    /// Tag table misuse
    TagRegistry(TagRegistryError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TagRegistry(e) => write!(f, "Tag registry error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias
pub type Result<T> = core::result::Result<T, Error>;

/// Tag table errors
///
/// These describe schema mistakes made by whoever edited the table. They are
/// never produced by reading a file.
#[derive(Debug, Clone)]
pub enum TagRegistryError {
    /// Tag is not the next free number
    OutOfOrder { name: Box<str>, expected: u16, found: u16 },
    /// Type already owns a tag
    TypeAlreadyRegistered { name: Box<str>, existing: u16 },
    /// Name already used by another tag
    NameTaken(Box<str>),
}

impl fmt::Display for TagRegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagRegistryError::OutOfOrder { name, expected, found } => {
                write!(f, "Tag {} for '{}' is out of order, next free tag is {}", found, name, expected)
            }
            TagRegistryError::TypeAlreadyRegistered { name, existing } => {
                write!(f, "Type for '{}' already owns tag {}", name, existing)
            }
            TagRegistryError::NameTaken(name) => write!(f, "Tag name already taken: {}", name),
        }
    }
}

impl From<TagRegistryError> for Error {
    fn from(e: TagRegistryError) -> Self {
        Error::TagRegistry(e)
    }
}

