//! # void_core - Void Engine Core
//!
//! Zero-dependency primitives shared by the editor's domain model and its
//! persistence layer:
//! - **Typed IDs**: `Id<T>` handles and the project-scoped `IdCounter`
//! - **Tag table**: the append-only `TagRegistry` that binds wire tags to types
//! - **Errors**: registry misuse reported through `Error`
//!
//! ## Philosophy
//! A tag, once handed out, belongs to its type forever. Files written by an
//! older editor stay readable because numbers are only ever appended.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

pub mod tag_registry;
pub mod error;
pub mod id;

pub use tag_registry::*;
pub use error::*;
pub use id::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::tag_registry::{Tag, TagEntry, TagKind, TagRegistry};
    pub use crate::error::{Error, Result, TagRegistryError};
    pub use crate::id::{Id, IdCounter};
}
