//! # void_persist - Project Persistence
//!
//! Saves and loads editor projects through flat descriptor records:
//!
//! ```text
//! Project graph ──flatten──► ProjectTree ──encode──► <root>/<name>.pro
//!                                 │                  <root>/scenes/<scene>.scn
//! Project graph ◄──resolve── ProjectTree ◄──decode──┘
//! ```
//!
//! - [`descriptor`]: plain serde records with integer foreign keys
//! - [`schema`]: the permanent tag number of each record type
//! - [`convert`]: domain ⇄ descriptor conversion with integrity diagnostics
//! - [`codec`]: file envelope (magic, version, encoding, root tag)
//! - [`manager`]: registry, project and scene files with atomic writes
//!
//! ## Example
//!
//! ```ignore
//! use void_persist::{PersistConfig, PersistenceManager};
//!
//! let manager = PersistenceManager::new(PersistConfig::from_env());
//! let mut registry = manager.load_registry();
//! let loaded = manager.load_project(path)?;
//! for problem in &loaded.diagnostics {
//!     eprintln!("{}", problem);
//! }
//! ```

pub mod codec;
pub mod config;
pub mod convert;
pub mod descriptor;
pub mod error;
pub mod manager;
pub mod schema;

pub use codec::{Encoding, FORMAT_VERSION, MAGIC};
pub use config::PersistConfig;
pub use convert::{Diagnostic, Resolution, ResolveOptions, RotationMode};
pub use descriptor::{Descriptor, ProjectTree};
pub use error::{PersistError, Result};
pub use manager::PersistenceManager;
