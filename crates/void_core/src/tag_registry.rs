//! Append-only tag table for wire types
//!
//! Every type that can appear at the root of a persisted file is bound to a
//! small permanent integer. The table only grows at the end: a tag is never
//! renumbered or handed to a different type, which is what lets files from
//! older releases load against a newer schema.

use core::any::TypeId;
use core::fmt;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::error::{Result, TagRegistryError};

/// A permanent wire tag
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(pub u16);

impl Tag {
    /// Raw value as written into file headers
    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self.0)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a tag is bound to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagKind {
    /// Built-in container (sequence, timestamp)
    Container,
    /// A concrete Rust type
    Descriptor(TypeId),
    /// Claimed number with no type in this schema version
    Reserved,
}

/// One row of the tag table
#[derive(Clone, Debug)]
pub struct TagEntry {
    pub tag: Tag,
    pub name: &'static str,
    pub kind: TagKind,
}

/// Central tag table
pub struct TagRegistry {
    /// Rows in tag order; index == tag value
    entries: Vec<TagEntry>,
    by_type: BTreeMap<TypeId, Tag>,
    by_name: BTreeMap<&'static str, Tag>,
}

impl TagRegistry {
    /// Create a new empty table
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            by_type: BTreeMap::new(),
            by_name: BTreeMap::new(),
        }
    }

    /// Bind the next tag to type `T`
    pub fn register<T: 'static>(&mut self, tag: u16, name: &'static str) -> Result<&mut Self> {
        let type_id = TypeId::of::<T>();
        if let Some(existing) = self.by_type.get(&type_id) {
            return Err(TagRegistryError::TypeAlreadyRegistered {
                name: name.into(),
                existing: existing.value(),
            }
            .into());
        }
        self.push(tag, name, TagKind::Descriptor(type_id))?;
        self.by_type.insert(type_id, Tag(tag));
        Ok(self)
    }

    /// Bind the next tag to a built-in container
    pub fn register_container(&mut self, tag: u16, name: &'static str) -> Result<&mut Self> {
        self.push(tag, name, TagKind::Container)?;
        Ok(self)
    }

    /// Claim the next tag without binding a type
    pub fn reserve(&mut self, tag: u16, name: &'static str) -> Result<&mut Self> {
        self.push(tag, name, TagKind::Reserved)?;
        Ok(self)
    }

    fn push(&mut self, tag: u16, name: &'static str, kind: TagKind) -> Result<()> {
        let expected = self.next_tag();
        if tag != expected {
            return Err(TagRegistryError::OutOfOrder {
                name: name.into(),
                expected,
                found: tag,
            }
            .into());
        }
        if self.by_name.contains_key(name) {
            return Err(TagRegistryError::NameTaken(name.into()).into());
        }
        self.entries.push(TagEntry { tag: Tag(tag), name, kind });
        self.by_name.insert(name, Tag(tag));
        Ok(())
    }

    /// The only tag value the table will accept next
    pub fn next_tag(&self) -> u16 {
        self.entries.len() as u16
    }

    /// Tag bound to type `T`
    pub fn tag_of<T: 'static>(&self) -> Option<Tag> {
        self.by_type.get(&TypeId::of::<T>()).copied()
    }

    /// Tag registered under `name`
    pub fn tag_by_name(&self, name: &str) -> Option<Tag> {
        self.by_name.get(name).copied()
    }

    /// Row for a raw tag value
    pub fn entry(&self, tag: u16) -> Option<&TagEntry> {
        self.entries.get(tag as usize)
    }

    /// Iterate rows in tag order
    pub fn iter(&self) -> impl Iterator<Item = &TagEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagRegistry")
            .field("tags", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    struct Scene;
    struct Fog;

    #[test]
    fn test_register_in_order() {
        let mut registry = TagRegistry::new();
        registry
            .register_container(0, "sequence")
            .unwrap()
            .register::<Scene>(1, "scene")
            .unwrap()
            .reserve(2, "game-object")
            .unwrap();

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.tag_of::<Scene>(), Some(Tag(1)));
        assert_eq!(registry.tag_by_name("game-object"), Some(Tag(2)));
        assert_eq!(registry.entry(2).unwrap().kind, TagKind::Reserved);
        assert_eq!(registry.tag_of::<Fog>(), None);
    }

    #[test]
    fn test_gap_is_rejected() {
        let mut registry = TagRegistry::new();
        let err = registry.register::<Scene>(1, "scene").unwrap_err();
        match err {
            Error::TagRegistry(TagRegistryError::OutOfOrder { expected, found, .. }) => {
                assert_eq!(expected, 0);
                assert_eq!(found, 1);
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_type_cannot_take_two_tags() {
        let mut registry = TagRegistry::new();
        registry.register::<Scene>(0, "scene").unwrap();
        assert!(registry.register::<Scene>(1, "scene-again").is_err());
        assert_eq!(registry.next_tag(), 1);
    }

    #[test]
    fn test_name_cannot_be_reused() {
        let mut registry = TagRegistry::new();
        registry.register::<Scene>(0, "scene").unwrap();
        assert!(registry.register::<Fog>(1, "scene").is_err());
    }
}
