//! Shared project assets and the ID-keyed arena that owns them.

use std::collections::HashMap;

use void_core::Id;

/// Model asset ID.
pub type ModelId = Id<Model>;
/// Terrain asset ID.
pub type TerrainId = Id<Terrain>;
/// Texture asset ID.
pub type TextureId = Id<Texture>;

/// Anything stored in an [`Assets`] arena.
pub trait Asset: Sized {
    fn id(&self) -> Id<Self>;
    fn name(&self) -> &str;
}

/// An imported mesh, placed into scenes through `ModelInstance`s.
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    pub id: ModelId,
    pub name: String,
    /// Mesh file, relative to the project root
    pub mesh_path: String,
    /// Diffuse texture file, if the mesh has one
    pub texture_path: Option<String>,
}

impl Model {
    pub fn new(id: ModelId, name: impl Into<String>, mesh_path: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            mesh_path: mesh_path.into(),
            texture_path: None,
        }
    }
}

impl Asset for Model {
    fn id(&self) -> ModelId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Texture painted onto a terrain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerrainTexture {
    pub base_texture: TextureId,
}

/// A heightmap terrain.
#[derive(Clone, Debug, PartialEq)]
pub struct Terrain {
    pub id: TerrainId,
    pub name: String,
    /// Heightmap file, relative to the project root
    pub heightmap_path: String,
    pub width: u32,
    pub depth: u32,
    pub vertex_resolution: u32,
    pub texture: Option<TerrainTexture>,
}

impl Terrain {
    pub fn new(id: TerrainId, name: impl Into<String>, vertex_resolution: u32) -> Self {
        Self {
            id,
            name: name.into(),
            heightmap_path: String::new(),
            width: 1200,
            depth: 1200,
            vertex_resolution,
            texture: None,
        }
    }
}

impl Asset for Terrain {
    fn id(&self) -> TerrainId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// An image file imported into the project.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub id: TextureId,
    pub name: String,
    pub path: String,
}

impl Texture {
    pub fn new(id: TextureId, name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            path: path.into(),
        }
    }
}

impl Asset for Texture {
    fn id(&self) -> TextureId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Insertion-ordered arena of assets, unique by ID.
#[derive(Clone, Debug, PartialEq)]
pub struct Assets<T: Asset> {
    items: Vec<T>,
    index: HashMap<Id<T>, usize>,
}

impl<T: Asset> Default for Assets<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Asset> Assets<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add an asset. A duplicate ID is handed back untouched.
    pub fn insert(&mut self, asset: T) -> Result<Id<T>, T> {
        let id = asset.id();
        if self.index.contains_key(&id) {
            return Err(asset);
        }
        self.index.insert(id, self.items.len());
        self.items.push(asset);
        Ok(id)
    }

    pub fn get(&self, id: Id<T>) -> Option<&T> {
        self.index.get(&id).map(|&i| &self.items[i])
    }

    pub fn get_mut(&mut self, id: Id<T>) -> Option<&mut T> {
        match self.index.get(&id) {
            Some(&i) => Some(&mut self.items[i]),
            None => None,
        }
    }

    pub fn contains(&self, id: Id<T>) -> bool {
        self.index.contains_key(&id)
    }

    /// Remove an asset, keeping the order of the rest.
    pub fn remove(&mut self, id: Id<T>) -> Option<T> {
        let position = self.index.remove(&id)?;
        let removed = self.items.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    /// First asset with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<&T> {
        self.items.iter().find(|a| a.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = Id<T>> + '_ {
        self.items.iter().map(|a| a.id())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a, T: Asset> IntoIterator for &'a Assets<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
