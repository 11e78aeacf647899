//! Named material store
//!
//! Holds the reflectance records parsed from MTL files, keyed by name.
//! The registry is an ordinary value: the loader fills it through a `&mut`
//! borrow and the renderer looks materials up from the same instance.

use std::collections::HashMap;

use crate::foundation::Color;

/// Longest material name kept, in characters
pub const MAX_MATERIAL_NAME_LEN: usize = 49;

/// Surface reflectance of a named material
///
/// The default has zero color channels (alpha 1.0) and zero shininess.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Material {
    /// Ambient reflectance (Ka)
    pub ambient: Color,
    /// Diffuse reflectance (Kd)
    pub diffuse: Color,
    /// Specular reflectance (Ks)
    pub specular: Color,
    /// Emission (Ke)
    pub emission: Color,
    /// Specular exponent (Ns)
    pub shininess: f32,
}

/// Material field addressed by [`MaterialRegistry::set_value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialAttribute {
    /// Ambient color
    Ambient,
    /// Diffuse color
    Diffuse,
    /// Specular color
    Specular,
    /// Emission color
    Emission,
    /// Shininess, taken from the red channel of the value
    Shininess,
}

/// Registry of materials keyed by unique name
#[derive(Debug, Clone, Default)]
pub struct MaterialRegistry {
    materials: HashMap<String, Material>,
}

impl MaterialRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `material` under `name`, replacing any previous entry
    pub fn add(&mut self, name: impl Into<String>, material: Material) {
        self.materials.insert(name.into(), material);
    }

    /// Look a material up by name
    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    /// Look a material up by name, falling back to the zero material
    pub fn get_or_default(&self, name: &str) -> Material {
        self.get(name).copied().unwrap_or_default()
    }

    /// Mutable access to a material
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Material> {
        self.materials.get_mut(name)
    }

    /// Set one field of an existing material. Unknown names are ignored.
    pub fn set_value(&mut self, name: &str, attribute: MaterialAttribute, value: Color) {
        let Some(material) = self.materials.get_mut(name) else {
            log::trace!("Ignoring {:?} for unknown material '{}'", attribute, name);
            return;
        };

        match attribute {
            MaterialAttribute::Ambient => material.ambient = value,
            MaterialAttribute::Diffuse => material.diffuse = value,
            MaterialAttribute::Specular => material.specular = value,
            MaterialAttribute::Emission => material.emission = value,
            MaterialAttribute::Shininess => material.shininess = value.r,
        }
    }

    /// Remove a material, returning it if it existed
    pub fn remove(&mut self, name: &str) -> Option<Material> {
        self.materials.remove(name)
    }

    /// Remove every material
    pub fn clear(&mut self) {
        self.materials.clear();
    }

    /// Whether `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.materials.contains_key(name)
    }

    /// Number of registered materials
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Registered names, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.materials.keys().map(String::as_str)
    }
}
