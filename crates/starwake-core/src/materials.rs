//! Surface materials and the contact parameters between them.
//!
//! Every shape carries a `MaterialId`. When two shapes touch, the
//! contact solver asks the library for the `ContactMaterial` of that
//! pair and falls back to `_defaultContact` when none was registered.

use serde::{Deserialize, Serialize};

/// Name of the material every shape gets unless told otherwise.
pub const DEFAULT_MATERIAL: &str = "_default";

/// Name of the fallback contact material.
pub const DEFAULT_CONTACT: &str = "_defaultContact";

/// Handle to a registered material.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialId(pub u32);

/// A named surface material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: MaterialId,
    pub name: String,
}

/// How two materials behave when they touch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMaterial {
    pub name: String,
    pub a: MaterialId,
    pub b: MaterialId,
    /// Coulomb friction coefficient.
    pub friction: f64,
    /// Bounciness, 0 = perfectly inelastic, 1 = perfectly elastic.
    pub restitution: f64,
}

impl ContactMaterial {
    fn matches(&self, a: MaterialId, b: MaterialId) -> bool {
        (self.a == a && self.b == b) || (self.a == b && self.b == a)
    }
}

/// Registry of materials and contact materials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialLibrary {
    materials: Vec<Material>,
    contacts: Vec<ContactMaterial>,
    default_contact: ContactMaterial,
}

impl Default for MaterialLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialLibrary {
    /// Library containing `_default` and `_defaultContact`.
    pub fn new() -> Self {
        let default = Material {
            id: MaterialId(0),
            name: DEFAULT_MATERIAL.to_string(),
        };
        Self {
            default_contact: ContactMaterial {
                name: DEFAULT_CONTACT.to_string(),
                a: default.id,
                b: default.id,
                friction: 0.3,
                restitution: 0.4,
            },
            materials: vec![default],
            contacts: Vec::new(),
        }
    }

    /// The `_default` material.
    pub fn default_material(&self) -> MaterialId {
        MaterialId(0)
    }

    /// Register a material by name, returning the existing id if already known.
    pub fn register(&mut self, name: &str) -> MaterialId {
        if let Some(id) = self.get(name) {
            return id;
        }
        let id = MaterialId(self.materials.len() as u32);
        self.materials.push(Material {
            id,
            name: name.to_string(),
        });
        id
    }

    /// Look up a material by name.
    pub fn get(&self, name: &str) -> Option<MaterialId> {
        self.materials.iter().find(|m| m.name == name).map(|m| m.id)
    }

    /// Name of a material, if registered.
    pub fn name_of(&self, id: MaterialId) -> Option<&str> {
        self.materials
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.name.as_str())
    }

    /// Register (or replace) the contact behaviour for a material pair.
    pub fn add_contact(&mut self, contact: ContactMaterial) {
        self.contacts.retain(|c| !c.matches(contact.a, contact.b));
        self.contacts.push(contact);
    }

    /// Replace the fallback contact material.
    pub fn set_default_contact(&mut self, friction: f64, restitution: f64) {
        self.default_contact.friction = friction;
        self.default_contact.restitution = restitution;
    }

    /// The fallback contact material.
    pub fn default_contact(&self) -> &ContactMaterial {
        &self.default_contact
    }

    /// Contact material for a pair, order-independent.
    pub fn contact_for(&self, a: MaterialId, b: MaterialId) -> &ContactMaterial {
        self.contacts
            .iter()
            .find(|c| c.matches(a, b))
            .unwrap_or(&self.default_contact)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
