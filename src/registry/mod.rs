//! Type registry - the ordered set of primitive types to specialize for
//!
//! A registry is an explicit value. It is built once, validated up front, and
//! handed to the orchestrator; nothing reads it from global state.

pub mod errors;
pub mod types;

pub use errors::*;
pub use types::*;

use std::collections::HashSet;

/// Validated, ordered list of [`TypeConfig`] records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRegistry {
    types: Vec<TypeConfig>,
}

impl TypeRegistry {
    /// Build a registry, rejecting duplicate names and empty literals
    pub fn new(types: Vec<TypeConfig>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for config in &types {
            if let Some(&field) = config.empty_fields().first() {
                return Err(ConfigError::EmptyField {
                    type_name: config.canonical_name.clone(),
                    field,
                });
            }
            if !seen.insert(config.canonical_name.as_str()) {
                return Err(ConfigError::DuplicateType(config.canonical_name.clone()));
            }
        }
        Ok(Self { types })
    }

    /// The built-in primitive set
    pub fn primitives() -> Self {
        Self {
            types: vec![
                TypeConfig::new("Boolean", "boolean", "false", "false", false, false),
                TypeConfig::new("Byte", "byte", "0", "0", true, true),
                TypeConfig::new("Short", "short", "0", "0", true, true),
                // Char is ordered but arithmetic on it is not meaningful
                TypeConfig::new("Char", "char", "0.toChar()", "0.toChar()", false, true),
                TypeConfig::new("Int", "int", "0", "0", true, true),
                TypeConfig::new("Long", "long", "0L", "0L", true, true),
                TypeConfig::new("Double", "double", "0.0", "0.0", true, true),
            ],
        }
    }

    pub fn get(&self, canonical_name: &str) -> Option<&TypeConfig> {
        self.types
            .iter()
            .find(|config| config.canonical_name == canonical_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeConfig> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::primitives()
    }
}

impl<'a> IntoIterator for &'a TypeRegistry {
    type Item = &'a TypeConfig;
    type IntoIter = std::slice::Iter<'a, TypeConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.iter()
    }
}
