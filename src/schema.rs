//! Entity schema registry
//!
//! Immutable name-to-metadata map built once from the client's data model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ParanoidError, Result};
use crate::types::{EntityMetadata, FieldMetadata};

/// Data model document as produced by the metadata generator
///
/// `models` is optional so that an absent list is reported as
/// [`ParanoidError::MissingMetadata`] rather than a parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<EntityMetadata>>,
}

/// Read-only registry of every model known to the client
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    entities: BTreeMap<String, EntityMetadata>,
}

impl EntityRegistry {
    /// Build a registry from a list of models
    ///
    /// Fails when two models share a name.
    pub fn new(models: Vec<EntityMetadata>) -> Result<Self> {
        let mut entities = BTreeMap::new();
        for model in models {
            if entities.contains_key(&model.name) {
                return Err(ParanoidError::DuplicateModel(model.name));
            }
            entities.insert(model.name.clone(), model);
        }
        Ok(Self { entities })
    }

    /// Build a registry from a metadata document
    pub fn from_metadata(metadata: SchemaMetadata) -> Result<Self> {
        let models = metadata.models.ok_or_else(|| {
            ParanoidError::missing_metadata(
                "data model has no `models` list; generate metadata from the client schema",
            )
        })?;
        Self::new(models)
    }

    /// Parse a metadata document from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let metadata: SchemaMetadata = serde_json::from_str(json)?;
        Self::from_metadata(metadata)
    }

    /// Parse a metadata document from an already-decoded JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        if value.is_null() {
            return Err(ParanoidError::missing_metadata("data model is null"));
        }
        let metadata: SchemaMetadata = serde_json::from_value(value)?;
        Self::from_metadata(metadata)
    }

    pub fn get(&self, name: &str) -> Option<&EntityMetadata> {
        self.entities.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    /// Model a relation field points at, if it is registered
    pub fn related(&self, field: &FieldMetadata) -> Option<&EntityMetadata> {
        self.entities.get(&field.field_type)
    }

    /// All models in name order
    pub fn iter(&self) -> impl Iterator<Item = &EntityMetadata> {
        self.entities.values()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
