//! Core type definitions for schema metadata
//!
//! Includes field kinds, field metadata, unique indexes and entity metadata,
//! deserializable from the client's introspected data model.

use serde::{Deserialize, Serialize};

// ============================================================================
// Field Metadata
// ============================================================================

/// Kind of a model field
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Primitive value (String, Int, DateTime, ...)
    #[default]
    Scalar,

    /// Relation to another model
    Object,

    /// Enum value
    Enum,

    /// Type the client cannot represent
    Unsupported,
}

/// Field definition of a model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldMetadata {
    /// Field name as used in filter trees
    pub name: String,

    /// Scalar type tag, or the related model's name for relations
    #[serde(rename = "type")]
    pub field_type: String,

    #[serde(default)]
    pub kind: FieldKind,

    /// Whether the field holds many values (to-many relation)
    #[serde(default)]
    pub is_list: bool,

    #[serde(default)]
    pub is_id: bool,

    #[serde(default)]
    pub is_required: bool,

    #[serde(default)]
    pub is_unique: bool,
}

impl FieldMetadata {
    /// Create a scalar field with the given type tag
    pub fn scalar(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            kind: FieldKind::Scalar,
            is_list: false,
            is_id: false,
            is_required: false,
            is_unique: false,
        }
    }

    /// Create a singular relation to `model`
    pub fn relation(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::Object,
            ..Self::scalar(name, model)
        }
    }

    /// Create a to-many relation to `model`
    pub fn list_relation(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self::relation(name, model).list()
    }

    /// Mark the field as a list
    pub fn list(mut self) -> Self {
        self.is_list = true;
        self
    }

    /// Mark the field as the model's identifier (implies required and unique)
    pub fn id(mut self) -> Self {
        self.is_id = true;
        self.is_required = true;
        self.is_unique = true;
        self
    }

    /// Mark the field as unique
    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }
}

/// Unique index spanning one or more fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UniqueIndex {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Fields covered by the index
    pub fields: Vec<String>,
}

impl UniqueIndex {
    pub fn new(fields: Vec<String>) -> Self {
        Self { name: None, fields }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

// ============================================================================
// Entity Metadata
// ============================================================================

/// Model definition: name, fields and unique indexes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntityMetadata {
    pub name: String,

    pub fields: Vec<FieldMetadata>,

    #[serde(default)]
    pub unique_indexes: Vec<UniqueIndex>,
}

impl EntityMetadata {
    pub fn new(name: impl Into<String>, fields: Vec<FieldMetadata>) -> Self {
        Self {
            name: name.into(),
            fields,
            unique_indexes: Vec::new(),
        }
    }

    pub fn with_unique_indexes(mut self, unique_indexes: Vec<UniqueIndex>) -> Self {
        self.unique_indexes = unique_indexes;
        self
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldMetadata> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// The identifier field, if the model declares one
    pub fn id_field(&self) -> Option<&FieldMetadata> {
        self.fields.iter().find(|f| f.is_id)
    }

    /// Whether `field` is covered by at least one unique index
    pub fn is_in_unique_index(&self, field: &str) -> bool {
        self.unique_indexes
            .iter()
            .any(|idx| idx.fields.iter().any(|f| f == field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // FieldMetadata Tests
    // =========================================================================

    #[test]
    fn test_scalar_field_defaults() {
        let field = FieldMetadata::scalar("email", "String");
        assert_eq!(field.name, "email");
        assert_eq!(field.field_type, "String");
        assert_eq!(field.kind, FieldKind::Scalar);
        assert!(!field.is_list);
        assert!(!field.is_id);
    }

    #[test]
    fn test_relation_builders() {
        let farm = FieldMetadata::relation("farm", "Farm");
        assert_eq!(farm.kind, FieldKind::Object);
        assert!(!farm.is_list);

        let photos = FieldMetadata::list_relation("farmPhotos", "FarmPhoto");
        assert_eq!(photos.kind, FieldKind::Object);
        assert!(photos.is_list);
        assert_eq!(photos.field_type, "FarmPhoto");
    }

    #[test]
    fn test_id_implies_required_and_unique() {
        let field = FieldMetadata::scalar("id", "Int").id();
        assert!(field.is_id);
        assert!(field.is_required);
        assert!(field.is_unique);
    }

    #[test]
    fn test_field_deserialization_from_dmmf() {
        let json = r#"{
            "name": "userRoles",
            "kind": "object",
            "isList": true,
            "isRequired": true,
            "isUnique": false,
            "isId": false,
            "isReadOnly": false,
            "hasDefaultValue": false,
            "type": "UserRole",
            "relationName": "UserToUserRole"
        }"#;
        let field: FieldMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(field.name, "userRoles");
        assert_eq!(field.field_type, "UserRole");
        assert_eq!(field.kind, FieldKind::Object);
        assert!(field.is_list);
        assert!(field.is_required);
    }

    #[test]
    fn test_field_deserialization_defaults_missing_flags() {
        let json = r#"{"name":"deletedAt","type":"DateTime"}"#;
        let field: FieldMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(field.kind, FieldKind::Scalar);
        assert!(!field.is_list);
        assert!(!field.is_id);
        assert!(!field.is_required);
        assert!(!field.is_unique);
    }

    #[test]
    fn test_field_serialization_uses_camel_case() {
        let json = serde_json::to_string(&FieldMetadata::scalar("id", "Int").id()).unwrap();
        assert!(json.contains("\"isId\":true"));
        assert!(json.contains("\"type\":\"Int\""));
        assert!(json.contains("\"kind\":\"scalar\""));
    }

    // =========================================================================
    // EntityMetadata Tests
    // =========================================================================

    #[test]
    fn test_entity_field_lookup() {
        let entity = EntityMetadata::new(
            "User",
            vec![
                FieldMetadata::scalar("id", "Int").id(),
                FieldMetadata::scalar("deletedAt", "DateTime"),
            ],
        );
        assert!(entity.has_field("deletedAt"));
        assert!(!entity.has_field("archivedAt"));
        assert_eq!(entity.id_field().map(|f| f.name.as_str()), Some("id"));
    }

    #[test]
    fn test_entity_without_id() {
        let entity = EntityMetadata::new("Log", vec![FieldMetadata::scalar("message", "String")]);
        assert!(entity.id_field().is_none());
    }

    #[test]
    fn test_is_in_unique_index() {
        let entity = EntityMetadata::new("User", vec![FieldMetadata::scalar("id", "Int").id()])
            .with_unique_indexes(vec![
                UniqueIndex::new(vec!["id".to_string(), "deletedAt".to_string()])
                    .named("User_id_deletedAt_key"),
            ]);
        assert!(entity.is_in_unique_index("deletedAt"));
        assert!(!entity.is_in_unique_index("email"));
    }

    #[test]
    fn test_entity_deserialization_without_unique_indexes() {
        let json = r#"{"name":"Post","fields":[{"name":"id","type":"String","isId":true}]}"#;
        let entity: EntityMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(entity.name, "Post");
        assert!(entity.unique_indexes.is_empty());
        assert!(entity.fields[0].is_id);
    }
}
