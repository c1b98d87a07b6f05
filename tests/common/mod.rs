//! Shared fixture schema for integration tests
//!
//! Mirrors a small farm-management data model: users with roles and
//! permissions, bovines on farms, plus a few models that exercise
//! non-default soft-delete settings.

#![allow(dead_code)]

use paranoid_query::{
    AugmentationContext, EntityMetadata, EntityRegistry, FieldMetadata, SoftDeleteOptions,
    UniqueIndex,
};
use serde_json::{Map, Value};

fn id() -> FieldMetadata {
    FieldMetadata::scalar("id", "Int").id()
}

fn deleted_at() -> FieldMetadata {
    FieldMetadata::scalar("deletedAt", "DateTime")
}

pub fn models() -> Vec<EntityMetadata> {
    vec![
        EntityMetadata::new(
            "User",
            vec![
                id(),
                FieldMetadata::scalar("email", "String").unique(),
                FieldMetadata::scalar("lastName", "String"),
                deleted_at(),
                FieldMetadata::list_relation("userRoles", "UserRole"),
                FieldMetadata::list_relation("auditLogs", "AuditLog"),
            ],
        ),
        EntityMetadata::new(
            "UserRole",
            vec![
                id(),
                FieldMetadata::scalar("roleId", "Int"),
                FieldMetadata::scalar("userId", "Int"),
                deleted_at(),
                FieldMetadata::relation("user", "User"),
                FieldMetadata::relation("role", "Role"),
                FieldMetadata::list_relation("userRolePermissions", "UserRolePermission"),
            ],
        ),
        EntityMetadata::new(
            "UserRolePermission",
            vec![
                id(),
                deleted_at(),
                FieldMetadata::relation("userRole", "UserRole"),
                FieldMetadata::relation("permission", "Permission"),
            ],
        ),
        EntityMetadata::new(
            "Permission",
            vec![id(), FieldMetadata::scalar("name", "String"), deleted_at()],
        ),
        EntityMetadata::new("Role", vec![id(), FieldMetadata::scalar("name", "String")]),
        EntityMetadata::new(
            "Bovine",
            vec![
                id(),
                deleted_at(),
                FieldMetadata::relation("farm", "Farm"),
                FieldMetadata::relation("animalGender", "AnimalGender"),
                FieldMetadata::list_relation("bovinePurposes", "BovinePurpose"),
            ],
        ),
        EntityMetadata::new(
            "Farm",
            vec![
                id(),
                deleted_at(),
                FieldMetadata::list_relation("bovines", "Bovine"),
                FieldMetadata::list_relation("farmPhotos", "FarmPhoto"),
            ],
        ),
        EntityMetadata::new(
            "FarmPhoto",
            vec![id(), deleted_at(), FieldMetadata::relation("farm", "Farm")],
        ),
        EntityMetadata::new(
            "BovinePurpose",
            vec![
                id(),
                FieldMetadata::scalar("bovineId", "Int"),
                deleted_at(),
                FieldMetadata::relation("bovine", "Bovine"),
                FieldMetadata::relation("bovinePurposeType", "BovinePurposeType"),
            ],
        ),
        EntityMetadata::new("BovinePurposeType", vec![id(), deleted_at()]),
        EntityMetadata::new(
            "AnimalGender",
            vec![id(), FieldMetadata::scalar("code", "String"), deleted_at()],
        ),
        EntityMetadata::new(
            "AuditLog",
            vec![id(), FieldMetadata::scalar("message", "String")],
        ),
        EntityMetadata::new(
            "Account",
            vec![id(), FieldMetadata::scalar("email", "String"), deleted_at()],
        )
        .with_unique_indexes(vec![
            UniqueIndex::new(vec!["email".to_string(), "deletedAt".to_string()])
                .named("email_deletedAt"),
        ]),
        EntityMetadata::new(
            "Session",
            vec![FieldMetadata::scalar("token", "String"), deleted_at()],
        )
        .with_unique_indexes(vec![UniqueIndex::new(vec![
            "token".to_string(),
            "deletedAt".to_string(),
        ])]),
        EntityMetadata::new(
            "Document",
            vec![id(), FieldMetadata::scalar("title", "String"), FieldMetadata::scalar("archivedAt", "DateTime")],
        ),
    ]
}

pub fn registry() -> EntityRegistry {
    EntityRegistry::new(models()).unwrap()
}

/// Every model declaring `deletedAt` is paranoid
pub fn context() -> AugmentationContext {
    context_with(SoftDeleteOptions::builder().auto(true).build())
}

pub fn context_with(options: SoftDeleteOptions) -> AugmentationContext {
    AugmentationContext::new(&options, registry()).unwrap()
}

/// JSON object as a tree
pub fn tree(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {}", other),
    }
}

/// Augment `filter`/`include` for `model` and return both as JSON values
pub fn augment(
    ctx: &AugmentationContext,
    model: &str,
    filter: Value,
    include: Option<Value>,
) -> (Value, Option<Value>) {
    let filter = tree(filter);
    let include = include.map(tree);
    let result = ctx.augment(model, Some(&filter), include.as_ref()).unwrap();
    (Value::Object(result.filter), result.include.map(Value::Object))
}
