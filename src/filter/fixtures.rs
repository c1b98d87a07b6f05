//! Schema fixtures for augmentation tests

use crate::config::SoftDeleteOptions;
use crate::context::AugmentationContext;
use crate::schema::EntityRegistry;
use crate::types::{EntityMetadata, FieldMetadata};

fn id() -> FieldMetadata {
    FieldMetadata::scalar("id", "Int").id()
}

fn deleted_at() -> FieldMetadata {
    FieldMetadata::scalar("deletedAt", "DateTime")
}

pub(crate) fn registry() -> EntityRegistry {
    EntityRegistry::new(vec![
        EntityMetadata::new(
            "User",
            vec![
                id(),
                FieldMetadata::scalar("lastName", "String"),
                deleted_at(),
                FieldMetadata::list_relation("userRoles", "UserRole"),
                FieldMetadata::list_relation("tags", "Tag"),
            ],
        ),
        EntityMetadata::new(
            "UserRole",
            vec![
                id(),
                FieldMetadata::scalar("roleId", "Int"),
                deleted_at(),
                FieldMetadata::relation("user", "User"),
            ],
        ),
        EntityMetadata::new(
            "Bovine",
            vec![
                id(),
                deleted_at(),
                FieldMetadata::relation("farm", "Farm"),
                FieldMetadata::relation("animalGender", "AnimalGender"),
            ],
        ),
        EntityMetadata::new(
            "Farm",
            vec![id(), deleted_at(), FieldMetadata::list_relation("bovines", "Bovine")],
        ),
        EntityMetadata::new(
            "AnimalGender",
            vec![id(), FieldMetadata::scalar("code", "String"), deleted_at()],
        ),
        EntityMetadata::new(
            "Tag",
            vec![id(), FieldMetadata::list_relation("users", "User")],
        ),
    ])
    .expect("fixture models are unique")
}

/// Context in auto-detection mode: every model with `deletedAt` is paranoid
pub(crate) fn context() -> AugmentationContext {
    let options = SoftDeleteOptions::builder().auto(true).build();
    AugmentationContext::new(&options, registry()).expect("fixture context")
}
