//! # paranoid-query
//!
//! Schema-aware soft-delete ("paranoid") augmentation of ORM query trees.
//!
//! Queries against soft-deletable models are rewritten so that deleted rows
//! disappear from reads and deletes turn into updates of a marker field. The
//! crate never executes a query: it takes a model name plus the query's
//! `where`/`include`/`select` arguments and hands back the rewritten
//! arguments for the caller's client to run.
//!
//! ## Features
//!
//! - **Deep Augmentation**: The "not deleted" predicate reaches relation
//!   filters, included relations, `AND`/`OR`/`NOT` and `is`/`isNot` wrappers
//! - **Auto-Detection**: Models declaring the soft-delete field are picked up
//!   from the schema metadata
//! - **Per-Model Overrides**: Field name, field type and value callbacks per model
//! - **Query Planning**: `delete`, `deleteMany`, `findUnique`, `findFirst`,
//!   `findMany` and `groupBy` mapped onto their soft-delete equivalents
//! - **Immutable Inputs**: Caller trees are borrowed, results are fresh copies
//!
//! ## Quick Start
//!
//! ```rust
//! use paranoid_query::{
//!     AugmentationContext, EntityMetadata, EntityRegistry, FieldMetadata, QueryOperation,
//!     QueryPlan, SoftDeleteOptions,
//! };
//! use serde_json::json;
//!
//! # fn main() -> paranoid_query::Result<()> {
//! let registry = EntityRegistry::new(vec![
//!     EntityMetadata::new(
//!         "User",
//!         vec![
//!             FieldMetadata::scalar("id", "Int").id(),
//!             FieldMetadata::scalar("deletedAt", "DateTime"),
//!             FieldMetadata::list_relation("posts", "Post"),
//!         ],
//!     ),
//!     EntityMetadata::new(
//!         "Post",
//!         vec![
//!             FieldMetadata::scalar("id", "Int").id(),
//!             FieldMetadata::scalar("deletedAt", "DateTime"),
//!         ],
//!     ),
//! ])?;
//!
//! let options = SoftDeleteOptions::builder().auto(true).build();
//! let ctx = AugmentationContext::new(&options, registry)?;
//!
//! let plan = ctx.plan(
//!     Some("User"),
//!     QueryOperation::FindMany,
//!     json!({"where": {"id": 1}, "include": {"posts": true}}),
//! )?;
//! let QueryPlan::Forward(args) = plan else { unreachable!() };
//! assert_eq!(
//!     serde_json::Value::Object(args),
//!     json!({
//!         "where": {"id": 1, "deletedAt": null},
//!         "include": {"posts": {"where": {"deletedAt": null}}}
//!     })
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use paranoid_query::{FieldType, ModelOptions, SoftDeleteOptions};
//! use serde_json::json;
//!
//! let options = SoftDeleteOptions::builder()
//!     .auto(true)                              // Detect models declaring the field
//!     .field("deletedAt", FieldType::Date)     // Global field (default)
//!     .model(
//!         "Invoice",
//!         ModelOptions::enabled()
//!             .field("status", FieldType::Custom)
//!             .value_on_delete(|| json!("void"))
//!             .value_on_filter(|| json!("open")),
//!     )
//!     .disable("AuditLog")
//!     .build();
//! ```
//!
//! ## Logging
//!
//! Events are emitted through `tracing`; no subscriber is installed here.

pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod query;
pub mod schema;
pub mod types;

// Re-export main types for convenience
pub use config::{
    DefaultConfig, FieldType, ModelOptions, SoftDeleteField, SoftDeleteOptions,
    SoftDeleteOptionsBuilder, ValueFn, DEFAULT_FIELD_NAME,
};
pub use context::{AugmentationContext, GlobalConfig, ModelConfig, ParanoidModel};
pub use error::{Callback, ParanoidError, Result};
pub use filter::{Augmented, FilterOperator, FilterTree, IncludeTree, augment, augment_field};
pub use query::{DelegateOperation, QueryArgs, QueryOperation, QueryPlan, SoftDeleteEach};
pub use schema::{EntityRegistry, SchemaMetadata};
pub use types::{EntityMetadata, FieldKind, FieldMetadata, UniqueIndex};
