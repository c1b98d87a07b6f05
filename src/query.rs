//! Query rewriter
//!
//! Turns one `model + operation + args` call into the query the hook layer
//! should run instead. Reads get their `where`/`include`/`select` augmented,
//! unique lookups become first-match lookups (a unique key no longer
//! identifies a live row on its own), and deletes become updates of the
//! soft-delete field.

use serde_json::{Map, Value};
use strum::{Display, EnumString, IntoStaticStr};
use tracing::debug;

use crate::config::ValueFn;
use crate::context::AugmentationContext;
use crate::error::{ParanoidError, Result};
use crate::filter::{self, FilterTree, sub_tree};
use crate::types::EntityMetadata;

/// Query arguments: `where`, `include`, `select`, `data`, ...
pub type QueryArgs = Map<String, Value>;

/// Operations intercepted for paranoid models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum QueryOperation {
    Delete,
    DeleteMany,
    FindUnique,
    FindUniqueOrThrow,
    FindFirst,
    FindFirstOrThrow,
    FindMany,
    GroupBy,
}

impl QueryOperation {
    pub const ALL: [QueryOperation; 8] = [
        QueryOperation::Delete,
        QueryOperation::DeleteMany,
        QueryOperation::FindUnique,
        QueryOperation::FindUniqueOrThrow,
        QueryOperation::FindFirst,
        QueryOperation::FindFirstOrThrow,
        QueryOperation::FindMany,
        QueryOperation::GroupBy,
    ];

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Client operation a rewritten query is sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum DelegateOperation {
    Update,
    UpdateMany,
    FindFirst,
    FindFirstOrThrow,
    FindMany,
}

impl DelegateOperation {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// What the hook layer should execute for an intercepted call
#[derive(Debug, Clone, PartialEq)]
pub enum QueryPlan {
    /// Run the original operation with the original arguments
    Passthrough(QueryArgs),

    /// Run the original operation with rewritten arguments
    Forward(QueryArgs),

    /// Run `operation` on the same model instead
    Redirect {
        operation: DelegateOperation,
        args: QueryArgs,
    },

    /// Fetch matching keys, then soft-delete each row in one transaction
    SoftDeleteEach(SoftDeleteEach),
}

impl QueryPlan {
    /// Whether the call was rewritten at all
    pub fn is_rewritten(&self) -> bool {
        !matches!(self, QueryPlan::Passthrough(_))
    }

    /// Arguments of the first query the plan runs
    pub fn args(&self) -> &QueryArgs {
        match self {
            QueryPlan::Passthrough(args) | QueryPlan::Forward(args) => args,
            QueryPlan::Redirect { args, .. } => args,
            QueryPlan::SoftDeleteEach(each) => &each.find_many,
        }
    }
}

/// Per-row soft delete for models whose soft-delete field is part of a unique
/// index
///
/// A single `updateMany` would stamp every row with the same delete value and
/// collide with that index, so rows are updated one by one by primary key and
/// `valueOnDelete` is called once per row.
#[derive(Debug, Clone)]
pub struct SoftDeleteEach {
    /// `findMany` arguments selecting only the primary key of live matches
    pub find_many: QueryArgs,
    pub primary_key: String,
    /// Soft-delete field written by each update
    pub field: String,
    value_on_delete: ValueFn,
}

// Callbacks cannot be compared
impl PartialEq for SoftDeleteEach {
    fn eq(&self, other: &Self) -> bool {
        self.find_many == other.find_many
            && self.primary_key == other.primary_key
            && self.field == other.field
    }
}

impl SoftDeleteEach {
    pub fn new(
        find_many: QueryArgs,
        primary_key: impl Into<String>,
        field: impl Into<String>,
        value_on_delete: ValueFn,
    ) -> Self {
        Self {
            find_many,
            primary_key: primary_key.into(),
            field: field.into(),
            value_on_delete,
        }
    }

    /// Fresh `{ field: valueOnDelete() }` payload
    pub fn data(&self) -> Map<String, Value> {
        let mut data = Map::new();
        data.insert(self.field.clone(), self.value_on_delete.call());
        data
    }

    /// `update` arguments for one row returned by `find_many`
    pub fn update_args(&self, row: &Map<String, Value>) -> Result<QueryArgs> {
        let key = row.get(&self.primary_key).ok_or_else(|| {
            ParanoidError::invalid_arguments(format!(
                "row is missing primary key '{}'",
                self.primary_key
            ))
        })?;

        let mut filter = Map::new();
        filter.insert(self.primary_key.clone(), key.clone());

        let mut args = Map::new();
        args.insert("where".to_string(), Value::Object(filter));
        args.insert("data".to_string(), Value::Object(self.data()));
        args.insert("select".to_string(), Value::Object(key_selection(&self.primary_key)));
        Ok(args)
    }

    /// Result returned to the caller of `deleteMany`
    pub fn count(updated: usize) -> Value {
        let mut result = Map::new();
        result.insert("count".to_string(), Value::from(updated));
        Value::Object(result)
    }
}

impl AugmentationContext {
    /// Plan the execution of `operation` on `model`
    ///
    /// Calls without a model, or for models that are unregistered or not
    /// paranoid, come back as [`QueryPlan::Passthrough`].
    pub fn plan(&self, model: Option<&str>, operation: QueryOperation, args: Value) -> Result<QueryPlan> {
        let args = match args {
            Value::Object(args) => args,
            other => {
                return Err(ParanoidError::invalid_arguments(format!(
                    "{} arguments must be an object, got {}",
                    operation, other
                )));
            }
        };

        let Some(entity) = model.and_then(|name| self.registry().get(name)) else {
            debug!(model = ?model, %operation, "model not registered, passing through");
            return Ok(QueryPlan::Passthrough(args));
        };
        if !self.is_paranoid(&entity.name) {
            debug!(model = %entity.name, %operation, "model not paranoid, passing through");
            return Ok(QueryPlan::Passthrough(args));
        }

        debug!(model = %entity.name, %operation, "rewriting query for soft delete");
        match operation {
            QueryOperation::Delete => {
                let filter = self.augment_where(entity, &args)?;
                let data = self.deletion_data(&entity.name)?;
                Ok(QueryPlan::Redirect {
                    operation: DelegateOperation::Update,
                    args: mutation_args(filter, data),
                })
            }
            QueryOperation::DeleteMany => self.plan_delete_many(entity, &args),
            QueryOperation::FindUnique => Ok(QueryPlan::Redirect {
                operation: DelegateOperation::FindFirst,
                args: self.augment_read(entity, args)?,
            }),
            QueryOperation::FindUniqueOrThrow => Ok(QueryPlan::Redirect {
                operation: DelegateOperation::FindFirstOrThrow,
                args: self.augment_read(entity, args)?,
            }),
            QueryOperation::FindFirst | QueryOperation::FindFirstOrThrow | QueryOperation::FindMany => {
                Ok(QueryPlan::Forward(self.augment_read(entity, args)?))
            }
            QueryOperation::GroupBy => {
                let mut args = args;
                let filter = self.augment_where(entity, &args)?;
                args.insert("where".to_string(), Value::Object(filter));
                Ok(QueryPlan::Forward(args))
            }
        }
    }

    fn plan_delete_many(&self, entity: &EntityMetadata, args: &QueryArgs) -> Result<QueryPlan> {
        let filter = self.augment_where(entity, args)?;
        let config = self.config_for(&entity.name);
        let on_delete = config.delete_callback(&entity.name)?;

        match entity.id_field() {
            Some(id) if entity.is_in_unique_index(config.field_name()) => {
                debug!(model = %entity.name, primary_key = %id.name, "soft-deleting rows one by one");
                let mut find_many = Map::new();
                find_many.insert("where".to_string(), Value::Object(filter));
                find_many.insert("select".to_string(), Value::Object(key_selection(&id.name)));
                Ok(QueryPlan::SoftDeleteEach(SoftDeleteEach::new(
                    find_many,
                    id.name.clone(),
                    config.field_name(),
                    on_delete.clone(),
                )))
            }
            _ => Ok(QueryPlan::Redirect {
                operation: DelegateOperation::UpdateMany,
                args: mutation_args(filter, self.deletion_data(&entity.name)?),
            }),
        }
    }

    /// Augmented `where` of `args`, absent treated as empty
    fn augment_where(&self, entity: &EntityMetadata, args: &QueryArgs) -> Result<FilterTree> {
        Ok(filter::augment(entity, sub_tree(args, "where"), None, Some(self))?.filter)
    }

    /// Augment `where` together with `include` and `select`
    fn augment_read(&self, entity: &EntityMetadata, mut args: QueryArgs) -> Result<QueryArgs> {
        let result = filter::augment(
            entity,
            sub_tree(&args, "where"),
            sub_tree(&args, "include"),
            Some(self),
        )?;
        let mut filter = result.filter;
        if let Some(include) = result.include {
            args.insert("include".to_string(), Value::Object(include));
        }

        if let Some(select) = sub_tree(&args, "select") {
            let selected = filter::augment(entity, Some(&filter), Some(select), Some(self))?;
            filter = selected.filter;
            if let Some(select) = selected.include {
                args.insert("select".to_string(), Value::Object(select));
            }
        }

        args.insert("where".to_string(), Value::Object(filter));
        Ok(args)
    }
}

fn mutation_args(filter: FilterTree, data: Map<String, Value>) -> QueryArgs {
    let mut args = Map::new();
    args.insert("where".to_string(), Value::Object(filter));
    args.insert("data".to_string(), Value::Object(data));
    args
}

fn key_selection(primary_key: &str) -> Map<String, Value> {
    let mut select = Map::new();
    select.insert(primary_key.to_string(), Value::Bool(true));
    select
}
