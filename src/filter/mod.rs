//! Soft-delete augmentation of query trees
//!
//! Walks a query's `where` and `include` trees against the schema registry and
//! injects the "not deleted" predicate at every level that targets a paranoid
//! model.

#[cfg(test)]
pub(crate) mod fixtures;
pub mod operator;
pub mod relation;
pub mod sanitize;
pub mod walker;

use serde_json::{Map, Value};

pub use operator::FilterOperator;
pub use relation::{FieldAugmentation, augment_field};
pub use sanitize::{RESERVED_FILTER_KEYS, validate_field_name};
pub use walker::augment;

/// `where` tree: field names, relation names and operators mapped to conditions
pub type FilterTree = Map<String, Value>;

/// `include`/`select` tree: relation names mapped to `true` or a nested fetch spec
pub type IncludeTree = Map<String, Value>;

/// Result of augmenting one `where`/`include` pair
///
/// Both trees are owned copies; the caller's input is never modified.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Augmented {
    pub filter: FilterTree,
    pub include: Option<IncludeTree>,
}

impl Augmented {
    /// Copy the inputs without augmenting them
    pub fn unchanged(filter: Option<&FilterTree>, include: Option<&IncludeTree>) -> Self {
        Self {
            filter: filter.cloned().unwrap_or_default(),
            include: include.cloned(),
        }
    }
}

/// Shallow merge: keys of `source` overwrite keys of `target`
pub(crate) fn merge(target: &mut Map<String, Value>, source: Map<String, Value>) {
    for (key, value) in source {
        target.insert(key, value);
    }
}

/// Object stored under `key`, if any
pub(crate) fn sub_tree<'a>(tree: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    tree.get(key).and_then(Value::as_object)
}
