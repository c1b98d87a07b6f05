//! Relation augmenter
//!
//! Per-field step of the walk. When a field points at a paranoid model, its
//! sub-`where` and sub-`include` are augmented for that model:
//!
//! - list relation with include: `include.where` is augmented and receives
//!   the predicate, so only live related rows are fetched
//! - singular relation with include: the predicate lands in the parent's
//!   `where` under the field key
//! - list relation filter (`every`/`some`/`none`): each quantifier body is
//!   augmented on its own
//! - singular relation filter: the body is augmented as one tree

use serde_json::{Map, Value};

use crate::context::AugmentationContext;
use crate::error::Result;
use crate::filter::walker::augment;
use crate::filter::{IncludeTree, merge, sub_tree};
use crate::types::FieldMetadata;

/// Replacement values for one field of the parent trees
///
/// `None` means the caller's value under the field key stays as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldAugmentation {
    pub filter: Option<Value>,
    pub include: Option<IncludeTree>,
}

/// Augment the sub-trees a query holds under `field`
///
/// Fields whose type is not a registered paranoid model are left untouched.
pub fn augment_field(
    field: &FieldMetadata,
    base_filter: Option<&Value>,
    base_include: Option<&Value>,
    ctx: &AugmentationContext,
) -> Result<FieldAugmentation> {
    let Some(related) = ctx.registry().related(field) else {
        return Ok(FieldAugmentation::default());
    };
    if !ctx.is_paranoid(&related.name) {
        return Ok(FieldAugmentation::default());
    }

    let base_filter = base_filter.and_then(Value::as_object);
    let mut include = base_include.and_then(Value::as_object).cloned();
    let mut filter = base_filter.cloned();

    if is_requested(base_include) {
        // A list field's own `where` holds quantifiers on the parent, never a
        // related-row filter
        let include_filter = include.as_ref().and_then(|i| sub_tree(i, "where"));
        let nested_filter = if field.is_list {
            include_filter
        } else {
            base_filter.or(include_filter)
        };
        let nested_include = include.as_ref().and_then(|i| sub_tree(i, "include"));
        let result = augment(related, nested_filter, nested_include, Some(ctx))?;

        if field.is_list {
            let target = include.get_or_insert_with(Map::new);
            let mut related_filter = sub_tree(target, "where").cloned().unwrap_or_default();
            merge(&mut related_filter, result.filter);
            target.insert("where".to_string(), Value::Object(related_filter));
        } else {
            let mut merged = filter.take().unwrap_or_default();
            merge(&mut merged, result.filter);
            filter = Some(merged);
        }

        if let Some(result_include) = result.include {
            let target = include.get_or_insert_with(Map::new);
            let mut nested = sub_tree(target, "include").cloned().unwrap_or_default();
            merge(&mut nested, result_include);
            target.insert("include".to_string(), Value::Object(nested));
        }
    }

    if let Some(mut current) = filter.take() {
        if field.is_list {
            for body in current.values_mut() {
                let Value::Object(quantified) = body else {
                    continue;
                };
                let result = augment(related, Some(&*quantified), None, Some(ctx))?;
                if let Some(extra) = result.include {
                    merge(include.get_or_insert_with(Map::new), extra);
                }
                *body = Value::Object(result.filter);
            }
        } else {
            let result = augment(related, base_filter, None, Some(ctx))?;
            merge(&mut current, result.filter);
            if let Some(extra) = result.include {
                merge(include.get_or_insert_with(Map::new), extra);
            }
        }
        filter = Some(current);
    }

    Ok(FieldAugmentation {
        filter: filter.map(Value::Object),
        include,
    })
}

/// `true` or a fetch spec requests the relation; `false`/`null` do not
fn is_requested(include: Option<&Value>) -> bool {
    matches!(include, Some(Value::Bool(true)) | Some(Value::Object(_)))
}
