//! Filter tree walker
//!
//! Augments one model's `where`/`include` pair: injects the soft-delete
//! predicate at the top level, hands every referenced field to the relation
//! augmenter, and recurses into logical operators and relation-filter wrappers.

use serde_json::{Map, Value};

use crate::context::AugmentationContext;
use crate::error::Result;
use crate::filter::operator::FilterOperator;
use crate::filter::relation::{FieldAugmentation, augment_field};
use crate::filter::{Augmented, FilterTree, IncludeTree};
use crate::types::EntityMetadata;

/// Augment `filter`/`include` for `entity`
///
/// The inputs are borrowed and never modified; the returned trees are fresh
/// copies with the "not deleted" predicate injected wherever a paranoid model
/// is queried. Without a context the inputs are copied unchanged.
///
/// Injection at this level happens only when `entity` is paranoid, the
/// soft-delete field is not already constrained, and the tree is not the body
/// of an `is`/`isNot` wrapper (that body is augmented when the wrapper itself
/// is recursed into).
pub fn augment(
    entity: &EntityMetadata,
    filter: Option<&FilterTree>,
    include: Option<&IncludeTree>,
    ctx: Option<&AugmentationContext>,
) -> Result<Augmented> {
    let Some(ctx) = ctx else {
        return Ok(Augmented::unchanged(filter, include));
    };

    let mut filter = filter.cloned().unwrap_or_default();
    let mut include = include.cloned();

    let config = ctx.config_for(&entity.name);
    let field_name = config.field_name();
    if ctx.is_paranoid(&entity.name)
        && !filter.contains_key(field_name)
        && !FilterOperator::has_relation_filter(&filter)
    {
        let value = config.filter_value(&entity.name)?;
        filter.insert(field_name.to_string(), value);
    }

    for field in &entity.fields {
        let base_filter = filter.get(&field.name);
        let base_include = include.as_ref().and_then(|i| i.get(&field.name));
        if base_filter.is_none() && base_include.is_none() {
            continue;
        }

        let FieldAugmentation {
            filter: field_filter,
            include: field_include,
        } = augment_field(field, base_filter, base_include, ctx)?;

        if let Some(value) = field_filter {
            filter.insert(field.name.clone(), value);
        }
        if let Some(value) = field_include {
            include
                .get_or_insert_with(Map::new)
                .insert(field.name.clone(), Value::Object(value));
        }
    }

    for op in FilterOperator::ALL {
        let augmented = match filter.get(op.key()) {
            Some(Value::Array(items)) => Value::Array(
                items
                    .iter()
                    .map(|item| augment_operand(entity, item, ctx))
                    .collect::<Result<Vec<_>>>()?,
            ),
            Some(body @ Value::Object(_)) => augment_operand(entity, body, ctx)?,
            _ => continue,
        };
        filter.insert(op.key().to_string(), augmented);
    }

    Ok(Augmented { filter, include })
}

/// Augment one operand of a logical operator for the same model
fn augment_operand(entity: &EntityMetadata, operand: &Value, ctx: &AugmentationContext) -> Result<Value> {
    match operand {
        Value::Object(body) => Ok(Value::Object(augment(entity, Some(body), None, Some(ctx))?.filter)),
        other => Ok(other.clone()),
    }
}
