//! Soft-delete field name validation
//!
//! A soft-delete field name becomes a key in every augmented filter tree, so it
//! must be a plain identifier that cannot be mistaken for a filter operator.

use std::sync::LazyLock;

use regex::Regex;

/// Keys with a structural meaning inside filter trees
pub const RESERVED_FILTER_KEYS: &[&str] = &["AND", "OR", "NOT", "is", "isNot", "every", "some", "none"];

static FIELD_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("field name pattern is valid")
});

/// Validate a soft-delete field name
///
/// Rules:
/// - Must not be empty
/// - Must start with a letter or underscore
/// - Can only contain letters, numbers, and underscores
/// - Cannot be a reserved filter key
///
/// # Example
/// ```
/// use paranoid_query::filter::validate_field_name;
///
/// assert!(validate_field_name("deletedAt").is_ok());
/// assert!(validate_field_name("is").is_err()); // relation-filter wrapper
/// assert!(validate_field_name("deleted-at").is_err());
/// ```
pub fn validate_field_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Field name cannot be empty".to_string());
    }

    if !FIELD_NAME.is_match(name) {
        return Err(format!(
            "Field name '{}' is invalid. Must start with a letter or underscore and contain only letters, numbers, and underscores.",
            name
        ));
    }

    if RESERVED_FILTER_KEYS.contains(&name) {
        return Err(format!(
            "Field name '{}' is a reserved filter key and cannot be used.",
            name
        ));
    }

    Ok(())
}
