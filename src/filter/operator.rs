//! Logical operators and relation-filter wrappers recognised in filter trees

use serde_json::Map;
use serde_json::Value;

/// Keys whose values are nested filter trees on the same model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    And,
    Or,
    Not,
    /// Relation-filter wrapper: related row exists and matches
    Is,
    /// Relation-filter wrapper: related row is absent or does not match
    IsNot,
}

impl FilterOperator {
    /// Every operator, in the order they are augmented
    pub const ALL: [FilterOperator; 5] = [
        FilterOperator::And,
        FilterOperator::Or,
        FilterOperator::Not,
        FilterOperator::Is,
        FilterOperator::IsNot,
    ];

    /// Key under which the operator appears in a filter tree
    pub const fn key(self) -> &'static str {
        match self {
            FilterOperator::And => "AND",
            FilterOperator::Or => "OR",
            FilterOperator::Not => "NOT",
            FilterOperator::Is => "is",
            FilterOperator::IsNot => "isNot",
        }
    }

    pub const fn is_relation_filter(self) -> bool {
        matches!(self, FilterOperator::Is | FilterOperator::IsNot)
    }

    /// Whether `filter` is the body of an `is`/`isNot` wrapper at this level
    pub fn has_relation_filter(filter: &Map<String, Value>) -> bool {
        Self::ALL
            .into_iter()
            .filter(|op| op.is_relation_filter())
            .any(|op| filter.contains_key(op.key()))
    }
}
