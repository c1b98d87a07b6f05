//! Configuration for soft-delete augmentation
//!
//! Provides the caller-facing options (global defaults, per-model overrides,
//! auto-detection) and a builder for assembling them.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::Display;

/// Default soft-delete field name
pub const DEFAULT_FIELD_NAME: &str = "deletedAt";

/// Type of the soft-delete field, which selects the built-in values
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FieldType {
    /// Timestamp set on delete, `null` while live
    #[default]
    Date,

    /// `true` on delete, `false` while live
    Boolean,

    /// Caller-defined values; both callbacks must be supplied
    #[serde(alias = "other")]
    Custom,
}

impl FieldType {
    /// Built-in value written on delete
    pub fn default_on_delete(self) -> Option<ValueFn> {
        match self {
            FieldType::Date => Some(ValueFn::new(|| {
                Value::String(chrono::Utc::now().to_rfc3339())
            })),
            FieldType::Boolean => Some(ValueFn::constant(Value::Bool(true))),
            FieldType::Custom => None,
        }
    }

    /// Built-in value that marks a live row
    pub fn default_on_filter(self) -> Option<ValueFn> {
        match self {
            FieldType::Date => Some(ValueFn::constant(Value::Null)),
            FieldType::Boolean => Some(ValueFn::constant(Value::Bool(false))),
            FieldType::Custom => None,
        }
    }
}

/// Name and type of the soft-delete field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SoftDeleteField {
    pub name: String,

    #[serde(rename = "type", default)]
    pub field_type: FieldType,
}

impl SoftDeleteField {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

impl Default for SoftDeleteField {
    fn default() -> Self {
        Self::new(DEFAULT_FIELD_NAME, FieldType::Date)
    }
}

/// Value-producing callback (`valueOnDelete` / `valueOnFilter`)
#[derive(Clone)]
pub struct ValueFn(Arc<dyn Fn() -> Value + Send + Sync>);

impl ValueFn {
    pub fn new(f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Callback that always yields `value`
    pub fn constant(value: Value) -> Self {
        Self::new(move || value.clone())
    }

    pub fn call(&self) -> Value {
        (self.0)()
    }
}

impl fmt::Debug for ValueFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValueFn(..)")
    }
}

/// Global defaults shared by every model
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultConfig {
    #[serde(default)]
    pub field: Option<SoftDeleteField>,

    #[serde(skip)]
    pub value_on_delete: Option<ValueFn>,

    #[serde(skip)]
    pub value_on_filter: Option<ValueFn>,
}

/// Per-model override; unset parts inherit from [`DefaultConfig`]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelOptions {
    /// Explicit on/off switch; wins over auto-detection
    #[serde(default, alias = "paranoid")]
    pub enabled: Option<bool>,

    #[serde(default)]
    pub field: Option<SoftDeleteField>,

    #[serde(skip)]
    pub value_on_delete: Option<ValueFn>,

    #[serde(skip)]
    pub value_on_filter: Option<ValueFn>,
}

impl ModelOptions {
    /// Override that turns soft delete on for the model
    pub fn enabled() -> Self {
        Self {
            enabled: Some(true),
            ..Self::default()
        }
    }

    /// Override that turns soft delete off for the model
    pub fn disabled() -> Self {
        Self {
            enabled: Some(false),
            ..Self::default()
        }
    }

    pub fn field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.field = Some(SoftDeleteField::new(name, field_type));
        self
    }

    pub fn value_on_delete(mut self, f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.value_on_delete = Some(ValueFn::new(f));
        self
    }

    pub fn value_on_filter(mut self, f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.value_on_filter = Some(ValueFn::new(f));
        self
    }
}

/// Caller-supplied soft-delete options
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftDeleteOptions {
    /// Per-model overrides keyed by model name
    #[serde(default)]
    pub models: BTreeMap<String, ModelOptions>,

    /// Treat every model declaring the soft-delete field as paranoid
    #[serde(default)]
    pub auto: bool,

    #[serde(default)]
    pub default_config: DefaultConfig,
}

impl SoftDeleteOptions {
    /// Create a new options builder
    pub fn builder() -> SoftDeleteOptionsBuilder {
        SoftDeleteOptionsBuilder::new()
    }

    /// Parse options from a JSON document (callbacks must be added in code)
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Builder for SoftDeleteOptions
#[derive(Debug, Default)]
pub struct SoftDeleteOptionsBuilder {
    options: SoftDeleteOptions,
}

impl SoftDeleteOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable auto-detection (default: false)
    pub fn auto(mut self, enabled: bool) -> Self {
        self.options.auto = enabled;
        self
    }

    /// Set the global soft-delete field (default: `deletedAt`, date)
    pub fn field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.options.default_config.field = Some(SoftDeleteField::new(name, field_type));
        self
    }

    /// Set the global value written on delete
    pub fn value_on_delete(mut self, f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.options.default_config.value_on_delete = Some(ValueFn::new(f));
        self
    }

    /// Set the global value that marks a live row
    pub fn value_on_filter(mut self, f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.options.default_config.value_on_filter = Some(ValueFn::new(f));
        self
    }

    /// Add or replace a per-model override
    pub fn model(mut self, name: impl Into<String>, options: ModelOptions) -> Self {
        self.options.models.insert(name.into(), options);
        self
    }

    /// Shorthand for `model(name, ModelOptions::enabled())`
    pub fn enable(self, name: impl Into<String>) -> Self {
        self.model(name, ModelOptions::enabled())
    }

    /// Shorthand for `model(name, ModelOptions::disabled())`
    pub fn disable(self, name: impl Into<String>) -> Self {
        self.model(name, ModelOptions::disabled())
    }

    pub fn build(self) -> SoftDeleteOptions {
        self.options
    }
}
