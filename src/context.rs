//! Resolved soft-delete configuration shared by every query augmentation
//!
//! The context is built once at setup from the caller's options and the schema
//! registry. It is immutable afterwards and can be shared across threads.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::config::{
    DefaultConfig, FieldType, ModelOptions, SoftDeleteField, SoftDeleteOptions, ValueFn,
};
use crate::error::{Callback, ParanoidError, Result};
use crate::filter::{self, Augmented, FilterTree, IncludeTree, validate_field_name};
use crate::schema::EntityRegistry;

/// Global soft-delete settings after merging options with defaults
///
/// Callbacks are only those supplied explicitly by the caller; built-in values
/// are chosen per model from the model's effective field type.
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    pub field: SoftDeleteField,
    pub value_on_delete: Option<ValueFn>,
    pub value_on_filter: Option<ValueFn>,
}

impl GlobalConfig {
    pub fn from_options(options: &DefaultConfig) -> Self {
        Self {
            field: options.field.clone().unwrap_or_default(),
            value_on_delete: options.value_on_delete.clone(),
            value_on_filter: options.value_on_filter.clone(),
        }
    }
}

/// Resolved soft-delete settings for one model
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub enabled: bool,
    pub field: SoftDeleteField,
    value_on_delete: Option<ValueFn>,
    value_on_filter: Option<ValueFn>,
}

impl ModelConfig {
    fn resolve(overrides: Option<&ModelOptions>, global: &GlobalConfig, enabled: bool) -> Self {
        let field = overrides
            .and_then(|o| o.field.clone())
            .unwrap_or_else(|| global.field.clone());
        let field_type = field.field_type;

        let value_on_delete = overrides
            .and_then(|o| o.value_on_delete.clone())
            .or_else(|| global.value_on_delete.clone())
            .or_else(|| field_type.default_on_delete());
        let value_on_filter = overrides
            .and_then(|o| o.value_on_filter.clone())
            .or_else(|| global.value_on_filter.clone())
            .or_else(|| field_type.default_on_filter());

        Self {
            enabled,
            field,
            value_on_delete,
            value_on_filter,
        }
    }

    pub fn field_name(&self) -> &str {
        &self.field.name
    }

    pub fn field_type(&self) -> FieldType {
        self.field.field_type
    }

    /// Value that marks a live row of `model`
    pub fn filter_value(&self, model: &str) -> Result<Value> {
        self.value_on_filter
            .as_ref()
            .map(ValueFn::call)
            .ok_or_else(|| ParanoidError::missing_callback(model, Callback::ValueOnFilter))
    }

    /// Callback producing the soft-delete value of `model`
    pub fn delete_callback(&self, model: &str) -> Result<&ValueFn> {
        self.value_on_delete
            .as_ref()
            .ok_or_else(|| ParanoidError::missing_callback(model, Callback::ValueOnDelete))
    }

    /// Value written into the soft-delete field when `model` is deleted
    pub fn delete_value(&self, model: &str) -> Result<Value> {
        self.delete_callback(model).map(ValueFn::call)
    }
}

/// One row of the paranoid model summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParanoidModel {
    pub name: String,
    pub field: String,
    pub field_type: FieldType,
}

/// Resolve the per-model configuration map
///
/// With `auto`, every registered model gets an entry and is enabled when it
/// declares its effective soft-delete field, unless an explicit `enabled`
/// override says otherwise. Without `auto`, only explicitly listed models
/// get an entry.
pub fn resolve_models(
    options: &SoftDeleteOptions,
    global: &GlobalConfig,
    registry: &EntityRegistry,
) -> BTreeMap<String, ModelConfig> {
    let mut models = BTreeMap::new();

    if !options.auto {
        for (name, overrides) in &options.models {
            if !registry.contains(name) {
                warn!(model = %name, "soft-delete override names a model missing from the schema");
            }
            let enabled = overrides.enabled.unwrap_or(false);
            models.insert(name.clone(), ModelConfig::resolve(Some(overrides), global, enabled));
        }
        return models;
    }

    for name in options.models.keys() {
        if !registry.contains(name) {
            warn!(model = %name, "soft-delete override names a model missing from the schema");
        }
    }

    for entity in registry.iter() {
        let overrides = options.models.get(&entity.name);
        let field_name = overrides
            .and_then(|o| o.field.as_ref())
            .map_or(global.field.name.as_str(), |f| f.name.as_str());
        let enabled = overrides
            .and_then(|o| o.enabled)
            .unwrap_or_else(|| entity.has_field(field_name));
        models.insert(entity.name.clone(), ModelConfig::resolve(overrides, global, enabled));
    }
    models
}

/// Immutable soft-delete context: resolved configs plus the schema registry
#[derive(Debug, Clone)]
pub struct AugmentationContext {
    fallback: ModelConfig,
    models: BTreeMap<String, ModelConfig>,
    registry: EntityRegistry,
}

impl AugmentationContext {
    /// Build the context from caller options and the schema registry
    ///
    /// Fails when a configured soft-delete field name is not a valid identifier.
    pub fn new(options: &SoftDeleteOptions, registry: EntityRegistry) -> Result<Self> {
        let global = GlobalConfig::from_options(&options.default_config);
        validate_field_name(&global.field.name).map_err(ParanoidError::invalid_field)?;
        for (name, overrides) in &options.models {
            if let Some(field) = &overrides.field {
                validate_field_name(&field.name)
                    .map_err(|e| ParanoidError::invalid_field(format!("model '{}': {}", name, e)))?;
            }
        }

        let models = resolve_models(options, &global, &registry);
        let fallback = ModelConfig::resolve(None, &global, false);

        let ctx = Self {
            fallback,
            models,
            registry,
        };
        ctx.log_paranoid_models();
        Ok(ctx)
    }

    /// Build the context from options and a JSON metadata document
    pub fn from_json_metadata(options: &SoftDeleteOptions, metadata: &str) -> Result<Self> {
        Self::new(options, EntityRegistry::from_json(metadata)?)
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Resolved config for `model`, if the model was configured
    pub fn model_config(&self, model: &str) -> Option<&ModelConfig> {
        self.models.get(model)
    }

    /// Resolved config for `model`, falling back to the global settings
    pub fn config_for(&self, model: &str) -> &ModelConfig {
        self.models.get(model).unwrap_or(&self.fallback)
    }

    /// Whether `model` is configured as soft-deletable
    ///
    /// Models without a resolved config are never paranoid.
    pub fn is_paranoid(&self, model: &str) -> bool {
        self.models.get(model).is_some_and(|c| c.enabled)
    }

    /// Enabled models with their soft-delete field, in name order
    pub fn paranoid_models(&self) -> Vec<ParanoidModel> {
        self.models
            .iter()
            .filter(|(_, config)| config.enabled)
            .map(|(name, config)| ParanoidModel {
                name: name.clone(),
                field: config.field_name().to_string(),
                field_type: config.field_type(),
            })
            .collect()
    }

    /// Augment a query's `where`/`include` for the model named `model`
    ///
    /// Unknown models are returned unchanged.
    pub fn augment(
        &self,
        model: &str,
        filter: Option<&FilterTree>,
        include: Option<&IncludeTree>,
    ) -> Result<Augmented> {
        match self.registry.get(model) {
            Some(entity) => filter::augment(entity, filter, include, Some(self)),
            None => Ok(Augmented::unchanged(filter, include)),
        }
    }

    /// `{ field: valueOnDelete() }` payload that replaces a physical delete
    pub fn deletion_data(&self, model: &str) -> Result<Map<String, Value>> {
        let config = self.config_for(model);
        let mut data = Map::new();
        data.insert(config.field.name.clone(), config.delete_value(model)?);
        Ok(data)
    }

    fn log_paranoid_models(&self) {
        let paranoid = self.paranoid_models();
        if paranoid.is_empty() {
            info!("no paranoid models configured");
            return;
        }
        info!(count = paranoid.len(), "paranoid models configured");
        for model in &paranoid {
            debug!(
                model = %model.name,
                field = %model.field,
                field_type = %model.field_type,
                "paranoid model"
            );
        }
    }
}
