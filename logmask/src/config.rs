//! JSON configuration for the engine.
//!
//! Operators are named in configuration and resolved through an
//! [`OperatorRegistry`] of constructor functions. The registry replaces
//! any kind of runtime type discovery: only registered names build, and
//! an unknown name fails fast at configuration time.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::engine::{MaskEngine, MaskEngineOptions, MaskingMode, DEFAULT_MASK_VALUE};
use crate::error::Error;
use crate::operators::{
    CreditCardMaskingOperator, EmailMaskingOperator, IbanMaskingOperator, MaskingOperator,
    PathMaskingOperator, PatternMaskingOperator, UriMaskingOperator,
};
use crate::options::{MaskOptions, UriMaskOptions};
use crate::properties::{MaskProperty, MaskPropertyCollection};

type OperatorFactory =
    Box<dyn Fn(&JsonValue) -> Result<Arc<dyn MaskingOperator>, Error> + Send + Sync>;

/// Maps configuration names to operator constructors.
pub struct OperatorRegistry {
    factories: HashMap<String, OperatorFactory>,
}

impl OperatorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// A registry with every built-in operator registered.
    ///
    /// | name          | settings                           |
    /// |---------------|------------------------------------|
    /// | `email`       | none                               |
    /// | `iban`        | none                               |
    /// | `credit-card` | `full_mask` (bool, default true)   |
    /// | `path`        | `keep_last_segment` (bool, true)   |
    /// | `uri`         | `mask_entire_uri` (bool, false)    |
    /// | `regex`       | `pattern` (string, required)       |
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("email", |_settings| Ok(Arc::new(EmailMaskingOperator::new())));
        registry.register("iban", |_settings| Ok(Arc::new(IbanMaskingOperator::new())));
        registry.register("credit-card", |settings| {
            let full_mask = bool_setting(settings, "full_mask")?.unwrap_or(true);
            Ok(Arc::new(CreditCardMaskingOperator::new(full_mask)))
        });
        registry.register("path", |settings| {
            let keep_last_segment = bool_setting(settings, "keep_last_segment")?.unwrap_or(true);
            Ok(Arc::new(PathMaskingOperator::new(keep_last_segment)))
        });
        registry.register("uri", |settings| {
            let mask_entire_uri = bool_setting(settings, "mask_entire_uri")?.unwrap_or(false);
            Ok(Arc::new(UriMaskingOperator::new(mask_entire_uri)))
        });
        registry.register("regex", |settings| {
            let pattern = str_setting(settings, "pattern")?.ok_or_else(|| {
                Error::InvalidConfig("regex operator requires a `pattern` setting".to_string())
            })?;
            Ok(Arc::new(PatternMaskingOperator::new(pattern)?))
        });
        registry
    }

    /// Registers (or replaces) a factory under `name`.
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(&JsonValue) -> Result<Arc<dyn MaskingOperator>, Error> + Send + Sync + 'static,
    {
        self.factories.insert(name.to_string(), Box::new(factory));
    }

    /// Builds the operator registered under `name`.
    pub fn build(
        &self,
        name: &str,
        settings: &JsonValue,
    ) -> Result<Arc<dyn MaskingOperator>, Error> {
        match self.factories.get(name) {
            Some(factory) => factory(settings),
            None => Err(Error::UnknownOperator(name.to_string())),
        }
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn bool_setting(settings: &JsonValue, key: &str) -> Result<Option<bool>, Error> {
    match settings.get(key) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Bool(value)) => Ok(Some(*value)),
        Some(other) => Err(Error::InvalidConfig(format!(
            "setting `{key}` must be a boolean, got {other}"
        ))),
    }
}

fn str_setting<'a>(settings: &'a JsonValue, key: &str) -> Result<Option<&'a str>, Error> {
    match settings.get(key) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(value)) => Ok(Some(value)),
        Some(other) => Err(Error::InvalidConfig(format!(
            "setting `{key}` must be a string, got {other}"
        ))),
    }
}

/// One operator entry in a [`MaskingConfig`].
#[derive(Debug, Deserialize)]
pub struct OperatorConfig {
    /// The registry name.
    pub name: String,
    /// Operator-specific settings, passed to the factory as-is.
    #[serde(default)]
    pub settings: JsonValue,
}

/// One property rule in a [`MaskingConfig`].
///
/// `uri_options` takes precedence over `options` when both are present.
#[derive(Debug, Deserialize)]
pub struct MaskPropertyConfig {
    /// The property name, possibly with a leading or trailing `*`.
    pub name: String,
    #[serde(default)]
    pub options: Option<MaskOptions>,
    #[serde(default)]
    pub uri_options: Option<UriMaskOptions>,
}

fn default_mask_value() -> String {
    DEFAULT_MASK_VALUE.to_string()
}

fn default_mode() -> MaskingMode {
    MaskingMode::Globally
}

/// A full engine configuration, deserializable from JSON.
///
/// ```
/// use logmask::{MaskingConfig, OperatorRegistry};
///
/// let config = MaskingConfig::from_json_str(
///     r#"{
///         "mode": "globally",
///         "operators": [
///             { "name": "email" },
///             { "name": "credit-card", "settings": { "full_mask": false } }
///         ],
///         "mask_properties": [
///             { "name": "*card*", "options": { "show_last": 4, "wildcard_match": true } }
///         ],
///         "exclude_properties": ["RequestId"]
///     }"#,
/// )
/// .unwrap();
/// let engine = config.build_engine(&OperatorRegistry::with_defaults()).unwrap();
/// # let _ = engine;
/// ```
#[derive(Debug, Deserialize)]
pub struct MaskingConfig {
    #[serde(default = "default_mode")]
    pub mode: MaskingMode,
    #[serde(default = "default_mask_value")]
    pub mask_value: String,
    /// Absent means the default chain; an empty list means no operators.
    #[serde(default)]
    pub operators: Option<Vec<OperatorConfig>>,
    #[serde(default)]
    pub mask_properties: Vec<MaskPropertyConfig>,
    #[serde(default)]
    pub exclude_properties: Vec<String>,
}

impl MaskingConfig {
    /// Parses a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolves operator names through `registry` and produces engine
    /// options.
    pub fn into_engine_options(
        self,
        registry: &OperatorRegistry,
    ) -> Result<MaskEngineOptions, Error> {
        let operators = match self.operators {
            Some(entries) => entries
                .iter()
                .map(|entry| registry.build(&entry.name, &entry.settings))
                .collect::<Result<Vec<_>, Error>>()?,
            None => MaskEngineOptions::default_operators(),
        };

        let mask_properties: MaskPropertyCollection = self
            .mask_properties
            .into_iter()
            .map(|entry| match (entry.uri_options, entry.options) {
                (Some(uri_options), _) => MaskProperty::new(entry.name, uri_options),
                (None, Some(options)) => MaskProperty::new(entry.name, options),
                (None, None) => MaskProperty::with_defaults(entry.name),
            })
            .collect();

        Ok(MaskEngineOptions {
            mode: self.mode,
            mask_value: self.mask_value,
            operators,
            mask_properties,
            exclude_properties: self.exclude_properties,
        })
    }

    /// Shorthand for [`Self::into_engine_options`] followed by
    /// [`MaskEngine::new`].
    pub fn build_engine(self, registry: &OperatorRegistry) -> Result<MaskEngine, Error> {
        MaskEngine::new(self.into_engine_options(registry)?)
    }
}
