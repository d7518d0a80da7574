//! The masking engine: activation, template masking, and the property-tree
//! walk.
//!
//! Rule precedence per property, outermost first:
//!
//! 1. excluded names pass through untouched (no recursion),
//! 2. names matching a property rule are masked per that rule's options,
//! 3. everything else dispatches on value shape: string and URI scalars run
//!    the operator chain, containers recurse.
//!
//! Sequences recurse under the inherited property name, structures under
//! each sub-property's own name, dictionaries under the rendered key.
//! Operators run in configured order and compose: each sees the previous
//! one's output.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::area::SensitiveArea;
use crate::error::Error;
use crate::event::{LogEvent, MessageTemplate, PropertyValue, ScalarValue};
use crate::operators::{
    CreditCardMaskingOperator, EmailMaskingOperator, IbanMaskingOperator, MaskingOperator,
};
use crate::options::PropertyMaskOptions;
use crate::properties::{MaskProperty, MaskPropertyCollection};

/// The mask value used when none is configured.
pub const DEFAULT_MASK_VALUE: &str = "***MASKED***";

/// When masking applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "kebab-case"))]
pub enum MaskingMode {
    /// Mask every event.
    Globally,
    /// Mask only events emitted inside an active [`SensitiveArea`].
    InArea,
}

/// Configuration for a [`MaskEngine`].
#[derive(Clone)]
pub struct MaskEngineOptions {
    /// When masking applies.
    pub mode: MaskingMode,
    /// The replacement text for masked spans. Must not be empty.
    pub mask_value: String,
    /// The operator chain, applied in order to templates and
    /// string-valued properties.
    pub operators: Vec<Arc<dyn MaskingOperator>>,
    /// Name-driven rules, applied before the operator chain.
    pub mask_properties: MaskPropertyCollection,
    /// Names that are never masked, case-insensitively. Takes precedence
    /// over everything else.
    pub exclude_properties: Vec<String>,
}

impl MaskEngineOptions {
    /// The default chain: email, IBAN, and full-mask credit card.
    pub fn default_operators() -> Vec<Arc<dyn MaskingOperator>> {
        vec![
            Arc::new(EmailMaskingOperator::new()),
            Arc::new(IbanMaskingOperator::new()),
            Arc::new(CreditCardMaskingOperator::new(true)),
        ]
    }

    /// Sets the masking mode.
    #[must_use]
    pub fn with_mode(mut self, mode: MaskingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the mask value.
    #[must_use]
    pub fn with_mask_value<M: Into<String>>(mut self, mask_value: M) -> Self {
        self.mask_value = mask_value.into();
        self
    }

    /// Replaces the operator chain.
    #[must_use]
    pub fn with_operators(mut self, operators: Vec<Arc<dyn MaskingOperator>>) -> Self {
        self.operators = operators;
        self
    }

    /// Adds a property rule.
    #[must_use]
    pub fn with_mask_property(mut self, property: MaskProperty) -> Self {
        self.mask_properties.add(property);
        self
    }

    /// Adds an excluded property name.
    #[must_use]
    pub fn with_excluded_property<N: Into<String>>(mut self, name: N) -> Self {
        self.exclude_properties.push(name.into());
        self
    }
}

impl Default for MaskEngineOptions {
    fn default() -> Self {
        Self {
            mode: MaskingMode::Globally,
            mask_value: DEFAULT_MASK_VALUE.to_string(),
            operators: Self::default_operators(),
            mask_properties: MaskPropertyCollection::new(),
            exclude_properties: Vec::new(),
        }
    }
}

impl fmt::Debug for MaskEngineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaskEngineOptions")
            .field("mode", &self.mode)
            .field("mask_value", &self.mask_value)
            .field("operators", &self.operators.len())
            .field("mask_properties", &self.mask_properties)
            .field("exclude_properties", &self.exclude_properties)
            .finish()
    }
}

/// Masks sensitive data in log events.
///
/// The engine is a pure transform: [`MaskEngine::mask`] consumes an event
/// and produces a replacement with the same shape. It holds no per-event
/// state and can be shared across threads.
#[derive(Debug)]
pub struct MaskEngine {
    options: MaskEngineOptions,
    exclude: HashSet<String>,
}

impl MaskEngine {
    /// Builds an engine, validating the configuration.
    pub fn new(options: MaskEngineOptions) -> Result<Self, Error> {
        if options.mask_value.is_empty() {
            return Err(Error::EmptyMaskValue);
        }
        let exclude = options
            .exclude_properties
            .iter()
            .map(|name| name.to_ascii_lowercase())
            .collect();
        Ok(Self { options, exclude })
    }

    /// An engine with all-default options.
    pub fn with_defaults() -> Self {
        Self {
            options: MaskEngineOptions::default(),
            exclude: HashSet::new(),
        }
    }

    /// The engine's configuration.
    pub fn options(&self) -> &MaskEngineOptions {
        &self.options
    }

    fn is_active(&self) -> bool {
        self.options.mode == MaskingMode::Globally || SensitiveArea::is_active()
    }

    /// Masks `event`, returning the replacement event.
    ///
    /// In [`MaskingMode::InArea`] without an active area the event passes
    /// through unchanged.
    pub fn mask(&self, event: LogEvent) -> LogEvent {
        if !self.is_active() {
            trace!("masking inactive, event passed through");
            return event;
        }

        let (timestamp, level, exception, template, properties) = event.into_parts();

        // Template text only; property rules have nothing to match here.
        let template = match self.run_operators(template.text(), None) {
            Some(masked) => MessageTemplate::parse(&masked),
            None => template,
        };

        let properties = properties
            .into_iter()
            .map(|(name, value)| {
                let masked = self.mask_property_value(&name, value);
                (name, masked)
            })
            .collect();

        LogEvent::from_parts(timestamp, level, exception, template, properties)
    }

    /// Runs the chain over `input`. `None` means no operator matched.
    fn run_operators(&self, input: &str, property_name: Option<&str>) -> Option<String> {
        let mut current: Option<String> = None;
        for operator in &self.options.operators {
            let text = current.as_deref().unwrap_or(input);
            let outcome = match property_name {
                Some(name) => operator.mask_property(name, text, &self.options.mask_value),
                None => operator.mask(text, &self.options.mask_value),
            };
            if outcome.matched {
                current = Some(outcome.result);
            }
        }
        current
    }

    fn mask_property_value(&self, name: &str, value: PropertyValue) -> PropertyValue {
        if self.exclude.contains(&name.to_ascii_lowercase()) {
            return value;
        }
        if let Some(rule) = self.options.mask_properties.find(name) {
            return self.apply_rule(rule, value);
        }

        match value {
            PropertyValue::Scalar(ScalarValue::String(text)) => {
                match self.run_operators(&text, Some(name)) {
                    Some(masked) => PropertyValue::string(masked),
                    None => PropertyValue::Scalar(ScalarValue::String(text)),
                }
            }
            PropertyValue::Scalar(ScalarValue::Uri(uri)) => {
                match self.run_operators(uri.as_str(), Some(name)) {
                    Some(masked) => PropertyValue::string(masked),
                    None => PropertyValue::Scalar(ScalarValue::Uri(uri)),
                }
            }
            PropertyValue::Scalar(other) => PropertyValue::Scalar(other),
            PropertyValue::Sequence(items) => PropertyValue::Sequence(
                items
                    .into_iter()
                    .map(|item| self.mask_property_value(name, item))
                    .collect(),
            ),
            PropertyValue::Structure {
                type_tag,
                properties,
            } => PropertyValue::Structure {
                type_tag,
                properties: properties
                    .into_iter()
                    .map(|(sub_name, sub_value)| {
                        let masked = self.mask_property_value(&sub_name, sub_value);
                        (sub_name, masked)
                    })
                    .collect(),
            },
            PropertyValue::Dictionary(pairs) => PropertyValue::Dictionary(
                pairs
                    .into_iter()
                    .map(|(key, entry_value)| {
                        let key_name = key.render();
                        let masked = self.mask_property_value(&key_name, entry_value);
                        (key, masked)
                    })
                    .collect(),
            ),
        }
    }

    fn apply_rule(&self, rule: &MaskProperty, value: PropertyValue) -> PropertyValue {
        let mask = &self.options.mask_value;
        match (rule.options(), value) {
            (PropertyMaskOptions::Uri(uri_options), PropertyValue::Scalar(ScalarValue::Uri(uri))) => {
                PropertyValue::string(uri_options.apply_to(&uri))
            }
            // A URI rule on a non-URI value has no components to reveal.
            (PropertyMaskOptions::Uri(_), _) => PropertyValue::string(mask.clone()),
            (PropertyMaskOptions::Value(options), other) => {
                PropertyValue::string(options.apply_to(&other.render(), mask))
            }
        }
    }
}
