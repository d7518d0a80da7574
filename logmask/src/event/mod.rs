//! The log-event model the masking engine operates on.
//!
//! This module provides:
//!
//! - **`value`**: [`ScalarValue`] and the [`PropertyValue`] tree (scalar /
//!   sequence / structure / dictionary)
//! - **`template`**: [`MessageTemplate`] with lenient hole parsing
//! - [`LogEvent`]: an immutable event carrying a timestamp, level, optional
//!   exception text, a template, and ordered named properties
//!
//! Events are never mutated in place. The engine consumes an event and
//! produces a replacement with the same shape.

mod template;
mod value;

use chrono::{DateTime, Utc};
pub use template::{MessageTemplate, TemplateToken};
pub use value::{PropertyValue, ScalarValue};

/// Severity of a log event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Fine-grained diagnostic detail.
    Trace,
    /// Diagnostic information.
    Debug,
    /// Routine operational messages.
    Info,
    /// Something unexpected but recoverable.
    Warn,
    /// A failure.
    Error,
}

/// An immutable structured log event.
///
/// The exception text, timestamp, and level pass through masking untouched;
/// the template and properties are rebuilt when masking changes them.
#[derive(Clone, Debug)]
pub struct LogEvent {
    timestamp: DateTime<Utc>,
    level: Level,
    exception: Option<String>,
    template: MessageTemplate,
    properties: Vec<(String, PropertyValue)>,
}

impl LogEvent {
    /// Creates an event with the current timestamp.
    ///
    /// The template text is parsed leniently; malformed hole syntax is kept
    /// as literal text.
    pub fn new(
        level: Level,
        template_text: &str,
        properties: Vec<(String, PropertyValue)>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            exception: None,
            template: MessageTemplate::parse(template_text),
            properties,
        }
    }

    /// Creates an event from already-built parts. Used by the engine to
    /// reassemble a masked event without re-deriving the timestamp.
    pub fn from_parts(
        timestamp: DateTime<Utc>,
        level: Level,
        exception: Option<String>,
        template: MessageTemplate,
        properties: Vec<(String, PropertyValue)>,
    ) -> Self {
        Self {
            timestamp,
            level,
            exception,
            template,
            properties,
        }
    }

    /// Attaches exception text to the event.
    #[must_use]
    pub fn with_exception<E: Into<String>>(mut self, exception: E) -> Self {
        self.exception = Some(exception.into());
        self
    }

    /// When the event was created.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The event severity.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Exception text attached to the event, if any.
    pub fn exception(&self) -> Option<&str> {
        self.exception.as_deref()
    }

    /// The message template.
    pub fn template(&self) -> &MessageTemplate {
        &self.template
    }

    /// The ordered `(name, value)` properties.
    pub fn properties(&self) -> &[(String, PropertyValue)] {
        &self.properties
    }

    /// Looks up a top-level property by exact name.
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Renders the template with this event's properties substituted.
    pub fn render_message(&self) -> String {
        self.template.render(&self.properties)
    }

    /// Decomposes the event into its parts.
    pub fn into_parts(
        self,
    ) -> (
        DateTime<Utc>,
        Level,
        Option<String>,
        MessageTemplate,
        Vec<(String, PropertyValue)>,
    ) {
        (
            self.timestamp,
            self.level,
            self.exception,
            self.template,
            self.properties,
        )
    }
}
