//! Property values: scalars and the nested value tree.

use url::Url;

/// A single scalar property value.
#[derive(Clone, Debug, PartialEq)]
pub enum ScalarValue {
    /// An absent value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// Text. The only scalar kind the operator chain scans.
    String(String),
    /// A parsed URI. Gets component-level masking under
    /// [`UriMaskOptions`](crate::UriMaskOptions).
    Uri(Url),
}

impl ScalarValue {
    /// Renders the scalar as display text.
    ///
    /// This is the text masking rules operate on when a non-string scalar is
    /// matched by a property rule.
    pub fn render(&self) -> String {
        match self {
            ScalarValue::Null => String::new(),
            ScalarValue::Bool(b) => b.to_string(),
            ScalarValue::Int(i) => i.to_string(),
            ScalarValue::Float(f) => f.to_string(),
            ScalarValue::String(s) => s.clone(),
            ScalarValue::Uri(u) => u.as_str().to_string(),
        }
    }
}

/// A property value of one of four shapes.
///
/// The engine matches this exhaustively; adding a shape forces every
/// dispatch site to handle it.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    /// A single value.
    Scalar(ScalarValue),
    /// An ordered collection of values.
    Sequence(Vec<PropertyValue>),
    /// A named record with ordered sub-properties.
    Structure {
        /// Optional type tag carried over from the source object.
        type_tag: Option<String>,
        /// Ordered `(name, value)` sub-properties.
        properties: Vec<(String, PropertyValue)>,
    },
    /// Key-value pairs with scalar keys.
    Dictionary(Vec<(ScalarValue, PropertyValue)>),
}

impl PropertyValue {
    /// Shorthand for a string scalar.
    pub fn string<S: Into<String>>(value: S) -> Self {
        PropertyValue::Scalar(ScalarValue::String(value.into()))
    }

    /// Shorthand for a URI scalar.
    pub fn uri(value: Url) -> Self {
        PropertyValue::Scalar(ScalarValue::Uri(value))
    }

    /// Shorthand for a structure without a type tag.
    pub fn structure(properties: Vec<(String, PropertyValue)>) -> Self {
        PropertyValue::Structure {
            type_tag: None,
            properties,
        }
    }

    /// Renders the value as display text.
    ///
    /// Scalars render directly; sequences as `[a, b]`; structures as
    /// `Tag { name: value }`; dictionaries as `{ key: value }`. Property
    /// rules that match a non-scalar value mask this rendering.
    pub fn render(&self) -> String {
        match self {
            PropertyValue::Scalar(scalar) => scalar.render(),
            PropertyValue::Sequence(items) => {
                let rendered: Vec<String> = items.iter().map(PropertyValue::render).collect();
                format!("[{}]", rendered.join(", "))
            }
            PropertyValue::Structure {
                type_tag,
                properties,
            } => {
                let body: Vec<String> = properties
                    .iter()
                    .map(|(name, value)| format!("{name}: {}", value.render()))
                    .collect();
                match type_tag {
                    Some(tag) => format!("{tag} {{ {} }}", body.join(", ")),
                    None => format!("{{ {} }}", body.join(", ")),
                }
            }
            PropertyValue::Dictionary(pairs) => {
                let body: Vec<String> = pairs
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key.render(), value.render()))
                    .collect();
                format!("{{ {} }}", body.join(", "))
            }
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::string(value)
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Scalar(ScalarValue::String(value))
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Scalar(ScalarValue::Int(value))
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Scalar(ScalarValue::Bool(value))
    }
}

impl From<Url> for PropertyValue {
    fn from(value: Url) -> Self {
        PropertyValue::Scalar(ScalarValue::Uri(value))
    }
}
