//! Message templates with named holes.
//!
//! Templates use `{Name}` holes with optional `@`/`$` destructuring sigils,
//! `{{` and `}}` escapes, and lenient parsing: anything that does not form a
//! well-formed hole stays literal text. The engine re-parses the template
//! after masking its text so holes survive masking of the surrounding
//! literal content.

use crate::event::PropertyValue;

/// One parsed piece of a message template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplateToken {
    /// Literal text between holes, with escapes resolved.
    Text(String),
    /// A named hole.
    Hole {
        /// The raw hole content, including sigil and format, as written.
        raw: String,
        /// The property name the hole refers to (sigil and format stripped).
        name: String,
    },
}

/// A parsed message template.
///
/// Keeps both the original text (the string masking operators scan) and the
/// token list used for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageTemplate {
    text: String,
    tokens: Vec<TemplateToken>,
}

impl MessageTemplate {
    /// Parses template text. Never fails; malformed holes become literal
    /// text.
    pub fn parse(text: &str) -> Self {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut rest = text;

        while let Some(open) = rest.find(['{', '}']) {
            let (before, at) = rest.split_at(open);
            literal.push_str(before);

            if let Some(stripped) = at.strip_prefix("{{") {
                literal.push('{');
                rest = stripped;
            } else if let Some(stripped) = at.strip_prefix("}}") {
                literal.push('}');
                rest = stripped;
            } else if at.starts_with('}') {
                // Unbalanced close brace, keep it literal.
                literal.push('}');
                rest = &at[1..];
            } else {
                // A '{' that may open a hole.
                match Self::take_hole(&at[1..]) {
                    Some((raw, name, remainder)) => {
                        if !literal.is_empty() {
                            tokens.push(TemplateToken::Text(std::mem::take(&mut literal)));
                        }
                        tokens.push(TemplateToken::Hole { raw, name });
                        rest = remainder;
                    }
                    None => {
                        literal.push('{');
                        rest = &at[1..];
                    }
                }
            }
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            tokens.push(TemplateToken::Text(literal));
        }

        Self {
            text: text.to_string(),
            tokens,
        }
    }

    /// Tries to read a hole body from text following an opening brace.
    /// Returns the raw body, the property name, and the remaining input.
    fn take_hole(after_brace: &str) -> Option<(String, String, &str)> {
        let close = after_brace.find('}')?;
        let raw = &after_brace[..close];
        let without_sigil = raw.strip_prefix(['@', '$']).unwrap_or(raw);
        let name = without_sigil
            .split_once([':', ','])
            .map_or(without_sigil, |(n, _)| n);

        if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return None;
        }

        Some((
            raw.to_string(),
            name.to_string(),
            &after_brace[close + 1..],
        ))
    }

    /// The raw template text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The parsed tokens.
    pub fn tokens(&self) -> &[TemplateToken] {
        &self.tokens
    }

    /// The names of all holes, in order of appearance.
    pub fn hole_names(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter_map(|token| match token {
            TemplateToken::Hole { name, .. } => Some(name.as_str()),
            TemplateToken::Text(_) => None,
        })
    }

    /// Renders the template, substituting property values for holes.
    ///
    /// Holes without a matching property render as written.
    pub fn render(&self, properties: &[(String, PropertyValue)]) -> String {
        let mut out = String::with_capacity(self.text.len());
        for token in &self.tokens {
            match token {
                TemplateToken::Text(text) => out.push_str(text),
                TemplateToken::Hole { raw, name } => {
                    match properties.iter().find(|(n, _)| n == name) {
                        Some((_, value)) => out.push_str(&value.render()),
                        None => {
                            out.push('{');
                            out.push_str(raw);
                            out.push('}');
                        }
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_text_and_holes() {
        let template = MessageTemplate::parse("User {Name} logged in from {Ip}");
        let holes: Vec<&str> = template.hole_names().collect();
        assert_eq!(holes, ["Name", "Ip"]);
    }

    #[test]
    fn strips_destructuring_sigil() {
        let template = MessageTemplate::parse("Got {@Payload}");
        let holes: Vec<&str> = template.hole_names().collect();
        assert_eq!(holes, ["Payload"]);
    }

    #[test]
    fn strips_format_specifier() {
        let template = MessageTemplate::parse("Took {Elapsed:000} ms");
        let holes: Vec<&str> = template.hole_names().collect();
        assert_eq!(holes, ["Elapsed"]);
    }

    #[test]
    fn escaped_braces_are_literal() {
        let template = MessageTemplate::parse("{{not a hole}}");
        assert_eq!(
            template.tokens(),
            [TemplateToken::Text("{not a hole}".to_string())]
        );
    }

    #[test]
    fn unterminated_brace_is_literal() {
        let template = MessageTemplate::parse("oops {Name");
        assert_eq!(
            template.tokens(),
            [TemplateToken::Text("oops {Name".to_string())]
        );
        assert_eq!(template.hole_names().count(), 0);
    }

    #[test]
    fn hole_with_spaces_is_literal() {
        let template = MessageTemplate::parse("{not a hole}");
        assert_eq!(template.hole_names().count(), 0);
    }

    #[test]
    fn renders_with_properties() {
        let template = MessageTemplate::parse("User {Name} logged in");
        let rendered = template.render(&[("Name".to_string(), PropertyValue::string("bob"))]);
        assert_eq!(rendered, "User bob logged in");
    }

    #[test]
    fn renders_missing_property_as_written() {
        let template = MessageTemplate::parse("User {Name}");
        assert_eq!(template.render(&[]), "User {Name}");
    }

    #[test]
    fn masked_text_reparses_with_holes_intact() {
        // A masked template keeps its holes after re-parsing.
        let masked = "***MASKED*** sent {Amount} to {Recipient}";
        let template = MessageTemplate::parse(masked);
        let holes: Vec<&str> = template.hole_names().collect();
        assert_eq!(holes, ["Amount", "Recipient"]);
        assert_eq!(template.text(), masked);
    }
}
