//! Email address masking.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use super::base::RegexMasking;

// RFC-5322-ish local@domain grammar, ASCII only. Quoted local parts and
// bracketed IP-literal domains are covered; internationalized addresses are
// not.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)(?:[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*|"(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21\x23-\x5b\x5d-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])*")@(?:(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?|\[(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?|[a-z0-9-]*[a-z0-9]:(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21-\x5a\x53-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])+)\])"#,
    )
    .expect("hard-coded email pattern must compile")
});

/// Masks email addresses, including URL-encoded ones (`user%40domain`).
#[derive(Clone, Copy, Debug, Default)]
pub struct EmailMaskingOperator;

impl EmailMaskingOperator {
    /// Creates the operator.
    pub fn new() -> Self {
        Self
    }
}

impl RegexMasking for EmailMaskingOperator {
    fn pattern(&self) -> &Regex {
        &EMAIL_PATTERN
    }

    // Decode URL-encoded @ so encoded addresses are caught too.
    fn preprocess_input<'a>(&self, input: &'a str, _property_name: Option<&str>) -> Cow<'a, str> {
        if input.contains("%40") {
            Cow::Owned(input.replace("%40", "@"))
        } else {
            Cow::Borrowed(input)
        }
    }

    // The grammar is expensive; skip inputs that cannot contain an address.
    fn should_mask_input(&self, input: &str, _property_name: Option<&str>) -> bool {
        input.contains('@')
    }
}
