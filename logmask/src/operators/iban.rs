//! IBAN masking.

use std::sync::LazyLock;

use regex::Regex;

use super::base::RegexMasking;

// Two-letter country code, two check digits, four bank-code characters,
// seven digits, then up to sixteen alphanumeric account characters.
static IBAN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z]{2}[0-9]{2}[a-zA-Z0-9]{4}[0-9]{7}([a-zA-Z0-9]?){0,16}")
        .expect("hard-coded IBAN pattern must compile")
});

/// Masks international bank account numbers.
#[derive(Clone, Copy, Debug, Default)]
pub struct IbanMaskingOperator;

impl IbanMaskingOperator {
    /// Creates the operator.
    pub fn new() -> Self {
        Self
    }
}

impl RegexMasking for IbanMaskingOperator {
    fn pattern(&self) -> &Regex {
        &IBAN_PATTERN
    }
}
