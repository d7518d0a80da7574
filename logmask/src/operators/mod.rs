//! Masking operators: pattern-match-and-replace units over text.
//!
//! This module provides:
//!
//! - **`base`**: the [`RegexMasking`] hook trait and the shared match-and-replace
//!   algorithm every regex-backed operator reuses, plus
//!   [`PatternMaskingOperator`] for user-supplied patterns
//! - **`email`**, **`iban`**, **`credit_card`**, **`path`**, **`uri`**: the
//!   built-in operators
//!
//! Operators are chained by the engine in configured order; each operator
//! sees the output of the previous one and all of them run (no
//! first-match-wins).

mod base;
mod credit_card;
mod email;
mod iban;
mod path;
mod uri;

pub use base::{PatternMaskingOperator, RegexMasking};
pub use credit_card::CreditCardMaskingOperator;
pub use email::EmailMaskingOperator;
pub use iban::IbanMaskingOperator;
pub use path::PathMaskingOperator;
pub use uri::UriMaskingOperator;

/// Outcome of one masking attempt.
///
/// When `matched` is false, `result` carries no meaning; callers fall back
/// to the original input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskingResult {
    /// Whether the operator changed the input.
    pub matched: bool,
    /// The masked text, meaningful only when `matched` is true.
    pub result: String,
}

impl MaskingResult {
    /// The negative outcome: nothing to mask.
    pub fn no_match() -> Self {
        Self {
            matched: false,
            result: String::new(),
        }
    }

    /// A positive outcome carrying the masked text.
    pub fn matched(result: String) -> Self {
        Self {
            matched: true,
            result,
        }
    }
}

/// A unit of pattern-match-and-replace logic over a string.
///
/// `mask` handles free text (message templates); `mask_property` is called
/// for property values and defaults to ignoring the property name. Masking
/// is total: operators signal "nothing found" through
/// [`MaskingResult::no_match`], never through errors.
pub trait MaskingOperator: Send + Sync {
    /// Masks sensitive spans in `input`, replacing them with `mask`.
    fn mask(&self, input: &str, mask: &str) -> MaskingResult;

    /// Masks a property value. The property name is available for operators
    /// that want it; the default implementation ignores it.
    fn mask_property(&self, property_name: &str, input: &str, mask: &str) -> MaskingResult {
        let _ = property_name;
        self.mask(input, mask)
    }
}
