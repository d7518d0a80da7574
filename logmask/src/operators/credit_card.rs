//! Credit card number masking.
//!
//! Matches sixteen digits in groups of four with an optional, consistent
//! space or dash separator. Rust's `regex` crate has no backreferences, so
//! separator consistency is enforced per match through
//! [`RegexMasking::should_mask_match`]: a candidate with mixed separators is
//! left untouched.
//!
//! No Luhn validation is performed; any sixteen-digit grouped sequence of
//! the right shape is masked, trading over-masking for simpler detection.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::base::RegexMasking;

static FULL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{4}(?P<sep1>[ -]?)\d{4}(?P<sep2>[ -]?)\d{4}(?P<sep3>[ -]?)\d{4}")
        .expect("hard-coded credit card pattern must compile")
});

// Splits the digits into the leading four, the middle six to be masked, and
// the trailing six to keep.
static PARTIAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<lead>\d{4})(?P<sep1>[ -]?)(?P<mid4>\d{4})(?P<sep2>[ -]?)(?P<mid2>\d{2})(?P<tr2>\d{2})(?P<sep3>[ -]?)(?P<tr4>\d{4})",
    )
    .expect("hard-coded credit card pattern must compile")
});

/// Masks credit card numbers, fully or keeping the leading four and
/// trailing six digits.
#[derive(Clone, Copy, Debug)]
pub struct CreditCardMaskingOperator {
    full_mask: bool,
}

impl CreditCardMaskingOperator {
    /// Creates the operator. With `full_mask` the entire number is replaced;
    /// otherwise the leading four and trailing six digits stay visible with
    /// their separators.
    pub fn new(full_mask: bool) -> Self {
        Self { full_mask }
    }
}

impl Default for CreditCardMaskingOperator {
    fn default() -> Self {
        Self::new(true)
    }
}

fn group<'a>(found: &'a Captures<'_>, name: &str) -> &'a str {
    found.name(name).map_or("", |m| m.as_str())
}

impl RegexMasking for CreditCardMaskingOperator {
    fn pattern(&self) -> &Regex {
        if self.full_mask {
            &FULL_PATTERN
        } else {
            &PARTIAL_PATTERN
        }
    }

    // Later separators must repeat the first one or be absent, mirroring a
    // backreference.
    fn should_mask_match(&self, found: &Captures<'_>) -> bool {
        let first = group(found, "sep1");
        [group(found, "sep2"), group(found, "sep3")]
            .iter()
            .all(|sep| sep.is_empty() || *sep == first)
    }

    fn preprocess_mask(&self, mask: &str, found: &Captures<'_>) -> String {
        if self.full_mask {
            return mask.to_string();
        }
        format!(
            "{}{}{mask}{}{}{}",
            group(found, "lead"),
            group(found, "sep1"),
            group(found, "tr2"),
            group(found, "sep3"),
            group(found, "tr4"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::MaskingOperator;

    const MASK: &str = "***MASKED***";

    fn masked(input: &str, full_mask: bool) -> String {
        let outcome = CreditCardMaskingOperator::new(full_mask).mask(input, MASK);
        if outcome.matched {
            outcome.result
        } else {
            input.to_string()
        }
    }

    #[test]
    fn full_mask_replaces_the_number() {
        assert_eq!(masked("4111 1111 1111 1111", true), MASK);
        assert_eq!(masked("4111-1111-1111-1111", true), MASK);
        assert_eq!(masked("4111111111111111", true), MASK);
    }

    #[test]
    fn partial_mask_keeps_leading_four_and_trailing_six() {
        assert_eq!(masked("4111 1111 1111 1111", false), "4111 ***MASKED***11 1111");
        assert_eq!(masked("4111-1111-1111-1111", false), "4111-***MASKED***11-1111");
        assert_eq!(masked("4111111111111111", false), "4111***MASKED***111111");
    }

    #[test]
    fn default_is_full_mask() {
        let outcome = CreditCardMaskingOperator::default().mask("4111111111111111", MASK);
        assert!(outcome.matched);
        assert_eq!(outcome.result, MASK);
    }

    #[test]
    fn mixed_separators_are_left_alone() {
        assert_eq!(masked("4111 1111-1111 1111", true), "4111 1111-1111 1111");
    }

    #[test]
    fn missing_later_separators_still_mask() {
        assert_eq!(masked("4111 11111111 1111", true), MASK);
    }

    #[test]
    fn invalid_luhn_checksum_is_still_masked() {
        // Shape-only detection: 4111 1111 1111 1112 fails Luhn but masks.
        assert_eq!(masked("4111 1111 1111 1112", true), MASK);
    }

    #[test]
    fn number_inside_text_is_masked() {
        assert_eq!(
            masked("paid with 4111111111111111 today", true),
            "paid with ***MASKED*** today"
        );
    }

    #[test]
    fn fifteen_digits_are_not_masked() {
        assert_eq!(masked("411111111111111", true), "411111111111111");
    }
}
