//! The regex match-and-replace algorithm shared by all built-in operators.
//!
//! [`RegexMasking`] exposes four hooks around one engine:
//!
//! 1. `preprocess_input` rewrites the input before matching (e.g. decoding
//!    `%40` to `@`).
//! 2. `should_mask_input` short-circuits before running the pattern (e.g.
//!    skipping the email grammar when there is no `@`).
//! 3. `should_mask_match` accepts or rejects each individual match; rejected
//!    matches are left untouched.
//! 4. `preprocess_mask` shapes the replacement for an accepted match (e.g.
//!    reinjecting preserved digit groups around the mask).
//!
//! Every type implementing [`RegexMasking`] is a
//! [`MaskingOperator`] through the blanket implementation below.

use std::borrow::Cow;

use regex::{Captures, Regex};

use super::{MaskingOperator, MaskingResult};
use crate::error::Error;

/// Hook trait for regex-backed masking operators.
pub trait RegexMasking: Send + Sync {
    /// The compiled pattern to scan with.
    fn pattern(&self) -> &Regex;

    /// Rewrites the input before matching. Default: identity.
    fn preprocess_input<'a>(&self, input: &'a str, property_name: Option<&str>) -> Cow<'a, str> {
        let _ = property_name;
        Cow::Borrowed(input)
    }

    /// Decides whether the (preprocessed) input is worth scanning at all.
    /// Default: always.
    fn should_mask_input(&self, input: &str, property_name: Option<&str>) -> bool {
        let _ = (input, property_name);
        true
    }

    /// Accepts or rejects one match. Rejected matches stay untouched.
    /// Default: accept.
    fn should_mask_match(&self, found: &Captures<'_>) -> bool {
        let _ = found;
        true
    }

    /// Produces the replacement text for an accepted match. Default: the
    /// mask value unchanged.
    fn preprocess_mask(&self, mask: &str, found: &Captures<'_>) -> String {
        let _ = found;
        mask.to_string()
    }
}

fn run<T: RegexMasking + ?Sized>(
    operator: &T,
    input: &str,
    mask: &str,
    property_name: Option<&str>,
) -> MaskingResult {
    let prepared = operator.preprocess_input(input, property_name);
    if !operator.should_mask_input(&prepared, property_name) {
        return MaskingResult::no_match();
    }

    let replaced = operator.pattern().replace_all(&prepared, |found: &Captures<'_>| {
        if operator.should_mask_match(found) {
            operator.preprocess_mask(mask, found)
        } else {
            found[0].to_string()
        }
    });

    // Matched iff the output differs from the original (pre-preprocessing)
    // input, so a preprocessing rewrite alone also counts as a match.
    if replaced != input {
        MaskingResult::matched(replaced.into_owned())
    } else {
        MaskingResult::no_match()
    }
}

impl<T: RegexMasking> MaskingOperator for T {
    fn mask(&self, input: &str, mask: &str) -> MaskingResult {
        run(self, input, mask, None)
    }

    fn mask_property(&self, property_name: &str, input: &str, mask: &str) -> MaskingResult {
        run(self, input, mask, Some(property_name))
    }
}

/// A masking operator built from a user-supplied regex pattern.
///
/// Construction fails fast on an empty or whitespace-only pattern and on
/// invalid regex syntax; a pattern that silently matched nothing would
/// under-mask.
///
/// # Example
/// ```
/// use logmask::{MaskingOperator, PatternMaskingOperator};
///
/// let operator = PatternMaskingOperator::new(r"\d{3}-\d{2}-\d{4}").unwrap();
/// let outcome = operator.mask("ssn 078-05-1120", "***MASKED***");
/// assert!(outcome.matched);
/// assert_eq!(outcome.result, "ssn ***MASKED***");
/// ```
#[derive(Clone, Debug)]
pub struct PatternMaskingOperator {
    pattern: Regex,
}

impl PatternMaskingOperator {
    /// Compiles `pattern` into an operator.
    pub fn new(pattern: &str) -> Result<Self, Error> {
        if pattern.trim().is_empty() {
            return Err(Error::EmptyPattern);
        }
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }
}

impl RegexMasking for PatternMaskingOperator {
    fn pattern(&self) -> &Regex {
        &self.pattern
    }
}
