//! URI masking: query-string redaction for URLs found in free text.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::base::RegexMasking;

static URI_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bhttps?://[^\s"'<>]+"#).expect("hard-coded URI pattern must compile")
});

/// Masks the query string of http(s) URLs, or the entire URL.
///
/// Query parameters are where sensitive values usually leak (tokens, email
/// addresses, callback targets), so the default leaves the rest of the URL
/// readable.
#[derive(Clone, Copy, Debug, Default)]
pub struct UriMaskingOperator {
    mask_entire_uri: bool,
}

impl UriMaskingOperator {
    /// Creates the operator. With `mask_entire_uri` the whole URL is
    /// replaced; otherwise only the query string is.
    pub fn new(mask_entire_uri: bool) -> Self {
        Self { mask_entire_uri }
    }
}

impl RegexMasking for UriMaskingOperator {
    fn pattern(&self) -> &Regex {
        &URI_PATTERN
    }

    // In query-only mode a URL without a query has nothing to hide.
    fn should_mask_match(&self, found: &Captures<'_>) -> bool {
        self.mask_entire_uri || found[0].contains('?')
    }

    fn preprocess_mask(&self, mask: &str, found: &Captures<'_>) -> String {
        if self.mask_entire_uri {
            return mask.to_string();
        }
        match found[0].split_once('?') {
            Some((base, _)) => format!("{base}?{mask}"),
            None => found[0].to_string(),
        }
    }
}
