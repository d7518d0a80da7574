//! How much of a matched value to reveal.
//!
//! [`MaskOptions`] drives the partial-masking algorithm (show-first /
//! show-last / preserve-length); [`UriMaskOptions`] reveals URI components
//! individually. Both are pure string transforms with defined output for
//! every input, including empty and very short strings.

use url::Url;

/// The fixed pad marker used when the original length is not preserved and
/// for hidden URI components.
const FIXED_PAD: &str = "***";

/// Partial-masking options for a property rule.
///
/// With neither `show_first` nor `show_last` set, the value is replaced by
/// the engine's mask value outright.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct MaskOptions {
    /// Number of leading characters to keep visible.
    pub show_first: Option<usize>,
    /// Number of trailing characters to keep visible.
    pub show_last: Option<usize>,
    /// Pad the hidden span with `*` to the original length; otherwise a
    /// fixed `***` marker replaces it.
    pub preserve_length: bool,
    /// Interpret `*` in the rule's property name as a wildcard.
    pub wildcard_match: bool,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            show_first: None,
            show_last: None,
            preserve_length: true,
            wildcard_match: false,
        }
    }
}

impl MaskOptions {
    /// Options that reveal the first `count` characters.
    #[must_use]
    pub fn show_first(count: usize) -> Self {
        Self {
            show_first: Some(count),
            ..Self::default()
        }
    }

    /// Options that reveal the last `count` characters.
    #[must_use]
    pub fn show_last(count: usize) -> Self {
        Self {
            show_last: Some(count),
            ..Self::default()
        }
    }

    /// Enables wildcard property-name matching.
    #[must_use]
    pub fn with_wildcard_match(mut self) -> Self {
        self.wildcard_match = true;
        self
    }

    /// Disables length preservation in favor of the fixed `***` marker.
    #[must_use]
    pub fn without_preserved_length(mut self) -> Self {
        self.preserve_length = false;
        self
    }

    /// Applies partial masking to `input`, falling back to `mask` when
    /// nothing can be revealed.
    ///
    /// Reveal counts that meet or exceed the input length degrade to a
    /// single revealed character (or, when both ends are revealed, to a
    /// graduated fallback keyed on the input length).
    pub fn apply_to(&self, input: &str, mask: &str) -> String {
        let chars: Vec<char> = input.chars().collect();
        let len = chars.len();
        if len == 0 {
            return mask.to_string();
        }

        match (self.show_first, self.show_last) {
            (None, None) => mask.to_string(),
            (Some(first), None) => {
                let shown = if first >= len { 1 } else { first };
                let head: String = chars[..shown].iter().collect();
                if self.preserve_length {
                    format!("{head}{}", "*".repeat(len - shown))
                } else {
                    format!("{head}{FIXED_PAD}")
                }
            }
            (None, Some(last)) => {
                let shown = if last >= len { 1 } else { last };
                let tail: String = chars[len - shown..].iter().collect();
                if self.preserve_length {
                    format!("{}{tail}", "*".repeat(len - shown))
                } else {
                    format!("{FIXED_PAD}{tail}")
                }
            }
            (Some(first), Some(last)) => {
                if first.saturating_add(last) >= len {
                    // Nothing would be hidden; degrade by input length.
                    if len > 3 {
                        format!("{}{FIXED_PAD}{}", chars[0], chars[len - 1])
                    } else if len == 3 {
                        format!("{}{FIXED_PAD}", chars[0])
                    } else {
                        mask.to_string()
                    }
                } else {
                    let head: String = chars[..first].iter().collect();
                    let tail: String = chars[len - last..].iter().collect();
                    if self.preserve_length {
                        format!("{head}{}{tail}", "*".repeat(len - first - last))
                    } else {
                        format!("{head}{FIXED_PAD}{tail}")
                    }
                }
            }
        }
    }
}

/// Component-level masking for URI-valued properties.
///
/// Each component is revealed or replaced by `***` independently; the URI is
/// reassembled as `scheme://host/path?query`. A hidden query renders as
/// `?***` even when the original URI had none.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct UriMaskOptions {
    /// Reveal the scheme.
    pub show_scheme: bool,
    /// Reveal the host.
    pub show_host: bool,
    /// Reveal the path.
    pub show_path: bool,
    /// Reveal the query string.
    pub show_query_string: bool,
    /// Interpret `*` in the rule's property name as a wildcard.
    pub wildcard_match: bool,
}

impl Default for UriMaskOptions {
    fn default() -> Self {
        Self {
            show_scheme: true,
            show_host: true,
            show_path: false,
            show_query_string: false,
            wildcard_match: false,
        }
    }
}

impl UriMaskOptions {
    /// Masks `uri` component by component.
    pub fn apply_to(&self, uri: &Url) -> String {
        let scheme = if self.show_scheme {
            uri.scheme()
        } else {
            FIXED_PAD
        };
        let host = if self.show_host {
            uri.host_str().unwrap_or("")
        } else {
            FIXED_PAD
        };
        let path = if self.show_path { uri.path() } else { "/***" };
        let query = if self.show_query_string {
            uri.query().map(|q| format!("?{q}")).unwrap_or_default()
        } else {
            format!("?{FIXED_PAD}")
        };
        format!("{scheme}://{host}{path}{query}")
    }
}

/// The options attached to one property rule: plain partial masking, or
/// URI component masking for URI-valued properties.
///
/// A URI rule applied to a non-URI value masks it fully.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyMaskOptions {
    /// Partial masking of the rendered value.
    Value(MaskOptions),
    /// Component masking of a URI value.
    Uri(UriMaskOptions),
}

impl PropertyMaskOptions {
    /// Whether the rule's property name uses wildcard matching.
    pub fn wildcard_match(&self) -> bool {
        match self {
            PropertyMaskOptions::Value(options) => options.wildcard_match,
            PropertyMaskOptions::Uri(options) => options.wildcard_match,
        }
    }
}

impl Default for PropertyMaskOptions {
    fn default() -> Self {
        PropertyMaskOptions::Value(MaskOptions::default())
    }
}

impl From<MaskOptions> for PropertyMaskOptions {
    fn from(options: MaskOptions) -> Self {
        PropertyMaskOptions::Value(options)
    }
}

impl From<UriMaskOptions> for PropertyMaskOptions {
    fn from(options: UriMaskOptions) -> Self {
        PropertyMaskOptions::Uri(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MASK: &str = "***MASKED***";

    fn options(
        show_first: Option<usize>,
        show_last: Option<usize>,
        preserve_length: bool,
    ) -> MaskOptions {
        MaskOptions {
            show_first,
            show_last,
            preserve_length,
            wildcard_match: false,
        }
    }

    #[test]
    fn behavior_table() {
        // (input, show_first, show_last, preserve_length, expected)
        let cases: &[(&str, Option<usize>, Option<usize>, bool, &str)] = &[
            ("1234567890", Some(2), Some(2), true, "12******90"),
            ("1234567890", Some(2), Some(2), false, "12***90"),
            ("1234567890", Some(2), None, false, "12***"),
            ("1234567890", Some(2), None, true, "12********"),
            ("1234567890", None, Some(2), false, "***90"),
            ("1234567890", None, Some(2), true, "********90"),
            ("1234", Some(2), Some(2), true, "1***4"),
            ("1234", Some(2), Some(3), true, "1***4"),
            ("124", Some(2), Some(2), true, "1***"),
            ("12", Some(2), Some(2), true, MASK),
            ("1234", Some(5), None, true, "1***"),
            ("1234", None, Some(5), true, "***4"),
        ];

        for (input, first, last, preserve, expected) in cases {
            assert_eq!(
                options(*first, *last, *preserve).apply_to(input, MASK),
                *expected,
                "input={input:?} first={first:?} last={last:?} preserve={preserve}"
            );
        }
    }

    #[test]
    fn unset_options_use_the_mask_value() {
        assert_eq!(MaskOptions::default().apply_to("anything", MASK), MASK);
    }

    #[test]
    fn empty_input_uses_the_mask_value() {
        assert_eq!(MaskOptions::show_first(2).apply_to("", MASK), MASK);
    }

    #[test]
    fn zero_reveal_masks_everything() {
        assert_eq!(options(Some(0), Some(0), true).apply_to("abcd", MASK), "****");
    }

    #[test]
    fn uri_component_table() {
        let uri = Url::parse("https://example.com/some/sensitive/path?foo=bar").unwrap();
        // (show_scheme, show_host, show_path, show_query, expected)
        let cases: &[(bool, bool, bool, bool, &str)] = &[
            (true, false, false, false, "https://***/***?***"),
            (true, true, false, false, "https://example.com/***?***"),
            (true, true, true, false, "https://example.com/some/sensitive/path?***"),
            (true, false, true, true, "https://***/some/sensitive/path?foo=bar"),
            (false, false, true, true, "***://***/some/sensitive/path?foo=bar"),
            (false, false, true, false, "***://***/some/sensitive/path?***"),
        ];

        for (scheme, host, path, query, expected) in cases {
            let uri_options = UriMaskOptions {
                show_scheme: *scheme,
                show_host: *host,
                show_path: *path,
                show_query_string: *query,
                wildcard_match: false,
            };
            assert_eq!(&uri_options.apply_to(&uri), expected);
        }
    }

    #[test]
    fn uri_without_query_still_pads_hidden_query() {
        let uri = Url::parse("https://example.com/path").unwrap();
        let shown = UriMaskOptions {
            show_path: true,
            show_query_string: true,
            ..UriMaskOptions::default()
        };
        assert_eq!(shown.apply_to(&uri), "https://example.com/path");

        let hidden = UriMaskOptions::default();
        assert_eq!(hidden.apply_to(&uri), "https://example.com/***?***");
    }
}
