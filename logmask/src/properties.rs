//! Property-name rules: exact and wildcard matching.
//!
//! A [`MaskProperty`] pairs a configured property name with its
//! [`PropertyMaskOptions`]. Names may carry `*` wildcards (`*x`, `x*`,
//! `*x*`) when the rule opts into wildcard matching; matching is
//! ASCII-case-insensitive either way. Wildcard rules remember names they
//! have confirmed so repeat occurrences of the same schema skip the
//! substring search.

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

use crate::options::PropertyMaskOptions;

/// Where the wildcard sits in the configured name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WildcardPosition {
    /// `*x`: the property name must end with the literal.
    Leading,
    /// `x*`: the property name must start with the literal.
    Trailing,
    /// `*x*`: the literal must occur past the first character.
    Both,
}

#[derive(Clone, Debug)]
struct WildcardRule {
    position: WildcardPosition,
    /// The literal between the wildcards, lowercased.
    literal: String,
    /// Shorter names can never match; checked before any substring search.
    min_len: usize,
}

impl WildcardRule {
    fn derive(name: &str) -> Option<Self> {
        let leading = name.starts_with('*');
        let trailing = name.len() > 1 && name.ends_with('*');
        let position = match (leading, trailing) {
            (true, true) => WildcardPosition::Both,
            (true, false) => WildcardPosition::Leading,
            (false, true) => WildcardPosition::Trailing,
            // A '*' only in the middle of the name has no defined meaning;
            // fall back to exact matching.
            (false, false) => return None,
        };
        let literal = name.trim_matches('*').to_ascii_lowercase();
        let min_len = match position {
            WildcardPosition::Both => literal.len() + 2,
            _ => literal.len() + 1,
        };
        Some(Self {
            position,
            literal,
            min_len,
        })
    }

    fn matches(&self, candidate: &str) -> bool {
        if candidate.len() < self.min_len {
            return false;
        }
        match self.position {
            WildcardPosition::Leading => candidate.ends_with(&self.literal),
            WildcardPosition::Trailing => candidate.starts_with(&self.literal),
            WildcardPosition::Both => candidate
                .find(&self.literal)
                .is_some_and(|idx| idx > 0),
        }
    }
}

/// One property rule: a configured name plus masking options.
#[derive(Debug)]
pub struct MaskProperty {
    name: String,
    options: PropertyMaskOptions,
    wildcard: Option<WildcardRule>,
    /// Names already confirmed to match this wildcard rule. Insertion is
    /// idempotent, so a lost race costs one repeated derivation at most.
    matched_names: RwLock<HashSet<String>>,
}

impl MaskProperty {
    /// Creates a rule. Wildcard matching activates only when the options
    /// request it *and* the name actually contains a `*`; otherwise the
    /// rule silently degrades to exact matching.
    pub fn new<N: Into<String>>(name: N, options: impl Into<PropertyMaskOptions>) -> Self {
        let name = name.into();
        let options = options.into();
        let wildcard = if options.wildcard_match() && name.contains('*') {
            WildcardRule::derive(&name)
        } else {
            None
        };
        Self {
            name,
            options,
            wildcard,
            matched_names: RwLock::new(HashSet::new()),
        }
    }

    /// A rule with all-default options (full mask).
    pub fn with_defaults<N: Into<String>>(name: N) -> Self {
        Self::new(name, PropertyMaskOptions::default())
    }

    /// The configured name, as written.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rule's masking options.
    pub fn options(&self) -> &PropertyMaskOptions {
        &self.options
    }

    /// Whether the rule matches in wildcard mode.
    pub fn is_wildcard(&self) -> bool {
        self.wildcard.is_some()
    }

    /// Whether `property_name` matches this rule, case-insensitively.
    pub fn is_match(&self, property_name: &str) -> bool {
        let Some(rule) = &self.wildcard else {
            return self.name.eq_ignore_ascii_case(property_name);
        };

        let candidate = property_name.to_ascii_lowercase();
        if self
            .matched_names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&candidate)
        {
            return true;
        }

        let hit = rule.matches(&candidate);
        if hit {
            self.matched_names
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(candidate);
        }
        hit
    }
}

impl Clone for MaskProperty {
    fn clone(&self) -> Self {
        let matched_names = self
            .matched_names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        Self {
            name: self.name.clone(),
            options: self.options,
            wildcard: self.wildcard.clone(),
            matched_names: RwLock::new(matched_names),
        }
    }
}

/// An ordered collection of property rules with O(1) exact-name lookup.
///
/// Wildcard rules are scanned in configured order only when the exact
/// lookup misses.
#[derive(Clone, Debug, Default)]
pub struct MaskPropertyCollection {
    entries: Vec<MaskProperty>,
    exact: HashMap<String, usize>,
    wildcards: Vec<usize>,
}

impl MaskPropertyCollection {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection of all-default rules from names.
    pub fn from_names<I, N>(names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let mut collection = Self::new();
        for name in names {
            collection.add(MaskProperty::with_defaults(name));
        }
        collection
    }

    /// Appends a rule. A later rule with the same exact name shadows an
    /// earlier one.
    pub fn add(&mut self, property: MaskProperty) {
        let index = self.entries.len();
        if property.is_wildcard() {
            self.wildcards.push(index);
        } else {
            self.exact
                .insert(property.name().to_ascii_lowercase(), index);
        }
        self.entries.push(property);
    }

    /// Appends an all-default rule for `name`.
    pub fn add_named<N: Into<String>>(&mut self, name: N) {
        self.add(MaskProperty::with_defaults(name));
    }

    /// Finds the rule matching `property_name`: exact lookup first, then
    /// wildcard rules in order.
    pub fn find(&self, property_name: &str) -> Option<&MaskProperty> {
        if let Some(&index) = self.exact.get(&property_name.to_ascii_lowercase()) {
            return self.entries.get(index);
        }
        self.wildcards
            .iter()
            .filter_map(|&index| self.entries.get(index))
            .find(|property| property.is_match(property_name))
    }

    /// The rules in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &MaskProperty> {
        self.entries.iter()
    }

    /// The number of rules.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection has no rules.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<MaskProperty> for MaskPropertyCollection {
    fn from_iter<I: IntoIterator<Item = MaskProperty>>(iter: I) -> Self {
        let mut collection = Self::new();
        for property in iter {
            collection.add(property);
        }
        collection
    }
}
