//! Pattern-driven masking of sensitive data in structured log events.
//!
//! This crate separates:
//! - **Masking operators**: pattern-match-and-replace units that find
//!   sensitive spans (emails, IBANs, credit cards, paths, URIs, custom
//!   patterns) in text.
//! - **Property rules**: name-driven rules (exact or wildcard) that mask a
//!   property's value with configurable partial reveal.
//! - **The engine**: a recursive walk over a log event's message template and
//!   nested property tree that applies rules and operators and rebuilds the
//!   event.
//!
//! What this crate does:
//! - defines an immutable log-event model (scalar / sequence / structure /
//!   dictionary property values plus a message template)
//! - applies an ordered chain of masking operators to templates and values
//! - supports scoped masking via [`SensitiveArea`] when running in
//!   [`MaskingMode::InArea`]
//! - binds configuration through an explicit operator registry (behind the
//!   `config` feature)
//!
//! What it does not do:
//! - guarantee detection of all sensitive data (matching is best-effort and
//!   regex-based)
//! - perform I/O, encryption, or reversible redaction
//! - mask binary payloads

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

// Module declarations
mod area;
#[cfg(feature = "config")]
pub mod config;
mod engine;
mod error;
pub mod event;
pub mod operators;
mod options;
mod properties;

pub use area::{Sensitive, SensitiveArea, SensitiveAreaGuard, SensitiveFutureExt};
#[cfg(feature = "config")]
pub use config::{MaskingConfig, OperatorRegistry};
pub use engine::{DEFAULT_MASK_VALUE, MaskEngine, MaskEngineOptions, MaskingMode};
pub use error::Error;
pub use event::{Level, LogEvent, MessageTemplate, PropertyValue, ScalarValue};
pub use operators::{
    CreditCardMaskingOperator, EmailMaskingOperator, IbanMaskingOperator, MaskingOperator,
    MaskingResult, PathMaskingOperator, PatternMaskingOperator, RegexMasking, UriMaskingOperator,
};
pub use options::{MaskOptions, PropertyMaskOptions, UriMaskOptions};
pub use properties::{MaskProperty, MaskPropertyCollection};
