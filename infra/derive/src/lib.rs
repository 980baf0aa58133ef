#![allow(unreachable_pub)]

//! # Macros
//!
//! Procedural macros for the toggle workspace.
//! Right now this is a single attribute, [`macro@thub_error`], used by every crate that
//! exposes an error type, so that errors look and behave the same across the catalogue,
//! validator, resolver, artifact and storage layers.

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Turns a plain enum into a crate error type.
///
/// # Injected Behaviors
///
/// * **Derives**: `Debug` and `thiserror::Error` unless already derived.
/// * **Context**: a companion `<Name>Ext` trait adding `.context(...)` to
///   `Result<T, Name>` and to `Result<T, Source>` for every variant wrapping a source error.
/// * **Conversions**: `From<Source>` for variants with a `source` field (or a field tagged
///   `#[source]` / `#[from]`), so `?` works on upstream errors.
/// * **Internal fallback**: `From<&'static str>` and `From<String>` when an `Internal`
///   variant exists.
/// * **Formatting helper**: a private `format_context` function usable from `#[error(...)]`.
///
/// # Requirements
///
/// * Only enums with named-field variants are accepted.
/// * A `context` field, when present, must be `Option<Cow<'static, str>>`.
/// * A variant carrying a source error must also carry a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[thub_derive::thub_error]
/// pub enum CatalogueError {
///     #[error("Catalogue parse error{}: {source}", format_context(.context))]
///     Parse { source: toml::de::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal catalogue error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn parse(text: &str) -> Result<Source, CatalogueError> {
///     toml::from_str(text).context("Parsing flags.toml")
/// }
/// ```
#[proc_macro_attribute]
pub fn thub_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
