#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the infrastructure.
//! This crate provides attribute macros to simplify boilerplate associated with
//! the dispatch core, primarily its coded error taxonomy.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining error enums with stable machine-readable codes.
///
/// Every failure crossing the router boundary is reported as a `{code, message,
/// details?}` triple; this macro keeps the `code` mechanically in sync with the
/// enum variant so the taxonomy cannot drift from the types.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` if missing.
/// * **Code Generation**: Implements `pub const fn code(&self) -> &'static str`
///   returning the SCREAMING_SNAKE_CASE form of the variant name.
/// * **Overrides**: A variant-level `#[code("CUSTOM_CODE")]` attribute replaces the
///   derived code.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants follow normal `thiserror` rules (`#[error("...")]` display attributes).
///
/// # Example
///
/// ```rust,ignore
/// use ohub_derive::error_code;
///
/// #[error_code]
/// pub enum RegistryError {
///     #[error("object {object_code} not found")]
///     ObjectNotFound { object_code: String },
/// }
///
/// assert_eq!(
///     RegistryError::ObjectNotFound { object_code: "SUPPLY".into() }.code(),
///     "OBJECT_NOT_FOUND",
/// );
/// ```
#[proc_macro_attribute]
pub fn error_code(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
