//! Procedural macros for reqcodec.
//!
//! - `#[derive(PathParams)]` - derive path parameters for a struct, so a
//!   request codec can check its template at construction time
//!
//! # Example
//!
//! ```ignore
//! use reqcodec::prelude::*;
//!
//! #[derive(PathParams)]
//! #[path_params(rename_all = "camelCase")]
//! struct PageParams {
//!     site_id: u32,    // becomes "siteId"
//!     page_slug: String, // becomes "pageSlug"
//! }
//!
//! let codec = factory.get("/sites/:siteId/pages/:pageSlug", decoder)?;
//! ```

mod path_params_derive;

use proc_macro::TokenStream;

/// Derive the `PathParams` trait for a struct with named fields.
///
/// Each field becomes one path parameter. Field types must implement
/// `ToPathValue` (strings, integers and floats do). `Option` fields are
/// rejected because every template marker must receive a value.
///
/// # Struct Attributes
///
/// - `#[path_params(rename_all = "camelCase")]` - Rename all fields using a case convention
///
/// Supported case conventions:
/// - `lowercase`, `UPPERCASE`
/// - `camelCase`, `PascalCase`
/// - `snake_case`, `SCREAMING_SNAKE_CASE`
/// - `kebab-case`, `SCREAMING-KEBAB-CASE`
///
/// # Field Attributes
///
/// - `#[path_params(rename = "name")]` - Use a different marker name (overrides `rename_all`)
///
/// # Example
///
/// ```ignore
/// use reqcodec::PathParams;
///
/// #[derive(PathParams)]
/// struct TestParams {
///     #[path_params(rename = "testParam")]
///     test_param: String,
/// }
/// ```
#[proc_macro_derive(PathParams, attributes(path_params))]
pub fn derive_path_params(input: TokenStream) -> TokenStream {
    path_params_derive::expand_path_params_derive(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
