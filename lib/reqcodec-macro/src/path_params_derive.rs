//! `PathParams` derive macro implementation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Fields, Type, parse2};

/// Struct-level options parsed from `#[path_params(...)]` attributes.
#[derive(Debug, Clone, Default)]
struct StructOptions {
    /// Rename all fields using the given case convention.
    rename_all: Option<RenameRule>,
}

/// Case conversion rules for `rename_all`.
#[derive(Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
enum RenameRule {
    LowerCase,
    UpperCase,
    CamelCase,
    PascalCase,
    SnakeCase,
    ScreamingSnakeCase,
    KebabCase,
    ScreamingKebabCase,
}

impl RenameRule {
    const EXPECTED: &'static str = "lowercase, UPPERCASE, camelCase, PascalCase, snake_case, \
                                    SCREAMING_SNAKE_CASE, kebab-case, SCREAMING-KEBAB-CASE";

    fn parse(s: &str) -> Option<Self> {
        match s {
            "lowercase" => Some(Self::LowerCase),
            "UPPERCASE" => Some(Self::UpperCase),
            "camelCase" => Some(Self::CamelCase),
            "PascalCase" => Some(Self::PascalCase),
            "snake_case" => Some(Self::SnakeCase),
            "SCREAMING_SNAKE_CASE" => Some(Self::ScreamingSnakeCase),
            "kebab-case" => Some(Self::KebabCase),
            "SCREAMING-KEBAB-CASE" => Some(Self::ScreamingKebabCase),
            _ => None,
        }
    }

    /// Apply the rule to a `snake_case` Rust field name.
    fn apply(self, field: &str) -> String {
        match self {
            Self::LowerCase => field.to_lowercase(),
            Self::UpperCase => field.to_uppercase(),
            Self::CamelCase => to_camel_case(field),
            Self::PascalCase => to_pascal_case(field),
            Self::SnakeCase => field.to_string(),
            Self::ScreamingSnakeCase => field.to_uppercase(),
            Self::KebabCase => field.replace('_', "-"),
            Self::ScreamingKebabCase => field.to_uppercase().replace('_', "-"),
        }
    }
}

fn to_camel_case(s: &str) -> String {
    let mut result = String::new();
    let mut capitalize_next = false;
    for c in s.chars() {
        if c == '_' {
            capitalize_next = !result.is_empty();
        } else if capitalize_next {
            result.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }
    result
}

fn to_pascal_case(s: &str) -> String {
    let camel = to_camel_case(s);
    let mut chars = camel.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Field options parsed from `#[path_params(...)]` attributes.
#[derive(Debug, Clone, Default)]
struct FieldOptions {
    rename: Option<String>,
}

/// Expand the `#[derive(PathParams)]` macro.
pub fn expand_path_params_derive(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let struct_options = parse_struct_options(&input.attrs)?;

    let fields = match &input.data {
        syn::Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "PathParams derive does not support unit structs; use `()` for templates without parameters",
                ));
            }
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "PathParams derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "PathParams derive only supports structs",
            ));
        }
    };

    let mut keys = Vec::new();
    let mut pairs = Vec::new();

    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };

        if is_option_type(&field.ty) {
            return Err(syn::Error::new_spanned(
                &field.ty,
                "path parameters are always required; `Option` fields are not supported",
            ));
        }

        let options = parse_field_options(&field.attrs)?;

        // Explicit rename > rename_all > field name
        let raw_name = field_name.to_string();
        let raw_name = raw_name.strip_prefix("r#").unwrap_or(&raw_name);
        let key = if let Some(rename) = options.rename {
            rename
        } else if let Some(rule) = struct_options.rename_all {
            rule.apply(raw_name)
        } else {
            raw_name.to_string()
        };

        if !is_param_name(&key) {
            return Err(syn::Error::new_spanned(
                field_name,
                format!(
                    "`{key}` is not a valid path parameter name; \
                     expected an ASCII letter or `_`, then letters, digits, `_` or `-`"
                ),
            ));
        }

        if keys.contains(&key) {
            return Err(syn::Error::new_spanned(
                field_name,
                format!("duplicate path parameter name `{key}`"),
            ));
        }

        pairs.push(quote! {
            (
                ::std::string::String::from(#key),
                ::reqcodec::ToPathValue::to_path_value(&self.#field_name),
            )
        });
        keys.push(key);
    }

    Ok(quote! {
        impl #impl_generics ::reqcodec::PathParams for #name #ty_generics #where_clause {
            fn declared_names() -> ::std::option::Option<&'static [&'static str]> {
                ::std::option::Option::Some(&[#(#keys),*])
            }

            fn path_pairs(&self) -> ::std::vec::Vec<(::std::string::String, ::reqcodec::PathValue)> {
                ::std::vec![#(#pairs),*]
            }
        }
    })
}

fn parse_struct_options(attrs: &[syn::Attribute]) -> syn::Result<StructOptions> {
    let mut options = StructOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("path_params") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                let value: syn::LitStr = meta.value()?.parse()?;
                let rule = RenameRule::parse(&value.value()).ok_or_else(|| {
                    syn::Error::new_spanned(
                        &value,
                        format!(
                            "unknown rename_all value: \"{}\". Expected one of: {}",
                            value.value(),
                            RenameRule::EXPECTED
                        ),
                    )
                })?;
                options.rename_all = Some(rule);
                Ok(())
            } else {
                Err(meta.error("unknown path_params container attribute"))
            }
        })?;
    }

    Ok(options)
}

fn parse_field_options(attrs: &[syn::Attribute]) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("path_params") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let value: syn::LitStr = meta.value()?.parse()?;
                options.rename = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unknown path_params field attribute"))
            }
        })?;
    }

    Ok(options)
}

/// Same grammar `PathTemplate::parse` accepts after the `:` prefix.
fn is_param_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn is_option_type(ty: &Type) -> bool {
    matches!(ty, Type::Path(type_path)
        if type_path.path.segments.last()
            .is_some_and(|seg| seg.ident == "Option"))
}
