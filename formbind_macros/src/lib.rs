//! Derive macro backing `formbind`'s compile-time field descriptors.
//!
//! `#[derive(FormBind)]` walks the struct's named fields in declaration order
//! and emits a `BINDINGS` table: one [`FieldBinding`] per field, carrying the
//! external parameter name from the `#[param("...")]` attribute, the coercion
//! kind inferred from the field's type, the typed option list, and an `apply`
//! function that writes the converted value in place.
//!
//! [`FieldBinding`]: ../formbind/struct.FieldBinding.html

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Field, Fields, LitStr, Type};

/// Coercion strategy inferred from a field's declared type.
enum BindKind {
    Str,
    Int,
    Bool,
    Float32,
    Float64,
    Time,
    Unsupported,
}

/// Derive `formbind::FormBind` for a struct with named fields.
///
/// Each field may carry `#[param("name")]` or `#[param("name,option,...")]`.
/// The first comma segment is the external parameter name; trailing segments
/// are options (`skip`, `required`, `default:VALUE`). Fields without the
/// attribute map to the empty parameter name.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Default, FormBind)]
/// struct Search {
///     #[param("q")]
///     query: String,
///     #[param("limit,default:20")]
///     limit: i64,
/// }
/// ```
#[proc_macro_derive(FormBind, attributes(param))]
pub fn derive_form_bind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "FormBind can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "FormBind can only be derived for structs with named fields",
            ))
        }
    };

    let entries = fields
        .iter()
        .map(binding_entry)
        .collect::<syn::Result<Vec<_>>>()?;

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::formbind::FormBind for #name #ty_generics #where_clause {
            const BINDINGS: &'static [::formbind::FieldBinding<Self>] = &[
                #(#entries),*
            ];
        }
    })
}

/// Build one `FieldBinding { .. }` literal for a single struct field.
fn binding_entry(field: &Field) -> syn::Result<TokenStream2> {
    let ident = field
        .ident
        .as_ref()
        .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
    let field_name = ident.to_string();
    let (param_name, options) = parse_param_attr(field)?;
    let kind = bind_kind(&field.ty);
    let kind_tokens = kind_tokens(&kind);
    let apply = apply_tokens(&kind, field, &field_name);

    Ok(quote! {
        ::formbind::FieldBinding {
            param: #param_name,
            field: #field_name,
            kind: #kind_tokens,
            options: &[#(#options),*],
            apply: #apply,
        }
    })
}

/// Parse `#[param("name,option,...")]` into the parameter name and the typed
/// option list. A field without the attribute maps to the empty name.
fn parse_param_attr(field: &Field) -> syn::Result<(String, Vec<TokenStream2>)> {
    let attr = match field.attrs.iter().find(|a| a.path().is_ident("param")) {
        Some(attr) => attr,
        None => return Ok((String::new(), Vec::new())),
    };
    let lit: LitStr = attr.parse_args()?;
    let raw = lit.value();
    let mut segments = raw.split(',');
    // First segment is always the parameter name, even when empty.
    let name = segments.next().unwrap_or_default().to_string();
    let mut options = Vec::new();
    for segment in segments {
        if segment == "skip" {
            options.push(quote! { ::formbind::FieldOption::Skip });
        } else if segment == "required" {
            options.push(quote! { ::formbind::FieldOption::Required });
        } else if let Some(value) = segment.strip_prefix("default:") {
            options.push(quote! { ::formbind::FieldOption::Default(#value) });
        } else {
            return Err(syn::Error::new(
                lit.span(),
                format!("unknown param option `{segment}`"),
            ));
        }
    }
    Ok((name, options))
}

fn bind_kind(ty: &Type) -> BindKind {
    if let Type::Path(path) = ty {
        if let Some(segment) = path.path.segments.last() {
            return match segment.ident.to_string().as_str() {
                "String" => BindKind::Str,
                "i8" | "i16" | "i32" | "i64" | "isize" => BindKind::Int,
                "bool" => BindKind::Bool,
                "f32" => BindKind::Float32,
                "f64" => BindKind::Float64,
                "DateTime" => BindKind::Time,
                _ => BindKind::Unsupported,
            };
        }
    }
    BindKind::Unsupported
}

fn kind_tokens(kind: &BindKind) -> TokenStream2 {
    match kind {
        BindKind::Str => quote! { ::formbind::FieldKind::Str },
        BindKind::Int => quote! { ::formbind::FieldKind::Int },
        BindKind::Bool => quote! { ::formbind::FieldKind::Bool },
        BindKind::Float32 => quote! { ::formbind::FieldKind::Float32 },
        BindKind::Float64 => quote! { ::formbind::FieldKind::Float64 },
        BindKind::Time => quote! { ::formbind::FieldKind::Time },
        BindKind::Unsupported => quote! { ::formbind::FieldKind::Unsupported },
    }
}

/// Emit the `apply` function for a field. Integer, boolean, and float parse
/// failures leave the field untouched and report success; time-format
/// exhaustion and unsupported types surface as errors.
fn apply_tokens(kind: &BindKind, field: &Field, field_name: &str) -> TokenStream2 {
    let ident = match field.ident.as_ref() {
        Some(ident) => ident,
        None => return TokenStream2::new(),
    };
    let ty = &field.ty;
    match kind {
        BindKind::Str => quote! {
            |target: &mut Self, value: &str| {
                target.#ident = value.to_owned();
                Ok(())
            }
        },
        BindKind::Int | BindKind::Float32 | BindKind::Float64 => quote! {
            |target: &mut Self, value: &str| {
                if let Ok(parsed) = value.parse::<#ty>() {
                    target.#ident = parsed;
                }
                Ok(())
            }
        },
        BindKind::Bool => quote! {
            |target: &mut Self, value: &str| {
                if let Some(parsed) = ::formbind::coerce::parse_bool_literal(value) {
                    target.#ident = parsed;
                }
                Ok(())
            }
        },
        BindKind::Time => quote! {
            |target: &mut Self, value: &str| {
                match ::formbind::coerce::parse_timestamp(value) {
                    Some(parsed) => {
                        target.#ident = parsed;
                        Ok(())
                    }
                    None => Err(::formbind::BindError::InvalidTimeFormat { field: #field_name }),
                }
            }
        },
        BindKind::Unsupported => quote! {
            |_target: &mut Self, _value: &str| {
                Err(::formbind::BindError::UnsupportedType {
                    field: #field_name,
                    type_name: ::std::any::type_name::<#ty>(),
                })
            }
        },
    }
}
