//! Record derive macro implementation

use std::collections::HashSet;

use heck::{ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Result};

use crate::common::syn_types::{option_inner, ungroup};
use crate::sql_ident::{parse_sql_ident, parse_table_name};

#[derive(Clone, Copy)]
enum RenameRule {
    PascalCase,
    CamelCase,
    SnakeCase,
    ScreamingSnakeCase,
}

impl RenameRule {
    fn parse(lit: &syn::LitStr) -> Result<Self> {
        match lit.value().as_str() {
            "PascalCase" => Ok(Self::PascalCase),
            "camelCase" => Ok(Self::CamelCase),
            "snake_case" => Ok(Self::SnakeCase),
            "SCREAMING_SNAKE_CASE" => Ok(Self::ScreamingSnakeCase),
            other => Err(syn::Error::new(
                lit.span(),
                format!(
                    "unsupported rename_all rule '{other}' (expected PascalCase, camelCase, snake_case or SCREAMING_SNAKE_CASE)"
                ),
            )),
        }
    }

    fn apply(self, name: &str) -> String {
        match self {
            Self::PascalCase => name.to_upper_camel_case(),
            Self::CamelCase => name.to_lower_camel_case(),
            Self::SnakeCase => name.to_snake_case(),
            Self::ScreamingSnakeCase => name.to_shouty_snake_case(),
        }
    }
}

#[derive(Default)]
struct StructAttrs {
    table: Option<String>,
    rename_all: Option<RenameRule>,
}

impl syn::parse::Parse for StructAttrs {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut attrs = StructAttrs::default();

        loop {
            if input.is_empty() {
                break;
            }

            let ident: syn::Ident = input.parse()?;
            let key = ident.to_string();

            let _: syn::Token![=] = input.parse()?;
            let value: syn::LitStr = input.parse()?;

            match key.as_str() {
                "table" => attrs.table = Some(parse_table_name(&value)?),
                "rename_all" => attrs.rename_all = Some(RenameRule::parse(&value)?),
                _ => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown struct attribute `{key}`"),
                    ));
                }
            }

            if input.peek(syn::Token![,]) {
                let _: syn::Token![,] = input.parse()?;
            } else {
                break;
            }
        }

        Ok(attrs)
    }
}

#[derive(Default)]
struct FieldAttrs {
    always_insert: bool,
    always_update: bool,
    is_enum: bool,
    skip: bool,
    column: Option<String>,
}

impl syn::parse::Parse for FieldAttrs {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut attrs = FieldAttrs::default();

        loop {
            if input.is_empty() {
                break;
            }

            // `enum` is a keyword, so accept any identifier here.
            let ident = syn::Ident::parse_any(input)?;
            let key = ident.to_string();

            match key.as_str() {
                "always_insert" => attrs.always_insert = true,
                "always_update" => attrs.always_update = true,
                "always_save" => {
                    attrs.always_insert = true;
                    attrs.always_update = true;
                }
                "enum" => attrs.is_enum = true,
                "skip" => attrs.skip = true,
                "column" => {
                    let _: syn::Token![=] = input.parse()?;
                    let value: syn::LitStr = input.parse()?;
                    attrs.column = Some(parse_sql_ident(&value, "column")?);
                }
                _ => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown field attribute `{key}`"),
                    ));
                }
            }

            if input.peek(syn::Token![,]) {
                let _: syn::Token![,] = input.parse()?;
            } else {
                break;
            }
        }

        Ok(attrs)
    }
}

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let struct_attrs = get_struct_attrs(&input)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Record can only be derived for structs",
            ));
        }
    };

    let mut seen = HashSet::<String>::new();
    let mut descriptors: Vec<TokenStream> = Vec::new();

    for field in fields.iter() {
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };
        let field_attrs = get_field_attrs(field)?;
        if field_attrs.skip {
            if field_attrs.always_insert || field_attrs.always_update || field_attrs.is_enum {
                return Err(syn::Error::new_spanned(
                    field,
                    "`skip` cannot be combined with other orm attributes",
                ));
            }
            continue;
        }

        let field_name = field_ident.unraw().to_string();
        let column = match (&field_attrs.column, struct_attrs.rename_all) {
            (Some(column), _) => column.clone(),
            (None, Some(rule)) => rule.apply(&field_name),
            (None, None) => field_name,
        };
        if !seen.insert(column.clone()) {
            return Err(syn::Error::new_spanned(
                field,
                format!("duplicate column '{column}'"),
            ));
        }

        let ty = ungroup(&field.ty);
        let (declared_type, value) = if field_attrs.is_enum {
            match option_inner(ty) {
                Some(inner) => (
                    quote! { recordsql::DeclaredType::enumeration_of::<#inner>(true) },
                    quote! {
                        match &self.#field_ident {
                            ::core::option::Option::Some(v) => recordsql::FieldValue::Enum(
                                ::core::clone::Clone::clone(v) as i32,
                            ),
                            ::core::option::Option::None => recordsql::FieldValue::Null,
                        }
                    },
                ),
                None => (
                    quote! { recordsql::DeclaredType::enumeration_of::<#ty>(false) },
                    quote! {
                        recordsql::FieldValue::Enum(
                            ::core::clone::Clone::clone(&self.#field_ident) as i32,
                        )
                    },
                ),
            }
        } else {
            (
                quote! { recordsql::DeclaredType::of::<#ty>() },
                quote! { recordsql::ToFieldValue::to_field_value(&self.#field_ident) },
            )
        };

        let always_insert = field_attrs.always_insert;
        let always_update = field_attrs.always_update;
        descriptors.push(quote! {
            recordsql::FieldDescriptor {
                name: ::std::borrow::Cow::Borrowed(#column),
                declared_type: #declared_type,
                value: #value,
                always_insert: #always_insert,
                always_update: #always_update,
            }
        });
    }

    let type_name = struct_attrs.table.unwrap_or_else(|| name.unraw().to_string());
    let type_name_lit = syn::LitStr::new(&type_name, Span::call_site());

    Ok(quote! {
        impl #impl_generics recordsql::FieldIntrospector for #name #ty_generics #where_clause {
            fn type_name(&self) -> &str {
                #type_name_lit
            }

            fn describe(&self) -> ::std::vec::Vec<recordsql::FieldDescriptor> {
                ::std::vec![#(#descriptors),*]
            }
        }
    })
}

fn get_struct_attrs(input: &DeriveInput) -> Result<StructAttrs> {
    let mut merged = StructAttrs::default();

    for attr in &input.attrs {
        if !attr.path().is_ident("orm") {
            continue;
        }

        if let syn::Meta::List(meta_list) = &attr.meta {
            let parsed = syn::parse2::<StructAttrs>(meta_list.tokens.clone())?;
            if parsed.table.is_some() {
                merged.table = parsed.table;
            }
            if parsed.rename_all.is_some() {
                merged.rename_all = parsed.rename_all;
            }
        }
    }

    Ok(merged)
}

fn get_field_attrs(field: &syn::Field) -> Result<FieldAttrs> {
    let mut merged = FieldAttrs::default();

    for attr in &field.attrs {
        if !attr.path().is_ident("orm") {
            continue;
        }

        if let syn::Meta::List(meta_list) = &attr.meta {
            let parsed = syn::parse2::<FieldAttrs>(meta_list.tokens.clone())?;
            merged.always_insert |= parsed.always_insert;
            merged.always_update |= parsed.always_update;
            merged.is_enum |= parsed.is_enum;
            merged.skip |= parsed.skip;
            if parsed.column.is_some() {
                merged.column = parsed.column;
            }
        }
    }

    Ok(merged)
}
