//! Record derive macro implementation

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Result};

#[derive(Default)]
struct FieldAttrs {
    column: Option<String>,
    skip: bool,
    autoincrement: bool,
    readonly: bool,
    flatten: bool,
}

impl syn::parse::Parse for FieldAttrs {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut attrs = FieldAttrs::default();

        loop {
            if input.is_empty() {
                break;
            }

            let ident: syn::Ident = input.parse()?;
            match ident.to_string().as_str() {
                "skip" => attrs.skip = true,
                "autoincrement" => attrs.autoincrement = true,
                "readonly" => attrs.readonly = true,
                "flatten" => attrs.flatten = true,
                "column" => {
                    let _: syn::Token![=] = input.parse()?;
                    let value: syn::LitStr = input.parse()?;
                    if value.value().is_empty() {
                        return Err(syn::Error::new_spanned(value, "column name cannot be empty"));
                    }
                    attrs.column = Some(value.value());
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        &ident,
                        format!("unknown db attribute `{other}`"),
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

fn get_field_attrs(field: &syn::Field) -> Result<FieldAttrs> {
    let mut merged = FieldAttrs::default();

    for attr in &field.attrs {
        if !attr.path().is_ident("db") {
            continue;
        }

        if let syn::Meta::List(meta_list) = &attr.meta {
            let parsed = syn::parse2::<FieldAttrs>(meta_list.tokens.clone())?;
            merged.skip |= parsed.skip;
            merged.autoincrement |= parsed.autoincrement;
            merged.readonly |= parsed.readonly;
            merged.flatten |= parsed.flatten;
            if parsed.column.is_some() {
                merged.column = parsed.column;
            }
        }
    }

    if merged.flatten && (merged.column.is_some() || merged.autoincrement || merged.readonly) {
        return Err(syn::Error::new_spanned(
            field,
            "flatten cannot be combined with column, autoincrement or readonly",
        ));
    }

    Ok(merged)
}

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Record can only be derived for structs",
            ))
        }
    };

    let mut pushes = Vec::new();
    for field in fields {
        let attrs = get_field_attrs(field)?;
        if attrs.skip {
            continue;
        }

        let Some(ident) = field.ident.as_ref() else {
            continue;
        };

        if attrs.flatten {
            pushes.push(quote! {
                ::querykit::Record::append_fields(&self.#ident, ctx, out);
            });
            continue;
        }

        let column = attrs.column.unwrap_or_else(|| ident.to_string());
        let value = quote! {
            ::querykit::Value::from(::core::clone::Clone::clone(&self.#ident))
        };

        let push = if attrs.autoincrement {
            quote! {
                let value = #value;
                if ctx.include_auto_increment(&value) {
                    out.push((::std::string::String::from(#column), value));
                }
            }
        } else {
            quote! {
                out.push((::std::string::String::from(#column), #value));
            }
        };

        if attrs.readonly {
            pushes.push(quote! {
                if ctx.include_read_only() {
                    #push
                }
            });
        } else {
            pushes.push(quote! {
                {
                    #push
                }
            });
        }
    }

    Ok(quote! {
        impl #impl_generics ::querykit::Record for #name #ty_generics #where_clause {
            fn append_fields(
                &self,
                ctx: &::querykit::RecordContext,
                out: &mut ::std::vec::Vec<(::std::string::String, ::querykit::Value)>,
            ) {
                let _ = ctx;
                #(#pushes)*
            }
        }
    })
}
