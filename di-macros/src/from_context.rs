//! `#[derive(FromContext)]`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, ExprPath, Field, Fields, LitStr, Type};

pub fn derive_from_context_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let context_type = context_type(input)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "FromContext requires named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "FromContext can only be derived for structs",
            ))
        }
    };

    let mut inits = Vec::with_capacity(fields.len());
    for field in fields {
        let field_name = &field.ident;
        let field_type = &field.ty;
        let init = match resolver_fn(field)? {
            Some(path) => quote! { #field_name: #path(ctx) },
            None => quote! {
                #field_name: <#field_type as crate::FromRef<#context_type>>::from_ref(ctx)
            },
        };
        inits.push(init);
    }

    Ok(quote! {
        impl #impl_generics crate::FromRef<#context_type> for #name #ty_generics #where_clause {
            fn from_ref(ctx: &#context_type) -> Self {
                Self {
                    #(#inits),*
                }
            }
        }
    })
}

/// Reads `#[from_context(Context = "MyContext")]`, defaulting to `Context`.
fn context_type(input: &DeriveInput) -> syn::Result<TokenStream2> {
    for attr in &input.attrs {
        if !attr.path().is_ident("from_context") {
            continue;
        }
        let mut context_ty: Option<Type> = None;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("Context") {
                let value: LitStr = meta.value()?.parse()?;
                context_ty = Some(value.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `Context = \"...\"`"))
            }
        })?;
        if let Some(ty) = context_ty {
            return Ok(quote! { #ty });
        }
    }
    Ok(quote! { Context })
}

/// Reads a field-level `#[from_context(with = "path")]`.
fn resolver_fn(field: &Field) -> syn::Result<Option<ExprPath>> {
    let mut path = None;
    for attr in &field.attrs {
        if !attr.path().is_ident("from_context") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("with") {
                let value: LitStr = meta.value()?.parse()?;
                path = Some(value.parse::<ExprPath>()?);
                Ok(())
            } else {
                Err(meta.error("expected `with = \"...\"`"))
            }
        })?;
    }
    Ok(path)
}
