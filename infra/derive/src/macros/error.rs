use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Ident, LitStr, Variant};

struct VariantMeta<'a> {
    ident: &'a Ident,
    code: String,
    cfg_attrs: Vec<Attribute>,
}

pub fn expand_derive(mut input: DeriveInput) -> TokenStream {
    let Data::Enum(data) = &mut input.data else {
        return quote! { compile_error!("error_code can only be applied to enums"); };
    };

    let variants: Vec<VariantMeta<'_>> = match data
        .variants
        .iter_mut()
        .map(parse_variant)
        .collect::<Result<_, _>>()
    {
        Ok(v) => v,
        Err(err) => return err,
    };
    if let Some(err) = duplicate_code_error(&input.ident, &variants) {
        return err;
    }

    let code_arms = variants.iter().map(|v| {
        let cfg_attrs = &v.cfg_attrs;
        let ident = v.ident;
        let code = &v.code;
        quote! { #(#cfg_attrs)* Self::#ident { .. } => #code, }
    });

    let name = &input.ident;
    let code_impl = quote! {
        #[automatically_derived]
        impl #name {
            /// Stable machine-readable code for this failure.
            #[must_use]
            pub const fn code(&self) -> &'static str {
                match self {
                    #( #code_arms )*
                }
            }
        }
    };

    let derived_traits = derived_trait_names(&input);
    let mut derive_tokens = Vec::new();
    if !derived_traits.contains("Debug") {
        derive_tokens.push(quote! { Debug });
    }
    if !derived_traits.contains("Error") {
        derive_tokens.push(quote! { ::thiserror::Error });
    }
    let extra_derives = if derive_tokens.is_empty() {
        quote! {}
    } else {
        quote! { #[derive(#(#derive_tokens),*)] }
    };

    // The rewritten input no longer carries `#[code]` attributes; they are consumed here.
    quote! {
        #extra_derives
        #input

        #code_impl
    }
}

fn parse_variant(v: &mut Variant) -> Result<VariantMeta<'_>, TokenStream> {
    let mut override_code = None;
    let mut parse_error = None;
    v.attrs.retain(|attr| {
        if attr.path().is_ident("code") {
            match attr.parse_args::<LitStr>() {
                Ok(lit) => override_code = Some(lit.value()),
                Err(err) => parse_error = Some(err.to_compile_error()),
            }
            false
        } else {
            true
        }
    });
    if let Some(err) = parse_error {
        return Err(err);
    }

    let cfg_attrs = v.attrs.iter().filter(|attr| attr.path().is_ident("cfg")).cloned().collect();
    let code = override_code.unwrap_or_else(|| to_screaming_snake(&v.ident.to_string()));

    Ok(VariantMeta { ident: &v.ident, code, cfg_attrs })
}

fn to_screaming_snake(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 4);
    let mut prev_lower_or_digit = false;
    for ch in ident.chars() {
        if ch.is_uppercase() && prev_lower_or_digit {
            out.push('_');
        }
        prev_lower_or_digit = ch.is_lowercase() || ch.is_ascii_digit();
        out.extend(ch.to_uppercase());
    }
    out
}

fn duplicate_code_error(name: &Ident, variants: &[VariantMeta<'_>]) -> Option<TokenStream> {
    let mut seen = FxHashSet::default();
    for v in variants {
        if !seen.insert(v.code.as_str()) {
            let message =
                format!("duplicate error code `{}` on enum `{name}`", v.code);
            return Some(
                syn::Error::new_spanned(v.ident, message).to_compile_error(),
            );
        }
    }
    None
}

fn derived_trait_names(input: &DeriveInput) -> FxHashSet<String> {
    let mut traits = FxHashSet::default();

    for attr in &input.attrs {
        if !attr.path().is_ident("derive") {
            continue;
        }

        let _ = attr.parse_nested_meta(|meta| {
            if let Some(ident) = meta.path.get_ident() {
                traits.insert(ident.to_string());
            } else if let Some(ident) = meta.path.segments.last().map(|seg| seg.ident.to_string()) {
                traits.insert(ident);
            }
            Ok(())
        });
    }

    traits
}
