use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input, spanned::Spanned};

use crate::utils;

fn option_name(input: &DeriveInput) -> syn::Result<String> {
    let mut name = utils::to_kebab_case(&input.ident.to_string());
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("cli_value")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("option") {
                let lit: LitStr = meta.value()?.parse()?;
                name = lit.value();
                return Ok(());
            }
            Err(meta.error("unsupported cli_value attribute; expected option = \"...\""))
        })?;
    }
    Ok(name)
}

fn variant_names(variant: &syn::Variant) -> syn::Result<(String, Vec<String>)> {
    let mut canonical = utils::to_kebab_case(&variant.ident.to_string());
    let mut aliases = Vec::new();

    for attr in variant.attrs.iter().filter(|a| a.path().is_ident("cli")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                canonical = lit.value();
                return Ok(());
            }
            if meta.path.is_ident("alias") {
                let lit: LitStr = meta.value()?.parse()?;
                aliases.push(lit.value());
                return Ok(());
            }
            Err(meta.error("unsupported cli attribute; expected name/alias"))
        })?;
    }

    Ok((canonical, aliases))
}

pub fn derive_cli_value_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let enum_ident = input.ident.clone();

    let option = match option_name(&input) {
        Ok(name) => name,
        Err(err) => return err.to_compile_error().into(),
    };

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new(input.span(), "CliValue can only be derived for enums")
            .to_compile_error()
            .into();
    };

    let mut parse_arms = Vec::new();
    let mut display_arms = Vec::new();
    let mut expected = Vec::new();

    for variant in &data_enum.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return syn::Error::new(
                variant.span(),
                "CliValue only supports enums with unit variants",
            )
            .to_compile_error()
            .into();
        }

        let (canonical, aliases) = match variant_names(variant) {
            Ok(names) => names,
            Err(err) => return err.to_compile_error().into(),
        };
        let variant_ident = &variant.ident;
        let canonical_lit = LitStr::new(&canonical, Span::call_site());
        let accepted = std::iter::once(&canonical)
            .chain(aliases.iter())
            .map(|v| LitStr::new(v, Span::call_site()));

        parse_arms.push(quote! {
            #(#accepted)|* => Ok(Self::#variant_ident),
        });
        display_arms.push(quote! {
            Self::#variant_ident => #canonical_lit,
        });
        expected.push(canonical);
    }

    let expected_lit = LitStr::new(&expected.join("|"), Span::call_site());
    let option_lit = LitStr::new(&option, Span::call_site());

    let expanded = quote! {
        impl #enum_ident {
            /// Accepted spellings, `|` separated.
            pub const EXPECTED: &'static str = #expected_lit;

            pub fn parse(raw: &str) -> crate::Result<Self> {
                match raw.to_ascii_lowercase().as_str() {
                    #(#parse_arms)*
                    _ => Err(crate::Error::invalid_input(format!(
                        "Invalid value for --{}: {} (expected {})",
                        #option_lit,
                        raw,
                        Self::EXPECTED
                    ))),
                }
            }
        }

        impl std::fmt::Display for #enum_ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(match self {
                    #(#display_arms)*
                })
            }
        }
    };

    TokenStream::from(expanded)
}
