use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, Path, parse_macro_input, spanned::Spanned};

use crate::utils;

struct CliField {
    long: String,
    parse_with: Option<Path>,
    hint: Option<String>,
}

fn parse_cli_attrs(field: &syn::Field) -> syn::Result<Option<CliField>> {
    let mut long = None;
    let mut parse_with = None;
    let mut hint = None;

    for attr in field.attrs.iter().filter(|a| a.path().is_ident("cli")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("long") {
                let lit: LitStr = meta.value()?.parse()?;
                long = Some(lit.value());
                return Ok(());
            }
            if meta.path.is_ident("parse_with") {
                let lit: LitStr = meta.value()?.parse()?;
                parse_with = Some(syn::parse_str(&lit.value())?);
                return Ok(());
            }
            if meta.path.is_ident("hint") {
                let lit: LitStr = meta.value()?.parse()?;
                hint = Some(lit.value());
                return Ok(());
            }
            Err(meta.error("unsupported cli attribute; expected long/parse_with/hint"))
        })?;
    }

    Ok(long.map(|long| CliField {
        long,
        parse_with,
        hint,
    }))
}

pub fn derive_cli_options_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let struct_ident = input.ident.clone();

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new(input.span(), "CliOptions can only be derived for structs")
            .to_compile_error()
            .into();
    };

    let Fields::Named(fields) = &data_struct.fields else {
        return syn::Error::new(input.span(), "CliOptions requires named fields")
            .to_compile_error()
            .into();
    };

    let mut arms = Vec::new();
    let mut help_lines = Vec::new();

    for field in &fields.named {
        let Some(field_ident) = &field.ident else {
            continue;
        };
        let cli = match parse_cli_attrs(field) {
            Ok(Some(cli)) => cli,
            Ok(None) => continue,
            Err(err) => return err.to_compile_error().into(),
        };

        let long_lit = LitStr::new(&cli.long, Span::call_site());
        let doc = utils::doc_comment(&field.attrs);
        let parse_expr = utils::build_cli_parse_expr(&field.ty, cli.parse_with.as_ref());

        arms.push(quote! {
            #long_lit => {
                let raw = value.ok_or_else(|| {
                    crate::Error::invalid_input(format!("Missing value for --{name}"))
                })?;
                self.#field_ident = #parse_expr;
                Ok(true)
            }
        });

        // `parse_with` fields are CliValue enums, which list their accepted values.
        let hint_expr = match (&cli.hint, &cli.parse_with) {
            (Some(hint), _) => {
                let lit = LitStr::new(hint, Span::call_site());
                quote! { #lit }
            }
            (None, Some(_)) => {
                let ty = utils::inner_of_option(&field.ty).unwrap_or(&field.ty);
                quote! { <#ty>::EXPECTED }
            }
            (None, None) => {
                let lit = LitStr::new(&utils::type_hint(&field.ty), Span::call_site());
                quote! { #lit }
            }
        };
        help_lines.push(quote! {
            help.push_str(&format!("  --{} <{}>\n", #long_lit, #hint_expr));
        });
        if !doc.is_empty() {
            let doc_lit = LitStr::new(&format!("      {doc}\n"), Span::call_site());
            help_lines.push(quote! { help.push_str(#doc_lit); });
        }
    }

    let expanded = quote! {
        impl #struct_ident {
            fn split_arg(
                raw_name: &str,
                args: &mut std::iter::Peekable<impl Iterator<Item = String>>,
            ) -> (String, Option<String>) {
                if let Some((k, v)) = raw_name.split_once('=') {
                    return (k.to_string(), Some(v.to_string()));
                }

                let value = match args.peek() {
                    Some(next) if !next.starts_with("--") => args.next(),
                    _ => None,
                };

                (raw_name.to_string(), value)
            }

            fn apply_cli_option(
                &mut self,
                name: &str,
                value: Option<String>,
            ) -> crate::Result<bool> {
                match name {
                    #(#arms,)*
                    _ => Ok(false),
                }
            }

            /// Help lines for every option that takes a value.
            pub fn cli_option_help() -> String {
                let mut help = String::new();
                #(#help_lines)*
                help
            }
        }
    };

    TokenStream::from(expanded)
}
