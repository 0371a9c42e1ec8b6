use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input, spanned::Spanned};

/// How a field value is rendered on its `key = value` line.
enum KvFormat {
    Display,
    Len,
    Path,
    Opt,
    Skip,
}

impl KvFormat {
    fn parse(raw: &str, span: Span) -> syn::Result<Self> {
        match raw {
            "display" => Ok(Self::Display),
            "len" => Ok(Self::Len),
            "path" => Ok(Self::Path),
            "opt" => Ok(Self::Opt),
            "skip" => Ok(Self::Skip),
            other => Err(syn::Error::new(
                span,
                format!("unsupported kv fmt mode: {other}"),
            )),
        }
    }
}

pub fn derive_kv_display_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let struct_ident = input.ident.clone();

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new(input.span(), "KvDisplay can only be derived for structs")
            .to_compile_error()
            .into();
    };

    let Fields::Named(fields) = &data_struct.fields else {
        return syn::Error::new(input.span(), "KvDisplay requires named fields")
            .to_compile_error()
            .into();
    };

    let mut entries = Vec::new();

    for field in &fields.named {
        let Some(field_ident) = &field.ident else {
            continue;
        };
        let mut key = field_ident.to_string();
        let mut format = KvFormat::Display;

        for attr in field.attrs.iter().filter(|a| a.path().is_ident("kv")) {
            let parse_result = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let lit: LitStr = meta.value()?.parse()?;
                    key = lit.value();
                    return Ok(());
                }
                if meta.path.is_ident("fmt") {
                    let lit: LitStr = meta.value()?.parse()?;
                    format = KvFormat::parse(&lit.value(), lit.span())?;
                    return Ok(());
                }
                Err(meta.error("unsupported kv attribute; expected name/fmt"))
            });
            if let Err(err) = parse_result {
                return err.to_compile_error().into();
            }
        }

        let value = match format {
            KvFormat::Skip => continue,
            KvFormat::Display => quote! { &self.#field_ident },
            KvFormat::Len => quote! { &self.#field_ident.len() },
            KvFormat::Path => quote! { &self.#field_ident.display() },
            KvFormat::Opt => quote! {
                &self.#field_ident
                    .as_ref()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "-".to_string())
            },
        };
        entries.push((key, value));
    }

    let width = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let format_lit = LitStr::new(
        &entries
            .iter()
            .map(|(key, _)| format!("\n\t{key:<width$} = {{}}"))
            .collect::<String>(),
        Span::call_site(),
    );
    let values = entries.iter().map(|(_, value)| value);

    let expanded = quote! {
        impl std::fmt::Display for #struct_ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, #format_lit, #(#values),*)
            }
        }
    };

    TokenStream::from(expanded)
}
