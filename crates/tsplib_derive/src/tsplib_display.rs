use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input, spanned::Spanned};

const SEPARATOR: &str = "_";

/// Upper-cases a PascalCase identifier, inserting `separator` at word starts.
/// Digits stick to the word before them, so `Twod2` stays `TWOD2`.
fn keyword_from_ident(name: &str, separator: &str) -> String {
    let mut out = String::with_capacity(name.len() + separator.len() * 4);
    let mut prev: Option<char> = None;

    for ch in name.chars() {
        if let Some(p) = prev
            && ch.is_ascii_uppercase()
            && (p.is_ascii_lowercase() || p.is_ascii_digit())
        {
            out.push_str(separator);
        }
        out.push(ch.to_ascii_uppercase());
        prev = Some(ch);
    }

    out
}

fn variant_keyword(variant: &syn::Variant) -> syn::Result<LitStr> {
    if !matches!(variant.fields, Fields::Unit) {
        return Err(syn::Error::new(
            variant.span(),
            "TsplibDisplay only supports unit variants",
        ));
    }

    Ok(LitStr::new(
        &keyword_from_ident(&variant.ident.to_string(), SEPARATOR),
        variant.ident.span(),
    ))
}

pub fn derive_tsplib_display_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let enum_ident = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new(input.span(), "TsplibDisplay can only be derived for enums")
            .to_compile_error()
            .into();
    };

    let mut arms = Vec::with_capacity(data_enum.variants.len());
    for variant in &data_enum.variants {
        let keyword = match variant_keyword(variant) {
            Ok(keyword) => keyword,
            Err(err) => return err.to_compile_error().into(),
        };
        let variant_ident = &variant.ident;
        arms.push(quote! { Self::#variant_ident => #keyword, });
    }

    let expanded = quote! {
        impl #enum_ident {
            /// Keyword exactly as it appears in a TSPLIB file.
            pub const fn keyword(&self) -> &'static str {
                match self {
                    #(#arms)*
                }
            }
        }

        impl std::fmt::Display for #enum_ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.keyword())
            }
        }
    };

    TokenStream::from(expanded)
}

#[cfg(test)]
mod tests {
    use super::keyword_from_ident;

    #[test]
    fn uppercases_single_word() {
        assert_eq!(keyword_from_ident("Explicit", "_"), "EXPLICIT");
        assert_eq!(keyword_from_ident("Tsp", "_"), "TSP");
    }

    #[test]
    fn splits_words_with_separator() {
        assert_eq!(keyword_from_ident("FullMatrix", "_"), "FULL_MATRIX");
        assert_eq!(keyword_from_ident("NoCoords", "_"), "NO_COORDS");
        assert_eq!(keyword_from_ident("UpperDiagRow", "-"), "UPPER-DIAG-ROW");
    }

    #[test]
    fn digits_stay_attached_to_previous_word() {
        assert_eq!(keyword_from_ident("Euc2d", "_"), "EUC2D");
        assert_eq!(keyword_from_ident("Euc2dTwo", "_"), "EUC2D_TWO");
    }
}
