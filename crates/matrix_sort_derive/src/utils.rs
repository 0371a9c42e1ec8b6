use quote::quote;
use syn::{
    AngleBracketedGenericArguments, Attribute, Expr, ExprLit, GenericArgument, Lit, Meta, Path,
    PathArguments, Type, TypePath,
};

pub fn to_kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (idx, ch) in s.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if idx != 0 {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

pub fn inner_of_option(ty: &Type) -> Option<&Type> {
    let Type::Path(TypePath { path, .. }) = ty else {
        return None;
    };
    let is_option = match path.segments.len() {
        1 => path.segments[0].ident == "Option",
        3 => {
            (path.segments[0].ident == "std" || path.segments[0].ident == "core")
                && path.segments[1].ident == "option"
                && path.segments[2].ident == "Option"
        }
        _ => false,
    };
    if !is_option {
        return None;
    }

    if let Some(seg) = path.segments.last()
        && let PathArguments::AngleBracketed(AngleBracketedGenericArguments { args, .. }) =
            &seg.arguments
        && let Some(GenericArgument::Type(t)) = args.first()
    {
        return Some(t);
    }
    None
}

/// Joins the `///` lines on a field into one sentence-per-line string.
pub fn doc_comment(attrs: &[Attribute]) -> String {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => Some(s.value().trim().to_string()),
                _ => None,
            },
            _ => None,
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Placeholder shown after `--name` in help text, taken from the last path
/// segment of the (optional-unwrapped) field type.
pub fn type_hint(ty: &Type) -> String {
    let ty = inner_of_option(ty).unwrap_or(ty);
    let Type::Path(TypePath { path, .. }) = ty else {
        return "value".to_string();
    };
    match path.segments.last().map(|seg| seg.ident.to_string()) {
        Some(name) if name == "PathBuf" => "path".to_string(),
        Some(name) if name == "String" => "text".to_string(),
        Some(name) => to_kebab_case(&name),
        None => "value".to_string(),
    }
}

/// Expression turning the `raw: String` in scope into the field's value.
/// `Option<T>` fields are parsed as `T` and wrapped in `Some`.
pub fn build_cli_parse_expr(ty: &Type, parse_with: Option<&Path>) -> proc_macro2::TokenStream {
    if let Some(parse_with) = parse_with {
        return match inner_of_option(ty) {
            Some(_) => quote! { Some(#parse_with(&raw)?) },
            None => quote! { #parse_with(&raw)? },
        };
    }

    let (target, wrap) = match inner_of_option(ty) {
        Some(inner) => (inner, true),
        None => (ty, false),
    };
    let parsed = quote! {
        raw.parse::<#target>()
            .map_err(|e| crate::Error::invalid_input(format!(
                "Invalid value for --{name}: {raw} ({e})"
            )))?
    };
    if wrap {
        quote! { Some(#parsed) }
    } else {
        parsed
    }
}
