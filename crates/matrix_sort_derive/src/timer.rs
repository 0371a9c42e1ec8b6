use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemFn, LitStr, parse_macro_input};

pub fn timer_inner(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut func = parse_macro_input!(item as ItemFn);
    let label = if attr.is_empty() {
        func.sig.ident.to_string()
    } else {
        parse_macro_input!(attr as LitStr).value()
    };
    let label_lit = LitStr::new(&label, proc_macro2::Span::call_site());

    let guard: syn::Block = syn::parse_quote!({
        struct __TimerGuard(std::time::Instant);

        impl Drop for __TimerGuard {
            fn drop(&mut self) {
                log::debug!(
                    "{}: elapsed={:.3}s",
                    #label_lit,
                    self.0.elapsed().as_secs_f64()
                );
            }
        }

        let __timer_guard = __TimerGuard(std::time::Instant::now());
    });

    let mut stmts = guard.stmts;
    stmts.append(&mut func.block.stmts);
    func.block.stmts = stmts;

    TokenStream::from(quote! { #func })
}
