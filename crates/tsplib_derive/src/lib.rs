mod tsplib_display;

use proc_macro::TokenStream;

/// Renders unit enum variants as TSPLIB keywords (`FullMatrix` -> `FULL_MATRIX`).
#[proc_macro_derive(TsplibDisplay)]
pub fn derive_tsplib_display(input: TokenStream) -> TokenStream {
    tsplib_display::derive_tsplib_display_inner(input)
}
