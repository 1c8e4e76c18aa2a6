extern crate proc_macro;
use proc_macro::TokenStream;

mod grammar;
mod util;

/// Compile a grammar catalog into the static `GRAMMAR` table and the `lookup_schema()` function
#[proc_macro]
pub fn a2l_grammar(tokens: TokenStream) -> TokenStream {
    let tokens2: proc_macro2::TokenStream = tokens.into();
    grammar::a2l_grammar(tokens2).into()
}
