//! Derive macros for lexkey

mod record;

use proc_macro::TokenStream;

/// Derives `lexkey::Lex` for a struct.
///
/// Fields are encoded back to back in declaration order. Every field is
/// encoded and counted by `lex_size`; only `pub` fields are decoded, the rest
/// are skipped without consuming input.
///
/// # Basic usage
///
/// ```ignore
/// #[derive(lexkey::Lex)]
/// struct MovieKey {
///     pub year: i16,
///     pub rating: f32,
///     pub title: String,
/// }
/// ```
///
/// # Newtypes
///
/// `#[lex(transparent)]` makes a single-field struct behave exactly like its
/// field, including the whole-buffer string decode and decoding a private
/// field.
///
/// ```ignore
/// #[derive(lexkey::Lex)]
/// #[lex(transparent)]
/// struct Title(String);
/// ```
#[proc_macro_derive(Lex, attributes(lex))]
pub fn derive_lex(input: TokenStream) -> TokenStream {
    record::derive_impl(input.into()).into()
}
