use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::{Span, TokenStream};
use quote::{ToTokens, quote};
use syn::{Data, DeriveInput, Fields, Index, Member, Visibility, parse_quote, parse2};

/// Options read from `#[lex(...)]` on the struct.
#[derive(Default)]
struct LexArgs {
    transparent: bool,
}

impl LexArgs {
    fn from_attrs(attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let mut args = LexArgs::default();
        for attr in attrs.iter().filter(|attr| attr.path().is_ident("lex")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("transparent") {
                    args.transparent = true;
                    Ok(())
                } else {
                    Err(meta.error(format!(
                        "unsupported argument '{}'. Supported arguments: transparent",
                        meta.path.to_token_stream().to_string().replace(' ', "")
                    )))
                }
            })?;
        }
        Ok(args)
    }
}

/// A field as seen by the generated code.
struct RecordField {
    member: Member,
    decoded: bool,
}

fn record_fields(fields: &Fields) -> syn::Result<Vec<RecordField>> {
    fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            // `#[lex(...)]` only configures the struct as a whole
            if let Some(attr) = field.attrs.iter().find(|attr| attr.path().is_ident("lex")) {
                return Err(syn::Error::new_spanned(
                    attr,
                    "#[lex(...)] is not supported on fields; every field is encoded",
                ));
            }
            Ok(RecordField {
                member: match &field.ident {
                    Some(ident) => Member::Named(ident.clone()),
                    None => Member::Unnamed(Index::from(i)),
                },
                decoded: matches!(field.vis, Visibility::Public(_)),
            })
        })
        .collect()
}

pub fn derive_impl(input: TokenStream) -> TokenStream {
    let input = match parse2::<DeriveInput>(input) {
        Ok(v) => v,
        Err(e) => return e.to_compile_error(),
    };

    match expand(&input) {
        Ok(tokens) => tokens,
        Err(e) => e.to_compile_error(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        Data::Enum(data) => {
            return Err(syn::Error::new_spanned(
                data.enum_token,
                "Lex cannot be derived for enums; only structs are records",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new_spanned(
                data.union_token,
                "Lex cannot be derived for unions; only structs are records",
            ));
        }
    };

    let args = LexArgs::from_attrs(&input.attrs)?;
    let crate_path = macro_crate_path();
    let name = &input.ident;
    let record_name = name.to_string();

    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(#crate_path::Lex));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let fields = record_fields(fields)?;

    if args.transparent {
        let [field] = fields.as_slice() else {
            return Err(syn::Error::new_spanned(
                name,
                "#[lex(transparent)] requires a struct with exactly one field",
            ));
        };
        let member = &field.member;
        return Ok(quote! {
            impl #impl_generics #crate_path::Lex for #name #ty_generics #where_clause {
                #[inline]
                fn lex_size(&self) -> #crate_path::Result<usize> {
                    #crate_path::Lex::lex_size(&self.#member)
                }

                #[inline]
                fn lex_encode(&self, buf: &mut [u8]) -> #crate_path::Result<usize> {
                    #crate_path::Lex::lex_encode(&self.#member, buf)
                }

                #[inline]
                fn lex_decode(&mut self, buf: &[u8]) -> #crate_path::Result<usize> {
                    #crate_path::Lex::lex_decode(&mut self.#member, buf)
                }

                #[inline]
                fn lex_decode_whole(&mut self, buf: &[u8]) -> #crate_path::Result<usize> {
                    #crate_path::Lex::lex_decode_whole(&mut self.#member, buf)
                }
            }
        });
    }

    let size_terms = fields.iter().map(|RecordField { member, .. }| {
        quote! {
            size += #crate_path::Lex::lex_size(&self.#member)?;
        }
    });
    let encode_terms = fields.iter().map(|RecordField { member, .. }| {
        quote! {
            offset += #crate_path::Lex::lex_encode(
                &self.#member,
                #crate_path::record::tail_mut(buf, offset)?,
            )?;
        }
    });
    let decode_terms = fields.iter().filter(|f| f.decoded).map(|RecordField { member, .. }| {
        quote! {
            offset += #crate_path::Lex::lex_decode(
                &mut self.#member,
                #crate_path::record::tail(buf, offset)?,
            )?;
        }
    });

    Ok(quote! {
        #[allow(unused_mut, unused_variables)]
        impl #impl_generics #crate_path::Lex for #name #ty_generics #where_clause {
            fn lex_size(&self) -> #crate_path::Result<usize> {
                let mut size = 0usize;
                #(#size_terms)*
                #crate_path::record::sized(size, #record_name)
            }

            fn lex_encode(&self, buf: &mut [u8]) -> #crate_path::Result<usize> {
                let mut offset = 0usize;
                #(#encode_terms)*
                #crate_path::record::sized(offset, #record_name)
            }

            fn lex_decode(&mut self, buf: &[u8]) -> #crate_path::Result<usize> {
                let mut offset = 0usize;
                #(#decode_terms)*
                #crate_path::record::consumed(offset, #record_name)
            }
        }
    })
}

fn macro_crate_path() -> TokenStream {
    match crate_name("lexkey") {
        // lexkey declares `extern crate self as lexkey`
        Ok(FoundCrate::Itself) => quote!(::lexkey),
        Ok(FoundCrate::Name(name)) => {
            let ident = syn::Ident::new(&name, Span::call_site());
            quote!(::#ident)
        }
        // not a direct dependency of the calling crate, e.g. reached through
        // a re-export
        Err(_) => quote!(::lexkey),
    }
}
