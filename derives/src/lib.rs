mod contexts;

use proc_macro::TokenStream;

/// Generates the `ContextSource` table for an inherent impl block from its
/// `#[before_context("..")]` and `#[after_context("..")]` methods.
#[proc_macro_attribute]
pub fn contexts(
    attr: TokenStream,
    tokens: TokenStream,
) -> TokenStream {
    contexts::generate_contexts(attr.into(), tokens.into()).into()
}

/// Turns `fn name(fixture: &mut Fixture)` into a `#[test]` wrapped by the
/// fixture's declared contexts.
#[proc_macro_attribute]
pub fn context_test(
    attr: TokenStream,
    tokens: TokenStream,
) -> TokenStream {
    context_test::context_test(attr.into(), tokens.into()).into()
}

#[proc_macro_attribute]
pub fn before_context(
    _: TokenStream,
    tokens: TokenStream,
) -> TokenStream {
    outside_contexts("before_context", tokens)
}

#[proc_macro_attribute]
pub fn after_context(
    _: TokenStream,
    tokens: TokenStream,
) -> TokenStream {
    outside_contexts("after_context", tokens)
}

fn outside_contexts(
    tag: &str,
    tokens: TokenStream,
) -> TokenStream {
    let tokens = proc_macro2::TokenStream::from(tokens);
    let err = syn::Error::new(
        proc_macro2::Span::call_site(),
        format!("#[{tag}] is only valid on methods of an impl block marked #[contexts]"),
    )
    .to_compile_error();

    quote::quote!(#err #tokens).into()
}

mod internal {
    macro_rules! call_span {
        ($op: expr) => {
            match $op {
                Ok(v) => v,
                Err(e) => return e.to_compile_error(),
            }
        };
    }

    pub(crate) use call_span;
}

pub(crate) use internal::call_span;
