use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, FnArg, ImplItem, ImplItemFn, ItemImpl, LitStr};

use crate::call_span;

const BEFORE: &str = "before_context";
const AFTER: &str = "after_context";

struct Tagged {
    ident: syn::Ident,
    before: Option<LitStr>,
    after: Option<LitStr>,
}

pub fn generate_contexts(
    attr: TokenStream,
    tokens: TokenStream,
) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new_spanned(attr, "#[contexts] takes no arguments").to_compile_error();
    }

    let mut item: ItemImpl = call_span!(syn::parse2(tokens));

    if let Some((_, path, _)) = &item.trait_ {
        return syn::Error::new_spanned(path, "#[contexts] expects an inherent impl block")
            .to_compile_error();
    }

    let mut tagged = vec![];
    for impl_item in &mut item.items {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };

        let before = call_span!(take_tag(&mut method.attrs, BEFORE));
        let after = call_span!(take_tag(&mut method.attrs, AFTER));
        if before.is_none() && after.is_none() {
            continue;
        }

        call_span!(check_signature(method));
        tagged.push(Tagged {
            ident: method.sig.ident.clone(),
            before,
            after,
        });
    }

    let self_ty = &item.self_ty;
    let (impl_generics, _, where_clause) = item.generics.split_for_impl();

    let methods = tagged.iter().map(|tagged| {
        let ident = &tagged.ident;
        let name = ident.to_string();
        let before = optional(&tagged.before);
        let after = optional(&tagged.after);

        quote! {
            ::test_context::ContextMethod {
                name: #name,
                before: #before,
                after: #after,
                invoke: |this: &mut Self| {
                    ::test_context::IntoActionResult::into_action_result(Self::#ident(this))
                },
            }
        }
    });

    quote! {
        #item

        impl #impl_generics ::test_context::ContextSource for #self_ty #where_clause {
            fn context_methods() -> ::std::vec::Vec<::test_context::ContextMethod<Self>> {
                ::std::vec![#(#methods),*]
            }
        }
    }
}

fn optional(name: &Option<LitStr>) -> TokenStream {
    match name {
        Some(name) => quote!(::core::option::Option::Some(#name)),
        None => quote!(::core::option::Option::None),
    }
}

fn is_tag(
    attr: &Attribute,
    tag: &str,
) -> bool {
    attr.path()
        .segments
        .last()
        .is_some_and(|segment| segment.ident == tag)
}

/// Remove every `#[tag("name")]` from `attrs`, returning the declared name.
fn take_tag(
    attrs: &mut Vec<Attribute>,
    tag: &str,
) -> syn::Result<Option<LitStr>> {
    let mut found = None;
    let mut kept = Vec::with_capacity(attrs.len());

    for attr in attrs.drain(..) {
        if !is_tag(&attr, tag) {
            kept.push(attr);
            continue;
        }

        if found.is_some() {
            return Err(syn::Error::new_spanned(
                &attr,
                format!("#[{tag}] may only appear once per method"),
            ));
        }
        found = Some(attr.parse_args::<LitStr>()?);
    }

    *attrs = kept;
    Ok(found)
}

fn check_signature(method: &ImplItemFn) -> syn::Result<()> {
    let sig = &method.sig;

    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "context methods must be synchronous",
        ));
    }

    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "context methods cannot be generic",
        ));
    }

    let mut inputs = sig.inputs.iter();
    match (inputs.next(), inputs.next()) {
        (Some(FnArg::Receiver(receiver)), None) if receiver.reference.is_some() => Ok(()),
        _ => Err(syn::Error::new_spanned(
            &sig.inputs,
            "context methods take only `&self` or `&mut self`",
        )),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_case::test_case;

    fn expand(tokens: TokenStream) -> String {
        generate_contexts(TokenStream::new(), tokens).to_string()
    }

    #[test]
    fn strips_tags_and_lists_methods() {
        let out = expand(quote! {
            impl Pair {
                #[before_context("a is not null")]
                pub fn set_a(&mut self) {}

                #[after_context("a is not null")]
                #[before_context("b is not null")]
                fn both(&mut self) {}

                fn helper(&self) {}
            }
        });

        assert!(!out.contains("# [before_context"));
        assert!(!out.contains("# [after_context"));
        assert!(out.contains("ContextSource for Pair"));
        assert!(out.contains("name : \"set_a\""));
        assert!(out.contains("name : \"both\""));
        assert!(!out.contains("name : \"helper\""));

        let set_a = out.find("\"set_a\"").unwrap();
        let both = out.find("\"both\"").unwrap();
        assert!(set_a < both);
    }

    #[test]
    fn keeps_other_attributes() {
        let out = expand(quote! {
            impl Pair {
                #[inline]
                #[test_context::before_context("a")]
                fn set_a(&mut self) {}
            }
        });

        assert!(out.contains("# [inline]"));
        assert!(!out.contains("before_context"));
    }

    #[test_case(quote!(impl Pair { #[before_context("a")] fn f() {} }); "associated fn")]
    #[test_case(quote!(impl Pair { #[before_context("a")] fn f(self) {} }); "by value receiver")]
    #[test_case(quote!(impl Pair { #[before_context("a")] fn f(&mut self, n: u8) {} }); "extra argument")]
    #[test_case(quote!(impl Pair { #[before_context("a")] async fn f(&mut self) {} }); "async")]
    #[test_case(quote!(impl Pair { #[before_context("a")] fn f<T>(&mut self) {} }); "generic")]
    #[test_case(quote!(impl Pair { #[before_context("a")] #[before_context("b")] fn f(&mut self) {} }); "repeated tag")]
    #[test_case(quote!(impl Pair { #[before_context(a)] fn f(&mut self) {} }); "name is not a string")]
    #[test_case(quote!(impl Default for Pair { }); "trait impl")]
    fn rejects(tokens: TokenStream) {
        assert!(expand(tokens).contains("compile_error"));
    }

    #[test]
    fn rejects_arguments() {
        let out = generate_contexts(quote!(oops), quote!(impl Pair {})).to_string();
        assert!(out.contains("compile_error"));
    }
}
