use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, ItemFn, ReturnType};

/// Instruments a function with a `tracing` span, records its return value (if
/// any) at `TRACE` level and emits a `call` event when the function is entered.
///
/// Any arguments are forwarded to `#[tracing::instrument]`, so `skip(...)`,
/// `fields(...)` and friends work as usual.
#[proc_macro_attribute]
pub fn trace_instrument(meta: TokenStream, input: TokenStream) -> TokenStream {
    let meta = proc_macro2::TokenStream::from(meta);
    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = parse_macro_input!(input as ItemFn);

    // unit returns carry no information worth recording
    let ret = if !matches!(sig.output, ReturnType::Default) {
        quote! { ret(level = "trace"), }
    } else {
        quote! {}
    };

    quote! {
        #[::tracing::instrument(#ret #meta)]
        #(#attrs)*
        #vis #sig {
            ::tracing::trace!("call");
            #block
        }
    }
    .into()
}
