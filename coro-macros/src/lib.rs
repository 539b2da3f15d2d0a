//! Procedural macros for coro
//!
//! This crate provides the `#[coro::coroutine]` attribute macro, which turns
//! an `async fn` taking a `Yield` handle into a constructor for a `Coro`.
//!
//! # Example
//!
//! ```rust,ignore
//! use coro::Yield;
//!
//! #[coro::coroutine]
//! async fn countdown(y: Yield, from: u32) -> u32 {
//!     let mut left = from;
//!     while left > 0 && y.suspend().await {
//!         left -= 1;
//!     }
//!     left
//! }
//!
//! let mut co = countdown(3);
//! assert_eq!(co.run_to_end(), 3);
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input,
    punctuated::Punctuated,
    FnArg, Ident, ItemFn, Lit, ReturnType, Token, Type,
};

/// Configuration options for the coroutine macro.
#[derive(Default)]
struct CoroutineConfig {
    /// Name reported in logs (default: the function name)
    name: Option<String>,
    /// Start policy ("lazy" or "eager")
    start: Option<String>,
}

impl Parse for CoroutineConfig {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut config = CoroutineConfig::default();

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "name" => {
                    let lit: Lit = input.parse()?;
                    if let Lit::Str(s) = lit {
                        config.name = Some(s.value());
                    } else {
                        return Err(syn::Error::new_spanned(lit, "`name` must be a string"));
                    }
                }
                "start" => {
                    let lit: Lit = input.parse()?;
                    if let Lit::Str(s) = lit {
                        config.start = Some(s.value());
                    } else {
                        return Err(syn::Error::new_spanned(lit, "`start` must be a string"));
                    }
                }
                _ => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {ident}"),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(config)
    }
}

/// Determines if a function parameter is the `Yield` handle.
fn is_yield_param(arg: &FnArg) -> bool {
    if let FnArg::Typed(pat_type) = arg {
        if let Type::Path(type_path) = &*pat_type.ty {
            if let Some(segment) = type_path.path.segments.last() {
                return segment.ident == "Yield";
            }
        }
    }
    false
}

/// Turns an `async fn` into a function that returns a suspended `Coro`.
///
/// The function must take exactly one `Yield` parameter; the remaining
/// parameters become the constructor's parameters and are moved into the
/// coroutine, so they must be owned (`'static`).
///
/// # Basic Usage
///
/// ```rust,ignore
/// use coro::Yield;
///
/// #[coro::coroutine]
/// async fn blink(y: Yield, times: usize) {
///     for _ in 0..times {
///         if !y.suspend().await {
///             return;
///         }
///     }
/// }
///
/// let mut co = blink(2);
/// assert_eq!(co.run_to_end(), 2);
/// ```
///
/// # Configuration Options
///
/// - `name = "..."` - Name used in logs (default: the function name)
/// - `start = "lazy"` or `start = "eager"` - Start policy (default: lazy)
///
/// ```rust,ignore
/// #[coro::coroutine(name = "rival", start = "eager")]
/// async fn rival(y: Yield) -> &'static str {
///     y.skip(2).await;
///     "rock"
/// }
/// ```
#[proc_macro_attribute]
pub fn coroutine(attr: TokenStream, item: TokenStream) -> TokenStream {
    let config = parse_macro_input!(attr as CoroutineConfig);
    let input = parse_macro_input!(item as ItemFn);

    expand_coroutine(config, input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_coroutine(config: CoroutineConfig, input: ItemFn) -> syn::Result<TokenStream2> {
    let sig = &input.sig;
    let name = &sig.ident;
    let body = &input.block;
    let attrs = &input.attrs;
    let vis = &input.vis;
    let (impl_generics, _, where_clause) = sig.generics.split_for_impl();

    if sig.asyncness.is_none() {
        return Err(syn::Error::new_spanned(sig, "coroutine function must be async"));
    }

    if let Some(receiver) = sig.inputs.iter().find(|arg| matches!(arg, FnArg::Receiver(_))) {
        return Err(syn::Error::new_spanned(
            receiver,
            "coroutine function cannot take self",
        ));
    }

    let yield_params: Vec<&FnArg> = sig.inputs.iter().filter(|arg| is_yield_param(arg)).collect();
    let yield_param = match yield_params.as_slice() {
        [FnArg::Typed(pat_type)] => pat_type,
        [] => {
            return Err(syn::Error::new_spanned(
                &sig.inputs,
                "coroutine function must take a `Yield` parameter",
            ));
        }
        _ => {
            return Err(syn::Error::new_spanned(
                &sig.inputs,
                "coroutine function must take exactly one `Yield` parameter",
            ));
        }
    };
    let yield_pat = &yield_param.pat;
    let yield_ty = &yield_param.ty;

    let params: Punctuated<&FnArg, Token![,]> = sig
        .inputs
        .iter()
        .filter(|arg| !is_yield_param(arg))
        .collect();

    let output = match &sig.output {
        ReturnType::Default => quote! { () },
        ReturnType::Type(_, ty) => quote! { #ty },
    };

    let start = match config.start.as_deref().unwrap_or("lazy") {
        "lazy" => quote! { ::coro::StartPolicy::Lazy },
        "eager" => quote! { ::coro::StartPolicy::Eager },
        other => {
            return Err(syn::Error::new(
                proc_macro2::Span::call_site(),
                format!("unsupported start policy: {other}. Use \"lazy\" or \"eager\""),
            ));
        }
    };

    let coro_name = config.name.unwrap_or_else(|| name.to_string());

    Ok(quote! {
        #(#attrs)*
        #vis fn #name #impl_generics (#params) -> ::coro::Coro<'static, #output> #where_clause {
            ::coro::CoroBuilder::new()
                .name(#coro_name)
                .start(#start)
                .build(move |#yield_pat: #yield_ty| async move #body)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{expand_coroutine, CoroutineConfig};
    use syn::ItemFn;

    fn item(src: &str) -> ItemFn {
        syn::parse_str(src).unwrap()
    }

    fn compact(tokens: &proc_macro2::TokenStream) -> String {
        tokens.to_string().split_whitespace().collect()
    }

    #[test]
    fn test_config_parse_empty() {
        let config: CoroutineConfig = syn::parse_str("").unwrap();
        assert!(config.name.is_none());
        assert!(config.start.is_none());
    }

    #[test]
    fn test_config_parse_multiple() {
        let config: CoroutineConfig =
            syn::parse_str("name = \"rival\", start = \"eager\"").unwrap();
        assert_eq!(config.name, Some("rival".to_string()));
        assert_eq!(config.start, Some("eager".to_string()));
    }

    #[test]
    fn test_config_parse_unknown_key() {
        assert!(syn::parse_str::<CoroutineConfig>("flavor = \"fast\"").is_err());
    }

    #[test]
    fn test_expand_strips_yield_param() {
        let expanded = expand_coroutine(
            CoroutineConfig::default(),
            item("async fn walk(y: Yield, steps: usize) -> u32 { y.skip(steps).await; 1 }"),
        )
        .unwrap();
        let expanded = compact(&expanded);

        assert!(expanded.contains("fnwalk(steps:usize)"));
        assert!(expanded.contains("::coro::Coro<'static,u32>"));
        assert!(expanded.contains("::coro::StartPolicy::Lazy"));
        assert!(expanded.contains("\"walk\""));
    }

    #[test]
    fn test_expand_eager_with_name() {
        let config: CoroutineConfig =
            syn::parse_str("name = \"rival\", start = \"eager\"").unwrap();
        let expanded = compact(&expand_coroutine(config, item("async fn ai(y: Yield) {}")).unwrap());

        assert!(expanded.contains("::coro::StartPolicy::Eager"));
        assert!(expanded.contains("\"rival\""));
    }

    #[test]
    fn test_expand_rejects_sync_fn() {
        let result = expand_coroutine(CoroutineConfig::default(), item("fn f(y: Yield) {}"));
        assert!(result.is_err());
    }

    #[test]
    fn test_expand_rejects_missing_yield() {
        let result = expand_coroutine(CoroutineConfig::default(), item("async fn f(n: u8) {}"));
        assert!(result.is_err());
    }

    #[test]
    fn test_expand_rejects_unknown_start() {
        let config: CoroutineConfig = syn::parse_str("start = \"sometimes\"").unwrap();
        let result = expand_coroutine(config, item("async fn f(y: Yield) {}"));
        assert!(result.is_err());
    }
}
