// Adapter shape inference from a host function signature

use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use syn::{FnArg, GenericArgument, PathArguments, Result, Signature, Type};

/// Parameter kinds a host function may take
#[derive(Clone, Copy, PartialEq, Eq)]
enum Param {
    Context,
    Value,
    Slice,
    Block,
}

/// Inferred shape of a host function
pub struct Shape {
    context: bool,
    fixed: Option<usize>,
    block: bool,
}

impl Shape {
    /// Infer the shape of `sig`
    pub fn infer(sig: &Signature) -> Result<Self> {
        if let Some(asyncness) = &sig.asyncness {
            return Err(syn::Error::new_spanned(asyncness, "host methods cannot be async"));
        }
        if !sig.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(&sig.generics, "host methods cannot be generic"));
        }

        let mut params = Vec::new();
        for arg in &sig.inputs {
            match arg {
                FnArg::Typed(pat_type) => params.push(classify(&pat_type.ty)?),
                FnArg::Receiver(_) => {
                    return Err(syn::Error::new_spanned(arg, "`self` is not supported in #[method]"));
                }
            }
        }

        let mut rest = params.as_slice();
        let context = matches!(rest.first(), Some(Param::Context));
        if context {
            rest = &rest[1..];
        }
        match rest.first() {
            Some(Param::Value) => rest = &rest[1..],
            _ => {
                return Err(syn::Error::new_spanned(
                    &sig.inputs,
                    "expected a `&Value` receiver (after an optional `&CallContext`)",
                ))
            }
        }

        let shape = match rest {
            [Param::Slice] => Shape { context, fixed: None, block: false },
            [Param::Slice, Param::Block] if context => Shape { context, fixed: None, block: true },
            [Param::Slice, Param::Block] => {
                return Err(syn::Error::new_spanned(
                    &sig.inputs,
                    "a block parameter requires a leading `&CallContext`",
                ))
            }
            values if values.len() <= 3 && values.iter().all(|p| *p == Param::Value) => Shape {
                context,
                fixed: Some(values.len()),
                block: false,
            },
            _ => {
                return Err(syn::Error::new_spanned(
                    &sig.inputs,
                    "unsupported parameters: use up to three `&Value` or one `&[Value]`",
                ))
            }
        };
        Ok(shape)
    }

    /// Positional slots of a fixed shape
    pub fn fixed_slots(&self) -> Option<usize> {
        self.fixed
    }

    /// `HostFunction` variant name
    pub fn variant(&self) -> Ident {
        let name = match (self.context, self.fixed, self.block) {
            (false, Some(0), _) => "Receiver",
            (false, Some(1), _) => "Fixed1",
            (false, Some(2), _) => "Fixed2",
            (false, Some(_), _) => "Fixed3",
            (false, None, _) => "Args",
            (true, Some(0), _) => "ContextReceiver",
            (true, Some(1), _) => "ContextFixed1",
            (true, Some(2), _) => "ContextFixed2",
            (true, Some(_), _) => "ContextFixed3",
            (true, None, false) => "ContextArgs",
            (true, None, true) => "ContextArgsBlock",
        };
        Ident::new(name, Span::call_site())
    }

    /// Parameter list of the generated host shim
    pub fn shim_params(&self) -> TokenStream {
        let core = quote!(::garnet_bind::garnet_core);
        let mut params = Vec::new();
        if self.context {
            params.push(quote!(__ctx: &#core::CallContext<'_>));
        }
        params.push(quote!(__recv: &#core::Value));
        match self.fixed {
            Some(n) => {
                for ident in arg_idents(n) {
                    params.push(quote!(#ident: &#core::Value));
                }
            }
            None => params.push(quote!(__args: &[#core::Value])),
        }
        if self.block {
            params.push(quote!(__block: ::core::option::Option<&#core::Block>));
        }
        quote!(#(#params),*)
    }

    /// Arguments forwarded from the shim to the annotated function
    pub fn call_args(&self) -> TokenStream {
        let mut args = Vec::new();
        if self.context {
            args.push(quote!(__ctx));
        }
        args.push(quote!(__recv));
        match self.fixed {
            Some(n) => args.extend(arg_idents(n).into_iter().map(|ident| quote!(#ident))),
            None => args.push(quote!(__args)),
        }
        if self.block {
            args.push(quote!(__block));
        }
        quote!(#(#args),*)
    }
}

fn arg_idents(n: usize) -> Vec<Ident> {
    (0..n).map(|i| Ident::new(&format!("__arg{}", i), Span::call_site())).collect()
}

fn classify(ty: &Type) -> Result<Param> {
    match ty {
        Type::Reference(reference) => match &*reference.elem {
            Type::Slice(slice) if last_ident_is(&slice.elem, "Value") => Ok(Param::Slice),
            elem if last_ident_is(elem, "Value") => Ok(Param::Value),
            elem if last_ident_is(elem, "CallContext") => Ok(Param::Context),
            _ => Err(unsupported(ty)),
        },
        Type::Path(path) => {
            let Some(segment) = path.path.segments.last() else {
                return Err(unsupported(ty));
            };
            if segment.ident != "Option" {
                return Err(unsupported(ty));
            }
            let PathArguments::AngleBracketed(generics) = &segment.arguments else {
                return Err(unsupported(ty));
            };
            match generics.args.first() {
                Some(GenericArgument::Type(Type::Reference(inner))) if last_ident_is(&inner.elem, "Block") => {
                    Ok(Param::Block)
                }
                _ => Err(unsupported(ty)),
            }
        }
        _ => Err(unsupported(ty)),
    }
}

fn last_ident_is(ty: &Type, name: &str) -> bool {
    match ty {
        Type::Path(path) => path.path.segments.last().is_some_and(|segment| segment.ident == name),
        _ => false,
    }
}

fn unsupported(ty: &Type) -> syn::Error {
    syn::Error::new_spanned(
        ty,
        "unsupported parameter type: expected `&CallContext`, `&Value`, `&[Value]` or `Option<&Block>`",
    )
}
