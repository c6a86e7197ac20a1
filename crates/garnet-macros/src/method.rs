// #[method] proc-macro implementation
//
// Generates a descriptor constructor next to the annotated function.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{ItemFn, LitStr, Result};

use crate::args::MethodArgs;
use crate::signature::Shape;

/// Expands the #[method] attribute macro.
///
/// Example expansion:
/// ```ignore
/// // Input:
/// #[method(name = "size", alias = "length")]
/// fn size(recv: &Value) -> Value { ... }
///
/// // Output:
/// fn size(recv: &Value) -> Value { ... }
///
/// fn size_descriptor() -> Result<MethodDescriptor, DescriptorError> {
///     fn __host(__recv: &Value) -> HostResult {
///         IntoHostResult::into_host_result(size(__recv))
///     }
///     MethodDescriptor::builder("size")
///         .alias("length")
///         .host(HostFunction::Receiver(__host))
///         .build()
/// }
/// ```
pub fn expand_method(args: MethodArgs, func: ItemFn) -> Result<TokenStream> {
    let shape = Shape::infer(&func.sig)?;

    let func_name = &func.sig.ident;
    let vis = &func.vis;
    let descriptor_name = format_ident!("{}_descriptor", func_name);
    let method_name = args
        .name
        .clone()
        .unwrap_or_else(|| LitStr::new(&func_name.to_string(), func_name.span()));

    let bind = quote!(::garnet_bind);
    let core = quote!(::garnet_bind::garnet_core);

    let mut properties = Vec::new();
    match (&args.required, shape.fixed_slots()) {
        (Some(required), _) => properties.push(quote!(.required(#required))),
        // Fixed signatures imply their required count
        (None, Some(slots)) if slots > 0 => {
            let slots = slots as i64;
            properties.push(quote!(.required(#slots)));
        }
        _ => {}
    }
    if let Some(optional) = &args.optional {
        properties.push(quote!(.optional(#optional)));
    }
    if args.rest {
        properties.push(quote!(.rest()));
    }
    if let Some(check_arity) = &args.check_arity {
        properties.push(quote!(.check_arity(#check_arity)));
    }
    if let Some(visibility) = &args.visibility {
        let variant = match visibility.to_string().as_str() {
            "public" => format_ident!("Public"),
            "private" => format_ident!("Private"),
            "protected" => format_ident!("Protected"),
            _ => format_ident!("ModuleFunction"),
        };
        properties.push(quote!(.visibility(#bind::DeclaredVisibility::#variant)));
    }
    if args.module {
        properties.push(quote!(.module()));
    }
    if args.meta {
        properties.push(quote!(.meta()));
    }
    if let Some(compat) = &args.compat {
        properties.push(quote!(.compat(#compat)));
    }
    for alias in &args.aliases {
        properties.push(quote!(.alias(#alias)));
    }

    let variant = shape.variant();
    let shim_params = shape.shim_params();
    let call_args = shape.call_args();
    let doc = format!("Binding metadata for [`{}`]", func_name);

    let expanded = quote! {
        #func

        #[doc = #doc]
        #vis fn #descriptor_name() -> ::core::result::Result<#bind::MethodDescriptor, #bind::DescriptorError> {
            fn __host(#shim_params) -> #core::HostResult {
                #core::IntoHostResult::into_host_result(#func_name(#call_args))
            }

            #bind::MethodDescriptor::builder(#method_name)
                #(#properties)*
                .host(#bind::HostFunction::#variant(__host))
                .build()
        }
    };

    Ok(expanded)
}
