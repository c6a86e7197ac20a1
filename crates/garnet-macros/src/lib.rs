// garnet-macros: attribute front end for Garnet host functions
//
// Provides:
// - #[method(...)] - attaches binding metadata to a free function
//
// Example:
// ```
// use garnet_bind::method;
// use garnet_bind::garnet_core::Value;
//
// #[method(name = "four_arg_method", required = 4)]
// fn four_arg_method(_recv: &Value, args: &[Value]) -> Value {
//     Value::Integer(args.len() as i64)
// }
//
// // generated: fn four_arg_method_descriptor() -> Result<MethodDescriptor, DescriptorError>
// ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, ItemFn};

mod args;
mod method;
mod signature;

/// Declares a free function as a bindable host method.
///
/// The function is kept as written. Next to it a
/// `<fn>_descriptor() -> Result<MethodDescriptor, DescriptorError>` is
/// generated, using the function's visibility.
///
/// Properties:
/// - `name = "..."` - method name (defaults to the function name)
/// - `required = N`, `optional = N` - positional argument counts; fixed
///   signatures default `required` to their slot count
/// - `rest` - accepts any number of trailing arguments
/// - `check_arity = bool` - arity checking (defaults to on)
/// - `visibility = public|private|protected|module_function`
/// - `module` - also install on the singleton class
/// - `meta` - install on the singleton class only
/// - `compat = "tag"` - only bind under this compatibility tag
/// - `alias = "..."` - additional name, repeatable
///
/// The adapter shape comes from the signature: an optional leading
/// `&CallContext`, the receiver `&Value`, then up to three `&Value` or one
/// `&[Value]`. With a context, the slice may be followed by
/// `Option<&Block>`. The return type is anything implementing
/// `IntoHostResult`.
///
/// # Example
///
/// ```ignore
/// #[method(name = "initialize", required = 1, optional = 1)]
/// fn initialize(_recv: &Value, args: &[Value]) -> Value {
///     Value::Integer(args.len() as i64)
/// }
/// ```
#[proc_macro_attribute]
pub fn method(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut args = args::MethodArgs::default();
    let parser = syn::meta::parser(|meta| args.parse(meta));
    parse_macro_input!(attr with parser);

    let input = parse_macro_input!(item as ItemFn);
    method::expand_method(args, input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
