mod adapt;
mod utils;

use proc_macro::TokenStream;
use syn::parse_macro_input;

/// Adapts a type so "construct, then invoke one operation" becomes a single
/// call, exposed through a generated `{Type}Adapter` companion.
///
/// Apply this attribute to a type's inherent impl block. The block must
/// define a constructor `fn new(...) -> Self`; the attribute argument names
/// the operation to invoke on the freshly constructed instance, given either
/// as an identifier or as text. Omitting it designates the conventional
/// `call` operation.
///
/// When applied, this macro:
///
/// - Re-emits the impl block unchanged.
/// - Implements [`Construct`] from the constructor's signature and
///   [`Perform`] from the designated operation.
/// - Defines a `{Type}Adapter` unit struct whose `call` entry point forwards
///   its arguments to the constructor and invokes the operation on the new
///   instance. A non-conventional operation name adds a second entry point
///   under that exact name; both are generated independently, never by
///   delegation. Every invocation constructs a fresh instance.
///
/// If the designated operation is not defined in the block, the entry points
/// still compile and every invocation returns a [`MissingOperation`] error
/// identifying the operation and the type.
///
/// ## Restrictions
///
/// - The impl block must be inherent (not a trait impl) and non-generic.
/// - Constructor parameters must be owned types.
/// - The designated operation must take no arguments besides its receiver.
///
/// ## Example
///
/// ### Input
///
/// ```ignore
/// #[adapt(print)]
/// impl Printer {
///     pub fn new(message: String) -> Self {
///         Self { message }
///     }
///
///     pub fn print(self) -> String {
///         self.message
///     }
/// }
/// ```
///
/// ### Usage
///
/// ```ignore
/// let a = PrinterAdapter::call("one".into())?;
/// let b = PrinterAdapter::print("two".into())?;
/// let f = PrinterAdapter::entry_point().into_fn();
/// ```
///
/// [`Construct`]: opcall_core::Construct
/// [`Perform`]: opcall_core::Perform
/// [`MissingOperation`]: opcall_core::MissingOperation
#[proc_macro_attribute]
pub fn adapt(attr: TokenStream, item: TokenStream) -> TokenStream {
    let operation = parse_macro_input!(attr as adapt::OperationName);
    let parsed = parse_macro_input!(item as adapt::Parsed);

    parsed
        .expand(operation.ident())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
