use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::{
    parse::{Parse, ParseStream},
    Error, FnArg, Ident, ImplItem, ImplItemFn, ItemImpl, LitStr, Pat, Result, ReturnType, Type,
    Visibility,
};

use crate::utils::IdentExt;

/// The optional operation name passed to the attribute, accepted either as
/// an identifier (`#[adapt(print)]`) or as text (`#[adapt("print")]`).
/// Text is trimmed and must parse as an identifier; omitting the argument
/// designates the conventional `call` operation.
#[derive(Debug)]
pub(crate) struct OperationName(Ident);

impl Parse for OperationName {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.is_empty() {
            return Ok(Self(Ident::new("call", Span::call_site())));
        }

        let lookahead = input.lookahead1();
        let ident = if lookahead.peek(LitStr) {
            let lit: LitStr = input.parse()?;
            let text = lit.value();
            let trimmed = text.trim();

            syn::parse_str::<Ident>(trimmed).map_err(|_| {
                Error::new(
                    lit.span(),
                    format!("`{text}` is not a valid operation name"),
                )
            })?;
            Ident::new(trimmed, lit.span())
        } else if lookahead.peek(Ident) {
            input.parse()?
        } else {
            return Err(lookahead.error());
        };

        if !input.is_empty() {
            return Err(input.error("Expected a single operation name."));
        }

        Ok(Self(ident))
    }
}

impl OperationName {
    pub fn ident(&self) -> &Ident {
        &self.0
    }
}

#[derive(Debug)]
pub(crate) struct Parsed {
    item: ItemImpl,
    target: Ident,
}

struct Constructor {
    vis: Visibility,
    args: Vec<CtorArg>,
}

struct CtorArg {
    ident: Ident,
    ty: Type,
}

struct OperationMethod {
    output: Type,
    needs_mut: bool,
}

impl Parse for Parsed {
    /// Parses an inherent impl block and validates constraints.
    fn parse(input: ParseStream) -> Result<Self> {
        let item: ItemImpl = input.parse()?;

        if let Some((_, path, _)) = &item.trait_ {
            return Err(Error::new_spanned(
                path,
                "Trait impls are not supported. Apply this macro to the type's inherent impl block.",
            ));
        }

        if !item.generics.params.is_empty() {
            return Err(Error::new_spanned(
                &item.generics,
                "Generic parameters are not allowed. Remove them to use this macro.",
            ));
        }

        let target = match item.self_ty.as_ref() {
            Type::Path(type_path) if type_path.qself.is_none() => {
                type_path.path.get_ident().cloned()
            }
            _ => None,
        };

        let Some(target) = target else {
            return Err(Error::new_spanned(
                &item.self_ty,
                "Unsupported self type. This macro requires a plain type name.",
            ));
        };

        Ok(Parsed { item, target })
    }
}

impl Parsed {
    /// Generates the full token stream for the macro expansion: the original
    /// impl block, the `Construct` and `Perform` implementations, and the
    /// adapter companion type carrying the entry points.
    pub fn expand(self, operation: &Ident) -> Result<TokenStream> {
        let constructor = self.constructor()?;
        let method = self.operation_method(operation)?;

        let item = &self.item;
        let construct_impl = self.generate_construct_impl(&constructor);
        let perform_impl = self.generate_perform_impl(operation, method.as_ref());
        let adapter = self.generate_adapter(&constructor, operation);

        Ok(quote! {
            #item

            #construct_impl

            #perform_impl

            #adapter
        })
    }

    /// Finds `fn new` and captures its visibility and argument list.
    fn constructor(&self) -> Result<Constructor> {
        let Some(method) = self.find_method("new") else {
            return Err(Error::new_spanned(
                &self.target,
                "No constructor found. The impl block must define `fn new(...) -> Self`.",
            ));
        };

        if method.sig.receiver().is_some() {
            return Err(Error::new_spanned(
                &method.sig,
                "The constructor must not take `self`.",
            ));
        }

        let returns_self = match &method.sig.output {
            ReturnType::Type(_, ty) => self.is_self_type(ty),
            ReturnType::Default => false,
        };
        if !returns_self {
            return Err(Error::new_spanned(
                &method.sig,
                "The constructor must return `Self`.",
            ));
        }

        let mut args = Vec::new();
        for (index, input) in method.sig.inputs.iter().enumerate() {
            let FnArg::Typed(pat_type) = input else {
                continue;
            };

            if matches!(pat_type.ty.as_ref(), Type::Reference(_)) {
                return Err(Error::new_spanned(
                    &pat_type.ty,
                    "Constructor arguments must be owned types.",
                ));
            }

            let ident = match pat_type.pat.as_ref() {
                Pat::Ident(pat) => pat.ident.clone(),
                _ => format_ident!("arg{index}"),
            };

            args.push(CtorArg {
                ident,
                ty: (*pat_type.ty).clone(),
            });
        }

        Ok(Constructor {
            vis: method.vis.clone(),
            args,
        })
    }

    /// Looks up the designated operation method. A missing method is not an
    /// error here; the expansion then surfaces `MissingOperation` whenever
    /// an entry point is invoked.
    fn operation_method(&self, operation: &Ident) -> Result<Option<OperationMethod>> {
        let Some(method) = self.find_method(&operation.to_string()) else {
            return Ok(None);
        };

        let Some(receiver) = method.sig.receiver() else {
            return Err(Error::new_spanned(
                &method.sig,
                format!("Operation `{operation}` must take a receiver."),
            ));
        };

        if method.sig.inputs.len() > 1 {
            return Err(Error::new_spanned(
                &method.sig,
                format!("Operation `{operation}` must take no arguments besides its receiver."),
            ));
        }

        let needs_mut = receiver.reference.is_some() && receiver.mutability.is_some();

        let output = match &method.sig.output {
            ReturnType::Type(_, ty) => (**ty).clone(),
            ReturnType::Default => syn::parse_quote!(()),
        };

        Ok(Some(OperationMethod { output, needs_mut }))
    }

    fn find_method(&self, name: &str) -> Option<&ImplItemFn> {
        self.item.items.iter().find_map(|item| match item {
            ImplItem::Fn(method) if method.sig.ident == name => Some(method),
            _ => None,
        })
    }

    fn is_self_type(&self, ty: &Type) -> bool {
        match ty {
            Type::Path(type_path) if type_path.qself.is_none() => type_path
                .path
                .get_ident()
                .is_some_and(|ident| ident == "Self" || *ident == self.target),
            _ => false,
        }
    }

    /// Generates the `Construct` implementation, bundling the constructor's
    /// parameter list into a single `Args` type.
    fn generate_construct_impl(&self, constructor: &Constructor) -> TokenStream {
        let target = &self.target;

        let idents: Vec<_> = constructor.args.iter().map(|arg| &arg.ident).collect();
        let types: Vec<_> = constructor.args.iter().map(|arg| &arg.ty).collect();

        let (args_ty, construct) = match constructor.args.len() {
            0 => (
                quote! { () },
                quote! {
                    fn construct(_args: Self::Args) -> Self {
                        Self::new()
                    }
                },
            ),
            1 => {
                let ident = idents[0];
                let ty = types[0];
                (
                    quote! { #ty },
                    quote! {
                        fn construct(#ident: Self::Args) -> Self {
                            Self::new(#ident)
                        }
                    },
                )
            }
            _ => (
                quote! { (#(#types),*) },
                quote! {
                    fn construct(args: Self::Args) -> Self {
                        let (#(#idents),*) = args;
                        Self::new(#(#idents),*)
                    }
                },
            ),
        };

        quote! {
            impl opcall_core::Construct for #target {
                type Args = #args_ty;

                #construct
            }
        }
    }

    /// Generates the `Perform` implementation. When the designated operation
    /// is defined it is dispatched by name; otherwise every invocation
    /// yields `MissingOperation` at call time.
    fn generate_perform_impl(
        &self,
        operation: &Ident,
        method: Option<&OperationMethod>,
    ) -> TokenStream {
        let target = &self.target;

        let Some(method) = method else {
            return quote! {
                impl opcall_core::Perform for #target {
                    type Output = ();

                    fn perform(self, operation: &opcall_core::OpName) -> Result<Self::Output, opcall_core::MissingOperation> {
                        Err(opcall_core::MissingOperation::new::<Self>(operation.clone()))
                    }
                }
            };
        };

        let output = &method.output;
        let op_str = operation.to_string();
        let receiver = if method.needs_mut {
            quote! { mut self }
        } else {
            quote! { self }
        };

        quote! {
            impl opcall_core::Perform for #target {
                type Output = #output;

                fn perform(#receiver, operation: &opcall_core::OpName) -> Result<Self::Output, opcall_core::MissingOperation> {
                    if operation.as_str() == #op_str {
                        Ok(self.#operation())
                    } else {
                        Err(opcall_core::MissingOperation::new::<Self>(operation.clone()))
                    }
                }
            }
        }
    }

    /// Generates the adapter companion type. The conventional `call` entry
    /// point is always defined; a distinct operation name adds a second,
    /// independently generated entry point under that name.
    fn generate_adapter(&self, constructor: &Constructor, operation: &Ident) -> TokenStream {
        let target = &self.target;
        let vis = &constructor.vis;
        let adapter_name = target.with_suffix("Adapter");
        let adapter_doc = format!(" Construct-then-invoke entry points for `{target}`.");
        let op_str = operation.to_string();

        let conventional = Ident::new("call", Span::call_site());
        let call_entry = self.generate_entry(constructor, &conventional, operation);
        let named_entry =
            (*operation != conventional).then(|| self.generate_entry(constructor, operation, operation));

        quote! {
            #[doc = #adapter_doc]
            #[derive(Debug)]
            #vis struct #adapter_name;

            impl #adapter_name {
                #call_entry

                #named_entry

                /// Returns a standalone entry point with the same behavior as `call`.
                #vis fn entry_point() -> opcall_core::EntryPoint<#target> {
                    opcall_core::EntryPoint::of(opcall_core::OpName::from_static(#op_str))
                }
            }
        }
    }

    fn generate_entry(
        &self,
        constructor: &Constructor,
        name: &Ident,
        operation: &Ident,
    ) -> TokenStream {
        let target = &self.target;
        let vis = &constructor.vis;
        let op_str = operation.to_string();

        let params = constructor.args.iter().map(|arg| {
            let CtorArg { ident, ty } = arg;
            quote! { #ident: #ty }
        });
        let forwarded = constructor.args.iter().map(|arg| &arg.ident);

        quote! {
            #vis fn #name(#(#params),*) -> Result<<#target as opcall_core::Perform>::Output, opcall_core::MissingOperation> {
                opcall_core::Perform::perform(
                    #target::new(#(#forwarded),*),
                    &opcall_core::OpName::from_static(#op_str),
                )
            }
        }
    }
}
