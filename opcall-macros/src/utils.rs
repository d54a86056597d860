use quote::format_ident;
use syn::Ident;

/// Extension trait for `Ident` to simplify common naming transformations.
pub(crate) trait IdentExt {
    /// Returns a new identifier with the given suffix.
    fn with_suffix(&self, suffix: &str) -> Ident;
}

impl IdentExt for Ident {
    fn with_suffix(&self, suffix: &str) -> Ident {
        format_ident!("{}{}", self.to_string(), suffix)
    }
}
