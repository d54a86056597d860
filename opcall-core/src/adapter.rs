use crate::{
    entry_point::EntryPoint,
    name::{InvalidOpName, OpName},
    perform::{Construct, Perform},
    MissingOperation,
};

/// The immutable output of the adapter factory: which operation the
/// generated entry points invoke after construction.
///
/// A spec is created once, never mutated, and then used to produce entry
/// points or standalone callables for any number of target types. Building
/// the same spec twice yields two distinct but equal values; behavior is the
/// only guarantee, not identity.
///
/// # Example
///
/// ```
/// use opcall_core::{AdapterSpec, OpName};
///
/// let conventional = AdapterSpec::new();
/// assert!(conventional.is_conventional());
///
/// let from_text = AdapterSpec::with_operation("format")?;
/// let from_name = AdapterSpec::from_name(OpName::from_static("format"));
/// assert_eq!(from_text, from_name);
/// # Ok::<(), opcall_core::InvalidOpName>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterSpec {
    operation: OpName,
}

impl AdapterSpec {
    /// Creates a spec for the conventional `call` operation.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            operation: OpName::CALL,
        }
    }

    /// Creates a spec from an operation name given as text, normalizing it
    /// at this boundary.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOpName`] if the text does not normalize to an
    /// identifier.
    pub fn with_operation(name: impl AsRef<str>) -> Result<Self, InvalidOpName> {
        Ok(Self {
            operation: OpName::new(name)?,
        })
    }

    /// Creates a spec from an operation name already in identifier form.
    #[must_use]
    pub fn from_name(operation: OpName) -> Self {
        Self { operation }
    }

    /// The operation the generated entry points invoke.
    #[must_use]
    pub fn operation(&self) -> &OpName {
        &self.operation
    }

    /// Whether this spec designates the conventional `call` operation.
    #[must_use]
    pub fn is_conventional(&self) -> bool {
        self.operation.is_conventional()
    }

    /// Produces an entry point for `T` that constructs an instance from
    /// forwarded arguments and invokes this spec's operation on it.
    #[must_use]
    pub fn entry_point<T>(&self) -> EntryPoint<T>
    where
        T: Construct + Perform,
    {
        EntryPoint::of(self.operation.clone())
    }

    /// Produces a standalone callable with the same construct-then-invoke
    /// behavior as the entry point, usable wherever a plain function value
    /// is expected.
    ///
    /// Each call returns a fresh closure; two callables from equal specs are
    /// behaviorally equivalent but not the same value.
    pub fn as_callable<T>(&self) -> impl Fn(T::Args) -> Result<T::Output, MissingOperation>
    where
        T: Construct + Perform,
    {
        self.entry_point::<T>().into_fn()
    }
}

impl Default for AdapterSpec {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_the_conventional_operation() {
        assert_eq!(*AdapterSpec::new().operation(), "call");
        assert_eq!(AdapterSpec::default(), AdapterSpec::new());
    }

    #[test]
    fn repeated_builds_are_equal_but_independent() {
        let first = AdapterSpec::new();
        let second = AdapterSpec::new();
        assert_eq!(first, second);
    }

    #[test]
    fn text_and_symbolic_names_build_equivalent_specs() {
        let from_text = AdapterSpec::with_operation("format").unwrap();
        let from_name = AdapterSpec::from_name(OpName::from_static("format"));

        assert_eq!(from_text, from_name);
        assert!(!from_text.is_conventional());
    }

    #[test]
    fn rejects_invalid_operation_text() {
        assert!(AdapterSpec::with_operation("not an ident").is_err());
    }
}
