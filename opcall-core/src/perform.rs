use crate::{MissingOperation, OpName};

/// A type that can be built from a single bundle of constructor arguments.
///
/// `Args` mirrors the constructor's parameter list: `()` when it takes no
/// arguments, the bare type when it takes one, and a tuple when it takes
/// several. The [`adapt`] attribute macro implements this trait from the
/// `fn new` it finds in the annotated impl block, but it can also be written
/// by hand for types the macro does not cover.
///
/// [`adapt`]: macro@crate::adapt
pub trait Construct: Sized {
    type Args;

    /// Builds a fresh instance from the forwarded arguments.
    fn construct(args: Self::Args) -> Self;
}

/// A type whose designated operation can be invoked by name, consuming the
/// instance.
///
/// Implementations recognize the operation designated when the type was
/// adapted and reject every other name, so a missing operation surfaces as
/// an error at call time instead of silently doing nothing.
///
/// # Example
///
/// ```
/// use opcall_core::{Construct, MissingOperation, OpName, Perform};
///
/// struct Shout {
///     text: String,
/// }
///
/// impl Construct for Shout {
///     type Args = String;
///
///     fn construct(text: String) -> Self {
///         Self { text }
///     }
/// }
///
/// impl Perform for Shout {
///     type Output = String;
///
///     fn perform(self, operation: &OpName) -> Result<String, MissingOperation> {
///         if operation.as_str() == "call" {
///             Ok(self.text.to_uppercase())
///         } else {
///             Err(MissingOperation::new::<Self>(operation.clone()))
///         }
///     }
/// }
///
/// let shout = Shout::construct("quiet".into());
/// assert_eq!(shout.perform(&OpName::CALL).unwrap(), "QUIET");
/// ```
pub trait Perform: Sized {
    type Output;

    /// Invokes the named operation with no arguments and returns its result.
    ///
    /// # Errors
    ///
    /// Returns [`MissingOperation`] if the instance does not define an
    /// operation with the given name.
    fn perform(self, operation: &OpName) -> Result<Self::Output, MissingOperation>;
}
