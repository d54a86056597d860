use std::{fmt, marker::PhantomData};

use crate::{
    name::OpName,
    perform::{Construct, Perform},
    MissingOperation,
};

/// A generated callable bound to a target type and an operation name.
///
/// Every invocation performs exactly one construction and one operation
/// invocation on the fresh instance; no instance is ever reused between
/// calls, so entry points share no mutable state and are freely usable from
/// multiple threads.
///
/// # Example
///
/// ```
/// use opcall_core::{Construct, EntryPoint, MissingOperation, OpName, Perform};
///
/// struct Doubler {
///     number: i32,
/// }
///
/// impl Construct for Doubler {
///     type Args = i32;
///
///     fn construct(number: i32) -> Self {
///         Self { number }
///     }
/// }
///
/// impl Perform for Doubler {
///     type Output = i32;
///
///     fn perform(self, operation: &OpName) -> Result<i32, MissingOperation> {
///         if operation.as_str() == "call" {
///             Ok(self.number * 2)
///         } else {
///             Err(MissingOperation::new::<Self>(operation.clone()))
///         }
///     }
/// }
///
/// let entry = EntryPoint::<Doubler>::conventional();
/// assert_eq!(entry.call(5).unwrap(), 10);
/// ```
pub struct EntryPoint<T> {
    operation: OpName,
    target: PhantomData<fn(T) -> T>,
}

impl<T> EntryPoint<T>
where
    T: Construct + Perform,
{
    /// Creates an entry point that invokes the given operation.
    #[must_use]
    pub fn of(operation: OpName) -> Self {
        Self {
            operation,
            target: PhantomData,
        }
    }

    /// Creates an entry point for the conventional `call` operation.
    #[must_use]
    pub fn conventional() -> Self {
        Self::of(OpName::CALL)
    }

    /// The operation this entry point invokes after construction.
    #[must_use]
    pub fn operation(&self) -> &OpName {
        &self.operation
    }

    /// Constructs a fresh instance of `T` from the forwarded arguments,
    /// invokes the operation on it with no arguments, and returns the
    /// result verbatim. The instance is discarded afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`MissingOperation`] if `T` does not define the operation.
    pub fn call(&self, args: T::Args) -> Result<T::Output, MissingOperation> {
        T::construct(args).perform(&self.operation)
    }

    /// Converts the entry point into a plain closure with identical
    /// behavior, usable as a first-class function value (for example as the
    /// transform argument of an iterator `map`).
    pub fn into_fn(self) -> impl Fn(T::Args) -> Result<T::Output, MissingOperation> {
        move |args| T::construct(args).perform(&self.operation)
    }
}

impl<T> Clone for EntryPoint<T> {
    fn clone(&self) -> Self {
        Self {
            operation: self.operation.clone(),
            target: PhantomData,
        }
    }
}

impl<T> fmt::Debug for EntryPoint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryPoint")
            .field("operation", &self.operation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        count: i64,
        step: i64,
    }

    impl Construct for Counter {
        type Args = (i64, i64);

        fn construct((start, step): (i64, i64)) -> Self {
            Self { count: start, step }
        }
    }

    impl Perform for Counter {
        type Output = i64;

        fn perform(mut self, operation: &OpName) -> Result<i64, MissingOperation> {
            if operation.as_str() == "increment" {
                self.count += self.step;
                Ok(self.count)
            } else {
                Err(MissingOperation::new::<Self>(operation.clone()))
            }
        }
    }

    #[test]
    fn constructs_a_fresh_instance_per_invocation() {
        let entry = EntryPoint::<Counter>::of(OpName::from_static("increment"));

        // State never carries over between calls.
        assert_eq!(entry.call((0, 1)).unwrap(), 1);
        assert_eq!(entry.call((0, 1)).unwrap(), 1);
        assert_eq!(entry.call((10, 5)).unwrap(), 15);
    }

    #[test]
    fn unknown_operation_surfaces_missing_operation() {
        let entry = EntryPoint::<Counter>::conventional();

        let err = entry.call((0, 1)).unwrap_err();
        assert_eq!(*err.operation(), "call");
        assert_eq!(err.type_name(), "Counter");
    }

    #[test]
    fn into_fn_behaves_like_the_entry_point() {
        let increment = EntryPoint::<Counter>::of(OpName::from_static("increment")).into_fn();

        let results: Vec<_> = [(0, 1), (10, 5), (100, 2)]
            .into_iter()
            .map(|args| increment(args).unwrap())
            .collect();

        assert_eq!(results, [1, 15, 102]);
    }

    #[test]
    fn cloned_entry_points_are_equivalent() {
        let entry = EntryPoint::<Counter>::of(OpName::from_static("increment"));
        let cloned = entry.clone();

        assert_eq!(entry.operation(), cloned.operation());
        assert_eq!(entry.call((3, 4)).unwrap(), cloned.call((3, 4)).unwrap());
    }
}
