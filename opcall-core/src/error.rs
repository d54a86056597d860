use std::any::type_name;

use thiserror::Error;

use crate::OpName;

/// Error type returned when the designated operation is not defined on the
/// freshly constructed instance.
///
/// The adapter never recovers from this locally; it surfaces the failure to
/// the caller of the entry point, identifying both the missing operation and
/// the type it was invoked on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{type_name}` does not define operation `{operation}`")]
pub struct MissingOperation {
    type_name: &'static str,
    operation: OpName,
}

impl MissingOperation {
    /// Creates a `MissingOperation` for type `T`, keeping only the trailing
    /// segment of its path for readable messages.
    pub fn new<T: ?Sized>(operation: OpName) -> Self {
        let full_type_name = type_name::<T>();
        let type_name = full_type_name.rsplit("::").next().unwrap_or(full_type_name);

        Self {
            type_name,
            operation,
        }
    }

    /// The short name of the type missing the operation.
    #[must_use]
    pub fn type_name(&self) -> &str {
        self.type_name
    }

    /// The operation that was not defined.
    #[must_use]
    pub fn operation(&self) -> &OpName {
        &self.operation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget;

    #[test]
    fn message_names_the_operation_and_type() {
        let err = MissingOperation::new::<Widget>(OpName::from_static("render"));

        assert_eq!(
            err.to_string(),
            "`Widget` does not define operation `render`",
        );
        assert_eq!(err.type_name(), "Widget");
        assert_eq!(*err.operation(), "render");
    }
}
