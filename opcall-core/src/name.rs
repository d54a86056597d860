use std::{borrow::Cow, fmt, str::FromStr};

use thiserror::Error;

/// The canonical identifier form of an operation name.
///
/// Operation names arrive either as text (`"format"`) or already in
/// identifier form, and are normalized once at this boundary: surrounding
/// whitespace is trimmed and the result must be a valid identifier
/// (`[A-Za-z_][A-Za-z0-9_]*`). Two names built from equivalent input always
/// compare equal, regardless of which constructor produced them.
///
/// # Example
///
/// ```
/// use opcall_core::OpName;
///
/// let from_text = OpName::new(" format ")?;
/// let from_static = OpName::from_static("format");
///
/// assert_eq!(from_text, from_static);
/// assert_eq!(from_text.as_str(), "format");
/// # Ok::<(), opcall_core::InvalidOpName>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OpName(Cow<'static, str>);

/// Error type returned when text does not normalize to an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` is not a valid operation name")]
pub struct InvalidOpName(String);

impl OpName {
    /// The conventional operation name, meaning "the primary action".
    pub const CALL: Self = Self(Cow::Borrowed("call"));

    /// Normalizes text into an operation name.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOpName`] if the trimmed input is not a valid
    /// identifier.
    pub fn new(name: impl AsRef<str>) -> Result<Self, InvalidOpName> {
        let trimmed = name.as_ref().trim();
        if is_identifier(trimmed) {
            Ok(Self(Cow::Owned(trimmed.to_owned())))
        } else {
            Err(InvalidOpName(name.as_ref().to_owned()))
        }
    }

    /// Builds an operation name from a static string known to be a valid
    /// identifier, such as a name a macro has already parsed.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a valid identifier. In const context the
    /// panic surfaces at compile time.
    #[must_use]
    pub const fn from_static(name: &'static str) -> Self {
        assert!(is_identifier(name), "operation name must be an identifier");
        Self(Cow::Borrowed(name))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the conventional `call` name.
    #[must_use]
    pub fn is_conventional(&self) -> bool {
        *self == Self::CALL
    }
}

const fn is_identifier(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    if !(bytes[0].is_ascii_alphabetic() || bytes[0] == b'_') {
        return false;
    }
    let mut i = 1;
    while i < bytes.len() {
        if !(bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
            return false;
        }
        i += 1;
    }
    true
}

impl FromStr for OpName {
    type Err = InvalidOpName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for OpName {
    type Error = InvalidOpName;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl TryFrom<String> for OpName {
    type Error = InvalidOpName;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl AsRef<str> for OpName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for OpName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for OpName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for OpName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_surrounding_whitespace() {
        let name = OpName::new("  format\n").unwrap();
        assert_eq!(name.as_str(), "format");
    }

    #[test]
    fn text_and_static_names_are_equivalent() {
        assert_eq!(OpName::new("print").unwrap(), OpName::from_static("print"));
    }

    #[test]
    fn rejects_non_identifiers() {
        assert!(OpName::new("").is_err());
        assert!(OpName::new("   ").is_err());
        assert!(OpName::new("1st").is_err());
        assert!(OpName::new("two words").is_err());
        assert!(OpName::new("with-dash").is_err());
    }

    #[test]
    fn accepts_underscores_and_digits() {
        assert!(OpName::new("_private").is_ok());
        assert!(OpName::new("step_2").is_ok());
    }

    #[test]
    fn conventional_name_is_call() {
        assert_eq!(OpName::CALL, "call");
        assert!(OpName::CALL.is_conventional());
        assert!(!OpName::from_static("print").is_conventional());
    }

    #[test]
    fn invalid_name_error_mentions_the_input() {
        let err = OpName::new("two words").unwrap_err();
        assert_eq!(err.to_string(), "`two words` is not a valid operation name");
    }
}
