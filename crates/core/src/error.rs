//! Error types for wisp elements.

use alloc::string::String;
use core::fmt;

/// Result type alias for wisp operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for property and attribute operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Attribute text that cannot be converted to the property's type.
    InvalidAttribute {
        attribute: String,
        message: String,
    },
    /// Property name outside the element's schema.
    UnknownProperty {
        name: String,
    },
    /// Custom converter without a `parse` capability.
    MissingParse {
        converter: String,
    },
    /// Invalid operation.
    InvalidOperation {
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidAttribute { attribute, message } => {
                write!(f, "Invalid value for attribute {}: {}", attribute, message)
            }
            Error::UnknownProperty { name } => {
                write!(f, "Unknown property: {}", name)
            }
            Error::MissingParse { converter } => {
                write!(f, "Converter {} does not provide a parse function", converter)
            }
            Error::InvalidOperation { message } => {
                write!(f, "Invalid operation: {}", message)
            }
        }
    }
}

impl Error {
    /// Creates an invalid attribute error.
    pub fn invalid_attribute(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidAttribute {
            attribute: attribute.into(),
            message: message.into(),
        }
    }

    /// Creates an unknown property error.
    pub fn unknown_property(name: impl Into<String>) -> Self {
        Error::UnknownProperty { name: name.into() }
    }

    /// Creates a missing parse error.
    pub fn missing_parse(converter: impl Into<String>) -> Self {
        Error::MissingParse {
            converter: converter.into(),
        }
    }

    /// Creates an invalid operation error.
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Error::InvalidOperation {
            message: message.into(),
        }
    }
}
