//! Value kind definitions for wisp properties.
//!
//! A `ValueKind` is the runtime type of a property value. The attribute codec
//! falls back to the kind of a property's default when no converter is given.

/// Runtime kind of a property value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// No value
    Null,
    /// Boolean flag
    Boolean,
    /// Double precision number
    Number,
    /// Big integer
    BigInt,
    /// UTF-8 string
    String,
    /// Absolute URL
    Url,
    /// Date (milliseconds since the Unix epoch)
    Date,
    /// Structured data (arrays and objects)
    Json,
}

impl ValueKind {
    /// Returns the name JavaScript would report for a constructor of this kind.
    pub fn constructor_name(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "Boolean",
            ValueKind::Number => "Number",
            ValueKind::BigInt => "BigInt",
            ValueKind::String => "String",
            ValueKind::Url => "URL",
            ValueKind::Date => "Date",
            ValueKind::Json => "Object",
        }
    }

    /// Returns whether values of this kind are primitives on the JavaScript side.
    pub fn is_primitive(&self) -> bool {
        !matches!(self, ValueKind::Url | ValueKind::Date | ValueKind::Json)
    }
}
