//! Property definitions and schemas.
//!
//! A schema is the ordered list of properties an element exposes. Each
//! property has a default value and optionally an attribute name, a converter
//! for attribute text, and an effect run on every distinct change.

use crate::effect::{Effect, EffectContext};
use crate::host::Host;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use wisp_core::{Result, Value, ValueKind};

/// Parses attribute text for a custom converter.
pub trait ParseAttribute {
    /// Name used in error messages.
    fn name(&self) -> &str {
        "custom"
    }

    /// Converts attribute text into a property value.
    fn parse(&self, text: &str) -> Result<Value>;

    /// Converts a property value back into attribute text.
    ///
    /// `None` means the attribute should be absent.
    fn stringify(&self, value: &Value) -> Option<String> {
        match value {
            Value::Null => None,
            other => Some(other.to_display_string()),
        }
    }
}

struct FnParser<F> {
    name: String,
    parse: F,
}

impl<F> ParseAttribute for FnParser<F>
where
    F: Fn(&str) -> Result<Value>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn parse(&self, text: &str) -> Result<Value> {
        (self.parse)(text)
    }
}

/// How attribute text becomes a property value.
#[derive(Clone)]
pub enum Converter {
    /// Structured literal, falling back to a plain string
    Json,
    /// Attribute presence: present is `true` whatever its text
    Boolean,
    /// `Number(text)`
    Number,
    /// Text as is
    String,
    /// `BigInt(text)`
    BigInt,
    /// URL resolved against the document origin
    Url,
    /// Calendar date, falling back to a numeric timestamp
    Date,
    /// User supplied parser
    Custom(Rc<dyn ParseAttribute>),
}

impl Converter {
    /// Wraps a custom parser.
    pub fn custom(parser: impl ParseAttribute + 'static) -> Self {
        Converter::Custom(Rc::new(parser))
    }

    /// Wraps a parse function.
    pub fn from_fn<F>(name: &str, parse: F) -> Self
    where
        F: Fn(&str) -> Result<Value> + 'static,
    {
        Converter::custom(FnParser {
            name: name.to_string(),
            parse,
        })
    }

    /// Returns the converter for values of `kind`.
    ///
    /// Kinds without a dedicated converter (null, arrays, objects) use the
    /// structured parse.
    pub fn for_kind(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Boolean => Converter::Boolean,
            ValueKind::Number => Converter::Number,
            ValueKind::String => Converter::String,
            ValueKind::BigInt => Converter::BigInt,
            ValueKind::Url => Converter::Url,
            ValueKind::Date => Converter::Date,
            ValueKind::Null | ValueKind::Json => Converter::Json,
        }
    }

    /// Returns whether this converter reads attribute presence only.
    #[inline]
    pub fn is_flag(&self) -> bool {
        matches!(self, Converter::Boolean)
    }

    /// Converter name for logs and errors.
    pub fn name(&self) -> &str {
        match self {
            Converter::Json => "JSON",
            Converter::Boolean => "Boolean",
            Converter::Number => "Number",
            Converter::String => "String",
            Converter::BigInt => "BigInt",
            Converter::Url => "URL",
            Converter::Date => "Date",
            Converter::Custom(parser) => parser.name(),
        }
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Converter::Custom(parser) => write!(f, "Custom({})", parser.name()),
            other => f.write_str(other.name()),
        }
    }
}

/// One entry of a schema.
pub struct PropertyDefinition<H> {
    default: Value,
    attribute: Option<String>,
    converter: Option<Converter>,
    effect: Option<Rc<dyn Effect<H>>>,
}

impl<H> Clone for PropertyDefinition<H> {
    fn clone(&self) -> Self {
        Self {
            default: self.default.clone(),
            attribute: self.attribute.clone(),
            converter: self.converter.clone(),
            effect: self.effect.clone(),
        }
    }
}

impl<H> fmt::Debug for PropertyDefinition<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDefinition")
            .field("default", &self.default)
            .field("attribute", &self.attribute)
            .field("converter", &self.converter)
            .field("effect", &self.effect.is_some())
            .finish()
    }
}

/// Starts a property definition with the given default.
///
/// ```rust
/// use wisp_element::{prop, Converter, MemoryHost, PropertyDefinition};
///
/// let def: PropertyDefinition<MemoryHost> = prop(false)
///     .attribute("is-open")
///     .converter(Converter::Boolean);
/// assert_eq!(def.attribute_for("open"), "is-open");
/// ```
pub fn prop<H: Host>(default: impl Into<Value>) -> PropertyDefinition<H> {
    PropertyDefinition {
        default: default.into(),
        attribute: None,
        converter: None,
        effect: None,
    }
}

impl<H: Host> PropertyDefinition<H> {
    /// Binds the property to an attribute other than its own name.
    pub fn attribute(mut self, name: impl Into<String>) -> Self {
        self.attribute = Some(name.into());
        self
    }

    /// Sets an explicit converter.
    pub fn converter(mut self, converter: Converter) -> Self {
        self.converter = Some(converter);
        self
    }

    /// Sets the effect run on each distinct change.
    pub fn effect<F>(self, effect: F) -> Self
    where
        F: Fn(&EffectContext<'_, H>, Value) -> Option<Value> + 'static,
    {
        self.effect_with(effect)
    }

    /// Sets an effect strategy object.
    pub fn effect_with(mut self, effect: impl Effect<H> + 'static) -> Self {
        self.effect = Some(Rc::new(effect));
        self
    }

    /// Declared default value.
    #[inline]
    pub fn default_value(&self) -> &Value {
        &self.default
    }

    /// Attribute name for the property called `property`.
    pub fn attribute_for<'a>(&'a self, property: &'a str) -> &'a str {
        self.attribute.as_deref().unwrap_or(property)
    }

    /// Explicitly bound attribute name, if any.
    #[inline]
    pub fn explicit_attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    /// Explicit converter, if any.
    #[inline]
    pub fn explicit_converter(&self) -> Option<&Converter> {
        self.converter.as_ref()
    }

    /// Converter used for this property: the explicit one, else the one for
    /// the default's kind.
    pub fn resolved_converter(&self) -> Converter {
        match &self.converter {
            Some(converter) => converter.clone(),
            None => Converter::for_kind(self.default.kind()),
        }
    }

    pub(crate) fn effect_handle(&self) -> Option<Rc<dyn Effect<H>>> {
        self.effect.clone()
    }
}

/// Ordered set of property definitions.
pub struct Schema<H> {
    properties: Vec<(String, PropertyDefinition<H>)>,
}

impl<H> Clone for Schema<H> {
    fn clone(&self) -> Self {
        Self {
            properties: self.properties.clone(),
        }
    }
}

impl<H: Host> Default for Schema<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Host> Schema<H> {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self {
            properties: Vec::new(),
        }
    }

    /// Adds a property. A second definition for the same name replaces the
    /// first and keeps its position.
    pub fn property(mut self, name: impl Into<String>, definition: PropertyDefinition<H>) -> Self {
        let name = name.into();
        match self.properties.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = definition,
            None => self.properties.push((name, definition)),
        }
        self
    }

    /// Returns the definition for `name`.
    pub fn get(&self, name: &str) -> Option<&PropertyDefinition<H>> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, def)| def)
    }

    /// Property names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|(n, _)| n.as_str())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub(crate) fn into_entries(self) -> Vec<(String, PropertyDefinition<H>)> {
        self.properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryHost;
    use alloc::vec;
    use wisp_core::Error;

    #[test]
    fn test_prop_defaults() {
        let def: PropertyDefinition<MemoryHost> = prop(3);
        assert_eq!(def.default_value(), &Value::Number(3.0));
        assert_eq!(def.explicit_attribute(), None);
        assert_eq!(def.attribute_for("count"), "count");
        assert!(def.explicit_converter().is_none());
    }

    #[test]
    fn test_resolved_converter_follows_default_kind() {
        let def: PropertyDefinition<MemoryHost> = prop("x");
        assert!(matches!(def.resolved_converter(), Converter::String));

        let def: PropertyDefinition<MemoryHost> = prop(true);
        assert!(def.resolved_converter().is_flag());

        let def: PropertyDefinition<MemoryHost> = prop(Value::Null);
        assert!(matches!(def.resolved_converter(), Converter::Json));
    }

    #[test]
    fn test_explicit_converter_wins() {
        let def: PropertyDefinition<MemoryHost> = prop("x").converter(Converter::Number);
        assert!(matches!(def.resolved_converter(), Converter::Number));
    }

    #[test]
    fn test_custom_converter_from_fn() {
        let conv = Converter::from_fn("Upper", |text| Ok(Value::from(text.to_uppercase())));
        assert_eq!(conv.name(), "Upper");
        match conv {
            Converter::Custom(parser) => {
                assert_eq!(parser.parse("abc"), Ok(Value::from("ABC")));
                assert_eq!(parser.stringify(&Value::Null), None);
            }
            _ => panic!("Wrong converter"),
        }
    }

    #[test]
    fn test_custom_converter_error() {
        let conv = Converter::from_fn("Strict", |text| Err(Error::invalid_attribute("x", text)));
        if let Converter::Custom(parser) = conv {
            assert!(parser.parse("bad").is_err());
        }
    }

    #[test]
    fn test_schema_order_and_replace() {
        let schema: Schema<MemoryHost> = Schema::new()
            .property("b", prop(1))
            .property("a", prop(2))
            .property("b", prop(3));

        assert_eq!(schema.len(), 2);
        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(schema.get("b").map(|d| d.default_value().clone()), Some(Value::Number(3.0)));
        assert!(schema.get("c").is_none());
    }

    #[test]
    fn test_converter_debug() {
        assert_eq!(alloc::format!("{:?}", Converter::Url), "URL");
    }
}
