//! Property effects.

use crate::codec::encode;
use crate::definition::Converter;
use crate::host::Host;
use wisp_core::Value;

/// What an effect sees about the property that changed.
pub struct EffectContext<'a, H> {
    /// The element owning the property
    pub host: &'a H,
    /// Property name
    pub name: &'a str,
    /// Attribute bound to the property
    pub attribute: &'a str,
    /// Converter resolved for the property
    pub converter: &'a Converter,
}

/// Side effect and transformation applied to each distinct property change.
///
/// Returning `None` swallows the change: no change event is emitted for it.
pub trait Effect<H> {
    fn apply(&self, cx: &EffectContext<'_, H>, value: Value) -> Option<Value>;
}

impl<H, F> Effect<H> for F
where
    F: Fn(&EffectContext<'_, H>, Value) -> Option<Value>,
{
    fn apply(&self, cx: &EffectContext<'_, H>, value: Value) -> Option<Value> {
        self(cx, value)
    }
}

/// Effect that writes each change back to the bound attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReflectAttribute;

/// Returns the attribute-reflecting effect.
///
/// Values encoding to no text (null, a cleared flag) remove the attribute.
/// The attribute is only touched when its text actually differs.
pub fn reflect_attribute() -> ReflectAttribute {
    ReflectAttribute
}

impl<H: Host> Effect<H> for ReflectAttribute {
    fn apply(&self, cx: &EffectContext<'_, H>, value: Value) -> Option<Value> {
        match encode(&value, cx.converter) {
            Some(text) => {
                if cx.host.get_attribute(cx.attribute).as_deref() != Some(text.as_str()) {
                    cx.host.set_attribute(cx.attribute, &text);
                }
            }
            None => {
                if cx.host.has_attribute(cx.attribute) {
                    cx.host.remove_attribute(cx.attribute);
                }
            }
        }
        Some(value)
    }
}
