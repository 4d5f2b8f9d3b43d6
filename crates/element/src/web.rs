//! Browser host and JavaScript value conversion.
//!
//! `WebHost` adapts a live `HtmlElement`: accessors become real JavaScript
//! properties installed with `Object.defineProperty`, and rendering targets
//! the element's shadow root when it has one.

use crate::definition::ParseAttribute;
use crate::host::{Host, PropertyAccessor};
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;
use js_sys::{Function, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, Node};
use wisp_core::number::parse_bigint;
use wisp_core::{Error, JsonValue, Result, Value};

/// Converts a JavaScript value to a property value.
///
/// - `null`/`undefined`: Null
/// - boolean, number, string: the matching scalar
/// - BigInt: BigInt (Null if it does not fit in 128 bits)
/// - `Date` object: Date (milliseconds)
/// - `URL` object: Url (its href)
/// - anything else: Json, through its JSON-compatible form
pub fn js_to_value(js: &JsValue) -> Value {
    if js.is_null() || js.is_undefined() {
        return Value::Null;
    }
    if let Some(b) = js.as_bool() {
        return Value::Boolean(b);
    }
    if let Some(n) = js.as_f64() {
        return Value::Number(n);
    }
    if let Some(s) = js.as_string() {
        return Value::String(s);
    }
    if js.is_bigint() {
        let text: Option<String> = js_sys::BigInt::from(js.clone())
            .to_string(10)
            .ok()
            .map(String::from);
        return text
            .and_then(|t| parse_bigint(&t))
            .map(Value::BigInt)
            .unwrap_or(Value::Null);
    }
    if let Some(date) = js.dyn_ref::<js_sys::Date>() {
        return Value::Date(date.get_time());
    }
    if let Some(url) = js.dyn_ref::<web_sys::Url>() {
        return Value::Url(url.href());
    }
    serde_wasm_bindgen::from_value::<JsonValue>(js.clone())
        .map(Value::from_json)
        .unwrap_or(Value::Null)
}

/// Converts a property value to a JavaScript value.
pub fn value_to_js(value: &Value) -> JsValue {
    match value {
        Value::Null => JsValue::NULL,
        Value::Boolean(b) => JsValue::from_bool(*b),
        Value::Number(n) => JsValue::from_f64(*n),
        Value::BigInt(n) => js_sys::BigInt::new(&JsValue::from_str(&n.to_string()))
            .map(JsValue::from)
            .unwrap_or(JsValue::NULL),
        Value::String(s) => JsValue::from_str(s),
        Value::Url(href) => web_sys::Url::new(href)
            .map(JsValue::from)
            .unwrap_or_else(|_| JsValue::from_str(href)),
        Value::Date(ms) => js_sys::Date::new(&JsValue::from_f64(*ms)).into(),
        Value::Json(json) => json
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .unwrap_or(JsValue::NULL),
    }
}

type Getter = Closure<dyn Fn() -> JsValue>;
type Setter = Closure<dyn Fn(JsValue)>;

/// A host backed by a DOM element.
pub struct WebHost {
    element: HtmlElement,
    // keeps the installed getter/setter closures alive
    accessors: RefCell<Vec<(Getter, Setter)>>,
}

impl WebHost {
    pub fn new(element: HtmlElement) -> Self {
        Self {
            element,
            accessors: RefCell::new(Vec::new()),
        }
    }

    #[inline]
    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    fn object(&self) -> &Object {
        self.element.unchecked_ref()
    }
}

impl Host for WebHost {
    type Target = Node;

    fn get_attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.element.set_attribute(name, value).ok();
    }

    fn remove_attribute(&self, name: &str) {
        self.element.remove_attribute(name).ok();
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.element.has_attribute(name)
    }

    fn own_property(&self, name: &str) -> Option<Value> {
        let key = JsValue::from_str(name);
        if !self.object().has_own_property(&key) {
            return None;
        }
        Reflect::get(self.object(), &key)
            .ok()
            .filter(|v| !v.is_undefined())
            .map(|v| js_to_value(&v))
    }

    fn install_accessor(&self, accessor: PropertyAccessor) {
        let key = JsValue::from_str(accessor.name());

        let reader = accessor.clone();
        let getter: Getter = Closure::new(move || value_to_js(&reader.get()));
        let setter: Setter = Closure::new(move |js: JsValue| accessor.set(js_to_value(&js)));

        let descriptor = Object::new();
        Reflect::set(&descriptor, &"get".into(), getter.as_ref()).ok();
        Reflect::set(&descriptor, &"set".into(), setter.as_ref()).ok();
        Reflect::set(&descriptor, &"enumerable".into(), &JsValue::TRUE).ok();
        Reflect::set(&descriptor, &"configurable".into(), &JsValue::TRUE).ok();
        Object::define_property(self.object(), &key, &descriptor);

        self.accessors.borrow_mut().push((getter, setter));
    }

    fn origin(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_else(|| "null".into())
    }

    fn render_target(&self) -> Node {
        match self.element.shadow_root() {
            Some(root) => root.into(),
            None => self.element.clone().into(),
        }
    }
}

/// A converter object supplied from JavaScript.
///
/// The object must have a `parse(text)` method; it may have a
/// `stringify(value)` method used when reflecting to an attribute, and a
/// `name` used in errors.
pub struct JsConverter {
    object: JsValue,
    name: String,
}

impl JsConverter {
    pub fn new(object: JsValue) -> Self {
        let name = Reflect::get(&object, &"name".into())
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_else(|| "custom".into());
        Self { object, name }
    }

    fn method(&self, name: &str) -> Option<Function> {
        Reflect::get(&self.object, &JsValue::from_str(name))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
    }
}

impl ParseAttribute for JsConverter {
    fn name(&self) -> &str {
        &self.name
    }

    fn parse(&self, text: &str) -> Result<Value> {
        let parse = self
            .method("parse")
            .ok_or_else(|| Error::missing_parse(self.name.clone()))?;
        parse
            .call1(&self.object, &JsValue::from_str(text))
            .map(|v| js_to_value(&v))
            .map_err(|e| Error::invalid_operation(format!("{}.parse failed: {:?}", self.name, e)))
    }

    fn stringify(&self, value: &Value) -> Option<String> {
        if value.is_null() {
            return None;
        }
        match self.method("stringify") {
            Some(f) => f
                .call1(&self.object, &value_to_js(value))
                .ok()
                .and_then(|v| v.as_string()),
            None => Some(value.to_display_string()),
        }
    }
}
