//! JavaScript API.
//!
//! ```javascript
//! import { WispElement } from 'wisp-element';
//!
//! class Counter extends HTMLElement {
//!   static observedAttributes = ['count', 'is-open'];
//!
//!   constructor() {
//!     super();
//!     this.attachShadow({ mode: 'open' });
//!     this.wisp = new WispElement(this, {
//!       count: { default: 0, reflect: true },
//!       open: { default: false, attribute: 'is-open' },
//!     }, (html, target) => { target.innerHTML = html; });
//!     this.wisp.bindTemplate(({ count }) => `<b>${count}</b>`);
//!   }
//!
//!   connectedCallback() { this.wisp.connect(); }
//!   disconnectedCallback() { this.wisp.disconnect(); }
//!   attributeChangedCallback(name, oldValue, newValue) {
//!     this.wisp.attributeChanged(name, oldValue, newValue);
//!   }
//! }
//! ```

use crate::definition::{prop, Converter, PropertyDefinition, Schema};
use crate::effect::reflect_attribute;
use crate::element::{setup, Element};
use crate::template::Snapshot;
use crate::web::{js_to_value, value_to_js, JsConverter, WebHost};
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use js_sys::{Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, Node};
use wisp_core::Error;

fn to_js_error(err: Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn builtin_converter(name: &str) -> Option<Converter> {
    let converter = match name {
        "JSON" | "Json" | "Object" | "Array" => Converter::Json,
        "Boolean" => Converter::Boolean,
        "Number" => Converter::Number,
        "String" => Converter::String,
        "BigInt" => Converter::BigInt,
        "URL" | "Url" => Converter::Url,
        "Date" => Converter::Date,
        _ => return None,
    };
    Some(converter)
}

/// Reads a converter option: a built-in converter's name, a built-in
/// constructor such as `Number`, or an object with a `parse` method.
fn converter_from_js(js: &JsValue) -> Converter {
    if let Some(name) = js.as_string() {
        if let Some(converter) = builtin_converter(&name) {
            return converter;
        }
    }
    if let Some(f) = js.dyn_ref::<Function>() {
        if let Some(converter) = builtin_converter(&String::from(f.name())) {
            return converter;
        }
    }
    Converter::custom(JsConverter::new(js.clone()))
}

fn definition_from_js(options: &JsValue) -> PropertyDefinition<WebHost> {
    if !options.is_object() {
        return prop(js_to_value(options));
    }
    let field = |name: &str| {
        Reflect::get(options, &JsValue::from_str(name))
            .ok()
            .filter(|v| !v.is_undefined())
    };

    let mut definition = prop(field("default").map(|v| js_to_value(&v)).unwrap_or_default());
    if let Some(attribute) = field("attribute").and_then(|v| v.as_string()) {
        definition = definition.attribute(attribute);
    }
    if let Some(converter) = field("converter") {
        definition = definition.converter(converter_from_js(&converter));
    }
    if field("reflect").and_then(|v| v.as_bool()).unwrap_or(false) {
        definition = definition.effect_with(reflect_attribute());
    }
    definition
}

/// Builds a schema from `{ name: options }`, where options is either a
/// default value or `{ default, attribute, converter, reflect }`.
pub fn schema_from_js(js: &JsValue) -> Result<Schema<WebHost>, JsValue> {
    let object = js
        .dyn_ref::<Object>()
        .ok_or_else(|| JsValue::from_str("Schema must be an object"))?;

    let mut schema = Schema::new();
    for key in Object::keys(object).iter() {
        let name = key
            .as_string()
            .ok_or_else(|| JsValue::from_str("Property names must be strings"))?;
        let options = Reflect::get(object, &key)?;
        schema = schema.property(name, definition_from_js(&options));
    }
    Ok(schema)
}

fn snapshot_to_js(snapshot: &Snapshot) -> JsValue {
    let obj = Object::new();
    for (name, value) in snapshot.iter() {
        Reflect::set(&obj, &JsValue::from_str(name), &value_to_js(value)).ok();
    }
    obj.into()
}

/// Reactive properties for a custom element.
#[wasm_bindgen(js_name = WispElement)]
pub struct JsElement {
    inner: Element<WebHost, JsValue>,
}

#[wasm_bindgen(js_class = WispElement)]
impl JsElement {
    /// Installs `schema` on `element`. `renderer(result, target)` receives
    /// each template result and the shadow root (or the element itself).
    #[wasm_bindgen(constructor)]
    pub fn new(element: HtmlElement, schema: JsValue, renderer: Function) -> Result<JsElement, JsValue> {
        let schema = schema_from_js(&schema)?;
        let inner = setup(
            Rc::new(WebHost::new(element)),
            schema,
            move |result: JsValue, target: Node| {
                renderer.call2(&JsValue::NULL, &result, &target).ok();
            },
        )
        .map_err(to_js_error)?;
        Ok(JsElement { inner })
    }

    /// Renders `template(snapshot)` on every change while connected.
    #[wasm_bindgen(js_name = bindTemplate)]
    pub fn bind_template(&self, template: Function) {
        self.inner.bind_template(move |snapshot| {
            template
                .call1(&JsValue::NULL, &snapshot_to_js(snapshot))
                .unwrap_or(JsValue::UNDEFINED)
        });
    }

    /// Calls `callback(name, value)` for each change event while connected.
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&self, callback: Function) {
        self.inner.register(self.inner.changes().inspect(move |event| {
            callback
                .call2(&JsValue::NULL, &JsValue::from_str(&event.name), &value_to_js(&event.value))
                .ok();
        }));
    }

    #[wasm_bindgen(js_name = onConnect)]
    pub fn on_connect(&self, callback: Function) {
        self.inner.connected().subscribe(move |()| {
            callback.call0(&JsValue::NULL).ok();
        });
    }

    #[wasm_bindgen(js_name = onDisconnect)]
    pub fn on_disconnect(&self, callback: Function) {
        self.inner.disconnected().subscribe(move |()| {
            callback.call0(&JsValue::NULL).ok();
        });
    }

    pub fn connect(&self) {
        self.inner.connect();
    }

    pub fn disconnect(&self) {
        self.inner.disconnect();
    }

    #[wasm_bindgen(getter, js_name = isConnected)]
    pub fn is_connected(&self) -> bool {
        self.inner.is_connected()
    }

    /// Forces a re-render.
    pub fn update(&self) {
        self.inner.update();
    }

    #[wasm_bindgen(js_name = attributeChanged)]
    pub fn attribute_changed(
        &self,
        name: &str,
        old_value: Option<String>,
        new_value: Option<String>,
    ) -> Result<bool, JsValue> {
        self.inner
            .attribute_changed(name, old_value.as_deref(), new_value.as_deref())
            .map_err(to_js_error)
    }

    pub fn get(&self, name: &str) -> JsValue {
        self.inner
            .get(name)
            .map(|v| value_to_js(&v))
            .unwrap_or(JsValue::UNDEFINED)
    }

    pub fn set(&self, name: &str, value: JsValue) -> Result<(), JsValue> {
        self.inner.set(name, js_to_value(&value)).map_err(to_js_error)
    }

    /// Returns every property's current value.
    pub fn snapshot(&self) -> JsValue {
        snapshot_to_js(&self.inner.snapshot())
    }

    #[wasm_bindgen(getter)]
    pub fn host(&self) -> HtmlElement {
        self.inner.host().element().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_builtin_converter_names() {
        assert!(matches!(converter_from_js(&JsValue::from_str("Boolean")), Converter::Boolean));
        assert!(matches!(converter_from_js(&JsValue::from_str("URL")), Converter::Url));
    }

    #[wasm_bindgen_test]
    fn test_schema_from_js() {
        let options = Object::new();
        Reflect::set(&options, &"default".into(), &JsValue::from_f64(3.0)).unwrap();
        Reflect::set(&options, &"attribute".into(), &"data-count".into()).unwrap();

        let js = Object::new();
        Reflect::set(&js, &"count".into(), &options).unwrap();
        Reflect::set(&js, &"label".into(), &"hi".into()).unwrap();

        let schema = schema_from_js(&js.into()).unwrap();
        assert_eq!(schema.names().collect::<alloc::vec::Vec<_>>(), ["count", "label"]);
        let count = schema.get("count").unwrap();
        assert_eq!(count.default_value(), &wisp_core::Value::Number(3.0));
        assert_eq!(count.explicit_attribute(), Some("data-count"));
    }

    #[wasm_bindgen_test]
    fn test_schema_must_be_object() {
        assert!(schema_from_js(&JsValue::from_f64(1.0)).is_err());
    }
}
