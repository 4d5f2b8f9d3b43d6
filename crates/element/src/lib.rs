//! Wisp Element - reactive properties for custom elements.
//!
//! This crate turns a declarative property schema into live element
//! properties:
//!
//! - `codec`: attribute text to typed values and back
//! - `PropertyTable`: one reactive cell per property, seeded from the host's
//!   own value, its attribute or the declared default
//! - `listen`: merged, deduplicated, effect-applied change events
//! - `LifecycleController`: pipelines live only between connect and disconnect
//! - `bind_template`: full-snapshot re-render on every change
//! - `setup`/`Element`: everything above wired together for one host
//!
//! The host element is abstracted by the `Host` trait. `MemoryHost` runs
//! anywhere; `WebHost` and the JavaScript API need the `web` feature.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use wisp_element::{prop, reflect_attribute, setup, Converter, Host, MemoryHost, MemoryRoot, Schema, Value};
//!
//! let host = Rc::new(MemoryHost::new().with_attribute("is-open", ""));
//! let schema = Schema::new()
//!     .property("open", prop(false).attribute("is-open").converter(Converter::Boolean))
//!     .property("size", prop(1).effect_with(reflect_attribute()));
//!
//! let element = setup(host.clone(), schema, |html: String, target: MemoryRoot| {
//!     target.set_content(html)
//! })
//! .unwrap();
//! assert_eq!(element.get("open"), Some(Value::Boolean(true)));
//!
//! element.connect();
//! element.set("size", 3).unwrap();
//! assert_eq!(host.get_attribute("size").as_deref(), Some("3"));
//!
//! element.attribute_changed("is-open", Some(""), None).unwrap();
//! assert_eq!(element.get("open"), Some(Value::Boolean(false)));
//! ```

extern crate alloc;

pub mod codec;
pub mod definition;
pub mod effect;
pub mod element;
pub mod host;
pub mod lifecycle;
pub mod listener;
mod log;
pub mod memory;
pub mod table;
pub mod template;

#[cfg(feature = "web")]
pub mod bindings;
#[cfg(feature = "web")]
pub mod web;

pub use codec::{decode, decode_with, encode};
pub use definition::{prop, Converter, ParseAttribute, PropertyDefinition, Schema};
pub use effect::{reflect_attribute, Effect, EffectContext, ReflectAttribute};
pub use element::{setup, Element};
pub use host::{Host, PropertyAccessor};
pub use lifecycle::LifecycleController;
pub use listener::{listen, ChangeEvent};
pub use memory::{MemoryHost, MemoryRoot};
pub use table::{PropertyEntry, PropertyTable, SeedSource};
pub use template::{bind_template, render_pipeline, Renderer, Snapshot};

#[cfg(feature = "web")]
pub use bindings::JsElement;
#[cfg(feature = "web")]
pub use web::{js_to_value, value_to_js, JsConverter, WebHost};

pub use wisp_core::{Error, Result, Value, ValueKind};
pub use wisp_reactive::{ReactiveCell, Stream, Subject, Subscription};
