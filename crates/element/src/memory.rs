//! In-memory host element.
//!
//! `MemoryHost` keeps attributes, own properties and rendered content in plain
//! maps. It backs the unit tests and benchmarks, and any use of the property
//! machinery outside a browser.

use crate::host::{Host, PropertyAccessor};
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use hashbrown::HashMap;
use wisp_core::{Error, Result, Value};

/// Default document origin of a memory host.
pub const DEFAULT_ORIGIN: &str = "https://localhost";

/// Render target of a `MemoryHost`: the light DOM or an attached shadow root.
#[derive(Clone, Debug)]
pub struct MemoryRoot {
    shadow: bool,
    content: Rc<RefCell<Option<String>>>,
}

impl MemoryRoot {
    fn new(shadow: bool) -> Self {
        Self {
            shadow,
            content: Rc::new(RefCell::new(None)),
        }
    }

    /// Returns whether this is a shadow root.
    #[inline]
    pub fn is_shadow(&self) -> bool {
        self.shadow
    }

    /// Replaces the rendered content.
    pub fn set_content(&self, content: impl Into<String>) {
        *self.content.borrow_mut() = Some(content.into());
    }

    /// Last rendered content, if anything was rendered.
    pub fn content(&self) -> Option<String> {
        self.content.borrow().clone()
    }
}

/// A host element living entirely in memory.
#[derive(Debug)]
pub struct MemoryHost {
    attributes: RefCell<HashMap<String, String>>,
    own_properties: RefCell<HashMap<String, Value>>,
    accessors: RefCell<Vec<PropertyAccessor>>,
    origin: String,
    light: MemoryRoot,
    shadow: Option<MemoryRoot>,
    attribute_writes: Cell<usize>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    /// Creates a host with no attributes, no shadow root and the default origin.
    pub fn new() -> Self {
        Self {
            attributes: RefCell::new(HashMap::new()),
            own_properties: RefCell::new(HashMap::new()),
            accessors: RefCell::new(Vec::new()),
            origin: DEFAULT_ORIGIN.to_string(),
            light: MemoryRoot::new(false),
            shadow: None,
            attribute_writes: Cell::new(0),
        }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Presets an attribute, as if written in markup.
    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        self
    }

    /// Presets an own property, as if assigned before the element upgraded.
    pub fn with_property(self, name: &str, value: impl Into<Value>) -> Self {
        self.own_properties
            .borrow_mut()
            .insert(name.to_string(), value.into());
        self
    }

    /// Attaches a shadow root; rendering targets it from then on.
    pub fn with_shadow_root(mut self) -> Self {
        self.shadow = Some(MemoryRoot::new(true));
        self
    }

    /// Reads a property, through its accessor if one is installed.
    pub fn property(&self, name: &str) -> Option<Value> {
        if let Some(accessor) = self.accessor(name) {
            return Some(accessor.get());
        }
        self.own_properties.borrow().get(name).cloned()
    }

    /// Writes a property, through its accessor if one is installed.
    pub fn set_property(&self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        match self.accessor(name) {
            Some(accessor) => accessor.set(value),
            None => {
                self.own_properties
                    .borrow_mut()
                    .insert(name.to_string(), value);
            }
        }
    }

    /// Writes a property that must have an accessor.
    pub fn try_set_property(&self, name: &str, value: impl Into<Value>) -> Result<()> {
        let accessor = self
            .accessor(name)
            .ok_or_else(|| Error::unknown_property(name))?;
        accessor.set(value.into());
        Ok(())
    }

    /// Names of the installed accessors in installation order.
    pub fn accessor_names(&self) -> Vec<String> {
        self.accessors
            .borrow()
            .iter()
            .map(|a| a.name().to_string())
            .collect()
    }

    /// Number of `set_attribute`/`remove_attribute` calls that changed something.
    #[inline]
    pub fn attribute_writes(&self) -> usize {
        self.attribute_writes.get()
    }

    /// Content rendered into the current render target.
    pub fn rendered(&self) -> Option<String> {
        self.render_target().content()
    }

    fn accessor(&self, name: &str) -> Option<PropertyAccessor> {
        self.accessors
            .borrow()
            .iter()
            .find(|a| a.name() == name)
            .cloned()
    }

    fn bump_writes(&self) {
        self.attribute_writes.set(self.attribute_writes.get() + 1);
    }
}

impl Host for MemoryHost {
    type Target = MemoryRoot;

    fn get_attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        self.bump_writes();
    }

    fn remove_attribute(&self, name: &str) {
        let removed = self.attributes.borrow_mut().remove(name).is_some();
        if removed {
            self.bump_writes();
        }
    }

    fn own_property(&self, name: &str) -> Option<Value> {
        self.own_properties.borrow().get(name).cloned()
    }

    fn install_accessor(&self, accessor: PropertyAccessor) {
        self.own_properties.borrow_mut().remove(accessor.name());
        let mut accessors = self.accessors.borrow_mut();
        match accessors.iter_mut().find(|a| a.name() == accessor.name()) {
            Some(slot) => *slot = accessor,
            None => accessors.push(accessor),
        }
    }

    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn render_target(&self) -> MemoryRoot {
        match &self.shadow {
            Some(root) => root.clone(),
            None => self.light.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wisp_reactive::ReactiveCell;

    #[test]
    fn test_attributes() {
        let host = MemoryHost::new().with_attribute("a", "1");
        assert_eq!(host.get_attribute("a").as_deref(), Some("1"));
        assert!(host.has_attribute("a"));

        host.remove_attribute("a");
        host.remove_attribute("a");
        assert!(!host.has_attribute("a"));
        assert_eq!(host.attribute_writes(), 1);
    }

    #[test]
    fn test_accessor_replaces_own_property() {
        let host = MemoryHost::new().with_property("count", 3);
        assert_eq!(host.own_property("count"), Some(Value::from(3)));

        let cell = ReactiveCell::new(Value::from(3));
        host.install_accessor(PropertyAccessor::new(Rc::from("count"), cell.clone()));
        assert_eq!(host.own_property("count"), None);

        host.set_property("count", 9);
        assert_eq!(cell.get(), Value::from(9));
        assert_eq!(host.property("count"), Some(Value::from(9)));
        assert_eq!(host.accessor_names(), ["count"]);
    }

    #[test]
    fn test_try_set_property_requires_accessor() {
        let host = MemoryHost::new();
        assert_eq!(
            host.try_set_property("missing", 1),
            Err(Error::unknown_property("missing"))
        );
    }

    #[test]
    fn test_render_target_prefers_shadow_root() {
        let host = MemoryHost::new();
        assert!(!host.render_target().is_shadow());

        let host = MemoryHost::new().with_shadow_root();
        let target = host.render_target();
        assert!(target.is_shadow());
        target.set_content("<p>hi</p>");
        assert_eq!(host.rendered().as_deref(), Some("<p>hi</p>"));
    }

    #[test]
    fn test_origin() {
        assert_eq!(MemoryHost::new().origin(), DEFAULT_ORIGIN);
        assert_eq!(MemoryHost::new().with_origin("https://a.test").origin(), "https://a.test");
    }
}
